//! `PersonalityStore` — self-initialising key-value record for tunable traits.
//!
//! Today the only known key is `humor_level` (0–100). The record is kept as
//! an open JSON object so keys written by other tools survive a `set`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{info, warn};

use super::write_json_atomic;
use crate::error::AppError;

pub const HUMOR_MIN: i64 = 0;
pub const HUMOR_MAX: i64 = 100;

/// Resolved personality parameters handed to the prompt assembler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Personality {
    pub humor_level: u8,
}

/// On-disk shape of `personality.json`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct PersonalityFile {
    #[serde(default)]
    humor_level: i64,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

pub fn clamp_humor(value: i64) -> u8 {
    value.clamp(HUMOR_MIN, HUMOR_MAX) as u8
}

#[derive(Debug, Clone)]
pub struct PersonalityStore {
    path: PathBuf,
}

impl PersonalityStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current humor level. Writes the default record first if none exists.
    pub fn get(&self) -> Result<u8, AppError> {
        Ok(self.load()?.humor_level)
    }

    pub fn load(&self) -> Result<Personality, AppError> {
        match self.read_file()? {
            Some(file) => Ok(Personality { humor_level: clamp_humor(file.humor_level) }),
            None => {
                info!(path = %self.path.display(), "personality record missing, writing default");
                write_json_atomic(&self.path, &PersonalityFile::default())?;
                Ok(Personality::default())
            }
        }
    }

    /// Clamp `value` into [0, 100] and persist it. Returns the stored level.
    pub fn set(&self, value: i64) -> Result<u8, AppError> {
        let level = clamp_humor(value);
        let mut file = match self.read_file() {
            Ok(existing) => existing.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "personality record unreadable, overwriting");
                PersonalityFile::default()
            }
        };
        file.humor_level = i64::from(level);
        write_json_atomic(&self.path, &file)?;
        info!(humor_level = level, "humor level updated");
        Ok(level)
    }

    fn read_file(&self) -> Result<Option<PersonalityFile>, AppError> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(AppError::StorageUnavailable(format!(
                    "cannot read {}: {e}",
                    self.path.display()
                )));
            }
        };
        serde_json::from_str(&data).map(Some).map_err(|e| {
            AppError::StorageUnavailable(format!("malformed {}: {e}", self.path.display()))
        })
    }
}
