//! Memory subsystem — the two file-backed repositories the assistant owns.
//!
//! ```text
//! {work_dir}/
//! ├── memory.json        — profile, long-term facts, last 5 turns
//! └── personality.json   — humor_level (+ any other keys)
//! ```
//!
//! Both are single-writer: only the current turn touches them, so there is
//! no locking. Writes land in a sibling temp file and are renamed into place.

pub mod personality;
pub mod store;
pub mod types;

pub use personality::{Personality, PersonalityStore};
pub use store::MemoryStore;
pub use types::{LongTerm, Memory, Turn};

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::AppError;

/// Serialise `value` as pretty JSON and replace `path` with it.
pub(crate) fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), AppError> {
    let data = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::StorageUnavailable(format!("serialise {}: {e}", path.display())))?;

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = Path::new(&tmp);

    fs::write(tmp, data)
        .map_err(|e| AppError::StorageUnavailable(format!("cannot write {}: {e}", tmp.display())))?;
    fs::rename(tmp, path).map_err(|e| {
        let _ = fs::remove_file(tmp);
        AppError::StorageUnavailable(format!("cannot replace {}: {e}", path.display()))
    })
}
