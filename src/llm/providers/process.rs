//! Process-backed completion provider, e.g. `ollama run mistral`.
//!
//! The prompt is written to the child's stdin, stdin is closed, and the
//! whole of stdout is the completion. The child is killed if the configured
//! timeout elapses first.

use std::process::Stdio;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::llm::ProviderError;

#[derive(Debug, Clone)]
pub struct ProcessProvider {
    command: String,
    args: Vec<String>,
    timeout_seconds: u64,
}

impl ProcessProvider {
    pub fn new(command: String, args: Vec<String>, timeout_seconds: u64) -> Result<Self, ProviderError> {
        if command.trim().is_empty() {
            return Err(ProviderError::Spawn("model command must not be empty".into()));
        }
        if timeout_seconds == 0 {
            return Err(ProviderError::Spawn("model timeout must be at least 1 second".into()));
        }
        Ok(Self { command, args, timeout_seconds })
    }

    pub async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        debug!(
            command = %self.command,
            args = ?self.args,
            prompt_len = prompt.len(),
            "spawning completion process"
        );

        let mut child = Command::new(&self.command)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ProviderError::Spawn(format!("{}: {e}", self.command)))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| ProviderError::Spawn("child stdin unavailable".into()))?;

        // Feed stdin while draining stdout so a chatty child cannot stall on a
        // full pipe before it has read the whole prompt.
        let feed = async move {
            stdin.write_all(prompt.as_bytes()).await?;
            stdin.shutdown().await?;
            Ok::<(), std::io::Error>(())
        };
        let run = async { tokio::join!(feed, child.wait_with_output()) };

        let (fed, output) = tokio::time::timeout(Duration::from_secs(self.timeout_seconds), run)
            .await
            .map_err(|_| {
                warn!(command = %self.command, timeout = self.timeout_seconds, "completion process timed out");
                ProviderError::Timeout(self.timeout_seconds)
            })?;

        if let Err(e) = fed {
            // A child that exits without reading stdin is still allowed to answer.
            debug!(error = %e, "could not write full prompt to completion process");
        }

        let output = output.map_err(|e| ProviderError::Request(format!("waiting on {}: {e}", self.command)))?;

        if !output.stderr.is_empty() {
            debug!(stderr = %String::from_utf8_lossy(&output.stderr), "completion process stderr");
        }
        if !output.status.success() {
            warn!(status = %output.status, "completion process exited unsuccessfully");
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
