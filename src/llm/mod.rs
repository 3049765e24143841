//! Model gateway — the text-completion capability behind the fallback path.
//!
//! `LlmProvider` is an enum over concrete provider implementations.
//! Add a new variant + module in `providers/` for each additional backend.
//!
//! One call is one request/response: the whole prompt goes in, the whole
//! completion comes out. There is no streaming and no retry.

pub mod providers;

use thiserror::Error;

// ── Error ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("unknown provider: {0}")]
    UnknownProvider(String),
    #[error("failed to start completion process: {0}")]
    Spawn(String),
    #[error("provider request failed: {0}")]
    Request(String),
    #[error("completion timed out after {0}s")]
    Timeout(u64),
    /// The provider answered, but only with whitespace.
    #[error("empty completion")]
    EmptyCompletion,
}

// ── Provider enum ─────────────────────────────────────────────────────────────

/// All available provider backends.
///
/// Enum dispatch keeps callers free of trait objects; the `Dummy` variant is
/// the test double.
#[derive(Debug, Clone)]
pub enum LlmProvider {
    Process(providers::process::ProcessProvider),
    Dummy(providers::dummy::DummyProvider),
}

impl LlmProvider {
    /// Send `prompt` to the provider and return its trimmed reply.
    ///
    /// A blank reply is reported as [`ProviderError::EmptyCompletion`] so
    /// no caller has to re-check for it.
    pub async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let raw = match self {
            LlmProvider::Process(p) => p.complete(prompt).await?,
            LlmProvider::Dummy(p) => p.complete(prompt).await?,
        };
        let reply = raw.trim();
        if reply.is_empty() {
            return Err(ProviderError::EmptyCompletion);
        }
        Ok(reply.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use providers::dummy::DummyProvider;

    #[tokio::test]
    async fn reply_is_trimmed() {
        let p = LlmProvider::Dummy(DummyProvider::new("  Sure, Boss.\n\n"));
        assert_eq!(p.complete("prompt").await.unwrap(), "Sure, Boss.");
    }

    #[tokio::test]
    async fn whitespace_reply_is_empty_completion() {
        let p = LlmProvider::Dummy(DummyProvider::new(" \n\t "));
        assert!(matches!(p.complete("prompt").await, Err(ProviderError::EmptyCompletion)));
    }
}
