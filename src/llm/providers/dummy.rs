//! Dummy LLM provider — returns a fixed reply regardless of the prompt.
//! Used for offline runs and as the canned-text double in tests.

use crate::llm::ProviderError;

#[derive(Debug, Clone)]
pub struct DummyProvider {
    reply: String,
}

impl DummyProvider {
    pub fn new(reply: impl Into<String>) -> Self {
        Self { reply: reply.into() }
    }

    pub async fn complete(&self, _prompt: &str) -> Result<String, ProviderError> {
        Ok(self.reply.clone())
    }
}
