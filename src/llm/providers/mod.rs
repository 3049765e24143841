//! LLM provider implementations.
//!
//! `build(config)` is the factory — called at startup.
//! Adding a new backend = new module + new match arm.

pub mod dummy;
pub mod process;

use crate::config::ModelConfig;
use crate::llm::{LlmProvider, ProviderError};

/// Construct a `LlmProvider` from the `[model]` config section.
pub fn build(config: &ModelConfig) -> Result<LlmProvider, ProviderError> {
    match config.provider.as_str() {
        "process" => {
            let p = &config.process;
            Ok(LlmProvider::Process(process::ProcessProvider::new(
                p.command.clone(),
                p.args.clone(),
                p.timeout_seconds,
            )?))
        }
        "dummy" => Ok(LlmProvider::Dummy(dummy::DummyProvider::new(config.dummy.reply.clone()))),
        _ => Err(ProviderError::UnknownProvider(config.provider.clone())),
    }
}
