//! Application-wide error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("logger error: {0}")]
    Logger(String),

    /// A persisted record is missing, unreadable, malformed or unwritable.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Network failure, timeout or malformed response from a context provider.
    #[error("provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// A user command was recognised but its argument could not be parsed.
    #[error("invalid command argument: {0}")]
    InvalidCommandArgument(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
