//! Runtime error types

use thiserror::Error;

/// Errors raised by the runtime infrastructure.

#[derive(Error, Debug)]
pub enum Error {
    /// Manager or logging configuration was rejected.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An event name from the plugin bridge could not be parsed.
    #[error("Unknown event name: {0}")]
    UnknownEvent(String),

    /// The latch was reset before it opened; its waiters were discarded.
    #[error("Latch {0} was reset before opening")]
    LatchReset(&'static str),
}

/// Result type for runtime operations.
pub type Result<T> = std::result::Result<T, Error>;
