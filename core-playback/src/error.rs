//! # Playback Error Types
//!
//! Media load failures are not errors in this sense: they are reported to the
//! sound's `on_error` callback and never surface as `Err`. The variants here
//! cover failures while setting up the manager or talking to the host.

use bridge_traits::BridgeError;
use thiserror::Error;

/// Errors that can occur while constructing the manager or its sounds.
#[derive(Error, Debug)]
pub enum PlaybackError {
    /// The manager was created outside a usable host (no document).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A host bridge call failed.
    #[error("Host bridge error: {0}")]
    Bridge(#[from] BridgeError),

    /// Runtime infrastructure error (config parsing, event names).
    #[error("Runtime error: {0}")]
    Runtime(#[from] core_runtime::Error),
}

impl PlaybackError {
    /// Returns `true` if the error is fatal for the whole manager.
    pub fn is_fatal(&self) -> bool {
        matches!(self, PlaybackError::Configuration(_))
    }
}

/// Result type for playback operations.
pub type Result<T> = std::result::Result<T, PlaybackError>;
