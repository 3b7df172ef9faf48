//! WebAssembly Bridge Implementations
//!
//! Browser implementations of the host traits defined in `bridge-traits`,
//! built on `web-sys` and `wasm-bindgen`.
//!
//! # Platform Support
//!
//! This crate is designed exclusively for the `wasm32-unknown-unknown` target.
//! It will not compile for native targets.
//!
//! # Implementations
//!
//! - [`BrowserEnvironment`]: document check, canPlayType, `<audio>` creation, loader script
//!   injection and plugin embedding
//! - [`WebMediaElement`]: the streaming backend's native element
//! - [`WebPluginHost`]: scripted calls into the embedded plugin player
//! - [`install_event_bridge`]: the global function the plugin reports
//!   `mzSoundEnd:<uid>` and friends through
//!
//! # Examples
//!
//! ```ignore
//! use bridge_wasm::{install_event_bridge, BrowserEnvironment, DEFAULT_DISPATCH_PATH};
//! use core_playback::AudioManager;
//! use core_runtime::{config::ManagerConfig, PlaybackContext};
//! use std::rc::Rc;
//!
//! let context = Rc::new(PlaybackContext::new());
//! install_event_bridge(Rc::clone(&context), DEFAULT_DISPATCH_PATH)?;
//! let host = Rc::new(BrowserEnvironment::new()?);
//! let manager = AudioManager::with_context(host, ManagerConfig::default(), context)?;
//! ```

#![cfg(target_arch = "wasm32")]
#![warn(missing_docs)]

pub mod bridge;
pub mod environment;
pub mod error;
pub mod media;
pub mod plugin;

// Re-export commonly used types
pub use bridge::{install_event_bridge, DEFAULT_DISPATCH_PATH};
pub use environment::BrowserEnvironment;
pub use error::{WasmError, WasmResult};
pub use media::WebMediaElement;
pub use plugin::WebPluginHost;
