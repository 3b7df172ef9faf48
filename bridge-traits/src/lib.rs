//! # Host Bridge Traits
//!
//! Platform abstraction traits that must be implemented by each host.
//!
//! ## Overview
//!
//! This crate defines the contract between the playback core and the page it
//! runs in. Each trait represents a capability the core requires but that is
//! provided differently per host (a real browser through `bridge-wasm`, or a
//! scripted fake in tests).
//!
//! ## Traits
//!
//! - [`MediaElement`](media::MediaElement) - Native streaming media primitive
//! - [`PluginHost`](plugin::PluginHost) - Embedded plugin player commands
//! - [`HostEnvironment`](host::HostEnvironment) - Capability check, element
//!   lookup, window listeners, script and plugin injection
//!
//! ## Threading
//!
//! Hosts run a single event loop. Bridge objects are shared with `Rc` and
//! listeners are plain `FnMut`/`FnOnce` boxes without `Send` bounds.
//!
//! ## Error Handling
//!
//! Fallible host operations return [`BridgeError`](error::BridgeError).
//! Implementations should convert host-specific failures (JavaScript
//! exceptions, missing elements) into it with an actionable message.

pub mod error;
pub mod host;
pub mod media;
pub mod plugin;

pub use error::BridgeError;

pub use host::{CanPlayType, EmbedRequest, HostEnvironment, ScriptRequest};
pub use media::{MediaElement, MediaEvent, MediaListener, OneShotListener, SoundId};
pub use plugin::PluginHost;
