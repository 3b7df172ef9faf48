//! # Playback Module
//!
//! Single-sound playback over two mutually exclusive backends.
//!
//! ## Overview
//!
//! - [`StreamingSound`] drives the host's native media element.
//! - [`PluginSound`] drives an embedded plugin player that becomes available
//!   out-of-band.
//! - [`AudioManager`] asks the host once, picks one of the two, and builds
//!   sounds for it.
//!
//! Callers only see [`Sound`]: `play`, `pause`, `stop` and `time` behave the
//! same on both backends. Playing before the media is ready defers playback
//! until the backend reports readiness.
//!
//! ## Known limitation
//!
//! Deferred plays cannot be cancelled. Once queued they fire even if the
//! caller has dropped the sound, and they keep the sound alive until then.

pub mod error;
pub mod manager;
pub mod options;
pub mod plugin;
pub mod sound;
pub mod streaming;

pub use error::{PlaybackError, Result};
pub use manager::{AudioManager, Backend};
pub use options::{CallbackKind, OptionValue, SoundOptions};
pub use plugin::PluginSound;
pub use sound::{Sound, SoundBase};
pub use streaming::StreamingSound;
