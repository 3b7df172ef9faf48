//! Native media element bridge and shared sound identity types.
//!
//! The streaming backend drives a host-provided media element (an HTML
//! `<audio>` element in the browser). The element is a handle: every method
//! takes `&self` and implementations are expected to use interior mutability,
//! mirroring how browser objects behave.
//!
//! All listeners run on the host's single event loop, so nothing here is
//! `Send` or `Sync`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Process-unique identity of a sound.
///
/// Issued monotonically by the playback context at construction time and
/// used to route plugin completion events back to the originating sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SoundId(u64);

impl SoundId {
    /// Wrap a raw identifier.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw numeric value, as passed to the plugin runtime.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Media events a host element can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaEvent {
    /// Enough data is buffered to start playback (`loadeddata`).
    LoadedData,
    /// The media could not be fetched or decoded (`error`).
    Error,
    /// Playback reached the end of the media (`ended`).
    Ended,
}

impl MediaEvent {
    /// DOM event name for this event.
    pub fn dom_name(self) -> &'static str {
        match self {
            MediaEvent::LoadedData => "loadeddata",
            MediaEvent::Error => "error",
            MediaEvent::Ended => "ended",
        }
    }
}

/// Listener kept for the element's whole lifetime.
pub type MediaListener = Box<dyn FnMut()>;

/// Listener removed after its first invocation.
pub type OneShotListener = Box<dyn FnOnce()>;

/// Native decoding/playback primitive bound to a single url.
pub trait MediaElement {
    /// Register a listener that fires on every occurrence of `event`.
    fn add_listener(&self, event: MediaEvent, listener: MediaListener);

    /// Register a listener that fires on the next occurrence of `event` only.
    fn add_one_shot_listener(&self, event: MediaEvent, listener: OneShotListener);

    /// Begin (or restart) loading the bound url.
    fn load(&self);

    /// Start or resume playback.
    fn play(&self);

    /// Pause playback, keeping the current position.
    fn pause(&self);

    /// Current playback position in seconds.
    fn current_time(&self) -> f64;

    /// Seek to `seconds`.
    fn set_current_time(&self, seconds: f64);
}
