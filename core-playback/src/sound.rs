//! # Sound Abstraction
//!
//! A sound is one url played through one backend. Both backends share the
//! state in [`SoundBase`] and implement the [`Sound`] trait, whose default
//! [`Sound::play`] holds the readiness protocol:
//!
//! ```text
//!   Unloaded ──load()──> Loading ──loaded──> Ready ──play()──> Playing
//!                           │                  ▲                │  ▲
//!                           │ play()           │           pause│  │play
//!                           ▼                  │                ▼  │
//!                    deferred_play()     (error: on_error,    Paused/Stopped
//!                    (one listener,       ready unchanged)
//!                     on_play later)
//! ```
//!
//! Errors never block a later `play()`; retry policy belongs to the caller's
//! `on_error` callback.

use crate::options::{CallbackKind, OptionValue, SoundOptions};
use bridge_traits::SoundId;
use core_runtime::PlaybackContext;
use std::cell::{Cell, RefCell};
use std::fmt;

/// State shared by every backend.
pub struct SoundBase {
    url: String,
    uid: SoundId,
    options: RefCell<SoundOptions>,
    ready: Cell<bool>,
    deferred_attached: Cell<bool>,
}

impl SoundBase {
    /// Create the base state, drawing a fresh uid from `context`.
    pub fn new(context: &PlaybackContext, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            uid: context.next_uid(),
            options: RefCell::new(SoundOptions::default()),
            ready: Cell::new(false),
            deferred_attached: Cell::new(false),
        }
    }

    /// Url the sound was created for. Never changes.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Identity used to route plugin events back to this sound.
    pub fn uid(&self) -> SoundId {
        self.uid
    }

    /// Whether the backend has reported the media as loaded.
    pub fn is_ready(&self) -> bool {
        self.ready.get()
    }

    /// Whether a deferred-play listener has been attached. Never reset.
    pub fn is_deferred_attached(&self) -> bool {
        self.deferred_attached.get()
    }

    /// Merge caller options over the defaults.
    pub fn initialize(&self, options: SoundOptions) {
        tracing::debug!(uid = %self.uid, url = %self.url, ?options, "Sound initialized");
        self.options.borrow_mut().merge(options);
    }

    /// Replace one option by key. See [`SoundOptions::set`].
    pub fn set(&self, key: &str, value: OptionValue) {
        self.options.borrow_mut().set(key, value);
    }

    /// Invoke one callback with the sound's scope. Unset callbacks are no-ops.
    pub fn notify(&self, kind: CallbackKind) {
        let (callback, scope) = {
            let options = self.options.borrow();
            (options.callback(kind), options.scope())
        };
        if let Some(callback) = callback {
            callback(&*scope);
        }
    }

    /// Media loaded: mark ready, then `on_load`.
    pub fn handle_loaded(&self) {
        tracing::debug!(uid = %self.uid, "Sound loaded");
        self.ready.set(true);
        self.notify(CallbackKind::Load);
    }

    /// Media failed to load: `on_error`. Readiness is left unchanged.
    pub fn handle_error(&self) {
        tracing::warn!(uid = %self.uid, url = %self.url, "Sound failed to load");
        self.notify(CallbackKind::Error);
    }

    /// Playback reached the end: `on_finish`. No replay.
    pub fn handle_finished(&self) {
        tracing::debug!(uid = %self.uid, "Sound finished");
        self.notify(CallbackKind::Finish);
    }

    /// Claim the deferred-play slot. Returns `false` if it was already taken.
    pub fn claim_deferred(&self) -> bool {
        !self.deferred_attached.replace(true)
    }
}

impl fmt::Debug for SoundBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SoundBase")
            .field("url", &self.url)
            .field("uid", &self.uid)
            .field("ready", &self.ready.get())
            .field("deferred_attached", &self.deferred_attached.get())
            .finish()
    }
}

/// Uniform playback control over either backend.
pub trait Sound: fmt::Debug {
    /// Shared state backing the provided methods.
    fn base(&self) -> &SoundBase;

    /// Attach backend listeners, start loading, then merge options.
    ///
    /// Constructors call this exactly once.
    fn initialize(&self, options: SoundOptions);

    /// Issue the backend play command.
    fn play_internal(&self);

    /// Arrange for playback once the media is ready.
    fn deferred_play(&self);

    /// Pause playback, keeping the position, then `on_pause`.
    fn pause(&self);

    /// Pause and rewind to the start, then `on_stop`.
    fn stop(&self);

    /// Current playback position in seconds.
    fn time(&self) -> f64;

    /// Play now if ready, otherwise defer until the media is loaded.
    ///
    /// On the ready path `on_play` runs after the play command. On the
    /// deferred path it is left to [`Sound::deferred_play`].
    fn play(&self) {
        if self.is_ready() {
            self.play_internal();
            self.base().notify(CallbackKind::Play);
        } else {
            tracing::debug!(uid = %self.uid(), "Sound not ready, deferring play");
            self.deferred_play();
        }
    }

    /// Url the sound plays.
    fn url(&self) -> &str {
        self.base().url()
    }

    /// Process-unique identity of the sound.
    fn uid(&self) -> SoundId {
        self.base().uid()
    }

    /// Whether the media is loaded.
    fn is_ready(&self) -> bool {
        self.base().is_ready()
    }

    /// Override a single option after construction.
    fn set(&self, key: &str, value: OptionValue) {
        self.base().set(key, value);
    }
}
