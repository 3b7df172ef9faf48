//! Process-wide playback context.
//!
//! Holds the state every sound shares: the uid counter, the event bus and
//! the plugin-runtime readiness latch. One context is created per page (or
//! per test) and handed to components by `Rc`, so tests get fresh state
//! without touching globals.

use crate::error::Result;
use crate::events::{EventBus, EventKey, EventKind};
use crate::latch::Latch;
use bridge_traits::SoundId;
use std::cell::Cell;
use std::fmt;

/// Shared uid counter, event bus and plugin-ready latch.
///
/// Single-threaded; share it with `Rc`.
pub struct PlaybackContext {
    next_uid: Cell<u64>,
    events: EventBus,
    plugin_ready: Latch,
}

impl PlaybackContext {
    /// Fresh context: uids start at 0, no listeners, plugin not ready.
    pub fn new() -> Self {
        Self {
            next_uid: Cell::new(0),
            events: EventBus::new(),
            plugin_ready: Latch::new("plugin-ready"),
        }
    }

    /// Issue the next sound identity. Identities are never reused.
    pub fn next_uid(&self) -> SoundId {
        let uid = self.next_uid.get();
        self.next_uid.set(uid + 1);
        SoundId::new(uid)
    }

    /// The shared event bus.
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Latch opened once the plugin runtime is available.
    pub fn plugin_ready(&self) -> &Latch {
        &self.plugin_ready
    }

    pub fn is_plugin_ready(&self) -> bool {
        self.plugin_ready.is_open()
    }

    /// Open the plugin-ready latch and announce it on the bus.
    ///
    /// Returns the number of queued callbacks that were drained. Calling this
    /// again is a no-op.
    pub fn mark_plugin_ready(&self) -> usize {
        if self.plugin_ready.is_open() {
            return 0;
        }
        let drained = self.plugin_ready.open();
        self.events.dispatch(EventKey::global(EventKind::PluginReady));
        drained
    }

    /// Deliver `key` on the bus. Returns how many listeners ran.
    pub fn dispatch(&self, key: EventKey) -> usize {
        self.events.dispatch(key)
    }

    /// Dispatch an event received by name from the plugin bridge,
    /// e.g. `mzSoundEnd:5`.
    pub fn dispatch_named(&self, name: &str) -> Result<usize> {
        let key: EventKey = name.parse()?;
        if key.kind == EventKind::PluginReady {
            return Ok(self.mark_plugin_ready());
        }
        Ok(self.events.dispatch(key))
    }

    /// Drop all listeners and queued callbacks and close the plugin latch.
    ///
    /// The uid counter keeps counting so identities stay unique for the life
    /// of the context.
    pub fn teardown(&self) {
        self.events.clear();
        self.plugin_ready.reset();
        tracing::debug!("Playback context torn down");
    }
}

impl Default for PlaybackContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PlaybackContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaybackContext")
            .field("next_uid", &self.next_uid.get())
            .field("events", &self.events)
            .field("plugin_ready", &self.plugin_ready)
            .finish()
    }
}
