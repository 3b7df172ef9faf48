//! # Event Bus System
//!
//! Process-wide registry of named events used to signal cross-cutting
//! completion events, most importantly the plugin runtime reporting that a
//! sound finished playing.
//!
//! ## Overview
//!
//! The plugin player reports completion through a single global bridge, not
//! per sound. The bus demultiplexes those signals: every event is keyed by an
//! [`EventKind`] plus the [`SoundId`] it concerns, so a completion for sound
//! `5` reaches only the listeners registered for `(SoundEnd, 5)`.
//!
//! ```text
//! ┌──────────────┐  "mzSoundEnd:5"  ┌───────────┐  (SoundEnd, 5)  ┌──────────┐
//! │ plugin bridge├─────────────────>│ EventBus  ├────────────────>│ sound #5 │
//! └──────────────┘   parsed once    │ (routing  │                 └──────────┘
//!                                   │  table)   │  (SoundEnd, 6)  ┌──────────┐
//!                                   │           ├ ─ ─ ─ ─ ─ ─ ─ ─>│ sound #6 │
//!                                   └───────────┘   not dispatched└──────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use core_runtime::events::{EventBus, EventKey};
//! use bridge_traits::SoundId;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let bus = EventBus::new();
//! let finished = Rc::new(Cell::new(false));
//!
//! let flag = Rc::clone(&finished);
//! bus.add_listener(EventKey::sound_end(SoundId::new(5)), move || flag.set(true));
//!
//! bus.dispatch(EventKey::sound_end(SoundId::new(5)));
//! assert!(finished.get());
//! ```
//!
//! ## Semantics
//!
//! - Listeners for a key run in registration order.
//! - Lists are append-only; nothing is pruned until the owning context is
//!   torn down.
//! - Dispatching a key with no listeners is a no-op.
//! - Listeners may register further listeners or dispatch other events while
//!   running; the listener list is snapshotted before delivery.

use crate::error::Error;
use bridge_traits::SoundId;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

/// Listener callback. Events carry no payload.
pub type Listener = Rc<dyn Fn()>;

/// Prefix used by the plugin runtime for every event name.
const EVENT_PREFIX: &str = "mz";

/// Kinds of events routed through the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Plugin runtime finished playing a sound.
    SoundEnd,
    /// Plugin runtime finished loading a sound.
    SoundLoaded,
    /// Plugin runtime failed to load a sound.
    SoundError,
    /// Plugin runtime became available.
    PluginReady,
}

impl EventKind {
    fn wire_name(self) -> &'static str {
        match self {
            EventKind::SoundEnd => "SoundEnd",
            EventKind::SoundLoaded => "SoundLoaded",
            EventKind::SoundError => "SoundError",
            EventKind::PluginReady => "PluginReady",
        }
    }

    fn from_wire_name(name: &str) -> Option<Self> {
        match name {
            "SoundEnd" => Some(EventKind::SoundEnd),
            "SoundLoaded" => Some(EventKind::SoundLoaded),
            "SoundError" => Some(EventKind::SoundError),
            "PluginReady" => Some(EventKind::PluginReady),
            _ => None,
        }
    }

    /// Returns a human-readable description of the event.
    pub fn description(self) -> &'static str {
        match self {
            EventKind::SoundEnd => "Sound finished playing",
            EventKind::SoundLoaded => "Sound loaded",
            EventKind::SoundError => "Sound failed to load",
            EventKind::PluginReady => "Plugin runtime ready",
        }
    }
}

/// Routing key: event kind plus the sound it concerns, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventKey {
    pub kind: EventKind,
    pub uid: Option<SoundId>,
}

impl EventKey {
    pub fn new(kind: EventKind, uid: Option<SoundId>) -> Self {
        Self { kind, uid }
    }

    pub fn global(kind: EventKind) -> Self {
        Self::new(kind, None)
    }

    pub fn for_sound(kind: EventKind, uid: SoundId) -> Self {
        Self::new(kind, Some(uid))
    }

    pub fn sound_end(uid: SoundId) -> Self {
        Self::for_sound(EventKind::SoundEnd, uid)
    }
}

/// Wire form: `mz<Kind>` or `mz<Kind>:<uid>`.
impl fmt::Display for EventKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", EVENT_PREFIX, self.kind.wire_name())?;
        if let Some(uid) = self.uid {
            write!(f, ":{}", uid)?;
        }
        Ok(())
    }
}

impl FromStr for EventKey {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let unknown = || Error::UnknownEvent(name.to_string());

        let rest = name.strip_prefix(EVENT_PREFIX).ok_or_else(unknown)?;
        let (kind, uid) = match rest.split_once(':') {
            Some((kind, uid)) => {
                let uid = uid.parse::<u64>().map_err(|_| unknown())?;
                (kind, Some(SoundId::new(uid)))
            }
            None => (rest, None),
        };
        let kind = EventKind::from_wire_name(kind).ok_or_else(unknown)?;

        Ok(EventKey::new(kind, uid))
    }
}

/// Typed routing table from [`EventKey`] to ordered listeners.
#[derive(Default)]
pub struct EventBus {
    listeners: RefCell<HashMap<EventKey, Vec<Listener>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a listener for `key`.
    pub fn add_listener(&self, key: EventKey, listener: impl Fn() + 'static) {
        self.listeners
            .borrow_mut()
            .entry(key)
            .or_default()
            .push(Rc::new(listener));
    }

    /// Deliver `key` to its listeners. Returns how many were invoked.
    pub fn dispatch(&self, key: EventKey) -> usize {
        tracing::debug!(event = %key, "dispatch");

        let snapshot = match self.listeners.borrow().get(&key) {
            Some(listeners) => listeners.clone(),
            None => return 0,
        };

        for listener in &snapshot {
            listener();
        }
        snapshot.len()
    }

    pub fn listener_count(&self, key: EventKey) -> usize {
        self.listeners
            .borrow()
            .get(&key)
            .map(Vec::len)
            .unwrap_or(0)
    }

    /// Drop every listener.
    pub(crate) fn clear(&self) {
        self.listeners.borrow_mut().clear();
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("keys", &self.listeners.borrow().len())
            .finish()
    }
}
