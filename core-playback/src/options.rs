//! Sound callback options.
//!
//! A sound carries six named callbacks and a `scope` value handed to every
//! callback as its call context. Unset callbacks are no-ops. Options given at
//! construction are merged over these defaults; [`SoundOptions::set`] changes
//! one entry afterwards.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Call context passed to every callback.
pub type Scope = Rc<dyn Any>;

/// Sound callback. Receives the sound's scope.
pub type Callback = Rc<dyn Fn(&dyn Any)>;

/// The recognized callback slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallbackKind {
    Load,
    Error,
    Play,
    Finish,
    Pause,
    Stop,
}

impl CallbackKind {
    pub const ALL: [CallbackKind; 6] = [
        CallbackKind::Load,
        CallbackKind::Error,
        CallbackKind::Play,
        CallbackKind::Finish,
        CallbackKind::Pause,
        CallbackKind::Stop,
    ];

    /// Option key naming this slot.
    pub fn key(self) -> &'static str {
        match self {
            CallbackKind::Load => "onLoad",
            CallbackKind::Error => "onError",
            CallbackKind::Play => "onPlay",
            CallbackKind::Finish => "onFinish",
            CallbackKind::Pause => "onPause",
            CallbackKind::Stop => "onStop",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }
}

/// Key of the scope option.
pub const SCOPE_KEY: &str = "scope";

/// Value stored through [`SoundOptions::set`].
#[derive(Clone)]
pub enum OptionValue {
    /// Replaces a callback slot when stored under a callback key.
    Callback(Callback),
    /// Replaces the scope when stored under `scope`.
    Scope(Scope),
}

impl OptionValue {
    pub fn callback(f: impl Fn(&dyn Any) + 'static) -> Self {
        OptionValue::Callback(Rc::new(f))
    }

    pub fn scope<T: Any>(value: T) -> Self {
        OptionValue::Scope(Rc::new(value))
    }
}

impl fmt::Debug for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Callback(_) => f.write_str("Callback(..)"),
            OptionValue::Scope(_) => f.write_str("Scope(..)"),
        }
    }
}

/// Callback set for one sound.
///
/// Used both for caller-supplied overrides and for the sound's merged
/// options; an absent entry means "not supplied" (overrides) or "no-op"
/// (merged).
#[derive(Clone, Default)]
pub struct SoundOptions {
    callbacks: HashMap<CallbackKind, Callback>,
    scope: Option<Scope>,
    extra: HashMap<String, OptionValue>,
}

impl SoundOptions {
    /// Empty set: nothing supplied.
    pub fn new() -> Self {
        Self::default()
    }

    /// Supply the callback for `kind`. The `on_*` helpers wrap this.
    pub fn with_callback(mut self, kind: CallbackKind, f: impl Fn(&dyn Any) + 'static) -> Self {
        self.callbacks.insert(kind, Rc::new(f));
        self
    }

    pub fn on_load(self, f: impl Fn(&dyn Any) + 'static) -> Self {
        self.with_callback(CallbackKind::Load, f)
    }

    pub fn on_error(self, f: impl Fn(&dyn Any) + 'static) -> Self {
        self.with_callback(CallbackKind::Error, f)
    }

    pub fn on_play(self, f: impl Fn(&dyn Any) + 'static) -> Self {
        self.with_callback(CallbackKind::Play, f)
    }

    pub fn on_finish(self, f: impl Fn(&dyn Any) + 'static) -> Self {
        self.with_callback(CallbackKind::Finish, f)
    }

    pub fn on_pause(self, f: impl Fn(&dyn Any) + 'static) -> Self {
        self.with_callback(CallbackKind::Pause, f)
    }

    pub fn on_stop(self, f: impl Fn(&dyn Any) + 'static) -> Self {
        self.with_callback(CallbackKind::Stop, f)
    }

    /// Value handed to every callback of the sound.
    pub fn with_scope<T: Any>(mut self, scope: T) -> Self {
        self.scope = Some(Rc::new(scope));
        self
    }

    /// Shallow merge: every entry present in `overrides` replaces ours,
    /// absent entries leave ours untouched.
    pub fn merge(&mut self, overrides: SoundOptions) {
        self.callbacks.extend(overrides.callbacks);
        if let Some(scope) = overrides.scope {
            self.scope = Some(scope);
        }
        self.extra.extend(overrides.extra);
    }

    /// Store a single option by key.
    ///
    /// Keys are not validated. A recognized callback key with a callback
    /// value, or `scope` with a scope value, replaces that slot; anything
    /// else is kept under its key and never invoked.
    pub fn set(&mut self, key: &str, value: OptionValue) {
        match (CallbackKind::from_key(key), value) {
            (Some(kind), OptionValue::Callback(callback)) => {
                self.callbacks.insert(kind, callback);
            }
            (None, OptionValue::Scope(scope)) if key == SCOPE_KEY => {
                self.scope = Some(scope);
            }
            (_, value) => {
                self.extra.insert(key.to_string(), value);
            }
        }
    }

    /// Callback supplied for `kind`, if any.
    pub fn callback(&self, kind: CallbackKind) -> Option<Callback> {
        self.callbacks.get(&kind).cloned()
    }

    pub fn has_callback(&self, kind: CallbackKind) -> bool {
        self.callbacks.contains_key(&kind)
    }

    /// The scope, or a unit scope when none was supplied.
    pub fn scope(&self) -> Scope {
        self.scope.clone().unwrap_or_else(|| Rc::new(()) as Scope)
    }

    /// Option stored under a key that has no recognized meaning.
    pub fn extra(&self, key: &str) -> Option<&OptionValue> {
        self.extra.get(key)
    }
}

impl fmt::Debug for SoundOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut set: Vec<&str> = CallbackKind::ALL
            .iter()
            .filter(|kind| self.callbacks.contains_key(*kind))
            .map(|kind| kind.key())
            .collect();
        set.sort_unstable();

        f.debug_struct("SoundOptions")
            .field("callbacks", &set)
            .field("scope", &self.scope.is_some())
            .field("extra", &self.extra.keys().collect::<Vec<_>>())
            .finish()
    }
}
