//! # Plugin Backend
//!
//! Plays a sound through an embedded plugin player. The plugin runtime
//! bootstraps out-of-band, so the host element may not exist when the sound
//! is built. Two gates must open before anything is heard:
//!
//! 1. the global plugin-ready latch on the [`PlaybackContext`], and
//! 2. the sound's own media readiness, reported by the plugin.
//!
//! The plugin reports completion through one global bridge rather than per
//! sound, so the sound subscribes to `(SoundEnd, uid)` on the event bus and
//! the bridge dispatches by uid.

use crate::options::{CallbackKind, SoundOptions};
use crate::sound::{Sound, SoundBase};
use bridge_traits::{HostEnvironment, MediaEvent, PluginHost};
use core_runtime::events::{EventKey, EventKind};
use core_runtime::PlaybackContext;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Sound played through the embedded plugin player.
///
/// Built through [`PluginSound::new`], which returns an `Rc` because bus
/// subscriptions and queued plays refer back to the sound.
pub struct PluginSound {
    base: SoundBase,
    host_element_id: String,
    host: RefCell<Option<Rc<dyn PluginHost>>>,
    environment: Rc<dyn HostEnvironment>,
    context: Rc<PlaybackContext>,
    this: Weak<PluginSound>,
}

impl PluginSound {
    /// Create a sound for `url` played by the plugin hosted in the element
    /// with id `host_element_id`.
    ///
    /// The element is looked up right away; if it does not exist yet it is
    /// looked up again when playback is requested.
    pub fn new(
        context: Rc<PlaybackContext>,
        environment: Rc<dyn HostEnvironment>,
        url: impl Into<String>,
        options: SoundOptions,
        host_element_id: impl Into<String>,
    ) -> Rc<Self> {
        let host_element_id = host_element_id.into();
        let host = environment.plugin_host(&host_element_id);

        let sound = Rc::new_cyclic(|this| Self {
            base: SoundBase::new(&context, url),
            host_element_id,
            host: RefCell::new(host),
            environment,
            context,
            this: this.clone(),
        });
        sound.initialize(options);
        sound
    }

    /// Id of the element hosting the plugin player.
    pub fn host_element_id(&self) -> &str {
        &self.host_element_id
    }

    /// Whether the host element has been found. Once true it stays true.
    pub fn is_host_resolved(&self) -> bool {
        self.host.borrow().is_some()
    }

    fn current_host(&self) -> Option<Rc<dyn PluginHost>> {
        self.host.borrow().clone()
    }

    /// Look the host element up again. A resolved host is never replaced.
    fn resolve_host(&self) -> Option<Rc<dyn PluginHost>> {
        if let Some(host) = self.current_host() {
            return Some(host);
        }
        let host = self.environment.plugin_host(&self.host_element_id)?;
        tracing::debug!(uid = %self.base.uid(), element = %self.host_element_id, "Plugin host resolved");
        *self.host.borrow_mut() = Some(Rc::clone(&host));
        Some(host)
    }

    fn subscribe(&self, kind: EventKind, handler: fn(&SoundBase)) {
        let this = self.this.clone();
        self.context
            .events()
            .add_listener(EventKey::for_sound(kind, self.base.uid()), move || {
                if let Some(sound) = this.upgrade() {
                    handler(&sound.base);
                }
            });
    }
}

impl Sound for PluginSound {
    fn base(&self) -> &SoundBase {
        &self.base
    }

    fn initialize(&self, options: SoundOptions) {
        self.subscribe(EventKind::SoundEnd, SoundBase::handle_finished);
        self.subscribe(EventKind::SoundLoaded, SoundBase::handle_loaded);
        self.subscribe(EventKind::SoundError, SoundBase::handle_error);

        self.base.initialize(options);
    }

    /// Play through the plugin, waiting for the plugin runtime if needed.
    ///
    /// Before the runtime is ready this queues exactly one retry on the
    /// plugin-ready latch and returns.
    fn play_internal(&self) {
        let host = match self.current_host() {
            Some(host) => Some(host),
            None if self.context.is_plugin_ready() => self.resolve_host(),
            None => {
                let Some(this) = self.this.upgrade() else {
                    return;
                };
                tracing::debug!(uid = %self.base.uid(), "Plugin runtime not ready, queueing play");
                self.context.plugin_ready().when_open(move || {
                    this.resolve_host();
                    this.play_internal();
                });
                return;
            }
        };

        match host {
            Some(host) => host.play_track(self.base.url(), self.base.uid()),
            None => tracing::warn!(
                uid = %self.base.uid(),
                element = %self.host_element_id,
                "Plugin runtime ready but host element missing, dropping play request"
            ),
        }
    }

    /// Attach a window-level one-shot loaded listener running `on_play`,
    /// then request playback right away. Further calls are no-ops.
    fn deferred_play(&self) {
        if !self.base.claim_deferred() {
            return;
        }
        let Some(this) = self.this.upgrade() else {
            return;
        };

        self.environment.add_window_listener(
            MediaEvent::LoadedData,
            Box::new(move || this.base.notify(CallbackKind::Play)),
        );
        self.play_internal();
    }

    fn pause(&self) {
        match self.current_host() {
            Some(host) => {
                host.pause_track();
                self.base.notify(CallbackKind::Pause);
            }
            None => tracing::debug!(uid = %self.base.uid(), "Pause ignored, plugin host unresolved"),
        }
    }

    fn stop(&self) {
        match self.current_host() {
            Some(host) => {
                host.stop_track();
                self.base.notify(CallbackKind::Stop);
            }
            None => tracing::debug!(uid = %self.base.uid(), "Stop ignored, plugin host unresolved"),
        }
    }

    /// Plugin position in seconds, or 0 before the host resolves.
    fn time(&self) -> f64 {
        self.current_host().map_or(0.0, |host| host.get_time())
    }
}

impl fmt::Debug for PluginSound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginSound")
            .field("base", &self.base)
            .field("host_element_id", &self.host_element_id)
            .field("host_resolved", &self.is_host_resolved())
            .finish()
    }
}
