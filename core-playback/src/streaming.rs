//! # Streaming Backend
//!
//! Plays a sound through the host's native media element. The element is
//! created for the sound's url and kept for the sound's whole lifetime.
//!
//! Permanent listeners (loaded, error, ended) hold a weak reference to the
//! sound, so dropping the last handle releases it. The one-shot deferred-play
//! listener holds a strong reference until it fires: a deferred play cannot
//! be cancelled by dropping the sound.

use crate::options::{CallbackKind, SoundOptions};
use crate::sound::{Sound, SoundBase};
use bridge_traits::{MediaElement, MediaEvent};
use core_runtime::PlaybackContext;
use std::fmt;
use std::rc::{Rc, Weak};

/// Sound played by a native media element.
///
/// Built through [`StreamingSound::new`], which returns an `Rc` because the
/// element's listeners refer back to the sound.
pub struct StreamingSound {
    base: SoundBase,
    element: Rc<dyn MediaElement>,
    this: Weak<StreamingSound>,
}

impl StreamingSound {
    /// Create a sound for `url` driven by `element`, which must already be
    /// bound to that url.
    pub fn new(
        context: &PlaybackContext,
        url: impl Into<String>,
        options: SoundOptions,
        element: Rc<dyn MediaElement>,
    ) -> Rc<Self> {
        let sound = Rc::new_cyclic(|this| Self {
            base: SoundBase::new(context, url),
            element,
            this: this.clone(),
        });
        sound.initialize(options);
        sound
    }

    fn listen(&self, event: MediaEvent, handler: fn(&SoundBase)) {
        let this = self.this.clone();
        self.element.add_listener(
            event,
            Box::new(move || {
                if let Some(sound) = this.upgrade() {
                    handler(&sound.base);
                }
            }),
        );
    }
}

impl Sound for StreamingSound {
    fn base(&self) -> &SoundBase {
        &self.base
    }

    fn initialize(&self, options: SoundOptions) {
        self.listen(MediaEvent::LoadedData, SoundBase::handle_loaded);
        self.listen(MediaEvent::Error, SoundBase::handle_error);
        self.listen(MediaEvent::Ended, SoundBase::handle_finished);
        self.element.load();

        self.base.initialize(options);
    }

    /// Start the native element.
    fn play_internal(&self) {
        self.element.play();
    }

    /// Attach a single one-shot loaded listener that runs `on_play` and
    /// then starts the element. Further calls are no-ops.
    fn deferred_play(&self) {
        if !self.base.claim_deferred() {
            return;
        }
        let Some(this) = self.this.upgrade() else {
            return;
        };

        self.element.add_one_shot_listener(
            MediaEvent::LoadedData,
            Box::new(move || {
                this.base.notify(CallbackKind::Play);
                this.play_internal();
            }),
        );
    }

    fn pause(&self) {
        self.element.pause();
        self.base.notify(CallbackKind::Pause);
    }

    fn stop(&self) {
        self.element.pause();
        self.element.set_current_time(0.0);
        self.base.notify(CallbackKind::Stop);
    }

    /// Element position in seconds.
    fn time(&self) -> f64 {
        self.element.current_time()
    }
}

impl fmt::Debug for StreamingSound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamingSound")
            .field("base", &self.base)
            .finish()
    }
}
