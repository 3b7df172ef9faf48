//! `<audio>` element backing the streaming backend.

use crate::error::WasmResult;
use bridge_traits::{MediaElement, MediaEvent, MediaListener, OneShotListener};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{EventTarget, HtmlAudioElement};

/// Attach `listener` for `event` on `target` in the capture phase.
///
/// The closure is leaked: the browser may keep the target alive (a playing
/// element is never collected) and invoke it after the Rust side is gone.
pub(crate) fn attach_listener(target: &EventTarget, event: MediaEvent, listener: MediaListener) {
    let closure = Closure::wrap(listener);
    if let Err(err) = target.add_event_listener_with_callback_and_bool(
        event.dom_name(),
        closure.as_ref().unchecked_ref(),
        true,
    ) {
        tracing::warn!(event = event.dom_name(), error = ?err, "Failed to attach listener");
    }
    closure.forget();
}

/// Like [`attach_listener`], but the listener runs at most once.
pub(crate) fn attach_one_shot(target: &EventTarget, event: MediaEvent, listener: OneShotListener) {
    let mut slot = Some(listener);
    attach_listener(
        target,
        event,
        Box::new(move || {
            if let Some(listener) = slot.take() {
                listener();
            }
        }),
    );
}

/// Detached `<audio>` element bound to a single url.
pub struct WebMediaElement {
    audio: HtmlAudioElement,
}

impl WebMediaElement {
    /// Create an element for `url`. Loading starts on [`MediaElement::load`].
    pub fn new(url: &str) -> WasmResult<Self> {
        let audio = HtmlAudioElement::new_with_src(url)?;
        audio.set_preload("auto");
        Ok(Self { audio })
    }

    /// The underlying DOM element.
    pub fn element(&self) -> &HtmlAudioElement {
        &self.audio
    }
}

impl MediaElement for WebMediaElement {
    fn add_listener(&self, event: MediaEvent, listener: MediaListener) {
        attach_listener(&self.audio, event, listener);
    }

    fn add_one_shot_listener(&self, event: MediaEvent, listener: OneShotListener) {
        attach_one_shot(&self.audio, event, listener);
    }

    fn load(&self) {
        self.audio.load();
    }

    fn play(&self) {
        match self.audio.play() {
            Ok(promise) => {
                // Autoplay policies reject the promise rather than throwing.
                let on_reject = Closure::once(|err: JsValue| {
                    tracing::warn!(error = ?err, "Playback was rejected by the browser");
                });
                let _ = promise.catch(&on_reject);
                on_reject.forget();
            }
            Err(err) => tracing::warn!(error = ?err, "Failed to start playback"),
        }
    }

    fn pause(&self) {
        if let Err(err) = self.audio.pause() {
            tracing::warn!(error = ?err, "Failed to pause playback");
        }
    }

    fn current_time(&self) -> f64 {
        self.audio.current_time()
    }

    fn set_current_time(&self, seconds: f64) {
        self.audio.set_current_time(seconds);
    }
}
