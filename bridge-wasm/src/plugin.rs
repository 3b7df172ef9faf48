//! Scripted calls into the embedded plugin player element.

use crate::error::{WasmError, WasmResult};
use bridge_traits::{PluginHost, SoundId};
use js_sys::{Array, Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::Element;

/// Handle to the `<object>`/`<embed>` element the plugin runtime exposes
/// its scripting interface on.
pub struct WebPluginHost {
    element: Element,
}

impl WebPluginHost {
    /// Wrap an element already present in the document.
    pub fn new(element: Element) -> Self {
        Self { element }
    }

    fn call(&self, method: &str, args: &Array) -> WasmResult<JsValue> {
        let function = Reflect::get(&self.element, &JsValue::from_str(method))?
            .dyn_into::<Function>()
            .map_err(|_| WasmError::JavaScript(format!("{method} is not exposed by the plugin")))?;
        Ok(function.apply(&self.element, args)?)
    }

    fn call_logged(&self, method: &str, args: &Array) -> Option<JsValue> {
        match self.call(method, args) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(method, error = %err, "Plugin call failed");
                None
            }
        }
    }
}

impl PluginHost for WebPluginHost {
    fn play_track(&self, url: &str, uid: SoundId) {
        let args = Array::of2(&JsValue::from_str(url), &JsValue::from_f64(uid.get() as f64));
        self.call_logged("playTrack", &args);
    }

    fn pause_track(&self) {
        self.call_logged("pauseTrack", &Array::new());
    }

    fn stop_track(&self) {
        self.call_logged("stopTrack", &Array::new());
    }

    fn get_time(&self) -> f64 {
        self.call_logged("getTime", &Array::new())
            .and_then(|value| value.as_f64())
            .unwrap_or(0.0)
    }
}
