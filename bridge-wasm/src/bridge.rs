//! Global entry point the plugin calls to report playback events.
//!
//! The plugin player cannot reach Rust listeners directly. It calls a global
//! JavaScript function with a wire name such as `mzSoundEnd:5`, which is
//! parsed here and dispatched on the shared [`PlaybackContext`].

use crate::error::{WasmError, WasmResult};
use core_runtime::PlaybackContext;
use js_sys::{Object, Reflect};
use std::rc::Rc;
use wasm_bindgen::prelude::*;

/// Dotted path of the function the plugin player calls.
pub const DEFAULT_DISPATCH_PATH: &str = "Mozart.dispatchEvent";

/// Install the dispatch function at `path` on the window, creating
/// intermediate objects as needed.
pub fn install_event_bridge(context: Rc<PlaybackContext>, path: &str) -> WasmResult<()> {
    let window = web_sys::window().ok_or_else(|| WasmError::Unavailable("window".into()))?;

    let mut segments: Vec<&str> = path.split('.').filter(|s| !s.is_empty()).collect();
    let name = segments
        .pop()
        .ok_or_else(|| WasmError::JavaScript(format!("invalid dispatch path: {path:?}")))?;

    let mut target: JsValue = window.into();
    for segment in segments {
        let key = JsValue::from_str(segment);
        let mut next = Reflect::get(&target, &key)?;
        if next.is_undefined() || next.is_null() {
            next = Object::new().into();
            Reflect::set(&target, &key, &next)?;
        }
        target = next;
    }

    let dispatch = Closure::wrap(Box::new(move |event: JsValue| {
        let Some(name) = event.as_string() else {
            tracing::warn!(event = ?event, "Ignoring non-string plugin event");
            return;
        };
        match context.dispatch_named(&name) {
            Ok(delivered) => tracing::trace!(event = %name, delivered, "Plugin event dispatched"),
            Err(err) => tracing::warn!(event = %name, error = %err, "Unknown plugin event"),
        }
    }) as Box<dyn FnMut(JsValue)>);

    Reflect::set(&target, &JsValue::from_str(name), dispatch.as_ref())?;
    dispatch.forget();

    tracing::debug!(path, "Plugin event bridge installed");
    Ok(())
}
