//! Browser implementation of [`HostEnvironment`].

use crate::error::{WasmError, WasmResult};
use crate::media::{attach_one_shot, WebMediaElement};
use crate::plugin::WebPluginHost;
use bridge_traits::{
    error::Result as BridgeResult, BridgeError, CanPlayType, EmbedRequest, HostEnvironment,
    MediaElement, MediaEvent, OneShotListener, PluginHost, ScriptRequest,
};
use js_sys::{Array, Function, Object, Reflect};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlMediaElement, HtmlScriptElement, Window};

/// Global the plugin loader script installs.
pub const LOADER_GLOBAL: &str = "swfobject";

/// Host environment backed by the current browser window.
pub struct BrowserEnvironment {
    window: Window,
    document: Option<Document>,
}

impl BrowserEnvironment {
    /// Bind to the current window.
    pub fn new() -> WasmResult<Self> {
        let window = web_sys::window().ok_or_else(|| WasmError::Unavailable("window".into()))?;
        let document = window.document();
        Ok(Self { window, document })
    }

    fn document(&self) -> WasmResult<&Document> {
        self.document
            .as_ref()
            .ok_or_else(|| WasmError::Unavailable("document".into()))
    }

    fn inject_script(&self, request: &ScriptRequest, on_done: OneShotListener) -> WasmResult<()> {
        let document = self.document()?;
        let head = document
            .head()
            .ok_or_else(|| WasmError::Unavailable("document head".into()))?;

        let script = document
            .create_element("script")?
            .dyn_into::<HtmlScriptElement>()
            .map_err(|_| WasmError::ElementNotFound("script".into()))?;
        script.set_type("text/javascript");
        script.set_src(&request.src);
        script.set_id(&request.element_id);

        // Load and error both continue the bootstrap, exactly once.
        let pending = Rc::new(RefCell::new(Some(on_done)));
        for event in ["load", "error"] {
            let pending = Rc::clone(&pending);
            let src = request.src.clone();
            let closure = Closure::wrap(Box::new(move || {
                if event == "error" {
                    tracing::warn!(src = %src, "Loader script failed to load");
                }
                let on_done = pending.borrow_mut().take();
                if let Some(on_done) = on_done {
                    on_done();
                }
            }) as Box<dyn FnMut()>);
            script.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        head.append_child(&script)?;
        Ok(())
    }

    fn embed(&self, request: &EmbedRequest) -> WasmResult<()> {
        let loader = Reflect::get(&self.window, &JsValue::from_str(LOADER_GLOBAL))?;
        if loader.is_undefined() || loader.is_null() {
            return Err(WasmError::Unavailable(LOADER_GLOBAL.into()));
        }
        let embed_swf = Reflect::get(&loader, &JsValue::from_str("embedSWF"))?
            .dyn_into::<Function>()
            .map_err(|_| WasmError::Unavailable(format!("{LOADER_GLOBAL}.embedSWF")))?;

        let attributes = Object::new();
        Reflect::set(
            &attributes,
            &JsValue::from_str("id"),
            &JsValue::from_str(&request.element_id),
        )?;

        let args = Array::new();
        args.push(&JsValue::from_str(&request.plugin_path));
        args.push(&JsValue::from_str(&request.host_element_id));
        args.push(&JsValue::from_str(&request.width.to_string()));
        args.push(&JsValue::from_str(&request.height.to_string()));
        args.push(&JsValue::from_str(&request.min_version));
        args.push(&JsValue::from_str(&request.express_install_path));
        args.push(&JsValue::FALSE);
        args.push(&JsValue::FALSE);
        args.push(&attributes);

        embed_swf.apply(&loader, &args)?;
        Ok(())
    }
}

impl HostEnvironment for BrowserEnvironment {
    fn has_document(&self) -> bool {
        self.document.is_some()
    }

    fn can_play_type(&self, mime: &str) -> Option<CanPlayType> {
        let element = self.document.as_ref()?.create_element("audio").ok()?;
        // Legacy engines lack canPlayType entirely.
        if !Reflect::has(&element, &JsValue::from_str("canPlayType")).unwrap_or(false) {
            return None;
        }
        let media = element.dyn_into::<HtmlMediaElement>().ok()?;
        Some(CanPlayType::from_response(&media.can_play_type(mime)))
    }

    fn create_media_element(&self, url: &str) -> BridgeResult<Rc<dyn MediaElement>> {
        let element = WebMediaElement::new(url).map_err(BridgeError::from)?;
        Ok(Rc::new(element))
    }

    fn plugin_host(&self, element_id: &str) -> Option<Rc<dyn PluginHost>> {
        let element = self.document.as_ref()?.get_element_by_id(element_id)?;
        Some(Rc::new(WebPluginHost::new(element)))
    }

    fn add_window_listener(&self, event: MediaEvent, listener: OneShotListener) {
        attach_one_shot(&self.window, event, listener);
    }

    fn load_script(&self, request: ScriptRequest, on_done: OneShotListener) -> BridgeResult<()> {
        tracing::debug!(src = %request.src, id = %request.element_id, "Injecting loader script");
        self.inject_script(&request, on_done)
            .map_err(BridgeError::from)
    }

    fn embed_plugin(&self, request: &EmbedRequest) -> BridgeResult<()> {
        self.embed(request).map_err(BridgeError::from)
    }
}

