//! Error types for the browser bridge

use bridge_traits::error::BridgeError;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

/// Result type for browser bridge operations
pub type WasmResult<T> = Result<T, WasmError>;

/// Errors raised while talking to browser APIs
#[derive(Error, Debug)]
pub enum WasmError {
    /// JavaScript error from web-sys
    #[error("JavaScript error: {0}")]
    JavaScript(String),

    /// A browser global (window, document, head) is missing
    #[error("Browser API not available: {0}")]
    Unavailable(String),

    /// A DOM element could not be found or had the wrong type
    #[error("Element not found: {0}")]
    ElementNotFound(String),
}

impl From<WasmError> for BridgeError {
    fn from(err: WasmError) -> Self {
        match err {
            WasmError::JavaScript(msg) => BridgeError::OperationFailed(msg),
            WasmError::Unavailable(what) => BridgeError::NotAvailable(what),
            WasmError::ElementNotFound(id) => BridgeError::ElementNotFound(id),
        }
    }
}

impl From<JsValue> for WasmError {
    fn from(js_value: JsValue) -> Self {
        let msg = if js_value.is_string() {
            js_value
                .as_string()
                .unwrap_or_else(|| "Unknown error".to_string())
        } else if let Some(error) = js_value.dyn_ref::<js_sys::Error>() {
            error.message().into()
        } else {
            format!("{:?}", js_value)
        };
        WasmError::JavaScript(msg)
    }
}
