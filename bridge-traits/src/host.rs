//! Host environment bridge.
//!
//! Everything the manager and the plugin backend need from the page:
//! capability probing, element construction and lookup, window-level
//! listeners, and the script/plugin injection used to bootstrap the fallback
//! player.

use crate::error::Result;
use crate::media::{MediaElement, MediaEvent, OneShotListener};
use crate::plugin::PluginHost;
use std::rc::Rc;

/// Answer of the host's `canPlayType` check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanPlayType {
    /// The host cannot play the type (empty answer).
    No,
    /// The host might be able to play the type.
    Maybe,
    /// The host is confident it can play the type.
    Probably,
}

impl CanPlayType {
    /// Interpret a raw `canPlayType` answer.
    ///
    /// Anything containing `maybe` or `probably` (case-insensitive) counts as
    /// support; every other answer is [`CanPlayType::No`].
    pub fn from_response(answer: &str) -> Self {
        let answer = answer.to_ascii_lowercase();
        if answer.contains("probably") {
            CanPlayType::Probably
        } else if answer.contains("maybe") {
            CanPlayType::Maybe
        } else {
            CanPlayType::No
        }
    }

    pub fn is_supported(self) -> bool {
        !matches!(self, CanPlayType::No)
    }
}

/// Script element to inject into the document head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptRequest {
    /// Script source url.
    pub src: String,
    /// Element id assigned to the `<script>` tag.
    pub element_id: String,
}

/// Parameters for embedding the plugin player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedRequest {
    /// Url of the plugin movie.
    pub plugin_path: String,
    /// Id of the element the plugin replaces.
    pub host_element_id: String,
    /// Id given to the embedded plugin object.
    pub element_id: String,
    pub width: u32,
    pub height: u32,
    /// Minimum plugin runtime version.
    pub min_version: String,
    /// Url of the express-install movie.
    pub express_install_path: String,
}

/// Page-level services used by the manager and the plugin backend.
pub trait HostEnvironment {
    /// Whether a document exists at all. Without one nothing can be played.
    fn has_document(&self) -> bool;

    /// Ask about native media support for `mime`.
    ///
    /// `None` means the host has no canPlayType at all.
    fn can_play_type(&self, mime: &str) -> Option<CanPlayType>;

    /// Create a native media element bound to `url`.
    fn create_media_element(&self, url: &str) -> Result<Rc<dyn MediaElement>>;

    /// Look up the plugin host element by id.
    fn plugin_host(&self, element_id: &str) -> Option<Rc<dyn PluginHost>>;

    /// Register a one-shot listener on the window (capture phase).
    fn add_window_listener(&self, event: MediaEvent, listener: OneShotListener);

    /// Inject a script; `on_done` runs once when it loads or fails to load.
    fn load_script(&self, request: ScriptRequest, on_done: OneShotListener) -> Result<()>;

    /// Embed the plugin player through the loader script.
    fn embed_plugin(&self, request: &EmbedRequest) -> Result<()>;
}
