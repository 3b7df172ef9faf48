//! # Sound Manager
//!
//! Picks the backend once, bootstraps the plugin runtime when it is needed,
//! and builds sounds.
//!
//! ## Backend selection
//!
//! The host is asked whether it can play `audio/mpeg` natively. A host
//! without canPlayType, or an answer that is neither `maybe` nor `probably`,
//! selects the plugin backend. The choice never changes afterwards.
//!
//! ## Plugin bootstrap
//!
//! ```text
//! new() ──> load_script(loader) ──(script loaded)──> embed_plugin()
//!                                                      │
//!                                   context.mark_plugin_ready()
//!                                   (queued plays drain exactly once)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use core_playback::{AudioManager, Sound, SoundOptions};
//! use core_runtime::config::ManagerConfig;
//!
//! let manager = AudioManager::new(host, ManagerConfig::default())?;
//! let sound = manager.load("song.mp3", SoundOptions::new().on_finish(|_| {}))?;
//! sound.play();
//! ```

use crate::error::{PlaybackError, Result};
use crate::options::SoundOptions;
use crate::plugin::PluginSound;
use crate::sound::Sound;
use crate::streaming::StreamingSound;
use bridge_traits::{EmbedRequest, HostEnvironment, ScriptRequest};
use core_runtime::config::ManagerConfig;
use core_runtime::PlaybackContext;
use std::fmt;
use std::rc::Rc;

/// Media type the native backend must support.
pub const SUPPORT_MIME_TYPE: &str = "audio/mpeg";

/// Which backend the manager selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Native streaming media element.
    Streaming,
    /// Embedded plugin player.
    Plugin,
}

/// Entry point: selects the backend once and builds sounds for it.
pub struct AudioManager {
    config: ManagerConfig,
    backend: Backend,
    environment: Rc<dyn HostEnvironment>,
    context: Rc<PlaybackContext>,
}

impl AudioManager {
    /// Create a manager with a fresh playback context.
    pub fn new(environment: Rc<dyn HostEnvironment>, config: ManagerConfig) -> Result<Self> {
        Self::with_context(environment, config, Rc::new(PlaybackContext::new()))
    }

    /// Create a manager from a JSON override document merged over the
    /// default config.
    ///
    /// # Errors
    ///
    /// [`PlaybackError::Runtime`] if the document cannot be parsed or leaves
    /// a required id empty; otherwise as [`AudioManager::with_context`].
    pub fn from_json(environment: Rc<dyn HostEnvironment>, json: &str) -> Result<Self> {
        let config = ManagerConfig::from_json(json)?;
        Self::new(environment, config)
    }

    /// Create a manager sharing an existing playback context.
    ///
    /// # Errors
    ///
    /// [`PlaybackError::Configuration`] if the host has no document or the
    /// config is invalid; [`PlaybackError::Bridge`] if the plugin loader
    /// script cannot be injected.
    pub fn with_context(
        environment: Rc<dyn HostEnvironment>,
        config: ManagerConfig,
        context: Rc<PlaybackContext>,
    ) -> Result<Self> {
        config
            .validate()
            .map_err(|e| PlaybackError::Configuration(e.to_string()))?;

        let backend = detect_backend(environment.as_ref())?;
        tracing::info!(?backend, "Audio backend selected");

        let manager = Self {
            config,
            backend,
            environment,
            context,
        };

        if manager.backend == Backend::Plugin {
            manager.bootstrap_plugin()?;
        }
        Ok(manager)
    }

    /// Backend chosen at construction.
    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Effective configuration after merging overrides.
    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    /// Shared context; the plugin event bridge dispatches into it.
    pub fn context(&self) -> &Rc<PlaybackContext> {
        &self.context
    }

    /// Whether the plugin runtime has been embedded.
    pub fn is_plugin_ready(&self) -> bool {
        self.context.is_plugin_ready()
    }

    /// Build a sound for `url` on the selected backend.
    pub fn load(&self, url: &str, options: SoundOptions) -> Result<Rc<dyn Sound>> {
        let sound: Rc<dyn Sound> = match self.backend {
            Backend::Streaming => {
                let element = self.environment.create_media_element(url)?;
                StreamingSound::new(&self.context, url, options, element) as Rc<dyn Sound>
            }
            Backend::Plugin => PluginSound::new(
                Rc::clone(&self.context),
                Rc::clone(&self.environment),
                url,
                options,
                self.config.plugin_element_id.as_str(),
            ),
        };
        tracing::debug!(uid = %sound.uid(), url, "Sound created");
        Ok(sound)
    }

    fn bootstrap_plugin(&self) -> Result<()> {
        let request = ScriptRequest {
            src: self.config.loader_script_path.clone(),
            element_id: self.config.loader_script_element_id.clone(),
        };
        let embed = EmbedRequest {
            plugin_path: self.config.plugin_path.clone(),
            host_element_id: self.config.plugin_host_element_id.clone(),
            element_id: self.config.plugin_element_id.clone(),
            width: 0,
            height: 0,
            min_version: self.config.plugin_min_version.clone(),
            express_install_path: self.config.express_install_path.clone(),
        };

        let environment = Rc::clone(&self.environment);
        let context = Rc::clone(&self.context);
        self.environment.load_script(
            request,
            Box::new(move || {
                if let Err(err) = environment.embed_plugin(&embed) {
                    tracing::error!(error = %err, "Failed to embed plugin player");
                    return;
                }
                tracing::info!(element = %embed.element_id, "Plugin player embedded");
                let drained = context.mark_plugin_ready();
                tracing::debug!(drained, "Plugin ready callbacks drained");
            }),
        )?;
        Ok(())
    }
}

impl fmt::Debug for AudioManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AudioManager")
            .field("backend", &self.backend)
            .field("config", &self.config)
            .field("context", &self.context)
            .finish()
    }
}

/// Ask the host once and pick a backend.
pub fn detect_backend(environment: &dyn HostEnvironment) -> Result<Backend> {
    if !environment.has_document() {
        return Err(PlaybackError::Configuration(
            "Audio manager must be initialized within an HTML document".to_string(),
        ));
    }

    let backend = match environment.can_play_type(SUPPORT_MIME_TYPE) {
        Some(answer) if answer.is_supported() => Backend::Streaming,
        _ => Backend::Plugin,
    };
    Ok(backend)
}
