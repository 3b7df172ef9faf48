//! # Manager Configuration
//!
//! Settings the manager needs to bootstrap the plugin fallback: where the
//! plugin movie and its loader script live, and which page elements host
//! them.
//!
//! ## Overview
//!
//! Every field has a default. Callers override any subset through
//! [`ManagerConfig::builder`] or a JSON document ([`ManagerConfig::from_json`]).
//! Overrides are shallow and only "truthy" values win: an empty string is
//! treated as absent and the default is kept.
//!
//! ## Usage
//!
//! ```rust
//! use core_runtime::config::ManagerConfig;
//!
//! let config = ManagerConfig::builder()
//!     .plugin_path("/static/player.swf")
//!     .plugin_element_id("")           // ignored, default kept
//!     .build()
//!     .expect("valid config");
//!
//! assert_eq!(config.plugin_path, "/static/player.swf");
//! assert_eq!(config.plugin_element_id, "tmb-mozart-flashplayer");
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PLUGIN_PATH: &str = "/public/flash/tmb_flashAudioApi.swf";
pub const DEFAULT_PLUGIN_ELEMENT_ID: &str = "tmb-mozart-flashplayer";
pub const DEFAULT_PLUGIN_HOST_ELEMENT_ID: &str = "tmb-audio-player";
pub const DEFAULT_LOADER_SCRIPT_PATH: &str =
    "//ajax.googleapis.com/ajax/libs/swfobject/2.2/swfobject.js";
pub const DEFAULT_LOADER_SCRIPT_ELEMENT_ID: &str = "tmb-mozart-swfobject";
pub const DEFAULT_PLUGIN_MIN_VERSION: &str = "9.0.0";
pub const DEFAULT_EXPRESS_INSTALL_PATH: &str = "flash/expressInstall.swf";

/// Fully resolved manager settings.
///
/// Serialized with the same camelCase keys [`ManagerConfig::from_json`]
/// accepts, so a serialized config can be fed back as overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagerConfig {
    /// Url of the plugin movie.
    pub plugin_path: String,
    /// Id given to the embedded plugin object; sounds look it up by this id.
    pub plugin_element_id: String,
    /// Id of the placeholder element the plugin replaces.
    pub plugin_host_element_id: String,
    /// Url of the loader script that performs the embed.
    pub loader_script_path: String,
    /// Id of the injected loader `<script>` element.
    pub loader_script_element_id: String,
    /// Minimum plugin runtime version.
    pub plugin_min_version: String,
    /// Express-install movie url.
    pub express_install_path: String,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            plugin_path: DEFAULT_PLUGIN_PATH.to_string(),
            plugin_element_id: DEFAULT_PLUGIN_ELEMENT_ID.to_string(),
            plugin_host_element_id: DEFAULT_PLUGIN_HOST_ELEMENT_ID.to_string(),
            loader_script_path: DEFAULT_LOADER_SCRIPT_PATH.to_string(),
            loader_script_element_id: DEFAULT_LOADER_SCRIPT_ELEMENT_ID.to_string(),
            plugin_min_version: DEFAULT_PLUGIN_MIN_VERSION.to_string(),
            express_install_path: DEFAULT_EXPRESS_INSTALL_PATH.to_string(),
        }
    }
}

impl ManagerConfig {
    /// Start from the defaults and override selected fields.
    pub fn builder() -> ManagerConfigBuilder {
        ManagerConfigBuilder::default()
    }

    /// Parse a JSON override document and merge it over the defaults.
    ///
    /// Unknown keys are ignored.
    pub fn from_json(json: &str) -> Result<Self> {
        let overrides: ManagerConfigBuilder = serde_json::from_str(json)
            .map_err(|e| Error::Config(format!("Invalid manager config: {}", e)))?;
        overrides.build()
    }

    /// Checks that every element id and path is non-empty.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("plugin_path", &self.plugin_path),
            ("plugin_element_id", &self.plugin_element_id),
            ("plugin_host_element_id", &self.plugin_host_element_id),
            ("loader_script_path", &self.loader_script_path),
            ("loader_script_element_id", &self.loader_script_element_id),
        ];

        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(Error::Config(format!("{} cannot be empty", name)));
            }
        }
        Ok(())
    }
}

/// Partial overrides for [`ManagerConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ManagerConfigBuilder {
    plugin_path: Option<String>,
    plugin_element_id: Option<String>,
    plugin_host_element_id: Option<String>,
    loader_script_path: Option<String>,
    loader_script_element_id: Option<String>,
    plugin_min_version: Option<String>,
    express_install_path: Option<String>,
}

impl ManagerConfigBuilder {
    pub fn plugin_path(mut self, value: impl Into<String>) -> Self {
        self.plugin_path = Some(value.into());
        self
    }

    pub fn plugin_element_id(mut self, value: impl Into<String>) -> Self {
        self.plugin_element_id = Some(value.into());
        self
    }

    pub fn plugin_host_element_id(mut self, value: impl Into<String>) -> Self {
        self.plugin_host_element_id = Some(value.into());
        self
    }

    pub fn loader_script_path(mut self, value: impl Into<String>) -> Self {
        self.loader_script_path = Some(value.into());
        self
    }

    pub fn loader_script_element_id(mut self, value: impl Into<String>) -> Self {
        self.loader_script_element_id = Some(value.into());
        self
    }

    pub fn plugin_min_version(mut self, value: impl Into<String>) -> Self {
        self.plugin_min_version = Some(value.into());
        self
    }

    pub fn express_install_path(mut self, value: impl Into<String>) -> Self {
        self.express_install_path = Some(value.into());
        self
    }

    /// Merge the overrides over `base`. Absent and empty values keep the base.
    pub fn merge_over(self, base: ManagerConfig) -> ManagerConfig {
        fn pick(value: Option<String>, fallback: String) -> String {
            match value {
                Some(value) if !value.is_empty() => value,
                _ => fallback,
            }
        }

        ManagerConfig {
            plugin_path: pick(self.plugin_path, base.plugin_path),
            plugin_element_id: pick(self.plugin_element_id, base.plugin_element_id),
            plugin_host_element_id: pick(self.plugin_host_element_id, base.plugin_host_element_id),
            loader_script_path: pick(self.loader_script_path, base.loader_script_path),
            loader_script_element_id: pick(
                self.loader_script_element_id,
                base.loader_script_element_id,
            ),
            plugin_min_version: pick(self.plugin_min_version, base.plugin_min_version),
            express_install_path: pick(self.express_install_path, base.express_install_path),
        }
    }

    /// Merge over the defaults and validate.
    pub fn build(self) -> Result<ManagerConfig> {
        let config = self.merge_over(ManagerConfig::default());
        config.validate()?;
        Ok(config)
    }
}
