//! Playback configuration.

use posekit_api_core::{parse_config_object, ConfigError};
use serde::{Deserialize, Serialize};

/// Playback policy and data location. Every field has a default, so a partial
/// JSON object is a valid config.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Wrap around at either end instead of stopping.
    #[serde(rename = "loop")]
    pub r#loop: bool,
    /// Publish every step; when false a publish trigger is needed per transform.
    pub auto_publish: bool,
    /// Advance one row every step.
    pub auto_next: bool,
    /// Step back one row every step.
    pub auto_prev: bool,
    /// Load the sequence on the first step.
    pub read_on_init: bool,
    /// Location handed to the document source on reload.
    pub source_path: String,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            r#loop: false,
            auto_publish: true,
            auto_next: true,
            auto_prev: false,
            read_on_init: true,
            source_path: String::new(),
        }
    }
}

impl PlaybackConfig {
    /// Parse from a JSON object; other JSON values are rejected.
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        parse_config_object(s)
    }

    pub fn with_source_path(mut self, path: impl Into<String>) -> Self {
        self.source_path = path.into();
        self
    }

    pub fn with_loop(mut self, enabled: bool) -> Self {
        self.r#loop = enabled;
        self
    }

    /// Triggered playback: no automatic movement or publishing.
    pub fn triggered() -> Self {
        Self {
            auto_publish: false,
            auto_next: false,
            ..Self::default()
        }
    }
}
