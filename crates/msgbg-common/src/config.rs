//! Plugin configuration: offsets, the speaker → picture list, and the
//! default message window layout.
//!
//! Two sources are supported:
//!   - a TOML file (`PluginConfig::load`)
//!   - the host engine's plugin-parameter object, where every value is a
//!     string and the picture list is JSON nested inside JSON strings
//!     (`PluginConfig::from_plugin_parameters`)
//!
//! Configuration is read once at boot and never mutated afterwards.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ScreenSize;

/// Offsets are accepted in `-OFFSET_LIMIT..=OFFSET_LIMIT`
pub const OFFSET_LIMIT: i32 = 10_000;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid plugin parameters: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid value for parameter '{key}': {value:?}")]
    InvalidParameter { key: String, value: String },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Pixel offsets applied while a custom background is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OffsetConfig {
    /// Added to every line-start x of the message text
    pub message_x: i32,
    /// Added to the page-start y of the message text
    pub message_y: i32,
    /// Added to the pause sign's default x
    pub pause_sign_x: i32,
    /// Added to the pause sign's default y
    pub pause_sign_y: i32,
}

impl Default for OffsetConfig {
    fn default() -> Self {
        Self {
            message_x: 64,
            message_y: 64,
            pause_sign_x: 0,
            pause_sign_y: -24,
        }
    }
}

impl OffsetConfig {
    /// Clamp every offset into the accepted range
    pub fn clamped(self) -> Self {
        let c = |v: i32| v.clamp(-OFFSET_LIMIT, OFFSET_LIMIT);
        Self {
            message_x: c(self.message_x),
            message_y: c(self.message_y),
            pause_sign_x: c(self.pause_sign_x),
            pause_sign_y: c(self.pause_sign_y),
        }
    }
}

/// One row of the background picture list.
///
/// Both fields are optional on the wire; incomplete rows are dropped when
/// the registry is built, never rejected here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackgroundEntry {
    /// Speaker name as typed into the message name box
    #[serde(default)]
    pub name: Option<String>,
    /// Picture under `img/system`, without extension
    #[serde(default, alias = "pictureName")]
    pub picture_name: Option<String>,
}

impl BackgroundEntry {
    pub fn new(name: &str, picture_name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            picture_name: Some(picture_name.to_string()),
        }
    }
}

/// Default (non-picture) message window layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Text lines the default window is sized for
    pub line_count: u32,
    /// Extra pixels added below the fitted height
    pub extra_padding: i32,
    /// Height of one text line
    pub line_height: i32,
    /// Window frame padding (applied top and bottom)
    pub window_padding: i32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            line_count: 4,
            extra_padding: 8,
            line_height: 36,
            window_padding: 12,
        }
    }
}

/// Complete plugin configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    pub offsets: OffsetConfig,
    pub backgrounds: Vec<BackgroundEntry>,
    pub screen: ScreenSize,
    pub layout: LayoutConfig,
}

impl PluginConfig {
    /// Load from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&text)?;
        tracing::info!(
            "Loaded config {} ({} background entries)",
            path.display(),
            config.backgrounds.len()
        );
        Ok(config)
    }

    /// Parse TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(text)?;
        config.offsets = config.offsets.clamped();
        Ok(config)
    }

    /// Parse the host engine's plugin-parameter object.
    ///
    /// Keys: `messageOffsetX`, `messageOffsetY`, `pauseSignOffsetX`,
    /// `pauseSignOffsetY`, `backgroundPictures`. Missing keys keep their
    /// defaults. Screen and layout are not part of the parameter set and
    /// stay at their defaults.
    pub fn from_plugin_parameters(json: &str) -> Result<Self> {
        let params: HashMap<String, String> = serde_json::from_str(json)?;
        let defaults = OffsetConfig::default();

        let offsets = OffsetConfig {
            message_x: int_param(&params, "messageOffsetX", defaults.message_x)?,
            message_y: int_param(&params, "messageOffsetY", defaults.message_y)?,
            pause_sign_x: int_param(&params, "pauseSignOffsetX", defaults.pause_sign_x)?,
            pause_sign_y: int_param(&params, "pauseSignOffsetY", defaults.pause_sign_y)?,
        }
        .clamped();

        let backgrounds = match params.get("backgroundPictures") {
            Some(raw) if !raw.trim().is_empty() => parse_picture_list(raw)?,
            _ => Vec::new(),
        };

        Ok(Self {
            offsets,
            backgrounds,
            ..Self::default()
        })
    }

    /// Load the plugin-parameter object from a JSON file
    pub fn load_plugin_parameters(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_plugin_parameters(&text)?;
        tracing::info!(
            "Loaded plugin parameters {} ({} background entries)",
            path.display(),
            config.backgrounds.len()
        );
        Ok(config)
    }
}

/// Integer parameter stored as a decimal string
fn int_param(params: &HashMap<String, String>, key: &str, default: i32) -> Result<i32> {
    let Some(raw) = params.get(key) else {
        return Ok(default);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(default);
    }
    trimmed
        .parse::<i32>()
        .map_err(|_| ConfigError::InvalidParameter {
            key: key.to_string(),
            value: raw.clone(),
        })
}

/// `backgroundPictures` is a JSON array of strings, each itself a JSON
/// object. Rows that don't decode are skipped.
fn parse_picture_list(raw: &str) -> Result<Vec<BackgroundEntry>> {
    let rows: Vec<String> = serde_json::from_str(raw)?;
    let mut entries = Vec::with_capacity(rows.len());
    for row in &rows {
        match serde_json::from_str::<Option<BackgroundEntry>>(row) {
            Ok(Some(entry)) => entries.push(entry),
            Ok(None) => tracing::debug!("Skipping null background row"),
            Err(e) => tracing::debug!("Skipping malformed background row {:?}: {}", row, e),
        }
    }
    Ok(entries)
}
