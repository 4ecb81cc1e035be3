//! Configuration for the rainpage memoir page.
//!
//! Settings live in `config.toml` under the platform config directory
//! (`~/.config/rainpage` on Linux). A missing file yields the defaults; a
//! present file may set any subset of keys.

use std::{
    fs,
    io,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use rainpage_core::Rgb;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name used for the config and data directories.
pub const APP_NAME: &str = "rainpage";

/// File name of the config inside the config directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config value `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Background rain settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RainConfig {
    /// Draw the background at all.
    pub enabled: bool,
    /// Width and height of one glyph slot, in surface units.
    pub cell_size: u32,
    /// Alpha of the dark overlay painted every frame.
    pub fade_alpha: f32,
    /// Chance that a column past the bottom edge restarts on a given frame.
    pub reset_probability: f64,
    /// Frames per second.
    pub frame_rate: u32,
    /// Glyph alphabet override.
    pub glyphs: Option<String>,
}

impl Default for RainConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cell_size: 1,
            fade_alpha: 0.05,
            reset_probability: 0.025,
            frame_rate: 30,
            glyphs: None,
        }
    }
}

/// Page colours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Rain glyph colour.
    pub glyph: Rgb,
    /// Colour the fade overlay pulls every cell toward.
    pub background: Rgb,
    /// Headings, links and counters.
    pub accent: Rgb,
    /// Body text.
    pub text: Rgb,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            glyph: Rgb::new(0xe6, 0x00, 0x7a),
            background: Rgb::new(0x0a, 0x0a, 0x0f),
            accent: Rgb::new(0x00, 0xb2, 0xff),
            text: Rgb::new(0xd0, 0xd0, 0xd8),
        }
    }
}

/// Page content settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Page file to show instead of the built-in page.
    pub path: Option<PathBuf>,
    /// Duration of a smooth anchor scroll in milliseconds.
    pub smooth_scroll_ms: u64,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            path: None,
            smooth_scroll_ms: 400,
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rain: RainConfig,
    pub theme: ThemeConfig,
    pub page: PageConfig,
}

impl Config {
    /// Path of the config file in the platform config directory.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Load from the platform config directory, falling back to defaults.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => {
                tracing::debug!("no config directory on this platform, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load from an explicit path. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "config file not found, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Reject values the animation cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let rain = &self.rain;
        if rain.cell_size == 0 {
            return Err(invalid("rain.cell_size", "must be at least 1"));
        }
        if rain.frame_rate == 0 {
            return Err(invalid("rain.frame_rate", "must be at least 1"));
        }
        if !(0.0..=1.0).contains(&rain.fade_alpha) {
            return Err(invalid(
                "rain.fade_alpha",
                format!("{} is outside 0.0..=1.0", rain.fade_alpha),
            ));
        }
        if !(0.0..=1.0).contains(&rain.reset_probability) {
            return Err(invalid(
                "rain.reset_probability",
                format!("{} is outside 0.0..=1.0", rain.reset_probability),
            ));
        }
        if rain.glyphs.as_deref().is_some_and(|g| g.trim().is_empty()) {
            return Err(invalid("rain.glyphs", "must not be empty"));
        }
        Ok(())
    }
}

fn invalid(key: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        key,
        reason: reason.into(),
    }
}
