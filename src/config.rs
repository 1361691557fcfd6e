//! User configuration
//!
//! Stored as TOML at `$CHATREEL_CONFIG_DIR/config.toml`, or under the
//! platform config directory (`~/.config/chatreel/config.toml` on Linux).
//! A missing file means defaults. Command-line flags override it.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use toml_edit::DocumentMut;

use crate::theme::Theme;

/// Environment variable overriding the config directory.
pub const CONFIG_DIR_ENV: &str = "CHATREEL_CONFIG_DIR";

/// Slowest and fastest playback speed multipliers.
pub const MIN_SPEED: f64 = 0.1;
pub const MAX_SPEED: f64 = 16.0;

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config is not valid TOML: {0}")]
    Document(#[from] toml_edit::TomlError),
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub playback: PlaybackConfig,
    pub display: DisplayConfig,
}

/// `[playback]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Skip character-by-character animation
    pub reduced_motion: bool,
    /// Playback speed multiplier (1.0 = scripted timing)
    pub speed: f64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            reduced_motion: false,
            speed: 1.0,
        }
    }
}

/// `[display]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// One of `default`, `classic`, `ocean`
    pub theme: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            theme: "default".to_string(),
        }
    }
}

impl Config {
    /// Directory holding `config.toml`.
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
            return Ok(PathBuf::from(dir));
        }
        dirs::config_dir()
            .map(|dir| dir.join("chatreel"))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Path of `config.toml`.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load from the default location, or defaults if the file is missing.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from `path`, or defaults if the file is missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(path, content).map_err(write_err)
    }

    /// Configured theme; unknown names fall back to the default theme.
    pub fn theme(&self) -> Theme {
        Theme::by_name(&self.display.theme).unwrap_or_else(|| {
            tracing::warn!(theme = %self.display.theme, "unknown theme, using default");
            Theme::default()
        })
    }

    /// Configured speed, clamped to the supported range.
    pub fn speed(&self) -> f64 {
        clamp_speed(self.playback.speed)
    }
}

/// Clamp a speed multiplier to `MIN_SPEED..=MAX_SPEED` (NaN becomes 1.0).
pub fn clamp_speed(speed: f64) -> f64 {
    if speed.is_nan() {
        1.0
    } else {
        speed.clamp(MIN_SPEED, MAX_SPEED)
    }
}

/// Outcome of [`migrate_config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrateResult {
    /// The migrated file content
    pub content: String,
    /// Added fields as `section.key`
    pub added_fields: Vec<String>,
    /// Sections that did not exist at all
    pub sections_added: Vec<String>,
}

impl MigrateResult {
    pub fn has_changes(&self) -> bool {
        !self.added_fields.is_empty()
    }
}

/// Add fields missing from `content` using default values.
///
/// Existing values, comments and ordering are preserved.
pub fn migrate_config(content: &str) -> Result<MigrateResult, ConfigError> {
    let mut doc: DocumentMut = content.parse()?;
    let defaults: DocumentMut = toml::to_string_pretty(&Config::default())?.parse()?;

    let mut added_fields = Vec::new();
    let mut sections_added = Vec::new();

    for (section, default_item) in defaults.iter() {
        let Some(default_table) = default_item.as_table() else {
            continue;
        };

        if !doc.contains_key(section) {
            doc.insert(section, default_item.clone());
            sections_added.push(section.to_string());
            for (key, _) in default_table.iter() {
                added_fields.push(format!("{}.{}", section, key));
            }
            continue;
        }

        let Some(table) = doc.get_mut(section).and_then(|item| item.as_table_mut()) else {
            tracing::warn!(section, "config section is not a table, leaving it alone");
            continue;
        };
        for (key, value) in default_table.iter() {
            if !table.contains_key(key) {
                table.insert(key, value.clone());
                added_fields.push(format!("{}.{}", section, key));
            }
        }
    }

    Ok(MigrateResult {
        content: doc.to_string(),
        added_fields,
        sections_added,
    })
}
