//! Engine configuration for PileKit
//!
//! Provides configuration file handling and validation for the tuning values
//! the stacking engine reads at runtime. Supports JSON and TOML file formats;
//! the default location lives in the platform-specific config directory.
//!
//! Configuration is organized into logical sections:
//! - Pile settings (capacity, per-depth fan-out offset)
//! - Selection settings (tie tolerance, pointer probe, hit-test mode)

use crate::error::{ConfigError, SettingsResult};
use pilekit_core::layout::{DEFAULT_PILE_CAPACITY, DEFAULT_PILE_OFFSET_X, DEFAULT_PILE_OFFSET_Y};
use pilekit_core::Vec2;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// How a pointer press picks its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HitTestMode {
    /// Deepest object under the probe, no spatial comparison
    #[default]
    Topmost,
    /// Nearest object to the probe, depth breaks ties
    Nearest,
}

impl std::fmt::Display for HitTestMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Topmost => write!(f, "topmost"),
            Self::Nearest => write!(f, "nearest"),
        }
    }
}

/// Pile settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PileSettings {
    /// Maximum pile size when the anchor does not set its own.
    /// Written as `0` when piles are unbounded.
    #[serde(with = "capacity_format")]
    pub default_capacity: Option<usize>,
    /// Fan-out applied per depth level to visuals created without an offset
    pub default_offset: Vec2,
}

impl Default for PileSettings {
    fn default() -> Self {
        Self {
            default_capacity: Some(DEFAULT_PILE_CAPACITY),
            default_offset: Vec2::new(DEFAULT_PILE_OFFSET_X, DEFAULT_PILE_OFFSET_Y),
        }
    }
}

mod capacity_format {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<usize>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.unwrap_or(0) as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<usize>, D::Error> {
        let raw = usize::deserialize(deserializer)?;
        Ok((raw != 0).then_some(raw))
    }
}

/// Selection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionSettings {
    /// Relative tolerance used to treat two positions as co-located
    pub tie_epsilon: f64,
    /// Side length of the square probe centered on the pointer
    pub probe_size: f64,
    /// Strategy used on pointer press
    pub hit_test: HitTestMode,
}

impl Default for SelectionSettings {
    fn default() -> Self {
        Self {
            tie_epsilon: 0.1,
            probe_size: 1.0,
            hit_test: HitTestMode::Topmost,
        }
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    /// Pile settings
    pub pile: PileSettings,
    /// Selection settings
    pub selection: SelectionSettings,
}

impl EngineConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform config location, e.g. `~/.config/pilekit/engine.toml`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|p| p.join("pilekit"))
            .unwrap_or_else(|| PathBuf::from("config"))
            .join("engine.toml")
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let config: Self = load_document(path)?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded engine config");
        Ok(config)
    }

    /// Load from `path` if it exists, defaults otherwise
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::info!(path = %path.display(), "No engine config found, using defaults");
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        save_document(self, path)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(capacity) = self.pile.default_capacity {
            if capacity < 2 {
                return Err(ConfigError::ValueOutOfRange {
                    key: "pile.default_capacity".to_string(),
                    value: capacity.to_string(),
                });
            }
        }

        let offset = self.pile.default_offset;
        if !offset.x.is_finite() || !offset.y.is_finite() {
            return Err(ConfigError::ValueOutOfRange {
                key: "pile.default_offset".to_string(),
                value: format!("({}, {})", offset.x, offset.y),
            });
        }

        if !(self.selection.tie_epsilon > 0.0 && self.selection.tie_epsilon.is_finite()) {
            return Err(ConfigError::ValueOutOfRange {
                key: "selection.tie_epsilon".to_string(),
                value: self.selection.tie_epsilon.to_string(),
            });
        }

        if !(self.selection.probe_size > 0.0 && self.selection.probe_size.is_finite()) {
            return Err(ConfigError::ValueOutOfRange {
                key: "selection.probe_size".to_string(),
                value: self.selection.probe_size.to_string(),
            });
        }

        Ok(())
    }
}

/// Supported on-disk formats, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Toml,
}

impl FileFormat {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

/// Reads a JSON or TOML document into `T`.
pub fn load_document<T: DeserializeOwned>(path: &Path) -> SettingsResult<T> {
    let format = FileFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)?;

    let value = match format {
        FileFormat::Json => serde_json::from_str(&content)?,
        FileFormat::Toml => toml::from_str(&content)?,
    };
    Ok(value)
}

/// Writes `value` as a JSON or TOML document, creating parent directories.
pub fn save_document<T: Serialize>(value: &T, path: &Path) -> SettingsResult<()> {
    let format = FileFormat::from_path(path)?;

    let content = match format {
        FileFormat::Json => serde_json::to_string_pretty(value)?,
        FileFormat::Toml => toml::to_string_pretty(value)?,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, content)?;

    Ok(())
}
