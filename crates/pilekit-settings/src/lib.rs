//! PileKit Settings Crate
//!
//! Handles engine configuration and the JSON/TOML document helpers shared with
//! scene description files.

pub mod config;
pub mod error;

pub use config::{
    load_document, save_document, EngineConfig, FileFormat, HitTestMode, PileSettings,
    SelectionSettings,
};
pub use error::{ConfigError, SettingsError, SettingsResult};
