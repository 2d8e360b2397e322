//! Game configuration module.
//!
//! Handles loading, validating, and merging an optional `config.toml` placed
//! in the images folder. Stock defaults are the base layer; the user file
//! only needs the keys it wants to change. Command-line flags win over both.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [game]
//! name = "game"                    # Game identifier written to data.json
//! screen_name = ""                 # Title shown to players (empty = name)
//! session_password = ""            # Passed through to the game as-is
//! default_question = "När togs bilden?"
//!
//! [images]
//! extensions = ["jpg", "jpeg", "png", "webp"]
//!
//! [processing]
//! max_processes = 4                # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `config.toml`.
///
/// All fields have defaults. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Game identity and question text.
    pub game: GameSection,
    /// Which files count as images.
    pub images: ImagesConfig,
    /// Parallel extraction settings.
    pub processing: ProcessingConfig,
}

impl GameConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.game.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "game.name must not be empty".into(),
            ));
        }
        if self.images.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "images.extensions must not be empty".into(),
            ));
        }
        if let Some(ext) = self
            .images
            .extensions
            .iter()
            .find(|e| e.is_empty() || e.contains('.'))
        {
            return Err(ConfigError::Validation(format!(
                "images.extensions entry {ext:?} must be a bare extension like \"jpg\""
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameSection {
    pub name: String,
    /// Empty means "same as `name`".
    pub screen_name: String,
    pub session_password: String,
    /// Question shown for images without one in the answers file.
    pub default_question: String,
}

impl Default for GameSection {
    fn default() -> Self {
        Self {
            name: "game".to_string(),
            screen_name: String::new(),
            session_password: String::new(),
            default_question: "När togs bilden?".to_string(),
        }
    }
}

impl GameSection {
    /// `screen_name`, falling back to `name` when unset.
    pub fn effective_screen_name(&self) -> &str {
        if self.screen_name.trim().is_empty() {
            &self.name
        } else {
            &self.screen_name
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesConfig {
    /// File extensions (without dot) picked up from the images folder.
    /// Matched case-insensitively.
    pub extensions: Vec<String>,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            extensions: ["jpg", "jpeg", "png", "webp"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel extraction workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(GameConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `config.toml`.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<GameConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: GameConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory (defaults if absent).
pub fn load_config(dir: &Path) -> Result<GameConfig, ConfigError> {
    resolve_config(load_raw_config(dir)?)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# snapdate configuration
# ======================
# Place this file in the images folder as config.toml.
# All settings are optional. Values shown below are the defaults.
# Command-line flags (--name, --screen-name, --password) override them.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Game identity
# ---------------------------------------------------------------------------
[game]
# Identifier written to data.json.
name = "game"

# Title shown to players. Leave empty to reuse `name`.
screen_name = ""

# Session password handed to the game unchanged.
session_password = ""

# Question shown for images that have none in the answers file.
default_question = "När togs bilden?"

# ---------------------------------------------------------------------------
# Image discovery
# ---------------------------------------------------------------------------
[images]
# Extensions picked up from the images folder (case-insensitive, no dot).
# Only JPEG files carry a readable capture date.
extensions = ["jpg", "jpeg", "png", "webp"]

# ---------------------------------------------------------------------------
# Parallel processing
# ---------------------------------------------------------------------------
[processing]
# Maximum number of parallel workers for date extraction.
# Omit to use all CPU cores. Values above the core count are clamped.
# max_processes = 4
"##
}
