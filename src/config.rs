//! Gallery configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! the base layer; a `config.toml` in the gallery root overrides any subset of
//! them.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! collection = "data/photos.json"   # Photo records, relative to the gallery root
//!
//! [thumbnails]
//! source_dir = "images"             # Full-size images, relative to the gallery root
//! directory = "thumbnails"          # Thumbnail output, relative to source_dir
//! width = 400                       # Thumbnail width in pixels
//! quality = 90                      # JPEG quality (1-100)
//! extensions = ["jpg", "jpeg", "png"]
//!
//! [assets]
//! base_path = "/AstroImageGallery"  # Prefix used in production mode
//! mode = "development"              # "development" or "production"
//!
//! [equipment]
//! telescopes = []                   # First entry is the admin default
//! cameras = []
//! mounts = []
//!
//! [processing]
//! max_processes = 4                 # Max parallel thumbnail workers (omit for auto)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::assets::AssetMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the config file looked up in the gallery root.
pub const CONFIG_FILENAME: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Gallery configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Path of the photo collection JSON, relative to the gallery root.
    pub collection: String,
    pub thumbnails: ThumbnailsConfig,
    pub assets: AssetsConfig,
    pub equipment: EquipmentConfig,
    pub processing: ProcessingConfig,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            collection: "data/photos.json".to_string(),
            thumbnails: ThumbnailsConfig::default(),
            assets: AssetsConfig::default(),
            equipment: EquipmentConfig::default(),
            processing: ProcessingConfig::default(),
        }
    }
}

impl GalleryConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.thumbnails.width == 0 {
            return Err(ConfigError::Validation(
                "thumbnails.width must be non-zero".into(),
            ));
        }
        if !(1..=100).contains(&self.thumbnails.quality) {
            return Err(ConfigError::Validation(
                "thumbnails.quality must be 1-100".into(),
            ));
        }
        if self.thumbnails.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "thumbnails.extensions must not be empty".into(),
            ));
        }
        if self.thumbnails.directory.trim().is_empty() {
            return Err(ConfigError::Validation(
                "thumbnails.directory must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Collection path resolved against the gallery root.
    pub fn collection_path(&self, root: &Path) -> PathBuf {
        root.join(&self.collection)
    }

    /// Full-size image directory resolved against the gallery root.
    pub fn source_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.thumbnails.source_dir)
    }

    /// Thumbnail directory for a given source directory.
    pub fn thumbnail_dir(&self, source_dir: &Path) -> PathBuf {
        source_dir.join(&self.thumbnails.directory)
    }
}

/// Thumbnail preprocessing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThumbnailsConfig {
    /// Directory of full-size images, relative to the gallery root.
    pub source_dir: String,
    /// Output directory, relative to `source_dir`.
    pub directory: String,
    /// Target width in pixels; height keeps the source aspect ratio.
    pub width: u32,
    /// JPEG encoding quality (1 = worst, 100 = best).
    pub quality: u32,
    /// File extensions treated as images (case-insensitive).
    pub extensions: Vec<String>,
}

impl Default for ThumbnailsConfig {
    fn default() -> Self {
        Self {
            source_dir: "images".to_string(),
            directory: "thumbnails".to_string(),
            width: 400,
            quality: 90,
            extensions: vec!["jpg".into(), "jpeg".into(), "png".into()],
        }
    }
}

/// Asset URL settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssetsConfig {
    pub base_path: String,
    pub mode: AssetMode,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            base_path: "/AstroImageGallery".to_string(),
            mode: AssetMode::Development,
        }
    }
}

/// Equipment choices offered by the admin workflow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EquipmentConfig {
    pub telescopes: Vec<String>,
    pub cameras: Vec<String>,
    pub mounts: Vec<String>,
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel thumbnail workers.
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

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(GalleryConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
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

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(config_path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<GalleryConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: GalleryConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the gallery root.
pub fn load_config(root: &Path) -> Result<GalleryConfig, ConfigError> {
    load_config_file(&root.join(CONFIG_FILENAME))
}

/// Load config from an explicit file path; a missing file yields the defaults.
pub fn load_config_file(path: &Path) -> Result<GalleryConfig, ConfigError> {
    let overlay = load_raw_config(path)?;
    if overlay.is_none() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
    }
    resolve_config(overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Astro Gallery Configuration
# ===========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# Photo records (JSON), relative to the gallery root.
collection = "data/photos.json"

# ---------------------------------------------------------------------------
# Thumbnail preprocessing
# ---------------------------------------------------------------------------
[thumbnails]
# Directory of full-size images, relative to the gallery root.
source_dir = "images"

# Thumbnail output directory, relative to source_dir. Thumbnails keep the
# file name of their original.
directory = "thumbnails"

# Thumbnail width in pixels. Height follows the source aspect ratio.
width = 400

# JPEG encoding quality (1 = worst, 100 = best).
quality = 90

# File extensions treated as images (case-insensitive).
extensions = ["jpg", "jpeg", "png"]

# ---------------------------------------------------------------------------
# Asset URLs
# ---------------------------------------------------------------------------
[assets]
# Prefix prepended to every image URL in production mode.
base_path = "/AstroImageGallery"

# "development" serves from the site root, "production" uses base_path.
mode = "development"

# ---------------------------------------------------------------------------
# Equipment offered when creating records. The first entry is the default.
# ---------------------------------------------------------------------------
[equipment]
telescopes = []
cameras = []
mounts = []

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel thumbnail workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
