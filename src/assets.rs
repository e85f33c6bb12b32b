//! Asset path resolution.
//!
//! Image references are site-absolute paths (`/images/m31.jpg`). When the
//! gallery is hosted under a sub-path, production builds prefix every path
//! with a fixed base segment; development serves from the root and passes
//! paths through untouched.
//!
//! ```text
//! development:  /images/m31.jpg  →  /images/m31.jpg
//! production:   /images/m31.jpg  →  /AstroImageGallery/images/m31.jpg
//! ```

use crate::config::AssetsConfig;
use crate::types::PhotoRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Directory (under the site root) holding full-size images.
pub const IMAGES_DIR: &str = "/images";
/// Directory (under the site root) holding thumbnails.
pub const THUMBNAILS_DIR: &str = "/images/thumbnails";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown asset mode: {0} (expected development or production)")]
pub struct UnknownAssetMode(pub String);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetMode {
    #[default]
    Development,
    Production,
}

impl fmt::Display for AssetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AssetMode::Development => "development",
            AssetMode::Production => "production",
        })
    }
}

impl FromStr for AssetMode {
    type Err = UnknownAssetMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(AssetMode::Development),
            "production" | "prod" => Ok(AssetMode::Production),
            _ => Err(UnknownAssetMode(s.to_string())),
        }
    }
}

/// Prefix `path` with `base` in production; pass through in development.
///
/// A missing leading slash on `path` and a trailing slash on `base` are
/// normalized so the two always join with exactly one `/`.
pub fn asset_path(path: &str, mode: AssetMode, base: &str) -> String {
    match mode {
        AssetMode::Development => path.to_string(),
        AssetMode::Production => {
            let base = base.trim_end_matches('/');
            if path.starts_with('/') {
                format!("{base}{path}")
            } else {
                format!("{base}/{path}")
            }
        }
    }
}

/// Resolves image and thumbnail URLs for records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetResolver {
    mode: AssetMode,
    base_path: String,
}

impl AssetResolver {
    pub fn new(mode: AssetMode, base_path: impl Into<String>) -> Self {
        Self {
            mode,
            base_path: base_path.into(),
        }
    }

    pub fn from_config(config: &AssetsConfig) -> Self {
        Self::new(config.mode, config.base_path.clone())
    }

    pub fn mode(&self) -> AssetMode {
        self.mode
    }

    pub fn resolve(&self, path: &str) -> String {
        asset_path(path, self.mode, &self.base_path)
    }

    /// Full-resolution image URL.
    pub fn image_path(&self, record: &PhotoRecord) -> String {
        self.resolve(&format!("{IMAGES_DIR}/{}", record.file_name))
    }

    /// Grid thumbnail URL, falling back to the full image's file name.
    pub fn thumbnail_path(&self, record: &PhotoRecord) -> String {
        self.resolve(&format!("{THUMBNAILS_DIR}/{}", record.thumbnail_name()))
    }
}
