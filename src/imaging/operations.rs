//! High-level image operations.
//!
//! These functions combine calculations with backend execution.
//! They take configuration, compute parameters, and call the backend.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::calculate_width_constrained;
use super::params::{Quality, ResizeParams};
use std::path::Path;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Configuration for thumbnail generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThumbnailConfig {
    /// Output width in pixels.
    pub width: u32,
    pub quality: Quality,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            width: 400,
            quality: Quality::default(),
        }
    }
}

/// Plan a thumbnail operation without executing it.
///
/// Useful for testing parameter generation.
pub fn plan_thumbnail(
    source: &Path,
    output_path: &Path,
    source_dims: Dimensions,
    config: &ThumbnailConfig,
) -> ResizeParams {
    let (width, height) =
        calculate_width_constrained((source_dims.width, source_dims.height), config.width);

    ResizeParams {
        source: source.to_path_buf(),
        output: output_path.to_path_buf(),
        width,
        height,
        quality: config.quality,
    }
}

/// Create a width-constrained thumbnail of `source` at `output_path`.
///
/// Returns the dimensions written.
pub fn create_thumbnail(
    backend: &impl ImageBackend,
    source: &Path,
    output_path: &Path,
    config: &ThumbnailConfig,
) -> Result<Dimensions> {
    let dims = backend.identify(source)?;
    let params = plan_thumbnail(source, output_path, dims, config);
    backend.resize(&params)?;
    Ok(Dimensions {
        width: params.width,
        height: params.height,
    })
}
