//! Offline thumbnail preprocessing.
//!
//! Walks the image source directory (top level only) and writes a
//! width-constrained copy of every image into the thumbnail directory under
//! the same file name:
//!
//! ```text
//! images/
//! ├── m31.jpg                 # source
//! ├── ngc7000.PNG             # source (extension match is case-insensitive)
//! ├── notes.txt               # ignored
//! └── thumbnails/
//!     ├── m31.jpg             # already present → skipped
//!     └── ngc7000.PNG         # generated
//! ```
//!
//! The step is idempotent: a thumbnail that already exists is never
//! regenerated, so re-running after adding one photo only touches that
//! photo. A file that fails to decode or encode is reported in the
//! [`ThumbnailReport`] and does not stop the others.
//!
//! Files are processed in parallel on the global rayon pool.

use crate::config::GalleryConfig;
use crate::imaging::{
    ImageBackend, Quality, RustBackend, ThumbnailConfig, create_thumbnail, is_supported_extension,
    supported_input_extensions,
};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ThumbnailError {
    #[error("source directory not found: {0}")]
    SourceNotFound(PathBuf),
    #[error("cannot create thumbnail directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot read source directory: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Where to read originals, where to write thumbnails, and how.
#[derive(Debug, Clone)]
pub struct ThumbnailOptions {
    pub source_dir: PathBuf,
    pub thumbnail_dir: PathBuf,
    /// Lowercase extensions without the dot.
    pub extensions: Vec<String>,
    pub thumbnail: ThumbnailConfig,
}

impl ThumbnailOptions {
    /// Options for a source directory with the stock thumbnail settings.
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        let defaults = crate::config::ThumbnailsConfig::default();
        let source_dir = source_dir.into();
        Self {
            thumbnail_dir: source_dir.join(&defaults.directory),
            source_dir,
            extensions: defaults.extensions,
            thumbnail: ThumbnailConfig {
                width: defaults.width,
                quality: Quality::new(defaults.quality),
            },
        }
    }

    /// Options resolved from the gallery config, relative to `root`.
    pub fn from_config(config: &GalleryConfig, root: &Path) -> Self {
        let source_dir = config.source_dir(root);
        Self {
            thumbnail_dir: config.thumbnail_dir(&source_dir),
            source_dir,
            extensions: config
                .thumbnails
                .extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
                .collect(),
            thumbnail: ThumbnailConfig {
                width: config.thumbnails.width,
                quality: Quality::new(config.thumbnails.quality),
            },
        }
    }

    fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }
}

/// One source image and the thumbnail path it maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailJob {
    pub file_name: String,
    pub source: PathBuf,
    pub output: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThumbnailOutcome {
    Generated {
        file_name: String,
        width: u32,
        height: u32,
    },
    /// A thumbnail with this name already exists.
    Skipped { file_name: String },
    Failed { file_name: String, error: String },
}

impl ThumbnailOutcome {
    pub fn file_name(&self) -> &str {
        match self {
            ThumbnailOutcome::Generated { file_name, .. }
            | ThumbnailOutcome::Skipped { file_name }
            | ThumbnailOutcome::Failed { file_name, .. } => file_name,
        }
    }
}

/// Per-file results of a run, ordered by file name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThumbnailReport {
    pub outcomes: Vec<ThumbnailOutcome>,
}

impl ThumbnailReport {
    pub fn generated(&self) -> usize {
        self.count(|o| matches!(o, ThumbnailOutcome::Generated { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, ThumbnailOutcome::Skipped { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, ThumbnailOutcome::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&ThumbnailOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(o)).count()
    }
}

/// List the images directly inside the source directory, sorted by name.
pub fn find_sources(options: &ThumbnailOptions) -> Result<Vec<ThumbnailJob>, ThumbnailError> {
    if !options.source_dir.is_dir() {
        return Err(ThumbnailError::SourceNotFound(options.source_dir.clone()));
    }

    let mut jobs = Vec::new();
    for entry in WalkDir::new(&options.source_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        if !entry.file_type().is_file() || !options.accepts(entry.path()) {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy().into_owned();
        jobs.push(ThumbnailJob {
            output: options.thumbnail_dir.join(&file_name),
            source: entry.into_path(),
            file_name,
        });
    }
    Ok(jobs)
}

/// Generate missing thumbnails with the pure Rust backend.
pub fn generate_thumbnails(options: &ThumbnailOptions) -> Result<ThumbnailReport, ThumbnailError> {
    generate_thumbnails_with_backend(&RustBackend::new(), options)
}

/// Generate missing thumbnails using a specific backend (allows testing with mock).
pub fn generate_thumbnails_with_backend(
    backend: &impl ImageBackend,
    options: &ThumbnailOptions,
) -> Result<ThumbnailReport, ThumbnailError> {
    for ext in &options.extensions {
        if !is_supported_extension(ext) {
            tracing::warn!(
                extension = %ext,
                supported = ?supported_input_extensions(),
                "no decoder for configured extension"
            );
        }
    }

    let jobs = find_sources(options)?;
    std::fs::create_dir_all(&options.thumbnail_dir).map_err(|source| {
        ThumbnailError::CreateDir {
            path: options.thumbnail_dir.clone(),
            source,
        }
    })?;
    tracing::debug!(
        source = %options.source_dir.display(),
        dest = %options.thumbnail_dir.display(),
        images = jobs.len(),
        "preprocessing thumbnails"
    );

    let mut outcomes: Vec<ThumbnailOutcome> = jobs
        .par_iter()
        .map(|job| run_job(backend, job, &options.thumbnail))
        .collect();
    outcomes.sort_by(|a, b| a.file_name().cmp(b.file_name()));

    Ok(ThumbnailReport { outcomes })
}

fn run_job(
    backend: &impl ImageBackend,
    job: &ThumbnailJob,
    config: &ThumbnailConfig,
) -> ThumbnailOutcome {
    if job.output.exists() {
        return ThumbnailOutcome::Skipped {
            file_name: job.file_name.clone(),
        };
    }

    match create_thumbnail(backend, &job.source, &job.output, config) {
        Ok(dims) => {
            tracing::info!(
                file = %job.file_name,
                width = dims.width,
                height = dims.height,
                "thumbnail written"
            );
            ThumbnailOutcome::Generated {
                file_name: job.file_name.clone(),
                width: dims.width,
                height: dims.height,
            }
        }
        Err(e) => {
            tracing::warn!(file = %job.file_name, error = %e, "thumbnail failed");
            ThumbnailOutcome::Failed {
                file_name: job.file_name.clone(),
                error: e.to_string(),
            }
        }
    }
}
