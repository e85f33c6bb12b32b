//! Pure Rust image processing backend.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, WebP) | `image` crate (pure Rust decoders) |
//! | Identify | `image::image_dimensions` (header only) |
//! | Resize | `image::DynamicImage::resize_exact` with `Lanczos3` filter |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` at the configured quality |
//! | Encode → PNG / TIFF | `image::DynamicImage::write_to` |
//! | Atomic write | `tempfile::NamedTempFile::persist` in the output directory |
//! | Encode → WebP | `image::codecs::webp::WebPEncoder` (lossless) |
//!
//! Thumbnails keep the name, and therefore the format, of their original.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::ResizeParams;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::webp::WebPEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::LazyLock;
use tempfile::NamedTempFile;

/// Extensions the compiled-in decoders can read.
const PHOTO_CANDIDATES: &[(&str, ImageFormat)] = &[
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("png", ImageFormat::Png),
    ("tif", ImageFormat::Tiff),
    ("tiff", ImageFormat::Tiff),
    ("webp", ImageFormat::WebP),
];

static SUPPORTED_EXTENSIONS: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    PHOTO_CANDIDATES
        .iter()
        .filter(|(_, fmt)| fmt.reading_enabled())
        .map(|(ext, _)| *ext)
        .collect()
});

/// Returns the set of image file extensions that have working decoders compiled in.
pub fn supported_input_extensions() -> &'static [&'static str] {
    &SUPPORTED_EXTENSIONS
}

/// Whether `ext` (without the dot, any case) can be decoded.
pub fn is_supported_extension(ext: &str) -> bool {
    SUPPORTED_EXTENSIONS
        .iter()
        .any(|e| e.eq_ignore_ascii_case(ext))
}

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Load and decode an image from disk.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    ImageReader::open(path)
        .map_err(BackendError::Io)?
        .decode()
        .map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
        })
}

/// Save an image in the format implied by the output extension.
///
/// The image is encoded into a temporary file next to `path` and renamed
/// into place only once encoding succeeded, so a failed encode never leaves a
/// truncated file under the final name.
fn save_image(img: &DynamicImage, path: &Path, quality: u32) -> Result<(), BackendError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    let format = match ext.as_str() {
        "jpg" | "jpeg" => ImageFormat::Jpeg,
        "png" => ImageFormat::Png,
        "tif" | "tiff" => ImageFormat::Tiff,
        "webp" => ImageFormat::WebP,
        other => {
            return Err(BackendError::ProcessingFailed(format!(
                "Unsupported output format: {}",
                other
            )));
        }
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(dir)?;
    encode(img, format, quality, staged.as_file_mut())
        .map_err(|e| BackendError::ProcessingFailed(format!("{ext} encode failed: {e}")))?;
    staged.persist(path).map_err(|e| BackendError::Io(e.error))?;
    Ok(())
}

fn encode(
    img: &DynamicImage,
    format: ImageFormat,
    quality: u32,
    file: &mut File,
) -> Result<(), image::ImageError> {
    let mut writer = BufWriter::new(file);
    match format {
        ImageFormat::Jpeg => {
            let encoder = JpegEncoder::new_with_quality(&mut writer, quality.clamp(1, 100) as u8);
            // JPEG has no alpha channel
            DynamicImage::ImageRgb8(img.to_rgb8()).write_with_encoder(encoder)?;
        }
        ImageFormat::WebP => {
            DynamicImage::ImageRgba8(img.to_rgba8())
                .write_with_encoder(WebPEncoder::new_lossless(&mut writer))?;
        }
        other => img.write_to(&mut writer, other)?,
    }
    writer.flush()?;
    Ok(())
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = image::image_dimensions(path).map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to read dimensions: {}", e))
        })?;
        Ok(Dimensions { width, height })
    }

    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError> {
        let img = load_image(&params.source)?;
        let resized = img.resize_exact(params.width, params.height, FilterType::Lanczos3);
        save_image(&resized, &params.output, params.quality.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::params::Quality;
    use crate::test_helpers::{create_test_jpeg, create_test_png};

    fn resize(source: &Path, output: &Path, width: u32, height: u32) -> Result<(), BackendError> {
        RustBackend::new().resize(&ResizeParams {
            source: source.to_path_buf(),
            output: output.to_path_buf(),
            width,
            height,
            quality: Quality::new(85),
        })
    }

    #[test]
    fn supported_extensions_match_decodable_formats() {
        let exts = supported_input_extensions();
        for expected in &["jpg", "jpeg", "png", "tif", "tiff", "webp"] {
            assert!(
                exts.contains(expected),
                "expected {expected} in supported extensions"
            );
        }
        assert!(is_supported_extension("JPG"));
        assert!(!is_supported_extension("avif"));
    }

    #[test]
    fn identify_synthetic_jpeg() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("test.jpg");
        create_test_jpeg(&path, 200, 150);

        let backend = RustBackend::new();
        let dims = backend.identify(&path).unwrap();
        assert_eq!(dims.width, 200);
        assert_eq!(dims.height, 150);
    }

    #[test]
    fn identify_nonexistent_file_errors() {
        let backend = RustBackend::new();
        let result = backend.identify(Path::new("/nonexistent/image.jpg"));
        assert!(result.is_err());
    }

    #[test]
    fn resize_jpeg_to_exact_dimensions() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("source.jpg");
        create_test_jpeg(&source, 800, 600);

        let output = tmp.path().join("thumb.jpg");
        resize(&source, &output, 400, 300).unwrap();

        assert_eq!(image::image_dimensions(&output).unwrap(), (400, 300));
    }

    #[test]
    fn resize_png_keeps_png_format() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("source.png");
        create_test_png(&source, 100, 200);

        let output = tmp.path().join("thumb.png");
        resize(&source, &output, 400, 800).unwrap();

        let format = ImageReader::open(&output)
            .unwrap()
            .with_guessed_format()
            .unwrap()
            .format();
        assert_eq!(format, Some(ImageFormat::Png));
        assert_eq!(image::image_dimensions(&output).unwrap(), (400, 800));
    }

    #[test]
    fn resize_to_webp_output() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("source.jpg");
        create_test_jpeg(&source, 64, 48);

        let output = tmp.path().join("thumb.webp");
        resize(&source, &output, 32, 24).unwrap();
        assert_eq!(image::image_dimensions(&output).unwrap(), (32, 24));
    }

    #[test]
    fn resize_unsupported_format_errors() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("source.jpg");
        create_test_jpeg(&source, 100, 100);

        let output = tmp.path().join("output.bmp");
        let result = resize(&source, &output, 50, 50);
        assert!(matches!(result, Err(BackendError::ProcessingFailed(_))));
        assert!(!output.exists());
    }

    #[test]
    fn failed_encode_leaves_no_output() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("source.jpg");
        create_test_jpeg(&source, 100, 100);

        // Baseline JPEG cannot store a width above 65535.
        let output = tmp.path().join("thumb.jpg");
        let result = resize(&source, &output, 70_000, 1);
        assert!(matches!(result, Err(BackendError::ProcessingFailed(_))));
        assert!(!output.exists());

        let leftovers: Vec<_> = std::fs::read_dir(tmp.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(leftovers, vec![std::ffi::OsString::from("source.jpg")]);
    }

    #[test]
    fn resize_corrupt_source_errors() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("broken.jpg");
        std::fs::write(&source, b"not a jpeg").unwrap();

        let result = resize(&source, &tmp.path().join("out.jpg"), 50, 50);
        assert!(result.is_err());
    }
}
