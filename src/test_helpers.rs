//! Shared test utilities for the astro-gallery test suite.
//!
//! Provides record builders, bulk extractors for asserting orderings, the
//! checked-in fixture collection, and synthetic image writers.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let records: Vec<Rc<PhotoRecord>> = vec![
//!     with_bands(record("a", "M31", "2024-01-01"), &[(FilterBand::L, 10, 100)]),
//!     with_camera(record("b", "M1", "2024-06-15"), "QHY268M"),
//! ]
//! .into_iter()
//! .map(Rc::new)
//! .collect();
//!
//! assert_eq!(ids(&records), vec!["a", "b"]);
//! ```

use crate::collection::Collection;
use crate::types::{Equipment, FilterBand, IntegrationTime, PhotoRecord};
use image::{ImageEncoder, RgbImage};
use std::path::Path;
use std::rc::Rc;

// =========================================================================
// Record builders
// =========================================================================

/// A minimal valid record: no integration, no filters, shared equipment.
///
/// The file name is derived from the id so records never collide on disk.
pub fn record(id: &str, object_name: &str, date: &str) -> PhotoRecord {
    PhotoRecord {
        id: id.to_string(),
        title: object_name.to_string(),
        file_name: format!("{id}.jpg"),
        thumbnail_file_name: None,
        object_name: object_name.to_string(),
        date: date.to_string(),
        object_type: Default::default(),
        integration_times: Default::default(),
        equipment: Equipment {
            telescope: "Redcat 51".to_string(),
            camera: "ASI2600MC".to_string(),
            mount: "EQ6-R".to_string(),
            filters: Vec::new(),
        },
    }
}

/// Add `(band, numberOfPhotos, timePerPhoto)` entries and list each band's
/// filter label, keeping the record consistent for `Collection::check`.
pub fn with_bands(mut record: PhotoRecord, bands: &[(FilterBand, i64, i64)]) -> PhotoRecord {
    for &(band, count, seconds) in bands {
        record
            .integration_times
            .set(band, IntegrationTime::new(count, seconds));
        if !record.equipment.filters.contains(&band.label()) {
            record.equipment.filters.push(band.label());
        }
    }
    record
}

pub fn with_camera(mut record: PhotoRecord, camera: &str) -> PhotoRecord {
    record.equipment.camera = camera.to_string();
    record
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// Object names in order.
pub fn names(records: &[Rc<PhotoRecord>]) -> Vec<&str> {
    records.iter().map(|r| r.object_name.as_str()).collect()
}

/// Record ids in order.
pub fn ids(records: &[Rc<PhotoRecord>]) -> Vec<&str> {
    records.iter().map(|r| r.id.as_str()).collect()
}

// =========================================================================
// Fixtures
// =========================================================================

/// Load `fixtures/photos.json`: four well-formed records with no data warnings.
pub fn fixture_collection() -> Collection {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/photos.json");
    Collection::load(&path)
        .unwrap_or_else(|e| panic!("fixture {} failed to load: {e}", path.display()))
}

/// Write a small valid JPEG with a gradient so it survives re-encoding.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    let img = gradient(width, height);
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

/// Write a small valid PNG.
pub fn create_test_png(path: &Path, width: u32, height: u32) {
    gradient(width, height)
        .save_with_format(path, image::ImageFormat::Png)
        .unwrap();
}

fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    })
}
