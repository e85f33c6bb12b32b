//! CLI output formatting for every command.
//!
//! # Information-First Display
//!
//! Output is organized around photos, not files. Every photo is shown by its
//! position in the current ordering and its object name; paths, dates and
//! exposure details follow as indented context lines.
//!
//! # Output Format
//!
//! ## List
//!
//! ```text
//! Sort by Integration Time (3 photos)
//! 001 M1 - Crab Nebula
//!     Date: 2024-06-15
//!     Integration: 1h 23min
//!     Filters: Ha
//!     Thumbnail: /images/thumbnails/m1.jpg
//! 002 M31 - Andromeda Galaxy
//!     ...
//! ```
//!
//! ## Viewer
//!
//! ```text
//! [2/3] M31 - Andromeda Galaxy
//!     Image: /images/m31.jpg
//!     Date: 2024-01-01
//!     Type: DSO
//!     Filters: Luminance
//!     Integration Times:
//!         L: 10x100s (0h 16min)
//!     Total: 0h 16min
//!     Equipment:
//!         Telescope: Redcat 51
//!         Camera: ASI2600MM
//!         Mount: EQ6-R
//! < previous | next >
//! ```
//!
//! ## Thumbnails
//!
//! ```text
//! Thumbnails → images/thumbnails
//!     broken.jpg: failed (Failed to decode ...)
//!     m31.jpg: generated 400x267
//!     m42.jpg: exists
//! Generated 1, skipped 1, failed 1
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::assets::AssetResolver;
use crate::collection::{Collection, DataWarning};
use crate::gallery::Gallery;
use crate::metrics::{format_band_integration, format_duration};
use crate::thumbnails::{ThumbnailOutcome, ThumbnailReport};
use crate::types::PhotoRecord;
use crate::viewer::{Edge, Transition};
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Object name, or the file name in parens when the record has no name.
fn photo_name(record: &PhotoRecord) -> String {
    if record.object_name.trim().is_empty() {
        format!("({})", record.file_name)
    } else {
        record.object_name.clone()
    }
}

fn filter_list(record: &PhotoRecord) -> String {
    record
        .equipment
        .filters
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// List
// ============================================================================

/// Format the gallery grid: every visible photo in display order.
pub fn format_gallery_listing(gallery: &Gallery, resolver: &AssetResolver) -> Vec<String> {
    let mut lines = Vec::new();
    let count = gallery.len();
    let noun = if count == 1 { "photo" } else { "photos" };
    lines.push(format!("{} ({count} {noun})", gallery.criterion().label()));

    for (i, record) in gallery.visible().iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), photo_name(record)));
        lines.push(format!("{}Date: {}", indent(1), record.date));
        lines.push(format!(
            "{}Integration: {}",
            indent(1),
            format_duration(gallery.total_integration_seconds(record))
        ));
        if !record.equipment.filters.is_empty() {
            lines.push(format!("{}Filters: {}", indent(1), filter_list(record)));
        }
        lines.push(format!(
            "{}Thumbnail: {}",
            indent(1),
            resolver.thumbnail_path(record)
        ));
    }

    lines
}

pub fn print_gallery_listing(gallery: &Gallery, resolver: &AssetResolver) {
    for line in format_gallery_listing(gallery, resolver) {
        println!("{}", line);
    }
}

// ============================================================================
// Viewer
// ============================================================================

/// Format the full-screen viewer for the open photo.
///
/// Navigation hints only offer directions that lead somewhere.
pub fn format_viewer(gallery: &Gallery, resolver: &AssetResolver) -> Vec<String> {
    let (Some(index), Some(record)) = (gallery.open_index(), gallery.selected()) else {
        return vec!["Viewer closed".to_string()];
    };
    let nav = gallery.navigation();

    let mut lines = vec![
        format!("[{}/{}] {}", index + 1, nav.total, photo_name(record)),
        format!("{}Image: {}", indent(1), resolver.image_path(record)),
        format!("{}Date: {}", indent(1), record.date),
        format!("{}Type: {}", indent(1), record.object_type),
        format!("{}Filters: {}", indent(1), filter_list(record)),
    ];

    if !record.integration_times.is_empty() {
        lines.push(format!("{}Integration Times:", indent(1)));
        for (band, time) in record.integration_times.iter() {
            lines.push(format!(
                "{}{}: {}",
                indent(2),
                band,
                format_band_integration(time)
            ));
        }
    }
    lines.push(format!(
        "{}Total: {}",
        indent(1),
        format_duration(gallery.total_integration_seconds(record))
    ));

    lines.push(format!("{}Equipment:", indent(1)));
    lines.push(format!("{}Telescope: {}", indent(2), record.equipment.telescope));
    lines.push(format!("{}Camera: {}", indent(2), record.equipment.camera));
    lines.push(format!("{}Mount: {}", indent(2), record.equipment.mount));

    let hints: Vec<&str> = [
        nav.has_previous.then_some("< previous"),
        nav.has_next.then_some("next >"),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !hints.is_empty() {
        lines.push(hints.join(" | "));
    }

    lines
}

pub fn print_viewer(gallery: &Gallery, resolver: &AssetResolver) {
    for line in format_viewer(gallery, resolver) {
        println!("{}", line);
    }
}

/// Status line for inputs that did not move the viewer.
pub fn format_transition(transition: Transition) -> Option<String> {
    match transition {
        Transition::Moved { .. } => None,
        Transition::AtBoundary {
            edge: Edge::Last, ..
        } => Some("Already at the last photo".into()),
        Transition::AtBoundary {
            edge: Edge::First, ..
        } => Some("Already at the first photo".into()),
        Transition::Closed => Some("Viewer closed".into()),
        Transition::Ignored => Some("Viewer is closed; enter a photo number to open one".into()),
    }
}

// ============================================================================
// Thumbnails
// ============================================================================

/// Format a thumbnail preprocessing report.
pub fn format_thumbnail_report(report: &ThumbnailReport, thumbnail_dir: &Path) -> Vec<String> {
    let mut lines = vec![format!("Thumbnails → {}", thumbnail_dir.display())];

    for outcome in &report.outcomes {
        let status = match outcome {
            ThumbnailOutcome::Generated { width, height, .. } => {
                format!("generated {width}x{height}")
            }
            ThumbnailOutcome::Skipped { .. } => "exists".to_string(),
            ThumbnailOutcome::Failed { error, .. } => format!("failed ({error})"),
        };
        lines.push(format!("{}{}: {}", indent(1), outcome.file_name(), status));
    }

    lines.push(format!(
        "Generated {}, skipped {}, failed {}",
        report.generated(),
        report.skipped(),
        report.failed()
    ));
    lines
}

pub fn print_thumbnail_report(report: &ThumbnailReport, thumbnail_dir: &Path) {
    for line in format_thumbnail_report(report, thumbnail_dir) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

/// Format the result of validating a collection.
pub fn format_check_output(
    collection: &Collection,
    source: &Path,
    warnings: &[DataWarning],
) -> Vec<String> {
    let mut lines = vec![format!(
        "Collection {} ({} photos)",
        source.display(),
        collection.len()
    )];
    if warnings.is_empty() {
        lines.push(format!("{}No problems found", indent(1)));
    } else {
        lines.push(format!("{}Warnings", indent(1)));
        for warning in warnings {
            lines.push(format!("{}{}", indent(2), warning));
        }
    }
    lines
}

pub fn print_check_output(collection: &Collection, source: &Path, warnings: &[DataWarning]) {
    for line in format_check_output(collection, source, warnings) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetMode;
    use crate::sort::SortCriterion;
    use crate::test_helpers::*;
    use crate::types::FilterBand;
    use crate::viewer::Viewer;

    fn resolver() -> AssetResolver {
        AssetResolver::new(AssetMode::Development, "/AstroImageGallery")
    }

    fn gallery() -> Gallery {
        let mut m31 = with_bands(
            record("a", "M31 - Andromeda Galaxy", "2024-01-01"),
            &[(FilterBand::L, 10, 100)],
        );
        m31.file_name = "m31.jpg".into();
        let mut m1 = with_bands(
            record("b", "M1 - Crab Nebula", "2024-06-15"),
            &[(FilterBand::Ha, 50, 100)],
        );
        m1.file_name = "m1.jpg".into();
        Gallery::with_criterion(Collection::new(vec![m31, m1]), SortCriterion::IntegrationTime)
    }

    #[test]
    fn index_is_zero_padded() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(1000), "1000");
    }

    #[test]
    fn listing_shows_photos_in_display_order() {
        let lines = format_gallery_listing(&gallery(), &resolver());
        assert_eq!(lines[0], "Sort by Integration Time (2 photos)");
        assert_eq!(lines[1], "001 M1 - Crab Nebula");
        assert_eq!(lines[2], "    Date: 2024-06-15");
        assert_eq!(lines[3], "    Integration: 1h 23min");
        assert_eq!(lines[4], "    Filters: Ha");
        assert_eq!(lines[5], "    Thumbnail: /images/thumbnails/m1.jpg");
        assert_eq!(lines[6], "002 M31 - Andromeda Galaxy");
    }

    #[test]
    fn listing_of_empty_gallery_has_only_header() {
        let empty = Gallery::new(Collection::new(Vec::new()));
        assert_eq!(
            format_gallery_listing(&empty, &resolver()),
            vec!["Sort by Date (0 photos)"]
        );
    }

    #[test]
    fn unnamed_photo_falls_back_to_file_name() {
        let mut r = record("x", "", "2024-01-01");
        r.file_name = "mystery.jpg".into();
        assert_eq!(photo_name(&r), "(mystery.jpg)");
    }

    #[test]
    fn closed_viewer() {
        assert_eq!(format_viewer(&gallery(), &resolver()), vec!["Viewer closed"]);
    }

    #[test]
    fn viewer_details_for_open_photo() {
        let mut g = gallery();
        g.open(1).unwrap();
        let lines = format_viewer(&g, &resolver());

        assert_eq!(lines[0], "[2/2] M31 - Andromeda Galaxy");
        assert_eq!(lines[1], "    Image: /images/m31.jpg");
        assert!(lines.contains(&"    Type: DSO".to_string()));
        assert!(lines.contains(&"    Filters: Luminance".to_string()));
        assert!(lines.contains(&"        L: 10x100s (0h 16min)".to_string()));
        assert!(lines.contains(&"    Total: 0h 16min".to_string()));
        assert_eq!(lines.last().unwrap(), "< previous");
    }

    #[test]
    fn viewer_hints_follow_position() {
        let mut g = gallery();
        g.open(0).unwrap();
        assert_eq!(format_viewer(&g, &resolver()).last().unwrap(), "next >");

        let mut single = Gallery::new(Collection::new(vec![record("a", "M31", "2024-01-01")]));
        single.open(0).unwrap();
        let lines = format_viewer(&single, &resolver());
        assert!(lines.last().unwrap().starts_with("        Mount:"));
    }

    #[test]
    fn transitions_worth_reporting() {
        assert_eq!(format_transition(Transition::Moved { from: 0, to: 1 }), None);
        assert_eq!(
            format_transition(Transition::AtBoundary {
                index: 2,
                edge: Edge::Last,
            })
            .as_deref(),
            Some("Already at the last photo")
        );
        assert_eq!(
            format_transition(Transition::AtBoundary {
                index: 0,
                edge: Edge::First,
            })
            .as_deref(),
            Some("Already at the first photo")
        );
        assert_eq!(
            format_transition(Transition::Closed).as_deref(),
            Some("Viewer closed")
        );
    }

    #[test]
    fn single_photo_boundary_follows_direction() {
        let mut viewer = Viewer::new(1);
        viewer.open(0).unwrap();
        assert_eq!(
            format_transition(viewer.prev()).as_deref(),
            Some("Already at the first photo")
        );
        assert_eq!(
            format_transition(viewer.next()).as_deref(),
            Some("Already at the last photo")
        );
    }

    #[test]
    fn thumbnail_report_lines() {
        let report = ThumbnailReport {
            outcomes: vec![
                ThumbnailOutcome::Failed {
                    file_name: "broken.jpg".into(),
                    error: "bad data".into(),
                },
                ThumbnailOutcome::Generated {
                    file_name: "m31.jpg".into(),
                    width: 400,
                    height: 267,
                },
                ThumbnailOutcome::Skipped {
                    file_name: "m42.jpg".into(),
                },
            ],
        };
        let lines = format_thumbnail_report(&report, Path::new("images/thumbnails"));
        assert_eq!(
            lines,
            vec![
                "Thumbnails → images/thumbnails",
                "    broken.jpg: failed (bad data)",
                "    m31.jpg: generated 400x267",
                "    m42.jpg: exists",
                "Generated 1, skipped 1, failed 1",
            ]
        );
    }

    #[test]
    fn check_output_lists_warnings() {
        let collection = Collection::new(vec![
            record("a", "M31", "2024-01-01"),
            record("a", "M42", "someday"),
        ]);
        let warnings = collection.check();
        let lines = format_check_output(&collection, Path::new("photos.json"), &warnings);
        assert_eq!(lines[0], "Collection photos.json (2 photos)");
        assert_eq!(lines[1], "    Warnings");
        assert_eq!(lines[2], "        a: duplicate id");
        assert!(lines[3].contains("unparseable date \"someday\""));
    }

    #[test]
    fn check_output_clean_collection() {
        let collection = fixture_collection();
        let lines = format_check_output(&collection, Path::new("photos.json"), &[]);
        assert_eq!(lines[1], "    No problems found");
    }
}
