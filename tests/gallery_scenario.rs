//! End-to-end behaviour of the gallery through the public API: load a
//! collection, order it, and walk it in the viewer.

use astro_gallery::collection::Collection;
use astro_gallery::gallery::Gallery;
use astro_gallery::metrics::{MetricsCache, format_duration};
use astro_gallery::sort::{SortCriterion, sort};
use astro_gallery::viewer::{Edge, Transition, ViewerInput, ViewerState};
use std::path::Path;

fn photo(id: &str, name: &str, date: &str, bands: &str) -> String {
    format!(
        r#"{{"id":"{id}","title":"{name}","fileName":"{id}.jpg","objectName":"{name}",
            "date":"{date}","type":"DSO","integrationTimes":{{{bands}}},
            "equipment":{{"telescope":"Redcat 51","camera":"ASI2600MM","mount":"EQ6-R","filters":[]}}}}"#
    )
}

fn collection(photos: &[String]) -> Collection {
    Collection::from_json(&format!(r#"{{"photos":[{}]}}"#, photos.join(","))).unwrap()
}

fn ids(gallery: &Gallery) -> Vec<String> {
    gallery.visible().iter().map(|r| r.id.clone()).collect()
}

#[test]
fn integration_sort_then_walk_to_the_end() {
    let photos = collection(&[
        photo("small", "M31", "2024-01-01", r#""L":{"numberOfPhotos":10,"timePerPhoto":100}"#),
        photo("large", "M42", "2024-02-01", r#""Ha":{"numberOfPhotos":50,"timePerPhoto":100}"#),
        photo("none", "M45", "2024-03-01", ""),
    ]);
    let mut gallery = Gallery::new(photos);
    gallery.select_criterion(SortCriterion::IntegrationTime);
    assert_eq!(ids(&gallery), vec!["large", "small", "none"]);

    gallery.open(0).unwrap();
    assert_eq!(gallery.selected().unwrap().id, "large");

    assert_eq!(
        gallery.handle_input(ViewerInput::Forward),
        Transition::Moved { from: 0, to: 1 }
    );
    assert_eq!(
        gallery.handle_input(ViewerInput::Forward),
        Transition::Moved { from: 1, to: 2 }
    );
    assert_eq!(
        gallery.handle_input(ViewerInput::Forward),
        Transition::AtBoundary {
            index: 2,
            edge: Edge::Last,
        }
    );
    assert_eq!(gallery.viewer().state(), ViewerState::Viewing(2));
    assert_eq!(gallery.selected().unwrap().id, "none");
}

#[test]
fn totals_order_descending() {
    let photos = collection(&[
        photo("hour", "A", "2024-01-01", r#""L":{"numberOfPhotos":60,"timePerPhoto":60}"#),
        photo("two", "B", "2024-01-01", r#""R":{"numberOfPhotos":120,"timePerPhoto":60}"#),
        photo("zero", "C", "2024-01-01", ""),
    ]);
    let cache = MetricsCache::new();
    let sorted = sort(photos.records(), SortCriterion::IntegrationTime, &cache);
    let totals: Vec<i64> = sorted
        .iter()
        .map(|r| cache.total_integration_seconds(r))
        .collect();
    assert_eq!(totals, vec![7200, 3600, 0]);
    assert_eq!(format_duration(totals[0]), "2h 0min");
}

#[test]
fn name_and_date_orders() {
    let photos = collection(&[
        photo("1", "M31", "2024-01-01", ""),
        photo("2", "M1", "2024-06-15", ""),
        photo("3", "NGC7000", "2023-09-09", ""),
    ]);
    let mut gallery = Gallery::with_criterion(photos, SortCriterion::Name);
    let names: Vec<&str> = gallery
        .visible()
        .iter()
        .map(|r| r.object_name.as_str())
        .collect();
    assert_eq!(names, vec!["M1", "M31", "NGC7000"]);

    gallery.select_criterion(SortCriterion::Date);
    assert_eq!(ids(&gallery), vec!["2", "1", "3"]);
}

#[test]
fn boundaries_hold_under_repeated_input() {
    let photos = collection(&[
        photo("1", "A", "2024-01-03", ""),
        photo("2", "B", "2024-01-02", ""),
        photo("3", "C", "2024-01-01", ""),
    ]);
    let mut gallery = Gallery::new(photos);

    gallery.open(0).unwrap();
    for _ in 0..10 {
        gallery.handle_input(ViewerInput::Backward);
    }
    assert_eq!(gallery.open_index(), Some(0));

    gallery.open(2).unwrap();
    for _ in 0..10 {
        gallery.handle_input(ViewerInput::Forward);
    }
    assert_eq!(gallery.open_index(), Some(2));

    gallery.close();
    gallery.open(1).unwrap();
    assert_eq!(gallery.viewer().state(), ViewerState::Viewing(1));
}

#[test]
fn open_photo_survives_a_resort() {
    let photos = collection(&[
        photo("m31", "M31", "2024-01-01", r#""L":{"numberOfPhotos":1,"timePerPhoto":1}"#),
        photo("m1", "M1", "2024-06-15", r#""L":{"numberOfPhotos":9,"timePerPhoto":1}"#),
        photo("ngc", "NGC7000", "2023-01-01", ""),
    ]);
    let mut gallery = Gallery::new(photos);
    // Date order: m1, m31, ngc
    gallery.open(2).unwrap();
    assert_eq!(gallery.selected().unwrap().id, "ngc");

    gallery.select_criterion(SortCriterion::Name);
    assert_eq!(gallery.selected().unwrap().id, "ngc");
    gallery.select_criterion(SortCriterion::IntegrationTime);
    assert_eq!(gallery.selected().unwrap().id, "ngc");
    assert_eq!(gallery.open_index(), Some(2));
}

#[test]
fn checked_in_fixture_loads_cleanly() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/photos.json");
    let photos = Collection::load(&path).unwrap();
    assert!(photos.check().is_empty());

    let gallery = Gallery::with_criterion(photos, SortCriterion::IntegrationTime);
    let first = &gallery.visible()[0];
    // Narrowband NGC 7000: 100 x 300 s
    assert_eq!(first.id, "1718409600000");
    assert_eq!(format_duration(gallery.total_integration_seconds(first)), "8h 20min");
}
