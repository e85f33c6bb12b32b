//! # Astro Gallery
//!
//! The model behind a small astrophotography portfolio: a static collection of
//! photo records, sortable four ways, browsed in a grid and a full-screen
//! viewer, plus the offline step that prepares grid thumbnails.
//!
//! # Architecture
//!
//! ```text
//! photos.json → Collection → sort(criterion) → Gallery (ordered list + open index)
//!                                                   │
//!                                                   └→ Viewer (Viewing(i) | Closed)
//!
//! images/ → thumbnails → images/thumbnails/   (offline, independent of the above)
//! ```
//!
//! The collection is loaded once and never mutated. Everything on screen is
//! derived from it: the ordered list is recomputed when the criterion changes,
//! and the total integration time of each record is computed once per record
//! and memoized.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | Photo record schema, filter bands and labels, object types |
//! | [`collection`] | Loading `photos.json`, data checks |
//! | [`metrics`] | Total integration time, duration formatting, identity-keyed cache |
//! | [`sort`] | The four sort criteria and the ordering they produce |
//! | [`gallery`] | Current criterion, visible order, and the open photo |
//! | [`viewer`] | Viewer state machine and input mapping |
//! | [`record`] | Admin workflow: drafting a new record as JSON |
//! | [`assets`] | Development/production image URL resolution |
//! | [`thumbnails`] | Offline thumbnail preprocessing |
//! | [`imaging`] | Pure-Rust image operations behind a backend trait |
//! | [`config`] | `config.toml` loading, validation, and merging |
//! | [`logging`] | `tracing` subscriber setup |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Identity Over Equality
//!
//! Records are shared as `Rc<PhotoRecord>`. The allocation is the record's
//! identity: the metrics cache keys on it, and re-sorting while the viewer is
//! open follows the open record to its new position by pointer, not by id.
//! Two records with the same id stay distinguishable.
//!
//! ## Clamped Navigation
//!
//! Moving past either end of the list is a no-op, never an error, so holding
//! an arrow key at the last photo is harmless. Only explicit indices (opening
//! or jumping to photo N) can be invalid, and those are rejected.
//!
//! ## Thumbnails Keep Their Name
//!
//! A thumbnail has the same file name as its original, in a sibling
//! directory. The gallery needs no manifest to find it, and the preprocessing
//! step can tell what is missing just by looking at the directory.

pub mod assets;
pub mod collection;
pub mod config;
pub mod gallery;
pub mod imaging;
pub mod logging;
pub mod metrics;
pub mod output;
pub mod record;
pub mod sort;
pub mod thumbnails;
pub mod types;
pub mod viewer;

#[cfg(test)]
pub(crate) mod test_helpers;
