//! Loading the static photo collection.
//!
//! The collection is read once at startup from a JSON file, either the
//! gallery's `{ "photos": [...] }` document or a bare array of records.
//! Records are handed out as `Rc<PhotoRecord>`: the handle *is* the record's
//! identity, which is what [`MetricsCache`](crate::metrics::MetricsCache)
//! keys on. Within a session the collection never changes.

use crate::types::{FilterBand, PhotoRecord};
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CollectionError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Deserialize)]
struct CollectionDocument {
    photos: Vec<PhotoRecord>,
}

/// Ordered, read-only sequence of photo records.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    records: Vec<Rc<PhotoRecord>>,
}

impl Collection {
    pub fn new(records: Vec<PhotoRecord>) -> Self {
        Self {
            records: records.into_iter().map(Rc::new).collect(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, CollectionError> {
        // Pick the shape from the first token so serde reports the real
        // field and position instead of a generic mismatch.
        let records = if json.trim_start().starts_with('[') {
            serde_json::from_str::<Vec<PhotoRecord>>(json)?
        } else {
            serde_json::from_str::<CollectionDocument>(json)?.photos
        };
        Ok(Self::new(records))
    }

    pub fn load(path: &Path) -> Result<Self, CollectionError> {
        let content = std::fs::read_to_string(path).map_err(|source| CollectionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let collection = Self::from_json(&content)?;
        tracing::debug!(path = %path.display(), photos = collection.len(), "loaded collection");
        Ok(collection)
    }

    pub fn records(&self) -> &[Rc<PhotoRecord>] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rc<PhotoRecord>> {
        self.records.iter()
    }

    /// Report data problems that the gallery tolerates but a curator should fix.
    ///
    /// Nothing here is fatal: the gallery renders these records as-is.
    pub fn check(&self) -> Vec<DataWarning> {
        let mut warnings = Vec::new();
        let mut seen = HashSet::new();

        for record in &self.records {
            if !seen.insert(record.id.as_str()) {
                warnings.push(DataWarning::DuplicateId {
                    id: record.id.clone(),
                });
            }
            if record.capture_timestamp().is_none() {
                warnings.push(DataWarning::UnparseableDate {
                    id: record.id.clone(),
                    date: record.date.clone(),
                });
            }
            for (band, time) in record.integration_times.iter() {
                if time.number_of_photos < 0 || time.time_per_photo < 0 {
                    warnings.push(DataWarning::NegativeIntegration {
                        id: record.id.clone(),
                        band,
                    });
                }
                if !record.equipment.filters.contains(&band.label()) {
                    warnings.push(DataWarning::BandWithoutFilter {
                        id: record.id.clone(),
                        band,
                    });
                }
            }
        }

        warnings
    }
}

/// A tolerated inconsistency in a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataWarning {
    DuplicateId { id: String },
    UnparseableDate { id: String, date: String },
    NegativeIntegration { id: String, band: FilterBand },
    /// Integration time recorded for a band whose label is missing from
    /// `equipment.filters`.
    BandWithoutFilter { id: String, band: FilterBand },
}

impl fmt::Display for DataWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataWarning::DuplicateId { id } => write!(f, "{id}: duplicate id"),
            DataWarning::UnparseableDate { id, date } => {
                write!(f, "{id}: unparseable date {date:?}, sorted last by date")
            }
            DataWarning::NegativeIntegration { id, band } => {
                write!(f, "{id}: negative integration values for {band}")
            }
            DataWarning::BandWithoutFilter { id, band } => write!(
                f,
                "{id}: integration time for {band} but filter {} not listed",
                band.label()
            ),
        }
    }
}
