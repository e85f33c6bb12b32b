//! Collection ordering.
//!
//! | Criterion | Order | Key |
//! |---|---|---|
//! | `date` | newest first | parsed capture date (unparseable dates last) |
//! | `name` | A → Z | `objectName`, case-folded |
//! | `integrationTime` | longest first | total integration seconds |
//! | `equipment` | A → Z | `equipment.camera`, case-folded |
//!
//! Every sort is stable, so ties keep collection order. Sorting never touches
//! its input; it returns a fresh vector of shared handles.

use crate::metrics::MetricsCache;
use crate::types::PhotoRecord;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown sort criterion: {0} (expected date, name, integrationTime or equipment)")]
pub struct UnknownCriterion(pub String);

/// Selectable gallery ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortCriterion {
    #[default]
    Date,
    Name,
    IntegrationTime,
    Equipment,
}

impl SortCriterion {
    pub const ALL: [SortCriterion; 4] = [
        SortCriterion::Date,
        SortCriterion::Name,
        SortCriterion::IntegrationTime,
        SortCriterion::Equipment,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortCriterion::Date => "date",
            SortCriterion::Name => "name",
            SortCriterion::IntegrationTime => "integrationTime",
            SortCriterion::Equipment => "equipment",
        }
    }

    /// Label for a sort picker.
    pub fn label(self) -> &'static str {
        match self {
            SortCriterion::Date => "Sort by Date",
            SortCriterion::Name => "Sort by Name",
            SortCriterion::IntegrationTime => "Sort by Integration Time",
            SortCriterion::Equipment => "Sort by Equipment",
        }
    }

    /// Parse a criterion name. `integrationTime`, `integration-time` and
    /// `integration_time` are all accepted, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized: String = name
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        SortCriterion::ALL
            .into_iter()
            .find(|c| c.as_str().to_lowercase() == normalized)
    }
}

impl fmt::Display for SortCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortCriterion {
    type Err = UnknownCriterion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownCriterion(s.to_string()))
    }
}

/// Compare two labels the way a collating UI would: case-insensitive first,
/// then case-only differences with lowercase first.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| b.cmp(a))
}

/// Newest first; records without a parseable date go last.
fn compare_dates(a: Option<i64>, b: Option<i64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sort records by `criterion`, leaving the input untouched.
///
/// Integration totals come from `cache`, so re-sorting the same records
/// does not recompute them.
pub fn sort(
    records: &[Rc<PhotoRecord>],
    criterion: SortCriterion,
    cache: &MetricsCache,
) -> Vec<Rc<PhotoRecord>> {
    let mut sorted: Vec<Rc<PhotoRecord>> = records.to_vec();
    match criterion {
        SortCriterion::Date => {
            // Dates are parsed per sort, once per record.
            let mut keyed: Vec<(Option<i64>, Rc<PhotoRecord>)> = sorted
                .into_iter()
                .map(|r| (r.capture_timestamp(), r))
                .collect();
            keyed.sort_by(|(a, _), (b, _)| compare_dates(*a, *b));
            sorted = keyed.into_iter().map(|(_, r)| r).collect();
        }
        SortCriterion::Name => {
            sorted.sort_by(|a, b| locale_compare(&a.object_name, &b.object_name));
        }
        SortCriterion::IntegrationTime => {
            let mut keyed: Vec<(i64, Rc<PhotoRecord>)> = sorted
                .into_iter()
                .map(|r| (cache.total_integration_seconds(&r), r))
                .collect();
            keyed.sort_by(|(a, _), (b, _)| b.cmp(a));
            sorted = keyed.into_iter().map(|(_, r)| r).collect();
        }
        SortCriterion::Equipment => {
            sorted.sort_by(|a, b| locale_compare(&a.equipment.camera, &b.equipment.camera));
        }
    }
    sorted
}

/// Sort by a criterion given by name. Unknown names keep collection order.
pub fn sort_by_name(
    records: &[Rc<PhotoRecord>],
    criterion: &str,
    cache: &MetricsCache,
) -> Vec<Rc<PhotoRecord>> {
    match SortCriterion::from_name(criterion) {
        Some(c) => sort(records, c, cache),
        None => {
            tracing::warn!(criterion, "unknown sort criterion, keeping collection order");
            records.to_vec()
        }
    }
}
