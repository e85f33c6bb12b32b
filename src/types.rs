//! Photo record data model.
//!
//! These types are the on-disk schema of the gallery's `photos.json` and the
//! shape the admin workflow emits. Field names and nesting are fixed: the
//! admin output must be appendable to the collection file verbatim, so every
//! struct here serializes with the exact camelCase keys of the JSON source.
//!
//! ```json
//! {
//!   "id": "1718400000000",
//!   "title": "M31 - Andromeda Galaxy",
//!   "fileName": "m31.jpg",
//!   "objectName": "M31 - Andromeda Galaxy",
//!   "date": "2024-06-15",
//!   "type": "DSO",
//!   "integrationTimes": { "L": { "numberOfPhotos": 60, "timePerPhoto": 120 } },
//!   "equipment": {
//!     "telescope": "Redcat 51",
//!     "camera": "ASI2600MM",
//!     "mount": "EQ6-R",
//!     "filters": ["Luminance"]
//!   }
//! }
//! ```
//!
//! ## Bands and labels
//!
//! `integrationTimes` is keyed by short band codes ([`FilterBand`]) while
//! `equipment.filters` lists human-facing labels ([`FilterLabel`]). They name
//! the same physical filters under two vocabularies; [`FilterBand::label`] and
//! [`FilterLabel::band`] are the only bridge between them.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseNameError {
    #[error("unknown filter band: {0}")]
    Band(String),
    #[error("unknown filter label: {0}")]
    Label(String),
    #[error("unknown object type: {0}")]
    ObjectType(String),
}

/// Kind of astronomical target. Informational only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectType {
    #[default]
    #[serde(rename = "DSO")]
    Dso,
    Planetary,
    Lunar,
    Solar,
    Other,
}

impl ObjectType {
    pub const ALL: [ObjectType; 5] = [
        ObjectType::Dso,
        ObjectType::Planetary,
        ObjectType::Lunar,
        ObjectType::Solar,
        ObjectType::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ObjectType::Dso => "DSO",
            ObjectType::Planetary => "Planetary",
            ObjectType::Lunar => "Lunar",
            ObjectType::Solar => "Solar",
            ObjectType::Other => "Other",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObjectType {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseNameError::ObjectType(s.to_string()))
    }
}

/// Short band code used as a key of `integrationTimes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FilterBand {
    #[serde(rename = "OSC")]
    Osc,
    L,
    R,
    G,
    B,
    Sii,
    Ha,
    Oiii,
}

impl FilterBand {
    /// All bands in schema order.
    pub const ALL: [FilterBand; 8] = [
        FilterBand::Osc,
        FilterBand::L,
        FilterBand::R,
        FilterBand::G,
        FilterBand::B,
        FilterBand::Sii,
        FilterBand::Ha,
        FilterBand::Oiii,
    ];

    pub fn code(self) -> &'static str {
        match self {
            FilterBand::Osc => "OSC",
            FilterBand::L => "L",
            FilterBand::R => "R",
            FilterBand::G => "G",
            FilterBand::B => "B",
            FilterBand::Sii => "Sii",
            FilterBand::Ha => "Ha",
            FilterBand::Oiii => "Oiii",
        }
    }

    /// Display label for this band.
    pub fn label(self) -> FilterLabel {
        match self {
            FilterBand::Osc => FilterLabel::Osc,
            FilterBand::L => FilterLabel::Luminance,
            FilterBand::R => FilterLabel::Red,
            FilterBand::G => FilterLabel::Green,
            FilterBand::B => FilterLabel::Blue,
            FilterBand::Sii => FilterLabel::Sii,
            FilterBand::Ha => FilterLabel::Ha,
            FilterBand::Oiii => FilterLabel::Oiii,
        }
    }
}

impl fmt::Display for FilterBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for FilterBand {
    type Err = ParseNameError;

    /// Accepts a band code (`Ha`, `L`) or a display label (`Luminance`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        FilterBand::ALL
            .into_iter()
            .find(|b| b.code().eq_ignore_ascii_case(s))
            .or_else(|| s.parse::<FilterLabel>().ok().map(FilterLabel::band))
            .ok_or_else(|| ParseNameError::Band(s.to_string()))
    }
}

/// Human-facing filter label listed in `equipment.filters`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FilterLabel {
    #[serde(rename = "OSC")]
    Osc,
    Luminance,
    Red,
    Green,
    Blue,
    Sii,
    Ha,
    Oiii,
}

impl FilterLabel {
    /// All labels in the order the admin form offers them.
    pub const ALL: [FilterLabel; 8] = [
        FilterLabel::Osc,
        FilterLabel::Luminance,
        FilterLabel::Red,
        FilterLabel::Green,
        FilterLabel::Blue,
        FilterLabel::Sii,
        FilterLabel::Ha,
        FilterLabel::Oiii,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FilterLabel::Osc => "OSC",
            FilterLabel::Luminance => "Luminance",
            FilterLabel::Red => "Red",
            FilterLabel::Green => "Green",
            FilterLabel::Blue => "Blue",
            FilterLabel::Sii => "Sii",
            FilterLabel::Ha => "Ha",
            FilterLabel::Oiii => "Oiii",
        }
    }

    /// Band code this label is recorded under in `integrationTimes`.
    pub fn band(self) -> FilterBand {
        match self {
            FilterLabel::Osc => FilterBand::Osc,
            FilterLabel::Luminance => FilterBand::L,
            FilterLabel::Red => FilterBand::R,
            FilterLabel::Green => FilterBand::G,
            FilterLabel::Blue => FilterBand::B,
            FilterLabel::Sii => FilterBand::Sii,
            FilterLabel::Ha => FilterBand::Ha,
            FilterLabel::Oiii => FilterBand::Oiii,
        }
    }
}

impl fmt::Display for FilterLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterLabel {
    type Err = ParseNameError;

    /// Accepts a display label (`Luminance`) or a band code (`L`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        FilterLabel::ALL
            .into_iter()
            .find(|l| l.as_str().eq_ignore_ascii_case(s))
            .or_else(|| {
                FilterBand::ALL
                    .into_iter()
                    .find(|b| b.code().eq_ignore_ascii_case(s))
                    .map(FilterBand::label)
            })
            .ok_or_else(|| ParseNameError::Label(s.to_string()))
    }
}

/// Sub-exposure count and per-exposure duration for one band.
///
/// Values are stored signed and never validated: a negative count read from
/// the collection is carried through to every derived figure unchanged.
/// Missing fields deserialize as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationTime {
    #[serde(default)]
    pub number_of_photos: i64,
    /// Seconds per sub-exposure.
    #[serde(default)]
    pub time_per_photo: i64,
}

impl IntegrationTime {
    pub fn new(number_of_photos: i64, time_per_photo: i64) -> Self {
        Self {
            number_of_photos,
            time_per_photo,
        }
    }

    pub fn total_seconds(&self) -> i64 {
        self.number_of_photos.saturating_mul(self.time_per_photo)
    }
}

/// Per-band integration times. An absent band was not used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationTimes {
    #[serde(rename = "OSC", default, skip_serializing_if = "Option::is_none")]
    pub osc: Option<IntegrationTime>,
    #[serde(rename = "L", default, skip_serializing_if = "Option::is_none")]
    pub l: Option<IntegrationTime>,
    #[serde(rename = "R", default, skip_serializing_if = "Option::is_none")]
    pub r: Option<IntegrationTime>,
    #[serde(rename = "G", default, skip_serializing_if = "Option::is_none")]
    pub g: Option<IntegrationTime>,
    #[serde(rename = "B", default, skip_serializing_if = "Option::is_none")]
    pub b: Option<IntegrationTime>,
    #[serde(rename = "Sii", default, skip_serializing_if = "Option::is_none")]
    pub sii: Option<IntegrationTime>,
    #[serde(rename = "Ha", default, skip_serializing_if = "Option::is_none")]
    pub ha: Option<IntegrationTime>,
    #[serde(rename = "Oiii", default, skip_serializing_if = "Option::is_none")]
    pub oiii: Option<IntegrationTime>,
}

impl IntegrationTimes {
    fn slot(&self, band: FilterBand) -> &Option<IntegrationTime> {
        match band {
            FilterBand::Osc => &self.osc,
            FilterBand::L => &self.l,
            FilterBand::R => &self.r,
            FilterBand::G => &self.g,
            FilterBand::B => &self.b,
            FilterBand::Sii => &self.sii,
            FilterBand::Ha => &self.ha,
            FilterBand::Oiii => &self.oiii,
        }
    }

    fn slot_mut(&mut self, band: FilterBand) -> &mut Option<IntegrationTime> {
        match band {
            FilterBand::Osc => &mut self.osc,
            FilterBand::L => &mut self.l,
            FilterBand::R => &mut self.r,
            FilterBand::G => &mut self.g,
            FilterBand::B => &mut self.b,
            FilterBand::Sii => &mut self.sii,
            FilterBand::Ha => &mut self.ha,
            FilterBand::Oiii => &mut self.oiii,
        }
    }

    pub fn get(&self, band: FilterBand) -> Option<&IntegrationTime> {
        self.slot(band).as_ref()
    }

    pub fn set(&mut self, band: FilterBand, time: IntegrationTime) {
        *self.slot_mut(band) = Some(time);
    }

    /// Entry for `band`, inserted as zero if absent.
    pub fn entry(&mut self, band: FilterBand) -> &mut IntegrationTime {
        self.slot_mut(band).get_or_insert_with(IntegrationTime::default)
    }

    pub fn remove(&mut self, band: FilterBand) -> Option<IntegrationTime> {
        self.slot_mut(band).take()
    }

    /// Present bands in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (FilterBand, &IntegrationTime)> + '_ {
        FilterBand::ALL
            .into_iter()
            .filter_map(move |band| self.get(band).map(|t| (band, t)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

/// Capture rig. Free-form names plus the filter labels actually used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    #[serde(default)]
    pub telescope: String,
    #[serde(default)]
    pub camera: String,
    #[serde(default)]
    pub mount: String,
    #[serde(default)]
    pub filters: Vec<FilterLabel>,
}

/// One captured and processed astronomical image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoRecord {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub file_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_file_name: Option<String>,
    pub object_name: String,
    pub date: String,
    #[serde(rename = "type", default)]
    pub object_type: ObjectType,
    #[serde(default)]
    pub integration_times: IntegrationTimes,
    #[serde(default)]
    pub equipment: Equipment,
}

impl PhotoRecord {
    /// File shown in grids: the precomputed thumbnail, or the original.
    pub fn thumbnail_name(&self) -> &str {
        self.thumbnail_file_name.as_deref().unwrap_or(&self.file_name)
    }

    /// Capture date as a UTC millisecond timestamp, parsed on every call.
    ///
    /// Accepts plain ISO dates (`2024-06-15`, read as UTC midnight) and
    /// RFC 3339 timestamps. Returns `None` when the date is unparseable.
    pub fn capture_timestamp(&self) -> Option<i64> {
        parse_capture_date(&self.date)
    }
}

/// Parse an ISO capture date into UTC milliseconds.
pub fn parse_capture_date(date: &str) -> Option<i64> {
    let date = date.trim();
    if let Ok(day) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return day
            .and_hms_opt(0, 0, 0)
            .map(|midnight| midnight.and_utc().timestamp_millis());
    }
    DateTime::parse_from_rfc3339(date)
        .ok()
        .map(|dt| dt.timestamp_millis())
}
