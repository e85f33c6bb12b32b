//! Admin workflow: hand-crafting a new photo record.
//!
//! A [`RecordDraft`] accumulates what a curator enters (object name, file name,
//! date, type, toggled filter labels, per-band exposure fields) and
//! [`RecordDraft::build`] turns it into a [`PhotoRecord`] ready to be pasted
//! into `photos.json`. Nothing here touches the live collection.
//!
//! Defaults applied at build time:
//! - `id`: Unix epoch milliseconds of creation, as a string
//! - `title`: same as `objectName`
//! - `date`: today (UTC) when left empty
//! - `type`: DSO
//! - equipment: the first telescope/camera/mount in config, or empty

use crate::config::EquipmentConfig;
use crate::types::{Equipment, FilterBand, FilterLabel, IntegrationTimes, ObjectType, PhotoRecord};
use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("invalid integration entry {0:?}: expected BAND=COUNTxSECONDS, e.g. Ha=30x300")]
    IntegrationSpec(String),
    #[error(transparent)]
    Name(#[from] crate::types::ParseNameError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Which half of an integration entry a form field edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrationField {
    NumberOfPhotos,
    TimePerPhoto,
}

/// Parse a number the way a lenient form does: optional sign and leading
/// digits are honoured, anything unparseable is 0.
///
/// `"30"` → 30, `"  45s"` → 45, `"-2"` → -2, `""` → 0, `"abc"` → 0.
pub fn parse_lenient_int(input: &str) -> i64 {
    let s = input.trim_start();
    let (sign, digits) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end]
        .parse::<i64>()
        .map(|n| sign * n)
        .unwrap_or(0)
}

/// Split a `BAND=COUNTxSECONDS` entry such as `Ha=30x300` or `L=60x120`
/// into its band and the raw text of its two fields.
///
/// The band may be a code or a filter label (`Luminance=60x120`). The fields
/// are left as text for [`RecordDraft::set_integration_field`].
pub fn split_integration_entry(entry: &str) -> Result<(FilterBand, &str, &str), RecordError> {
    let invalid = || RecordError::IntegrationSpec(entry.to_string());
    let (band, exposure) = entry.split_once('=').ok_or_else(invalid)?;
    let (count, seconds) = exposure.split_once(['x', 'X']).ok_or_else(invalid)?;
    Ok((band.parse()?, count, seconds))
}

/// Record id derived from the creation instant.
pub fn new_record_id(now: DateTime<Utc>) -> String {
    now.timestamp_millis().to_string()
}

/// In-progress admin entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordDraft {
    pub object_name: String,
    pub file_name: String,
    pub thumbnail_file_name: Option<String>,
    /// ISO date; empty means "today".
    pub date: String,
    pub object_type: Option<ObjectType>,
    pub telescope: Option<String>,
    pub camera: Option<String>,
    pub mount: Option<String>,
    filters: Vec<FilterLabel>,
    integration_times: IntegrationTimes,
}

impl RecordDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip a filter label on or off. Labels keep the order they were first
    /// switched on and never repeat.
    pub fn toggle_filter(&mut self, label: FilterLabel) {
        if let Some(pos) = self.filters.iter().position(|l| *l == label) {
            self.filters.remove(pos);
        } else {
            self.filters.push(label);
        }
    }

    pub fn filters(&self) -> &[FilterLabel] {
        &self.filters
    }

    /// Edit one field of a band's entry from raw form text.
    ///
    /// Touching a field records the band even if the value parses to 0.
    pub fn set_integration_field(&mut self, band: FilterBand, field: IntegrationField, raw: &str) {
        let value = parse_lenient_int(raw);
        let entry = self.integration_times.entry(band);
        match field {
            IntegrationField::NumberOfPhotos => entry.number_of_photos = value,
            IntegrationField::TimePerPhoto => entry.time_per_photo = value,
        }
    }

    /// Fill both fields of a band from a `BAND=COUNTxSECONDS` entry.
    pub fn add_integration_entry(&mut self, entry: &str) -> Result<FilterBand, RecordError> {
        let (band, count, seconds) = split_integration_entry(entry)?;
        self.set_integration_field(band, IntegrationField::NumberOfPhotos, count);
        self.set_integration_field(band, IntegrationField::TimePerPhoto, seconds);
        Ok(band)
    }

    pub fn integration_times(&self) -> &IntegrationTimes {
        &self.integration_times
    }

    /// Produce the record. `today` fills an empty date.
    pub fn build(&self, id: String, today: NaiveDate, equipment: &EquipmentConfig) -> PhotoRecord {
        let pick = |chosen: &Option<String>, options: &[String]| {
            chosen
                .clone()
                .or_else(|| options.first().cloned())
                .unwrap_or_default()
        };
        let date = if self.date.trim().is_empty() {
            today.format("%Y-%m-%d").to_string()
        } else {
            self.date.trim().to_string()
        };

        PhotoRecord {
            id,
            title: self.object_name.clone(),
            file_name: self.file_name.clone(),
            thumbnail_file_name: self.thumbnail_file_name.clone(),
            object_name: self.object_name.clone(),
            date,
            object_type: self.object_type.unwrap_or_default(),
            integration_times: self.integration_times.clone(),
            equipment: Equipment {
                telescope: pick(&self.telescope, &equipment.telescopes),
                camera: pick(&self.camera, &equipment.cameras),
                mount: pick(&self.mount, &equipment.mounts),
                filters: self.filters.clone(),
            },
        }
    }
}

/// Pretty-printed JSON (two-space indent) for pasting into the collection.
pub fn to_json(record: &PhotoRecord) -> Result<String, RecordError> {
    Ok(serde_json::to_string_pretty(record)?)
}
