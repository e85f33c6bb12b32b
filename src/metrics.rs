//! Derived values computed from photo records.
//!
//! The only aggregate is total integration time: the sum over every recorded
//! band of `numberOfPhotos * timePerPhoto`. It feeds the integration-time sort
//! and every place a duration is displayed.
//!
//! ## Memoization
//!
//! [`MetricsCache`] remembers the total per record *identity*: the key is the
//! `Rc` allocation, not the record's value. A record replaced by new data gets
//! a new allocation and is recomputed; an equal-valued clone is a different
//! record as far as the cache is concerned. Entries hold only a `Weak` handle,
//! so the cache never keeps a record alive, and dead entries are pruned on the
//! next insert. Mutating a record behind a shared handle is not supported.

use crate::types::{IntegrationTime, PhotoRecord};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

/// Total exposure seconds across all bands. Absent bands contribute 0.
pub fn total_integration_seconds(record: &PhotoRecord) -> i64 {
    record
        .integration_times
        .iter()
        .fold(0i64, |sum, (_, time)| {
            sum.saturating_add(time.total_seconds())
        })
}

/// Format seconds as `"{H}h {M}min"`, discarding leftover seconds.
///
/// Hours and minutes use floor division. For the negative totals malformed
/// records can produce, minutes stay in `0..60` and hours absorb the sign.
pub fn format_duration(total_seconds: i64) -> String {
    let hours = total_seconds.div_euclid(3600);
    let minutes = total_seconds.rem_euclid(3600) / 60;
    format!("{hours}h {minutes}min")
}

/// Per-band detail line, e.g. `30x300s (2h 30min)`.
pub fn format_band_integration(time: &IntegrationTime) -> String {
    format!(
        "{}x{}s ({})",
        time.number_of_photos,
        time.time_per_photo,
        format_duration(time.total_seconds())
    )
}

#[derive(Debug)]
struct CachedTotal {
    record: Weak<PhotoRecord>,
    total: i64,
}

/// Identity-keyed cache of [`total_integration_seconds`].
///
/// Single-threaded: interior mutability through `RefCell`, no locking.
#[derive(Debug, Default)]
pub struct MetricsCache {
    entries: RefCell<HashMap<*const PhotoRecord, CachedTotal>>,
    computations: Cell<usize>,
}

impl MetricsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached total for this record instance, computing it on first use.
    pub fn total_integration_seconds(&self, record: &Rc<PhotoRecord>) -> i64 {
        let key = Rc::as_ptr(record);
        let cached = self.entries.borrow().get(&key).and_then(|entry| {
            entry
                .record
                .upgrade()
                .filter(|live| Rc::ptr_eq(live, record))
                .map(|_| entry.total)
        });
        if let Some(total) = cached {
            return total;
        }

        let total = total_integration_seconds(record);
        self.computations.set(self.computations.get() + 1);

        let mut entries = self.entries.borrow_mut();
        entries.retain(|_, entry| entry.record.strong_count() > 0);
        entries.insert(
            key,
            CachedTotal {
                record: Rc::downgrade(record),
                total,
            },
        );
        total
    }

    /// Number of entries whose record is still alive.
    pub fn len(&self) -> usize {
        self.entries
            .borrow()
            .values()
            .filter(|entry| entry.record.strong_count() > 0)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// How many totals have been computed (cache misses) so far.
    pub fn computations(&self) -> usize {
        self.computations.get()
    }
}
