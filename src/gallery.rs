//! Gallery view state: the current sort criterion, the list it produces, and
//! which photo (if any) is open in the viewer.
//!
//! The gallery owns the [`Viewer`]; the viewer's position *is* the gallery's
//! open index, so there is one source of truth for "what is on screen".
//!
//! ## Re-sorting while the viewer is open
//!
//! Changing the criterion reorders the visible list. The open photo is pinned
//! by identity: the viewer follows the same record to its new position rather
//! than keeping a now-meaningless index.

use crate::collection::Collection;
use crate::metrics::MetricsCache;
use crate::sort::{SortCriterion, sort};
use crate::types::PhotoRecord;
use crate::viewer::{NavigationError, NavigationInfo, Transition, Viewer, ViewerInput};
use std::rc::Rc;

#[derive(Debug)]
pub struct Gallery {
    collection: Collection,
    cache: MetricsCache,
    criterion: SortCriterion,
    visible: Vec<Rc<PhotoRecord>>,
    viewer: Viewer,
}

impl Gallery {
    /// Gallery sorted by the default criterion (date), viewer closed.
    pub fn new(collection: Collection) -> Self {
        Self::with_criterion(collection, SortCriterion::default())
    }

    pub fn with_criterion(collection: Collection, criterion: SortCriterion) -> Self {
        let cache = MetricsCache::new();
        let visible = sort(collection.records(), criterion, &cache);
        let viewer = Viewer::new(visible.len());
        Self {
            collection,
            cache,
            criterion,
            visible,
            viewer,
        }
    }

    pub fn criterion(&self) -> SortCriterion {
        self.criterion
    }

    /// Records in display order.
    pub fn visible(&self) -> &[Rc<PhotoRecord>] {
        &self.visible
    }

    pub fn len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    /// Switch ordering. Selecting the current criterion is a no-op.
    pub fn select_criterion(&mut self, criterion: SortCriterion) {
        if criterion == self.criterion {
            return;
        }
        let pinned = self.selected().cloned();
        self.criterion = criterion;
        self.visible = sort(self.collection.records(), criterion, &self.cache);

        if let Some(record) = pinned
            && let Some(index) = self.visible.iter().position(|r| Rc::ptr_eq(r, &record))
        {
            tracing::debug!(id = %record.id, index, "viewer follows open photo after re-sort");
            self.viewer.reposition(index);
        }
    }

    pub fn open(&mut self, index: usize) -> Result<(), NavigationError> {
        self.viewer.open(index)
    }

    pub fn close(&mut self) {
        self.viewer.close();
    }

    pub fn open_index(&self) -> Option<usize> {
        self.viewer.current()
    }

    /// The record shown in the viewer.
    pub fn selected(&self) -> Option<&Rc<PhotoRecord>> {
        self.open_index().and_then(|i| self.visible.get(i))
    }

    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    pub fn navigation(&self) -> NavigationInfo {
        self.viewer.info()
    }

    pub fn handle_input(&mut self, input: ViewerInput) -> Transition {
        self.viewer.handle(input)
    }

    pub fn jump(&mut self, index: usize) -> Result<Transition, NavigationError> {
        self.viewer.jump(index)
    }

    /// Total integration for a record, memoized per record instance.
    pub fn total_integration_seconds(&self, record: &Rc<PhotoRecord>) -> i64 {
        self.cache.total_integration_seconds(record)
    }

    pub fn cache(&self) -> &MetricsCache {
        &self.cache
    }
}
