//! Exposed interfaces: the three read/command surfaces a host renders against. Each handle
//! borrows from `GridTable` rather than owning a copy, so it always reflects the latest
//! `poll()`-driven state.

use crate::column_layout::{ColumnLayout, PinRegion};
use crate::data_model::RowRecord;
use crate::query::{ClientId, Coordinator, QueryClient, RowWindowClient};
use crate::schema::SchemaRef;
use crate::scheduler::Range;
use crate::sort::SortBy;
use std::sync::Arc;

/// Read/command surface over the Data Model: row lookup, loading state, and the two mutations a
/// host can drive directly — moving the fetch window and changing sort — without going through
/// `GridTable` itself.
pub struct DataHandle<'a> {
    pub(crate) model: &'a crate::data_model::SparseDataModel,
    pub(crate) schema: &'a SchemaRef,
    pub(crate) sort: Vec<SortBy>,
    pub(crate) is_loading: bool,
    pub(crate) row_client: &'a Arc<RowWindowClient>,
    pub(crate) coordinator: &'a Arc<dyn Coordinator>,
    pub(crate) row_client_id: ClientId,
}

impl<'a> DataHandle<'a> {
    pub fn get_row(&self, i: usize) -> Option<&RowRecord> {
        self.model.get_row(i)
    }

    pub fn has_row(&self, i: usize) -> bool {
        self.model.has_row(i)
    }

    pub fn total_rows(&self) -> usize {
        self.model.total_rows()
    }

    pub fn schema(&self) -> &SchemaRef {
        self.schema
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn sort(&self) -> &[SortBy] {
        &self.sort
    }

    /// Moves the fetch window and requests a fresh query for it. Scroll-driven window moves
    /// normally come from the Scheduler's own decision during `tick()`; this exists for a host
    /// that wants to request a window directly.
    pub fn set_window(&self, offset: usize, limit: usize) {
        self.row_client.fetch_window(offset, limit);
        self.coordinator.request_requery(self.row_client_id);
    }

    /// Replaces the sort order, clears the Data Model, and re-fetches from the start.
    pub fn set_sort(&self, sort: Vec<SortBy>) {
        self.row_client.set_sort(sort);
        self.coordinator.request_requery(self.row_client.id());
    }
}

/// `{resolved, totalWidth, rowHeight, leftTotal, rightTotal, getWidth(key), getOffset(key),
/// getRegion(key)}`.
pub struct LayoutHandle<'a> {
    pub(crate) layout: &'a ColumnLayout,
}

impl<'a> LayoutHandle<'a> {
    pub fn resolved(&self) -> &ColumnLayout {
        self.layout
    }

    pub fn total_width(&self) -> f64 {
        self.layout.total_width
    }

    pub fn row_height(&self) -> f64 {
        self.layout.row_height
    }

    pub fn left_total(&self) -> f64 {
        self.layout.left_width
    }

    pub fn right_total(&self) -> f64 {
        self.layout.right_width
    }

    pub fn get_width(&self, key: &str) -> Option<f64> {
        self.layout.width_of(key)
    }

    pub fn get_offset(&self, key: &str) -> Option<f64> {
        self.layout.offset_of(key)
    }

    pub fn get_region(&self, key: &str) -> Option<PinRegion> {
        self.layout.region_of(key)
    }
}

/// `{scrollTop, visibleRowRange, scrollToRow(i), scrollToTop(), scrollToX(px)}`.
pub struct ScrollHandle<'a> {
    pub(crate) scheduler: &'a mut crate::scheduler::Scheduler,
    pub(crate) visible_row_range: Range,
    pub(crate) row_height: f64,
    pub(crate) total_rows: usize,
    pub(crate) viewport_height: f64,
    pub(crate) total_width: f64,
    pub(crate) viewport_width: f64,
}

impl<'a> ScrollHandle<'a> {
    pub fn scroll_top(&self) -> f64 {
        self.scheduler.scroll_top
    }

    pub fn visible_row_range(&self) -> Range {
        self.visible_row_range
    }

    pub fn scroll_to_row(&mut self, i: usize) {
        self.scheduler
            .scroll_to_row(i, self.row_height, self.total_rows, self.viewport_height);
    }

    pub fn scroll_to_top(&mut self) {
        self.scheduler.scroll_to_top();
    }

    pub fn scroll_to_x(&mut self, px: f64) {
        self.scheduler
            .scroll_to_x(px, self.total_width, self.viewport_width);
    }
}
