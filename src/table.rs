//! `GridTable`: the orchestrator that owns the Data Model, the Query Client Pair, the Layout
//! Engine snapshot, and the Scheduler, and drains query-client events on `poll()`.
//!
//! Mirrors the relationship `PolarsViewApp` (the teacher's `layout.rs`) has with its
//! `tokio::runtime::Runtime` and result channel, generalized from a single one-shot load into a
//! standing, scroll-driven fetch loop.

use crate::column_layout::{resolve_layout, ColumnDef, ColumnLayout};
use crate::data_model::SparseDataModel;
use crate::error::GridResult;
use crate::handles::{DataHandle, LayoutHandle, ScrollHandle};
use crate::query::{ClientId, Coordinator, CountClient, GridEvent, QueryClient, RowWindowClient};
use crate::schema::{ColumnSchema, SchemaRef};
use crate::scheduler::Scheduler;
use crate::sort::SortBy;
use crate::units::LayoutContext;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver};

const ROW_CLIENT_ID: ClientId = 1;
const COUNT_CLIENT_ID: ClientId = 2;

pub struct GridTable {
    coordinator: Arc<dyn Coordinator>,
    row_client: Arc<RowWindowClient>,
    count_client: Arc<CountClient>,
    schema: SchemaRef,
    data_model: SparseDataModel,
    scheduler: Scheduler,
    layout_ctx: LayoutContext,
    columns: Vec<ColumnDef>,
    left_keys: Vec<String>,
    right_keys: Vec<String>,
    layout: ColumnLayout,
    events_rx: UnboundedReceiver<GridEvent>,
    is_loading: bool,
    fetch_limit: usize,
}

impl GridTable {
    /// Connects a fresh table to `coordinator`. `schema` must already be resolved (e.g. via the
    /// reference backend's own schema-fetch helper) — a fatal schema error aborts initialization
    /// before this point rather than inside it.
    pub fn connect(
        table_name: impl Into<String>,
        schema: Vec<ColumnSchema>,
        coordinator: Arc<dyn Coordinator>,
        columns: Vec<ColumnDef>,
        left_keys: Vec<String>,
        right_keys: Vec<String>,
        layout_ctx: LayoutContext,
        fetch_limit: usize,
    ) -> GridResult<Self> {
        let table_name = table_name.into();
        let schema: SchemaRef = schema.into();
        let (tx, rx) = mpsc::unbounded_channel();

        let row_client = Arc::new(RowWindowClient::new(
            ROW_CLIENT_ID,
            table_name.clone(),
            schema.clone(),
            fetch_limit,
            tx.clone(),
        ));
        let count_client = Arc::new(CountClient::new(COUNT_CLIENT_ID, table_name, tx));

        coordinator.connect(row_client.clone());
        coordinator.connect(count_client.clone());

        let layout = resolve_layout(&columns, &layout_ctx, &left_keys, &right_keys);

        let mut table = Self {
            coordinator,
            row_client,
            count_client,
            schema,
            data_model: SparseDataModel::new(),
            scheduler: Scheduler::new(),
            layout_ctx,
            columns,
            left_keys,
            right_keys,
            layout,
            events_rx: rx,
            is_loading: true,
            fetch_limit,
        };
        table.request_initial_load();
        Ok(table)
    }

    fn request_initial_load(&mut self) {
        self.coordinator.request_requery(ROW_CLIENT_ID);
        self.coordinator.request_requery(COUNT_CLIENT_ID);
    }

    /// Drains every event currently queued by the query clients and applies it to the Data
    /// Model. This is the only place the Data Model is mutated from a result callback,
    /// preserving a single-threaded-mutation guarantee without a lock around it.
    pub fn poll(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            match event {
                GridEvent::Cleared { .. } => {
                    self.data_model.clear();
                    self.scheduler.invalidate_window();
                    self.is_loading = true;
                }
                GridEvent::RowResult { offset, rows, .. } => {
                    self.data_model.merge_rows(offset, rows);
                    self.is_loading = false;
                }
                GridEvent::RowError { error, .. } => {
                    tracing::warn!(%error, "row window query failed");
                }
                GridEvent::CountResult { total, .. } => {
                    self.data_model.set_total_rows(total);
                }
                GridEvent::CountError { error, .. } => {
                    tracing::warn!(%error, "count query failed");
                }
            }
        }
    }

    /// Runs one frame tick: drains pending events, recomputes scroll ranges, and requests a new
    /// fetch window or retention sweep if the Scheduler decided one is due.
    pub fn tick(&mut self, viewport_height: f64) {
        self.poll();

        let total_rows = self.data_model.total_rows();
        let outcome = self.scheduler.tick(
            viewport_height,
            self.layout.row_height,
            total_rows,
            self.fetch_limit,
        );

        if let Some(window) = outcome.new_fetch_window {
            self.row_client.fetch_window(window.offset, window.limit);
            self.coordinator.request_requery(ROW_CLIENT_ID);
        }

        self.data_model
            .retain_range(outcome.retention.start, outcome.retention.end);
    }

    /// Applies a header click's resulting sort order, clearing the Data Model and re-fetching
    /// from the start.
    pub fn set_sort(&mut self, sort: Vec<SortBy>) {
        self.row_client.set_sort(sort);
        self.coordinator.request_requery(ROW_CLIENT_ID);
    }

    /// Updates the shared filter selection; both clients re-query.
    pub fn set_filter(&mut self, filter: Option<String>) {
        self.coordinator.set_filter(filter);
    }

    /// Recomputes the layout snapshot, e.g. after a container resize or a pin/width change.
    pub fn relayout(&mut self, ctx: LayoutContext) {
        self.layout_ctx = ctx;
        self.layout = resolve_layout(&self.columns, &self.layout_ctx, &self.left_keys, &self.right_keys);
    }

    pub fn data(&self) -> DataHandle<'_> {
        DataHandle {
            model: &self.data_model,
            schema: &self.schema,
            sort: self.row_client.sort_snapshot(),
            is_loading: self.is_loading,
            row_client: &self.row_client,
            coordinator: &self.coordinator,
            row_client_id: ROW_CLIENT_ID,
        }
    }

    pub fn layout(&self) -> LayoutHandle<'_> {
        LayoutHandle { layout: &self.layout }
    }

    pub fn scroll(&mut self, viewport_height: f64, viewport_width: f64) -> ScrollHandle<'_> {
        let total_rows = self.data_model.total_rows();
        let visible = crate::scheduler::visible_range(
            self.scheduler.scroll_top,
            viewport_height,
            self.layout.row_height,
            total_rows,
        );
        ScrollHandle {
            row_height: self.layout.row_height,
            total_rows,
            viewport_height,
            total_width: self.layout.total_width,
            viewport_width,
            visible_row_range: visible,
            scheduler: &mut self.scheduler,
        }
    }
}
