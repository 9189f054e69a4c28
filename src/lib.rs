#![warn(clippy::all)]

//! Headless, virtualized tabular data viewer core for very large datasets.
//!
//! The engine is split into the pieces a host renders or drives against: a type classifier and
//! value model (`schema`, `value`), a mixed-unit column layout resolver (`units`,
//! `column_layout`), a sparse positional data model (`data_model`), header sort state (`sort`), a
//! small SQL builder (`sqlgen`), the query client/coordinator protocol (`query`), scroll/fetch
//! scheduling (`scheduler`), the orchestrator (`table`), and the exposed read/command surfaces
//! (`handles`). `backend` bundles one reference `Coordinator` over Polars; a host may supply any
//! other implementation instead.

pub mod args;
pub mod backend;
pub mod column_layout;
pub mod data_model;
pub mod error;
pub mod handles;
pub mod query;
pub mod schema;
pub mod scheduler;
pub mod sort;
pub mod sqlgen;
pub mod table;
pub mod units;
pub mod value;

pub use args::Arguments;
pub use column_layout::{ColumnDef, ColumnLayout, PinRegion, ResolvedColumn};
pub use data_model::{RowRecord, SparseDataModel};
pub use error::{GridError, GridResult};
pub use handles::{DataHandle, LayoutHandle, ScrollHandle};
pub use query::{ClientId, Coordinator, CountClient, GridEvent, QueryClient, RowWindowClient};
pub use schema::{cast_for, categorize, ColumnSchema, SchemaRef, TypeCategory};
pub use scheduler::{FetchWindow, Range, Scheduler, TickOutcome};
pub use sort::{HeaderSortState, SortBy};
pub use sqlgen::Query;
pub use table::GridTable;
pub use units::{LayoutContext, Unit};
pub use value::{Alignment, QueryResultSet, RawValue, ResultRow, Value};
