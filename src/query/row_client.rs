//! Row Window Client: the long-lived client responsible for fetching a window of rows for the
//! current `(sort, filter)` pair and forwarding parsed rows to the Sparse Data Model.

use crate::data_model::RowRecord;
use crate::error::GridError;
use crate::query::coordinator::{ClientId, QueryClient};
use crate::query::GridEvent;
use crate::schema::{cast_for, SchemaRef};
use crate::sort::SortBy;
use crate::sqlgen::{cast, column, row_number_over, Query};
use crate::value::{parse_value, QueryResultSet, RawValue};
use std::sync::Mutex;
use tokio::sync::mpsc::UnboundedSender;

struct Inner {
    sort: Vec<SortBy>,
    offset: usize,
    limit: usize,
    generation: u64,
    last_filter: Option<String>,
    /// `(generation, offset, limit)` captured at the moment the most recent `query()` call built
    /// its SQL text; used to decide whether an arriving result is still meaningful.
    last_dispatched: Option<(u64, usize, usize)>,
}

/// Fetches windows of rows for one table. At most one query is ever "owned" by this client at a
/// time from the coordinator's perspective (it calls `query()` again only after the previous
/// `query_result`/`query_error`); a sort or filter change detected inside `query()` bumps the
/// generation and resets the window to `offset = 0`, which supersedes whatever the in-flight
/// query was going to return.
pub struct RowWindowClient {
    id: ClientId,
    table: String,
    schema: SchemaRef,
    outbound: UnboundedSender<GridEvent>,
    inner: Mutex<Inner>,
}

impl RowWindowClient {
    pub fn new(
        id: ClientId,
        table: impl Into<String>,
        schema: SchemaRef,
        default_limit: usize,
        outbound: UnboundedSender<GridEvent>,
    ) -> Self {
        Self {
            id,
            table: table.into(),
            schema,
            outbound,
            inner: Mutex::new(Inner {
                sort: Vec::new(),
                offset: 0,
                limit: default_limit,
                generation: 0,
                last_filter: None,
                last_dispatched: None,
            }),
        }
    }

    pub fn generation(&self) -> u64 {
        self.inner.lock().unwrap().generation
    }

    pub fn sort_snapshot(&self) -> Vec<SortBy> {
        self.inner.lock().unwrap().sort.clone()
    }

    /// Updates the fetch window. Does not by itself bump the generation — a plain scroll-driven
    /// window change is not a reason to discard in-flight results the way a sort or filter change is.
    pub fn fetch_window(&self, offset: usize, limit: usize) {
        let mut inner = self.inner.lock().unwrap();
        inner.offset = offset;
        inner.limit = limit;
    }

    /// Replaces the sort order, bumps the generation, and resets the window to the start.
    /// Announces the reset so `GridTable::poll()` can clear the Data Model.
    pub fn set_sort(&self, sort: Vec<SortBy>) {
        let mut inner = self.inner.lock().unwrap();
        inner.sort = sort;
        inner.offset = 0;
        inner.generation += 1;
        let generation = inner.generation;
        drop(inner);
        let _ = self.outbound.send(GridEvent::Cleared {
            client: self.id,
            generation,
        });
    }

    fn note_filter_change(&self, inner: &mut Inner, filter: Option<&str>) -> bool {
        if inner.last_filter.as_deref() == filter {
            return false;
        }
        inner.last_filter = filter.map(str::to_string);
        inner.offset = 0;
        inner.generation += 1;
        true
    }
}

impl QueryClient for RowWindowClient {
    fn id(&self) -> ClientId {
        self.id
    }

    fn query(&self, filter: Option<&str>) -> String {
        let mut inner = self.inner.lock().unwrap();
        let changed = self.note_filter_change(&mut inner, filter);
        let generation = inner.generation;
        if changed {
            drop(inner);
            let _ = self.outbound.send(GridEvent::Cleared {
                client: self.id,
                generation,
            });
            inner = self.inner.lock().unwrap();
        }

        let offset = inner.offset;
        let limit = inner.limit;
        let sort = inner.sort.clone();
        inner.last_dispatched = Some((generation, offset, limit));
        drop(inner);

        build_row_query(&self.table, &self.schema, &sort, filter, offset, limit)
    }

    fn query_result(&self, result: QueryResultSet) {
        let inner = self.inner.lock().unwrap();
        let Some((dispatched_generation, offset, _limit)) = inner.last_dispatched else {
            return;
        };
        let current_generation = inner.generation;
        let schema = self.schema.clone();
        drop(inner);

        if dispatched_generation != current_generation {
            tracing::trace!(
                client = self.id,
                dispatched_generation,
                current_generation,
                "dropping stale row result"
            );
            return;
        }

        let rows = result
            .into_iter()
            .map(|row| build_row_record(&row, &schema))
            .collect();
        let _ = self.outbound.send(GridEvent::RowResult {
            client: self.id,
            offset,
            rows,
        });
    }

    fn query_error(&self, error: GridError) {
        let _ = self.outbound.send(GridEvent::RowError {
            client: self.id,
            error,
        });
    }
}

/// Builds the literal row-window query: selects each column directly or through its transport
/// cast, projects `row_number() OVER (...) AS __oid`, and applies `WHERE`/`ORDER BY`/`LIMIT`/
/// `OFFSET`.
fn build_row_query(
    table: &str,
    schema: &[crate::schema::ColumnSchema],
    sort: &[SortBy],
    filter: Option<&str>,
    offset: usize,
    limit: usize,
) -> String {
    let mut projections: Vec<_> = schema
        .iter()
        .map(|col| match cast_for(col) {
            Some(sql_type) => {
                let casted = cast(&column(&col.key), sql_type);
                crate::sqlgen::Expr::raw(format!("{} AS {}", casted.as_str(), col.key))
            }
            None => column(&col.key),
        })
        .collect();
    let oid = row_number_over(sort);
    projections.push(crate::sqlgen::Expr::raw(format!("{} AS __oid", oid.as_str())));

    Query::from(table)
        .select(projections)
        .where_(filter)
        .order_by(sort)
        .limit(limit as u64)
        .offset(offset as u64)
        .build()
}

/// Parses one raw result row into a `RowRecord`: the `__oid` column becomes `RowRecord::oid`,
/// every other column runs through `parse_value` against its schema entry.
fn build_row_record(row: &[(String, RawValue)], schema: &[crate::schema::ColumnSchema]) -> RowRecord {
    let oid = row
        .iter()
        .find(|(key, _)| key == "__oid")
        .and_then(|(_, value)| match value {
            RawValue::Int(n) => Some(*n),
            RawValue::Text(s) => s.parse::<i64>().ok(),
            _ => None,
        })
        .unwrap_or(0);

    let values = row
        .iter()
        .filter(|(key, _)| key != "__oid")
        .map(|(key, raw)| {
            let value = match schema.iter().find(|s| &s.key == key) {
                Some(s) => parse_value(raw, s),
                None => parse_value(raw, &crate::schema::ColumnSchema::new(key.clone(), "TEXT")),
            };
            (key.clone(), value)
        })
        .collect();

    RowRecord { oid, values }
}
