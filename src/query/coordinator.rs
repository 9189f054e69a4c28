//! The consumed Coordinator protocol: a coordinator accepts clients, dispatches their queries on
//! demand, and delivers results back through the same client.

use crate::error::GridError;
use crate::value::QueryResultSet;
use std::sync::Arc;

/// Identifies a connected client. Assigned by whoever constructs the client (`GridTable`, in
/// this crate), not by the coordinator.
pub type ClientId = u64;

/// A long-lived client of a coordinator: produces a query on demand, and receives either a
/// result set or an error back through the same object.
///
/// `Send + Sync` because implementations are shared as `Arc<dyn QueryClient>` and called from the
/// coordinator's own async task — see `RowWindowClient`/`CountClient` for how each wraps its
/// mutable state behind a `Mutex` rather than requiring external synchronization.
pub trait QueryClient: Send + Sync {
    fn id(&self) -> ClientId;

    /// Produces the query text for the current state, given the coordinator's current shared
    /// filter selection. Detects filter changes by comparing against the client's own memory of
    /// the last filter it was called with.
    fn query(&self, filter: Option<&str>) -> String;

    /// Delivers a successful result. Implementations drop results that no longer match their
    /// current generation rather than surfacing an error.
    fn query_result(&self, result: QueryResultSet);

    fn query_error(&self, error: GridError);
}

/// A coordinator: accepts/removes clients and is responsible for invoking `query`/`query_result`
/// on demand (on a schedule, on window change, or on shared-filter change). The core never
/// depends on a specific coordinator implementation — see `backend::in_memory` for the bundled
/// reference one.
pub trait Coordinator: Send + Sync {
    fn connect(&self, client: Arc<dyn QueryClient>);
    fn disconnect(&self, id: ClientId);

    /// Triggers a fresh `query()`/`query_result()` round for one connected client — the
    /// mechanism behind a scroll-driven window move or a sort change, where only that client's
    /// own state changed.
    fn request_requery(&self, id: ClientId);

    /// Updates the shared filter selection and re-invokes every connected client's `query`.
    fn set_filter(&self, filter: Option<String>);
}
