//! Query Client Pair (component D): the Row Window Client and Count Client, their shared
//! `Coordinator`/`QueryClient` protocol, and the event type `GridTable::poll()` drains each
//! frame tick.

pub mod coordinator;
pub mod count_client;
pub mod row_client;

pub use coordinator::{ClientId, Coordinator, QueryClient};
pub use count_client::CountClient;
pub use row_client::RowWindowClient;

use crate::error::GridError;
use crate::data_model::RowRecord;

/// Everything a query client pushes onto the channel `GridTable::poll()` drains. Delivery into
/// the Data Model happens only inside `poll()`, preserving a single-threaded-mutation guarantee
/// without a lock around the Data Model itself.
#[derive(Debug)]
pub enum GridEvent {
    /// A sort or filter change was detected; the Data Model must be cleared and the window reset
    /// before any further row results for this generation are trusted.
    Cleared { client: ClientId, generation: u64 },
    RowResult {
        client: ClientId,
        offset: usize,
        rows: Vec<RowRecord>,
    },
    RowError {
        client: ClientId,
        error: GridError,
    },
    CountResult {
        client: ClientId,
        total: usize,
    },
    CountError {
        client: ClientId,
        error: GridError,
    },
}
