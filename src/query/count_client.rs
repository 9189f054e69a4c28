//! Count Client: reports the total row count for the current filter, feeding the Sparse
//! Data Model's `setTotalRows`.

use crate::error::GridError;
use crate::query::coordinator::{ClientId, QueryClient};
use crate::query::GridEvent;
use crate::sqlgen::count_query;
use crate::value::QueryResultSet;
use std::sync::Mutex;
use tokio::sync::mpsc::UnboundedSender;

struct Inner {
    last_filter: Option<String>,
}

/// Reports `SELECT count(*) FROM <table> WHERE <filter>` for the shared filter selection. Races
/// with the Row Window Client's own re-query are expected and tolerated — the total and the
/// loaded rows need not agree instant-to-instant.
pub struct CountClient {
    id: ClientId,
    table: String,
    outbound: UnboundedSender<GridEvent>,
    inner: Mutex<Inner>,
}

impl CountClient {
    pub fn new(id: ClientId, table: impl Into<String>, outbound: UnboundedSender<GridEvent>) -> Self {
        Self {
            id,
            table: table.into(),
            outbound,
            inner: Mutex::new(Inner { last_filter: None }),
        }
    }
}

impl QueryClient for CountClient {
    fn id(&self) -> ClientId {
        self.id
    }

    fn query(&self, filter: Option<&str>) -> String {
        let mut inner = self.inner.lock().unwrap();
        inner.last_filter = filter.map(str::to_string);
        count_query(&self.table, filter)
    }

    fn query_result(&self, result: QueryResultSet) {
        let total = result
            .first()
            .and_then(|row| row.first())
            .and_then(|(_, raw)| match raw {
                crate::value::RawValue::Int(n) => Some(*n as usize),
                crate::value::RawValue::Text(s) => s.parse::<usize>().ok(),
                _ => None,
            })
            .unwrap_or(0);
        let _ = self.outbound.send(GridEvent::CountResult {
            client: self.id,
            total,
        });
    }

    fn query_error(&self, error: GridError) {
        let _ = self.outbound.send(GridEvent::CountError {
            client: self.id,
            error,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::RawValue;

    fn client() -> (CountClient, tokio::sync::mpsc::UnboundedReceiver<GridEvent>) {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        (CountClient::new(2, "people", tx), rx)
    }

    #[test]
    fn query_shape_matches_wire_spec() {
        let (client, _rx) = client();
        assert_eq!(
            client.query(Some("age > 1")),
            "SELECT count(*) AS count FROM people WHERE age > 1"
        );
    }

    #[test]
    fn result_forwards_parsed_total() {
        let (client, mut rx) = client();
        let _ = client.query(None);
        client.query_result(vec![vec![("count".to_string(), RawValue::Int(1234))]]);
        match rx.try_recv().unwrap() {
            GridEvent::CountResult { total, .. } => assert_eq!(total, 1234),
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
