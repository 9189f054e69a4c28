//! Sparse Data Model (component C): a positional, partially-populated row store keyed by integer
//! position, with optional windowed eviction.

use crate::value::Value;
use std::collections::BTreeMap;

/// One fetched row: its row-level `__oid` (stable only within the current `(filter, sort)` pair,
/// per the Row Record note) and its column values keyed by column key.
#[derive(Debug, Clone, PartialEq)]
pub struct RowRecord {
    pub oid: i64,
    pub values: Vec<(String, Value)>,
}

/// Default retention radius, a multiple of the current fetch limit.
pub const DEFAULT_RETENTION_MULTIPLE: usize = 3;

/// A positional, partially-populated row store. Rows are addressed by position, not by key;
/// `clear()` is called whenever the owning `(filter, sort)` pair changes, since a `__oid` only
/// has meaning relative to the query that produced it.
#[derive(Debug, Default)]
pub struct SparseDataModel {
    rows: BTreeMap<usize, RowRecord>,
    total_rows: usize,
}

impl SparseDataModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_row(&self, position: usize) -> Option<&RowRecord> {
        self.rows.get(&position)
    }

    pub fn has_row(&self, position: usize) -> bool {
        self.rows.contains_key(&position)
    }

    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    /// Replaces the row count; rows at positions `>= n` are discarded since they can no longer be
    /// valid for the current `(filter, sort)`.
    pub fn set_total_rows(&mut self, n: usize) {
        self.total_rows = n;
        self.rows.retain(|&position, _| position < n);
    }

    /// Inserts/overwrites rows at `offset..offset + rows.len()`. Last-writer-wins by position.
    pub fn merge_rows(&mut self, offset: usize, rows: Vec<RowRecord>) {
        for (i, row) in rows.into_iter().enumerate() {
            self.rows.insert(offset + i, row);
        }
    }

    /// Empties the mapping. Does not reset `total_rows` — a count result may still be in flight
    /// and arrive independently of the row query that triggered this clear.
    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Windowed eviction: discards rows outside `[visible_start - radius, visible_end + radius]`.
    /// Idempotent and never removes a row inside `[visible_start, visible_end)`.
    pub fn evict_outside(&mut self, visible_start: usize, visible_end: usize, radius: usize) {
        let retain_start = visible_start.saturating_sub(radius);
        let retain_end = visible_end.saturating_add(radius);
        self.retain_range(retain_start, retain_end);
    }

    /// Discards every row outside `[start, end)`. The primitive `evict_outside` and the
    /// Scheduler's own retention-range computation both reduce to this.
    pub fn retain_range(&mut self, start: usize, end: usize) {
        self.rows.retain(|&position, _| position >= start && position < end);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(oid: i64) -> RowRecord {
        RowRecord {
            oid,
            values: vec![("id".to_string(), Value::Int(oid))],
        }
    }

    #[test]
    fn get_row_and_has_row_report_unloaded_positions() {
        let model = SparseDataModel::new();
        assert_eq!(model.get_row(0), None);
        assert!(!model.has_row(0));
    }

    #[test]
    fn merge_rows_is_last_writer_wins_by_position() {
        let mut model = SparseDataModel::new();
        model.set_total_rows(10);
        model.merge_rows(0, vec![row(1), row(2)]);
        assert_eq!(model.get_row(0).unwrap().oid, 1);
        model.merge_rows(0, vec![row(99)]);
        assert_eq!(model.get_row(0).unwrap().oid, 99);
        assert_eq!(model.get_row(1).unwrap().oid, 2);
    }

    #[test]
    fn set_total_rows_discards_out_of_range_positions() {
        let mut model = SparseDataModel::new();
        model.set_total_rows(10);
        model.merge_rows(5, vec![row(1), row(2), row(3)]);
        model.set_total_rows(6);
        assert!(model.has_row(5));
        assert!(!model.has_row(6));
        assert!(!model.has_row(7));
    }

    #[test]
    fn clear_empties_mapping_but_preserves_total_rows() {
        let mut model = SparseDataModel::new();
        model.set_total_rows(10);
        model.merge_rows(0, vec![row(1)]);
        model.clear();
        assert!(!model.has_row(0));
        assert_eq!(model.total_rows(), 10);
    }

    #[test]
    fn eviction_never_removes_rows_inside_visible_range() {
        let mut model = SparseDataModel::new();
        model.set_total_rows(100);
        model.merge_rows(0, (0..50).map(|i| row(i as i64)).collect());
        model.evict_outside(20, 30, 5);
        for i in 15..35 {
            assert!(model.has_row(i), "position {i} should survive eviction");
        }
        assert!(!model.has_row(0));
        assert!(!model.has_row(49));
    }

    #[test]
    fn eviction_is_idempotent() {
        let mut model = SparseDataModel::new();
        model.set_total_rows(100);
        model.merge_rows(0, (0..50).map(|i| row(i as i64)).collect());
        model.evict_outside(20, 30, 5);
        let after_first: Vec<usize> = (0..50).filter(|&i| model.has_row(i)).collect();
        model.evict_outside(20, 30, 5);
        let after_second: Vec<usize> = (0..50).filter(|&i| model.has_row(i)).collect();
        assert_eq!(after_first, after_second);
    }
}
