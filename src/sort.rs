//! Sort state: an ordered list of `{column, desc}` criteria (empty means unsorted) plus the
//! header interaction cycle used to build that list one click at a time.

/// A single sort criterion. Order within the owning `Vec<SortBy>` determines precedence: the
/// first entry is the primary sort key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortBy {
    pub column: String,
    pub desc: bool,
}

impl SortBy {
    pub fn new(column: impl Into<String>, desc: bool) -> Self {
        Self {
            column: column.into(),
            desc,
        }
    }
}

/// The *interaction* state for one column header in the click cycle. The applied, cumulative
/// sort order is the `Vec<SortBy>` held by the Row Window Client, not this enum — this only
/// drives what a single header click does next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderSortState {
    NotSorted,
    Ascending,
    Descending,
}

impl HeaderSortState {
    /// Derives the current interaction state for a column from the applied sort list.
    pub fn from_sort(sort: &[SortBy], column: &str) -> Self {
        match sort.iter().find(|s| s.column == column) {
            Some(s) if s.desc => HeaderSortState::Descending,
            Some(_) => HeaderSortState::Ascending,
            None => HeaderSortState::NotSorted,
        }
    }

    /// The next interaction state in the click cycle: `NotSorted -> Descending -> Ascending ->
    /// NotSorted`.
    pub fn cycle_next(&self) -> Self {
        match self {
            HeaderSortState::NotSorted => HeaderSortState::Descending,
            HeaderSortState::Descending => HeaderSortState::Ascending,
            HeaderSortState::Ascending => HeaderSortState::NotSorted,
        }
    }

    /// A Unicode icon representing the state, optionally annotated with the 0-based sort
    /// precedence index (rendered 1-based).
    pub fn get_icon(&self, index: Option<usize>) -> String {
        let base_icon = match self {
            HeaderSortState::Descending => "⏷",
            HeaderSortState::Ascending => "⏶",
            HeaderSortState::NotSorted => "↕",
        };
        match index {
            Some(idx) => format!("{}{}", idx + 1, base_icon),
            None => base_icon.to_string(),
        }
    }
}

/// Applies a single header click to the current cumulative sort list, returning the new list.
/// A click on an unsorted column appends it as the lowest-precedence criterion in `Descending`
/// state; a click cycling a column back to `NotSorted` removes it entirely.
pub fn apply_header_click(sort: &[SortBy], column: &str) -> Vec<SortBy> {
    let current = HeaderSortState::from_sort(sort, column);
    let next = current.cycle_next();

    let mut result: Vec<SortBy> = sort.iter().filter(|s| s.column != column).cloned().collect();
    match next {
        HeaderSortState::NotSorted => {}
        HeaderSortState::Ascending => result.push(SortBy::new(column, false)),
        HeaderSortState::Descending => result.push(SortBy::new(column, true)),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_goes_not_sorted_desc_asc_not_sorted() {
        assert_eq!(
            HeaderSortState::NotSorted.cycle_next(),
            HeaderSortState::Descending
        );
        assert_eq!(
            HeaderSortState::Descending.cycle_next(),
            HeaderSortState::Ascending
        );
        assert_eq!(
            HeaderSortState::Ascending.cycle_next(),
            HeaderSortState::NotSorted
        );
    }

    #[test]
    fn apply_header_click_appends_then_flips_then_removes() {
        let sort = apply_header_click(&[], "age");
        assert_eq!(sort, vec![SortBy::new("age", true)]);

        let sort = apply_header_click(&sort, "age");
        assert_eq!(sort, vec![SortBy::new("age", false)]);

        let sort = apply_header_click(&sort, "age");
        assert!(sort.is_empty());
    }

    #[test]
    fn multi_column_sort_preserves_precedence_order() {
        let sort = apply_header_click(&[], "country");
        let sort = apply_header_click(&sort, "age");
        assert_eq!(
            sort,
            vec![SortBy::new("country", true), SortBy::new("age", true)]
        );
    }

    #[test]
    fn get_icon_includes_one_based_precedence() {
        assert_eq!(HeaderSortState::Descending.get_icon(Some(0)), "1⏷");
        assert_eq!(HeaderSortState::NotSorted.get_icon(None), "↕");
    }
}
