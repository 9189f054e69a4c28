//! SQL builder surface: small `format!`-based helpers that assemble the literal SQL shape the
//! Coordinator protocol expects. The builder's output is opaque text handed to the coordinator —
//! nothing here parses or validates the backend's SQL dialect.

use crate::sort::SortBy;

/// An opaque SQL text fragment — a column reference, a cast expression, an aggregate, anything
/// that can sit in a projection or `ORDER BY` list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expr(String);

impl Expr {
    pub fn raw(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A bare column reference.
pub fn column(name: &str) -> Expr {
    Expr::raw(name.to_string())
}

/// `CAST(expr AS type)`.
pub fn cast(expr: &Expr, sql_type: &str) -> Expr {
    Expr::raw(format!("CAST({} AS {sql_type})", expr.as_str()))
}

/// `count(*)`.
pub fn count_star() -> Expr {
    Expr::raw("count(*)".to_string())
}

/// `row_number() OVER (ORDER BY <sortCols>)`, or bare `row_number()` if `sort` is empty.
pub fn row_number_over(sort: &[SortBy]) -> Expr {
    if sort.is_empty() {
        Expr::raw("row_number()".to_string())
    } else {
        Expr::raw(format!("row_number() OVER (ORDER BY {})", order_by_clause(sort)))
    }
}

/// Renders one `SortBy` as an `ORDER BY` term: `<column> DESC` or `<column> ASC`.
pub fn desc(expr: &Expr) -> Expr {
    Expr::raw(format!("{} DESC", expr.as_str()))
}

fn order_by_clause(sort: &[SortBy]) -> String {
    sort.iter()
        .map(|s| {
            if s.desc {
                format!("{} DESC", s.column)
            } else {
                format!("{} ASC", s.column)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// A SQL `SELECT` statement builder. Each method returns `self` by value so calls chain:
/// `Query::from("t").select([...]).where_(Some("x > 1")).order_by(&sort).limit(50).offset(0).build()`.
#[derive(Debug, Clone, Default)]
pub struct Query {
    table: String,
    projections: Vec<String>,
    filter: Option<String>,
    order_by: Vec<SortBy>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl Query {
    pub fn from(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Default::default()
        }
    }

    pub fn select(mut self, projections: impl IntoIterator<Item = Expr>) -> Self {
        self.projections = projections.into_iter().map(|e| e.as_str().to_string()).collect();
        self
    }

    pub fn where_(mut self, filter: Option<&str>) -> Self {
        self.filter = filter.map(str::to_string);
        self
    }

    pub fn order_by(mut self, sort: &[SortBy]) -> Self {
        self.order_by = sort.to_vec();
        self
    }

    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    pub fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }

    /// Assembles the final SQL text. Omits `WHERE`/`ORDER BY`/`LIMIT`/`OFFSET` clauses entirely
    /// when their corresponding state is unset, rather than emitting e.g. `WHERE TRUE`.
    pub fn build(&self) -> String {
        let mut sql = format!("SELECT {} FROM {}", self.projections.join(", "), self.table);
        if let Some(filter) = &self.filter {
            sql.push_str(&format!(" WHERE {filter}"));
        }
        if !self.order_by.is_empty() {
            sql.push_str(&format!(" ORDER BY {}", order_by_clause(&self.order_by)));
        }
        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }
        if let Some(offset) = self.offset {
            sql.push_str(&format!(" OFFSET {offset}"));
        }
        sql
    }
}

/// The literal count query: `SELECT count(*) AS count FROM <table> WHERE <filter>`.
pub fn count_query(table: &str, filter: Option<&str>) -> String {
    let mut sql = format!("SELECT count(*) AS count FROM {table}");
    if let Some(filter) = filter {
        sql.push_str(&format!(" WHERE {filter}"));
    }
    sql
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_select_star_equivalent() {
        let sql = Query::from("AllData")
            .select([column("*")])
            .build();
        assert_eq!(sql, "SELECT * FROM AllData");
    }

    #[test]
    fn build_full_row_query_shape() {
        let sort = vec![SortBy::new("age", true)];
        let projections = vec![
            column("id"),
            cast(&column("id"), "TEXT"),
            row_number_over(&sort),
        ];
        let sql = Query::from("people")
            .select(projections)
            .where_(Some("age > 18"))
            .order_by(&sort)
            .limit(50)
            .offset(100)
            .build();
        assert_eq!(
            sql,
            "SELECT id, CAST(id AS TEXT), row_number() OVER (ORDER BY age DESC) FROM people \
             WHERE age > 18 ORDER BY age DESC LIMIT 50 OFFSET 100"
        );
    }

    #[test]
    fn row_number_without_sort_is_bare() {
        assert_eq!(row_number_over(&[]).as_str(), "row_number()");
    }

    #[test]
    fn count_query_shape() {
        assert_eq!(
            count_query("people", Some("age > 18")),
            "SELECT count(*) AS count FROM people WHERE age > 18"
        );
        assert_eq!(
            count_query("people", None),
            "SELECT count(*) AS count FROM people"
        );
    }

    #[test]
    fn omits_clauses_when_unset() {
        let sql = Query::from("t").select([column("a")]).build();
        assert_eq!(sql, "SELECT a FROM t");
    }
}
