//! End-to-end scenarios: load a small CSV through the reference backend, connect a
//! `GridTable`, and drive it through a scroll-fetch cycle, a sort change, and a filter change.

use gridview_core::backend::InMemoryCoordinator;
use gridview_core::{ColumnDef, GridTable, LayoutContext, SortBy};
use std::fs::File;
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

fn write_csv(content: &str) -> NamedTempFile {
    let temp_file = NamedTempFile::new().expect("failed to create temp file");
    let mut file = File::create(temp_file.path()).expect("failed to open temp file for writing");
    file.write_all(content.as_bytes()).expect("failed to write csv content");
    file.flush().expect("failed to flush csv content");
    temp_file
}

fn layout_ctx() -> LayoutContext {
    LayoutContext {
        container_width: 1200.0,
        root_font_size: 16.0,
        table_font_size: 14.0,
    }
}

async fn settle(table: &mut GridTable, viewport_height: f64) {
    for _ in 0..20 {
        table.tick(viewport_height);
        if !table.data().is_loading() && table.data().total_rows() > 0 {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
}

#[tokio::test]
async fn loads_csv_and_fills_visible_window() {
    let csv = write_csv("id;name;age\n1;Ada;36\n2;Grace;85\n3;Alan;41\n");
    let (coordinator, schema) = InMemoryCoordinator::from_path(
        tokio::runtime::Handle::current(),
        "people",
        csv.path(),
        b';',
    )
    .expect("csv load should succeed");

    let columns: Vec<ColumnDef> = schema
        .iter()
        .map(|col| ColumnDef::new(col.key.clone(), col.category))
        .collect();

    let mut table = GridTable::connect(
        "people",
        schema,
        Arc::new(coordinator),
        columns,
        Vec::new(),
        Vec::new(),
        layout_ctx(),
        50,
    )
    .expect("connect should succeed");

    let viewport_height = table.layout().row_height() * 10.0;
    settle(&mut table, viewport_height).await;

    let data = table.data();
    assert_eq!(data.total_rows(), 3);
    assert!(data.get_row(0).is_some());
    assert!(data.get_row(1).is_some());
    assert!(data.get_row(2).is_some());
}

#[tokio::test]
async fn sort_change_clears_and_refetches() {
    let csv = write_csv("id;name;age\n1;Ada;36\n2;Grace;85\n3;Alan;41\n");
    let (coordinator, schema) = InMemoryCoordinator::from_path(
        tokio::runtime::Handle::current(),
        "people",
        csv.path(),
        b';',
    )
    .expect("csv load should succeed");

    let columns: Vec<ColumnDef> = schema
        .iter()
        .map(|col| ColumnDef::new(col.key.clone(), col.category))
        .collect();

    let mut table = GridTable::connect(
        "people",
        schema,
        Arc::new(coordinator),
        columns,
        Vec::new(),
        Vec::new(),
        layout_ctx(),
        50,
    )
    .expect("connect should succeed");

    let viewport_height = table.layout().row_height() * 10.0;
    settle(&mut table, viewport_height).await;
    assert_eq!(table.data().total_rows(), 3);

    table.set_sort(vec![SortBy::new("age", true)]);
    settle(&mut table, viewport_height).await;

    let data = table.data();
    assert_eq!(data.sort().to_vec(), vec![SortBy::new("age", true)]);
    let top = data.get_row(0).expect("row 0 should be populated after refetch");
    let age = top
        .values
        .iter()
        .find(|(key, _)| key == "age")
        .map(|(_, value)| value.display());
    assert_eq!(age, Some("85".to_string()));
}

#[tokio::test]
async fn filter_change_narrows_total_rows() {
    let csv = write_csv("id;name;age\n1;Ada;36\n2;Grace;85\n3;Alan;41\n");
    let (coordinator, schema) = InMemoryCoordinator::from_path(
        tokio::runtime::Handle::current(),
        "people",
        csv.path(),
        b';',
    )
    .expect("csv load should succeed");

    let columns: Vec<ColumnDef> = schema
        .iter()
        .map(|col| ColumnDef::new(col.key.clone(), col.category))
        .collect();

    let mut table = GridTable::connect(
        "people",
        schema,
        Arc::new(coordinator),
        columns,
        Vec::new(),
        Vec::new(),
        layout_ctx(),
        50,
    )
    .expect("connect should succeed");

    let viewport_height = table.layout().row_height() * 10.0;
    settle(&mut table, viewport_height).await;
    assert_eq!(table.data().total_rows(), 3);

    table.set_filter(Some("age > 40".to_string()));
    settle(&mut table, viewport_height).await;

    assert_eq!(table.data().total_rows(), 2);
}
