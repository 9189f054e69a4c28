#![warn(clippy::all)]

use gridview_core::backend::InMemoryCoordinator;
use gridview_core::{Arguments, ColumnDef, GridTable, LayoutContext};
use std::sync::Arc;
use tracing::{error, info};

/*
cargo fmt
cargo test -- --nocapture
cargo run -- data.csv
cargo doc --open
*/

fn main() {
    // Initialize the tracing subscriber for logging.
    // Use RUST_LOG environment variable to set logging level.  eg `export RUST_LOG=info`
    tracing_subscriber::fmt::init();

    // Parse command-line arguments.
    let args = Arguments::build();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(err) => {
            error!("Failed to start the async runtime: {err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(&args, runtime.handle().clone()) {
        error!("{err}");
        std::process::exit(1);
    }
}

fn run(args: &Arguments, handle: tokio::runtime::Handle) -> gridview_core::GridResult<()> {
    let (coordinator, schema) = InMemoryCoordinator::from_path(
        handle,
        &args.table_name,
        &args.path,
        args.delimiter_byte(),
    )?;

    info!(columns = schema.len(), "loaded schema from {:?}", args.path);

    let columns: Vec<ColumnDef> = schema
        .iter()
        .map(|col| ColumnDef::new(col.key.clone(), col.category))
        .collect();

    let layout_ctx = LayoutContext {
        container_width: 1200.0,
        root_font_size: 16.0,
        table_font_size: 14.0,
    };

    let mut table = GridTable::connect(
        args.table_name.clone(),
        schema,
        Arc::new(coordinator),
        columns,
        Vec::new(),
        Vec::new(),
        layout_ctx,
        args.fetch_limit,
    )?;

    if let Some(filter) = &args.filter {
        table.set_filter(Some(filter.clone()));
    }

    let viewport_height = table.layout().row_height() * args.viewport_rows as f64;

    // Drive a handful of frame ticks so the initial async round trip has a chance to land; a
    // real host drives this from its own render loop instead.
    for _ in 0..20 {
        table.tick(viewport_height);
        std::thread::sleep(std::time::Duration::from_millis(25));
    }

    let data = table.data();
    info!(
        total_rows = data.total_rows(),
        loading = data.is_loading(),
        "grid ready"
    );

    let scroll = table.scroll(viewport_height, layout_ctx.container_width);
    let visible = scroll.visible_row_range();
    for i in visible.start..visible.end {
        if let Some(row) = data.get_row(i) {
            let rendered: Vec<String> = row
                .values
                .iter()
                .map(|(key, value)| format!("{key}={}", value.display()))
                .collect();
            println!("{i}: {}", rendered.join(", "));
        }
    }

    Ok(())
}
