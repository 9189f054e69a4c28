//! Reference `Coordinator` implementation: an in-memory Polars `SQLContext` executing every
//! dispatched query against one registered table. Demonstration/testing material — the core
//! modules never import this or `polars` itself.

use super::file_extension::FileExtension;
use crate::error::{GridError, GridResult};
use crate::query::{ClientId, Coordinator, QueryClient};
use crate::schema::ColumnSchema;
use crate::value::{QueryResultSet, RawValue, ResultRow};
use polars::prelude::*;
use polars::sql::SQLContext;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokio::runtime::Handle;

/// Default number of rows used to infer a CSV/JSON schema, mirrored from the teacher's own
/// `DEFAULT_INFER_SCHEMA_ROWS`.
pub const DEFAULT_INFER_SCHEMA_ROWS: usize = 200;

/// Default CSV delimiter, mirrored from the teacher's `DEFAULT_CSV_DELIMITER`.
pub const DEFAULT_CSV_DELIMITER: u8 = b';';

pub struct InMemoryCoordinator {
    ctx: Arc<Mutex<SQLContext>>,
    clients: Arc<Mutex<HashMap<ClientId, Arc<dyn QueryClient>>>>,
    filter: Arc<Mutex<Option<String>>>,
    handle: Handle,
}

impl InMemoryCoordinator {
    pub fn new(handle: Handle, table_name: &str, df: DataFrame) -> Self {
        let mut ctx = SQLContext::new();
        ctx.register(table_name, df.lazy());
        Self {
            ctx: Arc::new(Mutex::new(ctx)),
            clients: Arc::new(Mutex::new(HashMap::new())),
            filter: Arc::new(Mutex::new(None)),
            handle,
        }
    }

    /// Loads a CSV/JSON/NDJSON/Parquet file, registers it under `table_name`, and returns both
    /// the coordinator and the resolved schema a caller hands to `GridTable::connect`.
    pub fn from_path(
        handle: Handle,
        table_name: &str,
        path: &Path,
        csv_delimiter: u8,
    ) -> GridResult<(Self, Vec<ColumnSchema>)> {
        if !path.exists() {
            return Err(GridError::FileNotFound(path.to_path_buf()));
        }
        let df = load_dataframe(path, csv_delimiter)?;
        let schema = schema_from_dataframe(&df);
        Ok((Self::new(handle, table_name, df), schema))
    }

    fn dispatch(&self, id: ClientId) {
        let clients = self.clients.lock().unwrap();
        let Some(client) = clients.get(&id).cloned() else {
            return;
        };
        drop(clients);

        let filter = self.filter.lock().unwrap().clone();
        let ctx = self.ctx.clone();
        self.handle.spawn_blocking(move || {
            let sql = client.query(filter.as_deref());
            match execute(&ctx, &sql) {
                Ok(rows) => client.query_result(rows),
                Err(error) => client.query_error(error),
            }
        });
    }
}

impl Coordinator for InMemoryCoordinator {
    fn connect(&self, client: Arc<dyn QueryClient>) {
        self.clients.lock().unwrap().insert(client.id(), client);
    }

    fn disconnect(&self, id: ClientId) {
        self.clients.lock().unwrap().remove(&id);
    }

    fn request_requery(&self, id: ClientId) {
        self.dispatch(id);
    }

    fn set_filter(&self, filter: Option<String>) {
        *self.filter.lock().unwrap() = filter;
        let ids: Vec<ClientId> = self.clients.lock().unwrap().keys().copied().collect();
        for id in ids {
            self.dispatch(id);
        }
    }
}

fn execute(ctx: &Arc<Mutex<SQLContext>>, sql: &str) -> GridResult<QueryResultSet> {
    let mut ctx = ctx.lock().unwrap();
    let df = ctx.execute(sql)?.collect()?;
    Ok(dataframe_to_result_set(&df))
}

fn dataframe_to_result_set(df: &DataFrame) -> QueryResultSet {
    let height = df.height();
    let columns = df.get_columns();
    (0..height)
        .map(|row_index| {
            columns
                .iter()
                .map(|col| {
                    let raw = col
                        .get(row_index)
                        .map(any_value_to_raw)
                        .unwrap_or(RawValue::Null);
                    (col.name().to_string(), raw)
                })
                .collect::<ResultRow>()
        })
        .collect()
}

fn any_value_to_raw(value: AnyValue) -> RawValue {
    match value {
        AnyValue::Null => RawValue::Null,
        AnyValue::Boolean(b) => RawValue::Bool(b),
        AnyValue::Int8(n) => RawValue::Int(n as i64),
        AnyValue::Int16(n) => RawValue::Int(n as i64),
        AnyValue::Int32(n) => RawValue::Int(n as i64),
        AnyValue::Int64(n) => RawValue::Int(n),
        AnyValue::UInt8(n) => RawValue::Int(n as i64),
        AnyValue::UInt16(n) => RawValue::Int(n as i64),
        AnyValue::UInt32(n) => RawValue::Int(n as i64),
        AnyValue::UInt64(n) => RawValue::Int(n as i64),
        AnyValue::Float32(f) => RawValue::Float(f as f64),
        AnyValue::Float64(f) => RawValue::Float(f),
        AnyValue::String(s) => RawValue::Text(s.to_string()),
        AnyValue::StringOwned(s) => RawValue::Text(s.to_string()),
        other => RawValue::Text(other.to_string()),
    }
}

/// Derives a `ColumnSchema` list from a loaded `DataFrame`'s Polars schema, mapping each
/// `DataType` to the SQL type name `categorize` recognizes.
pub fn schema_from_dataframe(df: &DataFrame) -> Vec<ColumnSchema> {
    df.schema()
        .iter()
        .map(|(name, dtype)| ColumnSchema::new(name.to_string(), sql_type_name(dtype)))
        .collect()
}

fn sql_type_name(dtype: &DataType) -> &'static str {
    match dtype {
        DataType::Boolean => "BOOLEAN",
        DataType::Int8 | DataType::Int16 | DataType::Int32 => "INTEGER",
        DataType::Int64 => "BIGINT",
        DataType::UInt8 | DataType::UInt16 | DataType::UInt32 => "UINTEGER",
        DataType::UInt64 => "UBIGINT",
        DataType::Float32 | DataType::Float64 => "DOUBLE",
        DataType::String => "VARCHAR",
        DataType::Date => "DATE",
        DataType::Datetime(_, _) => "TIMESTAMP",
        DataType::Time => "TIME",
        DataType::Duration(_) => "INTERVAL",
        DataType::Categorical(_, _) | DataType::Enum(_, _) => "ENUM",
        DataType::List(_) => "LIST",
        DataType::Struct(_) => "STRUCT",
        DataType::Binary | DataType::BinaryOffset => "BLOB",
        _ => "VARCHAR",
    }
}

fn load_dataframe(path: &Path, csv_delimiter: u8) -> GridResult<DataFrame> {
    match FileExtension::from_path(path) {
        FileExtension::Csv => {
            let df = CsvReadOptions::default()
                .with_infer_schema_length(Some(DEFAULT_INFER_SCHEMA_ROWS))
                .with_parse_options(CsvParseOptions::default().with_separator(csv_delimiter))
                .try_into_reader_with_file_path(Some(path.to_path_buf()))?
                .finish()?;
            Ok(df)
        }
        FileExtension::Json => {
            let file = std::fs::File::open(path)?;
            let df = JsonReader::new(file)
                .infer_schema_len(std::num::NonZero::new(DEFAULT_INFER_SCHEMA_ROWS))
                .finish()?;
            Ok(df)
        }
        FileExtension::NDJson => {
            let lazyframe = LazyJsonLineReader::new(path)
                .with_infer_schema_length(std::num::NonZero::new(DEFAULT_INFER_SCHEMA_ROWS))
                .with_ignore_errors(true)
                .finish()?;
            Ok(lazyframe.collect()?)
        }
        FileExtension::Parquet => {
            let lazyframe = LazyFrame::scan_parquet(path, ScanArgsParquet::default())?;
            Ok(lazyframe.collect()?)
        }
        FileExtension::Unknown(ext) => Err(GridError::UnsupportedFileType(ext)),
        FileExtension::Missing => {
            Err(GridError::UnsupportedFileType("missing extension".to_string()))
        }
    }
}
