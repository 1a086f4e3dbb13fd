use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use calamine::{open_workbook_auto, Data, Reader};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::error::LoadError;
use super::model::{Cell, SourceTable};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load an indicator table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.xlsx` / `.xlsm` / `.xls` / `.xlsb` / `.ods` – first worksheet, or `sheet`
/// * `.csv`     – first record is the header
/// * `.json`    – pandas `df.to_json(orient="split")`
/// * `.parquet` – entity and variable columns followed by one column per year
///
/// In every format column 0 is the entity, column 1 the variable and the
/// remaining columns are years.
pub fn load_file(path: &Path, sheet: Option<&str>) -> Result<SourceTable, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => load_workbook(path, sheet),
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(LoadError::UnsupportedExtension(other.to_string())),
    }
}

/// Split the first row off as the header and build the table.
fn table_from_rows(mut rows: Vec<Vec<Cell>>) -> Result<SourceTable, LoadError> {
    if rows.is_empty() {
        return Err(LoadError::MissingHeader);
    }
    let header = rows.remove(0);
    SourceTable::from_grid(header, rows)
}

// ---------------------------------------------------------------------------
// Workbook loader
// ---------------------------------------------------------------------------

fn load_workbook(path: &Path, sheet: Option<&str>) -> Result<SourceTable, LoadError> {
    let workbook_error = |source: calamine::Error| LoadError::Workbook {
        path: path.to_path_buf(),
        source,
    };
    let mut workbook = open_workbook_auto(path).map_err(workbook_error)?;

    let range = match sheet {
        Some(name) => {
            if !workbook.sheet_names().iter().any(|s| s == name) {
                return Err(LoadError::MissingWorksheet(name.to_string()));
            }
            workbook.worksheet_range(name).map_err(workbook_error)?
        }
        None => workbook
            .worksheet_range_at(0)
            .ok_or_else(|| LoadError::MissingWorksheet("<first>".to_string()))?
            .map_err(workbook_error)?,
    };

    let rows = range
        .rows()
        .map(|row| row.iter().map(workbook_cell).collect())
        .collect();
    table_from_rows(rows)
}

fn workbook_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::Bool(b) => Cell::Number(if *b { 1.0 } else { 0.0 }),
        Data::String(s) => Cell::from_text(s),
        other => Cell::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// All CSV cells are kept as text; numeric coercion happens per series.
fn load_csv(path: &Path) -> Result<SourceTable, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut rows: Vec<Vec<Cell>> = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(Cell::from_text).collect());
    }
    table_from_rows(rows)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// `df.to_json(orient="split")` layout. The `index` key is ignored.
///
/// ```json
/// {
///   "columns": ["ente", "variavel", "2020", "2021"],
///   "data": [["SP", "PIB", 100.0, 120.5], ...]
/// }
/// ```
#[derive(Debug, Deserialize)]
struct SplitFrame {
    columns: Vec<JsonValue>,
    data: Vec<Vec<JsonValue>>,
}

fn load_json(path: &Path) -> Result<SourceTable, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let frame: SplitFrame = serde_json::from_str(&text)?;

    let header: Vec<Cell> = frame.columns.iter().map(json_cell).collect();
    let grid = frame
        .data
        .iter()
        .map(|row| row.iter().map(json_cell).collect())
        .collect();
    SourceTable::from_grid(header, grid)
}

fn json_cell(val: &JsonValue) -> Cell {
    match val {
        JsonValue::Null => Cell::Empty,
        JsonValue::Number(n) => n
            .as_f64()
            .map(Cell::Number)
            .unwrap_or_else(|| Cell::Text(n.to_string())),
        JsonValue::String(s) => Cell::from_text(s),
        JsonValue::Bool(b) => Cell::Number(if *b { 1.0 } else { 0.0 }),
        other => Cell::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file holding a wide indicator table.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`); year columns are named after the year.
fn load_parquet(path: &Path) -> Result<SourceTable, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;

    let header: Vec<Cell> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| Cell::from_text(f.name()))
        .collect();
    let reader = builder.build()?;

    let mut grid = Vec::new();
    for batch_result in reader {
        let batch = batch_result?;
        for row in 0..batch.num_rows() {
            let cells = batch
                .columns()
                .iter()
                .map(|col| arrow_cell(col, row))
                .collect::<Result<Vec<Cell>, LoadError>>()?;
            grid.push(cells);
        }
    }

    SourceTable::from_grid(header, grid)
}

/// Extract a single cell from an Arrow column at a given row.
fn arrow_cell(col: &Arc<dyn Array>, row: usize) -> Result<Cell, LoadError> {
    if col.is_null(row) {
        return Ok(Cell::Empty);
    }
    let cell = match col.data_type() {
        DataType::Float64 => Cell::Number(col.as_primitive::<Float64Type>().value(row)),
        DataType::Float32 => Cell::Number(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Int64 => Cell::Number(col.as_primitive::<Int64Type>().value(row) as f64),
        DataType::Int32 => Cell::Number(col.as_primitive::<Int32Type>().value(row) as f64),
        DataType::Utf8 => Cell::from_text(col.as_string::<i32>().value(row)),
        DataType::LargeUtf8 => Cell::from_text(col.as_string::<i64>().value(row)),
        DataType::Boolean => Cell::Number(if col.as_boolean().value(row) { 1.0 } else { 0.0 }),
        _ => Cell::Text(arrow::util::display::array_value_to_string(col, row)?),
    };
    Ok(cell)
}
