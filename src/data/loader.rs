use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array,
    StringArray,
};
use arrow::datatypes::DataType;
use calamine::{Data, Reader, open_workbook_auto};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{CellValue, Dataset};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the startup table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.xlsx` / `.xlsm` / `.xls` / `.ods` – first worksheet, first row is the header
/// * `.csv`     – header row, one startup per line
/// * `.json`    – `[{ "Startup name": ..., "Founding year": ..., ... }, ...]`
/// * `.parquet` – flat columns of strings, integers, floats or booleans
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "xlsx" | "xlsm" | "xls" | "ods" => load_spreadsheet(path),
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        "csv" => load_csv(path),
        other => bail!("Unsupported file extension: .{other}"),
    }?;

    let (rows, cols) = dataset.shape();
    log::info!(
        "Loaded {rows} rows x {cols} columns from {}: {:?}",
        path.display(),
        dataset.column_names
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Spreadsheet loader
// ---------------------------------------------------------------------------

fn load_spreadsheet(path: &Path) -> Result<Dataset> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("opening workbook {}", path.display()))?;
    let range = workbook
        .worksheet_range_at(0)
        .context("workbook has no worksheets")?
        .context("reading first worksheet")?;

    let mut rows = range.rows();
    let header = rows.next().context("worksheet is empty, expected a header row")?;
    let column_names: Vec<String> = header.iter().map(|c| c.to_string().trim().to_string()).collect();

    let records: Vec<Vec<CellValue>> = rows
        .map(|row| row.iter().map(spreadsheet_to_cell).collect())
        .collect();

    Ok(Dataset::new(column_names, records))
}

fn spreadsheet_to_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Null,
        Data::String(s) if s.trim().is_empty() => CellValue::Null,
        Data::String(s) => CellValue::String(s.clone()),
        Data::Int(i) => CellValue::Integer(*i),
        Data::Float(f) => CellValue::number(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        other => CellValue::Date(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`).
/// Columns are taken in the order they first appear across records.
fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut column_names: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        for key in obj.keys() {
            if !column_names.contains(key) {
                column_names.push(key.clone());
            }
        }
    }

    let rows = records
        .iter()
        .filter_map(|rec| rec.as_object())
        .map(|obj| {
            column_names
                .iter()
                .map(|col| obj.get(col).map(json_to_cell).unwrap_or(CellValue::Null))
                .collect()
        })
        .collect();

    Ok(Dataset::new(column_names, rows))
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) if s.trim().is_empty() => CellValue::Null,
        JsonValue::String(s) => CellValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::number(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one startup per record.
/// Multi-value cells keep their `", "` separators, so they must be quoted.
fn load_csv(path: &Path) -> Result<Dataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let column_names: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(record.iter().map(guess_cell_type).collect());
    }

    Ok(Dataset::new(column_names, rows))
}

fn guess_cell_type(s: &str) -> CellValue {
    if s.trim().is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::String(s.to_string())
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one flat column per field.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let column_names: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for row in 0..batch.num_rows() {
            rows.push(
                batch
                    .columns()
                    .iter()
                    .map(|col| extract_cell(col, row))
                    .collect(),
            );
        }
    }

    Ok(Dataset::new(column_names, rows))
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &Arc<dyn Array>, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Null;
    }
    let any = col.as_any();
    match col.data_type() {
        DataType::Utf8 => any
            .downcast_ref::<StringArray>()
            .map(|s| CellValue::String(s.value(row).to_string()))
            .unwrap_or(CellValue::Null),
        DataType::LargeUtf8 => {
            CellValue::String(col.as_string::<i64>().value(row).to_string())
        }
        DataType::Int32 => any
            .downcast_ref::<Int32Array>()
            .map(|a| CellValue::Integer(a.value(row) as i64))
            .unwrap_or(CellValue::Null),
        DataType::Int64 => any
            .downcast_ref::<Int64Array>()
            .map(|a| CellValue::Integer(a.value(row)))
            .unwrap_or(CellValue::Null),
        DataType::Float32 => any
            .downcast_ref::<Float32Array>()
            .map(|a| CellValue::number(a.value(row) as f64))
            .unwrap_or(CellValue::Null),
        DataType::Float64 => any
            .downcast_ref::<Float64Array>()
            .map(|a| CellValue::number(a.value(row)))
            .unwrap_or(CellValue::Null),
        DataType::Boolean => any
            .downcast_ref::<BooleanArray>()
            .map(|a| CellValue::Bool(a.value(row)))
            .unwrap_or(CellValue::Null),
        other => CellValue::String(format!("{other:?}")),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    use super::*;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn csv_keeps_header_order_and_types() {
        let file = write_temp(
            ".csv",
            "Startup name,Founding year,Funding Received,Investors\n\
             Medix,2015,$2M,\"A, B\"\n\
             Cura,2016,,B\n",
        );
        let ds = load_file(file.path()).unwrap();
        assert_eq!(
            ds.column_names,
            vec!["Startup name", "Founding year", "Funding Received", "Investors"]
        );
        assert_eq!(ds.shape(), (2, 4));
        assert_eq!(ds.rows()[0][1], CellValue::Integer(2015));
        assert_eq!(ds.rows()[0][2], CellValue::String("$2M".into()));
        assert_eq!(ds.rows()[0][3], CellValue::String("A, B".into()));
        assert_eq!(ds.rows()[1][2], CellValue::Null);
    }

    #[test]
    fn json_records_union_their_keys() {
        let file = write_temp(
            ".json",
            r#"[{"Startup name": "Medix", "Founding year": 2015.0},
                {"Startup name": "Cura", "Enabler": "Incubator"}]"#,
        );
        let ds = load_file(file.path()).unwrap();
        assert_eq!(
            ds.column_names,
            vec!["Startup name", "Founding year", "Enabler"]
        );
        assert_eq!(ds.shape(), (2, 3));
        let year: Vec<_> = ds.column("Founding year").unwrap().cloned().collect();
        assert_eq!(year, vec![CellValue::Integer(2015), CellValue::Null]);
        let enabler: Vec<_> = ds.column("Enabler").unwrap().cloned().collect();
        assert_eq!(enabler[1], CellValue::String("Incubator".into()));
    }

    #[test]
    fn json_must_be_an_array_of_objects() {
        let file = write_temp(".json", r#"{"Startup name": "Medix"}"#);
        assert!(load_file(file.path()).is_err());
        let file = write_temp(".json", r#"[1, 2]"#);
        assert!(load_file(file.path()).is_err());
    }

    #[test]
    fn parquet_columns_are_read_in_schema_order() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("Startup name", DataType::Utf8, false),
            Field::new("Founding year", DataType::Int64, true),
            Field::new("Funding Received", DataType::Utf8, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["Medix", "Cura"])),
                Arc::new(Int64Array::from(vec![Some(2015), None])),
                Arc::new(StringArray::from(vec![Some("$2M"), None])),
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(file.path()).unwrap();
        assert_eq!(
            ds.column_names,
            vec!["Startup name", "Founding year", "Funding Received"]
        );
        assert_eq!(ds.rows()[0][1], CellValue::Integer(2015));
        assert_eq!(ds.rows()[1][1], CellValue::Null);
        assert_eq!(ds.rows()[1][2], CellValue::Null);
    }

    #[test]
    fn spreadsheet_cells_map_to_cell_values() {
        assert_eq!(spreadsheet_to_cell(&Data::Float(2015.0)), CellValue::Integer(2015));
        assert_eq!(spreadsheet_to_cell(&Data::Float(2.5)), CellValue::Float(2.5));
        assert_eq!(spreadsheet_to_cell(&Data::Int(7)), CellValue::Integer(7));
        assert_eq!(spreadsheet_to_cell(&Data::String("  ".into())), CellValue::Null);
        assert_eq!(
            spreadsheet_to_cell(&Data::Error(calamine::CellErrorType::NA)),
            CellValue::Null
        );
        assert_eq!(spreadsheet_to_cell(&Data::Empty), CellValue::Null);
        assert_eq!(spreadsheet_to_cell(&Data::Bool(true)), CellValue::Bool(true));
        assert_eq!(
            spreadsheet_to_cell(&Data::DateTimeIso("2020-01-31T00:00:00".into())),
            CellValue::Date("2020-01-31T00:00:00".into())
        );
    }

    #[test]
    fn xlsx_workbook_loads_first_sheet_with_header() {
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Startup name").unwrap();
        sheet.write_string(0, 1, " Founding year ").unwrap();
        sheet.write_string(0, 2, "Funding Received").unwrap();
        sheet.write_string(1, 0, "Medix").unwrap();
        sheet.write_number(1, 1, 2015.0).unwrap();
        sheet.write_string(1, 2, "$2M").unwrap();
        sheet.write_string(2, 0, "Cura").unwrap();
        sheet.write_number(2, 1, 2015.0).unwrap();

        let file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        workbook.save(file.path()).unwrap();

        let ds = load_file(file.path()).unwrap();
        assert_eq!(
            ds.column_names,
            vec!["Startup name", "Founding year", "Funding Received"]
        );
        assert_eq!(ds.shape(), (2, 3));
        let years: Vec<_> = ds.column("Founding year").unwrap().cloned().collect();
        assert_eq!(years, vec![CellValue::Integer(2015), CellValue::Integer(2015)]);
        assert_eq!(ds.rows()[0][2], CellValue::String("$2M".into()));
        assert_eq!(ds.rows()[1][2], CellValue::Null);
    }

    #[test]
    fn empty_worksheet_fails_without_header() {
        let mut workbook = rust_xlsxwriter::Workbook::new();
        workbook.add_worksheet();
        let file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        workbook.save(file.path()).unwrap();

        let err = load_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("expected a header row"));
    }

    #[test]
    fn missing_file_fails() {
        assert!(load_file(Path::new("/nonexistent/HealthTech Hyd.xlsx")).is_err());
        assert!(load_file(Path::new("/nonexistent/data.csv")).is_err());
    }

    #[test]
    fn unknown_extension_fails() {
        let file = write_temp(".txt", "Startup name\nMedix\n");
        let err = load_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Unsupported file extension"));
    }
}
