use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray, Float64Array, StringArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{Map, Value as JsonValue};

use super::model::{
    COL_BOOSTER_CATEGORY, COL_BOOSTER_VERSION, COL_FLIGHT_NUMBER, COL_OUTCOME, COL_PAYLOAD,
    COL_SITE, LaunchDataset, LaunchRecord, Outcome,
};
use crate::error::{LoadError, LoadResult};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the launch records table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with at least `Launch Site`, `Payload Mass (kg)`, `class`
/// * `.json`    – `[{ "Launch Site": "...", "Payload Mass (kg)": 500.0, "class": 1, ... }, ...]`
/// * `.parquet` – the same columns as Arrow string / numeric columns
pub fn load_file(path: &Path) -> LoadResult<LaunchDataset> {
    if !path.is_file() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };

    log::info!(
        "Loaded {} launch records from {} ({} sites, payload {}..={} kg)",
        dataset.len(),
        path.display(),
        dataset.distinct_sites.len(),
        dataset.min_payload,
        dataset.max_payload
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Column lookup shared by the tabular formats
// ---------------------------------------------------------------------------

/// Positions of the known columns within a header row.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    site: usize,
    payload: usize,
    outcome: usize,
    flight_number: Option<usize>,
    booster_version: Option<usize>,
    booster_category: Option<usize>,
}

impl ColumnIndex {
    fn from_headers<'a>(headers: impl IntoIterator<Item = &'a str>) -> LoadResult<Self> {
        let headers: Vec<&str> = headers.into_iter().map(str::trim).collect();
        let find = |name: &str| headers.iter().position(|h| *h == name);
        let require = |name: &str| find(name).ok_or_else(|| LoadError::missing(name));

        Ok(ColumnIndex {
            site: require(COL_SITE)?,
            payload: require(COL_PAYLOAD)?,
            outcome: require(COL_OUTCOME)?,
            flight_number: find(COL_FLIGHT_NUMBER),
            booster_version: find(COL_BOOSTER_VERSION),
            booster_category: find(COL_BOOSTER_CATEGORY),
        })
    }
}

fn parse_payload(text: &str, row: usize) -> LoadResult<f64> {
    let trimmed = text.trim();
    match trimmed.parse::<f64>() {
        Ok(v) => check_payload(v, row),
        Err(_) => Err(LoadError::invalid(row, COL_PAYLOAD, trimmed)),
    }
}

fn check_payload(value: f64, row: usize) -> LoadResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(LoadError::invalid(row, COL_PAYLOAD, value))
    }
}

fn parse_outcome(text: &str, row: usize) -> LoadResult<Outcome> {
    Outcome::parse(text).ok_or_else(|| LoadError::invalid(row, COL_OUTCOME, text.trim()))
}

/// Flight numbers are informational; anything unparseable is dropped.
fn parse_flight_number(text: &str) -> Option<i64> {
    let text = text.trim();
    text.parse::<i64>()
        .ok()
        .or_else(|| text.parse::<f64>().ok().map(|f| f as i64))
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one launch per row.
/// Columns other than the known ones are ignored.
fn load_csv(path: &Path) -> LoadResult<LaunchDataset> {
    let mut reader = csv::Reader::from_path(path)?;
    let columns = ColumnIndex::from_headers(reader.headers()?.iter())?;

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let row = result?;
        let cell = |idx: usize| row.get(idx).unwrap_or("");
        let optional = |idx: Option<usize>| idx.map(cell);

        let site = cell(columns.site).trim();
        if site.is_empty() {
            return Err(LoadError::invalid(row_no, COL_SITE, site));
        }

        records.push(LaunchRecord {
            site: site.to_string(),
            payload_mass: parse_payload(cell(columns.payload), row_no)?,
            outcome: parse_outcome(cell(columns.outcome), row_no)?,
            flight_number: optional(columns.flight_number).and_then(parse_flight_number),
            booster_version: optional(columns.booster_version).and_then(non_empty),
            booster_category: optional(columns.booster_category).and_then(non_empty),
        });
    }

    Ok(LaunchDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Launch Site": "CCAFS LC-40", "Payload Mass (kg)": 525.0, "class": 1 },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> LoadResult<LaunchDataset> {
    let text = std::fs::read_to_string(path)?;
    let root: JsonValue = serde_json::from_str(&text)?;

    let rows = root
        .as_array()
        .ok_or_else(|| LoadError::invalid(0, "<root>", "expected a top-level JSON array"))?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .ok_or_else(|| LoadError::invalid(i, "<row>", "not a JSON object"))?;
        records.push(json_record(obj, i)?);
    }

    Ok(LaunchDataset::from_records(records))
}

fn json_record(obj: &Map<String, JsonValue>, row: usize) -> LoadResult<LaunchRecord> {
    let get = |name: &str| obj.get(name).ok_or_else(|| LoadError::missing(name));

    let site = match get(COL_SITE)? {
        JsonValue::String(s) if !s.trim().is_empty() => s.trim().to_string(),
        other => return Err(LoadError::invalid(row, COL_SITE, other)),
    };

    let payload_mass = match get(COL_PAYLOAD)? {
        JsonValue::Number(n) => n
            .as_f64()
            .ok_or_else(|| LoadError::invalid(row, COL_PAYLOAD, n))
            .and_then(|v| check_payload(v, row))?,
        JsonValue::String(s) => parse_payload(s, row)?,
        other => return Err(LoadError::invalid(row, COL_PAYLOAD, other)),
    };

    let outcome = match get(COL_OUTCOME)? {
        JsonValue::Number(n) => parse_outcome(&n.to_string(), row)?,
        JsonValue::String(s) => parse_outcome(s, row)?,
        JsonValue::Bool(b) => {
            if *b {
                Outcome::Success
            } else {
                Outcome::Failure
            }
        }
        other => return Err(LoadError::invalid(row, COL_OUTCOME, other)),
    };

    let text = |name: &str| match obj.get(name) {
        Some(JsonValue::String(s)) => non_empty(s),
        Some(JsonValue::Number(n)) => Some(n.to_string()),
        _ => None,
    };

    Ok(LaunchRecord {
        site,
        payload_mass,
        outcome,
        flight_number: text(COL_FLIGHT_NUMBER).as_deref().and_then(parse_flight_number),
        booster_version: text(COL_BOOSTER_VERSION),
        booster_category: text(COL_BOOSTER_CATEGORY),
    })
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with the same column names as the CSV.
///
/// Numeric columns may be any integer or float type and the site column any
/// string type; everything is cast to `Utf8` / `Float64` before reading.
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> LoadResult<LaunchDataset> {
    let file = std::fs::File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    // Checked against the file schema so files without row groups are validated too.
    let columns =
        ColumnIndex::from_headers(builder.schema().fields().iter().map(|f| f.name().as_str()))?;
    let reader = builder.build()?;

    let mut records = Vec::new();
    let mut row_offset = 0;

    for batch_result in reader {
        let batch = batch_result?;

        let sites = string_column(batch.column(columns.site))?;
        let payloads = f64_column(batch.column(columns.payload))?;
        let outcomes = f64_column(batch.column(columns.outcome))?;
        let flights = columns
            .flight_number
            .map(|i| f64_column(batch.column(i)))
            .transpose()?;
        let versions = columns
            .booster_version
            .map(|i| string_column(batch.column(i)))
            .transpose()?;
        let categories = columns
            .booster_category
            .map(|i| string_column(batch.column(i)))
            .transpose()?;

        for i in 0..batch.num_rows() {
            let row = row_offset + i;

            if sites.is_null(i) || sites.value(i).trim().is_empty() {
                return Err(LoadError::invalid(row, COL_SITE, "null"));
            }
            if payloads.is_null(i) {
                return Err(LoadError::invalid(row, COL_PAYLOAD, "null"));
            }
            if outcomes.is_null(i) {
                return Err(LoadError::invalid(row, COL_OUTCOME, "null"));
            }

            let outcome = outcomes.value(i);
            let outcome = match outcome {
                v if v == 0.0 => Outcome::Failure,
                v if v == 1.0 => Outcome::Success,
                v => return Err(LoadError::invalid(row, COL_OUTCOME, v)),
            };

            records.push(LaunchRecord {
                site: sites.value(i).trim().to_string(),
                payload_mass: check_payload(payloads.value(i), row)?,
                outcome,
                flight_number: flights
                    .as_ref()
                    .filter(|a| a.is_valid(i))
                    .map(|a| a.value(i) as i64),
                booster_version: versions
                    .as_ref()
                    .filter(|a| a.is_valid(i))
                    .and_then(|a| non_empty(a.value(i))),
                booster_category: categories
                    .as_ref()
                    .filter(|a| a.is_valid(i))
                    .and_then(|a| non_empty(a.value(i))),
            });
        }

        row_offset += batch.num_rows();
    }

    Ok(LaunchDataset::from_records(records))
}

// -- Arrow helpers --

fn string_column(col: &ArrayRef) -> LoadResult<StringArray> {
    let utf8 = cast(col, &DataType::Utf8)?;
    Ok(utf8.as_string::<i32>().clone())
}

fn f64_column(col: &ArrayRef) -> LoadResult<Float64Array> {
    let floats = cast(col, &DataType::Float64)?;
    Ok(floats.as_primitive::<Float64Type>().clone())
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::Int64Array;
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    use super::*;
    use crate::data::model::REQUIRED_COLUMNS;

    const SAMPLE_CSV: &str = "\
Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category
1,CCAFS LC-40,0,0.0,F9 v1.0  B0003,v1.0
2,CCAFS LC-40,0,525.0,F9 v1.0  B0005,v1.0
3,VAFB SLC-4E,1,9600.0,F9 FT B1029.1,FT
4,KSC LC-39A,1,2490.0,F9 FT B1031.1,FT
";

    fn write_temp(suffix: &str, contents: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn loads_csv_with_extra_columns() {
        let file = write_temp(".csv", SAMPLE_CSV.as_bytes());
        let ds = load_file(file.path()).unwrap();

        assert_eq!(ds.len(), 4);
        assert_eq!(ds.min_payload, 0.0);
        assert_eq!(ds.max_payload, 9600.0);
        assert_eq!(ds.distinct_sites, vec!["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A"]);

        let third = &ds.records[2];
        assert_eq!(third.site, "VAFB SLC-4E");
        assert_eq!(third.outcome, Outcome::Success);
        assert_eq!(third.flight_number, Some(3));
        assert_eq!(third.booster_version.as_deref(), Some("F9 FT B1029.1"));
        assert_eq!(third.booster_category.as_deref(), Some("FT"));
    }

    #[test]
    fn csv_with_only_required_columns() {
        let file = write_temp(".csv", b"Launch Site,Payload Mass (kg),class\nA,2000,1\n");
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.records, vec![LaunchRecord::new("A", 2000.0, Outcome::Success)]);
    }

    #[test]
    fn header_only_csv_is_an_empty_dataset() {
        let file = write_temp(".csv", b"Launch Site,Payload Mass (kg),class\n");
        let ds = load_file(file.path()).unwrap();
        assert!(ds.is_empty());
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let file = write_temp(".csv", b"Launch Site,class\nA,1\n");
        match load_file(file.path()) {
            Err(LoadError::MissingColumn { column }) => assert_eq!(column, COL_PAYLOAD),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn bad_cells_are_rejected_with_row_number() {
        let file = write_temp(".csv", b"Launch Site,Payload Mass (kg),class\nA,100,1\nB,heavy,0\n");
        match load_file(file.path()) {
            Err(LoadError::InvalidValue { row, column, value }) => {
                assert_eq!(row, 1);
                assert_eq!(column, COL_PAYLOAD);
                assert_eq!(value, "heavy");
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }

        let file = write_temp(".csv", b"Launch Site,Payload Mass (kg),class\nA,100,3\n");
        assert!(matches!(
            load_file(file.path()),
            Err(LoadError::InvalidValue { .. })
        ));

        let file = write_temp(".csv", b"Launch Site,Payload Mass (kg),class\nA,-5,1\n");
        assert!(matches!(
            load_file(file.path()),
            Err(LoadError::InvalidValue { .. })
        ));
    }

    #[test]
    fn missing_file_and_unknown_extension() {
        let missing = Path::new("/definitely/not/here/launches.csv");
        assert!(matches!(load_file(missing), Err(LoadError::NotFound(_))));

        let file = write_temp(".xlsx", b"whatever");
        match load_file(file.path()) {
            Err(LoadError::UnsupportedFormat(ext)) => assert_eq!(ext, "xlsx"),
            other => panic!("expected UnsupportedFormat, got {other:?}"),
        }
    }

    #[test]
    fn loads_records_oriented_json() {
        let json = r#"[
            {
                "Launch Site": "CCAFS LC-40",
                "Payload Mass (kg)": 525.0,
                "class": 0,
                "Flight Number": 2
            },
            {
                "Launch Site": "KSC LC-39A",
                "Payload Mass (kg)": "2490",
                "class": 1,
                "Booster Version Category": "FT"
            }
        ]"#;
        let file = write_temp(".json", json.as_bytes());
        let ds = load_file(file.path()).unwrap();

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].flight_number, Some(2));
        assert_eq!(ds.records[0].outcome, Outcome::Failure);
        assert_eq!(ds.records[1].payload_mass, 2490.0);
        assert_eq!(ds.records[1].booster_category.as_deref(), Some("FT"));
    }

    #[test]
    fn json_row_without_outcome_is_missing_column() {
        let file = write_temp(".json", br#"[{"Launch Site": "A", "Payload Mass (kg)": 1.0}]"#);
        assert!(matches!(
            load_file(file.path()),
            Err(LoadError::MissingColumn { .. })
        ));
    }

    #[test]
    fn loads_parquet_with_integer_columns() {
        let schema = Arc::new(Schema::new(vec![
            Field::new(COL_SITE, DataType::Utf8, false),
            Field::new(COL_PAYLOAD, DataType::Int64, false),
            Field::new(COL_OUTCOME, DataType::Int64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["A", "A", "B"])),
                Arc::new(Int64Array::from(vec![2000, 8000, 5000])),
                Arc::new(Int64Array::from(vec![1, 0, 1])),
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.records[1], LaunchRecord::new("A", 8000.0, Outcome::Failure));
        assert_eq!(ds.distinct_sites, vec!["A", "B"]);
        assert_eq!(ds.max_payload, 8000.0);
    }

    #[test]
    fn empty_parquet_still_requires_columns() {
        let schema = Arc::new(Schema::new(vec![Field::new(
            "unrelated",
            DataType::Utf8,
            true,
        )]));

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.close().unwrap();

        match load_file(file.path()) {
            Err(LoadError::MissingColumn { column }) => {
                assert!(REQUIRED_COLUMNS.contains(&column.as_str()))
            }
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }
}
