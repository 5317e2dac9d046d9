use std::path::Path;

use arrow::array::{
    Array, ArrayRef, AsArray, BooleanArray, Date32Array, Date64Array, DurationMicrosecondArray,
    DurationMillisecondArray, DurationNanosecondArray, DurationSecondArray, Float32Array,
    Float64Array, Int32Array, Int64Array, StringArray, TimestampMicrosecondArray,
    TimestampMillisecondArray, TimestampNanosecondArray, TimestampSecondArray,
};
use arrow::datatypes::{DataType, TimeUnit};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::DataError;
use super::model::{OrderDataset, OrderRecord};
use super::schema;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load an order extract from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.parquet` – the production extract format (pandas/polars-written)
/// * `.json`    – `[{ "OT": ..., "DATE_DEPART": ..., ... }, ...]`
/// * `.csv`     – header row with the extract's column names
///
/// All columns in [`schema::ALL`] are mandatory. Timestamp cells that fail to
/// parse become nulls rather than aborting the load; every other column is
/// carried through unmodified.
pub fn load_file(path: &Path) -> Result<OrderDataset, DataError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        "csv" => load_csv(path),
        other => Err(DataError::UnsupportedFormat(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Text parsing helpers (CSV + JSON + string columns in parquet)
// ---------------------------------------------------------------------------

/// Parse a timestamp in the formats the extract pipeline emits.
/// Unparseable input is a null, not an error.
pub(crate) fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(ts);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Durations travel as (possibly fractional) seconds in text formats.
fn parse_duration_secs(s: &str) -> Option<TimeDelta> {
    let v: f64 = s.trim().parse().ok()?;
    secs_f64_to_delta(v)
}

fn secs_f64_to_delta(v: f64) -> Option<TimeDelta> {
    if !v.is_finite() {
        return None;
    }
    Some(TimeDelta::milliseconds((v * 1000.0).round() as i64))
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.trim() {
        "" => None,
        "1" | "true" | "True" => Some(true),
        "0" | "false" | "False" => Some(false),
        other => other.parse::<f64>().ok().map(|v| v != 0.0),
    }
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with the extract's column names, one order per row.
/// Empty cells are nulls; durations are seconds; flags are 0/1.
fn load_csv(path: &Path) -> Result<OrderDataset, DataError> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let mut index = std::collections::BTreeMap::new();
    for name in schema::ALL {
        let pos = headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| DataError::MissingColumn(name.to_string()))?;
        index.insert(name, pos);
    }

    let mut orders = Vec::new();
    for result in reader.records() {
        let record = result?;
        let cell = |name: &str| record.get(index[name]).unwrap_or("");

        orders.push(OrderRecord {
            reference: non_empty(cell(schema::OT)),
            order_date: parse_timestamp(cell(schema::DATE_OT)),
            departure_date: parse_timestamp(cell(schema::DATE_DEPART)),
            arrival_date: parse_timestamp(cell(schema::DATE_ARRIVEE)),
            promised_date: parse_timestamp(cell(schema::DATE_LIVRAISON_PREVUE)),
            last_event_date: parse_timestamp(cell(schema::DATE_DERNIER_EVNT)),
            pickup_agency: non_empty(cell(schema::AGENCE_ENL)),
            delivery_agency: non_empty(cell(schema::AGENCE_LIV)),
            product: non_empty(cell(schema::PRODUIT)),
            priority: non_empty(cell(schema::PRIORITE)),
            pickup_country: non_empty(cell(schema::PAYS_ENL)),
            delivery_country: non_empty(cell(schema::PAYS_LIV)),
            pickup_region: non_empty(cell(schema::REGION_ENL)),
            delivery_region: non_empty(cell(schema::REGION_LIV)),
            pickup_department: non_empty(cell(schema::DEPT_ENL)),
            delivery_department: non_empty(cell(schema::DEPT_LIV)),
            package_count: cell(schema::NB_COLIS).trim().parse().ok(),
            declared_weight: cell(schema::POIDS_DECLARE).trim().parse().ok(),
            delivery_time: parse_duration_secs(cell(schema::DL_H)),
            processing_time: parse_duration_secs(cell(schema::DT_H)),
            last_mile_time: parse_duration_secs(cell(schema::DDK_H)),
            delay: parse_duration_secs(cell(schema::DELAIS_RETARD)),
            late: parse_flag(cell(schema::RETARD)),
            before_cutoff: parse_flag(cell(schema::LIVRE_AVANT_13H)),
        });
    }

    Ok(OrderDataset::from_orders(orders))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "OT": "OT-000001",
///     "DATE_DEPART": "2024-01-05 08:12:00",
///     "NB_COLIS": 3,
///     "DL_H": 93600,
///     ...
///   },
///   ...
/// ]
/// ```
///
/// Durations are seconds; flags are booleans or 0/1.
fn load_json(path: &Path) -> Result<OrderDataset, DataError> {
    let text = std::fs::read_to_string(path)?;
    let root: JsonValue = serde_json::from_str(&text)?;

    let records = root
        .as_array()
        .ok_or_else(|| DataError::InvalidData("Expected top-level JSON array".into()))?;

    // Schema check against the first record; later records may carry nulls
    // but a column missing outright is a malformed extract.
    if let Some(first) = records.first() {
        let obj = first
            .as_object()
            .ok_or_else(|| DataError::InvalidData("Row 0 is not a JSON object".into()))?;
        for name in schema::ALL {
            if !obj.contains_key(name) {
                return Err(DataError::MissingColumn(name.to_string()));
            }
        }
    }

    let mut orders = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .ok_or_else(|| DataError::InvalidData(format!("Row {i} is not a JSON object")))?;

        let string = |name: &str| obj.get(name).and_then(json_string);
        let ts = |name: &str| {
            obj.get(name)
                .and_then(|v| v.as_str())
                .and_then(parse_timestamp)
        };
        let dur = |name: &str| {
            obj.get(name)
                .and_then(JsonValue::as_f64)
                .and_then(secs_f64_to_delta)
        };
        let flag = |name: &str| {
            obj.get(name).and_then(|v| match v {
                JsonValue::Bool(b) => Some(*b),
                JsonValue::Number(n) => n.as_f64().map(|f| f != 0.0),
                _ => None,
            })
        };

        orders.push(OrderRecord {
            reference: string(schema::OT),
            order_date: ts(schema::DATE_OT),
            departure_date: ts(schema::DATE_DEPART),
            arrival_date: ts(schema::DATE_ARRIVEE),
            promised_date: ts(schema::DATE_LIVRAISON_PREVUE),
            last_event_date: ts(schema::DATE_DERNIER_EVNT),
            pickup_agency: string(schema::AGENCE_ENL),
            delivery_agency: string(schema::AGENCE_LIV),
            product: string(schema::PRODUIT),
            priority: string(schema::PRIORITE),
            pickup_country: string(schema::PAYS_ENL),
            delivery_country: string(schema::PAYS_LIV),
            pickup_region: string(schema::REGION_ENL),
            delivery_region: string(schema::REGION_LIV),
            pickup_department: string(schema::DEPT_ENL),
            delivery_department: string(schema::DEPT_LIV),
            package_count: obj.get(schema::NB_COLIS).and_then(JsonValue::as_u64),
            declared_weight: obj.get(schema::POIDS_DECLARE).and_then(JsonValue::as_f64),
            delivery_time: dur(schema::DL_H),
            processing_time: dur(schema::DT_H),
            last_mile_time: dur(schema::DDK_H),
            delay: dur(schema::DELAIS_RETARD),
            late: flag(schema::RETARD),
            before_cutoff: flag(schema::LIVRE_AVANT_13H),
        });
    }

    Ok(OrderDataset::from_orders(orders))
}

fn json_string(val: &JsonValue) -> Option<String> {
    match val {
        JsonValue::String(s) => non_empty(s),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a parquet order extract.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`): timestamps in any unit, durations in
/// any unit (pandas `timedelta64[ns]` included), string or integer order
/// references, boolean or 0/1 flags.
fn load_parquet(path: &Path) -> Result<OrderDataset, DataError> {
    let file = std::fs::File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let reader = builder.build()?;

    let mut orders = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;
        let n_rows = batch.num_rows();
        let col = |name| column(&batch, name);

        let ot = col(schema::OT)?;
        let date_ot = col(schema::DATE_OT)?;
        let date_depart = col(schema::DATE_DEPART)?;
        let date_arrivee = col(schema::DATE_ARRIVEE)?;
        let date_prevue = col(schema::DATE_LIVRAISON_PREVUE)?;
        let date_evnt = col(schema::DATE_DERNIER_EVNT)?;
        let agence_enl = col(schema::AGENCE_ENL)?;
        let agence_liv = col(schema::AGENCE_LIV)?;
        let produit = col(schema::PRODUIT)?;
        let priorite = col(schema::PRIORITE)?;
        let pays_enl = col(schema::PAYS_ENL)?;
        let pays_liv = col(schema::PAYS_LIV)?;
        let region_enl = col(schema::REGION_ENL)?;
        let region_liv = col(schema::REGION_LIV)?;
        let dept_enl = col(schema::DEPT_ENL)?;
        let dept_liv = col(schema::DEPT_LIV)?;
        let nb_colis = col(schema::NB_COLIS)?;
        let poids = col(schema::POIDS_DECLARE)?;
        let dl_h = col(schema::DL_H)?;
        let dt_h = col(schema::DT_H)?;
        let ddk_h = col(schema::DDK_H)?;
        let delais = col(schema::DELAIS_RETARD)?;
        let retard = col(schema::RETARD)?;
        let avant_13h = col(schema::LIVRE_AVANT_13H)?;

        for row in 0..n_rows {
            orders.push(OrderRecord {
                reference: string_at(ot, row),
                order_date: timestamp_at(date_ot, row),
                departure_date: timestamp_at(date_depart, row),
                arrival_date: timestamp_at(date_arrivee, row),
                promised_date: timestamp_at(date_prevue, row),
                last_event_date: timestamp_at(date_evnt, row),
                pickup_agency: string_at(agence_enl, row),
                delivery_agency: string_at(agence_liv, row),
                product: string_at(produit, row),
                priority: string_at(priorite, row),
                pickup_country: string_at(pays_enl, row),
                delivery_country: string_at(pays_liv, row),
                pickup_region: string_at(region_enl, row),
                delivery_region: string_at(region_liv, row),
                pickup_department: string_at(dept_enl, row),
                delivery_department: string_at(dept_liv, row),
                package_count: u64_at(nb_colis, row),
                declared_weight: f64_at(poids, row),
                delivery_time: duration_at(dl_h, row),
                processing_time: duration_at(dt_h, row),
                last_mile_time: duration_at(ddk_h, row),
                delay: duration_at(delais, row),
                late: bool_at(retard, row),
                before_cutoff: bool_at(avant_13h, row),
            });
        }
    }

    Ok(OrderDataset::from_orders(orders))
}

// -- Parquet / Arrow cell extraction --

fn column<'a>(
    batch: &'a arrow::record_batch::RecordBatch,
    name: &str,
) -> Result<&'a ArrayRef, DataError> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| DataError::MissingColumn(name.to_string()))?;
    Ok(batch.column(idx))
}

fn string_at(col: &ArrayRef, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Utf8 => col
            .as_any()
            .downcast_ref::<StringArray>()
            .and_then(|a| non_empty(a.value(row))),
        DataType::LargeUtf8 => non_empty(col.as_string::<i64>().value(row)),
        // Integer order references are common in older extracts.
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .map(|a| a.value(row).to_string()),
        DataType::Int32 => col
            .as_any()
            .downcast_ref::<Int32Array>()
            .map(|a| a.value(row).to_string()),
        _ => None,
    }
}

fn timestamp_at(col: &ArrayRef, row: usize) -> Option<NaiveDateTime> {
    if col.is_null(row) {
        return None;
    }
    let utc = match col.data_type() {
        DataType::Timestamp(TimeUnit::Second, _) => {
            let a = col.as_any().downcast_ref::<TimestampSecondArray>()?;
            DateTime::from_timestamp(a.value(row), 0)
        }
        DataType::Timestamp(TimeUnit::Millisecond, _) => {
            let a = col.as_any().downcast_ref::<TimestampMillisecondArray>()?;
            DateTime::from_timestamp_millis(a.value(row))
        }
        DataType::Timestamp(TimeUnit::Microsecond, _) => {
            let a = col.as_any().downcast_ref::<TimestampMicrosecondArray>()?;
            DateTime::from_timestamp_micros(a.value(row))
        }
        DataType::Timestamp(TimeUnit::Nanosecond, _) => {
            let a = col.as_any().downcast_ref::<TimestampNanosecondArray>()?;
            Some(DateTime::from_timestamp_nanos(a.value(row)))
        }
        DataType::Date32 => {
            let a = col.as_any().downcast_ref::<Date32Array>()?;
            DateTime::from_timestamp(i64::from(a.value(row)) * 86_400, 0)
        }
        DataType::Date64 => {
            let a = col.as_any().downcast_ref::<Date64Array>()?;
            DateTime::from_timestamp_millis(a.value(row))
        }
        // Text timestamps: coerce, mapping parse failures to null.
        DataType::Utf8 => {
            let a = col.as_any().downcast_ref::<StringArray>()?;
            return parse_timestamp(a.value(row));
        }
        _ => None,
    };
    utc.map(|dt| dt.naive_utc())
}

fn duration_at(col: &ArrayRef, row: usize) -> Option<TimeDelta> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Duration(TimeUnit::Second) => {
            let a = col.as_any().downcast_ref::<DurationSecondArray>()?;
            Some(TimeDelta::seconds(a.value(row)))
        }
        DataType::Duration(TimeUnit::Millisecond) => {
            let a = col.as_any().downcast_ref::<DurationMillisecondArray>()?;
            Some(TimeDelta::milliseconds(a.value(row)))
        }
        DataType::Duration(TimeUnit::Microsecond) => {
            let a = col.as_any().downcast_ref::<DurationMicrosecondArray>()?;
            Some(TimeDelta::microseconds(a.value(row)))
        }
        DataType::Duration(TimeUnit::Nanosecond) => {
            let a = col.as_any().downcast_ref::<DurationNanosecondArray>()?;
            Some(TimeDelta::nanoseconds(a.value(row)))
        }
        // Raw INT64 with the arrow type metadata stripped: pandas stores
        // timedelta64 in nanoseconds.
        DataType::Int64 => {
            let a = col.as_any().downcast_ref::<Int64Array>()?;
            Some(TimeDelta::nanoseconds(a.value(row)))
        }
        _ => None,
    }
}

fn u64_at(col: &ArrayRef, row: usize) -> Option<u64> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Int32 => {
            let a = col.as_any().downcast_ref::<Int32Array>()?;
            u64::try_from(a.value(row)).ok()
        }
        DataType::Int64 => {
            let a = col.as_any().downcast_ref::<Int64Array>()?;
            u64::try_from(a.value(row)).ok()
        }
        DataType::Float32 => {
            let a = col.as_any().downcast_ref::<Float32Array>()?;
            let v = a.value(row);
            (v.is_finite() && v >= 0.0).then(|| v as u64)
        }
        DataType::Float64 => {
            let a = col.as_any().downcast_ref::<Float64Array>()?;
            let v = a.value(row);
            (v.is_finite() && v >= 0.0).then(|| v as u64)
        }
        _ => None,
    }
}

fn f64_at(col: &ArrayRef, row: usize) -> Option<f64> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Float64 => {
            let a = col.as_any().downcast_ref::<Float64Array>()?;
            Some(a.value(row))
        }
        DataType::Float32 => {
            let a = col.as_any().downcast_ref::<Float32Array>()?;
            Some(f64::from(a.value(row)))
        }
        DataType::Int32 => {
            let a = col.as_any().downcast_ref::<Int32Array>()?;
            Some(f64::from(a.value(row)))
        }
        DataType::Int64 => {
            let a = col.as_any().downcast_ref::<Int64Array>()?;
            Some(a.value(row) as f64)
        }
        _ => None,
    }
}

fn bool_at(col: &ArrayRef, row: usize) -> Option<bool> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Boolean => {
            let a = col.as_any().downcast_ref::<BooleanArray>()?;
            Some(a.value(row))
        }
        DataType::Int32 => {
            let a = col.as_any().downcast_ref::<Int32Array>()?;
            Some(a.value(row) != 0)
        }
        DataType::Int64 => {
            let a = col.as_any().downcast_ref::<Int64Array>()?;
            Some(a.value(row) != 0)
        }
        DataType::Float64 => {
            let a = col.as_any().downcast_ref::<Float64Array>()?;
            Some(a.value(row) != 0.0)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::schema;
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{
        BooleanArray, DurationSecondArray, Float64Array, Int64Array, StringArray,
        TimestampMillisecondArray,
    };
    use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    const CSV_HEADER: &str = "OT,DATE_OT,DATE_DEPART,DATE_ARRIVEE,DATE_LIVRAISON_PREVUE,DATE_DERNIER_EVNT,AGENCE_ENL,AGENCE_LIV,PRODUIT,PRIORITE,PAYS_ENL,PAYS_LIV,REGION_ENL,REGION_LIV,DEPT_ENL,DEPT_LIV,NB_COLIS,POIDS_DECLARE,DL_H,DT_H,DDK_H,DELAIS_RETARD,RETARD,LIVRE_AVANT_13H";

    fn write_csv(rows: &[&str]) -> tempfile::TempPath {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "{CSV_HEADER}").unwrap();
        for row in rows {
            writeln!(file, "{row}").unwrap();
        }
        file.into_temp_path()
    }

    #[test]
    fn csv_happy_path() {
        let path = write_csv(&[
            "OT-1,2024-01-01 06:00:00,2024-01-01 08:00:00,2024-01-02 10:00:00,2024-01-02 12:00:00,2024-01-02 10:30:00,LYON,PARIS,EXPRESS,URGENT,FR,FR,ARA,IDF,69,75,3,120.5,93600,7200,3600,-1800,0,1",
            "OT-2,2024-01-02 06:00:00,2024-01-02 08:00:00,,,2024-01-03 09:00:00,NANTES,PARIS,STANDARD,STANDARD,FR,FR,PDL,IDF,44,75,1,40.0,86400,3600,1800,600,1,0",
        ]);

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);

        let first = &ds.orders[0];
        assert_eq!(first.reference.as_deref(), Some("OT-1"));
        assert_eq!(first.pickup_agency.as_deref(), Some("LYON"));
        assert_eq!(first.package_count, Some(3));
        assert_eq!(first.declared_weight, Some(120.5));
        assert_eq!(first.delivery_time, Some(TimeDelta::seconds(93_600)));
        assert_eq!(first.delay, Some(TimeDelta::seconds(-1_800)));
        assert_eq!(first.late, Some(false));
        assert_eq!(first.before_cutoff, Some(true));

        let second = &ds.orders[1];
        assert_eq!(second.arrival_date, None);
        assert_eq!(second.late, Some(true));
    }

    #[test]
    fn csv_missing_column_is_an_error() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "OT,DATE_DEPART").unwrap();
        writeln!(file, "OT-1,2024-01-01 08:00:00").unwrap();
        let path = file.into_temp_path();

        match load_file(&path) {
            Err(DataError::MissingColumn(col)) => assert_eq!(col, schema::DATE_OT),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn csv_unparseable_timestamp_becomes_null() {
        let path = write_csv(&[
            "OT-1,not-a-date,2024-01-01 08:00:00,,,2024-01-02 10:30:00,LYON,PARIS,EXPRESS,URGENT,FR,FR,ARA,IDF,69,75,3,120.5,93600,7200,3600,0,0,1",
        ]);
        let ds = load_file(&path).unwrap();
        assert_eq!(ds.orders[0].order_date, None);
        assert!(ds.orders[0].departure_date.is_some());
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        match load_file(Path::new("orders.xlsx")) {
            Err(DataError::UnsupportedFormat(ext)) => assert_eq!(ext, "xlsx"),
            other => panic!("expected UnsupportedFormat, got {other:?}"),
        }
    }

    #[test]
    fn json_happy_path_and_schema_check() {
        let record = serde_json::json!({
            "OT": "OT-9", "DATE_OT": "2024-02-01 06:00:00",
            "DATE_DEPART": "2024-02-01 08:00:00", "DATE_ARRIVEE": null,
            "DATE_LIVRAISON_PREVUE": "2024-02-02 12:00:00",
            "DATE_DERNIER_EVNT": "2024-02-02 09:00:00",
            "AGENCE_ENL": "LILLE", "AGENCE_LIV": "PARIS",
            "PRODUIT": "EXPRESS", "PRIORITE": "URGENT",
            "PAYS_ENL": "FR", "PAYS_LIV": "BE",
            "REGION_ENL": "HDF", "REGION_LIV": "BRU",
            "DEPT_ENL": "59", "DEPT_LIV": "1000",
            "NB_COLIS": 2, "POIDS_DECLARE": 18.25,
            "DL_H": 90000.0, "DT_H": 7200.0, "DDK_H": 1800.0,
            "DELAIS_RETARD": 3600.0, "RETARD": 1, "LIVRE_AVANT_13H": false
        });
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "{}", serde_json::json!([record.clone()])).unwrap();
        let path = file.into_temp_path();

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 1);
        let order = &ds.orders[0];
        assert_eq!(order.delivery_country.as_deref(), Some("BE"));
        assert_eq!(order.delay, Some(TimeDelta::seconds(3_600)));
        assert_eq!(order.late, Some(true));
        assert_eq!(order.before_cutoff, Some(false));
        assert_eq!(order.arrival_date, None);

        // Drop a mandatory column and the load must fail.
        let mut partial = record.clone();
        partial.as_object_mut().unwrap().remove("PRIORITE");
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "{}", serde_json::json!([partial])).unwrap();
        let path = file.into_temp_path();
        assert!(matches!(
            load_file(&path),
            Err(DataError::MissingColumn(col)) if col == schema::PRIORITE
        ));
    }

    #[test]
    fn parquet_round_trip() {
        let ts = |day: i64, hour: i64| -> i64 {
            // 2024-01-<day> <hour>:00:00 UTC in epoch millis
            (1_704_067_200 + (day - 1) * 86_400 + hour * 3_600) * 1_000
        };

        let utf8_col = |values: Vec<&str>| -> (DataType, ArrayRef) {
            (DataType::Utf8, Arc::new(StringArray::from(values)) as ArrayRef)
        };
        let ts_col = |values: Vec<Option<i64>>| -> (DataType, ArrayRef) {
            (
                DataType::Timestamp(TimeUnit::Millisecond, None),
                Arc::new(TimestampMillisecondArray::from(values)) as ArrayRef,
            )
        };
        let dur_col = |values: Vec<Option<i64>>| -> (DataType, ArrayRef) {
            (
                DataType::Duration(TimeUnit::Second),
                Arc::new(DurationSecondArray::from(values)) as ArrayRef,
            )
        };

        let columns: Vec<(&str, (DataType, ArrayRef))> = vec![
            (schema::OT, utf8_col(vec!["OT-1", "OT-2"])),
            (schema::DATE_OT, ts_col(vec![Some(ts(1, 6)), Some(ts(2, 6))])),
            (
                schema::DATE_DEPART,
                ts_col(vec![Some(ts(1, 8)), Some(ts(2, 8))]),
            ),
            (schema::DATE_ARRIVEE, ts_col(vec![Some(ts(2, 10)), None])),
            (
                schema::DATE_LIVRAISON_PREVUE,
                ts_col(vec![Some(ts(2, 12)), Some(ts(3, 12))]),
            ),
            (
                schema::DATE_DERNIER_EVNT,
                ts_col(vec![Some(ts(2, 11)), Some(ts(3, 9))]),
            ),
            (schema::AGENCE_ENL, utf8_col(vec!["LYON", "NANTES"])),
            (schema::AGENCE_LIV, utf8_col(vec!["PARIS", "PARIS"])),
            (schema::PRODUIT, utf8_col(vec!["EXPRESS", "STANDARD"])),
            (schema::PRIORITE, utf8_col(vec!["URGENT", "STANDARD"])),
            (schema::PAYS_ENL, utf8_col(vec!["FR", "FR"])),
            (schema::PAYS_LIV, utf8_col(vec!["FR", "FR"])),
            (schema::REGION_ENL, utf8_col(vec!["ARA", "PDL"])),
            (schema::REGION_LIV, utf8_col(vec!["IDF", "IDF"])),
            (schema::DEPT_ENL, utf8_col(vec!["69", "44"])),
            (schema::DEPT_LIV, utf8_col(vec!["75", "75"])),
            (
                schema::NB_COLIS,
                (
                    DataType::Int64,
                    Arc::new(Int64Array::from(vec![3, 1])) as ArrayRef,
                ),
            ),
            (
                schema::POIDS_DECLARE,
                (
                    DataType::Float64,
                    Arc::new(Float64Array::from(vec![Some(120.5), None])) as ArrayRef,
                ),
            ),
            (schema::DL_H, dur_col(vec![Some(93_600), Some(86_400)])),
            (schema::DT_H, dur_col(vec![Some(7_200), None])),
            (schema::DDK_H, dur_col(vec![Some(3_600), Some(1_800)])),
            (schema::DELAIS_RETARD, dur_col(vec![Some(-1_800), Some(600)])),
            (
                schema::RETARD,
                (
                    DataType::Int64,
                    Arc::new(Int64Array::from(vec![0, 1])) as ArrayRef,
                ),
            ),
            (
                schema::LIVRE_AVANT_13H,
                (
                    DataType::Boolean,
                    Arc::new(BooleanArray::from(vec![true, false])) as ArrayRef,
                ),
            ),
        ];

        let fields: Vec<Field> = columns
            .iter()
            .map(|(name, (dt, _))| Field::new(*name, dt.clone(), true))
            .collect();
        let arrays: Vec<ArrayRef> = columns.into_iter().map(|(_, (_, a))| a).collect();
        let batch = RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.parquet");
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, batch.schema(), None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);

        let first = &ds.orders[0];
        assert_eq!(first.reference.as_deref(), Some("OT-1"));
        assert_eq!(
            first.departure_date,
            parse_timestamp("2024-01-01 08:00:00")
        );
        assert_eq!(first.delivery_time, Some(TimeDelta::seconds(93_600)));
        assert_eq!(first.delay, Some(TimeDelta::seconds(-1_800)));
        assert_eq!(first.late, Some(false));
        assert_eq!(first.before_cutoff, Some(true));

        let second = &ds.orders[1];
        assert_eq!(second.arrival_date, None);
        assert_eq!(second.processing_time, None);
        assert_eq!(second.declared_weight, None);
        assert_eq!(second.late, Some(true));

        assert_eq!(
            ds.departure_bounds,
            Some((
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
            ))
        );
    }
}
