//! Typed row records for the vehicle/traffic datasets.
//!
//! Tables enter the crate as dynamic rows (JSON objects keyed by column
//! header, as produced by [`crate::parser`]). Each record type here decodes
//! one such row with explicit column and type checking:
//!
//! - [`VehicleRecord`] - per-pair vehicle counts with a route name
//! - [`SpanRecord`] - a (day, time) interval for one (id, id_2) pair
//! - [`EdgeRecord`] - a distance between two location IDs
//! - [`TollRecord`] - an edge extended with per-vehicle toll rates
//! - [`TimedTollRecord`] - a toll record sliced into a discount time window
//! - [`CarBand`] - categorical band for a car count

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{TransformError, TransformResult};

// =============================================================================
// Row decoding
// =============================================================================

/// Decode one dynamic row into a typed record.
pub trait FromRow: Sized {
    /// Build the record from a row object, reporting missing columns and
    /// type mismatches.
    fn from_row(row: &Map<String, Value>) -> TransformResult<Self>;
}

/// Decode a whole table of dynamic rows into typed records.
///
/// Rows that are not JSON objects are rejected, matching how the tables come
/// out of [`crate::parser`].
///
/// # Example
/// ```
/// use tollgrid::models::{decode_rows, EdgeRecord};
/// use tollgrid::parser::csv_to_rows;
///
/// let rows = csv_to_rows("id_start,id_end,distance\n1,2,10", ',').unwrap();
/// let edges: Vec<EdgeRecord> = decode_rows(&rows).unwrap();
/// assert_eq!(edges[0].distance, 10.0);
/// ```
pub fn decode_rows<T: FromRow>(rows: &[Value]) -> TransformResult<Vec<T>> {
    rows.iter()
        .map(|row| {
            let obj = row.as_object().ok_or_else(|| TransformError::InvalidValue {
                column: "<row>".to_string(),
                message: "row is not an object".to_string(),
            })?;
            T::from_row(obj)
        })
        .collect()
}

fn get_value<'a>(row: &'a Map<String, Value>, column: &str) -> TransformResult<&'a Value> {
    row.get(column)
        .ok_or_else(|| TransformError::MissingColumn(column.to_string()))
}

/// Numeric cells arrive either as JSON numbers or as strings straight out of
/// CSV, so both are accepted.
fn get_f64(row: &Map<String, Value>, column: &str) -> TransformResult<f64> {
    let value = get_value(row, column)?;
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| TransformError::TypeMismatch {
        column: column.to_string(),
        expected: "number",
        value: value.to_string(),
    })
}

fn get_i64(row: &Map<String, Value>, column: &str) -> TransformResult<i64> {
    let value = get_value(row, column)?;
    let parsed = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| TransformError::TypeMismatch {
        column: column.to_string(),
        expected: "integer",
        value: value.to_string(),
    })
}

fn get_string(row: &Map<String, Value>, column: &str) -> TransformResult<String> {
    let value = get_value(row, column)?;
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(TransformError::TypeMismatch {
            column: column.to_string(),
            expected: "string",
            value: value.to_string(),
        }),
    }
}

// =============================================================================
// Vehicle counts
// =============================================================================

/// One row of the vehicle count dataset: counts per vehicle type for an
/// (id_1, id_2) pair, plus the route the pair belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleRecord {
    pub id_1: i64,
    pub id_2: i64,
    pub car: f64,
    pub bus: f64,
    pub truck: f64,
    pub route: String,
}

impl FromRow for VehicleRecord {
    fn from_row(row: &Map<String, Value>) -> TransformResult<Self> {
        Ok(Self {
            id_1: get_i64(row, "id_1")?,
            id_2: get_i64(row, "id_2")?,
            car: get_f64(row, "car")?,
            bus: get_f64(row, "bus")?,
            truck: get_f64(row, "truck")?,
            route: get_string(row, "route")?,
        })
    }
}

/// Categorical band for a car count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CarBand {
    /// car <= 15
    Low,
    /// 15 < car <= 25
    Medium,
    /// car > 25
    High,
}

impl CarBand {
    /// Classify a car count into its band.
    pub fn classify(car: f64) -> Self {
        if car <= 15.0 {
            CarBand::Low
        } else if car <= 25.0 {
            CarBand::Medium
        } else {
            CarBand::High
        }
    }

    /// Lowercase band label as it appears in result mappings.
    pub fn as_str(&self) -> &'static str {
        match self {
            CarBand::Low => "low",
            CarBand::Medium => "medium",
            CarBand::High => "high",
        }
    }
}

// =============================================================================
// Time spans
// =============================================================================

/// One row of the time coverage dataset: a (day, time) interval recorded for
/// an (id, id_2) pair. Day columns hold weekday names, time columns
/// `HH:MM:SS` strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpanRecord {
    pub id: i64,
    pub id_2: i64,
    #[serde(rename = "startDay")]
    pub start_day: String,
    #[serde(rename = "startTime")]
    pub start_time: String,
    #[serde(rename = "endDay")]
    pub end_day: String,
    #[serde(rename = "endTime")]
    pub end_time: String,
}

impl FromRow for SpanRecord {
    fn from_row(row: &Map<String, Value>) -> TransformResult<Self> {
        Ok(Self {
            id: get_i64(row, "id")?,
            id_2: get_i64(row, "id_2")?,
            start_day: get_string(row, "startDay")?,
            start_time: get_string(row, "startTime")?,
            end_day: get_string(row, "endDay")?,
            end_time: get_string(row, "endTime")?,
        })
    }
}

// =============================================================================
// Edges and tolls
// =============================================================================

/// A directed path between two location IDs and its distance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub id_start: i64,
    pub id_end: i64,
    pub distance: f64,
}

impl EdgeRecord {
    pub fn new(id_start: i64, id_end: i64, distance: f64) -> Self {
        Self {
            id_start,
            id_end,
            distance,
        }
    }
}

impl FromRow for EdgeRecord {
    fn from_row(row: &Map<String, Value>) -> TransformResult<Self> {
        Ok(Self {
            id_start: get_i64(row, "id_start")?,
            id_end: get_i64(row, "id_end")?,
            distance: get_f64(row, "distance")?,
        })
    }
}

/// An edge extended with one toll rate per vehicle type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TollRecord {
    pub id_start: i64,
    pub id_end: i64,
    pub distance: f64,
    pub moto: f64,
    pub car: f64,
    pub rv: f64,
    pub bus: f64,
    pub truck: f64,
}

impl FromRow for TollRecord {
    fn from_row(row: &Map<String, Value>) -> TransformResult<Self> {
        Ok(Self {
            id_start: get_i64(row, "id_start")?,
            id_end: get_i64(row, "id_end")?,
            distance: get_f64(row, "distance")?,
            moto: get_f64(row, "moto")?,
            car: get_f64(row, "car")?,
            rv: get_f64(row, "rv")?,
            bus: get_f64(row, "bus")?,
            truck: get_f64(row, "truck")?,
        })
    }
}

/// A toll record sliced into one discount time window, with the window's day
/// and time bounds attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedTollRecord {
    pub id_start: i64,
    pub id_end: i64,
    pub distance: f64,
    pub start_day: String,
    pub start_time: NaiveTime,
    pub end_day: String,
    pub end_time: NaiveTime,
    pub moto: f64,
    pub car: f64,
    pub rv: f64,
    pub bus: f64,
    pub truck: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Map<String, Value> {
        value.as_object().cloned().expect("test row is an object")
    }

    #[test]
    fn test_vehicle_record_from_row() {
        let r = VehicleRecord::from_row(&row(json!({
            "id_1": 801, "id_2": 802, "car": 12.5, "bus": 3.0,
            "truck": 7.5, "route": "A-1"
        })))
        .unwrap();
        assert_eq!(r.id_1, 801);
        assert_eq!(r.route, "A-1");
        assert_eq!(r.truck, 7.5);
    }

    #[test]
    fn test_numeric_cells_accept_strings() {
        // CSV cells arrive as strings
        let r = EdgeRecord::from_row(&row(json!({
            "id_start": "1001", "id_end": "1002", "distance": "9.7"
        })))
        .unwrap();
        assert_eq!(r.id_start, 1001);
        assert_eq!(r.distance, 9.7);
    }

    #[test]
    fn test_missing_column() {
        let err = EdgeRecord::from_row(&row(json!({
            "id_start": 1, "distance": 2.0
        })))
        .unwrap_err();
        assert!(matches!(err, TransformError::MissingColumn(c) if c == "id_end"));
    }

    #[test]
    fn test_type_mismatch() {
        let err = EdgeRecord::from_row(&row(json!({
            "id_start": 1, "id_end": 2, "distance": "far"
        })))
        .unwrap_err();
        assert!(matches!(err, TransformError::TypeMismatch { column, .. } if column == "distance"));
    }

    #[test]
    fn test_decode_rows_rejects_non_object() {
        let rows = vec![json!([1, 2, 3])];
        assert!(decode_rows::<EdgeRecord>(&rows).is_err());
    }

    #[test]
    fn test_span_record_serde_column_names() {
        let r = SpanRecord {
            id: 1,
            id_2: 2,
            start_day: "Monday".into(),
            start_time: "00:00:00".into(),
            end_day: "Sunday".into(),
            end_time: "23:59:59".into(),
        };
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["startDay"], "Monday");
        assert_eq!(v["endTime"], "23:59:59");
    }

    #[test]
    fn test_car_band_boundaries() {
        assert_eq!(CarBand::classify(15.0), CarBand::Low);
        assert_eq!(CarBand::classify(15.1), CarBand::Medium);
        assert_eq!(CarBand::classify(25.0), CarBand::Medium);
        assert_eq!(CarBand::classify(25.1), CarBand::High);
        assert_eq!(CarBand::Low.as_str(), "low");
    }
}
