//! Weekly time-coverage validation.
//!
//! Checks, per (id, id_2) pair, whether the recorded (day, time) intervals
//! add up to a complete week: earliest start at midnight, latest end at
//! 23:59:59, and summed span of exactly 7 * 24 hours. The sum-of-spans
//! equality is a proxy; it does not detect overlapping intervals or verify
//! which weekday each second came from.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use std::collections::BTreeMap;

use crate::error::{TransformError, TransformResult};
use crate::models::SpanRecord;

/// Seconds in a gap-free week.
const FULL_WEEK_SECONDS: i64 = 7 * 24 * 3600;

/// Monday of the reference week that weekday names are mapped onto.
fn reference_monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 2).expect("reference Monday is a valid date")
}

fn day_offset(day: &str, column: &str) -> TransformResult<i64> {
    let offset = match day.trim().to_lowercase().as_str() {
        "monday" => 0,
        "tuesday" => 1,
        "wednesday" => 2,
        "thursday" => 3,
        "friday" => 4,
        "saturday" => 5,
        "sunday" => 6,
        _ => {
            return Err(TransformError::InvalidValue {
                column: column.to_string(),
                message: format!("unknown day name '{day}'"),
            })
        }
    };
    Ok(offset)
}

fn instant(day: &str, time: &str, day_column: &str, time_column: &str) -> TransformResult<NaiveDateTime> {
    let offset = day_offset(day, day_column)?;
    let time = NaiveTime::parse_from_str(time.trim(), "%H:%M:%S").map_err(|e| {
        TransformError::InvalidValue {
            column: time_column.to_string(),
            message: format!("'{time}' is not a HH:MM:SS time: {e}"),
        }
    })?;
    Ok((reference_monday() + Duration::days(offset)).and_time(time))
}

struct GroupSpan {
    earliest_start: NaiveDateTime,
    latest_end: NaiveDateTime,
    total_seconds: i64,
}

/// Validate weekly time coverage per (id, id_2) pair.
///
/// Weekday names (`Monday`..`Sunday`, case-insensitive) map onto the
/// consecutive dates of a fixed reference week; times parse as `HH:MM:SS`.
/// A pair passes when its earliest start is 00:00:00, its latest end is
/// 23:59:59, and its summed span is exactly one week. Unknown day names or
/// unparsable times are an error; an empty input yields an empty map.
pub fn time_check(records: &[SpanRecord]) -> TransformResult<BTreeMap<(i64, i64), bool>> {
    let mut groups: BTreeMap<(i64, i64), GroupSpan> = BTreeMap::new();

    for r in records {
        let start = instant(&r.start_day, &r.start_time, "startDay", "startTime")?;
        let end = instant(&r.end_day, &r.end_time, "endDay", "endTime")?;
        let span_seconds = (end - start).num_seconds();

        groups
            .entry((r.id, r.id_2))
            .and_modify(|g| {
                g.earliest_start = g.earliest_start.min(start);
                g.latest_end = g.latest_end.max(end);
                g.total_seconds += span_seconds;
            })
            .or_insert(GroupSpan {
                earliest_start: start,
                latest_end: end,
                total_seconds: span_seconds,
            });
    }

    let midnight = NaiveTime::from_hms_opt(0, 0, 0).expect("midnight is a valid time");
    let end_of_day = NaiveTime::from_hms_opt(23, 59, 59).expect("23:59:59 is a valid time");

    Ok(groups
        .into_iter()
        .map(|(key, g)| {
            let complete = g.earliest_start.time() == midnight
                && g.latest_end.time() == end_of_day
                && g.total_seconds == FULL_WEEK_SECONDS;
            (key, complete)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(
        id: i64,
        id_2: i64,
        start_day: &str,
        start_time: &str,
        end_day: &str,
        end_time: &str,
    ) -> SpanRecord {
        SpanRecord {
            id,
            id_2,
            start_day: start_day.to_string(),
            start_time: start_time.to_string(),
            end_day: end_day.to_string(),
            end_time: end_time.to_string(),
        }
    }

    /// One record per weekday, each 00:00:00..23:59:59 (86399 s), plus a
    /// 7-second Sunday record making up the seven missing leap-to-midnight
    /// seconds. Sums to exactly 7 * 24 * 3600.
    fn full_week(id: i64, id_2: i64) -> Vec<SpanRecord> {
        let days = [
            "Monday",
            "Tuesday",
            "Wednesday",
            "Thursday",
            "Friday",
            "Saturday",
            "Sunday",
        ];
        let mut records: Vec<SpanRecord> = days
            .iter()
            .map(|d| span(id, id_2, d, "00:00:00", d, "23:59:59"))
            .collect();
        records.push(span(id, id_2, "Sunday", "23:59:52", "Sunday", "23:59:59"));
        records
    }

    #[test]
    fn test_full_week_passes() {
        let result = time_check(&full_week(1, 10)).unwrap();
        assert_eq!(result.get(&(1, 10)), Some(&true));
    }

    #[test]
    fn test_missing_day_fails() {
        let mut records = full_week(1, 10);
        records.retain(|r| r.start_day != "Wednesday");
        let result = time_check(&records).unwrap();
        assert_eq!(result.get(&(1, 10)), Some(&false));
    }

    #[test]
    fn test_late_start_fails() {
        let records = vec![span(1, 10, "Monday", "06:00:00", "Sunday", "23:59:59")];
        let result = time_check(&records).unwrap();
        assert_eq!(result.get(&(1, 10)), Some(&false));
    }

    #[test]
    fn test_groups_checked_independently() {
        let mut records = full_week(1, 10);
        records.push(span(2, 20, "Monday", "00:00:00", "Monday", "12:00:00"));
        let result = time_check(&records).unwrap();
        assert_eq!(result.get(&(1, 10)), Some(&true));
        assert_eq!(result.get(&(2, 20)), Some(&false));
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_keys_sorted() {
        let records = vec![
            span(2, 1, "Monday", "00:00:00", "Monday", "01:00:00"),
            span(1, 2, "Monday", "00:00:00", "Monday", "01:00:00"),
            span(1, 1, "Monday", "00:00:00", "Monday", "01:00:00"),
        ];
        let result = time_check(&records).unwrap();
        let keys: Vec<_> = result.keys().cloned().collect();
        assert_eq!(keys, vec![(1, 1), (1, 2), (2, 1)]);
    }

    #[test]
    fn test_unknown_day_is_error() {
        let records = vec![span(1, 10, "Funday", "00:00:00", "Sunday", "23:59:59")];
        let err = time_check(&records).unwrap_err();
        assert!(matches!(err, TransformError::InvalidValue { column, .. } if column == "startDay"));
    }

    #[test]
    fn test_bad_time_is_error() {
        let records = vec![span(1, 10, "Monday", "noon", "Sunday", "23:59:59")];
        let err = time_check(&records).unwrap_err();
        assert!(matches!(err, TransformError::InvalidValue { column, .. } if column == "startTime"));
    }

    #[test]
    fn test_empty_input() {
        assert!(time_check(&[]).unwrap().is_empty());
    }
}
