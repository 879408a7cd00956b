//! Toll-rate derivation from distance edges.

use chrono::{Duration, NaiveDate, NaiveTime};

use crate::models::{EdgeRecord, TimedTollRecord, TollRecord};

/// Per-distance rate coefficients, one per vehicle type.
pub const MOTO_RATE: f64 = 0.8;
pub const CAR_RATE: f64 = 1.2;
pub const RV_RATE: f64 = 1.5;
pub const BUS_RATE: f64 = 2.2;
pub const TRUCK_RATE: f64 = 3.6;

/// One (day-type, time-window) slice with its discount factor.
struct TollWindow {
    start: NaiveTime,
    end: NaiveTime,
    factor: f64,
}

fn toll_windows() -> [TollWindow; 4] {
    let t = |h, m, s| NaiveTime::from_hms_opt(h, m, s).expect("window bound is a valid time");
    [
        // weekday morning
        TollWindow {
            start: t(0, 0, 0),
            end: t(10, 0, 0),
            factor: 0.8,
        },
        // weekday afternoon
        TollWindow {
            start: t(10, 0, 0),
            end: t(18, 0, 0),
            factor: 1.2,
        },
        // weekday evening
        TollWindow {
            start: t(18, 0, 0),
            end: t(23, 59, 59),
            factor: 0.8,
        },
        // weekend, all day
        TollWindow {
            start: t(0, 0, 0),
            end: t(23, 59, 59),
            factor: 0.7,
        },
    ]
}

/// Weekday name of the date `id` days after the Unix epoch.
///
/// Location identifiers are not dates; this reading is a quirk of the
/// published output format, isolated here so a corrected semantics has one
/// place to land.
fn day_name_from_id(id: i64) -> String {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).expect("epoch is a valid date");
    (epoch + Duration::days(id)).format("%A").to_string()
}

/// Extend each edge with one toll rate per vehicle type.
///
/// Every rate is `distance` times the vehicle's fixed coefficient
/// ([`MOTO_RATE`], [`CAR_RATE`], [`RV_RATE`], [`BUS_RATE`], [`TRUCK_RATE`]).
pub fn calculate_toll_rate(edges: &[EdgeRecord]) -> Vec<TollRecord> {
    edges
        .iter()
        .map(|e| TollRecord {
            id_start: e.id_start,
            id_end: e.id_end,
            distance: e.distance,
            moto: e.distance * MOTO_RATE,
            car: e.distance * CAR_RATE,
            rv: e.distance * RV_RATE,
            bus: e.distance * BUS_RATE,
            truck: e.distance * TRUCK_RATE,
        })
        .collect()
}

/// Slice each toll record into the four discount time windows.
///
/// Per input record, one output record per window — weekday morning
/// (00:00-10:00, x0.8), weekday afternoon (10:00-18:00, x1.2), weekday
/// evening (18:00-23:59:59, x0.8) and weekend all day (00:00-23:59:59,
/// x0.7) — with every vehicle rate multiplied by the window's factor.
/// `start_day`/`end_day` carry the weekday names of `id_start`/`id_end`
/// read as day offsets from the Unix epoch (see [`day_name_from_id`]'s
/// caveat on that interpretation).
pub fn calculate_time_based_toll_rates(records: &[TollRecord]) -> Vec<TimedTollRecord> {
    let windows = toll_windows();
    let mut out = Vec::with_capacity(records.len() * windows.len());

    for r in records {
        let start_day = day_name_from_id(r.id_start);
        let end_day = day_name_from_id(r.id_end);

        for w in &windows {
            out.push(TimedTollRecord {
                id_start: r.id_start,
                id_end: r.id_end,
                distance: r.distance,
                start_day: start_day.clone(),
                start_time: w.start,
                end_day: end_day.clone(),
                end_time: w.end,
                moto: r.moto * w.factor,
                car: r.car * w.factor,
                rv: r.rv * w.factor,
                bus: r.bus * w.factor,
                truck: r.truck * w.factor,
            });
        }
    }

    out
}
