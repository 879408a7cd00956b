//! Count pivoting, binning and threshold filters over vehicle records.

use std::collections::{BTreeMap, HashMap};

use crate::matrix::LabeledMatrix;
use crate::models::{CarBand, VehicleRecord};

/// Pivot vehicle records into a car count matrix.
///
/// Rows are labeled by the sorted unique `id_1` values, columns by the
/// sorted unique `id_2` values. Each cell holds the `car` count for that
/// pair (duplicate pairs aggregate by mean, missing pairs are 0), and cells
/// whose row label equals the column label are forced to 0.
pub fn generate_car_matrix(records: &[VehicleRecord]) -> LabeledMatrix {
    let row_labels: Vec<i64> = records.iter().map(|r| r.id_1).collect();
    let col_labels: Vec<i64> = records.iter().map(|r| r.id_2).collect();
    let mut matrix = LabeledMatrix::new(row_labels, col_labels, 0.0);

    let mut cells: HashMap<(i64, i64), (f64, usize)> = HashMap::new();
    for r in records {
        let entry = cells.entry((r.id_1, r.id_2)).or_insert((0.0, 0));
        entry.0 += r.car;
        entry.1 += 1;
    }
    for ((id_1, id_2), (sum, count)) in cells {
        matrix.set(id_1, id_2, sum / count as f64);
    }

    for label in matrix.row_labels().to_vec() {
        matrix.set(label, label, 0.0);
    }

    matrix
}

/// Count records per car band.
///
/// Bands per [`CarBand::classify`]: `car <= 15` is "low", `15 < car <= 25`
/// is "medium", `car > 25` is "high". Only bands present in the data appear;
/// the map iterates its keys in ascending alphabetical order.
pub fn get_type_count(records: &[VehicleRecord]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for r in records {
        let band = CarBand::classify(r.car).as_str().to_string();
        *counts.entry(band).or_insert(0) += 1;
    }
    counts
}

/// Row positions whose `bus` count exceeds twice the column mean, ascending.
///
/// Empty input yields an empty list.
pub fn get_bus_indexes(records: &[VehicleRecord]) -> Vec<usize> {
    if records.is_empty() {
        return Vec::new();
    }
    let mean = records.iter().map(|r| r.bus).sum::<f64>() / records.len() as f64;
    records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.bus > 2.0 * mean)
        .map(|(i, _)| i)
        .collect()
}

/// Route names whose mean `truck` count exceeds 7, ascending.
pub fn filter_routes(records: &[VehicleRecord]) -> Vec<String> {
    let mut groups: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for r in records {
        let entry = groups.entry(r.route.as_str()).or_insert((0.0, 0));
        entry.0 += r.truck;
        entry.1 += 1;
    }
    groups
        .into_iter()
        .filter(|(_, (sum, count))| sum / *count as f64 > 7.0)
        .map(|(route, _)| route.to_string())
        .collect()
}

/// Scale every cell: values above 20 by 0.75, the rest by 1.25.
///
/// Results are rounded to 1 decimal place; shape and labels are unchanged.
pub fn multiply_matrix(matrix: &LabeledMatrix) -> LabeledMatrix {
    matrix.map(|v| {
        let scaled = if v > 20.0 { v * 0.75 } else { v * 1.25 };
        (scaled * 10.0).round() / 10.0
    })
}
