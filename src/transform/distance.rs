//! Distance-matrix construction and decomposition.

use log::warn;

use crate::error::{TransformError, TransformResult};
use crate::matrix::LabeledMatrix;
use crate::models::EdgeRecord;

/// Build the cumulative distance matrix over all location IDs in the edges.
///
/// Axes carry the sorted union of `id_start`/`id_end` values. Each edge sets
/// both directions, the diagonal is 0, and every still-unset cell (r, c) is
/// filled column-by-column with the running sum of column r at the moment it
/// is visited. The result is the filled matrix plus its transpose, which
/// keeps the matrix symmetric and doubles every directly-set distance.
///
/// The fill is a cumulative heuristic, not a shortest-path computation.
pub fn calculate_distance_matrix(edges: &[EdgeRecord]) -> LabeledMatrix {
    let labels: Vec<i64> = edges
        .iter()
        .flat_map(|e| [e.id_start, e.id_end])
        .collect();
    let mut matrix = LabeledMatrix::square(labels.clone(), f64::NAN);
    let n = matrix.nrows();

    for e in edges {
        if let Some(prev) = matrix.get(e.id_start, e.id_end) {
            if !prev.is_nan() && prev != e.distance {
                warn!(
                    "edge {} -> {} overwrites distance {} with {}",
                    e.id_start, e.id_end, prev, e.distance
                );
            }
        }
        matrix.set(e.id_start, e.id_end, e.distance);
        matrix.set(e.id_end, e.id_start, e.distance);
    }

    for i in 0..n {
        matrix.set_at(i, i, 0.0);
    }

    // Column-major fill: cell (r, c) takes the sum of column r as it stands,
    // so earlier fills feed into later ones.
    for c in 0..n {
        for r in 0..n {
            if matrix.at(r, c).is_nan() {
                let fill = column_sum(&matrix, r);
                matrix.set_at(r, c, fill);
            }
        }
    }

    let mut result = LabeledMatrix::square(labels, 0.0);
    for i in 0..n {
        for j in 0..n {
            result.set_at(i, j, nan_to_zero(matrix.at(i, j)) + nan_to_zero(matrix.at(j, i)));
        }
    }
    result
}

fn column_sum(matrix: &LabeledMatrix, col: usize) -> f64 {
    (0..matrix.nrows())
        .map(|r| matrix.at(r, col))
        .filter(|v| !v.is_nan())
        .sum()
}

fn nan_to_zero(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v
    }
}

/// Flatten a distance matrix back into directed edge records.
///
/// Emits one record per off-diagonal, non-missing cell in row-major order;
/// a symmetric matrix therefore yields both directions of every pair, up to
/// n * (n - 1) records.
pub fn unroll_distance_matrix(matrix: &LabeledMatrix) -> Vec<EdgeRecord> {
    matrix
        .cells()
        .filter(|&(row, col, value)| row != col && !value.is_nan())
        .map(|(row, col, value)| EdgeRecord::new(row, col, value))
        .collect()
}

/// IDs whose rows fall within 10% of the reference ID's average distance.
///
/// The average is taken over all edges starting at `reference_id`; rows of
/// the full edge list whose `distance` lies in `[0.9 * avg, 1.1 * avg]`
/// inclusive contribute their `id_start`. The result is deduplicated and
/// ascending. Errors with [`TransformError::DivisionByZero`] when no edge
/// starts at the reference ID.
pub fn find_ids_within_ten_percentage_threshold(
    edges: &[EdgeRecord],
    reference_id: i64,
) -> TransformResult<Vec<i64>> {
    let reference: Vec<f64> = edges
        .iter()
        .filter(|e| e.id_start == reference_id)
        .map(|e| e.distance)
        .collect();
    if reference.is_empty() {
        return Err(TransformError::DivisionByZero { reference_id });
    }
    let average = reference.iter().sum::<f64>() / reference.len() as f64;
    let lower = average * 0.9;
    let upper = average * 1.1;

    let mut ids: Vec<i64> = edges
        .iter()
        .filter(|e| e.distance >= lower && e.distance <= upper)
        .map(|e| e.id_start)
        .collect();
    ids.sort_unstable();
    ids.dedup();
    Ok(ids)
}
