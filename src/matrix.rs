//! Labeled dense matrix for pivot and distance tables.

use serde::Serialize;
use serde_json::{Map, Number, Value};

/// A dense matrix stored in row-major order, with sorted integer labels on
/// both axes.
///
/// Used for the car count pivot (rows labeled by `id_1`, columns by `id_2`)
/// and for distance matrices (both axes labeled by location ID). Axes may
/// differ, so the matrix is not necessarily square; the "diagonal" is the
/// set of cells whose row label equals the column label.
///
/// # Examples
///
/// ```
/// use tollgrid::matrix::LabeledMatrix;
///
/// let mut m = LabeledMatrix::square(vec![1, 2], 0.0);
/// m.set(1, 2, 5.0);
/// assert_eq!(m.get(1, 2), Some(5.0));
/// assert_eq!(m.get(2, 1), Some(0.0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledMatrix {
    row_labels: Vec<i64>,
    col_labels: Vec<i64>,
    data: Vec<f64>,
}

impl LabeledMatrix {
    /// Create a matrix with the given axis labels, every cell set to `fill`.
    ///
    /// Labels are sorted and deduplicated.
    pub fn new(mut row_labels: Vec<i64>, mut col_labels: Vec<i64>, fill: f64) -> Self {
        row_labels.sort_unstable();
        row_labels.dedup();
        col_labels.sort_unstable();
        col_labels.dedup();
        let data = vec![fill; row_labels.len() * col_labels.len()];
        Self {
            row_labels,
            col_labels,
            data,
        }
    }

    /// Create a square matrix with the same labels on both axes.
    pub fn square(labels: Vec<i64>, fill: f64) -> Self {
        Self::new(labels.clone(), labels, fill)
    }

    /// Row axis labels, ascending.
    pub fn row_labels(&self) -> &[i64] {
        &self.row_labels
    }

    /// Column axis labels, ascending.
    pub fn col_labels(&self) -> &[i64] {
        &self.col_labels
    }

    /// Number of rows.
    pub fn nrows(&self) -> usize {
        self.row_labels.len()
    }

    /// Number of columns.
    pub fn ncols(&self) -> usize {
        self.col_labels.len()
    }

    /// Position of a row label, if present.
    pub fn row_index(&self, label: i64) -> Option<usize> {
        self.row_labels.binary_search(&label).ok()
    }

    /// Position of a column label, if present.
    pub fn col_index(&self, label: i64) -> Option<usize> {
        self.col_labels.binary_search(&label).ok()
    }

    /// Cell value by axis positions.
    ///
    /// # Panics
    ///
    /// Panics if either position is out of bounds.
    pub fn at(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.col_labels.len() + col]
    }

    /// Set a cell by axis positions.
    pub fn set_at(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.col_labels.len() + col] = value;
    }

    /// Cell value by axis labels, `None` when a label is absent.
    pub fn get(&self, row_label: i64, col_label: i64) -> Option<f64> {
        let r = self.row_index(row_label)?;
        let c = self.col_index(col_label)?;
        Some(self.at(r, c))
    }

    /// Set a cell by axis labels. Returns `false` when a label is absent.
    pub fn set(&mut self, row_label: i64, col_label: i64, value: f64) -> bool {
        match (self.row_index(row_label), self.col_index(col_label)) {
            (Some(r), Some(c)) => {
                self.set_at(r, c, value);
                true
            }
            _ => false,
        }
    }

    /// Apply `f` to every cell, keeping labels unchanged.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            row_labels: self.row_labels.clone(),
            col_labels: self.col_labels.clone(),
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Iterate cells as `(row_label, col_label, value)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (i64, i64, f64)> + '_ {
        self.row_labels.iter().enumerate().flat_map(move |(r, &rl)| {
            self.col_labels
                .iter()
                .enumerate()
                .map(move |(c, &cl)| (rl, cl, self.at(r, c)))
        })
    }

    /// `true` if both axes carry the same labels.
    pub fn is_square(&self) -> bool {
        self.row_labels == self.col_labels
    }

    /// `true` if the matrix is square and symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        if !self.is_square() {
            return false;
        }
        let n = self.nrows();
        for i in 0..n {
            for j in (i + 1)..n {
                if (self.at(i, j) - self.at(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Nested-object JSON view: `{row_label: {col_label: value}}`.
    pub fn to_json(&self) -> Value {
        let mut rows = Map::new();
        for (r, &rl) in self.row_labels.iter().enumerate() {
            let mut cols = Map::new();
            for (c, &cl) in self.col_labels.iter().enumerate() {
                let cell = Number::from_f64(self.at(r, c))
                    .map(Value::Number)
                    .unwrap_or(Value::Null);
                cols.insert(cl.to_string(), cell);
            }
            rows.insert(rl.to_string(), Value::Object(cols));
        }
        Value::Object(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_sorted_and_deduped() {
        let m = LabeledMatrix::new(vec![3, 1, 2, 1], vec![2, 2, 1], 0.0);
        assert_eq!(m.row_labels(), &[1, 2, 3]);
        assert_eq!(m.col_labels(), &[1, 2]);
        assert_eq!(m.nrows(), 3);
        assert_eq!(m.ncols(), 2);
    }

    #[test]
    fn test_set_get_by_label() {
        let mut m = LabeledMatrix::square(vec![10, 20], 0.0);
        assert!(m.set(10, 20, 42.0));
        assert_eq!(m.get(10, 20), Some(42.0));
        assert_eq!(m.get(20, 10), Some(0.0));
        assert!(!m.set(10, 30, 1.0));
        assert_eq!(m.get(10, 30), None);
    }

    #[test]
    fn test_map_keeps_labels() {
        let mut m = LabeledMatrix::square(vec![1, 2], 1.0);
        m.set(1, 2, 3.0);
        let doubled = m.map(|v| v * 2.0);
        assert_eq!(doubled.row_labels(), m.row_labels());
        assert_eq!(doubled.get(1, 2), Some(6.0));
        assert_eq!(doubled.get(1, 1), Some(2.0));
    }

    #[test]
    fn test_symmetric() {
        let mut m = LabeledMatrix::square(vec![1, 2], 0.0);
        m.set(1, 2, 5.0);
        m.set(2, 1, 5.0);
        assert!(m.is_symmetric(1e-10));
        m.set(2, 1, 6.0);
        assert!(!m.is_symmetric(1e-10));
    }

    #[test]
    fn test_non_square_never_symmetric() {
        let m = LabeledMatrix::new(vec![1, 2], vec![1, 2, 3], 0.0);
        assert!(!m.is_square());
        assert!(!m.is_symmetric(1e-10));
    }

    #[test]
    fn test_cells_row_major() {
        let mut m = LabeledMatrix::new(vec![1, 2], vec![5, 6], 0.0);
        m.set(1, 6, 9.0);
        let cells: Vec<_> = m.cells().collect();
        assert_eq!(
            cells,
            vec![(1, 5, 0.0), (1, 6, 9.0), (2, 5, 0.0), (2, 6, 0.0)]
        );
    }

    #[test]
    fn test_to_json_nested() {
        let mut m = LabeledMatrix::square(vec![1, 2], 0.0);
        m.set(1, 2, 5.0);
        let json = m.to_json();
        assert_eq!(json["1"]["2"], 5.0);
        assert_eq!(json["2"]["2"], 0.0);
    }
}
