//! Dense n×n coefficient storage

use crate::traits::MatrixStorage;
use ndarray::Array2;
use std::ops::Range;

/// Dense n×n grid of 64-bit floats with direct (i, j) indexing.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix {
    /// Matrix dimension
    pub n: usize,
    /// Entries in row-major order
    pub data: Array2<f64>,
}

impl DenseMatrix {
    /// Create an n×n zero matrix.
    pub fn zeros(n: usize) -> Self {
        Self {
            n,
            data: Array2::zeros((n, n)),
        }
    }

    /// Wrap an existing square array.
    ///
    /// # Panics
    ///
    /// Panics if the array is not square.
    pub fn from_array(data: Array2<f64>) -> Self {
        assert_eq!(
            data.nrows(),
            data.ncols(),
            "coefficient matrix must be square"
        );
        Self {
            n: data.nrows(),
            data,
        }
    }
}

impl MatrixStorage for DenseMatrix {
    fn dim(&self) -> usize {
        self.n
    }

    #[inline]
    fn get(&self, i: usize, j: usize) -> f64 {
        if i >= self.n || j >= self.n {
            return 0.0;
        }
        self.data[[i, j]]
    }

    #[inline]
    fn set(&mut self, i: usize, j: usize, value: f64) {
        if i >= self.n || j >= self.n {
            return;
        }
        self.data[[i, j]] = value;
    }

    fn row_window(&self, i: usize) -> (Vec<f64>, Range<usize>) {
        if i >= self.n {
            return (Vec::new(), 0..0);
        }
        (self.data.row(i).to_vec(), 0..self.n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_set_get_roundtrip() {
        let mut grid = DenseMatrix::zeros(3);
        grid.set(1, 2, 4.5);
        assert_relative_eq!(grid.get(1, 2), 4.5);
        assert_relative_eq!(grid.get(2, 1), 0.0);
    }

    #[test]
    fn test_out_of_range_is_tolerated() {
        let mut grid = DenseMatrix::zeros(2);
        grid.set(5, 0, 1.0);
        grid.set(0, 5, 1.0);
        assert_relative_eq!(grid.get(5, 0), 0.0);
        assert_relative_eq!(grid.get(0, 5), 0.0);
        // nothing inside the grid changed
        for i in 0..2 {
            for j in 0..2 {
                assert_relative_eq!(grid.get(i, j), 0.0);
            }
        }
    }

    #[test]
    fn test_row_window_is_full_row() {
        let mut grid = DenseMatrix::zeros(3);
        grid.set(1, 0, 1.0);
        grid.set(1, 2, 2.0);
        let (values, cols) = grid.row_window(1);
        assert_eq!(cols, 0..3);
        assert_eq!(values, vec![1.0, 0.0, 2.0]);
    }
}
