//! Compact banded coefficient storage
//!
//! Stores only the band window of each row: n rows × (p+q+1) columns, where
//! logical entry (i, j) lives at physical column `j - (i - p)` and is valid
//! only for `i-p ≤ j ≤ i+q`. The physical layout is identical to the
//! compressed coefficient block of the `.dat` format, so decoded rows drop
//! in verbatim.

use crate::storage::DenseMatrix;
use crate::traits::MatrixStorage;
use ndarray::Array2;
use std::ops::Range;

/// Banded n×n matrix stored as an n×(p+q+1) grid.
#[derive(Debug, Clone, PartialEq)]
pub struct BandedMatrix {
    /// Logical dimension
    pub n: usize,
    /// Lower bandwidth p
    pub lower: usize,
    /// Upper bandwidth q
    pub upper: usize,
    /// Band windows, one row per matrix row
    pub data: Array2<f64>,
}

impl BandedMatrix {
    /// Create a zeroed banded matrix with the given bandwidths.
    pub fn zeros(n: usize, lower: usize, upper: usize) -> Self {
        Self {
            n,
            lower,
            upper,
            data: Array2::zeros((n, lower + upper + 1)),
        }
    }

    /// Total band width p + q + 1.
    pub fn bandwidth(&self) -> usize {
        self.lower + self.upper + 1
    }

    /// Physical column holding logical (i, j), if (i, j) lies in the band.
    #[inline]
    fn physical(&self, i: usize, j: usize) -> Option<usize> {
        if i >= self.n || j >= self.n {
            return None;
        }
        // valid when i - p <= j <= i + q
        if j + self.lower < i || j > i + self.upper {
            return None;
        }
        Some(j + self.lower - i)
    }

    /// Expand to dense storage.
    ///
    /// Intended for diagnostics and small fixtures; it allocates the full
    /// n×n grid the compact layout exists to avoid.
    pub fn to_dense(&self) -> DenseMatrix {
        let mut dense = DenseMatrix::zeros(self.n);
        for i in 0..self.n {
            for k in 0..self.bandwidth() {
                if let Some(j) = (i + k).checked_sub(self.lower) {
                    if j < self.n {
                        dense.data[[i, j]] = self.data[[i, k]];
                    }
                }
            }
        }
        dense
    }
}

impl MatrixStorage for BandedMatrix {
    fn dim(&self) -> usize {
        self.n
    }

    #[inline]
    fn get(&self, i: usize, j: usize) -> f64 {
        match self.physical(i, j) {
            Some(k) => self.data[[i, k]],
            None => 0.0,
        }
    }

    #[inline]
    fn set(&mut self, i: usize, j: usize, value: f64) {
        if let Some(k) = self.physical(i, j) {
            self.data[[i, k]] = value;
        }
    }

    fn row_window(&self, i: usize) -> (Vec<f64>, Range<usize>) {
        if i >= self.n {
            return (Vec::new(), 0..0);
        }
        let start = i.saturating_sub(self.lower);
        let end = (i + self.upper + 1).min(self.n);
        let values = (start..end).map(|j| self.get(i, j)).collect();
        (values, start..end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_index_mapping() {
        let mut grid = BandedMatrix::zeros(5, 1, 2);
        grid.set(2, 1, -1.0); // j = i - p
        grid.set(2, 2, 4.0); // diagonal
        grid.set(2, 4, 0.5); // j = i + q
        assert_relative_eq!(grid.data[[2, 0]], -1.0);
        assert_relative_eq!(grid.data[[2, 1]], 4.0);
        assert_relative_eq!(grid.data[[2, 3]], 0.5);
        assert_relative_eq!(grid.get(2, 1), -1.0);
        assert_relative_eq!(grid.get(2, 2), 4.0);
        assert_relative_eq!(grid.get(2, 4), 0.5);
    }

    #[test]
    fn test_out_of_band_access_is_tolerated() {
        let mut grid = BandedMatrix::zeros(5, 1, 1);
        grid.set(0, 3, 7.0); // outside the band: no-op
        grid.set(4, 0, 7.0);
        grid.set(9, 0, 7.0); // outside the matrix
        assert_relative_eq!(grid.get(0, 3), 0.0);
        assert_relative_eq!(grid.get(4, 0), 0.0);
        assert_relative_eq!(grid.get(9, 0), 0.0);
        assert!(grid.data.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_row_window_clips_at_edges() {
        let mut grid = BandedMatrix::zeros(4, 2, 1);
        for i in 0..4 {
            grid.set(i, i, 1.0 + i as f64);
        }
        let (values, cols) = grid.row_window(0);
        assert_eq!(cols, 0..2);
        assert_eq!(values.len(), 2);
        assert_relative_eq!(values[0], 1.0);

        let (values, cols) = grid.row_window(3);
        assert_eq!(cols, 1..4);
        assert_relative_eq!(values[2], 4.0);
    }

    #[test]
    fn test_one_sided_bandwidths() {
        let mut lower_only = BandedMatrix::zeros(3, 1, 0);
        lower_only.set(1, 0, 2.0);
        lower_only.set(1, 1, 3.0);
        lower_only.set(1, 2, 9.0); // above the diagonal: no-op
        assert_relative_eq!(lower_only.get(1, 0), 2.0);
        assert_relative_eq!(lower_only.get(1, 2), 0.0);

        let mut upper_only = BandedMatrix::zeros(3, 0, 1);
        upper_only.set(1, 2, 2.0);
        upper_only.set(1, 0, 9.0); // below the diagonal: no-op
        assert_relative_eq!(upper_only.get(1, 2), 2.0);
        assert_relative_eq!(upper_only.get(1, 0), 0.0);
    }

    #[test]
    fn test_to_dense_matches_get() {
        let mut grid = BandedMatrix::zeros(4, 1, 1);
        for i in 0..4usize {
            for j in i.saturating_sub(1)..(i + 2).min(4) {
                grid.set(i, j, (i * 10 + j) as f64);
            }
        }
        let dense = grid.to_dense();
        for i in 0..4 {
            for j in 0..4 {
                assert_relative_eq!(dense.get(i, j), grid.get(i, j));
            }
        }
    }
}
