//! Core trait for coefficient-matrix storage
//!
//! [`MatrixStorage`] is the seam between the decoder, the two grid
//! representations, and the elimination engine: everything goes through
//! `get`/`set`/`row_window`, so the elimination loops never know which
//! memory layout they are running on.

use ndarray::Array1;
use std::ops::Range;

/// Capability set shared by the dense and compact coefficient grids.
///
/// Indexing is deliberately tolerant: a `get` outside `[0, n)` or outside
/// the stored band reads as `0.0`, and a `set` there is a silent no-op.
/// The decoder clips out-of-range compressed entries the same way, and the
/// elimination loops rely on this to keep their bounds simple.
pub trait MatrixStorage {
    /// Logical dimension n (the grids represent n×n matrices).
    fn dim(&self) -> usize;

    /// Read entry (i, j); `0.0` for any position that is not stored.
    fn get(&self, i: usize, j: usize) -> f64;

    /// Write entry (i, j); ignored for any position that is not stored.
    fn set(&mut self, i: usize, j: usize, value: f64);

    /// The stored slice of row i: its values and the column range they
    /// cover. Band storage returns the clipped band window; dense storage
    /// degenerates to the full row.
    fn row_window(&self, i: usize) -> (Vec<f64>, Range<usize>);

    /// Matrix-vector product y = A·x over the stored entries.
    fn apply(&self, x: &Array1<f64>) -> Array1<f64> {
        let n = self.dim();
        let mut y = Array1::zeros(n);
        for i in 0..n {
            let (values, cols) = self.row_window(i);
            let mut acc = 0.0;
            for (value, j) in values.iter().zip(cols) {
                acc += value * x[j];
            }
            y[i] = acc;
        }
        y
    }
}
