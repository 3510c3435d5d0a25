//! Matrix storage representations
//!
//! Two interchangeable coefficient layouts behind the
//! [`MatrixStorage`](crate::traits::MatrixStorage) trait:
//! - [`DenseMatrix`]: full n×n grid, direct indexing
//! - [`BandedMatrix`]: n×(p+q+1) grid storing only the band window per row
//!
//! The decoder fills one of them; the elimination engine works through the
//! trait and never depends on which.

mod banded;
mod dense;

pub use banded::BandedMatrix;
pub use dense::DenseMatrix;

use crate::traits::MatrixStorage;
use ndarray::Array1;
use std::ops::Range;

/// Coefficient matrix in whichever representation the decoder produced.
#[derive(Debug, Clone)]
pub enum Coefficients {
    /// Full n×n storage
    Dense(DenseMatrix),
    /// Compact band-window storage
    Banded(BandedMatrix),
}

impl Coefficients {
    /// Short name of the representation, for logs and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Coefficients::Dense(_) => "dense",
            Coefficients::Banded(_) => "banded",
        }
    }
}

impl MatrixStorage for Coefficients {
    fn dim(&self) -> usize {
        match self {
            Coefficients::Dense(grid) => grid.dim(),
            Coefficients::Banded(grid) => grid.dim(),
        }
    }

    fn get(&self, i: usize, j: usize) -> f64 {
        match self {
            Coefficients::Dense(grid) => grid.get(i, j),
            Coefficients::Banded(grid) => grid.get(i, j),
        }
    }

    fn set(&mut self, i: usize, j: usize, value: f64) {
        match self {
            Coefficients::Dense(grid) => grid.set(i, j, value),
            Coefficients::Banded(grid) => grid.set(i, j, value),
        }
    }

    fn row_window(&self, i: usize) -> (Vec<f64>, Range<usize>) {
        match self {
            Coefficients::Dense(grid) => grid.row_window(i),
            Coefficients::Banded(grid) => grid.row_window(i),
        }
    }
}

/// A decoded linear system: coefficients plus right-hand side.
#[derive(Debug, Clone)]
pub struct LinearSystem {
    /// Coefficient matrix A
    pub matrix: Coefficients,
    /// Right-hand side b, length n
    pub rhs: Array1<f64>,
}

impl LinearSystem {
    /// System dimension n.
    pub fn dim(&self) -> usize {
        self.rhs.len()
    }

    /// Residual norm ‖A·x − b‖ for a candidate solution.
    pub fn residual_norm(&self, x: &Array1<f64>) -> f64 {
        let ax = self.matrix.apply(x);
        (&ax - &self.rhs).iter().map(|r| r * r).sum::<f64>().sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_residual_norm_of_exact_solution() {
        let mut grid = BandedMatrix::zeros(3, 1, 1);
        for i in 0..3 {
            grid.set(i, i, 2.0);
        }
        grid.set(1, 0, 1.0);
        grid.set(1, 2, 1.0);
        // x = [1, 1, 1] gives b = [2, 4, 2]
        let system = LinearSystem {
            matrix: Coefficients::Banded(grid),
            rhs: array![2.0, 4.0, 2.0],
        };
        let x = array![1.0, 1.0, 1.0];
        assert_relative_eq!(system.residual_norm(&x), 0.0, epsilon = 1e-12);
        let off = array![1.0, 2.0, 1.0];
        assert!(system.residual_norm(&off) > 1.0);
    }
}
