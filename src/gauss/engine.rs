//! Shared elimination core
//!
//! Forward elimination followed by back substitution, no pivoting of any
//! kind. One generic loop core serves all three variants: a [`Window`]
//! supplies the visited row and column ranges, and the
//! [`MatrixStorage`] accessor hides the memory layout. The full variant is
//! the degenerate window p = q = n−1, which restores the textbook ranges.

use super::variant::SolverVariant;
use crate::stats::{Solution, SolveStats};
use crate::storage::{Coefficients, LinearSystem};
use crate::traits::MatrixStorage;
use ndarray::Array1;
use std::ops::Range;
use std::time::Instant;
use thiserror::Error;

/// Pivots with magnitude below this count as zero.
pub const PIVOT_TOLERANCE: f64 = 1e-10;

/// Errors raised by the elimination engine.
#[derive(Error, Debug)]
pub enum SolveError {
    #[error("zero pivot encountered at position {step}")]
    ZeroPivot { step: usize },
    #[error("{variant} elimination cannot run on {storage} storage")]
    Representation {
        variant: &'static str,
        storage: &'static str,
    },
    #[error("right-hand side has {got} entries, expected {expected}")]
    DimensionMismatch { expected: usize, got: usize },
    #[error("matrix is not strictly diagonally dominant at row {row}")]
    NotDiagonallyDominant { row: usize },
}

/// Knobs for a single solve.
#[derive(Debug, Clone)]
pub struct SolveOptions {
    /// Magnitude below which a pivot counts as zero
    pub pivot_tolerance: f64,
    /// Verify strict diagonal dominance before eliminating.
    ///
    /// The no-pivoting contract trusts the input to be diagonally dominant;
    /// with the check enabled, a violated contract fails up front instead of
    /// surfacing as a late zero pivot or a silently wrong answer.
    pub check_diagonal_dominance: bool,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            pivot_tolerance: PIVOT_TOLERANCE,
            check_diagonal_dominance: false,
        }
    }
}

/// Band window driving the loop bounds of the elimination core.
#[derive(Debug, Clone, Copy)]
struct Window {
    n: usize,
    lower: usize,
    upper: usize,
}

impl Window {
    fn full(n: usize) -> Self {
        Self {
            n,
            lower: n.saturating_sub(1),
            upper: n.saturating_sub(1),
        }
    }

    fn banded(n: usize, lower: usize, upper: usize) -> Self {
        Self { n, lower, upper }
    }

    /// Rows visited below pivot row k.
    fn rows_below(&self, k: usize) -> Range<usize> {
        k + 1..(k + self.lower + 1).min(self.n)
    }

    /// Columns updated in row i during elimination step k.
    fn elim_cols(&self, k: usize, i: usize) -> Range<usize> {
        k..(i + self.upper + 1).min(k + self.upper + 1).min(self.n)
    }

    /// Columns summed during back substitution for row i.
    fn back_cols(&self, i: usize) -> Range<usize> {
        i + 1..(i + self.upper + 1).min(self.n)
    }
}

fn check_dominance<S: MatrixStorage>(a: &S) -> Result<(), SolveError> {
    for i in 0..a.dim() {
        let (values, cols) = a.row_window(i);
        let mut diagonal = 0.0;
        let mut off_diagonal = 0.0;
        for (&value, j) in values.iter().zip(cols) {
            if j == i {
                diagonal = value.abs();
            } else {
                off_diagonal += value.abs();
            }
        }
        if diagonal <= off_diagonal {
            return Err(SolveError::NotDiagonallyDominant { row: i });
        }
    }
    Ok(())
}

fn forward_eliminate<S: MatrixStorage>(
    a: &mut S,
    b: &mut Array1<f64>,
    window: &Window,
    tolerance: f64,
) -> Result<(), SolveError> {
    for k in 0..window.n.saturating_sub(1) {
        let pivot = a.get(k, k);
        if pivot.abs() < tolerance {
            return Err(SolveError::ZeroPivot { step: k });
        }
        for i in window.rows_below(k) {
            let factor = a.get(i, k) / pivot;
            for j in window.elim_cols(k, i) {
                let updated = a.get(i, j) - factor * a.get(k, j);
                a.set(i, j, updated);
            }
            b[i] -= factor * b[k];
        }
    }
    Ok(())
}

fn back_substitute<S: MatrixStorage>(
    a: &S,
    b: &Array1<f64>,
    window: &Window,
    tolerance: f64,
) -> Result<Array1<f64>, SolveError> {
    let mut x = Array1::zeros(window.n);
    for i in (0..window.n).rev() {
        let pivot = a.get(i, i);
        if pivot.abs() < tolerance {
            return Err(SolveError::ZeroPivot { step: i });
        }
        let mut sum = 0.0;
        for j in window.back_cols(i) {
            sum += a.get(i, j) * x[j];
        }
        x[i] = (b[i] - sum) / pivot;
    }
    Ok(x)
}

fn run<S: MatrixStorage>(
    mut a: S,
    rhs: &Array1<f64>,
    window: Window,
    options: &SolveOptions,
) -> Result<Array1<f64>, SolveError> {
    if options.check_diagonal_dominance {
        check_dominance(&a)?;
    }
    let mut b = rhs.clone();
    forward_eliminate(&mut a, &mut b, &window, options.pivot_tolerance)?;
    back_substitute(&a, &b, &window, options.pivot_tolerance)
}

/// Solve the system with the given variant and options.
///
/// The engine eliminates a private copy of the coefficients and rhs; the
/// caller's `system` is never mutated. Invoking a variant against the wrong
/// representation fails with [`SolveError::Representation`].
pub fn solve_with(
    system: &LinearSystem,
    variant: SolverVariant,
    options: &SolveOptions,
) -> Result<Solution, SolveError> {
    let n = system.dim();
    if system.matrix.dim() != n {
        return Err(SolveError::DimensionMismatch {
            expected: system.matrix.dim(),
            got: n,
        });
    }

    let start = Instant::now();
    let (x, bandwidths) = match (&system.matrix, variant) {
        (Coefficients::Dense(grid), SolverVariant::Full) => {
            let x = run(grid.clone(), &system.rhs, Window::full(n), options)?;
            (x, None)
        }
        (Coefficients::Dense(grid), SolverVariant::Banded { lower, upper }) => {
            let x = run(
                grid.clone(),
                &system.rhs,
                Window::banded(n, lower, upper),
                options,
            )?;
            (x, Some((lower, upper)))
        }
        (Coefficients::Banded(grid), SolverVariant::Compact) => {
            let window = Window::banded(n, grid.lower, grid.upper);
            let x = run(grid.clone(), &system.rhs, window, options)?;
            (x, Some((grid.lower, grid.upper)))
        }
        (matrix, variant) => {
            return Err(SolveError::Representation {
                variant: variant.name(),
                storage: matrix.kind(),
            });
        }
    };

    let elapsed = start.elapsed();
    log::debug!(
        "{} solve finished: n={}, {:.6}s",
        variant.name(),
        n,
        elapsed.as_secs_f64()
    );

    Ok(Solution {
        x,
        stats: SolveStats {
            elapsed,
            dimension: n,
            variant,
            lower_bandwidth: bandwidths.map(|(p, _)| p),
            upper_bandwidth: bandwidths.map(|(_, q)| q),
        },
    })
}

/// Solve with default options; see [`solve_with`].
pub fn solve(system: &LinearSystem, variant: SolverVariant) -> Result<Solution, SolveError> {
    solve_with(system, variant, &SolveOptions::default())
}
