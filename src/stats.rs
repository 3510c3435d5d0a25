//! Per-solve metadata

use crate::gauss::SolverVariant;
use ndarray::Array1;
use serde::Serialize;
use std::time::Duration;

/// Timing and shape metadata attached to each solve.
#[derive(Debug, Clone, Serialize)]
pub struct SolveStats {
    /// Wall-clock duration of elimination plus back substitution
    pub elapsed: Duration,
    /// System dimension n
    pub dimension: usize,
    /// Strategy that produced the solution
    pub variant: SolverVariant,
    /// Lower bandwidth p, for the band-aware variants
    pub lower_bandwidth: Option<usize>,
    /// Upper bandwidth q, for the band-aware variants
    pub upper_bandwidth: Option<usize>,
}

/// A finished solve: the solution vector and its stats.
///
/// The solution is produced once and not mutated afterwards.
#[derive(Debug, Clone)]
pub struct Solution {
    /// Solution vector x with A·x = b
    pub x: Array1<f64>,
    /// Solve metadata
    pub stats: SolveStats,
}
