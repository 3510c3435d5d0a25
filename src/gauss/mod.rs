//! Gaussian elimination without pivoting
//!
//! Three solving strategies over one elimination/back-substitution core:
//! - [`SolverVariant::Full`]: dense storage, full loop ranges
//! - [`SolverVariant::Banded`]: dense storage, band-limited loop ranges
//! - [`SolverVariant::Compact`]: compact banded storage, band-limited ranges
//!
//! Inputs are assumed strictly diagonally dominant; a pivot falling below
//! the tolerance aborts the solve with no reordering or fallback.

mod engine;
mod variant;

pub use engine::{solve, solve_with, SolveError, SolveOptions, PIVOT_TOLERANCE};
pub use variant::{choose_variant, prefer_compact, SolverVariant, COMPACT_STORAGE_THRESHOLD};
