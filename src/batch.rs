//! Ordered batch decode+solve
//!
//! Every input is an independent unit of work: each worker owns its decoded
//! copy, nothing is shared, and results come back in input order. A failing
//! input is recorded in place and never aborts the rest of the batch.

use crate::format::{decode, read_header, DecodeError, FileHeader};
use crate::gauss::{choose_variant, prefer_compact, solve, SolveError};
use crate::stats::Solution;
use thiserror::Error;

/// Per-input failure in a batch run.
#[derive(Error, Debug)]
pub enum BatchError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Solve(#[from] SolveError),
}

/// Decode and solve one in-memory input, with storage and variant picked by
/// the header-driven policy.
pub fn decode_and_solve(bytes: &[u8]) -> Result<(FileHeader, Solution), BatchError> {
    let header = read_header(bytes)?;
    let (header, system) = decode(bytes, prefer_compact(&header))?;
    let variant = choose_variant(&header, &system.matrix);
    let solution = solve(&system, variant)?;
    Ok((header, solution))
}

/// Decode and solve many inputs, results in input order.
#[cfg(feature = "rayon")]
pub fn solve_all<T>(inputs: &[T]) -> Vec<Result<(FileHeader, Solution), BatchError>>
where
    T: AsRef<[u8]> + Sync,
{
    use rayon::prelude::*;
    inputs
        .par_iter()
        .map(|input| decode_and_solve(input.as_ref()))
        .collect()
}

/// Sequential fallback when the `rayon` feature is off.
#[cfg(not(feature = "rayon"))]
pub fn solve_all<T>(inputs: &[T]) -> Vec<Result<(FileHeader, Solution), BatchError>>
where
    T: AsRef<[u8]>,
{
    inputs
        .iter()
        .map(|input| decode_and_solve(input.as_ref()))
        .collect()
}
