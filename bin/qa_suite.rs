//! QA suite for banded-solvers
//!
//! Round-trips generated systems through the binary writer and decoder,
//! solves them with every variant applicable to the decoded storage, and
//! validates:
//! 1. Residual norms of the computed solutions
//! 2. Agreement between the full, banded, and compact variants
//! 3. The constant-solution golden fixture (every entry 1.618)
//!
//! Usage:
//!     cargo run --bin qa-suite --release

use banded_solvers::{
    choose_variant, decode, prefer_compact, read_header, solve, write_compressed,
    write_uncompressed, BandedMatrix, Coefficients, FormatVersion, MatrixStorage, SolverVariant,
};
use ndarray::Array1;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::path::Path;

const GOLDEN_VALUE: f64 = 1.618;

#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    pub test_name: String,
    pub variant: String,
    pub n: usize,
    pub bandwidth: usize,
    pub duration_us: u128,
    pub residual: f64,
    pub max_error: f64,
    pub passed: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("Starting banded-solvers QA suite...");
    println!("===================================");

    let mut results = Vec::new();

    // 1. Golden fixtures: n=20, constant solution 1.618, both formats
    println!("\nRunning golden fixture tests (n=20, x = {GOLDEN_VALUE})...");
    let golden = generate_system(20, 2, 1, Some(GOLDEN_VALUE), 7);
    results.extend(run_case(
        "Golden (uncompressed)",
        &golden,
        FormatVersion::Uncompressed,
    )?);
    results.extend(run_case(
        "Golden (compressed)",
        &golden,
        FormatVersion::Compressed,
    )?);

    // 2. Random diagonally dominant systems across sizes and bandwidths
    println!("\nRunning randomized system tests...");
    let cases = [
        (50usize, 1usize, 1usize),
        (200, 2, 3),
        (500, 3, 0),
        (500, 0, 3),
        (1000, 5, 5),
    ];
    for (n, p, q) in cases {
        let fixture = generate_system(n, p, q, None, n as u64);
        let name = format!("Random n={n} p={p} q={q}");
        results.extend(run_case(&name, &fixture, FormatVersion::Compressed)?);
    }

    // 3. Large compact system: stays in band storage end to end
    println!("\nRunning large compact test (n=50000)...");
    let large = generate_system(50_000, 1, 1, Some(GOLDEN_VALUE), 99);
    results.extend(run_case("Large compact", &large, FormatVersion::Compressed)?);

    print_summary(&results);

    let output_path = "qa_results.json";
    save_results(&results, output_path)?;
    println!("\nFull results saved to: {}", output_path);

    let mut failed = false;
    for res in &results {
        if !res.passed {
            failed = true;
            eprintln!(
                "TEST FAILED: {} [{}] (residual: {:.2e}, max error: {:.2e})",
                res.test_name, res.variant, res.residual, res.max_error
            );
        }
    }
    if failed {
        std::process::exit(1);
    }

    println!("\nALL TESTS PASSED");
    Ok(())
}

/// A generated fixture: the band matrix, the rhs, and the expected solution
/// when one was imposed.
struct Fixture {
    matrix: BandedMatrix,
    rhs: Array1<f64>,
    expected: Option<f64>,
}

/// Build a strictly diagonally dominant banded system. With a constant
/// expected solution the rhs is derived as A·x so the solve can be checked
/// against it directly.
fn generate_system(
    n: usize,
    lower: usize,
    upper: usize,
    constant_solution: Option<f64>,
    seed: u64,
) -> Fixture {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut matrix = BandedMatrix::zeros(n, lower, upper);
    for i in 0..n {
        let start = i.saturating_sub(lower);
        let end = (i + upper + 1).min(n);
        let mut off_diagonal = 0.0;
        for j in start..end {
            if j != i {
                let value: f64 = rng.gen_range(-1.0..1.0);
                matrix.set(i, j, value);
                off_diagonal += value.abs();
            }
        }
        matrix.set(i, i, off_diagonal + rng.gen_range(1.0..2.0));
    }

    let rhs = match constant_solution {
        Some(value) => matrix.apply(&Array1::from_elem(n, value)),
        None => Array1::from_iter((0..n).map(|_| rng.gen_range(-10.0..10.0))),
    };

    Fixture {
        matrix,
        rhs,
        expected: constant_solution,
    }
}

/// Encode the fixture in the given format, decode it back, and solve with
/// every variant applicable to the decoded storage.
fn run_case(
    name: &str,
    fixture: &Fixture,
    format: FormatVersion,
) -> anyhow::Result<Vec<ValidationResult>> {
    println!("  Executing: {}...", name);

    let mut bytes = Vec::new();
    match format {
        FormatVersion::Uncompressed => {
            write_uncompressed(&mut bytes, &fixture.matrix.to_dense(), &fixture.rhs)?
        }
        FormatVersion::Compressed => write_compressed(&mut bytes, &fixture.matrix, &fixture.rhs)?,
    }

    let header = read_header(&bytes[..])?;
    let mut runs: Vec<(bool, SolverVariant)> = Vec::new();
    if prefer_compact(&header) {
        // large systems never leave compact storage
        runs.push((true, SolverVariant::Compact));
    } else {
        let (_, probe) = decode(&bytes[..], false)?;
        let chosen = choose_variant(&header, &probe.matrix);
        runs.push((false, chosen));
        if format == FormatVersion::Compressed {
            if chosen != SolverVariant::Full {
                runs.push((false, SolverVariant::Full));
            }
            runs.push((true, SolverVariant::Compact));
        }
    }

    let mut out = Vec::new();
    let mut reference: Option<Array1<f64>> = None;
    for (want_compact, variant) in runs {
        let (_, system) = decode(&bytes[..], want_compact)?;
        match solve(&system, variant) {
            Ok(solution) => {
                let residual = system.residual_norm(&solution.x);
                let max_error = max_error(&solution.x, fixture.expected, reference.as_ref());
                let passed = residual < 1e-3 && max_error < 1e-3;
                if reference.is_none() {
                    reference = Some(solution.x.clone());
                }
                out.push(ValidationResult {
                    test_name: name.to_string(),
                    variant: variant.name().to_string(),
                    n: system.dim(),
                    bandwidth: match &system.matrix {
                        Coefficients::Banded(grid) => grid.bandwidth(),
                        Coefficients::Dense(_) => fixture.matrix.bandwidth(),
                    },
                    duration_us: solution.stats.elapsed.as_micros(),
                    residual,
                    max_error,
                    passed,
                });
            }
            Err(e) => {
                eprintln!("Solver failed: {}", e);
                out.push(ValidationResult {
                    test_name: name.to_string(),
                    variant: variant.name().to_string(),
                    n: fixture.rhs.len(),
                    bandwidth: fixture.matrix.bandwidth(),
                    duration_us: 0,
                    residual: f64::INFINITY,
                    max_error: f64::INFINITY,
                    passed: false,
                });
            }
        }
    }
    Ok(out)
}

/// Largest deviation from the imposed constant solution, or from the first
/// variant's solution when none was imposed.
fn max_error(x: &Array1<f64>, expected: Option<f64>, reference: Option<&Array1<f64>>) -> f64 {
    match (expected, reference) {
        (Some(value), _) => x.iter().map(|xi| (xi - value).abs()).fold(0.0, f64::max),
        (None, Some(reference)) => x
            .iter()
            .zip(reference.iter())
            .map(|(xi, ri)| (xi - ri).abs())
            .fold(0.0, f64::max),
        (None, None) => 0.0,
    }
}

fn print_summary(results: &[ValidationResult]) {
    println!("\nQA Summary:");
    println!(
        "{:<24} {:>8} {:>8} {:>6} {:>12} {:>12} {:>12} {:>6}",
        "Test", "Variant", "n", "Band", "Time (us)", "Residual", "Max error", "Status"
    );
    println!("{:-<96}", "");
    for res in results {
        let status = if res.passed { "PASS" } else { "FAIL" };
        println!(
            "{:<24} {:>8} {:>8} {:>6} {:>12} {:>12.2e} {:>12.2e} {:>6}",
            res.test_name,
            res.variant,
            res.n,
            res.bandwidth,
            res.duration_us,
            res.residual,
            res.max_error,
            status
        );
    }
}

fn save_results(results: &[ValidationResult], path: impl AsRef<Path>) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(results)?;
    std::fs::write(path, json)?;
    Ok(())
}
