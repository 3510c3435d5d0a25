//! Command-line runner for `.dat` linear-system files
//!
//! Reads each file, prints its header metadata, solves it with the
//! header-driven storage and variant policy (or a forced variant), and
//! reports solve time, solution summary, and residual norm. Files are
//! processed independently: a failure is reported and the run moves on.

use banded_solvers::{
    choose_variant, decode, prefer_compact, read_header, solve, FormatVersion, LinearSystem,
    SolverVariant,
};
use clap::{Parser, ValueEnum};
use std::fs;
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(
    name = "solve-dat",
    about = "Solve banded linear systems stored in the binary .dat format"
)]
struct Cli {
    /// Input files to decode and solve
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Force a solver variant instead of the header-driven policy
    #[arg(long, value_enum)]
    variant: Option<VariantChoice>,

    /// Decode compressed input into compact band storage regardless of size
    #[arg(long)]
    compact: bool,

    /// Print the full solution vector instead of a summary
    #[arg(long)]
    full_solution: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum VariantChoice {
    Full,
    Banded,
    Compact,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let mut failures = 0usize;
    for path in &cli.files {
        println!("{:=<60}", "");
        println!("File: {}", path.display());
        if let Err(e) = run_file(path, &cli) {
            failures += 1;
            eprintln!("FAILED: {:#}", e);
        }
    }

    if failures > 0 {
        eprintln!("\n{} of {} file(s) failed", failures, cli.files.len());
        process::exit(1);
    }
}

fn run_file(path: &PathBuf, cli: &Cli) -> anyhow::Result<()> {
    let bytes = fs::read(path)?;

    let header = read_header(&bytes[..])?;
    let version_name = match header.version {
        FormatVersion::Uncompressed => "uncompressed",
        FormatVersion::Compressed => "compressed",
    };
    println!("  version:   {:#x} ({})", header.version.wire(), version_name);
    println!("  dimension: {}", header.n);
    println!(
        "  bandwidth: {} (p={}, q={})",
        header.bandwidth(),
        header.lower,
        header.upper
    );

    let want_compact = cli.compact || prefer_compact(&header);
    let (header, system) = decode(&bytes[..], want_compact)?;
    println!("  storage:   {}", system.matrix.kind());

    let variant = match cli.variant {
        None => choose_variant(&header, &system.matrix),
        Some(VariantChoice::Full) => SolverVariant::Full,
        Some(VariantChoice::Banded) => SolverVariant::Banded {
            lower: header.lower,
            upper: header.upper,
        },
        Some(VariantChoice::Compact) => SolverVariant::Compact,
    };
    println!("  variant:   {}", variant.name());

    let solution = solve(&system, variant)?;
    println!(
        "  solved in {:.6} s",
        solution.stats.elapsed.as_secs_f64()
    );

    print_solution(&system, &solution.x, cli.full_solution);
    Ok(())
}

fn print_solution(system: &LinearSystem, x: &ndarray::Array1<f64>, full: bool) {
    let n = x.len();
    if full || n <= 20 {
        for (i, value) in x.iter().enumerate() {
            println!("  x[{i}] = {value:.10}");
        }
    } else {
        let min = x.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = x.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let mean = x.sum() / n as f64;
        println!("  solution: n={n}, min={min:.6}, max={max:.6}, mean={mean:.6}");
        println!("  head: {:?}", &x.to_vec()[..5]);
        println!("  tail: {:?}", &x.to_vec()[n - 5..]);
    }

    println!("  residual norm: {:.3e}", system.residual_norm(x));
}
