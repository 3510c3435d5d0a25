//! Benchmark: elimination variant scaling
//!
//! Compares the three solver variants on strictly diagonally dominant
//! banded systems as n and the bandwidth grow.
//!
//! Run with:
//!   cargo bench --bench band_scaling

use banded_solvers::{
    solve, BandedMatrix, Coefficients, LinearSystem, MatrixStorage, SolverVariant,
};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ndarray::Array1;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn dominant_system(n: usize, lower: usize, upper: usize, compact: bool) -> LinearSystem {
    let mut rng = StdRng::seed_from_u64(n as u64);
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
    let rhs = matrix.apply(&Array1::from_elem(n, 1.0));
    let matrix = if compact {
        Coefficients::Banded(matrix)
    } else {
        Coefficients::Dense(matrix.to_dense())
    };
    LinearSystem { matrix, rhs }
}

fn bench_variants(c: &mut Criterion) {
    let mut group = c.benchmark_group("variants");
    for n in [200usize, 500, 1000] {
        let (lower, upper) = (3usize, 3usize);
        let dense = dominant_system(n, lower, upper, false);
        let compact = dominant_system(n, lower, upper, true);

        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("full", n), &dense, |b, system| {
            b.iter(|| solve(system, SolverVariant::Full).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("banded", n), &dense, |b, system| {
            b.iter(|| solve(system, SolverVariant::Banded { lower, upper }).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("compact", n), &compact, |b, system| {
            b.iter(|| solve(system, SolverVariant::Compact).unwrap())
        });
    }
    group.finish();
}

fn bench_bandwidth_growth(c: &mut Criterion) {
    let mut group = c.benchmark_group("bandwidth");
    let n = 2000;
    for width in [1usize, 4, 16, 64] {
        let system = dominant_system(n, width, width, true);
        group.bench_with_input(
            BenchmarkId::from_parameter(width),
            &system,
            |b, system| b.iter(|| solve(system, SolverVariant::Compact).unwrap()),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_variants, bench_bandwidth_growth);
criterion_main!(benches);
