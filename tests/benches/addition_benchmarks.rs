//! # Addition Benchmarks
//!
//! Compares the two parallel backends against the ripple-carry reference
//! across operand widths, with and without a full-length carry chain.

use std::time::Duration;

use aas_engine::{
    add_sequential, AdditionEngine, Backend, DigitSequence, EngineConfig, Operands, MAX_DIGIT,
    N_MAX,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const WIDTHS: [usize; 4] = [1, 10, 50, N_MAX];

fn random_operands(rng: &mut StdRng, len: usize) -> Operands {
    let mut sequence = || {
        let values: Vec<u16> = (0..len).map(|_| rng.gen_range(0..=MAX_DIGIT)).collect();
        DigitSequence::from_values(&values).expect("values are in range")
    };
    let first = sequence();
    let second = sequence();
    Operands::new(first, second).expect("equal lengths")
}

fn carry_chain_operands(len: usize) -> Operands {
    let mut one = vec![0u16; len];
    one[len - 1] = 1;
    Operands::new(
        DigitSequence::from_values(&vec![MAX_DIGIT; len]).expect("values are in range"),
        DigitSequence::from_values(&one).expect("values are in range"),
    )
    .expect("equal lengths")
}

fn engine(backend: Backend) -> AdditionEngine {
    let config = EngineConfig {
        backend,
        ..EngineConfig::default()
    };
    AdditionEngine::from_config(&config).expect("engine builds")
}

fn bench_backends(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(1000);
    let cpu = engine(Backend::Cpu);
    let threads = engine(Backend::Threads);

    for (label, chain) in [("random", false), ("carry-chain", true)] {
        let mut group = c.benchmark_group(format!("addition-{}", label));
        group.measurement_time(Duration::from_secs(5));

        for width in WIDTHS {
            let operands = if chain {
                carry_chain_operands(width)
            } else {
                random_operands(&mut rng, width)
            };
            group.throughput(Throughput::Elements(width as u64));

            group.bench_with_input(BenchmarkId::new("sequential", width), &operands, |b, ops| {
                b.iter(|| black_box(add_sequential(ops)))
            });
            group.bench_with_input(BenchmarkId::new("rayon", width), &operands, |b, ops| {
                b.iter(|| black_box(cpu.add(ops).expect("addition succeeds")))
            });
            group.bench_with_input(BenchmarkId::new("threads", width), &operands, |b, ops| {
                b.iter(|| black_box(threads.add(ops).expect("addition succeeds")))
            });
        }

        group.finish();
    }
}

criterion_group!(benches, bench_backends);
criterion_main!(benches);
