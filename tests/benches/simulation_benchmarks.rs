//! # MLB K-Model Simulation Benchmarks
//!
//! Throughput of the Monte-Carlo engine at the settings the pipeline runs:
//!
//! | Benchmark | Workload |
//! |-----------|----------|
//! | `single_game` | one simulated start |
//! | `start` | one start at 2 000 / 10 000 / 20 000 games |
//! | `slate` | a 15-game slate (30 starts) at projection settings |
//! | `poisson` | outs sampling alone |

use std::sync::Arc;
use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use km_04_simulation::{
    sample_poisson, LineupOrder, MatchupTable, SimConfig, SimJob, StartSimulator, StrikeoutSimulator,
    DEFAULT_OUTS_LAMBDA, LEAGUE_K_RATE,
};
use km_telemetry::NoOpMetrics;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shared_types::{GamePk, Side};

fn random_table(rng: &mut StdRng) -> MatchupTable {
    let pitcher = rng.gen_range(0.15..0.35);
    let batters: Vec<f64> = (0..9).map(|_| rng.gen_range(0.12..0.32)).collect();
    MatchupTable::new(pitcher, &batters, LEAGUE_K_RATE).unwrap()
}

// ============================================================================
// Engine
// ============================================================================

fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("km-04-engine");
    let mut rng = StdRng::seed_from_u64(7);
    let table = random_table(&mut rng);

    for order in [LineupOrder::Random, LineupOrder::Sequential] {
        let simulator = StrikeoutSimulator::new(SimConfig {
            lineup_order: order,
            ..SimConfig::default()
        })
        .unwrap();
        group.bench_function(BenchmarkId::new("single_game", format!("{:?}", order)), |b| {
            b.iter(|| black_box(simulator.simulate_game(&table, &mut rng)))
        });
    }

    group.bench_function("poisson", |b| {
        b.iter(|| black_box(sample_poisson(&mut rng, DEFAULT_OUTS_LAMBDA)))
    });
    group.finish();
}

fn bench_start(c: &mut Criterion) {
    let mut group = c.benchmark_group("km-04-start");
    group.measurement_time(Duration::from_secs(10));
    let table = random_table(&mut StdRng::seed_from_u64(11));

    for sims in [2_000u32, 10_000, 20_000] {
        let simulator = StrikeoutSimulator::new(SimConfig::default().with_sims(sims)).unwrap();
        group.throughput(Throughput::Elements(u64::from(sims)));
        group.bench_with_input(BenchmarkId::new("start", sims), &sims, |b, _| {
            b.iter(|| black_box(simulator.simulate(&table, 42).mean()))
        });
    }
    group.finish();
}

// ============================================================================
// Slate
// ============================================================================

fn bench_slate(c: &mut Criterion) {
    let mut group = c.benchmark_group("km-04-slate");
    group.measurement_time(Duration::from_secs(15));
    group.sample_size(20);

    let simulator = StartSimulator::new(SimConfig::default(), Arc::new(NoOpMetrics)).unwrap();
    let mut rng = StdRng::seed_from_u64(3);
    let jobs: Vec<SimJob> = (0..15u64)
        .flat_map(|game| Side::BOTH.map(|side| (game, side)))
        .map(|(game, side)| SimJob {
            game_pk: GamePk(746_000 + game),
            side,
            table: random_table(&mut rng),
        })
        .collect();

    group.throughput(Throughput::Elements(jobs.len() as u64));
    group.bench_function("slate_30_starts", |b| {
        b.iter(|| black_box(simulator.simulate_starts(&jobs).len()))
    });
    group.finish();
}

criterion_group!(benches, bench_engine, bench_start, bench_slate);
criterion_main!(benches);
