use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;
use swarm_arena::core::config::SimulationConfig;
use swarm_arena::scenario;

fn bench_interact(c: &mut Criterion) {
    let mut group = c.benchmark_group("interact");
    group.sample_size(20);
    group.measurement_time(Duration::from_secs(5));

    // Ticks per bench iteration (override via SWARM_BENCH_TICKS)
    let ticks: usize = std::env::var("SWARM_BENCH_TICKS")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(16);

    for &prey in &[50_usize, 200, 400] {
        group.bench_function(format!("ticks{}_prey{}", ticks, prey), |b| {
            b.iter_batched(
                || {
                    let mut config = SimulationConfig::default();
                    config.seed = Some(0xBEEF);
                    config.population.prey = prey;
                    config.population.predators = (prey / 10).max(1);
                    config.factors.population_limit = Some(prey * 2);
                    scenario::predator_prey(&config).expect("valid bench config")
                },
                |mut environment| {
                    for _ in 0..ticks {
                        environment.interact();
                    }
                    environment
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_interact);
criterion_main!(benches);
