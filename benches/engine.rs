use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use glyphlife::{Config, Engine, next_generation, next_generation_parallel};

fn config(width: usize, height: usize, generation_count: usize) -> Config {
    Config {
        width,
        height,
        generation_count,
        ..Config::default()
    }
}

fn bench_next_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("next_generation");
    for (width, height) in [(64, 48), (150, 100), (256, 256)] {
        let engine = Engine::with_message(config(width, height, 0), "conway was here").unwrap();
        let grid = engine.compose_final_grid();
        let id = format!("{width}x{height}");

        group.bench_with_input(BenchmarkId::new("serial", &id), &grid, |b, grid| {
            b.iter(|| next_generation(grid));
        });

        group.bench_with_input(BenchmarkId::new("parallel", &id), &grid, |b, grid| {
            b.iter(|| next_generation_parallel(grid));
        });
    }
    group.finish();
}

fn bench_generate_states(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_states");
    for generation_count in [10, 50] {
        let engine = Engine::new(config(150, 100, generation_count)).unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(generation_count),
            &engine,
            |b, engine| b.iter(|| engine.generate_states()),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_next_generation, bench_generate_states);
criterion_main!(benches);
