use criterion::{
    criterion_group,
    criterion_main,
    BenchmarkGroup,
    Criterion,
    SamplingMode
};
use criterion::measurement::WallTime;

use sudoku_forge::generator::Generator;

use std::time::Duration;

// Generation runtime is dominated by the number of internal restart cycles,
// which varies a lot between runs. Flat sampling with a generous measurement
// time keeps the variance manageable.

const MEASUREMENT_TIME_SECS: u64 = 30;
const SAMPLE_SIZE: usize = 20;

fn benchmark_generate(group: &mut BenchmarkGroup<'_, WallTime>, name: &str,
        block_size: usize) {
    let mut generator = Generator::new_default();
    group.bench_function(name,
        |b| b.iter(|| generator.generate(block_size).unwrap()));
}

fn generation_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    group.measurement_time(Duration::from_secs(MEASUREMENT_TIME_SECS));
    group.sampling_mode(SamplingMode::Flat);
    group.sample_size(SAMPLE_SIZE);

    benchmark_generate(&mut group, "2x2 blocks", 2);
    benchmark_generate(&mut group, "3x3 blocks", 3);

    group.finish();
}

criterion_group!(benches, generation_benchmarks);
criterion_main!(benches);
