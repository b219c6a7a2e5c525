use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use matmult::generate::random_matrix;
use matmult::matrix::Matrix;
use matmult::strategies::{MultiplyOpts, Strategy};

fn bench_strategies(c: &mut Criterion) {
    let n = 256;
    let mut rng = StdRng::seed_from_u64(7);
    let a = random_matrix::<f32>(n, n, 0.0, 10.0, &mut rng).unwrap();
    let b = random_matrix::<f32>(n, n, 0.0, 10.0, &mut rng).unwrap();
    let mut res = Matrix::<f32>::zeroed(n, n).unwrap();
    let opts = MultiplyOpts::default();

    let mut group = c.benchmark_group("matmult");
    for strategy in Strategy::ALL {
        group.bench_function(BenchmarkId::from_parameter(strategy.label()), |bench| {
            bench.iter(|| strategy.execute(&a, &b, &mut res, &opts).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_strategies);
criterion_main!(benches);
