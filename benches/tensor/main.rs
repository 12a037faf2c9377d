//! Tensor benchmarks.

mod reduce;

use std::time::Duration;

use criterion::measurement::WallTime;
use criterion::{BenchmarkGroup, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng as _, SeedableRng as _};
use tensorwalk::Tensor;

const SIZES: &[(&str, &[usize])] = &[
    ("1024", &[1024]),
    ("256x256", &[256, 256]),
    ("64x64x64", &[64, 64, 64]),
];

fn configure<'a>(c: &'a mut Criterion, name: &str) -> BenchmarkGroup<'a, WallTime> {
    let mut group = c.benchmark_group(name);
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_secs(3));
    group.sample_size(50);
    group
}

fn random_vec(len: usize) -> Vec<f32> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..len).map(|_| rng.random()).collect()
}

fn random_vec_nonzero(len: usize) -> Vec<f32> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..len).map(|_| rng.random_range(0.1..1.0)).collect()
}

fn bench_constant(c: &mut Criterion) {
    let mut group = configure(c, "tensor/constant");

    for &(name, dims) in SIZES {
        let len: usize = dims.iter().product();

        group.throughput(Throughput::ElementsAndBytes {
            elements: len as u64,
            bytes: (len * size_of::<f32>()) as u64,
        });

        group.bench_with_input(BenchmarkId::from_parameter(name), dims, |bencher, dims| {
            bencher.iter(|| Tensor::<f32>::constant(dims, &[42.0]).unwrap());
        });
    }

    group.finish();
}

fn bench_copy(c: &mut Criterion) {
    let mut group = configure(c, "tensor/copy");

    for &(name, dims) in SIZES {
        let len: usize = dims.iter().product();
        let data = random_vec(len);
        let t = Tensor::<f32>::from_shape_slice(dims, &data).unwrap();

        group.throughput(Throughput::ElementsAndBytes {
            elements: len as u64,
            bytes: (len * size_of::<f32>()) as u64,
        });

        group.bench_with_input(BenchmarkId::from_parameter(name), &t, |bencher, t| {
            bencher.iter(|| t.copy().unwrap());
        });
    }

    group.finish();
}

criterion::criterion_group!(
    benches,
    bench_constant,
    bench_copy,
    // Binary arithmetic
    binary::arithmetic::bench_add,
    binary::arithmetic::bench_sub,
    binary::arithmetic::bench_mul,
    binary::arithmetic::bench_div,
    binary::arithmetic::bench_max,
    binary::arithmetic::bench_pow,
    // Binary comparison
    binary::comparison::bench_lt,
    binary::comparison::bench_gt,
    binary::comparison::bench_eq,
    // Matmul
    matmul::bench_matmul,
    matmul::bench_matmul_transpose,
    // Reduce
    reduce::bench_sum_reduce_all,
    reduce::bench_sum_reduce_axis0,
    reduce::bench_sum_reduce_axis1,
    reduce::bench_max_reduce_all,
    // Unary
    unary::arithmetic::bench_abs,
    unary::arithmetic::bench_exp,
    unary::arithmetic::bench_log,
    unary::arithmetic::bench_sin,
    unary::arithmetic::bench_sqrt,
    unary::arithmetic::bench_tanh,
    unary::rounding::bench_ceil,
    unary::rounding::bench_floor,
    unary::rounding::bench_round,
);
criterion::criterion_main!(benches);
