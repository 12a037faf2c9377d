//! Arithmetic binary operation benchmarks.

use super::bench_binary_op;

bench_binary_op!(bench_add, add);
bench_binary_op!(bench_div, div);
bench_binary_op!(bench_max, max);
bench_binary_op!(bench_mul, mul);
bench_binary_op!(bench_pow, pow);
bench_binary_op!(bench_sub, sub);
