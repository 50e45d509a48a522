use criterion::{criterion_group, criterion_main};

mod group;
use group::g1::*;
use group::g2::*;

use field::fp::*;
use field::fp12::*;
use field::fp2::*;
use field::fp6::*;

use pairing::*;

criterion_group!(
    pairing_benches,
    bench_miller_loop,
    bench_final_exponentiation,
    bench_pair,
    bench_fixed_q,
    bench_cubical
);
criterion_group!(
    g1_benches,
    bench_g1_addition,
    bench_g1_multiplication,
    bench_g1_to_affine
);
criterion_group!(
    g2_benches,
    bench_g2_addition,
    bench_g2_multiplication,
    bench_g2_subgroup_check
);
criterion_group!(
    field_benches,
    bench_fp_multiplication,
    bench_fp_inversion,
    bench_fp_new,
    bench_fp2_multiplication,
    bench_fp2_square,
    bench_fp6_multiplication,
    bench_fp12_multiplication,
    bench_fp12_square,
    bench_fp12_division
);
criterion_main!(pairing_benches, g1_benches, g2_benches, field_benches);
