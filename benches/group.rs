#![allow(dead_code)]
use ate::{Fr, G1Affine, G1Projective, G2Affine, G2Projective, GroupTrait};
use criterion::{black_box, Criterion};
use crypto_bigint::rand_core::OsRng;

pub mod g1 {
    use super::*;

    pub fn bench_g1_addition(c: &mut Criterion) {
        let a = G1Projective::rand(&mut OsRng);
        let d = G1Projective::rand(&mut OsRng);
        c.bench_function("g1_addition", |b| b.iter(|| black_box(a) + black_box(d)));
    }
    pub fn bench_g1_multiplication(c: &mut Criterion) {
        let a = G1Projective::generator();
        let s = Fr::rand(&mut OsRng);
        c.bench_function("g1_multiplication", |b| b.iter(|| black_box(a) * black_box(s)));
    }
    pub fn bench_g1_to_affine(c: &mut Criterion) {
        let a = G1Projective::rand(&mut OsRng);
        c.bench_function("g1_to_affine", |b| b.iter(|| G1Affine::from(black_box(a))));
    }
}

pub mod g2 {
    use super::*;

    pub fn bench_g2_addition(c: &mut Criterion) {
        let a = G2Projective::rand(&mut OsRng);
        let d = G2Projective::rand(&mut OsRng);
        c.bench_function("g2_addition", |b| b.iter(|| black_box(a) + black_box(d)));
    }
    pub fn bench_g2_multiplication(c: &mut Criterion) {
        let a = G2Projective::generator();
        let s = Fr::rand(&mut OsRng);
        c.bench_function("g2_multiplication", |b| b.iter(|| black_box(a) * black_box(s)));
    }
    pub fn bench_g2_subgroup_check(c: &mut Criterion) {
        let a = G2Affine::generator();
        c.bench_function("g2_subgroup_check", |b| {
            b.iter(|| G2Projective::from(black_box(a)).is_torsion_free())
        });
    }
}
