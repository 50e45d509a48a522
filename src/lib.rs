//! # Ate: a pairing engine for BLS12-377
//!
//! Ate implements the optimal ate pairing $e: \mathbb{G}_1 \times \mathbb{G}_2 \to \mathbb{G}_T$
//! on the BLS12-377 curve, together with the field tower and groups it is built from. Beyond
//! the plain pairing it offers
//!
//! - batched multi-pairings, sharing one Miller loop accumulator across every pair,
//! - a fixed-argument pairing, for when $Q$ is known ahead of time and its lines can be
//!   precomputed once,
//! - the cubical pairing, which computes $e(P, Q)^2$ with an x-only ladder and is well suited
//!   to checking that a product of pairings is one.
//!
//! ## Basic Usage
//!
//! ```rust
//! use ate::*;
//!
//! let g1 = G1Affine::generator();
//! let g2 = G2Affine::generator();
//! let a = Fr::from(6);
//!
//! // e([6]g1, g2) e(-g1, [6]g2) = 1
//! let ag1 = G1Affine::from(G1Projective::from(g1) * a);
//! let ag2 = G2Affine::from(G2Projective::from(g2) * a);
//! assert!(pairing_check(&[ag1, -g1], &[g2, ag2]).expect("equal lengths"));
//!
//! // the same check with the lines of g2 computed ahead of time
//! let lines = [precompute_lines(&g2), precompute_lines(&ag2)];
//! assert!(pairing_check_fixed_q(&[ag1, -g1], &lines).expect("equal lengths"));
//!
//! // and with the cubical ladder
//! assert!(pair_cubical_check(&[ag1, -g1], &[g2, ag2]).expect("equal lengths"));
//! ```
//!
//! ## Core Components
//!
//! - [`Fp`], [`Fp2`], [`Fp6`], [`Fp12`]: the tower $\mathbb{F}_p \subset \mathbb{F}_{p^2}
//!   \subset \mathbb{F}_{p^6} \subset \mathbb{F}_{p^{12}}$
//! - [`G1Affine`], [`G2Affine`], [`Gt`]: the groups the pairing maps between
//! - [`CurveParameters`]: the seed, loop counter, and constants every engine function reads
//! - [`miller_loop`], [`final_exponentiation`], [`pair`]: the optimal ate pairing
//! - [`precompute_lines`], [`pair_fixed_q`]: the fixed-argument pairing
//! - [`pair_cubical`], [`precompute_cubical`]: the cubical pairing
//!
//! The free functions all use the process-wide BLS12-377 parameters, the methods of the same
//! name on [`CurveParameters`] take them explicitly.

mod curve;
mod fields;
mod groups;
mod pairing;

pub use crate::curve::CurveParameters;

pub use crate::fields::fp::{FieldExtensionTrait, Fp, Fr};
pub use crate::fields::fp12::Fp12;
pub use crate::fields::fp2::Fp2;
pub use crate::fields::fp6::Fp6;

pub use crate::groups::g1::{G1Affine, G1Projective};
pub use crate::groups::g2::{G2Affine, G2Projective};
pub use crate::groups::group::{GroupError, GroupTrait};
pub use crate::groups::gt::Gt;

pub use crate::pairing::{
    final_exponentiation, miller_loop, miller_loop_cubical_fixed_q, miller_loop_fixed_q, pair,
    pair_cubical, pair_cubical_check, pair_cubical_fixed_q, pair_fixed_q, pairing_check,
    pairing_check_fixed_q, precompute_cubical, precompute_lines, CubicalPrecompute,
    LineEvaluationAff, MillerLoopResult, PairingError, PrecomputedLines,
};
