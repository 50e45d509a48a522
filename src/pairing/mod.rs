//! The pairing engine. There are three ways of computing $e(P, Q)$ here, all of which share the
//! final exponentiation:
//!
//! * the optimal ate Miller loop over projective coordinates on the twist, batched over many
//!   pairs so that the squaring of the accumulator is shared (`miller.rs`),
//! * a Miller loop for a fixed $Q$, whose lines have been computed once in affine form with
//!   a single batched inversion per run of doublings (`precompute.rs`),
//! * the cubical pairing, an x-only ladder on the Kummer line which computes $e(P, Q)^2$
//!   (`cubical.rs`).
//!
//! All of the engine functions are methods on [`CurveParameters`], which carries the loop
//! counter and the curve constants. The free functions at the bottom of this file use the
//! process-wide BLS12-377 instance.
mod cubical;
mod final_exp;
mod lines;
mod miller;
mod precompute;

pub use cubical::CubicalPrecompute;
pub use lines::LineEvaluationAff;
pub use precompute::PrecomputedLines;

use crate::curve::CurveParameters;
use crate::fields::fp12::Fp12;
use crate::groups::g1::G1Affine;
use crate::groups::g2::G2Affine;
use crate::groups::gt::Gt;
use num_traits::One;
use std::ops::{Add, AddAssign};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairingError {
    /// the two input slices differ in length, or are both empty
    InvalidInputSize,
}

impl std::fmt::Display for PairingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PairingError::InvalidInputSize => {
                write!(f, "pairing inputs must be nonempty and of equal length")
            }
        }
    }
}

impl std::error::Error for PairingError {}

pub(crate) fn check_input_sizes(n_p: usize, n_q: usize) -> Result<(), PairingError> {
    if n_p != n_q || n_p == 0 {
        tracing::debug!(n_p, n_q, "pairing input size mismatch");
        return Err(PairingError::InvalidInputSize);
    }
    Ok(())
}

/// The output of a Miller loop, an element of $\mathbb{F}_{p^{12}}^*$ not yet raised to
/// $(p^{12}-1)/r$. Following the additive notation of `Gt`, `+` multiplies.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MillerLoopResult(pub(crate) Fp12);

impl Default for MillerLoopResult {
    fn default() -> Self {
        MillerLoopResult(Fp12::one())
    }
}

#[allow(clippy::suspicious_arithmetic_impl)]
impl<'a, 'b> Add<&'b MillerLoopResult> for &'a MillerLoopResult {
    type Output = MillerLoopResult;

    #[inline]
    fn add(self, rhs: &'b MillerLoopResult) -> MillerLoopResult {
        MillerLoopResult(self.0 * rhs.0)
    }
}
impl Add<MillerLoopResult> for MillerLoopResult {
    type Output = MillerLoopResult;

    #[inline]
    fn add(self, rhs: MillerLoopResult) -> MillerLoopResult {
        &self + &rhs
    }
}
impl AddAssign<MillerLoopResult> for MillerLoopResult {
    #[inline]
    fn add_assign(&mut self, rhs: MillerLoopResult) {
        *self = *self + rhs;
    }
}
impl<'b> AddAssign<&'b MillerLoopResult> for MillerLoopResult {
    #[inline]
    fn add_assign(&mut self, rhs: &'b MillerLoopResult) {
        *self = *self + *rhs;
    }
}

impl CurveParameters {
    /// $\prod_k e(P_k, Q_k)$
    pub fn pair(&self, p: &[G1Affine], q: &[G2Affine]) -> Result<Gt, PairingError> {
        let f = self.miller_loop(p, q)?;
        Ok(self.final_exponentiation(&f, &[]))
    }
    /// whether $\prod_k e(P_k, Q_k) = 1$
    pub fn pairing_check(&self, p: &[G1Affine], q: &[G2Affine]) -> Result<bool, PairingError> {
        Ok(self.pair(p, q)?.is_identity())
    }
    pub fn pair_fixed_q(
        &self,
        p: &[G1Affine],
        lines: &[PrecomputedLines],
    ) -> Result<Gt, PairingError> {
        let f = self.miller_loop_fixed_q(p, lines)?;
        Ok(self.final_exponentiation(&f, &[]))
    }
    pub fn pairing_check_fixed_q(
        &self,
        p: &[G1Affine],
        lines: &[PrecomputedLines],
    ) -> Result<bool, PairingError> {
        Ok(self.pair_fixed_q(p, lines)?.is_identity())
    }
}

/// Computes the product of pairings $\prod_k e(P_k, Q_k)$ on BLS12-377.
/// ```
/// use ate::*;
/// let g1 = G1Affine::generator();
/// let g2 = G2Affine::generator();
/// let e = pair(&[g1], &[g2]).expect("equal lengths");
/// assert_eq!(e, Gt::generator());
/// assert!(pairing_check(&[g1, -g1], &[g2, g2]).expect("equal lengths"));
/// ```
pub fn pair(p: &[G1Affine], q: &[G2Affine]) -> Result<Gt, PairingError> {
    CurveParameters::bls12_377().pair(p, q)
}
pub fn pairing_check(p: &[G1Affine], q: &[G2Affine]) -> Result<bool, PairingError> {
    CurveParameters::bls12_377().pairing_check(p, q)
}
pub fn miller_loop(p: &[G1Affine], q: &[G2Affine]) -> Result<MillerLoopResult, PairingError> {
    CurveParameters::bls12_377().miller_loop(p, q)
}
pub fn final_exponentiation(z: &MillerLoopResult, extra: &[MillerLoopResult]) -> Gt {
    CurveParameters::bls12_377().final_exponentiation(z, extra)
}
pub fn precompute_lines(q: &G2Affine) -> PrecomputedLines {
    CurveParameters::bls12_377().precompute_lines(q)
}
pub fn miller_loop_fixed_q(
    p: &[G1Affine],
    lines: &[PrecomputedLines],
) -> Result<MillerLoopResult, PairingError> {
    CurveParameters::bls12_377().miller_loop_fixed_q(p, lines)
}
pub fn pair_fixed_q(p: &[G1Affine], lines: &[PrecomputedLines]) -> Result<Gt, PairingError> {
    CurveParameters::bls12_377().pair_fixed_q(p, lines)
}
pub fn pairing_check_fixed_q(
    p: &[G1Affine],
    lines: &[PrecomputedLines],
) -> Result<bool, PairingError> {
    CurveParameters::bls12_377().pairing_check_fixed_q(p, lines)
}
/// Computes $\prod_k e(P_k, Q_k)^2$ with the cubical ladder. Squaring is harmless for
/// checking a product of pairings against one, which is what this is for.
pub fn pair_cubical(p: &[G1Affine], q: &[G2Affine]) -> Result<Gt, PairingError> {
    CurveParameters::bls12_377().pair_cubical(p, q)
}
pub fn pair_cubical_check(p: &[G1Affine], q: &[G2Affine]) -> Result<bool, PairingError> {
    CurveParameters::bls12_377().pair_cubical_check(p, q)
}
pub fn precompute_cubical(q: &G2Affine) -> CubicalPrecompute {
    CurveParameters::bls12_377().precompute_cubical(q)
}
pub fn miller_loop_cubical_fixed_q(
    p: &[G1Affine],
    pre: &CubicalPrecompute,
) -> Result<MillerLoopResult, PairingError> {
    CurveParameters::bls12_377().miller_loop_cubical_fixed_q(p, pre)
}
pub fn pair_cubical_fixed_q(p: &[G1Affine], pre: &CubicalPrecompute) -> Result<Gt, PairingError> {
    CurveParameters::bls12_377().pair_cubical_fixed_q(p, pre)
}
