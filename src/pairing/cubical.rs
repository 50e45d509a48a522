//! The cubical pairing. Rather than accumulating line functions, this computes the pairing
//! from a Montgomery ladder on the Kummer line $E'/\pm 1$, carrying only $x$-coordinates as
//! projective pairs $(X : Z)$. Alongside the multiples $[n]Q$ and $[n+1]Q$ of the ladder, a
//! third point tracks $[n]Q + P$ for $P$ mapped into $E'(\mathbb{F}_{p^{12}})$. The
//! normalisation of the cubical arithmetic makes the final $Z$ of that third point equal to
//! the Miller function up to factors killed by the final exponentiation, squared. The
//! output is therefore $e(P, Q)^2$, which is all that is needed to test a product of pairings
//! against one. See Robert, <https://eprint.iacr.org/2024/517>.
//!
//! The ladder points over $\mathbb{F}_{p^2}$ only ever meet the third point in differential
//! additions, so those are written with one sparse operand, multiplying an element of
//! $\mathbb{F}_{p^{12}}$ by one of $\mathbb{F}_{p^2}$ rather than doing a full product.
use crate::curve::CurveParameters;
use crate::fields::fp12::Fp12;
use crate::fields::fp2::Fp2;
use crate::fields::fp6::Fp6;
use crate::fields::utils::batch_invert;
use crate::groups::g1::G1Affine;
use crate::groups::g2::G2Affine;
use crate::groups::gt::Gt;
use crate::pairing::{check_input_sizes, MillerLoopResult, PairingError};
use num_traits::Inv;

/// The $x$-coordinates of the ladder of a fixed $Q$, normalised to $Z = 1$, in the order
/// the third point consumes them.
#[derive(Clone, Debug, PartialEq)]
pub struct CubicalPrecompute {
    q: G2Affine,
    ladder: Vec<Fp2>,
}

impl CubicalPrecompute {
    pub fn len(&self) -> usize {
        self.ladder.len()
    }
    pub fn is_empty(&self) -> bool {
        self.ladder.is_empty()
    }
}

/// x-only doubling on $y^2 = x^3 + b$,
/// $(X : Z) \mapsto (X(X^3 - 8bZ^3) : Z(4X^3 + 4bZ^3))$
fn c_dbl(p: (Fp2, Fp2), b: &Fp2) -> (Fp2, Fp2) {
    let (x, z) = p;
    let x3 = x.square() * x;
    let z3 = z.square() * z;
    let b4 = *b + *b;
    let b4 = b4 + b4;
    let b4z3 = b4 * z3;
    let x3_4 = x3 + x3;
    let x3_4 = x3_4 + x3_4;
    (x * (x3 - (b4z3 + b4z3)), z * (x3_4 + b4z3))
}

/// The common tail of the differential additions,
/// $X = (t_4^2 - 4b\,t_5 t_6)/x_{P-Q}$ and $Z = t_7^2$.
fn c_diff_finish(t4: Fp12, t5: Fp12, t6: Fp12, t7: Fp12, ixd: &Fp12, b4: &Fp2) -> (Fp12, Fp12) {
    let x = (t4.square() - t5.mul_by_fp2(b4) * t6) * *ixd;
    (x, t7.square())
}

/// $x(P + Q)$ from $x(P)$, $x(Q)$ and $1/x(P - Q)$, all over $\mathbb{F}_{p^2}$.
fn c_diff(p: (Fp2, Fp2), q: (Fp2, Fp2), ixd: &Fp2, b: &Fp2) -> (Fp2, Fp2) {
    let (xp, zp) = p;
    let (xq, zq) = q;
    let t3 = xq + zq;
    let t4 = xp * xq;
    let t5 = zp * zq;
    let t6 = (xp + zp) * t3 - t4 - t5;
    let t7 = (xp - zp) * t3 - t4 + t5;
    let b4 = *b + *b;
    let b4 = b4 + b4;
    ((t4.square() - b4 * t5 * t6) * *ixd, t7.square())
}

/// `c_diff` for $P$ over $\mathbb{F}_{p^{12}}$ and $Q$ over $\mathbb{F}_{p^2}$
fn c_diff_sparse_q(p: (Fp12, Fp12), q: (Fp2, Fp2), ixd: &Fp12, b4: &Fp2) -> (Fp12, Fp12) {
    let (xp, zp) = p;
    let (xq, zq) = q;
    let t3 = xq + zq;
    let t4 = xp.mul_by_fp2(&xq);
    let t5 = zp.mul_by_fp2(&zq);
    let t6 = (xp + zp).mul_by_fp2(&t3) - t4 - t5;
    let t7 = (xp - zp).mul_by_fp2(&t3) - t4 + t5;
    c_diff_finish(t4, t5, t6, t7, ixd, b4)
}

/// `c_diff` for $P$ over $\mathbb{F}_{p^2}$ and $Q$ over $\mathbb{F}_{p^{12}}$
fn c_diff_sparse_p(p: (Fp2, Fp2), q: (Fp12, Fp12), ixd: &Fp12, b4: &Fp2) -> (Fp12, Fp12) {
    let (xp, zp) = p;
    let (xq, zq) = q;
    let t3 = xq + zq;
    let t4 = xq.mul_by_fp2(&xp);
    let t5 = zq.mul_by_fp2(&zp);
    let t6 = t3.mul_by_fp2(&(xp + zp)) - t4 - t5;
    let t7 = t3.mul_by_fp2(&(xp - zp)) - t4 + t5;
    c_diff_finish(t4, t5, t6, t7, ixd, b4)
}

/// `c_diff_sparse_q` with $Q = (a : 1)$
fn c_diff_affine_q(p: (Fp12, Fp12), a: &Fp2, ixd: &Fp12, b4: &Fp2) -> (Fp12, Fp12) {
    let (xp, zp) = p;
    let s = *a + Fp2::ONE;
    let t4 = xp.mul_by_fp2(a);
    let t5 = zp;
    let t6 = (xp + zp).mul_by_fp2(&s) - t4 - t5;
    let t7 = (xp - zp).mul_by_fp2(&s) - t4 + t5;
    c_diff_finish(t4, t5, t6, t7, ixd, b4)
}

/// `c_diff_sparse_p` with $P = (a : 1)$
fn c_diff_affine_p(a: &Fp2, q: (Fp12, Fp12), ixd: &Fp12, b4: &Fp2) -> (Fp12, Fp12) {
    let (xq, zq) = q;
    let t3 = xq + zq;
    let t4 = xq.mul_by_fp2(a);
    let t5 = zq;
    let t6 = t3.mul_by_fp2(&(*a + Fp2::ONE)) - t4 - t5;
    let t7 = t3.mul_by_fp2(&(*a - Fp2::ONE)) - t4 + t5;
    c_diff_finish(t4, t5, t6, t7, ixd, b4)
}

fn embed(a: Fp2) -> Fp12 {
    Fp12::new(&[Fp6::new(&[a, Fp2::ZERO, Fp2::ZERO]), Fp6::ZERO])
}

/// The starting state of the third point for one pair: $x(Q + P)$ as $(X : 1)$, together with
/// $x(P)$ and $x(Q - P)$, whose inverses the ladder divides by.
struct PairSetup {
    t: (Fp12, Fp12),
    x_p: Fp12,
    x_q_minus_p: Fp12,
}

impl CurveParameters {
    /// $P = (x, y)$ mapped into $E'(\mathbb{F}_{p^{12}})$ by the inverse of the D-type twist,
    /// $(x, y) \mapsto (x u^{-1} v^2, y u^{-1} v w)$.
    fn untwist(&self, p: &G1Affine) -> (Fp12, Fp12) {
        let ui = self.twist_inv();
        let x = Fp12::new(&[
            Fp6::new(&[Fp2::ZERO, Fp2::ZERO, ui.scale(p.x)]),
            Fp6::ZERO,
        ]);
        let y = Fp12::new(&[
            Fp6::ZERO,
            Fp6::new(&[Fp2::ZERO, ui.scale(p.y), Fp2::ZERO]),
        ]);
        (x, y)
    }

    /// Chord arithmetic to find $x(Q + P)$ and $x(Q - P)$ for every pair, with all the
    /// divisions batched.
    fn cubical_setup(&self, pairs: &[(G1Affine, G2Affine)]) -> Vec<PairSetup> {
        let untwisted: Vec<(Fp12, Fp12)> = pairs.iter().map(|(p, _)| self.untwist(p)).collect();
        let mut inv_dx: Vec<Fp12> = untwisted
            .iter()
            .zip(pairs)
            .map(|((xp, _), (_, q))| *xp - embed(q.x))
            .collect();
        batch_invert(&mut inv_dx);

        untwisted
            .iter()
            .zip(pairs)
            .zip(&inv_dx)
            .map(|(((xp, yp), (_, q)), idx)| {
                let qx = embed(q.x);
                let qy = embed(q.y);
                let x_sum = qx + *xp;
                let lambda = (*yp - qy) * *idx;
                let lambda_neg = -(*yp + qy) * *idx;
                PairSetup {
                    t: (lambda.square() - x_sum, Fp12::ONE),
                    x_p: *xp,
                    x_q_minus_p: lambda_neg.square() - x_sum,
                }
            })
            .collect()
    }

    /// Batch inverts $x(P)$ and $x(Q - P)$ for every pair.
    fn cubical_inverses(setup: &[PairSetup]) -> Vec<(Fp12, Fp12)> {
        let mut inv: Vec<Fp12> = setup
            .iter()
            .flat_map(|s| [s.x_p, s.x_q_minus_p])
            .collect();
        batch_invert(&mut inv);
        inv.chunks_exact(2).map(|c| (c[0], c[1])).collect()
    }

    /// $\prod_k Z$ of the third point after the ladder, the cubical counterpart of the Miller
    /// loop.
    fn miller_loop_cubical(&self, p: &[G1Affine], q: &[G2Affine]) -> Result<MillerLoopResult, PairingError> {
        check_input_sizes(p.len(), q.len())?;
        let pairs: Vec<(G1Affine, G2Affine)> = p
            .iter()
            .zip(q)
            .filter(|(a, b)| !a.is_zero() && !b.is_zero())
            .map(|(a, b)| (*a, *b))
            .collect();
        tracing::debug!(pairs = pairs.len(), "CurveParameters::pair_cubical");

        let b = self.b_twist();
        let b4 = b + b;
        let b4 = b4 + b4;
        let digits = self.loop_counter();
        let top = digits.len() - 2;

        let setup = self.cubical_setup(&pairs);
        let inverses = Self::cubical_inverses(&setup);

        let mut acc = Fp12::ONE;
        for (((_, q), s), (ix_p, ix_qmp)) in pairs.iter().zip(&setup).zip(&inverses) {
            let ix_q = q.x.inv();
            let mut r = (q.x, Fp2::ONE);
            let mut s2 = c_dbl(r, &b);
            let mut t = s.t;
            for i in (0..=top).rev() {
                let u = c_diff(s2, r, &ix_q, &b);
                if digits[i] == 0 {
                    t = c_diff_sparse_q(t, r, ix_p, &b4);
                    r = c_dbl(r, &b);
                    s2 = u;
                } else {
                    t = c_diff_sparse_p(s2, t, ix_qmp, &b4);
                    s2 = c_dbl(s2, &b);
                    r = u;
                }
            }
            acc *= t.1;
        }
        Ok(MillerLoopResult(acc))
    }

    /// $\prod_k e(P_k, Q_k)^2$, by the cubical ladder.
    pub fn pair_cubical(&self, p: &[G1Affine], q: &[G2Affine]) -> Result<Gt, PairingError> {
        let f = self.miller_loop_cubical(p, q)?;
        Ok(self.final_exponentiation(&f, &[]))
    }
    pub fn pair_cubical_check(&self, p: &[G1Affine], q: &[G2Affine]) -> Result<bool, PairingError> {
        Ok(self.pair_cubical(p, q)?.is_identity())
    }

    /// Runs the $Q$-only part of the cubical ladder once, keeping the point each step of the
    /// third point consumes: $[n]Q$ on a zero digit and $[n+1]Q$ on a one digit. The points
    /// are normalised with a single batched inversion.
    pub fn precompute_cubical(&self, q: &G2Affine) -> CubicalPrecompute {
        if q.is_zero() {
            tracing::debug!("CurveParameters::precompute_cubical: Q is the identity");
            return CubicalPrecompute {
                q: *q,
                ladder: vec![],
            };
        }
        let b = self.b_twist();
        let digits = self.loop_counter();
        let top = digits.len() - 2;

        let ix_q = q.x.inv();
        let mut r = (q.x, Fp2::ONE);
        let mut s = c_dbl(r, &b);
        let mut consumed = Vec::with_capacity(top + 1);
        for i in (0..=top).rev() {
            let u = c_diff(s, r, &ix_q, &b);
            if digits[i] == 0 {
                consumed.push(r);
                r = c_dbl(r, &b);
                s = u;
            } else {
                consumed.push(s);
                s = c_dbl(s, &b);
                r = u;
            }
        }

        let mut z_inv: Vec<Fp2> = consumed.iter().map(|(_, z)| *z).collect();
        batch_invert(&mut z_inv);
        let ladder = consumed
            .iter()
            .zip(&z_inv)
            .map(|((x, _), zi)| *x * *zi)
            .collect();
        tracing::debug!(steps = top + 1, "CurveParameters::precompute_cubical");
        CubicalPrecompute { q: *q, ladder }
    }

    /// The product over `p` of the final $Z$ of the third point, against a precomputed ladder.
    pub fn miller_loop_cubical_fixed_q(
        &self,
        p: &[G1Affine],
        pre: &CubicalPrecompute,
    ) -> Result<MillerLoopResult, PairingError> {
        check_input_sizes(p.len(), p.len())?;
        if pre.is_empty() {
            return Ok(MillerLoopResult::default());
        }
        let pairs: Vec<(G1Affine, G2Affine)> = p
            .iter()
            .filter(|a| !a.is_zero())
            .map(|a| (*a, pre.q))
            .collect();

        let b = self.b_twist();
        let b4 = b + b;
        let b4 = b4 + b4;
        let digits = self.loop_counter();
        let top = digits.len() - 2;

        let setup = self.cubical_setup(&pairs);
        let inverses = Self::cubical_inverses(&setup);

        let mut acc = Fp12::ONE;
        for (s, (ix_p, ix_qmp)) in setup.iter().zip(&inverses) {
            let mut t = s.t;
            for (i, a) in (0..=top).rev().zip(&pre.ladder) {
                t = if digits[i] == 0 {
                    c_diff_affine_q(t, a, ix_p, &b4)
                } else {
                    c_diff_affine_p(a, t, ix_qmp, &b4)
                };
            }
            acc *= t.1;
        }
        Ok(MillerLoopResult(acc))
    }

    /// $\prod_k e(P_k, Q)^2$ against a precomputed ladder.
    pub fn pair_cubical_fixed_q(
        &self,
        p: &[G1Affine],
        pre: &CubicalPrecompute,
    ) -> Result<Gt, PairingError> {
        let f = self.miller_loop_cubical_fixed_q(p, pre)?;
        Ok(self.final_exponentiation(&f, &[]))
    }
}
