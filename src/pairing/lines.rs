//! Line functions for the Miller loop. Each step moves the running point $T$ on the twist and
//! returns the line through the points involved, as coefficients over $\mathbb{F}_{p^2}$ to be
//! evaluated at a point of $\mathbb{G}_1$ later. A full line would be a very sparse element of
//! $\mathbb{F}_{p^{12}}$, so only the nonzero coefficients are kept, see the sparse products
//! in `fp12.rs`.
//!
//! The projective formulae are those of Costello, Lange, and Naehrig,
//! <https://eprint.iacr.org/2009/615.pdf>, and Aranha et al.,
//! <https://eprint.iacr.org/2010/354.pdf>, for a D-type twist $y^2 = x^3 + b'$.
use crate::curve::TWO_INV;
use crate::fields::fp::Fp;
use crate::fields::fp2::Fp2;
use crate::groups::g1::G1Affine;
use crate::groups::g2::{G2Affine, G2Projective};
use num_traits::Inv;

/// A line $r_0 y + r_1 x w + r_2 w^3$ through points of the twist, held by its three
/// coefficients.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct LineEvaluation {
    pub(crate) r0: Fp2,
    pub(crate) r1: Fp2,
    pub(crate) r2: Fp2,
}

impl LineEvaluation {
    /// The coefficients (c0, c3, c4) of the line evaluated at `p`, in the slot order of
    /// `Fp12::mul_by_034`.
    pub(crate) fn evaluate(&self, p: &G1Affine) -> [Fp2; 3] {
        [self.r0.scale(p.y), self.r1.scale(p.x), self.r2]
    }
}

/// An affine line $y = \lambda x - \mu$, stored as $(\lambda, \mu)$ where $\mu = \lambda x_T -
/// y_T$ for the point $T$ the line passes through. These are what the fixed argument
/// precomputation stores.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct LineEvaluationAff {
    pub(crate) r0: Fp2,
    pub(crate) r1: Fp2,
}

impl LineEvaluationAff {
    /// The line through a point with `slope`.
    pub(crate) fn through(slope: Fp2, x: Fp2, y: Fp2) -> Self {
        Self {
            r0: slope,
            r1: slope * x - y,
        }
    }
    /// Coefficients (c3, c4) for `Fp12::mul_by_34` of the line divided through by $y_P$,
    /// given $-x_P/y_P$ and $1/y_P$.
    pub(crate) fn evaluate(&self, x_neg_over_y: Fp, y_inv: Fp) -> [Fp2; 2] {
        [self.r0.scale(x_neg_over_y), self.r1.scale(y_inv)]
    }
}

impl G2Projective {
    /// Tangent at `self`, and `self <- 2 self`. Algorithm 26 of
    /// <https://eprint.iacr.org/2010/354.pdf>, written for the twist coefficient `b_twist`.
    pub(crate) fn double_step(&mut self, b_twist: &Fp2) -> LineEvaluation {
        let (x, y, z) = (self.x, self.y, self.z);

        let a = (x * y).scale(TWO_INV);
        let b = y.square();
        let c = z.square();
        let d = c + c + c;
        let e = *b_twist * d;
        let f = e + e + e;
        let g = (b + f).scale(TWO_INV);
        let h = (y + z).square() - (b + c);
        let i = e - b;
        let j = x.square();
        let e_sq = e.square();

        self.x = a * (b - f);
        self.y = g.square() - (e_sq + e_sq + e_sq);
        self.z = b * h;

        LineEvaluation {
            r0: -h,
            r1: j + j + j,
            r2: i,
        }
    }
    /// Chord through `self` and `q`, and `self <- self + q`. Algorithm 27 of
    /// <https://eprint.iacr.org/2010/354.pdf>.
    pub(crate) fn add_mixed_step(&mut self, q: &G2Affine) -> LineEvaluation {
        let (x, y, z) = (self.x, self.y, self.z);

        let o = y - q.y * z;
        let l = x - q.x * z;
        let c = o.square();
        let d = l.square();
        let e = l * d;
        let f = z * c;
        let g = x * d;
        let h = e + f - (g + g);

        self.x = l * h;
        self.y = (g - h) * o - y * e;
        self.z = e * z;

        LineEvaluation {
            r0: l,
            r1: -o,
            r2: q.x * o - l * q.y,
        }
    }
    /// The line of `add_mixed_step`, without updating the point. The last iteration of the
    /// Miller loop has no use for the sum.
    pub(crate) fn line_compute(&self, q: &G2Affine) -> LineEvaluation {
        let o = self.y - q.y * self.z;
        let l = self.x - q.x * self.z;

        LineEvaluation {
            r0: l,
            r1: -o,
            r2: q.x * o - l * q.y,
        }
    }
}

/// Affine doubling of $(x, y)$, returning the double and the tangent there.
pub(crate) fn double_step_affine(x: Fp2, y: Fp2) -> ((Fp2, Fp2), LineEvaluationAff) {
    let n = x.square();
    let lambda = (n + n + n) * (y + y).inv();
    let xr = lambda.square() - x - x;
    let yr = (x - xr) * lambda - y;
    ((xr, yr), LineEvaluationAff::through(lambda, x, y))
}

/// $2T + Q$ as $(T + Q) + T$, computed with one inversion by the trick of Eisentraeger,
/// Lauter, and Montgomery, <https://arxiv.org/abs/math/0208038>. Returns the result along
/// with the two chords, through $T$ and $Q$, then through $T + Q$ and $T$.
pub(crate) fn double_and_add_affine(
    t: (Fp2, Fp2),
    q: (Fp2, Fp2),
) -> ((Fp2, Fp2), LineEvaluationAff, LineEvaluationAff) {
    let ((x1, y1), (x2, y2)) = (t, q);

    let a = x1 - x2;
    let b = y1 - y2;
    let a_sq = a.square();
    let u = b.square() - (x1 + x1 + x2) * a_sq;

    let inv_au = (a * u).inv();
    let inv_a = u * inv_au;
    let inv_u = a * inv_au;

    let l1 = b * inv_a;
    let x3 = l1.square() - x1 - x2;
    let e1 = LineEvaluationAff::through(l1, x1, y1);

    let l2 = -((y1 + y1) * a_sq * inv_u + l1);
    let x4 = l2.square() - x1 - x3;
    let y4 = l2 * (x1 - x4) - y1;
    let e2 = LineEvaluationAff::through(l2, x1, y1);

    ((x4, y4), e1, e2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::CurveParameters;
    use crate::fields::fp::Fr;
    use crate::groups::group::GroupTrait;
    use crypto_bigint::rand_core::OsRng;
    use num_traits::Zero;

    fn random_q() -> G2Affine {
        G2Affine::from(G2Projective::rand(&mut OsRng))
    }
    /// evaluates r0 y + r1 x + r2 as a polynomial, at a point of the twist itself, where any
    /// line through that point must vanish
    fn vanishes(l: &LineEvaluation, x: Fp2, y: Fp2) -> bool {
        (l.r0 * y + l.r1 * x + l.r2).is_zero()
    }

    #[test]
    fn test_double_step() {
        let b_twist = CurveParameters::bls12_377().b_twist();
        let q = random_q();
        let mut t = G2Projective::from(q);
        let line = t.double_step(&b_twist);
        assert_eq!(t, G2Projective::from(q).double(), "Doubling step moved T wrongly");
        // the tangent at q vanishes at q
        assert!(vanishes(&line, q.x, q.y), "Tangent does not pass through T");
    }
    #[test]
    fn test_add_mixed_step() {
        let q = random_q();
        let s = G2Projective::generator() * Fr::from(7);
        let s_affine = G2Affine::from(s);
        let mut t = s;
        let expected_line = t.line_compute(&q);
        let line = t.add_mixed_step(&q);
        assert_eq!(line, expected_line, "Line-only step disagrees");
        assert_eq!(t, s + G2Projective::from(q), "Addition step moved T wrongly");
        assert!(vanishes(&line, q.x, q.y), "Chord does not pass through Q");
        assert!(
            vanishes(&line, s_affine.x, s_affine.y),
            "Chord does not pass through T"
        );
    }
    #[test]
    fn test_affine_steps() {
        let q = random_q();
        let t = G2Affine::from(G2Projective::from(q) * Fr::from(3));

        let ((x, y), tangent) = double_step_affine(t.x, t.y);
        let expected = G2Affine::from(G2Projective::from(t).double());
        assert_eq!((x, y), (expected.x, expected.y));
        assert_eq!(tangent.r0 * t.x - tangent.r1, t.y);

        let ((x, y), e1, e2) = double_and_add_affine((t.x, t.y), (q.x, q.y));
        let expected = G2Affine::from(G2Projective::from(t).double() + G2Projective::from(q));
        assert_eq!((x, y), (expected.x, expected.y), "ELM 2T + Q failed");
        // both chords pass through T, the first also through Q
        assert_eq!(e1.r0 * t.x - e1.r1, t.y);
        assert_eq!(e2.r0 * t.x - e2.r1, t.y);
        assert_eq!(e1.r0 * q.x - e1.r1, q.y);
    }
}
