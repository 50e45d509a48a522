//! The optimal ate Miller loop, $f_{x_0, Q}(P)$, over the binary digits of the seed. Many
//! pairs are handled in the same pass, so that the squaring of the accumulator is paid once per
//! digit rather than once per pair, and the two lines of a digit are first multiplied with
//! each other, which is cheaper than folding each into the dense accumulator.
use crate::curve::CurveParameters;
use crate::fields::fp12::Fp12;
use crate::fields::fp2::Fp2;
use crate::fields::fp6::Fp6;
use crate::groups::g1::G1Affine;
use crate::groups::g2::{G2Affine, G2Projective};
use crate::pairing::lines::LineEvaluation;
use crate::pairing::{check_input_sizes, MillerLoopResult, PairingError};

/// c0 + c3 w + c4 w^3 as a full element, for assigning a first line to the accumulator
fn from_034(c: &[Fp2; 3]) -> Fp12 {
    Fp12::new(&[
        Fp6::new(&[c[0], Fp2::ZERO, Fp2::ZERO]),
        Fp6::new(&[c[1], c[2], Fp2::ZERO]),
    ])
}
pub(super) fn from_01234(x: &[Fp2; 5]) -> Fp12 {
    Fp12::new(&[
        Fp6::new(&[x[0], x[1], x[2]]),
        Fp6::new(&[x[3], x[4], Fp2::ZERO]),
    ])
}
fn mul_lines(a: &[Fp2; 3], b: &[Fp2; 3]) -> [Fp2; 5] {
    Fp12::mul_034_by_034(&a[0], &a[1], &a[2], &b[0], &b[1], &b[2])
}

impl CurveParameters {
    /// The Miller loop over all pairs $(P_k, Q_k)$, returning $\prod_k f_{x_0, Q_k}(P_k)$.
    /// Pairs in which either point is the identity contribute nothing, and if there are no
    /// other pairs the result is one.
    pub fn miller_loop(
        &self,
        p: &[G1Affine],
        q: &[G2Affine],
    ) -> Result<MillerLoopResult, PairingError> {
        check_input_sizes(p.len(), q.len())?;
        let (p, q): (Vec<G1Affine>, Vec<G2Affine>) = p
            .iter()
            .zip(q)
            .filter(|(a, b)| !a.is_zero() && !b.is_zero())
            .map(|(a, b)| (*a, *b))
            .unzip();
        tracing::debug!(pairs = p.len(), "CurveParameters::miller_loop");
        if p.is_empty() {
            return Ok(MillerLoopResult::default());
        }

        let b_twist = self.b_twist();
        let digits = self.loop_counter();
        // the leading digit is accounted for by starting at T = Q
        let top = digits.len() - 2;
        debug_assert!(top > 0);
        let mut t: Vec<G2Projective> = q.iter().map(G2Projective::from).collect();

        let mut f = Fp12::ONE;
        if digits[top] == 0 {
            // f is one, so the first lines are assigned rather than multiplied in
            let lines: Vec<[Fp2; 3]> = t
                .iter_mut()
                .zip(&p)
                .map(|(tk, pk)| tk.double_step(&b_twist).evaluate(pk))
                .collect();
            f = match lines.as_slice() {
                [] => Fp12::ONE,
                [l0] => from_034(l0),
                [l0, l1, rest @ ..] => rest
                    .iter()
                    .fold(from_01234(&mul_lines(l0, l1)), |acc, l| {
                        acc.mul_by_034(&l[0], &l[1], &l[2])
                    }),
            };
        } else {
            for (k, pk) in p.iter().enumerate() {
                let l0 = t[k].double_step(&b_twist).evaluate(pk);
                let l1 = t[k].add_mixed_step(&q[k]).evaluate(pk);
                f = f.mul_by_01234(&mul_lines(&l0, &l1));
            }
        }

        for i in (1..top).rev() {
            f = f.square();
            for (k, pk) in p.iter().enumerate() {
                let l0 = t[k].double_step(&b_twist).evaluate(pk);
                if digits[i] == 1 {
                    let l1 = t[k].add_mixed_step(&q[k]).evaluate(pk);
                    f = f.mul_by_01234(&mul_lines(&l0, &l1));
                } else {
                    f = f.mul_by_034(&l0[0], &l0[1], &l0[2]);
                }
            }
        }

        f = f.square();
        for (k, pk) in p.iter().enumerate() {
            let l0 = t[k].double_step(&b_twist).evaluate(pk);
            if digits[0] == 1 {
                let l1: LineEvaluation = t[k].line_compute(&q[k]);
                f = f.mul_by_01234(&mul_lines(&l0, &l1.evaluate(pk)));
            } else {
                f = f.mul_by_034(&l0[0], &l0[1], &l0[2]);
            }
        }
        Ok(MillerLoopResult(f))
    }
}
