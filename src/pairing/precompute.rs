//! Line precomputation for a fixed argument $Q$, and the matching Miller loop.
//!
//! When $Q$ is known ahead of time (a verification key, say), the lines of its Miller loop
//! can be computed once and stored, leaving only the evaluation at $P$ for every pairing.
//! Storing affine lines makes that evaluation as cheap as possible, but affine arithmetic
//! costs an inversion per step. We avoid that by walking each run of zero digits with the
//! recurrence below, which doubles $k$ times in a weighted projective form, and recovering
//! every affine slope of the run from a single batched inversion. A run ending in a one digit
//! also folds in $2T + Q$ by the method of Eisentraeger, Lauter, and Montgomery, sharing the
//! same inversion.
//!
//! The lines of a 1 digit are the two chords of $(T + Q) + T$ rather than the tangent at $T$
//! and the chord through $2T$ and $Q$, so the output of `miller_loop_fixed_q` differs from
//! `miller_loop` by factors which vanish in the final exponentiation.
use crate::curve::CurveParameters;
use crate::fields::fp::Fp;
use crate::fields::fp12::Fp12;
use crate::fields::fp2::Fp2;
use crate::fields::fp6::Fp6;
use crate::fields::utils::batch_invert;
use crate::groups::g1::G1Affine;
use crate::groups::g2::G2Affine;
use crate::pairing::lines::{double_and_add_affine, double_step_affine, LineEvaluationAff};
use crate::pairing::miller::from_01234;
use crate::pairing::{check_input_sizes, MillerLoopResult, PairingError};

/// 1 + c3 w + c4 w^3 as a full element
fn from_34(c3: &Fp2, c4: &Fp2) -> Fp12 {
    Fp12::new(&[
        Fp6::ONE,
        Fp6::new(&[*c3, *c4, Fp2::ZERO]),
    ])
}

/// The affine lines of the Miller loop of a fixed $Q$, indexed by digit of the loop counter.
/// `lines[0][i]` is the doubling line of digit `i`, except on one digits, where `lines[0][i]`
/// and `lines[1][i]` are the two chords of the double-and-add step.
#[derive(Clone, Debug, PartialEq)]
pub struct PrecomputedLines {
    pub(crate) lines: [Vec<LineEvaluationAff>; 2],
}

impl PrecomputedLines {
    fn zero(len: usize) -> Self {
        Self {
            lines: [
                vec![LineEvaluationAff::default(); len],
                vec![LineEvaluationAff::default(); len],
            ],
        }
    }
    pub fn len(&self) -> usize {
        self.lines[0].len()
    }
    pub fn is_empty(&self) -> bool {
        self.lines[0].is_empty()
    }
}

/// The scaled coordinates $(A_i, B_i, C_i)$ of $[2^i]T$ for $i = 0..=k$, where
/// $[2^i]T = (A_i / D_{i-1}^2, -C_i / D_{i-1}^3)$ with $D_i = \prod_{j\le i} -2C_j$, and
/// $B_i = 3A_i^2$ is the numerator of the tangent slope.
fn doubling_recurrence(t: (Fp2, Fp2), k: usize) -> (Vec<Fp2>, Vec<Fp2>, Vec<Fp2>) {
    let mut a = Vec::with_capacity(k + 1);
    let mut b = Vec::with_capacity(k + 1);
    let mut c = Vec::with_capacity(k + 1);
    let x_sq = t.0.square();
    a.push(t.0);
    b.push(x_sq + x_sq + x_sq);
    c.push(-t.1);
    for i in 1..=k {
        let c_sq = c[i - 1].square();
        let ac = a[i - 1] * c_sq;
        let ac2 = ac + ac;
        let ac4 = ac2 + ac2;
        let ac8 = ac4 + ac4;
        let a_i = b[i - 1].square() - ac8;
        let a_sq = a_i.square();
        let c_4 = c_sq.square();
        let c_4 = c_4 + c_4;
        let c_4 = c_4 + c_4;
        let c_4 = c_4 + c_4;
        let c_i = c_4 + b[i - 1] * (a_i - ac4);
        a.push(a_i);
        b.push(a_sq + a_sq + a_sq);
        c.push(c_i);
    }
    (a, b, c)
}

/// prefix products of $-2C_0, \dots, -2C_{k-1}$
fn denominators(c: &[Fp2], k: usize) -> Vec<Fp2> {
    let mut prefix = Vec::with_capacity(k + 1);
    let mut acc = Fp2::ONE;
    for c_i in c.iter().take(k) {
        acc = acc * -(*c_i + *c_i);
        prefix.push(acc);
    }
    prefix
}

/// The tangent lines of the run, and the affine point at its end, from the batch inverses
/// of the denominators.
fn doubling_lines(
    a: &[Fp2],
    b: &[Fp2],
    c: &[Fp2],
    inv: &[Fp2],
    k: usize,
) -> (Vec<LineEvaluationAff>, (Fp2, Fp2)) {
    let mut ev = Vec::with_capacity(k);
    ev.push(LineEvaluationAff {
        r0: b[0] * inv[0],
        r1: b[0] * a[0] * inv[0] + c[0],
    });
    for i in 1..k {
        let inv_sq = inv[i - 1].square();
        let inv_cube = inv_sq * inv[i - 1];
        ev.push(LineEvaluationAff {
            r0: b[i] * inv[i],
            r1: b[i] * a[i] * inv[i] * inv_sq + c[i] * inv_cube,
        });
    }
    let inv_sq = inv[k - 1].square();
    let inv_cube = inv_sq * inv[k - 1];
    (ev, (a[k] * inv_sq, -(c[k] * inv_cube)))
}

/// `k` doublings of `t`, returning $[2^k]T$ and the `k` tangent lines in order. One
/// inversion in total.
pub(crate) fn many_double_steps(t: (Fp2, Fp2), k: usize) -> ((Fp2, Fp2), Vec<LineEvaluationAff>) {
    match k {
        0 => (t, vec![]),
        1 => {
            let (t, line) = double_step_affine(t.0, t.1);
            (t, vec![line])
        }
        _ => {
            let (a, b, c) = doubling_recurrence(t, k);
            let mut inv = denominators(&c, k);
            batch_invert(&mut inv);
            let (ev, t) = doubling_lines(&a, &b, &c, &inv, k);
            (t, ev)
        }
    }
}

/// `k` doublings of `t` followed by $2T + Q$, returning the resulting point, the `k`
/// tangent lines, and the two chords of the final step. One inversion in total.
pub(crate) fn many_doubles_and_add(
    t: (Fp2, Fp2),
    k: usize,
    q: (Fp2, Fp2),
) -> (
    (Fp2, Fp2),
    Vec<LineEvaluationAff>,
    LineEvaluationAff,
    LineEvaluationAff,
) {
    if k == 0 {
        let (t, e1, e2) = double_and_add_affine(t, q);
        return (t, vec![], e1, e2);
    }
    let (a, b, c) = doubling_recurrence(t, k);
    let mut inv = denominators(&c, k);

    // 2T + Q where T = (A_k / S^2, -C_k / S^3), with numerators cleared of S
    let s = inv[k - 1];
    let s_sq = s.square();
    let s_cube = s_sq * s;
    let qx_s = q.0 * s_sq;
    let a_num = a[k] - qx_s;
    let b_num = -(c[k] + q.1 * s_cube);
    let a_num_sq = a_num.square();
    let u_num = b_num.square() - (a[k] + a[k] + qx_s) * a_num_sq;
    inv.push(s * a_num * u_num);

    batch_invert(&mut inv);
    let (ev, (x, y)) = doubling_lines(&a, &b, &c, &inv, k);

    let inv_sa = u_num * inv[k];
    let inv_su = a_num * inv[k];

    let l1 = b_num * inv_sa;
    let x3 = l1.square() - x - q.0;
    let e1 = LineEvaluationAff::through(l1, x, y);

    let minus_2c = -(c[k] + c[k]);
    let l2 = -(minus_2c * a_num_sq * inv_su + l1);
    let x4 = l2.square() - x - x3;
    let y4 = l2 * (x - x4) - y;
    let e2 = LineEvaluationAff::through(l2, x, y);

    ((x4, y4), ev, e1, e2)
}

impl CurveParameters {
    /// The affine lines of the Miller loop of `q`. The identity yields an all zero table,
    /// every line of which evaluates to one.
    pub fn precompute_lines(&self, q: &G2Affine) -> PrecomputedLines {
        let digits = self.loop_counter();
        let mut out = PrecomputedLines::zero(digits.len() - 1);
        if q.is_zero() {
            tracing::debug!("CurveParameters::precompute_lines: Q is the identity");
            return out;
        }

        let base = (q.x, q.y);
        let mut t = base;
        let mut next = Some(digits.len() - 2);
        while let Some(i) = next {
            match (0..=i).rev().find(|j| digits[*j] == 1) {
                Some(j) => {
                    let k = i - j;
                    let (t_new, ev, e1, e2) = many_doubles_and_add(t, k, base);
                    for (s, line) in ev.into_iter().enumerate() {
                        out.lines[0][i - s] = line;
                    }
                    out.lines[0][j] = e1;
                    out.lines[1][j] = e2;
                    t = t_new;
                    next = j.checked_sub(1);
                }
                None => {
                    let (_, ev) = many_double_steps(t, i + 1);
                    for (s, line) in ev.into_iter().enumerate() {
                        out.lines[0][i - s] = line;
                    }
                    next = None;
                }
            }
        }
        tracing::debug!(lines = out.len(), "CurveParameters::precompute_lines");
        out
    }

    /// The Miller loop against precomputed lines, one table per point of `p`. The lines are
    /// divided through by $y_P$ so that they evaluate to $1 + c_3 w + c_4 w^3$, for which
    /// all the $y_P$ are inverted in one batch. The result agrees with `miller_loop` after
    /// the final exponentiation.
    pub fn miller_loop_fixed_q(
        &self,
        p: &[G1Affine],
        lines: &[PrecomputedLines],
    ) -> Result<MillerLoopResult, PairingError> {
        check_input_sizes(p.len(), lines.len())?;
        tracing::debug!(pairs = p.len(), "CurveParameters::miller_loop_fixed_q");

        // the identity is given y = 0, which batch inversion passes through, making every
        // one of its lines evaluate to one
        let mut y_inv: Vec<Fp> = p
            .iter()
            .map(|pk| if pk.is_zero() { Fp::ZERO } else { pk.y })
            .collect();
        batch_invert(&mut y_inv);
        let x_neg: Vec<Fp> = p
            .iter()
            .zip(&y_inv)
            .map(|(pk, yi)| -(pk.x * *yi))
            .collect();

        let eval =
            |s: usize, i: usize, k: usize| lines[k].lines[s][i].evaluate(x_neg[k], y_inv[k]);
        let digits = self.loop_counter();
        let top = digits.len() - 2;
        debug_assert!(top > 0);

        // f is one before the top digit, so its lines are assigned rather than multiplied in
        let mut f = if digits[top] == 1 {
            let mut products = (0..lines.len()).map(|k| {
                let [c3, c4] = eval(0, top, k);
                let [d3, d4] = eval(1, top, k);
                Fp12::mul_34_by_34(&c3, &c4, &d3, &d4)
            });
            match products.next() {
                Some(x) => products.fold(from_01234(&x), |acc, x| acc.mul_by_01234(&x)),
                None => Fp12::ONE,
            }
        } else {
            let sparse: Vec<[Fp2; 2]> = (0..lines.len()).map(|k| eval(0, top, k)).collect();
            match sparse.as_slice() {
                [] => Fp12::ONE,
                [[c3, c4]] => from_34(c3, c4),
                [[c3, c4], [d3, d4], rest @ ..] => rest.iter().fold(
                    from_01234(&Fp12::mul_34_by_34(c3, c4, d3, d4)),
                    |acc, [e3, e4]| acc.mul_by_34(e3, e4),
                ),
            }
        };

        for i in (0..top).rev() {
            f = f.square();
            for k in 0..lines.len() {
                let [c3, c4] = eval(0, i, k);
                if digits[i] == 1 {
                    let [d3, d4] = eval(1, i, k);
                    f = f.mul_by_01234(&Fp12::mul_34_by_34(&c3, &c4, &d3, &d4));
                } else {
                    f = f.mul_by_34(&c3, &c4);
                }
            }
        }
        Ok(MillerLoopResult(f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::fp::Fr;
    use crate::groups::g2::G2Projective;
    use crate::groups::group::GroupTrait;
    use crate::groups::gt::Gt;
    use crypto_bigint::rand_core::OsRng;

    fn affine(t: G2Projective) -> (Fp2, Fp2) {
        let a = G2Affine::from(t);
        (a.x, a.y)
    }

    #[test]
    fn test_many_double_steps() {
        let q = G2Projective::rand(&mut OsRng);
        for k in [1, 2, 5] {
            let (t, ev) = many_double_steps(affine(q), k);
            assert_eq!(ev.len(), k);
            let mut expected = q;
            for line in ev.iter() {
                // every tangent passes through the point it was drawn at
                let (x, y) = affine(expected);
                assert_eq!(line.r0 * x - line.r1, y, "Tangent misses its point");
                let (_, tangent) = double_step_affine(x, y);
                assert_eq!(*line, tangent, "Batched tangent disagrees with affine one");
                expected = expected.double();
            }
            assert_eq!(t, affine(expected), "Batched doubling landed elsewhere");
        }
    }
    #[test]
    fn test_many_doubles_and_add() {
        let q = G2Projective::rand(&mut OsRng);
        let t = q * Fr::from(11);
        for k in [0, 1, 3] {
            let (r, ev, e1, e2) = many_doubles_and_add(affine(t), k, affine(q));
            assert_eq!(ev.len(), k);
            let mut d = t;
            for _ in 0..k {
                d = d.double();
            }
            let expected = d.double() + q;
            assert_eq!(r, affine(expected), "2T + Q landed elsewhere");
            let (_, f1, f2) = double_and_add_affine(affine(d), affine(q));
            assert_eq!((e1, e2), (f1, f2), "Chords disagree with the affine step");
        }
    }
    #[test]
    fn test_identity_table() {
        let params = CurveParameters::bls12_377();
        let table = params.precompute_lines(&G2Affine::zero());
        assert_eq!(table.len(), 63);
        assert!(table.lines[0].iter().all(|l| *l == LineEvaluationAff::default()));
        let p = G1Affine::rand(&mut OsRng);
        let f = params
            .miller_loop_fixed_q(&[p], &[table])
            .expect("Miller loop failed");
        assert_eq!(f, MillerLoopResult::default());
    }
    #[test]
    fn test_against_miller_loop() {
        let params = CurveParameters::bls12_377();
        let p: Vec<G1Affine> = (0..2).map(|_| G1Affine::rand(&mut OsRng)).collect();
        let q: Vec<G2Affine> = (0..2).map(|_| G2Affine::rand(&mut OsRng)).collect();
        let tables: Vec<PrecomputedLines> = q.iter().map(|qk| params.precompute_lines(qk)).collect();

        let fixed = params.pair_fixed_q(&p, &tables).expect("Pairing failed");
        let direct = params.pair(&p, &q).expect("Pairing failed");
        assert_eq!(fixed, direct, "Fixed argument pairing disagrees");
    }
    #[test]
    fn test_number_of_tables() {
        // the top digit assigns one line, multiplies two, or folds the rest into that product
        let params = CurveParameters::bls12_377();
        for n in 1..=3 {
            let p: Vec<G1Affine> = (0..n).map(|_| G1Affine::rand(&mut OsRng)).collect();
            let q: Vec<G2Affine> = (0..n).map(|_| G2Affine::rand(&mut OsRng)).collect();
            let tables: Vec<PrecomputedLines> =
                q.iter().map(|qk| params.precompute_lines(qk)).collect();
            let fixed = params
                .miller_loop_fixed_q(&p, &tables)
                .expect("Miller loop failed");
            let direct = params.miller_loop(&p, &q).expect("Miller loop failed");
            assert_eq!(
                params.final_exponentiation(&fixed, &[]),
                params.final_exponentiation(&direct, &[]),
                "Fixed argument loop disagrees for {n} pairs"
            );
        }
    }
    #[test]
    fn test_fixed_check() {
        let params = CurveParameters::bls12_377();
        let g1 = G1Affine::generator();
        let g2 = params.precompute_lines(&G2Affine::generator());
        let five_g1 = G1Affine::from(crate::groups::g1::G1Projective::from(g1) * Fr::from(5));

        let e = params.pair_fixed_q(&[five_g1], &[g2.clone()]).expect("Pairing failed");
        assert_eq!(e, Gt::generator() * Fr::from(5));
        assert!(params
            .pairing_check_fixed_q(&[five_g1, -five_g1, G1Affine::zero()], &[g2.clone(), g2.clone(), g2])
            .expect("Pairing failed"));
    }
}
