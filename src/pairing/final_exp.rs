//! The final exponentiation, raising the output of a Miller loop to $(p^{12}-1)/r$.
//!
//! The exponent splits as $(p^6-1)(p^2+1) \cdot (p^4-p^2+1)/r$. The first two factors, the
//! "easy part", cost an inversion and some Frobenius maps, and land the value in the
//! cyclotomic subgroup, where inversion is conjugation and squaring can be done much more
//! cheaply. The remaining "hard part" is written in base $p$ with coefficients in $x_0$, so
//! that it only needs exponentiation by the seed, `expt`, which for BLS12-377 is a fixed
//! addition chain.
use crate::curve::{CurveParameters, BLS12_377_SEED};
use crate::fields::fp12::Fp12;
use crate::fields::fp2::Fp2;
use crate::fields::fp6::Fp6;
use crate::groups::gt::Gt;
use crate::pairing::MillerLoopResult;
use num_traits::{Inv, One};

/// Squaring in $\mathbb{F}_{p^4} = \mathbb{F}_{p^2}[s]/(s^2 - u)$, given the two coefficients of
/// the element, per algorithm 9 of <https://eprint.iacr.org/2010/354.pdf>.
#[must_use]
fn fp4_square(a: Fp2, b: Fp2) -> (Fp2, Fp2) {
    let t0 = a.square();
    let t1 = b.square();
    let c0 = t1.residue_mul() + t0;
    let c1 = (a + b).square() - t0 - t1;
    (c0, c1)
}

/// Granger-Scott squaring of an element of the cyclotomic subgroup $G_{\Phi_6}(p^2)$, viewing
/// $\mathbb{F}_{p^{12}}$ as a cubic extension of $\mathbb{F}_{p^4}$. See
/// <https://eprint.iacr.org/2009/565.pdf>, section 3.2.
#[must_use]
pub(crate) fn cyclotomic_square(f: &Fp12) -> Fp12 {
    let mut z0 = f.0[0].0[0];
    let mut z4 = f.0[0].0[1];
    let mut z3 = f.0[0].0[2];
    let mut z2 = f.0[1].0[0];
    let mut z1 = f.0[1].0[1];
    let mut z5 = f.0[1].0[2];

    let (t0, t1) = fp4_square(z0, z1);
    z0 = t0 - z0;
    z0 = z0 + z0 + t0;
    z1 = t1 + z1;
    z1 = z1 + z1 + t1;

    let (t0, t1) = fp4_square(z2, z3);
    let (t2, t3) = fp4_square(z4, z5);
    z4 = t0 - z4;
    z4 = z4 + z4 + t0;
    z5 = t1 + z5;
    z5 = z5 + z5 + t1;

    let t0 = t3.residue_mul();
    z2 = t0 + z2;
    z2 = z2 + z2 + t0;
    z3 = t2 - z3;
    z3 = z3 + z3 + t2;

    Fp12::new(&[Fp6::new(&[z0, z4, z3]), Fp6::new(&[z2, z1, z5])])
}

fn cyclotomic_square_n(f: &Fp12, n: usize) -> Fp12 {
    (0..n).fold(*f, |acc, _| cyclotomic_square(&acc))
}

/// Square and multiply with cyclotomic squarings, over the bits of `exponent`. This is
/// what `expt` falls back to for a seed without a dedicated chain.
#[must_use]
fn cyclotomic_exp(f: &Fp12, exponent: u64) -> Fp12 {
    let mut res = Fp12::one();
    for i in (0..64).rev() {
        res = cyclotomic_square(&res);
        if ((exponent >> i) & 1) == 1 {
            res *= *f;
        }
    }
    res
}

impl CurveParameters {
    /// $f^{x_0}$ for $f$ in the cyclotomic subgroup. For BLS12-377 the seed has seven set
    /// bits, and the chain below costs 63 cyclotomic squarings and 5 multiplications.
    pub(crate) fn expt(&self, f: &Fp12) -> Fp12 {
        if self.seed() != BLS12_377_SEED {
            return cyclotomic_exp(f, self.seed());
        }
        // 0b100001 = 33
        let x33 = cyclotomic_square_n(f, 5) * *f;
        // 0b1000010100001 = 33 * 2^7 + 33
        let res = cyclotomic_square_n(&x33, 7) * x33;
        let res = cyclotomic_square_n(&res, 4) * *f;
        let res = cyclotomic_square_n(&res, 1) * *f;
        cyclotomic_square_n(&res, 46) * *f
    }

    /// Raises the product of `z` and every element of `extra` to $(p^{12}-1)/r$.
    pub fn final_exponentiation(&self, z: &MillerLoopResult, extra: &[MillerLoopResult]) -> Gt {
        let f = extra.iter().fold(*z, |acc, e| acc + *e).0;

        // easy part: f^{(p^6-1)(p^2+1)}
        let t0 = f.unitary_inverse() * f.inv();
        let res = t0.frobenius(2) * t0;
        if res.is_one() {
            tracing::debug!("final exponentiation: easy part is one");
            return Gt(res);
        }

        // hard part, after Hayashida, Hayasaka, and Teruya, <https://eprint.iacr.org/2020/875>
        let t0 = cyclotomic_square(&res);
        let t1 = self.expt(&res) * res.unitary_inverse();
        let t2 = self.expt(&t1);
        let t1 = t1.unitary_inverse() * t2;
        let t2 = self.expt(&t1);
        let t1 = t1.frobenius(1) * t2;
        let res = res * t0;
        let t0 = self.expt(&t1);
        let t2 = self.expt(&t0);
        let t0 = t1.frobenius(2);
        let t1 = t1.unitary_inverse() * t2 * t0;
        Gt(res * t1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crypto_bigint::rand_core::OsRng;

    /// a random element of the cyclotomic subgroup, by way of the easy part
    fn random_cyclotomic() -> Fp12 {
        let f = Fp12::rand(&mut OsRng);
        let t0 = f.unitary_inverse() * f.inv();
        t0.frobenius(2) * t0
    }

    #[test]
    fn test_cyclotomic_square() {
        for _ in 0..4 {
            let f = random_cyclotomic();
            assert_eq!(cyclotomic_square(&f), f.square(), "Granger-Scott squaring failed");
            assert_eq!(
                f * f.unitary_inverse(),
                Fp12::one(),
                "Conjugate is not the inverse"
            );
        }
    }
    #[test]
    fn test_expt() {
        let params = CurveParameters::bls12_377();
        let f = random_cyclotomic();
        let expected = f.pow(&[params.seed()]);
        assert_eq!(params.expt(&f), expected, "Addition chain is not x0");
        assert_eq!(cyclotomic_exp(&f, params.seed()), expected);
    }
    #[test]
    fn test_early_exit() {
        let params = CurveParameters::bls12_377();
        let one = MillerLoopResult::default();
        assert!(params.final_exponentiation(&one, &[]).is_identity());
        // anything in F_{p^6} is killed by p^6 - 1
        let f = MillerLoopResult(Fp12::new(&[Fp6::rand(&mut OsRng), Fp6::ZERO]));
        assert!(params.final_exponentiation(&f, &[]).is_identity());
    }
    #[test]
    fn test_lands_in_gt() {
        let params = CurveParameters::bls12_377();
        let f = MillerLoopResult(Fp12::rand(&mut OsRng));
        let g = MillerLoopResult(Fp12::rand(&mut OsRng));
        let e = params.final_exponentiation(&f, &[g]);
        assert!(bool::from(
            <Gt as crate::groups::group::GroupTrait<12, 2, Fp12>>::is_torsion_free(&e)
        ));
        assert_eq!(e, params.final_exponentiation(&(f + g), &[]));
        assert_eq!(
            e,
            params.final_exponentiation(&f, &[]) + params.final_exponentiation(&g, &[])
        );
    }
}
