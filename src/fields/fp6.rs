//! $\mathbb{F}_{p^6} = \mathbb{F}_{p^2}[v]/(v^3 - u)$, the cubic level of the tower.
use crate::fields::extensions::FieldExtension;
use crate::fields::fp::{FieldExtensionTrait, Fp};
use crate::fields::fp2::Fp2;
use crypto_bigint::{rand_core::CryptoRngCore, subtle::ConditionallySelectable, U384};
use num_traits::{Inv, One, Zero};
use std::ops::{Div, DivAssign, Mul, MulAssign};
use subtle::Choice;

// The values below are the powers u^((p^k - 1) / 3) and u^(2 (p^k - 1) / 3). For BLS12-377
// every one of them happens to lie in the base field, p = 1 mod 6 and u^6 = -125 being the
// reason, so only a single Fp word is stored per entry, and applying them is a `scale`.
//
// Computing these on the fly requires arithmetic on p^5, well beyond U384, so we just
// hardcode the values for clarity and speed here.
const FROBENIUS_COEFF_FP6_C1: &[Fp; 6] = &[
    // u^((p^0 - 1) / 3)
    Fp::ONE,
    // u^((p^1 - 1) / 3)
    Fp::new(U384::from_words([
        0x8508c00000000002,
        0x452217cc90000000,
        0xc5ed1347970dec00,
        0x619aaf7d34594aab,
        0x09b3af05dd14f6ec,
        0x0000000000000000,
    ])),
    // u^((p^2 - 1) / 3)
    Fp::new(U384::from_words([
        0x8508c00000000001,
        0x452217cc90000000,
        0xc5ed1347970dec00,
        0x619aaf7d34594aab,
        0x09b3af05dd14f6ec,
        0x0000000000000000,
    ])),
    // u^((p^3 - 1) / 3)
    Fp::new(U384::from_words([
        0x8508c00000000000,
        0x170b5d4430000000,
        0x1ef3622fba094800,
        0x1a22d9f300f5138f,
        0xc63b05c06ca1493b,
        0x01ae3a4617c510ea,
    ])),
    // u^((p^4 - 1) / 3)
    Fp::new(U384::from_words([
        0xffffffffffffffff,
        0xd1e945779fffffff,
        0x59064ee822fb5bff,
        0xb8882a75cc9bc8e3,
        0xbc8756ba8f8c524e,
        0x01ae3a4617c510ea,
    ])),
    // u^((p^5 - 1) / 3)
    Fp::new(U384::from_words([
        0x0000000000000000,
        0xd1e94577a0000000,
        0x59064ee822fb5bff,
        0xb8882a75cc9bc8e3,
        0xbc8756ba8f8c524e,
        0x01ae3a4617c510ea,
    ])),
];
const FROBENIUS_COEFF_FP6_C2: &[Fp; 6] = &[
    // u^((2 p^0 - 2) / 3)
    Fp::ONE,
    // u^((2 p^1 - 2) / 3)
    Fp::new(U384::from_words([
        0x8508c00000000001,
        0x452217cc90000000,
        0xc5ed1347970dec00,
        0x619aaf7d34594aab,
        0x09b3af05dd14f6ec,
        0x0000000000000000,
    ])),
    // u^((2 p^2 - 2) / 3)
    Fp::new(U384::from_words([
        0xffffffffffffffff,
        0xd1e945779fffffff,
        0x59064ee822fb5bff,
        0xb8882a75cc9bc8e3,
        0xbc8756ba8f8c524e,
        0x01ae3a4617c510ea,
    ])),
    // u^((2 p^3 - 2) / 3)
    Fp::ONE,
    // u^((2 p^4 - 2) / 3)
    Fp::new(U384::from_words([
        0x8508c00000000001,
        0x452217cc90000000,
        0xc5ed1347970dec00,
        0x619aaf7d34594aab,
        0x09b3af05dd14f6ec,
        0x0000000000000000,
    ])),
    // u^((2 p^5 - 2) / 3)
    Fp::new(U384::from_words([
        0xffffffffffffffff,
        0xd1e945779fffffff,
        0x59064ee822fb5bff,
        0xb8882a75cc9bc8e3,
        0xbc8756ba8f8c524e,
        0x01ae3a4617c510ea,
    ])),
];
pub type Fp6 = FieldExtension<6, 3, Fp2>;

impl Fp6 {
    pub const ZERO: Self = Self::new(&[Fp2::ZERO, Fp2::ZERO, Fp2::ZERO]);
    pub const ONE: Self = Self::new(&[Fp2::ONE, Fp2::ZERO, Fp2::ZERO]);

    /// multiplication by v, the non-residue of the dodecic extension above us
    pub(crate) fn residue_mul(&self) -> Self {
        Self([self.0[2].residue_mul(), self.0[0], self.0[1]])
    }
    /// multiplication by the sparse element c0 + c1 v, which is 3 Fp2 multiplications
    /// fewer than the generic Karatsuba product below
    pub(crate) fn mul_by_01(&self, c0: &Fp2, c1: &Fp2) -> Self {
        let a = self.0[0] * *c0;
        let b = self.0[1] * *c1;

        Self([
            (*c1 * (self.0[1] + self.0[2]) - b).residue_mul() + a,
            (*c0 + *c1) * (self.0[0] + self.0[1]) - a - b,
            *c0 * (self.0[0] + self.0[2]) - a + b,
        ])
    }
    /// CH-SQR2 of <https://eprint.iacr.org/2006/471.pdf>, two squarings and three products
    pub fn square(&self) -> Self {
        let t0 = self.0[0].square();
        let cross = self.0[0] * self.0[1];
        let t1 = cross + cross;
        let t2 = (self.0[0] - self.0[1] + self.0[2]).square();
        let bc = self.0[1] * self.0[2];
        let s3 = bc + bc;
        let s4 = self.0[2].square();

        Self([
            t0 + s3.residue_mul(),
            t1 + s4.residue_mul(),
            t1 + t2 + s3 - t0 - s4,
        ])
    }
    pub fn rand<R: CryptoRngCore>(rng: &mut R) -> Self {
        Self([Fp2::rand(rng), Fp2::rand(rng), Fp2::rand(rng)])
    }
}
impl FieldExtensionTrait<6, 3> for Fp6 {
    fn quadratic_non_residue() -> Self {
        Self::new(&[Fp2::zero(), Fp2::one(), Fp2::zero()])
    }
    fn frobenius(&self, exponent: usize) -> Self {
        Self::new(&[
            <Fp2 as FieldExtensionTrait<2, 2>>::frobenius(&self.0[0], exponent),
            <Fp2 as FieldExtensionTrait<2, 2>>::frobenius(&self.0[1], exponent)
                .scale(FROBENIUS_COEFF_FP6_C1[exponent % 6]),
            <Fp2 as FieldExtensionTrait<2, 2>>::frobenius(&self.0[2], exponent)
                .scale(FROBENIUS_COEFF_FP6_C2[exponent % 6]),
        ])
    }
    fn square(&self) -> Self {
        Fp6::square(self)
    }
    fn rand<R: CryptoRngCore>(rng: &mut R) -> Self {
        Fp6::rand(rng)
    }
}
impl Mul for Fp6 {
    type Output = Self;
    fn mul(self, other: Self) -> Self::Output {
        // Karatsuba over the three coefficients, v^3 = u folded in with `residue_mul`
        let [a0, a1, a2] = self.0;
        let [b0, b1, b2] = other.0;
        let t0 = a0 * b0;
        let t1 = a1 * b1;
        let t2 = a2 * b2;

        Self([
            ((a1 + a2) * (b1 + b2) - t1 - t2).residue_mul() + t0,
            (a0 + a1) * (b0 + b1) - t0 - t1 + t2.residue_mul(),
            (a0 + a2) * (b0 + b2) - t0 + t1 - t2,
        ])
    }
}
impl MulAssign for Fp6 {
    fn mul_assign(&mut self, other: Self) {
        *self = *self * other;
    }
}

impl Inv for Fp6 {
    type Output = Self;
    fn inv(self) -> Self::Output {
        // the adjugate over the norm to Fp2, zero going to zero with it
        let [a0, a1, a2] = self.0;
        let t0 = a0.square() - a1 * a2.residue_mul();
        let t1 = a2.square().residue_mul() - a0 * a1;
        let t2 = a1.square() - a0 * a2;

        let norm = (a2 * t1 + a1 * t2).residue_mul() + a0 * t0;
        let inverse = norm.inv();
        Self([t0 * inverse, t1 * inverse, t2 * inverse])
    }
}

impl One for Fp6 {
    fn one() -> Self {
        Self::ONE
    }
    fn is_one(&self) -> bool {
        self.0[0].is_one() && self.0[1].is_zero() && self.0[2].is_zero()
    }
}

#[allow(clippy::suspicious_arithmetic_impl)]
impl Div for Fp6 {
    type Output = Self;
    fn div(self, other: Self) -> Self::Output {
        self * other.inv()
    }
}
impl DivAssign for Fp6 {
    fn div_assign(&mut self, other: Self) {
        *self = *self / other;
    }
}

impl ConditionallySelectable for Fp6 {
    #[inline(always)]
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self::new(&[
            Fp2::conditional_select(&a.0[0], &b.0[0], choice),
            Fp2::conditional_select(&a.0[1], &b.0[1], choice),
            Fp2::conditional_select(&a.0[2], &b.0[2], choice),
        ])
    }
}

impl FieldExtensionTrait<12, 2> for Fp6 {
    fn quadratic_non_residue() -> Self {
        <Fp6 as FieldExtensionTrait<6, 3>>::quadratic_non_residue()
    }
    fn frobenius(&self, exponent: usize) -> Self {
        <Fp6 as FieldExtensionTrait<6, 3>>::frobenius(self, exponent)
    }
    fn square(&self) -> Self {
        Fp6::square(self)
    }
    fn rand<R: CryptoRngCore>(rng: &mut R) -> Self {
        Fp6::rand(rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crypto_bigint::rand_core::OsRng;

    fn frob(a: &Fp6, k: usize) -> Fp6 {
        <Fp6 as FieldExtensionTrait<6, 3>>::frobenius(a, k)
    }

    mod residue_tests {
        use super::*;
        #[test]
        fn test_residue() {
            let v = <Fp6 as FieldExtensionTrait<6, 3>>::quadratic_non_residue();
            let u = <Fp2 as FieldExtensionTrait<2, 2>>::quadratic_non_residue();
            assert_eq!(
                v * v * v,
                Fp6::new(&[u, Fp2::zero(), Fp2::zero()]),
                "v^3 must be u"
            );
            let a = Fp6::rand(&mut OsRng);
            assert_eq!(a.residue_mul(), a * v, "Multiplication by v failed");
        }
    }
    mod multiplication_tests {
        use super::*;

        #[test]
        fn test_field_axioms() {
            let [a, b, c] = [(); 3].map(|_| Fp6::rand(&mut OsRng));
            assert_eq!(a * b, b * a);
            assert_eq!((a * b) * c, a * (b * c));
            assert_eq!(a * (b + c), a * b + a * c);
            assert_eq!((a / b) * b, a);
            assert_eq!(a * a.inv(), Fp6::ONE);
            assert_eq!(Fp6::ONE / Fp6::ZERO, Fp6::ZERO, "1/0 must map to 0");
        }
        #[test]
        fn test_square_and_sparse() {
            for _ in 0..20 {
                let a = Fp6::rand(&mut OsRng);
                let c0 = Fp2::rand(&mut OsRng);
                let c1 = Fp2::rand(&mut OsRng);
                assert_eq!(a.square(), a * a, "Squaring failed");
                assert_eq!(
                    a.mul_by_01(&c0, &c1),
                    a * Fp6::new(&[c0, c1, Fp2::zero()]),
                    "Sparse multiplication failed"
                );
            }
        }
        #[test]
        fn test_frobenius() {
            let a = Fp6::rand(&mut OsRng);
            let b = Fp6::rand(&mut OsRng);

            assert_eq!(
                a,
                frob(&frob(&frob(&a, 2), 2), 2),
                "Frobenius failed at cycle order 3"
            );
            assert_eq!(a, frob(&frob(&a, 3), 3), "Frobenius failed at cycle order 2");
            let mut c = a;
            for _ in 0..6 {
                c = frob(&c, 1);
            }
            assert_eq!(a, c, "Frobenius failed at cycle order 6");
            for k in 0..6 {
                assert_eq!(
                    frob(&(a * b), k),
                    frob(&a, k) * frob(&b, k),
                    "Frobenius is not multiplicative"
                );
                assert_eq!(
                    frob(&frob(&a, k), 1),
                    frob(&a, k + 1),
                    "Frobenius powers do not compose"
                );
            }
        }
    }
}
