//! $\mathbb{F}_{p^{12}} = \mathbb{F}_{p^6}[w]/(w^2 - v)$, the top of the tower and home of
//! $\mathbb{G}_T$. Elements are stored as a pair over $\mathbb{F}_{p^6}$. Since $w^6 = u$,
//! the same element can be read as six coefficients over $\mathbb{F}_{p^2}$,
//!
//! g_0 + h_0 w + g_1 w^2 + h_1 w^3 + g_2 w^4 + h_2 w^5
//!
//! which we number 0 through 5 in the order C0.B0, C0.B1, C0.B2, C1.B0, C1.B1, C1.B2. A
//! line evaluated at a point of G1 only ever populates slots 0, 3, and 4, hence the names
//! `mul_by_034` and friends below.

use crate::fields::extensions::FieldExtension;
use crate::fields::fp::{FieldExtensionTrait, Fp};
use crate::fields::fp2::Fp2;
use crate::fields::fp6::Fp6;
use crypto_bigint::{rand_core::CryptoRngCore, subtle::ConditionallySelectable, U384};
use num_traits::{Inv, One, Zero};
use std::ops::{Div, DivAssign, Mul, MulAssign};
use subtle::Choice;

// as with the sextic extension, every u^((p^k - 1) / 6) lies in the base field
const FROBENIUS_COEFF_FP12_C1: &[Fp; 12] = &[
    // u^((p^0 - 1) / 6)
    Fp::ONE,
    // u^((p^1 - 1) / 6)
    Fp::new(U384::from_words([
        0xe938a9d1104f2031,
        0xb57668e558eb0188,
        0xc681bf34a3aa559d,
        0x5c8a45e0f94ebc8e,
        0x33c1e30682567f91,
        0x009a9975399c0196,
    ])),
    // u^((p^2 - 1) / 6)
    Fp::new(U384::from_words([
        0x8508c00000000002,
        0x452217cc90000000,
        0xc5ed1347970dec00,
        0x619aaf7d34594aab,
        0x09b3af05dd14f6ec,
        0x0000000000000000,
    ])),
    // u^((p^3 - 1) / 6)
    Fp::new(U384::from_words([
        0x6e76d5ecf1391c63,
        0x99588459bff27d8e,
        0xbce649cf436b0f62,
        0x400398f50ad1dec1,
        0xc0c534db1a79beb1,
        0x01680a40796537ca,
    ])),
    // u^((p^4 - 1) / 6)
    Fp::new(U384::from_words([
        0x8508c00000000001,
        0x452217cc90000000,
        0xc5ed1347970dec00,
        0x619aaf7d34594aab,
        0x09b3af05dd14f6ec,
        0x0000000000000000,
    ])),
    // u^((p^5 - 1) / 6)
    Fp::new(U384::from_words([
        0x853e2c1be0e9fc32,
        0xe3e21b7467077c05,
        0xf6648a9a9fc0b9c4,
        0xe379531411832232,
        0x8d0351d498233f1f,
        0x00cd70cb3fc93634,
    ])),
    // u^((p^6 - 1) / 6)
    Fp::new(U384::from_words([
        0x8508c00000000000,
        0x170b5d4430000000,
        0x1ef3622fba094800,
        0x1a22d9f300f5138f,
        0xc63b05c06ca1493b,
        0x01ae3a4617c510ea,
    ])),
    // u^((p^7 - 1) / 6)
    Fp::new(U384::from_words([
        0x9bd0162eefb0dfd0,
        0x6194f45ed714fe77,
        0x5871a2fb165ef262,
        0xbd98941207a65700,
        0x927922b9ea4ac9a9,
        0x0113a0d0de290f54,
    ])),
    // u^((p^8 - 1) / 6)
    Fp::new(U384::from_words([
        0xffffffffffffffff,
        0xd1e945779fffffff,
        0x59064ee822fb5bff,
        0xb8882a75cc9bc8e3,
        0xbc8756ba8f8c524e,
        0x01ae3a4617c510ea,
    ])),
    // u^((p^9 - 1) / 6)
    Fp::new(U384::from_words([
        0x1691ea130ec6e39e,
        0x7db2d8ea700d8272,
        0x620d1860769e389d,
        0xda1f40fdf62334cd,
        0x0575d0e552278a89,
        0x004630059e5fd920,
    ])),
    // u^((p^10 - 1) / 6)
    Fp::new(U384::from_words([
        0x0000000000000000,
        0xd1e94577a0000000,
        0x59064ee822fb5bff,
        0xb8882a75cc9bc8e3,
        0xbc8756ba8f8c524e,
        0x01ae3a4617c510ea,
    ])),
    // u^((p^11 - 1) / 6)
    Fp::new(U384::from_words([
        0xffca93e41f1603cf,
        0x332941cfc8f883fa,
        0x288ed7951a488e3b,
        0x36a986deef71f15c,
        0x3937b3ebd47e0a1b,
        0x00e0c97ad7fbdab6,
    ])),
];

pub type Fp12 = FieldExtension<12, 2, Fp6>;

impl Fp12 {
    pub const ZERO: Self = Self::new(&[Fp6::ZERO, Fp6::ZERO]);
    pub const ONE: Self = Self::new(&[Fp6::ONE, Fp6::ZERO]);
}

impl FieldExtensionTrait<12, 2> for Fp12 {
    fn quadratic_non_residue() -> Self {
        // w itself
        Self::new(&[Fp6::zero(), Fp6::one()])
    }
    fn frobenius(&self, exponent: usize) -> Self {
        Fp12::frobenius(self, exponent)
    }
    fn square(&self) -> Self {
        Fp12::square(self)
    }
    fn rand<R: CryptoRngCore>(rng: &mut R) -> Self {
        Fp12::rand(rng)
    }
}

impl<'a, 'b> Mul<&'b Fp12> for &'a Fp12 {
    type Output = Fp12;
    fn mul(self, other: &'b Fp12) -> Self::Output {
        let [a0, a1] = self.0;
        let [b0, b1] = other.0;
        let t0 = a0 * b0;
        let t1 = a1 * b1;

        Fp12::new(&[t1.residue_mul() + t0, (a0 + a1) * (b0 + b1) - t0 - t1])
    }
}
impl Mul for Fp12 {
    type Output = Self;
    fn mul(self, other: Self) -> Self::Output {
        (&self).mul(&other)
    }
}
impl MulAssign for Fp12 {
    fn mul_assign(&mut self, other: Self) {
        *self = *self * other;
    }
}
impl Inv for Fp12 {
    type Output = Self;
    fn inv(self) -> Self::Output {
        // (g + hw)^{-1} = (g - hw) / (g^2 - v h^2)
        let [g, h] = self.0;
        let norm_inv = (g.square() - h.square().residue_mul()).inv();
        Self([g * norm_inv, -(h * norm_inv)])
    }
}

impl One for Fp12 {
    fn one() -> Self {
        Self::ONE
    }
    fn is_one(&self) -> bool {
        self.0[0].is_one() && self.0[1].is_zero()
    }
}

#[allow(clippy::suspicious_arithmetic_impl)]
impl Div for Fp12 {
    type Output = Self;
    fn div(self, other: Self) -> Self::Output {
        self * other.inv()
    }
}
impl DivAssign for Fp12 {
    fn div_assign(&mut self, other: Self) {
        *self = *self / other;
    }
}

impl ConditionallySelectable for Fp12 {
    #[inline(always)]
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self::new(&[
            Fp6::conditional_select(&a.0[0], &b.0[0], choice),
            Fp6::conditional_select(&a.0[1], &b.0[1], choice),
        ])
    }
}
impl Fp12 {
    /// g + hw -> g - hw, the p^6-power Frobenius. On the cyclotomic subgroup, where all
    /// pairing values live after the easy part of the final exponentiation, this is the
    /// inverse.
    pub fn unitary_inverse(&self) -> Self {
        Self::new(&[self.0[0], -self.0[1]])
    }
    /// left-to-right square and multiply over little-endian 64-bit words
    pub fn pow(&self, arg: &[u64]) -> Self {
        let mut res = Self::one();
        for e in arg.iter().rev() {
            for i in (0..64).rev() {
                res = res.square();
                if ((*e >> i) & 1) == 1 {
                    res *= *self;
                }
            }
        }
        res
    }
    pub fn rand<R: CryptoRngCore>(rng: &mut R) -> Self {
        Self([Fp6::rand(rng), Fp6::rand(rng)])
    }
    pub fn frobenius(&self, exponent: usize) -> Self {
        let h = <Fp6 as FieldExtensionTrait<6, 3>>::frobenius(&self.0[1], exponent);
        let gamma = FROBENIUS_COEFF_FP12_C1[exponent % 12];
        Self::new(&[
            <Fp6 as FieldExtensionTrait<6, 3>>::frobenius(&self.0[0], exponent),
            Fp6::new(&[h.0[0].scale(gamma), h.0[1].scale(gamma), h.0[2].scale(gamma)]),
        ])
    }
    pub fn square(&self) -> Self {
        // complex squaring, algorithm 22 of <https://eprint.iacr.org/2010/354.pdf>
        let c0 = self.0[0] - self.0[1];
        let c3 = self.0[0] - self.0[1].residue_mul();
        let c2 = self.0[0] * self.0[1];
        let c0 = c0 * c3 + c2;
        let c1 = c2 + c2;
        let c2 = c2.residue_mul();
        let c0 = c0 + c2;
        Self::new(&[c0, c1])
    }
    /// multiplication of every one of the six slots by an element of F_{p^2}
    pub(crate) fn mul_by_fp2(&self, s: &Fp2) -> Self {
        let scale6 = |a: &Fp6| Fp6::new(&[a.0[0] * *s, a.0[1] * *s, a.0[2] * *s]);
        Self::new(&[scale6(&self.0[0]), scale6(&self.0[1])])
    }
    /// Multiplication by c0 + c3 w + c4 w^3, a line evaluated at a point of G1, written out
    /// slot by slot. A product landing beyond w^5 wraps around with a factor u.
    pub(crate) fn mul_by_034(&self, c0: &Fp2, c3: &Fp2, c4: &Fp2) -> Self {
        let [z0, z1, z2] = self.0[0].0;
        let [z3, z4, z5] = self.0[1].0;

        let c3u = c3.residue_mul();
        let c4u = c4.residue_mul();

        Fp12::new(&[
            Fp6::new(&[
                *c0 * z0 + c3u * z5 + c4u * z4,
                *c0 * z1 + *c3 * z3 + c4u * z5,
                *c0 * z2 + *c3 * z4 + *c4 * z3,
            ]),
            Fp6::new(&[
                *c0 * z3 + *c3 * z0 + c4u * z2,
                *c0 * z4 + *c3 * z1 + *c4 * z0,
                *c0 * z5 + *c3 * z2 + *c4 * z1,
            ]),
        ])
    }
    /// the product of two lines of the shape c0 + c3 w + c4 w^3, returned as the five
    /// possibly nonzero slots 0 through 4 of the result, slot 5 being identically zero
    pub(crate) fn mul_034_by_034(
        d0: &Fp2,
        d3: &Fp2,
        d4: &Fp2,
        c0: &Fp2,
        c3: &Fp2,
        c4: &Fp2,
    ) -> [Fp2; 5] {
        let x0 = *c0 * *d0;
        let x3 = *c3 * *d3;
        let x4 = *c4 * *d4;
        let x04 = (*d0 + *d4) * (*c0 + *c4) - x0 - x4;
        let x03 = (*d0 + *d3) * (*c0 + *c3) - x0 - x3;
        let x34 = (*d3 + *d4) * (*c3 + *c4) - x3 - x4;

        [x4.residue_mul() + x0, x3, x34, x03, x04]
    }
    /// multiplication by an element whose slot 5 is zero, such as the output of
    /// `mul_034_by_034`
    pub(crate) fn mul_by_01234(&self, x: &[Fp2; 5]) -> Self {
        let c0 = Fp6::new(&[x[0], x[1], x[2]]);
        let c1 = Fp6::new(&[x[3], x[4], Fp2::zero()]);

        let a = (self.0[0] + self.0[1]) * (c0 + c1);
        let b = self.0[0] * c0;
        let c = self.0[1].mul_by_01(&x[3], &x[4]);

        Self::new(&[c.residue_mul() + b, a - b - c])
    }
    /// multiplication by 1 + c3 w + c4 w^3, the shape of an affine line once it has been
    /// divided through by y_P
    pub(crate) fn mul_by_34(&self, c3: &Fp2, c4: &Fp2) -> Self {
        let a = self.0[1].mul_by_01(c3, c4);
        let b = self.0[0].mul_by_01(c3, c4);

        Self::new(&[self.0[0] + a.residue_mul(), self.0[1] + b])
    }
    /// the product of two lines of the shape 1 + c3 w + c4 w^3
    pub(crate) fn mul_34_by_34(d3: &Fp2, d4: &Fp2, c3: &Fp2, c4: &Fp2) -> [Fp2; 5] {
        let x3 = *c3 * *d3;
        let x4 = *c4 * *d4;
        let x34 = (*c3 + *c4) * (*d3 + *d4) - x3 - x4;

        [x4.residue_mul() + Fp2::one(), x3, x34, *c3 + *d3, *c4 + *d4]
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use crypto_bigint::rand_core::OsRng;

    fn from_slots(x: &[Fp2; 5]) -> Fp12 {
        Fp12::new(&[
            Fp6::new(&[x[0], x[1], x[2]]),
            Fp6::new(&[x[3], x[4], Fp2::zero()]),
        ])
    }
    fn line_034(c0: &Fp2, c3: &Fp2, c4: &Fp2) -> Fp12 {
        Fp12::new(&[
            Fp6::new(&[*c0, Fp2::zero(), Fp2::zero()]),
            Fp6::new(&[*c3, *c4, Fp2::zero()]),
        ])
    }
    mod multiplication_tests {
        use super::*;

        #[test]
        fn test_field_axioms() {
            let [a, b, c] = [(); 3].map(|_| Fp12::rand(&mut OsRng));
            assert_eq!(a * b, b * a);
            assert_eq!((a * b) * c, a * (b * c));
            assert_eq!(a * (b + c), a * b + a * c);
            assert_eq!((a / b) * b, a);
            assert_eq!(a * a.inv(), Fp12::ONE);
            assert_eq!(a / Fp12::ZERO, Fp12::ZERO, "1/0 must map to 0");
        }
        #[test]
        fn test_square_and_pow() {
            let a = Fp12::rand(&mut OsRng);
            let w = <Fp12 as FieldExtensionTrait<12, 2>>::quadratic_non_residue();
            let v = <Fp6 as FieldExtensionTrait<6, 3>>::quadratic_non_residue();
            assert_eq!(w * w, Fp12::new(&[v, Fp6::ZERO]), "w^2 must be v");
            assert_eq!(a.square(), a * a);
            assert_eq!(a.pow(&[3]), a * a * a);
            assert_eq!(a.pow(&[0, 1]), (0..64).fold(a, |acc, _| acc.square()));
        }
        #[test]
        fn test_sparse_multiplication() {
            for _ in 0..10 {
                let z = Fp12::rand(&mut OsRng);
                let [c0, c3, c4, d0, d3, d4] = [(); 6].map(|_| Fp2::rand(&mut OsRng));
                let s = Fp2::rand(&mut OsRng);

                assert_eq!(
                    z.mul_by_034(&c0, &c3, &c4),
                    z * line_034(&c0, &c3, &c4),
                    "mul_by_034 failed"
                );
                let prod = Fp12::mul_034_by_034(&d0, &d3, &d4, &c0, &c3, &c4);
                assert_eq!(
                    from_slots(&prod),
                    line_034(&d0, &d3, &d4) * line_034(&c0, &c3, &c4),
                    "mul_034_by_034 failed"
                );
                assert_eq!(
                    z.mul_by_01234(&prod),
                    z * from_slots(&prod),
                    "mul_by_01234 failed"
                );
                assert_eq!(
                    z.mul_by_34(&c3, &c4),
                    z * line_034(&Fp2::one(), &c3, &c4),
                    "mul_by_34 failed"
                );
                assert_eq!(
                    from_slots(&Fp12::mul_34_by_34(&d3, &d4, &c3, &c4)),
                    line_034(&Fp2::one(), &d3, &d4) * line_034(&Fp2::one(), &c3, &c4),
                    "mul_34_by_34 failed"
                );
                assert_eq!(
                    z.mul_by_fp2(&s),
                    z * line_034(&s, &Fp2::zero(), &Fp2::zero()),
                    "mul_by_fp2 failed"
                );
            }
        }

        #[test]
        fn test_frobenius() {
            let a = Fp12::rand(&mut OsRng);
            let b = Fp12::rand(&mut OsRng);
            let mut c = a;
            for _ in 0..12 {
                c = c.frobenius(1);
            }
            assert_eq!(a, c, "Frobenius failed at cycle order 12");
            for (k, order) in [(2, 6), (3, 4), (4, 3), (6, 2)] {
                let c = (0..order).fold(a, |acc, _| acc.frobenius(k));
                assert_eq!(a, c, "p^{k} Frobenius does not have order {order}");
            }
            assert_eq!(
                a.frobenius(6),
                a.unitary_inverse(),
                "The p^6 Frobenius is the conjugation"
            );
            for k in 0..12 {
                assert_eq!(
                    (a * b).frobenius(k),
                    a.frobenius(k) * b.frobenius(k),
                    "Frobenius is not multiplicative"
                );
                assert_eq!(
                    a.frobenius(k).frobenius(1),
                    a.frobenius(k + 1),
                    "Frobenius powers do not compose"
                );
            }
        }
    }
    #[test]
    fn test_unitary_inverse() {
        // m^{p^6 - 1} lies in the cyclotomic subgroup, where conjugation inverts
        let m = Fp12::rand(&mut OsRng);
        let f = m.unitary_inverse() * m.inv();
        assert_eq!(f * f.unitary_inverse(), Fp12::ONE);
    }
}
