//! This describes the quadratic field extension of the base field of BLS12-377
//! defined by the tower Fp^2 = Fp[u] / (u^2 - \beta), with \beta = -5. The quadratic nature
//! implies that elements of this field are represented as a_0 + a_1 u.
//!
//! This is the field over which the sextic twist E': y^2 = x^3 + 1/u is defined, and therefore
//! the field in which all the line coefficients of the Miller loop live.
use crate::fields::extensions::FieldExtension;
use crate::fields::fp::{FieldExtensionTrait, Fp};
use crypto_bigint::{rand_core::CryptoRngCore, subtle::ConditionallySelectable};
use num_traits::{Inv, One, Zero};
use std::ops::{Div, DivAssign, Mul, MulAssign};
use subtle::Choice;

pub type Fp2 = FieldExtension<2, 2, Fp>;

impl Fp2 {
    pub const ZERO: Self = Self::new(&[Fp::ZERO, Fp::ZERO]);
    pub const ONE: Self = Self::new(&[Fp::ONE, Fp::ZERO]);

    /// multiplication by the generator u of the extension, which is the non-residue
    /// used to build the sextic extension above us
    pub(crate) fn residue_mul(&self) -> Self {
        Self::new(&[
            self.0[1] * <Fp as FieldExtensionTrait<1, 1>>::quadratic_non_residue(),
            self.0[0],
        ])
    }
    /// the nontrivial automorphism of the extension, a_0 + a_1 u -> a_0 - a_1 u, which is
    /// exactly the p-power Frobenius
    pub fn conjugate(&self) -> Self {
        Self::new(&[self.0[0], -self.0[1]])
    }
    pub fn square(&self) -> Self {
        // complex squaring, trading one multiplication for additions
        let beta = <Fp as FieldExtensionTrait<1, 1>>::quadratic_non_residue();
        let v0 = self.0[0] * self.0[1];
        let c0 = (self.0[0] + self.0[1]) * (self.0[0] + self.0[1] * beta) - v0 - v0 * beta;
        Self::new(&[c0, v0 + v0])
    }
    pub fn rand<R: CryptoRngCore>(rng: &mut R) -> Self {
        Self::new(&[Fp::rand(rng), Fp::rand(rng)])
    }
}

impl FieldExtensionTrait<2, 2> for Fp2 {
    fn quadratic_non_residue() -> Self {
        // u itself
        Self::new(&[Fp::ZERO, Fp::ONE])
    }
    fn frobenius(&self, exponent: usize) -> Self {
        match exponent % 2 {
            0 => *self,
            _ => self.conjugate(),
        }
    }
    fn square(&self) -> Self {
        Fp2::square(self)
    }
    fn rand<R: CryptoRngCore>(rng: &mut R) -> Self {
        Fp2::rand(rng)
    }
}

impl Mul for Fp2 {
    type Output = Self;
    fn mul(self, other: Self) -> Self::Output {
        // This requires a bit more consideration. In Fp2,
        // in order to multiply, we must implement complex Karatsuba
        // multiplication.
        // See https://eprint.iacr.org/2006/471.pdf, Sec 3
        // We create the addition chain from Algo 1 of https://eprint.iacr.org/2022/367.pdf
        let t0 = self.0[0] * other.0[0];
        let t1 = self.0[1] * other.0[1];

        Self::new(&[
            t0 + t1 * <Fp as FieldExtensionTrait<1, 1>>::quadratic_non_residue(),
            (self.0[0] + self.0[1]) * (other.0[0] + other.0[1]) - t0 - t1,
        ])
    }
}
impl MulAssign for Fp2 {
    fn mul_assign(&mut self, other: Self) {
        *self = *self * other;
    }
}
impl Inv for Fp2 {
    type Output = Self;
    fn inv(self) -> Self::Output {
        // the norm a_0^2 - \beta a_1^2 lives in the base field, whose inverse maps 0 to 0,
        // so that the same convention holds here
        let norm = self.0[0].square()
            - self.0[1].square() * <Fp as FieldExtensionTrait<1, 1>>::quadratic_non_residue();
        let inverse = norm.inv();
        Self::new(&[self.0[0] * inverse, -(self.0[1] * inverse)])
    }
}
#[allow(clippy::suspicious_arithmetic_impl)]
impl Div for Fp2 {
    type Output = Self;
    fn div(self, other: Self) -> Self::Output {
        self * other.inv()
    }
}
impl DivAssign for Fp2 {
    fn div_assign(&mut self, other: Self) {
        *self = *self / other;
    }
}
impl One for Fp2 {
    fn one() -> Self {
        Self::ONE
    }
    fn is_one(&self) -> bool {
        self.0[0].is_one() && self.0[1].is_zero()
    }
}
impl ConditionallySelectable for Fp2 {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self::new(&[
            Fp::conditional_select(&a.0[0], &b.0[0], choice),
            Fp::conditional_select(&a.0[1], &b.0[1], choice),
        ])
    }
}

// make the quadratic extension visible to the sextic extension
impl FieldExtensionTrait<6, 3> for Fp2 {
    fn quadratic_non_residue() -> Self {
        <Fp2 as FieldExtensionTrait<2, 2>>::quadratic_non_residue()
    }
    fn frobenius(&self, exponent: usize) -> Self {
        <Fp2 as FieldExtensionTrait<2, 2>>::frobenius(self, exponent)
    }
    fn square(&self) -> Self {
        Fp2::square(self)
    }
    fn rand<R: CryptoRngCore>(rng: &mut R) -> Self {
        Fp2::rand(rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crypto_bigint::rand_core::OsRng;
    use crypto_bigint::U384;

    fn create_field(value: [u64; 6]) -> Fp {
        Fp::new(U384::from_words(value))
    }
    fn create_field_extension(v1: [u64; 6], v2: [u64; 6]) -> Fp2 {
        Fp2::new(&[create_field(v1), create_field(v2)])
    }

    mod residue_tests {
        use super::*;
        #[test]
        fn test_generator_squares_to_non_residue() {
            let u = <Fp2 as FieldExtensionTrait<2, 2>>::quadratic_non_residue();
            assert_eq!(
                u * u,
                Fp2::new(&[-Fp::from(5), Fp::ZERO]),
                "u^2 must be -5"
            );
            let a = create_field_extension([1, 2, 3, 4, 5, 6], [6, 5, 4, 3, 2, 1]);
            assert_eq!(a.residue_mul(), a * u, "Multiplication by u failed");
        }
    }
    mod multiplication_tests {
        use super::*;

        #[test]
        fn test_multiplication_properties() {
            let a = create_field_extension([1, 0, 0, 0, 0, 7], [0, 2, 0, 0, 3, 0]);
            let b = create_field_extension([0, 0, 3, 0, 0, 0], [0, 0, 0, 4, 0, 0]);
            let c = create_field_extension([5, 0, 0, 0, 0, 0], [0, 6, 0, 0, 0, 1]);
            assert_eq!(a * b, b * a, "Multiplication is not commutative");
            assert_eq!(
                (a * b) * c,
                a * (b * c),
                "Multiplication is not associative"
            );
            assert_eq!(
                a * (b + c),
                a * b + a * c,
                "Multiplication is not distributive"
            );
        }

        #[test]
        fn test_multiplication_cases() {
            // (1 + 2u)(3 + 4u) = 3 + 8u^2 + 10u = -37 + 10u
            let a = Fp2::new(&[Fp::from(1), Fp::from(2)]);
            let b = Fp2::new(&[Fp::from(3), Fp::from(4)]);
            assert_eq!(
                a * b,
                Fp2::new(&[-Fp::from(37), Fp::from(10)]),
                "Simple multiplication failed"
            );
            assert_eq!(a.scale(Fp::TWO), a + a, "Scaling failed");
        }

        #[test]
        fn test_square() {
            for _ in 0..100 {
                let a = Fp2::rand(&mut OsRng);
                assert_eq!(a.square(), a * a, "Squaring failed");
            }
        }
    }
    mod division_tests {
        use super::*;

        #[test]
        fn test_division_cases() {
            let a = create_field_extension([1, 2, 3, 4, 5, 6], [6, 5, 4, 3, 2, 1]);
            let b = create_field_extension([9, 8, 7, 6, 5, 4], [4, 5, 6, 7, 8, 9]);
            assert_eq!(a / a, Fp2::one(), "Division by self failed");
            assert_eq!(a / Fp2::one(), a, "Division by one failed");
            assert_eq!((a / b) * b, a, "Division-Mult composition failed");
        }
        #[test]
        fn test_divide_by_zero() {
            let a = Fp2::one();
            assert_eq!(a / Fp2::zero(), Fp2::zero(), "1/0 must map to 0");
        }
    }
    mod frobenius_tests {
        use super::*;

        #[test]
        fn test_frobenius() {
            for _ in 0..10 {
                let a = Fp2::rand(&mut OsRng);
                let b = Fp2::rand(&mut OsRng);
                let frob = |x: &Fp2| <Fp2 as FieldExtensionTrait<2, 2>>::frobenius(x, 1);
                assert_eq!(frob(&frob(&a)), a, "Frobenius failed at cycle order 2");
                assert_eq!(
                    frob(&(a * b)),
                    frob(&a) * frob(&b),
                    "Frobenius is not multiplicative"
                );
                assert_eq!(
                    (a * a.conjugate()).0[1],
                    Fp::ZERO,
                    "The norm must lie in the base field"
                );
            }
        }
    }
    mod invariants {
        use super::*;
        use proptest::prelude::*;

        fn arbitrary_fp2() -> impl Strategy<Value = Fp2> {
            any::<[u64; 2]>().prop_map(|[a, b]| Fp2::new(&[Fp::from(a), Fp::from(b)]))
        }

        proptest! {
            #[test]
            fn test_inverse(a in arbitrary_fp2()) {
                prop_assume!(!a.is_zero());
                prop_assert_eq!(a * a.inv(), Fp2::one());
            }
            #[test]
            fn test_square_is_product(a in arbitrary_fp2()) {
                prop_assert_eq!(a.square(), a * a);
            }
            #[test]
            fn test_norm_in_base_field(a in arbitrary_fp2(), b in arbitrary_fp2()) {
                let n = |x: Fp2| x * x.conjugate();
                prop_assert_eq!(n(a).0[1], Fp::ZERO);
                prop_assert_eq!(n(a * b), n(a) * n(b));
            }
        }
    }
}
