//! The two prime fields of BLS12-377, both generated by `define_finite_prime_field!`:
//!
//! 1. `Fp`, the 377-bit base field. $E: y^2=x^3+1$ is defined over it, and the tower
//!    $\mathbb{F}_{p^2}$, $\mathbb{F}_{p^6}$, $\mathbb{F}_{p^{12}}$ is built on top of it.
//! 2. `Fr`, the 253-bit scalar field, the integers modulo the order $r$ of $\mathbb{G}_1$,
//!    $\mathbb{G}_2$, and $\mathbb{G}_T$.
//!
//! Elements are kept in Montgomery form through `ConstMontyForm`, so every binary operation
//! is constant time.
//!
//! Clippy cannot see through the macro, hence the `#[allow(unused_imports)]` below.

use crypto_bigint::subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
#[allow(unused_imports)]
use crypto_bigint::{
    impl_modulus, modular::ConstMontyParams, rand_core::CryptoRngCore, RandomMod, U256, U384,
};
use num_traits::{Inv, One, Pow, Zero};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use subtle::CtOption;

/// What every level of the tower provides. `D` is the degree over $\mathbb{F}_p$ and `N` the
/// number of coefficients over the level below, which lets the base field act as the
/// coefficient field of $\mathbb{F}_{p^2}$.
pub trait FieldExtensionTrait<const D: usize, const N: usize>:
    Sized
    + Copy
    + Clone
    + std::fmt::Debug
    + Default
    + Add<Output = Self>
    + AddAssign
    + Sub<Output = Self>
    + SubAssign
    + Mul<Output = Self>
    + MulAssign
    + Div<Output = Self>
    + DivAssign
    + Neg<Output = Self>
    + PartialEq
    + ConstantTimeEq
    + ConditionallySelectable
    + Zero
    + One
    + Inv<Output = Self>
    + From<u64>
{
    /// the element adjoined to build the next level up
    fn quadratic_non_residue() -> Self;
    /// $x \mapsto x^{p^k}$
    fn frobenius(&self, exponent: usize) -> Self;
    fn square(&self) -> Self;
    fn rand<R: CryptoRngCore>(rng: &mut R) -> Self;
}

/// Wraps a `ConstMontyForm` over a modulus given as a hex string. `impl_modulus!` has to name
/// the struct it generates, so the base and scalar fields each pass their own names for it
/// and for the Montgomery alias.
macro_rules! define_finite_prime_field {
    ($wrapper_name:ident, $modulus_struct:ident, $monty:ident, $uint_type:ty, $modulus:expr) => {
        impl_modulus!($modulus_struct, $uint_type, $modulus);

        type $monty = crypto_bigint::modular::ConstMontyForm<
            $modulus_struct,
            { $modulus_struct::LIMBS },
        >;
        #[derive(Clone, Debug, Copy)]
        pub struct $wrapper_name($modulus_struct, $monty);

        impl $wrapper_name {
            /// reduces `value` into Montgomery form
            pub const fn new(value: $uint_type) -> Self {
                Self($modulus_struct, $monty::new(&value))
            }
            /// parses a decimal string, as found in the reference data
            #[allow(dead_code)]
            pub(crate) fn new_from_str(value: &str) -> Option<Self> {
                let ten = Self::from(10u64);
                let mut res = Self::zero();
                for c in value.chars() {
                    match c.to_digit(10) {
                        Some(d) => {
                            res *= ten;
                            res += Self::from(u64::from(d));
                        }
                        None => return None,
                    }
                }
                Some(res)
            }
            /// the canonical integer in $[0, p)$
            pub const fn value(&self) -> $uint_type {
                self.1.retrieve()
            }
            pub fn characteristic() -> $uint_type {
                <$uint_type>::from($modulus_struct::MODULUS.as_nz_ref().get())
            }
            pub fn square(&self) -> Self {
                Self($modulus_struct, self.1.square())
            }
            pub fn rand<R: CryptoRngCore>(rng: &mut R) -> Self {
                Self::new(<$uint_type>::random_mod(
                    rng,
                    $modulus_struct::MODULUS.as_nz_ref(),
                ))
            }
            pub const ZERO: Self = Self::new(<$uint_type>::ZERO);
            pub const ONE: Self = Self::new(<$uint_type>::ONE);
            pub const TWO: Self = Self::new(<$uint_type>::from_u64(2));
            pub const THREE: Self = Self::new(<$uint_type>::from_u64(3));
            pub const FOUR: Self = Self::new(<$uint_type>::from_u64(4));
            pub const EIGHT: Self = Self::new(<$uint_type>::from_u64(8));
        }
        impl From<u64> for $wrapper_name {
            fn from(value: u64) -> Self {
                Self::new(<$uint_type>::from_u64(value))
            }
        }
        impl Add for $wrapper_name {
            type Output = Self;
            fn add(self, other: Self) -> Self {
                Self($modulus_struct, self.1 + other.1)
            }
        }
        impl AddAssign for $wrapper_name {
            fn add_assign(&mut self, other: Self) {
                *self = *self + other;
            }
        }
        impl Zero for $wrapper_name {
            fn zero() -> Self {
                Self::ZERO
            }
            fn is_zero(&self) -> bool {
                bool::from(self.1.ct_eq(&Self::ZERO.1))
            }
        }
        impl One for $wrapper_name {
            fn one() -> Self {
                Self::ONE
            }
        }
        impl Default for $wrapper_name {
            fn default() -> Self {
                Self::ZERO
            }
        }
        impl Sub for $wrapper_name {
            type Output = Self;
            fn sub(self, other: Self) -> Self {
                Self($modulus_struct, self.1 - other.1)
            }
        }
        impl SubAssign for $wrapper_name {
            fn sub_assign(&mut self, other: Self) {
                *self = *self - other;
            }
        }
        impl ConstantTimeEq for $wrapper_name {
            fn ct_eq(&self, other: &Self) -> Choice {
                self.1.ct_eq(&other.1)
            }
        }
        impl PartialEq for $wrapper_name {
            #[inline]
            fn eq(&self, other: &Self) -> bool {
                bool::from(self.ct_eq(other))
            }
        }
        impl Eq for $wrapper_name {}
        impl ConditionallySelectable for $wrapper_name {
            fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
                Self::new(<$uint_type>::conditional_select(
                    &a.value(),
                    &b.value(),
                    choice,
                ))
            }
        }
        impl Mul for $wrapper_name {
            type Output = Self;
            fn mul(self, other: Self) -> Self {
                Self($modulus_struct, self.1 * other.1)
            }
        }
        impl MulAssign for $wrapper_name {
            fn mul_assign(&mut self, other: Self) {
                *self = *self * other;
            }
        }
        /// Constant-time Bernstein-Yang inversion, <https://eprint.iacr.org/2019/266.pdf>.
        /// Zero has no inverse and maps to zero, which lets degenerate inputs such as points
        /// at infinity flow through batched inversions and line evaluations as zeros.
        impl Inv for $wrapper_name {
            type Output = Self;
            fn inv(self) -> Self {
                Self(
                    $modulus_struct,
                    CtOption::from(self.1.inv()).unwrap_or(Self::ZERO.1),
                )
            }
        }
        #[allow(clippy::suspicious_arithmetic_impl)]
        impl Div for $wrapper_name {
            type Output = Self;
            fn div(self, other: Self) -> Self {
                self * other.inv()
            }
        }
        impl DivAssign for $wrapper_name {
            fn div_assign(&mut self, other: Self) {
                *self = *self / other;
            }
        }
        impl Neg for $wrapper_name {
            type Output = Self;
            fn neg(self) -> Self {
                Self($modulus_struct, -self.1)
            }
        }
        impl Pow<$uint_type> for $wrapper_name {
            type Output = Self;
            fn pow(self, rhs: $uint_type) -> Self::Output {
                Self($modulus_struct, self.1.pow(&rhs))
            }
        }
    };
}

const BLS12_377_MOD_STRING: &str = "01ae3a4617c510eac63b05c06ca1493b1a22d9f300f5138f1ef3622fba094800170b5d44300000008508c00000000001";
const BLS12_377_SCALAR_MOD_STRING: &str =
    "12ab655e9a2ca55660b44d1e5c37b00159aa76fed00000010a11800000000001";
define_finite_prime_field!(Fp, FpModulus, FpMonty, U384, BLS12_377_MOD_STRING);
define_finite_prime_field!(Fr, FrModulus, FrMonty, U256, BLS12_377_SCALAR_MOD_STRING);

// -5, the non-residue adjoined to build the quadratic extension
const FP_QUADRATIC_NON_RESIDUE: Fp = Fp::new(U384::from_words([
    0x8508bffffffffffc,
    0x170b5d4430000000,
    0x1ef3622fba094800,
    0x1a22d9f300f5138f,
    0xc63b05c06ca1493b,
    0x01ae3a4617c510ea,
]));

impl FieldExtensionTrait<1, 1> for Fp {
    fn quadratic_non_residue() -> Self {
        FP_QUADRATIC_NON_RESIDUE
    }
    // x^p = x for every x in the base field
    fn frobenius(&self, _exponent: usize) -> Self {
        *self
    }
    fn square(&self) -> Self {
        Fp::square(self)
    }
    fn rand<R: CryptoRngCore>(rng: &mut R) -> Self {
        Fp::rand(rng)
    }
}
// Fp as the coefficient field of Fp2
impl FieldExtensionTrait<2, 2> for Fp {
    fn quadratic_non_residue() -> Self {
        <Fp as FieldExtensionTrait<1, 1>>::quadratic_non_residue()
    }
    fn frobenius(&self, exponent: usize) -> Self {
        <Fp as FieldExtensionTrait<1, 1>>::frobenius(self, exponent)
    }
    fn square(&self) -> Self {
        Fp::square(self)
    }
    fn rand<R: CryptoRngCore>(rng: &mut R) -> Self {
        Fp::rand(rng)
    }
}
