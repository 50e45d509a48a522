//! The coefficient-wise part of every level of the tower. An element of a degree-`N`
//! extension is stored as its `N` coefficients over the level below, so addition,
//! subtraction, negation, equality, and scaling by a coefficient are the same everywhere and
//! live here. Multiplication depends on the modulus polynomial and is written per level in
//! `fp2`, `fp6`, and `fp12`.

use crate::fields::fp::FieldExtensionTrait;
use crypto_bigint::subtle::{Choice, ConstantTimeEq};
use num_traits::Zero;
use std::array;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

// Only the constructor is const. The trait arithmetic cannot be until const traits land,
// <https://github.com/rust-lang/rust/issues/67792>.
#[derive(Copy, Clone, Debug)]
pub struct FieldExtension<const D: usize, const N: usize, F: FieldExtensionTrait<D, N>>(
    pub(crate) [F; N],
);

impl<const D: usize, const N: usize, F: FieldExtensionTrait<D, N>> FieldExtension<D, N, F> {
    pub const fn new(c: &[F; N]) -> Self {
        Self(*c)
    }
    fn map(&self, f: impl Fn(F) -> F) -> Self {
        Self(array::from_fn(|i| f(self.0[i])))
    }
    fn zip_with(&self, other: &Self, f: impl Fn(F, F) -> F) -> Self {
        Self(array::from_fn(|i| f(self.0[i], other.0[i])))
    }
    /// Every coefficient times `factor`, an element of the level below. This is much cheaper
    /// than a full product, and the twist maps and Frobenius constants rely on it.
    pub fn scale(&self, factor: F) -> Self {
        self.map(|c| c * factor)
    }
}

impl<const D: usize, const N: usize, F: FieldExtensionTrait<D, N>> From<u64>
    for FieldExtension<D, N, F>
{
    fn from(value: u64) -> Self {
        Self(array::from_fn(|i| {
            if i == 0 {
                F::from(value)
            } else {
                F::zero()
            }
        }))
    }
}

impl<const D: usize, const N: usize, F: FieldExtensionTrait<D, N>> ConstantTimeEq
    for FieldExtension<D, N, F>
{
    #[inline(always)]
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0
            .iter()
            .zip(&other.0)
            .fold(Choice::from(1u8), |acc, (a, b)| acc & a.ct_eq(b))
    }
}
impl<const D: usize, const N: usize, F: FieldExtensionTrait<D, N>> PartialEq
    for FieldExtension<D, N, F>
{
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}
impl<const D: usize, const N: usize, F: FieldExtensionTrait<D, N>> Eq for FieldExtension<D, N, F> {}

impl<const D: usize, const N: usize, F: FieldExtensionTrait<D, N>> Add for FieldExtension<D, N, F> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        self.zip_with(&rhs, |a, b| a + b)
    }
}
impl<const D: usize, const N: usize, F: FieldExtensionTrait<D, N>> Sub for FieldExtension<D, N, F> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        self.zip_with(&rhs, |a, b| a - b)
    }
}
impl<const D: usize, const N: usize, F: FieldExtensionTrait<D, N>> Neg for FieldExtension<D, N, F> {
    type Output = Self;
    fn neg(self) -> Self {
        self.map(|c| -c)
    }
}
impl<const D: usize, const N: usize, F: FieldExtensionTrait<D, N>> AddAssign
    for FieldExtension<D, N, F>
{
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}
impl<const D: usize, const N: usize, F: FieldExtensionTrait<D, N>> SubAssign
    for FieldExtension<D, N, F>
{
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<const D: usize, const N: usize, F: FieldExtensionTrait<D, N>> Default
    for FieldExtension<D, N, F>
{
    fn default() -> Self {
        Self::zero()
    }
}
impl<const D: usize, const N: usize, F: FieldExtensionTrait<D, N>> Zero
    for FieldExtension<D, N, F>
{
    fn zero() -> Self {
        Self([F::zero(); N])
    }
    fn is_zero(&self) -> bool {
        self.0.iter().all(Zero::is_zero)
    }
}
