//! This module contains the generic short Weierstrass machinery shared by $\mathbb{G}_1$ and
//! $\mathbb{G}_2$. Both curves have the form $y^2 = x^3 + b$, with $b=1$ over the base field for
//! $E$ and $b=1/u$ over the quadratic extension for the twist $E'$, so everything below is
//! written once over a field implementing `CurveField`, and the specifics (generators, the
//! value of $b$) live in `g1.rs` and `g2.rs`.
//!
//! Because the point at infinity has no unique representation in affine coordinates, all
//! arithmetic is performed in homogeneous projective coordinates, using the complete formulae of
//! Renes, Costello, and Batina, see <https://eprint.iacr.org/2015/1060.pdf>. Complete means there
//! are no exceptional cases, the same sequence of field operations handles doubling, adding
//! the identity, and adding inverses.
use crate::fields::fp::{FieldExtensionTrait, Fr};
use crypto_bigint::rand_core::CryptoRngCore;
use crypto_bigint::subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// Failure modes of the public point constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupError {
    /// the coordinates do not satisfy the curve equation
    NotOnCurve,
    /// the point is on the curve, but not in the r-torsion
    NotInSubgroup,
}

impl std::fmt::Display for GroupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GroupError::NotOnCurve => write!(f, "point is not on the curve"),
            GroupError::NotInSubgroup => write!(f, "point is not in the prime order subgroup"),
        }
    }
}

impl std::error::Error for GroupError {}

/// A field over which one of the curves of the pairing is defined, carrying the coefficient
/// $b$ of $y^2 = x^3 + b$.
pub trait CurveField<const D: usize, const N: usize>: FieldExtensionTrait<D, N> {
    fn curve_constant() -> Self;
}

pub trait GroupTrait<const D: usize, const N: usize, F: FieldExtensionTrait<D, N>>:
    Sized + Copy + Clone + std::fmt::Debug + Neg + ConstantTimeEq + ConditionallySelectable + PartialEq
{
    fn generator() -> Self;
    fn rand<R: CryptoRngCore>(rng: &mut R) -> Self;
    /// membership in the r-torsion, checked naively as $(r)P = \mathcal{O}$
    fn is_torsion_free(&self) -> Choice;
}

#[derive(Copy, Clone, Debug)]
pub struct GroupAffine<const D: usize, const N: usize, F: FieldExtensionTrait<D, N>> {
    pub(crate) x: F,
    pub(crate) y: F,
    pub(crate) infinity: Choice,
}

impl<const D: usize, const N: usize, F: CurveField<D, N>> GroupAffine<D, N, F> {
    /// the point at infinity, which by convention we store as (0, 1)
    pub fn zero() -> Self {
        Self {
            x: F::zero(),
            y: F::one(),
            infinity: Choice::from(1u8),
        }
    }
    pub fn is_zero(&self) -> bool {
        bool::from(self.infinity)
    }
    /// Creates a point without checking the curve or the subgroup. Used internally for values
    /// that are known to be valid by construction, such as the generators.
    pub(crate) fn new_unchecked(x: F, y: F) -> Self {
        Self {
            x,
            y,
            infinity: Choice::from(0u8),
        }
    }
    pub fn is_on_curve(&self) -> Choice {
        let lhs = self.y.square() - self.x.square() * self.x;
        lhs.ct_eq(&F::curve_constant()) | self.infinity
    }
    pub fn x(&self) -> F {
        self.x
    }
    pub fn y(&self) -> F {
        self.y
    }
}

impl<const D: usize, const N: usize, F: FieldExtensionTrait<D, N>> Neg for GroupAffine<D, N, F> {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            x: self.x,
            y: F::conditional_select(&-self.y, &F::one(), self.infinity),
            infinity: self.infinity,
        }
    }
}

impl<const D: usize, const N: usize, F: FieldExtensionTrait<D, N>> ConstantTimeEq
    for GroupAffine<D, N, F>
{
    fn ct_eq(&self, other: &Self) -> Choice {
        // either they're both infinity, or neither are and the coords match
        (self.infinity & other.infinity)
            | ((!self.infinity)
                & (!other.infinity)
                & self.x.ct_eq(&other.x)
                & self.y.ct_eq(&other.y))
    }
}

impl<const D: usize, const N: usize, F: FieldExtensionTrait<D, N>> ConditionallySelectable
    for GroupAffine<D, N, F>
{
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            x: F::conditional_select(&a.x, &b.x, choice),
            y: F::conditional_select(&a.y, &b.y, choice),
            infinity: Choice::conditional_select(&a.infinity, &b.infinity, choice),
        }
    }
}

impl<const D: usize, const N: usize, F: FieldExtensionTrait<D, N>> PartialEq
    for GroupAffine<D, N, F>
{
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}

#[derive(Copy, Clone, Debug)]
pub struct GroupProjective<const D: usize, const N: usize, F: FieldExtensionTrait<D, N>> {
    pub(crate) x: F,
    pub(crate) y: F,
    pub(crate) z: F,
}

impl<const D: usize, const N: usize, F: CurveField<D, N>> GroupProjective<D, N, F> {
    /// the point at infinity, canonically (0 : 1 : 0)
    pub fn zero() -> Self {
        Self {
            x: F::zero(),
            y: F::one(),
            z: F::zero(),
        }
    }
    pub fn is_zero(&self) -> bool {
        self.z.is_zero()
    }
    pub fn is_on_curve(&self) -> Choice {
        // y^2 z = x^3 + b z^3
        let lhs = self.y.square() * self.z;
        let rhs = self.x.square() * self.x + self.z.square() * self.z * F::curve_constant();
        lhs.ct_eq(&rhs) | Choice::from(self.z.is_zero() as u8)
    }
    fn mul_by_3b(t: F) -> F {
        let b = F::curve_constant();
        t * (b + b + b)
    }
    /// Algorithm 9 of <https://eprint.iacr.org/2015/1060.pdf>, specialised to a = 0
    pub fn double(&self) -> Self {
        let t0 = self.y.square();
        let z3 = t0 + t0;
        let z3 = z3 + z3;
        let z3 = z3 + z3;
        let t1 = self.y * self.z;
        let t2 = Self::mul_by_3b(self.z.square());
        let x3 = t2 * z3;
        let y3 = t0 + t2;
        let z3 = t1 * z3;
        let t1 = t2 + t2;
        let t2 = t1 + t2;
        let t0 = t0 - t2;
        let y3 = x3 + t0 * y3;
        let t1 = self.x * self.y;
        let x3 = t0 * t1;
        let x3 = x3 + x3;

        let tmp = Self {
            x: x3,
            y: y3,
            z: z3,
        };
        Self::conditional_select(&tmp, &Self::zero(), Choice::from(self.is_zero() as u8))
    }
    /// Double-and-add over little-endian 64-bit words, most significant bit first. The
    /// conditional select keeps the sequence of group operations independent of the scalar.
    ///
    /// <https://en.wikipedia.org/wiki/Elliptic_curve_point_multiplication#Double-and-add>
    pub(crate) fn mul_by_words(&self, words: &[u64]) -> Self {
        let mut res = Self::zero();
        for word in words.iter().rev() {
            for i in (0..64).rev() {
                res = res.double();
                let bit = Choice::from(((word >> i) & 1) as u8);
                res = Self::conditional_select(&res, &(&res + self), bit);
            }
        }
        res
    }
    pub fn is_torsion_free(&self) -> Choice {
        let r = Fr::characteristic().to_words();
        Choice::from(self.mul_by_words(&r).is_zero() as u8)
    }
}

impl<const D: usize, const N: usize, F: FieldExtensionTrait<D, N>> Neg
    for GroupProjective<D, N, F>
{
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self {
            x: self.x,
            y: -self.y,
            z: self.z,
        }
    }
}
impl<const D: usize, const N: usize, F: FieldExtensionTrait<D, N>> ConstantTimeEq
    for GroupProjective<D, N, F>
{
    fn ct_eq(&self, other: &Self) -> Choice {
        // are the points the same when converted to affine
        let x0 = self.x * other.z;
        let x1 = other.x * self.z;

        let y0 = self.y * other.z;
        let y1 = other.y * self.z;

        let i_am_zero = Choice::from(self.z.is_zero() as u8);
        let you_are_zero = Choice::from(other.z.is_zero() as u8);

        (i_am_zero & you_are_zero) // Both point at infinity
            | ((!i_am_zero) & (!you_are_zero) & x0.ct_eq(&x1) & y0.ct_eq(&y1))
    }
}
impl<const D: usize, const N: usize, F: FieldExtensionTrait<D, N>> ConditionallySelectable
    for GroupProjective<D, N, F>
{
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            x: F::conditional_select(&a.x, &b.x, choice),
            y: F::conditional_select(&a.y, &b.y, choice),
            z: F::conditional_select(&a.z, &b.z, choice),
        }
    }
}
impl<const D: usize, const N: usize, F: FieldExtensionTrait<D, N>> PartialEq
    for GroupProjective<D, N, F>
{
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}

impl<'a, 'b, const D: usize, const N: usize, F: CurveField<D, N>> Add<&'b GroupProjective<D, N, F>>
    for &'a GroupProjective<D, N, F>
{
    type Output = GroupProjective<D, N, F>;
    /// Algorithm 7 of <https://eprint.iacr.org/2015/1060.pdf>, specialised to a = 0
    fn add(self, other: &'b GroupProjective<D, N, F>) -> Self::Output {
        let t0 = self.x * other.x;
        let t1 = self.y * other.y;
        let t2 = self.z * other.z;
        let t3 = (self.x + self.y) * (other.x + other.y) - (t0 + t1);
        let t4 = (self.y + self.z) * (other.y + other.z) - (t1 + t2);
        let y3 = (self.x + self.z) * (other.x + other.z) - (t0 + t2);
        let x3 = t0 + t0;
        let t0 = x3 + t0;
        let t2 = GroupProjective::<D, N, F>::mul_by_3b(t2);
        let z3 = t1 + t2;
        let t1 = t1 - t2;
        let y3 = GroupProjective::<D, N, F>::mul_by_3b(y3);
        let x3 = t3 * t1 - t4 * y3;
        let y3 = t1 * z3 + y3 * t0;
        let z3 = z3 * t4 + t0 * t3;

        Self::Output {
            x: x3,
            y: y3,
            z: z3,
        }
    }
}
impl<'a, 'b, const D: usize, const N: usize, F: CurveField<D, N>> Sub<&'b GroupProjective<D, N, F>>
    for &'a GroupProjective<D, N, F>
{
    type Output = GroupProjective<D, N, F>;
    fn sub(self, other: &'b GroupProjective<D, N, F>) -> Self::Output {
        self + &(-*other)
    }
}
impl<const D: usize, const N: usize, F: CurveField<D, N>> Add for GroupProjective<D, N, F> {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        &self + &other
    }
}
impl<const D: usize, const N: usize, F: CurveField<D, N>> Sub for GroupProjective<D, N, F> {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        &self - &other
    }
}
impl<const D: usize, const N: usize, F: CurveField<D, N>> AddAssign for GroupProjective<D, N, F> {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}
impl<const D: usize, const N: usize, F: CurveField<D, N>> SubAssign for GroupProjective<D, N, F> {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}
impl<'a, 'b, const D: usize, const N: usize, F: CurveField<D, N>> Mul<&'b Fr>
    for &'a GroupProjective<D, N, F>
{
    type Output = GroupProjective<D, N, F>;
    fn mul(self, other: &'b Fr) -> Self::Output {
        self.mul_by_words(&other.value().to_words())
    }
}
impl<const D: usize, const N: usize, F: CurveField<D, N>> Mul<Fr> for GroupProjective<D, N, F> {
    type Output = Self;
    fn mul(self, other: Fr) -> Self {
        &self * &other
    }
}

impl<'a, const D: usize, const N: usize, F: CurveField<D, N>> From<&'a GroupAffine<D, N, F>>
    for GroupProjective<D, N, F>
{
    fn from(value: &'a GroupAffine<D, N, F>) -> Self {
        let tmp = Self {
            x: value.x,
            y: value.y,
            z: F::one(),
        };
        Self::conditional_select(&tmp, &Self::zero(), value.infinity)
    }
}
impl<const D: usize, const N: usize, F: CurveField<D, N>> From<GroupAffine<D, N, F>>
    for GroupProjective<D, N, F>
{
    fn from(value: GroupAffine<D, N, F>) -> Self {
        Self::from(&value)
    }
}
impl<'a, const D: usize, const N: usize, F: CurveField<D, N>> From<&'a GroupProjective<D, N, F>>
    for GroupAffine<D, N, F>
{
    fn from(value: &'a GroupProjective<D, N, F>) -> Self {
        // the inverse of zero is zero, so infinity yields (0, 0) before the select
        let zinv = value.z.inv();
        let tmp = Self {
            x: value.x * zinv,
            y: value.y * zinv,
            infinity: Choice::from(0u8),
        };
        Self::conditional_select(&tmp, &Self::zero(), Choice::from(value.is_zero() as u8))
    }
}
impl<const D: usize, const N: usize, F: CurveField<D, N>> From<GroupProjective<D, N, F>>
    for GroupAffine<D, N, F>
{
    fn from(value: GroupProjective<D, N, F>) -> Self {
        Self::from(&value)
    }
}
