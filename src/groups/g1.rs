//! This creates the specific instance of G1 for BLS12-377. Namely,
//! $\mathbb{G}_1=E(\mathbb{F}_p)[r]$ on $E: y^2 = x^3 + 1$. Unlike a BN curve, the r-torsion
//! is not the whole curve here, the cofactor being
//! $h_1 = (x_0 - 1)^2 / 3$. The constructors therefore run both the curve check and the
//! subgroup check.
//!
//! The generator is the standard one for BLS12-377, which is used to create points on the
//! curve from a scalar value.

use crate::fields::fp::Fp;
use crate::groups::group::{CurveField, GroupAffine, GroupError, GroupProjective, GroupTrait};
use crypto_bigint::rand_core::CryptoRngCore;
use crypto_bigint::U384;
use subtle::Choice;

/// type alias for affine representation on base field
pub type G1Affine = GroupAffine<1, 1, Fp>;
/// type alias for projective representation on base field
pub type G1Projective = GroupProjective<1, 1, Fp>;

const G1_GENERATOR_X: Fp = Fp::new(U384::from_words([
    0xeab9b16eb21be9ef,
    0xd5481512ffcd394e,
    0x188282c8bd37cb5c,
    0x85951e2caa9d41bb,
    0xc8fc6225bf87ff54,
    0x008848defe740a67,
]));
const G1_GENERATOR_Y: Fp = Fp::new(U384::from_words([
    0xfd82de55559c8ea6,
    0xc2fe3d3634a9591a,
    0x6d182ad44fb82305,
    0xbd7fb348ca3e52d9,
    0x1f674f5d30afeec4,
    0x01914a69c5102eff,
]));

// y^2 = x^3 + 1
impl CurveField<1, 1> for Fp {
    fn curve_constant() -> Self {
        Fp::ONE
    }
}

impl GroupTrait<1, 1, Fp> for G1Affine {
    fn generator() -> Self {
        Self::new_unchecked(G1_GENERATOR_X, G1_GENERATOR_Y)
    }
    fn rand<R: CryptoRngCore>(rng: &mut R) -> Self {
        Self::from(G1Projective::rand(rng))
    }
    fn is_torsion_free(&self) -> Choice {
        G1Projective::from(self).is_torsion_free()
    }
}

impl G1Affine {
    /// Instantiate a new element in affine coordinates in G1. The input values must pass
    /// the curve check and the subgroup check.
    /// # Arguments
    /// * `v` - a tuple of field elements that represent the x and y coordinates of the point
    /// ```
    /// use ate::*;
    /// let g = G1Affine::generator();
    /// assert!(G1Affine::new([g.x(), g.y()]).is_ok());
    /// assert!(G1Affine::new([Fp::ONE, Fp::ONE]).is_err());
    /// ```
    pub fn new(v: [Fp; 2]) -> Result<Self, GroupError> {
        let candidate = Self::new_unchecked(v[0], v[1]);
        let is_on_curve = candidate.is_on_curve();
        tracing::debug!(?is_on_curve, "G1Affine::new");
        if !bool::from(is_on_curve) {
            return Err(GroupError::NotOnCurve);
        }
        let is_torsion_free = candidate.is_torsion_free();
        tracing::debug!(?is_torsion_free, "G1Affine::new");
        match bool::from(is_torsion_free) {
            true => Ok(candidate),
            false => Err(GroupError::NotInSubgroup),
        }
    }
}
impl GroupTrait<1, 1, Fp> for G1Projective {
    fn generator() -> Self {
        Self::from(G1Affine::generator())
    }
    fn rand<R: CryptoRngCore>(rng: &mut R) -> Self {
        Self::generator() * crate::fields::fp::Fr::rand(rng)
    }
    fn is_torsion_free(&self) -> Choice {
        G1Projective::is_torsion_free(self)
    }
}
impl G1Projective {
    /// Instantiate a new element in projective coordinates in G1, subject to the same checks
    /// as `G1Affine::new`.
    /// # Arguments
    /// * `v` - a tuple of field elements that represent the x, y, and z coordinates of the point
    pub fn new(v: [Fp; 3]) -> Result<Self, GroupError> {
        let candidate = Self {
            x: v[0],
            y: v[1],
            z: v[2],
        };
        let is_on_curve = candidate.is_on_curve();
        tracing::debug!(?is_on_curve, "G1Projective::new");
        if !bool::from(is_on_curve) {
            return Err(GroupError::NotOnCurve);
        }
        match bool::from(candidate.is_torsion_free()) {
            true => Ok(candidate),
            false => Err(GroupError::NotInSubgroup),
        }
    }
}
