//! This creates a specific instance of G2 for BLS12-377. Namely,
//! $\mathbb{G}_2=E'(\mathbb{F}_{p^2})[r]$ on the D-type sextic twist $E': y^2 = x^3 + 1/u$.
//! In this case, the prime order subgroup we wish to deal with is NOT the curve itself. This
//! introduces security considerations in regard to generating points on the correct subgroup,
//! for instance. All arithmetic is done in projective coordinates, with translation to affine
//! coordinates for the pairing, which consumes affine points.
//!
//! All public facing constructors here implement the subgroup check to ensure that the user
//! cannot input a value in $E^\prime(F_{p^2})$ that is not in the r-torsion.

use crate::fields::fp::{Fp, Fr};
use crate::fields::fp2::Fp2;
use crate::groups::group::{CurveField, GroupAffine, GroupError, GroupProjective, GroupTrait};
use crypto_bigint::rand_core::CryptoRngCore;
use crypto_bigint::U384;
use subtle::Choice;

pub type G2Affine = GroupAffine<2, 2, Fp2>;
pub type G2Projective = GroupProjective<2, 2, Fp2>;

const G2_GENERATOR_X: Fp2 = Fp2::new(&[
    Fp::new(U384::from_words([
        0x74e3e48f7c005196,
        0x71889f52bb535402,
        0x7ea501f557db6b9b,
        0xc565f071203e5031,
        0xc89630a2a3841d01,
        0x018480be71c785fe,
    ])),
    Fp::new(U384::from_words([
        0xb26bfefa6ea16afe,
        0x5cf89984bff76fe6,
        0xe7223ece0799c9de,
        0x532777ee6651cecb,
        0x70dc5a51b1b140d5,
        0x00ea6040e7004031,
    ])),
]);
const G2_GENERATOR_Y: Fp2 = Fp2::new(&[
    Fp::new(U384::from_words([
        0xf094094409fd4ddf,
        0xf2cf88886d8c7c2e,
        0xe458c282f832d204,
        0xde03ed7274b49a58,
        0xd960736bcbb2efb4,
        0x00690d665d446f7b,
    ])),
    Fp::new(U384::from_words([
        0xd9a1cdd185eb8f93,
        0x4279b83f5e52270b,
        0x2463b01acee304c2,
        0x61ef11ac3d591bf1,
        0x9e549da3151a70aa,
        0x00f8169fd2835518,
    ])),
]);

// b' = 1/u = -u/5
const TWIST_CURVE_CONSTANT: Fp2 = Fp2::new(&[
    Fp::ZERO,
    Fp::new(U384::from_words([
        0x1c9ed9999999999a,
        0x0dd39e5c1ccccccd,
        0x129207b63c6bf800,
        0xdc7b4f91cd5fd889,
        0x43bd03737460c589,
        0x010222f6db0fd6f3,
    ])),
]);

impl CurveField<2, 2> for Fp2 {
    fn curve_constant() -> Self {
        TWIST_CURVE_CONSTANT
    }
}

impl GroupTrait<2, 2, Fp2> for G2Affine {
    fn generator() -> Self {
        Self::new_unchecked(G2_GENERATOR_X, G2_GENERATOR_Y)
    }
    fn rand<R: CryptoRngCore>(rng: &mut R) -> Self {
        Self::from(G2Projective::rand(rng))
    }
    fn is_torsion_free(&self) -> Choice {
        G2Projective::from(self).is_torsion_free()
    }
}
impl GroupTrait<2, 2, Fp2> for G2Projective {
    fn generator() -> Self {
        Self::from(G2Affine::generator())
    }
    /// Rather than hashing onto the twist and clearing the cofactor, random points are
    /// simply random multiples of the generator, which are in the r-torsion by construction.
    fn rand<R: CryptoRngCore>(rng: &mut R) -> Self {
        Self::generator() * Fr::rand(rng)
    }
    fn is_torsion_free(&self) -> Choice {
        G2Projective::is_torsion_free(self)
    }
}
impl G2Affine {
    /// The public entrypoint to making an affine value in $\mathbb{G}_2$. This takes the (x,y)
    /// values from the user, and passes them through a curve check and a subgroup check.
    /// Values returned from this function are guaranteed to be on the twist and in the
    /// r-torsion.
    pub fn new(v: [Fp2; 2]) -> Result<Self, GroupError> {
        let candidate = Self::new_unchecked(v[0], v[1]);
        let is_on_curve = candidate.is_on_curve();
        tracing::debug!(?is_on_curve, "G2Affine::new");
        if !bool::from(is_on_curve) {
            return Err(GroupError::NotOnCurve);
        }
        let is_torsion_free = candidate.is_torsion_free();
        tracing::debug!(?is_torsion_free, "G2Affine::new");
        match bool::from(is_torsion_free) {
            true => Ok(candidate),
            false => Err(GroupError::NotInSubgroup),
        }
    }
}
impl G2Projective {
    /// The projective analogue of `G2Affine::new`.
    ///
    /// In a naïve approach, in order to check for validity in the r-torsion, one simply
    /// verifies the r-torsion condition $(r)Q = \mathcal{O}$, which is what we do. This is
    /// more expensive than the endomorphism based tests of <https://eprint.iacr.org/2022/352.pdf>
    /// but has no curve specific assumptions baked into it.
    pub fn new(v: [Fp2; 3]) -> Result<Self, GroupError> {
        let candidate = Self {
            x: v[0],
            y: v[1],
            z: v[2],
        };
        let is_on_curve = candidate.is_on_curve();
        tracing::debug!(?is_on_curve, "G2Projective::new");
        if !bool::from(is_on_curve) {
            return Err(GroupError::NotOnCurve);
        }
        match bool::from(candidate.is_torsion_free()) {
            true => Ok(candidate),
            false => Err(GroupError::NotInSubgroup),
        }
    }
}
