//! $\mathbb{G}_T$, the order r subgroup of $\mathbb{F}_{p^{12}}^*$ in which the pairing takes its
//! values. We write it additively, as one does with the other two groups, so that `+` is the
//! field multiplication, negation is the inverse (which on the cyclotomic subgroup is the
//! conjugation), and scalar multiplication is exponentiation.
use crate::fields::fp::{Fp, Fr};
use crate::fields::fp12::Fp12;
use crate::fields::fp2::Fp2;
use crate::fields::fp6::Fp6;
use crate::groups::group::GroupTrait;
use crypto_bigint::rand_core::CryptoRngCore;
use crypto_bigint::U384;
use num_traits::One;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

/// Do you have vertigo? Then you may want to close your eyes when you scroll by this massive
/// wall of text ...
/// this magic number is `pair(&[G1Affine::generator()], &[G2Affine::generator()])`
const GT: Fp12 = Fp12::new(&[
    Fp6::new(&[
        Fp2::new(&[
            Fp::new(U384::from_words([
                0x64aad0991fd790cc,
                0xa243cae41d966e21,
                0xf4bea573b71c17d3,
                0x226837c1f74d1afb,
                0x89bfb44bcd6d6556,
                0x00b718ff624a95f1,
            ])),
            Fp::new(U384::from_words([
                0xfd791367c8b54d87,
                0xda4f1994ed09ee68,
                0x289c96e4ea032783,
                0x3d4c55b759d8c926,
                0x26a28ebbdbd4b5b3,
                0x0197261459eb50c5,
            ])),
        ]),
        Fp2::new(&[
            Fp::new(U384::from_words([
                0x3845057c0c39ecd6,
                0x4193e377135ced4d,
                0xe234351401925eaa,
                0xad820ebe4ffbc9de,
                0x91121e151ce96c26,
                0x00756970de5e545d,
            ])),
            Fp::new(U384::from_words([
                0x0fadb5540ac05763,
                0x1e726417cb512353,
                0x28ea69c688af7c83,
                0x28f44db5103e523e,
                0xec3d57af8bfdc79d,
                0x00373f07857759db,
            ])),
        ]),
        Fp2::new(&[
            Fp::new(U384::from_words([
                0xbeb343ea1db8d4e7,
                0xf07eb111885af785,
                0x15501b97fd833d90,
                0xf7086335f2350198,
                0xeb74bd698a2d919c,
                0x00ec2d5430932820,
            ])),
            Fp::new(U384::from_words([
                0xabb8b4e13974b7db,
                0x0b3168929ccc7d91,
                0x09aaeac3dfdcf6ae,
                0xe5cf6d864c61f81a,
                0x251abbaf8dfb67c7,
                0x0051ae2dce91bcd2,
            ])),
        ]),
    ]),
    Fp6::new(&[
        Fp2::new(&[
            Fp::new(U384::from_words([
                0x931b6bdcbff8da47,
                0xaf1b1c5bf6352d82,
                0x0d745c1afc70c6ee,
                0x2ea62114c9bae68e,
                0xd2f5283a40b147a8,
                0x0095fcebb2a29b10,
            ])),
            Fp::new(U384::from_words([
                0x08861744e3b19a8e,
                0x49d49dd0db11f95c,
                0x0ab2c23d7380c7a3,
                0x6122bb24a3e675c2,
                0xac2d735c24f47271,
                0x001fdad7541653e8,
            ])),
        ]),
        Fp2::new(&[
            Fp::new(U384::from_words([
                0x7d7b87e554174d82,
                0x25efd02528d4235f,
                0x836cef1fcb770861,
                0x072bb613698c32db,
                0xb3e0b7b2c070a35c,
                0x00b3530a66bf5754,
            ])),
            Fp::new(U384::from_words([
                0xf5d43d0709dc8c5f,
                0xcd96ebf6375d0262,
                0xa15be3ecb0172a9e,
                0x6adb2a5a16d900db,
                0x0ef854d8168c67f5,
                0x004064943ac5c2fc,
            ])),
        ]),
        Fp2::new(&[
            Fp::new(U384::from_words([
                0x5804aced41190d34,
                0xeb9b921691e40ba2,
                0x005e5f708a3c7858,
                0x5ed2eabc44d21580,
                0x179f1b448b9b198d,
                0x0066910d06a91685,
            ])),
            Fp::new(U384::from_words([
                0xbc57a73d11924c03,
                0xaac34399e40540e3,
                0xd8a3b51a7fa9e8df,
                0x62f2ebf3baa7c610,
                0x4f864ca1d53fc345,
                0x0008f3e3e451ff58,
            ])),
        ]),
    ]),
]);

#[derive(Copy, Clone, Debug)]
pub struct Gt(pub(crate) Fp12);

impl<'a> Neg for &'a Gt {
    type Output = Gt;

    #[inline]
    fn neg(self) -> Gt {
        // The element is unitary, so we just conjugate.
        Gt(self.0.unitary_inverse())
    }
}
impl Neg for Gt {
    type Output = Gt;

    #[inline]
    fn neg(self) -> Gt {
        -&self
    }
}

impl ConstantTimeEq for Gt {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl ConditionallySelectable for Gt {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Gt(Fp12::conditional_select(&a.0, &b.0, choice))
    }
}

impl PartialEq for Gt {
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}
impl Eq for Gt {}
#[allow(clippy::suspicious_arithmetic_impl)]
impl<'a, 'b> Add<&'b Gt> for &'a Gt {
    type Output = Gt;

    #[inline]
    fn add(self, rhs: &'b Gt) -> Gt {
        Gt(self.0 * rhs.0)
    }
}
impl Add for Gt {
    type Output = Gt;
    fn add(self, rhs: Gt) -> Gt {
        &self + &rhs
    }
}
impl AddAssign for Gt {
    fn add_assign(&mut self, rhs: Gt) {
        *self = *self + rhs;
    }
}

impl<'a, 'b> Sub<&'b Gt> for &'a Gt {
    type Output = Gt;

    #[inline]
    fn sub(self, rhs: &'b Gt) -> Gt {
        self + &(-rhs)
    }
}
impl Sub for Gt {
    type Output = Gt;
    fn sub(self, rhs: Gt) -> Gt {
        &self - &rhs
    }
}
#[allow(clippy::suspicious_arithmetic_impl)]
impl<'a, 'b> Mul<&'b Fr> for &'a Gt {
    /// This is simply the `square-and-multiply` algorithm for exponentiation, which is the
    /// multiplicative equivalent of `double-and-add`.
    type Output = Gt;
    fn mul(self, other: &'b Fr) -> Self::Output {
        Gt(self.0.pow(&other.value().to_words()))
    }
}

impl Mul<Fr> for Gt {
    type Output = Self;
    fn mul(self, rhs: Fr) -> Self::Output {
        &self * &rhs
    }
}
impl GroupTrait<12, 2, Fp12> for Gt {
    fn generator() -> Self {
        Self(GT)
    }
    fn rand<R: CryptoRngCore>(rng: &mut R) -> Self {
        Self::generator() * Fr::rand(rng)
    }
    fn is_torsion_free(&self) -> Choice {
        let r = Fr::characteristic().to_words();
        Choice::from(self.0.pow(&r).is_one() as u8)
    }
}
impl Gt {
    /// Returns the group identity, which is $1$.
    pub fn identity() -> Gt {
        Gt(Fp12::one())
    }
    pub fn is_identity(&self) -> bool {
        self.0.is_one()
    }

    /// Doubles this group element.
    pub fn double(&self) -> Gt {
        Gt(self.0.square())
    }
}
