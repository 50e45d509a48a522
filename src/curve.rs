//! The per-curve data that drives the pairing engine. Everything the Miller loop, the
//! precomputation, the final exponentiation, and the cubical ladder need to know about the
//! curve is collected in a single immutable value, which is built once and handed to every
//! engine function by reference.
//!
//! For BLS12-377 the seed is $x_0 = \texttt{0x8508c00000000001}$, and the loop counter is its
//! plain binary expansion. Because the seed is positive, no conjugation of the Miller loop
//! output is ever required.
use crate::fields::fp::Fp;
use crate::fields::fp2::Fp2;
use crate::groups::g1::G1Affine;
use crate::groups::g2::G2Affine;
use crate::groups::group::{CurveField, GroupTrait};
use crypto_bigint::U384;
use std::sync::OnceLock;

/// $x_0$, the seed of the BLS12 family member
pub(crate) const BLS12_377_SEED: u64 = 0x8508c00000000001;

/// 1/2 in the base field, used by the projective doubling step
pub(crate) const TWO_INV: Fp = Fp::new(U384::from_words([
    0x4284600000000001,
    0x0b85aea218000000,
    0x8f79b117dd04a400,
    0x8d116cf9807a89c7,
    0x631d82e03650a49d,
    0x00d71d230be28875,
]));

static BLS12_377: OnceLock<CurveParameters> = OnceLock::new();

#[derive(Clone, Debug)]
pub struct CurveParameters {
    seed: u64,
    /// binary digits of the seed, least significant first
    loop_counter: Vec<u8>,
    b: Fp,
    b_twist: Fp2,
    twist_inv: Fp2,
    g1: G1Affine,
    g2: G2Affine,
}

impl CurveParameters {
    /// The process-wide BLS12-377 instance, initialised on first use.
    /// ```
    /// use ate::CurveParameters;
    /// let params = CurveParameters::bls12_377();
    /// assert_eq!(params.seed(), 0x8508c00000000001);
    /// assert_eq!(params.loop_counter().len(), 64);
    /// ```
    pub fn bls12_377() -> &'static Self {
        BLS12_377.get_or_init(|| {
            let params = Self::from_seed(BLS12_377_SEED);
            tracing::debug!(
                seed = params.seed,
                loop_length = params.loop_counter.len(),
                "CurveParameters::bls12_377"
            );
            params
        })
    }
    fn from_seed(seed: u64) -> Self {
        let bits = 64 - seed.leading_zeros() as usize;
        let loop_counter = (0..bits).map(|i| ((seed >> i) & 1) as u8).collect();
        // b' = b/u on a D-type twist, so with b = 1 it coincides with u^{-1}
        let twist_inv = <Fp2 as CurveField<2, 2>>::curve_constant();
        Self {
            seed,
            loop_counter,
            b: <Fp as CurveField<1, 1>>::curve_constant(),
            b_twist: twist_inv,
            twist_inv,
            g1: G1Affine::generator(),
            g2: G2Affine::generator(),
        }
    }
    pub fn seed(&self) -> u64 {
        self.seed
    }
    pub fn loop_counter(&self) -> &[u8] {
        &self.loop_counter
    }
    /// coefficient of $E: y^2 = x^3 + b$
    pub fn b(&self) -> Fp {
        self.b
    }
    /// coefficient of the twist $E': y^2 = x^3 + b'$
    pub fn b_twist(&self) -> Fp2 {
        self.b_twist
    }
    pub fn twist_inv(&self) -> Fp2 {
        self.twist_inv
    }
    pub fn g1_generator(&self) -> G1Affine {
        self.g1
    }
    pub fn g2_generator(&self) -> G2Affine {
        self.g2
    }
}
