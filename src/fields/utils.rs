use num_traits::{Inv, One, Zero};
use std::ops::Mul;

/// Montgomery's simultaneous inversion: every element of the slice is replaced by its
/// inverse at the cost of a single field inversion and 3(n-1) multiplications. The running
/// prefix products are kept in a scratch buffer, the total product is inverted once, and
/// the inverses are peeled off walking backwards.
///
/// Zeros are skipped when accumulating, and are left in place, so that 1/0 = 0 holds
/// element-wise just as it does for the single inversions.
pub(crate) fn batch_invert<F>(elements: &mut [F])
where
    F: Copy + Zero + One + Mul<Output = F> + Inv<Output = F>,
{
    let mut scratch = Vec::with_capacity(elements.len());
    let mut acc = F::one();
    for e in elements.iter() {
        scratch.push(acc);
        if !e.is_zero() {
            acc = acc * *e;
        }
    }

    acc = acc.inv();

    for (e, prefix) in elements.iter_mut().rev().zip(scratch.into_iter().rev()) {
        if e.is_zero() {
            continue;
        }
        let next = acc * *e;
        *e = acc * prefix;
        acc = next;
    }
}
