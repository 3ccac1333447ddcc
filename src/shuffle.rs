//! Interval shuffling for move lists and scan-order permutations.
//!
//! Every caller threads its own [`fastrand::Rng`] through, so shuffles are
//! reproducible from a seed.

use fastrand::Rng;

/// Fisher-Yates shuffle of the inclusive index interval `a..=b`.
///
/// A reversed interval (`b < a`) shuffles nothing, which lets callers pass
/// empty sublists without special-casing.
pub fn shuffle_interval<T>(xs: &mut [T], a: usize, b: usize, rng: &mut Rng) {
    let mut k = b;
    while k > a {
        let j = a + rng.usize(..=k - a);
        xs.swap(j, k);
        k -= 1;
    }
}
