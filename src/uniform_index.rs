use rand::Rng;

/// Upper bounds up to this value are drawn from a single `u32` word. Above it
/// the rejection rate of the 32 bit path climbs and the 64 bit path wins.
pub const U32_MAX_UPPER_BOUND: u32 = u32::MAX / 16;

/// Draws an index from the exclusive range `0..exclusive_ub` uniformly at
/// random. Functionally equivalent to `rng.gen_range(0..exclusive_ub)`.
///
/// The draw multiplies a random word by the bound and keeps the high half;
/// the few low halves that would bias the result are rejected and redrawn.
///
/// # Warning
/// The upper bound must be strictly positive. This is only checked in debug
/// builds.
///
/// # Example
/// ```
/// use rip_reorder::uniform_index::gen_index;
///
/// for ub in 1..100 {
///     assert!(gen_index(&mut rand::thread_rng(), ub) < ub);
/// }
/// ```
pub fn gen_index<R: Rng + ?Sized>(rng: &mut R, exclusive_ub: usize) -> usize {
    debug_assert!(exclusive_ub != 0);

    if exclusive_ub <= U32_MAX_UPPER_BOUND as usize {
        bounded::<u32, R>(rng, exclusive_ub as u32) as usize
    } else {
        bounded::<u64, R>(rng, exclusive_ub as u64) as usize
    }
}

/// Draws an index from the inclusive range `0..=inclusive_ub`, i.e. the
/// partner index `j` of a Fisher-Yates step at position `inclusive_ub`.
pub fn gen_index_inclusive<R: Rng + ?Sized>(rng: &mut R, inclusive_ub: usize) -> usize {
    gen_index(rng, inclusive_ub + 1)
}

trait Word: Copy + PartialOrd {
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self;

    /// Returns `(low, high)` halves of the double-width product.
    fn wide_multiply(self, b: Self) -> (Self, Self);

    /// `2^BITS mod self`; low halves below it are biased.
    fn rejection_threshold(self) -> Self;
}

macro_rules! impl_word {
    ( $small : ty , $large : ty ) => {
        impl Word for $small {
            fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
                rng.gen()
            }

            fn wide_multiply(self, b: Self) -> (Self, Self) {
                let res = (self as $large).wrapping_mul(b as $large);
                ((res as Self), (res >> Self::BITS) as Self)
            }

            fn rejection_threshold(self) -> Self {
                self.wrapping_neg() % self
            }
        }
    };
}

impl_word!(u32, u64);
impl_word!(u64, u128);

fn bounded<W: Word, R: Rng + ?Sized>(rng: &mut R, exclusive_ub: W) -> W {
    let (mut lo, mut hi) = W::random(rng).wide_multiply(exclusive_ub);

    // fast path: a low half at or above the bound can never be biased
    if lo >= exclusive_ub {
        return hi;
    }

    let threshold = exclusive_ub.rejection_threshold();
    while lo < threshold {
        (lo, hi) = W::random(rng).wide_multiply(exclusive_ub);
    }

    hi
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn wide_multiply32() {
        let mut rng = Pcg64Mcg::seed_from_u64(1234);

        for _ in 0..1000 {
            let a: u32 = rng.gen();
            let b: u32 = rng.gen();

            let (lo, hi) = a.wide_multiply(b);

            assert_eq!((lo as u64) | ((hi as u64) << 32), (a as u64) * (b as u64));
        }
    }

    #[test]
    fn below_upper_bound() {
        let mut rng = Pcg64Mcg::seed_from_u64(1234);

        for ub in [1, 2, 5, 10, 1000, U32_MAX_UPPER_BOUND as usize + 7] {
            for _ in 0..1000 {
                assert!(gen_index(&mut rng, ub) < ub);
            }
        }
    }

    #[test]
    fn inclusive_bound_is_reached() {
        let mut rng = Pcg64Mcg::seed_from_u64(42);

        for ub in 0..8 {
            let mut seen = vec![false; ub + 1];
            for _ in 0..500 {
                let j = gen_index_inclusive(&mut rng, ub);
                assert!(j <= ub);
                seen[j] = true;
            }
            assert!(seen.iter().all(|&s| s), "ub = {}", ub);
        }
    }

    #[test]
    fn match_expected() {
        let mut rng = Pcg64Mcg::seed_from_u64(12345);
        const ITERATIONS: u64 = 1000;

        for ub in [100usize, 1000, 10000, usize::MAX] {
            let sum: u128 = (0..ITERATIONS)
                .map(|_| gen_index(&mut rng, ub) as u128)
                .sum();

            assert!(sum > ITERATIONS as u128 * (ub as u128) / 4);
            assert!(sum < ITERATIONS as u128 * (ub as u128) * 3 / 4);
        }
    }
}
