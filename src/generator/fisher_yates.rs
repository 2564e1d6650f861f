use super::*;
use crate::uniform_index;

/// Rearranges `data` so that each of the `n!` orders appears with equal
/// probability. Walks `i` from the back and swaps it with a partner drawn
/// from `0..=i`; exactly `n - 1` draws for `n >= 1`.
pub fn fisher_yates<R: Rng + ?Sized, T>(rng: &mut R, data: &mut [T]) {
    for i in (1..data.len()).rev() {
        let j = uniform_index::gen_index_inclusive(rng, i);
        data.swap(i, j);
    }
}

/// Unbiased in-place shuffle of the identity permutation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FisherYates;

impl PermutationStrategy for FisherYates {
    fn permutation<R: Rng + ?Sized>(&self, rng: &mut R, len: usize) -> Permutation {
        let mut perm = Permutation::identity(len);
        fisher_yates(rng, perm.as_mut_slice());
        perm
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    fn fisher_yates_strategy<R: Rng>(rng: &mut R, len: usize) -> Permutation {
        FisherYates.permutation(rng, len)
    }

    crate::statistical_tests::test_permutation_strategy!(fisher_yates_strategy);
    crate::statistical_tests::test_permutation_strategy_deterministic!(fisher_yates_strategy);

    #[test]
    fn trivial_lengths_are_identity() {
        let mut rng = Pcg64Mcg::seed_from_u64(7);
        assert!(FisherYates.permutation(&mut rng, 0).is_empty());
        assert_eq!(&*FisherYates.permutation(&mut rng, 1), &[0]);
    }

    #[test]
    fn draws_n_minus_one_times() {
        struct Counting<R> {
            inner: R,
            words: usize,
        }

        impl<R: rand::RngCore> rand::RngCore for Counting<R> {
            fn next_u32(&mut self) -> u32 {
                self.words += 1;
                self.inner.next_u32()
            }
            fn next_u64(&mut self) -> u64 {
                self.words += 1;
                self.inner.next_u64()
            }
            fn fill_bytes(&mut self, dest: &mut [u8]) {
                self.inner.fill_bytes(dest)
            }
            fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
                self.inner.try_fill_bytes(dest)
            }
        }

        // rejections may cost an extra word, but never fewer than one per step
        for n in [2usize, 3, 10, 100] {
            let mut rng = Counting {
                inner: Pcg64Mcg::seed_from_u64(n as u64),
                words: 0,
            };
            let mut data: Vec<_> = (0..n).collect();
            fisher_yates(&mut rng, &mut data);
            assert!(rng.words >= n - 1, "n = {}", n);
            assert!(rng.words <= 2 * (n - 1), "n = {}", n);
        }
    }
}
