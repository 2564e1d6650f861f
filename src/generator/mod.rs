use crate::permutation::Permutation;
use rand::Rng;

pub mod fisher_yates;

pub use fisher_yates::{fisher_yates, FisherYates};

/// Produces the target order of a shuffle.
///
/// Implementations must return a bijection over `0..len` and must take all of
/// their randomness from `rng`, so that a seeded generator yields a
/// reproducible shuffle.
pub trait PermutationStrategy {
    fn permutation<R: Rng + ?Sized>(&self, rng: &mut R, len: usize) -> Permutation;
}

impl<S: PermutationStrategy + ?Sized> PermutationStrategy for &S {
    fn permutation<R: Rng + ?Sized>(&self, rng: &mut R, len: usize) -> Permutation {
        (**self).permutation(rng, len)
    }
}

/// Convenience wrapper around the default strategy.
pub fn random_permutation<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Permutation {
    FisherYates.permutation(rng, len)
}
