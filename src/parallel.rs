use crate::api::{seed_with, ShuffleReport, Shuffler};
use crate::collection::{OrderedCollectionReader, RangeMover};
use crate::error::Result;
use crate::generator::PermutationStrategy;
use crate::locks::CollectionLocks;
use rand::Rng;
use rayon::prelude::*;
use std::fmt::Debug;
use std::hash::Hash;

/// Shuffles each of `collections` on the rayon worker pool and returns one
/// result per collection, in input order.
///
/// Every shuffle runs with its own generator, seeded from `rng` before any
/// work is spawned. If all identities in `collections` are distinct, the
/// outcome only depends on `rng` and not on thread scheduling.
///
/// Shuffles of distinct collections run concurrently. Repeated identities are
/// serialized by `locks`, but the order in which they run, and with it the
/// final order of that collection, is up to the scheduler. A failing shuffle
/// does not affect the others.
pub fn par_shuffle_remote<Id, C, S, R>(
    shuffler: &Shuffler<S>,
    rng: &mut R,
    locks: &CollectionLocks<Id>,
    client: &C,
    collections: &[Id],
) -> Result<Vec<Result<ShuffleReport>>>
where
    Id: Hash + Eq + Clone + Debug + Send + Sync,
    C: OrderedCollectionReader<Id> + RangeMover<Id> + Sync + ?Sized,
    S: PermutationStrategy + Sync,
    R: Rng + ?Sized,
{
    let rngs = collections
        .iter()
        .map(|_| seed_with(rng))
        .collect::<Result<Vec<_>>>()?;

    Ok(collections
        .par_iter()
        .zip(rngs)
        .map(|(collection, mut rng)| shuffler.shuffle_remote(&mut rng, locks, client, collection))
        .collect())
}
