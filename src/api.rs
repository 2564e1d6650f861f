use crate::applicator::apply_plan;
use crate::collection::{OrderedCollectionReader, RangeMover};
use crate::config::ShuffleConfig;
use crate::error::{Result, ShuffleError};
use crate::generator::{FisherYates, PermutationStrategy};
use crate::locks::CollectionLocks;
use crate::permutation::Permutation;
use crate::planner::{plan_moves, MovePlan, MIN_ITEMS};
use rand::Rng;
use std::fmt::Debug;
use std::hash::Hash;

/// Outcome of a successful shuffle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShuffleReport {
    /// Length of the collection, independent of how many moves were needed.
    pub items_processed: usize,
    pub moves_applied: usize,
    pub moves_planned: usize,
}

/// Shuffles collections that can only be mutated through range moves.
///
/// The target order comes from a [`PermutationStrategy`] (Fisher-Yates by
/// default) and all randomness is drawn from the generator passed to each
/// call. If a deterministic generator is provided, the emitted moves are the
/// same each run.
///
/// # Example
/// ```
/// use rip_reorder::prelude::*;
///
/// let store = InMemoryCollections::new();
/// store.insert("mix", vec!["a", "b", "c", "d"]).unwrap();
///
/// let current = store.items(&"mix").unwrap();
/// let report = Shuffler::new()
///     .shuffle_collection(&mut rand::thread_rng(), &store, &"mix", &current)
///     .unwrap();
///
/// assert_eq!(report.items_processed, 4);
/// assert!(report.moves_applied <= 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Shuffler<S = FisherYates> {
    strategy: S,
    config: ShuffleConfig,
}

impl Shuffler<FisherYates> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: PermutationStrategy> Shuffler<S> {
    pub fn with_strategy(strategy: S) -> Self {
        Self {
            strategy,
            config: ShuffleConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ShuffleConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ShuffleConfig {
        &self.config
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Draws a target order for `len` items and plans the moves towards it
    /// without touching any collection.
    pub fn plan<R: Rng + ?Sized>(&self, rng: &mut R, len: usize) -> Result<(Permutation, MovePlan)> {
        if len < MIN_ITEMS {
            return Err(ShuffleError::InsufficientItems { len });
        }

        let target = self.strategy.permutation(rng, len);
        let plan = plan_moves(len, &target)?;

        if self.config.verify_plan {
            plan.verify(&target)?;
        }

        Ok((target, plan))
    }

    /// Shuffles `collection`, whose current order is `current_order`.
    ///
    /// Only the length of `current_order` is read. The caller must keep other
    /// shuffles of the same collection out for the duration of the call, e.g.
    /// by holding a [`crate::locks::CollectionGuard`]; see
    /// [`Shuffler::shuffle_remote`].
    pub fn shuffle_collection<Id, T, M, R>(
        &self,
        rng: &mut R,
        mover: &M,
        collection: &Id,
        current_order: &[T],
    ) -> Result<ShuffleReport>
    where
        Id: Debug + ?Sized,
        M: RangeMover<Id> + ?Sized,
        R: Rng + ?Sized,
    {
        let items_processed = current_order.len();
        let (_, plan) = self.plan(rng, items_processed)?;

        let moves_applied = if self.config.dry_run {
            log::debug!(
                "{:?}: dry run, skipping {} moves",
                collection,
                plan.num_moves()
            );
            0
        } else {
            apply_plan(mover, collection, &plan)?
        };

        log::info!(
            "{:?}: shuffled {} items with {} moves",
            collection,
            items_processed,
            moves_applied
        );

        Ok(ShuffleReport {
            items_processed,
            moves_applied,
            moves_planned: plan.num_moves(),
        })
    }

    /// Locks `collection`, reads its current order through `client` and
    /// shuffles it. The lock is released on return, whether or not the
    /// shuffle succeeded.
    pub fn shuffle_remote<Id, C, R>(
        &self,
        rng: &mut R,
        locks: &CollectionLocks<Id>,
        client: &C,
        collection: &Id,
    ) -> Result<ShuffleReport>
    where
        Id: Hash + Eq + Clone + Debug,
        C: OrderedCollectionReader<Id> + RangeMover<Id> + ?Sized,
        R: Rng + ?Sized,
    {
        let _guard = locks.lock(collection);

        let current_order = client
            .read_order(collection)
            .map_err(|err| ShuffleError::Read(Box::new(err)))?;

        self.shuffle_collection(rng, client, collection, &current_order)
    }
}

/// Shuffles `collection` with the default Fisher-Yates strategy.
pub fn shuffle_collection<Id, T, M, R>(
    rng: &mut R,
    mover: &M,
    collection: &Id,
    current_order: &[T],
) -> Result<ShuffleReport>
where
    Id: Debug + ?Sized,
    M: RangeMover<Id> + ?Sized,
    R: Rng + ?Sized,
{
    Shuffler::new().shuffle_collection(rng, mover, collection, current_order)
}

/// Seeds a fast generator from an arbitrary one. Needed where the caller's
/// generator cannot be shared, e.g. [`rand::rngs::ThreadRng`] across threads.
#[cfg(feature = "seed_with")]
pub fn seed_with<R: Rng + ?Sized>(rng: &mut R) -> Result<rand_pcg::Pcg64Mcg> {
    use rand::SeedableRng;
    Ok(rand_pcg::Pcg64Mcg::from_rng(rng)?)
}
