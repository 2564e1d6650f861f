//! Uniform shuffling of remote ordered collections, e.g. playlists, that can
//! only be mutated by moving a contiguous range of items to a new position.
//!
//! A [`generator::PermutationStrategy`] draws the target order, the
//! [`planner`] turns it into at most `n - 1` single-item range moves, and the
//! [`applicator`] sends them one by one through a [`collection::RangeMover`].

pub mod api;
pub mod applicator;
pub mod collection;
pub mod config;
pub mod error;
pub mod generator;
pub mod locks;
pub mod permutation;
pub mod planner;
pub mod tracker;
pub mod uniform_index;

#[cfg(feature = "parallel")]
pub mod parallel;

pub mod prelude {
    pub use super::api::{shuffle_collection, ShuffleReport, Shuffler};
    pub use super::collection::{InMemoryCollections, OrderedCollectionReader, RangeMover};
    pub use super::config::ShuffleConfig;
    pub use super::error::ShuffleError;
    pub use super::generator::{FisherYates, PermutationStrategy};
    pub use super::locks::{CollectionGuard, CollectionLocks};
    pub use super::permutation::Permutation;
    pub use super::planner::{plan_moves, MoveCommand, MovePlan};

    #[cfg(feature = "parallel")]
    pub use super::parallel::par_shuffle_remote;

    #[cfg(feature = "seed_with")]
    pub use super::api::seed_with;
}
