use crate::error::{Result, ShuffleError};
use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::{Condvar, Mutex, MutexGuard};

/// Serializes shuffles per collection identity.
///
/// The remote primitive offers no versioning, so two shuffles of the same
/// collection would invalidate each other's trackers. Holding the
/// [`CollectionGuard`] for the whole operation rules that out while shuffles
/// of different collections proceed independently.
#[derive(Debug)]
pub struct CollectionLocks<Id> {
    busy: Mutex<HashSet<Id>>,
    released: Condvar,
}

/// Exclusive claim on one collection, released on drop, including during
/// unwinding.
#[derive(Debug)]
pub struct CollectionGuard<'a, Id: Hash + Eq> {
    locks: &'a CollectionLocks<Id>,
    collection: Id,
}

impl<Id: Hash + Eq + Clone + Debug> CollectionLocks<Id> {
    pub fn new() -> Self {
        Self {
            busy: Mutex::new(HashSet::new()),
            released: Condvar::new(),
        }
    }

    /// Blocks until no other guard for `collection` is alive.
    pub fn lock(&self, collection: &Id) -> CollectionGuard<'_, Id> {
        let mut busy = self.busy_set();
        while busy.contains(collection) {
            log::debug!("waiting for concurrent shuffle of {:?}", collection);
            busy = self
                .released
                .wait(busy)
                .unwrap_or_else(|poisoned| poisoned.into_inner());
        }
        busy.insert(collection.clone());
        self.guard(collection)
    }

    /// Fails with [`ShuffleError::Busy`] instead of waiting.
    pub fn try_lock(&self, collection: &Id) -> Result<CollectionGuard<'_, Id>> {
        if !self.busy_set().insert(collection.clone()) {
            return Err(ShuffleError::Busy);
        }
        Ok(self.guard(collection))
    }

    pub fn is_locked(&self, collection: &Id) -> bool {
        self.busy_set().contains(collection)
    }

    fn guard(&self, collection: &Id) -> CollectionGuard<'_, Id> {
        CollectionGuard {
            locks: self,
            collection: collection.clone(),
        }
    }
}

impl<Id: Hash + Eq> CollectionLocks<Id> {
    // The set stays consistent even if a holder panicked: guards only
    // insert or remove a single key.
    fn busy_set(&self) -> MutexGuard<'_, HashSet<Id>> {
        self.busy
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<Id: Hash + Eq + Clone + Debug> Default for CollectionLocks<Id> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, Id: Hash + Eq> CollectionGuard<'a, Id> {
    pub fn collection(&self) -> &Id {
        &self.collection
    }
}

impl<'a, Id: Hash + Eq> Drop for CollectionGuard<'a, Id> {
    fn drop(&mut self) {
        self.locks.busy_set().remove(&self.collection);
        self.locks.released.notify_all();
    }
}
