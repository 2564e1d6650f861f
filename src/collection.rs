//! Seams to the remote collection, plus an in-memory backend that follows the
//! same remove-then-reinsert semantics.

use crate::planner::MoveCommand;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Mutex;
use thiserror::Error;

/// Supplies the fully materialized current order of a collection.
pub trait OrderedCollectionReader<Id: ?Sized> {
    type Item;
    type Error: std::error::Error + Send + Sync + 'static;

    fn read_order(&self, collection: &Id) -> Result<Vec<Self::Item>, Self::Error>;
}

/// The remote range-move primitive.
///
/// Atomically removes `command.range_length` items starting at
/// `command.source_position` and reinserts them before
/// `command.insert_before`, an index into the sequence *before* removal.
/// Calls on the same collection must not overlap.
pub trait RangeMover<Id: ?Sized> {
    type Error: std::error::Error + Send + Sync + 'static;

    fn move_range(&self, collection: &Id, command: MoveCommand) -> Result<(), Self::Error>;
}

impl<Id: ?Sized, M: RangeMover<Id> + ?Sized> RangeMover<Id> for &M {
    type Error = M::Error;

    fn move_range(&self, collection: &Id, command: MoveCommand) -> Result<(), Self::Error> {
        (**self).move_range(collection, command)
    }
}

impl<Id: ?Sized, C: OrderedCollectionReader<Id> + ?Sized> OrderedCollectionReader<Id> for &C {
    type Item = C::Item;
    type Error = C::Error;

    fn read_order(&self, collection: &Id) -> Result<Vec<Self::Item>, Self::Error> {
        (**self).read_order(collection)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InMemoryError {
    #[error("unknown collection {0}")]
    UnknownCollection(String),

    #[error("cannot move {range_length} items from {source_position} before {insert_before} in a collection of {len}")]
    InvalidRange {
        source_position: usize,
        insert_before: usize,
        range_length: usize,
        len: usize,
    },

    #[error("collection store poisoned by a panicking writer")]
    Poisoned,
}

#[derive(Debug)]
struct Entry<T> {
    items: Vec<T>,
    moves: usize,
}

/// Thread-safe map of named collections that implements both external
/// interfaces.
#[derive(Debug)]
pub struct InMemoryCollections<Id, T> {
    entries: Mutex<HashMap<Id, Entry<T>>>,
}

impl<Id: Hash + Eq + Debug, T: Clone> InMemoryCollections<Id, T> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Adds or replaces a collection and resets its move counter.
    pub fn insert(&self, collection: Id, items: Vec<T>) -> Result<(), InMemoryError> {
        self.entries
            .lock()
            .map_err(|_| InMemoryError::Poisoned)?
            .insert(collection, Entry { items, moves: 0 });
        Ok(())
    }

    pub fn items(&self, collection: &Id) -> Result<Vec<T>, InMemoryError> {
        self.with_entry(collection, |entry| Ok(entry.items.clone()))
    }

    /// Number of successful range moves since the collection was inserted.
    pub fn moves(&self, collection: &Id) -> Result<usize, InMemoryError> {
        self.with_entry(collection, |entry| Ok(entry.moves))
    }

    fn with_entry<X>(
        &self,
        collection: &Id,
        f: impl FnOnce(&mut Entry<T>) -> Result<X, InMemoryError>,
    ) -> Result<X, InMemoryError> {
        let mut entries = self.entries.lock().map_err(|_| InMemoryError::Poisoned)?;
        let entry = entries
            .get_mut(collection)
            .ok_or_else(|| InMemoryError::UnknownCollection(format!("{:?}", collection)))?;
        f(entry)
    }
}

impl<Id: Hash + Eq + Debug, T: Clone> Default for InMemoryCollections<Id, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Id: Hash + Eq + Debug, T: Clone> OrderedCollectionReader<Id> for InMemoryCollections<Id, T> {
    type Item = T;
    type Error = InMemoryError;

    fn read_order(&self, collection: &Id) -> Result<Vec<T>, InMemoryError> {
        self.items(collection)
    }
}

impl<Id: Hash + Eq + Debug, T: Clone> RangeMover<Id> for InMemoryCollections<Id, T> {
    type Error = InMemoryError;

    fn move_range(&self, collection: &Id, command: MoveCommand) -> Result<(), InMemoryError> {
        self.with_entry(collection, |entry| {
            let len = entry.items.len();
            let MoveCommand {
                source_position,
                insert_before,
                range_length,
            } = command;
            let range_end = source_position.checked_add(range_length);

            let valid = range_length > 0
                && range_end.map_or(false, |end| end <= len)
                && insert_before <= len
                && !(source_position < insert_before
                    && range_end.map_or(false, |end| insert_before < end));

            if !valid {
                return Err(InMemoryError::InvalidRange {
                    source_position,
                    insert_before,
                    range_length,
                    len,
                });
            }

            let moved: Vec<T> = entry
                .items
                .drain(source_position..source_position + range_length)
                .collect();
            let at = command.landing_position();
            entry.items.splice(at..at, moved);
            entry.moves += 1;
            Ok(())
        })
    }
}
