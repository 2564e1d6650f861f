//! Turns a target permutation into single-item range moves.
//!
//! The remote primitive removes `range_length` items at `range_start` and
//! reinserts them before `insert_before`, where `insert_before` refers to the
//! sequence *before* the removal. The planner finalizes target slots from the
//! back to the front; every move only touches slots at or below the one being
//! finalized, so a finalized slot is never disturbed again and at most `n - 1`
//! moves are issued.

use crate::error::{Result, ShuffleError};
use crate::permutation::Permutation;
use crate::tracker::PositionTracker;
use serde::{Deserialize, Serialize};

/// Smallest collection that can be reordered.
pub const MIN_ITEMS: usize = 2;

/// One call to the range-move primitive. Serializes to the request body of a
/// reorder endpoint: `{"range_start", "insert_before", "range_length"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveCommand {
    #[serde(rename = "range_start")]
    pub source_position: usize,
    pub insert_before: usize,
    pub range_length: usize,
}

impl MoveCommand {
    /// Moves the single item at `source_position` so that it ends up at
    /// `target_position` once the move is complete.
    pub fn single(source_position: usize, target_position: usize) -> Self {
        Self {
            source_position,
            insert_before: insert_before(source_position, target_position),
            range_length: 1,
        }
    }

    /// First slot the moved range occupies after the move.
    ///
    /// An `insert_before` inside the moved range itself leaves the range
    /// where it is.
    pub fn landing_position(&self) -> usize {
        let range_end = self.source_position.saturating_add(self.range_length);

        if self.insert_before >= range_end {
            self.insert_before - self.range_length
        } else if self.insert_before > self.source_position {
            self.source_position
        } else {
            self.insert_before
        }
    }
}

/// Insert-before index, measured against the pre-removal sequence, that lands
/// an item from `current_position` on `target_position`.
///
/// Moving later must point past the target slot, because the removal of the
/// item itself shifts everything behind it one slot to the front.
pub fn insert_before(current_position: usize, target_position: usize) -> usize {
    if target_position > current_position {
        target_position + 1
    } else {
        target_position
    }
}

/// A move together with the target slot it finalizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveStep {
    pub target_position: usize,
    pub command: MoveCommand,
}

/// Lazily emits the moves for `target`, updating its tracker after each one.
pub struct Planner<'a> {
    target: &'a Permutation,
    tracker: PositionTracker,
    remaining: usize,
}

impl<'a> Planner<'a> {
    /// Plans against a collection of `len` items in their original order.
    pub fn new(len: usize, target: &'a Permutation) -> Result<Self> {
        Self::with_tracker(PositionTracker::new(len), target)
    }

    pub fn with_tracker(tracker: PositionTracker, target: &'a Permutation) -> Result<Self> {
        if tracker.len() < MIN_ITEMS {
            return Err(ShuffleError::InsufficientItems { len: tracker.len() });
        }

        if tracker.len() != target.len() {
            return Err(ShuffleError::InvalidInput(format!(
                "permutation has length {} but the collection has {} items",
                target.len(),
                tracker.len()
            )));
        }

        Ok(Self {
            target,
            remaining: tracker.len(),
            tracker,
        })
    }

    /// Tracker state after all moves emitted so far.
    pub fn tracker(&self) -> &PositionTracker {
        &self.tracker
    }

    pub fn into_tracker(self) -> PositionTracker {
        self.tracker
    }
}

impl<'a> Iterator for Planner<'a> {
    type Item = MoveStep;

    fn next(&mut self) -> Option<MoveStep> {
        while self.remaining > 0 {
            self.remaining -= 1;
            let target_position = self.remaining;

            let desired = self.target.original_at(target_position);
            let current_position = self.tracker.position_of(desired);

            if current_position == target_position {
                log::trace!("slot {} already holds item {}", target_position, desired);
                continue;
            }

            let command = MoveCommand::single(current_position, target_position);
            self.tracker.move_item(current_position, target_position);

            return Some(MoveStep {
                target_position,
                command,
            });
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining.saturating_sub(1)))
    }
}

/// Complete, not yet applied sequence of moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovePlan {
    num_items: usize,
    steps: Vec<MoveStep>,
    final_order: Vec<usize>,
}

impl MovePlan {
    pub fn num_items(&self) -> usize {
        self.num_items
    }

    pub fn steps(&self) -> &[MoveStep] {
        &self.steps
    }

    pub fn num_moves(&self) -> usize {
        self.steps.len()
    }

    pub fn commands(&self) -> impl ExactSizeIterator<Item = MoveCommand> + '_ {
        self.steps.iter().map(|step| step.command)
    }

    /// Order the tracker reached after the last move.
    pub fn final_order(&self) -> &[usize] {
        &self.final_order
    }

    /// Fails unless the plan ends exactly in `target`.
    pub fn verify(&self, target: &Permutation) -> Result<()> {
        if self.final_order.as_slice() != &**target {
            return Err(ShuffleError::InvalidInput(format!(
                "plan ends in {:?} instead of {:?}",
                self.final_order, &**target
            )));
        }
        Ok(())
    }
}

/// Plans all moves that turn `0..len` into `target`.
pub fn plan_moves(len: usize, target: &Permutation) -> Result<MovePlan> {
    let mut planner = Planner::new(len, target)?;
    let steps: Vec<MoveStep> = planner.by_ref().collect();

    Ok(MovePlan {
        num_items: len,
        steps,
        final_order: planner.into_tracker().slots().to_vec(),
    })
}
