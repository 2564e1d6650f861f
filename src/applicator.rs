use crate::collection::RangeMover;
use crate::error::{Result, ShuffleError};
use crate::planner::MovePlan;
use std::fmt::Debug;

/// Sends the moves of `plan` one after another and returns how many were
/// applied.
///
/// Each move is only valid against the state left by all previous ones, so
/// the first failure aborts the remaining plan. Nothing is retried or rolled
/// back; the collection keeps the order produced by the applied prefix.
pub fn apply_plan<Id, M>(mover: &M, collection: &Id, plan: &MovePlan) -> Result<usize>
where
    Id: Debug + ?Sized,
    M: RangeMover<Id> + ?Sized,
{
    let planned = plan.num_moves();

    for (applied, step) in plan.steps().iter().enumerate() {
        let command = step.command;
        log::debug!(
            "{:?}: move {}/{}: item at {} before {} (finalizes slot {})",
            collection,
            applied + 1,
            planned,
            command.source_position,
            command.insert_before,
            step.target_position
        );

        if let Err(err) = mover.move_range(collection, command) {
            log::warn!(
                "{:?}: range move failed after {} of {} moves: {}",
                collection,
                applied,
                planned,
                err
            );
            return Err(ShuffleError::ExternalMutationFailure {
                applied,
                planned,
                source: Box::new(err),
            });
        }
    }

    Ok(planned)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::collection::InMemoryCollections;
    use crate::permutation::Permutation;
    use crate::planner::{plan_moves, MoveCommand};
    use std::cell::RefCell;

    #[derive(Debug, thiserror::Error)]
    #[error("remote rejected move")]
    struct Rejected;

    /// Records every call and fails the call with index `fail_at`.
    struct FlakyMover {
        fail_at: usize,
        calls: RefCell<Vec<MoveCommand>>,
    }

    impl RangeMover<str> for FlakyMover {
        type Error = Rejected;

        fn move_range(&self, _: &str, command: MoveCommand) -> std::result::Result<(), Rejected> {
            let mut calls = self.calls.borrow_mut();
            calls.push(command);
            if calls.len() == self.fail_at + 1 {
                return Err(Rejected);
            }
            Ok(())
        }
    }

    #[test]
    fn applies_all_moves_in_order() {
        let target = Permutation::try_from(vec![3, 2, 1, 0]).unwrap();
        let plan = plan_moves(4, &target).unwrap();

        let store = InMemoryCollections::new();
        store.insert("list".to_string(), vec!['a', 'b', 'c', 'd']).unwrap();

        let applied = apply_plan(&store, &"list".to_string(), &plan).unwrap();
        assert_eq!(applied, 3);
        assert_eq!(store.items(&"list".to_string()).unwrap(), vec!['d', 'c', 'b', 'a']);
    }

    #[test]
    fn stops_at_first_failure() {
        let target = Permutation::try_from(vec![3, 2, 1, 0]).unwrap();
        let plan = plan_moves(4, &target).unwrap();
        assert_eq!(plan.num_moves(), 3);

        let mover = FlakyMover {
            fail_at: 1,
            calls: RefCell::new(Vec::new()),
        };

        let err = apply_plan(&mover, "list", &plan).unwrap_err();
        assert!(matches!(
            err,
            ShuffleError::ExternalMutationFailure {
                applied: 1,
                planned: 3,
                ..
            }
        ));
        assert_eq!(err.moves_applied(), 1);

        // the third move is never attempted
        assert_eq!(*mover.calls.borrow(), plan.commands().take(2).collect::<Vec<_>>());
    }

    #[test]
    fn empty_plan_makes_no_calls() {
        let plan = plan_moves(5, &Permutation::identity(5)).unwrap();
        let mover = FlakyMover {
            fail_at: 0,
            calls: RefCell::new(Vec::new()),
        };

        assert_eq!(apply_plan(&mover, "list", &plan).unwrap(), 0);
        assert!(mover.calls.borrow().is_empty());
    }
}
