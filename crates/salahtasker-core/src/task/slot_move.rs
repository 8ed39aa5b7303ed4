//! Optimistic cross-slot moves as an explicit state machine.
//!
//! The drag-and-drop contract: the UI applies the move locally first, then
//! confirms against the persisted record. On a mismatch there is no
//! partial rollback -- the caller re-fetches the whole day's list to
//! restore a consistent view.
//!
//!   Applied ──confirm──> Confirmed
//!      └─────mismatch───> RolledBackViaRefetch
//!
//! Intra-slot reordering is presentation-only and never enters the
//! machine; [`SlotMove::begin`] refuses a move whose target equals the
//! current slot.

use uuid::Uuid;

use crate::task::{SalahPeriod, Task};

/// State of one optimistic slot reassignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotMove {
    /// The move has been applied locally and awaits confirmation.
    Applied {
        task_id: Uuid,
        previous_slot: SalahPeriod,
        target_slot: SalahPeriod,
    },
    /// The persisted record matches the optimistic state.
    Confirmed {
        task_id: Uuid,
        slot: SalahPeriod,
    },
    /// Confirmation failed; the caller must re-fetch the full task list
    /// for the date before trusting local state again.
    RolledBackViaRefetch {
        task_id: Uuid,
    },
}

impl SlotMove {
    /// Start a move for `task` to `target`. Returns `None` when the target
    /// equals the current slot -- that is an intra-slot reorder, which is
    /// cosmetic and never persisted.
    pub fn begin(task: &Task, target: SalahPeriod) -> Option<Self> {
        if task.slot == target {
            return None;
        }
        Some(SlotMove::Applied {
            task_id: task.id,
            previous_slot: task.slot,
            target_slot: target,
        })
    }

    /// Confirm the optimistic state against what persistence returned.
    ///
    /// `persisted` is the updated record (or `None` when the update failed
    /// or the task vanished). Anything but an exact slot match rolls back
    /// via refetch. Confirming a non-`Applied` state is a no-op.
    pub fn confirm(self, persisted: Option<&Task>) -> Self {
        match self {
            SlotMove::Applied {
                task_id,
                target_slot,
                ..
            } => match persisted {
                Some(task) if task.id == task_id && task.slot == target_slot => {
                    SlotMove::Confirmed {
                        task_id,
                        slot: target_slot,
                    }
                }
                _ => SlotMove::RolledBackViaRefetch { task_id },
            },
            done => done,
        }
    }

    /// Whether the caller must re-fetch the day's task list.
    pub fn needs_refetch(&self) -> bool {
        matches!(self, SlotMove::RolledBackViaRefetch { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn task(slot: SalahPeriod) -> Task {
        Task::new(
            "user-1",
            "Review notes",
            None,
            slot,
            NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
        )
    }

    #[test]
    fn same_slot_move_is_cosmetic() {
        let t = task(SalahPeriod::DhuhrToAsr);
        assert_eq!(SlotMove::begin(&t, SalahPeriod::DhuhrToAsr), None);
    }

    #[test]
    fn matching_confirmation_settles() {
        let mut t = task(SalahPeriod::DhuhrToAsr);
        let mv = SlotMove::begin(&t, SalahPeriod::AsrToMaghrib).unwrap();

        t.slot = SalahPeriod::AsrToMaghrib; // what persistence returns
        let settled = mv.confirm(Some(&t));

        assert_eq!(
            settled,
            SlotMove::Confirmed {
                task_id: t.id,
                slot: SalahPeriod::AsrToMaghrib,
            }
        );
        assert!(!settled.needs_refetch());
    }

    #[test]
    fn failed_update_rolls_back_via_refetch() {
        let t = task(SalahPeriod::DhuhrToAsr);
        let mv = SlotMove::begin(&t, SalahPeriod::AsrToMaghrib).unwrap();

        let rolled = mv.confirm(None);
        assert_eq!(rolled, SlotMove::RolledBackViaRefetch { task_id: t.id });
        assert!(rolled.needs_refetch());
    }

    #[test]
    fn stale_persisted_slot_rolls_back() {
        let t = task(SalahPeriod::DhuhrToAsr);
        let mv = SlotMove::begin(&t, SalahPeriod::AsrToMaghrib).unwrap();

        // Persistence still reports the old slot.
        let rolled = mv.confirm(Some(&t));
        assert!(rolled.needs_refetch());
    }

    #[test]
    fn confirming_twice_is_a_no_op() {
        let mut t = task(SalahPeriod::DhuhrToAsr);
        let mv = SlotMove::begin(&t, SalahPeriod::AsrToMaghrib).unwrap();
        t.slot = SalahPeriod::AsrToMaghrib;

        let settled = mv.confirm(Some(&t));
        let again = settled.clone().confirm(None);
        assert_eq!(settled, again);
    }
}
