//! Property tests for the todo completion state machine.
//!
//! Uses proptest to verify:
//! 1. Toggling twice restores any starting state.
//! 2. `completed_at` is present iff the todo is completed after any toggle sequence.
//! 3. An odd number of toggles always flips completion.
//! 4. Title validation never yields a blank or over-long title.

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use termtodo_core::{CompletionState, Task, TaskId, TitleError, validate_title};
use uuid::Uuid;

/// Strategy for timestamps between 2000 and roughly 2100.
fn arb_timestamp() -> impl Strategy<Value = DateTime<Utc>> {
    (946_684_800i64..4_102_444_800i64).prop_map(|secs| {
        Utc.timestamp_opt(secs, 0)
            .single()
            .unwrap_or_else(|| Utc.timestamp_opt(0, 0).unwrap())
    })
}

/// Strategy for either completion state.
fn arb_completion() -> impl Strategy<Value = CompletionState> {
    prop_oneof![
        Just(CompletionState::Incomplete),
        arb_timestamp().prop_map(|at| CompletionState::Completed { at }),
    ]
}

/// Strategy for arbitrary persisted todos.
fn arb_task() -> impl Strategy<Value = Task> {
    (
        any::<u128>(),
        "[a-zA-Z0-9 ]{1,64}",
        arb_completion(),
        arb_timestamp(),
    )
        .prop_map(|(id, title, completion, created_at)| {
            Task::restore(
                TaskId::from_uuid(Uuid::from_u128(id)),
                title,
                completion,
                created_at,
            )
        })
}

proptest! {
    #[test]
    fn double_toggle_is_identity_from_incomplete(task in arb_task(), a in arb_timestamp(), b in arb_timestamp()) {
        prop_assume!(!task.is_completed());
        let mut toggled = task.clone();
        toggled.toggle(a);
        toggled.toggle(b);
        prop_assert_eq!(toggled, task);
    }

    #[test]
    fn double_toggle_preserves_completion_flag(task in arb_task(), a in arb_timestamp(), b in arb_timestamp()) {
        let mut toggled = task.clone();
        toggled.toggle(a);
        toggled.toggle(b);
        prop_assert_eq!(toggled.is_completed(), task.is_completed());
        prop_assert_eq!(toggled.completed_at().is_none(), !task.is_completed());
    }

    #[test]
    fn completed_at_tracks_flag(task in arb_task(), steps in prop::collection::vec(0i64..10_000, 0..20)) {
        let mut task = task;
        let mut now = task.created_at();
        for step in steps {
            now += Duration::seconds(step);
            task.toggle(now);
            prop_assert_eq!(task.completed_at().is_some(), task.is_completed());
            if task.is_completed() {
                prop_assert_eq!(task.completed_at(), Some(now));
            }
        }
    }

    #[test]
    fn odd_toggles_flip_completion(task in arb_task(), n in 0usize..16, at in arb_timestamp()) {
        let mut toggled = task.clone();
        for _ in 0..(2 * n + 1) {
            toggled.toggle(at);
        }
        prop_assert_ne!(toggled.is_completed(), task.is_completed());
        prop_assert_eq!(toggled.id(), task.id());
        prop_assert_eq!(toggled.title(), task.title());
        prop_assert_eq!(toggled.created_at(), task.created_at());
    }

    #[test]
    fn validated_titles_are_trimmed_and_bounded(raw in "\\PC{0,80}", max in 1usize..64) {
        match validate_title(&raw, max) {
            Ok(title) => {
                prop_assert!(!title.is_empty());
                prop_assert_eq!(title.trim(), title.as_str());
                prop_assert!(title.chars().count() <= max);
            }
            Err(TitleError::Empty) => prop_assert!(raw.trim().is_empty()),
            Err(TitleError::TooLong { len, max: reported }) => {
                prop_assert_eq!(reported, max);
                prop_assert!(len > max);
            }
        }
    }
}
