//! Property-based tests for the layout tree
//!
//! Drives [`ViewSplitter`] with generated operation sequences and checks the
//! structural invariants: unique container IDs, a valid active anchor
//! whenever containers exist, and the one-container floor once the tree is
//! non-empty.

use proptest::prelude::*;
use viewmux_core::view::{Container, SplitDirection, ViewError, ViewSplitter};

// ============================================================================
// Test Strategies
// ============================================================================

/// Strategy for generating split directions
fn split_direction_strategy() -> impl Strategy<Value = SplitDirection> {
    prop_oneof![
        Just(SplitDirection::Horizontal),
        Just(SplitDirection::Vertical),
    ]
}

/// An operation that can be performed on a splitter
#[derive(Debug, Clone)]
enum LayoutOperation {
    /// Add a fresh container beside the active one
    Add(SplitDirection),
    /// Remove a container (by index into the current ID list)
    Remove { index: usize },
    /// Activate a container (by index into the current ID list)
    SetActive { index: usize },
}

fn layout_operation_strategy() -> impl Strategy<Value = LayoutOperation> {
    prop_oneof![
        split_direction_strategy().prop_map(LayoutOperation::Add),
        (0usize..16).prop_map(|index| LayoutOperation::Remove { index }),
        (0usize..16).prop_map(|index| LayoutOperation::SetActive { index }),
    ]
}

fn layout_operations_strategy(max_ops: usize) -> impl Strategy<Value = Vec<LayoutOperation>> {
    proptest::collection::vec(layout_operation_strategy(), 0..=max_ops)
}

/// Apply an operation to a splitter, ignoring expected errors
fn apply_operation(splitter: &mut ViewSplitter, op: &LayoutOperation) {
    match op {
        LayoutOperation::Add(direction) => {
            splitter.add_container(Container::new(), *direction);
        }
        LayoutOperation::Remove { index } => {
            let ids = splitter.container_ids();
            if !ids.is_empty() {
                let _ = splitter.remove_container(ids[index % ids.len()]);
            }
        }
        LayoutOperation::SetActive { index } => {
            let ids = splitter.container_ids();
            if !ids.is_empty() {
                let _ = splitter.set_active(ids[index % ids.len()]);
            }
        }
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// After any operation sequence that added at least one container, the
    /// active anchor exists and points at a container in the tree.
    #[test]
    fn prop_active_anchor_is_always_valid(
        ops in layout_operations_strategy(20),
    ) {
        let mut splitter = ViewSplitter::new();
        splitter.add_container(Container::new(), SplitDirection::Vertical);

        for op in &ops {
            apply_operation(&mut splitter, op);

            let active = splitter.active_container_id();
            prop_assert!(active.is_some(), "non-empty tree lost its anchor");
            let active = active.unwrap();
            prop_assert!(
                splitter.find(active).is_some(),
                "anchor {active} not in tree"
            );
        }
    }

    /// Container IDs stay unique no matter how the tree is reshaped.
    #[test]
    fn prop_container_ids_stay_unique(
        ops in layout_operations_strategy(20),
    ) {
        let mut splitter = ViewSplitter::new();
        splitter.add_container(Container::new(), SplitDirection::Vertical);

        for op in &ops {
            apply_operation(&mut splitter, op);
        }

        let ids = splitter.container_ids();
        let mut seen = std::collections::HashSet::new();
        for id in &ids {
            prop_assert!(seen.insert(*id), "duplicate container {id}");
        }
        prop_assert_eq!(ids.len(), splitter.container_count());
    }

    /// A non-empty tree never drops back to zero containers.
    #[test]
    fn prop_last_container_survives(
        ops in layout_operations_strategy(20),
    ) {
        let mut splitter = ViewSplitter::new();
        splitter.add_container(Container::new(), SplitDirection::Vertical);

        for op in &ops {
            apply_operation(&mut splitter, op);
            prop_assert!(splitter.container_count() >= 1);
        }
    }

    /// Removing the sole container always fails with the floor error and
    /// changes nothing.
    #[test]
    fn prop_remove_at_floor_is_refused(
        extra_removals in 1usize..5,
    ) {
        let mut splitter = ViewSplitter::new();
        splitter.add_container(Container::new(), SplitDirection::Vertical);
        let id = splitter.container_ids()[0];

        for _ in 0..extra_removals {
            let result = splitter.remove_container(id);
            prop_assert!(matches!(result, Err(ViewError::CannotRemoveLastContainer)));
            prop_assert_eq!(splitter.container_count(), 1);
            prop_assert_eq!(splitter.active_container_id(), Some(id));
        }
    }

    /// Every add increases the count by one and keeps the previous anchor;
    /// every successful remove decreases it by one.
    #[test]
    fn prop_count_tracks_operations(
        directions in proptest::collection::vec(split_direction_strategy(), 1..10),
    ) {
        let mut splitter = ViewSplitter::new();
        for (i, direction) in directions.iter().enumerate() {
            let before_active = splitter.active_container_id();
            splitter.add_container(Container::new(), *direction);
            prop_assert_eq!(splitter.container_count(), i + 1);
            if let Some(anchor) = before_active {
                prop_assert_eq!(splitter.active_container_id(), Some(anchor));
            }
        }

        let mut expected = directions.len();
        while expected > 1 {
            let ids = splitter.container_ids();
            splitter.remove_container(ids[0]).unwrap();
            expected -= 1;
            prop_assert_eq!(splitter.container_count(), expected);
        }
    }
}
