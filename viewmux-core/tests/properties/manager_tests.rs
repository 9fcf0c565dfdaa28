//! Property-based tests for the view manager
//!
//! Drives [`ViewManager`] with generated operation sequences and checks the
//! cross-entity invariants: every view maps to a live session and its
//! recorded container, per-container session uniqueness, broadcast symmetry
//! across containers, plug exclusivity and the session-side attach counts.

use std::cell::RefCell;
use std::rc::Rc;

use proptest::prelude::*;
use viewmux_core::session::Session;
use viewmux_core::testing::StubSession;
use viewmux_core::view::{ViewId, ViewManager};

// ============================================================================
// Test Strategies
// ============================================================================

/// An operation that can be performed on a manager
#[derive(Debug, Clone)]
enum ManagerOperation {
    /// Hand a fresh session to the manager
    CreateView,
    /// Duplicate the active container
    Split,
    /// Remove the active container
    Unsplit,
    /// Detach the active view
    Detach,
    /// Report a session as finished (by index into the session list)
    SessionFinished { index: usize },
    /// Focus a view (by index into the current view list)
    FocusView { index: usize },
    /// Activate a view's container (by index into the current view list)
    ActivateView { index: usize },
    /// Close a view (by index into the current view list)
    CloseView { index: usize },
}

fn manager_operation_strategy() -> impl Strategy<Value = ManagerOperation> {
    prop_oneof![
        2 => Just(ManagerOperation::CreateView),
        1 => Just(ManagerOperation::Split),
        1 => Just(ManagerOperation::Unsplit),
        1 => Just(ManagerOperation::Detach),
        1 => (0usize..16).prop_map(|index| ManagerOperation::SessionFinished { index }),
        1 => (0usize..16).prop_map(|index| ManagerOperation::FocusView { index }),
        1 => (0usize..16).prop_map(|index| ManagerOperation::ActivateView { index }),
        1 => (0usize..16).prop_map(|index| ManagerOperation::CloseView { index }),
    ]
}

fn manager_operations_strategy(max_ops: usize) -> impl Strategy<Value = Vec<ManagerOperation>> {
    proptest::collection::vec(manager_operation_strategy(), 0..=max_ops)
}

/// All views currently held by the manager's containers, in tree order
fn all_views(manager: &ViewManager) -> Vec<ViewId> {
    manager
        .splitter()
        .containers()
        .iter()
        .flat_map(|container| container.views().iter().copied())
        .collect()
}

/// Apply an operation, ignoring expected errors; stubs are kept alive in
/// `sessions` so attach counts can be checked afterwards
fn apply_operation(
    manager: &mut ViewManager,
    sessions: &mut Vec<Rc<RefCell<StubSession>>>,
    op: &ManagerOperation,
) {
    match op {
        ManagerOperation::CreateView => {
            let (stub, handle) = StubSession::handle();
            sessions.push(stub);
            manager.create_view(handle);
        }
        ManagerOperation::Split => {
            let _ = manager.split_view(true);
        }
        ManagerOperation::Unsplit => {
            let _ = manager.split_view(false);
        }
        ManagerOperation::Detach => {
            let _ = manager.detach_active_view();
        }
        ManagerOperation::SessionFinished { index } => {
            if !sessions.is_empty() {
                let id = sessions[index % sessions.len()].borrow().id();
                manager.session_finished(id);
            }
        }
        ManagerOperation::FocusView { index } => {
            let views = all_views(manager);
            if !views.is_empty() {
                let _ = manager.view_focused(views[index % views.len()]);
            }
        }
        ManagerOperation::ActivateView { index } => {
            let views = all_views(manager);
            if !views.is_empty() {
                let _ = manager.view_activated(views[index % views.len()]);
            }
        }
        ManagerOperation::CloseView { index } => {
            let views = all_views(manager);
            if !views.is_empty() {
                manager.view_close_request(views[index % views.len()]);
            }
        }
    }
}

/// Check the invariants that must hold after any operation sequence
fn check_invariants(
    manager: &ViewManager,
    sessions: &[Rc<RefCell<StubSession>>],
) -> Result<(), TestCaseError> {
    // Anchor: non-empty tree always has a valid active container.
    if !manager.splitter().is_empty() {
        let active = manager.active_container_id();
        prop_assert!(active.is_some(), "non-empty tree lost its anchor");
        prop_assert!(manager.splitter().find(active.unwrap()).is_some());
    }

    let mut tree_views = Vec::new();
    for container in manager.splitter().containers() {
        // Active view is a member, or absent exactly when empty.
        match container.active_view() {
            Some(view) => prop_assert!(container.contains(view)),
            None => prop_assert!(container.is_empty()),
        }

        // At most one view per session per container.
        let sessions_here = manager.container_sessions(container.id()).unwrap();
        let mut seen = std::collections::HashSet::new();
        for session in &sessions_here {
            prop_assert!(
                seen.insert(*session),
                "container {} shows session {} twice",
                container.id(),
                session
            );
        }

        for &view in container.views() {
            // Every tree view has bookkeeping pointing back at its container.
            prop_assert_eq!(manager.container_of(view), Some(container.id()));
            prop_assert!(manager.session_of(view).is_some());
            prop_assert!(manager.controller(view).is_some());
            tree_views.push(view);
        }
    }

    // Bookkeeping has no entries outside the tree.
    prop_assert_eq!(manager.view_count(), tree_views.len());

    // Plugged controller always belongs to a live view.
    if let Some(plugged) = manager.plugged_controller() {
        prop_assert!(tree_views.contains(&plugged), "plugged view {plugged} is dead");
    }

    // Session-side attach lists agree with the manager's bookkeeping.
    for stub in sessions {
        let stub = stub.borrow();
        let held = tree_views
            .iter()
            .filter(|&&view| manager.session_of(view) == Some(stub.id()))
            .count();
        prop_assert_eq!(
            stub.view_count(),
            held,
            "session {} attach count out of sync",
            stub.id()
        );
    }

    Ok(())
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The cross-entity invariants hold after every step of any operation
    /// sequence.
    #[test]
    fn prop_invariants_hold_under_any_sequence(
        ops in manager_operations_strategy(24),
    ) {
        let mut manager = ViewManager::new();
        let mut sessions = Vec::new();

        for op in &ops {
            apply_operation(&mut manager, &mut sessions, op);
            check_invariants(&manager, &sessions)?;
        }
    }

    /// Without the single-view operations (detach, per-view close), every
    /// container always displays the same session set.
    #[test]
    fn prop_broadcast_keeps_containers_symmetric(
        session_count in 1usize..5,
        split_count in 0usize..4,
    ) {
        let mut manager = ViewManager::new();
        let mut sessions = Vec::new();

        for _ in 0..session_count {
            let (stub, handle) = StubSession::handle();
            sessions.push(stub);
            manager.create_view(handle);
        }
        for _ in 0..split_count {
            manager.split_view(true).unwrap();
        }
        // Late arrivals must reach every container too.
        let (stub, handle) = StubSession::handle();
        sessions.push(stub);
        manager.create_view(handle);

        let containers = manager.splitter().containers();
        prop_assert_eq!(containers.len(), split_count + 1);

        let mut reference: Vec<_> = manager
            .container_sessions(containers[0].id())
            .unwrap();
        reference.sort_by_key(viewmux_core::session::SessionId::as_uuid);
        for container in &containers[1..] {
            let mut sessions_here = manager.container_sessions(container.id()).unwrap();
            sessions_here.sort_by_key(viewmux_core::session::SessionId::as_uuid);
            prop_assert_eq!(&reference, &sessions_here);
        }
    }

    /// Unsplitting repeatedly always lands on exactly one container and
    /// stays there.
    #[test]
    fn prop_unsplit_converges_to_single_container(
        split_count in 0usize..5,
        extra_unsplits in 1usize..4,
    ) {
        let mut manager = ViewManager::new();
        let (_stub, handle) = StubSession::handle();
        manager.create_view(handle);

        for _ in 0..split_count {
            manager.split_view(true).unwrap();
        }
        for _ in 0..(split_count + extra_unsplits) {
            manager.split_view(false).unwrap();
        }

        prop_assert_eq!(manager.container_count(), 1);
        prop_assert_eq!(manager.view_count(), 1);
    }

    /// After a session finishes, no trace of it remains anywhere.
    #[test]
    fn prop_session_cleanup_is_total(
        session_count in 1usize..4,
        split_count in 0usize..3,
        finish_index in 0usize..16,
    ) {
        let mut manager = ViewManager::new();
        let mut sessions = Vec::new();
        for _ in 0..session_count {
            let (stub, handle) = StubSession::handle();
            sessions.push(stub);
            manager.create_view(handle);
        }
        for _ in 0..split_count {
            manager.split_view(true).unwrap();
        }

        let finished = sessions[finish_index % sessions.len()].clone();
        let finished_id = finished.borrow().id();
        manager.session_finished(finished_id);

        prop_assert_eq!(finished.borrow().view_count(), 0);
        for view in all_views(&manager) {
            prop_assert_ne!(manager.session_of(view), Some(finished.borrow().id()));
        }
        // The other sessions keep one view per container.
        check_invariants(&manager, &sessions)?;
    }

    /// Merging conserves the total view population and empties the source.
    #[test]
    fn prop_merge_conserves_views(
        dest_sessions in 1usize..4,
        source_sessions in 1usize..4,
    ) {
        let mut dest = ViewManager::new();
        let mut source = ViewManager::new();
        let mut stubs = Vec::new();

        for _ in 0..dest_sessions {
            let (stub, handle) = StubSession::handle();
            stubs.push(stub);
            dest.create_view(handle);
        }
        for _ in 0..source_sessions {
            let (stub, handle) = StubSession::handle();
            stubs.push(stub);
            source.create_view(handle);
        }

        let before = dest.view_count() + source.view_count();
        let moved = all_views(&source);
        dest.merge(&mut source).unwrap();

        prop_assert_eq!(dest.view_count() + source.view_count(), before);
        prop_assert_eq!(source.view_count(), 0);
        for view in moved {
            prop_assert!(dest.session_of(view).is_some());
            prop_assert_eq!(dest.container_of(view), dest.active_container_id());
        }
        check_invariants(&dest, &stubs)?;
    }

    /// Focusing any sequence of views leaves exactly the last focused live
    /// view plugged.
    #[test]
    fn prop_plug_follows_last_focus(
        session_count in 1usize..4,
        focus_indices in proptest::collection::vec(0usize..16, 1..8),
    ) {
        let mut manager = ViewManager::new();
        for _ in 0..session_count {
            let (_stub, handle) = StubSession::handle();
            manager.create_view(handle);
        }

        let views = all_views(&manager);
        let mut last = None;
        for index in &focus_indices {
            let view = views[index % views.len()];
            manager.view_focused(view).unwrap();
            last = Some(view);
        }

        prop_assert_eq!(manager.plugged_controller(), last);
    }
}
