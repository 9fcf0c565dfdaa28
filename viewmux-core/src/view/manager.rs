//! The view manager
//!
//! [`ViewManager`] orchestrates the layout tree, the view/session mapping,
//! the per-pair controllers and the single plugged controller. It is the one
//! place where the view↔session map is mutated, so the cross-entity
//! consistency rules live here rather than being scattered across call
//! sites.
//!
//! All operations run on the host's single UI thread and complete before
//! their notifications become observable through [`ViewManager::drain_events`].

use std::collections::{HashMap, VecDeque};

use super::container::Container;
use super::controller::SessionController;
use super::display::{DisplaySettings, TerminalView};
use super::error::ViewError;
use super::event::ViewEvent;
use super::splitter::ViewSplitter;
use super::types::{ContainerId, SplitDirection, ViewId};
use crate::session::{SessionHandle, SessionId};

/// Orchestrator for one window's containers, views and controllers.
///
/// A manager keeps every container displaying the same set of sessions
/// (one view per session per container); only [`detach_active_view`] and
/// [`view_close_request`] break that symmetry, and both act on a single
/// view.
///
/// Sessions are external: the host creates them, hands them in through
/// [`create_view`], and routes each backend's termination to
/// [`session_finished`].
///
/// [`create_view`]: ViewManager::create_view
/// [`detach_active_view`]: ViewManager::detach_active_view
/// [`view_close_request`]: ViewManager::view_close_request
/// [`session_finished`]: ViewManager::session_finished
pub struct ViewManager {
    splitter: ViewSplitter,
    /// The view↔session map. Mutated only through `bind_view`,
    /// `unbind_view` and `take_view`.
    session_map: HashMap<ViewId, SessionHandle>,
    views: HashMap<ViewId, TerminalView>,
    controllers: HashMap<ViewId, SessionController>,
    plugged: Option<ViewId>,
    settings: DisplaySettings,
    events: VecDeque<ViewEvent>,
}

impl ViewManager {
    /// Creates a manager with default display settings and no containers.
    #[must_use]
    pub fn new() -> Self {
        Self::with_settings(DisplaySettings::default())
    }

    /// Creates a manager whose new views use the given display settings.
    #[must_use]
    pub fn with_settings(settings: DisplaySettings) -> Self {
        Self {
            splitter: ViewSplitter::new(),
            session_map: HashMap::new(),
            views: HashMap::new(),
            controllers: HashMap::new(),
            plugged: None,
            settings,
            events: VecDeque::new(),
        }
    }

    /// Drains the pending notifications, oldest first.
    pub fn drain_events(&mut self) -> Vec<ViewEvent> {
        self.events.drain(..).collect()
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// Gives a session a presence in every container of this manager.
    ///
    /// Creates the first container if the tree has none, then broadcasts a
    /// fresh view and controller for the session into each container. The
    /// active container marks its new view active.
    ///
    /// The caller must route the session's "finished" notification to
    /// [`session_finished`](ViewManager::session_finished) so the views can
    /// be cleaned up when the backend terminates.
    pub fn create_view(&mut self, session: SessionHandle) {
        if self.splitter.is_empty() {
            self.splitter
                .add_container(Container::new(), SplitDirection::Vertical);
        }

        let session_id = session.borrow().id();
        let _span = crate::trace_operation_debug!("view.create", session = %session_id).entered();
        let active = self.splitter.active_container_id();

        for container_id in self.splitter.container_ids() {
            let view = self.build_view(container_id, &session);
            if let Some(container) = self.splitter.find_mut(container_id) {
                container.add_view(view);
                if Some(container_id) == active {
                    let _ = container.set_active_view(view);
                }
            }
            tracing::debug!(session = %session_id, %view, container = %container_id, "created view");
        }
    }

    /// Splits or unsplits the layout.
    ///
    /// With `split` true, the active container's current sessions are
    /// duplicated into a new sibling container along the vertical axis, so
    /// both containers display the same session set through distinct views.
    /// With `split` false, the active container (and all its views) is
    /// destroyed unless it is the last one, in which case nothing happens.
    ///
    /// Either way, focus is forced back onto the active container's active
    /// view.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::NoActiveContainer`] when splitting before any
    /// container exists.
    pub fn split_view(&mut self, split: bool) -> Result<(), ViewError> {
        let _span = crate::trace_operation_debug!("view.split", split).entered();
        if split {
            let source = self
                .splitter
                .active_container()
                .ok_or(ViewError::NoActiveContainer)?;
            // Snapshot: build_view mutates the manager while we iterate.
            let snapshot: Vec<ViewId> = source.views().to_vec();

            let mut container = Container::new();
            let container_id = container.id();
            for view in snapshot {
                let Some(handle) = self.session_map.get(&view).cloned() else {
                    tracing::warn!(%view, "view missing from session map, not duplicated");
                    continue;
                };
                let new_view = self.build_view(container_id, &handle);
                container.add_view(new_view);
            }

            self.splitter
                .add_container(container, SplitDirection::Vertical);
            tracing::debug!(container = %container_id, "split view");
        } else if self.splitter.container_count() > 1 {
            let active = self
                .splitter
                .active_container_id()
                .ok_or(ViewError::NoActiveContainer)?;
            let removed = self.splitter.remove_container(active)?;
            let had_views = !removed.is_empty();
            for &view in removed.views() {
                self.destroy_view_records(view);
            }
            tracing::debug!(container = %active, "removed split");
            if had_views {
                self.notify_if_all_empty();
            }
        }

        self.focus_active_view();
        Ok(())
    }

    /// Detaches the active view of the active container for rehosting.
    ///
    /// The view is unmapped and destroyed, and a
    /// [`ViewEvent::ViewDetached`] carries its session to the window layer.
    /// If the container emptied and is not the last one it is destroyed too,
    /// and the split UI toggle is reset; the last container is always kept
    /// as the anchor for future focus and broadcasts.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::NoActiveContainer`] if no container exists.
    pub fn detach_active_view(&mut self) -> Result<(), ViewError> {
        let _span = crate::trace_operation_debug!("view.detach").entered();
        let container_id = self
            .splitter
            .active_container_id()
            .ok_or(ViewError::NoActiveContainer)?;
        let Some(view) = self
            .splitter
            .find(container_id)
            .and_then(Container::active_view)
        else {
            return Ok(());
        };

        let Some(handle) = self.session_map.get(&view).cloned() else {
            tracing::warn!(%view, "active view missing from session map, not detaching");
            return Ok(());
        };
        let session = handle.borrow().id();

        self.events.push_back(ViewEvent::ViewDetached {
            session,
            handle: handle.clone(),
        });

        if let Some(container) = self.splitter.find_mut(container_id) {
            container.remove_view(view);
        }
        self.destroy_view_records(view);

        if self.splitter.container_count() > 1
            && self
                .splitter
                .find(container_id)
                .is_some_and(Container::is_empty)
        {
            self.splitter.remove_container(container_id)?;
            self.events.push_back(ViewEvent::SplitStateChanged(false));
        }

        tracing::debug!(%view, %session, "detached view");
        self.notify_if_all_empty();
        Ok(())
    }

    /// Removes every view bound to a session that has terminated.
    ///
    /// One pass over the global view↔session map removes the session's
    /// presence from all containers at once, then focus is re-established on
    /// the active container's (possibly different) active view.
    pub fn session_finished(&mut self, session: SessionId) {
        let _span = crate::trace_operation_debug!("session.finished", %session).entered();
        let doomed: Vec<ViewId> = self
            .views
            .values()
            .filter(|view| view.session() == session)
            .map(TerminalView::id)
            .collect();

        for &view in &doomed {
            let container = self.views.get(&view).map(TerminalView::container);
            if let Some(container) = container.and_then(|id| self.splitter.find_mut(id)) {
                container.remove_view(view);
            }
            self.destroy_view_records(view);
        }

        if !doomed.is_empty() {
            tracing::debug!(%session, views = doomed.len(), "cleaned up finished session");
            self.notify_if_all_empty();
        }

        self.focus_active_view();
    }

    /// Handles a user-initiated close on one view.
    ///
    /// The view is destroyed, and if its session has no views bound anywhere
    /// afterwards the session is asked to close. A close request for a view
    /// this manager does not know is reported and otherwise ignored.
    pub fn view_close_request(&mut self, view: ViewId) {
        let Some(handle) = self.session_map.get(&view).cloned() else {
            tracing::warn!(%view, "close request from unknown view");
            return;
        };

        if let Some(container_id) = self.views.get(&view).map(TerminalView::container) {
            if let Some(container) = self.splitter.find_mut(container_id) {
                container.remove_view(view);
            }
        }
        self.destroy_view_records(view);

        if handle.borrow().view_count() == 0 {
            tracing::debug!(session = %handle.borrow().id(), "last view closed, closing session");
            handle.borrow_mut().close();
        }

        self.notify_if_all_empty();
    }

    /// Routes a container's active-view change back into the layout state.
    ///
    /// The view's container becomes the active container, the view becomes
    /// its active view, and the host is asked to focus the view's surface
    /// (which will come back through [`view_focused`](ViewManager::view_focused)).
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::ViewNotFound`] for a view this manager does not
    /// own.
    pub fn view_activated(&mut self, view: ViewId) -> Result<(), ViewError> {
        let container_id = self
            .views
            .get(&view)
            .map(TerminalView::container)
            .ok_or(ViewError::ViewNotFound(view))?;
        self.splitter.set_active(container_id)?;
        if let Some(container) = self.splitter.find_mut(container_id) {
            container.set_active_view(view)?;
        }
        self.events.push_back(ViewEvent::FocusRequested(view));
        Ok(())
    }

    /// Swaps the plugged controller when a view gains UI focus.
    ///
    /// If the focused view's controller differs from the plugged one, the
    /// old controller is unplugged first, then the new one is plugged and
    /// its title forwarded as the window title. This is the only place
    /// global UI action state changes; at most one controller is ever
    /// plugged.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::ViewNotFound`] for a view without a controller.
    pub fn view_focused(&mut self, view: ViewId) -> Result<(), ViewError> {
        let title = self
            .controllers
            .get(&view)
            .ok_or(ViewError::ViewNotFound(view))?
            .title()
            .to_owned();

        if self.plugged == Some(view) {
            return Ok(());
        }

        if let Some(old) = self.plugged.take() {
            self.events.push_back(ViewEvent::ControllerUnplugged(old));
        }
        self.plugged = Some(view);
        self.events.push_back(ViewEvent::ControllerPlugged(view));
        self.events.push_back(ViewEvent::TitleChanged(title));
        Ok(())
    }

    /// Records a title change on a view's controller.
    ///
    /// Forwarded to the window only when that controller is the plugged one.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::ViewNotFound`] for a view without a controller.
    pub fn set_view_title(
        &mut self,
        view: ViewId,
        title: impl Into<String>,
    ) -> Result<(), ViewError> {
        let controller = self
            .controllers
            .get_mut(&view)
            .ok_or(ViewError::ViewNotFound(view))?;
        let title = title.into();
        controller.set_title(title.clone());
        if self.plugged == Some(view) {
            self.events.push_back(ViewEvent::TitleChanged(title));
        }
        Ok(())
    }

    /// Asks the host to focus the active container's active view.
    ///
    /// The resulting focus will re-enter through
    /// [`view_focused`](ViewManager::view_focused) and re-establish a valid
    /// plugged controller.
    pub fn focus_active_view(&mut self) {
        if let Some(view) = self
            .splitter
            .active_container()
            .and_then(Container::active_view)
        {
            self.events.push_back(ViewEvent::FocusRequested(view));
        }
    }

    /// Moves every view of `other`'s active container into this manager's
    /// active container.
    ///
    /// Each view keeps its controller and session binding; only the
    /// bookkeeping moves, per view, in a single transfer step, so no view is
    /// ever observable as absent from both managers. A source manager left
    /// with nothing but empty containers emits [`ViewEvent::Empty`].
    ///
    /// # Errors
    ///
    /// - [`ViewError::MergeSourceSplit`] if `other` holds more than one
    ///   container; merging only part of a split source would orphan the
    ///   rest, so the whole operation is refused.
    /// - [`ViewError::NoActiveContainer`] if this manager has no container.
    /// - [`ViewError::ViewNotFound`] if a source view lacks bookkeeping (a
    ///   broken contract; nothing is moved).
    pub fn merge(&mut self, other: &mut Self) -> Result<(), ViewError> {
        let _span = crate::trace_operation_debug!("view.merge").entered();
        if other.splitter.container_count() > 1 {
            return Err(ViewError::MergeSourceSplit);
        }
        let destination = self
            .splitter
            .active_container_id()
            .ok_or(ViewError::NoActiveContainer)?;
        let Some(source) = other.splitter.active_container() else {
            return Ok(());
        };
        let source_id = source.id();
        let moving: Vec<ViewId> = source.views().to_vec();

        // Validate the whole batch before mutating either manager.
        for &view in &moving {
            if !(other.views.contains_key(&view)
                && other.controllers.contains_key(&view)
                && other.session_map.contains_key(&view))
            {
                return Err(ViewError::ViewNotFound(view));
            }
        }

        for &view in &moving {
            self.take_view(other, source_id, destination, view);
        }

        if !moving.is_empty() {
            tracing::debug!(views = moving.len(), "merged views from other manager");
            if other.splitter.all_views_empty() {
                other.events.push_back(ViewEvent::Empty);
            }
        }
        Ok(())
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Returns the layout tree, for hosts that render it.
    #[must_use]
    pub const fn splitter(&self) -> &ViewSplitter {
        &self.splitter
    }

    /// Returns the number of containers.
    #[must_use]
    pub fn container_count(&self) -> usize {
        self.splitter.container_count()
    }

    /// Returns true when the layout holds more than one container.
    #[must_use]
    pub fn is_split(&self) -> bool {
        self.splitter.container_count() > 1
    }

    /// Returns the ID of the active container.
    #[must_use]
    pub const fn active_container_id(&self) -> Option<ContainerId> {
        self.splitter.active_container_id()
    }

    /// Returns the total number of live views.
    #[must_use]
    pub fn view_count(&self) -> usize {
        self.views.len()
    }

    /// Returns the session a view is bound to.
    #[must_use]
    pub fn session_of(&self, view: ViewId) -> Option<SessionId> {
        self.views.get(&view).map(TerminalView::session)
    }

    /// Returns the container a view belongs to.
    #[must_use]
    pub fn container_of(&self, view: ViewId) -> Option<ContainerId> {
        self.views.get(&view).map(TerminalView::container)
    }

    /// Returns a view's record.
    #[must_use]
    pub fn view_record(&self, view: ViewId) -> Option<&TerminalView> {
        self.views.get(&view)
    }

    /// Returns the sessions displayed by a container, in display order.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::ContainerNotFound`] for an unknown container.
    pub fn container_sessions(&self, container: ContainerId) -> Result<Vec<SessionId>, ViewError> {
        let container = self
            .splitter
            .find(container)
            .ok_or(ViewError::ContainerNotFound(container))?;
        Ok(container
            .views()
            .iter()
            .filter_map(|&view| self.session_of(view))
            .collect())
    }

    /// Returns a view's controller.
    #[must_use]
    pub fn controller(&self, view: ViewId) -> Option<&SessionController> {
        self.controllers.get(&view)
    }

    /// Returns the view whose controller is currently plugged.
    #[must_use]
    pub const fn plugged_controller(&self) -> Option<ViewId> {
        self.plugged
    }

    /// Returns the display settings new views are created with.
    #[must_use]
    pub const fn settings(&self) -> &DisplaySettings {
        &self.settings
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Creates the records for a new view of `session` in `container`:
    /// the view itself, its controller and its session-map binding. The
    /// caller adds the returned ID to the container.
    fn build_view(&mut self, container: ContainerId, session: &SessionHandle) -> ViewId {
        let (session_id, scheme) = {
            let session = session.borrow();
            (session.id(), session.color_scheme())
        };
        let record = TerminalView::new(session_id, container, self.settings.clone(), scheme);
        let view = record.id();
        self.controllers
            .insert(view, SessionController::new(session_id, view));
        self.views.insert(view, record);
        self.bind_view(view, session.clone());
        view
    }

    /// Inserts the view↔session map entry and informs the session.
    fn bind_view(&mut self, view: ViewId, session: SessionHandle) {
        session.borrow_mut().attach_view(view);
        self.session_map.insert(view, session);
    }

    /// Removes the view↔session map entry and informs the session.
    /// Removing an absent entry is a no-op.
    fn unbind_view(&mut self, view: ViewId) {
        if let Some(session) = self.session_map.remove(&view) {
            session.borrow_mut().detach_view(view);
        }
    }

    /// Destroys a view's records: map entry, view, controller, and the
    /// plugged slot if this view held it. Container membership is the
    /// caller's responsibility.
    fn destroy_view_records(&mut self, view: ViewId) {
        self.unbind_view(view);
        self.views.remove(&view);
        self.controllers.remove(&view);
        if self.plugged == Some(view) {
            self.plugged = None;
            self.events.push_back(ViewEvent::ControllerUnplugged(view));
        }
    }

    /// Re-homes one view from `other` into this manager. The view keeps its
    /// record and controller; the map entry moves in the same step.
    fn take_view(
        &mut self,
        other: &mut Self,
        source: ContainerId,
        destination: ContainerId,
        view: ViewId,
    ) {
        if let Some(container) = other.splitter.find_mut(source) {
            container.remove_view(view);
        }
        if other.plugged == Some(view) {
            other.plugged = None;
            other.events.push_back(ViewEvent::ControllerUnplugged(view));
        }

        let (Some(mut record), Some(controller), Some(handle)) = (
            other.views.remove(&view),
            other.controllers.remove(&view),
            other.session_map.remove(&view),
        ) else {
            // Guarded against in merge(); nothing sensible to move here.
            tracing::warn!(%view, "source view lost its bookkeeping mid-merge");
            return;
        };

        record.set_container(destination);
        self.views.insert(view, record);
        self.controllers.insert(view, controller);
        self.session_map.insert(view, handle);
        if let Some(container) = self.splitter.find_mut(destination) {
            container.add_view(view);
        }
    }

    /// Emits [`ViewEvent::Empty`] when every container has lost its views.
    /// Only called after an operation that actually destroyed a view.
    fn notify_if_all_empty(&mut self) {
        if !self.splitter.is_empty() && self.splitter.all_views_empty() {
            self.events.push_back(ViewEvent::Empty);
        }
    }
}

impl Default for ViewManager {
    fn default() -> Self {
        Self::new()
    }
}
