//! Ordered view containers
//!
//! A [`Container`] is a tab-group-like holder of views. Insertion order is
//! the display order, and one view is active whenever the container is
//! non-empty. Containers hold at most one view per session; that invariant
//! is established by the manager's construction paths (broadcast and split
//! duplication), not checked at runtime.

use super::error::ViewError;
use super::types::{ContainerId, ViewId};

/// An ordered holder of views with one active view.
#[derive(Debug, Clone)]
pub struct Container {
    id: ContainerId,
    views: Vec<ViewId>,
    active: Option<ViewId>,
}

impl Container {
    /// Creates a new empty container with a unique ID.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: ContainerId::new(),
            views: Vec::new(),
            active: None,
        }
    }

    /// Returns this container's identity.
    #[must_use]
    pub const fn id(&self) -> ContainerId {
        self.id
    }

    /// Returns the views in display order.
    #[must_use]
    pub fn views(&self) -> &[ViewId] {
        &self.views
    }

    /// Returns the number of views held.
    #[must_use]
    pub fn view_count(&self) -> usize {
        self.views.len()
    }

    /// Returns true if this container holds no views.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Returns true if this container holds the given view.
    #[must_use]
    pub fn contains(&self, view: ViewId) -> bool {
        self.views.contains(&view)
    }

    /// Returns the active view, or `None` if the container is empty.
    #[must_use]
    pub const fn active_view(&self) -> Option<ViewId> {
        self.active
    }

    /// Appends a view at the end of the display order.
    ///
    /// The first view added to an empty container becomes active.
    pub fn add_view(&mut self, view: ViewId) {
        self.views.push(view);
        if self.active.is_none() {
            self.active = Some(view);
        }
    }

    /// Removes a view, preserving the order of the rest.
    ///
    /// If the removed view was active, the first remaining view becomes
    /// active (or none, when the container empties). Removing an absent
    /// view is a no-op and returns `false`.
    pub fn remove_view(&mut self, view: ViewId) -> bool {
        let Some(index) = self.views.iter().position(|&v| v == view) else {
            return false;
        };
        self.views.remove(index);
        if self.active == Some(view) {
            self.active = self.views.first().copied();
        }
        true
    }

    /// Makes a held view the active one.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::ViewNotFound`] if the view is not in this
    /// container.
    pub fn set_active_view(&mut self, view: ViewId) -> Result<(), ViewError> {
        if self.contains(view) {
            self.active = Some(view);
            Ok(())
        } else {
            Err(ViewError::ViewNotFound(view))
        }
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}
