//! Notifications from the manager to its host
//!
//! Signal wiring is modeled as a typed event queue: every operation pushes
//! its notifications onto the manager's queue, and the owning event loop
//! drains them after the call returns. Operations therefore complete before
//! any of their effects become observable, which is what makes multi-step
//! operations such as a cross-manager merge atomic from the host's view.

use super::types::ViewId;
use crate::session::{SessionHandle, SessionId};

/// A notification emitted by the view manager.
pub enum ViewEvent {
    /// The host should give UI focus to this view's rendering surface.
    FocusRequested(ViewId),
    /// This view's controller actions should be added to the global UI.
    ControllerPlugged(ViewId),
    /// This view's controller actions should be removed from the global UI.
    ControllerUnplugged(ViewId),
    /// The window title should change to match the plugged controller.
    TitleChanged(String),
    /// A view was detached for rehosting in a new top-level surface.
    ViewDetached {
        /// Identity of the detached view's session.
        session: SessionId,
        /// Handle to that session, for the window layer to rebind.
        handle: SessionHandle,
    },
    /// The split UI toggle should return to its unsplit representation.
    SplitStateChanged(bool),
    /// Every container is empty; the host may tear this manager down.
    Empty,
}

impl std::fmt::Debug for ViewEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FocusRequested(view) => write!(f, "FocusRequested({view})"),
            Self::ControllerPlugged(view) => write!(f, "ControllerPlugged({view})"),
            Self::ControllerUnplugged(view) => write!(f, "ControllerUnplugged({view})"),
            Self::TitleChanged(title) => write!(f, "TitleChanged({title:?})"),
            Self::ViewDetached { session, .. } => write!(f, "ViewDetached({session})"),
            Self::SplitStateChanged(split) => write!(f, "SplitStateChanged({split})"),
            Self::Empty => write!(f, "Empty"),
        }
    }
}
