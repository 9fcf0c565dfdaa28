//! Per-(session, view) UI controllers
//!
//! A [`SessionController`] bridges one session/view pair to the global UI:
//! it carries the window title for that pair and is the unit that gets
//! "plugged" into the host's menu/action system. Controllers are owned by
//! the manager for exactly as long as their view exists, and move with the
//! view when it is re-homed by a cross-manager merge.

use super::types::ViewId;
use crate::session::SessionId;

/// The UI-action and title bridge for one (session, view) pair.
#[derive(Debug, Clone)]
pub struct SessionController {
    session: SessionId,
    view: ViewId,
    title: String,
}

impl SessionController {
    /// Creates a controller for a session/view pair with an empty title.
    #[must_use]
    pub const fn new(session: SessionId, view: ViewId) -> Self {
        Self {
            session,
            view,
            title: String::new(),
        }
    }

    /// Returns the session this controller belongs to.
    #[must_use]
    pub const fn session(&self) -> SessionId {
        self.session
    }

    /// Returns the view this controller belongs to.
    #[must_use]
    pub const fn view(&self) -> ViewId {
        self.view
    }

    /// Returns the current title for this pair.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Updates the title for this pair.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }
}
