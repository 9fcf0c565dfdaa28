//! Session collaborator interface
//!
//! A session is a running terminal backend: a process or connection context
//! that exists independently of how many views display it. Sessions are
//! created and destroyed by the hosting application; this crate only consumes
//! them through the [`Session`] trait.
//!
//! The session itself tracks which views are bound to it. The view manager
//! keeps that set current via [`Session::attach_view`] /
//! [`Session::detach_view`] and queries [`Session::view_count`] to decide
//! when a close request should terminate the whole session.
//!
//! The core is single-threaded and event-driven, so sessions are shared as
//! [`SessionHandle`] (`Rc<RefCell<dyn Session>>`). A session's "finished"
//! notification is routed by the host: when the backend terminates, the host
//! calls `ViewManager::session_finished` on every manager that may hold views
//! for it.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use uuid::Uuid;

use crate::view::ViewId;

/// Unique identifier for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Creates a new random session ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a session ID from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Session({})", self.0)
    }
}

/// Opaque handle to a color scheme owned by the host's configuration layer.
///
/// The manager copies this handle into every view it creates for a session;
/// resolving it to actual colors is the rendering layer's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorSchemeId(pub Uuid);

impl ColorSchemeId {
    /// Creates a new random color scheme handle.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ColorSchemeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ColorSchemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ColorScheme({})", self.0)
    }
}

/// Backend terminal session consumed by the view manager.
///
/// Implementations live in the hosting application (pty wrapper, remote
/// connection, ...). All methods are fire-and-forget from the manager's
/// perspective: failures inside the backend are not reported back and are
/// never retried by the core.
pub trait Session {
    /// Returns this session's identity.
    fn id(&self) -> SessionId;

    /// Returns the number of views currently bound to this session.
    fn view_count(&self) -> usize;

    /// Records that a view now displays this session.
    fn attach_view(&mut self, view: ViewId);

    /// Records that a view no longer displays this session.
    ///
    /// Detaching a view that was never attached is a no-op.
    fn detach_view(&mut self, view: ViewId);

    /// Asks the backend to terminate.
    fn close(&mut self);

    /// Returns the color scheme views of this session should be created with.
    fn color_scheme(&self) -> ColorSchemeId;
}

/// Shared handle to a session, cloneable across managers.
pub type SessionHandle = Rc<RefCell<dyn Session>>;
