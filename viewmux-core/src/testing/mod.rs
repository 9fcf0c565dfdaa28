//! Test doubles
//!
//! [`StubSession`] is an in-memory [`Session`](crate::session::Session)
//! implementation for unit and property tests. It records the attach,
//! detach and close calls the manager makes so tests can assert on the
//! session side of the view↔session contract.

use std::cell::RefCell;
use std::rc::Rc;

use crate::session::{ColorSchemeId, Session, SessionHandle, SessionId};
use crate::view::ViewId;

/// An in-memory session that records what the manager does to it.
#[derive(Debug)]
pub struct StubSession {
    id: SessionId,
    scheme: ColorSchemeId,
    views: Vec<ViewId>,
    closed: bool,
}

impl StubSession {
    /// Creates a stub with a fresh identity and color scheme.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: SessionId::new(),
            scheme: ColorSchemeId::new(),
            views: Vec::new(),
            closed: false,
        }
    }

    /// Wraps a fresh stub into the handle type the manager consumes.
    #[must_use]
    pub fn handle() -> (Rc<RefCell<Self>>, SessionHandle) {
        let stub = Rc::new(RefCell::new(Self::new()));
        let handle: SessionHandle = stub.clone();
        (stub, handle)
    }

    /// Returns the views currently attached, in attach order.
    #[must_use]
    pub fn views(&self) -> &[ViewId] {
        &self.views
    }

    /// Returns true once `close` has been called.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Session for StubSession {
    fn id(&self) -> SessionId {
        self.id
    }

    fn view_count(&self) -> usize {
        self.views.len()
    }

    fn attach_view(&mut self, view: ViewId) {
        self.views.push(view);
    }

    fn detach_view(&mut self, view: ViewId) {
        self.views.retain(|&v| v != view);
    }

    fn close(&mut self) {
        self.closed = true;
    }

    fn color_scheme(&self) -> ColorSchemeId {
        self.scheme
    }
}

impl Default for StubSession {
    fn default() -> Self {
        Self::new()
    }
}
