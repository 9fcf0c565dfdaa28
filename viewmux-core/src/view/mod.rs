//! View and layout composition
//!
//! Everything between the host window and the sessions lives here: the
//! binary layout tree of containers ([`splitter`]), the containers
//! themselves ([`container`]), per-view records and display settings
//! ([`display`]), per-pair UI controllers ([`controller`]), the typed
//! notification queue ([`event`]) and the [`ViewManager`] that ties them
//! together.

pub mod container;
pub mod controller;
pub mod display;
pub mod error;
pub mod event;
pub mod manager;
pub mod splitter;
pub mod types;

pub use container::Container;
pub use controller::SessionController;
pub use display::{DisplaySettings, ScrollbarPosition, TerminalView};
pub use error::ViewError;
pub use event::ViewEvent;
pub use manager::ViewManager;
pub use splitter::{ContainerNode, SplitNode, ViewSplitter};
pub use types::{ContainerId, SplitDirection, ViewId};
