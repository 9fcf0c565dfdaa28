//! `viewmux` Core Library
//!
//! This crate provides the view composition core for a multi-pane terminal
//! host: the layout tree of containers, the per-view records and
//! controllers, the view↔session mapping and the manager that keeps them
//! consistent across splits, detaches, merges and session termination.
//!
//! # Crate Structure
//!
//! - [`view`] - Containers, the layout tree, view records, controllers,
//!   events and the [`ViewManager`](view::ViewManager)
//! - [`session`] - The session collaborator contract and identity types
//! - [`config`] - Display and logging settings persistence
//! - [`tracing`] - Structured logging setup
//! - [`testing`] - Test doubles for the session contract

// Enable missing_docs warning for public API documentation
#![warn(missing_docs)]

pub mod config;
pub mod session;
pub mod testing;
pub mod tracing;
pub mod view;

// =============================================================================
// Convenience re-exports
//
// Flat re-exports for hosts and the test suites. New code should prefer the
// modular paths (e.g. `viewmux_core::view::ViewManager`).
// =============================================================================

pub use self::tracing::{
    TracingConfig, TracingError, TracingLevel, TracingOutput, TracingResult,
    get_tracing_config, init_tracing, is_tracing_initialized,
};
pub use config::{AppSettings, ConfigError, ConfigManager, LoggingSettings};
pub use session::{ColorSchemeId, Session, SessionHandle, SessionId};
pub use view::{
    Container, ContainerId, ContainerNode, DisplaySettings, ScrollbarPosition, SessionController,
    SplitDirection, SplitNode, TerminalView, ViewError, ViewEvent, ViewId, ViewManager,
    ViewSplitter,
};
