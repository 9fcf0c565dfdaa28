//! Error types for view composition operations

use super::types::{ContainerId, ViewId};

/// Errors that can occur during view manager operations.
///
/// Structural edge cases (unsplitting the last container, detaching the last
/// view of the last container) are defined no-ops and never surface here.
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    /// The layout tree has no containers yet, so there is no active one.
    #[error("no container is currently active")]
    NoActiveContainer,

    /// The specified container was not found in the layout tree.
    #[error("container not found: {0}")]
    ContainerNotFound(ContainerId),

    /// The specified view is not known to this manager.
    #[error("view not found: {0}")]
    ViewNotFound(ViewId),

    /// Cannot remove the last container; the tree always keeps one anchor.
    #[error("cannot remove the last container")]
    CannotRemoveLastContainer,

    /// Merge was refused because the source manager holds more than one
    /// container; merging only its active container would orphan the rest.
    #[error("merge source holds more than one container")]
    MergeSourceSplit,
}
