//! Layout tree of view containers
//!
//! The splitter is a binary tree whose leaves are [`Container`]s and whose
//! inner nodes carry a split axis. It supports arbitrary nesting depth:
//!
//! ```text
//! Split(Vertical)
//! ├── Leaf(container A)
//! └── Split(Horizontal)
//!     ├── Leaf(container B)
//!     └── Leaf(container C)
//! ```
//!
//! The active container is tracked as a separate ID into this structure
//! rather than derived from rendering focus, so layout logic stays decoupled
//! from the UI. Once a container exists, the tree never drops back to zero
//! containers: removal of the final leaf is refused and the caller keeps it
//! as the anchor for future operations.

use super::container::Container;
use super::error::ViewError;
use super::types::{ContainerId, SplitDirection};

/// A node in the layout tree.
#[derive(Debug, Clone)]
pub enum ContainerNode {
    /// A leaf holding one container.
    Leaf(Container),
    /// A split holding two child nodes arranged along an axis.
    Split(SplitNode),
}

/// A split node containing two children.
#[derive(Debug, Clone)]
pub struct SplitNode {
    /// Split axis.
    pub direction: SplitDirection,
    /// First child (left for vertical splits, top for horizontal).
    pub first: Box<ContainerNode>,
    /// Second child (right for vertical splits, bottom for horizontal).
    pub second: Box<ContainerNode>,
}

/// Result of removing a container from a node.
#[derive(Debug)]
enum RemoveOutcome {
    /// The container was not found under this node.
    NotFound,
    /// The container was removed and its former sibling promoted.
    Removed(Container),
    /// The node itself is the leaf to remove; the caller must decide
    /// (for the tree root this means it is the last container).
    RemovedSelf,
}

impl ContainerNode {
    /// Returns the container if this is a leaf node.
    #[must_use]
    pub const fn as_leaf(&self) -> Option<&Container> {
        match self {
            Self::Leaf(container) => Some(container),
            Self::Split(_) => None,
        }
    }

    /// Returns the split node if this is a split.
    #[must_use]
    pub const fn as_split(&self) -> Option<&SplitNode> {
        match self {
            Self::Leaf(_) => None,
            Self::Split(split) => Some(split),
        }
    }

    /// Returns the total number of containers under this node.
    #[must_use]
    pub fn container_count(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Split(split) => split.first.container_count() + split.second.container_count(),
        }
    }

    fn collect_ids(&self, ids: &mut Vec<ContainerId>) {
        match self {
            Self::Leaf(container) => ids.push(container.id()),
            Self::Split(split) => {
                split.first.collect_ids(ids);
                split.second.collect_ids(ids);
            }
        }
    }

    fn collect_containers<'a>(&'a self, out: &mut Vec<&'a Container>) {
        match self {
            Self::Leaf(container) => out.push(container),
            Self::Split(split) => {
                split.first.collect_containers(out);
                split.second.collect_containers(out);
            }
        }
    }

    /// Finds a container by ID.
    #[must_use]
    pub fn find(&self, id: ContainerId) -> Option<&Container> {
        match self {
            Self::Leaf(container) => (container.id() == id).then_some(container),
            Self::Split(split) => split.first.find(id).or_else(|| split.second.find(id)),
        }
    }

    /// Finds a container by ID and returns a mutable reference.
    #[must_use]
    pub fn find_mut(&mut self, id: ContainerId) -> Option<&mut Container> {
        match self {
            Self::Leaf(container) => (container.id() == id).then_some(container),
            Self::Split(split) => {
                if let Some(container) = split.first.find_mut(id) {
                    Some(container)
                } else {
                    split.second.find_mut(id)
                }
            }
        }
    }

    /// Returns the first container in the tree (leftmost/topmost).
    #[must_use]
    pub fn first_container(&self) -> &Container {
        match self {
            Self::Leaf(container) => container,
            Self::Split(split) => split.first.first_container(),
        }
    }

    /// Replaces the anchor leaf with a split holding the anchor and the
    /// container taken from `slot`, arranged along `direction`.
    ///
    /// Returns true once the anchor was found and the slot consumed.
    fn insert_beside(
        &mut self,
        anchor: ContainerId,
        direction: SplitDirection,
        slot: &mut Option<Container>,
    ) -> bool {
        match self {
            Self::Leaf(existing) => {
                if existing.id() != anchor {
                    return false;
                }
                let Some(incoming) = slot.take() else {
                    return false;
                };
                let existing = std::mem::take(existing);
                *self = Self::Split(SplitNode {
                    direction,
                    first: Box::new(Self::Leaf(existing)),
                    second: Box::new(Self::Leaf(incoming)),
                });
                true
            }
            Self::Split(split) => {
                split.first.insert_beside(anchor, direction, slot)
                    || split.second.insert_beside(anchor, direction, slot)
            }
        }
    }

    /// Takes the container out of `child` if it is the leaf with `id`.
    fn try_take_child(child: &mut Self, id: ContainerId) -> Option<Container> {
        if child.as_leaf().is_some_and(|c| c.id() == id) {
            let node = std::mem::replace(child, Self::Leaf(Container::new()));
            match node {
                Self::Leaf(container) => Some(container),
                Self::Split(_) => None,
            }
        } else {
            None
        }
    }

    /// Removes a container, promoting its sibling into the parent slot.
    fn remove(&mut self, id: ContainerId) -> RemoveOutcome {
        match self {
            Self::Leaf(container) => {
                if container.id() == id {
                    RemoveOutcome::RemovedSelf
                } else {
                    RemoveOutcome::NotFound
                }
            }
            Self::Split(split) => {
                if let Some(container) = Self::try_take_child(&mut split.first, id) {
                    let second =
                        std::mem::replace(split.second.as_mut(), Self::Leaf(Container::new()));
                    *self = second;
                    return RemoveOutcome::Removed(container);
                }

                if let Some(container) = Self::try_take_child(&mut split.second, id) {
                    let first =
                        std::mem::replace(split.first.as_mut(), Self::Leaf(Container::new()));
                    *self = first;
                    return RemoveOutcome::Removed(container);
                }

                match split.first.remove(id) {
                    RemoveOutcome::NotFound => {}
                    outcome => return outcome,
                }

                split.second.remove(id)
            }
        }
    }
}

/// The layout tree with its active-container pointer.
///
/// A splitter starts with no containers at all; the manager creates the
/// first one on demand. From then on at least one container always remains.
#[derive(Debug, Clone, Default)]
pub struct ViewSplitter {
    root: Option<ContainerNode>,
    active: Option<ContainerId>,
}

impl ViewSplitter {
    /// Creates an empty splitter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the splitter holds no containers yet.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of containers in the tree.
    #[must_use]
    pub fn container_count(&self) -> usize {
        self.root.as_ref().map_or(0, ContainerNode::container_count)
    }

    /// Returns all container IDs in tree order (depth-first, left-to-right).
    #[must_use]
    pub fn container_ids(&self) -> Vec<ContainerId> {
        let mut ids = Vec::new();
        if let Some(root) = &self.root {
            root.collect_ids(&mut ids);
        }
        ids
    }

    /// Returns all containers in tree order.
    #[must_use]
    pub fn containers(&self) -> Vec<&Container> {
        let mut out = Vec::new();
        if let Some(root) = &self.root {
            root.collect_containers(&mut out);
        }
        out
    }

    /// Returns the root node, for hosts that render the layout.
    #[must_use]
    pub const fn root(&self) -> Option<&ContainerNode> {
        self.root.as_ref()
    }

    /// Finds a container by ID.
    #[must_use]
    pub fn find(&self, id: ContainerId) -> Option<&Container> {
        self.root.as_ref().and_then(|root| root.find(id))
    }

    /// Finds a container by ID and returns a mutable reference.
    #[must_use]
    pub fn find_mut(&mut self, id: ContainerId) -> Option<&mut Container> {
        self.root.as_mut().and_then(|root| root.find_mut(id))
    }

    /// Returns the ID of the active container.
    #[must_use]
    pub const fn active_container_id(&self) -> Option<ContainerId> {
        self.active
    }

    /// Returns the active container.
    #[must_use]
    pub fn active_container(&self) -> Option<&Container> {
        self.active.and_then(|id| self.find(id))
    }

    /// Returns a mutable reference to the active container.
    #[must_use]
    pub fn active_container_mut(&mut self) -> Option<&mut Container> {
        let id = self.active?;
        self.find_mut(id)
    }

    /// Makes a container the active one.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::ContainerNotFound`] if the container is not in
    /// the tree.
    pub fn set_active(&mut self, id: ContainerId) -> Result<(), ViewError> {
        if self.find(id).is_some() {
            self.active = Some(id);
            Ok(())
        } else {
            Err(ViewError::ContainerNotFound(id))
        }
    }

    /// Adds a container to the tree.
    ///
    /// The first container becomes the root and the active container.
    /// Subsequent containers are inserted as the sibling of the active one
    /// along `direction`; the active container is left unchanged so that
    /// focus stays where the user was working.
    pub fn add_container(&mut self, container: Container, direction: SplitDirection) {
        let id = container.id();
        match &mut self.root {
            None => {
                self.root = Some(ContainerNode::Leaf(container));
                self.active = Some(id);
            }
            Some(root) => {
                let anchor = self
                    .active
                    .unwrap_or_else(|| root.first_container().id());
                let mut slot = Some(container);
                let inserted = root.insert_beside(anchor, direction, &mut slot);
                debug_assert!(inserted, "active container missing from tree");
            }
        }
    }

    /// Removes a container from the tree, promoting its sibling.
    ///
    /// If the removed container was active, the first remaining container
    /// becomes active.
    ///
    /// # Errors
    ///
    /// - [`ViewError::ContainerNotFound`] if the container is not in the tree
    /// - [`ViewError::CannotRemoveLastContainer`] if it is the only one
    pub fn remove_container(&mut self, id: ContainerId) -> Result<Container, ViewError> {
        let Some(root) = &mut self.root else {
            return Err(ViewError::ContainerNotFound(id));
        };

        match root.remove(id) {
            RemoveOutcome::NotFound => Err(ViewError::ContainerNotFound(id)),
            RemoveOutcome::RemovedSelf => Err(ViewError::CannotRemoveLastContainer),
            RemoveOutcome::Removed(container) => {
                if self.active == Some(id) {
                    self.active = Some(root.first_container().id());
                }
                Ok(container)
            }
        }
    }

    /// Returns true when no container holds any view.
    ///
    /// This is the "all containers empty" condition the manager reports to
    /// its owner; vacuously true for a splitter without containers.
    #[must_use]
    pub fn all_views_empty(&self) -> bool {
        self.containers().iter().all(|c| c.is_empty())
    }
}
