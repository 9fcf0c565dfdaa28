//! View records and default display appearance
//!
//! A [`TerminalView`] is the manager-side record of one on-screen terminal
//! surface. The actual rendering widget is an external collaborator; the
//! record carries the identity, the bound session, the owning container and
//! the appearance options the widget should be constructed with.

use serde::{Deserialize, Serialize};

use super::types::{ContainerId, ViewId};
use crate::session::{ColorSchemeId, SessionId};

/// Default terminal width in columns.
pub const DEFAULT_COLUMNS: u16 = 80;

/// Default terminal height in rows.
pub const DEFAULT_ROWS: u16 = 40;

/// Default terminal font family.
pub const DEFAULT_FONT_FAMILY: &str = "Monospace";

/// Placement of the scrollbar on a terminal surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollbarPosition {
    /// Scrollbar on the left edge.
    Left,
    /// Scrollbar on the right edge.
    #[default]
    Right,
    /// No visible scrollbar.
    Hidden,
}

/// Appearance and geometry options a new view is created with.
///
/// These map onto the rendering collaborator's constructor arguments. The
/// defaults match the fixed values the manager historically applied to every
/// new display: an 80x40 monospace surface with a right-hand scrollbar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Font family for the terminal surface.
    pub font_family: String,
    /// Initial width in character cells.
    pub columns: u16,
    /// Initial height in character cells.
    pub rows: u16,
    /// Whether scrollback is disabled for new views.
    pub scrollback_disabled: bool,
    /// Scrollbar placement.
    pub scrollbar: ScrollbarPosition,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            columns: DEFAULT_COLUMNS,
            rows: DEFAULT_ROWS,
            scrollback_disabled: false,
            scrollbar: ScrollbarPosition::Right,
        }
    }
}

/// Manager-side record of one terminal view.
///
/// The bound session is fixed at creation and immutable for the view's life.
/// The owning container changes only when the view is re-homed by a
/// cross-manager merge.
#[derive(Debug, Clone)]
pub struct TerminalView {
    id: ViewId,
    session: SessionId,
    container: ContainerId,
    settings: DisplaySettings,
    color_scheme: ColorSchemeId,
}

impl TerminalView {
    /// Creates a new view record with a fresh ID.
    #[must_use]
    pub fn new(
        session: SessionId,
        container: ContainerId,
        settings: DisplaySettings,
        color_scheme: ColorSchemeId,
    ) -> Self {
        Self {
            id: ViewId::new(),
            session,
            container,
            settings,
            color_scheme,
        }
    }

    /// Returns this view's identity.
    #[must_use]
    pub const fn id(&self) -> ViewId {
        self.id
    }

    /// Returns the session this view displays.
    #[must_use]
    pub const fn session(&self) -> SessionId {
        self.session
    }

    /// Returns the container currently holding this view.
    #[must_use]
    pub const fn container(&self) -> ContainerId {
        self.container
    }

    /// Re-homes this view into another container.
    pub fn set_container(&mut self, container: ContainerId) {
        self.container = container;
    }

    /// Returns the appearance options this view was created with.
    #[must_use]
    pub const fn settings(&self) -> &DisplaySettings {
        &self.settings
    }

    /// Returns the color scheme handle for this view.
    #[must_use]
    pub const fn color_scheme(&self) -> ColorSchemeId {
        self.color_scheme
    }
}
