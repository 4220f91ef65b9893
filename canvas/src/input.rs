//! Input model: modifier keys, mouse buttons, commands, and the gesture state machine.
//!
//! `Modifiers`, `Button` and `Key` capture the raw event as the host saw it.
//! `InputState` is the active gesture tracked between pointer-down and
//! pointer-up, carrying the context needed to compute incremental deltas.
//! `CursorHint` is the cursor feedback the engine asks the host to apply;
//! the core never writes cursor styles itself.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::hit::ResizeDirection;
use crate::scene::ShapeId;

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    /// Shift key is held. Extends the selection and starts marquee selection.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Whether the shortcut modifier (Command on macOS, Ctrl elsewhere) is held.
    #[must_use]
    pub fn primary(self) -> bool {
        self.meta || self.ctrl
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    #[default]
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// A keyboard key.
///
/// The inner string holds the key name as reported by the browser (e.g. `"z"`, `"Delete"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Key(pub String);

impl Key {
    /// Case-insensitive match against a single-character key name.
    #[must_use]
    pub fn is_letter(&self, letter: char) -> bool {
        let mut chars = self.0.chars();
        matches!((chars.next(), chars.next()), (Some(c), None) if c.eq_ignore_ascii_case(&letter))
    }

    /// Whether this key deletes the selection.
    #[must_use]
    pub fn is_delete(&self) -> bool {
        matches!(self.0.as_str(), "Delete" | "Backspace")
    }
}

/// Selection commands exposed both as shortcuts and as panel buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    Copy,
    Paste,
    Delete,
}

impl Command {
    /// Every command, in panel order.
    pub const ALL: [Command; 3] = [Command::Copy, Command::Paste, Command::Delete];

    /// Button caption.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Copy => "Copy",
            Self::Paste => "Paste",
            Self::Delete => "Delete",
        }
    }
}

/// Cursor feedback for the host to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorHint {
    /// Inherit the host's default cursor.
    #[default]
    Default,
    /// Diagonal resize, top-left to bottom-right.
    NwseResize,
    /// Diagonal resize, top-right to bottom-left.
    NeswResize,
    /// Horizontal resize.
    EwResize,
    /// Vertical resize.
    NsResize,
}

impl CursorHint {
    /// Cursor for hovering or dragging a given handle.
    #[must_use]
    pub fn for_direction(direction: Option<ResizeDirection>) -> Self {
        match direction {
            None => Self::Default,
            Some(ResizeDirection::TopLeft | ResizeDirection::BottomRight) => Self::NwseResize,
            Some(ResizeDirection::TopRight | ResizeDirection::BottomLeft) => Self::NeswResize,
            Some(ResizeDirection::Left | ResizeDirection::Right) => Self::EwResize,
            Some(ResizeDirection::Top | ResizeDirection::Bottom) => Self::NsResize,
        }
    }

    /// CSS `cursor` value.
    #[must_use]
    pub fn css(self) -> &'static str {
        match self {
            Self::Default => "inherit",
            Self::NwseResize => "nwse-resize",
            Self::NeswResize => "nesw-resize",
            Self::EwResize => "ew-resize",
            Self::NsResize => "ns-resize",
        }
    }
}

/// Persistent UI state that outlives a single gesture.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Cursor hint most recently reported to the host.
    pub cursor: CursorHint,
    /// Position of the last pick in the largest-first overlap ordering.
    pub layer_index: usize,
    /// A clipboard read is in flight; further paste requests are ignored.
    pub paste_pending: bool,
    /// The keyboard handler is subscribed.
    pub mounted: bool,
}

/// Internal state for the input state machine.
///
/// Each active variant carries gesture context needed to compute deltas on
/// pointer-move. Every variant returns to `Idle` on pointer-up.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// Every selected shape follows the pointer.
    Dragging {
        /// Local-space position of the previous pointer event.
        last_local: Point,
    },
    /// One shape is being resized by one of its eight handles.
    Resizing {
        /// Id of the shape being resized.
        id: ShapeId,
        /// Which corner/edge handle is being dragged.
        direction: ResizeDirection,
        /// Local-space position of the previous pointer event.
        last_local: Point,
    },
    /// A marquee rectangle is selecting every shape it intersects.
    MarqueeSelecting {
        /// Screen-space corner where the drag started.
        start: Point,
        /// Screen-space corner under the pointer.
        end: Point,
    },
    /// The view offset follows the pointer.
    PanningView {
        /// Screen-space position of the previous pointer event.
        last_screen: Point,
    },
}

impl InputState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}
