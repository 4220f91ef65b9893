//! Engine tunables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::consts::{HISTORY_DEPTH, PASTE_OFFSET, RESIZE_MARGIN, SIDE_PANEL_WIDTH};

/// Tunable parameters for [`crate::engine::EngineCore`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Width of the resize-handle band along each shape edge.
    pub resize_margin: f64,
    /// Translation applied to pasted shapes on both axes.
    pub paste_offset: f64,
    /// Width reserved for the command panel while a selection exists.
    pub side_panel_width: f64,
    /// Maximum number of undo entries retained. Values below 1 act as 1.
    pub history_depth: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            resize_margin: RESIZE_MARGIN,
            paste_offset: PASTE_OFFSET,
            side_panel_width: SIDE_PANEL_WIDTH,
            history_depth: HISTORY_DEPTH,
        }
    }
}
