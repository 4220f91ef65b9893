//! Shared numeric constants for the canvas crate.

// ── Hit-testing ─────────────────────────────────────────────────

/// Width of the resize-handle band along each shape edge, in local units.
pub const RESIZE_MARGIN: f64 = 10.0;

// ── Clipboard ───────────────────────────────────────────────────

/// Translation applied to pasted shapes on both axes.
pub const PASTE_OFFSET: f64 = 10.0;

/// Length of generated shape identifiers.
pub const GENERATED_ID_LEN: usize = 8;

// ── History ─────────────────────────────────────────────────────

/// Default number of undo entries retained.
pub const HISTORY_DEPTH: usize = 100;

// ── Layout ──────────────────────────────────────────────────────

/// Width reserved for the command panel while a selection exists, in CSS pixels.
pub const SIDE_PANEL_WIDTH: f64 = 200.0;

// ── Rendering ───────────────────────────────────────────────────

/// Dash pattern (on, off) for selection outlines, in screen pixels.
pub const SELECTION_DASH: [f64; 2] = [3.0, 3.0];

/// Side length of the demo shapes seeded into a fresh board.
pub const DEMO_SHAPE_SIZE: f64 = 100.0;
