//! Interaction core for the whiteboard widget.
//!
//! This crate compiles natively (every piece of logic is testable without a
//! browser) and to WebAssembly, where [`engine::Engine`] binds the core to a
//! canvas element. It owns the full interaction lifecycle: interpreting raw
//! pointer and keyboard events as shape edits, keeping the copy-on-write
//! scene and its undo/redo history, hit-testing rectangles and resize
//! handles, and producing paint commands for each frame. The host is
//! responsible only for wiring events into the engine and servicing the
//! resulting [`engine::Action`]s (clipboard I/O, cursor style, repaint).
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Interaction state machine ([`engine::EngineCore`]) and browser wrapper |
//! | [`scene`] | Shapes and the immutable, snapshot-friendly scene |
//! | [`history`] | Undo/redo stacks over scene snapshots |
//! | [`camera`] | Points and the pan offset |
//! | [`input`] | Input event types, gesture states, cursor hints |
//! | [`hit`] | Point/rect tests, resize zones, layer picking |
//! | [`clipboard`] | Portable text encoding for copy/paste |
//! | [`render`] | Paint-command generation and the canvas painter |
//! | [`config`] | Engine tunables |
//! | [`consts`] | Shared numeric constants |

pub mod camera;
pub mod clipboard;
pub mod config;
pub mod consts;
pub mod engine;
pub mod history;
pub mod hit;
pub mod input;
pub mod render;
pub mod scene;
