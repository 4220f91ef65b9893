use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::camera::{Point, ViewOffset};
use crate::clipboard;
use crate::config::EngineConfig;
use crate::hit::{self, Bounds, ResizeDirection};
use crate::history::History;
use crate::input::{Button, Command, CursorHint, InputState, Key, Modifiers, UiState};
use crate::render::{self, Frame};
use crate::scene::{Scene, Shape, ShapeId};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The scene, selection, marquee or view offset changed; repaint.
    RenderNeeded,
    /// Apply a new cursor style.
    SetCursor(CursorHint),
    /// A new undo entry was recorded.
    HistoryCommitted,
    /// Write this text to the shared clipboard.
    WriteClipboard(String),
    /// Read the shared clipboard and pass the text to [`EngineCore::complete_paste`].
    ReadClipboard,
    /// Clipboard content could not be pasted; the scene is unchanged.
    PasteRejected { reason: String },
}

/// The marquee rectangle in both coordinate spaces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marquee {
    /// Normalized rectangle in screen coordinates, as drawn.
    pub screen: Bounds,
    /// The same rectangle in local coordinates, as hit-tested.
    pub local: Bounds,
}

/// Core engine state: all logic that does not depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    pub scene: Scene,
    pub view: ViewOffset,
    pub ui: UiState,
    pub input: InputState,
    pub history: History,
    pub config: EngineConfig,
    pub viewport_width: f64,
    pub viewport_height: f64,
    /// Scene captured at pointer-down; compared on pointer-up to decide whether to commit.
    gesture_origin: Option<Scene>,
    next_id: Box<dyn FnMut() -> ShapeId>,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::with_config(EngineConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            scene: Scene::default(),
            view: ViewOffset::default(),
            ui: UiState::default(),
            input: InputState::default(),
            history: History::new(config.history_depth),
            config,
            viewport_width: 0.0,
            viewport_height: 0.0,
            gesture_origin: None,
            next_id: Box::new(ShapeId::generate),
        }
    }

    /// Replace the generator used for ids of pasted shapes that collide.
    #[must_use]
    pub fn with_id_generator(mut self, next_id: impl FnMut() -> ShapeId + 'static) -> Self {
        self.next_id = Box::new(next_id);
        self
    }

    // --- Data inputs ---

    /// Replace the scene wholesale. Clears history and any gesture in progress.
    pub fn load_snapshot(&mut self, shapes: Vec<Shape>) {
        self.scene = Scene::new(shapes);
        self.history.clear();
        self.input = InputState::Idle;
        self.gesture_origin = None;
        self.ui.layer_index = 0;
        tracing::debug!(count = self.scene.len(), "scene loaded");
    }

    /// Load the three demo shapes a fresh board starts with.
    pub fn seed_demo(&mut self) {
        self.load_snapshot(Scene::demo().shapes().to_vec());
    }

    // --- Lifecycle ---

    /// Subscribe the keyboard handler.
    pub fn mount(&mut self) {
        self.ui.mounted = true;
    }

    /// Unsubscribe the keyboard handler. Later key events are dropped.
    pub fn unmount(&mut self) {
        self.ui.mounted = false;
    }

    // --- Viewport ---

    /// Update the drawable area supplied by the host.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport_width = width;
        self.viewport_height = height;
    }

    /// Canvas size for the current frame. The command panel takes its
    /// width out of the viewport while a selection exists.
    #[must_use]
    pub fn canvas_size(&self) -> (f64, f64) {
        let width = if self.scene.has_selection() {
            (self.viewport_width - self.config.side_panel_width).max(0.0)
        } else {
            self.viewport_width
        };
        (width, self.viewport_height)
    }

    // =============================================================
    // Pointer input
    // =============================================================

    /// Start a gesture: pick and select a shape, then drag or resize it;
    /// or, on empty canvas, marquee-select (shift) or pan.
    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        let mut actions = Vec::new();
        if button != Button::Primary {
            return actions;
        }
        if !self.input.is_idle() {
            actions.extend(self.finish_gesture(screen_pt));
        }

        let local = self.view.screen_to_local(screen_pt);
        self.gesture_origin = Some(self.scene.clone());

        let pick = hit::pick_active(&self.scene.shapes_at(local));
        if let Some(pick) = pick {
            self.ui.layer_index = pick.index;
            let additive = modifiers.shift;
            self.scene = self.scene.with_selection(|s| s.id == pick.id || (additive && s.selected));
            self.input = match self.zone_at(&pick.id, local) {
                Some((id, direction)) => InputState::Resizing { id, direction, last_local: local },
                None => InputState::Dragging { last_local: local },
            };
        } else if modifiers.shift {
            self.input = InputState::MarqueeSelecting { start: screen_pt, end: screen_pt };
        } else {
            if self.scene.has_selection() {
                self.scene = self.scene.with_selection(|_| false);
            }
            self.input = InputState::PanningView { last_screen: screen_pt };
        }
        tracing::debug!(state = ?self.input, "gesture started");

        let hint = match &self.input {
            InputState::Resizing { direction, .. } => CursorHint::for_direction(Some(*direction)),
            _ => CursorHint::Default,
        };
        self.set_cursor(hint, &mut actions);
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Advance the active gesture, or update hover feedback when idle.
    pub fn on_pointer_move(&mut self, screen_pt: Point, _modifiers: Modifiers) -> Vec<Action> {
        let mut actions = Vec::new();
        let local = self.view.screen_to_local(screen_pt);

        match &mut self.input {
            InputState::Idle => {
                let hint = self.hover_hint(local);
                self.set_cursor(hint, &mut actions);
                return actions;
            }
            InputState::Dragging { last_local } => {
                let (dx, dy) = local.delta_from(*last_local);
                *last_local = local;
                self.scene = self.scene.map(|s| if s.selected { s.translated(dx, dy) } else { s.clone() });
            }
            InputState::Resizing { id, direction, last_local } => {
                let (dx, dy) = local.delta_from(*last_local);
                *last_local = local;
                let direction = *direction;
                self.scene = self.scene.map(|s| if s.id == *id { direction.apply(s, dx, dy) } else { s.clone() });
            }
            InputState::MarqueeSelecting { start, end } => {
                *end = screen_pt;
                let area = Bounds::from_corners(self.view.screen_to_local(*start), local);
                self.scene = self.scene.with_selection(|s| hit::rects_intersect(&s.bounds(), &area));
            }
            InputState::PanningView { last_screen } => {
                let (dx, dy) = screen_pt.delta_from(*last_screen);
                *last_screen = screen_pt;
                self.view = self.view.panned(dx, dy);
            }
        }

        actions.push(Action::RenderNeeded);
        actions
    }

    /// End the active gesture and commit it if the scene content changed.
    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        if button != Button::Primary || self.input.is_idle() {
            return Vec::new();
        }
        self.finish_gesture(screen_pt)
    }

    /// Cycle the pick through the shapes stacked under the pointer.
    pub fn on_double_click(&mut self, screen_pt: Point) -> Vec<Action> {
        let local = self.view.screen_to_local(screen_pt);
        let Some(pick) = hit::cycle_layer(&self.scene.shapes_at(local), self.ui.layer_index) else {
            return Vec::new();
        };
        tracing::debug!(id = %pick.id, index = pick.index, "layer cycled");
        self.ui.layer_index = pick.index;
        self.scene = self.scene.with_selection(|s| s.id == pick.id);
        vec![Action::RenderNeeded]
    }

    // =============================================================
    // Keyboard input
    // =============================================================

    /// Dispatch a keyboard shortcut. Ignored while unmounted.
    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        if !self.ui.mounted {
            tracing::debug!(key = %key.0, "key dropped while unmounted");
            return Vec::new();
        }
        if modifiers.primary() {
            if key.is_letter('z') {
                return if modifiers.shift { self.redo() } else { self.undo() };
            }
            if key.is_letter('c') {
                return self.copy();
            }
            if key.is_letter('v') {
                return self.request_paste();
            }
        }
        if key.is_delete() {
            return self.delete_selected();
        }
        Vec::new()
    }

    // =============================================================
    // History
    // =============================================================

    /// Restore the previous scene. No-op when there is nothing to undo.
    pub fn undo(&mut self) -> Vec<Action> {
        let Some(previous) = self.history.undo(self.scene.clone()) else {
            return Vec::new();
        };
        self.replace_scene(previous);
        tracing::debug!(undo = self.history.undo_depth(), redo = self.history.redo_depth(), "undo");
        vec![Action::RenderNeeded]
    }

    /// Reapply the most recently undone scene. No-op when there is nothing to redo.
    pub fn redo(&mut self) -> Vec<Action> {
        let Some(next) = self.history.redo(self.scene.clone()) else {
            return Vec::new();
        };
        self.replace_scene(next);
        tracing::debug!(undo = self.history.undo_depth(), redo = self.history.redo_depth(), "redo");
        vec![Action::RenderNeeded]
    }

    // =============================================================
    // Commands
    // =============================================================

    /// Commands offered by the panel. Empty while nothing is selected.
    #[must_use]
    pub fn command_buttons(&self) -> Vec<Command> {
        if self.scene.has_selection() { Command::ALL.to_vec() } else { Vec::new() }
    }

    /// Run a command, exactly as its keyboard shortcut would.
    pub fn invoke(&mut self, command: Command) -> Vec<Action> {
        match command {
            Command::Copy => self.copy(),
            Command::Paste => self.request_paste(),
            Command::Delete => self.delete_selected(),
        }
    }

    /// Encode the selection for the clipboard.
    pub fn copy(&mut self) -> Vec<Action> {
        let selected = self.scene.selected();
        if selected.is_empty() {
            return Vec::new();
        }
        match clipboard::encode(&selected) {
            Ok(text) => {
                tracing::debug!(count = selected.len(), "selection copied");
                vec![Action::WriteClipboard(text)]
            }
            Err(e) => {
                tracing::warn!(error = %e, "copy failed");
                Vec::new()
            }
        }
    }

    /// Ask the host for the clipboard contents. Ignored while a read is in flight.
    pub fn request_paste(&mut self) -> Vec<Action> {
        if self.ui.paste_pending {
            tracing::debug!("paste already pending");
            return Vec::new();
        }
        self.ui.paste_pending = true;
        vec![Action::ReadClipboard]
    }

    /// Paste clipboard text read by the host.
    ///
    /// Pasted shapes get fresh ids where needed, are offset from their
    /// source, and become the whole selection. Malformed text leaves the
    /// scene untouched.
    pub fn complete_paste(&mut self, text: &str) -> Vec<Action> {
        self.ui.paste_pending = false;
        let parsed = match clipboard::decode(text) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(error = %e, "paste rejected");
                return vec![Action::PasteRejected { reason: e.to_string() }];
            }
        };
        if parsed.is_empty() {
            return Vec::new();
        }

        let pasted = clipboard::prepare_paste(parsed, &self.scene, self.config.paste_offset, || (self.next_id)());
        let count = pasted.len();
        let previous = self.scene.clone();
        self.scene = previous.with_selection(|_| false).appended(pasted);
        self.commit_command(previous);
        tracing::debug!(count, "shapes pasted");
        vec![Action::HistoryCommitted, Action::RenderNeeded]
    }

    /// Remove every selected shape.
    pub fn delete_selected(&mut self) -> Vec<Action> {
        if !self.scene.has_selection() {
            return Vec::new();
        }
        let previous = self.scene.clone();
        self.scene = previous.retain(|s| !s.selected);
        self.commit_command(previous);
        tracing::debug!(remaining = self.scene.len(), "selection deleted");
        vec![Action::HistoryCommitted, Action::RenderNeeded]
    }

    // --- Render ---

    /// Paint commands for the current state.
    #[must_use]
    pub fn frame(&self) -> Frame {
        let (width, height) = self.canvas_size();
        render::frame(&self.scene, self.view, self.marquee().map(|m| m.screen), width, height)
    }

    // --- Queries ---

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Ids of the selected shapes, in scene order.
    #[must_use]
    pub fn selection(&self) -> Vec<ShapeId> {
        self.scene.selected().into_iter().map(|s| s.id.clone()).collect()
    }

    #[must_use]
    pub fn view_offset(&self) -> ViewOffset {
        self.view
    }

    /// The marquee while area-selecting.
    #[must_use]
    pub fn marquee(&self) -> Option<Marquee> {
        match self.input {
            InputState::MarqueeSelecting { start, end } => Some(Marquee {
                screen: Bounds::from_corners(start, end),
                local: Bounds::from_corners(self.view.screen_to_local(start), self.view.screen_to_local(end)),
            }),
            _ => None,
        }
    }

    #[must_use]
    pub fn input_state(&self) -> &InputState {
        &self.input
    }

    #[must_use]
    pub fn cursor(&self) -> CursorHint {
        self.ui.cursor
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.history.undo_depth()
    }

    #[must_use]
    pub fn redo_depth(&self) -> usize {
        self.history.redo_depth()
    }

    // --- Internals ---

    /// Return to idle, committing the gesture if it changed scene content.
    fn finish_gesture(&mut self, screen_pt: Point) -> Vec<Action> {
        let mut actions = Vec::new();
        let ended = std::mem::take(&mut self.input);
        if let Some(origin) = self.gesture_origin.take() {
            if !origin.same_content(&self.scene) {
                self.history.commit(origin);
                actions.push(Action::HistoryCommitted);
                tracing::debug!(undo = self.history.undo_depth(), "gesture committed");
            }
        }
        tracing::debug!(state = ?ended, "gesture finished");

        let hint = self.hover_hint(self.view.screen_to_local(screen_pt));
        self.set_cursor(hint, &mut actions);
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Record a command's pre-mutation scene. A gesture still in progress
    /// is rebased so pointer-up does not record the command a second time.
    fn commit_command(&mut self, previous: Scene) {
        self.history.commit(previous);
        self.rebase_gesture();
    }

    fn replace_scene(&mut self, scene: Scene) {
        self.scene = scene;
        self.rebase_gesture();
    }

    fn rebase_gesture(&mut self) {
        if self.gesture_origin.is_some() {
            self.gesture_origin = Some(self.scene.clone());
        }
    }

    /// Resize handle under `local`: the active shape first, then the other
    /// selected shapes in scene order.
    fn zone_at(&self, active: &ShapeId, local: Point) -> Option<(ShapeId, ResizeDirection)> {
        let margin = self.config.resize_margin;
        let zone =
            |s: &Shape| hit::resize_zone_with_margin(local.x, local.y, s, margin).map(|d| (s.id.clone(), d));
        self.scene
            .get(active)
            .and_then(zone)
            .or_else(|| self.scene.selected().into_iter().filter(|s| &s.id != active).find_map(zone))
    }

    /// Cursor for hovering at `local` while idle.
    fn hover_hint(&self, local: Point) -> CursorHint {
        let margin = self.config.resize_margin;
        let direction = self
            .scene
            .selected()
            .into_iter()
            .find_map(|s| hit::resize_zone_with_margin(local.x, local.y, s, margin));
        CursorHint::for_direction(direction)
    }

    fn set_cursor(&mut self, hint: CursorHint, actions: &mut Vec<Action>) {
        if self.ui.cursor != hint {
            self.ui.cursor = hint;
            actions.push(Action::SetCursor(hint));
        }
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas, core: EngineCore::new() }
    }

    // --- Delegated data inputs ---

    pub fn load_snapshot(&mut self, shapes: Vec<Shape>) {
        self.core.load_snapshot(shapes);
    }

    pub fn seed_demo(&mut self) {
        self.core.seed_demo();
    }

    pub fn mount(&mut self) {
        self.core.mount();
    }

    pub fn unmount(&mut self) {
        self.core.unmount();
    }

    // --- Viewport ---

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.core.set_viewport(width, height);
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_down(screen_pt, button, modifiers)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_move(screen_pt, modifiers)
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_up(screen_pt, button, modifiers)
    }

    pub fn on_double_click(&mut self, screen_pt: Point) -> Vec<Action> {
        self.core.on_double_click(screen_pt)
    }

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_key_down(key, modifiers)
    }

    pub fn invoke(&mut self, command: Command) -> Vec<Action> {
        self.core.invoke(command)
    }

    pub fn complete_paste(&mut self, text: &str) -> Vec<Action> {
        self.core.complete_paste(text)
    }

    // --- Render ---

    /// Size the canvas element and draw the current state to it.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or any `Canvas2D` call fails.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn render(&self) -> Result<(), JsValue> {
        let frame = self.core.frame();
        self.canvas.set_width(frame.width as u32);
        self.canvas.set_height(frame.height as u32);
        let ctx = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(JsValue::from)?;
        render::draw(&ctx, &frame)
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn selection(&self) -> Vec<ShapeId> {
        self.core.selection()
    }

    #[must_use]
    pub fn view_offset(&self) -> ViewOffset {
        self.core.view_offset()
    }

    #[must_use]
    pub fn command_buttons(&self) -> Vec<Command> {
        self.core.command_buttons()
    }

    #[must_use]
    pub fn cursor(&self) -> CursorHint {
        self.core.cursor()
    }
}
