//! Session: drives one `EngineCore` through a script.
//!
//! DESIGN
//! ======
//! The session plays every collaborator the widget core expects from its
//! host. Events are dispatched to the engine one at a time; the returned
//! actions are serviced in order. A clipboard read is awaited before the
//! text goes back to the engine, and the engine ignores further paste
//! requests until then, so two pastes never interleave. The render loop
//! only reads engine state: each event that asked for a repaint produces
//! one frame, paced by a tokio interval when a frame interval is set.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::collections::VecDeque;
use std::time::Duration;

use canvas::camera::{Point, ViewOffset};
use canvas::engine::{Action, EngineCore};
use canvas::input::{CursorHint, Key};
use canvas::render::Frame;
use canvas::scene::{Shape, ShapeId};
use serde::Serialize;
use tokio::time::{Interval, MissedTickBehavior};
use tracing::{debug, warn};

use crate::clipboard::MemoryClipboard;
use crate::script::ScriptEvent;

/// Final state of a session, printed as JSON.
#[derive(Debug, Serialize)]
pub struct Report {
    pub shapes: Vec<Shape>,
    pub selection: Vec<ShapeId>,
    pub view_offset: ViewOffset,
    pub cursor: CursorHint,
    pub undo_depth: usize,
    pub redo_depth: usize,
    pub commits: usize,
    pub frames_rendered: usize,
    pub cursor_changes: usize,
    pub rejected_pastes: Vec<String>,
    pub clipboard: Option<String>,
    pub last_frame: Option<Frame>,
}

pub struct Session {
    core: EngineCore,
    clipboard: MemoryClipboard,
    pacing: Option<Interval>,
    commits: usize,
    frames_rendered: usize,
    cursor_changes: usize,
    rejected_pastes: Vec<String>,
    last_frame: Option<Frame>,
}

impl Session {
    /// A session over `core`. A zero `frame_interval` renders without pacing.
    #[must_use]
    pub fn new(core: EngineCore, clipboard: MemoryClipboard, frame_interval: Duration) -> Self {
        let pacing = (!frame_interval.is_zero()).then(|| {
            let mut interval = tokio::time::interval(frame_interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            interval
        });
        Self {
            core,
            clipboard,
            pacing,
            commits: 0,
            frames_rendered: 0,
            cursor_changes: 0,
            rejected_pastes: Vec::new(),
            last_frame: None,
        }
    }

    /// Mount the widget, replay `events`, unmount, and report.
    pub async fn run(&mut self, events: Vec<ScriptEvent>) -> Report {
        self.core.mount();
        self.render_frame().await;
        for event in events {
            self.apply(event).await;
        }
        self.core.unmount();
        self.report().await
    }

    /// Dispatch one event and service every action it produces.
    pub async fn apply(&mut self, event: ScriptEvent) {
        debug!(?event, "event");
        let actions = self.dispatch(event);
        self.service(actions).await;
    }

    pub async fn report(&self) -> Report {
        Report {
            shapes: self.core.scene().shapes().to_vec(),
            selection: self.core.selection(),
            view_offset: self.core.view_offset(),
            cursor: self.core.cursor(),
            undo_depth: self.core.undo_depth(),
            redo_depth: self.core.redo_depth(),
            commits: self.commits,
            frames_rendered: self.frames_rendered,
            cursor_changes: self.cursor_changes,
            rejected_pastes: self.rejected_pastes.clone(),
            clipboard: self.clipboard.contents().await,
            last_frame: self.last_frame.clone(),
        }
    }

    fn dispatch(&mut self, event: ScriptEvent) -> Vec<Action> {
        match event {
            ScriptEvent::PointerDown { x, y, button, modifiers } => {
                self.core.on_pointer_down(Point::new(x, y), button, modifiers)
            }
            ScriptEvent::PointerMove { x, y, modifiers } => self.core.on_pointer_move(Point::new(x, y), modifiers),
            ScriptEvent::PointerUp { x, y, button, modifiers } => {
                self.core.on_pointer_up(Point::new(x, y), button, modifiers)
            }
            ScriptEvent::DoubleClick { x, y } => self.core.on_double_click(Point::new(x, y)),
            ScriptEvent::KeyDown { key, modifiers } => self.core.on_key_down(&Key(key), modifiers),
            ScriptEvent::Command { name } => self.core.invoke(name),
            ScriptEvent::Viewport { width, height } => {
                self.core.set_viewport(width, height);
                vec![Action::RenderNeeded]
            }
        }
    }

    async fn service(&mut self, actions: Vec<Action>) {
        let mut queue = VecDeque::from(actions);
        let mut render = false;
        while let Some(action) = queue.pop_front() {
            match action {
                Action::RenderNeeded => render = true,
                Action::SetCursor(hint) => {
                    self.cursor_changes += 1;
                    debug!(cursor = hint.css(), "cursor");
                }
                Action::HistoryCommitted => self.commits += 1,
                Action::WriteClipboard(text) => self.clipboard.write(text).await,
                Action::ReadClipboard => {
                    let text = self.clipboard.read().await;
                    queue.extend(self.core.complete_paste(&text));
                }
                Action::PasteRejected { reason } => {
                    warn!(%reason, "paste rejected");
                    self.rejected_pastes.push(reason);
                }
            }
        }
        if render {
            self.render_frame().await;
        }
    }

    async fn render_frame(&mut self) {
        if let Some(interval) = self.pacing.as_mut() {
            interval.tick().await;
        }
        self.last_frame = Some(self.core.frame());
        self.frames_rendered += 1;
    }
}
