//! Rendering: turns the current scene into paint commands and replays them
//! on a 2D context.
//!
//! [`frame`] is pure and reads only the values it is given; it never
//! mutates application state. [`draw`] is the only place that touches
//! [`web_sys::CanvasRenderingContext2d`]. Splitting the two keeps the
//! frame contract testable without a browser.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use serde::Serialize;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::camera::ViewOffset;
use crate::consts::SELECTION_DASH;
use crate::hit::Bounds;
use crate::scene::Scene;

/// Stroke parameters for one rectangle outline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StrokeStyle {
    pub color: &'static str,
    pub line_width: f64,
    /// Dash pattern (on, off); `None` draws a solid line.
    pub dash: Option<[f64; 2]>,
}

impl StrokeStyle {
    /// Outline of every shape.
    pub const SHAPE: Self = Self { color: "black", line_width: 1.0, dash: None };
    /// Highlight drawn over selected shapes.
    pub const SELECTION: Self = Self { color: "gray", line_width: 2.0, dash: Some(SELECTION_DASH) };
    /// Marquee rectangle while area-selecting.
    pub const MARQUEE: Self = Self { color: "black", line_width: 2.0, dash: None };
}

/// One drawing operation, in screen coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PaintCommand {
    /// Clear the whole canvas.
    Clear { width: f64, height: f64 },
    /// Stroke a rectangle outline.
    StrokeRect { x: f64, y: f64, width: f64, height: f64, style: StrokeStyle },
}

/// Everything needed to paint one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub width: f64,
    pub height: f64,
    pub commands: Vec<PaintCommand>,
}

/// Build the paint commands for one frame.
///
/// Layers, bottom first: clear, every shape outline in scene order, the
/// selection highlight of every selected shape, then the marquee if one is
/// active. Shapes are shifted by `view`; `marquee` is already in screen space.
#[must_use]
pub fn frame(scene: &Scene, view: ViewOffset, marquee: Option<Bounds>, width: f64, height: f64) -> Frame {
    let mut commands = vec![PaintCommand::Clear { width, height }];

    let outline = |b: Bounds, style: StrokeStyle| PaintCommand::StrokeRect {
        x: b.x,
        y: b.y,
        width: b.width,
        height: b.height,
        style,
    };

    for shape in scene.shapes() {
        commands.push(outline(shape.bounds().translated(view.x, view.y), StrokeStyle::SHAPE));
    }
    for shape in scene.selected() {
        commands.push(outline(shape.bounds().translated(view.x, view.y), StrokeStyle::SELECTION));
    }
    if let Some(m) = marquee {
        commands.push(outline(m, StrokeStyle::MARQUEE));
    }

    Frame { width, height, commands }
}

/// Replay a frame on a 2D context.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(ctx: &CanvasRenderingContext2d, frame: &Frame) -> Result<(), JsValue> {
    for command in &frame.commands {
        match *command {
            PaintCommand::Clear { width, height } => ctx.clear_rect(0.0, 0.0, width, height),
            PaintCommand::StrokeRect { x, y, width, height, style } => {
                stroke_rect(ctx, x, y, width, height, style)?;
            }
        }
    }
    Ok(())
}

fn stroke_rect(
    ctx: &CanvasRenderingContext2d,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    style: StrokeStyle,
) -> Result<(), JsValue> {
    ctx.save();
    ctx.set_stroke_style_str(style.color);
    ctx.set_line_width(style.line_width);
    let dash_array = js_sys::Array::new();
    if let Some([on, off]) = style.dash {
        dash_array.push(&on.into());
        dash_array.push(&off.into());
    }
    ctx.set_line_dash(&dash_array)?;
    ctx.stroke_rect(x, y, width, height);
    ctx.restore();
    Ok(())
}
