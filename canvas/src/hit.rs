//! Geometry and hit-testing.
//!
//! All tests operate in local (offset-corrected) coordinates; callers convert
//! screen points with [`crate::camera::ViewOffset::screen_to_local`] first.
//! Containment is inclusive on every edge, intersection is strict: two
//! rectangles that only touch along an edge do not intersect.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::consts::RESIZE_MARGIN;
use crate::scene::{Shape, ShapeId};

/// A plain rectangle used for marquee and intersection tests.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Normalized rectangle spanning two arbitrary corners.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }

    #[must_use]
    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self { x: self.x + dx, y: self.y + dy, ..self }
    }
}

/// Which of the eight handles a resize gesture drags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResizeDirection {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
    Left,
    Right,
    Top,
    Bottom,
}

impl ResizeDirection {
    /// Apply a pointer delta to `shape` for this handle.
    ///
    /// Dragging a left or top edge moves the origin and shrinks or grows the
    /// size by the same amount; dragging a right or bottom edge only changes
    /// the size. Nothing is clamped.
    #[must_use]
    pub fn apply(self, shape: &Shape, dx: f64, dy: f64) -> Shape {
        let mut out = shape.clone();
        match self {
            Self::TopLeft => {
                out.x += dx;
                out.y += dy;
                out.width -= dx;
                out.height -= dy;
            }
            Self::TopRight => {
                out.y += dy;
                out.width += dx;
                out.height -= dy;
            }
            Self::BottomRight => {
                out.width += dx;
                out.height += dy;
            }
            Self::BottomLeft => {
                out.x += dx;
                out.width -= dx;
                out.height += dy;
            }
            Self::Left => {
                out.x += dx;
                out.width -= dx;
            }
            Self::Right => out.width += dx,
            Self::Top => {
                out.y += dy;
                out.height -= dy;
            }
            Self::Bottom => out.height += dy,
        }
        out
    }
}

/// Inclusive containment: `px` in `[x, x+width]` and `py` in `[y, y+height]`.
#[must_use]
pub fn point_in_rect(px: f64, py: f64, shape: &Shape) -> bool {
    px >= shape.x && px <= shape.x + shape.width && py >= shape.y && py <= shape.y + shape.height
}

/// Open-interval overlap test. Edge contact alone does not count.
#[must_use]
pub fn rects_intersect(a: &Bounds, b: &Bounds) -> bool {
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}

/// Classify a point against the handle zones of `shape` using the default margin.
#[must_use]
pub fn resize_zone(px: f64, py: f64, shape: &Shape) -> Option<ResizeDirection> {
    resize_zone_with_margin(px, py, shape, RESIZE_MARGIN)
}

/// Classify a point against the handle zones of `shape`.
///
/// Returns `None` outside the shape and in its interior. Corners are checked
/// before edges, in the order top-left, top-right, bottom-right,
/// bottom-left, left, right, top, bottom; the first match wins.
#[must_use]
pub fn resize_zone_with_margin(px: f64, py: f64, shape: &Shape, margin: f64) -> Option<ResizeDirection> {
    if !point_in_rect(px, py, shape) {
        return None;
    }
    let near_left = px - shape.x < margin;
    let near_right = shape.x + shape.width - px < margin;
    let near_top = py - shape.y < margin;
    let near_bottom = shape.y + shape.height - py < margin;

    if near_left && near_top {
        Some(ResizeDirection::TopLeft)
    } else if near_right && near_top {
        Some(ResizeDirection::TopRight)
    } else if near_right && near_bottom {
        Some(ResizeDirection::BottomRight)
    } else if near_left && near_bottom {
        Some(ResizeDirection::BottomLeft)
    } else if near_left {
        Some(ResizeDirection::Left)
    } else if near_right {
        Some(ResizeDirection::Right)
    } else if near_top {
        Some(ResizeDirection::Top)
    } else if near_bottom {
        Some(ResizeDirection::Bottom)
    } else {
        None
    }
}

// =============================================================
// Layer picking
// =============================================================

/// Result of resolving a stack of overlapping shapes to one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerPick {
    /// The chosen shape.
    pub id: ShapeId,
    /// Position of the chosen shape in the largest-first ordering.
    pub index: usize,
}

/// Candidates ordered by area, largest first. Equal areas keep scene order.
#[must_use]
pub fn by_area_desc<'a>(candidates: &[&'a Shape]) -> Vec<&'a Shape> {
    let mut sorted = candidates.to_vec();
    sorted.sort_by(|a, b| b.area().total_cmp(&a.area()));
    sorted
}

/// Pick the interaction target among overlapping shapes.
///
/// A candidate that is already selected wins (the first one in scene order);
/// otherwise the largest shape does.
#[must_use]
pub fn pick_active(candidates: &[&Shape]) -> Option<LayerPick> {
    let sorted = by_area_desc(candidates);
    let chosen = candidates
        .iter()
        .copied()
        .find(|s| s.selected)
        .or_else(|| sorted.first().copied())?;
    let index = sorted.iter().position(|s| s.id == chosen.id).unwrap_or(0);
    Some(LayerPick { id: chosen.id.clone(), index })
}

/// Advance through the overlap stack for layer cycling.
///
/// Starting at `from_index` in the largest-first ordering, returns the first
/// shape that is not selected. When the stack is exhausted, wraps to the
/// largest shape.
#[must_use]
pub fn cycle_layer(candidates: &[&Shape], from_index: usize) -> Option<LayerPick> {
    let sorted = by_area_desc(candidates);
    let first = sorted.first()?;
    let next = sorted
        .iter()
        .enumerate()
        .skip(from_index)
        .find(|(_, s)| !s.selected)
        .map(|(index, s)| LayerPick { id: s.id.clone(), index });
    Some(next.unwrap_or_else(|| LayerPick { id: first.id.clone(), index: 0 }))
}
