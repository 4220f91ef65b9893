#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

/// A point in either screen or local (canvas) space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - other`.
    #[must_use]
    pub fn delta_from(self, other: Point) -> (f64, f64) {
        (self.x - other.x, self.y - other.y)
    }
}

/// Pan state for the unbounded canvas.
///
/// A single translation applied uniformly to every shape when painting and
/// when converting pointer positions to local space. It is not part of the
/// scene, so panning is never undoable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewOffset {
    pub x: f64,
    pub y: f64,
}

impl ViewOffset {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Convert a screen-space point (CSS pixels, canvas-relative) to local coordinates.
    #[must_use]
    pub fn screen_to_local(&self, screen: Point) -> Point {
        Point { x: screen.x - self.x, y: screen.y - self.y }
    }

    /// Convert a local point to screen coordinates.
    #[must_use]
    pub fn local_to_screen(&self, local: Point) -> Point {
        Point { x: local.x + self.x, y: local.y + self.y }
    }

    /// Translate the offset by a screen-space pointer delta.
    #[must_use]
    pub fn panned(self, dx: f64, dy: f64) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }
}
