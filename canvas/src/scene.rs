//! Scene model: shapes, identifiers, and the copy-on-write scene value.
//!
//! A [`Scene`] is an immutable, ordered sequence of [`Shape`] records. Order is
//! insertion order, not z-order; overlap resolution computes its own ordering
//! from area (see [`crate::hit::pick_active`]). Every mutation produces a new
//! `Scene` value, so a snapshot for the history stacks is just another handle
//! to the same shared storage.
//!
//! Data flows into this layer from the engine (gesture and command results)
//! and from the clipboard (pasted shapes). The renderer reads it via
//! [`Scene::shapes`].

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::camera::Point;
use crate::consts::{DEMO_SHAPE_SIZE, GENERATED_ID_LEN};
use crate::hit::{self, Bounds};

/// Unique identifier for a shape within a scene.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeId(String);

impl ShapeId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// A short random identifier. Callers are responsible for collision checks.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string().chars().take(GENERATED_ID_LEN).collect())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ShapeId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ShapeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// An axis-aligned rectangle on the board.
///
/// `width` and `height` are not clamped; a resize may drive them negative.
/// The serialized form uses camelCase keys so clipboard payloads stay
/// interchangeable with other whiteboard clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    /// Unique identifier for this shape.
    pub id: ShapeId,
    /// Left edge in local coordinates.
    pub x: f64,
    /// Top edge in local coordinates.
    pub y: f64,
    /// Extent along x. May be negative after a resize.
    pub width: f64,
    /// Extent along y. May be negative after a resize.
    pub height: f64,
    /// True while the shape is the target of the current interaction.
    #[serde(default)]
    pub selected: bool,
    /// True while the shape belongs to the durable multi-selection.
    #[serde(default)]
    pub permanent_selection: bool,
}

impl Shape {
    /// An unselected shape.
    #[must_use]
    pub fn new(id: impl Into<ShapeId>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { id: id.into(), x, y, width, height, selected: false, permanent_selection: false }
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds {
        Bounds { x: self.x, y: self.y, width: self.width, height: self.height }
    }

    /// Inclusive containment test in local coordinates.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        hit::point_in_rect(pt.x, pt.y, self)
    }

    #[must_use]
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self { x: self.x + dx, y: self.y + dy, ..self.clone() }
    }

    /// Copy with both selection flags set to `on`.
    #[must_use]
    pub fn with_selection(&self, on: bool) -> Self {
        Self { selected: on, permanent_selection: on, ..self.clone() }
    }

    /// Same identity and geometry, ignoring selection flags.
    #[allow(clippy::float_cmp)]
    #[must_use]
    pub fn same_geometry(&self, other: &Shape) -> bool {
        self.id == other.id
            && self.x == other.x
            && self.y == other.y
            && self.width == other.width
            && self.height == other.height
    }
}

/// Immutable ordered collection of shapes.
///
/// Cloning a `Scene` shares storage; transformations return new values and
/// never edit shapes in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    shapes: Arc<Vec<Shape>>,
}

impl Scene {
    #[must_use]
    pub fn new(shapes: Vec<Shape>) -> Self {
        Self { shapes: Arc::new(shapes) }
    }

    /// Three 100x100 shapes laid out on a diagonal, the widget's initial content.
    #[must_use]
    pub fn demo() -> Self {
        let size = DEMO_SHAPE_SIZE;
        Self::new(vec![
            Shape::new(ShapeId::generate(), 50.0, 50.0, size, size),
            Shape::new(ShapeId::generate(), 200.0, 200.0, size, size),
            Shape::new(ShapeId::generate(), 400.0, 400.0, size, size),
        ])
    }

    /// Shapes in insertion order.
    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| &s.id == id)
    }

    #[must_use]
    pub fn contains_id(&self, id: &ShapeId) -> bool {
        self.get(id).is_some()
    }

    /// All shapes whose bounds contain `pt`, in scene order.
    #[must_use]
    pub fn shapes_at(&self, pt: Point) -> Vec<&Shape> {
        self.shapes.iter().filter(|s| s.contains(pt)).collect()
    }

    /// Shapes with the `selected` flag set, in scene order.
    #[must_use]
    pub fn selected(&self) -> Vec<&Shape> {
        self.shapes.iter().filter(|s| s.selected).collect()
    }

    #[must_use]
    pub fn has_selection(&self) -> bool {
        self.shapes.iter().any(|s| s.selected)
    }

    /// Whether both values share the same storage.
    #[must_use]
    pub fn ptr_eq(&self, other: &Scene) -> bool {
        Arc::ptr_eq(&self.shapes, &other.shapes)
    }

    /// Whether the two scenes hold the same shapes in the same order with the
    /// same geometry. Selection flags are ignored.
    #[must_use]
    pub fn same_content(&self, other: &Scene) -> bool {
        self.ptr_eq(other)
            || (self.len() == other.len()
                && self.shapes.iter().zip(other.shapes.iter()).all(|(a, b)| a.same_geometry(b)))
    }

    /// New scene with `f` applied to every shape.
    #[must_use]
    pub fn map(&self, f: impl FnMut(&Shape) -> Shape) -> Self {
        Self::new(self.shapes.iter().map(f).collect())
    }

    /// New scene keeping only the shapes matching `keep`.
    #[must_use]
    pub fn retain(&self, mut keep: impl FnMut(&Shape) -> bool) -> Self {
        Self::new(self.shapes.iter().filter(|s| keep(s)).cloned().collect())
    }

    /// New scene with `extra` appended after the existing shapes.
    #[must_use]
    pub fn appended(&self, extra: Vec<Shape>) -> Self {
        let mut shapes = Vec::with_capacity(self.len() + extra.len());
        shapes.extend(self.shapes.iter().cloned());
        shapes.extend(extra);
        Self::new(shapes)
    }

    /// New scene where each shape's selection flags are set to `pick(shape)`.
    #[must_use]
    pub fn with_selection(&self, mut pick: impl FnMut(&Shape) -> bool) -> Self {
        self.map(|s| s.with_selection(pick(s)))
    }
}
