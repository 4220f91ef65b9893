//! Portable text encoding for copy and paste.
//!
//! The clipboard payload is a JSON array of shape records with camelCase
//! keys. Unknown fields are ignored on decode so payloads from other
//! whiteboard clients paste cleanly.

#[cfg(test)]
#[path = "clipboard_test.rs"]
mod clipboard_test;

use std::collections::HashSet;

use crate::scene::{Scene, Shape, ShapeId};

/// Error returned by [`encode`] and [`decode`].
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    /// The selection could not be serialized.
    #[error("failed to encode clipboard payload: {0}")]
    Encode(#[source] serde_json::Error),
    /// The clipboard text is not a JSON array of shapes.
    #[error("failed to decode clipboard payload: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Serialize shapes for the external clipboard.
///
/// # Errors
///
/// Returns [`ClipboardError::Encode`] if serialization fails.
pub fn encode(shapes: &[&Shape]) -> Result<String, ClipboardError> {
    serde_json::to_string(shapes).map_err(ClipboardError::Encode)
}

/// Parse clipboard text into shapes.
///
/// # Errors
///
/// Returns [`ClipboardError::Decode`] for anything other than a JSON array
/// of shape records.
pub fn decode(text: &str) -> Result<Vec<Shape>, ClipboardError> {
    serde_json::from_str(text).map_err(ClipboardError::Decode)
}

/// Turn decoded shapes into shapes ready to append to `scene`.
///
/// Each shape keeps its id unless it collides with an id already in the
/// scene or earlier in the same paste, in which case `next_id` is called
/// until a free id comes back. Every shape is translated by `offset` on
/// both axes and marked selected.
pub fn prepare_paste(
    parsed: Vec<Shape>,
    scene: &Scene,
    offset: f64,
    mut next_id: impl FnMut() -> ShapeId,
) -> Vec<Shape> {
    let mut taken: HashSet<ShapeId> = scene.shapes().iter().map(|s| s.id.clone()).collect();
    parsed
        .into_iter()
        .map(|shape| {
            let mut id = shape.id.clone();
            while taken.contains(&id) {
                id = next_id();
            }
            taken.insert(id.clone());
            Shape { id, ..shape.translated(offset, offset).with_selection(true) }
        })
        .collect()
}
