//! Input script: the host's stand-in for a browser event stream.
//!
//! One JSON object per line, tagged by `"type"`. Blank lines and lines
//! starting with `#` are skipped.
//!
//! ```text
//! # drag the first shape to the right
//! {"type":"pointer_down","x":60,"y":60}
//! {"type":"pointer_move","x":90,"y":60}
//! {"type":"pointer_up","x":90,"y":60}
//! {"type":"key_down","key":"z","modifiers":{"meta":true}}
//! ```

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

use canvas::input::{Button, Command, Modifiers};
use serde::Deserialize;
use tokio::io::AsyncReadExt;

use crate::error::HostError;

/// One scripted input event. Coordinates are canvas-relative screen pixels.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptEvent {
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default)]
        button: Button,
        #[serde(default)]
        modifiers: Modifiers,
    },
    PointerMove {
        x: f64,
        y: f64,
        #[serde(default)]
        modifiers: Modifiers,
    },
    PointerUp {
        x: f64,
        y: f64,
        #[serde(default)]
        button: Button,
        #[serde(default)]
        modifiers: Modifiers,
    },
    DoubleClick {
        x: f64,
        y: f64,
    },
    KeyDown {
        key: String,
        #[serde(default)]
        modifiers: Modifiers,
    },
    /// A command-panel button press.
    Command {
        name: Command,
    },
    Viewport {
        width: f64,
        height: f64,
    },
}

/// Parse a whole script.
///
/// # Errors
///
/// Returns [`HostError::Parse`] with the 1-based line number of the first
/// line that is not a valid event.
pub fn parse_script(text: &str) -> Result<Vec<ScriptEvent>, HostError> {
    let mut events = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let event = serde_json::from_str(trimmed).map_err(|source| HostError::Parse { line: index + 1, source })?;
        events.push(event);
    }
    Ok(events)
}

/// Read script text from a file, or from stdin when `path` is `-`.
///
/// # Errors
///
/// Returns [`HostError::ReadScript`] if the source cannot be read.
pub async fn read_script(path: &str) -> Result<String, HostError> {
    let read_error = |source| HostError::ReadScript { path: path.to_owned(), source };
    if path == "-" {
        let mut text = String::new();
        tokio::io::stdin().read_to_string(&mut text).await.map_err(read_error)?;
        Ok(text)
    } else {
        tokio::fs::read_to_string(path).await.map_err(read_error)
    }
}
