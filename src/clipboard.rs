//! In-memory shared clipboard.
//!
//! Stands in for the host platform clipboard: writes are fire-and-forget,
//! reads are asynchronous. Clones share the same contents.

#[cfg(test)]
#[path = "clipboard_test.rs"]
mod clipboard_test;

use std::sync::Arc;

use tokio::sync::Mutex;

#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    text: Arc<Mutex<Option<String>>>,
}

impl MemoryClipboard {
    /// A clipboard that already holds `text`.
    #[must_use]
    pub fn with_text(text: impl Into<String>) -> Self {
        Self { text: Arc::new(Mutex::new(Some(text.into()))) }
    }

    pub async fn write(&self, text: String) {
        *self.text.lock().await = Some(text);
    }

    /// Current text. An empty clipboard reads as an empty string.
    pub async fn read(&self) -> String {
        self.text.lock().await.clone().unwrap_or_default()
    }

    pub async fn contents(&self) -> Option<String> {
        self.text.lock().await.clone()
    }
}
