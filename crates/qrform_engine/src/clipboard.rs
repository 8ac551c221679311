//! Clipboard access behind a trait so effect execution can be tested without
//! touching the desktop clipboard.

use std::sync::{Arc, Mutex};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("clipboard write failed: {0}")]
    Write(String),
}

pub trait ClipboardProvider {
    /// Replaces the clipboard contents with plain text.
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Desktop clipboard via `arboard`.
///
/// The handle is opened on first use and must outlive the copy: on X11 the
/// copied text disappears when its owner is dropped.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardProvider for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard = match self.inner.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new()
                .map_err(|err| ClipboardError::Unavailable(err.to_string()))?,
        };
        let result = clipboard
            .set_text(text.to_owned())
            .map_err(|err| ClipboardError::Write(err.to_string()));
        self.inner = Some(clipboard);
        result
    }
}

/// In-memory clipboard. Clones share the same contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Arc<Mutex<Option<String>>>,
    fail: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard that rejects every write.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.lock().ok().and_then(|guard| guard.clone())
    }
}

impl ClipboardProvider for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.fail {
            return Err(ClipboardError::Write("rejected".to_string()));
        }
        let mut guard = self
            .contents
            .lock()
            .map_err(|err| ClipboardError::Write(err.to_string()))?;
        *guard = Some(text.to_owned());
        Ok(())
    }
}
