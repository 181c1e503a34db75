//! Paste event clipboard access.

use webdevmonk_editor_core::PasteSource;

/// Clipboard contents of a paste event, read through its `DataTransfer`.
pub struct BrowserClipboard {
    data_transfer: Option<web_sys::DataTransfer>,
}

impl BrowserClipboard {
    /// Call this in the paste handler, before the event is dispatched further.
    pub fn from_event(evt: &web_sys::ClipboardEvent) -> Self {
        Self {
            data_transfer: evt.clipboard_data(),
        }
    }

    /// A clipboard with nothing in it.
    pub fn empty() -> Self {
        Self {
            data_transfer: None,
        }
    }
}

impl PasteSource for BrowserClipboard {
    fn read(&self, mime: &str) -> Option<String> {
        let dt = self.data_transfer.as_ref()?;
        match dt.get_data(mime) {
            Ok(data) => Some(data).filter(|s| !s.is_empty()),
            Err(e) => {
                tracing::debug!(target: "webdevmonk::browser", mime, error = ?e, "clipboard read failed");
                None
            }
        }
    }
}
