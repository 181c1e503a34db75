//! Platform abstraction traits for editor operations.
//!
//! These traits define the interface between the editor logic and platform-specific
//! implementations (browser DOM, the in-memory markup document, ...). This keeps
//! the dispatcher and the image pipeline testable without a rendering surface.

use std::future::Future;

use crate::actions::EditorCommand;
use crate::types::PickedFile;

/// Error type for platform operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformError(pub String);

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for PlatformError {}

impl From<&str> for PlatformError {
    fn from(s: &str) -> Self {
        PlatformError(s.to_string())
    }
}

impl From<String> for PlatformError {
    fn from(s: String) -> Self {
        PlatformError(s)
    }
}

/// Reading and applying the platform's active selection.
///
/// The browser implementation wraps the DOM Selection API and stores live
/// `Range` objects; the in-memory document stores char offsets.
pub trait SelectionPlatform {
    /// Saved form of a selection.
    type Range: Clone + std::fmt::Debug;

    /// Read the active selection, if there is one.
    fn current_range(&self) -> Option<Self::Range>;

    /// Make `range` the active selection.
    ///
    /// Fails when the range no longer fits the document.
    fn apply_range(&mut self, range: &Self::Range) -> Result<(), PlatformError>;
}

/// A directly-editable content region.
pub trait EditingSurface: SelectionPlatform {
    /// Full markup serialization of the current content.
    fn markup(&self) -> String;

    /// Replace the whole content.
    fn set_markup(&mut self, markup: &str);

    /// Whether the region has no content at all.
    fn is_empty(&self) -> bool {
        self.markup().is_empty()
    }

    /// Give keyboard focus back to the region.
    fn focus(&mut self);

    /// Whether markup fragments can be inserted directly.
    ///
    /// When false, paste falls back to inserting text.
    fn supports_html_insert(&self) -> bool {
        true
    }

    /// Apply one command at the active selection.
    fn execute(&mut self, command: &EditorCommand) -> Result<(), PlatformError>;
}

/// Clipboard contents of a paste event.
pub trait PasteSource {
    /// Read the data stored under `mime` (`text/html`, `text/plain`).
    fn read(&self, mime: &str) -> Option<String>;
}

/// Blocking single-line input dialog.
pub trait UrlPrompt {
    /// Ask the user for a value. `None` when cancelled.
    fn prompt(&self, message: &str) -> Option<String>;
}

/// Native file selection dialog restricted to images.
pub trait FilePicker {
    /// Open the dialog and wait for a choice. `None` when cancelled.
    fn pick_image(&self) -> impl Future<Output = Option<PickedFile>>;
}

impl<F> UrlPrompt for F
where
    F: Fn(&str) -> Option<String>,
{
    fn prompt(&self, message: &str) -> Option<String> {
        self(message)
    }
}
