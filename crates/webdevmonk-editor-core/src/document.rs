//! In-memory editing surface.
//!
//! `MarkupDocument` stores serialized markup in a rope together with a char
//! selection, and implements the platform traits on top of it. The editor
//! logic runs against it exactly the way it runs against the browser DOM,
//! which is what the native tests drive.

use crate::actions::EditorCommand;
use crate::execute::apply_command;
use crate::markup::{inside_tag, scan_tags};
use crate::platform::{EditingSurface, PlatformError, SelectionPlatform};
use crate::text::{EditorRope, TextBuffer, changed_span};
use crate::types::Selection;

/// Markup buffer with a selection, usable as an `EditingSurface`.
#[derive(Clone)]
pub struct MarkupDocument {
    buffer: EditorRope,
    selection: Option<Selection>,
    focused: bool,
    html_insert: bool,
}

impl Default for MarkupDocument {
    fn default() -> Self {
        Self::from_markup("")
    }
}

impl MarkupDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::from_markup("")
    }

    pub fn from_markup(markup: &str) -> Self {
        Self {
            buffer: EditorRope::from_str(markup),
            selection: None,
            focused: false,
            html_insert: true,
        }
    }

    /// Make the document report no markup insertion support, so paste falls
    /// back to plain text.
    pub fn without_html_insert(mut self) -> Self {
        self.html_insert = false;
        self
    }

    /// Set the selection directly, as a user click or drag would.
    pub fn select(&mut self, selection: Selection) {
        self.selection = Some(selection);
    }

    /// Drop the selection, as moving focus outside the document would.
    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Remove focus without touching the stored selection.
    pub fn blur(&mut self) {
        self.focused = false;
    }

    fn validate(&self, selection: &Selection) -> Result<(), PlatformError> {
        let len = self.buffer.len_chars();
        if selection.end() > len {
            return Err(PlatformError(format!(
                "selection {}..{} out of bounds for document of length {}",
                selection.start(),
                selection.end(),
                len
            )));
        }

        let markup = self.buffer.to_string();
        let tags = scan_tags(&markup);
        for offset in [selection.anchor, selection.head] {
            if inside_tag(&tags, self.buffer.char_to_byte(offset)) {
                return Err(PlatformError(format!(
                    "offset {offset} falls inside a tag"
                )));
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for MarkupDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarkupDocument")
            .field("markup", &self.buffer.to_string())
            .field("selection", &self.selection)
            .field("focused", &self.focused)
            .finish()
    }
}

impl SelectionPlatform for MarkupDocument {
    type Range = Selection;

    fn current_range(&self) -> Option<Selection> {
        self.selection
    }

    fn apply_range(&mut self, range: &Selection) -> Result<(), PlatformError> {
        self.validate(range)?;
        self.selection = Some(*range);
        Ok(())
    }
}

impl EditingSurface for MarkupDocument {
    fn markup(&self) -> String {
        self.buffer.to_string()
    }

    fn set_markup(&mut self, markup: &str) {
        self.buffer = EditorRope::from_str(markup);
        self.selection = None;
    }

    fn is_empty(&self) -> bool {
        TextBuffer::is_empty(&self.buffer)
    }

    fn focus(&mut self) {
        self.focused = true;
    }

    fn supports_html_insert(&self) -> bool {
        self.html_insert
    }

    fn execute(&mut self, command: &EditorCommand) -> Result<(), PlatformError> {
        // With nothing selected, commands land at the end of the content,
        // the same place a browser puts the caret in a freshly focused region.
        let sel = self
            .selection
            .unwrap_or_else(|| Selection::collapsed(self.buffer.len_chars()));
        self.validate(&sel)?;

        let markup = self.buffer.to_string();
        let range = sel.to_range();
        let bytes = self.buffer.char_to_byte(range.start)..self.buffer.char_to_byte(range.end);
        let applied = apply_command(&markup, bytes, command);

        // Splice only the changed span into the rope.
        let (old_span, new_span) = changed_span(&markup, &applied.markup);
        let chars = self.buffer.byte_to_char(old_span.start)..self.buffer.byte_to_char(old_span.end);
        self.buffer.replace(chars, &applied.markup[new_span]);

        let start = self.buffer.byte_to_char(applied.selection.start);
        let end = self.buffer.byte_to_char(applied.selection.end);
        self.selection = Some(Selection::new(start, end));

        tracing::trace!(
            target: "webdevmonk::editor",
            ?command,
            selection = ?self.selection,
            "applied command to markup document"
        );
        Ok(())
    }
}
