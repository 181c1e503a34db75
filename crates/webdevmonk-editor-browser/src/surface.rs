//! `contenteditable` surface over the DOM.
//!
//! Commands go through `document.execCommand`, selections through the
//! window's `Selection`. The string names the browser expects only exist in
//! this module.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlDocument, HtmlElement, Range};
use webdevmonk_editor_core::{
    Alignment, EditingSurface, EditorCommand, InlineStyle, ListKind, PlatformError,
    SelectionPlatform,
};

/// Convert a thrown JS value into a platform error.
pub(crate) fn js_error(context: &str, err: JsValue) -> PlatformError {
    let detail = err
        .as_string()
        .or_else(|| {
            err.dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{err:?}"));
    PlatformError(format!("{context}: {detail}"))
}

/// `execCommand` name and value for a command.
pub fn exec_command_args(command: &EditorCommand) -> (&'static str, Option<String>) {
    match command {
        EditorCommand::ToggleInline(style) => (
            match style {
                InlineStyle::Bold => "bold",
                InlineStyle::Italic => "italic",
                InlineStyle::Underline => "underline",
            },
            None,
        ),
        EditorCommand::FormatBlock(format) => ("formatBlock", Some(format.tag().to_string())),
        EditorCommand::ToggleList(ListKind::Unordered) => ("insertUnorderedList", None),
        EditorCommand::ToggleList(ListKind::Ordered) => ("insertOrderedList", None),
        EditorCommand::Align(Alignment::Left) => ("justifyLeft", None),
        EditorCommand::Align(Alignment::Center) => ("justifyCenter", None),
        EditorCommand::Align(Alignment::Right) => ("justifyRight", None),
        EditorCommand::CreateLink { url } => ("createLink", Some(url.to_string())),
        EditorCommand::InsertImage { url } => ("insertImage", Some(url.clone())),
        EditorCommand::InsertHorizontalRule => ("insertHorizontalRule", None),
        EditorCommand::InsertHtml { html } => ("insertHTML", Some(html.clone())),
        EditorCommand::InsertText { text } => ("insertText", Some(text.clone())),
    }
}

/// An editable element and the document that owns it.
pub struct BrowserSurface {
    element: HtmlElement,
    document: HtmlDocument,
}

impl BrowserSurface {
    /// Wrap an element and make it editable.
    pub fn new(element: HtmlElement) -> Result<Self, PlatformError> {
        let document = element
            .owner_document()
            .ok_or_else(|| PlatformError::from("element has no owner document"))?
            .dyn_into::<HtmlDocument>()
            .map_err(|_| PlatformError::from("owner document is not an HTML document"))?;
        element.set_content_editable("true");
        Ok(Self { element, document })
    }

    /// Look the element up by id.
    pub fn from_id(id: &str) -> Result<Self, PlatformError> {
        let element = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id))
            .ok_or_else(|| PlatformError(format!("no element with id {id:?}")))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| PlatformError(format!("element {id:?} is not an HTML element")))?;
        Self::new(element)
    }

    pub fn element(&self) -> &HtmlElement {
        &self.element
    }

    fn selection(&self) -> Option<web_sys::Selection> {
        web_sys::window()?.get_selection().ok().flatten()
    }

    /// Whether both ends of `range` still sit inside the editable element.
    fn contains(&self, range: &Range) -> bool {
        let inside = |node: Result<web_sys::Node, JsValue>| {
            node.map(|n| n.is_connected() && self.element.contains(Some(&n)))
                .unwrap_or(false)
        };
        inside(range.start_container()) && inside(range.end_container())
    }
}

impl SelectionPlatform for BrowserSurface {
    type Range = Range;

    fn current_range(&self) -> Option<Range> {
        let selection = self.selection()?;
        if selection.range_count() == 0 {
            return None;
        }
        let range = selection.get_range_at(0).ok()?;
        // Selections elsewhere on the page are not ours to keep.
        self.contains(&range).then(|| range.clone_range())
    }

    fn apply_range(&mut self, range: &Range) -> Result<(), PlatformError> {
        if !self.contains(range) {
            return Err(PlatformError::from(
                "range no longer lies inside the editor",
            ));
        }
        let selection = self
            .selection()
            .ok_or_else(|| PlatformError::from("window has no selection"))?;
        selection
            .remove_all_ranges()
            .map_err(|e| js_error("removeAllRanges", e))?;
        selection
            .add_range(range)
            .map_err(|e| js_error("addRange", e))
    }
}

impl EditingSurface for BrowserSurface {
    fn markup(&self) -> String {
        self.element.inner_html()
    }

    fn set_markup(&mut self, markup: &str) {
        self.element.set_inner_html(markup);
    }

    fn focus(&mut self) {
        if let Err(e) = self.element.focus() {
            tracing::debug!(target: "webdevmonk::browser", error = ?e, "focus failed");
        }
    }

    fn supports_html_insert(&self) -> bool {
        self.document
            .query_command_supported("insertHTML")
    }

    fn execute(&mut self, command: &EditorCommand) -> Result<(), PlatformError> {
        let (name, value) = exec_command_args(command);
        let handled = self
            .document
            .exec_command_with_show_ui_and_value(name, false, value.as_deref().unwrap_or(""))
            .map_err(|e| js_error(name, e))?;
        if handled {
            Ok(())
        } else {
            Err(PlatformError(format!("execCommand({name}) was not handled")))
        }
    }
}
