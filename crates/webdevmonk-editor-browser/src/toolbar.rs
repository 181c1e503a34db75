//! Toolbar and error banner DOM.
//!
//! Plain buttons, one per `ToolbarAction`, plus a hidden banner that shows
//! the upload error with a dismiss button. Styling is left to the host page
//! via the class names below.

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlButtonElement, HtmlElement};
use webdevmonk_editor_core::{EditorStatus, PlatformError, ToolbarAction, UploadState};

use crate::surface::js_error;

pub const TOOLBAR_CLASS: &str = "webdevmonk-toolbar";
pub const BUTTON_CLASS: &str = "webdevmonk-toolbar-button";
pub const ERROR_CLASS: &str = "webdevmonk-editor-error";
/// Set on the image button while an upload is running.
pub const LOADING_CLASS: &str = "is-loading";

/// Short label and `data-action` value for a button.
pub fn button_label(action: ToolbarAction) -> (&'static str, &'static str) {
    match action {
        ToolbarAction::Bold => ("B", "bold"),
        ToolbarAction::Italic => ("I", "italic"),
        ToolbarAction::Underline => ("U", "underline"),
        ToolbarAction::Heading1 => ("H1", "heading-1"),
        ToolbarAction::Heading2 => ("H2", "heading-2"),
        ToolbarAction::Heading3 => ("H3", "heading-3"),
        ToolbarAction::Paragraph => ("P", "paragraph"),
        ToolbarAction::BulletList => ("•", "bullet-list"),
        ToolbarAction::NumberedList => ("1.", "numbered-list"),
        ToolbarAction::AlignLeft => ("⇤", "align-left"),
        ToolbarAction::AlignCenter => ("↔", "align-center"),
        ToolbarAction::AlignRight => ("⇥", "align-right"),
        ToolbarAction::Image => ("Img", "image"),
        ToolbarAction::Link => ("Link", "link"),
        ToolbarAction::CodeBlock => ("</>", "code-block"),
        ToolbarAction::HorizontalRule => ("―", "horizontal-rule"),
    }
}

/// Built toolbar elements.
#[derive(Clone)]
pub struct ToolbarDom {
    pub root: HtmlElement,
    pub buttons: Vec<(ToolbarAction, HtmlButtonElement)>,
    pub banner: HtmlElement,
    pub message: HtmlElement,
    pub dismiss: HtmlButtonElement,
}

fn create<T: JsCast>(document: &Document, tag: &str) -> Result<T, PlatformError> {
    document
        .create_element(tag)
        .map_err(|e| js_error("createElement", e))?
        .dyn_into::<T>()
        .map_err(|_| PlatformError(format!("<{tag}> has an unexpected type")))
}

fn button(document: &Document, label: &str) -> Result<HtmlButtonElement, PlatformError> {
    let button: HtmlButtonElement = create(document, "button")?;
    button.set_type("button");
    button.set_text_content(Some(label));
    Ok(button)
}

impl ToolbarDom {
    pub fn build(document: &Document) -> Result<Self, PlatformError> {
        let root: HtmlElement = create(document, "div")?;
        root.set_class_name(TOOLBAR_CLASS);

        let mut buttons = Vec::with_capacity(ToolbarAction::ALL.len());
        for action in ToolbarAction::ALL {
            let (label, slug) = button_label(action);
            let b = button(document, label)?;
            b.set_class_name(BUTTON_CLASS);
            b.set_title(action.title());
            b.set_attribute("data-action", slug)
                .map_err(|e| js_error("setAttribute", e))?;
            root.append_child(&b)
                .map_err(|e| js_error("appendChild", e))?;
            buttons.push((action, b));
        }

        let banner: HtmlElement = create(document, "div")?;
        banner.set_class_name(ERROR_CLASS);
        banner.set_hidden(true);
        let message: HtmlElement = create(document, "span")?;
        let dismiss = button(document, "Dismiss")?;
        banner
            .append_child(&message)
            .map_err(|e| js_error("appendChild", e))?;
        banner
            .append_child(&dismiss)
            .map_err(|e| js_error("appendChild", e))?;

        Ok(Self {
            root,
            buttons,
            banner,
            message,
            dismiss,
        })
    }

    pub fn image_button(&self) -> Option<&HtmlButtonElement> {
        self.buttons
            .iter()
            .find(|(action, _)| *action == ToolbarAction::Image)
            .map(|(_, b)| b)
    }

    /// Reflect editor status: image button state and error banner.
    pub fn render_status(&self, status: &EditorStatus) {
        if let Some(image) = self.image_button() {
            image.set_disabled(!status.image_button_enabled);
            let loading = status.upload_state == UploadState::Uploading;
            if let Err(e) = image.class_list().toggle_with_force(LOADING_CLASS, loading) {
                tracing::debug!(target: "webdevmonk::browser", error = ?e, "class toggle failed");
            }
        }
        match &status.error {
            Some(message) => {
                self.message.set_text_content(Some(message));
                self.banner.set_hidden(false);
            }
            None => {
                self.message.set_text_content(None);
                self.banner.set_hidden(true);
            }
        }
    }
}
