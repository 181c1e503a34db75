//! Wiring between DOM events and a `RichTextEditor`.
//!
//! `EditorHandle` owns the editor and every listener it registers. Listeners
//! hold weak references, so dropping the handle tears the whole thing down
//! and any upload still in flight is discarded when it resolves.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{ClipboardEvent, Element};
use webdevmonk_editor_core::{
    EditorConfig, EditorStatus, HttpUploader, PlatformError, RichTextEditor, ToolbarAction,
    insert_image,
};

use crate::clipboard::BrowserClipboard;
use crate::picker::BrowserFilePicker;
use crate::prompt::BrowserPrompt;
use crate::surface::BrowserSurface;
use crate::toolbar::ToolbarDom;

pub type BrowserEditor = RichTextEditor<BrowserSurface>;

/// Events after which the DOM selection is saved.
pub const CAPTURE_EVENTS: [&str; 4] = ["blur", "focus", "keyup", "mouseup"];

/// Run `f` against the editor if it is alive and not already borrowed.
///
/// `execCommand` and `focus()` dispatch `input`/`focus` synchronously while a
/// command holds the editor; those re-entrant events are skipped.
fn with_editor<R>(
    editor: &Weak<RefCell<BrowserEditor>>,
    f: impl FnOnce(&mut BrowserEditor) -> R,
) -> Option<R> {
    let editor = editor.upgrade()?;
    let Ok(mut editor) = editor.try_borrow_mut() else {
        tracing::trace!(target: "webdevmonk::browser", "re-entrant event skipped");
        return None;
    };
    Some(f(&mut editor))
}

/// Start the image pipeline in the background.
fn spawn_image_insert(editor: Weak<RefCell<BrowserEditor>>, uploader: HttpUploader) {
    wasm_bindgen_futures::spawn_local(async move {
        let inserted = insert_image(editor, &BrowserFilePicker::default(), &uploader).await;
        tracing::debug!(target: "webdevmonk::browser", inserted, "image insertion finished");
    });
}

/// Dispatch a toolbar button. Image returns `true` once the picker has been
/// started; everything else reports whether the command was applied.
fn dispatch(
    editor: &Weak<RefCell<BrowserEditor>>,
    uploader: &HttpUploader,
    action: ToolbarAction,
) -> bool {
    match action {
        ToolbarAction::Image => {
            let ready = with_editor(editor, |ed| ed.is_mounted() && ed.image_button_enabled())
                .unwrap_or(false);
            if ready {
                spawn_image_insert(editor.clone(), uploader.clone());
            }
            ready
        }
        ToolbarAction::Link => {
            with_editor(editor, |ed| ed.insert_link(&BrowserPrompt)).unwrap_or(false)
        }
        action => with_editor(editor, |ed| ed.apply_toolbar(action)).unwrap_or(false),
    }
}

/// A mounted editor bound to a `contenteditable` element.
pub struct EditorHandle {
    editor: Rc<RefCell<BrowserEditor>>,
    uploader: HttpUploader,
    listeners: Vec<EventListener>,
}

impl EditorHandle {
    /// Make `surface` editable, apply `initial` and start listening.
    pub fn mount(
        surface: BrowserSurface,
        initial: &str,
        config: EditorConfig,
        token: Option<String>,
    ) -> Self {
        let element = surface.element().clone();
        let mut editor = RichTextEditor::new(surface, config);
        editor.set_token(token);
        editor.mount(initial);
        let editor = Rc::new(RefCell::new(editor));

        let mut listeners = Vec::with_capacity(CAPTURE_EVENTS.len() + 2);
        for event in CAPTURE_EVENTS {
            let weak = Rc::downgrade(&editor);
            listeners.push(EventListener::new(&element, event, move |_| {
                with_editor(&weak, |ed| ed.capture_selection());
            }));
        }

        let weak = Rc::downgrade(&editor);
        listeners.push(EventListener::new(&element, "input", move |_| {
            with_editor(&weak, |ed| ed.handle_input());
        }));

        let weak = Rc::downgrade(&editor);
        listeners.push(EventListener::new_with_options(
            &element,
            "paste",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                event.prevent_default();
                let clipboard = event
                    .dyn_ref::<ClipboardEvent>()
                    .map(BrowserClipboard::from_event)
                    .unwrap_or_else(BrowserClipboard::empty);
                with_editor(&weak, |ed| ed.handle_paste(&clipboard));
            },
        ));

        tracing::info!(target: "webdevmonk::browser", "editor attached");
        Self {
            editor,
            uploader: HttpUploader::new(),
            listeners,
        }
    }

    /// Mount on the element with the given id, reading config from the build
    /// environment.
    pub fn mount_by_id(
        id: &str,
        initial: &str,
        token: Option<String>,
    ) -> Result<Self, PlatformError> {
        let surface = BrowserSurface::from_id(id)?;
        Ok(Self::mount(surface, initial, EditorConfig::from_env(), token))
    }

    pub fn with_uploader(mut self, uploader: HttpUploader) -> Self {
        self.uploader = uploader;
        self
    }

    /// Build the toolbar and error banner into `container` and bind them.
    pub fn attach_toolbar(&mut self, container: &Element) -> Result<ToolbarDom, PlatformError> {
        let document = container
            .owner_document()
            .ok_or_else(|| PlatformError::from("container has no owner document"))?;
        let toolbar = ToolbarDom::build(&document)?;
        container
            .append_child(&toolbar.banner)
            .map_err(|e| crate::surface::js_error("appendChild", e))?;
        container
            .append_child(&toolbar.root)
            .map_err(|e| crate::surface::js_error("appendChild", e))?;

        for (action, button) in &toolbar.buttons {
            let action = *action;
            let weak = Rc::downgrade(&self.editor);
            let uploader = self.uploader.clone();
            self.listeners
                .push(EventListener::new(button, "click", move |_| {
                    dispatch(&weak, &uploader, action);
                }));
        }

        let weak = Rc::downgrade(&self.editor);
        self.listeners
            .push(EventListener::new(&toolbar.dismiss, "click", move |_| {
                with_editor(&weak, |ed| ed.dismiss_error());
            }));

        let view = toolbar.clone();
        let mut editor = self.editor.borrow_mut();
        view.render_status(&editor.status());
        editor.on_status(move |status| view.render_status(status));
        Ok(toolbar)
    }

    /// Run a toolbar action as if its button had been clicked.
    pub fn apply_toolbar(&self, action: ToolbarAction) -> bool {
        dispatch(&Rc::downgrade(&self.editor), &self.uploader, action)
    }

    pub fn insert_link(&self) -> bool {
        self.apply_toolbar(ToolbarAction::Link)
    }

    pub fn insert_image(&self) -> bool {
        self.apply_toolbar(ToolbarAction::Image)
    }

    pub fn sync_initial_value(&self, value: &str) {
        self.editor.borrow_mut().sync_initial_value(value);
    }

    pub fn set_token(&self, token: Option<String>) {
        self.editor.borrow_mut().set_token(token);
    }

    pub fn dismiss_error(&self) {
        self.editor.borrow_mut().dismiss_error();
    }

    /// Register the change callback. It must not call back into the handle.
    pub fn on_change(&self, callback: impl FnMut(&str) + 'static) {
        self.editor.borrow_mut().on_change(callback);
    }

    pub fn on_status(&self, callback: impl FnMut(&EditorStatus) + 'static) {
        self.editor.borrow_mut().on_status(callback);
    }

    pub fn markup(&self) -> String {
        self.editor.borrow().markup()
    }

    pub fn status(&self) -> EditorStatus {
        self.editor.borrow().status()
    }

    pub fn editor(&self) -> &Rc<RefCell<BrowserEditor>> {
        &self.editor
    }
}

impl Drop for EditorHandle {
    fn drop(&mut self) {
        self.listeners.clear();
        match self.editor.try_borrow_mut() {
            Ok(mut editor) => editor.unmount(),
            Err(_) => {
                tracing::warn!(target: "webdevmonk::browser", "editor borrowed during drop")
            }
        }
    }
}
