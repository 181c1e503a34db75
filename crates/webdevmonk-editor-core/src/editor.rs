//! The rich-text editor: selection preservation, command dispatch, paste
//! handling and the image insertion state machine.
//!
//! `RichTextEditor` owns an `EditingSurface` and mediates every programmatic
//! mutation of it. Commands run as restore selection, mutate, notify, refocus.
//! If the selection can't be restored the command is dropped without touching
//! the content.
//!
//! Image insertion is split into three synchronous phases so that no borrow
//! of the editor is held across the file dialog or the network request:
//!
//! 1. [`RichTextEditor::begin_image_insert`] hands out a ticket.
//! 2. [`RichTextEditor::file_selected`] turns the picked file into an upload request.
//! 3. [`RichTextEditor::finish_image_insert`] applies the upload result.
//!
//! [`crate::pipeline::insert_image`] drives them with the awaits in between.
//! Tickets carry the mount epoch, so results that arrive after
//! [`RichTextEditor::unmount`] are dropped. Only the latest ticket is live:
//! clicking the image button again while the picker is open replaces the
//! earlier ticket, since some browsers never report a dismissed dialog.

use crate::actions::{
    Alignment, BlockFormat, EditorCommand, InlineStyle, ListKind, ToolbarAction,
};
use crate::config::EditorConfig;
use crate::paste::PastePayload;
use crate::platform::{EditingSurface, PasteSource, SelectionPlatform, UrlPrompt};
use crate::selection::{SelectionService, SelectionTracker};
use crate::types::{PickedFile, UploadedImage};
use crate::upload::{UploadError, UploadRequest};
use web_time::Instant;

/// Inline message shown when an image upload fails.
pub const UPLOAD_FAILED_MESSAGE: &str = "Failed to upload image. Please try again.";

/// Prompt text for the link action.
pub const LINK_PROMPT: &str = "Enter the URL:";

/// Called with the full markup after every mutation.
pub type ChangeCallback = Box<dyn FnMut(&str)>;

/// Called when the upload state or the error message changes.
pub type StatusCallback = Box<dyn FnMut(&EditorStatus)>;

/// Where the image pipeline is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadState {
    #[default]
    Idle,
    PickerOpen,
    Uploading,
}

/// Snapshot of what the toolbar and error banner should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorStatus {
    pub upload_state: UploadState,
    pub error: Option<String>,
    pub image_button_enabled: bool,
}

/// Proof that an image insertion was started on a particular mount.
#[derive(Debug, Clone)]
pub struct ImageInsertTicket<R> {
    epoch: u64,
    attempt: u64,
    version: u64,
    range: Option<R>,
}

impl<R> ImageInsertTicket<R> {
    /// The selection captured when the insertion was triggered.
    pub fn range(&self) -> Option<&R> {
        self.range.as_ref()
    }
}

pub struct RichTextEditor<S, T = SelectionTracker<<S as SelectionPlatform>::Range>>
where
    S: EditingSurface,
    T: SelectionService<S>,
{
    surface: S,
    selection: T,
    config: EditorConfig,
    token: Option<String>,
    on_change: Option<ChangeCallback>,
    on_status: Option<StatusCallback>,
    upload_state: UploadState,
    error: Option<String>,
    mounted: bool,
    epoch: u64,
    attempt: u64,
    version: u64,
    upload_started: Option<Instant>,
}

impl<S: EditingSurface> RichTextEditor<S> {
    /// Editor with the default selection tracker.
    pub fn new(surface: S, config: EditorConfig) -> Self {
        Self::with_selection_service(surface, SelectionTracker::new(), config)
    }
}

impl<S, T> RichTextEditor<S, T>
where
    S: EditingSurface,
    T: SelectionService<S>,
{
    pub fn with_selection_service(surface: S, selection: T, config: EditorConfig) -> Self {
        Self {
            surface,
            selection,
            config,
            token: None,
            on_change: None,
            on_status: None,
            upload_state: UploadState::Idle,
            error: None,
            mounted: false,
            epoch: 0,
            attempt: 0,
            version: 0,
            upload_started: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.set_token(Some(token.into()));
        self
    }

    /// Replace the upload credential. `None` or empty disables uploads.
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token.filter(|t| !t.is_empty());
        self.emit_status();
    }

    pub fn on_change(&mut self, callback: impl FnMut(&str) + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    pub fn on_status(&mut self, callback: impl FnMut(&EditorStatus) + 'static) {
        self.on_status = Some(Box::new(callback));
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Current full markup.
    pub fn markup(&self) -> String {
        self.surface.markup()
    }

    /// Number of mutations so far.
    pub fn version(&self) -> u64 {
        self.version
    }

    // === Lifecycle ===

    /// Attach to the surface and apply the initial value.
    pub fn mount(&mut self, initial: &str) {
        self.mounted = true;
        tracing::debug!(target: "webdevmonk::editor", epoch = self.epoch, "editor mounted");
        self.sync_initial_value(initial);
    }

    /// Offer a (possibly new) initial value from the owner.
    ///
    /// Only takes effect while the surface is empty, so a value pushed after
    /// the content was set is ignored. Does not notify.
    pub fn sync_initial_value(&mut self, value: &str) {
        if self.surface.is_empty() && !value.is_empty() {
            self.surface.set_markup(value);
        }
    }

    /// Detach. Pending image insertions from this mount are dropped when they
    /// complete.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.epoch += 1;
        self.upload_state = UploadState::Idle;
        tracing::debug!(target: "webdevmonk::editor", epoch = self.epoch, "editor unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    // === Selection ===

    /// Save the surface's current selection. Call on blur, keyup and mouseup.
    pub fn capture_selection(&mut self) {
        self.selection.capture(&self.surface);
    }

    pub fn restore_selection(&mut self) -> bool {
        self.selection.restore(&mut self.surface)
    }

    pub fn has_captured_selection(&self) -> bool {
        self.selection.has_capture()
    }

    // === Commands ===

    /// Restore the selection, apply `command`, notify, refocus.
    ///
    /// Returns whether the content was mutated.
    pub fn execute(&mut self, command: &EditorCommand) -> bool {
        if !self.mounted {
            tracing::debug!(target: "webdevmonk::editor", ?command, "editor not mounted, command dropped");
            return false;
        }
        if !self.restore_selection() {
            tracing::debug!(target: "webdevmonk::editor", ?command, "no selection to restore, command dropped");
            return false;
        }
        if !self.apply(command) {
            return false;
        }
        self.surface.focus();
        true
    }

    /// Run the command bound to a toolbar button.
    ///
    /// Link and image buttons need more input, see [`Self::insert_link`] and
    /// [`crate::pipeline::insert_image`].
    pub fn apply_toolbar(&mut self, action: ToolbarAction) -> bool {
        match action.command() {
            Some(command) => self.execute(&command),
            None => {
                tracing::debug!(target: "webdevmonk::editor", ?action, "toolbar action needs extra input");
                false
            }
        }
    }

    pub fn toggle_inline(&mut self, style: InlineStyle) -> bool {
        self.execute(&EditorCommand::ToggleInline(style))
    }

    /// Turn the current block into a heading. Levels outside 1-3 are ignored.
    pub fn set_heading(&mut self, level: u8) -> bool {
        match BlockFormat::heading(level) {
            Some(format) => self.set_block(format),
            None => {
                tracing::debug!(target: "webdevmonk::editor", level, "unsupported heading level");
                false
            }
        }
    }

    pub fn set_block(&mut self, format: BlockFormat) -> bool {
        self.execute(&EditorCommand::FormatBlock(format))
    }

    pub fn toggle_list(&mut self, kind: ListKind) -> bool {
        self.execute(&EditorCommand::ToggleList(kind))
    }

    pub fn align(&mut self, alignment: Alignment) -> bool {
        self.execute(&EditorCommand::Align(alignment))
    }

    pub fn insert_horizontal_rule(&mut self) -> bool {
        self.execute(&EditorCommand::InsertHorizontalRule)
    }

    /// Ask for a URL and link the selection to it. Cancel or blank is a no-op.
    pub fn insert_link(&mut self, prompt: &impl UrlPrompt) -> bool {
        let Some(url) = prompt.prompt(LINK_PROMPT) else {
            return false;
        };
        let url = url.trim();
        if url.is_empty() {
            return false;
        }
        self.execute(&EditorCommand::CreateLink { url: url.into() })
    }

    // === Surface events ===

    /// The user edited the surface directly.
    pub fn handle_input(&mut self) {
        self.notify_change();
    }

    /// Insert clipboard content at the caret in place of the native paste.
    ///
    /// The caller must suppress the platform's default paste.
    pub fn handle_paste(&mut self, source: &impl PasteSource) -> bool {
        if !self.mounted {
            return false;
        }
        let Some(payload) = PastePayload::from_source(source) else {
            tracing::debug!(target: "webdevmonk::editor", "clipboard had nothing to paste");
            return false;
        };
        let command = payload.into_command(self.surface.supports_html_insert());
        self.apply(&command)
    }

    /// Apply at the surface's live selection and notify on success.
    fn apply(&mut self, command: &EditorCommand) -> bool {
        match self.surface.execute(command) {
            Ok(()) => {
                self.notify_change();
                true
            }
            Err(e) => {
                tracing::warn!(target: "webdevmonk::editor", ?command, error = %e, "surface rejected command");
                false
            }
        }
    }

    fn notify_change(&mut self) {
        self.version += 1;
        let markup = self.surface.markup();
        tracing::trace!(target: "webdevmonk::editor", version = self.version, len = markup.len(), "content changed");
        if let Some(callback) = self.on_change.as_mut() {
            callback(&markup);
        }
    }

    // === Status ===

    pub fn upload_state(&self) -> UploadState {
        self.upload_state
    }

    pub fn is_uploading(&self) -> bool {
        self.upload_state == UploadState::Uploading
    }

    /// Inline error message, if one is showing.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        if self.error.take().is_some() {
            self.emit_status();
        }
    }

    /// Whether the image button should accept clicks. It stays enabled
    /// while the picker is open so an abandoned dialog can be reopened.
    pub fn image_button_enabled(&self) -> bool {
        self.mounted && self.token.is_some() && self.upload_state != UploadState::Uploading
    }

    pub fn status(&self) -> EditorStatus {
        EditorStatus {
            upload_state: self.upload_state,
            error: self.error.clone(),
            image_button_enabled: self.image_button_enabled(),
        }
    }

    fn set_upload_state(&mut self, state: UploadState) {
        if self.upload_state != state {
            self.upload_state = state;
            self.emit_status();
        }
    }

    fn emit_status(&mut self) {
        let status = self.status();
        if let Some(callback) = self.on_status.as_mut() {
            callback(&status);
        }
    }

    // === Image pipeline ===

    /// Start an image insertion. `None` while the button is disabled.
    ///
    /// Called while the picker is still open, the new ticket supersedes the
    /// old one and the old picker's result is ignored.
    pub fn begin_image_insert(&mut self) -> Option<ImageInsertTicket<S::Range>> {
        if !self.image_button_enabled() {
            tracing::debug!(
                target: "webdevmonk::editor",
                state = ?self.upload_state,
                "image insertion not available"
            );
            return None;
        }
        if self.upload_state == UploadState::PickerOpen {
            tracing::debug!(
                target: "webdevmonk::editor",
                attempt = self.attempt,
                "replacing ticket of an abandoned picker"
            );
        }
        self.attempt += 1;
        let ticket = ImageInsertTicket {
            epoch: self.epoch,
            attempt: self.attempt,
            version: self.version,
            range: self.selection.captured().cloned(),
        };
        self.set_upload_state(UploadState::PickerOpen);
        Some(ticket)
    }

    /// The picker closed. Returns the request to send, or `None` when the
    /// dialog was cancelled or the ticket is stale.
    pub fn file_selected(
        &mut self,
        ticket: &ImageInsertTicket<S::Range>,
        file: Option<PickedFile>,
    ) -> Option<UploadRequest> {
        if !self.owns(ticket) {
            return None;
        }
        let Some(file) = file else {
            tracing::debug!(target: "webdevmonk::editor", "image picker cancelled");
            self.set_upload_state(UploadState::Idle);
            return None;
        };
        let Some(token) = self.token.clone() else {
            self.fail_upload(UploadError::Unauthorized);
            return None;
        };

        self.upload_started = Some(Instant::now());
        self.set_upload_state(UploadState::Uploading);
        Some(UploadRequest {
            file,
            token,
            endpoint: self.config.upload_endpoint(),
        })
    }

    /// Apply the upload result. Returns whether an image was inserted.
    pub fn finish_image_insert(
        &mut self,
        ticket: ImageInsertTicket<S::Range>,
        result: Result<UploadedImage, UploadError>,
    ) -> bool {
        if !self.owns(&ticket) {
            return false;
        }
        if let Some(started) = self.upload_started.take() {
            tracing::debug!(
                target: "webdevmonk::upload",
                elapsed_ms = started.elapsed().as_millis() as u64,
                ok = result.is_ok(),
                "upload finished"
            );
        }

        let uploaded = match result {
            Ok(uploaded) => uploaded,
            Err(e) => {
                self.fail_upload(e);
                return false;
            }
        };
        self.set_upload_state(UploadState::Idle);

        if !self.restore_for(&ticket) {
            tracing::debug!(target: "webdevmonk::editor", "no selection to insert image at");
            return false;
        }
        let url = self.config.image_url(&uploaded.reference);
        self.apply(&EditorCommand::InsertImage { url })
    }

    /// Whether `ticket` is the latest one issued by the current mount.
    fn owns(&self, ticket: &ImageInsertTicket<S::Range>) -> bool {
        if !self.mounted || ticket.epoch != self.epoch {
            tracing::debug!(
                target: "webdevmonk::editor",
                ticket_epoch = ticket.epoch,
                epoch = self.epoch,
                "dropping image result for a previous mount"
            );
            return false;
        }
        if ticket.attempt != self.attempt {
            tracing::debug!(
                target: "webdevmonk::editor",
                ticket_attempt = ticket.attempt,
                attempt = self.attempt,
                "dropping result of a superseded picker"
            );
            return false;
        }
        true
    }

    /// Put back the selection the ticket was issued with, unless the content
    /// has changed since. Then the latest capture wins.
    fn restore_for(&mut self, ticket: &ImageInsertTicket<S::Range>) -> bool {
        if ticket.version == self.version {
            if let Some(range) = &ticket.range {
                if self.surface.apply_range(range).is_ok() {
                    return true;
                }
            }
        }
        self.restore_selection()
    }

    fn fail_upload(&mut self, error: UploadError) {
        tracing::warn!(target: "webdevmonk::upload", error = %error, "image upload failed");
        self.upload_state = UploadState::Idle;
        self.error = Some(UPLOAD_FAILED_MESSAGE.to_string());
        self.emit_status();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::MarkupDocument;
    use crate::types::Selection;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn mounted(markup: &str) -> (RichTextEditor<MarkupDocument>, Rc<RefCell<Vec<String>>>) {
        let mut editor = RichTextEditor::new(MarkupDocument::new(), EditorConfig::default())
            .with_token("secret");
        let changes = Rc::new(RefCell::new(Vec::new()));
        let sink = changes.clone();
        editor.on_change(move |markup| sink.borrow_mut().push(markup.to_string()));
        editor.mount(markup);
        (editor, changes)
    }

    fn select(editor: &mut RichTextEditor<MarkupDocument>, selection: Selection) {
        editor.surface_mut().select(selection);
        editor.capture_selection();
    }

    #[test]
    fn mount_applies_initial_value_without_notifying() {
        let (editor, changes) = mounted("<p>A</p>");
        assert_eq!(editor.markup(), "<p>A</p>");
        assert!(changes.borrow().is_empty());
    }

    #[test]
    fn command_restores_selection_after_focus_loss() {
        let (mut editor, changes) = mounted("<p>hello world</p>");
        select(&mut editor, Selection::new(9, 14));

        // toolbar click moves focus away
        editor.surface_mut().blur();
        editor.surface_mut().clear_selection();

        assert!(editor.toggle_inline(InlineStyle::Bold));
        assert_eq!(editor.markup(), "<p>hello <b>world</b></p>");
        assert_eq!(*changes.borrow(), vec!["<p>hello <b>world</b></p>".to_string()]);
        assert!(editor.surface().is_focused());
    }

    #[test]
    fn invalid_heading_level_is_ignored() {
        let (mut editor, changes) = mounted("<p>x</p>");
        select(&mut editor, Selection::collapsed(4));
        assert!(!editor.set_heading(4));
        assert!(editor.set_heading(2));
        assert_eq!(editor.markup(), "<h2>x</h2>");
        assert_eq!(changes.borrow().len(), 1);
    }

    #[test]
    fn link_prompt_cancel_and_blank_are_noops() {
        let (mut editor, changes) = mounted("<p>docs</p>");
        select(&mut editor, Selection::new(3, 7));

        assert!(!editor.insert_link(&|_: &str| -> Option<String> { None }));
        assert!(!editor.insert_link(&|_: &str| -> Option<String> { Some("   ".into()) }));
        assert!(changes.borrow().is_empty());

        assert!(editor.insert_link(&|msg: &str| -> Option<String> {
            assert_eq!(msg, LINK_PROMPT);
            Some(" https://webdevmonk.com ".to_string())
        }));
        assert_eq!(
            editor.markup(),
            "<p><a href=\"https://webdevmonk.com\">docs</a></p>"
        );
    }

    #[test]
    fn toolbar_image_and_link_need_input() {
        let (mut editor, _) = mounted("<p>x</p>");
        select(&mut editor, Selection::collapsed(4));
        assert!(!editor.apply_toolbar(ToolbarAction::Image));
        assert!(!editor.apply_toolbar(ToolbarAction::Link));
        assert!(editor.apply_toolbar(ToolbarAction::HorizontalRule));
        assert_eq!(editor.markup(), "<p>x<hr></p>");
    }

    #[test]
    fn input_notifies_with_current_markup() {
        let (mut editor, changes) = mounted("<p>a</p>");
        editor.surface_mut().set_markup("<p>ab</p>");
        editor.handle_input();
        assert_eq!(*changes.borrow(), vec!["<p>ab</p>".to_string()]);
        assert_eq!(editor.version(), 1);
    }

    #[test]
    fn unmounted_editor_ignores_commands() {
        let (mut editor, changes) = mounted("<p>x</p>");
        select(&mut editor, Selection::collapsed(4));
        editor.unmount();
        assert!(!editor.insert_horizontal_rule());
        assert!(changes.borrow().is_empty());
        assert!(!editor.image_button_enabled());
    }

    #[test]
    fn image_button_requires_token_and_no_upload() {
        let mut editor = RichTextEditor::new(MarkupDocument::new(), EditorConfig::default());
        editor.mount("");
        assert!(!editor.image_button_enabled());
        assert!(editor.begin_image_insert().is_none());

        editor.set_token(Some("t".into()));
        let ticket = editor.begin_image_insert().unwrap();
        assert_eq!(editor.upload_state(), UploadState::PickerOpen);
        assert!(editor.image_button_enabled());

        editor.file_selected(&ticket, Some(PickedFile::new("a.png", None, vec![1u8])));
        assert!(!editor.image_button_enabled());
        assert!(editor.begin_image_insert().is_none());
    }

    #[test]
    fn reopening_the_picker_supersedes_the_abandoned_ticket() {
        let (mut editor, _) = mounted("<p>x</p>");
        let abandoned = editor.begin_image_insert().unwrap();
        let ticket = editor.begin_image_insert().unwrap();
        assert_eq!(editor.upload_state(), UploadState::PickerOpen);

        let file = || Some(PickedFile::new("a.png", None, vec![1u8]));
        assert!(editor.file_selected(&abandoned, file()).is_none());
        assert_eq!(editor.upload_state(), UploadState::PickerOpen);
        assert!(editor.file_selected(&abandoned, None).is_none());
        assert_eq!(editor.upload_state(), UploadState::PickerOpen);

        assert!(editor.file_selected(&ticket, file()).is_some());
        assert_eq!(editor.upload_state(), UploadState::Uploading);
        let uploaded = UploadedImage {
            reference: "r".into(),
        };
        assert!(!editor.finish_image_insert(abandoned, Ok(uploaded)));
        assert_eq!(editor.upload_state(), UploadState::Uploading);
    }

    #[test]
    fn cancelled_picker_returns_to_idle() {
        let (mut editor, changes) = mounted("<p>x</p>");
        let ticket = editor.begin_image_insert().unwrap();
        assert!(editor.file_selected(&ticket, None).is_none());
        assert_eq!(editor.upload_state(), UploadState::Idle);
        assert!(changes.borrow().is_empty());
    }

    #[test]
    fn upload_success_inserts_at_trigger_selection() {
        let (mut editor, changes) = mounted("<p>ab</p>");
        select(&mut editor, Selection::collapsed(4));

        let ticket = editor.begin_image_insert().unwrap();
        let request = editor
            .file_selected(&ticket, Some(PickedFile::new("a.png", Some("image/png".into()), vec![1u8])))
            .unwrap();
        assert_eq!(request.endpoint, "http://localhost:7000/upload");
        assert_eq!(request.token, "secret");
        assert!(editor.is_uploading());
        assert!(!editor.image_button_enabled());

        let inserted = editor.finish_image_insert(
            ticket,
            Ok(UploadedImage {
                reference: "abc123.png".into(),
            }),
        );
        assert!(inserted);
        assert_eq!(
            editor.markup(),
            "<p>a<img src=\"http://localhost:7000/uploads/abc123.png\">b</p>"
        );
        assert_eq!(changes.borrow().len(), 1);
        assert_eq!(editor.upload_state(), UploadState::Idle);
    }

    #[test]
    fn upload_failure_sets_dismissible_error() {
        let (mut editor, changes) = mounted("<p>ab</p>");
        select(&mut editor, Selection::collapsed(4));

        let statuses = Rc::new(RefCell::new(Vec::new()));
        let sink = statuses.clone();
        editor.on_status(move |s: &EditorStatus| sink.borrow_mut().push(s.clone()));

        let ticket = editor.begin_image_insert().unwrap();
        editor.file_selected(&ticket, Some(PickedFile::new("a.png", None, vec![1u8])));
        assert!(!editor.finish_image_insert(ticket, Err(UploadError::Status { status: 500 })));

        assert_eq!(editor.markup(), "<p>ab</p>");
        assert_eq!(editor.error(), Some(UPLOAD_FAILED_MESSAGE));
        assert!(changes.borrow().is_empty());

        let last = statuses.borrow().last().cloned().unwrap();
        assert_eq!(last.error.as_deref(), Some(UPLOAD_FAILED_MESSAGE));
        assert!(last.image_button_enabled);

        editor.dismiss_error();
        assert_eq!(editor.error(), None);
        assert_eq!(editor.markup(), "<p>ab</p>");
    }

    #[test]
    fn result_after_unmount_is_dropped() {
        let (mut editor, changes) = mounted("<p>ab</p>");
        select(&mut editor, Selection::collapsed(4));
        let ticket = editor.begin_image_insert().unwrap();

        editor.unmount();
        editor.mount("<p>other</p>");

        let inserted = editor.finish_image_insert(
            ticket,
            Ok(UploadedImage {
                reference: "late.png".into(),
            }),
        );
        assert!(!inserted);
        assert_eq!(editor.markup(), "<p>ab</p>");
        assert!(changes.borrow().is_empty());
        assert_eq!(editor.error(), None);
    }

    #[test]
    fn edits_during_upload_use_latest_selection() {
        let (mut editor, _) = mounted("<p>ab</p>");
        select(&mut editor, Selection::collapsed(4));
        let ticket = editor.begin_image_insert().unwrap();
        editor
            .file_selected(&ticket, Some(PickedFile::new("a.png", None, vec![1u8])))
            .unwrap();

        // user keeps typing elsewhere while the upload is in flight
        editor.surface_mut().set_markup("<p>abcd</p>");
        editor.handle_input();
        select(&mut editor, Selection::collapsed(7));

        assert!(editor.finish_image_insert(
            ticket,
            Ok(UploadedImage {
                reference: "x.png".into(),
            }),
        ));
        assert_eq!(
            editor.markup(),
            "<p>abcd<img src=\"http://localhost:7000/uploads/x.png\"></p>"
        );
    }
}
