//! Async driver for image insertion.

use std::cell::RefCell;
use std::rc::Weak;

use crate::editor::RichTextEditor;
use crate::platform::{EditingSurface, FilePicker};
use crate::selection::SelectionService;
use crate::upload::ImageUploader;

/// Pick a file, upload it and insert the image.
///
/// The editor is only borrowed between awaits. If it has been dropped by the
/// time the picker or the upload resolves, the result is discarded. Returns
/// whether an image ended up in the document.
pub async fn insert_image<S, T, P, U>(
    editor: Weak<RefCell<RichTextEditor<S, T>>>,
    picker: &P,
    uploader: &U,
) -> bool
where
    S: EditingSurface,
    T: SelectionService<S>,
    P: FilePicker,
    U: ImageUploader,
{
    let ticket = {
        let Some(editor) = editor.upgrade() else {
            return false;
        };
        let Some(ticket) = editor.borrow_mut().begin_image_insert() else {
            return false;
        };
        ticket
    };

    let file = picker.pick_image().await;

    let request = {
        let Some(editor) = editor.upgrade() else {
            tracing::debug!(target: "webdevmonk::editor", "editor dropped while picker was open");
            return false;
        };
        let Some(request) = editor.borrow_mut().file_selected(&ticket, file) else {
            return false;
        };
        request
    };

    let result = uploader.upload(&request).await;

    let Some(editor) = editor.upgrade() else {
        tracing::debug!(target: "webdevmonk::editor", "editor dropped during upload, result discarded");
        return false;
    };
    let inserted = editor.borrow_mut().finish_image_insert(ticket, result);
    inserted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;
    use crate::document::MarkupDocument;
    use crate::types::{PickedFile, Selection, UploadedImage};
    use crate::upload::{UploadError, UploadRequest};
    use std::cell::Cell;
    use std::rc::Rc;

    struct Picker(Option<PickedFile>);

    impl FilePicker for Picker {
        async fn pick_image(&self) -> Option<PickedFile> {
            self.0.clone()
        }
    }

    struct FakeUploader {
        reference: Option<&'static str>,
        calls: Cell<usize>,
    }

    impl ImageUploader for FakeUploader {
        async fn upload(&self, request: &UploadRequest) -> Result<UploadedImage, UploadError> {
            self.calls.set(self.calls.get() + 1);
            assert_eq!(request.token, "token");
            match self.reference {
                Some(r) => Ok(UploadedImage {
                    reference: r.to_string(),
                }),
                None => Err(UploadError::MissingReference),
            }
        }
    }

    fn png() -> PickedFile {
        PickedFile::new("shot.png", Some("image/png".into()), vec![0u8; 8])
    }

    fn editor(markup: &str) -> Rc<RefCell<RichTextEditor<MarkupDocument>>> {
        let mut editor =
            RichTextEditor::new(MarkupDocument::new(), EditorConfig::default()).with_token("token");
        editor.mount(markup);
        editor.surface_mut().select(Selection::collapsed(3));
        editor.capture_selection();
        Rc::new(RefCell::new(editor))
    }

    #[tokio::test]
    async fn inserts_uploaded_image() {
        let editor = editor("<p></p>");
        let uploader = FakeUploader {
            reference: Some("abc123.png"),
            calls: Cell::new(0),
        };

        let inserted =
            insert_image(Rc::downgrade(&editor), &Picker(Some(png())), &uploader).await;

        assert!(inserted);
        assert_eq!(uploader.calls.get(), 1);
        assert_eq!(
            editor.borrow().markup(),
            "<p><img src=\"http://localhost:7000/uploads/abc123.png\"></p>"
        );
    }

    #[tokio::test]
    async fn cancel_skips_upload() {
        let editor = editor("<p></p>");
        let uploader = FakeUploader {
            reference: Some("x.png"),
            calls: Cell::new(0),
        };

        assert!(!insert_image(Rc::downgrade(&editor), &Picker(None), &uploader).await);
        assert_eq!(uploader.calls.get(), 0);
        assert!(editor.borrow().image_button_enabled());
    }

    #[tokio::test]
    async fn missing_reference_surfaces_error() {
        let editor = editor("<p></p>");
        let uploader = FakeUploader {
            reference: None,
            calls: Cell::new(0),
        };

        assert!(!insert_image(Rc::downgrade(&editor), &Picker(Some(png())), &uploader).await);
        assert_eq!(editor.borrow().markup(), "<p></p>");
        assert!(editor.borrow().error().is_some());
    }

    #[tokio::test]
    async fn dropped_editor_is_left_alone() {
        let weak = Rc::downgrade(&editor("<p></p>"));
        let uploader = FakeUploader {
            reference: Some("x.png"),
            calls: Cell::new(0),
        };
        assert!(!insert_image(weak, &Picker(Some(png())), &uploader).await);
        assert_eq!(uploader.calls.get(), 0);
    }
}
