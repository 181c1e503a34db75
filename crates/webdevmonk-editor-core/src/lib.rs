//! webdevmonk-editor-core: rich-text editor logic without a rendering surface.
//!
//! This crate provides:
//! - `EditingSurface` / `SelectionPlatform` traits the host implements
//! - `SelectionTracker` - selection capture and restore across focus loss
//! - `RichTextEditor` - command dispatch, paste handling, image pipeline
//! - `HttpUploader` - multipart upload client (reqwest)
//! - `MarkupDocument` - in-memory surface over an `EditorRope`

pub mod actions;
pub mod config;
pub mod document;
pub mod editor;
pub mod execute;
mod markup;
pub mod paste;
pub mod pipeline;
pub mod platform;
pub mod selection;
pub mod text;
pub mod types;
pub mod upload;

pub use actions::{Alignment, BlockFormat, EditorCommand, InlineStyle, ListKind, ToolbarAction};
pub use config::EditorConfig;
pub use document::MarkupDocument;
pub use editor::{
    EditorStatus, ImageInsertTicket, LINK_PROMPT, RichTextEditor, UPLOAD_FAILED_MESSAGE,
    UploadState,
};
pub use execute::{Applied, apply_command};
pub use paste::{PastePayload, sanitize_pasted_html};
pub use pipeline::insert_image;
pub use platform::{
    EditingSurface, FilePicker, PasteSource, PlatformError, SelectionPlatform, UrlPrompt,
};
pub use selection::{SelectionService, SelectionTracker};
pub use smol_str::SmolStr;
pub use text::{EditorRope, TextBuffer};
pub use types::{PickedFile, Selection, UploadedImage};
pub use upload::{HttpUploader, ImageUploader, UploadError, UploadRequest};
