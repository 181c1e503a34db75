//! Browser DOM layer for the webdevmonk rich-text editor.
//!
//! Implements the core crate's platform traits over a `contenteditable`
//! element and wires DOM events to a `RichTextEditor`. Assumes a
//! `wasm32-unknown-unknown` target environment.
//!
//! # Architecture
//!
//! - `surface`: `execCommand` and Selection API access for the element
//! - `clipboard`: paste event `DataTransfer` reading
//! - `picker`: file dialog through a detached file input
//! - `prompt`: `window.prompt()` for link URLs
//! - `toolbar`: toolbar buttons and the upload error banner
//! - `handle`: event listeners and the editor's lifetime
//!
//! # Re-exports
//!
//! This crate re-exports `webdevmonk-editor-core` for convenience, so
//! consumers only need to depend on `webdevmonk-editor-browser`.

// Re-export core crate
pub use webdevmonk_editor_core;
pub use webdevmonk_editor_core::*;

pub mod clipboard;
pub mod handle;
pub mod picker;
pub mod prompt;
pub mod surface;
pub mod toolbar;

pub use clipboard::BrowserClipboard;
pub use handle::{BrowserEditor, EditorHandle};
pub use picker::BrowserFilePicker;
pub use prompt::BrowserPrompt;
pub use surface::{BrowserSurface, exec_command_args};
pub use toolbar::ToolbarDom;
