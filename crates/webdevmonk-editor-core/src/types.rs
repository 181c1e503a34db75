//! Core editor types: selection and image/upload records.
//!
//! These types are framework-agnostic and can be used with any editing surface.

use std::ops::Range;

use bytes::Bytes;
use mime_sniffer::MimeTypeSniffer;

/// Text selection with anchor and head positions.
///
/// The anchor is where the selection started, the head is where the cursor is now.
/// They may be in any order - use `start()` and `end()` for ordered bounds.
/// Offsets are in chars of the serialized markup.
#[derive(Clone, Debug, Copy, PartialEq, Eq, Hash)]
pub struct Selection {
    /// Where selection started
    pub anchor: usize,
    /// Where cursor is now
    pub head: usize,
}

impl Selection {
    /// Create a new selection.
    pub fn new(anchor: usize, head: usize) -> Self {
        Self { anchor, head }
    }

    /// Create a collapsed selection (cursor position).
    pub fn collapsed(offset: usize) -> Self {
        Self {
            anchor: offset,
            head: offset,
        }
    }

    /// Get the start (lower bound) of the selection.
    pub fn start(&self) -> usize {
        self.anchor.min(self.head)
    }

    /// Get the end (upper bound) of the selection.
    pub fn end(&self) -> usize {
        self.anchor.max(self.head)
    }

    /// Check if the selection is collapsed (empty, cursor only).
    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.head
    }

    /// Get the selection length.
    pub fn len(&self) -> usize {
        self.end() - self.start()
    }

    /// Check if empty (same as is_collapsed).
    pub fn is_empty(&self) -> bool {
        self.is_collapsed()
    }

    /// Convert to a Range<usize> (ordered).
    pub fn to_range(&self) -> Range<usize> {
        self.start()..self.end()
    }
}

/// A file chosen through the image picker, ready to be uploaded.
#[derive(Clone, Debug, PartialEq)]
pub struct PickedFile {
    /// Original file name as reported by the picker
    pub name: String,
    /// MIME type (reported by the host, or sniffed from the bytes)
    pub mime_type: String,
    /// Raw file bytes
    pub data: Bytes,
}

impl PickedFile {
    /// Build a picked file, sniffing the MIME type when the host didn't report one.
    pub fn new(name: impl Into<String>, mime_type: Option<String>, data: impl Into<Bytes>) -> Self {
        let data = data.into();
        let mime_type = mime_type
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| {
                data.as_ref()
                    .sniff_mime_type()
                    .unwrap_or("application/octet-stream")
                    .to_string()
            });
        Self {
            name: name.into(),
            mime_type,
            data,
        }
    }

    /// Whether the file looks like an image.
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}

/// Result of a successful upload: the server's reference for the stored file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadedImage {
    /// File identifier returned by the upload endpoint (`url` field)
    pub reference: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_bounds() {
        // Forward selection
        let sel = Selection::new(5, 10);
        assert_eq!(sel.start(), 5);
        assert_eq!(sel.end(), 10);

        // Backward selection
        let sel = Selection::new(10, 5);
        assert_eq!(sel.start(), 5);
        assert_eq!(sel.end(), 10);
        assert_eq!(sel.to_range(), 5..10);
    }

    #[test]
    fn test_selection_collapsed() {
        let sel = Selection::collapsed(7);
        assert!(sel.is_collapsed());
        assert!(sel.is_empty());
        assert_eq!(sel.len(), 0);
        assert_eq!(sel.to_range(), 7..7);
    }

    #[test]
    fn test_picked_file_keeps_reported_mime() {
        let file = PickedFile::new("a.png", Some("image/png".into()), vec![1u8, 2, 3]);
        assert_eq!(file.mime_type, "image/png");
        assert!(file.is_image());
    }

    #[test]
    fn test_picked_file_sniffs_missing_mime() {
        // PNG signature
        let png = vec![0x89u8, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
        let file = PickedFile::new("shot", None, png);
        assert_eq!(file.mime_type, "image/png");

        let file = PickedFile::new("blob", Some(String::new()), vec![0u8; 4]);
        assert!(!file.is_image());
    }
}
