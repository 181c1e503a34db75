//! Text buffer abstraction for markup storage.
//!
//! The `TextBuffer` trait provides a common interface for text storage so the
//! in-memory surface can stay agnostic of the backing structure.

use std::ops::Range;

/// A text buffer that supports efficient editing and offset conversion.
///
/// All offsets are in Unicode scalar values (chars), not bytes or UTF-16.
pub trait TextBuffer {
    /// Total length in chars (Unicode scalar values).
    fn len_chars(&self) -> usize;

    /// Check if empty.
    fn is_empty(&self) -> bool {
        self.len_chars() == 0
    }

    /// Insert text at char offset.
    fn insert(&mut self, char_offset: usize, text: &str);

    /// Delete char range.
    fn delete(&mut self, char_range: Range<usize>);

    /// Replace char range with text.
    fn replace(&mut self, char_range: Range<usize>, text: &str) {
        self.delete(char_range.clone());
        self.insert(char_range.start, text);
    }

    /// Convert entire buffer to String.
    fn to_string(&self) -> String;

    /// Convert char offset to byte offset.
    fn char_to_byte(&self, char_offset: usize) -> usize;

    /// Convert byte offset to char offset.
    fn byte_to_char(&self, byte_offset: usize) -> usize;
}

/// Ropey-backed text buffer.
///
/// Provides O(log n) editing operations and offset conversions.
#[derive(Clone, Default)]
pub struct EditorRope {
    rope: ropey::Rope,
}

impl EditorRope {
    pub fn from_str(s: &str) -> Self {
        Self {
            rope: ropey::Rope::from_str(s),
        }
    }
}

impl TextBuffer for EditorRope {
    fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    fn insert(&mut self, char_offset: usize, text: &str) {
        self.rope.insert(char_offset, text);
    }

    fn delete(&mut self, char_range: Range<usize>) {
        self.rope.remove(char_range);
    }

    fn to_string(&self) -> String {
        self.rope.to_string()
    }

    fn char_to_byte(&self, char_offset: usize) -> usize {
        self.rope.char_to_byte(char_offset)
    }

    fn byte_to_char(&self, byte_offset: usize) -> usize {
        self.rope.byte_to_char(byte_offset)
    }
}

/// Byte spans that differ between `old` and `new`: the span to replace in
/// `old` and the replacement span in `new`. Both lie on char boundaries.
pub fn changed_span(old: &str, new: &str) -> (Range<usize>, Range<usize>) {
    let prefix = old
        .bytes()
        .zip(new.bytes())
        .take_while(|(a, b)| a == b)
        .count();
    let room = old.len().min(new.len()) - prefix;
    let suffix = old
        .bytes()
        .rev()
        .zip(new.bytes().rev())
        .take(room)
        .take_while(|(a, b)| a == b)
        .count();

    let mut start = prefix;
    while !(old.is_char_boundary(start) && new.is_char_boundary(start)) {
        start -= 1;
    }
    let (mut old_end, mut new_end) = (old.len() - suffix, new.len() - suffix);
    while !(old.is_char_boundary(old_end) && new.is_char_boundary(new_end)) {
        old_end += 1;
        new_end += 1;
    }
    (start..old_end, start..new_end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_operations() {
        let mut rope = EditorRope::from_str("<p>hello world</p>");
        assert_eq!(rope.len_chars(), 18);

        rope.insert(8, " big");
        assert_eq!(rope.to_string(), "<p>hello big world</p>");

        rope.delete(8..12);
        assert_eq!(rope.to_string(), "<p>hello world</p>");

        rope.replace(0..3, "<i>");
        assert_eq!(rope.to_string(), "<i>hello world</p>");
    }

    #[test]
    fn test_offset_conversion() {
        // "é" is 2 bytes, 1 char
        let rope = EditorRope::from_str("<p>é</p>");
        assert_eq!(rope.len_chars(), 8);
        assert_eq!(rope.char_to_byte(4), 5);
        assert_eq!(rope.byte_to_char(5), 4);
    }

    #[test]
    fn test_changed_span() {
        let (old, new) = changed_span("<p>word</p>", "<p><b>word</b></p>");
        assert_eq!((old, new), (3..7, 3..14));

        assert_eq!(changed_span("same", "same"), (4..4, 4..4));
        assert_eq!(changed_span("", "<hr>"), (0..0, 0..4));
    }

    #[test]
    fn test_changed_span_keeps_char_boundaries() {
        // "é" and "è" share their first byte
        let (old, new) = changed_span("aéb", "aèb");
        assert_eq!(old, 1..3);
        assert_eq!(new, 1..3);
    }
}
