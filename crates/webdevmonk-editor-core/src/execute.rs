//! Command execution on serialized markup.
//!
//! `apply_command` applies an `EditorCommand` to a markup string at a byte
//! selection and returns the new markup plus where the selection ends up.
//! The in-memory document drives it; the browser surface hands the same
//! commands to the platform instead.

use std::ops::Range;

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::actions::{Alignment, BlockFormat, EditorCommand, InlineStyle, ListKind};
use crate::markup::{
    BLOCK_ELEMENTS, Element, LIST_ELEMENTS, Tag, elements, enclosing, inline_run, innermost,
    rename_open_tag, scan_tags, text_segments, touched,
};

/// Result of applying a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub markup: String,
    /// New selection as a byte range, start <= end.
    pub selection: Range<usize>,
}

impl Applied {
    fn unchanged(markup: &str, selection: Range<usize>) -> Self {
        Self {
            markup: markup.to_string(),
            selection,
        }
    }
}

/// Apply `command` to `markup` with the given byte selection.
///
/// The selection must be ordered and lie on char boundaries.
pub fn apply_command(markup: &str, selection: Range<usize>, command: &EditorCommand) -> Applied {
    match command {
        EditorCommand::ToggleInline(style) => toggle_inline(markup, selection, *style),
        EditorCommand::FormatBlock(format) => format_block(markup, selection, *format),
        EditorCommand::ToggleList(kind) => toggle_list(markup, selection, *kind),
        EditorCommand::Align(alignment) => align(markup, selection, *alignment),
        EditorCommand::CreateLink { url } => create_link(markup, selection, url),
        EditorCommand::InsertImage { url } => {
            let tag = format!("<img src=\"{}\">", encode_double_quoted_attribute(url));
            replace_selection(markup, selection, &tag)
        }
        EditorCommand::InsertHorizontalRule => replace_selection(markup, selection, "<hr>"),
        EditorCommand::InsertHtml { html } => replace_selection(markup, selection, html),
        EditorCommand::InsertText { text } => {
            replace_selection(markup, selection, &encode_text(text))
        }
    }
}

/// Replace the selection with `fragment`, caret after it.
fn replace_selection(markup: &str, selection: Range<usize>, fragment: &str) -> Applied {
    let mut out = String::with_capacity(markup.len() + fragment.len());
    out.push_str(&markup[..selection.start]);
    out.push_str(fragment);
    out.push_str(&markup[selection.end..]);
    let caret = selection.start + fragment.len();
    Applied {
        markup: out,
        selection: caret..caret,
    }
}

/// Non-overlapping replacements against the original markup, applied in
/// one pass.
#[derive(Debug, Default)]
struct Splices(Vec<(Range<usize>, String)>);

impl Splices {
    fn replace(&mut self, range: Range<usize>, text: impl Into<String>) {
        self.0.push((range, text.into()));
    }

    fn insert(&mut self, at: usize, text: impl Into<String>) {
        self.replace(at..at, text);
    }

    /// Where `offset` ends up. Text inserted exactly at `offset` lands before
    /// it when `after_inserts` is set.
    fn map(&self, offset: usize, after_inserts: bool) -> usize {
        let mut delta = 0isize;
        for (range, text) in &self.0 {
            if range.start < offset && offset < range.end {
                return (range.start as isize + delta) as usize + text.len();
            }
            let before = range.end < offset
                || (range.end == offset && (!range.is_empty() || after_inserts));
            if before {
                delta += text.len() as isize - range.len() as isize;
            }
        }
        (offset as isize + delta) as usize
    }

    /// Build the new markup. The selection keeps covering the same content,
    /// inside any tags inserted at its edges.
    fn apply(mut self, markup: &str, selection: Range<usize>) -> Applied {
        self.0.sort_by_key(|(range, _)| (range.start, range.end));

        let mut out = String::with_capacity(markup.len());
        let mut last = 0;
        for (range, text) in &self.0 {
            out.push_str(&markup[last..range.start]);
            out.push_str(text);
            last = range.end;
        }
        out.push_str(&markup[last..]);

        let start = self.map(selection.start, true);
        let end = if selection.is_empty() {
            start
        } else {
            self.map(selection.end, false).max(start)
        };
        Applied {
            markup: out,
            selection: start..end,
        }
    }
}

/// Swap an element's open and close tags, shifting the selection with them.
fn retag(
    markup: &str,
    element: &Element,
    new_open: &str,
    new_close: &str,
    selection: Range<usize>,
) -> Applied {
    let mut splices = Splices::default();
    splices.replace(element.open.clone(), new_open);
    splices.replace(element.close.clone(), new_close);
    splices.apply(markup, selection)
}

fn toggle_inline(markup: &str, selection: Range<usize>, style: InlineStyle) -> Applied {
    if selection.is_empty() {
        return Applied::unchanged(markup, selection);
    }

    let tag = style.tag();
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");
    let before = &markup[..selection.start];
    let after = &markup[selection.end..];
    let selected = &markup[selection.clone()];

    // Selection is exactly the text of a styled element: unwrap it.
    if !selected.contains('<') && before.ends_with(&open) && after.starts_with(&close) {
        let start = selection.start - open.len();
        let mut out = String::with_capacity(markup.len());
        out.push_str(&before[..start]);
        out.push_str(selected);
        out.push_str(&after[close.len()..]);
        return Applied {
            markup: out,
            selection: start..start + selected.len(),
        };
    }

    let tags = scan_tags(markup);
    let els = elements(&tags);

    // Selection covers a whole styled element: unwrap it.
    if let Some(el) = els
        .iter()
        .find(|e| e.name == tag && e.outer() == selection)
    {
        let mut splices = Splices::default();
        splices.replace(el.open.clone(), "");
        splices.replace(el.close.clone(), "");
        return splices.apply(markup, selection);
    }

    let mut segments = text_segments(&tags, &selection);
    if segments.len() > 1 {
        segments.retain(|seg| !markup[seg.clone()].trim().is_empty());
    }
    if segments.is_empty() {
        return Applied::unchanged(markup, selection);
    }

    let styled = |seg: &Range<usize>| enclosing(&els, seg, &[tag]).is_some();
    let mut splices = Splices::default();

    if segments.iter().all(styled) {
        // Split each styled parent around its selected text.
        for seg in &segments {
            let Some(parent) = innermost(&els, seg).filter(|p| p.name == tag) else {
                tracing::debug!(target: "webdevmonk::editor", tag, "style set on an outer element, left as is");
                continue;
            };
            if seg.start == parent.inner().start {
                splices.replace(parent.open.clone(), "");
            } else {
                splices.insert(seg.start, close.as_str());
            }
            if seg.end == parent.inner().end {
                splices.replace(parent.close.clone(), "");
            } else {
                splices.insert(seg.end, &markup[parent.open.clone()]);
            }
        }
    } else {
        // One wrapper per text run keeps the markup well formed across
        // element and block boundaries.
        for seg in segments.iter().filter(|seg| !styled(*seg)) {
            splices.insert(seg.start, open.as_str());
            splices.insert(seg.end, close.as_str());
        }
    }
    splices.apply(markup, selection)
}

fn format_block(markup: &str, selection: Range<usize>, format: BlockFormat) -> Applied {
    let tag = format.tag();
    let tags = scan_tags(markup);
    let els = elements(&tags);

    let blocks = touched(&els, &selection, BLOCK_ELEMENTS);
    if blocks.is_empty() {
        return wrap_run(markup, &tags, selection, &format!("<{tag}>"), &format!("</{tag}>"));
    }

    let mut splices = Splices::default();
    for block in blocks {
        splices.replace(
            block.open.clone(),
            rename_open_tag(&markup[block.open.clone()], tag),
        );
        splices.replace(block.close.clone(), format!("</{tag}>"));
    }
    splices.apply(markup, selection)
}

/// Wrap the inline run around the selection start.
fn wrap_run(
    markup: &str,
    tags: &[Tag],
    selection: Range<usize>,
    open: &str,
    close: &str,
) -> Applied {
    let run = inline_run(markup, tags, &selection);
    let mut splices = Splices::default();
    splices.insert(run.start, open);
    splices.insert(run.end, close);
    splices.apply(markup, selection)
}

fn toggle_list(markup: &str, selection: Range<usize>, kind: ListKind) -> Applied {
    let tag = kind.tag();
    let tags = scan_tags(markup);
    let els = elements(&tags);

    if let Some(list) = enclosing(&els, &selection, LIST_ELEMENTS) {
        if list.name == tag {
            return unwrap_list(markup, &els, list, selection);
        }
        let open = rename_open_tag(&markup[list.open.clone()], tag);
        return retag(markup, list, &open, &format!("</{tag}>"), selection);
    }

    let open = format!("<{tag}><li>");
    let close = format!("</li></{tag}>");

    let blocks = touched(&els, &selection, BLOCK_ELEMENTS);
    match blocks.as_slice() {
        [] => wrap_run(markup, &tags, selection, &open, &close),
        [block] => retag(markup, block, &open, &close, selection),
        [first, .., last] => {
            let mut splices = Splices::default();
            let adjacent = blocks
                .windows(2)
                .all(|pair| markup[pair[0].close.end..pair[1].open.start].trim().is_empty());

            if adjacent {
                // Sibling blocks become the items of one list.
                splices.replace(first.open.clone(), open);
                for pair in blocks.windows(2) {
                    splices.replace(pair[0].close.start..pair[1].open.end, "</li><li>");
                }
                splices.replace(last.close.clone(), close);
            } else {
                for block in &blocks {
                    splices.replace(block.open.clone(), open.as_str());
                    splices.replace(block.close.clone(), close.as_str());
                }
            }
            splices.apply(markup, selection)
        }
    }
}

/// Replace a list with one paragraph per item.
fn unwrap_list(
    markup: &str,
    els: &[Element],
    list: &Element,
    selection: Range<usize>,
) -> Applied {
    let items: Vec<&Element> = {
        let mut items: Vec<&Element> = els
            .iter()
            .filter(|e| e.name == "li" && list.contains(&e.outer()))
            // direct children only
            .filter(|e| {
                !els.iter().any(|p| {
                    LIST_ELEMENTS.contains(&p.name.as_str())
                        && p.open != list.open
                        && list.contains(&p.outer())
                        && p.contains(&e.outer())
                })
            })
            .collect();
        items.sort_by_key(|e| e.open.start);
        items
    };

    let mut replacement = String::new();
    // (old inner range, new inner start)
    let mut segments: Vec<(Range<usize>, usize)> = Vec::with_capacity(items.len());
    for item in &items {
        replacement.push_str("<p>");
        segments.push((item.inner(), list.open.start + replacement.len()));
        replacement.push_str(&markup[item.inner()]);
        replacement.push_str("</p>");
    }

    let map = |p: usize| {
        segments
            .iter()
            .find(|(old, _)| old.start <= p && p <= old.end)
            .map(|(old, new)| new + (p - old.start))
            .unwrap_or(list.open.start)
    };

    let mut out = String::with_capacity(markup.len());
    out.push_str(&markup[..list.open.start]);
    out.push_str(&replacement);
    out.push_str(&markup[list.close.end..]);

    Applied {
        markup: out,
        selection: map(selection.start)..map(selection.end),
    }
}

fn align(markup: &str, selection: Range<usize>, alignment: Alignment) -> Applied {
    let value = alignment.css_value();
    let tags = scan_tags(markup);
    let els = elements(&tags);

    let mut candidates = BLOCK_ELEMENTS.to_vec();
    candidates.push("li");

    let blocks = touched(&els, &selection, &candidates);
    if blocks.is_empty() {
        return wrap_run(
            markup,
            &tags,
            selection,
            &format!("<div style=\"text-align: {value};\">"),
            "</div>",
        );
    }

    let mut splices = Splices::default();
    for block in blocks {
        splices.replace(
            block.open.clone(),
            set_text_align(&markup[block.open.clone()], value),
        );
    }
    splices.apply(markup, selection)
}

/// Set `text-align` in an opening tag's style attribute.
fn set_text_align(open_tag: &str, value: &str) -> String {
    let decl = format!("text-align: {value};");
    let lower = open_tag.to_ascii_lowercase();

    if let Some(attr) = lower.find("style=\"") {
        let value_start = attr + "style=\"".len();
        let value_end = open_tag[value_start..]
            .find('"')
            .map(|p| value_start + p)
            .unwrap_or(open_tag.len());
        let kept: Vec<&str> = open_tag[value_start..value_end]
            .split(';')
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .filter(|d| {
                !d.split(':')
                    .next()
                    .is_some_and(|prop| prop.trim().eq_ignore_ascii_case("text-align"))
            })
            .collect();

        let mut style = String::new();
        for d in kept {
            style.push_str(d);
            style.push_str("; ");
        }
        style.push_str(&decl);

        return format!(
            "{}{}{}",
            &open_tag[..value_start],
            style,
            &open_tag[value_end..]
        );
    }

    let insert_at = if open_tag.ends_with("/>") {
        open_tag.len() - 2
    } else {
        open_tag.len() - 1
    };
    format!(
        "{} style=\"{}\"{}",
        open_tag[..insert_at].trim_end(),
        decl,
        &open_tag[insert_at..]
    )
}

fn create_link(markup: &str, selection: Range<usize>, url: &str) -> Applied {
    let open = format!("<a href=\"{}\">", encode_double_quoted_attribute(url));

    if selection.is_empty() {
        let link = format!("{open}{}</a>", encode_text(url));
        return replace_selection(markup, selection, &link);
    }

    let tags = scan_tags(markup);
    let mut segments = text_segments(&tags, &selection);
    if segments.len() > 1 {
        segments.retain(|seg| !markup[seg.clone()].trim().is_empty());
    }
    let mut splices = Splices::default();
    for seg in segments {
        splices.insert(seg.start, open.as_str());
        splices.insert(seg.end, "</a>");
    }
    splices.apply(markup, selection)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(markup: &str, selected: &str, command: EditorCommand) -> Applied {
        let start = markup.find(selected).unwrap();
        apply_command(markup, start..start + selected.len(), &command)
    }

    #[test]
    fn bold_wraps_and_unwraps() {
        let applied = run(
            "<p>hello world</p>",
            "world",
            EditorCommand::ToggleInline(InlineStyle::Bold),
        );
        insta::assert_snapshot!(applied.markup, @"<p>hello <b>world</b></p>");
        assert_eq!(&applied.markup[applied.selection.clone()], "world");

        let again = apply_command(
            &applied.markup,
            applied.selection,
            &EditorCommand::ToggleInline(InlineStyle::Bold),
        );
        assert_eq!(again.markup, "<p>hello world</p>");
        assert_eq!(&again.markup[again.selection], "world");
    }

    #[test]
    fn toggle_unwraps_whole_element_selection() {
        let applied = run(
            "<p>a <i>b</i> c</p>",
            "<i>b</i>",
            EditorCommand::ToggleInline(InlineStyle::Italic),
        );
        assert_eq!(applied.markup, "<p>a b c</p>");
    }

    #[test]
    fn collapsed_inline_toggle_is_noop() {
        let applied = apply_command(
            "<p>abc</p>",
            4..4,
            &EditorCommand::ToggleInline(InlineStyle::Underline),
        );
        assert_eq!(applied.markup, "<p>abc</p>");
        assert_eq!(applied.selection, 4..4);
    }

    #[test]
    fn format_block_renames_enclosing_block() {
        let applied = run(
            "<p class=\"x\">title</p><p>body</p>",
            "title",
            EditorCommand::FormatBlock(BlockFormat::Heading(1)),
        );
        insta::assert_snapshot!(applied.markup, @r#"<h1 class="x">title</h1><p>body</p>"#);
        assert_eq!(&applied.markup[applied.selection], "title");
    }

    #[test]
    fn format_block_wraps_bare_text() {
        let applied = run(
            "some text",
            "text",
            EditorCommand::FormatBlock(BlockFormat::CodeBlock),
        );
        assert_eq!(applied.markup, "<pre>some text</pre>");
        assert_eq!(&applied.markup[applied.selection], "text");
    }

    #[test]
    fn list_toggle_cycle() {
        let bullet = EditorCommand::ToggleList(ListKind::Unordered);
        let numbered = EditorCommand::ToggleList(ListKind::Ordered);

        let applied = run("<p>item</p>", "item", bullet.clone());
        insta::assert_snapshot!(applied.markup, @"<ul><li>item</li></ul>");

        let applied = apply_command(&applied.markup, applied.selection, &numbered);
        assert_eq!(applied.markup, "<ol><li>item</li></ol>");

        let applied = apply_command(&applied.markup, applied.selection, &numbered);
        assert_eq!(applied.markup, "<p>item</p>");
        assert_eq!(&applied.markup[applied.selection], "item");
    }

    #[test]
    fn unwrapping_list_splits_items() {
        let applied = run(
            "<ul><li>one</li><li>two</li></ul>",
            "two",
            EditorCommand::ToggleList(ListKind::Unordered),
        );
        assert_eq!(applied.markup, "<p>one</p><p>two</p>");
        assert_eq!(&applied.markup[applied.selection], "two");
    }

    #[test]
    fn align_sets_style() {
        let center = EditorCommand::Align(Alignment::Center);
        let applied = run("<p>x</p>", "x", center);
        insta::assert_snapshot!(applied.markup, @r#"<p style="text-align: center;">x</p>"#);

        let applied = apply_command(
            &applied.markup,
            applied.selection,
            &EditorCommand::Align(Alignment::Right),
        );
        assert_eq!(applied.markup, "<p style=\"text-align: right;\">x</p>");
    }

    #[test]
    fn align_keeps_other_declarations() {
        assert_eq!(
            set_text_align("<p style=\"color: red\">", "left"),
            "<p style=\"color: red; text-align: left;\">"
        );
    }

    #[test]
    fn align_wraps_bare_text_in_div() {
        let applied = run("loose", "loose", EditorCommand::Align(Alignment::Left));
        assert_eq!(applied.markup, "<div style=\"text-align: left;\">loose</div>");
    }

    #[test]
    fn link_wraps_or_inserts() {
        let link = EditorCommand::CreateLink {
            url: "https://example.com/?a=1&b=2".into(),
        };
        let applied = run("<p>see docs</p>", "docs", link.clone());
        insta::assert_snapshot!(
            applied.markup,
            @r#"<p>see <a href="https://example.com/?a=1&amp;b=2">docs</a></p>"#
        );

        let applied = apply_command("<p></p>", 3..3, &link);
        assert_eq!(
            applied.markup,
            "<p><a href=\"https://example.com/?a=1&amp;b=2\">https://example.com/?a=1&amp;b=2</a></p>"
        );
    }

    #[test]
    fn insertions_replace_selection() {
        let applied = run(
            "<p>a X b</p>",
            "X",
            EditorCommand::InsertImage {
                url: "http://localhost:7000/uploads/abc.png".into(),
            },
        );
        assert_eq!(
            applied.markup,
            "<p>a <img src=\"http://localhost:7000/uploads/abc.png\"> b</p>"
        );
        assert_eq!(applied.selection.start, applied.selection.end);
        assert_eq!(&applied.markup[applied.selection.start..], " b</p>");

        let applied = apply_command("<p>ab</p>", 4..4, &EditorCommand::InsertHorizontalRule);
        assert_eq!(applied.markup, "<p>a<hr>b</p>");

        let applied = apply_command(
            "<p></p>",
            3..3,
            &EditorCommand::InsertText {
                text: "1 < 2".into(),
            },
        );
        assert_eq!(applied.markup, "<p>1 &lt; 2</p>");
    }

    // "<p>a</p><p>b</p>": a is byte 3, b is byte 11
    const TWO_BLOCKS: &str = "<p>a</p><p>b</p>";

    #[test]
    fn format_block_across_blocks_renames_each() {
        let h1 = EditorCommand::FormatBlock(BlockFormat::Heading(1));
        let applied = apply_command(TWO_BLOCKS, 3..12, &h1);
        insta::assert_snapshot!(applied.markup, @"<h1>a</h1><h1>b</h1>");
        assert_eq!(&applied.markup[applied.selection], "a</h1><h1>b");

        // ending at the start of the second block leaves it alone
        let applied = apply_command(TWO_BLOCKS, 3..11, &h1);
        assert_eq!(applied.markup, "<h1>a</h1><p>b</p>");
    }

    #[test]
    fn bold_across_blocks_wraps_each_run() {
        let bold = EditorCommand::ToggleInline(InlineStyle::Bold);
        let applied = apply_command(TWO_BLOCKS, 3..12, &bold);
        insta::assert_snapshot!(applied.markup, @"<p><b>a</b></p><p><b>b</b></p>");

        let again = apply_command(&applied.markup, applied.selection, &bold);
        assert_eq!(again.markup, TWO_BLOCKS);
        assert_eq!(again.selection, 3..12);
    }

    #[test]
    fn bold_over_nested_markup_stays_well_formed() {
        let applied = run(
            "<p>a <i>b</i> c</p>",
            "a <i>b</i> c",
            EditorCommand::ToggleInline(InlineStyle::Bold),
        );
        insta::assert_snapshot!(applied.markup, @"<p><b>a </b><i><b>b</b></i><b> c</b></p>");
    }

    #[test]
    fn unbolding_part_of_a_run_splits_it() {
        let applied = run(
            "<p><b>hello</b></p>",
            "ell",
            EditorCommand::ToggleInline(InlineStyle::Bold),
        );
        assert_eq!(applied.markup, "<p><b>h</b>ell<b>o</b></p>");
        assert_eq!(&applied.markup[applied.selection], "ell");
    }

    #[test]
    fn list_across_sibling_blocks_is_one_list() {
        let bullet = EditorCommand::ToggleList(ListKind::Unordered);
        let applied = apply_command(TWO_BLOCKS, 3..12, &bullet);
        insta::assert_snapshot!(applied.markup, @"<ul><li>a</li><li>b</li></ul>");
        assert_eq!(&applied.markup[applied.selection.clone()], "a</li><li>b");

        let again = apply_command(&applied.markup, applied.selection, &bullet);
        assert_eq!(again.markup, TWO_BLOCKS);
        assert_eq!(again.selection, 3..12);
    }

    #[test]
    fn align_and_link_across_blocks() {
        let applied = apply_command(TWO_BLOCKS, 3..12, &EditorCommand::Align(Alignment::Center));
        assert_eq!(
            applied.markup,
            "<p style=\"text-align: center;\">a</p><p style=\"text-align: center;\">b</p>"
        );

        let link = EditorCommand::CreateLink { url: "/u".into() };
        let applied = apply_command(TWO_BLOCKS, 3..12, &link);
        assert_eq!(
            applied.markup,
            "<p><a href=\"/u\">a</a></p><p><a href=\"/u\">b</a></p>"
        );
    }
}
