//! Minimal markup scanner used by the in-memory document.
//!
//! This is not an HTML parser. It finds tags, pairs open/close tags into
//! elements, and answers "which element encloses this range" questions,
//! which is all the formatting commands need. All offsets are byte offsets
//! into the scanned string.

use std::ops::Range;

/// Elements that never have a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "wbr",
];

/// Elements `FormatBlock` and friends treat as the enclosing block.
pub(crate) const BLOCK_ELEMENTS: &[&str] = &[
    "p",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "pre",
    "div",
    "blockquote",
];

pub(crate) const LIST_ELEMENTS: &[&str] = &["ul", "ol"];

/// Tags that end an inline run.
const RUN_BOUNDARIES: &[&str] = &[
    "p",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "pre",
    "div",
    "blockquote",
    "ul",
    "ol",
    "li",
    "hr",
    "br",
    "table",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TagKind {
    Open,
    Close,
    /// `<br>`, `<img ...>`, `<x/>`
    Void,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Tag {
    /// Lowercased element name.
    pub name: String,
    pub kind: TagKind,
    /// Span of the whole tag, `<` through `>`.
    pub span: Range<usize>,
}

/// A paired element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Element {
    pub name: String,
    pub open: Range<usize>,
    pub close: Range<usize>,
}

impl Element {
    /// Content between the tags.
    pub fn inner(&self) -> Range<usize> {
        self.open.end..self.close.start
    }

    /// Whole element including tags.
    pub fn outer(&self) -> Range<usize> {
        self.open.start..self.close.end
    }

    /// Whether the content range fully contains `range`.
    pub fn contains(&self, range: &Range<usize>) -> bool {
        self.open.end <= range.start && range.end <= self.close.start
    }
}

/// Scan all tags in `markup`. Comments, doctypes and stray `<` are skipped.
pub(crate) fn scan_tags(markup: &str) -> Vec<Tag> {
    let bytes = markup.as_bytes();
    let mut tags = Vec::new();
    let mut i = 0;

    while let Some(rel) = markup[i..].find('<') {
        let start = i + rel;
        let next = bytes.get(start + 1).copied();

        match next {
            Some(b'!') => {
                // Comment or doctype.
                let end = if markup[start..].starts_with("<!--") {
                    markup[start + 4..]
                        .find("-->")
                        .map(|p| start + 4 + p + 3)
                        .unwrap_or(markup.len())
                } else {
                    markup[start..]
                        .find('>')
                        .map(|p| start + p + 1)
                        .unwrap_or(markup.len())
                };
                i = end;
            }
            Some(b'/') => {
                let name_start = start + 2;
                let name_end = name_end(markup, name_start);
                if name_end == name_start {
                    i = start + 1;
                    continue;
                }
                let end = tag_end(markup, name_end);
                tags.push(Tag {
                    name: markup[name_start..name_end].to_ascii_lowercase(),
                    kind: TagKind::Close,
                    span: start..end,
                });
                i = end;
            }
            Some(c) if c.is_ascii_alphabetic() => {
                let name_start = start + 1;
                let name_end = name_end(markup, name_start);
                let end = tag_end(markup, name_end);
                let name = markup[name_start..name_end].to_ascii_lowercase();
                let self_closing = markup[..end].ends_with("/>");
                let kind = if self_closing || VOID_ELEMENTS.contains(&name.as_str()) {
                    TagKind::Void
                } else {
                    TagKind::Open
                };
                tags.push(Tag {
                    name,
                    kind,
                    span: start..end,
                });
                i = end;
            }
            _ => i = start + 1,
        }

        if i >= markup.len() {
            break;
        }
    }

    tags
}

fn name_end(markup: &str, from: usize) -> usize {
    markup[from..]
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
        .map(|p| from + p)
        .unwrap_or(markup.len())
}

/// Find the `>` closing a tag, skipping quoted attribute values.
fn tag_end(markup: &str, from: usize) -> usize {
    let mut quote: Option<char> = None;
    for (i, c) in markup[from..].char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"') | (None, '\'') => quote = Some(c),
            (None, '>') => return from + i + 1,
            _ => {}
        }
    }
    markup.len()
}

/// A parsed attribute. `value` is raw: entities are not decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Attribute {
    /// Lowercased attribute name.
    pub name: String,
    pub value: String,
}

/// Attributes of an opening tag, `<` through `>`.
///
/// `/` separates attributes the way browsers treat it, so `<img/onerror=x>`
/// yields `onerror`.
pub(crate) fn attributes(tag: &str) -> Vec<Attribute> {
    let body = tag.strip_prefix('<').unwrap_or(tag);
    let body = body.strip_suffix('>').unwrap_or(body);
    let name_len = body
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
        .unwrap_or(body.len());

    let mut rest = &body[name_len..];
    let mut out = Vec::new();
    loop {
        rest = rest.trim_start_matches(|c: char| c.is_ascii_whitespace() || c == '/');
        if rest.is_empty() {
            break;
        }
        let len = rest
            .find(|c: char| c.is_ascii_whitespace() || c == '=' || c == '/')
            .unwrap_or(rest.len());
        if len == 0 {
            // stray '='
            rest = &rest[1..];
            continue;
        }
        let name = rest[..len].to_ascii_lowercase();
        rest = &rest[len..];

        let after = rest.trim_start_matches(|c: char| c.is_ascii_whitespace());
        let value = match after.strip_prefix('=') {
            Some(v) => {
                let v = v.trim_start_matches(|c: char| c.is_ascii_whitespace());
                match v.chars().next() {
                    Some(q @ ('"' | '\'')) => {
                        let inner = &v[1..];
                        let end = inner.find(q).unwrap_or(inner.len());
                        rest = inner.get(end + 1..).unwrap_or("");
                        inner[..end].to_string()
                    }
                    _ => {
                        let end = v.find(|c: char| c.is_ascii_whitespace()).unwrap_or(v.len());
                        rest = &v[end..];
                        v[..end].to_string()
                    }
                }
            }
            None => String::new(),
        };
        out.push(Attribute { name, value });
    }
    out
}

/// Pair open and close tags into elements.
///
/// Unmatched close tags are ignored; unclosed open tags produce no element.
pub(crate) fn elements(tags: &[Tag]) -> Vec<Element> {
    let mut stack: Vec<&Tag> = Vec::new();
    let mut out = Vec::new();

    for tag in tags {
        match tag.kind {
            TagKind::Open => stack.push(tag),
            TagKind::Void => {}
            TagKind::Close => {
                if let Some(pos) = stack.iter().rposition(|t| t.name == tag.name) {
                    let open = stack[pos];
                    stack.truncate(pos);
                    out.push(Element {
                        name: tag.name.clone(),
                        open: open.span.clone(),
                        close: tag.span.clone(),
                    });
                }
            }
        }
    }

    out
}

/// Innermost element whose content contains `range` and whose name is in `names`.
pub(crate) fn enclosing<'a>(
    elements: &'a [Element],
    range: &Range<usize>,
    names: &[&str],
) -> Option<&'a Element> {
    elements
        .iter()
        .filter(|e| names.contains(&e.name.as_str()) && e.contains(range))
        .min_by_key(|e| e.outer().len())
}

/// Innermost element of any name whose content contains `range`.
pub(crate) fn innermost<'a>(elements: &'a [Element], range: &Range<usize>) -> Option<&'a Element> {
    elements
        .iter()
        .filter(|e| e.contains(range))
        .min_by_key(|e| e.outer().len())
}

/// Elements named in `names` that `range` touches, innermost only, in
/// document order.
///
/// A collapsed range yields at most its enclosing element. A range across
/// several blocks yields each block rather than their common ancestor.
pub(crate) fn touched<'a>(
    elements: &'a [Element],
    range: &Range<usize>,
    names: &[&str],
) -> Vec<&'a Element> {
    if range.is_empty() {
        return enclosing(elements, range, names).into_iter().collect();
    }
    let hits: Vec<&Element> = elements
        .iter()
        .filter(|e| names.contains(&e.name.as_str()))
        .filter(|e| {
            let inner = e.inner();
            inner.start < range.end && range.start < inner.end
        })
        .collect();

    let mut leaves: Vec<&Element> = hits
        .iter()
        .copied()
        .filter(|e| !hits.iter().any(|o| o.open != e.open && e.contains(&o.outer())))
        .collect();
    leaves.sort_by_key(|e| e.open.start);
    leaves
}

/// The run of inline content around `range.start`, bounded by block-level
/// tags. The run ends at the first block boundary even when `range` goes on.
pub(crate) fn inline_run(markup: &str, tags: &[Tag], range: &Range<usize>) -> Range<usize> {
    let boundaries = tags
        .iter()
        .filter(|t| RUN_BOUNDARIES.contains(&t.name.as_str()));

    let mut start = 0;
    let mut end = markup.len();
    for tag in boundaries {
        if tag.span.end <= range.start {
            start = start.max(tag.span.end);
        } else if tag.span.start >= range.start {
            end = end.min(tag.span.start);
        }
    }
    start..end.max(start)
}

/// Text between tags inside `range`, skipping empty gaps.
pub(crate) fn text_segments(tags: &[Tag], range: &Range<usize>) -> Vec<Range<usize>> {
    let mut out = Vec::new();
    let mut cursor = range.start;
    for tag in tags
        .iter()
        .filter(|t| t.span.end > range.start && t.span.start < range.end)
    {
        if tag.span.start > cursor {
            out.push(cursor..tag.span.start);
        }
        cursor = cursor.max(tag.span.end);
    }
    if range.end > cursor {
        out.push(cursor..range.end);
    }
    out
}

/// Whether `offset` lies strictly inside a tag (between `<` and `>`).
pub(crate) fn inside_tag(tags: &[Tag], offset: usize) -> bool {
    tags.iter()
        .any(|t| t.span.start < offset && offset < t.span.end)
}

/// Swap the element name of an opening tag, keeping its attributes.
pub(crate) fn rename_open_tag(open_tag: &str, new_name: &str) -> String {
    let name_len = open_tag[1..]
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
        .unwrap_or(open_tag.len() - 1);
    format!("<{}{}", new_name, &open_tag[1 + name_len..])
}
