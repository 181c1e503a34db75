//! Clipboard paste handling.
//!
//! The platform's default paste is always suppressed. The editor picks one
//! representation from the clipboard, strips active content from markup and
//! inserts it at the caret as a single command.

use std::sync::LazyLock;

use html_escape::{decode_html_entities, encode_double_quoted_attribute};
use regex_lite::Regex;

use crate::actions::EditorCommand;
use crate::markup::{TagKind, attributes, scan_tags};
use crate::platform::PasteSource;

pub const HTML_MIME: &str = "text/html";
pub const TEXT_MIME: &str = "text/plain";

/// The clipboard representation chosen for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PastePayload {
    Html(String),
    Text(String),
}

impl PastePayload {
    /// Prefer `text/html`, then `text/plain`. Empty entries count as absent.
    pub fn from_source(source: &impl PasteSource) -> Option<Self> {
        let read = |mime: &str| source.read(mime).filter(|s| !s.is_empty());

        if let Some(html) = read(HTML_MIME) {
            return Some(Self::Html(html));
        }
        read(TEXT_MIME).map(Self::Text)
    }

    /// Turn the payload into the command that inserts it.
    ///
    /// Without markup insertion support the chosen representation is
    /// inserted verbatim as text.
    pub fn into_command(self, supports_html_insert: bool) -> EditorCommand {
        match (self, supports_html_insert) {
            (Self::Html(html), true) => EditorCommand::InsertHtml {
                html: sanitize_pasted_html(&html),
            },
            (Self::Html(text), false) | (Self::Text(text), false) => {
                EditorCommand::InsertText { text }
            }
            (Self::Text(text), true) => EditorCommand::InsertText { text },
        }
    }
}

/// Elements removed together with everything inside them.
const DROPPED_WITH_CONTENT: &[&str] = &[
    "script", "style", "title", "head", "noscript", "template", "iframe", "object", "textarea",
    "select", "svg", "math", "xmp", "noembed", "noframes",
];

/// Attributes any kept element may carry.
const GLOBAL_ATTRIBUTES: &[&str] = &["style", "title", "class", "dir", "align"];

/// Kept elements and their extra attributes. Everything else is unwrapped.
const ALLOWED_ELEMENTS: &[(&str, &[&str])] = &[
    ("a", &["href"]),
    ("img", &["src", "alt", "width", "height"]),
    ("td", &["colspan", "rowspan"]),
    ("th", &["colspan", "rowspan"]),
    ("p", &[]),
    ("div", &[]),
    ("span", &[]),
    ("br", &[]),
    ("hr", &[]),
    ("b", &[]),
    ("strong", &[]),
    ("i", &[]),
    ("em", &[]),
    ("u", &[]),
    ("s", &[]),
    ("strike", &[]),
    ("del", &[]),
    ("ins", &[]),
    ("mark", &[]),
    ("small", &[]),
    ("sub", &[]),
    ("sup", &[]),
    ("code", &[]),
    ("pre", &[]),
    ("blockquote", &[]),
    ("h1", &[]),
    ("h2", &[]),
    ("h3", &[]),
    ("h4", &[]),
    ("h5", &[]),
    ("h6", &[]),
    ("ul", &[]),
    ("ol", &[]),
    ("li", &[]),
    ("table", &[]),
    ("caption", &[]),
    ("thead", &[]),
    ("tbody", &[]),
    ("tfoot", &[]),
    ("tr", &[]),
];

const URL_ATTRIBUTES: &[&str] = &["href", "src"];

const SAFE_URL_SCHEMES: &[&str] = &["http", "https", "mailto", "tel"];

/// Comments, doctypes and CDATA left in text by the tag scanner.
static DECLARATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?(?:-->|\z)|<![^>]*>?").unwrap());

fn allowed_attributes(element: &str) -> Option<&'static [&'static str]> {
    ALLOWED_ELEMENTS
        .iter()
        .find(|(name, _)| *name == element)
        .map(|(_, attrs)| *attrs)
}

/// Whether a decoded URL attribute value is relative or uses a safe scheme.
fn is_safe_url(value: &str) -> bool {
    let normalized = value
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();
    let Some(colon) = normalized.find(':') else {
        return true;
    };
    let scheme = &normalized[..colon];
    if scheme
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    {
        SAFE_URL_SCHEMES.contains(&scheme)
    } else {
        // colon inside a path, query or fragment
        scheme.contains(['/', '?', '#']) && !scheme.contains('&')
    }
}

fn push_text(out: &mut String, text: &str) {
    for c in DECLARATION.replace_all(text, "").chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
}

fn push_open_tag(out: &mut String, raw: &str, name: &str, extra: &[&str]) {
    out.push('<');
    out.push_str(name);
    for attr in attributes(raw) {
        let attr_name = attr.name.as_str();
        if !GLOBAL_ATTRIBUTES.contains(&attr_name) && !extra.contains(&attr_name) {
            continue;
        }
        let value = decode_html_entities(&attr.value);
        if URL_ATTRIBUTES.contains(&attr_name) && !is_safe_url(&value) {
            tracing::debug!(target: "webdevmonk::editor", attr = attr_name, "dropped unsafe url from paste");
            continue;
        }
        out.push(' ');
        out.push_str(attr_name);
        out.push_str("=\"");
        out.push_str(&encode_double_quoted_attribute(&value));
        out.push('"');
    }
    out.push('>');
}

/// Rebuild pasted markup from an allow-list.
///
/// Script-like elements are removed with their content, unknown elements are
/// unwrapped, and kept elements carry only allow-listed attributes. URL
/// attributes are entity-decoded before their scheme is checked, so only
/// relative, `http(s)`, `mailto` and `tel` links survive. Comments (including
/// the `StartFragment` markers browsers add) are dropped and stray angle
/// brackets in text are escaped.
pub fn sanitize_pasted_html(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut cursor = 0;
    let mut dropped_depth = 0usize;

    for tag in scan_tags(html) {
        if dropped_depth == 0 {
            push_text(&mut out, &html[cursor..tag.span.start]);
        }
        cursor = tag.span.end;

        if DROPPED_WITH_CONTENT.contains(&tag.name.as_str()) {
            match tag.kind {
                TagKind::Open => dropped_depth += 1,
                TagKind::Close => dropped_depth = dropped_depth.saturating_sub(1),
                TagKind::Void => {}
            }
            continue;
        }
        if dropped_depth > 0 {
            continue;
        }
        let Some(extra) = allowed_attributes(&tag.name) else {
            continue;
        };
        match tag.kind {
            TagKind::Close => {
                out.push_str("</");
                out.push_str(&tag.name);
                out.push('>');
            }
            TagKind::Open | TagKind::Void => {
                push_open_tag(&mut out, &html[tag.span.clone()], &tag.name, extra)
            }
        }
    }

    if dropped_depth == 0 {
        push_text(&mut out, &html[cursor..]);
    }
    out
}
