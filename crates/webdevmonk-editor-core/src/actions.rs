//! Editor commands and toolbar actions.
//!
//! `EditorCommand` is the closed set of content mutations the dispatcher can
//! apply, decoupled from how the platform implements them (browser
//! `execCommand`, an in-memory markup document, ...). `ToolbarAction` is what
//! the user actually clicks; most actions map straight to a command, the link
//! and image actions need extra input first.

use smol_str::SmolStr;

/// Inline character styles that toggle on the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InlineStyle {
    Bold,
    Italic,
    Underline,
}

impl InlineStyle {
    /// The element used to represent this style in markup.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Bold => "b",
            Self::Italic => "i",
            Self::Underline => "u",
        }
    }
}

/// Block-level formats for the block containing the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockFormat {
    Paragraph,
    /// Heading level, 1-3.
    Heading(u8),
    CodeBlock,
}

impl BlockFormat {
    /// Heading format for `level`, if it's one the toolbar offers.
    pub fn heading(level: u8) -> Option<Self> {
        (1..=3).contains(&level).then_some(Self::Heading(level))
    }

    /// The element used for this block in markup.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Paragraph => "p",
            Self::Heading(1) => "h1",
            Self::Heading(2) => "h2",
            Self::Heading(_) => "h3",
            Self::CodeBlock => "pre",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Ordered,
    Unordered,
}

impl ListKind {
    pub fn tag(self) -> &'static str {
        match self {
            Self::Ordered => "ol",
            Self::Unordered => "ul",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

impl Alignment {
    /// CSS `text-align` value.
    pub fn css_value(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

/// All content mutations the dispatcher knows how to apply.
///
/// Each one applies at the active selection of the editing surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorCommand {
    /// Toggle an inline style on the selection.
    ToggleInline(InlineStyle),
    /// Change the format of the enclosing block.
    FormatBlock(BlockFormat),
    /// Toggle an ordered/unordered list around the enclosing block.
    ToggleList(ListKind),
    /// Set text alignment of the enclosing block.
    Align(Alignment),
    /// Wrap the selection in a link.
    CreateLink { url: SmolStr },
    /// Insert an image, replacing the selection.
    InsertImage { url: String },
    /// Insert a horizontal rule, replacing the selection.
    InsertHorizontalRule,
    /// Insert a markup fragment, replacing the selection.
    InsertHtml { html: String },
    /// Insert plain text, replacing the selection.
    InsertText { text: String },
}

/// Toolbar affordances, in toolbar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolbarAction {
    Bold,
    Italic,
    Underline,
    Heading1,
    Heading2,
    Heading3,
    Paragraph,
    BulletList,
    NumberedList,
    AlignLeft,
    AlignCenter,
    AlignRight,
    Image,
    Link,
    CodeBlock,
    HorizontalRule,
}

impl ToolbarAction {
    pub const ALL: [ToolbarAction; 16] = [
        Self::Bold,
        Self::Italic,
        Self::Underline,
        Self::Heading1,
        Self::Heading2,
        Self::Heading3,
        Self::Paragraph,
        Self::BulletList,
        Self::NumberedList,
        Self::AlignLeft,
        Self::AlignCenter,
        Self::AlignRight,
        Self::Image,
        Self::Link,
        Self::CodeBlock,
        Self::HorizontalRule,
    ];

    /// Tooltip shown on the toolbar button.
    pub fn title(self) -> &'static str {
        match self {
            Self::Bold => "Bold",
            Self::Italic => "Italic",
            Self::Underline => "Underline",
            Self::Heading1 => "Heading 1",
            Self::Heading2 => "Heading 2",
            Self::Heading3 => "Heading 3",
            Self::Paragraph => "Paragraph",
            Self::BulletList => "Bullet List",
            Self::NumberedList => "Numbered List",
            Self::AlignLeft => "Align Left",
            Self::AlignCenter => "Align Center",
            Self::AlignRight => "Align Right",
            Self::Image => "Insert Image",
            Self::Link => "Insert Link",
            Self::CodeBlock => "Code Block",
            Self::HorizontalRule => "Horizontal Line",
        }
    }

    /// The command this action applies directly.
    ///
    /// `None` for actions that need more input first (link URL, image file).
    pub fn command(self) -> Option<EditorCommand> {
        let cmd = match self {
            Self::Bold => EditorCommand::ToggleInline(InlineStyle::Bold),
            Self::Italic => EditorCommand::ToggleInline(InlineStyle::Italic),
            Self::Underline => EditorCommand::ToggleInline(InlineStyle::Underline),
            Self::Heading1 => EditorCommand::FormatBlock(BlockFormat::Heading(1)),
            Self::Heading2 => EditorCommand::FormatBlock(BlockFormat::Heading(2)),
            Self::Heading3 => EditorCommand::FormatBlock(BlockFormat::Heading(3)),
            Self::Paragraph => EditorCommand::FormatBlock(BlockFormat::Paragraph),
            Self::BulletList => EditorCommand::ToggleList(ListKind::Unordered),
            Self::NumberedList => EditorCommand::ToggleList(ListKind::Ordered),
            Self::AlignLeft => EditorCommand::Align(Alignment::Left),
            Self::AlignCenter => EditorCommand::Align(Alignment::Center),
            Self::AlignRight => EditorCommand::Align(Alignment::Right),
            Self::CodeBlock => EditorCommand::FormatBlock(BlockFormat::CodeBlock),
            Self::HorizontalRule => EditorCommand::InsertHorizontalRule,
            Self::Image | Self::Link => return None,
        };
        Some(cmd)
    }
}
