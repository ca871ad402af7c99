//! # Content Rendering
//!
//! Turns a parsed section into a flat sequence of styled spans.
//!
//! ```text
//! section ─┬─ paragraph  →  (paragraph, "…") ("text", "\n")
//!          ├─ literal    →  (literal,   "…")
//!          └─ ???        →  (text,      "…")   unknown tags fall back
//! ```
//!
//! Spans carry a [`StyleClass`], not a concrete terminal style. The TUI
//! resolves classes through its theme, so this module stays UI-agnostic.
//! There is no caching: every call walks the tree again.

use log::debug;

use crate::core::collection::Node;

/// Named style a span asks for. Resolved to colours by the theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleClass {
    Text,
    Strong,
    Emphasis,
    Literal,
    Paragraph,
    CodeBlock,
    Prompt,
    TestBlock,
    Section,
    Separator,
    Title,
    ListItem,
    ListItemFocused,
}

impl StyleClass {
    pub const ALL: [StyleClass; 13] = [
        StyleClass::Text,
        StyleClass::Strong,
        StyleClass::Emphasis,
        StyleClass::Literal,
        StyleClass::Paragraph,
        StyleClass::CodeBlock,
        StyleClass::Prompt,
        StyleClass::TestBlock,
        StyleClass::Section,
        StyleClass::Separator,
        StyleClass::Title,
        StyleClass::ListItem,
        StyleClass::ListItemFocused,
    ];

    /// Style for a document node tag. Unknown tags get [`StyleClass::Text`].
    pub fn for_tag(tag: &str) -> Self {
        match tag {
            "text" => StyleClass::Text,
            "strong" => StyleClass::Strong,
            "emphasis" => StyleClass::Emphasis,
            "literal" => StyleClass::Literal,
            "paragraph" => StyleClass::Paragraph,
            "code-block" => StyleClass::CodeBlock,
            "prompt" => StyleClass::Prompt,
            "test-block" => StyleClass::TestBlock,
            "section" => StyleClass::Section,
            "separator" => StyleClass::Separator,
            other => {
                debug!("No style for tag {:?}, using text", other);
                StyleClass::Text
            }
        }
    }

    /// Name used for this class in the `[theme]` config table.
    pub fn name(self) -> &'static str {
        match self {
            StyleClass::Text => "text",
            StyleClass::Strong => "strong",
            StyleClass::Emphasis => "emphasis",
            StyleClass::Literal => "literal",
            StyleClass::Paragraph => "paragraph",
            StyleClass::CodeBlock => "code-block",
            StyleClass::Prompt => "prompt",
            StyleClass::TestBlock => "test-block",
            StyleClass::Section => "section",
            StyleClass::Separator => "separator",
            StyleClass::Title => "title",
            StyleClass::ListItem => "list-item",
            StyleClass::ListItemFocused => "list-item.focused",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|class| class.name() == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSpan {
    pub style: StyleClass,
    pub text: String,
}

impl StyledSpan {
    pub fn new(style: StyleClass, text: impl Into<String>) -> Self {
        Self {
            style,
            text: text.into(),
        }
    }
}

/// Concatenated plain text of a span sequence.
pub fn plain_text(spans: &[StyledSpan]) -> String {
    spans.iter().map(|s| s.text.as_str()).collect()
}

/// Where rendered output goes. Owned by the navigation stack, handed in at
/// construction.
pub trait DisplaySurface {
    /// Replace everything in the content region with `spans`.
    fn replace_content(&mut self, spans: Vec<StyledSpan>);

    /// Reflect a new breadcrumb in the window title.
    fn set_title(&mut self, title: &str);
}

/// Walk the section's direct children into styled spans.
pub fn section_spans(section: &Node) -> Vec<StyledSpan> {
    let mut spans = Vec::with_capacity(section.children.len() * 2);
    for node in &section.children {
        spans.push(StyledSpan::new(StyleClass::for_tag(&node.tagname), node.text()));
        if node.tagname == "paragraph" {
            spans.push(StyledSpan::new(StyleClass::Text, "\n"));
        }
    }
    spans
}

/// Render `section` and hand the result to `surface`.
pub fn render_section(section: &Node, surface: &mut impl DisplaySurface) {
    let spans = section_spans(section);
    debug!(
        "Rendering section {:?} ({} spans)",
        section.title(),
        spans.len()
    );
    surface.replace_content(spans);
}
