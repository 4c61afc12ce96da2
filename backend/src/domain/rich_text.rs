//! Rich text blocks embedded in page content.
//!
//! The backend tags each block with a `type` string. Kinds this site does not
//! render decode to [`RichTextBlock::Unknown`] and are skipped with a warning
//! instead of failing the whole page.

use serde::{Deserialize, Serialize};
use tracing::warn;

const MIN_HEADING_LEVEL: u8 = 1;
const MAX_HEADING_LEVEL: u8 = 6;

fn default_heading_level() -> u8 {
    2
}

/// One inline text run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InlineText {
    pub text: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub bold: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub italic: bool,
}

/// Block-level rich text node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RichTextBlock {
    /// Section heading.
    Heading {
        #[serde(default = "default_heading_level")]
        level: u8,
        #[serde(default)]
        children: Vec<InlineText>,
    },
    /// Body paragraph.
    Paragraph {
        #[serde(default)]
        children: Vec<InlineText>,
    },
    /// Any block kind this site does not render.
    #[serde(other)]
    Unknown,
}

impl RichTextBlock {
    /// Concatenated text of the block's children, `None` for unknown kinds.
    pub fn text(&self) -> Option<String> {
        match self {
            Self::Heading { children, .. } | Self::Paragraph { children } => {
                Some(children.iter().map(|run| run.text.as_str()).collect())
            }
            Self::Unknown => None,
        }
    }

    /// Heading level clamped to `1..=6`; `None` for non-headings.
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            Self::Heading { level, .. } => Some((*level).clamp(MIN_HEADING_LEVEL, MAX_HEADING_LEVEL)),
            Self::Paragraph { .. } | Self::Unknown => None,
        }
    }
}

/// Render blocks to plain text, one blank line between blocks.
///
/// # Examples
/// ```
/// use site_backend::domain::rich_text::{plain_text, RichTextBlock};
///
/// let blocks: Vec<RichTextBlock> = serde_json::from_value(serde_json::json!([
///     { "type": "heading", "level": 2, "children": [{ "text": "Hello" }] },
///     { "type": "paragraph", "children": [{ "text": "World" }] }
/// ]))
/// .unwrap();
/// assert_eq!(plain_text(&blocks), "Hello\n\nWorld");
/// ```
pub fn plain_text(blocks: &[RichTextBlock]) -> String {
    let mut rendered = Vec::with_capacity(blocks.len());
    let mut skipped = 0_usize;
    for block in blocks {
        match block.text() {
            Some(text) => rendered.push(text),
            None => skipped += 1,
        }
    }
    if skipped > 0 {
        warn!(skipped, "skipped rich text blocks of unknown kind");
    }
    rendered.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: serde_json::Value) -> Vec<RichTextBlock> {
        serde_json::from_value(value).expect("blocks decode")
    }

    #[test]
    fn unknown_kinds_decode_without_failing_the_page() {
        let blocks = decode(json!([
            { "type": "paragraph", "children": [{ "text": "Intro", "bold": true }] },
            { "type": "image", "image": { "url": "/uploads/a.png" } },
            { "type": "list", "format": "ordered", "children": [] }
        ]));

        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[1], RichTextBlock::Unknown);
        assert_eq!(blocks[2], RichTextBlock::Unknown);
    }

    #[test]
    fn plain_text_skips_unknown_blocks() {
        let blocks = decode(json!([
            { "type": "heading", "level": 1, "children": [{ "text": "We build" }, { "text": " brands" }] },
            { "type": "quote", "children": [{ "text": "ignored" }] },
            { "type": "paragraph", "children": [{ "text": "Since 2012." }] }
        ]));

        assert_eq!(plain_text(&blocks), "We build brands\n\nSince 2012.");
    }

    #[test]
    fn heading_level_is_clamped_and_defaulted() {
        let blocks = decode(json!([
            { "type": "heading", "level": 9, "children": [] },
            { "type": "heading", "children": [] },
            { "type": "paragraph", "children": [] }
        ]));

        assert_eq!(blocks[0].heading_level(), Some(6));
        assert_eq!(blocks[1].heading_level(), Some(2));
        assert_eq!(blocks[2].heading_level(), None);
    }

    #[test]
    fn inline_flags_are_omitted_when_false() {
        let block = RichTextBlock::Paragraph {
            children: vec![InlineText {
                text: "plain".to_owned(),
                ..InlineText::default()
            }],
        };
        let value = serde_json::to_value(&block).expect("block serialises");
        assert_eq!(value, json!({ "type": "paragraph", "children": [{ "text": "plain" }] }));
    }
}
