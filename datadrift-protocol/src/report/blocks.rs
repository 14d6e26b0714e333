use serde::{Deserialize, Serialize};

/// Inline text colors understood by the document store.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TextColor {
    #[default]
    Default,
    Blue,
    Orange,
}

impl TextColor {
    fn is_default(&self) -> bool {
        matches!(self, TextColor::Default)
    }
}

/// Inline formatting flags for a rich text run.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Annotations {
    #[serde(default, skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub code: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub underline: bool,
    #[serde(default, skip_serializing_if = "TextColor::is_default")]
    pub color: TextColor,
}

fn is_false(value: &bool) -> bool {
    !value
}

/// A single run of styled text inside a block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RichText {
    pub text: TextContent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Annotations>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextContent {
    pub content: String,
}

impl RichText {
    /// Unstyled text run.
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            text: TextContent {
                content: content.into(),
            },
            annotations: None,
        }
    }

    /// Text rendered as inline code.
    pub fn code(content: impl Into<String>) -> Self {
        Self::plain(content).with_annotations(Annotations {
            code: true,
            ..Annotations::default()
        })
    }

    /// Bold text run.
    pub fn bold(content: impl Into<String>) -> Self {
        Self::plain(content).with_annotations(Annotations {
            bold: true,
            ..Annotations::default()
        })
    }

    /// Bold text run in the given color.
    pub fn bold_colored(content: impl Into<String>, color: TextColor) -> Self {
        Self::plain(content).with_annotations(Annotations {
            bold: true,
            color,
            ..Annotations::default()
        })
    }

    /// Underlined text run.
    pub fn underlined(content: impl Into<String>) -> Self {
        Self::plain(content).with_annotations(Annotations {
            underline: true,
            ..Annotations::default()
        })
    }

    fn with_annotations(mut self, annotations: Annotations) -> Self {
        self.annotations = Some(annotations);
        self
    }
}

/// Rich text payload shared by the text-bearing block variants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RichTextContent {
    pub rich_text: Vec<RichText>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbedContent {
    pub url: String,
}

/// One block of the published document, in the document store's wire shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Block {
    #[serde(rename = "heading_1")]
    Heading1 { heading_1: RichTextContent },
    #[serde(rename = "heading_2")]
    Heading2 { heading_2: RichTextContent },
    #[serde(rename = "paragraph")]
    Paragraph { paragraph: RichTextContent },
    #[serde(rename = "bulleted_list_item")]
    BulletedListItem { bulleted_list_item: RichTextContent },
    #[serde(rename = "embed")]
    Embed { embed: EmbedContent },
}

impl Block {
    /// Top-level heading holding a single plain text run.
    pub fn heading_1(text: impl Into<String>) -> Self {
        Block::Heading1 {
            heading_1: RichTextContent {
                rich_text: vec![RichText::plain(text)],
            },
        }
    }

    /// Sub-heading holding a single plain text run.
    pub fn heading_2(text: impl Into<String>) -> Self {
        Block::Heading2 {
            heading_2: RichTextContent {
                rich_text: vec![RichText::plain(text)],
            },
        }
    }

    pub fn paragraph(rich_text: Vec<RichText>) -> Self {
        Block::Paragraph {
            paragraph: RichTextContent { rich_text },
        }
    }

    pub fn bulleted_list_item(rich_text: Vec<RichText>) -> Self {
        Block::BulletedListItem {
            bulleted_list_item: RichTextContent { rich_text },
        }
    }

    /// Embedded media block referencing an external URL.
    pub fn embed(url: impl Into<String>) -> Self {
        Block::Embed {
            embed: EmbedContent { url: url.into() },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn heading_serializes_to_wire_shape() {
        let value = serde_json::to_value(Block::heading_1("Problem")).expect("serialize");
        assert_eq!(
            value,
            json!({
                "type": "heading_1",
                "heading_1": { "rich_text": [ { "text": { "content": "Problem" } } ] }
            })
        );
    }

    #[test]
    fn annotations_omit_defaults() {
        let value = serde_json::to_value(RichText::bold_colored("-5", TextColor::Orange))
            .expect("serialize");
        assert_eq!(
            value,
            json!({
                "text": { "content": "-5" },
                "annotations": { "bold": true, "color": "orange" }
            })
        );
    }

    #[test]
    fn embed_carries_only_the_url() {
        let value = serde_json::to_value(Block::embed("https://charts.example/c/1"))
            .expect("serialize");
        assert_eq!(
            value,
            json!({ "type": "embed", "embed": { "url": "https://charts.example/c/1" } })
        );
    }
}
