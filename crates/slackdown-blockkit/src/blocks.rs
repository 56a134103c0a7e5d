//! Typed model of the Block Kit subset the renderer emits. Serializes to the
//! JSON shapes Slack expects, with a `type` discriminator on every record.

use serde::Serialize;

/// A top-level Block Kit block.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Header {
        text: PlainText,
    },
    Section {
        text: MrkdwnText,
    },
    RichText {
        elements: Vec<RichTextElement>,
    },
    Image {
        title: PlainText,
        #[serde(skip_serializing_if = "Option::is_none")]
        image_url: Option<String>,
        alt_text: String,
    },
    Divider,
}

impl Block {
    pub fn section(text: impl Into<String>) -> Self {
        Block::Section {
            text: MrkdwnText { text: text.into() },
        }
    }
}

/// `{"type": "plain_text", ...}` text object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "plain_text")]
pub struct PlainText {
    pub text: String,
    pub emoji: bool,
}

impl PlainText {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emoji: true,
        }
    }
}

/// `{"type": "mrkdwn", ...}` text object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "mrkdwn")]
pub struct MrkdwnText {
    pub text: String,
}

/// Element inside a `rich_text` block.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RichTextElement {
    RichTextSection {
        elements: Vec<Leaf>,
    },
    RichTextList {
        style: ListStyle,
        indent: u32,
        elements: Vec<RichTextElement>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListStyle {
    Bullet,
    Ordered,
}

/// The smallest styled unit of rich text: a text run or a link, carrying
/// accumulated boolean style flags.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Leaf {
    Text {
        text: String,
        #[serde(skip_serializing_if = "LeafStyle::is_plain")]
        style: LeafStyle,
    },
    Link {
        url: String,
        text: String,
        #[serde(skip_serializing_if = "LeafStyle::is_plain")]
        style: LeafStyle,
    },
}

impl Leaf {
    pub fn text(text: impl Into<String>) -> Self {
        Leaf::Text {
            text: text.into(),
            style: LeafStyle::default(),
        }
    }

    /// Returns the leaf with its style flags updated. Flags only accumulate;
    /// an outer span never clears what an inner span set.
    pub fn styled(self, apply: impl Fn(&mut LeafStyle)) -> Self {
        match self {
            Leaf::Text { text, mut style } => {
                apply(&mut style);
                Leaf::Text { text, style }
            }
            Leaf::Link {
                url,
                text,
                mut style,
            } => {
                apply(&mut style);
                Leaf::Link { url, text, style }
            }
        }
    }

    /// Retype the leaf as a link to `url`. An outer link span overwrites the
    /// target an inner one already applied.
    pub fn linked(self, url: &str) -> Self {
        match self {
            Leaf::Text { text, style } => Leaf::Link {
                url: url.to_string(),
                text,
                style,
            },
            Leaf::Link { text, style, .. } => Leaf::Link {
                url: url.to_string(),
                text,
                style,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LeafStyle {
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub bold: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub italic: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub strike: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub code: bool,
}

impl LeafStyle {
    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }

    pub fn bold() -> Self {
        Self {
            bold: true,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plain_leaf_omits_style() {
        let value = serde_json::to_value(Leaf::text("hi")).unwrap();
        assert_eq!(value, json!({"type": "text", "text": "hi"}));
    }

    #[test]
    fn styled_leaf_serializes_only_set_flags() {
        let leaf = Leaf::text("hi").styled(|style| style.bold = true);
        let value = serde_json::to_value(leaf).unwrap();
        assert_eq!(
            value,
            json!({"type": "text", "text": "hi", "style": {"bold": true}})
        );
    }

    #[test]
    fn linked_leaf_keeps_style_and_overwrites_url() {
        let leaf = Leaf::text("hi")
            .styled(|style| style.italic = true)
            .linked("http://inner")
            .linked("http://outer");
        let value = serde_json::to_value(leaf).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "link",
                "url": "http://outer",
                "text": "hi",
                "style": {"italic": true}
            })
        );
    }

    #[test]
    fn divider_and_header_shapes() {
        let divider = serde_json::to_value(Block::Divider).unwrap();
        assert_eq!(divider, json!({"type": "divider"}));

        let header = serde_json::to_value(Block::Header {
            text: PlainText::new("Title"),
        })
        .unwrap();
        assert_eq!(
            header,
            json!({
                "type": "header",
                "text": {"type": "plain_text", "text": "Title", "emoji": true}
            })
        );
    }

    #[test]
    fn image_url_is_omitted_when_absent() {
        let image = Block::Image {
            title: PlainText::new("Logo"),
            image_url: None,
            alt_text: "Logo".into(),
        };
        let value = serde_json::to_value(image).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "image",
                "title": {"type": "plain_text", "text": "Logo", "emoji": true},
                "alt_text": "Logo"
            })
        );
    }
}
