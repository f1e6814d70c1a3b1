//! Rich chat messages ("embeds") and the size limits the chat platform enforces.
//!
//! The JSON shape produced by serializing [Embed] is the one Discord accepts.
//! Run every embed through [truncate] before delivering it.

use serde::Serialize;

pub mod limits;
mod truncate;

pub use self::truncate::{truncate, truncate_text, ELLIPSIS};

/// A rich message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Embed {
    /// Author block, shown above the title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<EmbedAuthor>,

    /// Accent color, as `0xRRGGBB`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,

    /// Title text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Link target of the title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Body text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Name/value pairs below the description.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,

    /// Footer block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,

    /// ISO-8601 timestamp, rendered in the footer in the reader's timezone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl Embed {
    /// An empty embed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the author block.
    pub fn author(mut self, author: EmbedAuthor) -> Self {
        self.author = Some(author);
        self
    }

    /// Set the accent color.
    pub fn color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }

    /// Set the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the title link.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the body text.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append a field.
    pub fn field(mut self, field: EmbedField) -> Self {
        self.fields.push(field);
        self
    }

    /// Set the footer block.
    pub fn footer(mut self, footer: EmbedFooter) -> Self {
        self.footer = Some(footer);
        self
    }

    /// Set the timestamp.
    pub fn timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Number of characters counted against [limits::TOTAL].
    pub fn text_len(&self) -> usize {
        let title = self.title.as_deref().map_or(0, char_len);
        let description = self.description.as_deref().map_or(0, char_len);
        let author = self.author.as_ref().map_or(0, |author| char_len(&author.name));
        let footer = self.footer.as_ref().map_or(0, |footer| char_len(&footer.text));
        let fields: usize = self.fields.iter().map(EmbedField::text_len).sum();

        title + description + author + footer + fields
    }
}

/// The author block of an embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedAuthor {
    /// Display name.
    pub name: String,

    /// Link target of the name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Small image next to the name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

/// The footer block of an embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedFooter {
    /// Footer text.
    pub text: String,

    /// Small image next to the text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

/// A name/value pair in an embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedField {
    /// Field heading.
    pub name: String,

    /// Field content.
    pub value: String,

    /// Whether the field may share a row with its neighbours.
    pub inline: bool,
}

impl EmbedField {
    fn text_len(&self) -> usize {
        char_len(&self.name) + char_len(&self.value)
    }
}

pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_platform_shape() {
        let embed = Embed::new()
            .author(EmbedAuthor {
                name: "Bot".into(),
                url: None,
                icon_url: Some("https://x/a.png".into()),
            })
            .color(0x2ea043)
            .title("`a1b2c3d` Fix bug")
            .url("https://x/commit/a1b2c3d")
            .footer(EmbedFooter {
                text: "3 files changed".into(),
                icon_url: Some("https://x/commit.png".into()),
            })
            .timestamp("2024-01-01T00:00:00Z");

        assert_eq!(
            serde_json::to_value(&embed).unwrap(),
            serde_json::json!({
                "author": {"name": "Bot", "icon_url": "https://x/a.png"},
                "color": 0x2ea043,
                "title": "`a1b2c3d` Fix bug",
                "url": "https://x/commit/a1b2c3d",
                "footer": {"text": "3 files changed", "icon_url": "https://x/commit.png"},
                "timestamp": "2024-01-01T00:00:00Z",
            })
        );
    }

    #[test]
    fn text_len_counts_characters() {
        let embed = Embed::new()
            .title("héllo")
            .description("✓✓")
            .field(EmbedField {
                name: "a".into(),
                value: "bc".into(),
                inline: false,
            });
        assert_eq!(embed.text_len(), 5 + 2 + 3);
    }
}
