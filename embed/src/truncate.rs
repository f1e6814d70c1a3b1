use std::borrow::Cow;

use crate::{char_len, limits, Embed};

/// Appended to clipped text. Counts towards the limit.
pub const ELLIPSIS: char = '…';

/// Clip `text` to at most `limit` characters, marking the cut with [ELLIPSIS].
///
/// Text already within the limit is returned unchanged, so clipping twice is
/// the same as clipping once.
pub fn truncate_text(text: &str, limit: usize) -> Cow<'_, str> {
    if char_len(text) <= limit {
        return Cow::Borrowed(text);
    }

    if limit == 0 {
        return Cow::Borrowed("");
    }

    let mut clipped: String = text.chars().take(limit - 1).collect();
    clipped.push(ELLIPSIS);
    Cow::Owned(clipped)
}

fn clip(text: &mut String, limit: usize) {
    if let Cow::Owned(clipped) = truncate_text(text, limit) {
        *text = clipped;
    }
}

/// Bring every text part of `embed` within the platform limits.
///
/// Each part is clipped to its own limit first. If the combined text is
/// still too long, trailing fields are dropped and then the description is
/// shortened. URLs, color and timestamp are never touched.
pub fn truncate(mut embed: Embed) -> Embed {
    if let Some(title) = embed.title.as_mut() {
        clip(title, limits::TITLE);
    }

    if let Some(description) = embed.description.as_mut() {
        clip(description, limits::DESCRIPTION);
    }

    if let Some(author) = embed.author.as_mut() {
        clip(&mut author.name, limits::AUTHOR_NAME);
    }

    if let Some(footer) = embed.footer.as_mut() {
        clip(&mut footer.text, limits::FOOTER_TEXT);
    }

    if embed.fields.len() > limits::FIELDS {
        tracing::debug!(
            fields = embed.fields.len(),
            "dropping fields beyond {}",
            limits::FIELDS
        );
        embed.fields.truncate(limits::FIELDS);
    }

    for field in &mut embed.fields {
        clip(&mut field.name, limits::FIELD_NAME);
        clip(&mut field.value, limits::FIELD_VALUE);
    }

    fit_total(&mut embed);
    embed
}

fn fit_total(embed: &mut Embed) {
    let description_len = |embed: &Embed| embed.description.as_deref().map_or(0, char_len);

    while embed.text_len() - description_len(embed) > limits::TOTAL && !embed.fields.is_empty() {
        embed.fields.pop();
    }

    let total = embed.text_len();
    if total <= limits::TOTAL {
        return;
    }

    let budget = limits::TOTAL.saturating_sub(total - description_len(embed));
    tracing::debug!(total, budget, "shortening description to fit the embed limit");
    if budget == 0 {
        embed.description = None;
    } else if let Some(description) = embed.description.as_mut() {
        clip(description, budget);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EmbedAuthor, EmbedField, EmbedFooter};

    fn field(name: &str, value: String) -> EmbedField {
        EmbedField {
            name: name.into(),
            value,
            inline: false,
        }
    }

    fn oversized() -> Embed {
        let mut embed = Embed::new()
            .title("t".repeat(300))
            .url("https://example.com/".repeat(40))
            .color(0xffffff)
            .description("d".repeat(5000))
            .author(EmbedAuthor {
                name: "ñ".repeat(400),
                url: Some("https://github.com/someone".into()),
                icon_url: Some("https://avatars.example/u/1".into()),
            })
            .footer(EmbedFooter {
                text: "f".repeat(3000),
                icon_url: Some("https://example.com/icon.png".into()),
            })
            .timestamp("2024-01-01T00:00:00Z");

        for i in 0..30 {
            embed = embed.field(field(&format!("field {i}"), "v".repeat(2000)));
        }
        embed
    }

    #[test]
    fn short_text_is_untouched() {
        assert!(matches!(truncate_text("Fix bug", 256), Cow::Borrowed("Fix bug")));
        assert_eq!(truncate_text(&"x".repeat(256), 256).len(), 256);
    }

    #[test]
    fn long_text_ends_with_ellipsis() {
        let clipped = truncate_text("abcdef", 4);
        assert_eq!(clipped, "abc…");
        assert_eq!(clipped.chars().count(), 4);
    }

    #[test]
    fn clips_on_character_boundaries() {
        let clipped = truncate_text("ñññññ", 3);
        assert_eq!(clipped, "ññ…");
    }

    #[test]
    fn zero_limit() {
        assert_eq!(truncate_text("abc", 0), "");
    }

    #[test]
    fn every_part_within_limits() {
        let embed = truncate(oversized());

        assert_eq!(embed.title.as_deref().unwrap().chars().count(), limits::TITLE);
        assert_eq!(
            embed.author.as_ref().unwrap().name.chars().count(),
            limits::AUTHOR_NAME
        );
        assert_eq!(
            embed.footer.as_ref().unwrap().text.chars().count(),
            limits::FOOTER_TEXT
        );
        assert!(embed.fields.len() <= limits::FIELDS);
        for field in &embed.fields {
            assert!(field.value.chars().count() <= limits::FIELD_VALUE);
        }
        assert!(embed.text_len() <= limits::TOTAL);
    }

    #[test]
    fn links_and_metadata_are_untouched() {
        let original = oversized();
        let embed = truncate(original.clone());

        assert_eq!(embed.url, original.url);
        assert_eq!(embed.color, original.color);
        assert_eq!(embed.timestamp, original.timestamp);
        assert_eq!(
            embed.author.as_ref().unwrap().icon_url,
            original.author.as_ref().unwrap().icon_url
        );
        assert_eq!(
            embed.footer.as_ref().unwrap().icon_url,
            original.footer.as_ref().unwrap().icon_url
        );
    }

    #[test]
    fn description_shrinks_to_fit_total() {
        let embed = Embed::new()
            .title("t".repeat(256))
            .description("d".repeat(4096))
            .field(field("a", "v".repeat(1024)))
            .field(field("b", "v".repeat(1024)));

        let embed = truncate(embed);
        assert_eq!(embed.fields.len(), 2);
        assert_eq!(embed.text_len(), limits::TOTAL);
        assert!(embed.description.as_deref().unwrap().ends_with(ELLIPSIS));
    }

    #[test]
    fn idempotent() {
        let small = Embed::new().title("`a1b2c3d` Fix bug").footer(EmbedFooter {
            text: "3 files changed".into(),
            icon_url: None,
        });

        for embed in [oversized(), small, Embed::new()] {
            let once = truncate(embed);
            let twice = truncate(once.clone());
            assert_eq!(once, twice);
        }
    }
}
