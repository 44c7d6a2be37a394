//! Discord embed schema.

use serde::Serialize;

use warden_core::notification::Color;
use warden_core::NotificationPayload;

pub const PURPLE: u32 = 0x9B59B6;
pub const YELLOW: u32 = 0xF1C40F;
pub const GREEN: u32 = 0x2ECC71;

pub fn color_value(color: Color) -> u32 {
    match color {
        Color::Aggressive => PURPLE,
        Color::Caution => YELLOW,
        Color::Success => GREEN,
    }
}

/// Discord's per-embed field limit.
pub const MAX_FIELDS: usize = 25;
/// Discord's per-message embed limit.
pub const MAX_EMBEDS: usize = 10;
/// Discord's limit on the summed text of all embeds in one message.
pub const MAX_MESSAGE_CHARS: usize = 6000;

/// One embed. Continuation embeds carry only the color and more fields.
#[derive(Debug, Clone, Serialize)]
pub struct Embed {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub color: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<EmbedAuthor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<EmbedImage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,
    pub fields: Vec<EmbedField>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmbedAuthor {
    pub name: String,
    pub icon_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmbedImage {
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmbedFooter {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// Webhook execute body.
#[derive(Debug, Serialize)]
pub struct WebhookMessage<'a> {
    pub embeds: &'a [Embed],
}

impl Embed {
    fn continuation(color: u32, fields: Vec<EmbedField>) -> Self {
        Self {
            title: None,
            description: None,
            color,
            timestamp: None,
            author: None,
            thumbnail: None,
            footer: None,
            fields,
        }
    }

    /// Characters counted against [`MAX_MESSAGE_CHARS`].
    pub fn text_len(&self) -> usize {
        let header = [
            self.title.as_deref(),
            self.description.as_deref(),
            self.author.as_ref().map(|a| a.name.as_str()),
            self.footer.as_ref().map(|f| f.text.as_str()),
        ];
        let header: usize = header.iter().flatten().map(|s| s.chars().count()).sum();
        let fields: usize = self
            .fields
            .iter()
            .map(|f| f.name.chars().count() + f.value.chars().count())
            .sum();
        header + fields
    }
}

/// Render a payload as one or more embeds, in field order.
///
/// The first embed carries the header; fields past [`MAX_FIELDS`] spill
/// into continuation embeds.
pub fn render(payload: &NotificationPayload) -> Vec<Embed> {
    let color = color_value(payload.color);
    let fields: Vec<EmbedField> = payload
        .fields
        .iter()
        .map(|f| EmbedField { name: f.label.clone(), value: f.value.clone(), inline: false })
        .collect();
    let mut chunks = fields.chunks(MAX_FIELDS).map(<[EmbedField]>::to_vec);

    let mut embeds = vec![Embed {
        title: Some(payload.title.clone()),
        description: Some(payload.description.clone()),
        color,
        timestamp: Some(payload.timestamp.to_rfc3339()),
        author: Some(EmbedAuthor {
            name: payload.author.name.clone(),
            icon_url: payload.author.icon_url.clone(),
        }),
        thumbnail: Some(EmbedImage { url: payload.thumbnail_url.clone() }),
        footer: Some(EmbedFooter { text: payload.footer.clone() }),
        fields: chunks.next().unwrap_or_default(),
    }];
    embeds.extend(chunks.map(|fields| Embed::continuation(color, fields)));
    embeds
}

/// Group embeds into webhook messages within Discord's per-message limits.
pub fn batches(embeds: &[Embed]) -> Vec<&[Embed]> {
    let mut batches = Vec::new();
    let mut start = 0;
    let mut chars = 0;

    for (i, embed) in embeds.iter().enumerate() {
        let len = embed.text_len();
        let full = i - start == MAX_EMBEDS || chars + len > MAX_MESSAGE_CHARS;
        if i > start && full {
            batches.push(&embeds[start..i]);
            start = i;
            chars = 0;
        }
        chars += len;
    }
    if start < embeds.len() {
        batches.push(&embeds[start..]);
    }
    batches
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use warden_core::notification::{Author, Field};

    fn payload(color: Color) -> NotificationPayload {
        NotificationPayload {
            author: Author {
                name: "Garbage Collectors".to_string(),
                icon_url: "https://images.evetech.net/corporations/98000001/logo?size=128".to_string(),
            },
            title: "WAR CONFIRMED!".to_string(),
            description: "A have declared war to B.".to_string(),
            color,
            thumbnail_url: "https://images.evetech.net/alliances/99000002/logo?size=128".to_string(),
            footer: "Declared:".to_string(),
            timestamp: Utc.with_ymd_and_hms(2026, 10, 1, 12, 0, 0).unwrap(),
            fields: vec![
                Field::new("Starts at:", "Friday, October 2, 2026"),
                Field::new("Dotlan.net:", "https://evemaps.dotlan.net/war/1"),
            ],
        }
    }

    #[test]
    fn test_color_mapping() {
        assert_eq!(render(&payload(Color::Aggressive))[0].color, 0x9B59B6);
        assert_eq!(render(&payload(Color::Caution))[0].color, 0xF1C40F);
        assert_eq!(render(&payload(Color::Success))[0].color, 0x2ECC71);
    }

    #[test]
    fn test_embed_json_shape() {
        let embeds = render(&payload(Color::Aggressive));
        assert_eq!(embeds.len(), 1);
        let json = serde_json::to_value(WebhookMessage { embeds: &embeds }).unwrap();

        let rendered = &json["embeds"][0];
        assert_eq!(rendered["title"], "WAR CONFIRMED!");
        assert_eq!(rendered["author"]["name"], "Garbage Collectors");
        assert_eq!(
            rendered["thumbnail"]["url"],
            "https://images.evetech.net/alliances/99000002/logo?size=128"
        );
        assert_eq!(rendered["footer"]["text"], "Declared:");
        assert_eq!(rendered["timestamp"], "2026-10-01T12:00:00+00:00");
        assert_eq!(rendered["fields"][0]["name"], "Starts at:");
        assert_eq!(rendered["fields"][1]["value"], "https://evemaps.dotlan.net/war/1");
        assert_eq!(rendered["fields"].as_array().unwrap().len(), 2);
    }

    fn with_allies(count: usize) -> NotificationPayload {
        let mut payload = payload(Color::Caution);
        payload.fields = vec![Field::new("Aggressor:", "A")];
        for i in 0..count {
            payload.fields.push(Field::new("Ally:", format!("Ally {}", i)));
        }
        payload.fields.push(Field::new("Dotlan.net:", "https://evemaps.dotlan.net/war/1"));
        payload
    }

    #[test]
    fn test_fields_past_limit_spill_into_continuation() {
        let embeds = render(&with_allies(30));

        assert_eq!(embeds.len(), 2);
        assert!(embeds.iter().all(|e| e.fields.len() <= MAX_FIELDS));
        assert_eq!(embeds[0].fields.len(), 25);
        assert_eq!(embeds[1].fields.len(), 7);
        assert!(embeds[1].title.is_none());
        assert_eq!(embeds[1].color, YELLOW);

        let names: Vec<&str> = embeds.iter().flat_map(|e| &e.fields).map(|f| f.value.as_str()).collect();
        assert_eq!(names.len(), 32);
        assert_eq!(names[0], "A");
        assert_eq!(names[24], "Ally 23");
        assert_eq!(names[25], "Ally 24");
        assert_eq!(names[31], "https://evemaps.dotlan.net/war/1");

        let json = serde_json::to_value(&embeds[1]).unwrap();
        assert!(json.get("title").is_none());
        assert!(json.get("footer").is_none());
    }

    #[test]
    fn test_batches_respect_embed_and_text_limits() {
        let embeds = render(&with_allies(300));
        assert_eq!(embeds.len(), 13);

        let batches = batches(&embeds);

        assert!(batches.len() >= 2);
        assert!(batches.iter().all(|b| !b.is_empty() && b.len() <= MAX_EMBEDS));
        assert!(batches
            .iter()
            .all(|b| b.iter().map(Embed::text_len).sum::<usize>() <= MAX_MESSAGE_CHARS));
        assert_eq!(batches.iter().map(|b| b.len()).sum::<usize>(), 13);
        assert_eq!(batches[0][0].title.as_deref(), Some("WAR CONFIRMED!"));
    }
}
