//! Transport-neutral notification payload.
//!
//! Transports render this shape into their own schema (Discord embeds)
//! and must keep every part of it: title, description, color, thumbnail,
//! timestamp, author, footer and the ordered field list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Framing color of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    /// We declared the war.
    Aggressive,
    /// Something happened to us, or a war changed.
    Caution,
    /// The war is over.
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub icon_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub label: String,
    pub value: String,
}

impl Field {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self { label: label.into(), value: value.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub author: Author,
    pub title: String,
    pub description: String,
    pub color: Color,
    pub thumbnail_url: String,
    pub footer: String,
    pub timestamp: DateTime<Utc>,
    pub fields: Vec<Field>,
}

impl NotificationPayload {
    /// First field with the given label.
    pub fn field(&self, label: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.label == label)
    }
}
