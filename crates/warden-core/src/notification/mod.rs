//! Notification compilation.
//!
//! Turns a war snapshot into the payload handed to the transport. Every
//! party name is resolved (once per party) before the payload is built,
//! and any failed lookup fails the whole payload.

pub mod payload;

use std::collections::HashMap;

use chrono::{DateTime, Utc};

pub use payload::{Author, Color, Field, NotificationPayload};

use crate::error::{WardenError, WardenResult};
use crate::involvement::{self, Side};
use crate::links;
use crate::model::{Corporation, Party, War};
use crate::ports::WarApi;

/// Zero-width space; Discord rejects empty field values.
const BLANK: &str = "\u{200B}";

/// Why a notification is being sent.
#[derive(Debug, Clone, Copy)]
pub enum MessageKind<'a> {
    /// First time this corporation hears about the war.
    New,
    /// A known war changed; `previous` is the snapshot being replaced.
    Updated { previous: &'a War },
    /// The war is over.
    Finished,
}

/// Build the notification for `war` from `corporation`'s point of view.
pub async fn compile(
    api: &dyn WarApi,
    war: &War,
    corporation: &Corporation,
    kind: MessageKind<'_>,
) -> WardenResult<NotificationPayload> {
    let mut names = NameResolver::new(api);
    let aggressor = names.link(&war.aggressor).await?;
    let defender = names.link(&war.defender).await?;
    let mut allies = Vec::with_capacity(war.allies.len());
    for ally in &war.allies {
        allies.push(names.name(ally).await?);
    }

    let thumbnail_url = match involvement::side(war, corporation) {
        Side::Aggressor => links::party_icon_url(&war.defender),
        Side::Defender | Side::NotInvolved => links::party_icon_url(&war.aggressor),
    };

    let mut fields = Vec::new();
    if !allies.is_empty() {
        fields.push(Field::new(format!("Allies with {}:", defender), BLANK));
        for (index, name) in allies.into_iter().enumerate() {
            fields.push(Field::new(format!("Ally {}", index + 1), name));
        }
    }

    let (title, color, description) = match kind {
        MessageKind::New => {
            if let Some(started) = war.started {
                fields.push(Field::new("Starts at:", format_date(started)));
            }
            let description = format!("{} have declared war to {}.", aggressor, defender);
            if involvement::side(war, corporation) == Side::Aggressor {
                ("WAR CONFIRMED!", Color::Aggressive, description)
            } else {
                ("WAR DEC'ed!", Color::Caution, description)
            }
        }
        MessageKind::Finished => {
            let finished = war.finished.map(format_date).unwrap_or_else(|| "unknown".to_string());
            let description = format!(
                "The war between {} and {} has ended. Finished at: {}",
                aggressor, defender, finished
            );
            ("WAR IS OVER!", Color::Success, description)
        }
        MessageKind::Updated { previous } => {
            fields.extend(update_fields(previous, war));
            let description =
                format!("The war between {} and {} has been updated.", aggressor, defender);
            ("WAR UPDATE!", Color::Caution, description)
        }
    };

    fields.push(Field::new("Dotlan.net:", links::war_dotlan_url(war.id)));

    Ok(NotificationPayload {
        author: Author {
            name: corporation.name.clone(),
            icon_url: links::corporation_icon_url(corporation.corporation_id),
        },
        title: title.to_string(),
        description,
        color,
        thumbnail_url,
        footer: "Declared:".to_string(),
        timestamp: war.declared,
        fields,
    })
}

/// Fields explaining what moved between two snapshots.
fn update_fields(previous: &War, current: &War) -> Vec<Field> {
    let mut fields = Vec::new();
    if current.open_for_allies != previous.open_for_allies {
        fields.push(Field::new("Open for Allies now:", current.open_for_allies.to_string()));
    }
    if current.retracted != previous.retracted {
        fields.push(Field::new(
            "War retracted changed:",
            format!(
                "Was: {}, now: {}",
                format_optional_date(previous.retracted),
                format_optional_date(current.retracted)
            ),
        ));
    }
    if current.started != previous.started {
        fields.push(Field::new("War has started:", format_optional_date(current.started)));
    }
    fields
}

/// `Monday, October 19, 2026`
pub fn format_date(value: DateTime<Utc>) -> String {
    value.format("%A, %B %-d, %Y").to_string()
}

fn format_optional_date(value: Option<DateTime<Utc>>) -> String {
    value.map(format_date).unwrap_or_else(|| "unset".to_string())
}

/// Per-compilation name cache so each party is looked up once.
struct NameResolver<'a> {
    api: &'a dyn WarApi,
    cache: HashMap<Party, String>,
}

impl<'a> NameResolver<'a> {
    fn new(api: &'a dyn WarApi) -> Self {
        Self { api, cache: HashMap::new() }
    }

    async fn name(&mut self, party: &Party) -> WardenResult<String> {
        if let Some(name) = self.cache.get(party) {
            return Ok(name.clone());
        }
        let looked_up = match party {
            Party::Alliance(id) => self.api.alliance_name(*id).await,
            Party::Corporation(id) => self.api.corporation_name(*id).await,
        };
        let name = looked_up.map_err(|e| WardenError::Resolution {
            party: *party,
            source: Box::new(e),
        })?;
        self.cache.insert(*party, name.clone());
        Ok(name)
    }

    /// Bold markdown link to the party's dotlan page.
    async fn link(&mut self, party: &Party) -> WardenResult<String> {
        let name = self.name(party).await?;
        Ok(format!("**[{}]({})**", name, links::party_dotlan_url(party)))
    }
}
