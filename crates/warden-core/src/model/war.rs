//! War domain model.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use warden_redis::wars::{PartyRow, WarRow};

use crate::error::{WardenError, WardenResult};

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Upstream war id.
    WarId
);
entity_id!(
    /// Upstream alliance id.
    AllianceId
);
entity_id!(
    /// Upstream corporation id.
    CorporationId
);

/// One side of a war, or one ally. A party is keyed either by alliance
/// or by corporation, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Party {
    Alliance(AllianceId),
    Corporation(CorporationId),
}

impl Party {
    /// Build a party from the optional id pair upstream records carry.
    /// The alliance id wins when both are present.
    pub fn from_ids(alliance_id: Option<i32>, corporation_id: Option<i32>) -> Option<Self> {
        match (alliance_id, corporation_id) {
            (Some(id), _) => Some(Self::Alliance(AllianceId(id))),
            (None, Some(id)) => Some(Self::Corporation(CorporationId(id))),
            (None, None) => None,
        }
    }

    fn from_row(row: &PartyRow) -> WardenResult<Self> {
        Self::from_ids(row.alliance_id, row.corporation_id)
            .ok_or_else(|| WardenError::malformed("party without alliance or corporation id"))
    }

    fn to_row(self) -> PartyRow {
        match self {
            Self::Alliance(id) => PartyRow { alliance_id: Some(id.0), corporation_id: None },
            Self::Corporation(id) => PartyRow { alliance_id: None, corporation_id: Some(id.0) },
        }
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alliance(id) => write!(f, "alliance {}", id),
            Self::Corporation(id) => write!(f, "corporation {}", id),
        }
    }
}

/// A war snapshot as reported upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct War {
    pub id: WarId,
    pub aggressor: Party,
    pub defender: Party,
    pub allies: Vec<Party>,
    pub declared: DateTime<Utc>,
    pub started: Option<DateTime<Utc>>,
    pub retracted: Option<DateTime<Utc>>,
    pub finished: Option<DateTime<Utc>>,
    pub mutual: bool,
    pub open_for_allies: bool,
}

impl War {
    /// Whether the war had ended at `now`. A finish date in the future
    /// (retracted wars wind down for a day) does not count yet.
    pub fn is_finished_at(&self, now: DateTime<Utc>) -> bool {
        self.finished.is_some_and(|finished| finished <= now)
    }

    /// Aggressor, defender, then allies in upstream order.
    pub fn parties(&self) -> impl Iterator<Item = &Party> {
        [&self.aggressor, &self.defender].into_iter().chain(self.allies.iter())
    }

    /// Create a War from a stored row.
    pub fn from_row(row: WarRow) -> WardenResult<Self> {
        Ok(Self {
            id: WarId(row.id),
            aggressor: Party::from_row(&row.aggressor)?,
            defender: Party::from_row(&row.defender)?,
            allies: row.allies.iter().map(Party::from_row).collect::<WardenResult<_>>()?,
            declared: parse_timestamp(&row.declared)?,
            started: row.started.as_deref().map(parse_timestamp).transpose()?,
            retracted: row.retracted.as_deref().map(parse_timestamp).transpose()?,
            finished: row.finished.as_deref().map(parse_timestamp).transpose()?,
            mutual: row.mutual,
            open_for_allies: row.open_for_allies,
        })
    }

    pub fn to_row(&self) -> WarRow {
        WarRow {
            id: self.id.0,
            aggressor: self.aggressor.to_row(),
            defender: self.defender.to_row(),
            allies: self.allies.iter().map(|ally| ally.to_row()).collect(),
            declared: self.declared.to_rfc3339(),
            started: self.started.map(|t| t.to_rfc3339()),
            retracted: self.retracted.map(|t| t.to_rfc3339()),
            finished: self.finished.map(|t| t.to_rfc3339()),
            mutual: self.mutual,
            open_for_allies: self.open_for_allies,
        }
    }
}

pub(crate) fn parse_timestamp(value: &str) -> WardenResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| WardenError::malformed(format!("bad timestamp '{}': {}", value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> WarRow {
        WarRow {
            id: 615_000,
            aggressor: PartyRow { alliance_id: Some(99_000_001), corporation_id: Some(98_000_001) },
            defender: PartyRow { alliance_id: None, corporation_id: Some(98_000_002) },
            allies: vec![PartyRow { alliance_id: None, corporation_id: Some(98_000_003) }],
            declared: "2026-10-01T12:00:00Z".to_string(),
            started: Some("2026-10-02T12:00:00Z".to_string()),
            retracted: None,
            finished: None,
            mutual: false,
            open_for_allies: true,
        }
    }

    #[test]
    fn test_from_row_prefers_alliance() {
        let war = War::from_row(row()).unwrap();
        assert_eq!(war.aggressor, Party::Alliance(AllianceId(99_000_001)));
        assert_eq!(war.defender, Party::Corporation(CorporationId(98_000_002)));
        assert_eq!(war.allies.len(), 1);
        assert!(war.started.is_some());
    }

    #[test]
    fn test_row_conversion_keeps_content() {
        let war = War::from_row(row()).unwrap();
        let again = War::from_row(war.to_row()).unwrap();
        assert_eq!(war, again);
    }

    #[test]
    fn test_party_without_ids_is_malformed() {
        let mut bad = row();
        bad.defender = PartyRow { alliance_id: None, corporation_id: None };
        let err = War::from_row(bad).unwrap_err();
        assert!(matches!(err, WardenError::Malformed(_)));
    }

    #[test]
    fn test_bad_timestamp_is_malformed() {
        let mut bad = row();
        bad.declared = "yesterday".to_string();
        assert!(matches!(War::from_row(bad), Err(WardenError::Malformed(_))));
    }

    #[test]
    fn test_finished_in_future_is_not_finished() {
        let mut war = War::from_row(row()).unwrap();
        let now = parse_timestamp("2026-10-10T00:00:00Z").unwrap();
        war.finished = Some(parse_timestamp("2026-10-11T00:00:00Z").unwrap());
        assert!(!war.is_finished_at(now));
        war.finished = Some(parse_timestamp("2026-10-09T00:00:00Z").unwrap());
        assert!(war.is_finished_at(now));
    }
}
