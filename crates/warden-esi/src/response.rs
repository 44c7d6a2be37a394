//! Wire shapes of the ESI responses and their conversion into domain types.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use warden_core::{AllianceId, Corporation, CorporationId, Party, War, WarId, WardenError, WardenResult};

#[derive(Debug, Deserialize)]
pub(crate) struct WarParty {
    pub alliance_id: Option<i32>,
    pub corporation_id: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WarResponse {
    pub id: i32,
    pub aggressor: WarParty,
    pub defender: WarParty,
    #[serde(default)]
    pub allies: Vec<WarParty>,
    pub declared: DateTime<Utc>,
    pub started: Option<DateTime<Utc>>,
    pub retracted: Option<DateTime<Utc>>,
    pub finished: Option<DateTime<Utc>>,
    #[serde(default)]
    pub mutual: bool,
    #[serde(default)]
    pub open_for_allies: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NamedResponse {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CorporationResponse {
    pub name: String,
    pub alliance_id: Option<i32>,
    #[serde(default)]
    pub war_eligible: Option<bool>,
}

fn party(war_id: i32, role: &str, wire: WarParty) -> WardenResult<Party> {
    Party::from_ids(wire.alliance_id, wire.corporation_id).ok_or_else(|| {
        WardenError::malformed(format!("war {} has a {} without alliance or corporation", war_id, role))
    })
}

impl WarResponse {
    pub(crate) fn into_war(self) -> WardenResult<War> {
        let id = self.id;
        let allies = self
            .allies
            .into_iter()
            .map(|ally| party(id, "ally", ally))
            .collect::<WardenResult<Vec<_>>>()?;

        Ok(War {
            id: WarId(id),
            aggressor: party(id, "aggressor", self.aggressor)?,
            defender: party(id, "defender", self.defender)?,
            allies,
            declared: self.declared,
            started: self.started,
            retracted: self.retracted,
            finished: self.finished,
            mutual: self.mutual,
            open_for_allies: self.open_for_allies,
        })
    }
}

impl CorporationResponse {
    /// ESI omits `war_eligible` for corporations that cannot be at war.
    pub(crate) fn into_corporation(self, corporation_id: CorporationId) -> Corporation {
        Corporation {
            corporation_id,
            alliance_id: self.alliance_id.map(AllianceId),
            name: self.name,
            war_eligible: self.war_eligible.unwrap_or(false),
        }
    }
}
