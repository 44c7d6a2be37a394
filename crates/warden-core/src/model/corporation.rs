//! Tracked corporations and the channels they notify.

use serde::{Deserialize, Serialize};

use super::war::{AllianceId, CorporationId, Party};

/// A corporation whose wars are watched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corporation {
    pub corporation_id: CorporationId,
    pub alliance_id: Option<AllianceId>,
    pub name: String,
    pub war_eligible: bool,
}

impl Corporation {
    /// The party this corporation shows up as in a war. Alliance members
    /// fight as their alliance.
    pub fn as_party(&self) -> Party {
        match self.alliance_id {
            Some(alliance_id) => Party::Alliance(alliance_id),
            None => Party::Corporation(self.corporation_id),
        }
    }
}

/// A subscriber channel (a Discord webhook).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub name: String,
    pub webhook_url: String,
}

impl std::fmt::Debug for Channel {
    // Webhook URLs embed their secret token.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Channel").field("name", &self.name).finish_non_exhaustive()
    }
}
