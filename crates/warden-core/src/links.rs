//! Icon and permalink helpers.

use crate::model::{AllianceId, CorporationId, Party, WarId};

/// EVE image server.
pub const IMAGE_SERVER_URL: &str = "https://images.evetech.net";

/// Dotlan EveMaps, used for human-facing permalinks.
pub const DOTLAN_URL: &str = "https://evemaps.dotlan.net";

const ICON_SIZE: u32 = 128;

pub fn alliance_icon_url(id: AllianceId) -> String {
    format!("{}/alliances/{}/logo?size={}", IMAGE_SERVER_URL, id, ICON_SIZE)
}

pub fn corporation_icon_url(id: CorporationId) -> String {
    format!("{}/corporations/{}/logo?size={}", IMAGE_SERVER_URL, id, ICON_SIZE)
}

pub fn party_icon_url(party: &Party) -> String {
    match party {
        Party::Alliance(id) => alliance_icon_url(*id),
        Party::Corporation(id) => corporation_icon_url(*id),
    }
}

pub fn party_dotlan_url(party: &Party) -> String {
    match party {
        Party::Alliance(id) => format!("{}/alliance/{}", DOTLAN_URL, id),
        Party::Corporation(id) => format!("{}/corp/{}", DOTLAN_URL, id),
    }
}

pub fn war_dotlan_url(id: WarId) -> String {
    format!("{}/war/{}", DOTLAN_URL, id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_urls() {
        assert_eq!(
            party_icon_url(&Party::Alliance(AllianceId(99_000_001))),
            "https://images.evetech.net/alliances/99000001/logo?size=128"
        );
        assert_eq!(
            party_icon_url(&Party::Corporation(CorporationId(98_000_001))),
            "https://images.evetech.net/corporations/98000001/logo?size=128"
        );
    }

    #[test]
    fn test_dotlan_urls() {
        assert_eq!(
            party_dotlan_url(&Party::Corporation(CorporationId(42))),
            "https://evemaps.dotlan.net/corp/42"
        );
        assert_eq!(war_dotlan_url(WarId(7)), "https://evemaps.dotlan.net/war/7");
    }
}
