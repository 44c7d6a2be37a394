//! Turning configured corporation ids into full [`Corporation`] records.

use tracing::{debug, info};

use crate::config::TrackedCorporation;
use crate::error::WardenResult;
use crate::model::Corporation;
use crate::ports::WarApi;

/// Look up every tracked corporation, keeping configuration order.
///
/// Any failed lookup fails the whole resolution.
pub async fn resolve_tracked(
    api: &dyn WarApi,
    tracked: &[TrackedCorporation],
) -> WardenResult<Vec<Corporation>> {
    let mut corporations = Vec::with_capacity(tracked.len());
    for entry in tracked {
        let mut corporation = api.corporation(entry.corporation_id).await?;
        if let Some(war_eligible) = entry.war_eligible {
            corporation.war_eligible = war_eligible;
        }
        debug!(
            corporation_id = %corporation.corporation_id,
            name = %corporation.name,
            war_eligible = corporation.war_eligible,
            "Resolved tracked corporation"
        );
        corporations.push(corporation);
    }

    info!(
        tracked = corporations.len(),
        eligible = corporations.iter().filter(|c| c.war_eligible).count(),
        "Tracked corporations resolved"
    );
    Ok(corporations)
}
