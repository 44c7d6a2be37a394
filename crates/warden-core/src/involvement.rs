//! Involvement classification: is a corporation party to a war, and on
//! which side.
//!
//! A corporation in an alliance is matched only by its alliance; a
//! corporation without one only by its own id. Allies are treated as
//! fighting for the defender.

use serde::Serialize;

use crate::model::{Corporation, War};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Aggressor,
    Defender,
    NotInvolved,
}

pub fn side(war: &War, corporation: &Corporation) -> Side {
    let us = corporation.as_party();
    if war.aggressor == us {
        Side::Aggressor
    } else if war.defender == us || war.allies.contains(&us) {
        Side::Defender
    } else {
        Side::NotInvolved
    }
}

pub fn is_involved(war: &War, corporation: &Corporation) -> bool {
    side(war, corporation) != Side::NotInvolved
}
