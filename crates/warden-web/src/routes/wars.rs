//! Read-only views of the stored war state.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use warden_core::{CorporationId, LedgerEntry, WarId};

use super::{internal, ApiError};
use crate::state::AppState;

/// Ids with a global war record.
pub async fn list_wars(State(state): State<AppState>) -> Result<Json<Vec<WarId>>, ApiError> {
    let ids = state.ctx.records.record_ids().await.map_err(internal)?;
    Ok(Json(ids))
}

/// Ledger snapshots of one tracked corporation.
pub async fn corporation_wars(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<LedgerEntry>>, ApiError> {
    let corporation_id = CorporationId(id);
    if !state.ctx.corporations.iter().any(|c| c.corporation_id == corporation_id) {
        return Err((StatusCode::NOT_FOUND, format!("Corporation {} is not tracked", id)));
    }

    let entries = state.ctx.ledger.entries(corporation_id).await.map_err(internal)?;
    Ok(Json(entries))
}
