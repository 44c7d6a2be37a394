//! On-demand sync and wipe.
//!
//! Both take the sync gate without waiting: a request that arrives while
//! the scheduler (or another request) holds it gets `409 Conflict`. The
//! work itself runs detached and completes even if the client disconnects.

use axum::{extract::State, http::StatusCode, Json};
use tracing::{info, warn};

use warden_core::maintenance::{self, WipeReport};
use warden_core::{sync, SyncReport, WardenError};

use super::{internal, ApiError};
use crate::state::AppState;

fn busy() -> ApiError {
    (StatusCode::CONFLICT, "A sync or wipe is already running".to_string())
}

pub async fn run_sync(State(state): State<AppState>) -> Result<Json<SyncReport>, ApiError> {
    let guard = state.gate.clone().try_lock_owned().map_err(|_| busy())?;
    info!("Sync requested over HTTP");

    let ctx = state.ctx.clone();
    match sync::detached(guard, async move { sync::run_cycle(&ctx).await }).await {
        Ok(report) => Ok(Json(report)),
        Err(e @ WardenError::CandidateFetch(_)) => {
            warn!(error = %e, "Requested sync aborted");
            Err((StatusCode::BAD_GATEWAY, e.to_string()))
        }
        Err(e) => Err(internal(e)),
    }
}

pub async fn wipe(State(state): State<AppState>) -> Result<Json<WipeReport>, ApiError> {
    let guard = state.gate.clone().try_lock_owned().map_err(|_| busy())?;
    info!("Wipe requested over HTTP");

    let ctx = state.ctx.clone();
    let report = sync::detached(guard, async move { maintenance::wipe(&ctx).await })
        .await
        .map_err(internal)?;
    Ok(Json(report))
}
