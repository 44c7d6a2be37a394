//! Route handlers.

pub mod health;
pub mod maintenance;
pub mod wars;

use axum::http::StatusCode;
use tracing::error;
use warden_core::WardenError;

/// Handler error: status plus a plain-text message.
pub type ApiError = (StatusCode, String);

pub(crate) fn internal(e: WardenError) -> ApiError {
    error!(error = %e, "Request failed");
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
