//! Application state.

use std::sync::Arc;

use warden_core::{SyncContext, SyncGate};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub ctx: Arc<SyncContext>,
    /// Held while a cycle or wipe runs. Shared with the scheduler.
    pub gate: SyncGate,
}

impl AppState {
    pub fn new(ctx: Arc<SyncContext>, gate: SyncGate) -> Self {
        Self { ctx, gate }
    }
}
