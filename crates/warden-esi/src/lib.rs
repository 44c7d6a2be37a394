//! Warden ESI client
//!
//! Read-only access to the EVE Swagger Interface endpoints the war sync
//! needs: the war list, war details, and alliance/corporation sheets.

pub mod client;
mod response;

pub use client::EsiClient;
