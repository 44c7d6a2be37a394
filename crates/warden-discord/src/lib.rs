//! Warden Discord transport
//!
//! Renders notification payloads as Discord embeds and posts them to
//! channel webhooks.

pub mod embed;
pub mod notifier;

pub use embed::Embed;
pub use notifier::DiscordNotifier;
