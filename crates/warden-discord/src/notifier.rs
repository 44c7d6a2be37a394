//! Webhook fan-out.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use warden_core::ports::Notifier;
use warden_core::{Channel, NotificationPayload, WardenError, WardenResult};

use crate::embed::{batches, render, WebhookMessage};

/// Posts embeds to Discord webhooks. A failing channel is logged and
/// skipped; the remaining channels still receive the message.
#[derive(Clone)]
pub struct DiscordNotifier {
    client: reqwest::Client,
}

impl DiscordNotifier {
    pub fn new() -> WardenResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| WardenError::config(format!("cannot build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    async fn post(&self, channel: &Channel, message: &WebhookMessage<'_>) {
        match self.client.post(&channel.webhook_url).json(message).send().await {
            Ok(response) => {
                if response.status().is_success() {
                    debug!(channel = %channel.name, "Webhook message delivered");
                } else {
                    warn!(
                        channel = %channel.name,
                        status_code = %response.status(),
                        "Webhook rejected message"
                    );
                }
            }
            Err(e) => {
                // reqwest errors carry the URL, which holds the webhook token.
                warn!(
                    channel = %channel.name,
                    error = %e.without_url(),
                    "Failed to deliver webhook message"
                );
            }
        }
    }
}

#[async_trait]
impl Notifier for DiscordNotifier {
    async fn dispatch(&self, channels: &[Channel], payload: &NotificationPayload) {
        let embeds = render(payload);
        let messages: Vec<WebhookMessage<'_>> =
            batches(&embeds).into_iter().map(|embeds| WebhookMessage { embeds }).collect();
        for channel in channels {
            for message in &messages {
                self.post(channel, message).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use warden_core::notification::{Author, Color, Field};
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn payload() -> NotificationPayload {
        NotificationPayload {
            author: Author { name: "Garbage Collectors".to_string(), icon_url: String::new() },
            title: "WAR IS OVER!".to_string(),
            description: "It is done.".to_string(),
            color: Color::Success,
            thumbnail_url: String::new(),
            footer: "Declared:".to_string(),
            timestamp: Utc.with_ymd_and_hms(2026, 10, 1, 12, 0, 0).unwrap(),
            fields: Vec::new(),
        }
    }

    fn channel(server: &MockServer, name: &str) -> Channel {
        Channel {
            name: name.to_string(),
            webhook_url: format!("{}/api/webhooks/{}", server.uri(), name),
        }
    }

    #[test]
    fn test_client_builds_with_timeout() {
        assert!(DiscordNotifier::new().is_ok());
    }

    #[tokio::test]
    async fn test_posts_embed_to_every_channel() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(serde_json::json!({
                "embeds": [{ "title": "WAR IS OVER!", "color": 0x2ECC71 }]
            })))
            .respond_with(ResponseTemplate::new(204))
            .expect(2)
            .mount(&server)
            .await;

        DiscordNotifier::new()
            .unwrap()
            .dispatch(&[channel(&server, "a"), channel(&server, "b")], &payload())
            .await;
    }

    #[tokio::test]
    async fn test_failing_channel_does_not_stop_the_rest() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/webhooks/broken"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/webhooks/ok"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        let unreachable = Channel {
            name: "gone".to_string(),
            webhook_url: "http://127.0.0.1:1/api/webhooks/gone".to_string(),
        };

        DiscordNotifier::new()
            .unwrap()
            .dispatch(
                &[channel(&server, "broken"), unreachable, channel(&server, "ok")],
                &payload(),
            )
            .await;
    }

    #[tokio::test]
    async fn test_many_allies_post_within_field_limit() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/webhooks/allies"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        let mut payload = payload();
        payload.fields = (0..40).map(|i| Field::new("Ally:", format!("Ally {}", i))).collect();

        DiscordNotifier::new()
            .unwrap()
            .dispatch(&[channel(&server, "allies")], &payload)
            .await;

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        let embeds = body["embeds"].as_array().unwrap();
        assert_eq!(embeds.len(), 2);
        assert_eq!(embeds[0]["fields"].as_array().unwrap().len(), 25);
        assert_eq!(embeds[1]["fields"].as_array().unwrap().len(), 15);
        assert_eq!(embeds[1]["fields"][14]["value"], "Ally 39");
    }
}
