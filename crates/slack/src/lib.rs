//! Minimal Slack Web API client.
//!
//! Covers the two calls the workspace bootstrap needs: creating a channel
//! and setting its topic. Slack wraps every response in an `ok`/`error`
//! envelope, so HTTP status alone is not enough; the envelope is surfaced
//! as a typed [`SlackError`] so callers can treat `name_taken` as a benign
//! already-exists condition.

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

/// Slack Web API endpoint
const SLACK_API_URL: &str = "https://slack.com/api";

/// Error from a Slack Web API call.
#[derive(Debug, Error)]
pub enum SlackError {
    /// The channel name is already in use.
    #[error("channel name already taken")]
    NameTaken,
    /// Any other API-level error (the `error` field of the envelope).
    #[error("Slack API error: {0}")]
    Api(String),
    /// Transport or status-level failure.
    #[error("Slack request failed: {0}")]
    Http(String),
}

/// A Slack channel as returned by `conversations.create`.
#[derive(Debug, Clone, Deserialize)]
pub struct Channel {
    /// Unique identifier (e.g., "C0123456789")
    pub id: String,
    /// Channel name without the leading '#'
    pub name: String,
}

#[derive(Debug, Serialize)]
struct CreateChannelRequest<'a> {
    name: &'a str,
}

#[derive(Debug, Serialize)]
struct SetTopicRequest<'a> {
    channel: &'a str,
    topic: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChannelPayload {
    channel: Channel,
}

/// Slack Web API client
#[derive(Debug, Clone)]
pub struct SlackClient {
    client: reqwest::Client,
    base_url: String,
}

impl SlackClient {
    /// Create a new Slack client with a bot token.
    ///
    /// # Errors
    /// Returns error if headers cannot be constructed.
    pub fn new(token: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).context("Invalid Slack token")?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: SLACK_API_URL.to_string(),
        })
    }

    /// Create a client against a custom base URL (for tests).
    ///
    /// # Errors
    /// Returns error if headers cannot be constructed.
    pub fn with_base_url(token: &str, base_url: &str) -> Result<Self> {
        let mut client = Self::new(token)?;
        client.base_url = base_url.trim_end_matches('/').to_string();
        Ok(client)
    }

    async fn post<B: Serialize, T: serde::de::DeserializeOwned>(
        &self,
        api_method: &str,
        body: &B,
    ) -> Result<T, SlackError> {
        let response = self
            .client
            .post(format!("{}/{api_method}", self.base_url))
            .json(body)
            .send()
            .await
            .map_err(|e| SlackError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SlackError::Http(format!("{status}: {body}")));
        }

        // Slack reports failures inside a 200 response, so check the
        // `ok`/`error` envelope before decoding the payload.
        let value: serde_json::Value = response
            .json()
            .await
            .map_err(|e| SlackError::Http(e.to_string()))?;

        if !value.get("ok").and_then(serde_json::Value::as_bool).unwrap_or(false) {
            return Err(match value.get("error").and_then(serde_json::Value::as_str) {
                Some("name_taken") => SlackError::NameTaken,
                Some(other) => SlackError::Api(other.to_string()),
                None => SlackError::Api("unknown error".to_string()),
            });
        }
        serde_json::from_value(value).map_err(|e| SlackError::Http(e.to_string()))
    }

    /// Create a public channel.
    ///
    /// # Errors
    /// Returns [`SlackError::NameTaken`] when a channel with that name
    /// already exists.
    #[instrument(skip(self), fields(name = %name))]
    pub async fn create_channel(&self, name: &str) -> Result<Channel, SlackError> {
        let payload: ChannelPayload = self
            .post("conversations.create", &CreateChannelRequest { name })
            .await?;
        debug!("Created channel: {} ({})", payload.channel.name, payload.channel.id);
        Ok(payload.channel)
    }

    /// Set the topic of a channel.
    #[instrument(skip(self, topic), fields(channel = %channel_id))]
    pub async fn set_topic(&self, channel_id: &str, topic: &str) -> Result<(), SlackError> {
        let _: serde_json::Value = self
            .post(
                "conversations.setTopic",
                &SetTopicRequest {
                    channel: channel_id,
                    topic,
                },
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn create_channel_parses_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/conversations.create"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ok": true,
                "channel": { "id": "C123", "name": "standup" },
            })))
            .mount(&server)
            .await;

        let client = SlackClient::with_base_url("xoxb-test", &server.uri()).unwrap();
        let channel = client.create_channel("standup").await.unwrap();
        assert_eq!(channel.id, "C123");
        assert_eq!(channel.name, "standup");
    }

    #[tokio::test]
    async fn name_taken_maps_to_typed_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/conversations.create"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "ok": false, "error": "name_taken" })),
            )
            .mount(&server)
            .await;

        let client = SlackClient::with_base_url("xoxb-test", &server.uri()).unwrap();
        let err = client.create_channel("standup").await.unwrap_err();
        assert!(matches!(err, SlackError::NameTaken));
    }

    #[tokio::test]
    async fn api_error_surfaces_error_string() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/conversations.setTopic"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "ok": false, "error": "channel_not_found" })),
            )
            .mount(&server)
            .await;

        let client = SlackClient::with_base_url("xoxb-test", &server.uri()).unwrap();
        let err = client.set_topic("C999", "topic").await.unwrap_err();
        assert!(err.to_string().contains("channel_not_found"));
    }
}
