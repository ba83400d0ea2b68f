//! src/sms_client.rs

use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};

use crate::domain::PhoneNumber;

#[derive(thiserror::Error, Debug)]
pub enum SendError {
    #[error("failed to reach the SMS gateway")]
    Transport(#[source] reqwest::Error),
    #[error("the SMS gateway rejected the request ({status}): {message}")]
    Gateway { status: StatusCode, message: String },
}

/// Client for the SMS gateway's REST API.
pub struct SmsClient {
    http_client: Client,
    base_url: String,
    access_key: Secret<String>,
    originator: String,
}

#[derive(serde::Serialize)]
struct SendMessageRequest<'a> {
    originator: &'a str,
    recipients: Vec<&'a str>,
    body: &'a str,
}

/// Error payload shape of the gateway: zero or more structured entries.
#[derive(serde::Deserialize, Default)]
struct GatewayErrorResponse {
    #[serde(default)]
    errors: Vec<GatewayError>,
}

#[derive(serde::Deserialize)]
struct GatewayError {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    description: String,
    #[serde(default)]
    parameter: Option<String>,
}

impl SmsClient {
    pub fn new(
        base_url: String,
        access_key: Secret<String>,
        originator: String,
        timeout: std::time::Duration,
    ) -> Self {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build the HTTP client for the SMS gateway");
        Self {
            http_client,
            base_url,
            access_key,
            originator,
        }
    }

    /// The default sender identity for broadcasts and confirmations.
    pub fn originator(&self) -> &str {
        &self.originator
    }

    /// Deliver `body` from `originator` to every number in `recipients` with a
    /// single gateway call.
    ///
    /// An empty recipient list is still submitted; the gateway decides what a
    /// broadcast to nobody means. All error entries in a rejection are folded
    /// into one `SendError::Gateway`.
    #[tracing::instrument(name = "Sending an SMS via the gateway", skip(self, body))]
    pub async fn send(
        &self,
        originator: &str,
        recipients: &[PhoneNumber],
        body: &str,
    ) -> Result<(), SendError> {
        let url = format!("{}/messages", self.base_url);
        let request_body = SendMessageRequest {
            originator,
            recipients: recipients.iter().map(AsRef::as_ref).collect(),
            body,
        };
        let response = self
            .http_client
            .post(&url)
            .header(
                "Authorization",
                format!("AccessKey {}", self.access_key.expose_secret()),
            )
            .json(&request_body)
            .send()
            .await
            .map_err(SendError::Transport)?;

        let status = response.status();
        if status.is_success() {
            tracing::info!(
                status = %status,
                recipient_count = recipients.len(),
                "SMS gateway accepted the message"
            );
            Ok(())
        } else {
            let payload: GatewayErrorResponse = response.json().await.unwrap_or_default();
            Err(SendError::Gateway {
                status,
                message: aggregate_error_entries(&payload),
            })
        }
    }
}

fn aggregate_error_entries(payload: &GatewayErrorResponse) -> String {
    if payload.errors.is_empty() {
        return "no error details provided".into();
    }
    payload
        .errors
        .iter()
        .map(|e| match &e.parameter {
            Some(parameter) => format!("[{}] {} (parameter: {})", e.code, e.description, parameter),
            None => format!("[{}] {}", e.code, e.description),
        })
        .collect::<Vec<_>>()
        .join("; ")
}
