use reqwest::Client;
use tracing::{error, info};

use crate::error::{RelayError, Result, UNKNOWN_ERROR};
use crate::request::NotificationRequest;

pub const DEFAULT_ACTION_URL: &str =
    "https://github.integrations.asana.com/custom/v1/actions/comment";

/// What the caller reports back to the workflow after a successful send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub status: u16,
    /// The exact text that was sent.
    pub comment: String,
}

/// Posts notification requests to the Asana integration endpoint.
#[derive(Clone)]
pub struct Dispatcher {
    client: Client,
    action_url: String,
    secret: Option<String>,
}

impl Dispatcher {
    pub fn new(action_url: impl Into<String>, secret: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("asana-relay/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RelayError::unknown(e.to_string()))?;

        Ok(Self::with_client(client, action_url, secret))
    }

    pub fn with_client(client: Client, action_url: impl Into<String>, secret: Option<String>) -> Self {
        Self {
            client,
            action_url: action_url.into(),
            secret,
        }
    }

    pub fn action_url(&self) -> &str {
        &self.action_url
    }

    /// Sends one request. Non-2xx responses and requests that never complete are
    /// [`RelayError::Transport`]; nothing is retried.
    pub async fn dispatch(&self, request: &NotificationRequest) -> Result<DispatchOutcome> {
        info!("Posting comment to {}", self.action_url);

        let mut builder = self.client.post(&self.action_url).json(request);
        if let Some(secret) = &self.secret {
            builder = builder.bearer_auth(secret);
        }

        let response = builder.send().await.map_err(classify_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let detail = match response.text().await {
                Ok(text) if !text.trim().is_empty() => text,
                _ => UNKNOWN_ERROR.to_string(),
            };
            error!("Asana integration request failed: {} - {}", status, detail);
            return Err(RelayError::Transport {
                status: Some(status.as_u16()),
                detail,
            });
        }

        info!("Asana integration responded with {}", status);

        Ok(DispatchOutcome {
            status: status.as_u16(),
            comment: request.comment_text.clone(),
        })
    }
}

fn classify_send_error(err: reqwest::Error) -> RelayError {
    if err.is_builder() {
        return RelayError::unknown(err.to_string());
    }

    let detail = {
        let message = err.to_string();
        if message.trim().is_empty() {
            UNKNOWN_ERROR.to_string()
        } else {
            message
        }
    };
    error!("Asana integration request could not be completed: {}", detail);
    RelayError::Transport {
        status: err.status().map(|s| s.as_u16()),
        detail,
    }
}
