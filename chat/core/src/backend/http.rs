//! HTTP Assistant Backend
//!
//! Talks to the Claim Saathi assistant over plain JSON:
//!
//! ```text
//! POST /api/ask-gemini
//! Content-Type: application/json
//!
//! {"prompt": "...", "user_id": "..."}   ->   {"status": "success", "response": "...", "mood": "..."}
//! ```
//!
//! There is no streaming, no retry and (unless configured) no timeout.

use std::time::Duration;

use async_trait::async_trait;

use super::traits::{AskRequest, AskResponse, AssistantBackend, AssistantReply, BackendError};
use crate::config::WidgetConfig;

/// Endpoint used when nothing else is configured
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5005/api/ask-gemini";

/// HTTP assistant client
#[derive(Clone, Debug)]
pub struct HttpAssistant {
    /// Full endpoint URL
    endpoint: String,
    /// HTTP client
    http_client: reqwest::Client,
}

impl HttpAssistant {
    /// Create a client for `endpoint` with an optional request timeout
    ///
    /// # Errors
    ///
    /// Fails if the underlying HTTP client cannot be built.
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self, BackendError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            endpoint: endpoint.into(),
            http_client: builder.build().map_err(BackendError::Client)?,
        })
    }

    /// Create a client from widget configuration
    ///
    /// # Errors
    ///
    /// Fails if the underlying HTTP client cannot be built.
    pub fn from_config(config: &WidgetConfig) -> Result<Self, BackendError> {
        Self::new(config.endpoint.clone(), config.request_timeout)
    }

    /// Endpoint URL
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AssistantBackend for HttpAssistant {
    fn name(&self) -> &'static str {
        "HTTP"
    }

    async fn ask(&self, request: &AskRequest) -> Result<AssistantReply, BackendError> {
        if let Some(ref user_id) = request.user_id {
            tracing::debug!(user_id = %user_id, "Sending request with user ID");
        }

        let response = self
            .http_client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let data: AskResponse = serde_json::from_slice(&body)?;
        tracing::debug!(
            status = %data.status,
            mood = data.mood.as_deref().unwrap_or("-"),
            "API response"
        );

        data.into_reply()
    }
}
