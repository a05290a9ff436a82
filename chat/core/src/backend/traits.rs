//! Assistant Backend Traits
//!
//! The assistant is a remote service that answers one prompt at a time and
//! tags each answer with a mood. [`AssistantBackend`] is the seam between
//! the widget and that service so tests (and alternative transports) can
//! stand in for the real HTTP endpoint.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::identity::UserId;
use crate::mood::Mood;

/// Value of `status` in a successful response body
pub const STATUS_SUCCESS: &str = "success";

/// Request body sent to the assistant
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AskRequest {
    /// The user's prompt, as typed
    pub prompt: String,
    /// Signed-in user, omitted from the body when unknown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
}

impl AskRequest {
    /// Create a request for a prompt
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            user_id: None,
        }
    }

    /// Attach an optional user id
    #[must_use]
    pub fn with_user_id(mut self, user_id: Option<UserId>) -> Self {
        self.user_id = user_id;
        self
    }
}

/// Response body returned by the assistant
#[derive(Clone, Debug, Deserialize)]
pub struct AskResponse {
    /// `"success"` or anything else
    pub status: String,
    /// Reply text
    #[serde(default)]
    pub response: Option<String>,
    /// Optional mood tag
    #[serde(default)]
    pub mood: Option<String>,
}

impl AskResponse {
    /// Convert a decoded body into a reply
    ///
    /// # Errors
    ///
    /// Fails if the status is not `"success"` or the reply text is missing.
    pub fn into_reply(self) -> Result<AssistantReply, BackendError> {
        if self.status != STATUS_SUCCESS {
            return Err(BackendError::Unsuccessful(self.status));
        }
        let content = self.response.ok_or(BackendError::MissingResponse)?;
        Ok(AssistantReply {
            content,
            mood: Mood::from_tag(self.mood.as_deref()),
        })
    }
}

/// A reply ready for display
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssistantReply {
    /// Text to show in the bubble
    pub content: String,
    /// Avatar mood
    pub mood: Mood,
}

impl AssistantReply {
    /// Create a reply
    pub fn new(content: impl Into<String>, mood: Mood) -> Self {
        Self {
            content: content.into(),
            mood,
        }
    }
}

/// Errors talking to the assistant
#[derive(Debug, Error)]
pub enum BackendError {
    /// HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Request never completed (connect, DNS, timeout, body read)
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx status
    #[error("API call failed with status: {0}")]
    Status(u16),

    /// Body was not the expected JSON shape
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Body reported a non-success status
    #[error("API response was not successful (status {0:?})")]
    Unsuccessful(String),

    /// Success body without reply text
    #[error("API response is missing the reply text")]
    MissingResponse,
}

/// Assistant backend trait
#[async_trait]
pub trait AssistantBackend: Send + Sync {
    /// Backend name for logs
    fn name(&self) -> &str;

    /// Ask one question and wait for the full reply
    async fn ask(&self, request: &AskRequest) -> Result<AssistantReply, BackendError>;
}
