//! Response Fetcher
//!
//! Wraps an [`AssistantBackend`] so that every question produces something
//! to show. Whatever goes wrong (connection refused, 500, garbage JSON, a
//! non-success status) the user gets the same apology and a confused
//! avatar; the widget never sees an error.

use std::sync::Arc;

use super::traits::{AskRequest, AssistantBackend, AssistantReply};
use crate::identity::UserId;
use crate::mood::Mood;

/// Text shown when the assistant cannot be reached
pub const FALLBACK_REPLY: &str =
    "I'm having trouble connecting right now. Please try again in a moment.";

/// Mood shown alongside [`FALLBACK_REPLY`]
pub const FALLBACK_MOOD: Mood = Mood::Confused;

/// Infallible front for an assistant backend
pub struct ResponseFetcher<B: AssistantBackend> {
    backend: Arc<B>,
}

impl<B: AssistantBackend> Clone for ResponseFetcher<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
        }
    }
}

impl<B: AssistantBackend> ResponseFetcher<B> {
    /// Wrap a backend
    pub fn new(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Wrap an already shared backend
    pub fn from_arc(backend: Arc<B>) -> Self {
        Self { backend }
    }

    /// The wrapped backend
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The reply used for every failure
    #[must_use]
    pub fn fallback() -> AssistantReply {
        AssistantReply::new(FALLBACK_REPLY, FALLBACK_MOOD)
    }

    /// Ask the assistant, mapping any failure to [`Self::fallback`]
    pub async fn generate_response(
        &self,
        prompt: &str,
        user_id: Option<&UserId>,
    ) -> AssistantReply {
        let request = AskRequest::new(prompt).with_user_id(user_id.cloned());

        match self.backend.ask(&request).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(
                    backend = self.backend.name(),
                    error = %e,
                    "Error generating response"
                );
                Self::fallback()
            }
        }
    }
}
