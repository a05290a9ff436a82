//! Assistant Backend Abstraction
//!
//! This module provides the interface to the remote assistant:
//!
//! - [`AssistantBackend`]: trait for anything that can answer a prompt
//! - [`HttpAssistant`]: JSON-over-HTTP implementation
//! - [`ResponseFetcher`]: infallible wrapper that maps failures to a fallback reply

mod fetcher;
mod http;
mod traits;

pub use fetcher::{ResponseFetcher, FALLBACK_MOOD, FALLBACK_REPLY};
pub use http::{HttpAssistant, DEFAULT_ENDPOINT};
pub use traits::{
    AskRequest, AskResponse, AssistantBackend, AssistantReply, BackendError, STATUS_SUCCESS,
};
