//! Chat Core - Headless Claim Saathi Chat Widget
//!
//! This crate holds everything about the Claim Saathi chat widget that is not
//! drawing: the widget state, the transcript, user identity resolution and
//! the client for the remote assistant.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     UI Surface (TUI)                     │
//! │        keys ──► WidgetEvent        render ◄── state      │
//! └──────────────────────┬───────────────────────▲───────────┘
//!                        │                       │
//! ┌──────────────────────▼───────────────────────┴───────────┐
//! │                       ChatWidget                         │
//! │  open / expanded / draft / typing / transcript / user id │
//! │                        │      ▲                          │
//! │               spawn    │      │  mpsc reply              │
//! │                        ▼      │                          │
//! │   ResponseFetcher ──► AssistantBackend (HttpAssistant)   │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! # Module Overview
//!
//! - [`widget`]: [`ChatWidget`], the state holder and send handler
//! - [`events`]: [`WidgetEvent`], input from surfaces
//! - [`message`]: transcript entries and ids
//! - [`mood`]: avatar moods
//! - [`identity`]: user id resolution from auth context or storage
//! - [`storage`]: client-side session storage
//! - [`backend`]: assistant backend trait, HTTP client and fallback fetcher
//! - [`config`]: layered TOML / env / CLI configuration
//!
//! # No TUI Dependencies
//!
//! This crate has no dependency on ratatui, crossterm, or any other UI
//! framework.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod backend;
pub mod config;
pub mod events;
pub mod identity;
pub mod message;
pub mod mood;
pub mod storage;
pub mod widget;

pub use backend::{
    AskRequest, AskResponse, AssistantBackend, AssistantReply, BackendError, HttpAssistant,
    ResponseFetcher, DEFAULT_ENDPOINT, FALLBACK_MOOD, FALLBACK_REPLY,
};
pub use config::{
    default_config_path, default_log_path, load_config, load_config_from_path, ConfigError,
    ConfigOverrides, ConfigSource, WidgetConfig,
};
pub use events::WidgetEvent;
pub use identity::{resolve_user_id, AuthContext, IdentityError, UserId, USER_DATA_KEY};
pub use message::{ChatMessage, MessageId, Sender, GREETING};
pub use mood::Mood;
pub use storage::{JsonFileStorage, MemoryStorage, SessionStorage, StorageError};
pub use widget::ChatWidget;
