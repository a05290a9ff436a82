//! Claim Saathi TUI - Terminal surface for the chat widget
//!
//! Renders the headless `chat_core::ChatWidget` as a floating widget in the
//! bottom-right corner of the terminal: a launcher button when closed, the
//! chat panel when open.
//!
//! # Architecture
//!
//! - **App**: event loop, key mapping, reply polling
//! - **Widgets**: launcher, panel and transcript, drawn straight into a
//!   ratatui `Buffer`
//! - **Avatar**: terminal faces for the assistant's moods
//! - **Theme**: brand and mood colors
//! - **Logging**: file-only tracing setup

pub mod app;
pub mod avatar;
pub mod logging;
pub mod theme;
pub mod widgets;

pub use app::App;
