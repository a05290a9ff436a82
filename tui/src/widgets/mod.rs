//! Widgets
//!
//! The launcher, the chat panel and the transcript inside it.

pub mod launcher;
pub mod panel;
pub mod transcript;

use ratatui::layout::Rect;

pub use launcher::{launcher_area, Launcher};
pub use panel::{panel_area, ChatPanel, PanelLayout};
pub use transcript::{Transcript, TranscriptState};

/// Place a `(width, height)` box in the bottom-right corner of `screen`
///
/// The box shrinks to fit small screens, and the margin is dropped before
/// the box is.
pub fn anchor_bottom_right(screen: Rect, (width, height): (u16, u16), margin: u16) -> Rect {
    let width = width.min(screen.width);
    let height = height.min(screen.height);
    let x = screen
        .right()
        .saturating_sub(width.saturating_add(margin))
        .max(screen.x);
    let y = screen
        .bottom()
        .saturating_sub(height.saturating_add(margin))
        .max(screen.y);
    Rect::new(x, y, width, height)
}
