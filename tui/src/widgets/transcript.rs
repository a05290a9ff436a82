//! Transcript Widget
//!
//! The scrollable message list: bot bubbles on the left behind a mood
//! avatar, user bubbles on the right in brand blue, and the typing
//! indicator under the last message. Bubbles wrap at 80% of the width.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::StatefulWidget;
use textwrap::wrap;
use unicode_width::UnicodeWidthStr;

use chat_core::ChatMessage;

use crate::avatar::{typing_dots, MoodAvatar, AVATAR_WIDTH};
use crate::theme::{BOT_BUBBLE_BG, BOT_BUBBLE_FG, BRAND_BLUE, TEXT_ON_BRAND};

/// Horizontal padding inside a bubble (each side)
const BUBBLE_PAD: usize = 1;

/// Scroll state for the transcript
///
/// Offsets count lines up from the bottom, so 0 always shows the latest
/// message no matter how much content is added.
#[derive(Debug, Default)]
pub struct TranscriptState {
    /// Lines scrolled up from the bottom
    pub offset_from_bottom: usize,
    /// Lines produced by the last render
    pub total_lines: usize,
    /// Visible rows at the last render
    pub viewport: usize,
    /// Transcript length seen by [`TranscriptState::follow`]
    seen_messages: usize,
}

impl TranscriptState {
    /// Jump back to the latest message if the transcript grew
    ///
    /// Returns `true` if it did.
    pub fn follow(&mut self, message_count: usize) -> bool {
        if message_count == self.seen_messages {
            return false;
        }
        self.seen_messages = message_count;
        self.offset_from_bottom = 0;
        true
    }

    /// Scroll towards older messages
    pub fn scroll_up(&mut self, lines: usize) {
        let max = self.total_lines.saturating_sub(self.viewport);
        self.offset_from_bottom = (self.offset_from_bottom + lines).min(max);
    }

    /// Scroll towards newer messages
    pub fn scroll_down(&mut self, lines: usize) {
        self.offset_from_bottom = self.offset_from_bottom.saturating_sub(lines);
    }

    /// Lines moved by PgUp / PgDn
    pub fn page_size(&self) -> usize {
        self.viewport.saturating_sub(1).max(1)
    }
}

/// The message list
pub struct Transcript<'a> {
    messages: &'a [ChatMessage],
    typing: bool,
    tick: u64,
}

impl<'a> Transcript<'a> {
    /// Transcript over a message slice
    pub fn new(messages: &'a [ChatMessage]) -> Self {
        Self {
            messages,
            typing: false,
            tick: 0,
        }
    }

    /// Show the typing indicator
    #[must_use]
    pub fn typing(mut self, typing: bool) -> Self {
        self.typing = typing;
        self
    }

    /// Animation step for the typing dots
    #[must_use]
    pub fn tick(mut self, tick: u64) -> Self {
        self.tick = tick;
        self
    }

    /// Lay out every line for a given width
    pub fn lines(&self, width: u16) -> Vec<Line<'static>> {
        let width = usize::from(width);
        let bubble_max = (width * 4 / 5).max(1);
        let mut lines = Vec::new();

        for (i, message) in self.messages.iter().enumerate() {
            if i > 0 {
                lines.push(Line::default());
            }
            if message.is_user() {
                push_user_bubble(&mut lines, &message.content, width, bubble_max);
            } else {
                let avatar = MoodAvatar::for_mood(message.avatar_mood());
                push_bot_bubble(&mut lines, &message.content, &avatar, bubble_max);
            }
        }

        if self.typing {
            if !lines.is_empty() {
                lines.push(Line::default());
            }
            let bubble = Style::default().bg(BOT_BUBBLE_BG);
            let mut spans = vec![MoodAvatar::typing().span(), Span::raw(" ")];
            spans.push(Span::styled(" ", bubble));
            spans.extend(typing_dots(self.tick).into_iter().map(|s| s.patch_style(bubble)));
            spans.push(Span::styled(" ", bubble));
            lines.push(Line::from(spans));
        }

        lines
    }
}

fn wrap_bubble(content: &str, text_width: usize) -> (Vec<String>, usize) {
    let rows: Vec<String> = wrap(content, text_width.max(1))
        .into_iter()
        .map(|cow| cow.into_owned())
        .collect();
    let inner = rows.iter().map(|r| r.width()).max().unwrap_or(0);
    (rows, inner)
}

fn padded(row: &str, inner: usize) -> String {
    let pad = " ".repeat(BUBBLE_PAD);
    let fill = " ".repeat(inner.saturating_sub(row.width()));
    format!("{pad}{row}{fill}{pad}")
}

fn push_bot_bubble(
    lines: &mut Vec<Line<'static>>,
    content: &str,
    avatar: &MoodAvatar,
    bubble_max: usize,
) {
    let gutter = usize::from(AVATAR_WIDTH) + 1;
    let text_width = bubble_max.saturating_sub(gutter + 2 * BUBBLE_PAD);
    let (rows, inner) = wrap_bubble(content, text_width);
    let style = Style::default().fg(BOT_BUBBLE_FG).bg(BOT_BUBBLE_BG);

    for (i, row) in rows.iter().enumerate() {
        let lead = if i == 0 {
            vec![avatar.span(), Span::raw(" ")]
        } else {
            vec![Span::raw(" ".repeat(gutter))]
        };
        let mut spans = lead;
        spans.push(Span::styled(padded(row, inner), style));
        lines.push(Line::from(spans));
    }
}

fn push_user_bubble(lines: &mut Vec<Line<'static>>, content: &str, width: usize, bubble_max: usize) {
    let text_width = bubble_max.saturating_sub(2 * BUBBLE_PAD);
    let (rows, inner) = wrap_bubble(content, text_width);
    let bubble_width = inner + 2 * BUBBLE_PAD;
    let indent = " ".repeat(width.saturating_sub(bubble_width));
    let style = Style::default().fg(TEXT_ON_BRAND).bg(BRAND_BLUE);

    for row in &rows {
        lines.push(Line::from(vec![
            Span::raw(indent.clone()),
            Span::styled(padded(row, inner), style).bold(),
        ]));
    }
}

impl<'a> StatefulWidget for Transcript<'a> {
    type State = TranscriptState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        if area.is_empty() {
            return;
        }

        let lines = self.lines(area.width);
        state.total_lines = lines.len();
        state.viewport = usize::from(area.height);

        // Clamp scroll
        let max_scroll = state.total_lines.saturating_sub(state.viewport);
        state.offset_from_bottom = state.offset_from_bottom.min(max_scroll);

        let first = max_scroll - state.offset_from_bottom;
        for (y, line) in (area.y..area.bottom()).zip(lines.iter().skip(first)) {
            buf.set_line(area.x, y, line, area.width);
        }
    }
}
