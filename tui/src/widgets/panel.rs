//! Chat Panel
//!
//! The open-state widget: gradient header, transcript, input row and footer
//! inside a rounded frame anchored to the bottom-right corner.
//!
//! ```text
//! ╭──────────────────────────────────────╮
//! │ ● Claim Saathi           ^E ⤢  Esc ✕ │  header (gradient)
//! │   AI Insurance Assistant             │
//! │ ^‿^  Hi there! I'm Claim Saathi...   │  transcript
//! │                          hello  │    │
//! │──────────────────────────────────────│
//! │ Ask Claim Saathi anything...     ➤   │  input + send
//! │ Powered by AI & Blockchain • ...     │  footer
//! ╰──────────────────────────────────────╯
//! ```

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Clear, StatefulWidget, Widget};
use textwrap::wrap;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use chat_core::ChatMessage;

use super::transcript::{Transcript, TranscriptState};
use crate::theme::{
    header_gradient, BORDER_GRAY, BRAND_BLUE, BRAND_BLUE_DARK, DIM_GRAY, INPUT_BG, ONLINE_GREEN,
    PANEL_BG, TEXT_ON_BRAND,
};

/// Compact panel size (width, height)
pub const COMPACT_SIZE: (u16, u16) = (40, 24);

/// Expanded panel size (width, height)
pub const EXPANDED_SIZE: (u16, u16) = (52, 30);

/// Gap to the screen edge
pub const PANEL_MARGIN: u16 = 1;

/// Header title
pub const TITLE: &str = "Claim Saathi";

/// Header subtitle
pub const SUBTITLE: &str = "AI Insurance Assistant";

/// Input placeholder
pub const PLACEHOLDER: &str = "Ask Claim Saathi anything...";

/// Footer line
pub const FOOTER: &str = "Powered by AI & Blockchain • Responses in seconds";

const HEADER_HEIGHT: u16 = 2;
const INPUT_HEIGHT: u16 = 2;
const SEND_BUTTON: &str = " ➤ ";
const SUBTITLE_FG: Color = Color::Rgb(230, 240, 250);

/// Where the panel sits on a screen
pub fn panel_area(screen: Rect, expanded: bool) -> Rect {
    let size = if expanded { EXPANDED_SIZE } else { COMPACT_SIZE };
    super::anchor_bottom_right(screen, size, PANEL_MARGIN)
}

// ============================================================================
// Layout
// ============================================================================

/// Regions inside a panel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanelLayout {
    /// Gradient header (two rows)
    pub header: Rect,
    /// Message list
    pub transcript: Rect,
    /// Separator row plus input row
    pub input: Rect,
    /// Centered footer text
    pub footer: Rect,
}

impl PanelLayout {
    /// Split a panel area (border included) into its regions
    pub fn new(area: Rect) -> Self {
        let inner = frame_block().inner(area);
        let footer_height = u16::try_from(footer_lines(inner.width).len()).unwrap_or(1);

        let [header, transcript, input, footer] = Layout::vertical([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(footer_height),
        ])
        .areas(inner);

        // One column of breathing room on each side of the bubbles
        let transcript = Rect {
            x: transcript.x.saturating_add(1).min(transcript.right()),
            width: transcript.width.saturating_sub(2),
            ..transcript
        };

        Self {
            header,
            transcript,
            input,
            footer,
        }
    }

    /// The text field on the input row
    pub fn input_field(&self) -> Rect {
        let send_width = u16::try_from(SEND_BUTTON.width()).unwrap_or(3);
        Rect {
            x: self.input.x.saturating_add(1),
            y: self.input.y.saturating_add(1),
            width: self.input.width.saturating_sub(send_width + 3),
            height: self.input.height.min(1),
        }
    }

    /// The send button on the input row
    pub fn send_button(&self) -> Rect {
        let field = self.input_field();
        let send_width = u16::try_from(SEND_BUTTON.width()).unwrap_or(3);
        Rect {
            x: field.right().saturating_add(1),
            y: field.y,
            width: send_width.min(self.input.right().saturating_sub(field.right() + 1)),
            height: field.height,
        }
    }

    /// Terminal cursor position for a draft
    pub fn cursor(&self, draft: &str) -> Position {
        let field = self.input_field();
        let tail = visible_tail(draft, text_budget(field));
        let offset = u16::try_from(tail.width()).unwrap_or(0);
        Position::new(field.x + 1 + offset, field.y)
    }
}

fn frame_block() -> Block<'static> {
    Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_GRAY))
        .style(Style::default().bg(PANEL_BG))
}

fn footer_lines(width: u16) -> Vec<String> {
    wrap(FOOTER, usize::from(width).max(1))
        .into_iter()
        .map(|cow| cow.into_owned())
        .collect()
}

/// Cells available for draft text (leading pad and cursor cell excluded)
fn text_budget(field: Rect) -> usize {
    usize::from(field.width.saturating_sub(2))
}

/// Longest suffix of `text` that fits in `max_width` cells
fn visible_tail(text: &str, max_width: usize) -> &str {
    let mut width = 0;
    let mut start = text.len();
    for (i, c) in text.char_indices().rev() {
        let w = c.width().unwrap_or(0);
        if width + w > max_width {
            break;
        }
        width += w;
        start = i;
    }
    &text[start..]
}

// ============================================================================
// Widget
// ============================================================================

/// The open chat panel
pub struct ChatPanel<'a> {
    messages: &'a [ChatMessage],
    draft: &'a str,
    typing: bool,
    expanded: bool,
    tick: u64,
}

impl<'a> ChatPanel<'a> {
    /// Panel over a transcript and draft
    pub fn new(messages: &'a [ChatMessage], draft: &'a str) -> Self {
        Self {
            messages,
            draft,
            typing: false,
            expanded: false,
            tick: 0,
        }
    }

    /// Show the typing indicator
    #[must_use]
    pub fn typing(mut self, typing: bool) -> Self {
        self.typing = typing;
        self
    }

    /// Whether the panel is expanded (changes the header hint)
    #[must_use]
    pub fn expanded(mut self, expanded: bool) -> Self {
        self.expanded = expanded;
        self
    }

    /// Animation step
    #[must_use]
    pub fn tick(mut self, tick: u64) -> Self {
        self.tick = tick;
        self
    }

    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                buf[(x, y)].set_bg(header_gradient(x - area.x, area.width));
            }
        }
        if area.height == 0 || area.width < 3 {
            return;
        }

        let title_x = area.x + 3;
        buf.set_string(area.x + 1, area.y, "●", Style::default().fg(ONLINE_GREEN));
        buf.set_stringn(
            title_x,
            area.y,
            TITLE,
            usize::from(area.width - 3),
            Style::default()
                .fg(TEXT_ON_BRAND)
                .add_modifier(Modifier::BOLD),
        );
        if area.height > 1 {
            buf.set_stringn(
                title_x,
                area.y + 1,
                SUBTITLE,
                usize::from(area.width - 3),
                Style::default().fg(SUBTITLE_FG),
            );
        }

        let resize = if self.expanded { "⤡" } else { "⤢" };
        let hints = format!("^E {resize}  Esc ✕");
        let hints_width = u16::try_from(hints.width()).unwrap_or(u16::MAX);
        let title_end = title_x + u16::try_from(TITLE.width()).unwrap_or(0);
        if let Some(hints_x) = area.right().checked_sub(hints_width + 1) {
            if hints_x > title_end {
                buf.set_string(hints_x, area.y, hints, Style::default().fg(TEXT_ON_BRAND));
            }
        }
    }

    fn render_input(&self, layout: &PanelLayout, buf: &mut Buffer) {
        let input = layout.input;
        if input.height == 0 {
            return;
        }
        buf.set_string(
            input.x,
            input.y,
            "─".repeat(usize::from(input.width)),
            Style::default().fg(BORDER_GRAY),
        );

        let field = layout.input_field();
        if field.is_empty() {
            return;
        }
        buf.set_style(field, Style::default().bg(INPUT_BG));

        let budget = text_budget(field);
        if self.draft.is_empty() {
            buf.set_stringn(
                field.x + 1,
                field.y,
                PLACEHOLDER,
                budget,
                Style::default().fg(DIM_GRAY),
            );
        } else {
            buf.set_string(
                field.x + 1,
                field.y,
                visible_tail(self.draft, budget),
                Style::default().fg(TEXT_ON_BRAND),
            );
        }

        let send = layout.send_button();
        let send_bg = if self.draft.trim().is_empty() {
            BRAND_BLUE_DARK
        } else {
            BRAND_BLUE
        };
        buf.set_stringn(
            send.x,
            send.y,
            SEND_BUTTON,
            usize::from(send.width),
            Style::default().fg(TEXT_ON_BRAND).bg(send_bg),
        );
    }

    fn render_footer(area: Rect, buf: &mut Buffer) {
        let style = Style::default().fg(DIM_GRAY);
        for (y, line) in (area.top()..area.bottom()).zip(footer_lines(area.width)) {
            let width = u16::try_from(line.width()).unwrap_or(area.width);
            let x = area.x + area.width.saturating_sub(width) / 2;
            buf.set_stringn(x, y, line, usize::from(area.width), style);
        }
    }
}

impl<'a> StatefulWidget for ChatPanel<'a> {
    type State = TranscriptState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        Clear.render(area, buf);
        frame_block().render(area, buf);

        let layout = PanelLayout::new(area);
        self.render_header(layout.header, buf);
        Transcript::new(self.messages)
            .typing(self.typing)
            .tick(self.tick)
            .render(layout.transcript, buf, state);
        self.render_input(&layout, buf);
        Self::render_footer(layout.footer, buf);
    }
}
