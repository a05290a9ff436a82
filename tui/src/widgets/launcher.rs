//! Launcher Button
//!
//! The closed-state control: a small brand-blue button in the bottom-right
//! corner with a brain glyph.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, BorderType, Widget};
use unicode_width::UnicodeWidthStr;

use crate::theme::{BRAND_BLUE, TEXT_ON_BRAND};

/// Launcher size in cells
pub const LAUNCHER_SIZE: (u16, u16) = (7, 3);

/// Gap to the screen edge
pub const LAUNCHER_MARGIN: u16 = 1;

/// Launcher glyph
pub const LAUNCHER_GLYPH: &str = "🧠";

/// Where the launcher sits on a screen
pub fn launcher_area(screen: Rect) -> Rect {
    super::anchor_bottom_right(screen, LAUNCHER_SIZE, LAUNCHER_MARGIN)
}

/// The launcher button
#[derive(Debug, Default)]
pub struct Launcher;

impl Widget for Launcher {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(TEXT_ON_BRAND))
            .style(Style::default().bg(BRAND_BLUE));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.is_empty() {
            return;
        }
        let glyph_width = u16::try_from(LAUNCHER_GLYPH.width()).unwrap_or(inner.width);
        let x = inner.x + inner.width.saturating_sub(glyph_width) / 2;
        let y = inner.y + inner.height.saturating_sub(1) / 2;
        buf.set_string(x, y, LAUNCHER_GLYPH, Style::default().fg(TEXT_ON_BRAND));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launcher_bottom_right() {
        let area = launcher_area(Rect::new(0, 0, 80, 24));
        assert_eq!(area, Rect::new(72, 20, 7, 3));
    }

    #[test]
    fn test_launcher_clamped_on_tiny_screen() {
        let area = launcher_area(Rect::new(0, 0, 5, 2));
        assert_eq!(area, Rect::new(0, 0, 5, 2));
    }

    #[test]
    fn test_launcher_renders_brand_button() {
        let area = Rect::new(0, 0, 7, 3);
        let mut buf = Buffer::empty(area);
        Launcher.render(area, &mut buf);

        assert_eq!(buf[(0, 0)].symbol(), "╭");
        assert_eq!(buf[(6, 2)].symbol(), "╯");
        assert_eq!(buf[(2, 1)].symbol(), LAUNCHER_GLYPH);
        assert_eq!(buf[(5, 1)].bg, BRAND_BLUE);
    }
}
