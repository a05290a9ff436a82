//! Mood Avatars
//!
//! Terminal stand-ins for Claim Saathi's avatar images. Each mood gets a
//! small face glyph in its own accent color; the image URL stays attached so
//! a richer surface can still show the real picture.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use unicode_width::UnicodeWidthStr;

use chat_core::Mood;

use crate::theme::{mood_color, BRAND_BLUE, DIM_GRAY};

/// Avatar glyph width in cells (all faces are this wide)
pub const AVATAR_WIDTH: u16 = 3;

/// A mood's terminal avatar
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoodAvatar {
    /// Mood this avatar draws
    pub mood: Mood,
    /// Face glyph
    pub glyph: &'static str,
    /// Accent color
    pub color: Color,
    /// Short description (screen readers, logs)
    pub label: &'static str,
}

impl MoodAvatar {
    /// Avatar for a mood
    pub fn for_mood(mood: Mood) -> Self {
        let (glyph, label) = match mood {
            Mood::Happy => ("^‿^", "happy"),
            Mood::Excited => ("*o*", "excited, smiling"),
            Mood::Neutral => ("•_•", "neutral, firm"),
            Mood::Angry => (">o<", "angry, shouting"),
            Mood::Dancing => ("♪‿♪", "dancing"),
            Mood::Winking => ("^‿~", "winking"),
            Mood::Confused => ("o_O", "confused"),
            Mood::Grumpy => ("¬‿¬", "grinning, grumpy"),
        };
        Self {
            mood,
            glyph,
            color: mood_color(mood),
            label,
        }
    }

    /// Avatar shown beside the typing indicator
    pub fn typing() -> Self {
        Self::for_mood(Mood::Neutral)
    }

    /// Canonical image for this mood
    pub fn image_url(&self) -> &'static str {
        self.mood.image_url()
    }

    /// The glyph as a styled span
    pub fn span(&self) -> Span<'static> {
        Span::styled(
            self.glyph,
            Style::default().fg(self.color).add_modifier(Modifier::BOLD),
        )
    }

    /// Rendered width in cells
    pub fn width(&self) -> usize {
        self.glyph.width()
    }
}

/// Animated "● ● ●" typing dots
///
/// One dot is lit per step, cycling left to right.
pub fn typing_dots(step: u64) -> Vec<Span<'static>> {
    // Bounded by the modulo
    #[allow(clippy::cast_possible_truncation)]
    let lit = (step % 3) as usize;
    let mut spans = Vec::with_capacity(5);
    for i in 0..3 {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        let color = if i == lit { BRAND_BLUE } else { DIM_GRAY };
        spans.push(Span::styled("●", Style::default().fg(color)));
    }
    spans
}
