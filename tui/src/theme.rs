//! Theme and Colors
//!
//! Claim Saathi's brand palette plus one accent per avatar mood.

use ratatui::style::Color;

use chat_core::Mood;

// ============================================================================
// Brand Palette
// ============================================================================

/// Brand blue (launcher, user bubbles, send button)
pub const BRAND_BLUE: Color = Color::Rgb(7, 166, 236);

/// Darker blue (send button while the draft is blank)
pub const BRAND_BLUE_DARK: Color = Color::Rgb(6, 150, 215);

/// Brand orange (header gradient end)
pub const BRAND_ORANGE: Color = Color::Rgb(250, 103, 36);

/// Online indicator
pub const ONLINE_GREEN: Color = Color::Rgb(74, 222, 128);

// ============================================================================
// UI Colors
// ============================================================================

/// Text on brand backgrounds
pub const TEXT_ON_BRAND: Color = Color::Rgb(255, 255, 255);

/// Bot bubble background
pub const BOT_BUBBLE_BG: Color = Color::Rgb(55, 65, 81);

/// Bot bubble text
pub const BOT_BUBBLE_FG: Color = Color::Rgb(243, 244, 246);

/// Input box background
pub const INPUT_BG: Color = Color::Rgb(55, 65, 81);

/// Panel background
pub const PANEL_BG: Color = Color::Rgb(31, 41, 55);

/// Placeholder, footer and idle typing dots
pub const DIM_GRAY: Color = Color::Rgb(107, 114, 128);

/// Panel border
pub const BORDER_GRAY: Color = Color::Rgb(75, 85, 99);

// ============================================================================
// Mood Colors
// ============================================================================

/// Accent color for a mood's avatar glyph
pub fn mood_color(mood: Mood) -> Color {
    match mood {
        Mood::Happy => Color::Rgb(255, 223, 128),
        Mood::Excited => Color::Rgb(255, 150, 120),
        Mood::Neutral => Color::Rgb(200, 200, 200),
        Mood::Angry => Color::Rgb(255, 80, 80),
        Mood::Dancing => Color::Rgb(200, 140, 255),
        Mood::Winking => Color::Rgb(255, 170, 210),
        Mood::Confused => Color::Rgb(150, 180, 255),
        Mood::Grumpy => Color::Rgb(190, 140, 100),
    }
}

// ============================================================================
// Gradients
// ============================================================================

/// Linear blend between two RGB colors
///
/// `t` is clamped to `0.0..=1.0`. Non-RGB colors return `from`.
pub fn blend(from: Color, to: Color, t: f32) -> Color {
    let (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) = (from, to) else {
        return from;
    };
    let t = t.clamp(0.0, 1.0);
    // Stays within 0..=255 since t is clamped
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let mix = |a: u8, b: u8| (f32::from(a) + (f32::from(b) - f32::from(a)) * t).round() as u8;
    Color::Rgb(mix(r1, r2), mix(g1, g2), mix(b1, b2))
}

/// Header gradient color for column `x` of a `width`-wide row
pub fn header_gradient(x: u16, width: u16) -> Color {
    if width <= 1 {
        return BRAND_BLUE;
    }
    blend(
        BRAND_BLUE,
        BRAND_ORANGE,
        f32::from(x) / f32::from(width - 1),
    )
}
