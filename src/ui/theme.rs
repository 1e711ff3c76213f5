//! Cruise TV theme for the terminal
//!
//! Near-black backdrop, white type, a gold accent and green/red status
//! colours, matching the brand's site.

use ratatui::style::{Color, Modifier, Style};

/// Cruise TV colour palette
pub struct Theme;

impl Theme {
    // ═══════════════════════════════════════════════════════════════════════
    // CORE PALETTE
    // ═══════════════════════════════════════════════════════════════════════

    /// Background: #030303
    pub const BACKGROUND: Color = Color::Rgb(0x03, 0x03, 0x03);

    /// Panels and modals: #141414
    pub const SURFACE: Color = Color::Rgb(0x14, 0x14, 0x14);

    /// Text: #ffffff
    pub const TEXT: Color = Color::Rgb(0xff, 0xff, 0xff);

    /// Muted text: #888888
    pub const DIM: Color = Color::Rgb(0x88, 0x88, 0x88);

    /// Gold accent: #cfc64a
    pub const PRIMARY: Color = Color::Rgb(0xcf, 0xc6, 0x4a);

    /// Open / links: #2ec454
    pub const SUCCESS: Color = Color::Rgb(0x2e, 0xc4, 0x54);

    /// Closed / delete / errors: #ff3b3b
    pub const ERROR: Color = Color::Rgb(0xff, 0x3b, 0x3b);

    /// Warnings: #ffaa00
    pub const WARNING: Color = Color::Rgb(0xff, 0xaa, 0x00);

    /// Border: #3a3a3a
    pub const BORDER: Color = Color::Rgb(0x3a, 0x3a, 0x3a);

    /// Border when focused
    pub const BORDER_FOCUSED: Color = Self::PRIMARY;

    // ═══════════════════════════════════════════════════════════════════════
    // STYLE HELPERS
    // ═══════════════════════════════════════════════════════════════════════

    pub fn text() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND)
    }

    /// Inverted gold, for the selected card title
    pub fn highlighted() -> Style {
        Style::default()
            .fg(Self::BACKGROUND)
            .bg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn dimmed() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn accent() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error() -> Style {
        Style::default()
            .fg(Self::ERROR)
            .add_modifier(Modifier::BOLD)
    }

    pub fn success() -> Style {
        Style::default()
            .fg(Self::SUCCESS)
            .add_modifier(Modifier::BOLD)
    }

    pub fn warning() -> Style {
        Style::default()
            .fg(Self::WARNING)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    pub fn border_focused() -> Style {
        Style::default()
            .fg(Self::BORDER_FOCUSED)
            .add_modifier(Modifier::BOLD)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // COMPONENT STYLES
    // ═══════════════════════════════════════════════════════════════════════

    /// Status badge for an open casting
    pub fn badge_open() -> Style {
        Style::default()
            .fg(Self::BACKGROUND)
            .bg(Self::SUCCESS)
            .add_modifier(Modifier::BOLD)
    }

    /// Status badge for anything not open
    pub fn badge_closed() -> Style {
        Style::default()
            .fg(Self::BACKGROUND)
            .bg(Self::ERROR)
            .add_modifier(Modifier::BOLD)
    }

    pub fn link() -> Style {
        Style::default()
            .fg(Self::SUCCESS)
            .add_modifier(Modifier::UNDERLINED)
    }

    pub fn deadline() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    pub fn input() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::SURFACE)
    }

    pub fn input_cursor() -> Style {
        Style::default().fg(Self::BACKGROUND).bg(Self::PRIMARY)
    }

    pub fn keybind() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    pub fn status_bar() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::SURFACE)
    }

    pub fn loading() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn modal() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::SURFACE)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// COLOR UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

/// Relative luminance of a colour
/// Formula: https://www.w3.org/TR/WCAG20/#relativeluminancedef
pub fn relative_luminance(r: u8, g: u8, b: u8) -> f64 {
    fn channel_luminance(c: u8) -> f64 {
        let c = c as f64 / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }

    0.2126 * channel_luminance(r) + 0.7152 * channel_luminance(g) + 0.0722 * channel_luminance(b)
}

/// Contrast ratio between two colours, 1 (same) to 21 (black/white)
pub fn contrast_ratio(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> f64 {
    let l1 = relative_luminance(fg.0, fg.1, fg.2);
    let l2 = relative_luminance(bg.0, bg.1, bg.2);

    let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };

    (lighter + 0.05) / (darker + 0.05)
}

/// WCAG AA for normal text (4.5:1)
pub fn meets_wcag_aa(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> bool {
    contrast_ratio(fg, bg) >= 4.5
}

/// WCAG AA for large text (3:1)
pub fn meets_wcag_aa_large(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> bool {
    contrast_ratio(fg, bg) >= 3.0
}

/// RGB tuple from a ratatui colour (Rgb variant only)
pub fn color_to_rgb(color: Color) -> Option<(u8, u8, u8)> {
    match color {
        Color::Rgb(r, g, b) => Some((r, g, b)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb(color: Color) -> (u8, u8, u8) {
        color_to_rgb(color).expect("Theme colors should all be RGB")
    }

    #[test]
    fn test_text_contrast_against_background() {
        assert!(meets_wcag_aa(rgb(Theme::TEXT), rgb(Theme::BACKGROUND)));
        assert!(meets_wcag_aa(rgb(Theme::DIM), rgb(Theme::BACKGROUND)));
        assert!(meets_wcag_aa(rgb(Theme::TEXT), rgb(Theme::SURFACE)));
    }

    #[test]
    fn test_status_colors_visible() {
        let bg = rgb(Theme::BACKGROUND);
        for color in [Theme::PRIMARY, Theme::SUCCESS, Theme::ERROR, Theme::WARNING] {
            assert!(meets_wcag_aa_large(rgb(color), bg), "{:?} too dark", color);
        }
    }

    #[test]
    fn test_badges_readable() {
        let bg = rgb(Theme::BACKGROUND);
        assert!(meets_wcag_aa(bg, rgb(Theme::SUCCESS)));
        assert!(meets_wcag_aa_large(bg, rgb(Theme::ERROR)));
    }

    #[test]
    fn test_contrast_ratio_bounds() {
        let black = (0, 0, 0);
        let white = (255, 255, 255);
        assert!((contrast_ratio(black, white) - 21.0).abs() < 0.01);
        assert!((contrast_ratio(white, white) - 1.0).abs() < 0.01);
        assert!(relative_luminance(0, 0, 0) < 0.001);
    }
}
