//! Shared meter drawing helpers for credit and model widgets.

use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use quotaboard_core::display::Severity;

/// Palette for a meter family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    /// Prompt and flow credits
    Credits,
    /// Per-model quota
    Models,
}

impl Palette {
    /// Bar color for the given severity
    pub fn color(self, severity: Severity) -> Color {
        match (self, severity) {
            (_, Severity::Warning) => Color::Red,
            (Palette::Credits, Severity::Normal) => Color::Cyan,
            (Palette::Models, Severity::Normal) => Color::Green,
        }
    }
}

/// Number of filled cells for `percent` in a bar of `width` cells.
/// Percentages outside 0-100 are drawn as an empty or full bar.
pub fn filled_cells(width: usize, percent: f64) -> usize {
    if !percent.is_finite() {
        return 0;
    }
    let clamped = percent.clamp(0.0, 100.0);
    ((width as f64) * clamped / 100.0).round() as usize
}

/// Bar of `width` cells: "████░░░░"
pub fn bar(width: usize, percent: f64, palette: Palette) -> Vec<Span<'static>> {
    let filled = filled_cells(width, percent);
    let empty = width.saturating_sub(filled);
    let color = palette.color(Severity::from_percent(percent));

    vec![
        Span::styled("█".repeat(filled), Style::default().fg(color)),
        Span::styled(
            "░".repeat(empty),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM),
        ),
    ]
}

/// Truncate (with "…") or right-pad `text` to exactly `width` columns
pub fn fit(text: &str, width: usize) -> String {
    if text.width() <= width {
        return format!("{}{}", text, " ".repeat(width - text.width()));
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    used += 1;
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filled_cells() {
        assert_eq!(filled_cells(10, 0.0), 0);
        assert_eq!(filled_cells(10, 50.0), 5);
        assert_eq!(filled_cells(10, 100.0), 10);
        assert_eq!(filled_cells(10, 250.0), 10);
        assert_eq!(filled_cells(10, -3.0), 0);
        assert_eq!(filled_cells(10, f64::NAN), 0);
    }

    #[test]
    fn test_palette_colors() {
        assert_eq!(Palette::Credits.color(Severity::Normal), Color::Cyan);
        assert_eq!(Palette::Models.color(Severity::Normal), Color::Green);
        assert_eq!(Palette::Credits.color(Severity::Warning), Color::Red);
        assert_eq!(Palette::Models.color(Severity::Warning), Color::Red);
    }

    #[test]
    fn test_bar_width() {
        let spans = bar(12, 25.0, Palette::Credits);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].content.chars().count(), 3);
        assert_eq!(spans[1].content.chars().count(), 9);
        assert_eq!(spans[0].style.fg, Some(Color::Cyan));

        let low = bar(12, 10.0, Palette::Models);
        assert_eq!(low[0].style.fg, Some(Color::Red));
    }

    #[test]
    fn test_fit() {
        assert_eq!(fit("abc", 5), "abc  ");
        assert_eq!(fit("abcdef", 4), "abc…");
        assert_eq!(fit("abc", 3), "abc");
        assert_eq!(fit("abc", 0), "");
    }
}
