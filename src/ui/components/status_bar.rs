use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::state::DashboardState;

/// Status bar widget
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar
    pub fn render(frame: &mut Frame, area: Rect, state: &DashboardState, interval_secs: u64) {
        let line = Self::line(state, interval_secs, area.width);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn line(state: &DashboardState, interval_secs: u64, width: u16) -> Line<'static> {
        let mut spans = vec![Span::raw(" ")];

        if state.fetching {
            spans.push(Span::styled(
                format!("{} ", state.spinner_char()),
                Style::default().fg(Color::Cyan),
            ));
        }

        // Marks a snapshot kept from an earlier poll
        if let (Some(error), Some(_)) = (&state.error, &state.data) {
            spans.push(Span::styled(
                " STALE ",
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Red)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(
                format!(" {} ", error),
                Style::default().fg(Color::Red),
            ));
        }

        if let Some(updated) = state.last_updated {
            spans.push(Span::styled(
                format!("Updated {} ", updated.format("%H:%M:%S")),
                Style::default().fg(Color::White),
            ));
        }

        spans.push(Span::styled(
            format!("Auto-refreshing every {}s", interval_secs),
            Style::default().fg(Color::DarkGray),
        ));

        // Key hints, right-aligned when there is room
        let hints = Self::hints();
        let used: usize = spans.iter().map(|s| s.content.width()).sum();
        let hints_width: usize = hints.iter().map(|s| s.content.width()).sum();
        let remaining = (width as usize).saturating_sub(used);
        if remaining > hints_width {
            spans.push(Span::raw(" ".repeat(remaining - hints_width)));
            spans.extend(hints);
        }

        Line::from(spans)
    }

    fn hints() -> Vec<Span<'static>> {
        let key = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
        let desc = Style::default().fg(Color::DarkGray);
        vec![
            Span::styled("r", key),
            Span::styled(":Refresh ", desc),
            Span::styled("?", key),
            Span::styled(":Help ", desc),
            Span::styled("q", key),
            Span::styled(":Quit ", desc),
        ]
    }
}
