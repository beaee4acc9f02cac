use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

/// Dashboard title
pub const TITLE: &str = "Antigravity Quota";

/// Title bar with the account tier badge
pub struct Header;

impl Header {
    /// Render the header
    pub fn render(frame: &mut Frame, area: Rect, tier: Option<&str>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Gray));

        let paragraph = Paragraph::new(Self::line(tier)).block(block);
        frame.render_widget(paragraph, area);
    }

    fn line(tier: Option<&str>) -> Line<'static> {
        let mut spans = vec![Span::styled(
            format!(" {}", TITLE),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )];

        if let Some(tier) = tier.filter(|t| !t.is_empty()) {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                format!(" {} ", tier),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        Line::from(spans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_with_tier() {
        let line = Header::line(Some("Pro"));
        assert_eq!(line.spans.len(), 3);
        assert_eq!(line.spans[2].content, " Pro ");
    }

    #[test]
    fn test_line_without_tier() {
        assert_eq!(Header::line(None).spans.len(), 1);
        assert_eq!(Header::line(Some("")).spans.len(), 1);
    }
}
