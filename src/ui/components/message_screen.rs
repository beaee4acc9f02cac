//! Full-screen messages shown before the first snapshot arrives.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

/// Shown while the first poll is pending
pub struct LoadingScreen;

impl LoadingScreen {
    pub fn render(frame: &mut Frame, area: Rect, spinner: char) {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("{} Loading Quota Data...", spinner),
                Style::default().fg(Color::Cyan),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Self::block(Color::Gray));
        frame.render_widget(paragraph, area);
    }

    fn block(color: Color) -> Block<'static> {
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color))
    }
}

/// Shown when no snapshot has ever been received and the last poll failed
pub struct ErrorScreen;

impl ErrorScreen {
    pub fn render(frame: &mut Frame, area: Rect, message: &str) {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Connection Error",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                message.to_string(),
                Style::default().fg(Color::White),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    "r",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to retry", Style::default().fg(Color::DarkGray)),
            ]),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(LoadingScreen::block(Color::Red));
        frame.render_widget(paragraph, area);
    }
}
