//! Prompt / flow credit card.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use quotaboard_core::display::{credit_percent, format_thousands, monthly_or_one};

use super::meter::{self, Palette};

/// Card showing a credit balance against its monthly allotment
pub struct CreditCard;

impl CreditCard {
    /// Render the card
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        title: &str,
        available: f64,
        monthly: Option<f64>,
    ) {
        let block = Block::default()
            .title(format!(" {} ", title))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Gray));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines = Self::lines(available, monthly, inner.width);
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn lines(available: f64, monthly: Option<f64>, width: u16) -> Vec<Line<'static>> {
        let percent = credit_percent(available, monthly);
        let percent_label = format!(" {:>3.0}%", percent);
        // " " + bar + percent label
        let bar_width = (width as usize).saturating_sub(1 + percent_label.len()).max(4);

        let mut bar_line = vec![Span::raw(" ")];
        bar_line.extend(meter::bar(bar_width, percent, Palette::Credits));
        bar_line.push(Span::styled(
            percent_label,
            Style::default().fg(Color::White),
        ));

        vec![
            Line::from(Span::styled(
                format!(" {}", format_thousands(available)),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!(" of {} monthly", format_thousands(monthly_or_one(monthly))),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(bar_line),
        ]
    }
}
