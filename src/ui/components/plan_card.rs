use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use quotaboard_core::{display::format_thousands, PlanInfo};

/// Plan details card
pub struct PlanCard;

impl PlanCard {
    /// Render the card
    pub fn render(frame: &mut Frame, area: Rect, plan: &PlanInfo) {
        let block = Block::default()
            .title(" Plan ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Gray));

        let paragraph = Paragraph::new(Self::lines(plan)).block(block);
        frame.render_widget(paragraph, area);
    }

    fn lines(plan: &PlanInfo) -> Vec<Line<'static>> {
        let plan_name = plan.plan_name.clone().unwrap_or_default();
        let (fast_mode, fast_color) = if plan.fast_mode {
            ("Enabled", Color::Green)
        } else {
            ("Disabled", Color::DarkGray)
        };
        let context = format!(
            "{} tokens",
            format_thousands(plan.max_context_tokens.unwrap_or(0) as f64)
        );

        vec![
            Self::row("Type", plan_name, Color::White),
            Self::row("Fast Mode", fast_mode.to_string(), fast_color),
            Self::row("Context", context, Color::White),
        ]
    }

    fn row(label: &str, value: String, color: Color) -> Line<'static> {
        Line::from(vec![
            Span::styled(
                format!(" {:<11}", label),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(value, Style::default().fg(color)),
        ])
    }
}
