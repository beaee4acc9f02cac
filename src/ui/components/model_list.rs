//! Per-model quota list.
//!
//! Each recommended model takes two rows: the label with its remaining
//! quota bar, then the reset time and countdown.

use chrono::{DateTime, Local, Utc};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use quotaboard_core::{
    display::{countdown, model_percent, model_percent_label, recommended_models},
    ModelQuota, QuotaSnapshot,
};

use super::meter::{self, Palette};

/// Width of the percentage column ("100%")
const PERCENT_WIDTH: usize = 5;

/// Model quota list widget
pub struct ModelList;

impl ModelList {
    /// Render the list
    pub fn render(frame: &mut Frame, area: Rect, snapshot: &QuotaSnapshot, now: DateTime<Utc>) {
        let block = Block::default()
            .title(" Model Quotas ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Gray));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines = Self::rows(snapshot, now, inner.width);
        frame.render_widget(Paragraph::new(lines), inner);
    }

    /// Lines for every recommended model in `snapshot`
    pub fn rows(snapshot: &QuotaSnapshot, now: DateTime<Utc>, width: u16) -> Vec<Line<'static>> {
        let models: Vec<&ModelQuota> = recommended_models(snapshot).collect();
        if models.is_empty() {
            return vec![Line::from(Span::styled(
                " No models reported",
                Style::default().fg(Color::DarkGray),
            ))];
        }

        let mut lines = Vec::with_capacity(models.len() * 2);
        for model in models {
            lines.push(Self::quota_line(model, width));
            lines.push(Self::reset_line(model, now));
        }
        lines
    }

    fn quota_line(model: &ModelQuota, width: u16) -> Line<'static> {
        let width = (width as usize).saturating_sub(2);
        let label_width = width * 3 / 5;
        let bar_width = width
            .saturating_sub(label_width + PERCENT_WIDTH + 1)
            .max(4);

        let fraction = model.remaining_fraction();
        let percent = model_percent(fraction);

        let mut spans = vec![
            Span::raw(" "),
            Span::styled(
                meter::fit(&model.label, label_width),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
        ];
        spans.extend(meter::bar(bar_width, percent, Palette::Models));
        spans.push(Span::styled(
            format!("{:>width$}", model_percent_label(fraction), width = PERCENT_WIDTH),
            Style::default().fg(Color::White),
        ));
        Line::from(spans)
    }

    fn reset_line(model: &ModelQuota, now: DateTime<Utc>) -> Line<'static> {
        let text = match model.reset_time() {
            Some(reset) => format!(
                "   Resets: {} ({})",
                reset.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
                countdown(reset, now)
            ),
            None => "   No limit".to_string(),
        };
        Line::from(Span::styled(text, Style::default().fg(Color::DarkGray)))
    }
}
