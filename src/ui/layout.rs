use ratatui::layout::{Constraint, Direction, Rect};

/// Height of the header bar
const HEADER_HEIGHT: u16 = 3;

/// Default height of the credit and plan cards
const CARD_HEIGHT: u16 = 6;

/// Width below which the three cards are stacked instead of side by side
const NARROW_WIDTH: u16 = 72;

/// Areas of the dashboard screen
#[derive(Debug, Clone, Copy)]
pub struct DashboardAreas {
    pub header: Rect,
    pub prompt_credits: Rect,
    pub flow_credits: Rect,
    pub plan: Rect,
    pub models: Rect,
    pub status_bar: Rect,
}

/// Layout configuration for the UI
pub struct Layout {
    /// Height for each card
    pub card_height: u16,
}

impl Layout {
    /// Create a new layout with default settings
    pub fn new() -> Self {
        Self {
            card_height: CARD_HEIGHT,
        }
    }

    /// Split a screen into header, content and status bar
    pub fn frame(&self, area: Rect) -> (Rect, Rect, Rect) {
        let rows = ratatui::layout::Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(area);
        (rows[0], rows[1], rows[2])
    }

    /// Calculate the dashboard areas
    pub fn calculate(&self, area: Rect) -> DashboardAreas {
        let (header, content, status_bar) = self.frame(area);

        if area.width < NARROW_WIDTH {
            let rows = ratatui::layout::Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(self.card_height),
                    Constraint::Length(self.card_height),
                    Constraint::Length(self.card_height),
                    Constraint::Min(3),
                ])
                .split(content);

            return DashboardAreas {
                header,
                prompt_credits: rows[0],
                flow_credits: rows[1],
                plan: rows[2],
                models: rows[3],
                status_bar,
            };
        }

        let rows = ratatui::layout::Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(self.card_height), Constraint::Min(3)])
            .split(content);

        let cards = ratatui::layout::Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(rows[0]);

        DashboardAreas {
            header,
            prompt_credits: cards[0],
            flow_credits: cards[1],
            plan: cards[2],
            models: rows[1],
            status_bar,
        }
    }

    /// Calculate areas for a popup (centered)
    pub fn popup_area(&self, area: Rect, width_pct: u16, height_pct: u16) -> Rect {
        let popup_layout = ratatui::layout::Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage((100 - height_pct) / 2),
                Constraint::Percentage(height_pct),
                Constraint::Percentage((100 - height_pct) / 2),
            ])
            .split(area);

        ratatui::layout::Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage((100 - width_pct) / 2),
                Constraint::Percentage(width_pct),
                Constraint::Percentage((100 - width_pct) / 2),
            ])
            .split(popup_layout[1])[1]
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wide_layout_places_cards_side_by_side() {
        let layout = Layout::new();
        let areas = layout.calculate(Rect::new(0, 0, 120, 40));

        assert_eq!(areas.header.height, 3);
        assert_eq!(areas.status_bar.height, 1);
        assert_eq!(areas.status_bar.y, 39);
        assert_eq!(areas.prompt_credits.y, areas.flow_credits.y);
        assert_eq!(areas.flow_credits.y, areas.plan.y);
        assert!(areas.prompt_credits.x < areas.flow_credits.x);
        assert!(areas.flow_credits.x < areas.plan.x);
        assert_eq!(areas.models.y, areas.prompt_credits.y + CARD_HEIGHT);
    }

    #[test]
    fn test_narrow_layout_stacks_cards() {
        let layout = Layout::new();
        let areas = layout.calculate(Rect::new(0, 0, 60, 50));

        assert_eq!(areas.prompt_credits.x, areas.flow_credits.x);
        assert!(areas.prompt_credits.y < areas.flow_credits.y);
        assert!(areas.flow_credits.y < areas.plan.y);
        assert!(areas.plan.y < areas.models.y);
    }

    #[test]
    fn test_popup_area() {
        let layout = Layout::new();
        let area = Rect::new(0, 0, 100, 50);
        let popup = layout.popup_area(area, 60, 40);

        // Popup should be centered
        assert!(popup.x > 0);
        assert!(popup.y > 0);
        assert!(popup.x + popup.width < area.width);
        assert!(popup.y + popup.height < area.height);
    }
}
