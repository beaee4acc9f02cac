use anyhow::Result;
use chrono::{DateTime, Utc};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::info;

use crate::client::{QuotaClient, SnapshotSource};
use crate::config::Settings;
use crate::monitor::{PollMessage, Poller, PollerHandle};
use crate::state::{DashboardState, SharedState, View};

use super::components::{
    CreditCard, ErrorScreen, Header, HelpPopup, LoadingScreen, ModelList, PlanCard, StatusBar,
};
use super::Layout;

/// Main application
pub struct App {
    state: SharedState,
    settings: Settings,
    layout: Layout,
}

impl App {
    /// Create a new application
    pub fn new(settings: Settings) -> Self {
        Self {
            state: DashboardState::shared(),
            settings,
            layout: Layout::new(),
        }
    }

    /// Shared dashboard state
    pub fn state(&self) -> SharedState {
        self.state.clone()
    }

    /// Run the dashboard against the configured relay endpoint
    pub async fn run(&mut self) -> Result<()> {
        let client = QuotaClient::new(self.settings.dashboard.url.clone());
        info!("Polling {}", client.url());
        self.run_with(client).await
    }

    /// Run the dashboard against any snapshot source
    pub async fn run_with<S: SnapshotSource>(&mut self, source: S) -> Result<()> {
        // Setup terminal
        crossterm::terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Start poller
        let interval = Duration::from_secs(self.settings.dashboard.poll_interval_secs);
        let (mut poll_rx, poller) = Poller::new(source, interval).start();

        // Main loop
        let result = self.main_loop(&mut terminal, &mut poll_rx, &poller).await;
        poller.stop();

        // Restore terminal
        crossterm::terminal::disable_raw_mode()?;
        crossterm::execute!(
            terminal.backend_mut(),
            crossterm::terminal::LeaveAlternateScreen
        )?;
        terminal.show_cursor()?;

        result
    }

    async fn main_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        poll_rx: &mut mpsc::Receiver<PollMessage>,
        poller: &PollerHandle,
    ) -> Result<()> {
        let interval_secs = self.settings.dashboard.poll_interval_secs;

        loop {
            // Check if we should quit
            {
                let state = self.state.read();
                if !state.running {
                    break;
                }
            }

            // Draw UI
            terminal.draw(|frame| {
                let state = self.state.read();
                render(frame, &state, &self.layout, interval_secs, Utc::now());
            })?;

            // Tick spinner animation
            {
                let mut state = self.state.write();
                state.tick_spinner();
            }

            // Handle events with timeout
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers, poller);
                    }
                }
            }

            // Process poll messages
            while let Ok(msg) = poll_rx.try_recv() {
                let mut state = self.state.write();
                match msg {
                    PollMessage::Started => state.begin_poll(),
                    PollMessage::Snapshot(snapshot) => state.apply_snapshot(snapshot),
                    PollMessage::Error(error) => state.apply_failure(error),
                }
            }

            // Let the poller task make progress between frames
            tokio::task::yield_now().await;
        }

        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers, poller: &PollerHandle) {
        let mut state = self.state.write();

        // Any key closes the help popup
        if state.show_help {
            state.show_help = false;
            return;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => state.quit(),
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => state.quit(),
            KeyCode::Char('r') => poller.retry(),
            KeyCode::Char('?') => state.toggle_help(),
            _ => {}
        }
    }
}

/// Draw one frame of the dashboard
pub fn render(
    frame: &mut Frame,
    state: &DashboardState,
    layout: &Layout,
    interval_secs: u64,
    now: DateTime<Utc>,
) {
    match state.view() {
        View::Loading => {
            let (header, content, status_bar) = layout.frame(frame.area());
            Header::render(frame, header, None);
            LoadingScreen::render(frame, content, state.spinner_char());
            StatusBar::render(frame, status_bar, state, interval_secs);
        }
        View::Error(message) => {
            let (header, content, status_bar) = layout.frame(frame.area());
            Header::render(frame, header, None);
            ErrorScreen::render(frame, content, message);
            StatusBar::render(frame, status_bar, state, interval_secs);
        }
        View::Dashboard { snapshot, .. } => {
            let areas = layout.calculate(frame.area());
            let plan = &snapshot.plan_info;

            Header::render(frame, areas.header, snapshot.user_tier.as_deref());
            CreditCard::render(
                frame,
                areas.prompt_credits,
                "Prompt Credits",
                snapshot.available_prompt_credits,
                plan.monthly_prompt_credits,
            );
            CreditCard::render(
                frame,
                areas.flow_credits,
                "Flow Credits",
                snapshot.available_flow_credits,
                plan.monthly_flow_credits,
            );
            PlanCard::render(frame, areas.plan, plan);
            ModelList::render(frame, areas.models, snapshot, now);
            StatusBar::render(frame, areas.status_bar, state, interval_secs);
        }
    }

    if state.show_help {
        let popup_area = layout.popup_area(frame.area(), 60, 60);
        HelpPopup::render(frame, popup_area, interval_secs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quotaboard_core::StaticCollector;
    use ratatui::backend::TestBackend;

    fn draw(state: &DashboardState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(110, 40)).unwrap();
        let layout = Layout::new();
        terminal
            .draw(|frame| render(frame, state, &layout, 30, Utc::now()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn sample() -> quotaboard_core::QuotaSnapshot {
        StaticCollector::sample()
            .document()
            .snapshot()
            .expect("sample document parses")
    }

    #[test]
    fn test_render_loading() {
        let state = DashboardState::new();
        let screen = draw(&state);
        assert!(screen.contains("Loading Quota Data..."));
        assert!(screen.contains("Antigravity Quota"));
    }

    #[test]
    fn test_render_error_without_data() {
        let mut state = DashboardState::new();
        state.apply_failure("HTTP error! status: 500".to_string());
        let screen = draw(&state);
        assert!(screen.contains("Connection Error"));
        assert!(screen.contains("HTTP error! status: 500"));
        assert!(screen.contains("to retry"));
    }

    #[test]
    fn test_render_dashboard() {
        let mut state = DashboardState::new();
        state.apply_snapshot(sample());
        let screen = draw(&state);

        assert!(screen.contains("Google AI Pro"));
        assert!(screen.contains("41,250"));
        assert!(screen.contains("of 50,000 monthly"));
        assert!(screen.contains("16,384 tokens"));
        assert!(screen.contains("Gemini 3 Flash"));
        assert!(screen.contains("No limit"));
        assert!(!screen.contains("Legacy"));
        assert!(!screen.contains("STALE"));
    }

    #[test]
    fn test_render_keeps_data_after_failure() {
        let mut state = DashboardState::new();
        state.apply_snapshot(sample());
        state.apply_failure("connection refused".to_string());
        let screen = draw(&state);

        assert!(screen.contains("41,250"));
        assert!(screen.contains("STALE"));
        assert!(!screen.contains("Connection Error"));
    }

    #[test]
    fn test_render_help_popup() {
        let mut state = DashboardState::new();
        state.apply_snapshot(sample());
        state.toggle_help();
        let screen = draw(&state);
        assert!(screen.contains("Refresh now"));
    }
}
