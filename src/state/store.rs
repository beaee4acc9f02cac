use chrono::{DateTime, Local};
use parking_lot::RwLock;
use std::sync::Arc;

use quotaboard_core::QuotaSnapshot;

/// Shared state type alias
pub type SharedState = Arc<RwLock<DashboardState>>;

/// Spinner frames for the loading animation
pub const SPINNER_FRAMES: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// What the dashboard should currently show
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View<'a> {
    /// First poll still pending
    Loading,
    /// No snapshot yet and the last poll failed
    Error(&'a str),
    /// Latest snapshot, with the last poll's error if it failed
    Dashboard {
        snapshot: &'a QuotaSnapshot,
        stale_error: Option<&'a str>,
    },
}

/// Dashboard presentation state
#[derive(Debug)]
pub struct DashboardState {
    /// True until the first poll completes
    pub loading: bool,
    /// Message from the most recent failed poll
    pub error: Option<String>,
    /// Most recent successful snapshot
    pub data: Option<QuotaSnapshot>,
    /// A poll is in flight
    pub fetching: bool,
    /// When `data` was last replaced
    pub last_updated: Option<DateTime<Local>>,
    /// Whether help popup is shown
    pub show_help: bool,
    /// Whether the app is running
    pub running: bool,
    /// Spinner animation frame counter
    pub spinner_frame: usize,
    /// Last spinner update time
    last_spinner_update: std::time::Instant,
}

impl DashboardState {
    /// Create the initial state: loading, no data, no error
    pub fn new() -> Self {
        Self {
            loading: true,
            error: None,
            data: None,
            fetching: false,
            last_updated: None,
            show_help: false,
            running: true,
            spinner_frame: 0,
            last_spinner_update: std::time::Instant::now(),
        }
    }

    /// Create a shared state
    pub fn shared() -> SharedState {
        Arc::new(RwLock::new(Self::new()))
    }

    /// A poll started
    pub fn begin_poll(&mut self) {
        self.fetching = true;
    }

    /// A poll succeeded: replace the snapshot and clear the error
    pub fn apply_snapshot(&mut self, snapshot: QuotaSnapshot) {
        self.data = Some(snapshot);
        self.error = None;
        self.loading = false;
        self.fetching = false;
        self.last_updated = Some(Local::now());
    }

    /// A poll failed: keep whatever snapshot is shown
    pub fn apply_failure(&mut self, message: String) {
        self.error = Some(message);
        self.loading = false;
        self.fetching = false;
    }

    /// Current view derived from the flags
    pub fn view(&self) -> View<'_> {
        match (&self.data, &self.error) {
            (Some(snapshot), error) => View::Dashboard {
                snapshot,
                stale_error: error.as_deref(),
            },
            (None, Some(error)) if !self.loading => View::Error(error),
            _ => View::Loading,
        }
    }

    /// Advance the spinner animation frame (time-based, ~150ms per frame)
    pub fn tick_spinner(&mut self) {
        let elapsed = self.last_spinner_update.elapsed();
        if elapsed.as_millis() >= 150 {
            self.last_spinner_update = std::time::Instant::now();
            self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
        }
    }

    /// Get the current spinner character
    pub fn spinner_char(&self) -> char {
        SPINNER_FRAMES[self.spinner_frame]
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn quit(&mut self) {
        self.running = false;
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}
