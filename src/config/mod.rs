mod settings;

pub use settings::{Command, Config, DashboardSettings, ServerSettings, Settings};
