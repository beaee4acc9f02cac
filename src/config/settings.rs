use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "Antigravity quota dashboard")]
pub struct Config {
    /// Enable debug mode
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Relay endpoint polled by the dashboard
    #[arg(short, long)]
    pub url: Option<String>,

    /// Polling interval in seconds
    #[arg(short = 'i', long)]
    pub poll_interval: Option<u64>,

    /// Subcommand (defaults to the dashboard)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the relay server
    Serve {
        /// Listen port
        #[arg(short, long)]
        port: Option<u16>,

        /// Listen address
        #[arg(short, long)]
        bind: Option<IpAddr>,

        /// Collector script invoked per request
        #[arg(long)]
        collector: Option<PathBuf>,
    },
    /// Run the dashboard against a relay server (default)
    Dashboard,
    /// Run the dashboard against a built-in sample document (no language server required)
    Demo,
}

impl Config {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Check if running the relay server
    pub fn is_serve_mode(&self) -> bool {
        matches!(self.command, Some(Command::Serve { .. }))
    }

    /// Check if running in demo mode
    pub fn is_demo_mode(&self) -> bool {
        matches!(self.command, Some(Command::Demo))
    }
}

/// Application settings (from config file)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Relay server settings
    #[serde(default)]
    pub server: ServerSettings,

    /// Dashboard settings
    #[serde(default)]
    pub dashboard: DashboardSettings,
}

/// Relay server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Listen address
    #[serde(default = "default_bind")]
    pub bind: IpAddr,

    /// Collector script. Relative paths resolve against the executable's directory.
    #[serde(default = "default_collector_path")]
    pub collector_path: PathBuf,

    /// Interpreter for the collector (inferred from the extension when unset)
    #[serde(default)]
    pub interpreter: Option<String>,

    /// Arguments placed before the collector path
    #[serde(default)]
    pub interpreter_args: Vec<String>,
}

fn default_port() -> u16 {
    3001
}

fn default_bind() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}

fn default_collector_path() -> PathBuf {
    PathBuf::from("fetch_quota.ps1")
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind: default_bind(),
            collector_path: default_collector_path(),
            interpreter: None,
            interpreter_args: Vec::new(),
        }
    }
}

impl ServerSettings {
    /// Collector path with relative paths anchored at the executable's directory
    pub fn resolved_collector_path(&self) -> PathBuf {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));
        resolve_relative_to(&self.collector_path, exe_dir.as_deref())
    }
}

/// Dashboard settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSettings {
    /// Relay endpoint
    #[serde(default = "default_url")]
    pub url: String,

    /// Polling interval in seconds
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
}

fn default_url() -> String {
    "http://localhost:3001/api/quota".to_string()
}

fn default_poll_interval() -> u64 {
    30
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            url: default_url(),
            poll_interval_secs: default_poll_interval(),
        }
    }
}

fn resolve_relative_to(path: &Path, base: Option<&Path>) -> PathBuf {
    match base {
        Some(base) if path.is_relative() => base.join(path),
        _ => path.to_path_buf(),
    }
}

impl Settings {
    /// Load settings from config file or use defaults
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        // Try custom path first
        if let Some(p) = path {
            if p.exists() {
                return Self::load_file(p);
            }
        }

        // Try default config locations
        let default_paths = [
            dirs::config_dir().map(|p| p.join("quotaboard/config.toml")),
            dirs::home_dir().map(|p| p.join(".config/quotaboard/config.toml")),
            dirs::home_dir().map(|p| p.join(".quotaboard.toml")),
        ];

        for path in default_paths.iter().flatten() {
            if path.exists() {
                return Self::load_file(path);
            }
        }

        // Return defaults if no config file found
        Ok(Self::default())
    }

    fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Merge CLI config into settings (CLI takes precedence)
    pub fn merge_cli(&mut self, cli: &Config) {
        if let Some(url) = &cli.url {
            self.dashboard.url = url.clone();
        }
        if let Some(poll_interval) = cli.poll_interval {
            self.dashboard.poll_interval_secs = poll_interval;
        }
        if let Some(Command::Serve {
            port,
            bind,
            collector,
        }) = &cli.command
        {
            if let Some(port) = port {
                self.server.port = *port;
            }
            if let Some(bind) = bind {
                self.server.bind = *bind;
            }
            if let Some(collector) = collector {
                self.server.collector_path = collector.clone();
            }
        }
    }

    /// Validate and normalize settings values
    ///
    /// Ensures the poll interval is at least one second.
    pub fn validate(&mut self) {
        const MIN_POLL_INTERVAL_SECS: u64 = 1;

        if self.dashboard.poll_interval_secs < MIN_POLL_INTERVAL_SECS {
            self.dashboard.poll_interval_secs = MIN_POLL_INTERVAL_SECS;
        }
    }
}
