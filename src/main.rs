use anyhow::{Context, Result};
use std::net::{IpAddr, Ipv4Addr};
use tokio::net::TcpListener;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use quotaboard::config::{Config, ServerSettings, Settings};
use quotaboard::ui::App;
use quotaboard::web::{RelayServer, ServerConfig};
use quotaboard_core::StaticCollector;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Config::parse_args();

    // Setup logging; the guard flushes the log file on exit
    let _guard = setup_logging(cli.debug, !cli.is_serve_mode());

    // Load settings
    let mut settings = Settings::load(cli.config.as_ref())?;
    settings.merge_cli(&cli);
    settings.validate();

    if cli.is_serve_mode() {
        return RelayServer::new(ServerConfig::from_settings(&settings.server))
            .run()
            .await;
    }

    if cli.is_demo_mode() {
        return run_demo(settings).await;
    }

    // Run the dashboard
    let mut app = App::new(settings);
    app.run().await
}

/// Dashboard against an in-process relay serving the sample document
async fn run_demo(mut settings: Settings) -> Result<()> {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
        .await
        .context("Failed to bind demo relay")?;
    let addr = listener.local_addr()?;

    let config = ServerConfig::from_settings(&ServerSettings {
        bind: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: addr.port(),
        ..ServerSettings::default()
    });
    let relay = RelayServer::with_collector(config, StaticCollector::sample()).start(listener);

    settings.dashboard.url = format!("http://{}/api/quota", addr);
    info!("Demo relay on {}", settings.dashboard.url);

    let mut app = App::new(settings);
    let result = app.run().await;
    relay.abort();
    result
}

fn setup_logging(debug: bool, to_file: bool) -> Option<WorkerGuard> {
    let filter = if debug {
        EnvFilter::new("quotaboard=debug,quotaboard_core=debug")
    } else {
        EnvFilter::new("quotaboard=info,quotaboard_core=info")
    };

    // The dashboard owns the terminal, so it logs to a file instead
    let log_dir = dirs::cache_dir().map(|dir| dir.join("quotaboard"));
    if let Some(dir) = log_dir.filter(|_| to_file) {
        if std::fs::create_dir_all(&dir).is_ok() {
            let appender = tracing_appender::rolling::never(dir, "dashboard.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(writer)
                        .with_ansi(false)
                        .with_target(false),
                )
                .init();
            return Some(guard);
        }
        return None;
    }

    if to_file {
        // No usable log location; stay silent rather than draw over the UI
        return None;
    }

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
    None
}
