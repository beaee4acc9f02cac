//! Relay server implementation using axum

use anyhow::{Context, Result};
use axum::http::{HeaderName, Method};
use axum::{routing::get, Router};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use quotaboard_core::collector::Interpreter;
use quotaboard_core::{QuotaCollector, ScriptCollector};

use crate::config::ServerSettings;

use super::api::{self, ApiState};

/// Explicit relay configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Listen address
    pub bind: IpAddr,
    /// Listen port
    pub port: u16,
    /// Collector script invoked per request
    pub collector_path: PathBuf,
    /// Interpreter override; inferred from the script extension when `None`
    pub interpreter: Option<Interpreter>,
}

impl ServerConfig {
    /// Build from settings, resolving the collector path
    pub fn from_settings(settings: &ServerSettings) -> Self {
        let interpreter = settings
            .interpreter
            .as_ref()
            .map(|program| Interpreter::Command {
                program: program.clone(),
                args: settings.interpreter_args.clone(),
            });

        Self {
            bind: settings.bind,
            port: settings.port,
            collector_path: settings.resolved_collector_path(),
            interpreter,
        }
    }

    /// Listen socket address
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }

    /// Collector for the configured script
    pub fn collector(&self) -> ScriptCollector {
        let collector = ScriptCollector::new(&self.collector_path);
        match &self.interpreter {
            Some(interpreter) => collector.with_interpreter(interpreter.clone()),
            None => collector,
        }
    }
}

/// HTTP relay in front of a collector
pub struct RelayServer<C> {
    config: ServerConfig,
    collector: C,
}

impl RelayServer<ScriptCollector> {
    /// Create a relay running the configured collector script
    pub fn new(config: ServerConfig) -> Self {
        let collector = config.collector();
        Self { config, collector }
    }
}

impl<C: QuotaCollector + 'static> RelayServer<C> {
    /// Create a relay with a custom collector
    pub fn with_collector(config: ServerConfig, collector: C) -> Self {
        Self { config, collector }
    }

    /// Build the router: `GET /api/quota` with permissive CORS for browser frontends
    pub fn router(self) -> Router {
        let api_state = Arc::new(ApiState {
            collector: self.collector,
        });

        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET])
            .allow_headers([HeaderName::from_static("content-type")]);

        let api_routes = Router::new()
            .route("/quota", get(api::get_quota::<C>))
            .with_state(api_state);

        Router::new().nest("/api", api_routes).layer(cors)
    }

    /// Bind the configured address and serve until the task is dropped
    pub async fn run(self) -> Result<()> {
        let addr = self.config.addr();
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind relay server to {}", addr))?;
        self.serve(listener).await
    }

    /// Serve on an already-bound listener
    pub async fn serve(self, listener: TcpListener) -> Result<()> {
        let local = listener.local_addr()?;
        tracing::info!("Server running on http://{}", local);
        tracing::info!("Collector: {}", self.config.collector_path.display());

        axum::serve(listener, self.router()).await?;
        Ok(())
    }

    /// Serve on an already-bound listener in a background task
    pub fn start(self, listener: TcpListener) -> tokio::task::JoinHandle<Result<()>> {
        tokio::spawn(async move { self.serve(listener).await })
    }
}
