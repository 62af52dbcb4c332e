//! Server startup and shutdown logic

use anyhow::{Context, Result};
use axum::Router;
use podprobe_config::ProbeConfig;
use podprobe_core::AwsBackend;
use podprobe_rest_api::{create_rest_app, AppConfig, ProbeContext};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Server application struct
pub struct Server {
    config: ProbeConfig,
    context: ProbeContext,
}

impl Server {
    /// Initialise logging and wire the probe against the real environment
    pub fn new(config: ProbeConfig) -> Result<Self> {
        podprobe_logging::init_logging_from_config(&config.logging)?;

        let context = ProbeContext::from_config(&config, Arc::new(AwsBackend::new()));
        Ok(Self::with_context(config, context))
    }

    pub fn with_context(config: ProbeConfig, context: ProbeContext) -> Self {
        Self { config, context }
    }

    /// Build the complete application router
    pub fn build_app(&self) -> Router {
        create_rest_app(self.context.clone(), AppConfig::from(&self.config.server))
    }

    /// Serve until a shutdown signal arrives. In-flight requests get
    /// `shutdown_timeout_seconds` to finish before the server stops waiting.
    pub async fn start(self) -> Result<()> {
        let app = self.build_app();
        let addr = self.config.server.socket_address();

        tracing::info!("Starting podprobe on {}", addr);
        self.log_config_summary();

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        tracing::info!("Server listening on {}", addr);

        let (signalled_tx, mut signalled_rx) = watch::channel(false);
        let serve = async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_signal().await;
                    let _ = signalled_tx.send(true);
                })
                .await
        };

        let drain_timeout = Duration::from_secs(self.config.server.shutdown_timeout_seconds);
        let drain_deadline = async move {
            if signalled_rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
            tokio::time::sleep(drain_timeout).await;
        };

        tokio::select! {
            result = serve => result.context("Server error")?,
            _ = drain_deadline => {
                tracing::warn!("In-flight requests did not finish within {:?}, stopping", drain_timeout);
            }
        }

        tracing::info!("Server shutdown complete");
        Ok(())
    }

    /// Log configuration summary
    fn log_config_summary(&self) {
        let server = &self.config.server;
        tracing::info!("=== Podprobe Configuration ===");
        tracing::info!("Bind Address: {}", server.socket_address());
        tracing::info!("API Prefix: {}", server.api_prefix);
        tracing::info!("CORS: {}", enabled(server.enable_cors));
        tracing::info!("Request ID: {}", enabled(server.enable_request_id));
        tracing::info!("Tracing: {}", enabled(server.enable_tracing));
        tracing::info!("Working Directory: {}", self.config.filesystem.working_dir);
        tracing::info!("Metadata Directory: {}", self.config.cloud.metadata_dir);
        tracing::info!("Fallback Region: {}", self.config.cloud.fallback_region);
        tracing::info!("==============================");
    }
}

fn enabled(flag: bool) -> &'static str {
    if flag {
        "Enabled"
    } else {
        "Disabled"
    }
}

/// Resolves on Ctrl+C or SIGTERM. A handler that cannot be installed is
/// logged and never fires.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
