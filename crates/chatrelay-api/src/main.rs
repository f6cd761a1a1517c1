//! chatrelay entry point.
//!
//! Binary name: `chatrelay`
//!
//! Loads `.env`, parses CLI arguments, initializes tracing and the relay
//! service, then serves `POST /api/chat` until Ctrl+C or SIGTERM.

mod cli;
mod http;
mod state;

use clap::Parser;

use chatrelay_infra::config::load_relay_config;
use chatrelay_observe::tracing_setup::{TracingOptions, init_tracing, shutdown_tracing};

use cli::Cli;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; the process environment still applies.
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    init_tracing(&TracingOptions {
        default_filter: cli.log_filter().to_string(),
        format: cli.log_format,
        enable_otel: cli.otel,
    })
    .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let args = cli.serve_args();
    let config = load_relay_config(&args.config).await;
    tracing::debug!(?config, "Relay configuration loaded");

    let state = AppState::init(&config);
    let router = http::router::build_router(state);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, model = %config.model, "chatrelay listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    shutdown_tracing();

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {e}");
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
                tracing::warn!("Failed to install SIGTERM handler: {e}");
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
}
