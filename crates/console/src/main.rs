mod cli;
mod logging;

use anyhow::Context;
use clap::Parser;
use health_console::config::load_console_config;
use health_console::{build_router, AppState};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::cli::Args;
use crate::logging::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let _log_guard = init_tracing(args.log_dir.as_deref(), args.log_to_stderr)?;

    let config = load_console_config(args.config.as_deref())?;
    let listen_addr = args
        .listen_addr
        .clone()
        .unwrap_or_else(|| config.listen_addr().to_string());
    info!(
        listen_addr = %listen_addr,
        config = ?args.config,
        provider = config.advice.provider.as_str(),
        "console starting"
    );

    let state = AppState::from_settings(&config.advice, config.assets);
    let app = build_router(state);

    let listener = TcpListener::bind(&listen_addr)
        .await
        .with_context(|| format!("failed to bind {listen_addr}"))?;
    info!(addr = %listen_addr, "console listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown())
        .await?;
    info!("console shutting down");
    Ok(())
}

async fn wait_for_shutdown() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
