//! askloop entry point.
//!
//! # Responsibility
//! - Parse arguments, load configuration and initialize logging.
//! - Own the store for the whole process: open it before serving, hand it to
//!   the server, and let the server close it on shutdown.

mod cli;
mod config;

use anyhow::{Context, Result};
use askloop_core::{init_logging, Store};
use clap::Parser;
use cli::{Cli, Command, ServeArgs};
use config::ConfigLoader;
use log::{info, warn};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Ping => {
            println!("askloop_core ping={}", askloop_core::ping());
            println!("askloop_core version={}", askloop_core::core_version());
            Ok(())
        }
        Command::Serve(args) => run_serve(args).await,
    }
}

async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = ConfigLoader::load(&args).context("failed to load configuration")?;

    init_logging(&config.log_level, &config.log_target())
        .map_err(anyhow::Error::msg)
        .context("failed to initialize logging")?;

    let store = Store::open(&config.db_path)
        .with_context(|| format!("failed to open database `{}`", config.db_path.display()))?;
    info!(
        "event=serve_config module=cli status=ok bind={} db_path={}",
        config.bind,
        config.db_path.display()
    );

    askloop_http::serve(Arc::new(store), config.server_settings(), shutdown_signal()).await?;
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("event=shutdown_signal module=cli status=ok signal=ctrl_c"),
        Err(err) => {
            // Without a signal handler the server runs until killed.
            warn!("event=shutdown_signal module=cli status=error error={err}");
            std::future::pending::<()>().await;
        }
    }
}
