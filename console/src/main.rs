mod activity;
mod cli;
mod client;
mod commands;
mod config;
mod views;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::config::Settings;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    // Settings come first so the persisted debug flag can pick the
    // default log level; RUST_LOG still wins when set.
    let settings = Settings::load().unwrap_or_default();
    let default_filter = if settings.debug { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = commands::run(cli, settings).await {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
