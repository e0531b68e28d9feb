use std::io;
use std::sync::Arc;

use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod input;
mod views;

use app::ConsoleApp;
use shared_config::AppConfig;
use shared_utils::{CpfChecksumValidator, SystemClock};

fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Logs go to stderr so they never interleave with the menus
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = AppConfig::from_env();
    info!("Starting clinic console");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut app = ConsoleApp::new(
        stdin.lock(),
        stdout.lock(),
        &config,
        Arc::new(SystemClock),
        Arc::new(CpfChecksumValidator),
    );

    app.run()?;
    Ok(())
}
