//! NutriTrack engine runner
//!
//! Reads JSON commands from stdin, one per line, and writes one JSON
//! response per line to stdout. Logs go to stderr so they never mix with
//! responses.
//!
//! ## Architecture
//!
//! - Runner: command parsing and dispatch
//! - Services: validation, instrumentation and state updates
//! - Shared engine: target, accuracy and progression calculations

use anyhow::Result;
use nutritrack_backend::{config, runner::Runner};
use std::io;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = config::AppConfig::load()?;

    init_tracing(config.logging.filter.as_deref());

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if config::AppConfig::is_production() { "production" } else { "development" },
        streak_lookback_days = config.engine.streak_lookback_days,
        "Starting NutriTrack engine"
    );

    if config.engine.streak_lookback_days == 0 {
        warn!("streak_lookback_days is 0, every streak will be 0");
    }

    let runner = Runner::new(config);
    let stdin = io::stdin();
    let stdout = io::stdout();
    let summary = runner.run(stdin.lock(), stdout.lock())?;

    info!(processed = summary.processed, failed = summary.failed, "Shutdown complete");
    Ok(())
}

/// Initialize tracing/logging
///
/// `RUST_LOG` wins over the configured filter.
fn init_tracing(configured: Option<&str>) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match configured {
            Some(filter) => filter.into(),
            None if config::AppConfig::is_production() => "nutritrack_backend=info,nutritrack_engine=info".into(),
            None => "nutritrack_backend=debug,nutritrack_engine=debug".into(),
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if config::AppConfig::is_production() {
        // One JSON object per log line
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(io::stderr))
            .init();
    }
}
