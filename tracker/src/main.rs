//! SlimPlan tracker CLI
//!
//! Follows a fixed weight-loss plan, records daily check-ins and body
//! measurements, and reports progress. Results go to stdout as JSON; logs go
//! to stderr.

use anyhow::Result;
use clap::Parser;
use slimplan_tracker::cli::{self, Cli, Command};
use slimplan_tracker::config::{LoggingConfig, TrackerConfig};
use slimplan_tracker::services::today;
use slimplan_tracker::store;
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let args = Cli::parse();

    let mut config = TrackerConfig::load()?;
    init_tracing(&config.logging);

    if let Some(dir) = args.data_dir {
        config.storage.data_dir = dir;
    }

    debug!(
        version = env!("CARGO_PKG_VERSION"),
        env = if TrackerConfig::is_production() { "production" } else { "development" },
        backend = ?config.storage.backend,
        "Starting SlimPlan tracker"
    );

    let store = store::open(&config.storage);
    let today = today();

    // Seed on first launch; `clear` must leave the store empty
    if !matches!(args.command, Command::Clear { .. } | Command::Init)
        && store::initialize(store.as_ref(), today).await?
    {
        info!("First run, storage seeded");
    }

    match cli::run(args.command, store.as_ref(), today).await {
        Ok(output) => {
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        }
        Err(e) => {
            error!(code = e.code(), "{}", e);
            let body = serde_json::json!({
                "error": {
                    "code": e.code(),
                    "message": e.to_string(),
                    "field": e.field(),
                }
            });
            eprintln!("{}", serde_json::to_string_pretty(&body)?);
            std::process::exit(1);
        }
    }
}

/// Initialize tracing/logging
fn init_tracing(logging: &LoggingConfig) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match &logging.filter {
            Some(filter) => filter.into(),
            None if TrackerConfig::is_production() => "slimplan_tracker=info".into(),
            None => "slimplan_tracker=warn".into(),
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if logging.json || TrackerConfig::is_production() {
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .init();
    }
}
