//! StartupSignal service entrypoint.
//! Boots the Axum HTTP server over the aggregation pipeline.

use anyhow::Context;
use shuttle_axum::ShuttleAxum;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use startup_signal::{create_router, metrics::Metrics, Aggregator, AppState, SignalConfig};

/// Compact logs by default; JSON lines when STARTUP_SIGNAL_LOG_JSON=1.
/// `try_init` so a subscriber installed by the runtime wins.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("startup_signal=info,warn"));
    let json = std::env::var("STARTUP_SIGNAL_LOG_JSON")
        .ok()
        .is_some_and(|v| v == "1");

    let res = if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact())
            .try_init()
    };
    if res.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    init_tracing();

    let cfg = SignalConfig::load_default().context("load signal config")?;
    tracing::info!(
        sources = cfg.sources.len(),
        keywords = cfg.keywords.len(),
        "signal config loaded"
    );

    let metrics = Metrics::init(&cfg)?;
    let state = AppState::new(Aggregator::from_config(&cfg));
    let router = create_router(state).merge(metrics.router());

    Ok(router.into())
}
