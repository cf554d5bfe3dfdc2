//! GWP API server.
//!
//! Serves groundwater potential predictions for a single district from a
//! classified overlay map, falling back to simulated features when the map
//! is missing.

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use gwp_api::config::GwpConfig;
use gwp_api::state::AppState;

#[derive(Parser, Debug)]
#[command(name = "gwp-api")]
#[command(about = "Groundwater potential prediction API")]
struct Args {
    /// Listen address
    #[arg(long, default_value = "0.0.0.0:5000", env = "GWP_LISTEN_ADDR")]
    listen: String,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Number of tokio worker threads (defaults to number of CPU cores)
    #[arg(long, env = "GWP_WORKER_THREADS")]
    worker_threads: Option<usize>,

    /// Service configuration file
    #[arg(long, default_value = "config/gwp.yaml", env = "GWP_CONFIG")]
    config: PathBuf,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(threads) = args.worker_threads {
        builder.worker_threads(threads);
    }
    let runtime = builder.build().context("Failed to build tokio runtime")?;

    runtime.block_on(run_server(args))
}

async fn run_server(args: Args) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .json()
        .init();

    info!("Starting GWP API server");

    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;

    let config = GwpConfig::load(&args.config)?;
    let state = AppState::new(config)?.with_prometheus(prometheus_handle);
    info!(
        district = %state.sampler.district(),
        map_backed = state.sampler.is_map_backed(),
        weather = state.weather.status(),
        "Application state initialized"
    );

    let app = gwp_api::build_router(Arc::new(state));

    let addr: SocketAddr = args
        .listen
        .parse()
        .with_context(|| format!("Invalid listen address: {}", args.listen))?;
    info!(address = %addr, "Listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
