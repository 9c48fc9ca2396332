/// digit-viz Studio
///
/// Draw a digit on a 28×28 grid in the browser and watch the hidden and
/// output layers of a small network react to it. Predictions come from an
/// external service; this server owns the drawing session and the picture.
///
/// Run with:
///   cargo run --bin studio --release
/// Then open http://127.0.0.1:7878

mod state;
mod render;
mod routes;
mod handlers;
mod util;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tiny_http::Server;
use tracing::info;

use digit_viz::{HttpPredictor, VizConfig};

use state::StudioState;

#[derive(Parser)]
#[command(name = "studio")]
#[command(about = "Interactive digit drawing and layer visualization")]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(long, default_value = "digit-viz.toml")]
    config: PathBuf,

    /// Address to listen on (overrides config)
    #[arg(long)]
    addr: Option<String>,

    /// Prediction service URL (overrides config)
    #[arg(long)]
    endpoint: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("digit_viz=info,studio=info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = VizConfig::load(Some(cli.config.as_path()))
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    if let Some(addr) = cli.addr {
        config.server.addr = addr;
    }
    if let Some(endpoint) = cli.endpoint {
        config.predict.endpoint = endpoint;
    }

    let predictor = HttpPredictor::new(config.predict.endpoint.clone(), config.layers, config.predict.timeout());
    let server = Server::http(config.server.addr.as_str())
        .map_err(|e| anyhow!("failed to bind {}: {}", config.server.addr, e))?;

    info!(addr = %config.server.addr, "studio listening, open http://{}", config.server.addr);
    info!(
        endpoint = %predictor.endpoint(),
        grid = config.grid.size,
        hidden1 = config.layers.hidden1,
        hidden2 = config.layers.hidden2,
        output = config.layers.output,
        seed = config.layout.seed,
        ordering = ?config.predict.ordering,
        "session configured"
    );

    let shared_state = Arc::new(Mutex::new(StudioState::new(config, Arc::new(predictor))));

    // Each request is dispatched on its own thread so the SSE handler
    // (which blocks for as long as the page is open) does not stall
    // drawing requests.
    for request in server.incoming_requests() {
        let state_clone = shared_state.clone();
        std::thread::spawn(move || {
            routes::dispatch(request, state_clone);
        });
    }

    Ok(())
}
