/// digit-ocr server
///
/// Serves a drawing page and a JSON endpoint backed by one shared network.
/// Served by a synchronous tiny_http server; no JavaScript frameworks required.
///
/// Run with:
///   cargo run --bin ocr-server --release
/// Then open http://127.0.0.1:8000
///
/// Endpoints:
///   GET  /        — drawing page
///   GET  /ocr.js  — page script
///   POST /ocr     — `{"train": true, "trainArray": [...]}` or
///                   `{"predict": true, "image": [...]}`

mod args;
mod routes;

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tiny_http::Server;
use tracing::info;

use args::ServerArgs;
use digit_ocr::{Network, OcrService};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("digit_ocr=info,ocr_server=info")),
        )
        .init();

    let args = ServerArgs::parse();

    let weights = (!args.no_load).then_some(args.weights.as_path());
    let network = Network::initialize(args.network_config(), weights)
        .with_context(|| format!("cannot start with weights from '{}'", args.weights.display()))?;

    let server = Server::http(&args.addr)
        .map_err(|e| anyhow!("failed to bind HTTP server on {}: {e}", args.addr))?;

    let state = Arc::new(routes::AppState {
        service: OcrService::new(network, args.weights.clone()),
        max_body_bytes: args.max_body_bytes,
    });

    info!(addr = %args.addr, weights = %args.weights.display(), "ocr-server listening");

    // One thread per request; the service serialises access to the network.
    for request in server.incoming_requests() {
        let state = state.clone();
        std::thread::spawn(move || {
            routes::dispatch(request, &state);
        });
    }
    Ok(())
}
