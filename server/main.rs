/// soil-analyzer HTTP server
///
/// Accepts a soil photo on `POST /analyze/` and answers with a nutrient
/// deficiency label and a fertilizer recommendation.
/// Served by a synchronous tiny_http server, one thread per request.
///
/// Run with:
///   cargo run --release
/// Then:
///   curl -F "file=@soil.jpg" http://127.0.0.1:8000/analyze/
///
/// Environment:
///   SOIL_ANALYZER_HOST  bind address   (default 0.0.0.0)
///   SOIL_ANALYZER_PORT  bind port      (default 8000)
///   SOIL_ANALYZER_LOG   log level      (default info)

mod config;
mod cors;
mod error;
mod handlers;
mod routes;
mod util;

use std::sync::Arc;
use tiny_http::Server;
use tracing::info;

use soil_analyzer::Classifier;

use crate::config::ServerConfig;
use crate::error::ServerError;

fn init_logging(config: &ServerConfig) {
    tracing_subscriber::fmt().with_max_level(config.log_level).init();
}

fn main() -> Result<(), ServerError> {
    let config = ServerConfig::from_env()?;
    init_logging(&config);

    let addr = config.addr();
    let server = Server::http(&addr).map_err(|e| ServerError::Bind {
        addr: addr.clone(),
        reason: e.to_string(),
    })?;

    // Read-only after construction; shared without a lock.
    let classifier = Arc::new(Classifier::default());

    info!(%addr, "soil-analyzer listening; POST images to /analyze/");

    for request in server.incoming_requests() {
        let classifier = Arc::clone(&classifier);
        std::thread::spawn(move || {
            routes::dispatch(request, classifier);
        });
    }
    Ok(())
}
