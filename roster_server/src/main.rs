mod config;
mod errors;
mod routes;
mod state;

use roster_core::solver::{probe, MicroLpSolver};
use roster_core::ScheduleEngine;

use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), String> {
    tracing_subscriber::fmt::init();

    let config = config::load()?;

    // A broken solver backend must fail startup, not degrade requests
    let solver = MicroLpSolver::new();
    probe(&solver).map_err(|e| format!("solver unavailable: {}", e))?;

    let engine = ScheduleEngine::new(config.spans.clone(), solver);
    let app = routes::router(AppState::new(engine));

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| format!("cannot bind {}: {}", addr, e))?;

    tracing::info!(%addr, spans = config.spans.len(), "roster server listening");

    axum::serve(listener, app)
        .await
        .map_err(|e| format!("server error: {}", e))
}
