//! HTTP boundary: one solve endpoint plus a health probe.
//!
//! The classifier is loaded once at startup and shared read-only across
//! requests; when loading failed the server still runs and every solve
//! request reports the model as unavailable.

mod handlers;
mod types;

pub use types::{ErrorBody, HealthResponse, SolveResponse};

use crate::classify::MlpClassifier;
use crate::pipeline::SudokuPipeline;
use axum::Router;
use axum::routing::{get, post};
use log::info;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<SudokuPipeline>,
    /// `None` when the parameter file failed to load at startup.
    pub classifier: Option<Arc<MlpClassifier>>,
}

impl AppState {
    pub fn new(pipeline: SudokuPipeline, classifier: Option<MlpClassifier>) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            classifier: classifier.map(Arc::new),
        }
    }
}

/// Build the router with all routes and permissive CORS (the browser
/// frontend posts directly to this service).
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health))
        .route("/solve_sudoku", post(handlers::solve_sudoku))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(addr: &str, state: AppState) -> Result<(), std::io::Error> {
    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on {addr}");
    axum::serve(listener, app).await
}
