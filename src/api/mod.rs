//! HTTP API module - roll endpoints

mod roll;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::dice::RngRandomizer;
use crate::system::GameSystem;

pub use roll::{ErrorResponse, RollBody};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub system: Arc<GameSystem>,
    /// Base seed; each request without its own seed takes the next one
    pub seed: Option<u64>,
    pub requests: Arc<AtomicU64>,
}

impl AppState {
    /// Create state around a game system
    pub fn new(system: GameSystem, seed: Option<u64>) -> Self {
        Self {
            system: Arc::new(system),
            seed,
            requests: Arc::new(AtomicU64::new(0)),
        }
    }

    /// A fresh randomizer for one request
    pub fn randomizer(&self, request_seed: Option<u64>) -> RngRandomizer<rand::rngs::StdRng> {
        let seed = request_seed.or_else(|| {
            let n = self.requests.fetch_add(1, Ordering::Relaxed);
            self.seed.map(|base| base.wrapping_add(n))
        });
        RngRandomizer::from_seed_option(seed)
    }
}

/// Build the API router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/", get(root))
        .merge(roll::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Root endpoint
async fn root() -> impl IntoResponse {
    Json(RootResponse {
        name: "mythroll",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
struct RootResponse {
    name: &'static str,
    version: &'static str,
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthResponse { status: "healthy" }))
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}
