//! Roll API endpoints

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::AppState;
use crate::system::HELP_MESSAGE;

/// Build roll router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/roll", post(roll))
        .route("/help", get(help))
}

/// Roll request
#[derive(Debug, Deserialize)]
pub struct RollBody {
    pub command: String,
    /// Seed for this roll only
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Evaluate one command
async fn roll(State(state): State<AppState>, Json(req): Json<RollBody>) -> impl IntoResponse {
    let mut randomizer = state.randomizer(req.seed);

    match state.system.evaluate(&req.command, &mut randomizer) {
        Ok(Some(reply)) => {
            info!("Rolled {:?}: condition {:?}", req.command, reply.condition);
            (StatusCode::OK, Json(reply)).into_response()
        }
        Ok(None) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse {
                error: format!("unrecognized command: {}", req.command),
            }),
        )
            .into_response(),
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
    }
}

/// Usage text
async fn help() -> impl IntoResponse {
    HELP_MESSAGE
}
