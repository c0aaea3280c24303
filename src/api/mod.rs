//! REST API endpoints.
//!
//! Axum-based HTTP API for recording decks, players and matches, and for
//! querying deck statistics.

pub mod routes;
pub mod state;
pub mod validate;

use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ConfigError;
use crate::models::Deck;
use crate::storage::StorageError;
use state::AppState;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        tracing::error!("Storage failure: {}", e);
        ApiError::Internal(e.to_string())
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Look up a deck or fail with "Deck not found".
pub async fn require_deck(state: &AppState, deck_id: &str) -> Result<Deck, ApiError> {
    state
        .store
        .get_deck(deck_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Deck not found".to_string()))
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::health::root))
        .route("/deck", post(routes::decks::create_deck))
        .route("/deck/:deck_id", get(routes::decks::get_deck))
        .route("/deck/:deck_id/stats", get(routes::decks::deck_stats))
        .route("/deck/:deck_id/winrate", get(routes::decks::deck_winrate))
        .route("/decklist", post(routes::decklists::create_decklist))
        .route("/decklist/:decklist_id", get(routes::decklists::get_decklist))
        .route("/player", post(routes::players::create_player))
        .route("/player/:player_id", get(routes::players::get_player))
        .route("/match", post(routes::matches::create_match))
        .route("/match/:match_id", get(routes::matches::get_match))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS layer for the configured origin; "*" allows any origin.
pub fn cors_layer(origin: &str) -> Result<CorsLayer, ConfigError> {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origin.trim() == "*" {
        return Ok(layer.allow_origin(Any));
    }

    let value = HeaderValue::from_str(origin.trim())
        .map_err(|e| ConfigError::ValidationError(format!("invalid CORS origin {:?}: {}", origin, e)))?;
    Ok(layer.allow_origin(value))
}
