use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use crate::api::state::AppState;
use crate::api::{require_deck, ApiError};
use crate::models::{Decklist, EntityId};

#[derive(Debug, Deserialize)]
pub struct DecklistCreate {
    pub deck_id: String,
    pub mainboard: Option<Value>,
    pub sideboard: Option<Value>,
}

pub async fn create_decklist(
    State(state): State<AppState>,
    Json(body): Json<DecklistCreate>,
) -> Result<Json<Decklist>, ApiError> {
    require_deck(&state, &body.deck_id).await?;

    let decklist =
        Decklist::new(EntityId::from(body.deck_id)).with_boards(body.mainboard, body.sideboard);
    let decklist = state.store.create_decklist(decklist).await?;
    Ok(Json(decklist))
}

pub async fn get_decklist(
    State(state): State<AppState>,
    Path(decklist_id): Path<String>,
) -> Result<Json<Decklist>, ApiError> {
    state
        .store
        .get_decklist(&decklist_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Decklist not found".to_string()))
}
