use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::Player;

#[derive(Debug, Deserialize)]
pub struct PlayerCreate {
    pub name: String,
    pub mtgo_usernames: Option<Vec<String>>,
    pub arena_usernames: Option<Vec<String>>,
    pub melee_account: Option<String>,
}

pub async fn create_player(
    State(state): State<AppState>,
    Json(body): Json<PlayerCreate>,
) -> Result<Json<Player>, ApiError> {
    if body.name.trim().is_empty() {
        return Err(ApiError::BadRequest("name must not be empty".to_string()));
    }

    let mut player =
        Player::new(body.name).with_usernames(body.mtgo_usernames, body.arena_usernames);
    player.melee_account = body.melee_account;

    let player = state.store.create_player(player).await?;
    Ok(Json(player))
}

pub async fn get_player(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
) -> Result<Json<Player>, ApiError> {
    state
        .store
        .get_player(&player_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Player not found".to_string()))
}
