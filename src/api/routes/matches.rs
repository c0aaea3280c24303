use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::api::state::AppState;
use crate::api::validate::{
    parse_game_results, parse_mulligans, parse_play_draw_labels, LooseValue,
};
use crate::api::{require_deck, ApiError};
use crate::models::{EntityId, MatchRecord};

#[derive(Debug, Deserialize)]
pub struct MatchCreate {
    pub deck_id: String,
    pub decklist_id: Option<String>,
    pub player_id: Option<String>,
    pub opponent_name: Option<String>,
    pub opponent_archetype: Option<String>,
    pub opponent_deck_id: Option<String>,
    pub opponent_decklist_id: Option<String>,
    pub opponent_player_id: Option<String>,
    /// e.g. `["1", "0", "1"]` for win/loss/win
    #[serde(default)]
    pub game_win_array: Vec<LooseValue>,
    pub mulligan_array: Option<Vec<LooseValue>>,
    pub opponent_mulligan_array: Option<Vec<LooseValue>>,
    /// e.g. `["play", "draw", "play"]`
    pub play_draw_array: Option<Vec<Option<String>>>,
    pub game2_sideboard: Option<Map<String, Value>>,
    pub game3_sideboard: Option<Map<String, Value>>,
}

impl MatchCreate {
    /// Validate the payload into a new match record.
    pub fn into_record(self) -> Result<MatchRecord, ApiError> {
        let games = parse_game_results(&self.game_win_array)?;
        let game_count = games.len();

        let mut record = MatchRecord::new(EntityId::from(self.deck_id), games);
        record.mulligan_array =
            parse_mulligans("mulligan_array", self.mulligan_array.as_deref(), game_count)?;
        record.opponent_mulligan_array = parse_mulligans(
            "opponent_mulligan_array",
            self.opponent_mulligan_array.as_deref(),
            game_count,
        )?;
        record.play_draw_array = parse_play_draw_labels(self.play_draw_array, game_count)?;

        record.decklist_id = self.decklist_id.map(EntityId::from);
        record.player_id = self.player_id.map(EntityId::from);
        record.opponent_name = self.opponent_name;
        record.opponent_archetype = self.opponent_archetype;
        record.opponent_deck_id = self.opponent_deck_id.map(EntityId::from);
        record.opponent_decklist_id = self.opponent_decklist_id.map(EntityId::from);
        record.opponent_player_id = self.opponent_player_id.map(EntityId::from);
        record.game2_sideboard = self.game2_sideboard;
        record.game3_sideboard = self.game3_sideboard;

        Ok(record)
    }
}

pub async fn create_match(
    State(state): State<AppState>,
    Json(body): Json<MatchCreate>,
) -> Result<Json<MatchRecord>, ApiError> {
    let record = body.into_record()?;
    require_deck(&state, record.deck_id.as_str()).await?;

    if let Some(ref decklist_id) = record.decklist_id {
        if state.store.get_decklist(decklist_id.as_str()).await?.is_none() {
            return Err(ApiError::NotFound("Decklist not found".to_string()));
        }
    }
    if let Some(ref player_id) = record.player_id {
        if state.store.get_player(player_id.as_str()).await?.is_none() {
            return Err(ApiError::NotFound("Player not found".to_string()));
        }
    }

    let record = state.store.create_match(record).await?;
    Ok(Json(record))
}

pub async fn get_match(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
) -> Result<Json<MatchRecord>, ApiError> {
    state
        .store
        .get_match(&match_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Match not found".to_string()))
}
