use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::validate::{parse_game_index, parse_play_draw_filter, parse_timestamp};
use crate::api::{require_deck, ApiError};
use crate::calculate::{compute_filtered_winrate, compute_stats, MatchFilter};
use crate::models::{Deck, DeckStats, WinrateResponse};

#[derive(Debug, Deserialize)]
pub struct DeckCreate {
    pub name: String,
    pub format: Option<String>,
    pub colors: Option<String>,
    pub raw_data: Option<Map<String, Value>>,
}

pub async fn create_deck(
    State(state): State<AppState>,
    Json(body): Json<DeckCreate>,
) -> Result<Json<Deck>, ApiError> {
    if body.name.trim().is_empty() {
        return Err(ApiError::BadRequest("name must not be empty".to_string()));
    }

    let mut deck = Deck::new(body.name);
    deck.format = body.format;
    deck.colors = body.colors;
    deck.raw_data = body.raw_data;

    let deck = state.store.create_deck(deck).await?;
    Ok(Json(deck))
}

pub async fn get_deck(
    State(state): State<AppState>,
    Path(deck_id): Path<String>,
) -> Result<Json<Deck>, ApiError> {
    require_deck(&state, &deck_id).await.map(Json)
}

pub async fn deck_stats(
    State(state): State<AppState>,
    Path(deck_id): Path<String>,
) -> Result<Json<DeckStats>, ApiError> {
    require_deck(&state, &deck_id).await?;

    let matches = state
        .store
        .fetch_matches_for_deck(&deck_id, None, None)
        .await?;
    let stats = compute_stats(&matches);

    debug!(
        "Deck {} stats: {} matches, {} games",
        deck_id, stats.total_matches, stats.total_games
    );
    Ok(Json(stats))
}

#[derive(Debug, Default, Deserialize)]
pub struct WinrateParams {
    /// ISO-8601 lower bound on match creation time
    pub time_from: Option<String>,
    /// ISO-8601 upper bound on match creation time
    pub time_to: Option<String>,
    /// 1-based game index; match winrate when omitted
    pub game: Option<i64>,
    pub player_mulligan_lte: Option<i32>,
    pub opponent_mulligan_lte: Option<i32>,
    /// "play", "draw" or "neither"
    pub play_draw: Option<String>,
}

impl WinrateParams {
    /// Validate the raw query into match filter criteria.
    pub fn into_filter(self) -> Result<MatchFilter, ApiError> {
        let filter = MatchFilter {
            time_from: parse_timestamp("time_from", self.time_from.as_deref())?,
            time_to: parse_timestamp("time_to", self.time_to.as_deref())?,
            game: parse_game_index(self.game)?,
            player_mulligan_lte: self.player_mulligan_lte,
            opponent_mulligan_lte: self.opponent_mulligan_lte,
            play_draw: parse_play_draw_filter(self.play_draw.as_deref()),
        };
        Ok(filter)
    }
}

pub async fn deck_winrate(
    State(state): State<AppState>,
    Path(deck_id): Path<String>,
    Query(params): Query<WinrateParams>,
) -> Result<Json<WinrateResponse>, ApiError> {
    let filter = params.into_filter()?;
    require_deck(&state, &deck_id).await?;

    if filter.opponent_mulligan_lte.is_some() {
        debug!("opponent_mulligan_lte is accepted but not applied");
    }

    let matches = state
        .store
        .fetch_matches_for_deck(&deck_id, filter.time_from, filter.time_to)
        .await?;
    let winrate = compute_filtered_winrate(&matches, &filter);

    debug!(
        "Deck {} winrate {:.3} over {} fetched matches ({:?})",
        deck_id,
        winrate,
        matches.len(),
        filter
    );
    Ok(Json(WinrateResponse { winrate }))
}
