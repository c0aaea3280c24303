//! Match record model and its per-game view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{DeckId, DecklistId, EntityId, MatchId, PlayerId};

/// Which side acted first in a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayDraw {
    Play,
    Draw,
    Neither,
}

impl PlayDraw {
    /// Classify a free-form label by its first letter, ignoring case.
    /// `p...` is play, `d...` is draw, anything else (including empty or
    /// leading whitespace) is neither.
    pub fn normalize(label: &str) -> Self {
        match label.chars().next().map(|c| c.to_ascii_lowercase()) {
            Some('p') => PlayDraw::Play,
            Some('d') => PlayDraw::Draw,
            _ => PlayDraw::Neither,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlayDraw::Play => "play",
            PlayDraw::Draw => "draw",
            PlayDraw::Neither => "neither",
        }
    }
}

impl std::fmt::Display for PlayDraw {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One game of a match, with its auxiliary data aligned by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameResult {
    pub won: bool,
    pub mulligans: Option<i32>,
    pub opponent_mulligans: Option<i32>,
    pub play_draw: PlayDraw,
}

/// A recorded match between the tracked deck and an opponent.
///
/// The per-game arrays are positionally aligned with `game_win_array`.
/// Auxiliary arrays may be absent or shorter; use [`MatchRecord::games`]
/// rather than indexing them directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Unique identifier
    pub id: MatchId,

    /// Deck the tracked side played
    pub deck_id: DeckId,

    #[serde(default)]
    pub decklist_id: Option<DecklistId>,

    #[serde(default)]
    pub player_id: Option<PlayerId>,

    #[serde(default)]
    pub opponent_name: Option<String>,

    #[serde(default)]
    pub opponent_archetype: Option<String>,

    #[serde(default)]
    pub opponent_deck_id: Option<DeckId>,

    #[serde(default)]
    pub opponent_decklist_id: Option<DecklistId>,

    #[serde(default)]
    pub opponent_player_id: Option<PlayerId>,

    /// 1 for a game win, 0 for a loss, one entry per game played
    pub game_win_array: Vec<u8>,

    /// Mulligans taken by the tracked side, per game
    #[serde(default)]
    pub mulligan_array: Option<Vec<i32>>,

    /// Mulligans taken by the opponent, per game
    #[serde(default)]
    pub opponent_mulligan_array: Option<Vec<i32>>,

    /// Raw play/draw labels as submitted, per game
    #[serde(default)]
    pub play_draw_array: Option<Vec<String>>,

    #[serde(default)]
    pub game2_sideboard: Option<Map<String, Value>>,

    #[serde(default)]
    pub game3_sideboard: Option<Map<String, Value>>,

    /// When this record was created
    pub created_at: DateTime<Utc>,
}

impl MatchRecord {
    /// Create a new MatchRecord with a generated ID.
    pub fn new(deck_id: DeckId, game_win_array: Vec<u8>) -> Self {
        Self {
            id: EntityId::generate(),
            deck_id,
            decklist_id: None,
            player_id: None,
            opponent_name: None,
            opponent_archetype: None,
            opponent_deck_id: None,
            opponent_decklist_id: None,
            opponent_player_id: None,
            game_win_array,
            mulligan_array: None,
            opponent_mulligan_array: None,
            play_draw_array: None,
            game2_sideboard: None,
            game3_sideboard: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_mulligans(mut self, mulligans: Vec<i32>) -> Self {
        self.mulligan_array = Some(mulligans);
        self
    }

    pub fn with_opponent_mulligans(mut self, mulligans: Vec<i32>) -> Self {
        self.opponent_mulligan_array = Some(mulligans);
        self
    }

    pub fn with_play_draw<S: Into<String>>(mut self, labels: Vec<S>) -> Self {
        self.play_draw_array = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Number of games played in this match.
    pub fn game_count(&self) -> usize {
        self.game_win_array.len()
    }

    /// Sum of the game win array.
    pub fn game_wins(&self) -> u32 {
        self.game_win_array.iter().map(|&g| u32::from(g)).sum()
    }

    /// Per-game view, one entry per element of `game_win_array`.
    /// Missing auxiliary positions become `None` / [`PlayDraw::Neither`].
    pub fn games(&self) -> impl Iterator<Item = GameResult> + '_ {
        let mulligans = self.mulligan_array.as_deref().unwrap_or_default();
        let opponent = self.opponent_mulligan_array.as_deref().unwrap_or_default();
        let labels = self.play_draw_array.as_deref().unwrap_or_default();

        self.game_win_array
            .iter()
            .enumerate()
            .map(move |(idx, &outcome)| GameResult {
                won: outcome == 1,
                mulligans: mulligans.get(idx).copied(),
                opponent_mulligans: opponent.get(idx).copied(),
                play_draw: labels
                    .get(idx)
                    .map_or(PlayDraw::Neither, |l| PlayDraw::normalize(l)),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_play_draw() {
        assert_eq!(PlayDraw::normalize("play"), PlayDraw::Play);
        assert_eq!(PlayDraw::normalize("PLAY"), PlayDraw::Play);
        assert_eq!(PlayDraw::normalize("p"), PlayDraw::Play);
        assert_eq!(PlayDraw::normalize("Draw"), PlayDraw::Draw);
        assert_eq!(PlayDraw::normalize("drew first"), PlayDraw::Draw);
        assert_eq!(PlayDraw::normalize("neither"), PlayDraw::Neither);
        assert_eq!(PlayDraw::normalize("unknown"), PlayDraw::Neither);
        assert_eq!(PlayDraw::normalize(""), PlayDraw::Neither);
        assert_eq!(PlayDraw::normalize(" play"), PlayDraw::Neither);
        assert_eq!(PlayDraw::normalize("\tdraw"), PlayDraw::Neither);
    }

    #[test]
    fn test_padded_label_is_neither() {
        let record =
            MatchRecord::new("deck".into(), vec![1, 0]).with_play_draw(vec![" play", "draw"]);

        let labels: Vec<PlayDraw> = record.games().map(|g| g.play_draw).collect();
        assert_eq!(labels, vec![PlayDraw::Neither, PlayDraw::Draw]);
    }

    #[test]
    fn test_play_draw_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&PlayDraw::Play).unwrap(), "\"play\"");
        assert_eq!(PlayDraw::Neither.to_string(), "neither");
    }

    #[test]
    fn test_games_aligns_arrays() {
        let record = MatchRecord::new("deck".into(), vec![1, 0, 1])
            .with_mulligans(vec![0, 2, 1])
            .with_opponent_mulligans(vec![1, 0, 0])
            .with_play_draw(vec!["play", "draw", "play"]);

        let games: Vec<GameResult> = record.games().collect();
        assert_eq!(games.len(), 3);
        assert_eq!(
            games[1],
            GameResult {
                won: false,
                mulligans: Some(2),
                opponent_mulligans: Some(0),
                play_draw: PlayDraw::Draw,
            }
        );
    }

    #[test]
    fn test_games_defaults_short_arrays() {
        let record = MatchRecord::new("deck".into(), vec![1, 1, 0])
            .with_mulligans(vec![1])
            .with_play_draw(vec!["draw"]);

        let games: Vec<GameResult> = record.games().collect();
        assert_eq!(games[0].mulligans, Some(1));
        assert_eq!(games[0].play_draw, PlayDraw::Draw);
        assert_eq!(games[2].mulligans, None);
        assert_eq!(games[2].play_draw, PlayDraw::Neither);
        assert!(games.iter().all(|g| g.opponent_mulligans.is_none()));
    }

    #[test]
    fn test_game_wins() {
        let record = MatchRecord::new("deck".into(), vec![1, 0, 1, 0, 1]);
        assert_eq!(record.game_count(), 5);
        assert_eq!(record.game_wins(), 3);
    }

    #[test]
    fn test_deserialize_minimal_record() {
        let json = r#"{
            "id": "m1",
            "deck_id": "d1",
            "game_win_array": [1, 0],
            "created_at": "2025-03-01T12:00:00Z"
        }"#;
        let record: MatchRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.game_win_array, vec![1, 0]);
        assert!(record.mulligan_array.is_none());
        assert!(record.play_draw_array.is_none());
    }
}
