//! Derived statistics models.

use serde::{Deserialize, Serialize};

/// Winrate per play/draw category. `None` when no game fell in the category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayDrawBreakdown {
    pub play: Option<f64>,
    pub draw: Option<f64>,
    pub neither: Option<f64>,
}

/// Mulligan aggregates. Serializes as `{}` when no mulligan data exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MulliganStats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_mulligans_per_game: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_mulligans: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_mulligans: Option<i32>,
}

impl MulliganStats {
    pub fn is_empty(&self) -> bool {
        self.avg_mulligans_per_game.is_none()
            && self.max_mulligans.is_none()
            && self.min_mulligans.is_none()
    }
}

/// Aggregate statistics for a deck's matches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeckStats {
    /// Number of matches considered
    pub total_matches: u32,

    /// Number of games across all matches
    pub total_games: u32,

    /// Fraction of matches with at least two game wins (0.0 to 1.0)
    pub match_winrate: f64,

    /// Fraction of individual games won (0.0 to 1.0)
    pub game_winrate: f64,

    pub by_play_draw: PlayDrawBreakdown,

    pub mulligan_stats: MulliganStats,
}

/// Response body for winrate queries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WinrateResponse {
    pub winrate: f64,
}
