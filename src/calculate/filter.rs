//! Query-time match filtering and the winrate-only reduction.

use chrono::{DateTime, Utc};

use crate::models::{MatchRecord, PlayDraw};

use super::{calculate_rate, match_winrate};

/// Criteria narrowing a set of matches. All fields are optional and combine with AND.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchFilter {
    /// Inclusive lower bound on `created_at`
    pub time_from: Option<DateTime<Utc>>,

    /// Inclusive upper bound on `created_at`
    pub time_to: Option<DateTime<Utc>>,

    /// 1-based game index for per-game winrate; `None` means match winrate
    pub game: Option<u32>,

    /// Keep only matches where every recorded mulligan count is at most this
    pub player_mulligan_lte: Option<i32>,

    /// Recognized but not applied: no opponent-mulligan check is performed.
    pub opponent_mulligan_lte: Option<i32>,

    /// Keep only matches with at least one game in this category.
    /// For [`PlayDraw::Neither`], keep only matches with no play or draw game.
    pub play_draw: Option<PlayDraw>,
}

impl MatchFilter {
    /// Bound `created_at` on either side; `None` leaves that side open.
    pub fn with_time_range(
        mut self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Self {
        self.time_from = from;
        self.time_to = to;
        self
    }

    /// Reduce to the winrate of this 1-based game.
    pub fn with_game(mut self, game: u32) -> Self {
        self.game = Some(game);
        self
    }

    /// Set the tracked side's mulligan ceiling.
    pub fn with_player_mulligan_lte(mut self, threshold: i32) -> Self {
        self.player_mulligan_lte = Some(threshold);
        self
    }

    /// Record the opponent mulligan ceiling. Has no effect on filtering.
    pub fn with_opponent_mulligan_lte(mut self, threshold: i32) -> Self {
        self.opponent_mulligan_lte = Some(threshold);
        self
    }

    /// Restrict to a play/draw category.
    pub fn with_play_draw(mut self, play_draw: PlayDraw) -> Self {
        self.play_draw = Some(play_draw);
        self
    }

    /// Check whether a match passes every active criterion.
    pub fn matches(&self, record: &MatchRecord) -> bool {
        self.within_time_range(record)
            && self.passes_player_mulligans(record)
            && self.passes_play_draw(record)
    }

    fn within_time_range(&self, record: &MatchRecord) -> bool {
        self.time_from.map_or(true, |from| record.created_at >= from)
            && self.time_to.map_or(true, |to| record.created_at <= to)
    }

    fn passes_player_mulligans(&self, record: &MatchRecord) -> bool {
        let Some(threshold) = self.player_mulligan_lte else {
            return true;
        };
        record
            .games()
            .all(|g| g.mulligans.map_or(true, |m| m <= threshold))
    }

    fn passes_play_draw(&self, record: &MatchRecord) -> bool {
        match self.play_draw {
            None => true,
            Some(PlayDraw::Neither) => record
                .games()
                .all(|g| g.play_draw == PlayDraw::Neither),
            Some(wanted) => record.games().any(|g| g.play_draw == wanted),
        }
    }
}

/// Narrow a set of matches to those passing the filter, preserving order.
pub fn filter_matches<'a>(matches: &'a [MatchRecord], filter: &MatchFilter) -> Vec<&'a MatchRecord> {
    matches.iter().filter(|m| filter.matches(m)).collect()
}

/// Winrate of game `game` (1-based) over matches that reached that game.
/// Matches with fewer games are left out of both numerator and denominator.
pub fn game_winrate_at<'a, I>(records: I, game: u32) -> f64
where
    I: IntoIterator<Item = &'a MatchRecord>,
{
    let Some(idx) = (game as usize).checked_sub(1) else {
        return 0.0;
    };

    let (wins, total) = records
        .into_iter()
        .filter_map(|m| m.game_win_array.get(idx))
        .fold((0u32, 0u32), |(wins, total), &outcome| {
            (wins + u32::from(outcome == 1), total + 1)
        });
    calculate_rate(wins, total)
}

/// Filter the matches, then reduce them to a single winrate.
///
/// Without a game index this is the match winrate; with one it is the
/// winrate of that game among matches that reached it.
pub fn compute_filtered_winrate(matches: &[MatchRecord], filter: &MatchFilter) -> f64 {
    let filtered = filter_matches(matches, filter);
    match filter.game {
        None => match_winrate(filtered),
        Some(game) => game_winrate_at(filtered, game),
    }
}
