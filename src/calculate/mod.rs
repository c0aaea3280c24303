//! Statistics calculation engine.
//!
//! Reduces a set of match records into deck statistics:
//! - Match and game winrates
//! - Winrate split by play/draw
//! - Mulligan aggregates
//!
//! Everything here is a pure function over borrowed records.

pub mod filter;

pub use filter::{compute_filtered_winrate, filter_matches, MatchFilter};

use crate::models::{DeckStats, MatchRecord, MulliganStats, PlayDraw, PlayDrawBreakdown};

/// Game wins needed for a match to count as won.
pub const MATCH_WIN_THRESHOLD: u32 = 2;

/// A match is won when it holds at least two game wins.
///
/// Assumes best-of-three but does not check the array length, so
/// `[1, 0, 1, 0, 1]` is a win by the same rule.
pub fn is_match_win(record: &MatchRecord) -> bool {
    record.game_wins() >= MATCH_WIN_THRESHOLD
}

/// Calculate a rate, returning 0.0 for an empty denominator.
pub fn calculate_rate(wins: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        wins as f64 / total as f64
    }
}

/// Calculate match winrate over a set of records.
pub fn match_winrate<'a, I>(records: I) -> f64
where
    I: IntoIterator<Item = &'a MatchRecord>,
{
    let (wins, total) = records.into_iter().fold((0u32, 0u32), |(wins, total), m| {
        (wins + u32::from(is_match_win(m)), total + 1)
    });
    calculate_rate(wins, total)
}

#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    wins: u32,
    games: u32,
}

impl Tally {
    fn record(&mut self, won: bool) {
        self.games += 1;
        if won {
            self.wins += 1;
        }
    }

    fn rate(&self) -> Option<f64> {
        (self.games > 0).then(|| calculate_rate(self.wins, self.games))
    }
}

/// Compute deck statistics over a set of match records.
pub fn compute_stats(matches: &[MatchRecord]) -> DeckStats {
    let mut total_games = 0u32;
    let mut match_wins = 0u32;
    let mut game_wins = 0u32;
    let mut play = Tally::default();
    let mut draw = Tally::default();
    let mut neither = Tally::default();
    let mut mulligans: Vec<i32> = Vec::new();

    for record in matches {
        total_games += record.game_count() as u32;
        game_wins += record.game_wins();
        if is_match_win(record) {
            match_wins += 1;
        }

        for game in record.games() {
            match game.play_draw {
                PlayDraw::Play => play.record(game.won),
                PlayDraw::Draw => draw.record(game.won),
                PlayDraw::Neither => neither.record(game.won),
            }
            mulligans.extend(game.mulligans);
        }
    }

    let total_matches = matches.len() as u32;

    DeckStats {
        total_matches,
        total_games,
        match_winrate: calculate_rate(match_wins, total_matches),
        game_winrate: calculate_rate(game_wins, total_games),
        by_play_draw: PlayDrawBreakdown {
            play: play.rate(),
            draw: draw.rate(),
            neither: neither.rate(),
        },
        mulligan_stats: summarize_mulligans(&mulligans),
    }
}

/// Mean, max and min of the collected mulligan counts; empty when there are none.
fn summarize_mulligans(counts: &[i32]) -> MulliganStats {
    let (Some(&max), Some(&min)) = (counts.iter().max(), counts.iter().min()) else {
        return MulliganStats::default();
    };
    let sum: i64 = counts.iter().map(|&c| i64::from(c)).sum();

    MulliganStats {
        avg_mulligans_per_game: Some(sum as f64 / counts.len() as f64),
        max_mulligans: Some(max),
        min_mulligans: Some(min),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(games: Vec<u8>) -> MatchRecord {
        MatchRecord::new("deck-1".into(), games)
    }

    #[test]
    fn test_compute_stats_empty() {
        let stats = compute_stats(&[]);

        assert_eq!(stats.total_matches, 0);
        assert_eq!(stats.total_games, 0);
        assert_eq!(stats.match_winrate, 0.0);
        assert_eq!(stats.game_winrate, 0.0);
        assert_eq!(stats.by_play_draw, PlayDrawBreakdown::default());
        assert!(stats.mulligan_stats.is_empty());
    }

    #[test]
    fn test_compute_stats_match_and_game_winrate() {
        let matches = vec![record(vec![1, 1]), record(vec![1, 0, 0])];
        let stats = compute_stats(&matches);

        assert_eq!(stats.total_matches, 2);
        assert_eq!(stats.total_games, 5);
        assert!((stats.match_winrate - 0.5).abs() < 1e-9);
        assert!((stats.game_winrate - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_compute_stats_play_draw_breakdown() {
        let matches = vec![record(vec![1, 0, 1]).with_play_draw(vec!["play", "draw", "play"])];
        let stats = compute_stats(&matches);

        assert_eq!(
            stats.by_play_draw,
            PlayDrawBreakdown {
                play: Some(1.0),
                draw: Some(0.0),
                neither: None,
            }
        );
    }

    #[test]
    fn test_missing_play_draw_counts_as_neither() {
        let matches = vec![
            record(vec![1, 0]).with_play_draw(vec!["Play"]),
            record(vec![1]),
        ];
        let stats = compute_stats(&matches);

        assert_eq!(stats.by_play_draw.play, Some(1.0));
        assert_eq!(stats.by_play_draw.draw, None);
        assert_eq!(stats.by_play_draw.neither, Some(0.5));
    }

    #[test]
    fn test_compute_stats_mulligans() {
        let matches = vec![
            record(vec![1, 0, 1]).with_mulligans(vec![0, 1, 2]),
            record(vec![0, 1]).with_mulligans(vec![1, 1]),
            record(vec![1, 1]),
        ];
        let stats = compute_stats(&matches);

        assert_eq!(
            stats.mulligan_stats,
            MulliganStats {
                avg_mulligans_per_game: Some(1.0),
                max_mulligans: Some(2),
                min_mulligans: Some(0),
            }
        );
    }

    #[test]
    fn test_matches_without_mulligan_data_leave_stats_empty() {
        let matches = vec![
            record(vec![1, 1]),
            record(vec![0]).with_play_draw(vec!["draw"]),
        ];
        let stats = compute_stats(&matches);

        assert_eq!(stats.total_matches, 2);
        assert!(stats.mulligan_stats.is_empty());
        assert_eq!(
            serde_json::to_value(stats.mulligan_stats).unwrap(),
            serde_json::json!({})
        );
    }

    #[test]
    fn test_short_mulligan_array_only_counts_present_games() {
        let matches = vec![record(vec![1, 0, 1]).with_mulligans(vec![3])];
        let stats = compute_stats(&matches);

        assert_eq!(stats.mulligan_stats.avg_mulligans_per_game, Some(3.0));
        assert_eq!(stats.mulligan_stats.max_mulligans, Some(3));
    }

    #[test]
    fn test_negative_mulligans_accepted_as_is() {
        let matches = vec![record(vec![1]).with_mulligans(vec![-1])];
        let stats = compute_stats(&matches);

        assert_eq!(stats.mulligan_stats.min_mulligans, Some(-1));
    }

    #[test]
    fn test_match_win_threshold_ignores_length() {
        // Longer-than-best-of-three arrays are not rejected here.
        assert!(is_match_win(&record(vec![1, 1, 1])));
        assert!(is_match_win(&record(vec![1, 0, 1, 0, 1])));
        assert!(is_match_win(&record(vec![0, 0, 0, 1, 1])));
        assert!(!is_match_win(&record(vec![1, 0, 0])));
        assert!(!is_match_win(&record(vec![1])));
    }

    #[test]
    fn test_compute_stats_idempotent() {
        let matches = vec![
            record(vec![1, 0, 1])
                .with_mulligans(vec![0, 1, 0])
                .with_play_draw(vec!["play", "draw", "draw"]),
            record(vec![0, 0]),
        ];

        assert_eq!(compute_stats(&matches), compute_stats(&matches));
    }

    #[test]
    fn test_match_winrate() {
        let matches = vec![record(vec![1, 1]), record(vec![0, 1, 1]), record(vec![0, 0])];
        assert!((match_winrate(&matches) - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(match_winrate(std::iter::empty::<&MatchRecord>()), 0.0);
    }

    #[test]
    fn test_calculate_rate() {
        assert_eq!(calculate_rate(0, 0), 0.0);
        assert_eq!(calculate_rate(3, 4), 0.75);
    }
}
