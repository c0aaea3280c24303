//! Request validation.
//!
//! Per-game arrays arrive as JSON strings or numbers (`["1", "0"]` or
//! `[1, 0]`); these helpers turn them into the typed arrays stored on a
//! [`MatchRecord`](crate::models::MatchRecord).

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::ApiError;
use crate::models::PlayDraw;
use crate::parse_iso_datetime;

/// A per-game value submitted either as a number or as a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LooseValue {
    Int(i64),
    Text(String),
}

impl LooseValue {
    fn as_int(&self) -> Option<i64> {
        match self {
            LooseValue::Int(n) => Some(*n),
            LooseValue::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl From<i64> for LooseValue {
    fn from(n: i64) -> Self {
        LooseValue::Int(n)
    }
}

impl From<&str> for LooseValue {
    fn from(s: &str) -> Self {
        LooseValue::Text(s.to_string())
    }
}

/// Parse the game outcome array: at least one entry, each 0 or 1.
pub fn parse_game_results(values: &[LooseValue]) -> Result<Vec<u8>, ApiError> {
    if values.is_empty() {
        return Err(ApiError::BadRequest(
            "game_win_array must have at least one element".to_string(),
        ));
    }

    values
        .iter()
        .enumerate()
        .map(|(idx, v)| match v.as_int() {
            Some(0) => Ok(0),
            Some(1) => Ok(1),
            _ => Err(ApiError::BadRequest(format!(
                "game_win_array[{}] must be 0 or 1, got {:?}",
                idx, v
            ))),
        })
        .collect()
}

/// Parse a per-game mulligan array. No longer than the number of games.
pub fn parse_mulligans(
    field: &str,
    values: Option<&[LooseValue]>,
    game_count: usize,
) -> Result<Option<Vec<i32>>, ApiError> {
    let Some(values) = values else {
        return Ok(None);
    };
    check_length(field, values.len(), game_count)?;

    values
        .iter()
        .enumerate()
        .map(|(idx, v)| {
            v.as_int()
                .and_then(|n| i32::try_from(n).ok())
                .ok_or_else(|| {
                    ApiError::BadRequest(format!("{}[{}] must be an integer, got {:?}", field, idx, v))
                })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

/// Accept play/draw labels as given; `null` entries become empty labels.
pub fn parse_play_draw_labels(
    values: Option<Vec<Option<String>>>,
    game_count: usize,
) -> Result<Option<Vec<String>>, ApiError> {
    let Some(values) = values else {
        return Ok(None);
    };
    check_length("play_draw_array", values.len(), game_count)?;
    Ok(Some(values.into_iter().map(Option::unwrap_or_default).collect()))
}

fn check_length(field: &str, len: usize, game_count: usize) -> Result<(), ApiError> {
    if len > game_count {
        return Err(ApiError::BadRequest(format!(
            "{} has {} entries but game_win_array has {}",
            field, len, game_count
        )));
    }
    Ok(())
}

/// Parse an optional ISO-8601 query parameter.
pub fn parse_timestamp(field: &str, value: Option<&str>) -> Result<Option<DateTime<Utc>>, ApiError> {
    match value.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => parse_iso_datetime(s).map(Some).ok_or_else(|| {
            ApiError::BadRequest(format!("{} is not an ISO-8601 datetime: {}", field, s))
        }),
    }
}

/// Validate a 1-based game index.
pub fn parse_game_index(game: Option<i64>) -> Result<Option<u32>, ApiError> {
    match game {
        None => Ok(None),
        Some(g) => u32::try_from(g)
            .ok()
            .filter(|&g| g >= 1)
            .map(Some)
            .ok_or_else(|| ApiError::BadRequest(format!("game must be 1 or greater, got {}", g))),
    }
}

/// Map the play/draw query value to a category; an empty value means no filter.
pub fn parse_play_draw_filter(value: Option<&str>) -> Option<PlayDraw> {
    value
        .filter(|s| !s.trim().is_empty())
        .map(PlayDraw::normalize)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loose(values: &[&str]) -> Vec<LooseValue> {
        values.iter().map(|&s| LooseValue::from(s)).collect()
    }

    #[test]
    fn test_loose_value_deserializes_both_shapes() {
        let values: Vec<LooseValue> = serde_json::from_str(r#"[1, "0", " 1 "]"#).unwrap();
        assert_eq!(values[0], LooseValue::Int(1));
        assert_eq!(values[1], LooseValue::Text("0".to_string()));
        assert_eq!(parse_game_results(&values).unwrap(), vec![1, 0, 1]);
    }

    #[test]
    fn test_game_results_require_one_entry() {
        assert!(matches!(
            parse_game_results(&[]),
            Err(ApiError::BadRequest(msg)) if msg.contains("at least one")
        ));
    }

    #[test]
    fn test_game_results_reject_non_binary() {
        assert!(parse_game_results(&loose(&["1", "2"])).is_err());
        assert!(parse_game_results(&loose(&["win"])).is_err());
        assert!(parse_game_results(&[LooseValue::Int(-1)]).is_err());
    }

    #[test]
    fn test_game_results_accept_long_arrays() {
        let parsed = parse_game_results(&loose(&["1", "0", "1", "0", "1"])).unwrap();
        assert_eq!(parsed.len(), 5);
    }

    #[test]
    fn test_parse_mulligans() {
        let values = loose(&["0", "2"]);
        assert_eq!(
            parse_mulligans("mulligan_array", Some(&values), 3).unwrap(),
            Some(vec![0, 2])
        );
        assert_eq!(parse_mulligans("mulligan_array", None, 3).unwrap(), None);
    }

    #[test]
    fn test_parse_mulligans_rejects_garbage_and_excess() {
        let garbage = loose(&["one"]);
        assert!(parse_mulligans("mulligan_array", Some(&garbage), 3).is_err());

        let too_many = loose(&["0", "0", "0"]);
        assert!(parse_mulligans("mulligan_array", Some(&too_many), 2).is_err());
    }

    #[test]
    fn test_parse_play_draw_labels() {
        let labels = vec![Some("Play".to_string()), None];
        assert_eq!(
            parse_play_draw_labels(Some(labels), 2).unwrap(),
            Some(vec!["Play".to_string(), String::new()])
        );
        assert!(parse_play_draw_labels(Some(vec![None, None]), 1).is_err());
    }

    #[test]
    fn test_parse_timestamp() {
        assert!(parse_timestamp("time_from", None).unwrap().is_none());
        assert!(parse_timestamp("time_from", Some("")).unwrap().is_none());
        assert!(parse_timestamp("time_from", Some("2025-01-01")).unwrap().is_some());
        assert!(parse_timestamp("time_from", Some("soon")).is_err());
    }

    #[test]
    fn test_parse_game_index() {
        assert_eq!(parse_game_index(None).unwrap(), None);
        assert_eq!(parse_game_index(Some(2)).unwrap(), Some(2));
        assert!(parse_game_index(Some(0)).is_err());
        assert!(parse_game_index(Some(-1)).is_err());
    }

    #[test]
    fn test_parse_play_draw_filter() {
        assert_eq!(parse_play_draw_filter(Some("Play")), Some(PlayDraw::Play));
        assert_eq!(parse_play_draw_filter(Some("d")), Some(PlayDraw::Draw));
        assert_eq!(parse_play_draw_filter(Some("none")), Some(PlayDraw::Neither));
        assert_eq!(parse_play_draw_filter(Some(" play")), Some(PlayDraw::Neither));
        assert_eq!(parse_play_draw_filter(Some("")), None);
        assert_eq!(parse_play_draw_filter(Some("  ")), None);
        assert_eq!(parse_play_draw_filter(None), None);
    }
}
