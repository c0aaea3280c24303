//! # Matchkeeper
//!
//! Records trading card game matches and computes deck winrate statistics.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (decks, decklists, players, matches, stats)
//! - **calculate**: Statistics engine and query filtering
//! - **storage**: Record store trait and the JSONL implementation
//! - **api**: REST API endpoints and request validation
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod models;
pub mod storage;

pub use models::*;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO-8601 timestamp (e.g., "2025-03-01T18:30:00Z", "2025-03-01").
///
/// Offsets are converted to UTC; values without an offset are taken as UTC,
/// and a bare date means midnight.
pub fn parse_iso_datetime(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
