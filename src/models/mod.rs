//! Core data models for the match tracker.

mod deck;
mod ids;
mod match_record;
mod player;
mod stats;

pub use deck::*;
pub use ids::*;
pub use match_record::*;
pub use player::*;
pub use stats::*;
