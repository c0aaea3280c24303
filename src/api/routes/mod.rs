pub mod decklists;
pub mod decks;
pub mod health;
pub mod matches;
pub mod players;
