//! Record storage.
//!
//! The API layer talks to a [`RecordStore`]; the default implementation is
//! a JSONL data lake under the configured data directory.

mod jsonl;

pub use jsonl::*;

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{Deck, Decklist, MatchRecord, Player};

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn records_dir(&self) -> PathBuf {
        self.data_dir.join("records")
    }

    pub fn entity_path(&self, entity: EntityType) -> PathBuf {
        self.records_dir().join(entity.filename())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}

/// Create and fetch operations the API needs from persistence.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Prepare the storage layout. Safe to call repeatedly.
    async fn init(&self) -> Result<(), StorageError>;

    async fn create_deck(&self, deck: Deck) -> Result<Deck, StorageError>;

    async fn get_deck(&self, id: &str) -> Result<Option<Deck>, StorageError>;

    async fn create_decklist(&self, decklist: Decklist) -> Result<Decklist, StorageError>;

    async fn get_decklist(&self, id: &str) -> Result<Option<Decklist>, StorageError>;

    async fn create_player(&self, player: Player) -> Result<Player, StorageError>;

    async fn get_player(&self, id: &str) -> Result<Option<Player>, StorageError>;

    async fn create_match(&self, record: MatchRecord) -> Result<MatchRecord, StorageError>;

    async fn get_match(&self, id: &str) -> Result<Option<MatchRecord>, StorageError>;

    /// Matches recorded for a deck with `created_at` inside the inclusive bounds.
    async fn fetch_matches_for_deck(
        &self,
        deck_id: &str,
        time_from: Option<DateTime<Utc>>,
        time_to: Option<DateTime<Utc>>,
    ) -> Result<Vec<MatchRecord>, StorageError>;
}
