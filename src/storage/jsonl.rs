//! JSONL (JSON Lines) storage.
//!
//! Each entity type lives in its own file; each line is one JSON record.
//! Records are append-only.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};

use super::{RecordStore, StorageConfig, StorageError};
use crate::models::{Deck, Decklist, MatchRecord, Player};

/// Entity types for JSONL storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityType {
    Deck,
    Decklist,
    Player,
    Match,
}

impl EntityType {
    pub const ALL: [EntityType; 4] = [
        EntityType::Deck,
        EntityType::Decklist,
        EntityType::Player,
        EntityType::Match,
    ];

    /// Get the filename for this entity type.
    pub fn filename(&self) -> &'static str {
        match self {
            EntityType::Deck => "decks.jsonl",
            EntityType::Decklist => "decklists.jsonl",
            EntityType::Player => "players.jsonl",
            EntityType::Match => "matches.jsonl",
        }
    }
}

/// JSONL file writer.
pub struct JsonlWriter<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: Serialize> JsonlWriter<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    pub fn for_entity(config: &StorageConfig, entity: EntityType) -> Self {
        Self::new(config.entity_path(entity))
    }

    fn ensure_dir(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Append a single entity to the file.
    pub fn append(&self, entity: &T) -> Result<(), StorageError> {
        self.ensure_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = BufWriter::new(file);
        let json = serde_json::to_string(entity)?;
        writeln!(writer, "{}", json)?;
        writer.flush()?;

        debug!("Appended entity to {:?}", self.path);
        Ok(())
    }
}

/// JSONL file reader.
pub struct JsonlReader<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: DeserializeOwned> JsonlReader<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    pub fn for_entity(config: &StorageConfig, entity: EntityType) -> Self {
        Self::new(config.entity_path(entity))
    }

    /// Read entities matching a predicate, skipping lines that fail to parse.
    /// A missing file reads as empty.
    pub fn read_where<F>(&self, predicate: F) -> Result<Vec<T>, StorageError>
    where
        F: Fn(&T) -> bool,
    {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(File::open(&self.path)?);
        let mut entities = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str::<T>(&line) {
                Ok(entity) if predicate(&entity) => entities.push(entity),
                Ok(_) => {}
                Err(e) => {
                    warn!("Failed to parse line {} in {:?}: {}", idx + 1, self.path, e);
                }
            }
        }

        debug!("Read {} entities from {:?}", entities.len(), self.path);
        Ok(entities)
    }

    /// First entity matching the predicate.
    pub fn find<F>(&self, predicate: F) -> Result<Option<T>, StorageError>
    where
        F: Fn(&T) -> bool,
    {
        Ok(self.read_where(predicate)?.into_iter().next())
    }
}

/// [`RecordStore`] backed by one JSONL file per entity type.
pub struct JsonlStore {
    config: StorageConfig,
    write_lock: Mutex<()>,
}

impl JsonlStore {
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            write_lock: Mutex::new(()),
        }
    }

    fn append<T: Serialize>(&self, entity: EntityType, record: &T) -> Result<(), StorageError> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        JsonlWriter::for_entity(&self.config, entity).append(record)
    }

    fn reader<T: DeserializeOwned>(&self, entity: EntityType) -> JsonlReader<T> {
        JsonlReader::for_entity(&self.config, entity)
    }
}

#[async_trait]
impl RecordStore for JsonlStore {
    async fn init(&self) -> Result<(), StorageError> {
        if self.config.data_dir.is_file() {
            return Err(StorageError::InvalidPath(format!(
                "data directory {:?} is a file",
                self.config.data_dir
            )));
        }

        let dir = self.config.records_dir();
        fs::create_dir_all(&dir)?;
        for entity in EntityType::ALL {
            let path = self.config.entity_path(entity);
            if !path.exists() {
                File::create(&path)?;
            }
        }

        info!("Record store ready at {:?}", dir);
        Ok(())
    }

    async fn create_deck(&self, deck: Deck) -> Result<Deck, StorageError> {
        self.append(EntityType::Deck, &deck)?;
        info!("Created deck {} ({})", deck.id, deck.name);
        Ok(deck)
    }

    async fn get_deck(&self, id: &str) -> Result<Option<Deck>, StorageError> {
        self.reader::<Deck>(EntityType::Deck).find(|d| d.id == *id)
    }

    async fn create_decklist(&self, decklist: Decklist) -> Result<Decklist, StorageError> {
        self.append(EntityType::Decklist, &decklist)?;
        info!("Created decklist {} for deck {}", decklist.id, decklist.deck_id);
        Ok(decklist)
    }

    async fn get_decklist(&self, id: &str) -> Result<Option<Decklist>, StorageError> {
        self.reader::<Decklist>(EntityType::Decklist)
            .find(|d| d.id == *id)
    }

    async fn create_player(&self, player: Player) -> Result<Player, StorageError> {
        self.append(EntityType::Player, &player)?;
        info!("Created player {} ({})", player.id, player.name);
        Ok(player)
    }

    async fn get_player(&self, id: &str) -> Result<Option<Player>, StorageError> {
        self.reader::<Player>(EntityType::Player).find(|p| p.id == *id)
    }

    async fn create_match(&self, record: MatchRecord) -> Result<MatchRecord, StorageError> {
        self.append(EntityType::Match, &record)?;
        info!(
            "Created match {} for deck {} ({} games)",
            record.id,
            record.deck_id,
            record.game_count()
        );
        Ok(record)
    }

    async fn get_match(&self, id: &str) -> Result<Option<MatchRecord>, StorageError> {
        self.reader::<MatchRecord>(EntityType::Match)
            .find(|m| m.id == *id)
    }

    async fn fetch_matches_for_deck(
        &self,
        deck_id: &str,
        time_from: Option<DateTime<Utc>>,
        time_to: Option<DateTime<Utc>>,
    ) -> Result<Vec<MatchRecord>, StorageError> {
        let matches = self
            .reader::<MatchRecord>(EntityType::Match)
            .read_where(|m| {
                m.deck_id == *deck_id
                    && time_from.map_or(true, |from| m.created_at >= from)
                    && time_to.map_or(true, |to| m.created_at <= to)
            })?;

        debug!("Fetched {} matches for deck {}", matches.len(), deck_id);
        Ok(matches)
    }
}
