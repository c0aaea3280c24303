//! Deck and decklist models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{DeckId, DecklistId, EntityId};

/// A deck archetype that matches are recorded against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deck {
    /// Unique identifier
    pub id: DeckId,

    /// Deck name (e.g. "Izzet Prowess")
    pub name: String,

    /// Format the deck is played in (e.g. "Modern")
    pub format: Option<String>,

    /// Color identity (e.g. "UR")
    pub colors: Option<String>,

    /// Free-form metadata
    pub raw_data: Option<Map<String, Value>>,

    /// When this record was created
    pub created_at: DateTime<Utc>,
}

impl Deck {
    /// Create a new Deck with a generated ID.
    pub fn new(name: String) -> Self {
        Self {
            id: EntityId::generate(),
            name,
            format: None,
            colors: None,
            raw_data: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_format(mut self, format: String) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_colors(mut self, colors: String) -> Self {
        self.colors = Some(colors);
        self
    }

    pub fn with_raw_data(mut self, raw_data: Map<String, Value>) -> Self {
        self.raw_data = Some(raw_data);
        self
    }
}

/// A concrete card list registered for a deck.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decklist {
    /// Unique identifier
    pub id: DecklistId,

    /// Deck this list belongs to
    pub deck_id: DeckId,

    /// Main deck contents, in whatever shape the client submits
    pub mainboard: Option<Value>,

    /// Sideboard contents
    pub sideboard: Option<Value>,

    /// When this record was created
    pub created_at: DateTime<Utc>,
}

impl Decklist {
    /// Create a new Decklist with a generated ID.
    pub fn new(deck_id: DeckId) -> Self {
        Self {
            id: EntityId::generate(),
            deck_id,
            mainboard: None,
            sideboard: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_boards(mut self, mainboard: Option<Value>, sideboard: Option<Value>) -> Self {
        self.mainboard = mainboard;
        self.sideboard = sideboard;
        self
    }
}
