//! Player model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EntityId, PlayerId};

/// A player with their online client handles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Unique identifier
    pub id: PlayerId,

    /// Display name
    pub name: String,

    /// Magic Online usernames
    pub mtgo_usernames: Option<Vec<String>>,

    /// MTG Arena usernames
    pub arena_usernames: Option<Vec<String>>,

    /// Melee.gg account
    pub melee_account: Option<String>,

    /// When this record was created
    pub created_at: DateTime<Utc>,
}

impl Player {
    /// Create a new Player with a generated ID.
    pub fn new(name: String) -> Self {
        Self {
            id: EntityId::generate(),
            name,
            mtgo_usernames: None,
            arena_usernames: None,
            melee_account: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_usernames(
        mut self,
        mtgo_usernames: Option<Vec<String>>,
        arena_usernames: Option<Vec<String>>,
    ) -> Self {
        self.mtgo_usernames = mtgo_usernames;
        self.arena_usernames = arena_usernames;
        self
    }

    pub fn with_melee_account(mut self, account: String) -> Self {
        self.melee_account = Some(account);
        self
    }
}
