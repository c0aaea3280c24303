//! Record identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque identifier for a stored record.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Wrap an existing id string.
    pub fn new(id: String) -> Self {
        Self(id)
    }

    /// Generate a fresh random (v4) id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl PartialEq<str> for EntityId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

pub type DeckId = EntityId;

pub type DecklistId = EntityId;

pub type PlayerId = EntityId;

pub type MatchId = EntityId;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let id1 = EntityId::generate();
        let id2 = EntityId::generate();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_generated_id_is_uuid() {
        let id = EntityId::generate();
        assert!(Uuid::parse_str(id.as_str()).is_ok());
    }

    #[test]
    fn test_entity_id_serializes_as_plain_string() {
        let id = EntityId::from("deck-1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"deck-1\"");

        let back: EntityId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_entity_id_display() {
        let id = EntityId::new("abc123".to_string());
        assert_eq!(format!("{}", id), "abc123");
    }

    #[test]
    fn test_entity_id_debug() {
        let id = EntityId::new("debug-test".to_string());
        assert!(format!("{:?}", id).contains("debug-test"));
    }

    #[test]
    fn test_entity_id_str_comparison() {
        let id = EntityId::from("same");
        assert!(id == *"same");
        assert!(id != *"other");
    }
}
