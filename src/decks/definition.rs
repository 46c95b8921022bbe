//! Deck definitions - static deck data.
//!
//! A `DeckDefinition` is the parsed form of a deck file: metadata, the
//! characters the deck fields, and exactly 30 cards. It never changes once
//! loaded; live games copy cards out of it into player decks.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// Character footprint class.
///
/// Affects rendering and board footprint only; movement rules ignore it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterSize {
    Small,
    #[default]
    Medium,
    Large,
    Huge,
    Giant,
}

fn default_hp() -> i32 {
    20
}

/// Character template fielded by a deck.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckCharacter {
    /// Template id; combined with the player id to form character ids.
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default = "default_hp")]
    pub hp: i32,
    #[serde(default)]
    pub size: CharacterSize,
    #[serde(default)]
    pub traits: Vec<String>,
    /// Number of instances of this template. `None` means one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minion_count: Option<u32>,
    #[serde(default)]
    pub ranged: bool,
}

impl DeckCharacter {
    /// Create a single-instance melee character.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, hp: i32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image_url: None,
            hp,
            size: CharacterSize::default(),
            traits: Vec::new(),
            minion_count: None,
            ranged: false,
        }
    }

    /// Field `count` instances of this template.
    #[must_use]
    pub fn with_minions(mut self, count: u32) -> Self {
        self.minion_count = Some(count);
        self
    }

    #[must_use]
    pub fn ranged(mut self) -> Self {
        self.ranged = true;
        self
    }

    #[must_use]
    pub fn with_size(mut self, size: CharacterSize) -> Self {
        self.size = size;
        self
    }

    /// Effective instance count (at least one).
    #[must_use]
    pub fn instances(&self) -> u32 {
        self.minion_count.unwrap_or(1).max(1)
    }
}

/// Art attached to a card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtAsset {
    /// URL or `data:image/...;base64,` payload.
    pub card_art: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

/// A complete deck file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckDefinition {
    pub id: String,
    pub name: String,
    pub author: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub characters: Vec<DeckCharacter>,
    pub cards: Vec<Card>,
    /// Keyed by card id as a decimal string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub art_assets: Option<FxHashMap<String, ArtAsset>>,
}

impl DeckDefinition {
    /// Summary for deck pickers.
    #[must_use]
    pub fn metadata(&self) -> DeckMetadata {
        DeckMetadata {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone().unwrap_or_default(),
            author: self.author.clone(),
            version: self.version.clone(),
            card_count: self.cards.len(),
        }
    }
}

/// Lightweight deck summary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckMetadata {
    pub id: String,
    pub name: String,
    pub description: String,
    pub author: String,
    pub version: String,
    pub card_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_defaults() {
        let c: DeckCharacter =
            serde_json::from_str(r#"{"id": "hero", "name": "Hero"}"#).unwrap();

        assert_eq!(c.hp, 20);
        assert_eq!(c.size, CharacterSize::Medium);
        assert!(c.traits.is_empty());
        assert_eq!(c.instances(), 1);
        assert!(!c.ranged);
    }

    #[test]
    fn test_minion_count_parsed() {
        let c: DeckCharacter = serde_json::from_str(
            r#"{"id": "imp", "name": "Imp", "hp": 4, "size": "small", "minionCount": 3, "ranged": true}"#,
        )
        .unwrap();

        assert_eq!(c.instances(), 3);
        assert_eq!(c.size, CharacterSize::Small);
        assert!(c.ranged);
    }

    #[test]
    fn test_zero_minions_still_fields_one() {
        let c = DeckCharacter::new("imp", "Imp", 3).with_minions(0);
        assert_eq!(c.instances(), 1);
    }

    #[test]
    fn test_unknown_size_rejected() {
        let result: Result<DeckCharacter, _> =
            serde_json::from_str(r#"{"id": "x", "name": "X", "size": "colossal"}"#);
        assert!(result.is_err());
    }
}
