//! Deck registry for definition lookup.
//!
//! The `DeckRegistry` stores every validated deck available to a client,
//! in load order. The first loaded deck is the fallback for lobby seats
//! that never picked one.

use rustc_hash::FxHashMap;

use super::definition::{DeckDefinition, DeckMetadata};
use super::validate::{validate_deck, DeckError};

/// Registry of validated decks.
///
/// ## Example
///
/// ```
/// use skirmish_engine::cards::CombatCard;
/// use skirmish_engine::decks::{DeckCharacter, DeckDefinition, DeckRegistry};
///
/// let deck = DeckDefinition {
///     id: "knights".into(),
///     name: "Knights".into(),
///     author: "me".into(),
///     version: "1".into(),
///     description: None,
///     characters: vec![DeckCharacter::new("hero", "Hero", 20)],
///     cards: (1..=30).map(|i| CombatCard::new(i, 2, 2).into()).collect(),
///     art_assets: None,
/// };
///
/// let mut registry = DeckRegistry::new();
/// registry.load(deck).unwrap();
/// assert_eq!(registry.get("knights").unwrap().name, "Knights");
/// ```
#[derive(Clone, Debug, Default)]
pub struct DeckRegistry {
    decks: FxHashMap<String, DeckDefinition>,
    order: Vec<String>,
    active: Option<String>,
}

impl DeckRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and register a deck. Replaces a deck with the same id.
    pub fn load(&mut self, deck: DeckDefinition) -> Result<&DeckDefinition, DeckError> {
        if let Err(e) = validate_deck(&deck) {
            log::warn!("rejected deck {:?}: {}", deck.id, e);
            return Err(e);
        }

        let id = deck.id.clone();
        if self.decks.insert(id.clone(), deck).is_none() {
            self.order.push(id.clone());
        }
        self.decks.get(&id).ok_or(DeckError::NotFound(id))
    }

    /// Parse a deck file and register it.
    pub fn load_json(&mut self, json: &str) -> Result<&DeckDefinition, DeckError> {
        let deck: DeckDefinition = serde_json::from_str(json).map_err(|e| {
            log::warn!("rejected deck file: {}", e);
            DeckError::Malformed(e)
        })?;
        self.load(deck)
    }

    /// Get a deck by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&DeckDefinition> {
        self.decks.get(id)
    }

    /// Check if a deck id is registered.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.decks.contains_key(id)
    }

    /// First deck in load order.
    #[must_use]
    pub fn first(&self) -> Option<&DeckDefinition> {
        self.order.first().and_then(|id| self.decks.get(id))
    }

    /// Remove a deck. Clears the active selection if it pointed at it.
    pub fn remove(&mut self, id: &str) -> Option<DeckDefinition> {
        let removed = self.decks.remove(id)?;
        self.order.retain(|d| d != id);
        if self.active.as_deref() == Some(id) {
            self.active = None;
        }
        Some(removed)
    }

    /// Remove every deck.
    pub fn clear(&mut self) {
        self.decks.clear();
        self.order.clear();
        self.active = None;
    }

    /// Select the active deck. `None` clears the selection.
    pub fn set_active(&mut self, id: Option<&str>) -> Result<(), DeckError> {
        match id {
            Some(id) if !self.decks.contains_key(id) => Err(DeckError::NotFound(id.to_string())),
            Some(id) => {
                self.active = Some(id.to_string());
                Ok(())
            }
            None => {
                self.active = None;
                Ok(())
            }
        }
    }

    /// Currently selected deck.
    #[must_use]
    pub fn active(&self) -> Option<&DeckDefinition> {
        self.active.as_deref().and_then(|id| self.decks.get(id))
    }

    /// Number of registered decks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.decks.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.decks.is_empty()
    }

    /// Iterate decks in load order.
    pub fn iter(&self) -> impl Iterator<Item = &DeckDefinition> {
        self.order.iter().filter_map(|id| self.decks.get(id))
    }

    /// Summaries in load order.
    #[must_use]
    pub fn metadata(&self) -> Vec<DeckMetadata> {
        self.iter().map(DeckDefinition::metadata).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CombatCard;
    use crate::decks::DeckCharacter;

    fn deck(id: &str) -> DeckDefinition {
        DeckDefinition {
            id: id.into(),
            name: format!("Deck {}", id),
            author: "tester".into(),
            version: "1".into(),
            description: Some("test deck".into()),
            characters: vec![DeckCharacter::new("hero", "Hero", 20)],
            cards: (1..=30).map(|i| CombatCard::new(i, 1, 1).into()).collect(),
            art_assets: None,
        }
    }

    #[test]
    fn test_load_and_get() {
        let mut registry = DeckRegistry::new();
        registry.load(deck("a")).unwrap();

        assert!(registry.contains("a"));
        assert_eq!(registry.len(), 1);
        assert!(registry.get("b").is_none());
    }

    #[test]
    fn test_invalid_deck_not_registered() {
        let mut registry = DeckRegistry::new();
        let mut bad = deck("bad");
        bad.cards.truncate(10);

        assert!(registry.load(bad).is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_load_json_malformed() {
        let mut registry = DeckRegistry::new();
        assert!(matches!(registry.load_json("{ not json"), Err(DeckError::Malformed(_))));
        assert!(matches!(
            registry.load_json(r#"{"id": "x", "name": "X"}"#),
            Err(DeckError::Malformed(_))
        ));
    }

    #[test]
    fn test_load_json_roundtrip() {
        let mut registry = DeckRegistry::new();
        let json = serde_json::to_string(&deck("json")).unwrap();
        let loaded = registry.load_json(&json).unwrap();
        assert_eq!(loaded.cards.len(), 30);
    }

    #[test]
    fn test_first_follows_load_order() {
        let mut registry = DeckRegistry::new();
        registry.load(deck("z")).unwrap();
        registry.load(deck("a")).unwrap();
        registry.load(deck("z")).unwrap(); // reload keeps position

        assert_eq!(registry.first().unwrap().id, "z");
        let ids: Vec<_> = registry.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["z", "a"]);
    }

    #[test]
    fn test_active_selection() {
        let mut registry = DeckRegistry::new();
        registry.load(deck("a")).unwrap();

        assert!(matches!(registry.set_active(Some("nope")), Err(DeckError::NotFound(_))));
        registry.set_active(Some("a")).unwrap();
        assert_eq!(registry.active().unwrap().id, "a");

        registry.remove("a");
        assert!(registry.active().is_none());
        assert!(registry.first().is_none());
    }

    #[test]
    fn test_clear_and_metadata() {
        let mut registry = DeckRegistry::new();
        registry.load(deck("a")).unwrap();
        registry.load(deck("b")).unwrap();

        let meta = registry.metadata();
        assert_eq!(meta.len(), 2);
        assert_eq!(meta[0].card_count, 30);
        assert_eq!(meta[0].description, "test deck");

        registry.clear();
        assert!(registry.is_empty());
    }
}
