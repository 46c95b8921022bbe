//! Card values as they travel through hands, decks and snapshots.
//!
//! A card is either a `Combat` card (attack/defense numbers) or a
//! `Special` card (name + rules text). Both may carry an `owner`: the
//! character id the card was bound to when drawn.
//!
//! ## Wire Shape
//!
//! ```json
//! { "id": 4, "type": "combat", "attack": 3, "defense": 1, "owner": "p1-hero" }
//! { "id": 9, "type": "special", "name": "Rally", "rulesText": "Draw two." }
//! ```

use serde::{Deserialize, Serialize};

/// Card identifier, unique within one 30-card deck (1..=30).
///
/// Not globally unique: two players' decks reuse the same ids. Use the
/// card's `owner` together with the id to tell them apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Combat card: revealed during attack/defense.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatCard {
    pub id: CardId,
    pub attack: u32,
    pub defense: u32,
    /// Character id this card is bound to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl CombatCard {
    #[must_use]
    pub fn new(id: u32, attack: u32, defense: u32) -> Self {
        Self {
            id: CardId::new(id),
            attack,
            defense,
            owner: None,
            image_url: None,
        }
    }

    /// Bind to a character (builder pattern).
    #[must_use]
    pub fn owned_by(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }
}

/// Special card: free rules text, played rather than revealed in combat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialCard {
    pub id: CardId,
    pub name: String,
    pub rules_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl SpecialCard {
    #[must_use]
    pub fn new(id: u32, name: impl Into<String>, rules_text: impl Into<String>) -> Self {
        Self {
            id: CardId::new(id),
            name: name.into(),
            rules_text: rules_text.into(),
            owner: None,
            image_url: None,
        }
    }
}

/// Any card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Card {
    Combat(CombatCard),
    Special(SpecialCard),
}

impl Card {
    #[must_use]
    pub fn id(&self) -> CardId {
        match self {
            Card::Combat(c) => c.id,
            Card::Special(c) => c.id,
        }
    }

    #[must_use]
    pub fn owner(&self) -> Option<&str> {
        match self {
            Card::Combat(c) => c.owner.as_deref(),
            Card::Special(c) => c.owner.as_deref(),
        }
    }

    #[must_use]
    pub fn as_combat(&self) -> Option<&CombatCard> {
        match self {
            Card::Combat(c) => Some(c),
            Card::Special(_) => None,
        }
    }

    #[must_use]
    pub fn is_combat(&self) -> bool {
        matches!(self, Card::Combat(_))
    }

    /// Human-readable label used in log messages.
    ///
    /// Special cards use their name; combat cards read "Combat Card".
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Card::Combat(_) => "Combat Card",
            Card::Special(c) => &c.name,
        }
    }

    /// Bind a combat card to `character`. Special cards are returned unchanged.
    #[must_use]
    pub fn bound_to(self, character: &str) -> Self {
        match self {
            Card::Combat(c) => Card::Combat(c.owned_by(character)),
            special => special,
        }
    }
}

impl From<CombatCard> for Card {
    fn from(card: CombatCard) -> Self {
        Card::Combat(card)
    }
}

impl From<SpecialCard> for Card {
    fn from(card: SpecialCard) -> Self {
        Card::Special(card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combat_wire_shape() {
        let card: Card = CombatCard::new(4, 3, 1).owned_by("p1-hero").into();
        let json = serde_json::to_value(&card).unwrap();

        assert_eq!(json["type"], "combat");
        assert_eq!(json["id"], 4);
        assert_eq!(json["attack"], 3);
        assert_eq!(json["owner"], "p1-hero");
        assert!(json.get("imageUrl").is_none());
    }

    #[test]
    fn test_special_from_json() {
        let card: Card = serde_json::from_str(
            r#"{"id": 9, "type": "special", "name": "Rally", "rulesText": "Draw two."}"#,
        )
        .unwrap();

        assert_eq!(card.id(), CardId::new(9));
        assert_eq!(card.label(), "Rally");
        assert!(card.owner().is_none());
        assert!(!card.is_combat());
    }

    #[test]
    fn test_unknown_type_rejected() {
        let result: Result<Card, _> =
            serde_json::from_str(r#"{"id": 1, "type": "spell", "attack": 1, "defense": 1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_bound_to_only_binds_combat() {
        let combat: Card = CombatCard::new(1, 2, 2).into();
        let special: Card = SpecialCard::new(2, "Heal", "Restore 2").into();

        assert_eq!(combat.bound_to("p1-hero").owner(), Some("p1-hero"));
        assert_eq!(special.bound_to("p1-hero").owner(), None);
    }

    #[test]
    fn test_label() {
        assert_eq!(Card::from(CombatCard::new(1, 1, 1)).label(), "Combat Card");
    }
}
