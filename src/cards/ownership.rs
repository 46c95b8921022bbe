//! Card-to-character binding rule.
//!
//! A card bound to a template (`owner = "hero"`) must validate for every
//! instance of that template: `p1-hero`, `p1-hero-1`, `p1-hero-2`. The rule
//! is a loose string suffix match:
//!
//! - strip the character id's minion number (an all-digit trailing
//!   `-segment`); if the rest ends with `owner`, the pairing is legal;
//! - otherwise, legal if the full character id ends with `owner`.
//!
//! Unbound cards (`owner = None`) may be used by any character.
//!
//! ```
//! use skirmish_engine::cards::owner_matches;
//! use skirmish_engine::core::CharacterId;
//!
//! let minion = CharacterId::new("p1-hero-2");
//! assert!(owner_matches(&minion, Some("hero")));
//! assert!(!owner_matches(&minion, Some("villain")));
//! ```

use super::card::Card;
use crate::core::CharacterId;

/// Does a card bound to `owner` belong to `character`?
#[must_use]
pub fn owner_matches(character: &CharacterId, owner: Option<&str>) -> bool {
    match owner {
        None => true,
        Some(owner) => character.base().ends_with(owner) || character.as_str().ends_with(owner),
    }
}

/// May `character` wield `card`?
#[must_use]
pub fn can_wield(character: &CharacterId, card: &Card) -> bool {
    owner_matches(character, card.owner())
}
