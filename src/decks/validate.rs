//! Deck validation at the load boundary.
//!
//! Nothing reaches a `GameState` without passing `validate_deck`. Rules:
//! - `id`, `name`, `author`, `version` present and non-empty
//! - every character starts with positive hp
//! - exactly `DECK_SIZE` cards, ids unique and within `1..=DECK_SIZE`
//! - special cards carry a non-empty name and rules text
//! - art assets reference existing cards; inline art is a base64 image data-URL

use rustc_hash::FxHashSet;
use thiserror::Error;

use super::definition::DeckDefinition;
use crate::cards::Card;

/// Cards per deck.
pub const DECK_SIZE: usize = 30;

/// Why a deck was rejected.
#[derive(Debug, Error)]
pub enum DeckError {
    #[error("deck file is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("deck is missing required field `{0}`")]
    MissingField(&'static str),

    #[error("deck must contain exactly {expected} cards, found {found}")]
    WrongCardCount { expected: usize, found: usize },

    #[error("character `{character}` must start with positive hp, found {hp}")]
    InvalidCharacterHp { character: String, hp: i32 },

    #[error("duplicate card id {0}")]
    DuplicateCardId(u32),

    #[error("card id {0} is outside 1..=30")]
    CardIdOutOfRange(u32),

    #[error("special card {0} needs a name and rules text")]
    IncompleteSpecialCard(u32),

    #[error("invalid card id in art assets: {0}")]
    InvalidArtKey(String),

    #[error("art asset found for non-existent card: {0}")]
    ArtForMissingCard(u32),

    #[error("invalid base64 image data for card {0}")]
    InvalidArtData(u32),

    #[error("deck not found: {0}")]
    NotFound(String),
}

/// Validate a parsed deck.
pub fn validate_deck(deck: &DeckDefinition) -> Result<(), DeckError> {
    let required = [
        ("id", &deck.id),
        ("name", &deck.name),
        ("author", &deck.author),
        ("version", &deck.version),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(DeckError::MissingField(field));
        }
    }

    if let Some(c) = deck.characters.iter().find(|c| c.hp <= 0) {
        return Err(DeckError::InvalidCharacterHp {
            character: c.id.clone(),
            hp: c.hp,
        });
    }

    if deck.cards.len() != DECK_SIZE {
        return Err(DeckError::WrongCardCount {
            expected: DECK_SIZE,
            found: deck.cards.len(),
        });
    }

    let mut seen = FxHashSet::default();
    for card in &deck.cards {
        let id = card.id().raw();
        if id == 0 || id as usize > DECK_SIZE {
            return Err(DeckError::CardIdOutOfRange(id));
        }
        if !seen.insert(id) {
            return Err(DeckError::DuplicateCardId(id));
        }
        validate_card(card)?;
    }

    if let Some(assets) = &deck.art_assets {
        for (key, asset) in assets {
            let id: u32 = key
                .parse()
                .map_err(|_| DeckError::InvalidArtKey(key.clone()))?;
            if !seen.contains(&id) {
                return Err(DeckError::ArtForMissingCard(id));
            }
            if asset.card_art.starts_with("data:image") && !is_base64_image_url(&asset.card_art) {
                return Err(DeckError::InvalidArtData(id));
            }
        }
    }

    Ok(())
}

fn validate_card(card: &Card) -> Result<(), DeckError> {
    match card {
        // attack/defense are unsigned; nothing else to check
        Card::Combat(_) => Ok(()),
        Card::Special(special) => {
            if special.name.is_empty() || special.rules_text.is_empty() {
                Err(DeckError::IncompleteSpecialCard(special.id.raw()))
            } else {
                Ok(())
            }
        }
    }
}

/// `data:image/<alpha>;base64,` prefix check.
fn is_base64_image_url(url: &str) -> bool {
    let Some(rest) = url.strip_prefix("data:image/") else {
        return false;
    };
    let Some((subtype, tail)) = rest.split_once(';') else {
        return false;
    };
    !subtype.is_empty()
        && subtype.chars().all(|c| c.is_ascii_alphabetic())
        && tail.starts_with("base64,")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CombatCard, SpecialCard};
    use crate::decks::definition::{ArtAsset, DeckCharacter};
    use rustc_hash::FxHashMap;

    fn deck() -> DeckDefinition {
        DeckDefinition {
            id: "knights".into(),
            name: "Knights".into(),
            author: "tester".into(),
            version: "1.0".into(),
            description: None,
            characters: vec![DeckCharacter::new("hero", "Hero", 20)],
            cards: (1..=30).map(|i| CombatCard::new(i, 2, 1).into()).collect(),
            art_assets: None,
        }
    }

    #[test]
    fn test_valid_deck() {
        assert!(validate_deck(&deck()).is_ok());
    }

    #[test]
    fn test_missing_author() {
        let mut d = deck();
        d.author = String::new();
        assert!(matches!(validate_deck(&d), Err(DeckError::MissingField("author"))));
    }

    #[test]
    fn test_non_positive_hp() {
        let mut d = deck();
        d.characters.push(DeckCharacter::new("ghost", "Ghost", 0));
        assert!(matches!(
            validate_deck(&d),
            Err(DeckError::InvalidCharacterHp { ref character, hp: 0 }) if character == "ghost"
        ));

        d.characters[1].hp = -4;
        assert!(matches!(validate_deck(&d), Err(DeckError::InvalidCharacterHp { hp: -4, .. })));

        d.characters[1].hp = 1;
        assert!(validate_deck(&d).is_ok());
    }

    #[test]
    fn test_wrong_count() {
        let mut d = deck();
        d.cards.pop();
        assert!(matches!(
            validate_deck(&d),
            Err(DeckError::WrongCardCount { expected: 30, found: 29 })
        ));
    }

    #[test]
    fn test_duplicate_id() {
        let mut d = deck();
        d.cards[29] = CombatCard::new(5, 1, 1).into();
        assert!(matches!(validate_deck(&d), Err(DeckError::DuplicateCardId(5))));
    }

    #[test]
    fn test_out_of_range_id() {
        let mut d = deck();
        d.cards[0] = CombatCard::new(31, 1, 1).into();
        assert!(matches!(validate_deck(&d), Err(DeckError::CardIdOutOfRange(31))));
    }

    #[test]
    fn test_incomplete_special() {
        let mut d = deck();
        d.cards[3] = SpecialCard::new(4, "Rally", "").into();
        assert!(matches!(validate_deck(&d), Err(DeckError::IncompleteSpecialCard(4))));
    }

    #[test]
    fn test_art_assets() {
        let mut d = deck();
        let mut assets = FxHashMap::default();
        assets.insert(
            "3".to_string(),
            ArtAsset { card_art: "data:image/png;base64,AAAA".into(), thumbnail: None },
        );
        d.art_assets = Some(assets.clone());
        assert!(validate_deck(&d).is_ok());

        assets.insert(
            "4".to_string(),
            ArtAsset { card_art: "data:image/png,AAAA".into(), thumbnail: None },
        );
        d.art_assets = Some(assets.clone());
        assert!(matches!(validate_deck(&d), Err(DeckError::InvalidArtData(4))));

        assets.remove("4");
        assets.insert(
            "40".to_string(),
            ArtAsset { card_art: "https://example.com/a.png".into(), thumbnail: None },
        );
        d.art_assets = Some(assets.clone());
        assert!(matches!(validate_deck(&d), Err(DeckError::ArtForMissingCard(40))));

        assets.remove("40");
        assets.insert(
            "three".to_string(),
            ArtAsset { card_art: "https://example.com/a.png".into(), thumbnail: None },
        );
        d.art_assets = Some(assets);
        assert!(matches!(validate_deck(&d), Err(DeckError::InvalidArtKey(_))));
    }

    #[test]
    fn test_base64_prefix() {
        assert!(is_base64_image_url("data:image/jpeg;base64,xyz"));
        assert!(!is_base64_image_url("data:image/;base64,xyz"));
        assert!(!is_base64_image_url("data:image/svg+xml;base64,xyz"));
    }
}
