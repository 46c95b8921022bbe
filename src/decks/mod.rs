//! Deck registry: static deck definitions and their validation.
//!
//! Leaf dependency. Decks are consulted when building the initial game
//! state and never mutated by live play.

pub mod definition;
pub mod registry;
pub mod validate;

pub use definition::{ArtAsset, CharacterSize, DeckCharacter, DeckDefinition, DeckMetadata};
pub use registry::DeckRegistry;
pub use validate::{validate_deck, DeckError, DECK_SIZE};
