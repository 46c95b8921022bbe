//! Card values and the ownership rule.
//!
//! ## Key Types
//!
//! - `CardId`: id unique within one deck (1..=30), not across decks
//! - `Card`: tagged `Combat | Special` union
//! - `owner_matches`: suffix rule binding a card to a character instance

pub mod card;
pub mod ownership;

pub use card::{Card, CardId, CombatCard, SpecialCard};
pub use ownership::{can_wield, owner_matches};
