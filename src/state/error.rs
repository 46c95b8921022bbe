//! Precondition failures of state transitions.

use thiserror::Error;

use crate::cards::CardId;
use crate::core::{CharacterId, PlayerId};

/// A transition's preconditions did not hold. The state it was computed
/// from is untouched.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("player not found: {0}")]
    PlayerNotFound(PlayerId),

    #[error("character not found: {0}")]
    CharacterNotFound(CharacterId),

    #[error("{card} is not in {player}'s hand")]
    CardNotInHand { player: PlayerId, card: CardId },

    #[error("card bound to {owner:?} does not belong to {character}")]
    NotOwner { character: CharacterId, owner: Option<String> },

    #[error("no attack in progress")]
    NoAttackInProgress,

    #[error("an attack is already in progress")]
    AttackAlreadyInProgress,

    #[error("no deck inspection in progress")]
    NoInspectionOpen,
}
