//! Player zones: hand, deck, discard pile.
//!
//! The deck is ordered with the top card at index 0. Hands are unordered
//! for gameplay purposes but keep insertion order for display.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId, CombatCard};
use crate::core::PlayerId;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub hand: Vector<Card>,
    /// Top of deck = index 0.
    pub deck: Vector<Card>,
    pub discard_pile: Vector<Card>,
}

impl Player {
    /// Create a player with an empty hand and discard pile.
    #[must_use]
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>, deck: impl IntoIterator<Item = Card>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            hand: Vector::new(),
            deck: deck.into_iter().collect(),
            discard_pile: Vector::new(),
        }
    }

    /// Position of the first hand card with this id.
    #[must_use]
    pub fn hand_position(&self, card: CardId) -> Option<usize> {
        self.hand.iter().position(|c| c.id() == card)
    }

    /// Position of a combat card in hand matching id and binding.
    #[must_use]
    pub fn combat_position(&self, card: &CombatCard) -> Option<usize> {
        self.hand.iter().position(|c| match c {
            Card::Combat(held) => held.id == card.id && held.owner == card.owner,
            Card::Special(_) => false,
        })
    }

    /// Remove and return the first hand card with this id.
    pub fn take_from_hand(&mut self, card: CardId) -> Option<Card> {
        let pos = self.hand_position(card)?;
        Some(self.hand.remove(pos))
    }

    /// Total cards across hand, deck and discard.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.hand.len() + self.deck.len() + self.discard_pile.len()
    }

    /// Whether the hand has reached a caller-side limit.
    ///
    /// The session never enforces a hand limit; the calling layer gates
    /// draws with this.
    #[must_use]
    pub fn hand_at_limit(&self, limit: usize) -> bool {
        self.hand.len() >= limit
    }
}
