//! Hand, deck and discard transitions, plus the movement die.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::TransitionContext;
use crate::cards::{Card, CardId};
use crate::core::{CharacterId, GameRng, PlayerId};
use crate::state::error::TransitionError;
use crate::state::game::{GameState, LogEntry};

/// Faces of the movement die.
///
/// `All n`: every character may move up to n cells. `One n`: a single
/// character may move up to n cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DieFace {
    #[serde(rename = "ALL 2")]
    All2,
    #[serde(rename = "ALL 3")]
    All3,
    #[serde(rename = "ALL 4")]
    All4,
    #[serde(rename = "ONE 3")]
    One3,
    #[serde(rename = "ONE 4")]
    One4,
    #[serde(rename = "ONE 5")]
    One5,
}

impl DieFace {
    /// All six faces in table order.
    pub const ALL: [DieFace; 6] = [
        DieFace::All2,
        DieFace::All3,
        DieFace::All4,
        DieFace::One3,
        DieFace::One4,
        DieFace::One5,
    ];

    /// Uniform roll over the six faces.
    pub fn roll(rng: &mut GameRng) -> Self {
        Self::ALL[rng.gen_range_usize(0..Self::ALL.len())]
    }

    /// Whether the face lets every character move.
    #[must_use]
    pub const fn moves_all(self) -> bool {
        matches!(self, DieFace::All2 | DieFace::All3 | DieFace::All4)
    }

    /// Movement allowance in cells.
    #[must_use]
    pub const fn distance(self) -> u32 {
        match self {
            DieFace::All2 => 2,
            DieFace::All3 | DieFace::One3 => 3,
            DieFace::All4 | DieFace::One4 => 4,
            DieFace::One5 => 5,
        }
    }
}

impl fmt::Display for DieFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scope = if self.moves_all() { "ALL" } else { "ONE" };
        write!(f, "{} {}", scope, self.distance())
    }
}

impl GameState {
    /// Move the top deck card into the player's hand.
    ///
    /// An empty deck is first refilled by shuffling the discard pile into
    /// it. With both empty the draw is a no-op and `Ok(None)` is returned.
    /// A drawn combat card is bound to `character` when one is given.
    pub fn draw_card(
        &self,
        player_id: &PlayerId,
        character: Option<&CharacterId>,
        ctx: &mut TransitionContext<'_>,
    ) -> Result<Option<GameState>, TransitionError> {
        let (mut next, drawn) = self.with_player(player_id, |player| {
            if player.deck.is_empty() && !player.discard_pile.is_empty() {
                player.deck = ctx.rng.shuffle_vector(&player.discard_pile);
                player.discard_pile.clear();
            }

            let Some(card) = player.deck.pop_front() else {
                return Ok(None);
            };
            let card = match character {
                Some(id) => card.bound_to(id.as_str()),
                None => card,
            };
            player.hand.push_back(card);
            Ok(Some(player.name.clone()))
        })?;

        let Some(name) = drawn else {
            log::debug!("draw_card: {} has no cards left to draw", player_id);
            return Ok(None);
        };
        let message = format!("{} drew a card.", name);
        next.log.push_back(LogEntry::message(player_id.as_str(), name, message, ctx.now));
        Ok(Some(next))
    }

    /// Move a card from hand to discard, logging the card itself.
    pub fn play_card(&self, player_id: &PlayerId, card: CardId, now: u64) -> Result<GameState, TransitionError> {
        let (mut next, (name, played)) = self.hand_to_discard(player_id, card)?;
        next.log.push_back(LogEntry {
            player_id: player_id.to_string(),
            player_name: name,
            card: Some(played),
            message: None,
            timestamp: now,
        });
        Ok(next)
    }

    /// Move a card from hand to discard with a readable log line.
    pub fn discard_card(&self, player_id: &PlayerId, card: CardId, now: u64) -> Result<GameState, TransitionError> {
        let (mut next, (name, discarded)) = self.hand_to_discard(player_id, card)?;
        let message = format!("{} discarded {}.", name, discarded.label());
        next.log
            .push_back(LogEntry::message(player_id.as_str(), name, message, now).with_card(discarded));
        Ok(next)
    }

    /// Uniformly permute the player's deck. Nothing is logged.
    pub fn shuffle_deck(&self, player_id: &PlayerId, rng: &mut GameRng) -> Result<GameState, TransitionError> {
        let (next, ()) = self.with_player(player_id, |player| {
            player.deck = rng.shuffle_vector(&player.deck);
            Ok(())
        })?;
        Ok(next)
    }

    /// Roll the movement die and log the face.
    ///
    /// `sides` is accepted for interface symmetry only; the outcome space is
    /// always the six faces of [`DieFace`].
    pub fn roll_dice(
        &self,
        player_id: &PlayerId,
        sides: u32,
        ctx: &mut TransitionContext<'_>,
    ) -> Result<(GameState, DieFace), TransitionError> {
        let player = self
            .player(player_id)
            .ok_or_else(|| TransitionError::PlayerNotFound(player_id.clone()))?;

        let face = DieFace::roll(ctx.rng);
        log::debug!("roll_dice: {} rolled {} (asked for d{})", player_id, face, sides);

        let mut next = self.clone();
        let message = format!("{} rolled: {}", player.name, face);
        next.log
            .push_back(LogEntry::message(player_id.as_str(), player.name.clone(), message, ctx.now));
        Ok((next, face))
    }

    fn hand_to_discard(&self, player_id: &PlayerId, card: CardId) -> Result<(GameState, (String, Card)), TransitionError> {
        self.with_player(player_id, |player| {
            let taken = player.take_from_hand(card).ok_or_else(|| TransitionError::CardNotInHand {
                player: player_id.clone(),
                card,
            })?;
            player.discard_pile.push_back(taken.clone());
            Ok((player.name.clone(), taken))
        })
    }
}
