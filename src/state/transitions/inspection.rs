//! Deck inspection ("scry"): peek at the top of a deck, then put the
//! inspected cards back on top or at the bottom in a chosen order.

use crate::cards::Card;
use crate::core::PlayerId;
use crate::state::error::TransitionError;
use crate::state::game::{DeckInspection, GameState, LogEntry};

impl GameState {
    /// Open an inspection of the top `count` cards of `target`'s deck.
    ///
    /// `count` is clamped to the deck size. The cards stay in the deck; the
    /// inspection holds copies. An inspection that is already open is
    /// replaced.
    pub fn inspect_deck(
        &self,
        inspector_id: &PlayerId,
        target_id: &PlayerId,
        count: usize,
        now: u64,
    ) -> Result<GameState, TransitionError> {
        let inspector = self
            .player(inspector_id)
            .ok_or_else(|| TransitionError::PlayerNotFound(inspector_id.clone()))?;
        let target = self
            .player(target_id)
            .ok_or_else(|| TransitionError::PlayerNotFound(target_id.clone()))?;

        let taken = count.min(target.deck.len());
        let cards = target.deck.take(taken);

        if let Some(open) = &self.deck_inspection {
            log::debug!(
                "inspect_deck: replacing open inspection of {} by {}",
                open.target_player_id,
                open.inspector_id
            );
        }

        let message = format!(
            "{} is inspecting the top {} cards of {}'s deck.",
            inspector.name, taken, target.name
        );
        let mut next = self.clone();
        next.log.push_back(LogEntry::message(
            inspector_id.as_str(),
            inspector.name.clone(),
            message,
            now,
        ));
        next.deck_inspection = Some(DeckInspection {
            inspector_id: inspector_id.clone(),
            target_player_id: target_id.clone(),
            cards,
        });
        Ok(next)
    }

    /// Close the open inspection and rebuild the target's deck as
    /// `to_top ++ rest ++ to_bottom`, where `rest` is the deck with the
    /// inspected cards taken out.
    ///
    /// `to_top` and `to_bottom` together are expected to be a permutation of
    /// the inspected cards. That is the caller's obligation and is not
    /// re-checked here.
    pub fn resolve_deck_inspection(&self, to_top: Vec<Card>, to_bottom: Vec<Card>) -> Result<GameState, TransitionError> {
        let inspection = self.deck_inspection.as_ref().ok_or(TransitionError::NoInspectionOpen)?;

        let (mut next, ()) = self.with_player(&inspection.target_player_id, |player| {
            let mut rest = player.deck.clone();
            for inspected in &inspection.cards {
                if let Some(pos) = rest.index_of(inspected) {
                    rest.remove(pos);
                }
            }

            let mut deck: im::Vector<Card> = to_top.into_iter().collect();
            deck.append(rest);
            deck.extend(to_bottom);
            player.deck = deck;
            Ok(())
        })?;

        next.deck_inspection = None;
        Ok(next)
    }
}
