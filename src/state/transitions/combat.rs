//! Combat sub-machine: `Idle → AttackDeclared → Resolved → Idle`.
//!
//! ## Protocol
//!
//! 1. [`GameState::begin_attack`]: the attacker's card leaves the hand and
//!    is held face down in `attack_in_progress`.
//! 2. [`GameState::resolve_attack`]: the defender answers with a card or
//!    with nothing. Both cards go to their owners' discard piles and the
//!    pairing is recorded in `last_attack`.
//! 3. [`GameState::clear_last_attack`]: acknowledges the result.
//!
//! Resolution only reveals cards. Damage is applied separately through
//! `update_character_health`, by whoever does the arithmetic.
//!
//! Cards are checked against the wielding character with
//! [`owner_matches`](crate::cards::owner_matches).

use crate::cards::{owner_matches, Card, CombatCard};
use crate::core::{CharacterId, PlayerId};
use crate::state::character::Character;
use crate::state::error::TransitionError;
use crate::state::game::{AttackInProgress, CombatResult, GameState, LogEntry};

impl GameState {
    /// Declare an attack with `card` from the attacker's hand.
    ///
    /// Fails without any change if an attack is already pending, either
    /// character or the attacker's player is unknown, the card is bound to
    /// another character, or the card is not in the attacker's hand.
    pub fn begin_attack(
        &self,
        attacker_id: &CharacterId,
        defender_id: &CharacterId,
        card: CombatCard,
    ) -> Result<GameState, TransitionError> {
        if self.attack_in_progress.is_some() {
            return Err(TransitionError::AttackAlreadyInProgress);
        }

        let attacker = self.require_character(attacker_id)?;
        self.require_character(defender_id)?;
        check_owner(attacker_id, &card)?;

        let (mut next, ()) = self.with_player(&attacker.player_id, |player| {
            let pos = player.combat_position(&card).ok_or_else(|| TransitionError::CardNotInHand {
                player: player.id.clone(),
                card: card.id,
            })?;
            player.hand.remove(pos);
            Ok(())
        })?;

        next.attack_in_progress = Some(AttackInProgress {
            attacker_id: attacker_id.clone(),
            defender_id: defender_id.clone(),
            attacker_player_id: Some(attacker.player_id.clone()),
            card,
        });
        Ok(next)
    }

    /// Reveal the defence (or lack of one) and close the pending attack.
    ///
    /// The attacking card goes to the attacker's discard pile; a defending
    /// card leaves the defender's hand for the defender's discard pile.
    ///
    /// Either character may have been destroyed since the attack was
    /// declared. The attack still closes: the held card goes to the discard
    /// pile of the player it was taken from, and a defence offered for a
    /// destroyed defender is not played.
    pub fn resolve_attack(&self, defending: Option<CombatCard>, now: u64) -> Result<GameState, TransitionError> {
        let pending = self
            .attack_in_progress
            .as_ref()
            .ok_or(TransitionError::NoAttackInProgress)?;

        let attacker = self.character(&pending.attacker_id);
        let defender = self.character(&pending.defender_id);
        let defending = match (defender, defending) {
            (Some(defender), Some(card)) => {
                check_owner(&defender.id, &card)?;
                Some(card)
            }
            (None, Some(card)) => {
                log::debug!(
                    "resolve_attack: {} is gone, card {} stays in hand",
                    pending.defender_id,
                    card.id
                );
                None
            }
            (_, None) => None,
        };

        let mut next = match self.attacking_player(pending, attacker) {
            Some(owner) => {
                let (next, ()) = self.with_player(&owner, |player| {
                    player.discard_pile.push_back(pending.card.clone().into());
                    Ok(())
                })?;
                next
            }
            None => {
                log::warn!(
                    "resolve_attack: no player for {}, held card {} dropped",
                    pending.attacker_id,
                    pending.card.id
                );
                self.clone()
            }
        };

        if let (Some(defender), Some(card)) = (defender, &defending) {
            let (played, ()) = next.with_player(&defender.player_id, |player| {
                let pos = player.combat_position(card).ok_or_else(|| TransitionError::CardNotInHand {
                    player: player.id.clone(),
                    card: card.id,
                })?;
                let played = player.hand.remove(pos);
                player.discard_pile.push_back(played);
                Ok(())
            })?;
            next = played;
        }

        let attacker_name = attacker.map_or(pending.attacker_id.as_str(), |c| c.name.as_str());
        let defender_name = defender.map_or(pending.defender_id.as_str(), |c| c.name.as_str());
        let message = combat_message(attacker_name, defender_name, &pending.card, defending.as_ref());
        next.log.push_back(
            LogEntry::message(pending.attacker_id.as_str(), attacker_name, message, now)
                .with_card(Card::Combat(pending.card.clone())),
        );
        next.last_attack = Some(CombatResult {
            attacker_id: pending.attacker_id.clone(),
            defender_id: pending.defender_id.clone(),
            attacking_card: pending.card.clone(),
            defending_card: defending,
        });
        next.attack_in_progress = None;
        Ok(next)
    }

    /// Acknowledge the last combat result.
    #[must_use]
    pub fn clear_last_attack(&self) -> GameState {
        let mut next = self.clone();
        next.last_attack = None;
        next
    }

    /// The player the held card came from.
    ///
    /// Snapshots written before the player was recorded fall back to the
    /// live attacker, then to the `"{player}-"` prefix of its id.
    fn attacking_player(&self, pending: &AttackInProgress, attacker: Option<&Character>) -> Option<PlayerId> {
        if let Some(id) = &pending.attacker_player_id {
            return Some(id.clone());
        }
        if let Some(attacker) = attacker {
            return Some(attacker.player_id.clone());
        }
        self.players
            .iter()
            .find(|p| {
                pending
                    .attacker_id
                    .as_str()
                    .strip_prefix(p.id.as_str())
                    .is_some_and(|rest| rest.starts_with('-'))
            })
            .map(|p| p.id.clone())
    }

    fn require_character(&self, id: &CharacterId) -> Result<&Character, TransitionError> {
        self.character(id)
            .ok_or_else(|| TransitionError::CharacterNotFound(id.clone()))
    }
}

fn check_owner(wielder: &CharacterId, card: &CombatCard) -> Result<(), TransitionError> {
    if owner_matches(wielder, card.owner.as_deref()) {
        Ok(())
    } else {
        Err(TransitionError::NotOwner {
            character: wielder.clone(),
            owner: card.owner.clone(),
        })
    }
}

fn combat_message(attacker: &str, defender: &str, attack: &CombatCard, defence: Option<&CombatCard>) -> String {
    let mut message = format!("{} attacked {} with a {} ATK card.", attacker, defender, attack.attack);
    match defence {
        Some(card) => message.push_str(&format!(" {} defended with a {} DEF card.", defender, card.defense)),
        None => message.push_str(&format!(" {} did not block.", defender)),
    }
    message
}
