//! Pure state transitions.
//!
//! Every operation on a match is a function `&GameState -> Result<GameState, _>`:
//! it validates its preconditions against the current snapshot, then returns
//! a complete, self-consistent next snapshot. The input is never modified, so
//! a failed precondition leaves the caller's state exactly as it was.
//!
//! ## Groups
//!
//! - [`cards`]: draw, play, discard, shuffle, dice
//! - [`board`]: movement, health, conditions, tokens, map changes
//! - [`combat`]: the attack → defend → resolve sub-machine
//! - [`inspection`]: peeking at and reordering the top of a deck
//!
//! Transitions that need randomness or a timestamp take a
//! [`TransitionContext`]. Publication is the session's job, not theirs.

pub mod board;
pub mod cards;
pub mod combat;
pub mod inspection;

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::TransitionError;
use super::game::GameState;
use super::player::Player;
use crate::core::{GameRng, PlayerId};

pub use cards::DieFace;

/// Randomness and wall-clock time for one transition.
pub struct TransitionContext<'a> {
    pub rng: &'a mut GameRng,
    /// Unix milliseconds, stamped into log entries and token ids.
    pub now: u64,
}

impl<'a> TransitionContext<'a> {
    pub fn new(rng: &'a mut GameRng, now: u64) -> Self {
        Self { rng, now }
    }
}

/// Combat stage derived from a snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatPhase {
    /// No pending attack and no unacknowledged result.
    Idle,
    /// An attack card is face down, waiting for the defender.
    AttackDeclared,
    /// The last result is still on display.
    Resolved,
}

impl fmt::Display for CombatPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CombatPhase::Idle => write!(f, "idle"),
            CombatPhase::AttackDeclared => write!(f, "attack declared"),
            CombatPhase::Resolved => write!(f, "resolved"),
        }
    }
}

impl GameState {
    /// Where the combat sub-machine currently stands.
    #[must_use]
    pub fn combat_phase(&self) -> CombatPhase {
        if self.attack_in_progress.is_some() {
            CombatPhase::AttackDeclared
        } else if self.last_attack.is_some() {
            CombatPhase::Resolved
        } else {
            CombatPhase::Idle
        }
    }

    /// Copy of the state with one player rewritten by `f`.
    pub(crate) fn with_player<T>(
        &self,
        id: &PlayerId,
        f: impl FnOnce(&mut Player) -> Result<T, TransitionError>,
    ) -> Result<(GameState, T), TransitionError> {
        let index = self
            .player_index(id)
            .ok_or_else(|| TransitionError::PlayerNotFound(id.clone()))?;

        let mut next = self.clone();
        let out = f(&mut next.players[index])?;
        Ok((next, out))
    }
}
