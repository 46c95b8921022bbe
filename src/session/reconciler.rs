//! Applying inbound snapshots to a session.
//!
//! Snapshots arrive from two places: the broadcast channel, and storage on
//! rejoin. Either way the local state is replaced wholesale. Nested
//! structures (hands, decks, the log) are never merged item by item.
//!
//! The reconciler also drives the client's view: it stays in `Lobby` until
//! the first snapshot with players arrives, then moves to `Active` for good.
//!
//! Under `StalenessPolicy::RejectStale`, a snapshot whose revision is below
//! the local one is dropped. The default `LastWriteWins` applies everything.

use serde::{Deserialize, Serialize};

use super::{GameSession, SessionError};
use crate::config::StalenessPolicy;
use crate::replication::{BroadcastEnvelope, Replicator, StoredGame};
use crate::state::GameState;

/// What the client should be showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewPhase {
    #[default]
    Lobby,
    Active,
}

/// Outcome of handling one inbound message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reconciled {
    /// Local state replaced.
    Applied,
    /// Local state replaced, and the view moved from lobby to game.
    Activated,
    /// Older than local state; dropped.
    Stale { incoming: u64, local: u64 },
    /// Not a snapshot (other event, or the lobby sentinel).
    Ignored,
}

#[derive(Clone, Debug, Default)]
pub struct Reconciler {
    phase: ViewPhase,
    policy: StalenessPolicy,
}

impl Reconciler {
    #[must_use]
    pub fn new(policy: StalenessPolicy) -> Self {
        Self {
            phase: ViewPhase::Lobby,
            policy,
        }
    }

    /// Reconciler using the session's configured policy.
    #[must_use]
    pub fn for_session<R: Replicator>(session: &GameSession<R>) -> Self {
        Self::new(session.config().staleness)
    }

    #[must_use]
    pub fn phase(&self) -> ViewPhase {
        self.phase
    }

    #[must_use]
    pub fn policy(&self) -> StalenessPolicy {
        self.policy
    }

    /// Replace the session's state with `snapshot`, subject to the policy.
    pub fn apply_snapshot<R: Replicator>(&mut self, session: &mut GameSession<R>, snapshot: GameState) -> Reconciled {
        let local = session.state().revision;
        if self.policy == StalenessPolicy::RejectStale && snapshot.revision < local {
            log::debug!(
                "game {}: dropping stale snapshot rev {} (local rev {})",
                session.game_id(),
                snapshot.revision,
                local
            );
            return Reconciled::Stale {
                incoming: snapshot.revision,
                local,
            };
        }

        let started = snapshot.is_started();
        session.replace_state(snapshot);

        if started && self.phase == ViewPhase::Lobby {
            log::debug!("game {}: first snapshot with players, entering game", session.game_id());
            self.phase = ViewPhase::Active;
            Reconciled::Activated
        } else {
            Reconciled::Applied
        }
    }

    /// Handle one raw message from the broadcast channel.
    pub fn apply_broadcast<R: Replicator>(
        &mut self,
        session: &mut GameSession<R>,
        message: &str,
    ) -> Result<Reconciled, SessionError> {
        let envelope = BroadcastEnvelope::from_json(message).map_err(|e| {
            log::error!("game {}: unreadable broadcast: {}", session.game_id(), e);
            SessionError::Replication(e)
        })?;

        if !envelope.is_state_update() {
            log::debug!("game {}: ignoring event {:?}", session.game_id(), envelope.event);
            return Ok(Reconciled::Ignored);
        }
        Ok(self.apply_snapshot(session, envelope.payload))
    }

    /// Fetch the stored record and apply it.
    ///
    /// A missing record or the lobby sentinel leaves everything as is.
    pub async fn rejoin<R: Replicator>(&mut self, session: &mut GameSession<R>) -> Result<Reconciled, SessionError> {
        let game = session.game_id().clone();
        let record = session.replicator().load(&game).await.map_err(|e| {
            log::error!("game {}: rejoin fetch failed: {}", game, e);
            SessionError::Replication(e)
        })?;

        match record {
            Some(StoredGame::Active(state)) => Ok(self.apply_snapshot(session, *state)),
            Some(StoredGame::Lobby) | None => {
                log::debug!("game {}: rejoined a game that has not started", game);
                Ok(Reconciled::Ignored)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::replication::MemoryHub;
    use crate::state::Player;

    fn session(policy: StalenessPolicy) -> GameSession<MemoryHub> {
        GameSession::new("g1", MemoryHub::new(), SessionConfig::default().with_staleness(policy))
    }

    fn started(revision: u64) -> GameState {
        let mut state = GameState::default();
        state.players.push_back(Player::new("p1", "Alice", vec![]));
        state.revision = revision;
        state
    }

    #[test]
    fn test_lobby_snapshot_keeps_lobby_view() {
        let mut s = session(StalenessPolicy::LastWriteWins);
        let mut r = Reconciler::for_session(&s);

        assert_eq!(r.apply_snapshot(&mut s, GameState::default()), Reconciled::Applied);
        assert_eq!(r.phase(), ViewPhase::Lobby);
    }

    #[test]
    fn test_first_players_activate_once() {
        let mut s = session(StalenessPolicy::LastWriteWins);
        let mut r = Reconciler::for_session(&s);

        assert_eq!(r.apply_snapshot(&mut s, started(1)), Reconciled::Activated);
        assert_eq!(r.apply_snapshot(&mut s, started(2)), Reconciled::Applied);
        assert_eq!(r.phase(), ViewPhase::Active);
    }

    #[test]
    fn test_last_write_wins_accepts_older() {
        let mut s = session(StalenessPolicy::LastWriteWins);
        let mut r = Reconciler::for_session(&s);

        r.apply_snapshot(&mut s, started(5));
        assert_eq!(r.apply_snapshot(&mut s, started(3)), Reconciled::Applied);
        assert_eq!(s.state().revision, 3);
    }

    #[test]
    fn test_reject_stale_drops_older() {
        let mut s = session(StalenessPolicy::RejectStale);
        let mut r = Reconciler::for_session(&s);

        r.apply_snapshot(&mut s, started(5));
        assert_eq!(
            r.apply_snapshot(&mut s, started(3)),
            Reconciled::Stale { incoming: 3, local: 5 }
        );
        assert_eq!(s.state().revision, 5);
        assert_eq!(r.apply_snapshot(&mut s, started(5)), Reconciled::Applied);
    }

    #[test]
    fn test_other_events_ignored() {
        let mut s = session(StalenessPolicy::LastWriteWins);
        let mut r = Reconciler::for_session(&s);

        let message = serde_json::json!({ "event": "chat", "payload": started(1) }).to_string();
        assert_eq!(r.apply_broadcast(&mut s, &message).unwrap(), Reconciled::Ignored);
        assert!(!s.state().is_started());
    }

    #[test]
    fn test_garbage_broadcast_is_an_error() {
        let mut s = session(StalenessPolicy::LastWriteWins);
        let mut r = Reconciler::for_session(&s);
        assert!(r.apply_broadcast(&mut s, "not json").is_err());
    }
}
