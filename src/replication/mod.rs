//! Replication: durable storage plus a broadcast channel per game.
//!
//! Every published snapshot is written twice: once to storage keyed by game
//! id (what a rejoining client fetches), and once to the game's broadcast
//! channel (what connected clients apply). The two writes are independent.
//! There is no transaction spanning them, and they can diverge.
//!
//! ## Publish Contract
//!
//! 1. Persist the full snapshot.
//! 2. Broadcast it to every subscriber, the publisher included.
//!
//! A persist failure is logged and the broadcast is still attempted. Any
//! failure is returned to the caller, who has already applied the snapshot
//! locally and does not roll back. Nothing is retried.
//!
//! ## Ordering
//!
//! None. Concurrent publishes race and the last broadcast a client
//! processes wins.

pub mod memory;

use std::future::Future;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::core::GameId;
use crate::state::GameState;

pub use memory::{MemoryHub, Subscription};

/// Event name carried by every snapshot broadcast.
pub const STATE_UPDATE_EVENT: &str = "game_state_update";

/// Persisted value marking a game that has not started yet.
pub const LOBBY_SENTINEL: &str = "lobby";

#[derive(Debug, Error)]
pub enum ReplicationError {
    #[error("persist failed: {0}")]
    Persist(String),

    #[error("broadcast not acknowledged: {0}")]
    Broadcast(String),

    #[error("persist failed: {persist}; broadcast not acknowledged: {status}")]
    Both { persist: String, status: String },

    #[error("snapshot encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ReplicationError {
    /// The message without the leg prefix.
    fn into_detail(self) -> String {
        match self {
            ReplicationError::Persist(detail) | ReplicationError::Broadcast(detail) => detail,
            other => other.to_string(),
        }
    }
}

/// One persisted record per game.
///
/// Serialized as the full `GameState` object, or as the bare JSON string
/// `"lobby"` before the host starts the game.
#[derive(Clone, Debug, PartialEq)]
pub enum StoredGame {
    Lobby,
    Active(Box<GameState>),
}

impl StoredGame {
    #[must_use]
    pub fn active(state: GameState) -> Self {
        StoredGame::Active(Box::new(state))
    }

    /// The snapshot, if the game has started.
    #[must_use]
    pub fn state(&self) -> Option<&GameState> {
        match self {
            StoredGame::Lobby => None,
            StoredGame::Active(state) => Some(state),
        }
    }
}

impl Serialize for StoredGame {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            StoredGame::Lobby => serializer.serialize_str(LOBBY_SENTINEL),
            StoredGame::Active(state) => state.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for StoredGame {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Sentinel(String),
            State(Box<GameState>),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Sentinel(s) if s == LOBBY_SENTINEL => Ok(StoredGame::Lobby),
            Raw::Sentinel(s) => Err(serde::de::Error::custom(format!("unknown game record {:?}", s))),
            Raw::State(state) => Ok(StoredGame::Active(state)),
        }
    }
}

/// Wire message on a game's broadcast channel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BroadcastEnvelope {
    pub event: String,
    pub payload: GameState,
}

impl BroadcastEnvelope {
    #[must_use]
    pub fn state_update(payload: GameState) -> Self {
        Self {
            event: STATE_UPDATE_EVENT.to_string(),
            payload,
        }
    }

    pub fn to_json(&self) -> Result<String, ReplicationError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, ReplicationError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Whether this is a snapshot update (the only event clients act on).
    #[must_use]
    pub fn is_state_update(&self) -> bool {
        self.event == STATE_UPDATE_EVENT
    }
}

/// Storage and broadcast backend for one or more games.
///
/// The two legs are awaited one after the other by [`publish`]; a backend
/// never needs to coordinate them.
pub trait Replicator {
    /// Replace the stored record for `game`.
    fn persist(&self, game: &GameId, record: &StoredGame) -> impl Future<Output = Result<(), ReplicationError>>;

    /// Send `snapshot` to every subscriber of `game`, the sender included.
    fn broadcast(&self, game: &GameId, snapshot: &GameState) -> impl Future<Output = Result<(), ReplicationError>>;

    /// Fetch the stored record, if any.
    fn load(&self, game: &GameId) -> impl Future<Output = Result<Option<StoredGame>, ReplicationError>>;
}

/// Persist then broadcast `snapshot`.
///
/// Both legs always run. The result reports whichever failed.
pub async fn publish<R: Replicator>(replicator: &R, game: &GameId, snapshot: &GameState) -> Result<(), ReplicationError> {
    let record = StoredGame::active(snapshot.clone());

    let persisted = replicator.persist(game, &record).await;
    if let Err(e) = &persisted {
        log::error!("game {} rev {}: {}", game, snapshot.revision, e);
    }

    let broadcast = replicator.broadcast(game, snapshot).await;
    if let Err(e) = &broadcast {
        log::error!("game {} rev {}: {}", game, snapshot.revision, e);
    }

    match (persisted, broadcast) {
        (Ok(()), Ok(())) => {
            log::debug!("game {} rev {} published", game, snapshot.revision);
            Ok(())
        }
        (Err(e), Ok(())) | (Ok(()), Err(e)) => Err(e),
        (Err(p), Err(b)) => Err(ReplicationError::Both {
            persist: p.into_detail(),
            status: b.into_detail(),
        }),
    }
}

/// Mark `game` as a lobby that has not started.
pub async fn open_lobby<R: Replicator>(replicator: &R, game: &GameId) -> Result<(), ReplicationError> {
    replicator.persist(game, &StoredGame::Lobby).await.map_err(|e| {
        log::error!("game {}: opening lobby: {}", game, e);
        e
    })
}
