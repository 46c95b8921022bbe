//! In-process replication backend.
//!
//! `MemoryHub` plays both the durable store and the broadcast service for
//! any number of games. Clones share the same hub, so every client of a
//! test (or of a single-process host) holds its own handle.
//!
//! Storage keeps the serialized JSON text, exactly what a remote store
//! would hold. Broadcasts fan out the serialized [`BroadcastEnvelope`]
//! over unbounded `futures` channels, one per subscription.
//!
//! Faults can be injected per leg to exercise divergence:
//!
//! ```
//! use futures::executor::block_on;
//! use skirmish_engine::core::GameId;
//! use skirmish_engine::replication::{publish, MemoryHub, ReplicationError};
//! use skirmish_engine::state::GameState;
//!
//! let hub = MemoryHub::new();
//! let game = GameId::new("g1");
//! let mut inbox = hub.subscribe(&game);
//!
//! hub.fail_persist(Some("disk full"));
//! let result = block_on(publish(&hub, &game, &GameState::default()));
//!
//! assert!(matches!(result, Err(ReplicationError::Persist(_))));
//! assert!(hub.stored_json(&game).is_none());
//! assert_eq!(inbox.drain().len(), 1);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use futures::StreamExt;
use rustc_hash::FxHashMap;

use super::{BroadcastEnvelope, ReplicationError, Replicator, StoredGame};
use crate::core::GameId;
use crate::state::GameState;

#[derive(Debug, Default)]
struct Hub {
    records: FxHashMap<GameId, String>,
    channels: FxHashMap<GameId, Vec<UnboundedSender<String>>>,
    persist_fault: Option<String>,
    broadcast_fault: Option<String>,
    persist_count: usize,
    broadcast_count: usize,
}

/// Shared in-memory store and broadcast hub.
///
/// Single-threaded: handles are `Rc`-backed, matching one event loop per
/// client.
#[derive(Clone, Debug, Default)]
pub struct MemoryHub {
    inner: Rc<RefCell<Hub>>,
}

impl MemoryHub {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a receiving end on `game`'s channel.
    ///
    /// Only broadcasts sent after subscribing are delivered.
    pub fn subscribe(&self, game: &GameId) -> Subscription {
        let (tx, rx) = mpsc::unbounded();
        self.inner
            .borrow_mut()
            .channels
            .entry(game.clone())
            .or_default()
            .push(tx);
        Subscription { rx }
    }

    /// Make every persist fail with `reason` (or succeed again with `None`).
    pub fn fail_persist(&self, reason: Option<&str>) {
        self.inner.borrow_mut().persist_fault = reason.map(str::to_string);
    }

    /// Make every broadcast return the non-ok `status` (or succeed again
    /// with `None`). A failed broadcast reaches nobody.
    pub fn fail_broadcast(&self, status: Option<&str>) {
        self.inner.borrow_mut().broadcast_fault = status.map(str::to_string);
    }

    /// Raw stored text for `game`.
    #[must_use]
    pub fn stored_json(&self, game: &GameId) -> Option<String> {
        self.inner.borrow().records.get(game).cloned()
    }

    /// Write a raw record, bypassing fault injection.
    pub fn seed_record(&self, game: &GameId, json: impl Into<String>) {
        self.inner.borrow_mut().records.insert(game.clone(), json.into());
    }

    /// Successful persists so far.
    #[must_use]
    pub fn persist_count(&self) -> usize {
        self.inner.borrow().persist_count
    }

    /// Successful broadcasts so far.
    #[must_use]
    pub fn broadcast_count(&self) -> usize {
        self.inner.borrow().broadcast_count
    }

    /// Live subscriptions on `game`.
    #[must_use]
    pub fn subscriber_count(&self, game: &GameId) -> usize {
        self.inner
            .borrow()
            .channels
            .get(game)
            .map_or(0, |subs| subs.iter().filter(|tx| !tx.is_closed()).count())
    }
}

impl Replicator for MemoryHub {
    async fn persist(&self, game: &GameId, record: &StoredGame) -> Result<(), ReplicationError> {
        let json = serde_json::to_string(record)?;

        let mut hub = self.inner.borrow_mut();
        if let Some(reason) = &hub.persist_fault {
            return Err(ReplicationError::Persist(reason.clone()));
        }
        hub.records.insert(game.clone(), json);
        hub.persist_count += 1;
        Ok(())
    }

    async fn broadcast(&self, game: &GameId, snapshot: &GameState) -> Result<(), ReplicationError> {
        let message = BroadcastEnvelope::state_update(snapshot.clone()).to_json()?;

        let mut hub = self.inner.borrow_mut();
        if let Some(status) = &hub.broadcast_fault {
            return Err(ReplicationError::Broadcast(status.clone()));
        }
        if let Some(subscribers) = hub.channels.get_mut(game) {
            subscribers.retain(|tx| tx.unbounded_send(message.clone()).is_ok());
        }
        hub.broadcast_count += 1;
        Ok(())
    }

    async fn load(&self, game: &GameId) -> Result<Option<StoredGame>, ReplicationError> {
        let hub = self.inner.borrow();
        match hub.records.get(game) {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }
}

/// Receiving end of a game's broadcast channel.
#[derive(Debug)]
pub struct Subscription {
    rx: UnboundedReceiver<String>,
}

impl Subscription {
    /// Next message, waiting for one. `None` once the hub is gone.
    pub async fn recv(&mut self) -> Option<String> {
        self.rx.next().await
    }

    /// Next message if one is already queued.
    pub fn try_recv(&mut self) -> Option<String> {
        self.rx.try_recv().ok()
    }

    /// Every queued message, oldest first.
    pub fn drain(&mut self) -> Vec<String> {
        std::iter::from_fn(|| self.try_recv()).collect()
    }
}
