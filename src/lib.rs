//! # skirmish-engine
//!
//! Game-state synchronization and combat resolution for a turn-based,
//! multi-client tactical card game.
//!
//! ## Design Principles
//!
//! 1. **Snapshots, not diffs**: every action computes a complete next
//!    `GameState` and publishes the whole thing.
//!
//! 2. **No arbiter**: each client runs the same transitions locally and
//!    publishes the result. Clients converge by overwriting their state with
//!    whatever snapshot they receive last.
//!
//! 3. **Explicit sessions**: one `GameSession` per client per game. No
//!    global store.
//!
//! ## Architecture
//!
//! - **Pure transitions**: `GameState` methods borrow the current snapshot
//!   and return the next one, or a `TransitionError` with the input untouched.
//!
//! - **Persistent Data Structures**: O(1) snapshot cloning via `im-rs`.
//!
//! - **Best-effort replication**: persist, then broadcast, both attempted,
//!   neither retried, no rollback.
//!
//! ## Modules
//!
//! - `core`: ids, RNG, clock
//! - `cards`: combat and special cards, the ownership suffix rule
//! - `decks`: deck files, validation, registry
//! - `maps`: terrain grids and the preset registry
//! - `conditions`: status condition catalog
//! - `config`: session configuration
//! - `state`: the game document, transitions, initial setup
//! - `replication`: storage + broadcast boundary, in-memory backend
//! - `session`: per-game session and snapshot reconciler

pub mod core;
pub mod cards;
pub mod decks;
pub mod maps;
pub mod conditions;
pub mod config;
pub mod state;
pub mod replication;
pub mod session;

// Re-export commonly used types
pub use crate::core::{CharacterId, Clock, GameId, GameRng, PlayerId};

pub use crate::cards::{can_wield, owner_matches, Card, CardId, CombatCard, SpecialCard};

pub use crate::decks::{CharacterSize, DeckCharacter, DeckDefinition, DeckError, DeckRegistry};

pub use crate::maps::{MapDefinition, MapError, MapRegistry, Terrain};

pub use crate::config::{SessionConfig, StalenessPolicy};

pub use crate::state::{
    AttackInProgress, Character, CombatPhase, CombatResult, DeckInspection, DieFace, GameState, GridSize, LobbySeat,
    LogEntry, Player, Position, TokenTemplate, TransitionError,
};

pub use crate::replication::{publish, BroadcastEnvelope, MemoryHub, ReplicationError, Replicator, StoredGame};

pub use crate::session::{GameSession, Reconciled, Reconciler, SessionError, ViewPhase};
