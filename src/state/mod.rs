//! The replicated game document and the transitions over it.
//!
//! ## Key Types
//!
//! - `GameState`: one match, as every client sees it
//! - `Player`, `Character`: the parts clients act on
//! - `TransitionError`: why a transition refused to run
//!
//! Every transition is a method on `GameState` that borrows the current
//! snapshot and returns the next one (see [`transitions`]).

pub mod character;
pub mod error;
pub mod game;
pub mod player;
pub mod setup;
pub mod transitions;

pub use character::{Character, Position, TokenTemplate};
pub use error::TransitionError;
pub use game::{AttackInProgress, CombatResult, DeckInspection, GameState, GridSize, LogEntry};
pub use player::Player;
pub use setup::{build_initial_state, LobbySeat};
pub use transitions::{CombatPhase, DieFace, TransitionContext};
