//! Core building blocks: identifiers, RNG, clock.
//!
//! Everything else in the crate is expressed in terms of these types.

pub mod clock;
pub mod ids;
pub mod rng;

pub use clock::{system_millis, Clock};
pub use ids::{CharacterId, GameId, PlayerId};
pub use rng::GameRng;
