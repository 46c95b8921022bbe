//! Session configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config.
//!
//! ```
//! use skirmish_engine::config::{SessionConfig, StalenessPolicy};
//!
//! let config = SessionConfig::from_json(r#"{"openingHand": 5}"#).unwrap();
//! assert_eq!(config.opening_hand, 5);
//! assert_eq!(config.hand_limit, 10);
//! assert_eq!(config.staleness, StalenessPolicy::LastWriteWins);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::state::GridSize;

/// How the reconciler treats an incoming snapshot older than local state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StalenessPolicy {
    /// Apply every snapshot; the last one processed wins.
    #[default]
    LastWriteWins,
    /// Drop snapshots whose `revision` is lower than the local one.
    RejectStale,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid session config: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Tunables for game setup and replication.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionConfig {
    /// Board dimensions in cells.
    pub grid_size: GridSize,

    /// Cards dealt to each player at game start.
    pub opening_hand: usize,

    /// Copies of each deck card shuffled into a player's starting deck.
    pub copies_per_card: usize,

    /// Map used when none is chosen.
    pub default_map: String,

    /// Hand size the calling layer should cap draws at.
    ///
    /// Not enforced by the session; see `Player::hand_at_limit`.
    pub hand_limit: usize,

    /// Stale-snapshot handling on receipt.
    pub staleness: StalenessPolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            grid_size: GridSize::default(),
            opening_hand: 4,
            copies_per_card: 1,
            default_map: "plains".to_string(),
            hand_limit: 10,
            staleness: StalenessPolicy::LastWriteWins,
        }
    }
}

impl SessionConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from JSON; missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn with_grid_size(mut self, width: u32, height: u32) -> Self {
        self.grid_size = GridSize { width, height };
        self
    }

    #[must_use]
    pub fn with_opening_hand(mut self, cards: usize) -> Self {
        self.opening_hand = cards;
        self
    }

    #[must_use]
    pub fn with_copies_per_card(mut self, copies: usize) -> Self {
        self.copies_per_card = copies;
        self
    }

    #[must_use]
    pub fn with_default_map(mut self, map_id: impl Into<String>) -> Self {
        self.default_map = map_id.into();
        self
    }

    #[must_use]
    pub fn with_hand_limit(mut self, limit: usize) -> Self {
        self.hand_limit = limit;
        self
    }

    #[must_use]
    pub fn with_staleness(mut self, policy: StalenessPolicy) -> Self {
        self.staleness = policy;
        self
    }
}
