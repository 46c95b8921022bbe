//! The replicated game document.
//!
//! ## GameState
//!
//! One value per match, replaced wholesale on every transition:
//! - Players (hands, decks, discard piles)
//! - Characters on the board
//! - Board size and active map id
//! - Append-only play log
//! - Pending combat, last combat result, open deck inspection
//! - Revision counter (stamped on publish)
//!
//! Collections are `im::Vector`, so computing a next snapshot by cloning
//! the current one is O(1) and structurally shares everything untouched.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::character::Character;
use super::player::Player;
use crate::cards::{Card, CombatCard};
use crate::core::{CharacterId, PlayerId};

/// Board dimensions in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    pub width: u32,
    pub height: u32,
}

impl Default for GridSize {
    fn default() -> Self {
        Self { width: 8, height: 6 }
    }
}

/// One line of the play log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// Player id, or the acting character id for combat lines.
    pub player_id: String,
    pub player_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<Card>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Unix milliseconds.
    pub timestamp: u64,
}

impl LogEntry {
    #[must_use]
    pub fn message(player_id: impl Into<String>, player_name: impl Into<String>, message: impl Into<String>, timestamp: u64) -> Self {
        Self {
            player_id: player_id.into(),
            player_name: player_name.into(),
            card: None,
            message: Some(message.into()),
            timestamp,
        }
    }

    #[must_use]
    pub fn with_card(mut self, card: Card) -> Self {
        self.card = Some(card);
        self
    }
}

/// A declared attack waiting for the defender's response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackInProgress {
    pub attacker_id: CharacterId,
    pub defender_id: CharacterId,
    /// Player whose hand the card came from; its discard pile receives the
    /// card even if the attacker is gone by resolution time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attacker_player_id: Option<PlayerId>,
    /// Held face down: out of the hand, not yet discarded.
    pub card: CombatCard,
}

/// Both revealed cards of a resolved attack. Damage is applied separately.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatResult {
    pub attacker_id: CharacterId,
    pub defender_id: CharacterId,
    pub attacking_card: CombatCard,
    pub defending_card: Option<CombatCard>,
}

/// An open peek at the top of a player's deck.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckInspection {
    pub inspector_id: PlayerId,
    pub target_player_id: PlayerId,
    /// Copies of the inspected cards, top first. They stay in the deck.
    pub cards: Vector<Card>,
}

/// The replicated game document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub players: Vector<Player>,
    pub characters: Vector<Character>,
    pub grid_size: GridSize,
    pub map_id: String,
    #[serde(default)]
    pub log: Vector<LogEntry>,
    #[serde(default)]
    pub attack_in_progress: Option<AttackInProgress>,
    #[serde(default)]
    pub last_attack: Option<CombatResult>,
    #[serde(default)]
    pub deck_inspection: Option<DeckInspection>,
    /// Bumped by the publishing session; 0 for snapshots that never carried one.
    #[serde(default)]
    pub revision: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            players: Vector::new(),
            characters: Vector::new(),
            grid_size: GridSize::default(),
            map_id: "plains".to_string(),
            log: Vector::new(),
            attack_in_progress: None,
            last_attack: None,
            deck_inspection: None,
            revision: 0,
        }
    }
}

impl GameState {
    /// Empty state on the given board.
    #[must_use]
    pub fn new(grid_size: GridSize, map_id: impl Into<String>) -> Self {
        Self {
            grid_size,
            map_id: map_id.into(),
            ..Self::default()
        }
    }

    /// Whether a game is underway (players have been dealt in).
    #[must_use]
    pub fn is_started(&self) -> bool {
        !self.players.is_empty()
    }

    #[must_use]
    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    #[must_use]
    pub fn player_index(&self, id: &PlayerId) -> Option<usize> {
        self.players.iter().position(|p| &p.id == id)
    }

    #[must_use]
    pub fn character(&self, id: &CharacterId) -> Option<&Character> {
        self.characters.iter().find(|c| &c.id == id)
    }

    #[must_use]
    pub fn character_index(&self, id: &CharacterId) -> Option<usize> {
        self.characters.iter().position(|c| &c.id == id)
    }

    /// Characters owned by a player.
    pub fn characters_of<'a>(&'a self, player: &PlayerId) -> impl Iterator<Item = &'a Character> + 'a {
        let player = player.clone();
        self.characters.iter().filter(move |c| c.player_id == player)
    }

    /// The last `n` log entries, oldest first.
    pub fn recent_log(&self, n: usize) -> impl Iterator<Item = &LogEntry> {
        self.log.iter().skip(self.log.len().saturating_sub(n))
    }

    /// Every card in play across all players' zones, plus the face-down
    /// attack card.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        let held = usize::from(self.attack_in_progress.is_some());
        self.players.iter().map(Player::card_count).sum::<usize>() + held
    }
}
