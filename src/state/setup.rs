//! Initial state for a new match.
//!
//! The host turns the lobby roster into the first snapshot: one player per
//! seat with a shuffled deck and an opening hand, and the characters of
//! each seat's deck placed along a diagonal.

use serde::{Deserialize, Serialize};

use super::character::{Character, Position};
use super::game::GameState;
use super::player::Player;
use crate::cards::Card;
use crate::conditions::Conditions;
use crate::config::SessionConfig;
use crate::core::{CharacterId, GameRng, PlayerId};
use crate::decks::{DeckCharacter, DeckDefinition, DeckRegistry};
use crate::maps::MapRegistry;

/// Spacing between starting positions, in pixels.
const SEAT_SPACING: f64 = 30.0;
/// Inset of the first starting position from the board corner.
const SEAT_INSET: f64 = 2.0;

/// One row of the lobby roster.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LobbySeat {
    pub id: PlayerId,
    pub name: String,
    /// Deck id picked in the lobby; `None` takes the registry's first deck.
    #[serde(default)]
    pub selected_deck: Option<String>,
}

impl LobbySeat {
    #[must_use]
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            selected_deck: None,
        }
    }

    #[must_use]
    pub fn with_deck(mut self, deck_id: impl Into<String>) -> Self {
        self.selected_deck = Some(deck_id.into());
        self
    }
}

/// Build the first snapshot of a match.
///
/// Seats whose deck cannot be resolved are skipped with an error log; the
/// game still starts for everyone else. `map_id` defaults to the configured
/// map and resolves through `maps` with the usual fallback.
pub fn build_initial_state(
    seats: &[LobbySeat],
    decks: &DeckRegistry,
    maps: &MapRegistry,
    map_id: Option<&str>,
    config: &SessionConfig,
    rng: &mut GameRng,
) -> GameState {
    let map = maps.resolve(map_id.unwrap_or(&config.default_map));
    let mut state = GameState::new(config.grid_size, map.id.clone());

    for (seat_index, seat) in seats.iter().enumerate() {
        let deck = match seat.selected_deck.as_deref() {
            Some(id) => decks.get(id),
            None => decks.first(),
        };
        let Some(deck) = deck else {
            log::error!(
                "no deck {:?} for player {} ({}); seat skipped",
                seat.selected_deck,
                seat.name,
                seat.id
            );
            continue;
        };

        state.players.push_back(deal_player(seat, deck, config, rng));
        for template in &deck.characters {
            state.characters.extend(field_characters(&seat.id, seat_index, template));
        }
    }

    log::debug!(
        "built initial state: {} players, {} characters on {}",
        state.players.len(),
        state.characters.len(),
        state.map_id
    );
    state
}

fn deal_player(seat: &LobbySeat, deck: &DeckDefinition, config: &SessionConfig, rng: &mut GameRng) -> Player {
    let mut cards: Vec<Card> = Vec::with_capacity(deck.cards.len() * config.copies_per_card);
    for _ in 0..config.copies_per_card {
        cards.extend(deck.cards.iter().cloned());
    }
    rng.shuffle(&mut cards);

    let mut player = Player::new(seat.id.clone(), seat.name.clone(), cards);
    let opening = config.opening_hand.min(player.deck.len());
    player.hand = player.deck.slice(..opening);
    player
}

fn field_characters(player: &PlayerId, seat_index: usize, template: &DeckCharacter) -> Vec<Character> {
    let count = template.instances();
    (0..count)
        .map(|i| {
            let (id, name) = if count > 1 {
                (
                    CharacterId::for_template(player, &template.id, Some(i + 1)),
                    format!("{} {}", template.name, i + 1),
                )
            } else {
                (CharacterId::for_template(player, &template.id, None), template.name.clone())
            };

            Character {
                id,
                player_id: player.clone(),
                name,
                image_url: template.image_url.clone(),
                position: Position::new(
                    SEAT_INSET + (seat_index + i as usize) as f64 * SEAT_SPACING,
                    SEAT_INSET + seat_index as f64 * SEAT_SPACING,
                ),
                health: template.hp,
                max_health: template.hp,
                size: template.size,
                conditions: Conditions::new(),
                ranged: template.ranged,
            }
        })
        .collect()
}
