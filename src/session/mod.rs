//! Per-game session: local state plus the replication it publishes through.
//!
//! A `GameSession` is owned by whatever hosts one client's connection to
//! one game. There is no global store: two sessions on the same hub are two
//! independent clients.
//!
//! ## Operation Contract
//!
//! Every operation:
//! 1. computes the next snapshot with a pure `GameState` transition;
//! 2. on a precondition failure, logs a warning and returns
//!    [`SessionError::Transition`], leaving local state untouched;
//! 3. otherwise stamps the next revision, applies the snapshot locally and
//!    publishes it. A [`SessionError::Replication`] means the local state
//!    already moved on and stays that way.
//!
//! `clear_last_attack` is the one local-only operation: it acknowledges a
//! combat result on this client and publishes nothing.

pub mod reconciler;

use thiserror::Error;

use crate::cards::{Card, CardId, CombatCard};
use crate::conditions::Conditions;
use crate::config::SessionConfig;
use crate::core::{system_millis, CharacterId, Clock, GameId, GameRng, PlayerId};
use crate::decks::DeckRegistry;
use crate::maps::{MapDefinition, MapRegistry};
use crate::replication::{publish, ReplicationError, Replicator};
use crate::state::{
    build_initial_state, DieFace, GameState, LobbySeat, Position, TokenTemplate, TransitionContext, TransitionError,
};

pub use reconciler::{Reconciled, Reconciler, ViewPhase};

#[derive(Debug, Error)]
pub enum SessionError {
    /// Preconditions failed; nothing changed.
    #[error("rejected: {0}")]
    Transition(#[from] TransitionError),

    /// Applied locally, but not (fully) replicated.
    #[error("replication failed: {0}")]
    Replication(#[from] ReplicationError),
}

impl SessionError {
    /// Whether local state moved despite the error.
    #[must_use]
    pub fn applied_locally(&self) -> bool {
        matches!(self, SessionError::Replication(_))
    }
}

/// One client's view of one game.
pub struct GameSession<R: Replicator> {
    game_id: GameId,
    state: GameState,
    maps: MapRegistry,
    rng: GameRng,
    replicator: R,
    clock: Clock,
    config: SessionConfig,
}

impl<R: Replicator> GameSession<R> {
    /// A session in the lobby state, entropy-seeded, on the preset maps.
    pub fn new(game_id: impl Into<GameId>, replicator: R, config: SessionConfig) -> Self {
        let maps = MapRegistry::presets();
        let map_id = maps.resolve(&config.default_map).id.clone();
        Self {
            game_id: game_id.into(),
            state: GameState::new(config.grid_size, map_id),
            maps,
            rng: GameRng::from_entropy(),
            replicator,
            clock: system_millis,
            config,
        }
    }

    /// Replace the RNG (seeded sessions for tests and replays).
    #[must_use]
    pub fn with_rng(mut self, rng: GameRng) -> Self {
        self.rng = rng;
        self
    }

    /// Replace the timestamp source.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the map registry.
    #[must_use]
    pub fn with_maps(mut self, maps: MapRegistry) -> Self {
        self.state.map_id = maps.resolve(&self.state.map_id).id.clone();
        self.maps = maps;
        self
    }

    #[must_use]
    pub fn game_id(&self) -> &GameId {
        &self.game_id
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn replicator(&self) -> &R {
        &self.replicator
    }

    #[must_use]
    pub fn maps(&self) -> &MapRegistry {
        &self.maps
    }

    /// Static definition of the active map.
    #[must_use]
    pub fn current_map(&self) -> &MapDefinition {
        self.maps.resolve(&self.state.map_id)
    }

    /// Whether `player` has reached the configured hand limit.
    ///
    /// Advisory: `draw_card` does not consult it.
    #[must_use]
    pub fn hand_full(&self, player: &PlayerId) -> bool {
        self.state
            .player(player)
            .is_some_and(|p| p.hand_at_limit(self.config.hand_limit))
    }

    /// Overwrite local state wholesale. Publishes nothing.
    pub fn replace_state(&mut self, state: GameState) {
        self.state = state;
    }

    /// Build the first snapshot from the lobby roster and publish it.
    pub async fn start_game(
        &mut self,
        seats: &[LobbySeat],
        decks: &DeckRegistry,
        map_id: Option<&str>,
    ) -> Result<(), SessionError> {
        let state = build_initial_state(seats, decks, &self.maps, map_id, &self.config, &mut self.rng);
        log::debug!("game {}: starting with {} players", self.game_id, state.players.len());
        self.commit("start_game", Ok(state)).await
    }

    /// Draw for `player`, binding a combat card to `character` if given.
    ///
    /// Returns the drawn card, or `None` when deck and discard are both
    /// empty (nothing is published then).
    pub async fn draw_card(
        &mut self,
        player: &PlayerId,
        character: Option<&CharacterId>,
    ) -> Result<Option<Card>, SessionError> {
        let mut ctx = TransitionContext::new(&mut self.rng, (self.clock)());
        let next = match self.state.draw_card(player, character, &mut ctx) {
            Ok(Some(next)) => next,
            Ok(None) => return Ok(None),
            Err(e) => return Err(self.reject("draw_card", e)),
        };

        let drawn = next.player(player).and_then(|p| p.hand.last().cloned());
        self.commit("draw_card", Ok(next)).await?;
        Ok(drawn)
    }

    pub async fn play_card(&mut self, player: &PlayerId, card: CardId) -> Result<(), SessionError> {
        let next = self.state.play_card(player, card, (self.clock)());
        self.commit("play_card", next).await
    }

    pub async fn discard_card(&mut self, player: &PlayerId, card: CardId) -> Result<(), SessionError> {
        let next = self.state.discard_card(player, card, (self.clock)());
        self.commit("discard_card", next).await
    }

    pub async fn shuffle_deck(&mut self, player: &PlayerId) -> Result<(), SessionError> {
        let next = self.state.shuffle_deck(player, &mut self.rng);
        self.commit("shuffle_deck", next).await
    }

    pub async fn move_character(&mut self, character: &CharacterId, position: Position) -> Result<(), SessionError> {
        let next = self.state.move_character(character, position);
        self.commit("move_character", next).await
    }

    /// Set health; 0 or below destroys the character.
    pub async fn update_character_health(&mut self, character: &CharacterId, health: i32) -> Result<(), SessionError> {
        let next = self.state.update_character_health(character, health, (self.clock)());
        self.commit("update_character_health", next).await
    }

    /// Replace the full condition list.
    pub async fn update_character_conditions(
        &mut self,
        character: &CharacterId,
        conditions: Conditions,
    ) -> Result<(), SessionError> {
        let next = self.state.update_character_conditions(character, conditions);
        self.commit("update_character_conditions", next).await
    }

    /// Add a token and return its minted id.
    pub async fn add_token_character(&mut self, template: TokenTemplate) -> Result<CharacterId, SessionError> {
        let mut ctx = TransitionContext::new(&mut self.rng, (self.clock)());
        let (next, id) = self.state.add_token_character(template, &mut ctx);
        self.commit("add_token_character", Ok(next)).await?;
        Ok(id)
    }

    pub async fn inspect_deck(&mut self, inspector: &PlayerId, target: &PlayerId, count: usize) -> Result<(), SessionError> {
        let next = self.state.inspect_deck(inspector, target, count, (self.clock)());
        self.commit("inspect_deck", next).await
    }

    pub async fn resolve_deck_inspection(&mut self, to_top: Vec<Card>, to_bottom: Vec<Card>) -> Result<(), SessionError> {
        let next = self.state.resolve_deck_inspection(to_top, to_bottom);
        self.commit("resolve_deck_inspection", next).await
    }

    /// Roll the movement die. `sides` does not change the outcome space.
    pub async fn roll_dice(&mut self, player: &PlayerId, sides: u32) -> Result<DieFace, SessionError> {
        let mut ctx = TransitionContext::new(&mut self.rng, (self.clock)());
        let (next, face) = match self.state.roll_dice(player, sides, &mut ctx) {
            Ok(rolled) => rolled,
            Err(e) => return Err(self.reject("roll_dice", e)),
        };
        self.commit("roll_dice", Ok(next)).await?;
        Ok(face)
    }

    /// Switch maps; unknown ids fall back to the registry default.
    pub async fn change_map(&mut self, map_id: &str) -> Result<(), SessionError> {
        let next = self.state.change_map(map_id, &self.maps);
        self.commit("change_map", Ok(next)).await
    }

    pub async fn begin_attack(
        &mut self,
        attacker: &CharacterId,
        defender: &CharacterId,
        card: CombatCard,
    ) -> Result<(), SessionError> {
        let next = self.state.begin_attack(attacker, defender, card);
        self.commit("begin_attack", next).await
    }

    /// Answer the pending attack with a card, or `None` to take it unblocked.
    pub async fn resolve_attack(&mut self, defending: Option<CombatCard>) -> Result<(), SessionError> {
        let next = self.state.resolve_attack(defending, (self.clock)());
        self.commit("resolve_attack", next).await
    }

    /// Acknowledge the last combat result on this client only.
    pub fn clear_last_attack(&mut self) {
        self.state = self.state.clear_last_attack();
    }

    fn reject(&self, op: &str, error: TransitionError) -> SessionError {
        log::warn!("game {}: {} rejected: {}", self.game_id, op, error);
        SessionError::Transition(error)
    }

    async fn commit(&mut self, op: &str, next: Result<GameState, TransitionError>) -> Result<(), SessionError> {
        let mut next = next.map_err(|e| self.reject(op, e))?;
        next.revision = self.state.revision + 1;
        self.state = next;

        publish(&self.replicator, &self.game_id, &self.state).await.map_err(|e| {
            log::error!("game {}: {} applied locally but not replicated", self.game_id, op);
            SessionError::Replication(e)
        })
    }
}
