//! Board transitions: movement, health, conditions, tokens, map.
//!
//! None of these validate against game rules. Positions arrive pre-snapped
//! and pre-clamped, health values arrive pre-computed, condition lists
//! arrive as the full replacement set.

use super::TransitionContext;
use crate::conditions::Conditions;
use crate::core::CharacterId;
use crate::maps::MapRegistry;
use crate::state::character::{Character, Position, TokenTemplate};
use crate::state::error::TransitionError;
use crate::state::game::{GameState, LogEntry};

impl GameState {
    /// Overwrite a character's position. No bounds check.
    pub fn move_character(&self, id: &CharacterId, position: Position) -> Result<GameState, TransitionError> {
        self.with_character(id, |c| c.position = position)
    }

    /// Set a character's health; at 0 or below the character is removed.
    ///
    /// Removal appends a single destruction log entry. Positive values are
    /// stored as given, without clamping against `max_health`.
    pub fn update_character_health(&self, id: &CharacterId, health: i32, now: u64) -> Result<GameState, TransitionError> {
        if health > 0 {
            return self.with_character(id, |c| c.health = health);
        }

        let index = self
            .character_index(id)
            .ok_or_else(|| TransitionError::CharacterNotFound(id.clone()))?;

        let mut next = self.clone();
        let destroyed = next.characters.remove(index);
        let message = format!("{} was destroyed!", destroyed.name);
        next.log.push_back(LogEntry::message(
            destroyed.player_id.as_str(),
            destroyed.name.clone(),
            message,
            now,
        ));
        Ok(next)
    }

    /// Replace a character's condition list wholesale.
    pub fn update_character_conditions(
        &self,
        id: &CharacterId,
        conditions: Conditions,
    ) -> Result<GameState, TransitionError> {
        self.with_character(id, |c| c.conditions = conditions)
    }

    /// Append a token built from `template` under a freshly minted id.
    ///
    /// Ids are `token-{millis}-{random}`, redrawn until no existing
    /// character uses them.
    pub fn add_token_character(
        &self,
        template: TokenTemplate,
        ctx: &mut TransitionContext<'_>,
    ) -> (GameState, CharacterId) {
        let id = loop {
            let candidate = CharacterId::new(format!("token-{}-{}", ctx.now, ctx.rng.next_u64()));
            if self.character(&candidate).is_none() {
                break candidate;
            }
        };

        let mut next = self.clone();
        next.characters.push_back(Character::from_template(id.clone(), template));
        (next, id)
    }

    /// Switch the active map. Unknown ids fall back to the registry default.
    #[must_use]
    pub fn change_map(&self, map_id: &str, maps: &MapRegistry) -> GameState {
        let map = maps.resolve(map_id);
        let mut next = self.clone();
        next.map_id = map.id.clone();
        next
    }

    fn with_character(&self, id: &CharacterId, f: impl FnOnce(&mut Character)) -> Result<GameState, TransitionError> {
        let index = self
            .character_index(id)
            .ok_or_else(|| TransitionError::CharacterNotFound(id.clone()))?;

        let mut next = self.clone();
        f(&mut next.characters[index]);
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::*;
    use crate::conditions::with_condition;
    use crate::core::PlayerId;

    fn orc() -> CharacterId {
        CharacterId::new("p2-orc")
    }

    #[test]
    fn test_move_character() {
        let state = two_player_state();
        let next = state.move_character(&orc(), Position::new(92.0, 32.0)).unwrap();

        assert_eq!(next.character(&orc()).unwrap().position, Position::new(92.0, 32.0));
        assert_eq!(state.character(&orc()).unwrap().position, Position::new(2.0, 2.0));
    }

    #[test]
    fn test_move_is_not_bounds_checked() {
        let state = two_player_state();
        let next = state.move_character(&orc(), Position::new(-500.0, 9000.0)).unwrap();
        assert_eq!(next.character(&orc()).unwrap().position.x, -500.0);
    }

    #[test]
    fn test_move_unknown_character() {
        let state = two_player_state();
        let err = state.move_character(&CharacterId::new("nobody"), Position::default()).unwrap_err();
        assert!(matches!(err, TransitionError::CharacterNotFound(_)));
    }

    #[test]
    fn test_health_positive_never_removes() {
        let state = two_player_state();
        let next = state.update_character_health(&orc(), 5, NOW).unwrap();

        assert_eq!(next.character(&orc()).unwrap().health, 5);
        assert_eq!(next.characters.len(), 2);
        assert!(next.log.is_empty());
    }

    #[test]
    fn test_health_not_clamped_to_max() {
        let state = two_player_state();
        let next = state.update_character_health(&orc(), 50, NOW).unwrap();
        assert_eq!(next.character(&orc()).unwrap().health, 50);
    }

    #[test]
    fn test_health_zero_destroys() {
        let state = two_player_state();
        let next = state.update_character_health(&orc(), 0, NOW).unwrap();

        assert!(next.character(&orc()).is_none());
        assert_eq!(next.characters.len(), 1);
        assert_eq!(next.log.len(), 1);

        let entry = &next.log[0];
        assert_eq!(entry.player_id, "p2");
        assert_eq!(entry.player_name, "Orc");
        assert_eq!(entry.message.as_deref(), Some("Orc was destroyed!"));
    }

    #[test]
    fn test_health_negative_destroys() {
        let state = two_player_state();
        let next = state.update_character_health(&orc(), -3, NOW).unwrap();
        assert!(next.character(&orc()).is_none());
    }

    #[test]
    fn test_conditions_replace_wholesale() {
        let state = two_player_state();
        let with_stun = with_condition(&[], "Stunned");
        let next = state.update_character_conditions(&orc(), with_stun).unwrap();
        assert_eq!(next.character(&orc()).unwrap().conditions.as_slice(), ["Stunned".to_string()]);

        let next = next.update_character_conditions(&orc(), Conditions::new()).unwrap();
        assert!(next.character(&orc()).unwrap().conditions.is_empty());
    }

    #[test]
    fn test_add_token_unique_ids() {
        let state = two_player_state();
        let mut rng = rng();
        let mut ctx = TransitionContext::new(&mut rng, NOW);

        let template = TokenTemplate::new("p1", "Wolf", 4, Position::new(62.0, 2.0));
        let (next, first) = state.add_token_character(template.clone(), &mut ctx);
        let (next, second) = next.add_token_character(template, &mut ctx);

        assert_ne!(first, second);
        assert!(first.as_str().starts_with(&format!("token-{}-", NOW)));
        assert_eq!(next.characters.len(), 4);
        assert_eq!(next.characters_of(&PlayerId::new("p1")).count(), 3);
    }

    #[test]
    fn test_change_map() {
        let state = two_player_state();
        let maps = MapRegistry::presets();

        assert_eq!(state.change_map("swamp", &maps).map_id, "swamp");
        assert_eq!(state.change_map("atlantis", &maps).map_id, "plains");
    }
}
