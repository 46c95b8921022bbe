//! Characters on the board.

use serde::{Deserialize, Serialize};

use crate::conditions::Conditions;
use crate::core::{CharacterId, PlayerId};
use crate::decks::CharacterSize;

/// Board position in pixel space, already snapped to the cell grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: CharacterId,
    pub player_id: PlayerId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub position: Position,
    pub health: i32,
    pub max_health: i32,
    pub size: CharacterSize,
    #[serde(default)]
    pub conditions: Conditions,
    #[serde(default)]
    pub ranged: bool,
}

impl Character {
    /// Attach the id to a token template.
    #[must_use]
    pub fn from_template(id: CharacterId, template: TokenTemplate) -> Self {
        Self {
            id,
            player_id: template.player_id,
            name: template.name,
            image_url: template.image_url,
            position: template.position,
            health: template.health,
            max_health: template.max_health,
            size: template.size,
            conditions: template.conditions,
            ranged: template.ranged,
        }
    }
}

/// A character without an id: input to token creation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenTemplate {
    pub player_id: PlayerId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub position: Position,
    pub health: i32,
    pub max_health: i32,
    #[serde(default)]
    pub size: CharacterSize,
    #[serde(default)]
    pub conditions: Conditions,
    #[serde(default)]
    pub ranged: bool,
}

impl TokenTemplate {
    /// Full-health medium melee token with no conditions.
    #[must_use]
    pub fn new(player_id: impl Into<PlayerId>, name: impl Into<String>, health: i32, position: Position) -> Self {
        Self {
            player_id: player_id.into(),
            name: name.into(),
            image_url: None,
            position,
            health,
            max_health: health,
            size: CharacterSize::default(),
            conditions: Conditions::new(),
            ranged: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_template() {
        let template = TokenTemplate::new("p1", "Wolf", 6, Position::new(30.0, 60.0));
        let c = Character::from_template(CharacterId::new("token-1-2"), template);

        assert_eq!(c.id.as_str(), "token-1-2");
        assert_eq!(c.player_id.as_str(), "p1");
        assert_eq!(c.health, 6);
        assert_eq!(c.max_health, 6);
        assert_eq!(c.position, Position::new(30.0, 60.0));
    }

    #[test]
    fn test_character_json_shape() {
        let template = TokenTemplate::new("p1", "Wolf", 6, Position::default());
        let c = Character::from_template(CharacterId::new("t"), template);
        let json = serde_json::to_value(&c).unwrap();

        assert_eq!(json["playerId"], "p1");
        assert_eq!(json["maxHealth"], 6);
        assert_eq!(json["size"], "medium");
        assert!(json["conditions"].as_array().unwrap().is_empty());
    }
}
