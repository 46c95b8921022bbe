//! Built-in 8×6 battle maps.

use super::definition::{MapDefinition, Terrain};

/// Preset grid width.
pub const PRESET_WIDTH: usize = 8;
/// Preset grid height.
pub const PRESET_HEIGHT: usize = 6;

fn distance(x: i32, y: i32, cx: i32, cy: i32) -> f64 {
    f64::from((x - cx).pow(2) + (y - cy).pow(2)).sqrt()
}

fn preset(
    id: &str,
    name: &str,
    description: &str,
    rule: impl Fn(i32, i32) -> Terrain,
) -> MapDefinition {
    MapDefinition::from_rule(id, name, description, PRESET_WIDTH, PRESET_HEIGHT, rule)
}

/// All preset maps. The first entry ("plains") is the default.
#[must_use]
pub fn preset_maps() -> Vec<MapDefinition> {
    use Terrain::*;

    vec![
        preset("plains", "Plains", "A simple map with mostly grass and some water features", |x, y| {
            if x == 4 || y == 3 {
                Water
            } else if (x + y) % 4 == 0 {
                Forest
            } else {
                Grass
            }
        }),
        preset("islands", "Islands", "A small, tight map with a few islands", |x, y| {
            let d = distance(x, y, 4, 3);
            if d < 2.0 {
                Grass
            } else if d < 3.0 {
                Forest
            } else {
                Water
            }
        }),
        preset("mountain_range", "Mountain Range", "A long, narrow mountain range", |x, _| match x {
            4 => Mountain,
            3 | 5 => Forest,
            _ => Grass,
        }),
        preset(
            "river_crossing",
            "River Crossing",
            "A wide river splits the battlefield, with two bridges providing the only means of passage.",
            |x, y| {
                if y == 2 || y == 3 {
                    Water
                } else if (x + y) % 4 == 0 {
                    Forest
                } else {
                    Grass
                }
            },
        ),
        preset("ruined_city", "Ruined City", "A compact city map with lots of cover.", |x, y| {
            if (x % 2 == 0 || y % 2 == 0) && (x + y) % 2 != 0 {
                Ruins
            } else if x == 4 && y == 3 {
                Stone
            } else if (x + y) % 3 == 0 {
                Forest
            } else {
                Grass
            }
        }),
        preset("desert_outpost", "Desert Outpost", "A large, open desert with a central outpost.", |x, y| {
            if x > 2 && x < 5 && y > 1 && y < 4 {
                Stone
            } else if x % 2 == 0 || y % 2 == 0 {
                Mountain
            } else {
                Sand
            }
        }),
        preset("forest_maze", "Forest Maze", "A tiny, dense forest with winding paths", |x, y| {
            if (x * y) % 3 == 0 {
                Grass
            } else if (x + y) % 2 == 0 {
                Forest
            } else {
                Mountain
            }
        }),
        preset(
            "the_bridge",
            "The Bridge",
            "A narrow bridge over a deep chasm. Only a few squares wide, with no way around.",
            |x, _| if x < 2 || x > 5 { Water } else { Stone },
        ),
        preset(
            "lava_fields",
            "Lava Fields",
            "Treacherous lava flows with safe stone paths and a few islands.",
            |x, y| {
                if (x + y) % 4 == 0 || x == 4 || y == 3 {
                    Stone
                } else if x > 2 && x < 5 && y > 1 && y < 4 && (x + y) % 3 == 0 {
                    Sand
                } else {
                    // mountain stands in for lava
                    Mountain
                }
            },
        ),
        preset(
            "fortress_courtyard",
            "Fortress Courtyard",
            "Walled fortress with a central open area and limited entrances.",
            |x, y| {
                if x == 0 || x == 7 || y == 0 || y == 5 {
                    Stone
                } else {
                    Grass
                }
            },
        ),
        preset("swamp", "Swamp", "Muddy, slow terrain with scattered dry land.", |x, y| {
            if (x + y) % 4 == 0 {
                Grass
            } else if (x * y) % 5 == 0 {
                Forest
            } else {
                Water
            }
        }),
        preset(
            "frozen_lake",
            "Frozen Lake",
            "A slippery ice lake in the center, surrounded by snow and rocks.",
            |x, y| {
                let d = distance(x, y, 4, 3);
                if d < 2.0 {
                    Water
                } else if d < 3.0 {
                    Sand
                } else {
                    Mountain
                }
            },
        ),
        preset(
            "ruined_temple",
            "Ruined Temple",
            "Crumbling pillars and impassable ruins with open spaces for battle.",
            |x, y| {
                if (x % 2 == 0 && y % 2 == 0) || (x + y) % 5 == 0 {
                    Ruins
                } else if x > 2 && x < 5 && y > 1 && y < 4 {
                    Stone
                } else {
                    Grass
                }
            },
        ),
        preset("cavern_maze", "Cavern Maze", "Winding stone corridors and dead ends in a dark cavern.", |x, y| {
            if (x + y) % 3 == 0 || (x * y) % 4 == 0 {
                Stone
            } else {
                Mountain
            }
        }),
        preset("market_square", "Market Square", "A mid-size market with obstacles and open lanes.", |x, y| {
            if (x % 2 == 0 && y % 2 == 0) || (x + y) % 4 == 0 {
                Stone
            } else if x > 2 && x < 5 && y > 1 && y < 4 {
                Sand
            } else {
                Grass
            }
        }),
    ]
}
