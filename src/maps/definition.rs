//! Map definitions: named terrain grids.

use serde::{Deserialize, Serialize};

/// Terrain tag of one grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Terrain {
    Grass,
    Water,
    Mountain,
    Forest,
    Sand,
    Stone,
    Ruins,
}

/// A terrain layout. `grid[y][x]`, `grid_height` rows of `grid_width` cells.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapDefinition {
    pub id: String,
    pub name: String,
    pub description: String,
    pub grid: Vec<Vec<Terrain>>,
    pub grid_width: usize,
    pub grid_height: usize,
}

impl MapDefinition {
    /// Build a map by evaluating `rule(x, y)` for every cell.
    #[must_use]
    pub fn from_rule(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        width: usize,
        height: usize,
        rule: impl Fn(i32, i32) -> Terrain,
    ) -> Self {
        let grid = (0..height as i32)
            .map(|y| (0..width as i32).map(|x| rule(x, y)).collect())
            .collect();
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            grid,
            grid_width: width,
            grid_height: height,
        }
    }

    /// Terrain at a cell, `None` outside the grid.
    #[must_use]
    pub fn terrain_at(&self, x: usize, y: usize) -> Option<Terrain> {
        self.grid.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Count cells of a given terrain.
    #[must_use]
    pub fn count(&self, terrain: Terrain) -> usize {
        self.grid.iter().flatten().filter(|&&t| t == terrain).count()
    }
}
