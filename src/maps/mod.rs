//! Map registry: static terrain grids keyed by id.
//!
//! Read-only. The game state stores only a `map_id`; clients resolve it
//! here when rendering or changing maps.

pub mod definition;
pub mod presets;
pub mod registry;

pub use definition::{MapDefinition, Terrain};
pub use presets::{preset_maps, PRESET_HEIGHT, PRESET_WIDTH};
pub use registry::{MapError, MapRegistry};
