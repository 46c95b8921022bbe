//! Map registry: lookup by id with a default fallback.

use rustc_hash::FxHashMap;
use thiserror::Error;

use super::definition::MapDefinition;
use super::presets::preset_maps;

/// Why a map list cannot back a registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapError {
    #[error("map registry needs at least one map")]
    Empty,

    #[error("duplicate map id {0:?}")]
    DuplicateId(String),
}

/// Read-only map lookup.
///
/// `resolve` never fails: unknown ids fall back to the first registered map.
#[derive(Clone, Debug)]
pub struct MapRegistry {
    maps: Vec<MapDefinition>,
    index: FxHashMap<String, usize>,
}

impl MapRegistry {
    /// Registry over an explicit list. The first map is the default.
    pub fn new(maps: Vec<MapDefinition>) -> Result<Self, MapError> {
        if maps.is_empty() {
            return Err(MapError::Empty);
        }
        let mut index = FxHashMap::default();
        for (i, map) in maps.iter().enumerate() {
            if index.insert(map.id.clone(), i).is_some() {
                return Err(MapError::DuplicateId(map.id.clone()));
            }
        }
        Ok(Self { maps, index })
    }

    /// Registry over the built-in presets.
    #[must_use]
    pub fn presets() -> Self {
        let maps = preset_maps();
        let index = maps
            .iter()
            .enumerate()
            .map(|(i, m)| (m.id.clone(), i))
            .collect();
        Self { maps, index }
    }

    /// Exact lookup.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&MapDefinition> {
        self.index.get(id).map(|&i| &self.maps[i])
    }

    /// Lookup with fallback to the default map.
    #[must_use]
    pub fn resolve(&self, id: &str) -> &MapDefinition {
        self.get(id).unwrap_or_else(|| {
            log::debug!("unknown map {:?}, falling back to {:?}", id, self.maps[0].id);
            self.default_map()
        })
    }

    /// The first registered map.
    #[must_use]
    pub fn default_map(&self) -> &MapDefinition {
        &self.maps[0]
    }

    /// Iterate maps in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &MapDefinition> {
        self.maps.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.maps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }
}

impl Default for MapRegistry {
    fn default() -> Self {
        Self::presets()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maps::Terrain;

    #[test]
    fn test_resolve_known() {
        let registry = MapRegistry::presets();
        assert_eq!(registry.resolve("swamp").name, "Swamp");
    }

    #[test]
    fn test_resolve_unknown_falls_back() {
        let registry = MapRegistry::presets();
        assert!(registry.get("atlantis").is_none());
        assert_eq!(registry.resolve("atlantis").id, "plains");
    }

    #[test]
    fn test_custom_registry_default() {
        let only = MapDefinition::from_rule("flat", "Flat", "", 2, 2, |_, _| Terrain::Sand);
        let registry = MapRegistry::new(vec![only]).unwrap();
        assert_eq!(registry.resolve("plains").id, "flat");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_empty_registry_rejected() {
        assert_eq!(MapRegistry::new(Vec::new()).unwrap_err(), MapError::Empty);
    }

    #[test]
    fn test_duplicate_map_id_rejected() {
        let flat = || MapDefinition::from_rule("flat", "Flat", "", 2, 2, |_, _| Terrain::Sand);
        assert_eq!(
            MapRegistry::new(vec![flat(), flat()]).unwrap_err(),
            MapError::DuplicateId("flat".to_string())
        );
    }

    #[test]
    fn test_presets_pass_validation() {
        let checked = MapRegistry::new(preset_maps()).unwrap();
        let presets = MapRegistry::presets();
        assert_eq!(checked.len(), presets.len());
        assert!(!presets.is_empty());
        assert_eq!(checked.default_map().id, presets.default_map().id);
    }
}
