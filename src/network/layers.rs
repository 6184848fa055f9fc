use std::collections::HashMap;

use crate::error::{ConfigurationError, Result};

use super::{BuildingKind, NetworkKind, ObstacleCategory};

/// Host-provided mapping from drawing layer names to obstacle categories.
#[derive(Debug, Clone, Default)]
pub struct LayerMap {
    entries: HashMap<String, ObstacleCategory>,
}

impl LayerMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps `layer` to a network kind.
    #[must_use]
    pub fn with_network(mut self, layer: impl Into<String>, kind: NetworkKind) -> Self {
        self.entries
            .insert(layer.into(), ObstacleCategory::Network(kind));
        self
    }

    /// Maps `layer` to a building category.
    #[must_use]
    pub fn with_building(mut self, layer: impl Into<String>, kind: BuildingKind) -> Self {
        self.entries
            .insert(layer.into(), ObstacleCategory::Building(kind));
        self
    }

    /// Marks `layer` as the red-line boundary.
    #[must_use]
    pub fn with_boundary(mut self, layer: impl Into<String>) -> Self {
        self.entries.insert(layer.into(), ObstacleCategory::Boundary);
        self
    }

    /// Resolves the category of `layer`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::UnknownLayer` when the layer is not mapped.
    pub fn category(&self, layer: &str) -> Result<ObstacleCategory> {
        self.entries
            .get(layer)
            .copied()
            .ok_or_else(|| ConfigurationError::UnknownLayer(layer.to_owned()).into())
    }

    /// Returns the layer a network kind is drawn on.
    ///
    /// When several layers map to the same kind, the lexicographically
    /// smallest name wins so the answer is stable.
    #[must_use]
    pub fn layer_of(&self, kind: NetworkKind) -> Option<&str> {
        self.entries
            .iter()
            .filter(|(_, category)| **category == ObstacleCategory::Network(kind))
            .map(|(layer, _)| layer.as_str())
            .min()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::CorridorError;

    fn layers() -> LayerMap {
        LayerMap::new()
            .with_network("W-PIPE", NetworkKind::WaterPipe)
            .with_network("K-SEWER", NetworkKind::Sewer)
            .with_building("BLDG", BuildingKind::Foundation)
            .with_boundary("RED-LINE")
    }

    #[test]
    fn known_layers_resolve() {
        let map = layers();
        assert_eq!(
            map.category("W-PIPE").unwrap(),
            ObstacleCategory::Network(NetworkKind::WaterPipe)
        );
        assert_eq!(
            map.category("BLDG").unwrap(),
            ObstacleCategory::Building(BuildingKind::Foundation)
        );
        assert_eq!(map.category("RED-LINE").unwrap(), ObstacleCategory::Boundary);
    }

    #[test]
    fn unknown_layer_is_a_configuration_error() {
        let err = layers().category("TREES").unwrap_err();
        assert!(matches!(
            err,
            CorridorError::Configuration(ConfigurationError::UnknownLayer(ref l)) if l == "TREES"
        ));
        assert!(!err.is_skippable());
    }

    #[test]
    fn reverse_lookup() {
        let map = layers().with_network("A-SEWER", NetworkKind::Sewer);
        assert_eq!(map.layer_of(NetworkKind::Sewer), Some("A-SEWER"));
        assert_eq!(map.layer_of(NetworkKind::GasPipe), None);
    }
}
