use crate::config::RoutingConfig;

use super::{BuildingKind, GasPressure, HalfWidths, NetworkKind, ObstacleCategory};

const N: usize = NetworkKind::COUNT;
const B: usize = BuildingKind::COUNT;
const G: usize = GasPressure::COUNT;

/// Horizontal clearances in metres between network kinds, excluding the
/// water–sewer entry (material dependent) and the gas row (pressure dependent).
///
/// Order: water, sewer, power, communication, heating, gas.
const BASE_NETWORK: [[f64; N]; N] = [
    [0.7, 0.0, 0.5, 0.5, 1.5, 0.0],
    [0.0, 0.4, 0.5, 0.5, 1.0, 0.0],
    [0.5, 0.5, 0.1, 0.5, 2.0, 0.0],
    [0.5, 0.5, 0.5, 0.5, 1.0, 0.0],
    [1.5, 1.0, 2.0, 1.0, 0.5, 0.0],
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.5],
];

/// Gas pipe to every other kind, per pressure class (low, medium, high, very high).
const GAS_TO_NETWORK: [[f64; G]; N] = [
    [1.0, 1.0, 1.5, 2.0],
    [1.0, 1.5, 2.0, 5.0],
    [1.0, 1.0, 1.0, 2.0],
    [1.0, 1.0, 1.0, 1.0],
    [2.0, 2.0, 2.0, 4.0],
    [0.5, 0.5, 0.5, 0.5],
];

/// Network kind to building category.
///
/// Columns: foundation, fence, overhead line support, road curb, railway axis.
/// The gas row is taken from [`GAS_TO_BUILDING`].
const BASE_BUILDING: [[f64; B]; N] = [
    [5.0, 3.0, 1.0, 2.0, 4.0],
    [3.0, 1.5, 1.0, 1.5, 4.0],
    [0.6, 0.5, 0.5, 1.5, 3.2],
    [0.6, 0.5, 0.5, 1.5, 2.8],
    [2.0, 1.5, 1.0, 1.5, 4.0],
    [0.0, 0.0, 0.0, 0.0, 0.0],
];

const GAS_TO_BUILDING: [[f64; B]; G] = [
    [2.0, 1.0, 1.0, 1.5, 3.8],
    [4.0, 1.0, 1.0, 1.5, 4.8],
    [7.0, 1.0, 1.0, 2.5, 7.8],
    [10.0, 1.0, 1.0, 2.5, 10.8],
];

/// Snapshot of the distance rules for one routing or sequencing call.
///
/// Symmetric between network kinds. Resolved once from the configuration so
/// pipe material and gas pressure cannot change mid-search.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceTables {
    networks: [[f64; N]; N],
    buildings: [[f64; B]; N],
}

impl DistanceTables {
    /// Resolves the default tables for the configured pipe material and gas
    /// pressure.
    #[must_use]
    pub fn resolve(config: &RoutingConfig) -> Self {
        let mut networks = BASE_NETWORK;
        let water = NetworkKind::WaterPipe.index();
        let sewer = NetworkKind::Sewer.index();
        let gas = NetworkKind::GasPipe.index();
        let pressure = config.gas_pressure.index();

        let water_sewer = config.pipe_material.water_sewer_distance();
        networks[water][sewer] = water_sewer;
        networks[sewer][water] = water_sewer;
        for kind in NetworkKind::ALL {
            let d = GAS_TO_NETWORK[kind.index()][pressure];
            networks[gas][kind.index()] = d;
            networks[kind.index()][gas] = d;
        }

        let mut buildings = BASE_BUILDING;
        buildings[gas] = GAS_TO_BUILDING[pressure];

        Self {
            networks,
            buildings,
        }
    }

    /// Returns a copy with the distance between `a` and `b` overridden.
    #[must_use]
    pub fn with_network_distance(mut self, a: NetworkKind, b: NetworkKind, distance: f64) -> Self {
        self.networks[a.index()][b.index()] = distance;
        self.networks[b.index()][a.index()] = distance;
        self
    }

    /// Returns a copy with the distance from `network` to `building` overridden.
    #[must_use]
    pub fn with_building_distance(
        mut self,
        network: NetworkKind,
        building: BuildingKind,
        distance: f64,
    ) -> Self {
        self.buildings[network.index()][building.index()] = distance;
        self
    }

    /// Tabulated distance between two network kinds.
    #[must_use]
    pub fn between(&self, a: NetworkKind, b: NetworkKind) -> f64 {
        self.networks[a.index()][b.index()]
    }

    /// Tabulated distance from a network kind to a building category.
    #[must_use]
    pub fn to_building(&self, network: NetworkKind, building: BuildingKind) -> f64 {
        self.buildings[network.index()][building.index()]
    }

    /// Centre-to-centre distance between two corridors: the tabulated
    /// clearance plus half of each corridor's physical width.
    #[must_use]
    pub fn gap(&self, a: NetworkKind, b: NetworkKind, half_widths: &HalfWidths) -> f64 {
        self.between(a, b) + half_widths.get(a) + half_widths.get(b)
    }

    /// Distance the centreline of a new `network` corridor must keep from an
    /// obstacle curve of the given category.
    #[must_use]
    pub fn clearance(
        &self,
        network: NetworkKind,
        category: ObstacleCategory,
        half_widths: &HalfWidths,
    ) -> f64 {
        match category {
            ObstacleCategory::Network(other) => self.gap(network, other, half_widths),
            ObstacleCategory::Building(building) => {
                self.to_building(network, building) + half_widths.get(network)
            }
            ObstacleCategory::Boundary => half_widths.get(network),
        }
    }
}

impl Default for DistanceTables {
    fn default() -> Self {
        Self::resolve(&RoutingConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::PipeMaterial;
    use approx::assert_abs_diff_eq;

    #[test]
    fn tables_are_symmetric() {
        for pressure in [
            GasPressure::Low,
            GasPressure::Medium,
            GasPressure::High,
            GasPressure::VeryHigh,
        ] {
            let config = RoutingConfig {
                gas_pressure: pressure,
                pipe_material: PipeMaterial::CastIronLarge,
                ..RoutingConfig::default()
            };
            let tables = DistanceTables::resolve(&config);
            for a in NetworkKind::ALL {
                for b in NetworkKind::ALL {
                    assert_abs_diff_eq!(tables.between(a, b), tables.between(b, a));
                }
            }
        }
    }

    #[test]
    fn water_sewer_follows_material() {
        let tables = DistanceTables::default();
        assert_abs_diff_eq!(tables.between(NetworkKind::WaterPipe, NetworkKind::Sewer), 1.5);

        let config = RoutingConfig {
            pipe_material: PipeMaterial::ReinforcedConcrete,
            ..RoutingConfig::default()
        };
        let tables = DistanceTables::resolve(&config);
        assert_abs_diff_eq!(tables.between(NetworkKind::Sewer, NetworkKind::WaterPipe), 5.0);
    }

    #[test]
    fn gas_row_follows_pressure() {
        let low = DistanceTables::default();
        let high = DistanceTables::resolve(&RoutingConfig {
            gas_pressure: GasPressure::VeryHigh,
            ..RoutingConfig::default()
        });
        assert_abs_diff_eq!(low.between(NetworkKind::GasPipe, NetworkKind::Sewer), 1.0);
        assert_abs_diff_eq!(high.between(NetworkKind::GasPipe, NetworkKind::Sewer), 5.0);
        assert_abs_diff_eq!(
            high.to_building(NetworkKind::GasPipe, BuildingKind::Foundation),
            10.0
        );
    }

    #[test]
    fn gap_adds_both_half_widths() {
        let hw = HalfWidths::new()
            .with(NetworkKind::WaterPipe, 0.1)
            .with(NetworkKind::Sewer, 0.05);
        let tables = DistanceTables::default();
        assert_abs_diff_eq!(
            tables.gap(NetworkKind::WaterPipe, NetworkKind::Sewer, &hw),
            1.65,
            epsilon = 1e-12
        );
    }

    #[test]
    fn clearance_per_category() {
        let hw = HalfWidths::new().with(NetworkKind::HeatingNetworks, 0.4);
        let tables = DistanceTables::default();
        let heating = NetworkKind::HeatingNetworks;
        assert_abs_diff_eq!(
            tables.clearance(heating, ObstacleCategory::Building(BuildingKind::Foundation), &hw),
            2.4,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            tables.clearance(heating, ObstacleCategory::Boundary, &hw),
            0.4,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            tables.clearance(
                heating,
                ObstacleCategory::Network(NetworkKind::PowerCable),
                &hw
            ),
            2.4,
            epsilon = 1e-12
        );
    }

    #[test]
    fn overrides_stay_symmetric() {
        let tables = DistanceTables::default().with_network_distance(
            NetworkKind::PowerCable,
            NetworkKind::GasPipe,
            3.0,
        );
        assert_abs_diff_eq!(tables.between(NetworkKind::GasPipe, NetworkKind::PowerCable), 3.0);
    }
}
