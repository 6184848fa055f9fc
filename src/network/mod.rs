//! Utility network categories and the distance rules between them.

pub mod distances;
pub mod layers;

pub use distances::DistanceTables;
pub use layers::LayerMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Category of an underground utility.
///
/// The derived ordering is the enumeration order used by the sequencing
/// optimizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NetworkKind {
    WaterPipe,
    Sewer,
    PowerCable,
    CommunicationCable,
    HeatingNetworks,
    GasPipe,
}

impl NetworkKind {
    /// Number of network kinds.
    pub const COUNT: usize = 6;

    /// Every kind, in enumeration order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::WaterPipe,
        Self::Sewer,
        Self::PowerCable,
        Self::CommunicationCable,
        Self::HeatingNetworks,
        Self::GasPipe,
    ];

    /// Row/column of this kind in the distance tables.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::WaterPipe => 0,
            Self::Sewer => 1,
            Self::PowerCable => 2,
            Self::CommunicationCable => 3,
            Self::HeatingNetworks => 4,
            Self::GasPipe => 5,
        }
    }

    /// Pipe-like kinds occupy a physical width; cables are treated as lines.
    #[must_use]
    pub fn is_pipe(self) -> bool {
        matches!(
            self,
            Self::WaterPipe | Self::Sewer | Self::HeatingNetworks | Self::GasPipe
        )
    }
}

/// Building-related obstacle categories with their own distance row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BuildingKind {
    /// Foundations of buildings and structures.
    Foundation,
    /// Foundations of fences, gantries and contact-network supports.
    Fence,
    /// Foundations of overhead power line supports.
    OverheadLineSupport,
    /// Road curb stone or shoulder edge.
    RoadCurb,
    /// Axis of the outer railway track.
    RailwayAxis,
}

impl BuildingKind {
    /// Number of building categories.
    pub const COUNT: usize = 5;

    /// Column of this category in the building table.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Foundation => 0,
            Self::Fence => 1,
            Self::OverheadLineSupport => 2,
            Self::RoadCurb => 3,
            Self::RailwayAxis => 4,
        }
    }
}

/// Gas pipeline pressure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GasPressure {
    /// Up to 0.005 MPa.
    #[default]
    Low,
    /// Over 0.005 up to 0.3 MPa.
    Medium,
    /// Over 0.3 up to 0.6 MPa.
    High,
    /// Over 0.6 up to 1.2 MPa.
    VeryHigh,
}

impl GasPressure {
    /// Number of pressure classes.
    pub const COUNT: usize = 4;

    /// Column of this class in the pressure-indexed gas rows.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
            Self::VeryHigh => 3,
        }
    }
}

/// Pipe material/type, which sets the water-to-sewer distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PipeMaterial {
    #[default]
    Plastic,
    /// Cast iron up to 200 mm diameter.
    CastIronSmall,
    /// Cast iron over 200 mm diameter.
    CastIronLarge,
    /// Reinforced concrete or asbestos cement.
    ReinforcedConcrete,
}

impl PipeMaterial {
    /// Minimum distance between water and sewer lines for this material.
    #[must_use]
    pub fn water_sewer_distance(self) -> f64 {
        match self {
            Self::Plastic | Self::CastIronSmall => 1.5,
            Self::CastIronLarge => 3.0,
            Self::ReinforcedConcrete => 5.0,
        }
    }
}

/// What an obstacle curve represents, as resolved from its layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ObstacleCategory {
    /// An existing or just-routed utility line.
    Network(NetworkKind),
    /// A building-related structure.
    Building(BuildingKind),
    /// The designated red-line boundary. Never crossed.
    Boundary,
}

/// Corridor half-widths of pipe-like network kinds.
///
/// Cables always report zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HalfWidths {
    values: [f64; NetworkKind::COUNT],
}

impl HalfWidths {
    /// All half-widths zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy with the half-width of `kind` set.
    #[must_use]
    pub fn with(mut self, kind: NetworkKind, half_width: f64) -> Self {
        self.values[kind.index()] = half_width;
        self
    }

    /// Half-width of `kind`.
    #[must_use]
    pub fn get(&self, kind: NetworkKind) -> f64 {
        if kind.is_pipe() {
            self.values[kind.index()]
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_are_a_bijection() {
        for (i, kind) in NetworkKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn ordering_matches_enumeration() {
        let mut sorted = NetworkKind::ALL;
        sorted.sort();
        assert_eq!(sorted, NetworkKind::ALL);
    }

    #[test]
    fn cables_have_no_width() {
        let hw = HalfWidths::new()
            .with(NetworkKind::WaterPipe, 0.1)
            .with(NetworkKind::PowerCable, 0.3);
        assert!((hw.get(NetworkKind::WaterPipe) - 0.1).abs() < f64::EPSILON);
        assert!(hw.get(NetworkKind::PowerCable).abs() < f64::EPSILON);
        assert!(hw.get(NetworkKind::Sewer).abs() < f64::EPSILON);
    }

    #[test]
    fn material_sets_water_sewer_distance() {
        assert!((PipeMaterial::Plastic.water_sewer_distance() - 1.5).abs() < f64::EPSILON);
        assert!((PipeMaterial::CastIronLarge.water_sewer_distance() - 3.0).abs() < f64::EPSILON);
        assert!(
            (PipeMaterial::ReinforcedConcrete.water_sewer_distance() - 5.0).abs() < f64::EPSILON
        );
    }
}
