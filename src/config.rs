//! Settings read from the host for a single routing or sequencing call.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, Result};
use crate::network::{GasPressure, HalfWidths, PipeMaterial};

/// Immutable configuration passed into every entry point.
///
/// The host owns the mutable settings and hands the core a snapshot.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RoutingConfig {
    /// Marching step Δ of the path constructor, in drawing units.
    pub step: f64,

    /// Maximum recursion depth of the path constructor.
    pub max_depth: usize,

    /// Minimum angle, in degrees, between a crossing route and the crossed
    /// obstacle. Must lie in `[0, 90]`.
    pub min_turn_angle_deg: f64,

    /// Whether a route may cross non-boundary obstacles.
    pub allow_intersection: bool,

    /// A crossing is only considered while the straight leg toward the target
    /// intersects the obstacle fewer than this many times.
    pub max_crossings: usize,

    /// Extra distance the simplifier keeps on top of every clearance.
    pub safety_margin: f64,

    /// Pipe material, selecting the water-to-sewer distance.
    pub pipe_material: PipeMaterial,

    /// Gas pressure class, selecting the gas distance row.
    pub gas_pressure: GasPressure,

    /// Corridor half-widths of pipe-like networks.
    pub half_widths: HalfWidths,

    /// Outward step used when pushing an offset corridor clear of obstacles.
    pub offset_step: f64,

    /// Largest offset from a guide line before an arrangement is rejected.
    pub max_offset: f64,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            step: 0.05,
            max_depth: 10,
            min_turn_angle_deg: 90.0,
            allow_intersection: false,
            max_crossings: 5,
            safety_margin: 1e-3,
            pipe_material: PipeMaterial::default(),
            gas_pressure: GasPressure::default(),
            half_widths: HalfWidths::default(),
            offset_step: 0.05,
            max_offset: 100.0,
        }
    }
}

impl RoutingConfig {
    /// Checks every scalar setting.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidParameter` naming the first bad value.
    pub fn validate(&self) -> Result<()> {
        check_positive("step", self.step)?;
        check_positive("offset_step", self.offset_step)?;
        check_positive("max_offset", self.max_offset)?;
        if !(0.0..=90.0).contains(&self.min_turn_angle_deg) {
            return Err(ConfigurationError::InvalidParameter {
                name: "min_turn_angle_deg",
                value: self.min_turn_angle_deg,
                reason: "must lie in [0, 90]",
            }
            .into());
        }
        if !(self.safety_margin >= 0.0 && self.safety_margin.is_finite()) {
            return Err(ConfigurationError::InvalidParameter {
                name: "safety_margin",
                value: self.safety_margin,
                reason: "must be finite and non-negative",
            }
            .into());
        }
        Ok(())
    }

    /// Minimum turn angle in radians.
    #[must_use]
    pub fn min_turn_angle(&self) -> f64 {
        self.min_turn_angle_deg.to_radians()
    }
}

fn check_positive(name: &'static str, value: f64) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigurationError::InvalidParameter {
            name,
            value,
            reason: "must be finite and positive",
        }
        .into())
    }
}
