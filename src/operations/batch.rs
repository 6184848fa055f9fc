use tracing::{debug, info, warn};

use crate::config::RoutingConfig;
use crate::error::{Result, RoutingError};
use crate::geometry::Polyline;
use crate::math::Point2;
use crate::network::{DistanceTables, LayerMap, NetworkKind, ObstacleCategory};
use crate::obstacle::Obstacle;

use super::merge::MergeObstacles;
use super::route::RouteBetween;
use super::simplify::SimplifyPath;

/// One network to be routed between two picked points.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetworkRequest {
    pub kind: NetworkKind,
    pub from: Point2,
    pub to: Point2,
}

/// An existing drawing curve together with the layer it lives on.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayeredCurve {
    pub layer: String,
    pub curve: Polyline,
}

/// Result of routing one request.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkOutcome {
    pub kind: NetworkKind,
    /// Layer the corridor belongs on, when the host mapped one.
    pub layer: Option<String>,
    pub result: std::result::Result<Polyline, RoutingError>,
}

/// Routes a list of networks one after another through a drawing.
///
/// Each request gets its own clearances from the distance tables, the
/// obstacle clusters are merged, the route is searched and simplified.
/// A routed corridor becomes an obstacle for the requests after it. A request
/// without a feasible route is reported and skipped; the batch carries on.
#[derive(Debug)]
pub struct RouteNetworks<'a> {
    layers: &'a LayerMap,
    config: &'a RoutingConfig,
}

impl<'a> RouteNetworks<'a> {
    /// Creates a new batch router.
    #[must_use]
    pub fn new(layers: &'a LayerMap, config: &'a RoutingConfig) -> Self {
        Self { layers, config }
    }

    /// Executes the batch.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::UnknownLayer` when a curve sits on an
    /// unmapped layer and `ConfigurationError::InvalidParameter` for a bad
    /// configuration. Infeasible routes are not errors; they are reported in
    /// the corresponding [`NetworkOutcome`].
    pub fn execute(
        &self,
        requests: &[NetworkRequest],
        curves: &[LayeredCurve],
    ) -> Result<Vec<NetworkOutcome>> {
        self.config.validate()?;
        let tables = DistanceTables::resolve(self.config);

        let mut drawing: Vec<(Polyline, ObstacleCategory)> = Vec::with_capacity(curves.len());
        for c in curves {
            let category = self.layers.category(&c.layer)?;
            if !c.curve.is_finite() {
                warn!(layer = %c.layer, "skipping curve with non-finite vertices");
                continue;
            }
            drawing.push((c.curve.clone(), category));
        }

        let mut outcomes = Vec::with_capacity(requests.len());
        for request in requests {
            let obstacles = self.obstacles_for(request.kind, &drawing, &tables);
            let merged = MergeObstacles::new(obstacles).execute();
            debug!(
                network = ?request.kind,
                obstacles = merged.len(),
                "routing network"
            );

            let routed = RouteBetween::new(request.from, request.to, &merged, self.config)
                .execute()
                .map(|path| SimplifyPath::new(&merged, self.config.safety_margin).execute(&path));

            let result = match routed {
                Some(path) => {
                    drawing.push((path.clone(), ObstacleCategory::Network(request.kind)));
                    Ok(path)
                }
                None => {
                    warn!(network = ?request.kind, "no feasible route, skipping network");
                    Err(RoutingError::Infeasible {
                        network: request.kind,
                    })
                }
            };
            outcomes.push(NetworkOutcome {
                kind: request.kind,
                layer: self.layers.layer_of(request.kind).map(str::to_owned),
                result,
            });
        }

        let routed = outcomes.iter().filter(|o| o.result.is_ok()).count();
        info!(routed, requested = requests.len(), "batch finished");
        Ok(outcomes)
    }

    fn obstacles_for(
        &self,
        kind: NetworkKind,
        drawing: &[(Polyline, ObstacleCategory)],
        tables: &DistanceTables,
    ) -> Vec<Obstacle> {
        drawing
            .iter()
            .map(|(curve, category)| {
                let clearance = tables.clearance(kind, *category, &self.config.half_widths);
                match category {
                    ObstacleCategory::Boundary => Obstacle::boundary(curve.clone(), clearance),
                    _ => Obstacle::new(curve.clone(), clearance),
                }
            })
            .collect()
    }
}
