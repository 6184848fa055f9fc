use tracing::{debug, trace};

use crate::config::RoutingConfig;
use crate::error::{OperationError, Result, RoutingError};
use crate::geometry::{Curve, Polyline};
use crate::math::cross_2d;
use crate::network::{DistanceTables, NetworkKind, ObstacleCategory};
use crate::operations::offset::{OffsetSide, PolylineOffset2D};

use super::next_permutation;

/// Slack accepted when comparing measured distances against required ones.
const FIT_TOLERANCE: f64 = 1e-9;

/// Line(s) the networks are laid along.
#[derive(Debug, Clone)]
pub enum Guide {
    /// Parallel to `line`, on `side` of it.
    Along { line: Polyline, side: OffsetSide },
    /// Parallel to `first`, toward `second`. No corridor may reach `second`
    /// closer than its own half-width.
    Between { first: Polyline, second: Polyline },
}

impl Guide {
    fn line(&self) -> &Polyline {
        match self {
            Guide::Along { line, .. } => line,
            Guide::Between { first, .. } => first,
        }
    }

    /// Side of the guide line the corridors go to.
    fn side(&self) -> Result<OffsetSide> {
        match self {
            Guide::Along { side, .. } => Ok(*side),
            Guide::Between { first, second } => {
                let probe = second.first().ok_or_else(|| {
                    OperationError::InvalidInput("second guide line is empty".to_owned())
                })?;
                let closest = first.closest_point(probe).ok_or_else(|| {
                    OperationError::InvalidInput("first guide line is empty".to_owned())
                })?;
                let (a, b) = first.segment(closest.segment);
                if cross_2d(&(b - a), &(probe - a)) >= 0.0 {
                    Ok(OffsetSide::Left)
                } else {
                    Ok(OffsetSide::Right)
                }
            }
        }
    }

    /// Largest offset a corridor may take from the guide line.
    fn limit(&self, config: &RoutingConfig) -> f64 {
        match self {
            Guide::Along { .. } => config.max_offset,
            Guide::Between { first, second } => {
                config.max_offset.min(first.distance_to_curve(second))
            }
        }
    }
}

/// A feasible order of networks laid along a guide.
#[derive(Debug, Clone, PartialEq)]
pub struct GuidedArrangement {
    /// Networks from the guide outward.
    pub order: Vec<NetworkKind>,
    /// Offset of each network's centreline from the guide line.
    pub offsets: Vec<f64>,
    /// The laid centrelines, one per network in `order`.
    pub curves: Vec<Polyline>,
    /// Offset of the outermost network.
    pub total_width: f64,
}

/// Finds the narrowest order of networks laid along a guide while also
/// keeping clear of external obstacle curves.
///
/// For each permutation the networks are laid one after another with
/// [`PolylineOffset2D`]. A network starts at the smallest offset that respects
/// its half-width and every corridor already laid, then moves outward by
/// `config.offset_step` until it clears all obstacles. A permutation is
/// rejected when an offset fails or exceeds the allowed range.
#[derive(Debug)]
pub struct BestOrderWithObstacles<'a> {
    guide: Guide,
    networks: Vec<NetworkKind>,
    obstacles: &'a [(Polyline, ObstacleCategory)],
    tables: &'a DistanceTables,
    config: &'a RoutingConfig,
}

impl<'a> BestOrderWithObstacles<'a> {
    /// Creates a new guided ordering search.
    #[must_use]
    pub fn new(
        guide: Guide,
        networks: Vec<NetworkKind>,
        obstacles: &'a [(Polyline, ObstacleCategory)],
        tables: &'a DistanceTables,
        config: &'a RoutingConfig,
    ) -> Self {
        Self {
            guide,
            networks,
            obstacles,
            tables,
            config,
        }
    }

    /// Executes the search.
    ///
    /// # Errors
    ///
    /// - `OperationError::InvalidInput` if no network was given or a guide
    ///   line is empty
    /// - `RoutingError::NoFeasibleArrangement` if every permutation is rejected
    pub fn execute(&self) -> Result<GuidedArrangement> {
        if self.networks.is_empty() {
            return Err(OperationError::InvalidInput("no networks to arrange".to_owned()).into());
        }
        self.config.validate()?;
        let side = self.guide.side()?;
        let limit = self.guide.limit(self.config);

        let mut order = self.networks.clone();
        order.sort_unstable();

        let mut best: Option<GuidedArrangement> = None;
        loop {
            match self.lay(&order, side, limit) {
                Some(candidate) => {
                    trace!(?order, width = candidate.total_width, "laid permutation");
                    if best
                        .as_ref()
                        .is_none_or(|b| candidate.total_width < b.total_width)
                    {
                        best = Some(candidate);
                    }
                }
                None => trace!(?order, "permutation rejected"),
            }
            if !next_permutation(&mut order) {
                break;
            }
        }

        let best = best.ok_or(RoutingError::NoFeasibleArrangement)?;
        debug!(order = ?best.order, width = best.total_width, "best guided order");
        Ok(best)
    }

    /// Lays `order` network by network; `None` rejects the permutation.
    fn lay(
        &self,
        order: &[NetworkKind],
        side: OffsetSide,
        limit: f64,
    ) -> Option<GuidedArrangement> {
        let half_widths = &self.config.half_widths;
        let mut offsets: Vec<f64> = Vec::with_capacity(order.len());
        let mut curves: Vec<Polyline> = Vec::with_capacity(order.len());

        for (i, &kind) in order.iter().enumerate() {
            let start = order[..i]
                .iter()
                .zip(&offsets)
                .map(|(&placed, &o)| o + self.tables.gap(placed, kind, half_widths))
                .fold(half_widths.get(kind), f64::max);

            let mut k = 0.0;
            let (offset, curve) = loop {
                let offset = start + k * self.config.offset_step;
                if offset > limit + FIT_TOLERANCE {
                    return None;
                }
                let curve = PolylineOffset2D::toward(self.guide.line(), side, offset)
                    .execute()
                    .ok()?;
                if self.fits(kind, &curve, &order[..i], &curves) {
                    break (offset, curve);
                }
                k += 1.0;
            };
            offsets.push(offset);
            curves.push(curve);
        }

        let total_width = offsets.last().copied().unwrap_or(0.0);
        Some(GuidedArrangement {
            order: order.to_vec(),
            offsets,
            curves,
            total_width,
        })
    }

    /// Whether a `kind` corridor along `curve` clears the obstacles, the far
    /// guide and the corridors already laid in this permutation.
    ///
    /// A corridor never crosses another curve, even where the required
    /// clearance is zero.
    fn fits(
        &self,
        kind: NetworkKind,
        curve: &Polyline,
        laid_kinds: &[NetworkKind],
        laid: &[Polyline],
    ) -> bool {
        let half_widths = &self.config.half_widths;
        let clears = |other: &Polyline, required: f64| {
            curve.intersection_count(other) == 0
                && curve.distance_to_curve(other) >= required - FIT_TOLERANCE
        };

        let external = self.obstacles.iter().all(|(other, category)| {
            clears(other, self.tables.clearance(kind, *category, half_widths))
        });
        let guide = match &self.guide {
            Guide::Along { .. } => true,
            Guide::Between { second, .. } => clears(
                second,
                self.tables
                    .clearance(kind, ObstacleCategory::Boundary, half_widths),
            ),
        };
        let corridors = laid_kinds
            .iter()
            .zip(laid)
            .all(|(&placed, other)| clears(other, self.tables.gap(placed, kind, half_widths)));

        external && guide && corridors
    }
}
