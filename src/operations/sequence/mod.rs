//! Ordering of parallel network corridors.

mod guided;
mod permutation;

pub use guided::{BestOrderWithObstacles, Guide, GuidedArrangement};
pub use permutation::next_permutation;

use tracing::{debug, trace};

use crate::error::{OperationError, Result};
use crate::network::{DistanceTables, HalfWidths, NetworkKind};

/// A chosen order of networks and their offsets from the first one.
#[derive(Debug, Clone, PartialEq)]
pub struct Arrangement {
    /// Networks from the guide outward.
    pub order: Vec<NetworkKind>,
    /// Centreline offset of each network in `order`; the first is always 0.
    pub offsets: Vec<f64>,
    /// Offset of the outermost network.
    pub total_width: f64,
}

/// Finds the order of parallel networks with the smallest total width.
///
/// Every permutation is scored by laying the networks side by side: each one
/// sits at the smallest offset that keeps it `gap(j, i)` from every network
/// `j` already placed, not only its neighbour. Among equally wide orders the
/// first one in lexicographic order wins.
#[derive(Debug)]
pub struct BestOrder<'a> {
    networks: Vec<NetworkKind>,
    tables: &'a DistanceTables,
    half_widths: &'a HalfWidths,
}

impl<'a> BestOrder<'a> {
    /// Creates a new ordering search.
    #[must_use]
    pub fn new(
        networks: Vec<NetworkKind>,
        tables: &'a DistanceTables,
        half_widths: &'a HalfWidths,
    ) -> Self {
        Self {
            networks,
            tables,
            half_widths,
        }
    }

    /// Executes the search.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if no network was given.
    pub fn execute(&self) -> Result<Arrangement> {
        if self.networks.is_empty() {
            return Err(OperationError::InvalidInput("no networks to arrange".to_owned()).into());
        }

        let mut order = self.networks.clone();
        order.sort_unstable();

        let mut best: Option<Arrangement> = None;
        loop {
            let offsets = self.evaluate(&order);
            let total_width = offsets.last().copied().unwrap_or(0.0);
            trace!(?order, total_width, "scored permutation");
            if best.as_ref().is_none_or(|b| total_width < b.total_width) {
                best = Some(Arrangement {
                    order: order.clone(),
                    offsets,
                    total_width,
                });
            }
            if !next_permutation(&mut order) {
                break;
            }
        }

        let best = best.ok_or_else(|| OperationError::Failed("no permutation scored".to_owned()))?;
        debug!(order = ?best.order, width = best.total_width, "best network order");
        Ok(best)
    }

    /// Offsets of `order` laid side by side, starting at 0.
    #[must_use]
    pub fn evaluate(&self, order: &[NetworkKind]) -> Vec<f64> {
        let mut offsets: Vec<f64> = Vec::with_capacity(order.len());
        for (i, &kind) in order.iter().enumerate() {
            let offset = order[..i]
                .iter()
                .zip(&offsets)
                .map(|(&placed, &o)| o + self.tables.gap(placed, kind, self.half_widths))
                .fold(0.0, f64::max);
            offsets.push(offset);
        }
        offsets
    }
}
