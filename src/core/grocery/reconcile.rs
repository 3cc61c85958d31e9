//! Inventory reconciliation.
//!
//! On-hand stock only counts toward a line when it can be converted into the
//! line's unit family. Stock in an incompatible unit is credited as zero: the
//! list is never blocked by a unit mismatch, and never claims a requirement is
//! covered by something that cannot be compared to it.

use super::{
    aggregate::{AggregatedLine, name_key},
    units,
};
use crate::entities::{GroceryMode, InventoryItemModel};
use std::collections::HashMap;
use tracing::debug;

/// Relative tolerance for float noise when netting stock against a requirement
const COVERAGE_EPSILON: f64 = 1e-9;

/// A required line together with what is already on hand, both in base units.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconciledLine {
    /// The aggregated requirement
    pub line: AggregatedLine,
    /// Compatible on-hand stock in the line's base unit
    pub on_hand_base: f64,
}

impl ReconciledLine {
    /// Amount still to buy in base units, never negative.
    #[must_use]
    pub fn shortfall_base(&self) -> f64 {
        (self.line.base_quantity - self.on_hand_base).max(0.0)
    }

    /// Amount still to buy in the display unit.
    #[must_use]
    pub fn shortfall(&self) -> f64 {
        units::from_base(self.shortfall_base(), &self.line.unit)
    }

    /// On-hand stock in the display unit.
    #[must_use]
    pub fn on_hand(&self) -> f64 {
        units::from_base(self.on_hand_base, &self.line.unit)
    }

    /// Whether on-hand stock covers the whole requirement. Decided in base
    /// units; display rounding never hides a line with nothing on hand.
    #[must_use]
    pub fn is_covered(&self) -> bool {
        self.on_hand_base > 0.0
            && self.shortfall_base() <= COVERAGE_EPSILON * self.line.base_quantity.max(1.0)
    }
}

/// Nets inventory against required lines.
///
/// In [`GroceryMode::Shortfall`] fully covered lines are dropped. In
/// [`GroceryMode::Full`] every line is kept. Inventory is only read.
#[must_use]
pub fn reconcile(
    required: Vec<AggregatedLine>,
    inventory: &[InventoryItemModel],
    mode: GroceryMode,
) -> Vec<ReconciledLine> {
    let mut stock: HashMap<String, Vec<&InventoryItemModel>> = HashMap::new();
    for item in inventory {
        stock.entry(name_key(&item.name)).or_default().push(item);
    }

    required
        .into_iter()
        .map(|line| {
            let on_hand_base = stock
                .get(&line.key)
                .map_or(0.0, |items| compatible_stock(&line, items));
            ReconciledLine { line, on_hand_base }
        })
        .filter(|reconciled| match mode {
            GroceryMode::Full => true,
            GroceryMode::Shortfall => {
                let covered = reconciled.is_covered();
                if covered {
                    debug!("'{}' fully covered by inventory", reconciled.line.name);
                }
                !covered
            }
        })
        .collect()
}

/// Sums the stock that shares the line's unit family.
fn compatible_stock(line: &AggregatedLine, items: &[&InventoryItemModel]) -> f64 {
    items
        .iter()
        .filter(|item| item.quantity.is_finite())
        .filter_map(|item| {
            let normalized = units::normalize(item.quantity.max(0.0), &item.unit);
            if normalized.family == line.family {
                Some(normalized.base_quantity)
            } else {
                debug!(
                    "Inventory '{}' is measured by {} but '{}' needs {}, crediting zero",
                    item.name, normalized.family, line.name, line.family
                );
                None
            }
        })
        .sum()
}
