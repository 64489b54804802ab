use crate::error::{ReconcilerError, Result};
use crate::schema::LineItem;
use serde::{Deserialize, Serialize};

/// Aggregate monetary totals over a collection of line items.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CostSummary {
    pub cost_without_tax: i64,
    pub cost_with_tax: i64,
    /// Derived as `cost_with_tax - cost_without_tax` rather than summed
    /// separately, so the two totals cannot drift apart through rounding.
    pub tax_amount: i64,
    pub total_quantity: i64,
}

/// Computes the cost summary for a collection of line items.
///
/// The tax contribution of each line item is `unit_price * quantity *
/// tax_percent / 100`, evaluated in floating point and truncated toward zero
/// before it is added to the running integer total. Truncation is applied
/// per line item, which keeps the summary additive across disjoint
/// collections. An empty collection yields the all-zero summary.
pub fn cost_summary(items: &[LineItem]) -> CostSummary {
    let mut summary = CostSummary::default();

    for item in items {
        let base = item.unit_price * item.quantity;
        let tax = (base as f64 * item.tax_percent as f64 / 100.0) as i64;

        summary.cost_without_tax += base;
        summary.cost_with_tax += base + tax;
        summary.total_quantity += item.quantity;
    }

    summary.tax_amount = summary.cost_with_tax - summary.cost_without_tax;
    summary
}

/// Average pre-tax cost per unit, by integer division.
///
/// A zero total quantity has no meaningful per-unit cost and is reported as
/// [`ReconcilerError::UndefinedPerUnitCost`] instead of dividing by zero.
pub fn per_unit_cost(summary: &CostSummary) -> Result<i64> {
    if summary.total_quantity == 0 {
        return Err(ReconcilerError::UndefinedPerUnitCost);
    }
    Ok(summary.cost_without_tax / summary.total_quantity)
}
