use crate::consolidation::consolidate;
use crate::costing::cost_summary;
use crate::engine::Reconciler;
use crate::error::{ReconcilerError, Result};
use crate::schema::{Invoice, InvoiceCategory, InvoiceStatus, LineItem, LineItemGroup, MatchOrder, ProfitRecord};
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Summary totals consumed by the reporting view.
///
/// `total_cost` and `total_tax` cover purchased line items, `total_sales`
/// covers approved sale line items (both tax-inclusive), and `total_earning`
/// is the realized profit from matching sales against purchases.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DashboardSummary {
    pub total_cost: i64,
    pub total_tax: i64,
    pub total_sales: i64,
    pub total_earning: i64,
}

impl DashboardSummary {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Composes the cost calculator, the reconciliation engine, and the
/// consolidator into the dashboard summary for one company's invoices.
pub struct DashboardAggregator {
    reconciler: Reconciler,
}

impl Default for DashboardAggregator {
    fn default() -> Self {
        Self::new(MatchOrder::default())
    }
}

impl DashboardAggregator {
    pub fn new(match_order: MatchOrder) -> Self {
        Self {
            reconciler: Reconciler::new(match_order),
        }
    }

    /// Builds the dashboard summary over all of a company's invoices.
    ///
    /// Only `Approved` sale invoices participate; `Pending` sales are
    /// excluded from both the sales total and the profit matching. Purchase
    /// invoices are approved at creation, so all of them participate.
    pub fn summarize(&self, invoices: &[Invoice]) -> Result<DashboardSummary> {
        validate_invoices(invoices)?;

        info!("Summarizing {} invoice(s) for the dashboard", invoices.len());

        let sold_groups = approved_sale_groups(invoices);
        let purchased_groups = purchase_groups(invoices);

        let purchased_items: Vec<LineItem> = flatten(&purchased_groups);
        let sold_items: Vec<LineItem> = flatten(&sold_groups);

        let purchase_costs = cost_summary(&purchased_items);
        let sale_costs = cost_summary(&sold_items);

        let outcome = self.reconciler.reconcile(&sold_groups, &purchased_groups);
        let per_product = consolidate(outcome.records);
        let total_earning = per_product.iter().map(|r| r.profit).sum();

        debug!(
            "Dashboard inputs: {} sold item(s), {} purchased item(s), {} product(s) with realized profit",
            sold_items.len(),
            purchased_items.len(),
            per_product.len()
        );

        Ok(DashboardSummary {
            total_cost: purchase_costs.cost_with_tax,
            total_tax: purchase_costs.tax_amount,
            total_sales: sale_costs.cost_with_tax,
            total_earning,
        })
    }

    /// Consolidated per-product profit list backing the profit report page.
    pub fn profit_by_product(&self, invoices: &[Invoice]) -> Result<Vec<ProfitRecord>> {
        validate_invoices(invoices)?;

        let sold_groups = approved_sale_groups(invoices);
        let purchased_groups = purchase_groups(invoices);

        let outcome = self.reconciler.reconcile(&sold_groups, &purchased_groups);
        Ok(consolidate(outcome.records))
    }
}

/// The `count` most recent invoices by date, newest first. Ties keep input
/// order. Shown as the activity feed on the dashboard.
pub fn recent_invoices(invoices: &[Invoice], count: usize) -> Vec<&Invoice> {
    let mut ordered: Vec<&Invoice> = invoices.iter().collect();
    ordered.sort_by(|a, b| b.date.cmp(&a.date));
    ordered.truncate(count);
    ordered
}

fn approved_sale_groups(invoices: &[Invoice]) -> Vec<LineItemGroup> {
    invoices
        .iter()
        .filter(|inv| inv.category == InvoiceCategory::Sale && inv.status == InvoiceStatus::Approved)
        .map(LineItemGroup::from)
        .collect()
}

fn purchase_groups(invoices: &[Invoice]) -> Vec<LineItemGroup> {
    invoices
        .iter()
        .filter(|inv| inv.category == InvoiceCategory::Purchase)
        .map(LineItemGroup::from)
        .collect()
}

fn flatten(groups: &[LineItemGroup]) -> Vec<LineItem> {
    groups.iter().flat_map(|g| g.items.iter().cloned()).collect()
}

/// Rejects negative quantities, prices, and tax rates before any arithmetic
/// runs; the engine assumes non-negative inputs.
fn validate_invoices(invoices: &[Invoice]) -> Result<()> {
    for invoice in invoices {
        for item in &invoice.items {
            let details = if item.quantity < 0 {
                format!("negative quantity {}", item.quantity)
            } else if item.unit_price < 0 {
                format!("negative unit price {}", item.unit_price)
            } else if item.tax_percent < 0 {
                format!("negative tax percent {}", item.tax_percent)
            } else {
                continue;
            };

            return Err(ReconcilerError::InvalidLineItem {
                invoice: invoice.number.clone(),
                name: item.name.clone(),
                details,
            });
        }
    }
    Ok(())
}
