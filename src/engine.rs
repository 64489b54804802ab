use crate::schema::{LineItemGroup, MatchOrder, ProfitRecord};
use indexmap::IndexMap;
use log::debug;
use serde::Serialize;

/// Matches sold line items against purchased line items by product name and
/// derives the realized profit of each allocation.
pub struct Reconciler {
    match_order: MatchOrder,
}

// Private working copy of a line item; quantities are decremented toward
// zero as the matcher consumes them. Tax does not participate in matching.
struct WorkingItem {
    name: String,
    quantity: i64,
    unit_price: i64,
}

/// Result of a reconciliation pass.
///
/// `records` holds one entry per allocation event, in emission order.
/// The unmatched maps report quantities that found no counterpart
/// (oversold products under `unmatched_sold`, leftover stock under
/// `unmatched_purchased`), keyed by product name in first-seen order.
/// Unmatched remainder is a reporting gap, not a failure.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReconciliationOutcome {
    pub records: Vec<ProfitRecord>,
    pub unmatched_sold: IndexMap<String, i64>,
    pub unmatched_purchased: IndexMap<String, i64>,
}

impl ReconciliationOutcome {
    pub fn total_profit(&self) -> i64 {
        self.records.iter().map(|r| r.profit).sum()
    }
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::new(MatchOrder::default())
    }
}

impl Reconciler {
    pub fn new(match_order: MatchOrder) -> Self {
        Self { match_order }
    }

    /// Runs the greedy matching pass.
    ///
    /// Both sides are deep-copied into private working lists; the caller's
    /// groups are never mutated, so each invocation can run on its own
    /// snapshot from any thread. For each sold item with positive quantity,
    /// purchased items of the same product are consumed in order:
    ///
    /// - equal quantities settle both items with a single record;
    /// - a smaller sale consumes part of the purchase and stops, leaving the
    ///   remainder for a later sale;
    /// - a larger sale drains the purchase and keeps scanning. The emitted
    ///   record keeps the sold quantity as it was before the decrement,
    ///   while its profit covers only the matched purchase quantity.
    ///
    /// Under [`MatchOrder::InvoiceDate`] groups are stable-sorted by invoice
    /// date before flattening, giving FIFO costing; [`MatchOrder::Ledger`]
    /// keeps input iteration order.
    pub fn reconcile(
        &self,
        sold: &[LineItemGroup],
        purchased: &[LineItemGroup],
    ) -> ReconciliationOutcome {
        let mut sold_items = self.working_copy(sold);
        let mut purchased_items = self.working_copy(purchased);

        let mut records = Vec::new();

        for s in sold_items.iter_mut() {
            for p in purchased_items.iter_mut() {
                if s.quantity == 0 {
                    break;
                }
                if p.quantity == 0 || p.name != s.name {
                    continue;
                }

                let profit_per_unit = s.unit_price - p.unit_price;

                if s.quantity == p.quantity {
                    records.push(ProfitRecord::new(
                        s.name.clone(),
                        s.quantity,
                        profit_per_unit * s.quantity,
                    ));
                    s.quantity = 0;
                    p.quantity = 0;
                } else if s.quantity < p.quantity {
                    records.push(ProfitRecord::new(
                        s.name.clone(),
                        s.quantity,
                        profit_per_unit * s.quantity,
                    ));
                    p.quantity -= s.quantity;
                    s.quantity = 0;
                } else {
                    // Quantity is recorded before the decrement; profit only
                    // covers the purchased batch that was actually consumed.
                    records.push(ProfitRecord::new(
                        s.name.clone(),
                        s.quantity,
                        profit_per_unit * p.quantity,
                    ));
                    s.quantity -= p.quantity;
                    p.quantity = 0;
                }
            }
        }

        let unmatched_sold = collect_remainder(&sold_items);
        let unmatched_purchased = collect_remainder(&purchased_items);

        if !unmatched_sold.is_empty() {
            debug!(
                "{} product(s) oversold with no purchase to match: {:?}",
                unmatched_sold.len(),
                unmatched_sold
            );
        }
        if !unmatched_purchased.is_empty() {
            debug!(
                "{} product(s) with unsold purchased stock: {:?}",
                unmatched_purchased.len(),
                unmatched_purchased
            );
        }

        ReconciliationOutcome {
            records,
            unmatched_sold,
            unmatched_purchased,
        }
    }

    fn working_copy(&self, groups: &[LineItemGroup]) -> Vec<WorkingItem> {
        let mut ordered: Vec<&LineItemGroup> = groups.iter().collect();
        if self.match_order == MatchOrder::InvoiceDate {
            ordered.sort_by_key(|g| g.invoice_date);
        }

        ordered
            .iter()
            .flat_map(|g| g.items.iter())
            .map(|item| WorkingItem {
                name: item.name.clone(),
                quantity: item.quantity,
                unit_price: item.unit_price,
            })
            .collect()
    }
}

fn collect_remainder(items: &[WorkingItem]) -> IndexMap<String, i64> {
    let mut remainder = IndexMap::new();
    for item in items {
        if item.quantity > 0 {
            *remainder.entry(item.name.clone()).or_insert(0) += item.quantity;
        }
    }
    remainder
}
