use crate::costing::{cost_summary, CostSummary};
use crate::schema::{Invoice, InvoiceCategory, InvoiceStatus, LineItem};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An invoice under construction.
///
/// Each creation workflow owns its draft and threads it through the add and
/// remove steps explicitly; drafts are never shared between requests. The
/// invoice number comes from [`crate::numbering::next_invoice_number`] at the
/// start of the workflow and stays fixed for the draft's lifetime.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InvoiceDraft {
    pub number: String,
    pub category: InvoiceCategory,
    pub client: String,
    pub date: NaiveDate,
    pub items: Vec<LineItem>,
}

impl InvoiceDraft {
    pub fn new(
        category: InvoiceCategory,
        client: impl Into<String>,
        number: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            number: number.into(),
            category,
            client: client.into(),
            date,
            items: Vec::new(),
        }
    }

    pub fn add_line_item(&mut self, item: LineItem) {
        self.items.push(item);
    }

    /// Removes the first line item equal to `item`. Returns whether a line
    /// item was removed.
    pub fn remove_line_item(&mut self, item: &LineItem) -> bool {
        match self.items.iter().position(|existing| existing == item) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    /// Running totals for the draft, shown on the creation form.
    pub fn cost_summary(&self) -> CostSummary {
        cost_summary(&self.items)
    }

    /// Finalizes the draft. Sale invoices are created `Pending` and await
    /// approval; purchase invoices are `Approved` immediately.
    pub fn into_invoice(self) -> Invoice {
        let status = match self.category {
            InvoiceCategory::Sale => InvoiceStatus::Pending,
            InvoiceCategory::Purchase => InvoiceStatus::Approved,
        };

        Invoice {
            number: self.number,
            category: self.category,
            status,
            date: self.date,
            client: self.client,
            items: self.items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(category: InvoiceCategory) -> InvoiceDraft {
        InvoiceDraft::new(
            category,
            "Photo Shop",
            "S-INV001",
            NaiveDate::from_ymd_opt(2023, 5, 12).unwrap(),
        )
    }

    #[test]
    fn test_add_and_remove_line_items() {
        let mut d = draft(InvoiceCategory::Sale);
        let camera = LineItem::new("Camera", 2, 500, 18);
        let lens = LineItem::new("Lens", 1, 120, 18);

        d.add_line_item(camera.clone());
        d.add_line_item(lens.clone());
        assert_eq!(d.items.len(), 2);

        assert!(d.remove_line_item(&camera));
        assert_eq!(d.items, vec![lens.clone()]);

        // A second removal of the same item finds nothing.
        assert!(!d.remove_line_item(&camera));
        assert_eq!(d.items, vec![lens]);
    }

    #[test]
    fn test_remove_takes_first_of_equal_items() {
        let mut d = draft(InvoiceCategory::Sale);
        let item = LineItem::new("Camera", 2, 500, 18);
        d.add_line_item(item.clone());
        d.add_line_item(item.clone());

        assert!(d.remove_line_item(&item));
        assert_eq!(d.items.len(), 1);
    }

    #[test]
    fn test_running_totals() {
        let mut d = draft(InvoiceCategory::Sale);
        d.add_line_item(LineItem::new("Camera", 2, 100, 10));

        let summary = d.cost_summary();
        assert_eq!(summary.cost_without_tax, 200);
        assert_eq!(summary.cost_with_tax, 220);
        assert_eq!(summary.total_quantity, 2);
    }

    #[test]
    fn test_sale_finalizes_as_pending() {
        let invoice = draft(InvoiceCategory::Sale).into_invoice();
        assert_eq!(invoice.status, InvoiceStatus::Pending);
        assert_eq!(invoice.number, "S-INV001");
    }

    #[test]
    fn test_purchase_finalizes_as_approved() {
        let invoice = draft(InvoiceCategory::Purchase).into_invoice();
        assert_eq!(invoice.status, InvoiceStatus::Approved);
    }
}
