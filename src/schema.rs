use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One product entry on an invoice: name, quantity, unit price, tax rate.
///
/// Quantity, unit price, and tax percent are expected to be non-negative.
/// A line item whose quantity is zero is treated as fully consumed and is
/// ignored by the reconciliation engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineItem {
    pub name: String,
    pub quantity: i64,
    pub unit_price: i64,
    /// Tax rate as a whole percentage (e.g. 10 for 10%).
    pub tax_percent: i64,
}

impl LineItem {
    pub fn new(name: impl Into<String>, quantity: i64, unit_price: i64, tax_percent: i64) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit_price,
            tax_percent,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub enum InvoiceCategory {
    Purchase,
    Sale,
}

impl InvoiceCategory {
    /// Invoice number prefix for this category ("P-INV" / "S-INV").
    pub fn number_prefix(&self) -> &'static str {
        match self {
            InvoiceCategory::Purchase => "P-INV",
            InvoiceCategory::Sale => "S-INV",
        }
    }
}

/// Sale invoices are created `Pending` and must be approved before they
/// participate in profit reporting. Purchase invoices are `Approved` from
/// creation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub enum InvoiceStatus {
    Approved,
    Pending,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Invoice {
    pub number: String,
    pub category: InvoiceCategory,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
    pub client: String,
    pub items: Vec<LineItem>,
}

/// The line items of a single invoice, tagged with the invoice date so the
/// engine can optionally order groups chronologically before matching.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineItemGroup {
    pub invoice_date: NaiveDate,
    pub items: Vec<LineItem>,
}

impl From<&Invoice> for LineItemGroup {
    fn from(invoice: &Invoice) -> Self {
        Self {
            invoice_date: invoice.date,
            items: invoice.items.clone(),
        }
    }
}

/// One matched allocation event produced by the reconciliation pass.
///
/// `profit` is `(sale_unit_price - purchase_unit_price) * matched_quantity`
/// and can be negative when goods were sold below cost.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfitRecord {
    pub name: String,
    pub quantity: i64,
    pub profit: i64,
}

impl ProfitRecord {
    pub fn new(name: impl Into<String>, quantity: i64, profit: i64) -> Self {
        Self {
            name: name.into(),
            quantity,
            profit,
        }
    }
}

/// Controls the order in which invoice groups are fed to the matcher.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "PascalCase")]
pub enum MatchOrder {
    /// Match in input iteration order. This reproduces the allocation
    /// behavior of the ledger the data was loaded from, regardless of
    /// invoice dates.
    #[default]
    Ledger,
    /// Stable-sort groups by invoice date before matching, so the earliest
    /// purchased stock is consumed first (FIFO costing).
    InvoiceDate,
}
