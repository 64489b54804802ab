//! # Profit Reconciler
//!
//! A library for reconciling a company's purchase and sale invoice line items
//! into realized profit and dashboard totals, using exact integer arithmetic.
//!
//! ## Core Concepts
//!
//! - **Line Item**: one product entry on an invoice (name, quantity, unit price, tax rate)
//! - **Reconciliation**: greedy matching of sold quantities against purchased
//!   quantities of the same product, consuming working copies of both sides
//! - **Consolidation**: merging per-allocation profit records into one entry
//!   per product, conserving total quantity and profit exactly
//! - **Dashboard Summary**: tax-inclusive cost, tax, sales, and earning totals
//!   over all purchases and *approved* sales
//! - **Invoice Numbering**: sequential, zero-padded numbers per category
//!   (`P-INV001`, `S-INV002`, ...) that are never reassigned
//!
//! ## Example
//!
//! ```rust,ignore
//! use profit_reconciler::*;
//! use chrono::NaiveDate;
//!
//! let invoices = vec![
//!     Invoice {
//!         number: "P-INV001".to_string(),
//!         category: InvoiceCategory::Purchase,
//!         status: InvoiceStatus::Approved,
//!         date: NaiveDate::from_ymd_opt(2023, 1, 5).unwrap(),
//!         client: "Supplier Ltd".to_string(),
//!         items: vec![LineItem::new("Camera", 10, 100, 18)],
//!     },
//!     Invoice {
//!         number: "S-INV001".to_string(),
//!         category: InvoiceCategory::Sale,
//!         status: InvoiceStatus::Approved,
//!         date: NaiveDate::from_ymd_opt(2023, 2, 20).unwrap(),
//!         client: "Photo Shop".to_string(),
//!         items: vec![LineItem::new("Camera", 6, 150, 18)],
//!     },
//! ];
//!
//! let summary = summarize_invoices(&invoices).unwrap();
//! assert_eq!(summary.total_earning, 300);
//! ```

pub mod consolidation;
pub mod costing;
pub mod dashboard;
pub mod draft;
pub mod engine;
pub mod error;
pub mod numbering;
pub mod schema;

pub use consolidation::consolidate;
pub use costing::{cost_summary, per_unit_cost, CostSummary};
pub use dashboard::{recent_invoices, DashboardAggregator, DashboardSummary};
pub use draft::InvoiceDraft;
pub use engine::{ReconciliationOutcome, Reconciler};
pub use error::{ReconcilerError, Result};
pub use numbering::next_invoice_number;
pub use schema::*;

/// Builds the dashboard summary over a company's invoices with the default
/// [`MatchOrder::Ledger`] allocation order. Use [`DashboardAggregator`]
/// directly to opt into FIFO costing.
pub fn summarize_invoices(invoices: &[Invoice]) -> Result<DashboardSummary> {
    DashboardAggregator::default().summarize(invoices)
}
