//! Row and view models returned by the repository.
//!
//! Amounts stay in cents here; formatting happens in the facade.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::InvoiceStatus;

/// Invoice joined with the customer's display fields.
#[derive(Debug, Clone)]
pub struct LatestInvoiceRow {
    pub id: String,
    pub name: String,
    pub image_url: String,
    pub email: String,
    pub amount: i64,
    pub date: NaiveDate,
}

/// One row of the searchable invoices table.
#[derive(Debug, Clone)]
pub struct InvoiceTableRow {
    pub id: String,
    pub customer_id: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub date: NaiveDate,
    pub amount: i64,
    pub status: InvoiceStatus,
}

/// Sums of invoice amounts split by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusTotals {
    pub paid: i64,
    pub pending: i64,
}

/// Minimal customer projection used by pickers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomerField {
    pub id: String,
    pub name: String,
}

/// Customer with aggregated invoice figures.
#[derive(Debug, Clone)]
pub struct CustomerTableRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub total_invoices: i64,
    pub total_pending: i64,
    pub total_paid: i64,
}
