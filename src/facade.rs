//! Reporting query facade used by the dashboard pages.
//!
//! Every operation runs one query (or a fixed fan-out of queries) against the
//! injected pool, formats money for display, and collapses any store failure
//! into a [`FacadeError`] with a fixed message. The raw cause is only logged.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use tracing::{error, instrument};

use crate::currency::format_currency;
use crate::db::{self, model::CustomerField, repo, Pool};
use crate::error::{FacadeError, FacadeResult};
use crate::model::{InvoiceStatus, Revenue, User};

const REVENUE_ERR: &str = "Failed to fetch revenue data.";
const LATEST_INVOICES_ERR: &str = "Failed to fetch the latest invoices.";
const CARD_DATA_ERR: &str = "Failed to fetch card data.";
const INVOICES_ERR: &str = "Failed to fetch invoices.";
const INVOICE_PAGES_ERR: &str = "Failed to fetch total number of invoices.";
const INVOICE_ERR: &str = "Failed to fetch invoice.";
const INVOICE_NOT_FOUND: &str = "Invoice not found.";
const CUSTOMERS_ERR: &str = "Failed to fetch all customers.";
const CUSTOMER_TABLE_ERR: &str = "Failed to fetch customer table.";
const USER_ERR: &str = "Failed to fetch user.";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LatestInvoice {
    pub id: String,
    pub name: String,
    pub image_url: String,
    pub email: String,
    pub amount: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardData {
    pub number_of_customers: i64,
    pub number_of_invoices: i64,
    pub total_paid_invoices: String,
    pub total_pending_invoices: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InvoiceTableEntry {
    pub id: String,
    pub customer_id: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub date: NaiveDate,
    pub amount: String,
    pub status: InvoiceStatus,
}

/// Single invoice as loaded into the edit form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InvoiceForm {
    pub id: String,
    pub customer_id: String,
    pub amount: String,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomerTableEntry {
    pub id: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub total_invoices: i64,
    pub total_pending: String,
    pub total_paid: String,
}

/// Log the raw cause and replace it with the operation's fixed message.
fn store_failure<E: Debug>(message: &'static str) -> impl FnOnce(E) -> FacadeError {
    move |err| {
        error!(?err, "Database Error: {}", message);
        FacadeError::Store(message)
    }
}

/// Dashboard data access over a shared store pool.
///
/// The pool is handed in by the caller, which also decides when to
/// [`close`](Dashboard::close) it.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pool: Pool,
}

impl Dashboard {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    pub async fn close(&self) {
        db::close(&self.pool).await;
    }

    #[instrument(skip_all)]
    pub async fn fetch_revenue(&self) -> FacadeResult<Vec<Revenue>> {
        repo::all_revenue(&self.pool)
            .await
            .map_err(store_failure(REVENUE_ERR))
    }

    /// The five most recent invoices, newest first.
    #[instrument(skip_all)]
    pub async fn fetch_latest_invoices(&self) -> FacadeResult<Vec<LatestInvoice>> {
        let rows = repo::latest_invoices(&self.pool)
            .await
            .map_err(store_failure(LATEST_INVOICES_ERR))?;
        Ok(rows
            .into_iter()
            .map(|row| LatestInvoice {
                amount: format_currency(row.amount),
                id: row.id,
                name: row.name,
                image_url: row.image_url,
                email: row.email,
                date: row.date,
            })
            .collect())
    }

    /// Invoice and customer counts plus paid/pending totals. The three
    /// queries run concurrently; the first failure fails the whole call.
    #[instrument(skip_all)]
    pub async fn fetch_card_data(&self) -> FacadeResult<CardData> {
        let (number_of_invoices, number_of_customers, totals) = tokio::try_join!(
            repo::count_invoices(&self.pool),
            repo::count_customers(&self.pool),
            repo::invoice_status_totals(&self.pool),
        )
        .map_err(store_failure(CARD_DATA_ERR))?;

        Ok(CardData {
            number_of_customers,
            number_of_invoices,
            total_paid_invoices: format_currency(totals.paid),
            total_pending_invoices: format_currency(totals.pending),
        })
    }

    /// One page (six rows) of invoices matching `query`, newest first.
    #[instrument(skip(self))]
    pub async fn fetch_filtered_invoices(
        &self,
        query: &str,
        current_page: u32,
    ) -> FacadeResult<Vec<InvoiceTableEntry>> {
        let rows = repo::filtered_invoices(&self.pool, query, current_page)
            .await
            .map_err(store_failure(INVOICES_ERR))?;
        Ok(rows
            .into_iter()
            .map(|row| InvoiceTableEntry {
                amount: format_currency(row.amount),
                id: row.id,
                customer_id: row.customer_id,
                name: row.name,
                email: row.email,
                image_url: row.image_url,
                date: row.date,
                status: row.status,
            })
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn fetch_invoices_pages(&self, query: &str) -> FacadeResult<i64> {
        let count = repo::count_filtered_invoices(&self.pool, query)
            .await
            .map_err(store_failure(INVOICE_PAGES_ERR))?;
        Ok(repo::page_count(count))
    }

    #[instrument(skip(self))]
    pub async fn fetch_invoice_by_id(&self, id: &str) -> FacadeResult<InvoiceForm> {
        let invoice = repo::invoice_by_id(&self.pool, id)
            .await
            .map_err(store_failure(INVOICE_ERR))?;
        let Some(invoice) = invoice else {
            error!(id, "Database Error: no invoice with this id");
            return Err(FacadeError::NotFound(INVOICE_NOT_FOUND));
        };
        Ok(InvoiceForm {
            amount: format_currency(invoice.amount),
            id: invoice.id,
            customer_id: invoice.customer_id,
            status: invoice.status,
            date: invoice.date,
        })
    }

    #[instrument(skip_all)]
    pub async fn fetch_customers(&self) -> FacadeResult<Vec<CustomerField>> {
        repo::customer_fields(&self.pool)
            .await
            .map_err(store_failure(CUSTOMERS_ERR))
    }

    #[instrument(skip(self))]
    pub async fn fetch_filtered_customers(
        &self,
        query: &str,
    ) -> FacadeResult<Vec<CustomerTableEntry>> {
        let rows = repo::filtered_customers(&self.pool, query)
            .await
            .map_err(store_failure(CUSTOMER_TABLE_ERR))?;
        Ok(rows
            .into_iter()
            .map(|row| CustomerTableEntry {
                total_pending: format_currency(row.total_pending),
                total_paid: format_currency(row.total_paid),
                id: row.id,
                name: row.name,
                email: row.email,
                image_url: row.image_url,
                total_invoices: row.total_invoices,
            })
            .collect())
    }

    /// Look up a user by email. Absence is `Ok(None)`: sign-in treats an
    /// unknown email as a normal outcome.
    #[instrument(skip_all)]
    pub async fn get_user(&self, email: &str) -> FacadeResult<Option<User>> {
        repo::user_by_email(&self.pool, email)
            .await
            .map_err(store_failure(USER_ERR))
    }
}
