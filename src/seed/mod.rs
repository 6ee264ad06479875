//! Bulk seeding of the dashboard tables.
//!
//! Each batch inserts its rows concurrently. A row that collides with an
//! existing key is skipped, so every batch can be re-run against a seeded
//! database. Any other row error is logged and recorded as
//! [`RowOutcome::Failed`] without aborting the rest of the batch.

pub mod placeholder;

use chrono::NaiveDate;
use futures::future::join_all;
use serde::Serialize;
use std::collections::HashMap;
use std::future::Future;
use thiserror::Error;
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::db::{repo, Pool};
use crate::model::{Customer, Invoice, InvoiceStatus, Revenue, User};
use crate::password::{hash_password_blocking, PasswordError};
use placeholder::{SeedCustomer, SeedInvoice, SeedRevenue, SeedUser};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to hash seed password: {0}")]
    Password(#[from] PasswordError),
}

/// Result of seeding a single row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome<T> {
    Inserted(T),
    /// The key already existed.
    Skipped,
    Failed,
}

impl<T> RowOutcome<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            RowOutcome::Inserted(v) => Some(v),
            RowOutcome::Skipped | RowOutcome::Failed => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchCounts {
    pub inserted: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl BatchCounts {
    pub fn of<T>(outcomes: &[RowOutcome<T>]) -> Self {
        outcomes.iter().fold(Self::default(), |mut acc, o| {
            match o {
                RowOutcome::Inserted(_) => acc.inserted += 1,
                RowOutcome::Skipped => acc.skipped += 1,
                RowOutcome::Failed => acc.failed += 1,
            }
            acc
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub users: BatchCounts,
    pub customers: BatchCounts,
    pub invoices: BatchCounts,
    pub revenue: BatchCounts,
}

impl SeedSummary {
    pub fn failed(&self) -> usize {
        self.users.failed + self.customers.failed + self.invoices.failed + self.revenue.failed
    }
}

async fn insert_row<T, F>(what: &'static str, insert: F) -> RowOutcome<T>
where
    F: Future<Output = anyhow::Result<Option<T>>>,
{
    match insert.await {
        Ok(Some(row)) => RowOutcome::Inserted(row),
        Ok(None) => RowOutcome::Skipped,
        Err(err) => {
            error!(?err, "Error inserting {}", what);
            RowOutcome::Failed
        }
    }
}

/// Deterministic id for a seed invoice, built from its fields. `occurrence`
/// separates identical rows: 0 for the first, 1 for the next copy, and so on.
pub fn seed_invoice_id(row: &SeedInvoice, occurrence: usize) -> String {
    let mut name = format!(
        "invoice:{}:{}:{}:{}",
        row.customer_id,
        row.date,
        row.amount,
        row.status.as_str()
    );
    if occurrence > 0 {
        name.push_str(&format!("#{}", occurrence));
    }
    Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes()).to_string()
}

/// Ids for a batch of seed invoices, unaffected by where each row sits.
pub fn seed_invoice_ids(rows: &[SeedInvoice]) -> Vec<String> {
    let mut seen: HashMap<(&str, &str, i64, InvoiceStatus), usize> = HashMap::new();
    rows.iter()
        .map(|row| {
            let occurrence = seen
                .entry((row.customer_id, row.date, row.amount, row.status))
                .or_insert(0);
            let id = seed_invoice_id(row, *occurrence);
            *occurrence += 1;
            id
        })
        .collect()
}

/// Hash every password first, then insert all users concurrently.
#[instrument(skip_all)]
pub async fn seed_users(
    pool: &Pool,
    rows: &[SeedUser],
) -> Result<Vec<RowOutcome<User>>, SeedError> {
    let hashed = join_all(
        rows.iter()
            .map(|u| hash_password_blocking(u.password.to_string())),
    )
    .await
    .into_iter()
    .collect::<Result<Vec<_>, _>>()?;

    let users: Vec<User> = rows
        .iter()
        .zip(hashed)
        .map(|(u, password)| User {
            id: u.id.to_string(),
            name: u.name.to_string(),
            email: u.email.to_string(),
            password,
        })
        .collect();

    let outcomes = join_all(
        users
            .iter()
            .map(|user| insert_row("user", repo::insert_user(pool, user))),
    )
    .await;
    info!(counts = ?BatchCounts::of(&outcomes), "Seeded users");
    Ok(outcomes)
}

#[instrument(skip_all)]
pub async fn seed_customers(pool: &Pool, rows: &[SeedCustomer]) -> Vec<RowOutcome<Customer>> {
    let customers: Vec<Customer> = rows
        .iter()
        .map(|c| Customer {
            id: c.id.to_string(),
            name: c.name.to_string(),
            email: c.email.to_string(),
            image_url: c.image_url.to_string(),
        })
        .collect();

    let outcomes = join_all(
        customers
            .iter()
            .map(|customer| insert_row("customer", repo::insert_customer(pool, customer))),
    )
    .await;
    info!(counts = ?BatchCounts::of(&outcomes), "Seeded customers");
    outcomes
}

#[instrument(skip_all)]
pub async fn seed_invoices(pool: &Pool, rows: &[SeedInvoice]) -> Vec<RowOutcome<Invoice>> {
    let ids = seed_invoice_ids(rows);
    let outcomes = join_all(rows.iter().zip(ids).map(|(row, id)| async move {
        let date = match NaiveDate::parse_from_str(row.date, "%Y-%m-%d") {
            Ok(date) => date,
            Err(err) => {
                error!(?err, date = row.date, "Error inserting invoice: bad date");
                return RowOutcome::Failed;
            }
        };
        let invoice = Invoice {
            id,
            customer_id: row.customer_id.to_string(),
            amount: row.amount,
            status: row.status,
            date,
        };
        insert_row("invoice", repo::insert_invoice(pool, &invoice)).await
    }))
    .await;
    info!(counts = ?BatchCounts::of(&outcomes), "Seeded invoices");
    outcomes
}

#[instrument(skip_all)]
pub async fn seed_revenue(pool: &Pool, rows: &[SeedRevenue]) -> Vec<RowOutcome<Revenue>> {
    let revenue: Vec<Revenue> = rows
        .iter()
        .map(|r| Revenue {
            month: r.month.to_string(),
            revenue: r.revenue,
        })
        .collect();

    let outcomes = join_all(
        revenue
            .iter()
            .map(|rev| insert_row("revenue", repo::insert_revenue(pool, rev))),
    )
    .await;
    info!(counts = ?BatchCounts::of(&outcomes), "Seeded revenue");
    outcomes
}

/// Seed every table from the placeholder data. Customers go in before
/// invoices because of the foreign key.
#[instrument(skip_all)]
pub async fn seed_all(pool: &Pool) -> Result<SeedSummary, SeedError> {
    let users = seed_users(pool, placeholder::USERS).await?;
    let customers = seed_customers(pool, placeholder::CUSTOMERS).await;
    let invoices = seed_invoices(pool, placeholder::INVOICES).await;
    let revenue = seed_revenue(pool, placeholder::REVENUE).await;

    Ok(SeedSummary {
        users: BatchCounts::of(&users),
        customers: BatchCounts::of(&customers),
        invoices: BatchCounts::of(&invoices),
        revenue: BatchCounts::of(&revenue),
    })
}
