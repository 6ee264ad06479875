use super::model::{
    CustomerField, CustomerTableRow, InvoiceTableRow, LatestInvoiceRow, StatusTotals,
};
use super::Pool;
use crate::model::{Customer, Invoice, InvoiceStatus, Revenue, User};
use anyhow::{anyhow, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tracing::instrument;

pub const ITEMS_PER_PAGE: i64 = 6;
pub const LATEST_INVOICES: i64 = 5;

/// OR of the five invoice search conditions; bind the LIKE pattern once per `?`.
/// Names and emails are matched on their stored lowercase copies.
const INVOICE_SEARCH: &str = "c.name_folded LIKE ? ESCAPE '\\' \
     OR c.email_folded LIKE ? ESCAPE '\\' \
     OR CAST(i.amount AS TEXT) LIKE ? ESCAPE '\\' \
     OR i.date LIKE ? ESCAPE '\\' \
     OR i.status LIKE ? ESCAPE '\\'";
const INVOICE_SEARCH_BINDS: usize = 5;

/// Case folding applied to searchable text, both when stored and when queried.
pub fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

/// Build a case-insensitive "contains" pattern, matching `query` literally.
pub fn contains_pattern(query: &str) -> String {
    let folded = fold_case(query);
    let mut out = String::with_capacity(folded.len() + 2);
    out.push('%');
    for ch in folded.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('%');
    out
}

/// Offset for a 1-based page; pages below 1 read as the first page.
pub fn page_offset(page: u32) -> i64 {
    i64::from(page.max(1) - 1) * ITEMS_PER_PAGE
}

/// Number of pages needed for `count` rows.
pub fn page_count(count: i64) -> i64 {
    if count <= 0 {
        return 0;
    }
    (count + ITEMS_PER_PAGE - 1) / ITEMS_PER_PAGE
}

fn parse_status(row: &SqliteRow) -> Result<InvoiceStatus> {
    let raw: String = row.try_get("status")?;
    InvoiceStatus::parse_status(&raw).ok_or_else(|| anyhow!("unknown invoice status {}", raw))
}

#[instrument(skip_all)]
pub async fn all_revenue(pool: &Pool) -> Result<Vec<Revenue>> {
    let rows = sqlx::query("SELECT month, revenue FROM revenue")
        .fetch_all(pool)
        .await?;
    rows.into_iter()
        .map(|row| {
            Ok(Revenue {
                month: row.try_get("month")?,
                revenue: row.try_get("revenue")?,
            })
        })
        .collect()
}

#[instrument(skip_all)]
pub async fn latest_invoices(pool: &Pool) -> Result<Vec<LatestInvoiceRow>> {
    let rows = sqlx::query(
        "SELECT i.id, i.amount, i.date, c.name, c.image_url, c.email \
         FROM invoices i \
         JOIN customers c ON i.customer_id = c.id \
         ORDER BY i.date DESC, i.id ASC \
         LIMIT ?",
    )
    .bind(LATEST_INVOICES)
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(|row| {
            Ok(LatestInvoiceRow {
                id: row.try_get("id")?,
                name: row.try_get("name")?,
                image_url: row.try_get("image_url")?,
                email: row.try_get("email")?,
                amount: row.try_get("amount")?,
                date: row.try_get("date")?,
            })
        })
        .collect()
}

#[instrument(skip_all)]
pub async fn count_invoices(pool: &Pool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM invoices")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

#[instrument(skip_all)]
pub async fn count_customers(pool: &Pool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

#[instrument(skip_all)]
pub async fn invoice_status_totals(pool: &Pool) -> Result<StatusTotals> {
    let row = sqlx::query(
        "SELECT \
            COALESCE(SUM(CASE WHEN status = 'paid' THEN amount ELSE 0 END), 0) AS paid, \
            COALESCE(SUM(CASE WHEN status = 'pending' THEN amount ELSE 0 END), 0) AS pending \
         FROM invoices \
         WHERE status IN ('paid', 'pending')",
    )
    .fetch_one(pool)
    .await?;
    Ok(StatusTotals {
        paid: row.try_get("paid")?,
        pending: row.try_get("pending")?,
    })
}

#[instrument(skip_all)]
pub async fn filtered_invoices(pool: &Pool, query: &str, page: u32) -> Result<Vec<InvoiceTableRow>> {
    let sql = format!(
        "SELECT i.id, i.customer_id, i.amount, i.date, i.status, c.name, c.email, c.image_url \
         FROM invoices i \
         JOIN customers c ON i.customer_id = c.id \
         WHERE {} \
         ORDER BY i.date DESC, i.id ASC \
         LIMIT ? OFFSET ?",
        INVOICE_SEARCH
    );
    let pattern = contains_pattern(query);
    let mut q = sqlx::query(&sql);
    for _ in 0..INVOICE_SEARCH_BINDS {
        q = q.bind(pattern.clone());
    }
    let rows = q
        .bind(ITEMS_PER_PAGE)
        .bind(page_offset(page))
        .fetch_all(pool)
        .await?;

    rows.into_iter()
        .map(|row| {
            Ok(InvoiceTableRow {
                status: parse_status(&row)?,
                id: row.try_get("id")?,
                customer_id: row.try_get("customer_id")?,
                name: row.try_get("name")?,
                email: row.try_get("email")?,
                image_url: row.try_get("image_url")?,
                date: row.try_get("date")?,
                amount: row.try_get("amount")?,
            })
        })
        .collect()
}

#[instrument(skip_all)]
pub async fn count_filtered_invoices(pool: &Pool, query: &str) -> Result<i64> {
    let sql = format!(
        "SELECT COUNT(*) \
         FROM invoices i \
         JOIN customers c ON i.customer_id = c.id \
         WHERE {}",
        INVOICE_SEARCH
    );
    let pattern = contains_pattern(query);
    let mut q = sqlx::query_scalar::<_, i64>(&sql);
    for _ in 0..INVOICE_SEARCH_BINDS {
        q = q.bind(pattern.clone());
    }
    Ok(q.fetch_one(pool).await?)
}

#[instrument(skip_all)]
pub async fn invoice_by_id(pool: &Pool, id: &str) -> Result<Option<Invoice>> {
    let row = sqlx::query(
        "SELECT id, customer_id, amount, status, date FROM invoices WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };
    Ok(Some(Invoice {
        status: parse_status(&row)?,
        id: row.try_get("id")?,
        customer_id: row.try_get("customer_id")?,
        amount: row.try_get("amount")?,
        date: row.try_get("date")?,
    }))
}

#[instrument(skip_all)]
pub async fn customer_fields(pool: &Pool) -> Result<Vec<CustomerField>> {
    let rows = sqlx::query("SELECT id, name FROM customers ORDER BY name ASC")
        .fetch_all(pool)
        .await?;
    rows.into_iter()
        .map(|row| {
            Ok(CustomerField {
                id: row.try_get("id")?,
                name: row.try_get("name")?,
            })
        })
        .collect()
}

#[instrument(skip_all)]
pub async fn filtered_customers(pool: &Pool, query: &str) -> Result<Vec<CustomerTableRow>> {
    let pattern = contains_pattern(query);
    let rows = sqlx::query(
        "SELECT c.id, c.name, c.email, c.image_url, \
            COUNT(i.id) AS total_invoices, \
            COALESCE(SUM(CASE WHEN i.status = 'pending' THEN i.amount ELSE 0 END), 0) AS total_pending, \
            COALESCE(SUM(CASE WHEN i.status = 'paid' THEN i.amount ELSE 0 END), 0) AS total_paid \
         FROM customers c \
         LEFT JOIN invoices i ON c.id = i.customer_id \
         WHERE c.name_folded LIKE ? ESCAPE '\\' OR c.email_folded LIKE ? ESCAPE '\\' \
         GROUP BY c.id, c.name, c.email, c.image_url \
         ORDER BY c.name ASC",
    )
    .bind(&pattern)
    .bind(&pattern)
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(|row| {
            Ok(CustomerTableRow {
                id: row.try_get("id")?,
                name: row.try_get("name")?,
                email: row.try_get("email")?,
                image_url: row.try_get("image_url")?,
                total_invoices: row.try_get("total_invoices")?,
                total_pending: row.try_get("total_pending")?,
                total_paid: row.try_get("total_paid")?,
            })
        })
        .collect()
}

#[instrument(skip_all)]
pub async fn user_by_email(pool: &Pool, email: &str) -> Result<Option<User>> {
    let row = sqlx::query("SELECT id, name, email, password FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await?;
    let Some(row) = row else {
        return Ok(None);
    };
    Ok(Some(User {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        password: row.try_get("password")?,
    }))
}

// Inserts below skip rows that hit a uniqueness conflict: `Ok(None)` means
// the row already existed.

#[instrument(skip_all)]
pub async fn insert_user(pool: &Pool, user: &User) -> Result<Option<User>> {
    let inserted = sqlx::query(
        "INSERT INTO users (id, name, email, password) VALUES (?, ?, ?, ?) \
         ON CONFLICT DO NOTHING RETURNING id",
    )
    .bind(&user.id)
    .bind(&user.name)
    .bind(&user.email)
    .bind(&user.password)
    .fetch_optional(pool)
    .await?;
    Ok(inserted.map(|_| user.clone()))
}

#[instrument(skip_all)]
pub async fn insert_customer(pool: &Pool, customer: &Customer) -> Result<Option<Customer>> {
    let inserted = sqlx::query(
        "INSERT INTO customers (id, name, email, image_url, name_folded, email_folded) \
         VALUES (?, ?, ?, ?, ?, ?) \
         ON CONFLICT DO NOTHING RETURNING id",
    )
    .bind(&customer.id)
    .bind(&customer.name)
    .bind(&customer.email)
    .bind(&customer.image_url)
    .bind(fold_case(&customer.name))
    .bind(fold_case(&customer.email))
    .fetch_optional(pool)
    .await?;
    Ok(inserted.map(|_| customer.clone()))
}

#[instrument(skip_all)]
pub async fn insert_invoice(pool: &Pool, invoice: &Invoice) -> Result<Option<Invoice>> {
    let inserted = sqlx::query(
        "INSERT INTO invoices (id, customer_id, amount, status, date) VALUES (?, ?, ?, ?, ?) \
         ON CONFLICT DO NOTHING RETURNING id",
    )
    .bind(&invoice.id)
    .bind(&invoice.customer_id)
    .bind(invoice.amount)
    .bind(invoice.status.as_str())
    .bind(invoice.date)
    .fetch_optional(pool)
    .await?;
    Ok(inserted.map(|_| invoice.clone()))
}

#[instrument(skip_all)]
pub async fn insert_revenue(pool: &Pool, revenue: &Revenue) -> Result<Option<Revenue>> {
    let inserted = sqlx::query(
        "INSERT INTO revenue (month, revenue) VALUES (?, ?) \
         ON CONFLICT DO NOTHING RETURNING month",
    )
    .bind(&revenue.month)
    .bind(revenue.revenue)
    .fetch_optional(pool)
    .await?;
    Ok(inserted.map(|_| revenue.clone()))
}
