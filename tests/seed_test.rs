use argon2::{Argon2, PasswordHash, PasswordVerifier};
use invoice_dashboard::db::{self, Pool};
use invoice_dashboard::model::InvoiceStatus;
use invoice_dashboard::seed::placeholder::{self, SeedCustomer, SeedInvoice, SeedUser};
use invoice_dashboard::seed::{self, BatchCounts, RowOutcome};

async fn setup_pool() -> Pool {
    let pool = db::init_pool("sqlite::memory:", 1).await.unwrap();
    db::run_migrations(&pool).await.unwrap();
    pool
}

async fn count(pool: &Pool, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .unwrap()
}

#[tokio::test]
async fn seed_all_fills_every_table() {
    let pool = setup_pool().await;
    let summary = seed::seed_all(&pool).await.unwrap();

    assert_eq!(summary.users.inserted, placeholder::USERS.len());
    assert_eq!(summary.customers.inserted, placeholder::CUSTOMERS.len());
    assert_eq!(summary.invoices.inserted, placeholder::INVOICES.len());
    assert_eq!(summary.revenue.inserted, placeholder::REVENUE.len());
    assert_eq!(summary.failed(), 0);

    assert_eq!(count(&pool, "users").await, 1);
    assert_eq!(count(&pool, "customers").await, 6);
    assert_eq!(count(&pool, "invoices").await, 13);
    assert_eq!(count(&pool, "revenue").await, 12);
}

#[tokio::test]
async fn reseeding_skips_existing_rows() {
    let pool = setup_pool().await;
    seed::seed_all(&pool).await.unwrap();
    let again = seed::seed_all(&pool).await.unwrap();

    let all_skipped = |n: usize| BatchCounts {
        inserted: 0,
        skipped: n,
        failed: 0,
    };
    assert_eq!(again.users, all_skipped(1));
    assert_eq!(again.customers, all_skipped(6));
    assert_eq!(again.invoices, all_skipped(13));
    assert_eq!(again.revenue, all_skipped(12));
    assert_eq!(count(&pool, "invoices").await, 13);
}

#[tokio::test]
async fn user_passwords_are_hashed() {
    let pool = setup_pool().await;
    let outcomes = seed::seed_users(&pool, placeholder::USERS).await.unwrap();
    let user = outcomes.into_iter().next().unwrap().into_option().unwrap();
    assert_ne!(user.password, "123456");

    let stored: String = sqlx::query_scalar("SELECT password FROM users WHERE email = ?")
        .bind("user@nextmail.com")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(stored, user.password);
    let parsed = PasswordHash::new(&stored).unwrap();
    assert!(Argon2::default().verify_password(b"123456", &parsed).is_ok());
}

#[tokio::test]
async fn duplicate_user_email_is_skipped() {
    let pool = setup_pool().await;
    let rows = [
        SeedUser {
            id: "u-1",
            name: "First",
            email: "same@example.com",
            password: "pw-1",
        },
        SeedUser {
            id: "u-2",
            name: "Second",
            email: "same@example.com",
            password: "pw-2",
        },
    ];
    let outcomes = seed::seed_users(&pool, &rows).await.unwrap();
    let counts = BatchCounts::of(&outcomes);
    assert_eq!(counts.inserted, 1);
    assert_eq!(counts.skipped, 1);
    assert_eq!(count(&pool, "users").await, 1);
}

#[tokio::test]
async fn bad_invoice_rows_fail_alone() {
    let pool = setup_pool().await;
    let customers = [SeedCustomer {
        id: "c-1",
        name: "Known",
        email: "known@example.com",
        image_url: "/customers/known.png",
    }];
    seed::seed_customers(&pool, &customers).await;

    let invoices = [
        SeedInvoice {
            customer_id: "c-1",
            amount: 500,
            status: InvoiceStatus::Paid,
            date: "2024-01-01",
        },
        SeedInvoice {
            customer_id: "no-such-customer",
            amount: 700,
            status: InvoiceStatus::Pending,
            date: "2024-01-02",
        },
        SeedInvoice {
            customer_id: "c-1",
            amount: 900,
            status: InvoiceStatus::Pending,
            date: "not-a-date",
        },
    ];
    let outcomes = seed::seed_invoices(&pool, &invoices).await;

    assert!(matches!(outcomes[0], RowOutcome::Inserted(_)));
    assert_eq!(outcomes[1], RowOutcome::Failed);
    assert_eq!(outcomes[2], RowOutcome::Failed);
    let placeholders: Vec<bool> = outcomes
        .into_iter()
        .map(|o| o.into_option().is_some())
        .collect();
    assert_eq!(placeholders, vec![true, false, false]);
    assert_eq!(count(&pool, "invoices").await, 1);
}

#[tokio::test]
async fn revenue_reseed_keeps_first_value() {
    let pool = setup_pool().await;
    seed::seed_revenue(&pool, placeholder::REVENUE).await;
    let again = seed::seed_revenue(&pool, placeholder::REVENUE).await;
    assert!(again.iter().all(|o| *o == RowOutcome::Skipped));

    let jan: i64 = sqlx::query_scalar("SELECT revenue FROM revenue WHERE month = 'Jan'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(jan, 2000);
}
