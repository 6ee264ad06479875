use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use tracing::error;

use invoice_dashboard::config;
use invoice_dashboard::db;
use invoice_dashboard::{Dashboard, FacadeError};

#[derive(Debug, Parser)]
#[command(author, version, about = "Query the invoices dashboard and print JSON")]
struct Args {
    /// Path to YAML config file
    #[arg(long, default_value = "config.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Monthly revenue snapshots
    Revenue,
    /// The five most recent invoices
    Latest,
    /// Invoice/customer counts and paid/pending totals
    Cards,
    /// One page of invoices matching a search term
    Invoices {
        #[arg(long, default_value = "")]
        query: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Number of invoice pages for a search term
    Pages {
        #[arg(long, default_value = "")]
        query: String,
    },
    /// A single invoice
    Invoice { id: String },
    /// All customers (id and name)
    Customers,
    /// Customers matching a search term, with invoice totals
    CustomerTable {
        #[arg(long, default_value = "")]
        query: String,
    },
    /// A user by email
    User { email: String },
}

fn print_json<T: Serialize>(out: &mut impl Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

async fn run(dashboard: &Dashboard, command: Command, out: &mut impl Write) -> Result<()> {
    match command {
        Command::Revenue => print_json(out, &dashboard.fetch_revenue().await?),
        Command::Latest => print_json(out, &dashboard.fetch_latest_invoices().await?),
        Command::Cards => print_json(out, &dashboard.fetch_card_data().await?),
        Command::Invoices { query, page } => {
            print_json(out, &dashboard.fetch_filtered_invoices(&query, page).await?)
        }
        Command::Pages { query } => print_json(out, &dashboard.fetch_invoices_pages(&query).await?),
        Command::Invoice { id } => print_json(out, &dashboard.fetch_invoice_by_id(&id).await?),
        Command::Customers => print_json(out, &dashboard.fetch_customers().await?),
        Command::CustomerTable { query } => {
            print_json(out, &dashboard.fetch_filtered_customers(&query).await?)
        }
        Command::User { email } => {
            // Never print the password hash.
            let user = dashboard.get_user(&email).await?.map(|u| {
                serde_json::json!({ "id": u.id, "name": u.name, "email": u.email })
            });
            print_json(out, &user)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();

    let args = Args::parse();
    let cfg = config::load(Some(&args.config))?;
    cfg.ensure_dirs()?;

    let pool = db::init_pool(&cfg.database_url(), cfg.database.max_connections).await?;
    db::run_migrations(&pool).await?;
    let dashboard = Dashboard::new(pool);

    let result = run(&dashboard, args.command, &mut std::io::stdout().lock()).await;
    dashboard.close().await;

    if let Err(err) = result {
        // Facade errors carry only their fixed message; the cause is already logged.
        if err.downcast_ref::<FacadeError>().is_none() {
            error!(?err, "failed to render output");
        }
        eprintln!("{}", err);
        std::process::exit(1);
    }
    Ok(())
}
