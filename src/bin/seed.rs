use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};

use invoice_dashboard::config;
use invoice_dashboard::db;
use invoice_dashboard::seed;

#[derive(Debug, Parser)]
#[command(author, version, about = "Seed the dashboard tables with placeholder data")]
struct Args {
    /// Path to YAML config file
    #[arg(long, default_value = "config.yaml")]
    config: PathBuf,
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

    let database_url = cfg.database_url();
    let pool = db::init_pool(&database_url, cfg.database.max_connections).await?;
    db::run_migrations(&pool).await?;

    info!(database_url = %database_url, "seeding database");
    let result = seed::seed_all(&pool).await;
    db::close(&pool).await;

    match result {
        Ok(summary) => {
            info!(
                users = ?summary.users,
                customers = ?summary.customers,
                invoices = ?summary.invoices,
                revenue = ?summary.revenue,
                "seeding finished"
            );
            if summary.failed() > 0 {
                error!(failed = summary.failed(), "some rows could not be seeded");
                std::process::exit(1);
            }
            Ok(())
        }
        Err(err) => {
            error!(?err, "An error occurred while attempting to seed the database");
            Err(err.into())
        }
    }
}
