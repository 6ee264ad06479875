use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};

use invoice_dashboard::config;
use invoice_dashboard::db;
use invoice_dashboard::Dashboard;

#[derive(Debug, Parser)]
#[command(author, version, about = "Check that the dashboard database is reachable")]
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

    let pool = match db::init_pool(&cfg.database_url(), 1).await {
        Ok(pool) => pool,
        Err(err) => {
            error!(?err, "Database connection error");
            return Err(err);
        }
    };
    let dashboard = Dashboard::new(pool);

    match dashboard.fetch_latest_invoices().await {
        Ok(latest) => {
            info!("Database connection successful!");
            for inv in &latest {
                info!(id = %inv.id, name = %inv.name, amount = %inv.amount, date = %inv.date, "latest invoice");
            }
        }
        Err(err) => error!(%err, "Database connection error"),
    }

    dashboard.close().await;
    Ok(())
}
