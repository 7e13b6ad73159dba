//! One-shot importer: `load_sales <sales_data.csv>`.
//!
//! Drops and recreates the schema, then bulk-loads the CSV. Run while the API
//! server is stopped; a reload replaces the entire dataset.

use dotenvy::dotenv;
use sales_insights::config::{database, settings};
use sales_insights::errors::{Error, Result};
use sales_insights::loader;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    dotenv().ok();

    let csv_path = std::env::args().nth(1).ok_or_else(|| Error::Config {
        message: "Usage: load_sales <path-to-sales-csv>".to_string(),
    })?;

    let settings = settings::load().inspect_err(|e| error!("Failed to load settings: {e}"))?;
    let db = database::connect(&settings)
        .await
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;

    database::reset_tables(&db)
        .await
        .inspect_err(|e| error!("Failed to reset schema: {e}"))?;

    let report = loader::load_csv(&db, &csv_path)
        .await
        .inspect_err(|e| error!("Load aborted: {e}"))?;

    info!(
        customers = report.customers,
        products = report.products,
        orders = report.orders,
        "Import complete"
    );
    Ok(())
}
