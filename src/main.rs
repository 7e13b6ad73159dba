use dotenvy::dotenv;
use sales_insights::config::{database, settings};
use sales_insights::errors::Result;
use sales_insights::api;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Resolve settings (config.toml plus environment overrides)
    let settings = settings::load().inspect_err(|e| error!("Failed to load settings: {e}"))?;

    // 4. Connect to the store and make sure the schema exists
    let db = database::connect(&settings)
        .await
        .inspect(|_| info!("Database connection established."))
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    database::ensure_tables(&db)
        .await
        .inspect_err(|e| error!("Failed to create tables: {e}"))?;

    // 5. Serve reports until the process is stopped
    api::serve(db, settings.port).await
}
