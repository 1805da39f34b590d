//! Bootstrap binary: prepares the order backend's database.
//!
//! Initializes tracing, loads `.env` and `config.toml`, connects to the
//! database, ensures the schema exists, and logs a short startup report. The
//! HTTP surface lives in a separate service; this binary only readies the
//! storage this crate operates on.

use dotenvy::dotenv;
use quick_orders::{
    config,
    core::{order, search::SearchParams},
    errors::Result,
};
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

    // 2. Load .env file; non-fatal, env vars can be set externally
    dotenv().ok();

    // 3. Load application settings
    let settings = config::settings::load_default_settings()?;
    info!(page_size = settings.page_size, "Loaded application settings.");

    // 4. Connect and ensure the schema exists
    let db = match &settings.database_url {
        Some(url) => sea_orm::Database::connect(url.as_str())
            .await
            .map_err(quick_orders::errors::Error::from)?,
        None => config::database::create_connection().await?,
    };
    config::database::create_tables(&db)
        .await
        .inspect(|_| info!("Database schema ensured."))
        .inspect_err(|e| error!("Failed to create tables: {e}"))?;

    // 5. Startup report
    let total = order::cache_total_sum(&db, &SearchParams::default()).await?;
    info!(cache_total = total, "Order backend ready.");

    Ok(())
}
