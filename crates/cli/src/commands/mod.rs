//! CLI command implementations.

pub mod migrate;
pub mod seed;
pub mod user;

use folio_server::db::{self, PgStore};

/// Connect to the database named by `FOLIO_DATABASE_URL` (or `DATABASE_URL`).
async fn connect() -> Result<PgStore, Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = folio_server::config::database_url_from_env()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&database_url).await?;
    Ok(PgStore::new(pool))
}
