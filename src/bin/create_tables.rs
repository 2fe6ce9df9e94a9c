//! Create the catalog tables in the configured database file.

use book_catalog::{config::AppConfig, db, logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init(&config.logging);

    let pool = db::connect(&config.database).await?;
    db::init_schema(&pool).await?;
    pool.close().await;

    tracing::info!("Tables created in {}", config.database.url);
    println!("Tables created successfully");

    Ok(())
}
