use sqlx::SqlitePool;

use crate::core::config::CatalogConfig;

pub mod cart;
pub mod library;
pub mod plans;
pub mod purchases;
pub mod subscriptions;
pub mod users;

/// Applies pending migrations and inserts any missing seed plans.
pub async fn prepare_database(
    pool: &SqlitePool,
    catalog: &CatalogConfig,
) -> Result<(), anyhow::Error> {
    sqlx::migrate!("./migrations").run(pool).await?;
    plans::seed_plans(pool, &catalog.plans).await?;
    Ok(())
}
