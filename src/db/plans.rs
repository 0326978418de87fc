use sqlx::{Executor, Sqlite, SqlitePool};

use crate::core::config::PlanSeed;
use crate::models::plans::Plan;

/// Inserts every seed whose name is not taken yet. Existing plans are never
/// modified, since assignments may already reference them.
pub async fn seed_plans(pool: &SqlitePool, seeds: &[PlanSeed]) -> Result<u64, sqlx::Error> {
    let mut inserted = 0;

    for seed in seeds {
        let result = sqlx::query(
            r#"
            INSERT INTO plans (name, price, movie_limit)
            VALUES (?, ?, ?)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(&seed.name)
        .bind(seed.price)
        .bind(seed.movie_limit)
        .execute(pool)
        .await?;

        if result.rows_affected() > 0 {
            tracing::info!(plan = %seed.name, "seed plan inserted");
            inserted += 1;
        } else {
            tracing::debug!(plan = %seed.name, "seed plan already present");
        }
    }

    Ok(inserted)
}

pub async fn get_all_plans(pool: &SqlitePool) -> Result<Vec<Plan>, sqlx::Error> {
    sqlx::query_as::<_, Plan>(
        r#"
        SELECT id, name, price, movie_limit
        FROM plans
        ORDER BY price ASC, id ASC
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_plan_by_id<'e, E>(executor: E, plan_id: i64) -> Result<Option<Plan>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Plan>("SELECT id, name, price, movie_limit FROM plans WHERE id = ?")
        .bind(plan_id)
        .fetch_optional(executor)
        .await
}
