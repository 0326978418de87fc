use chrono::NaiveDateTime;
use sqlx::{Executor, Sqlite, SqliteConnection};

use crate::core::to_db_timestamp;
use crate::models::cart::CartItem;
use crate::models::purchases::{CommitOutcome, PurchaseRecord};

/// Purchases whose `purchase_date` lies in `[window_start, window_end]`.
pub async fn count_in_window<'e, E>(
    executor: E,
    user_id: i64,
    window_start: NaiveDateTime,
    window_end: NaiveDateTime,
) -> Result<i64, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM purchased_movies
        WHERE user_id = ?
          AND purchase_date >= ?
          AND purchase_date <= ?
        "#,
    )
    .bind(user_id)
    .bind(to_db_timestamp(window_start))
    .bind(to_db_timestamp(window_end))
    .fetch_one(executor)
    .await
}

/// Writes `items` as purchase records stamped `purchased_at`.
///
/// A movie the user already owns is skipped rather than failing the batch;
/// any other error is returned immediately and the caller is expected to roll
/// back the surrounding transaction.
pub async fn commit(
    conn: &mut SqliteConnection,
    user_id: i64,
    items: &[CartItem],
    purchased_at: NaiveDateTime,
) -> Result<CommitOutcome, sqlx::Error> {
    let purchase_date = to_db_timestamp(purchased_at);
    let mut outcome = CommitOutcome::default();

    for item in items {
        let result = sqlx::query(
            r#"
            INSERT INTO purchased_movies (user_id, movie_id, title, showtime, date, purchase_date)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT (user_id, movie_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(item.movie_id)
        .bind(&item.title)
        .bind(&item.showtime)
        .bind(&item.date)
        .bind(&purchase_date)
        .execute(&mut *conn)
        .await?;

        if result.rows_affected() == 0 {
            tracing::warn!(user_id, movie_id = item.movie_id, "movie already purchased, skipping");
            outcome.skipped_duplicates.push(item.movie_id);
        } else {
            outcome.inserted.push(item.movie_id);
        }
    }

    Ok(outcome)
}

pub async fn list_purchased<'e, E>(
    executor: E,
    user_id: i64,
) -> Result<Vec<PurchaseRecord>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, PurchaseRecord>(
        r#"
        SELECT movie_id, title, showtime, date, purchase_date
        FROM purchased_movies
        WHERE user_id = ?
        ORDER BY purchase_date ASC, id ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(executor)
    .await
}
