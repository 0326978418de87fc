use sqlx::{Executor, Sqlite, SqliteConnection, SqlitePool};

use crate::models::cart::{CartItem, TicketSelection};

// No duplicate or quota check: the cart only matters at purchase time.
pub async fn add_item(
    pool: &SqlitePool,
    user_id: i64,
    selection: &TicketSelection,
) -> Result<CartItem, sqlx::Error> {
    sqlx::query_as::<_, CartItem>(
        r#"
        INSERT INTO cart_items (user_id, movie_id, title, showtime, date)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id, user_id, movie_id, title, showtime, date
        "#,
    )
    .bind(user_id)
    .bind(selection.movie_id)
    .bind(&selection.title)
    .bind(&selection.showtime)
    .bind(&selection.date)
    .fetch_one(pool)
    .await
}

pub async fn get_cart_items<'e, E>(executor: E, user_id: i64) -> Result<Vec<CartItem>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, CartItem>(
        r#"
        SELECT id, user_id, movie_id, title, showtime, date
        FROM cart_items
        WHERE user_id = ?
        ORDER BY id ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(executor)
    .await
}

/// Returns `false` when no item had that id.
pub async fn remove_item(pool: &SqlitePool, item_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM cart_items WHERE id = ?")
        .bind(item_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Snapshot of the cart to be converted into purchases. Call inside the
/// same transaction as [`clear_cart`].
pub async fn drain_items(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Vec<CartItem>, sqlx::Error> {
    get_cart_items(conn, user_id).await
}

pub async fn clear_cart(conn: &mut SqliteConnection, user_id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM cart_items WHERE user_id = ?")
        .bind(user_id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}
