use sqlx::SqlitePool;

use crate::core::{is_unique_violation, AppError};
use crate::models::library::RatingOutcome;

pub async fn add_favorite(pool: &SqlitePool, user_id: i64, movie_id: i64) -> Result<(), AppError> {
    sqlx::query("INSERT INTO favorite_movies (user_id, movie_id) VALUES (?, ?)")
        .bind(user_id)
        .bind(movie_id)
        .execute(pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::conflict("Movie is already in favorites")
            } else {
                AppError::db_error(e)
            }
        })?;

    Ok(())
}

/// Returns `false` when the movie was not a favorite.
pub async fn remove_favorite(
    pool: &SqlitePool,
    user_id: i64,
    movie_id: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM favorite_movies WHERE user_id = ? AND movie_id = ?")
        .bind(user_id)
        .bind(movie_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn get_favorites(pool: &SqlitePool, user_id: i64) -> Result<Vec<i64>, sqlx::Error> {
    sqlx::query_scalar("SELECT movie_id FROM favorite_movies WHERE user_id = ? ORDER BY id")
        .bind(user_id)
        .fetch_all(pool)
        .await
}

pub async fn mark_watched(pool: &SqlitePool, user_id: i64, movie_id: i64) -> Result<(), AppError> {
    sqlx::query("INSERT INTO watched_movies (user_id, movie_id) VALUES (?, ?)")
        .bind(user_id)
        .bind(movie_id)
        .execute(pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::conflict("Movie already marked as watched")
            } else {
                AppError::db_error(e)
            }
        })?;

    Ok(())
}

pub async fn get_watched(pool: &SqlitePool, user_id: i64) -> Result<Vec<i64>, sqlx::Error> {
    sqlx::query_scalar("SELECT movie_id FROM watched_movies WHERE user_id = ? ORDER BY id")
        .bind(user_id)
        .fetch_all(pool)
        .await
}

// Insert the rating, or replace it when the user already rated the movie
pub async fn rate_movie(
    pool: &SqlitePool,
    user_id: i64,
    movie_id: i64,
    rating: i64,
) -> Result<RatingOutcome, sqlx::Error> {
    let inserted = sqlx::query("INSERT INTO ratings (user_id, movie_id, rating) VALUES (?, ?, ?)")
        .bind(user_id)
        .bind(movie_id)
        .bind(rating)
        .execute(pool)
        .await;

    match inserted {
        Ok(_) => Ok(RatingOutcome::Created),
        Err(e) if is_unique_violation(&e) => {
            sqlx::query("UPDATE ratings SET rating = ? WHERE user_id = ? AND movie_id = ?")
                .bind(rating)
                .bind(user_id)
                .bind(movie_id)
                .execute(pool)
                .await?;
            Ok(RatingOutcome::Updated)
        }
        Err(e) => Err(e),
    }
}

pub async fn get_rating(
    pool: &SqlitePool,
    user_id: i64,
    movie_id: i64,
) -> Result<Option<i64>, sqlx::Error> {
    sqlx::query_scalar("SELECT rating FROM ratings WHERE user_id = ? AND movie_id = ?")
        .bind(user_id)
        .bind(movie_id)
        .fetch_optional(pool)
        .await
}
