use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use sqlx::{Executor, Sqlite, SqlitePool};

use crate::core::{is_unique_violation, AppError};
use crate::models::users::User;

pub async fn create_user(
    pool: &SqlitePool,
    username: &str,
    password: &str,
) -> Result<User, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| AppError::internal_error("Failed to hash password"))?
        .to_string();

    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (username, password_hash)
        VALUES (?, ?)
        RETURNING id, username, password_hash
        "#,
    )
    .bind(username)
    .bind(password_hash)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            AppError::conflict("Username already exists")
        } else {
            AppError::db_error(e)
        }
    })
}

pub async fn get_user_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "SELECT id, username, password_hash FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await
}

pub async fn find_user_id<'e, E>(executor: E, username: &str) -> Result<Option<i64>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_scalar("SELECT id FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(executor)
        .await
}

/// Resolves `username` or fails with a 404.
pub async fn require_user_id(pool: &SqlitePool, username: &str) -> Result<i64, AppError> {
    find_user_id(pool, username).await?.ok_or_else(|| {
        tracing::warn!(%username, "user not found");
        AppError::not_found("User not found")
    })
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|_| AppError::internal_error("Invalid password hash"))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
