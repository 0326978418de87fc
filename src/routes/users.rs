use crate::core::{AppError, AppSuccessResponse};
use crate::db::users;
use crate::models::users::{LoginRequest, RegisterRequest, UserProfile};

use actix_web::{get, post, web, HttpResponse, Result};
use sqlx::SqlitePool;
use validator::Validate;

#[tracing::instrument(name = "Register User", skip(pool, request), fields(username = %request.username))]
#[post("/register")]
pub async fn register(
    pool: web::Data<SqlitePool>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    let user = users::create_user(&pool, &request.username, &request.password).await?;

    Ok(HttpResponse::Created().json(AppSuccessResponse::new(
        UserProfile::from(user),
        "User registered successfully",
    )))
}

#[tracing::instrument(name = "User Login", skip(pool, request), fields(username = %request.username))]
#[post("/login")]
pub async fn login(
    pool: web::Data<SqlitePool>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    let user = users::get_user_by_username(&pool, &request.username)
        .await?
        .ok_or_else(|| AppError::unauthorized("Invalid username or password"))?;

    if !users::verify_password(&request.password, &user.password_hash)? {
        return Err(AppError::unauthorized("Invalid username or password"));
    }

    Ok(HttpResponse::Ok().json(AppSuccessResponse::new(
        UserProfile::from(user),
        "Login successful",
    )))
}

#[tracing::instrument(name = "Get User", skip(pool))]
#[get("/{username}")]
pub async fn get_user(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let username = path.into_inner();

    let user = users::get_user_by_username(&pool, &username)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok(HttpResponse::Ok().json(AppSuccessResponse::new(
        UserProfile::from(user),
        "User retrieved successfully",
    )))
}
