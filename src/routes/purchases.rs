use crate::core::{AppError, AppSuccessResponse};
use crate::db::{purchases, users};
use crate::models::purchases::PurchaseRequest;
use crate::services::PurchaseEngine;

use actix_web::{get, post, web, HttpResponse, Result};
use chrono::Utc;
use sqlx::SqlitePool;
use validator::Validate;

#[tracing::instrument(name = "Purchase Cart", skip(pool, engine, request), fields(username = %request.username))]
#[post("")]
pub async fn purchase(
    pool: web::Data<SqlitePool>,
    engine: web::Data<PurchaseEngine>,
    request: web::Json<PurchaseRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;
    let user_id = users::require_user_id(&pool, &request.username).await?;

    let receipt = engine.purchase(user_id, Utc::now().naive_utc()).await?;

    Ok(HttpResponse::Ok().json(AppSuccessResponse::new(
        receipt,
        "Purchase completed successfully",
    )))
}

#[tracing::instrument(name = "Get Purchased Movies", skip(pool))]
#[get("/{username}")]
pub async fn get_purchased(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let user_id = users::require_user_id(&pool, &path).await?;

    let records = purchases::list_purchased(pool.get_ref(), user_id).await?;

    Ok(HttpResponse::Ok().json(AppSuccessResponse::new(
        records,
        "Purchased movies retrieved successfully",
    )))
}
