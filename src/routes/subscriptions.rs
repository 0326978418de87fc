use crate::core::{AppError, AppSuccessResponse};
use crate::db::{subscriptions, users};
use crate::models::subscriptions::SubscribeRequest;
use crate::services::PurchaseEngine;

use actix_web::{get, post, web, HttpResponse, Result};
use chrono::Utc;
use sqlx::SqlitePool;
use validator::Validate;

#[tracing::instrument(name = "Subscribe To Plan", skip(pool, request), fields(username = %request.username, plan_id = request.plan_id))]
#[post("/subscribe")]
pub async fn subscribe(
    pool: web::Data<SqlitePool>,
    request: web::Json<SubscribeRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;
    let user_id = users::require_user_id(&pool, &request.username).await?;

    let confirmation =
        subscriptions::subscribe(&pool, user_id, request.plan_id, Utc::now().naive_utc()).await?;
    let message = format!("Plan \"{}\" subscribed successfully", confirmation.plan_name);

    Ok(HttpResponse::Ok().json(AppSuccessResponse::new(confirmation, message)))
}

// `data` is null when no assignment covers the current time
#[tracing::instrument(name = "Get Active Plan", skip(pool))]
#[get("/active/{username}")]
pub async fn get_active_plan(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let user_id = users::require_user_id(&pool, &path).await?;

    let plan =
        subscriptions::resolve_active_plan(pool.get_ref(), user_id, Utc::now().naive_utc())
            .await?;

    Ok(HttpResponse::Ok().json(AppSuccessResponse::new(
        plan,
        "Active plan retrieved successfully",
    )))
}

#[tracing::instrument(name = "Get Quota Usage", skip(pool, engine))]
#[get("/usage/{username}")]
pub async fn get_quota_usage(
    pool: web::Data<SqlitePool>,
    engine: web::Data<PurchaseEngine>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let user_id = users::require_user_id(&pool, &path).await?;

    let snapshot = engine
        .quota_snapshot(user_id, Utc::now().naive_utc())
        .await?;

    Ok(HttpResponse::Ok().json(AppSuccessResponse::new(
        snapshot,
        "Quota usage retrieved successfully",
    )))
}
