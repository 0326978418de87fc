use crate::core::{AppError, AppSuccessResponse};
use crate::db::plans;

use actix_web::{get, web, HttpResponse, Result};
use sqlx::SqlitePool;

#[tracing::instrument(name = "Get Plans", skip(pool))]
#[get("")]
pub async fn get_plans(pool: web::Data<SqlitePool>) -> Result<HttpResponse, AppError> {
    let plans = plans::get_all_plans(&pool).await?;

    Ok(HttpResponse::Ok().json(AppSuccessResponse::new(
        plans,
        "Plans retrieved successfully",
    )))
}
