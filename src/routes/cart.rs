use crate::core::{AppError, AppSuccessResponse};
use crate::db::{cart, users};
use crate::models::cart::{AddToCartRequest, TicketSelection};

use actix_web::{delete, get, post, web, HttpResponse, Result};
use sqlx::SqlitePool;
use validator::Validate;

#[tracing::instrument(name = "Add To Cart", skip(pool, request), fields(username = %request.username, movie_id = request.movie_id))]
#[post("")]
pub async fn add_to_cart(
    pool: web::Data<SqlitePool>,
    request: web::Json<AddToCartRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;
    let user_id = users::require_user_id(&pool, &request.username).await?;

    let item = cart::add_item(&pool, user_id, &TicketSelection::from(&*request)).await?;

    Ok(HttpResponse::Created().json(AppSuccessResponse::new(
        item,
        "Ticket added to cart successfully",
    )))
}

#[tracing::instrument(name = "Get Cart", skip(pool))]
#[get("/{username}")]
pub async fn get_cart(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let user_id = users::require_user_id(&pool, &path).await?;

    let items = cart::get_cart_items(pool.get_ref(), user_id).await?;

    Ok(HttpResponse::Ok().json(AppSuccessResponse::new(
        items,
        "Cart retrieved successfully",
    )))
}

#[tracing::instrument(name = "Remove From Cart", skip(pool))]
#[delete("/{item_id}")]
pub async fn remove_from_cart(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let item_id = path.into_inner();

    if !cart::remove_item(&pool, item_id).await? {
        return Err(AppError::not_found("Ticket not found in cart"));
    }

    Ok(HttpResponse::Ok().json(AppSuccessResponse::new(
        serde_json::json!({ "item_id": item_id }),
        "Ticket removed from cart successfully",
    )))
}
