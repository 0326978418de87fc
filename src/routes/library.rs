use crate::core::{AppError, AppSuccessResponse};
use crate::db::{library, users};
use crate::models::library::{MovieIds, MovieMarkRequest, MovieRating, RatingOutcome, RatingRequest};

use actix_web::{delete, get, post, web, HttpResponse, Result};
use sqlx::SqlitePool;
use validator::Validate;

#[tracing::instrument(name = "Add Favorite", skip(pool, request), fields(username = %request.username, movie_id = request.movie_id))]
#[post("")]
pub async fn add_favorite(
    pool: web::Data<SqlitePool>,
    request: web::Json<MovieMarkRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;
    let user_id = users::require_user_id(&pool, &request.username).await?;

    library::add_favorite(&pool, user_id, request.movie_id).await?;

    Ok(HttpResponse::Ok().json(AppSuccessResponse::new(
        serde_json::json!({ "movie_id": request.movie_id }),
        "Movie added to favorites successfully",
    )))
}

#[tracing::instrument(name = "Remove Favorite", skip(pool, request), fields(username = %request.username, movie_id = request.movie_id))]
#[delete("")]
pub async fn remove_favorite(
    pool: web::Data<SqlitePool>,
    request: web::Json<MovieMarkRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;
    let user_id = users::require_user_id(&pool, &request.username).await?;

    if !library::remove_favorite(&pool, user_id, request.movie_id).await? {
        return Err(AppError::not_found("Movie not found in favorites"));
    }

    Ok(HttpResponse::Ok().json(AppSuccessResponse::new(
        serde_json::json!({ "movie_id": request.movie_id }),
        "Movie removed from favorites successfully",
    )))
}

#[tracing::instrument(name = "Get Favorites", skip(pool))]
#[get("/{username}")]
pub async fn get_favorites(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let user_id = users::require_user_id(&pool, &path).await?;
    let movie_ids = library::get_favorites(&pool, user_id).await?;

    Ok(HttpResponse::Ok().json(AppSuccessResponse::new(
        MovieIds { movie_ids },
        "Favorites retrieved successfully",
    )))
}

#[tracing::instrument(name = "Mark Watched", skip(pool, request), fields(username = %request.username, movie_id = request.movie_id))]
#[post("")]
pub async fn mark_watched(
    pool: web::Data<SqlitePool>,
    request: web::Json<MovieMarkRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;
    let user_id = users::require_user_id(&pool, &request.username).await?;

    library::mark_watched(&pool, user_id, request.movie_id).await?;

    Ok(HttpResponse::Ok().json(AppSuccessResponse::new(
        serde_json::json!({ "movie_id": request.movie_id }),
        "Movie marked as watched",
    )))
}

#[tracing::instrument(name = "Get Watched", skip(pool))]
#[get("/{username}")]
pub async fn get_watched(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let user_id = users::require_user_id(&pool, &path).await?;
    let movie_ids = library::get_watched(&pool, user_id).await?;

    Ok(HttpResponse::Ok().json(AppSuccessResponse::new(
        MovieIds { movie_ids },
        "Watched movies retrieved successfully",
    )))
}

#[tracing::instrument(name = "Rate Movie", skip(pool, request), fields(username = %request.username, movie_id = request.movie_id))]
#[post("")]
pub async fn rate_movie(
    pool: web::Data<SqlitePool>,
    request: web::Json<RatingRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;
    let user_id = users::require_user_id(&pool, &request.username).await?;

    let outcome = library::rate_movie(&pool, user_id, request.movie_id, request.rating).await?;
    let message = match outcome {
        RatingOutcome::Created => "Rating recorded successfully",
        RatingOutcome::Updated => "Rating updated successfully",
    };

    Ok(HttpResponse::Ok().json(AppSuccessResponse::new(
        MovieRating {
            movie_id: request.movie_id,
            rating: Some(request.rating),
        },
        message,
    )))
}

#[tracing::instrument(name = "Get Rating", skip(pool))]
#[get("/{username}/{movie_id}")]
pub async fn get_rating(
    pool: web::Data<SqlitePool>,
    path: web::Path<(String, i64)>,
) -> Result<HttpResponse, AppError> {
    let (username, movie_id) = path.into_inner();
    let user_id = users::require_user_id(&pool, &username).await?;

    let rating = library::get_rating(&pool, user_id, movie_id).await?;

    Ok(HttpResponse::Ok().json(AppSuccessResponse::new(
        MovieRating { movie_id, rating },
        "Rating retrieved successfully",
    )))
}
