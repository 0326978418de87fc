use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct CartItem {
    pub id: i64,
    pub user_id: i64,
    pub movie_id: i64,
    pub title: String,
    pub showtime: String,
    pub date: String,
}

#[derive(Validate, Debug, Clone, Deserialize)]
pub struct AddToCartRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(range(min = 1, message = "A valid movie id is required"))]
    pub movie_id: i64,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Showtime is required"))]
    pub showtime: String,
    #[validate(length(min = 1, message = "Date is required"))]
    pub date: String,
}

/// A ticket selection, independent of who holds it.
#[derive(Debug, Clone, PartialEq)]
pub struct TicketSelection {
    pub movie_id: i64,
    pub title: String,
    pub showtime: String,
    pub date: String,
}

impl From<&AddToCartRequest> for TicketSelection {
    fn from(request: &AddToCartRequest) -> Self {
        Self {
            movie_id: request.movie_id,
            title: request.title.clone(),
            showtime: request.showtime.clone(),
            date: request.date.clone(),
        }
    }
}
