use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Plan {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub movie_limit: i64,
}
