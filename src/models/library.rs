use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Validate, Debug, Deserialize)]
pub struct MovieMarkRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(range(min = 1, message = "A valid movie id is required"))]
    pub movie_id: i64,
}

#[derive(Validate, Debug, Deserialize)]
pub struct RatingRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(range(min = 1, message = "A valid movie id is required"))]
    pub movie_id: i64,
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingOutcome {
    Created,
    Updated,
}

#[derive(Debug, Serialize)]
pub struct MovieIds {
    pub movie_ids: Vec<i64>,
}

#[derive(Debug, Serialize)]
pub struct MovieRating {
    pub movie_id: i64,
    pub rating: Option<i64>,
}
