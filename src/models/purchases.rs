use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct PurchaseRecord {
    pub movie_id: i64,
    pub title: String,
    pub showtime: String,
    pub date: String,
    pub purchase_date: NaiveDateTime,
}

#[derive(Validate, Debug, Deserialize)]
pub struct PurchaseRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
}

/// What a single commit wrote, split by whether the movie was new.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CommitOutcome {
    pub inserted: Vec<i64>,
    pub skipped_duplicates: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurchaseReceipt {
    pub purchased: Vec<i64>,
    pub skipped_duplicates: Vec<i64>,
    pub remaining: i64,
}
