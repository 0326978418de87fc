use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SubscriptionAssignment {
    pub id: i64,
    pub user_id: i64,
    pub plan_id: i64,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
}

/// The assignment currently governing a user's quota, joined to its plan.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct ActivePlan {
    pub assignment_id: i64,
    pub plan_id: i64,
    pub name: String,
    pub price: f64,
    pub movie_limit: i64,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
}

#[derive(Validate, Debug, Deserialize)]
pub struct SubscribeRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    pub plan_id: i64,
}

#[derive(Debug, Serialize)]
pub struct SubscriptionConfirmation {
    pub assignment_id: i64,
    pub plan_name: String,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuotaSnapshot {
    pub movie_limit: i64,
    pub purchased: i64,
    pub remaining: i64,
}

impl QuotaSnapshot {
    pub fn new(movie_limit: i64, purchased: i64) -> Self {
        Self {
            movie_limit,
            purchased,
            remaining: (movie_limit - purchased).max(0),
        }
    }
}
