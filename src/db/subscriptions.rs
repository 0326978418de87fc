use chrono::NaiveDateTime;
use sqlx::{Executor, Sqlite, SqlitePool};

use crate::core::{add_one_month, to_db_timestamp, AppError};
use crate::db::plans;
use crate::models::subscriptions::{ActivePlan, SubscriptionAssignment, SubscriptionConfirmation};

// Assign a plan to a user for one calendar month starting at `at`.
//
// Overlapping assignments are left untouched; the resolver decides which one
// governs the quota.
pub async fn subscribe(
    pool: &SqlitePool,
    user_id: i64,
    plan_id: i64,
    at: NaiveDateTime,
) -> Result<SubscriptionConfirmation, AppError> {
    let plan = plans::get_plan_by_id(pool, plan_id)
        .await?
        .ok_or_else(|| AppError::not_found("Plan not found"))?;

    let end_date = add_one_month(at)?;

    let result = sqlx::query(
        r#"
        INSERT INTO user_plans (user_id, plan_id, start_date, end_date)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(user_id)
    .bind(plan.id)
    .bind(to_db_timestamp(at))
    .bind(to_db_timestamp(end_date))
    .execute(pool)
    .await?;

    let assignment_id = result.last_insert_rowid();
    tracing::info!(user_id, plan = %plan.name, assignment_id, %end_date, "plan assigned");

    Ok(SubscriptionConfirmation {
        assignment_id,
        plan_name: plan.name,
        start_date: at,
        end_date,
    })
}

// The assignment covering `at` with the furthest end date, joined to its plan.
pub async fn resolve_active_plan<'e, E>(
    executor: E,
    user_id: i64,
    at: NaiveDateTime,
) -> Result<Option<ActivePlan>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let at = to_db_timestamp(at);

    sqlx::query_as::<_, ActivePlan>(
        r#"
        SELECT
            up.id AS assignment_id,
            p.id AS plan_id,
            p.name,
            p.price,
            p.movie_limit,
            up.start_date,
            up.end_date
        FROM user_plans up
        JOIN plans p ON up.plan_id = p.id
        WHERE up.user_id = ?
          AND up.start_date <= ?
          AND up.end_date >= ?
        ORDER BY up.end_date DESC, up.id DESC
        LIMIT 1
        "#,
    )
    .bind(user_id)
    .bind(&at)
    .bind(&at)
    .fetch_optional(executor)
    .await
}

// Get the user's assignment history, latest end date first
pub async fn get_user_assignments(
    pool: &SqlitePool,
    user_id: i64,
) -> Result<Vec<SubscriptionAssignment>, sqlx::Error> {
    sqlx::query_as::<_, SubscriptionAssignment>(
        r#"
        SELECT id, user_id, plan_id, start_date, end_date
        FROM user_plans
        WHERE user_id = ?
        ORDER BY end_date DESC, id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}
