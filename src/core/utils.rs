use chrono::{Months, NaiveDateTime};

use super::AppError;

const DB_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Fixed-width UTC text so that string comparison in SQL is chronological.
pub fn to_db_timestamp(at: NaiveDateTime) -> String {
    at.format(DB_TIMESTAMP_FORMAT).to_string()
}

/// One calendar month later. Days past the end of the target month clamp to
/// its last day (Jan 31 -> Feb 28/29).
pub fn add_one_month(at: NaiveDateTime) -> Result<NaiveDateTime, AppError> {
    at.checked_add_months(Months::new(1))
        .ok_or_else(|| AppError::internal_error(format!("cannot add a month to {at}")))
}

/// True when the statement was rejected by a UNIQUE index.
pub fn is_unique_violation(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Database(db_error) => db_error.is_unique_violation(),
        _ => false,
    }
}
