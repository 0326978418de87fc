//! Quota-bounded conversion of a user's cart into purchase records.
//!
//! A purchase runs as one SQLite transaction that starts by write-locking the
//! user's row. Plan resolution, the quota check, the cart read, the ledger
//! inserts and the cart drain all happen under that lock, so two purchases for
//! the same user can never both pass the quota check against a stale count.

use std::fmt::{Display, Formatter};

use chrono::NaiveDateTime;
use sqlx::{SqliteConnection, SqlitePool};

use crate::core::{AppError, AppErrorType};
use crate::db::{cart, purchases, subscriptions};
use crate::models::purchases::PurchaseReceipt;
use crate::models::subscriptions::QuotaSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseStage {
    Idle,
    ResolvingPlan,
    CheckingQuota,
    ReadingCart,
    Committing,
    Committed,
    RolledBack,
}

impl PurchaseStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::ResolvingPlan => "resolving_plan",
            Self::CheckingQuota => "checking_quota",
            Self::ReadingCart => "reading_cart",
            Self::Committing => "committing",
            Self::Committed => "committed",
            Self::RolledBack => "rolled_back",
        }
    }
}

impl Display for PurchaseStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum PurchaseError {
    #[error("User not found")]
    UserNotFound,
    #[error("User has no active plan")]
    NoActivePlan,
    #[error("Purchase exceeds your plan limit ({purchased} purchased + {requested} in cart > {movie_limit})")]
    QuotaExceeded {
        movie_limit: i64,
        purchased: i64,
        requested: i64,
    },
    #[error("Cart is empty")]
    EmptyCart,
    #[error("storage fault while {stage}")]
    Storage {
        stage: PurchaseStage,
        #[source]
        source: sqlx::Error,
    },
}

impl PurchaseError {
    fn storage(stage: PurchaseStage) -> impl FnOnce(sqlx::Error) -> PurchaseError {
        move |source| PurchaseError::Storage { stage, source }
    }
}

impl From<PurchaseError> for AppError {
    fn from(error: PurchaseError) -> Self {
        match error {
            PurchaseError::UserNotFound => AppError::not_found(error.to_string()),
            PurchaseError::NoActivePlan
            | PurchaseError::QuotaExceeded { .. }
            | PurchaseError::EmptyCart => AppError::precondition_failed(error.to_string()),
            // already logged with its stage when the transaction rolled back
            PurchaseError::Storage { .. } => AppError {
                cause: Some(format!("{error}: {error:?}")),
                error_type: AppErrorType::DbError,
                message: None,
            },
        }
    }
}

#[derive(Clone)]
pub struct PurchaseEngine {
    pool: SqlitePool,
}

impl PurchaseEngine {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Remaining quota in the plan window covering `at`.
    #[tracing::instrument(name = "Quota snapshot", skip(self))]
    pub async fn quota_snapshot(
        &self,
        user_id: i64,
        at: NaiveDateTime,
    ) -> Result<QuotaSnapshot, PurchaseError> {
        let plan = subscriptions::resolve_active_plan(&self.pool, user_id, at)
            .await
            .map_err(PurchaseError::storage(PurchaseStage::ResolvingPlan))?
            .ok_or(PurchaseError::NoActivePlan)?;

        let purchased =
            purchases::count_in_window(&self.pool, user_id, plan.start_date, plan.end_date)
                .await
                .map_err(PurchaseError::storage(PurchaseStage::CheckingQuota))?;

        Ok(QuotaSnapshot::new(plan.movie_limit, purchased))
    }

    /// Converts the whole cart into purchases stamped `at`, or changes
    /// nothing. Safe to retry after any error.
    #[tracing::instrument(name = "Purchase cart", skip(self), fields(stage = %PurchaseStage::Idle))]
    pub async fn purchase(
        &self,
        user_id: i64,
        at: NaiveDateTime,
    ) -> Result<PurchaseReceipt, PurchaseError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(PurchaseError::storage(PurchaseStage::Idle))?;

        match Self::run_stages(&mut tx, user_id, at).await {
            Ok(receipt) => {
                tx.commit()
                    .await
                    .map_err(PurchaseError::storage(PurchaseStage::Committing))?;
                enter(PurchaseStage::Committed);
                tracing::info!(
                    purchased = receipt.purchased.len(),
                    skipped = receipt.skipped_duplicates.len(),
                    remaining = receipt.remaining,
                    "purchase committed"
                );
                Ok(receipt)
            }
            Err(error) => {
                if let Err(rollback_error) = tx.rollback().await {
                    tracing::error!(
                        error.cause_chain = ?rollback_error,
                        error.message = %rollback_error,
                        "rollback failed"
                    );
                }
                enter(PurchaseStage::RolledBack);
                match &error {
                    PurchaseError::Storage { .. } => tracing::error!(
                        error.cause_chain = ?error,
                        error.message = %error,
                        "purchase rolled back"
                    ),
                    _ => tracing::warn!(error.message = %error, "purchase rejected"),
                }
                Err(error)
            }
        }
    }

    async fn run_stages(
        conn: &mut SqliteConnection,
        user_id: i64,
        at: NaiveDateTime,
    ) -> Result<PurchaseReceipt, PurchaseError> {
        enter(PurchaseStage::ResolvingPlan);
        lock_user(&mut *conn, user_id).await?;
        let plan = subscriptions::resolve_active_plan(&mut *conn, user_id, at)
            .await
            .map_err(PurchaseError::storage(PurchaseStage::ResolvingPlan))?
            .ok_or(PurchaseError::NoActivePlan)?;

        enter(PurchaseStage::CheckingQuota);
        let purchased =
            purchases::count_in_window(&mut *conn, user_id, plan.start_date, plan.end_date)
                .await
                .map_err(PurchaseError::storage(PurchaseStage::CheckingQuota))?;
        let items = cart::drain_items(&mut *conn, user_id)
            .await
            .map_err(PurchaseError::storage(PurchaseStage::CheckingQuota))?;
        let requested = items.len() as i64;
        if purchased + requested > plan.movie_limit {
            return Err(PurchaseError::QuotaExceeded {
                movie_limit: plan.movie_limit,
                purchased,
                requested,
            });
        }

        enter(PurchaseStage::ReadingCart);
        if items.is_empty() {
            return Err(PurchaseError::EmptyCart);
        }

        enter(PurchaseStage::Committing);
        let outcome = purchases::commit(&mut *conn, user_id, &items, at)
            .await
            .map_err(PurchaseError::storage(PurchaseStage::Committing))?;
        cart::clear_cart(&mut *conn, user_id)
            .await
            .map_err(PurchaseError::storage(PurchaseStage::Committing))?;

        let snapshot = QuotaSnapshot::new(
            plan.movie_limit,
            purchased + outcome.inserted.len() as i64,
        );

        Ok(PurchaseReceipt {
            purchased: outcome.inserted,
            skipped_duplicates: outcome.skipped_duplicates,
            remaining: snapshot.remaining,
        })
    }
}

/// Takes the database write lock through the user's row, which stands in for
/// `SELECT ... FOR UPDATE`. Concurrent purchases block here on the busy
/// timeout until the holder commits or rolls back.
async fn lock_user(conn: &mut SqliteConnection, user_id: i64) -> Result<(), PurchaseError> {
    let result = sqlx::query("UPDATE users SET username = username WHERE id = ?")
        .bind(user_id)
        .execute(conn)
        .await
        .map_err(PurchaseError::storage(PurchaseStage::ResolvingPlan))?;

    if result.rows_affected() == 0 {
        return Err(PurchaseError::UserNotFound);
    }
    Ok(())
}

fn enter(stage: PurchaseStage) {
    tracing::Span::current().record("stage", stage.as_str());
    tracing::debug!(%stage, "purchase stage");
}
