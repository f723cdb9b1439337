//! PostgreSQL implementation of the setup repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewSetupCompletion, SetupStatus, ShopDomain};
use crate::domain::repositories::SetupRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct SetupRow {
    shop: String,
    stripe_account_id: String,
    completed_at: DateTime<Utc>,
}

impl From<SetupRow> for SetupStatus {
    fn from(row: SetupRow) -> Self {
        Self {
            shop: ShopDomain::from_trusted(row.shop),
            stripe_account_id: row.stripe_account_id,
            completed_at: row.completed_at,
        }
    }
}

/// PostgreSQL repository for per-shop onboarding completion (`shop_setups`).
pub struct PgSetupRepository {
    pool: Arc<PgPool>,
}

impl PgSetupRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SetupRepository for PgSetupRepository {
    async fn find(&self, shop: &ShopDomain) -> Result<Option<SetupStatus>, AppError> {
        let row = sqlx::query_as::<_, SetupRow>(
            r#"
            SELECT shop, stripe_account_id, completed_at
            FROM shop_setups
            WHERE shop = $1
            "#,
        )
        .bind(shop.as_str())
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(SetupStatus::from))
    }

    async fn mark_complete(
        &self,
        completion: NewSetupCompletion,
    ) -> Result<SetupStatus, AppError> {
        let row = sqlx::query_as::<_, SetupRow>(
            r#"
            INSERT INTO shop_setups (shop, stripe_account_id)
            VALUES ($1, $2)
            ON CONFLICT (shop) DO UPDATE
            SET stripe_account_id = EXCLUDED.stripe_account_id,
                completed_at = NOW()
            RETURNING shop, stripe_account_id, completed_at
            "#,
        )
        .bind(completion.shop.as_str())
        .bind(&completion.stripe_account_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn reset(&self, shop: &ShopDomain) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM shop_setups WHERE shop = $1")
            .bind(shop.as_str())
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self) -> Result<Vec<SetupStatus>, AppError> {
        let rows = sqlx::query_as::<_, SetupRow>(
            r#"
            SELECT shop, stripe_account_id, completed_at
            FROM shop_setups
            ORDER BY completed_at DESC
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(SetupStatus::from).collect())
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .is_ok()
    }
}
