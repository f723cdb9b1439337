//! In-process setup repository used when no database is configured.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::debug;

use crate::domain::entities::{NewSetupCompletion, SetupStatus, ShopDomain};
use crate::domain::repositories::SetupRepository;
use crate::error::AppError;
use serde_json::json;

/// Setup store kept in process memory.
///
/// State is lost on restart. Suitable for development and tests; production
/// deployments set `DATABASE_URL` and use
/// [`super::PgSetupRepository`] instead.
///
/// The server only reads from it (`find`). The writes (`mark_complete`,
/// `reset`) and `list` are reached from tests alone, since the `admin` CLI
/// requires `DATABASE_URL` and always talks to Postgres.
#[derive(Default)]
pub struct MemorySetupRepository {
    setups: RwLock<HashMap<ShopDomain, SetupStatus>>,
}

impl MemorySetupRepository {
    pub fn new() -> Self {
        debug!("Using MemorySetupRepository (setup state is not persisted)");
        Self::default()
    }
}

fn poisoned() -> AppError {
    AppError::internal("Setup store unavailable", json!({}))
}

#[async_trait]
impl SetupRepository for MemorySetupRepository {
    async fn find(&self, shop: &ShopDomain) -> Result<Option<SetupStatus>, AppError> {
        let setups = self.setups.read().map_err(|_| poisoned())?;
        Ok(setups.get(shop).cloned())
    }

    async fn mark_complete(
        &self,
        completion: NewSetupCompletion,
    ) -> Result<SetupStatus, AppError> {
        let status = SetupStatus {
            shop: completion.shop,
            stripe_account_id: completion.stripe_account_id,
            completed_at: Utc::now(),
        };

        let mut setups = self.setups.write().map_err(|_| poisoned())?;
        setups.insert(status.shop.clone(), status.clone());

        Ok(status)
    }

    async fn reset(&self, shop: &ShopDomain) -> Result<bool, AppError> {
        let mut setups = self.setups.write().map_err(|_| poisoned())?;
        Ok(setups.remove(shop).is_some())
    }

    async fn list(&self) -> Result<Vec<SetupStatus>, AppError> {
        let setups = self.setups.read().map_err(|_| poisoned())?;
        let mut all: Vec<SetupStatus> = setups.values().cloned().collect();
        all.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        Ok(all)
    }

    async fn health_check(&self) -> bool {
        !self.setups.is_poisoned()
    }
}
