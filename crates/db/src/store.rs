//! Storage traits the API is written against, and their PostgreSQL
//! implementation.
//!
//! Lists are returned most recent first. Every row passes through the
//! `TryFrom` conversions in [`crate::models`], so a malformed stored row
//! surfaces as [`StoreError::Core`] carrying `CoreError::DataIntegrity`.

use async_trait::async_trait;
use survey_core::survey::{
    InfrastructureResponse, NewInfrastructureResponse, NewSatisfactionResponse,
    SatisfactionResponse,
};
use survey_core::types::DbId;

use crate::error::StoreError;
use crate::models::user::{UpsertUser, User};
use crate::repositories::{Form2ResponseRepo, FormResponseRepo, UserRepo};
use crate::DbPool;

/// Append-only access to both questionnaires' responses.
#[async_trait]
pub trait ResponseStore: Send + Sync {
    /// Confirm the backing storage is reachable.
    async fn ping(&self) -> Result<(), StoreError>;

    async fn insert_satisfaction(
        &self,
        input: &NewSatisfactionResponse,
    ) -> Result<SatisfactionResponse, StoreError>;

    async fn list_satisfaction(&self) -> Result<Vec<SatisfactionResponse>, StoreError>;

    async fn find_satisfaction(&self, id: DbId) -> Result<Option<SatisfactionResponse>, StoreError>;

    async fn insert_infrastructure(
        &self,
        input: &NewInfrastructureResponse,
    ) -> Result<InfrastructureResponse, StoreError>;

    async fn list_infrastructure(&self) -> Result<Vec<InfrastructureResponse>, StoreError>;

    async fn find_infrastructure(
        &self,
        id: DbId,
    ) -> Result<Option<InfrastructureResponse>, StoreError>;
}

/// Dashboard accounts.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn list_users(&self) -> Result<Vec<User>, StoreError>;

    async fn upsert_user(&self, input: &UpsertUser) -> Result<User, StoreError>;
}

// ---------------------------------------------------------------------------
// PostgreSQL
// ---------------------------------------------------------------------------

/// [`ResponseStore`] and [`UserStore`] over a PostgreSQL pool.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Close the underlying pool, waiting for checked-out connections.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl ResponseStore for PgStore {
    async fn ping(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }

    async fn insert_satisfaction(
        &self,
        input: &NewSatisfactionResponse,
    ) -> Result<SatisfactionResponse, StoreError> {
        let row = FormResponseRepo::create(&self.pool, input).await?;
        Ok(SatisfactionResponse::try_from(row)?)
    }

    async fn list_satisfaction(&self) -> Result<Vec<SatisfactionResponse>, StoreError> {
        let rows = FormResponseRepo::list(&self.pool).await?;
        let records = rows
            .into_iter()
            .map(SatisfactionResponse::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    async fn find_satisfaction(&self, id: DbId) -> Result<Option<SatisfactionResponse>, StoreError> {
        let row = FormResponseRepo::find_by_id(&self.pool, id).await?;
        Ok(row.map(SatisfactionResponse::try_from).transpose()?)
    }

    async fn insert_infrastructure(
        &self,
        input: &NewInfrastructureResponse,
    ) -> Result<InfrastructureResponse, StoreError> {
        let row = Form2ResponseRepo::create(&self.pool, input).await?;
        Ok(InfrastructureResponse::try_from(row)?)
    }

    async fn list_infrastructure(&self) -> Result<Vec<InfrastructureResponse>, StoreError> {
        let rows = Form2ResponseRepo::list(&self.pool).await?;
        let records = rows
            .into_iter()
            .map(InfrastructureResponse::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    async fn find_infrastructure(
        &self,
        id: DbId,
    ) -> Result<Option<InfrastructureResponse>, StoreError> {
        let row = Form2ResponseRepo::find_by_id(&self.pool, id).await?;
        Ok(row.map(InfrastructureResponse::try_from).transpose()?)
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(UserRepo::find_by_email(&self.pool, email).await?)
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(UserRepo::list(&self.pool).await?)
    }

    async fn upsert_user(&self, input: &UpsertUser) -> Result<User, StoreError> {
        Ok(UserRepo::upsert(&self.pool, input).await?)
    }
}
