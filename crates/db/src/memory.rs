//! In-process [`ResponseStore`] / [`UserStore`] for tests and local runs
//! (`STORE_BACKEND=memory`).
//!
//! Responses are kept as raw rows and decoded on every read, so stored data
//! goes through the same integrity checks as rows coming out of PostgreSQL.

use async_trait::async_trait;
use chrono::Utc;
use survey_core::survey::{
    InfrastructureResponse, NewInfrastructureResponse, NewSatisfactionResponse,
    SatisfactionResponse,
};
use survey_core::types::{DbId, Timestamp};
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::models::form2_response::Form2ResponseRow;
use crate::models::form_response::FormResponseRow;
use crate::models::user::{UpsertUser, User};
use crate::store::{ResponseStore, UserStore};

#[derive(Default)]
pub struct MemoryStore {
    forms: RwLock<Vec<FormResponseRow>>,
    forms2: RwLock<Vec<Form2ResponseRow>>,
    users: RwLock<Vec<User>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a questionnaire 1 response with a chosen `created_at`.
    pub async fn seed_satisfaction(
        &self,
        input: &NewSatisfactionResponse,
        created_at: Timestamp,
    ) -> Result<SatisfactionResponse, StoreError> {
        let row = FormResponseRow::from_new(input, DbId::new_v4(), created_at)?;
        self.forms.write().await.push(row.clone());
        Ok(SatisfactionResponse::try_from(row)?)
    }

    /// Insert a questionnaire 2 response with a chosen `created_at`.
    pub async fn seed_infrastructure(
        &self,
        input: &NewInfrastructureResponse,
        created_at: Timestamp,
    ) -> Result<InfrastructureResponse, StoreError> {
        let row = Form2ResponseRow::from_new(input, DbId::new_v4(), created_at)?;
        self.forms2.write().await.push(row.clone());
        Ok(InfrastructureResponse::try_from(row)?)
    }

    /// Push a row as-is, bypassing decoding. Lets tests plant malformed data.
    pub async fn insert_raw_satisfaction(&self, row: FormResponseRow) {
        self.forms.write().await.push(row);
    }

    pub async fn insert_raw_infrastructure(&self, row: Form2ResponseRow) {
        self.forms2.write().await.push(row);
    }
}

/// Most recent first; among equal timestamps the later insert wins.
fn newest_first<T: Clone>(rows: &[T], created_at: impl Fn(&T) -> Timestamp) -> Vec<T> {
    let mut out: Vec<T> = rows.iter().rev().cloned().collect();
    out.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
    out
}

#[async_trait]
impl ResponseStore for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn insert_satisfaction(
        &self,
        input: &NewSatisfactionResponse,
    ) -> Result<SatisfactionResponse, StoreError> {
        self.seed_satisfaction(input, Utc::now()).await
    }

    async fn list_satisfaction(&self) -> Result<Vec<SatisfactionResponse>, StoreError> {
        let rows = newest_first(self.forms.read().await.as_slice(), |r| r.created_at);
        let records = rows
            .into_iter()
            .map(SatisfactionResponse::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    async fn find_satisfaction(&self, id: DbId) -> Result<Option<SatisfactionResponse>, StoreError> {
        let row = self.forms.read().await.iter().find(|r| r.id == id).cloned();
        Ok(row.map(SatisfactionResponse::try_from).transpose()?)
    }

    async fn insert_infrastructure(
        &self,
        input: &NewInfrastructureResponse,
    ) -> Result<InfrastructureResponse, StoreError> {
        self.seed_infrastructure(input, Utc::now()).await
    }

    async fn list_infrastructure(&self) -> Result<Vec<InfrastructureResponse>, StoreError> {
        let rows = newest_first(self.forms2.read().await.as_slice(), |r| r.created_at);
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
        let row = self.forms2.read().await.iter().find(|r| r.id == id).cloned();
        Ok(row.map(InfrastructureResponse::try_from).transpose()?)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(newest_first(self.users.read().await.as_slice(), |u| u.created_at))
    }

    async fn upsert_user(&self, input: &UpsertUser) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if let Some(existing) = users.iter_mut().find(|u| u.email == input.email) {
            existing.name = input.name.clone();
            existing.password_hash = input.password_hash.clone();
            existing.role = input.role.clone();
            return Ok(existing.clone());
        }

        let user = User {
            id: DbId::new_v4(),
            name: input.name.clone(),
            email: input.email.clone(),
            password_hash: input.password_hash.clone(),
            role: input.role.clone(),
            created_at: Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    }
}
