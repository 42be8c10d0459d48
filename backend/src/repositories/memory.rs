//! In-process data store for local development and tests

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use shared::{ContactSubmission, ContactSubmissionRecord, StoreRecord, StoreSummary, WeekHours};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ContactRepository, StoreRepository};
use crate::error::AppResult;

#[derive(Default)]
pub struct MemoryDataStore {
    stores: RwLock<BTreeMap<String, StoreRecord>>,
    contacts: RwLock<Vec<ContactSubmissionRecord>>,
}

impl MemoryDataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Submissions received so far, oldest first
    pub async fn contact_submissions(&self) -> Vec<ContactSubmissionRecord> {
        self.contacts.read().await.clone()
    }
}

#[async_trait]
impl StoreRepository for MemoryDataStore {
    async fn list_summaries(&self) -> AppResult<Vec<StoreSummary>> {
        let stores = self.stores.read().await;
        Ok(stores
            .values()
            .map(|record| StoreSummary::new(record.id, record.location.clone()))
            .collect())
    }

    async fn list_all(&self) -> AppResult<Vec<StoreRecord>> {
        Ok(self.stores.read().await.values().cloned().collect())
    }

    async fn find_by_location(&self, location: &str) -> AppResult<Option<StoreRecord>> {
        Ok(self.stores.read().await.get(location).cloned())
    }

    async fn find_hours(&self, location: &str) -> AppResult<Option<WeekHours>> {
        Ok(self
            .stores
            .read()
            .await
            .get(location)
            .map(|record| record.hours_of_operation.clone()))
    }

    async fn upsert(&self, record: &StoreRecord) -> AppResult<StoreRecord> {
        let mut stores = self.stores.write().await;
        let id = stores
            .get(&record.location)
            .and_then(|existing| existing.id)
            .unwrap_or_else(Uuid::new_v4);

        let stored = StoreRecord {
            id: Some(id),
            ..record.clone()
        };
        stores.insert(stored.location.clone(), stored.clone());
        Ok(stored)
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

#[async_trait]
impl ContactRepository for MemoryDataStore {
    async fn insert(&self, submission: &ContactSubmission) -> AppResult<ContactSubmissionRecord> {
        let record = ContactSubmissionRecord {
            id: Uuid::new_v4(),
            location: submission.location.clone(),
            name: submission.name.clone(),
            phone: submission.phone.clone(),
            message: submission.message.clone(),
            created_at: Utc::now(),
        };
        self.contacts.write().await.push(record.clone());
        Ok(record)
    }
}
