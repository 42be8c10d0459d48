//! PostgreSQL data store

use std::time::Duration;

use async_trait::async_trait;
use shared::{ContactSubmission, ContactSubmissionRecord, StoreRecord, StoreSummary, WeekHours};
use sqlx::{postgres::PgPoolOptions, PgPool};
use uuid::Uuid;

use super::{decode_hours, ContactRepository, StoreRepository, StoreRow, STORE_COLUMNS};
use crate::config::DataStoreConfig;
use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct PgDataStore {
    db: PgPool,
}

#[derive(sqlx::FromRow)]
struct ContactRow {
    id: Uuid,
    location: String,
    name: String,
    phone: String,
    message: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl PgDataStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn connect(config: &DataStoreConfig) -> anyhow::Result<Self> {
        if config.database_url.is_empty() {
            anyhow::bail!("data_store.database_url must be set for the postgres backend");
        }
        let db = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(30))
            .connect(&config.database_url)
            .await?;
        Ok(Self::new(db))
    }

    pub async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::migrate!("./migrations").run(&self.db).await?;
        Ok(())
    }
}

#[async_trait]
impl StoreRepository for PgDataStore {
    async fn list_summaries(&self) -> AppResult<Vec<StoreSummary>> {
        let rows = sqlx::query_as::<_, (Option<Uuid>, String)>(
            "SELECT id, location FROM store_settings ORDER BY location ASC",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, location)| StoreSummary::new(id, location))
            .collect())
    }

    async fn list_all(&self) -> AppResult<Vec<StoreRecord>> {
        let rows = sqlx::query_as::<_, StoreRow>(&format!(
            "SELECT {} FROM store_settings ORDER BY location ASC",
            STORE_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(StoreRecord::from).collect())
    }

    async fn find_by_location(&self, location: &str) -> AppResult<Option<StoreRecord>> {
        let row = sqlx::query_as::<_, StoreRow>(&format!(
            "SELECT {} FROM store_settings WHERE location = $1",
            STORE_COLUMNS
        ))
        .bind(location)
        .fetch_optional(&self.db)
        .await?;

        Ok(row.map(StoreRecord::from))
    }

    async fn find_hours(&self, location: &str) -> AppResult<Option<WeekHours>> {
        let hours = sqlx::query_scalar::<_, Option<serde_json::Value>>(
            "SELECT hours_of_operation FROM store_settings WHERE location = $1",
        )
        .bind(location)
        .fetch_optional(&self.db)
        .await?;

        Ok(decode_hours(location, hours.flatten()))
    }

    async fn upsert(&self, record: &StoreRecord) -> AppResult<StoreRecord> {
        let hours = serde_json::to_value(&record.hours_of_operation)
            .map_err(|e| AppError::Internal(format!("Failed to encode hours: {}", e)))?;

        let row = sqlx::query_as::<_, StoreRow>(&format!(
            r#"
            INSERT INTO store_settings (
                location, store_name, phone, email, details, address, city, state,
                zip_code, country, latitude, longitude, is_primary, status,
                hours_of_operation, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            ON CONFLICT (location) DO UPDATE SET
                store_name = EXCLUDED.store_name,
                phone = EXCLUDED.phone,
                email = EXCLUDED.email,
                details = EXCLUDED.details,
                address = EXCLUDED.address,
                city = EXCLUDED.city,
                state = EXCLUDED.state,
                zip_code = EXCLUDED.zip_code,
                country = EXCLUDED.country,
                latitude = EXCLUDED.latitude,
                longitude = EXCLUDED.longitude,
                is_primary = EXCLUDED.is_primary,
                status = EXCLUDED.status,
                hours_of_operation = EXCLUDED.hours_of_operation,
                updated_at = EXCLUDED.updated_at
            RETURNING {}
            "#,
            STORE_COLUMNS
        ))
        .bind(&record.location)
        .bind(&record.store_name)
        .bind(&record.phone)
        .bind(&record.email)
        .bind(&record.details)
        .bind(&record.address)
        .bind(&record.city)
        .bind(&record.state)
        .bind(&record.zip_code)
        .bind(&record.country)
        .bind(record.latitude)
        .bind(record.longitude)
        .bind(record.is_primary)
        .bind(record.status.as_str())
        .bind(hours)
        .bind(record.updated_at)
        .fetch_one(&self.db)
        .await?;

        Ok(StoreRecord::from(row))
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.db).await?;
        Ok(())
    }
}

#[async_trait]
impl ContactRepository for PgDataStore {
    async fn insert(&self, submission: &ContactSubmission) -> AppResult<ContactSubmissionRecord> {
        let row = sqlx::query_as::<_, ContactRow>(
            r#"
            INSERT INTO contact_submissions (location, name, phone, message)
            VALUES ($1, $2, $3, $4)
            RETURNING id, location, name, phone, message, created_at
            "#,
        )
        .bind(&submission.location)
        .bind(&submission.name)
        .bind(&submission.phone)
        .bind(&submission.message)
        .fetch_one(&self.db)
        .await?;

        Ok(ContactSubmissionRecord {
            id: row.id,
            location: row.location,
            name: row.name,
            phone: row.phone,
            message: row.message,
            created_at: row.created_at,
        })
    }
}
