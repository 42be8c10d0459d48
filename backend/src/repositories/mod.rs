//! Data store access
//!
//! The site keeps everything in two tables: `store_settings`, one row per
//! location upserted on `location`, and the append-only
//! `contact_submissions`. Each backend implements the same two traits so the
//! services never know which store they are talking to.

mod memory;
mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use shared::{
    ContactSubmission, ContactSubmissionRecord, StoreRecord, StoreStatus, StoreSummary, WeekHours,
    DEFAULT_COUNTRY,
};
use uuid::Uuid;

use crate::config::{DataStoreBackend, DataStoreConfig};
use crate::error::AppResult;
use crate::external::RestDataStore;

pub use memory::MemoryDataStore;
pub use postgres::PgDataStore;

/// Store settings table
#[async_trait]
pub trait StoreRepository: Send + Sync {
    /// `select location, id order by location`
    async fn list_summaries(&self) -> AppResult<Vec<StoreSummary>>;

    /// Every record, ordered by location
    async fn list_all(&self) -> AppResult<Vec<StoreRecord>>;

    async fn find_by_location(&self, location: &str) -> AppResult<Option<StoreRecord>>;

    /// Only the hours document; `None` when the row or the document is missing
    async fn find_hours(&self, location: &str) -> AppResult<Option<WeekHours>>;

    /// Insert or replace the row keyed by `record.location`
    async fn upsert(&self, record: &StoreRecord) -> AppResult<StoreRecord>;

    /// Cheap round trip used by the health check
    async fn ping(&self) -> AppResult<()>;
}

/// Contact submission log
#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn insert(&self, submission: &ContactSubmission) -> AppResult<ContactSubmissionRecord>;
}

/// Handles to both tables
#[derive(Clone)]
pub struct DataStores {
    pub stores: Arc<dyn StoreRepository>,
    pub contacts: Arc<dyn ContactRepository>,
}

impl DataStores {
    pub fn from_shared<T>(store: Arc<T>) -> Self
    where
        T: StoreRepository + ContactRepository + 'static,
    {
        Self {
            stores: store.clone(),
            contacts: store,
        }
    }
}

/// Build the configured data store
pub async fn connect(config: &DataStoreConfig, run_migrations: bool) -> anyhow::Result<DataStores> {
    match config.backend {
        DataStoreBackend::Memory => {
            tracing::warn!("Using in-memory data store; records are lost on restart");
            Ok(DataStores::from_shared(Arc::new(MemoryDataStore::new())))
        }
        DataStoreBackend::Postgres => {
            tracing::info!("Connecting to database...");
            let store = PgDataStore::connect(config).await?;
            tracing::info!("Database connection established");
            if run_migrations {
                tracing::info!("Running database migrations...");
                store.migrate().await?;
                tracing::info!("Migrations completed");
            }
            Ok(DataStores::from_shared(Arc::new(store)))
        }
        DataStoreBackend::Rest => {
            tracing::info!(url = %config.rest_url, "Using hosted data store");
            let store = RestDataStore::new(config)?;
            Ok(DataStores::from_shared(Arc::new(store)))
        }
    }
}

// ============================================================================
// Row shape shared by the SQL and REST backends
// ============================================================================

/// Columns read back from `store_settings`
pub(crate) const STORE_COLUMNS: &str = "id, location, store_name, phone, email, details, address, \
     city, state, zip_code, country, latitude, longitude, is_primary, status, \
     hours_of_operation, updated_at";

/// A `store_settings` row as stored. Every column except `location` may be
/// NULL in rows written by older clients.
#[derive(Debug, Clone, Deserialize, sqlx::FromRow)]
pub(crate) struct StoreRow {
    pub id: Option<Uuid>,
    pub location: String,
    #[serde(default)]
    pub store_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub latitude: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub longitude: Option<Decimal>,
    #[serde(default)]
    pub is_primary: Option<bool>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub hours_of_operation: Option<serde_json::Value>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<StoreRow> for StoreRecord {
    fn from(row: StoreRow) -> Self {
        let hours = decode_hours(&row.location, row.hours_of_operation).unwrap_or_default();
        let status = row
            .status
            .as_deref()
            .and_then(|s| s.parse::<StoreStatus>().ok())
            .unwrap_or_default();

        Self {
            id: row.id,
            store_name: row.store_name.unwrap_or_default(),
            phone: row.phone.unwrap_or_default(),
            email: row.email.unwrap_or_default(),
            details: row.details.unwrap_or_default(),
            address: row.address.unwrap_or_default(),
            city: row.city.unwrap_or_default(),
            state: row.state.unwrap_or_default(),
            zip_code: row.zip_code.unwrap_or_default(),
            country: row
                .country
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| DEFAULT_COUNTRY.to_string()),
            latitude: row.latitude,
            longitude: row.longitude,
            is_primary: row.is_primary.unwrap_or(false),
            status,
            hours_of_operation: hours,
            updated_at: row.updated_at,
            location: row.location,
        }
    }
}

/// Parse a stored hours document; a malformed one is logged and treated as
/// missing
pub(crate) fn decode_hours(location: &str, value: Option<serde_json::Value>) -> Option<WeekHours> {
    match value {
        None | Some(serde_json::Value::Null) => None,
        Some(value) => match serde_json::from_value(value) {
            Ok(hours) => Some(hours),
            Err(e) => {
                tracing::warn!(location, error = %e, "Ignoring malformed hours_of_operation");
                None
            }
        },
    }
}

/// Accept numbers, numeric strings, empty strings and null
fn lenient_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        Some(serde_json::Value::Number(n)) => n.to_string().parse().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_columns_load_with_defaults() {
        let row: StoreRow = serde_json::from_value(json!({
            "id": null,
            "location": "bonaqua",
            "store_name": null,
            "country": null,
            "status": null,
            "latitude": "",
            "longitude": -87.75,
            "hours_of_operation": null
        }))
        .unwrap();
        let record = StoreRecord::from(row);

        assert_eq!(record.location, "bonaqua");
        assert_eq!(record.store_name, "");
        assert_eq!(record.country, "USA");
        assert_eq!(record.status, StoreStatus::Active);
        assert!(record.latitude.is_none());
        assert_eq!(record.longitude.unwrap().to_string(), "-87.75");
        assert_eq!(record.hours_of_operation, WeekHours::default());
    }

    #[test]
    fn test_malformed_hours_fall_back_to_default() {
        assert!(decode_hours("waverly", Some(json!({"monday": "9-5"}))).is_none());
        let stored = serde_json::to_value(WeekHours::uniform(shared::DayHours::closed())).unwrap();
        let hours = decode_hours("waverly", Some(stored)).unwrap();
        assert!(hours.monday.closed);
    }

    #[test]
    fn test_inactive_status_is_kept() {
        let row: StoreRow = serde_json::from_value(json!({
            "id": "6f1c2f52-8d4a-4a53-9b7e-0d3f7d1f4b11",
            "location": "waverly",
            "status": "Inactive",
            "is_primary": true
        }))
        .unwrap();
        let record = StoreRecord::from(row);
        assert_eq!(record.status, StoreStatus::Inactive);
        assert!(record.is_primary);
        assert!(record.id.is_some());
    }
}
