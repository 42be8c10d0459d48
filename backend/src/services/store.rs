//! Store settings service for the admin back office

use std::sync::Arc;

use chrono::Utc;
use shared::{hours_rows, validate_location_id, validate_store_record};

use crate::error::{AppError, AppResult};
use crate::models::{HoursResponse, StoreRecord, StoreSummary, WeekHours};
use crate::repositories::StoreRepository;

/// Store service for reading and saving store records
#[derive(Clone)]
pub struct StoreService {
    stores: Arc<dyn StoreRepository>,
}

impl StoreService {
    /// Create a new StoreService instance
    pub fn new(stores: Arc<dyn StoreRepository>) -> Self {
        Self { stores }
    }

    /// All locations, ordered by identifier
    pub async fn list_stores(&self) -> AppResult<Vec<StoreSummary>> {
        self.stores.list_summaries().await
    }

    /// Full record for one location
    pub async fn get_store(&self, location: &str) -> AppResult<StoreRecord> {
        check_location(location)?;
        self.stores
            .find_by_location(location)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Store '{}'", location)))
    }

    /// Upsert the whole record. The path's location wins over whatever the
    /// body carries, and the save is stamped with the current time.
    pub async fn save_store(&self, location: &str, mut record: StoreRecord) -> AppResult<StoreRecord> {
        check_location(location)?;
        record.location = location.to_string();

        validate_store_record(&record)?;
        record.hours_of_operation = record.hours_of_operation.normalized()?;

        record.updated_at = Some(Utc::now());
        let saved = self.stores.upsert(&record).await?;

        tracing::info!(location, store_name = %saved.store_name, "Store settings saved");
        Ok(saved)
    }

    /// Stored hours, or the default week when none have been saved
    pub async fn get_hours(&self, location: &str) -> AppResult<HoursResponse> {
        check_location(location)?;
        let stored = self.stores.find_hours(location).await?;
        Ok(hours_response(location, stored.is_some(), stored.unwrap_or_default()))
    }

    /// Replace only the hours. A location that has never been saved gets a
    /// blank record carrying these hours.
    pub async fn save_hours(&self, location: &str, hours: WeekHours) -> AppResult<HoursResponse> {
        check_location(location)?;
        let hours = hours.normalized()?;

        let mut record = self
            .stores
            .find_by_location(location)
            .await?
            .unwrap_or_else(|| StoreRecord::new(location));
        record.hours_of_operation = hours;
        record.updated_at = Some(Utc::now());

        let saved = self.stores.upsert(&record).await?;

        tracing::info!(location, "Store hours saved");
        Ok(hours_response(location, true, saved.hours_of_operation))
    }
}

fn check_location(location: &str) -> AppResult<()> {
    validate_location_id(location).map_err(|msg| AppError::Validation {
        field: "location".to_string(),
        message: msg.to_string(),
    })
}

fn hours_response(location: &str, stored: bool, hours: WeekHours) -> HoursResponse {
    HoursResponse {
        location: location.to_string(),
        stored,
        preview: hours_rows(&hours),
        hours,
    }
}
