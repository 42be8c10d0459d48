//! Public location listing for the contact page

use std::sync::Arc;

use shared::sort_for_display;

use crate::error::{AppError, AppResult};
use crate::models::LocationView;
use crate::repositories::StoreRepository;

#[derive(Clone)]
pub struct LocationService {
    stores: Arc<dyn StoreRepository>,
}

impl LocationService {
    pub fn new(stores: Arc<dyn StoreRepository>) -> Self {
        Self { stores }
    }

    /// Active stores, primary first
    pub async fn list_locations(&self) -> AppResult<Vec<LocationView>> {
        let records = self.stores.list_all().await?;
        let mut views: Vec<LocationView> = records
            .iter()
            .filter(|record| record.status.is_active())
            .map(LocationView::from)
            .collect();
        sort_for_display(&mut views);
        Ok(views)
    }

    /// One active store; inactive stores are hidden like missing ones
    pub async fn get_location(&self, location: &str) -> AppResult<LocationView> {
        self.stores
            .find_by_location(location)
            .await?
            .filter(|record| record.status.is_active())
            .map(|record| LocationView::from(&record))
            .ok_or_else(|| AppError::NotFound(format!("Location '{}'", location)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{StoreRecord, StoreStatus};
    use crate::repositories::MemoryDataStore;

    async fn seeded() -> LocationService {
        let store = Arc::new(MemoryDataStore::new());
        let mut bonaqua = StoreRecord::new("bonaqua");
        bonaqua.store_name = "Bon Aqua".to_string();
        let mut waverly = StoreRecord::new("waverly");
        waverly.store_name = "Waverly".to_string();
        waverly.is_primary = true;
        let mut closed = StoreRecord::new("centerville");
        closed.status = StoreStatus::Inactive;

        for record in [&bonaqua, &waverly, &closed] {
            store.upsert(record).await.unwrap();
        }
        LocationService::new(store)
    }

    #[tokio::test]
    async fn test_lists_active_primary_first() {
        let views = seeded().await.list_locations().await.unwrap();
        let names: Vec<_> = views.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, ["Waverly", "Bon Aqua"]);
    }

    #[tokio::test]
    async fn test_inactive_location_is_not_found() {
        let service = seeded().await;
        assert!(service.get_location("bonaqua").await.is_ok());
        assert!(matches!(
            service.get_location("centerville").await,
            Err(AppError::NotFound(_))
        ));
    }
}
