//! Contact submission service

use std::sync::Arc;

use shared::validate_location_id;

use crate::error::{AppError, AppResult};
use crate::models::{ContactSubmission, ContactSubmissionRecord};
use crate::repositories::ContactRepository;

#[derive(Clone)]
pub struct ContactService {
    contacts: Arc<dyn ContactRepository>,
}

impl ContactService {
    pub fn new(contacts: Arc<dyn ContactRepository>) -> Self {
        Self { contacts }
    }

    /// Append a message to the submission log for `location`
    pub async fn submit(
        &self,
        location: &str,
        input: ContactSubmission,
    ) -> AppResult<ContactSubmissionRecord> {
        validate_location_id(location).map_err(|msg| AppError::Validation {
            field: "location".to_string(),
            message: msg.to_string(),
        })?;

        let submission = ContactSubmission {
            location: location.to_string(),
            ..input
        }
        .trimmed();

        if let Some((field, message)) = submission.first_violation() {
            return Err(AppError::Validation {
                field: field.to_string(),
                message,
            });
        }

        let record = self.contacts.insert(&submission).await?;
        tracing::info!(location, submission_id = %record.id, "Contact submission received");
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MemoryDataStore;

    #[tokio::test]
    async fn test_submit_appends_with_path_location() {
        let store = Arc::new(MemoryDataStore::new());
        let service = ContactService::new(store.clone());

        let input = ContactSubmission {
            location: "ignored".to_string(),
            name: " Pat ".to_string(),
            phone: "615-555-1234".to_string(),
            message: "Open on Sunday?".to_string(),
        };
        let record = service.submit("waverly", input).await.unwrap();
        assert_eq!(record.location, "waverly");
        assert_eq!(record.name, "Pat");

        let log = store.contact_submissions().await;
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].id, record.id);
    }

    #[tokio::test]
    async fn test_submit_requires_all_fields() {
        let store = Arc::new(MemoryDataStore::new());
        let service = ContactService::new(store.clone());

        let input = ContactSubmission {
            name: "Pat".to_string(),
            ..ContactSubmission::default()
        };
        let err = service.submit("waverly", input).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { ref field, .. } if field == "phone"));
        assert!(store.contact_submissions().await.is_empty());
    }
}
