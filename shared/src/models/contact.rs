//! Contact form submissions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Message left through a location's contact form
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Validate)]
#[serde(default)]
pub struct ContactSubmission {
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Phone number is required"))]
    pub phone: String,
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
}

impl ContactSubmission {
    /// First failing field, checked in form order
    pub fn first_violation(&self) -> Option<(&'static str, String)> {
        let errors = self.validate().err()?;
        let fields = errors.field_errors();
        ["location", "name", "phone", "message"]
            .into_iter()
            .find_map(|field| {
                let error = fields.get(field)?.first()?;
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field));
                Some((field, message))
            })
    }

    /// Trim surrounding whitespace; a blank field then fails validation
    pub fn trimmed(&self) -> Self {
        Self {
            location: self.location.trim().to_string(),
            name: self.name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            message: self.message.trim().to_string(),
        }
    }
}

/// A stored submission
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactSubmissionRecord {
    pub id: Uuid,
    pub location: String,
    pub name: String,
    pub phone: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}
