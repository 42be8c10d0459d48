//! Store location records

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::hours::WeekHours;
use crate::types::GpsCoordinates;
use crate::validation::format_phone_number;

/// Country used for new records
pub const DEFAULT_COUNTRY: &str = "USA";

/// Whether a store is shown on the public contact page
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum StoreStatus {
    #[default]
    Active,
    Inactive,
}

impl StoreStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreStatus::Active => "Active",
            StoreStatus::Inactive => "Inactive",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, StoreStatus::Active)
    }
}

impl fmt::Display for StoreStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoreStatus {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(StoreStatus::Active),
            "inactive" => Ok(StoreStatus::Inactive),
            _ => Err(FieldError::InvalidValue {
                field: StoreField::Status,
                value: s.to_string(),
            }),
        }
    }
}

/// One physical store, keyed by its location identifier
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub location: String,
    pub store_name: String,
    pub phone: String,
    pub email: String,
    pub details: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,
    pub is_primary: bool,
    pub status: StoreStatus,
    pub hours_of_operation: WeekHours,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl StoreRecord {
    /// Blank record for a location that has never been saved
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            id: None,
            location: location.into(),
            store_name: String::new(),
            phone: String::new(),
            email: String::new(),
            details: String::new(),
            address: String::new(),
            city: String::new(),
            state: String::new(),
            zip_code: String::new(),
            country: DEFAULT_COUNTRY.to_string(),
            latitude: None,
            longitude: None,
            is_primary: false,
            status: StoreStatus::Active,
            hours_of_operation: WeekHours::default(),
            updated_at: None,
        }
    }

    pub fn coordinates(&self) -> Option<GpsCoordinates> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(GpsCoordinates::new(latitude, longitude)),
            _ => None,
        }
    }

    /// Apply one form edit. Phone input is reformatted as it is typed.
    pub fn set_field(&mut self, field: StoreField, value: &str) -> Result<(), FieldError> {
        match field {
            StoreField::StoreName => self.store_name = value.to_string(),
            StoreField::Phone => self.phone = format_phone_number(value),
            StoreField::Email => self.email = value.to_string(),
            StoreField::Details => self.details = value.to_string(),
            StoreField::Address => self.address = value.to_string(),
            StoreField::City => self.city = value.to_string(),
            StoreField::State => self.state = value.to_string(),
            StoreField::ZipCode => self.zip_code = value.to_string(),
            StoreField::Country => self.country = value.to_string(),
            StoreField::Latitude => self.latitude = parse_coordinate(field, value)?,
            StoreField::Longitude => self.longitude = parse_coordinate(field, value)?,
            StoreField::IsPrimary => {
                self.is_primary = match value.trim() {
                    "true" => true,
                    "false" => false,
                    _ => {
                        return Err(FieldError::InvalidValue {
                            field,
                            value: value.to_string(),
                        })
                    }
                }
            }
            StoreField::Status => self.status = value.parse()?,
        }
        Ok(())
    }
}

fn parse_coordinate(field: StoreField, value: &str) -> Result<Option<Decimal>, FieldError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    Decimal::from_str(trimmed)
        .map(Some)
        .map_err(|_| FieldError::InvalidValue {
            field,
            value: value.to_string(),
        })
}

/// Editable fields of the store form
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StoreField {
    StoreName,
    Phone,
    Email,
    Details,
    Address,
    City,
    State,
    ZipCode,
    Country,
    Latitude,
    Longitude,
    IsPrimary,
    Status,
}

impl StoreField {
    pub fn key(&self) -> &'static str {
        match self {
            StoreField::StoreName => "store_name",
            StoreField::Phone => "phone",
            StoreField::Email => "email",
            StoreField::Details => "details",
            StoreField::Address => "address",
            StoreField::City => "city",
            StoreField::State => "state",
            StoreField::ZipCode => "zip_code",
            StoreField::Country => "country",
            StoreField::Latitude => "latitude",
            StoreField::Longitude => "longitude",
            StoreField::IsPrimary => "is_primary",
            StoreField::Status => "status",
        }
    }
}

impl FromStr for StoreField {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_value(serde_json::Value::String(s.to_string()))
            .map_err(|_| FieldError::UnknownField(s.to_string()))
    }
}

/// Rejected form edit
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("Unknown field '{0}'")]
    UnknownField(String),

    #[error("Invalid value '{value}' for {}", field.key())]
    InvalidValue { field: StoreField, value: String },
}

/// Store list entry used by the admin location picker
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreSummary {
    pub id: Option<Uuid>,
    pub location: String,
    pub display_name: String,
}

impl StoreSummary {
    pub fn new(id: Option<Uuid>, location: impl Into<String>) -> Self {
        let location = location.into();
        Self {
            id,
            display_name: display_name(&location),
            location,
        }
    }
}

/// Location identifier with its first character upper-cased
pub fn display_name(location: &str) -> String {
    let mut chars = location.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
