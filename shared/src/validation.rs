//! Validation and input formatting for store and contact forms

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::StoreRecord;

// ============================================================================
// Phone numbers
// ============================================================================

/// Digits of a phone number with all punctuation removed
pub fn phone_digits(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Reformat partial or complete input as `(XXX) XXX-XXXX`.
///
/// Runs on every keystroke, so short input is grouped as far as it goes:
/// `615` stays `615`, `6158156` becomes `(615) 815-6`. Digits past the tenth
/// are dropped.
pub fn format_phone_number(value: &str) -> String {
    let digits = phone_digits(value);
    match digits.len() {
        0..=3 => digits,
        4..=6 => format!("({}) {}", &digits[..3], &digits[3..]),
        len => format!(
            "({}) {}-{}",
            &digits[..3],
            &digits[3..6],
            &digits[6..len.min(10)]
        ),
    }
}

// ============================================================================
// General Validations
// ============================================================================

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.contains('@') {
        Ok(())
    } else {
        Err("Please enter a valid email address")
    }
}

/// Validate a location identifier: lowercase letters, digits, `-` and `_`
pub fn validate_location_id(location: &str) -> Result<(), &'static str> {
    if location.is_empty() {
        return Err("Location identifier cannot be empty");
    }
    if location.len() > 64 {
        return Err("Location identifier must be at most 64 characters");
    }
    if !location
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
    {
        return Err("Location identifier must be lowercase letters, digits, '-' or '_'");
    }
    Ok(())
}

/// Validate latitude is within [-90, 90]
pub fn validate_latitude(latitude: Decimal) -> Result<(), &'static str> {
    if latitude.abs() > Decimal::from(90) {
        return Err("Latitude must be between -90 and 90");
    }
    Ok(())
}

/// Validate longitude is within [-180, 180]
pub fn validate_longitude(longitude: Decimal) -> Result<(), &'static str> {
    if longitude.abs() > Decimal::from(180) {
        return Err("Longitude must be between -180 and 180");
    }
    Ok(())
}

// ============================================================================
// Store form guards
// ============================================================================

/// First problem found with a store record before it is saved
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum StoreValidationError {
    #[error("Store name is required")]
    MissingStoreName,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Phone number is required")]
    MissingPhone,

    #[error("Address is required")]
    MissingAddress,

    #[error("Latitude must be between -90 and 90")]
    LatitudeOutOfRange,

    #[error("Longitude must be between -180 and 180")]
    LongitudeOutOfRange,
}

impl StoreValidationError {
    /// Form field the error belongs to
    pub fn field(&self) -> &'static str {
        match self {
            StoreValidationError::MissingStoreName => "store_name",
            StoreValidationError::InvalidEmail => "email",
            StoreValidationError::MissingPhone => "phone",
            StoreValidationError::MissingAddress => "address",
            StoreValidationError::LatitudeOutOfRange => "latitude",
            StoreValidationError::LongitudeOutOfRange => "longitude",
        }
    }
}

/// Check a store record in form order and report only the first violation
pub fn validate_store_record(record: &StoreRecord) -> Result<(), StoreValidationError> {
    if record.store_name.trim().is_empty() {
        return Err(StoreValidationError::MissingStoreName);
    }
    if validate_email(&record.email).is_err() {
        return Err(StoreValidationError::InvalidEmail);
    }
    if record.phone.trim().is_empty() {
        return Err(StoreValidationError::MissingPhone);
    }
    if record.address.trim().is_empty() {
        return Err(StoreValidationError::MissingAddress);
    }
    if let Some(latitude) = record.latitude {
        validate_latitude(latitude).map_err(|_| StoreValidationError::LatitudeOutOfRange)?;
    }
    if let Some(longitude) = record.longitude {
        validate_longitude(longitude).map_err(|_| StoreValidationError::LongitudeOutOfRange)?;
    }
    Ok(())
}

// ============================================================================
// US States
// ============================================================================

/// State names offered by the store form
pub const US_STATES: &[&str] = &[
    "Alabama",
    "Alaska",
    "Arizona",
    "Arkansas",
    "California",
    "Colorado",
    "Connecticut",
    "Delaware",
    "Florida",
    "Georgia",
    "Hawaii",
    "Idaho",
    "Illinois",
    "Indiana",
    "Iowa",
    "Kansas",
    "Kentucky",
    "Louisiana",
    "Maine",
    "Maryland",
    "Massachusetts",
    "Michigan",
    "Minnesota",
    "Mississippi",
    "Missouri",
    "Montana",
    "Nebraska",
    "Nevada",
    "New Hampshire",
    "New Jersey",
    "New Mexico",
    "New York",
    "North Carolina",
    "North Dakota",
    "Ohio",
    "Oklahoma",
    "Oregon",
    "Pennsylvania",
    "Rhode Island",
    "South Carolina",
    "South Dakota",
    "Tennessee",
    "Texas",
    "Utah",
    "Vermont",
    "Virginia",
    "Washington",
    "West Virginia",
    "Wisconsin",
    "Wyoming",
];

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_record() -> StoreRecord {
        let mut record = StoreRecord::new("waverly");
        record.store_name = "Waverly".to_string();
        record.email = "sales@example.com".to_string();
        record.phone = "(615) 815-6734".to_string();
        record.address = "1004 US-70".to_string();
        record
    }

    // ========================================================================
    // Phone Formatting Tests
    // ========================================================================

    #[test]
    fn test_format_phone_full_number() {
        assert_eq!(format_phone_number("6158156734"), "(615) 815-6734");
    }

    #[test]
    fn test_format_phone_partial_input() {
        assert_eq!(format_phone_number(""), "");
        assert_eq!(format_phone_number("615"), "615");
        assert_eq!(format_phone_number("6158"), "(615) 8");
        assert_eq!(format_phone_number("615815"), "(615) 815");
        assert_eq!(format_phone_number("6158156"), "(615) 815-6");
    }

    #[test]
    fn test_format_phone_strips_punctuation_and_extra_digits() {
        assert_eq!(format_phone_number("(615) 815-6734"), "(615) 815-6734");
        assert_eq!(format_phone_number("615-815-67349999"), "(615) 815-6734");
        assert_eq!(format_phone_number("abc"), "");
    }

    #[test]
    fn test_format_phone_is_idempotent() {
        for input in ["6", "6158", "6158156", "6158156734"] {
            let once = format_phone_number(input);
            assert_eq!(format_phone_number(&once), once);
        }
    }

    // ========================================================================
    // General Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_email() {
        assert!(validate_email("Sales@RentnKing.com").is_ok());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn test_validate_location_id() {
        assert!(validate_location_id("bonaqua").is_ok());
        assert!(validate_location_id("store-2_b").is_ok());
        assert!(validate_location_id("").is_err());
        assert!(validate_location_id("Waverly").is_err());
        assert!(validate_location_id("a b").is_err());
        assert!(validate_location_id(&"x".repeat(65)).is_err());
    }

    #[test]
    fn test_validate_coordinates() {
        assert!(validate_latitude(Decimal::from(90)).is_ok());
        assert!(validate_latitude(Decimal::from(-91)).is_err());
        assert!(validate_longitude(Decimal::from(-180)).is_ok());
        assert!(validate_longitude(Decimal::from(181)).is_err());
    }

    // ========================================================================
    // Store Guard Tests
    // ========================================================================

    #[test]
    fn test_valid_store_passes() {
        assert_eq!(validate_store_record(&valid_record()), Ok(()));
    }

    #[test]
    fn test_store_guards_report_first_violation() {
        let mut record = valid_record();
        record.store_name = "  ".to_string();
        record.email = "broken".to_string();
        assert_eq!(
            validate_store_record(&record),
            Err(StoreValidationError::MissingStoreName)
        );

        record.store_name = "Waverly".to_string();
        assert_eq!(
            validate_store_record(&record),
            Err(StoreValidationError::InvalidEmail)
        );

        record.email = "a@b".to_string();
        record.phone.clear();
        record.address.clear();
        let err = validate_store_record(&record).unwrap_err();
        assert_eq!(err, StoreValidationError::MissingPhone);
        assert_eq!(err.field(), "phone");
        assert_eq!(err.to_string(), "Phone number is required");

        record.phone = "615".to_string();
        assert_eq!(
            validate_store_record(&record),
            Err(StoreValidationError::MissingAddress)
        );
    }

    #[test]
    fn test_store_guards_check_coordinates() {
        let mut record = valid_record();
        record.latitude = Some(Decimal::from(100));
        assert_eq!(
            validate_store_record(&record),
            Err(StoreValidationError::LatitudeOutOfRange)
        );
    }

    #[test]
    fn test_us_states() {
        assert_eq!(US_STATES.len(), 50);
        assert!(US_STATES.contains(&"Tennessee"));
        assert!(!US_STATES.contains(&"Ontario"));
    }
}
