//! Form state for the admin store editor and the public contact form
//!
//! Forms are plain values. Every edit returns a new form and leaves the old
//! one untouched, so a failed save never loses what the user typed. Saving is
//! split into [`StoreForm::submit`], which hands back the payload to persist,
//! and the `*_succeeded` / `*_failed` transitions applied once the data store
//! answers.

use serde::{Deserialize, Serialize};

use crate::models::{ContactSubmission, FieldError, StoreField, StoreRecord, WeekHours};
use crate::validation::validate_store_record;

pub const STORE_SAVED_MESSAGE: &str = "Store updated successfully!";
pub const STORE_SAVE_FAILED_MESSAGE: &str = "Failed to save store. Please try again.";
pub const CONTACT_SENT_MESSAGE: &str = "Message sent successfully! We'll get back to you soon.";
pub const CONTACT_FAILED_MESSAGE: &str =
    "Failed to send message. Please try again or call us directly.";

/// Banner text for a failed data store round trip
pub fn failure_message(action: &str) -> String {
    format!("Failed to {}. Please try again.", action)
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BannerKind {
    Success,
    Error,
}

/// Single message shown above a form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub text: String,
}

impl Banner {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Error,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FormStatus {
    Loading,
    Ready,
    Saving,
}

/// Result of asking a form to submit
#[derive(Debug, Clone, PartialEq)]
pub enum Submission<F, P> {
    /// Send `payload`; `form` is the in-flight state to show meanwhile
    Ready { form: F, payload: P },
    /// A guard failed; the returned form carries the error banner
    Rejected(F),
    /// A request is already outstanding; nothing to do
    InFlight,
}

// ============================================================================
// Store form
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreForm {
    record: StoreRecord,
    status: FormStatus,
    banner: Option<Banner>,
}

impl StoreForm {
    /// Form waiting for the record of `location` to load
    pub fn loading(location: impl Into<String>) -> Self {
        Self {
            record: StoreRecord::new(location),
            status: FormStatus::Loading,
            banner: None,
        }
    }

    /// Show the loaded record, or keep the blank one if the location has
    /// never been saved
    pub fn loaded(&self, record: Option<StoreRecord>) -> Self {
        let location = self.record.location.clone();
        let record = match record {
            Some(mut record) => {
                record.location = location;
                record
            }
            None => self.record.clone(),
        };
        Self {
            record,
            status: FormStatus::Ready,
            banner: None,
        }
    }

    pub fn load_failed(&self) -> Self {
        Self {
            record: self.record.clone(),
            status: FormStatus::Ready,
            banner: Some(Banner::error(failure_message("load store"))),
        }
    }

    pub fn record(&self) -> &StoreRecord {
        &self.record
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    /// Save buttons are disabled while loading or saving
    pub fn is_busy(&self) -> bool {
        self.status != FormStatus::Ready
    }

    pub fn with_field(&self, field: StoreField, value: &str) -> Result<Self, FieldError> {
        let mut next = self.clone();
        next.record.set_field(field, value)?;
        Ok(next)
    }

    pub fn with_hours(&self, hours: WeekHours) -> Self {
        let mut next = self.clone();
        next.record.hours_of_operation = hours;
        next
    }

    pub fn dismiss_banner(&self) -> Self {
        let mut next = self.clone();
        next.banner = None;
        next
    }

    pub fn submit(&self) -> Submission<Self, StoreRecord> {
        if self.is_busy() {
            return Submission::InFlight;
        }

        let guard = validate_store_record(&self.record)
            .map_err(|e| e.to_string())
            .and_then(|_| {
                self.record
                    .hours_of_operation
                    .normalized()
                    .map_err(|e| e.to_string())
            });
        let hours = match guard {
            Ok(hours) => hours,
            Err(message) => {
                let mut rejected = self.clone();
                rejected.banner = Some(Banner::error(message));
                return Submission::Rejected(rejected);
            }
        };

        let mut payload = self.record.clone();
        payload.hours_of_operation = hours;
        Submission::Ready {
            form: Self {
                record: self.record.clone(),
                status: FormStatus::Saving,
                banner: None,
            },
            payload,
        }
    }

    pub fn save_succeeded(&self, saved: StoreRecord) -> Self {
        Self {
            record: saved,
            status: FormStatus::Ready,
            banner: Some(Banner::success(STORE_SAVED_MESSAGE)),
        }
    }

    pub fn save_failed(&self) -> Self {
        Self {
            record: self.record.clone(),
            status: FormStatus::Ready,
            banner: Some(Banner::error(STORE_SAVE_FAILED_MESSAGE)),
        }
    }
}

// ============================================================================
// Contact form
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactForm {
    fields: ContactSubmission,
    submitting: bool,
    banner: Option<Banner>,
}

impl ContactForm {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            fields: ContactSubmission {
                location: location.into(),
                ..ContactSubmission::default()
            },
            submitting: false,
            banner: None,
        }
    }

    pub fn fields(&self) -> &ContactSubmission {
        &self.fields
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn button_label(&self) -> &'static str {
        if self.submitting {
            "Sending..."
        } else {
            "Send Message"
        }
    }

    pub fn with_name(&self, name: &str) -> Self {
        let mut next = self.clone();
        next.fields.name = name.to_string();
        next
    }

    pub fn with_phone(&self, phone: &str) -> Self {
        let mut next = self.clone();
        next.fields.phone = phone.to_string();
        next
    }

    pub fn with_message(&self, message: &str) -> Self {
        let mut next = self.clone();
        next.fields.message = message.to_string();
        next
    }

    pub fn submit(&self) -> Submission<Self, ContactSubmission> {
        if self.submitting {
            return Submission::InFlight;
        }

        let payload = self.fields.trimmed();
        if let Some((_, message)) = payload.first_violation() {
            let mut rejected = self.clone();
            rejected.banner = Some(Banner::error(message));
            return Submission::Rejected(rejected);
        }

        Submission::Ready {
            form: Self {
                fields: self.fields.clone(),
                submitting: true,
                banner: None,
            },
            payload,
        }
    }

    /// Clear the fields for the next message
    pub fn succeeded(&self) -> Self {
        Self {
            fields: ContactSubmission {
                location: self.fields.location.clone(),
                ..ContactSubmission::default()
            },
            submitting: false,
            banner: Some(Banner::success(CONTACT_SENT_MESSAGE)),
        }
    }

    pub fn failed(&self) -> Self {
        Self {
            fields: self.fields.clone(),
            submitting: false,
            banner: Some(Banner::error(CONTACT_FAILED_MESSAGE)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Weekday;

    fn ready_form() -> StoreForm {
        let mut record = StoreRecord::new("waverly");
        record.store_name = "Waverly".to_string();
        record.email = "sales@example.com".to_string();
        record.phone = "(615) 815-6734".to_string();
        record.address = "1004 US-70".to_string();
        StoreForm::loading("waverly").loaded(Some(record))
    }

    #[test]
    fn test_missing_record_keeps_blank_form() {
        let form = StoreForm::loading("bonaqua").loaded(None);
        assert_eq!(form.status(), FormStatus::Ready);
        assert_eq!(form.record().location, "bonaqua");
        assert_eq!(form.record().country, "USA");
    }

    #[test]
    fn test_edits_do_not_touch_previous_value() {
        let form = ready_form();
        let edited = form.with_field(StoreField::City, "Waverly").unwrap();
        assert_eq!(form.record().city, "");
        assert_eq!(edited.record().city, "Waverly");
    }

    #[test]
    fn test_submit_while_loading_is_ignored() {
        let form = StoreForm::loading("waverly");
        assert_eq!(form.submit(), Submission::InFlight);
    }

    #[test]
    fn test_submit_rejects_with_first_violation() {
        let form = ready_form().with_field(StoreField::StoreName, "").unwrap();
        match form.submit() {
            Submission::Rejected(rejected) => {
                assert_eq!(rejected.banner(), Some(&Banner::error("Store name is required")));
                assert_eq!(rejected.status(), FormStatus::Ready);
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_submit_rejects_inverted_hours() {
        let mut hours = WeekHours::default();
        hours.set_time(Weekday::Monday, crate::models::TimeField::Close, "06:00").unwrap();
        let form = ready_form().with_hours(hours);
        assert!(matches!(form.submit(), Submission::Rejected(_)));
    }

    #[test]
    fn test_save_round_trip() {
        let form = ready_form();
        let Submission::Ready { form: saving, payload } = form.submit() else {
            panic!("expected ready submission");
        };
        assert!(saving.is_busy());
        assert_eq!(saving.submit(), Submission::InFlight);
        assert_eq!(&payload, form.record());

        let failed = saving.save_failed();
        assert_eq!(failed.record(), form.record());
        assert_eq!(failed.banner().unwrap().text, STORE_SAVE_FAILED_MESSAGE);
        assert!(!failed.is_busy());

        let saved = saving.save_succeeded(payload);
        assert_eq!(saved.banner().unwrap().kind, BannerKind::Success);
        assert!(saved.dismiss_banner().banner().is_none());
    }

    #[test]
    fn test_load_failed_banner() {
        let form = StoreForm::loading("waverly").load_failed();
        assert_eq!(
            form.banner().unwrap().text,
            "Failed to load store. Please try again."
        );
    }

    #[test]
    fn test_contact_form_flow() {
        let form = ContactForm::new("waverly")
            .with_name("Pat")
            .with_phone("615-555-1234")
            .with_message("Need a quote");

        let Submission::Ready { form: sending, payload } = form.submit() else {
            panic!("expected ready submission");
        };
        assert_eq!(sending.button_label(), "Sending...");
        assert_eq!(payload.location, "waverly");

        let failed = sending.failed();
        assert_eq!(failed.fields().name, "Pat");
        assert_eq!(failed.banner().unwrap().text, CONTACT_FAILED_MESSAGE);

        let sent = sending.succeeded();
        assert_eq!(sent.fields().name, "");
        assert_eq!(sent.fields().location, "waverly");
        assert_eq!(sent.button_label(), "Send Message");
    }

    #[test]
    fn test_contact_form_requires_message() {
        let form = ContactForm::new("waverly").with_name("Pat").with_phone("615");
        match form.submit() {
            Submission::Rejected(rejected) => {
                assert_eq!(rejected.banner().unwrap().text, "Message is required")
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }
}
