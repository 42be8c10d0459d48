//! WebAssembly module for the storefront admin and contact pages
//!
//! Provides client-side computation for:
//! - Weekly hours editing and display
//! - Phone number formatting as the user types
//! - Store form edits and validation before save
//! - Contact page location views
//!
//! Structured values cross the boundary as JSON strings.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use shared::{
    failure_message, format_phone_number, format_time_12h, validate_store_record, Banner,
    ContactForm, LocationView, StoreField, StoreForm, StoreRecord, Submission, TimeField,
    WeekHours, Weekday, US_STATES,
};

fn js_error(message: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&message.to_string())
}

fn parse_hours(hours_json: &str) -> Result<WeekHours, JsValue> {
    serde_json::from_str(hours_json).map_err(|e| js_error(format!("Invalid hours JSON: {}", e)))
}

fn parse_store(store_json: &str) -> Result<StoreRecord, JsValue> {
    serde_json::from_str(store_json).map_err(|e| js_error(format!("Invalid store JSON: {}", e)))
}

fn parse_store_form(form_json: &str) -> Result<StoreForm, JsValue> {
    serde_json::from_str(form_json).map_err(|e| js_error(format!("Invalid form JSON: {}", e)))
}

fn parse_contact_form(form_json: &str) -> Result<ContactForm, JsValue> {
    serde_json::from_str(form_json).map_err(|e| js_error(format!("Invalid form JSON: {}", e)))
}

fn parse_day(day: &str) -> Result<Weekday, JsValue> {
    day.parse().map_err(js_error)
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(js_error)
}

// ============================================================================
// Hours
// ============================================================================

/// `HH:MM` to `h:MM AM/PM`
#[wasm_bindgen]
pub fn format_time(time: &str) -> String {
    format_time_12h(time)
}

/// One day's display text: `Closed`, `Not Set`, or a time range
#[wasm_bindgen]
pub fn format_day_hours(hours_json: &str, day: &str) -> Result<String, JsValue> {
    let hours = parse_hours(hours_json)?;
    Ok(hours.format_for_display(parse_day(day)?))
}

/// The week a new store starts with
#[wasm_bindgen]
pub fn default_week_hours() -> Result<String, JsValue> {
    to_json(&WeekHours::default())
}

#[wasm_bindgen]
pub fn toggle_day_closed(hours_json: &str, day: &str) -> Result<String, JsValue> {
    let mut hours = parse_hours(hours_json)?;
    hours.toggle_closed(parse_day(day)?);
    to_json(&hours)
}

/// Set `open` or `close` for a day; an empty value clears it
#[wasm_bindgen]
pub fn set_day_time(hours_json: &str, day: &str, field: &str, value: &str) -> Result<String, JsValue> {
    let mut hours = parse_hours(hours_json)?;
    let field: TimeField = field.parse().map_err(js_error)?;
    hours
        .set_time(parse_day(day)?, field, value)
        .map_err(js_error)?;
    to_json(&hours)
}

#[wasm_bindgen]
pub fn copy_day_to_weekdays(hours_json: &str, day: &str) -> Result<String, JsValue> {
    let mut hours = parse_hours(hours_json)?;
    hours.copy_to_weekdays(parse_day(day)?);
    to_json(&hours)
}

#[wasm_bindgen]
pub fn copy_day_to_all(hours_json: &str, day: &str) -> Result<String, JsValue> {
    let mut hours = parse_hours(hours_json)?;
    hours.copy_to_all(parse_day(day)?);
    to_json(&hours)
}

/// Seven `{ day, label, hours }` rows for the preview table
#[wasm_bindgen]
pub fn hours_preview(hours_json: &str) -> Result<String, JsValue> {
    let hours = parse_hours(hours_json)?;
    to_json(&shared::hours_rows(&hours))
}

// ============================================================================
// Store form
// ============================================================================

/// Reformat a phone input as `(XXX) XXX-XXXX`
#[wasm_bindgen]
pub fn format_phone(input: &str) -> String {
    format_phone_number(input)
}

/// Apply one field edit, returning the updated record
#[wasm_bindgen]
pub fn edit_store_field(store_json: &str, field: &str, value: &str) -> Result<String, JsValue> {
    let mut record = parse_store(store_json)?;
    let field: StoreField = field.parse().map_err(js_error)?;
    record.set_field(field, value).map_err(js_error)?;
    to_json(&record)
}

/// The first guard message that blocks saving, or an empty string
#[wasm_bindgen]
pub fn validate_store(store_json: &str) -> Result<String, JsValue> {
    let record = parse_store(store_json)?;
    if let Err(e) = validate_store_record(&record) {
        return Ok(e.to_string());
    }
    Ok(record
        .hours_of_operation
        .validate()
        .err()
        .map(|e| e.to_string())
        .unwrap_or_default())
}

/// Options for the state dropdown
#[wasm_bindgen]
pub fn us_states() -> js_sys::Array {
    US_STATES.iter().map(|s| JsValue::from_str(s)).collect()
}

/// Banner for a failed round trip; the detail only goes to the console
#[wasm_bindgen]
pub fn failure_banner(action: &str, detail: &str) -> Result<String, JsValue> {
    web_sys::console::error_1(&JsValue::from_str(&format!("{}: {}", action, detail)));
    to_json(&failure_banner_for(action))
}

fn failure_banner_for(action: &str) -> Banner {
    Banner::error(failure_message(action))
}

/// What the page should do after a submit click
#[derive(Serialize)]
struct SubmitOutcome<F, P> {
    /// `ready`, `rejected` or `in_flight`
    outcome: &'static str,
    /// Form state to render next
    form: F,
    /// Body to send, only when `ready`
    #[serde(skip_serializing_if = "Option::is_none")]
    payload: Option<P>,
}

fn submit_outcome<F, P>(current: F, submission: Submission<F, P>) -> SubmitOutcome<F, P> {
    match submission {
        Submission::Ready { form, payload } => SubmitOutcome {
            outcome: "ready",
            form,
            payload: Some(payload),
        },
        Submission::Rejected(form) => SubmitOutcome {
            outcome: "rejected",
            form,
            payload: None,
        },
        Submission::InFlight => SubmitOutcome {
            outcome: "in_flight",
            form: current,
            payload: None,
        },
    }
}

/// Store editor waiting for `location` to load
#[wasm_bindgen]
pub fn store_form_loading(location: &str) -> Result<String, JsValue> {
    to_json(&StoreForm::loading(location))
}

/// Apply the load result; pass an empty string when the location has no row
#[wasm_bindgen]
pub fn store_form_loaded(form_json: &str, store_json: &str) -> Result<String, JsValue> {
    let form = parse_store_form(form_json)?;
    let record = match store_json.trim() {
        "" | "null" => None,
        json => Some(parse_store(json)?),
    };
    to_json(&form.loaded(record))
}

#[wasm_bindgen]
pub fn store_form_load_failed(form_json: &str) -> Result<String, JsValue> {
    to_json(&parse_store_form(form_json)?.load_failed())
}

#[wasm_bindgen]
pub fn store_form_edit(form_json: &str, field: &str, value: &str) -> Result<String, JsValue> {
    let form = parse_store_form(form_json)?;
    let field: StoreField = field.parse().map_err(js_error)?;
    to_json(&form.with_field(field, value).map_err(js_error)?)
}

#[wasm_bindgen]
pub fn store_form_set_hours(form_json: &str, hours_json: &str) -> Result<String, JsValue> {
    let form = parse_store_form(form_json)?;
    to_json(&form.with_hours(parse_hours(hours_json)?))
}

#[wasm_bindgen]
pub fn store_form_dismiss_banner(form_json: &str) -> Result<String, JsValue> {
    to_json(&parse_store_form(form_json)?.dismiss_banner())
}

/// `{ outcome, form, payload? }`; a second click while saving is `in_flight`
#[wasm_bindgen]
pub fn store_form_submit(form_json: &str) -> Result<String, JsValue> {
    let form = parse_store_form(form_json)?;
    let submission = form.submit();
    to_json(&submit_outcome(form, submission))
}

#[wasm_bindgen]
pub fn store_form_save_succeeded(form_json: &str, saved_json: &str) -> Result<String, JsValue> {
    let form = parse_store_form(form_json)?;
    to_json(&form.save_succeeded(parse_store(saved_json)?))
}

#[wasm_bindgen]
pub fn store_form_save_failed(form_json: &str, detail: &str) -> Result<String, JsValue> {
    web_sys::console::error_1(&JsValue::from_str(&format!("save store: {}", detail)));
    to_json(&parse_store_form(form_json)?.save_failed())
}

// ============================================================================
// Contact page
// ============================================================================

#[wasm_bindgen]
pub fn contact_form_new(location: &str) -> Result<String, JsValue> {
    to_json(&ContactForm::new(location))
}

/// Edit `name`, `phone` or `message`
#[wasm_bindgen]
pub fn contact_form_edit(form_json: &str, field: &str, value: &str) -> Result<String, JsValue> {
    let form = parse_contact_form(form_json)?;
    let next = match field {
        "name" => form.with_name(value),
        "phone" => form.with_phone(value),
        "message" => form.with_message(value),
        other => return Err(js_error(format!("Unknown contact field: {}", other))),
    };
    to_json(&next)
}

#[wasm_bindgen]
pub fn contact_form_button_label(form_json: &str) -> Result<String, JsValue> {
    Ok(parse_contact_form(form_json)?.button_label().to_string())
}

/// `{ outcome, form, payload? }`; a second click while sending is `in_flight`
#[wasm_bindgen]
pub fn contact_form_submit(form_json: &str) -> Result<String, JsValue> {
    let form = parse_contact_form(form_json)?;
    let submission = form.submit();
    to_json(&submit_outcome(form, submission))
}

/// Clear the fields and show the thank-you banner
#[wasm_bindgen]
pub fn contact_form_succeeded(form_json: &str) -> Result<String, JsValue> {
    to_json(&parse_contact_form(form_json)?.succeeded())
}

#[wasm_bindgen]
pub fn contact_form_failed(form_json: &str, detail: &str) -> Result<String, JsValue> {
    web_sys::console::error_1(&JsValue::from_str(&format!("send message: {}", detail)));
    to_json(&parse_contact_form(form_json)?.failed())
}

#[wasm_bindgen]
pub fn location_view(store_json: &str) -> Result<String, JsValue> {
    let record = parse_store(store_json)?;
    to_json(&LocationView::from(&record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn default_json() -> String {
        default_week_hours().unwrap()
    }

    #[test]
    fn test_format_helpers() {
        assert_eq!(format_time("13:30"), "1:30 PM");
        assert_eq!(format_phone("6158156734"), "(615) 815-6734");
        assert_eq!(format_phone("615"), "615");
    }

    #[test]
    fn test_hours_edits() {
        let hours = default_json();
        assert_eq!(format_day_hours(&hours, "sunday").unwrap(), "Closed");

        let hours = toggle_day_closed(&hours, "sunday").unwrap();
        assert_eq!(format_day_hours(&hours, "sunday").unwrap(), "9:00 AM - 5:00 PM");

        let hours = set_day_time(&hours, "monday", "close", "18:30").unwrap();
        let hours = copy_day_to_weekdays(&hours, "monday").unwrap();
        assert_eq!(format_day_hours(&hours, "friday").unwrap(), "7:00 AM - 6:30 PM");
        assert_eq!(format_day_hours(&hours, "saturday").unwrap(), "7:00 AM - 12:00 PM");

        let hours = copy_day_to_all(&hours, "saturday").unwrap();
        assert_eq!(format_day_hours(&hours, "monday").unwrap(), "7:00 AM - 12:00 PM");
    }

    #[test]
    fn test_hours_preview_rows() {
        let rows: Value = serde_json::from_str(&hours_preview(&default_json()).unwrap()).unwrap();
        assert_eq!(rows.as_array().unwrap().len(), 7);
        assert_eq!(rows[0]["label"], "Monday");
        assert_eq!(rows[6]["hours"], "Closed");
    }

    #[test]
    fn test_store_edits_and_validation() {
        let record = serde_json::to_string(&StoreRecord::new("waverly")).unwrap();
        assert_eq!(validate_store(&record).unwrap(), "Store name is required");

        let record = edit_store_field(&record, "store_name", "Waverly").unwrap();
        let record = edit_store_field(&record, "email", "hello@example.com").unwrap();
        let record = edit_store_field(&record, "phone", "615815").unwrap();
        let parsed: Value = serde_json::from_str(&record).unwrap();
        assert_eq!(parsed["phone"], "(615) 815");
        assert_eq!(validate_store(&record).unwrap(), "Address is required");

        let record = edit_store_field(&record, "address", "1004 US-70").unwrap();
        assert_eq!(validate_store(&record).unwrap(), "");
    }

    #[test]
    fn test_location_view_export() {
        let mut record = StoreRecord::new("waverly");
        record.phone = "(615) 815-6734".to_string();
        let view: Value =
            serde_json::from_str(&location_view(&serde_json::to_string(&record).unwrap()).unwrap())
                .unwrap();
        assert_eq!(view["phone_href"], "tel:6158156734");
    }

    fn submitted(outcome_json: &str) -> Value {
        serde_json::from_str(outcome_json).unwrap()
    }

    #[test]
    fn test_store_form_flow() {
        let form = store_form_loading("waverly").unwrap();
        assert_eq!(submitted(&store_form_submit(&form).unwrap())["outcome"], "in_flight");

        let form = store_form_loaded(&form, "").unwrap();
        let rejected = submitted(&store_form_submit(&form).unwrap());
        assert_eq!(rejected["outcome"], "rejected");
        assert_eq!(rejected["form"]["banner"]["text"], "Store name is required");
        assert!(rejected.get("payload").is_none());

        let form = store_form_edit(&form, "store_name", "Waverly").unwrap();
        let form = store_form_edit(&form, "email", "hello@example.com").unwrap();
        let form = store_form_edit(&form, "phone", "6158156734").unwrap();
        let form = store_form_edit(&form, "address", "1004 US-70").unwrap();

        let ready = submitted(&store_form_submit(&form).unwrap());
        assert_eq!(ready["outcome"], "ready");
        assert_eq!(ready["form"]["status"], "saving");
        assert_eq!(ready["payload"]["phone"], "(615) 815-6734");

        let saving = ready["form"].to_string();
        assert_eq!(submitted(&store_form_submit(&saving).unwrap())["outcome"], "in_flight");

        let saved = store_form_save_succeeded(&saving, &ready["payload"].to_string()).unwrap();
        let saved: Value = serde_json::from_str(&saved).unwrap();
        assert_eq!(saved["status"], "ready");
        assert_eq!(saved["banner"]["text"], "Store updated successfully!");
        assert_eq!(saved["banner"]["kind"], "success");

        let dismissed = store_form_dismiss_banner(&saved.to_string()).unwrap();
        let dismissed: Value = serde_json::from_str(&dismissed).unwrap();
        assert!(dismissed["banner"].is_null());
    }

    #[test]
    fn test_store_form_set_hours_and_load_failure() {
        let form = store_form_loading("waverly").unwrap();
        let failed: Value =
            serde_json::from_str(&store_form_load_failed(&form).unwrap()).unwrap();
        assert_eq!(failed["banner"]["text"], "Failed to load store. Please try again.");

        let closed = copy_day_to_all(&default_json(), "sunday").unwrap();
        let form = store_form_set_hours(&failed.to_string(), &closed).unwrap();
        let form: Value = serde_json::from_str(&form).unwrap();
        assert_eq!(form["record"]["hours_of_operation"]["monday"]["closed"], true);
    }

    #[test]
    fn test_contact_form_flow() {
        let form = contact_form_new("waverly").unwrap();
        let rejected = submitted(&contact_form_submit(&form).unwrap());
        assert_eq!(rejected["outcome"], "rejected");
        assert_eq!(rejected["form"]["banner"]["text"], "Name is required");

        let form = contact_form_edit(&form, "name", "Pat").unwrap();
        let form = contact_form_edit(&form, "phone", "(615) 555-1234").unwrap();
        let form = contact_form_edit(&form, "message", " Do you cater? ").unwrap();
        assert_eq!(contact_form_button_label(&form).unwrap(), "Send Message");

        let ready = submitted(&contact_form_submit(&form).unwrap());
        assert_eq!(ready["outcome"], "ready");
        assert_eq!(ready["payload"]["message"], "Do you cater?");
        assert_eq!(ready["payload"]["location"], "waverly");

        let sending = ready["form"].to_string();
        assert_eq!(contact_form_button_label(&sending).unwrap(), "Sending...");
        assert_eq!(submitted(&contact_form_submit(&sending).unwrap())["outcome"], "in_flight");

        let sent: Value = serde_json::from_str(&contact_form_succeeded(&sending).unwrap()).unwrap();
        assert_eq!(sent["fields"]["name"], "");
        assert_eq!(sent["fields"]["location"], "waverly");
        assert_eq!(
            sent["banner"]["text"],
            "Message sent successfully! We'll get back to you soon."
        );
    }

    #[test]
    fn test_failure_banner_text() {
        let banner = failure_banner_for("save store");
        assert_eq!(banner.text, "Failed to save store. Please try again.");
    }
}
