//! Public contact page view of a store

use serde::{Deserialize, Serialize};

use crate::models::{StoreRecord, WeekHours, Weekday};
use crate::validation::phone_digits;

const MAP_EMBED_BASE: &str = "https://maps.google.com/maps";

/// One line of the hours table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HoursRow {
    pub day: Weekday,
    pub label: String,
    pub hours: String,
}

/// Seven display rows, Monday first
pub fn hours_rows(hours: &WeekHours) -> Vec<HoursRow> {
    hours
        .iter()
        .map(|(day, entry)| HoursRow {
            day,
            label: day.label().to_string(),
            hours: entry.display(),
        })
        .collect()
}

/// Everything the contact page renders for one location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocationView {
    pub location: String,
    pub name: String,
    pub street: String,
    pub locality: String,
    pub phone_display: String,
    pub phone_href: String,
    pub sms_href: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_primary: bool,
    pub map_embed_url: String,
    pub hours: Vec<HoursRow>,
}

impl From<&StoreRecord> for LocationView {
    fn from(record: &StoreRecord) -> Self {
        let digits = phone_digits(&record.phone);
        let details = record.details.trim();

        Self {
            location: record.location.clone(),
            name: record.store_name.clone(),
            street: record.address.clone(),
            locality: locality_line(record),
            phone_display: record.phone.clone(),
            phone_href: format!("tel:{}", digits),
            sms_href: format!("sms:{}", digits),
            email: record.email.clone(),
            description: (!details.is_empty()).then(|| details.to_string()),
            is_primary: record.is_primary,
            map_embed_url: map_embed_url(record),
            hours: hours_rows(&record.hours_of_operation),
        }
    }
}

/// `City, State ZIP`, skipping whichever parts are blank
pub fn locality_line(record: &StoreRecord) -> String {
    let region = [record.state.trim(), record.zip_code.trim()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    [record.city.trim(), region.as_str()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Embedded map centred on the store's coordinates, or on its postal
/// address when either coordinate is missing or out of range
pub fn map_embed_url(record: &StoreRecord) -> String {
    let query = match record.coordinates().filter(|c| c.is_valid()) {
        Some(coords) => format!("{},{}", coords.latitude, coords.longitude),
        None => {
            let locality = locality_line(record);
            let full = [record.address.trim(), locality.as_str(), record.country.trim()]
                .into_iter()
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(", ");
            urlencoding::encode(&full).into_owned()
        }
    };
    format!("{}?q={}&z=15&output=embed", MAP_EMBED_BASE, query)
}

/// Order for the public page: primary store first, then by location
pub fn sort_for_display(views: &mut [LocationView]) {
    views.sort_by(|a, b| {
        b.is_primary
            .cmp(&a.is_primary)
            .then_with(|| a.location.cmp(&b.location))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn waverly() -> StoreRecord {
        let mut record = StoreRecord::new("waverly");
        record.store_name = "Waverly".to_string();
        record.phone = "(615) 815-6734".to_string();
        record.address = "1004 US-70".to_string();
        record.city = "Waverly".to_string();
        record.state = "Tennessee".to_string();
        record.zip_code = "37185".to_string();
        record
    }

    #[test]
    fn test_view_links_and_lines() {
        let view = LocationView::from(&waverly());
        assert_eq!(view.phone_href, "tel:6158156734");
        assert_eq!(view.sms_href, "sms:6158156734");
        assert_eq!(view.phone_display, "(615) 815-6734");
        assert_eq!(view.locality, "Waverly, Tennessee 37185");
        assert!(view.description.is_none());
        assert_eq!(view.hours.len(), 7);
        assert_eq!(view.hours[0].label, "Monday");
        assert_eq!(view.hours[0].hours, "7:00 AM - 5:00 PM");
        assert_eq!(view.hours[6].hours, "Closed");
    }

    #[test]
    fn test_map_url_prefers_coordinates() {
        let mut record = waverly();
        record.latitude = Some(Decimal::from_str("36.085351").unwrap());
        record.longitude = Some(Decimal::from_str("-87.759946").unwrap());
        assert_eq!(
            map_embed_url(&record),
            "https://maps.google.com/maps?q=36.085351,-87.759946&z=15&output=embed"
        );
    }

    #[test]
    fn test_map_url_falls_back_to_address() {
        assert_eq!(
            map_embed_url(&waverly()),
            "https://maps.google.com/maps?q=1004%20US-70%2C%20Waverly%2C%20Tennessee%2037185%2C%20USA&z=15&output=embed"
        );
    }

    #[test]
    fn test_map_url_ignores_out_of_range_coordinates() {
        let mut record = waverly();
        record.latitude = Some(Decimal::from_str("136.08").unwrap());
        record.longitude = Some(Decimal::from_str("-87.75").unwrap());
        assert_eq!(map_embed_url(&record), map_embed_url(&waverly()));
    }

    #[test]
    fn test_locality_skips_blanks() {
        let mut record = waverly();
        record.state.clear();
        assert_eq!(locality_line(&record), "Waverly, 37185");
        record.city.clear();
        record.zip_code.clear();
        assert_eq!(locality_line(&record), "");
    }

    #[test]
    fn test_primary_sorts_first() {
        let mut bonaqua = waverly();
        bonaqua.location = "bonaqua".to_string();
        let mut primary = waverly();
        primary.is_primary = true;

        let mut views = vec![LocationView::from(&bonaqua), LocationView::from(&primary)];
        sort_for_display(&mut views);
        assert_eq!(views[0].location, "waverly");
        assert_eq!(views[1].location, "bonaqua");
    }
}
