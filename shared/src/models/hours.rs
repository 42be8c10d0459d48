//! Weekly operating hours
//!
//! A store's week is a fixed, total set of seven day entries. Times are kept
//! as `HH:MM` strings (the shape the browser time inputs produce and the data
//! store persists), and parsed into [`TimeOfDay`] whenever they are checked or
//! displayed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opening time seeded when a closed day is re-opened
pub const DEFAULT_OPEN: &str = "09:00";

/// Closing time seeded when a closed day is re-opened
pub const DEFAULT_CLOSE: &str = "17:00";

/// Errors raised by the weekly schedule model
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HoursError {
    #[error("Invalid time '{0}', expected HH:MM")]
    InvalidTime(String),

    #[error("Unknown day '{0}'")]
    UnknownDay(String),

    #[error("Unknown time field '{0}', expected 'open' or 'close'")]
    UnknownField(String),

    #[error("{day} closes at or before it opens")]
    ClosesBeforeOpening { day: Weekday },
}

// ============================================================================
// Days and fields
// ============================================================================

/// Day of the week, keyed the way the stored hours document keys them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All seven days, Monday first
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Monday through Friday
    pub const WEEKDAYS: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Weekday {
    type Err = HoursError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Weekday::ALL
            .into_iter()
            .find(|day| day.key() == key)
            .ok_or_else(|| HoursError::UnknownDay(s.to_string()))
    }
}

/// Which end of a day's opening window is being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeField {
    Open,
    Close,
}

impl FromStr for TimeField {
    type Err = HoursError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(TimeField::Open),
            "close" => Ok(TimeField::Close),
            _ => Err(HoursError::UnknownField(s.to_string())),
        }
    }
}

// ============================================================================
// Time of day
// ============================================================================

/// A validated 24-hour wall-clock time
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    pub fn new(hour: u8, minute: u8) -> Result<Self, HoursError> {
        if hour > 23 || minute > 59 {
            return Err(HoursError::InvalidTime(format!("{}:{:02}", hour, minute)));
        }
        Ok(Self { hour, minute })
    }

    /// Parse `H:MM` or `HH:MM`
    pub fn parse(value: &str) -> Result<Self, HoursError> {
        let invalid = || HoursError::InvalidTime(value.to_string());

        let (hours, minutes) = value.trim().split_once(':').ok_or_else(invalid)?;
        if hours.is_empty()
            || hours.len() > 2
            || minutes.len() != 2
            || !hours.chars().all(|c| c.is_ascii_digit())
            || !minutes.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        let hour = hours.parse::<u8>().map_err(|_| invalid())?;
        let minute = minutes.parse::<u8>().map_err(|_| invalid())?;
        Self::new(hour, minute).map_err(|_| invalid())
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// 12-hour clock rendering, e.g. `1:05 PM`
    pub fn to_12h(&self) -> String {
        format!("{}:{:02} {}", hour_12(u32::from(self.hour)), self.minute, meridiem(u32::from(self.hour)))
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = HoursError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn hour_12(hour: u32) -> u32 {
    match hour {
        0 => 12,
        h if h > 12 => h - 12,
        h => h,
    }
}

fn meridiem(hour: u32) -> &'static str {
    if hour >= 12 {
        "PM"
    } else {
        "AM"
    }
}

/// Convert a stored `HH:MM` string to 12-hour display.
///
/// Never fails: well-formed input renders as `H:MM AM/PM`, empty input renders
/// as an empty string, and anything with an unreadable hour is echoed back
/// unchanged.
pub fn format_time_12h(time24: &str) -> String {
    if time24.is_empty() {
        return String::new();
    }
    if let Ok(time) = TimeOfDay::parse(time24) {
        return time.to_12h();
    }

    let (hours, minutes) = time24.split_once(':').unwrap_or((time24, "00"));
    match hours.trim().parse::<u32>() {
        Ok(hour) => format!("{}:{} {}", hour_12(hour), minutes, meridiem(hour)),
        Err(_) => time24.to_string(),
    }
}

// ============================================================================
// Day and week
// ============================================================================

/// Opening window for a single day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayHours {
    pub open: String,
    pub close: String,
    pub closed: bool,
}

impl DayHours {
    pub fn open_between(open: &str, close: &str) -> Self {
        Self {
            open: open.to_string(),
            close: close.to_string(),
            closed: false,
        }
    }

    pub fn closed() -> Self {
        Self {
            open: String::new(),
            close: String::new(),
            closed: true,
        }
    }

    /// Flip the closed flag. Closing clears both times; re-opening seeds the
    /// default window instead of restoring the previous one.
    pub fn toggled(&self) -> Self {
        if self.closed {
            Self::open_between(DEFAULT_OPEN, DEFAULT_CLOSE)
        } else {
            Self::closed()
        }
    }

    /// Human-readable hours: `Closed`, `Not Set`, or `9:00 AM - 5:00 PM`
    pub fn display(&self) -> String {
        if self.closed {
            return "Closed".to_string();
        }
        if self.open.is_empty() || self.close.is_empty() {
            return "Not Set".to_string();
        }
        format!("{} - {}", format_time_12h(&self.open), format_time_12h(&self.close))
    }

    /// Canonical `HH:MM` times, checked as [`WeekHours::validate`] does.
    /// Closed days are returned unchanged.
    fn normalized(&self, day: Weekday) -> Result<Self, HoursError> {
        if self.closed {
            return Ok(self.clone());
        }
        let open = parse_optional(&self.open)?;
        let close = parse_optional(&self.close)?;
        if let (Some(open), Some(close)) = (open, close) {
            if close <= open {
                return Err(HoursError::ClosesBeforeOpening { day });
            }
        }
        Ok(Self {
            open: open.map(|t| t.to_string()).unwrap_or_default(),
            close: close.map(|t| t.to_string()).unwrap_or_default(),
            closed: false,
        })
    }
}

fn parse_optional(value: &str) -> Result<Option<TimeOfDay>, HoursError> {
    match value.trim() {
        "" => Ok(None),
        trimmed => TimeOfDay::parse(trimmed).map(Some),
    }
}

/// The full week. Every day is always present; the stored document is
/// rejected if a day is missing or an unknown key appears.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WeekHours {
    pub monday: DayHours,
    pub tuesday: DayHours,
    pub wednesday: DayHours,
    pub thursday: DayHours,
    pub friday: DayHours,
    pub saturday: DayHours,
    pub sunday: DayHours,
}

impl Default for WeekHours {
    fn default() -> Self {
        Self {
            monday: DayHours::open_between("07:00", "17:00"),
            tuesday: DayHours::open_between("07:00", "17:00"),
            wednesday: DayHours::open_between("07:00", "17:00"),
            thursday: DayHours::open_between("07:00", "17:00"),
            friday: DayHours::open_between("07:00", "17:00"),
            saturday: DayHours::open_between("07:00", "12:00"),
            sunday: DayHours::closed(),
        }
    }
}

impl WeekHours {
    /// Same hours every day
    pub fn uniform(hours: DayHours) -> Self {
        Self {
            monday: hours.clone(),
            tuesday: hours.clone(),
            wednesday: hours.clone(),
            thursday: hours.clone(),
            friday: hours.clone(),
            saturday: hours.clone(),
            sunday: hours,
        }
    }

    pub fn day(&self, day: Weekday) -> &DayHours {
        match day {
            Weekday::Monday => &self.monday,
            Weekday::Tuesday => &self.tuesday,
            Weekday::Wednesday => &self.wednesday,
            Weekday::Thursday => &self.thursday,
            Weekday::Friday => &self.friday,
            Weekday::Saturday => &self.saturday,
            Weekday::Sunday => &self.sunday,
        }
    }

    pub fn day_mut(&mut self, day: Weekday) -> &mut DayHours {
        match day {
            Weekday::Monday => &mut self.monday,
            Weekday::Tuesday => &mut self.tuesday,
            Weekday::Wednesday => &mut self.wednesday,
            Weekday::Thursday => &mut self.thursday,
            Weekday::Friday => &mut self.friday,
            Weekday::Saturday => &mut self.saturday,
            Weekday::Sunday => &mut self.sunday,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &DayHours)> + '_ {
        Weekday::ALL.into_iter().map(move |day| (day, self.day(day)))
    }

    pub fn toggle_closed(&mut self, day: Weekday) {
        let toggled = self.day(day).toggled();
        *self.day_mut(day) = toggled;
    }

    /// Replace one time. An empty value clears it; anything else must parse
    /// as `HH:MM` and is stored in canonical form. On error the week is left
    /// untouched.
    pub fn set_time(&mut self, day: Weekday, field: TimeField, value: &str) -> Result<(), HoursError> {
        let normalized = match value.trim() {
            "" => String::new(),
            trimmed => TimeOfDay::parse(trimmed)?.to_string(),
        };

        let entry = self.day_mut(day);
        match field {
            TimeField::Open => entry.open = normalized,
            TimeField::Close => entry.close = normalized,
        }
        Ok(())
    }

    /// Overwrite Monday through Friday with `source`'s hours
    pub fn copy_to_weekdays(&mut self, source: Weekday) {
        self.copy_to(source, &Weekday::WEEKDAYS);
    }

    /// Overwrite every day with `source`'s hours
    pub fn copy_to_all(&mut self, source: Weekday) {
        self.copy_to(source, &Weekday::ALL);
    }

    fn copy_to(&mut self, source: Weekday, targets: &[Weekday]) {
        let hours = self.day(source).clone();
        for &day in targets {
            *self.day_mut(day) = hours.clone();
        }
    }

    pub fn format_for_display(&self, day: Weekday) -> String {
        self.day(day).display()
    }

    /// Check every open day: set times must parse and close after they open.
    /// Days with a missing time are allowed and display as `Not Set`.
    pub fn validate(&self) -> Result<(), HoursError> {
        self.normalized().map(|_| ())
    }

    /// The same week with every set time rewritten as `HH:MM`; fails where
    /// [`WeekHours::validate`] would
    pub fn normalized(&self) -> Result<Self, HoursError> {
        let mut week = self.clone();
        for day in Weekday::ALL {
            *week.day_mut(day) = self.day(day).normalized(day)?;
        }
        Ok(week)
    }
}
