//! Venue feed data model.
//!
//! Field names follow the feed JSON exactly (`days`, `dayparts`,
//! `starttime`, ...). Every field is required; unknown fields are ignored.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::directory::{self, VenueCategory};
use crate::schedule::FEED_DATE_FORMAT;

/// A single dining venue (dining hall or retail outlet).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venue {
    /// Feed identifier.
    pub id: i64,
    /// Display name, also the key into the directory tables.
    pub name: String,
    /// Street address.
    pub address: String,
    /// Venue photo URL.
    #[serde(rename = "image")]
    pub image_url: String,
    /// Per-day schedule in feed order (typically the current week).
    #[serde(rename = "days")]
    pub schedule: Vec<DaySchedule>,
}

impl Venue {
    /// Returns the directory section this venue is listed under.
    #[must_use]
    pub fn category(&self) -> VenueCategory {
        directory::category_for(&self.name)
    }

    /// Returns the venue's detail page, or the placeholder page for
    /// unrecognized names.
    #[must_use]
    pub fn detail_page_url(&self) -> &'static str {
        directory::detail_page_url(&self.name)
    }

    /// Finds the schedule entry whose `date` matches the given calendar day.
    ///
    /// Entries with an unparseable date never match.
    #[must_use]
    pub fn schedule_on(&self, date: NaiveDate) -> Option<&DaySchedule> {
        self.schedule
            .iter()
            .find(|day| day.calendar_date() == Some(date))
    }
}

/// One calendar day of a venue's schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    /// Date token (`YYYY-MM-DD`).
    pub date: String,
    /// Open/closed flag for the whole day.
    pub status: DayStatus,
    /// Open intervals for the day (possibly empty).
    #[serde(rename = "dayparts")]
    pub intervals: Vec<Interval>,
}

impl DaySchedule {
    /// Returns `true` when the feed marks this day as open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self.status, DayStatus::Open)
    }

    /// Parses `date` as a calendar day.
    #[must_use]
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, FEED_DATE_FORMAT).ok()
    }
}

/// Day status parsed from the feed's free-text `status` field.
///
/// Anything other than `"open"` or `"closed"` is kept as [`DayStatus::Unknown`]
/// and treated as closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DayStatus {
    /// `"open"`.
    Open,
    /// `"closed"`.
    Closed,
    /// Any other value, preserved verbatim.
    Unknown(String),
}

impl From<String> for DayStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "open" => Self::Open,
            "closed" => Self::Closed,
            _ => Self::Unknown(raw),
        }
    }
}

impl From<DayStatus> for String {
    fn from(status: DayStatus) -> Self {
        match status {
            DayStatus::Open => Self::from("open"),
            DayStatus::Closed => Self::from("closed"),
            DayStatus::Unknown(raw) => raw,
        }
    }
}

/// One contiguous open time range within a day (a "daypart").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    /// Start timestamp (`YYYY-MM-DDTHH:MM:SS`, naive local time).
    #[serde(rename = "starttime")]
    pub start_time: String,
    /// End timestamp, same format as `start_time`.
    #[serde(rename = "endtime")]
    pub end_time: String,
    /// Free-text note.
    pub message: String,
    /// Meal label (e.g. "Lunch").
    pub label: String,
}
