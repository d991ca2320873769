use crate::day::DayOfWeek;
use crate::error::{ParseError, StoreError};
use crate::location::LocationId;
use crate::time::Time;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tabled::Tabled;

pub type BookingId = Arc<str>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn is_confirmed(self) -> bool {
        self == BookingStatus::Confirmed
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingStatus::Confirmed => write!(f, "{}", "confirmed".green()),
            BookingStatus::Cancelled => write!(f, "{}", "cancelled".red()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LessonType {
    #[default]
    Private,
    Group,
}

impl fmt::Display for LessonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LessonType::Private => write!(f, "private"),
            LessonType::Group => write!(f, "group"),
        }
    }
}

impl FromStr for LessonType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "private" | "p" => Ok(LessonType::Private),
            "group" | "g" => Ok(LessonType::Group),
            _ => Err(ParseError::UnknownLessonType(s.to_string())),
        }
    }
}

/// A recurring weekly lesson. Only `location_id`, `day_of_week`, the times and
/// `status` matter to availability; the rest is bookkeeping for the coach.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Tabled)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(default = "Booking::unnamed")]
    pub id: BookingId,
    #[tabled(rename = "location")]
    pub location_id: LocationId,
    #[serde(default)]
    #[tabled(skip)]
    pub location_name: String,
    #[tabled(rename = "day")]
    pub day_of_week: DayOfWeek,
    #[tabled(rename = "start")]
    pub start_time: Time,
    #[tabled(rename = "end")]
    pub end_time: Time,
    #[serde(default)]
    pub status: BookingStatus,
    #[serde(default)]
    #[tabled(rename = "client")]
    pub client_name: String,
    #[serde(default)]
    #[tabled(rename = "phone")]
    pub client_phone: String,
    #[serde(default)]
    #[tabled(rename = "type")]
    pub lesson_type: LessonType,
    #[serde(default = "Booking::single")]
    #[tabled(rename = "size")]
    pub group_size: u32,
    #[serde(default)]
    pub notes: String,
}

impl Booking {
    fn unnamed() -> BookingId {
        Arc::from("")
    }

    fn single() -> u32 {
        1
    }

    pub fn is_confirmed(&self) -> bool {
        self.status.is_confirmed()
    }

    /// Confirmed lessons must run forwards and finish by midnight.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.start_time >= self.end_time || self.end_time.minutes() > Time::MINUTES_PER_DAY {
            return Err(StoreError::InvalidBooking {
                id: self.id.clone(),
                start: self.start_time,
                end: self.end_time,
            });
        }
        Ok(())
    }

    pub fn overlaps(&self, start: Time, end: Time) -> bool {
        Time::is_overlapping(&(self.start_time, self.end_time), &(start, end))
    }
}

/// What a coach fills in to create a booking; the end time and status are derived.
#[derive(Clone, Debug, PartialEq)]
pub struct BookingRequest {
    pub location_id: LocationId,
    pub day_of_week: DayOfWeek,
    pub start_time: Time,
    pub client_name: String,
    pub client_phone: String,
    pub lesson_type: LessonType,
    pub group_size: u32,
    pub notes: String,
}

impl BookingRequest {
    pub fn private(location_id: &str, day_of_week: DayOfWeek, start_time: Time, client: &str) -> Self {
        BookingRequest {
            location_id: Arc::from(location_id),
            day_of_week,
            start_time,
            client_name: client.to_string(),
            client_phone: String::new(),
            lesson_type: LessonType::Private,
            group_size: 1,
            notes: String::new(),
        }
    }
}
