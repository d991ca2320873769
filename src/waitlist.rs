use crate::day::DayOfWeek;
use crate::error::ParseError;
use crate::location::LocationId;
use crate::time::Time;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tabled::Tabled;

pub type WaitlistId = Arc<str>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaitlistStatus {
    #[default]
    Waiting,
    Contacted,
    Booked,
}

impl fmt::Display for WaitlistStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaitlistStatus::Waiting => write!(f, "{}", "waiting".yellow()),
            WaitlistStatus::Contacted => write!(f, "{}", "contacted".blue()),
            WaitlistStatus::Booked => write!(f, "{}", "booked".green()),
        }
    }
}

impl FromStr for WaitlistStatus {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "w" | "waiting" => Ok(WaitlistStatus::Waiting),
            "c" | "contacted" => Ok(WaitlistStatus::Contacted),
            "b" | "booked" => Ok(WaitlistStatus::Booked),
            _ => Err(ParseError::UnknownStatus(s.to_string())),
        }
    }
}

/// Part of the day a waitlisted client would like a lesson in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreferredTime {
    Morning,
    Afternoon,
    Evening,
    #[default]
    Any,
}

impl PreferredTime {
    const NOON: Time = Time(12 * 60);
    const EVENING: Time = Time(17 * 60);

    /// Whether a lesson starting at `start` falls in this part of the day.
    pub fn accepts(self, start: Time) -> bool {
        match self {
            PreferredTime::Morning => start < Self::NOON,
            PreferredTime::Afternoon => start >= Self::NOON && start < Self::EVENING,
            PreferredTime::Evening => start >= Self::EVENING,
            PreferredTime::Any => true,
        }
    }
}

impl fmt::Display for PreferredTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PreferredTime::Morning => "Morning",
            PreferredTime::Afternoon => "Afternoon",
            PreferredTime::Evening => "Evening",
            PreferredTime::Any => "Any time",
        };
        write!(f, "{}", label)
    }
}

impl FromStr for PreferredTime {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "morning" | "am" => Ok(PreferredTime::Morning),
            "afternoon" | "pm" => Ok(PreferredTime::Afternoon),
            "evening" => Ok(PreferredTime::Evening),
            "any" => Ok(PreferredTime::Any),
            _ => Err(ParseError::UnknownPreferredTime(s.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Tabled)]
#[serde(rename_all = "camelCase")]
pub struct WaitlistEntry {
    pub id: WaitlistId,
    #[tabled(rename = "location")]
    pub location_id: LocationId,
    #[serde(default)]
    #[tabled(skip)]
    pub location_name: String,
    #[tabled(rename = "day")]
    pub day_of_week: DayOfWeek,
    #[serde(default)]
    #[tabled(rename = "preferred")]
    pub preferred_time: PreferredTime,
    #[tabled(rename = "client")]
    pub client_name: String,
    #[serde(default)]
    #[tabled(rename = "phone")]
    pub client_phone: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub status: WaitlistStatus,
}

#[derive(Clone, Debug, PartialEq)]
pub struct WaitlistRequest {
    pub location_id: LocationId,
    pub day_of_week: DayOfWeek,
    pub preferred_time: PreferredTime,
    pub client_name: String,
    pub client_phone: String,
    pub notes: String,
}
