use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::ops::Add;
use std::str::FromStr;

/// Wall-clock time as minutes from midnight, provider-local.
///
/// `24:00` is accepted as the end of the day so that a lesson finishing at
/// midnight survives a save and reload.
#[derive(Debug, Clone, Copy, Ord, Eq, PartialEq, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Time(pub u32);

impl Time {
    pub const MINUTES_PER_DAY: u32 = 1440;

    pub fn from_hm(hours: u32, minutes: u32) -> Time {
        Time(hours * 60 + minutes)
    }

    pub fn minutes(self) -> u32 {
        self.0
    }

    pub fn checked_add(self, rhs: u32) -> Option<Time> {
        self.0.checked_add(rhs).map(Time)
    }

    pub fn checked_sub(self, rhs: u32) -> Option<Time> {
        self.0.checked_sub(rhs).map(Time)
    }

    pub(crate) fn is_overlapping(time: &(Time, Time), window: &(Time, Time)) -> bool {
        time.0 < window.1 && time.1 > window.0
    }

    /// 12-hour presentation, e.g. `9:05 AM`. Hours 0 and 12 both render as 12.
    pub fn to_12h(self) -> String {
        let hours = self.0 / 60;
        let mins = self.0 % 60;
        let period = if hours % 24 >= 12 { "PM" } else { "AM" };
        let display_hours = match hours % 12 {
            0 => 12,
            h => h,
        };
        format!("{}:{:02} {}", display_hours, mins, period)
    }
}

impl std::fmt::Display for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl FromStr for Time {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ParseError::MalformedTime(s.to_string());
        let (hours, minutes) = s.trim().split_once(':').ok_or_else(malformed)?;
        let is_number = |part: &str| {
            !part.is_empty() && part.len() <= 2 && part.bytes().all(|b| b.is_ascii_digit())
        };
        if !is_number(hours) || minutes.len() != 2 || !is_number(minutes) {
            return Err(malformed());
        }
        let hours: u32 = hours.parse().map_err(|_| malformed())?;
        let minutes: u32 = minutes.parse().map_err(|_| malformed())?;
        let end_of_day = hours == 24 && minutes == 0;
        if (hours >= 24 && !end_of_day) || minutes >= 60 {
            return Err(ParseError::TimeOutOfRange(s.to_string()));
        }
        Ok(Time::from_hm(hours, minutes))
    }
}

impl TryFrom<String> for Time {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Time> for String {
    fn from(time: Time) -> Self {
        time.to_string()
    }
}

impl Add<u32> for Time {
    type Output = Self;

    fn add(self, rhs: u32) -> Self::Output {
        Time(self.0.saturating_add(rhs))
    }
}
