use crate::booking::BookingId;
use crate::day::DayOfWeek;
use crate::location::LocationId;
use crate::time::Time;
use crate::waitlist::WaitlistId;
use std::io;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected HH:MM, got {0:?}")]
    MalformedTime(String),

    #[error("time out of range: {0:?}")]
    TimeOutOfRange(String),

    #[error("unknown day of week: {0:?}")]
    UnknownDay(String),

    #[error("unknown status: {0:?}")]
    UnknownStatus(String),

    #[error("unknown lesson type: {0:?}")]
    UnknownLessonType(String),

    #[error("unknown preferred time: {0:?}")]
    UnknownPreferredTime(String),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to access scenario file: {0}")]
    Io(#[from] io::Error),

    #[error("invalid scenario data: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("unknown location: {0}")]
    UnknownLocation(LocationId),

    #[error("unknown booking: {0}")]
    UnknownBooking(BookingId),

    #[error("unknown waitlist entry: {0}")]
    UnknownWaitlistEntry(WaitlistId),

    #[error("working hours on {day} must start before they end ({start} - {end})")]
    InvalidHours { day: DayOfWeek, start: Time, end: Time },

    #[error("lesson duration must be between 1 and 1440 minutes")]
    InvalidDuration,

    #[error("travel buffer must be at most 1440 minutes")]
    InvalidBuffer,

    #[error("slug {0:?} must be at least 3 characters")]
    InvalidSlug(String),

    #[error("group size must be at least 1")]
    InvalidGroupSize,

    #[error("a lesson starting at {0} would run past midnight")]
    PastMidnight(Time),

    #[error("booking {id} must start before it ends, by midnight ({start} - {end})")]
    InvalidBooking { id: BookingId, start: Time, end: Time },

    #[error("lesson overlaps confirmed booking {0}")]
    Overlap(BookingId),

    #[error("booking {0} is already cancelled")]
    AlreadyCancelled(BookingId),
}
