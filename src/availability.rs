//! Bookable lesson slots for a coach's week at one client location.
//!
//! Everything here is a pure function of its arguments. Callers recompute the
//! whole week whenever hours, settings or bookings change.

use crate::booking::Booking;
use crate::day::DayOfWeek;
use crate::hours::{WeeklyHours, WorkingHours};
use crate::time::Time;
use serde::{Deserialize, Serialize};
use std::iter;
use tabled::Tabled;
use tracing::{debug, trace};

/// Distance between consecutive candidate start times, independent of lesson length.
pub const SLOT_INCREMENT: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Tabled)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    #[tabled(rename = "start")]
    pub start_time: Time,
    #[tabled(rename = "end")]
    pub end_time: Time,
}

impl std::fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.start_time.to_12h(), self.end_time.to_12h())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayAvailability {
    pub day_of_week: DayOfWeek,
    pub slots: Vec<TimeSlot>,
}

#[derive(Debug, Clone, Copy)]
pub struct AvailabilityInput<'a> {
    pub working_hours: &'a WeeklyHours,
    pub lesson_duration_minutes: u32,
    pub travel_buffer_minutes: u32,
    pub confirmed_bookings: &'a [Booking],
    pub client_location_id: &'a str,
}

/// Candidate slots of `lesson_duration` minutes starting every [`SLOT_INCREMENT`]
/// minutes from `window_start`, as long as they end by `window_end`.
///
/// With lessons longer than the increment, consecutive slots overlap.
pub fn generate_slots(window_start: Time, window_end: Time, lesson_duration: u32) -> Vec<TimeSlot> {
    iter::successors(Some(window_start), |start| start.checked_add(SLOT_INCREMENT))
        .map_while(|start| {
            let end = start
                .checked_add(lesson_duration)
                .filter(|end| *end <= window_end)?;
            Some(TimeSlot {
                start_time: start,
                end_time: end,
            })
        })
        .collect()
}

/// Open slots for one day.
///
/// `bookings` should already be scoped to the day; cancelled ones are ignored.
/// A booking at a location other than `client_location_id` pushes the
/// neighbouring gap edges away from it by `travel_buffer` minutes.
pub fn calculate_day_availability<'a>(
    hours: &WorkingHours,
    bookings: impl IntoIterator<Item = &'a Booking>,
    lesson_duration: u32,
    travel_buffer: u32,
    client_location_id: &str,
) -> Vec<TimeSlot> {
    if !hours.enabled {
        return Vec::new();
    }

    let mut day_bookings = bookings
        .into_iter()
        .filter(|b| b.is_confirmed())
        .collect::<Vec<&Booking>>();
    day_bookings.sort_by_key(|b| b.start_time);

    if day_bookings.is_empty() {
        return generate_slots(hours.start_time, hours.end_time, lesson_duration);
    }

    let buffer_around = |booking: &Booking| {
        if *booking.location_id == *client_location_id {
            0
        } else {
            travel_buffer
        }
    };

    // start of day, each booking, end of day
    let edges = iter::once(None)
        .chain(day_bookings.iter().copied().map(Some))
        .chain(iter::once(None))
        .collect::<Vec<Option<&Booking>>>();

    edges
        .windows(2)
        .flat_map(|pair| {
            let (before, after) = (pair[0], pair[1]);
            let gap_start = before.map_or(hours.start_time, |b| b.end_time);
            let gap_end = after.map_or(hours.end_time, |b| b.start_time);

            let usable_start = gap_start + before.map_or(0, buffer_around);
            let usable_end = gap_end.checked_sub(after.map_or(0, buffer_around));

            match usable_end {
                Some(usable_end) if usable_start + lesson_duration <= usable_end => {
                    trace!(%usable_start, %usable_end, "open gap");
                    generate_slots(usable_start, usable_end, lesson_duration)
                }
                _ => Vec::new(),
            }
        })
        .collect()
}

/// Open slots for every day of the week, Monday first. Days without a
/// working-hours record get no slots.
pub fn calculate_availability(input: &AvailabilityInput<'_>) -> Vec<DayAvailability> {
    let week = DayOfWeek::ALL
        .into_iter()
        .map(|day| {
            let slots = input
                .working_hours
                .get(day)
                .map(|hours| {
                    calculate_day_availability(
                        hours,
                        input
                            .confirmed_bookings
                            .iter()
                            .filter(|b| b.day_of_week == day),
                        input.lesson_duration_minutes,
                        input.travel_buffer_minutes,
                        input.client_location_id,
                    )
                })
                .unwrap_or_default();
            DayAvailability {
                day_of_week: day,
                slots,
            }
        })
        .collect::<Vec<_>>();

    debug!(
        location = input.client_location_id,
        slots = week.iter().map(|d| d.slots.len()).sum::<usize>(),
        "computed weekly availability"
    );
    week
}
