use crate::availability::TimeSlot;
use crate::booking::{Booking, BookingStatus, LessonType};
use crate::day::DayOfWeek;
use crate::hours::{WeeklyHours, WorkingHours};
use crate::time::Time;
use proptest::prelude::Strategy;
use proptest::prop_oneof;
use proptest::strategy::Just;
use std::sync::Arc;

pub fn t(s: &str) -> Time {
    s.parse().unwrap()
}

pub fn hours(day: DayOfWeek, start: &str, end: &str) -> WorkingHours {
    WorkingHours::new(day, t(start), t(end))
}

pub fn closed(day: DayOfWeek) -> WorkingHours {
    WorkingHours {
        enabled: false,
        ..hours(day, "09:00", "17:00")
    }
}

pub fn booking(location_id: &str, day: DayOfWeek, start: &str, end: &str) -> Booking {
    booking_at(location_id, day, t(start), t(end), BookingStatus::Confirmed)
}

pub fn cancelled(location_id: &str, day: DayOfWeek, start: &str, end: &str) -> Booking {
    booking_at(location_id, day, t(start), t(end), BookingStatus::Cancelled)
}

pub fn booking_at(
    location_id: &str,
    day: DayOfWeek,
    start: Time,
    end: Time,
    status: BookingStatus,
) -> Booking {
    Booking {
        id: Arc::from(format!("{}-{}-{}", location_id, day, start).as_str()),
        location_id: Arc::from(location_id),
        location_name: location_id.to_string(),
        day_of_week: day,
        start_time: start,
        end_time: end,
        status,
        client_name: "client".to_string(),
        client_phone: String::new(),
        lesson_type: LessonType::Private,
        group_size: 1,
        notes: String::new(),
    }
}

pub fn no_bookings() -> Vec<Booking> {
    Vec::new()
}

pub fn starts(slots: &[TimeSlot]) -> Vec<String> {
    slots.iter().map(|s| s.start_time.to_string()).collect()
}

pub fn arb_location() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("POOL"), Just("PARK"), Just("GYM")]
}

/// A working window on a half-hour grid, at least one hour long.
pub fn arb_window() -> impl Strategy<Value = (Time, Time)> {
    (0..30u32, 2..16u32).prop_map(|(start, len)| (Time(start * 30), Time(start * 30 + len * 30)))
}

/// Non-overlapping confirmed bookings inside `[6:00, 22:00)`, sorted by start.
pub fn arb_day_bookings(day: DayOfWeek) -> impl Strategy<Value = Vec<Booking>> {
    proptest::collection::vec((arb_location(), 0..4u32, 1..5u32), 0..6).prop_map(move |specs| {
        let mut cursor = Time::from_hm(6, 0);
        specs
            .into_iter()
            .filter_map(|(loc, pause, len)| {
                let start = cursor + pause * 15;
                let end = start + len * 15;
                if end > Time::from_hm(22, 0) {
                    return None;
                }
                cursor = end;
                Some(booking_at(loc, day, start, end, BookingStatus::Confirmed))
            })
            .collect()
    })
}

pub fn arb_week_hours() -> impl Strategy<Value = WeeklyHours> {
    proptest::collection::vec(
        (proptest::bool::ANY, proptest::bool::weighted(0.8), arb_window()),
        7,
    )
    .prop_map(|days| {
        WeeklyHours::from_records(DayOfWeek::ALL.into_iter().zip(days).filter_map(
            |(day, (present, enabled, (start, end)))| {
                present.then(|| WorkingHours {
                    day,
                    enabled,
                    start_time: start,
                    end_time: end,
                })
            },
        ))
    })
}
