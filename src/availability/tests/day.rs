use crate::availability::calculate_day_availability;
use crate::availability::tests::utils::{booking, cancelled, closed, hours, no_bookings, starts};
use crate::day::DayOfWeek::Monday;

const CLIENT: &str = "POOL";

#[test]
fn test_disabled_day_is_empty() {
    let bookings = vec![booking("PARK", Monday, "10:00", "11:00")];
    let slots = calculate_day_availability(&closed(Monday), &bookings, 60, 30, CLIENT);
    assert!(slots.is_empty());
}

#[test]
fn test_no_bookings_fills_working_hours() {
    let slots = calculate_day_availability(&hours(Monday, "09:00", "17:00"), &no_bookings(), 60, 30, CLIENT);

    assert_eq!(15, slots.len());
    assert_eq!("09:00", slots[0].start_time.to_string());
    assert_eq!("16:00", slots[14].start_time.to_string());
    assert_eq!("17:00", slots[14].end_time.to_string());
}

#[test]
fn test_buffer_around_other_location() {
    let bookings = vec![booking("PARK", Monday, "10:00", "11:00")];
    let slots = calculate_day_availability(
        &hours(Monday, "09:00", "17:00"),
        &bookings,
        60,
        30,
        CLIENT,
    );

    let starts = starts(&slots);
    assert_eq!("11:30", starts[0]);
    assert_eq!("16:00", starts[starts.len() - 1]);
    assert_eq!(10, starts.len());
}

#[test]
fn test_no_buffer_around_same_location() {
    let bookings = vec![booking(CLIENT, Monday, "10:00", "11:00")];
    let slots = calculate_day_availability(
        &hours(Monday, "09:00", "13:00"),
        &bookings,
        60,
        30,
        CLIENT,
    );

    assert_eq!(vec!["09:00", "11:00", "11:30", "12:00"], starts(&slots));
}

#[test]
fn test_back_to_back_same_location() {
    let bookings = vec![
        booking(CLIENT, Monday, "10:00", "11:00"),
        booking(CLIENT, Monday, "11:00", "12:00"),
    ];
    let slots = calculate_day_availability(
        &hours(Monday, "09:00", "14:00"),
        &bookings,
        60,
        30,
        CLIENT,
    );

    assert_eq!(vec!["09:00", "12:00", "12:30", "13:00"], starts(&slots));
}

#[test]
fn test_gap_between_locations_gets_both_buffers() {
    let bookings = vec![
        booking("PARK", Monday, "09:00", "10:00"),
        booking("GYM", Monday, "12:30", "13:30"),
    ];
    let slots = calculate_day_availability(
        &hours(Monday, "09:00", "13:30"),
        &bookings,
        60,
        30,
        CLIENT,
    );

    // 10:00-12:30 shrinks to 10:30-12:00
    assert_eq!(vec!["10:30", "11:00"], starts(&slots));
}

#[test]
fn test_mixed_neighbours_buffer_one_side() {
    let bookings = vec![
        booking(CLIENT, Monday, "09:00", "10:00"),
        booking("GYM", Monday, "12:00", "13:00"),
    ];
    let slots = calculate_day_availability(
        &hours(Monday, "09:00", "13:00"),
        &bookings,
        60,
        30,
        CLIENT,
    );

    assert_eq!(vec!["10:00", "10:30"], starts(&slots));
}

#[test]
fn test_buffer_swallows_small_gap() {
    let bookings = vec![
        booking("PARK", Monday, "09:00", "10:00"),
        booking("PARK", Monday, "11:30", "12:30"),
    ];
    let slots = calculate_day_availability(
        &hours(Monday, "09:00", "12:30"),
        &bookings,
        60,
        30,
        CLIENT,
    );

    assert!(slots.is_empty());
}

#[test]
fn test_cancelled_bookings_ignored() {
    let bookings = vec![cancelled("PARK", Monday, "10:00", "11:00")];
    let slots = calculate_day_availability(
        &hours(Monday, "09:00", "12:00"),
        &bookings,
        60,
        30,
        CLIENT,
    );

    assert_eq!(vec!["09:00", "09:30", "10:00", "10:30", "11:00"], starts(&slots));
}

#[test]
fn test_unsorted_bookings() {
    let bookings = vec![
        booking(CLIENT, Monday, "13:00", "14:00"),
        booking(CLIENT, Monday, "10:00", "11:00"),
    ];
    let slots = calculate_day_availability(
        &hours(Monday, "09:00", "15:00"),
        &bookings,
        60,
        0,
        CLIENT,
    );

    assert_eq!(
        vec!["09:00", "11:00", "11:30", "12:00", "14:00"],
        starts(&slots)
    );
    assert!(slots.windows(2).all(|w| w[0].start_time < w[1].start_time));
}

#[test]
fn test_booking_near_midnight_with_buffer() {
    let bookings = vec![booking("PARK", Monday, "00:10", "01:00")];
    let slots = calculate_day_availability(
        &hours(Monday, "00:00", "03:00"),
        &bookings,
        60,
        30,
        CLIENT,
    );

    assert_eq!(vec!["01:30", "02:00"], starts(&slots));
}

#[test]
fn test_booking_outside_working_hours() {
    let bookings = vec![booking("PARK", Monday, "07:00", "08:00")];
    let slots = calculate_day_availability(
        &hours(Monday, "09:00", "11:00"),
        &bookings,
        60,
        30,
        CLIENT,
    );

    // the gap after it still starts from the booking's end plus buffer
    assert_eq!(vec!["08:30", "09:00", "09:30", "10:00"], starts(&slots));
}

#[test]
fn test_lesson_longer_than_day() {
    let slots = calculate_day_availability(&hours(Monday, "09:00", "10:00"), &no_bookings(), 90, 30, CLIENT);
    assert!(slots.is_empty());
}

#[test]
fn test_huge_lesson_duration() {
    let slots = calculate_day_availability(&hours(Monday, "09:00", "17:00"), &no_bookings(), u32::MAX, 0, CLIENT);
    assert!(slots.is_empty());
}

#[test]
fn test_huge_travel_buffer() {
    let bookings = vec![booking("PARK", Monday, "12:00", "13:00")];
    let slots = calculate_day_availability(&hours(Monday, "09:00", "17:00"), &bookings, 60, u32::MAX, CLIENT);
    assert!(slots.is_empty());

    // same-location bookings are never buffered
    let slots = calculate_day_availability(&hours(Monday, "09:00", "17:00"), &bookings, 60, u32::MAX, "PARK");
    assert_eq!(
        vec!["09:00", "09:30", "10:00", "10:30", "11:00", "13:00", "13:30", "14:00", "14:30", "15:00", "15:30", "16:00"],
        starts(&slots)
    );
}

#[test]
fn test_inverted_booking_does_not_panic() {
    let bookings = vec![booking("PARK", Monday, "14:00", "13:00")];
    let slots = calculate_day_availability(&hours(Monday, "09:00", "17:00"), &bookings, 60, 30, CLIENT);
    assert_eq!(
        vec![
            "09:00", "09:30", "10:00", "10:30", "11:00", "11:30", "12:00", "12:30", "13:30", "14:00", "14:30",
            "15:00", "15:30", "16:00"
        ],
        starts(&slots)
    );
}
