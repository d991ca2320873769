use crate::availability::tests::utils::{arb_day_bookings, arb_location, arb_week_hours, arb_window};
use crate::availability::{
    calculate_availability, calculate_day_availability, generate_slots, AvailabilityInput,
    SLOT_INCREMENT,
};
use crate::booking::Booking;
use crate::day::DayOfWeek;
use crate::hours::WorkingHours;
use proptest::prelude::*;
use proptest::proptest;

proptest! {
    #[test]
    fn test_empty_day_tiles_window(
        (start, end) in arb_window(),
        lesson in 15..240u32,
    ) {
        let slots = generate_slots(start, end, lesson);

        for (i, slot) in slots.iter().enumerate() {
            prop_assert_eq!(slot.start_time, start + i as u32 * SLOT_INCREMENT);
            prop_assert_eq!(slot.end_time, slot.start_time + lesson);
            prop_assert!(slot.end_time <= end);
        }
        // the next step would not have fit
        let next = start + slots.len() as u32 * SLOT_INCREMENT;
        prop_assert!(next + lesson > end);
    }

    #[test]
    fn test_slots_stay_clear_of_bookings(
        (start, end) in arb_window(),
        bookings in arb_day_bookings(DayOfWeek::Monday),
        lesson in 15..120u32,
        buffer in 0..60u32,
        client in arb_location(),
    ) {
        let hours = WorkingHours::new(DayOfWeek::Monday, start, end);
        let slots = calculate_day_availability(&hours, &bookings, lesson, buffer, client);

        prop_assert!(slots.windows(2).all(|w| w[0].start_time < w[1].start_time));
        let pad = |b: &Booking| if *b.location_id == *client { 0 } else { buffer };
        for slot in &slots {
            prop_assert_eq!(slot.end_time, slot.start_time + lesson);
            prop_assert!(bookings.iter().all(|b| !b.overlaps(slot.start_time, slot.end_time)));

            if let Some(before) = bookings.iter().rev().find(|b| b.end_time <= slot.start_time) {
                prop_assert!(
                    slot.start_time >= before.end_time + pad(before),
                    "\nSlot {}-{} starts too soon after {}-{} at {}",
                    slot.start_time, slot.end_time, before.start_time, before.end_time, before.location_id
                );
            }
            if let Some(after) = bookings.iter().find(|b| b.start_time >= slot.end_time) {
                prop_assert!(
                    slot.end_time + pad(after) <= after.start_time,
                    "\nSlot {}-{} ends too close to {}-{} at {}",
                    slot.start_time, slot.end_time, after.start_time, after.end_time, after.location_id
                );
            }
        }
    }

    #[test]
    fn test_larger_buffer_never_adds_slots(
        (start, end) in arb_window(),
        bookings in arb_day_bookings(DayOfWeek::Monday),
        lesson in 15..120u32,
        buffer in 0..60u32,
        extra in 0..60u32,
    ) {
        let hours = WorkingHours::new(DayOfWeek::Monday, start, end);
        let tight = calculate_day_availability(&hours, &bookings, lesson, buffer, "POOL");
        let loose = calculate_day_availability(&hours, &bookings, lesson, buffer + extra, "POOL");

        prop_assert!(loose.len() <= tight.len());
    }

    #[test]
    fn test_disabled_days_never_open(
        working_hours in arb_week_hours(),
        bookings in arb_day_bookings(DayOfWeek::Wednesday),
        lesson in 15..120u32,
        client in arb_location(),
    ) {
        let input = AvailabilityInput {
            working_hours: &working_hours,
            lesson_duration_minutes: lesson,
            travel_buffer_minutes: 30,
            confirmed_bookings: &bookings,
            client_location_id: client,
        };
        let week = calculate_availability(&input);

        prop_assert_eq!(7, week.len());
        for day in &week {
            let open = working_hours.get(day.day_of_week).is_some_and(|h| h.enabled);
            if !open {
                prop_assert!(day.slots.is_empty());
            }
        }
        prop_assert_eq!(week, calculate_availability(&input));
    }
}
