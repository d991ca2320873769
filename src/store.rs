use crate::availability::{calculate_availability, AvailabilityInput, DayAvailability, TimeSlot};
use crate::booking::{Booking, BookingId, BookingRequest, BookingStatus, LessonType};
use crate::coach::{slugify, Coach};
use crate::day::DayOfWeek;
use crate::error::StoreError;
use crate::hours::{WeeklyHours, WorkingHours};
use crate::location::{Location, LocationId};
use crate::time::Time;
use crate::waitlist::{WaitlistEntry, WaitlistId, WaitlistRequest, WaitlistStatus};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingFilter {
    Confirmed,
    Cancelled,
    All,
}

/// In-memory record store for one coach: profile, weekly hours, locations,
/// bookings and waitlist. Writes go through methods that keep the records
/// consistent with what the availability engine expects.
pub struct Store {
    pub coach: Coach,
    pub hours: WeeklyHours,
    locations: Vec<Location>,
    locations_index: HashMap<LocationId, usize>,
    bookings: Vec<Booking>,
    waitlist: Vec<WaitlistEntry>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawData {
    coach: Coach,
    #[serde(default)]
    working_hours: Option<Vec<WorkingHours>>,
    #[serde(default)]
    locations: Vec<Location>,
    #[serde(default)]
    bookings: Vec<Booking>,
    #[serde(default)]
    waitlist: Vec<WaitlistEntry>,
}

impl Store {
    pub fn new(
        coach: Coach,
        hours: WeeklyHours,
        locations: Vec<Location>,
        mut bookings: Vec<Booking>,
        waitlist: Vec<WaitlistEntry>,
    ) -> Result<Store, StoreError> {
        coach.validate()?;
        hours.validate()?;

        let mut next = next_number(bookings.iter().map(|b| &b.id), "B");
        for booking in bookings.iter_mut().filter(|b| b.id.is_empty()) {
            booking.id = Arc::from(format!("B{}", next).as_str());
            next += 1;
        }

        Self::check_bookings(&bookings)?;

        let locations_index = Self::index(&locations);
        Ok(Store {
            coach,
            hours,
            locations,
            locations_index,
            bookings,
            waitlist,
        })
    }

    /// Confirmed bookings must be well formed and must not overlap on the same day.
    fn check_bookings(bookings: &[Booking]) -> Result<(), StoreError> {
        let confirmed = bookings.iter().filter(|b| b.is_confirmed()).collect::<Vec<_>>();
        for (i, booking) in confirmed.iter().enumerate() {
            booking.validate()?;
            if let Some(clash) = confirmed[i + 1..].iter().find(|other| {
                other.day_of_week == booking.day_of_week
                    && other.overlaps(booking.start_time, booking.end_time)
            }) {
                return Err(StoreError::Overlap(clash.id.clone()));
            }
        }
        Ok(())
    }

    fn index(locations: &[Location]) -> HashMap<LocationId, usize> {
        locations
            .iter()
            .enumerate()
            .map(|(i, l)| (l.id.clone(), i))
            .collect()
    }

    pub fn from_json(data: &str) -> Result<Self, StoreError> {
        let mut raw: RawData = serde_json::from_str(data)?;
        if raw.coach.slug.is_empty() {
            raw.coach.slug = slugify(&raw.coach.display_name);
        }
        let hours = raw
            .working_hours
            .map(WeeklyHours::from_records)
            .unwrap_or_else(WeeklyHours::default_template);
        Store::new(raw.coach, hours, raw.locations, raw.bookings, raw.waitlist)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, StoreError> {
        let data = std::fs::read_to_string(path)?;
        let store = Store::from_json(&data)?;
        info!(
            path = %path.display(),
            locations = store.locations.len(),
            bookings = store.bookings.len(),
            "loaded scenario"
        );
        Ok(store)
    }

    pub fn to_json(&self) -> Result<String, StoreError> {
        let raw = RawData {
            coach: self.coach.clone(),
            working_hours: Some(self.hours.iter().cloned().collect()),
            locations: self.locations.clone(),
            bookings: self.bookings.clone(),
            waitlist: self.waitlist.clone(),
        };
        Ok(serde_json::to_string_pretty(&raw)?)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<(), StoreError> {
        std::fs::write(path, self.to_json()?)?;
        info!(path = %path.display(), "saved scenario");
        Ok(())
    }

    // ── profile & hours ─────────────────────────────────────────────────

    pub fn update_settings(&mut self, lesson_duration: u32, travel_buffer: u32) -> Result<(), StoreError> {
        Coach::check_settings(lesson_duration, travel_buffer)?;
        self.coach.lesson_duration_minutes = lesson_duration;
        self.coach.travel_buffer_minutes = travel_buffer;
        info!(lesson_duration, travel_buffer, "updated settings");
        Ok(())
    }

    pub fn set_working_hours(&mut self, hours: WorkingHours) -> Result<(), StoreError> {
        hours.validate()?;
        info!(day = %hours.day, start = %hours.start_time, end = %hours.end_time, enabled = hours.enabled, "set working hours");
        self.hours.set(hours);
        Ok(())
    }

    pub fn disable_day(&mut self, day: DayOfWeek) {
        let hours = match self.hours.get(day) {
            Some(current) => WorkingHours {
                enabled: false,
                ..current.clone()
            },
            None => WorkingHours {
                enabled: false,
                ..WorkingHours::new(day, Time::from_hm(9, 0), Time::from_hm(17, 0))
            },
        };
        info!(day = %day, "disabled day");
        self.hours.set(hours);
    }

    // ── locations ───────────────────────────────────────────────────────

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn location(&self, id: &str) -> Result<&Location, StoreError> {
        self.locations_index
            .get(id)
            .map(|idx| &self.locations[*idx])
            .ok_or_else(|| StoreError::UnknownLocation(Arc::from(id)))
    }

    pub fn add_location(&mut self, name: &str, address: &str) -> LocationId {
        let id: LocationId = Arc::from(
            format!("L{}", next_number(self.locations.iter().map(|l| &l.id), "L")).as_str(),
        );
        self.locations.push(Location {
            id: id.clone(),
            name: name.trim().to_string(),
            address: address.trim().to_string(),
            notes: String::new(),
        });
        self.locations_index = Self::index(&self.locations);
        info!(%id, name, "added location");
        id
    }

    /// Removes the location record. Bookings keep their denormalised location name.
    pub fn remove_location(&mut self, id: &str) -> Result<Location, StoreError> {
        let idx = *self
            .locations_index
            .get(id)
            .ok_or_else(|| StoreError::UnknownLocation(Arc::from(id)))?;
        let removed = self.locations.remove(idx);
        self.locations_index = Self::index(&self.locations);
        info!(id, "removed location");
        Ok(removed)
    }

    // ── bookings ────────────────────────────────────────────────────────

    /// Bookings matching `filter`, ordered by day then start time.
    pub fn bookings(&self, filter: BookingFilter) -> Vec<&Booking> {
        let mut bookings = self
            .bookings
            .iter()
            .filter(|b| match filter {
                BookingFilter::Confirmed => b.status == BookingStatus::Confirmed,
                BookingFilter::Cancelled => b.status == BookingStatus::Cancelled,
                BookingFilter::All => true,
            })
            .collect::<Vec<_>>();
        bookings.sort_by_key(|b| (b.day_of_week, b.start_time));
        bookings
    }

    pub fn add_booking(&mut self, request: BookingRequest) -> Result<BookingId, StoreError> {
        let location_name = self.location(&request.location_id)?.name.clone();

        let start = request.start_time;
        let end = start + self.coach.lesson_duration_minutes;
        if end.minutes() > Time::MINUTES_PER_DAY {
            return Err(StoreError::PastMidnight(start));
        }
        let group_size = match request.lesson_type {
            LessonType::Private => 1,
            LessonType::Group if request.group_size == 0 => {
                return Err(StoreError::InvalidGroupSize);
            }
            LessonType::Group => request.group_size,
        };
        if let Some(clash) = self
            .bookings
            .iter()
            .filter(|b| b.is_confirmed() && b.day_of_week == request.day_of_week)
            .find(|b| b.overlaps(start, end))
        {
            return Err(StoreError::Overlap(clash.id.clone()));
        }

        let id: BookingId = Arc::from(
            format!("B{}", next_number(self.bookings.iter().map(|b| &b.id), "B")).as_str(),
        );
        self.bookings.push(Booking {
            id: id.clone(),
            location_id: request.location_id,
            location_name,
            day_of_week: request.day_of_week,
            start_time: start,
            end_time: end,
            status: BookingStatus::Confirmed,
            client_name: request.client_name.trim().to_string(),
            client_phone: request.client_phone.trim().to_string(),
            lesson_type: request.lesson_type,
            group_size,
            notes: request.notes.trim().to_string(),
        });
        info!(%id, day = %request.day_of_week, %start, %end, "booking confirmed");
        Ok(id)
    }

    pub fn cancel_booking(&mut self, id: &str) -> Result<(), StoreError> {
        let booking = self
            .bookings
            .iter_mut()
            .find(|b| *b.id == *id)
            .ok_or_else(|| StoreError::UnknownBooking(Arc::from(id)))?;
        if !booking.is_confirmed() {
            return Err(StoreError::AlreadyCancelled(booking.id.clone()));
        }
        booking.status = BookingStatus::Cancelled;
        info!(id, "booking cancelled");
        Ok(())
    }

    // ── availability ────────────────────────────────────────────────────

    pub fn availability_input<'a>(&'a self, location_id: &'a str) -> AvailabilityInput<'a> {
        AvailabilityInput {
            working_hours: &self.hours,
            lesson_duration_minutes: self.coach.lesson_duration_minutes,
            travel_buffer_minutes: self.coach.travel_buffer_minutes,
            confirmed_bookings: &self.bookings,
            client_location_id: location_id,
        }
    }

    /// Recomputes the whole week for a client at `location_id`.
    pub fn availability_for(&self, location_id: &str) -> Result<Vec<DayAvailability>, StoreError> {
        self.location(location_id)?;
        Ok(calculate_availability(&self.availability_input(location_id)))
    }

    // ── waitlist ────────────────────────────────────────────────────────

    pub fn waitlist(&self, status: Option<WaitlistStatus>) -> Vec<&WaitlistEntry> {
        self.waitlist
            .iter()
            .filter(|e| status.is_none_or(|s| e.status == s))
            .collect()
    }

    pub fn join_waitlist(&mut self, request: WaitlistRequest) -> Result<WaitlistId, StoreError> {
        let location_name = self.location(&request.location_id)?.name.clone();
        let id: WaitlistId = Arc::from(
            format!("W{}", next_number(self.waitlist.iter().map(|e| &e.id), "W")).as_str(),
        );
        self.waitlist.push(WaitlistEntry {
            id: id.clone(),
            location_id: request.location_id,
            location_name,
            day_of_week: request.day_of_week,
            preferred_time: request.preferred_time,
            client_name: request.client_name.trim().to_string(),
            client_phone: request.client_phone.trim().to_string(),
            notes: request.notes.trim().to_string(),
            status: WaitlistStatus::Waiting,
        });
        info!(%id, "joined waitlist");
        Ok(id)
    }

    fn waitlist_entry(&self, id: &str) -> Result<&WaitlistEntry, StoreError> {
        self.waitlist
            .iter()
            .find(|e| *e.id == *id)
            .ok_or_else(|| StoreError::UnknownWaitlistEntry(Arc::from(id)))
    }

    pub fn set_waitlist_status(&mut self, id: &str, status: WaitlistStatus) -> Result<(), StoreError> {
        let entry = self
            .waitlist
            .iter_mut()
            .find(|e| *e.id == *id)
            .ok_or_else(|| StoreError::UnknownWaitlistEntry(Arc::from(id)))?;
        entry.status = status;
        info!(id, ?status, "waitlist status updated");
        Ok(())
    }

    pub fn remove_waitlist_entry(&mut self, id: &str) -> Result<WaitlistEntry, StoreError> {
        let idx = self
            .waitlist
            .iter()
            .position(|e| *e.id == *id)
            .ok_or_else(|| StoreError::UnknownWaitlistEntry(Arc::from(id)))?;
        info!(id, "waitlist entry removed");
        Ok(self.waitlist.remove(idx))
    }

    /// Open slots that would suit a waitlisted client: same day and location,
    /// starting in their preferred part of the day.
    pub fn waitlist_matches(&self, id: &str) -> Result<Vec<TimeSlot>, StoreError> {
        let entry = self.waitlist_entry(id)?;
        let week = self.availability_for(&entry.location_id)?;
        Ok(week
            .into_iter()
            .filter(|d| d.day_of_week == entry.day_of_week)
            .flat_map(|d| d.slots)
            .filter(|slot| entry.preferred_time.accepts(slot.start_time))
            .collect())
    }
}

/// One past the highest numeric suffix among ids shaped `<prefix><n>`.
fn next_number<'a>(ids: impl Iterator<Item = &'a Arc<str>>, prefix: &str) -> u32 {
    ids.filter_map(|id| id.strip_prefix(prefix)?.parse::<u32>().ok())
        .max()
        .map_or(1, |n| n + 1)
}
