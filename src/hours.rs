use crate::day::DayOfWeek;
use crate::error::StoreError;
use crate::time::Time;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Tabled)]
#[serde(rename_all = "camelCase")]
pub struct WorkingHours {
    pub day: DayOfWeek,
    pub enabled: bool,
    #[tabled(rename = "start")]
    pub start_time: Time,
    #[tabled(rename = "end")]
    pub end_time: Time,
}

impl WorkingHours {
    pub fn new(day: DayOfWeek, start_time: Time, end_time: Time) -> WorkingHours {
        WorkingHours {
            day,
            enabled: true,
            start_time,
            end_time,
        }
    }

    pub fn validate(&self) -> Result<(), StoreError> {
        if self.enabled && self.start_time >= self.end_time {
            return Err(StoreError::InvalidHours {
                day: self.day,
                start: self.start_time,
                end: self.end_time,
            });
        }
        Ok(())
    }
}

/// Weekly working-hours template, one optional record per day.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WeeklyHours([Option<WorkingHours>; 7]);

impl WeeklyHours {
    /// Builds the table from loose records. The first record seen for a day wins.
    pub fn from_records(records: impl IntoIterator<Item = WorkingHours>) -> WeeklyHours {
        let mut week = WeeklyHours::default();
        for record in records {
            let slot = &mut week.0[record.day.index()];
            if slot.is_none() {
                *slot = Some(record);
            }
        }
        week
    }

    /// Monday to Friday 09:00-17:00, weekends off.
    pub fn default_template() -> WeeklyHours {
        WeeklyHours::from_records(DayOfWeek::ALL.into_iter().map(|day| WorkingHours {
            day,
            enabled: !day.is_weekend(),
            start_time: Time::from_hm(9, 0),
            end_time: Time::from_hm(17, 0),
        }))
    }

    pub fn get(&self, day: DayOfWeek) -> Option<&WorkingHours> {
        self.0[day.index()].as_ref()
    }

    pub fn set(&mut self, hours: WorkingHours) {
        let idx = hours.day.index();
        self.0[idx] = Some(hours);
    }

    pub fn iter(&self) -> impl Iterator<Item = &WorkingHours> {
        self.0.iter().flatten()
    }

    pub fn validate(&self) -> Result<(), StoreError> {
        self.iter().try_for_each(WorkingHours::validate)
    }
}
