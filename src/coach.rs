use crate::error::StoreError;
use crate::time::Time;
use serde::{Deserialize, Serialize};

/// Provider profile: the settings the availability engine is parameterised by.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coach {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub service_type: String,
    #[serde(default = "Coach::default_lesson_duration")]
    pub lesson_duration_minutes: u32,
    #[serde(default = "Coach::default_travel_buffer")]
    pub travel_buffer_minutes: u32,
    #[serde(default)]
    pub whatsapp_number: String,
}

impl Coach {
    const MIN_SLUG_LEN: usize = 3;

    fn default_lesson_duration() -> u32 {
        60
    }

    fn default_travel_buffer() -> u32 {
        30
    }

    pub fn validate(&self) -> Result<(), StoreError> {
        if self.slug.len() < Self::MIN_SLUG_LEN {
            return Err(StoreError::InvalidSlug(self.slug.clone()));
        }
        Self::check_settings(self.lesson_duration_minutes, self.travel_buffer_minutes)
    }

    /// Both values are bounded by the length of a day.
    pub fn check_settings(lesson_duration: u32, travel_buffer: u32) -> Result<(), StoreError> {
        if lesson_duration == 0 || lesson_duration > Time::MINUTES_PER_DAY {
            return Err(StoreError::InvalidDuration);
        }
        if travel_buffer > Time::MINUTES_PER_DAY {
            return Err(StoreError::InvalidBuffer);
        }
        Ok(())
    }
}

/// Public page slug derived from a display name: lowercase ASCII alphanumerics
/// joined by single dashes.
pub fn slugify(display_name: &str) -> String {
    display_name
        .to_lowercase()
        .split(|c: char| !(c.is_ascii_lowercase() || c.is_ascii_digit()))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
