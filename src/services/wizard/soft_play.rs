use serde::Deserialize;

use crate::models::{Activity, BookingDetails, FieldErrors, Guests, SlotHours};
use crate::services::pricing;

use super::ActivityForm;

pub const MAX_CHILDREN: u32 = 10;

/// Soft play takes its last start at 18:30.
const SOFT_PLAY_HOURS: SlotHours = SlotHours {
    first_hour: 10,
    last_hour: 18,
};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SoftPlayForm {
    pub children: u32,
}

impl Default for SoftPlayForm {
    fn default() -> Self {
        Self { children: 1 }
    }
}

impl ActivityForm for SoftPlayForm {
    const ACTIVITY: Activity = Activity::SoftPlay;

    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if !(1..=MAX_CHILDREN).contains(&self.children) {
            errors.insert("children", format!("Please select 1-{MAX_CHILDREN} children"));
        }
        errors
    }

    fn total_price(&self) -> f64 {
        pricing::soft_play_price(self.children)
    }

    fn guests(&self) -> Guests {
        Guests {
            adults: None,
            children: Some(self.children),
        }
    }

    /// Every session is the standard two hours.
    fn details(&self) -> BookingDetails {
        BookingDetails {
            duration: Some(pricing::SOFT_PLAY_SESSION_MINUTES),
            ..Default::default()
        }
    }

    fn slot_hours(&self) -> SlotHours {
        SOFT_PLAY_HOURS
    }
}
