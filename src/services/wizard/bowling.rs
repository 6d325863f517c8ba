use serde::Deserialize;

use crate::models::{Activity, BookingDetails, FieldErrors, Guests};
use crate::services::pricing;

use super::ActivityForm;

pub const MAX_GUESTS: u32 = 8;
pub const MAX_GAMES: u32 = 5;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BowlingForm {
    pub adults: u32,
    pub children: u32,
    pub games: u32,
}

impl Default for BowlingForm {
    fn default() -> Self {
        Self {
            adults: 2,
            children: 0,
            games: 1,
        }
    }
}

impl BowlingForm {
    /// Widened so request-supplied counts cannot wrap past the guest limit.
    pub fn total_guests(&self) -> u64 {
        u64::from(self.adults) + u64::from(self.children)
    }

    pub fn lanes(&self) -> u32 {
        pricing::bowling_lanes(self.adults, self.children)
    }
}

impl ActivityForm for BowlingForm {
    const ACTIVITY: Activity = Activity::Bowling;

    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        let guests = self.total_guests();
        if guests < 1 {
            errors.insert("guests", "At least one guest is required".to_string());
        } else if guests > u64::from(MAX_GUESTS) {
            errors.insert("guests", format!("Maximum {MAX_GUESTS} guests per lane"));
        }

        if !(1..=MAX_GAMES).contains(&self.games) {
            errors.insert("games", format!("Please select 1-{MAX_GAMES} games"));
        }

        errors
    }

    fn total_price(&self) -> f64 {
        pricing::bowling_price(self.adults, self.children, self.games)
    }

    fn guests(&self) -> Guests {
        Guests {
            adults: Some(self.adults),
            children: Some(self.children),
        }
    }

    fn details(&self) -> BookingDetails {
        BookingDetails {
            games: Some(self.games),
            lanes: Some(self.lanes()),
            ..Default::default()
        }
    }
}
