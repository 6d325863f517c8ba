use serde::Deserialize;

use crate::models::{Activity, BookingDetails, FieldErrors, Guests};
use crate::services::pricing;

use super::ActivityForm;

pub const MAX_LANES: u32 = 4;
pub const MAX_ADDON_CHILDREN: u32 = 8;
pub const DURATIONS: [u32; 2] = [30, 60];
/// Headcount recorded per dart lane.
const ADULTS_PER_LANE: u32 = 2;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ArDartsForm {
    pub lanes: u32,
    /// Minutes.
    pub duration: u32,
    pub soft_play_addon: bool,
    pub children: u32,
}

impl Default for ArDartsForm {
    fn default() -> Self {
        Self {
            lanes: 1,
            duration: 60,
            soft_play_addon: false,
            children: 0,
        }
    }
}

impl ArDartsForm {
    fn addon_children(&self) -> Option<u32> {
        self.soft_play_addon.then_some(self.children)
    }
}

impl ActivityForm for ArDartsForm {
    const ACTIVITY: Activity = Activity::ArDarts;

    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        if !(1..=MAX_LANES).contains(&self.lanes) {
            errors.insert("lanes", format!("Please select 1-{MAX_LANES} dart lanes"));
        }
        if !DURATIONS.contains(&self.duration) {
            errors.insert("duration", "Please select a valid duration".to_string());
        }
        if self.soft_play_addon {
            if self.children < 1 {
                errors.insert(
                    "children",
                    "Please specify number of children for soft play addon".to_string(),
                );
            } else if self.children > MAX_ADDON_CHILDREN {
                errors.insert(
                    "children",
                    format!("Maximum {MAX_ADDON_CHILDREN} children for soft play addon"),
                );
            }
        }

        errors
    }

    fn total_price(&self) -> f64 {
        pricing::ar_darts_price(self.lanes, self.duration, self.addon_children())
    }

    fn guests(&self) -> Guests {
        Guests {
            adults: Some(self.lanes.saturating_mul(ADULTS_PER_LANE)),
            children: Some(self.addon_children().unwrap_or(0)),
        }
    }

    fn details(&self) -> BookingDetails {
        BookingDetails {
            lanes: Some(self.lanes),
            duration: Some(self.duration),
            soft_play_addon: Some(self.soft_play_addon),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let form = ArDartsForm::default();
        assert!(form.validate().is_empty());
        assert_eq!(form.total_price(), 25.0);
    }

    #[test]
    fn test_lane_and_duration_limits() {
        let form = ArDartsForm {
            lanes: 5,
            duration: 45,
            ..Default::default()
        };
        let errors = form.validate();
        assert_eq!(errors["lanes"], "Please select 1-4 dart lanes");
        assert_eq!(errors["duration"], "Please select a valid duration");
        assert!(!errors.contains_key("children"));
    }

    #[test]
    fn test_addon_needs_children() {
        let form = ArDartsForm {
            soft_play_addon: true,
            children: 0,
            ..Default::default()
        };
        assert_eq!(
            form.validate()["children"],
            "Please specify number of children for soft play addon"
        );

        let too_many = ArDartsForm {
            soft_play_addon: true,
            children: 9,
            ..Default::default()
        };
        assert!(too_many.validate().contains_key("children"));
    }

    #[test]
    fn test_huge_counts_are_rejected() {
        let form = ArDartsForm {
            lanes: u32::MAX,
            duration: u32::MAX,
            soft_play_addon: true,
            children: u32::MAX,
        };
        let errors = form.validate();
        assert_eq!(errors["lanes"], "Please select 1-4 dart lanes");
        assert_eq!(errors["duration"], "Please select a valid duration");
        assert_eq!(errors["children"], "Maximum 8 children for soft play addon");
        assert_eq!(form.guests().adults, Some(u32::MAX));
    }

    #[test]
    fn test_children_ignored_without_addon() {
        let form = ArDartsForm {
            lanes: 2,
            duration: 30,
            soft_play_addon: false,
            children: 5,
        };
        assert!(form.validate().is_empty());
        assert_eq!(form.total_price(), 30.0);
        assert_eq!(form.guests().children, Some(0));
    }

    #[test]
    fn test_two_lanes_hour_with_addon() {
        let form = ArDartsForm {
            lanes: 2,
            duration: 60,
            soft_play_addon: true,
            children: 3,
        };
        assert_eq!(form.total_price(), 86.0);
        assert_eq!(form.guests().adults, Some(4));
        assert_eq!(form.guests().children, Some(3));
        let details = form.details();
        assert_eq!(details.lanes, Some(2));
        assert_eq!(details.duration, Some(60));
        assert_eq!(details.soft_play_addon, Some(true));
    }

    #[test]
    fn test_deserializes_camel_case() {
        let form: ArDartsForm =
            serde_json::from_str(r#"{"lanes": 2, "softPlayAddon": true, "children": 3}"#).unwrap();
        assert!(form.soft_play_addon);
        assert_eq!(form.duration, 60);
    }
}
