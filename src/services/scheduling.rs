use chrono::{Days, NaiveDate};

use crate::models::availability::format_time;
use crate::models::{Activity, Booking, SlotAvailability, SlotHours};

pub const OPENING_HOUR: u32 = 10;
pub const LAST_START_HOUR: u32 = 22;
pub const SLOT_MINUTES: u32 = 30;
/// Bookings allowed per (date, time, activity), whatever the activity.
pub const SLOT_CAPACITY: usize = 3;
pub const BOOKING_WINDOW_DAYS: u64 = 14;

/// Half-hour start times from opening until the last start at 22:00.
///
/// The date does not change the result; every day has the same slots.
pub fn generate_time_slots(_date: NaiveDate) -> Vec<String> {
    let first = OPENING_HOUR * 60;
    let last = LAST_START_HOUR * 60;
    (first..=last)
        .step_by(SLOT_MINUTES as usize)
        .map(|minutes| format_time(minutes / 60, minutes % 60))
        .collect()
}

pub fn count_bookings_in_slot(
    bookings: &[Booking],
    date: NaiveDate,
    time: &str,
    activity: Activity,
) -> usize {
    bookings
        .iter()
        .filter(|b| b.occupies(date, time, activity))
        .count()
}

pub fn is_time_slot_available(
    bookings: &[Booking],
    date: NaiveDate,
    time: &str,
    activity: Activity,
) -> bool {
    count_bookings_in_slot(bookings, date, time, activity) < SLOT_CAPACITY
}

/// The slots an activity offers on `date`, each flagged with remaining capacity.
pub fn slots_for_activity(
    bookings: &[Booking],
    date: NaiveDate,
    activity: Activity,
    hours: SlotHours,
) -> Vec<SlotAvailability> {
    generate_time_slots(date)
        .into_iter()
        .filter(|time| hours.contains(time))
        .map(|time| SlotAvailability {
            available: is_time_slot_available(bookings, date, &time, activity),
            time,
        })
        .collect()
}

/// Rolling window of bookable dates starting today.
pub fn booking_window(today: NaiveDate) -> Vec<NaiveDate> {
    (0..BOOKING_WINDOW_DAYS)
        .filter_map(|offset| today.checked_add_days(Days::new(offset)))
        .collect()
}

pub fn in_booking_window(today: NaiveDate, date: NaiveDate) -> bool {
    match today.checked_add_days(Days::new(BOOKING_WINDOW_DAYS)) {
        Some(end) => date >= today && date < end,
        None => date >= today,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BookingDetails, Guests};
    use chrono::Utc;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn booking(id: &str, d: &str, time: &str, activity: Activity) -> Booking {
        Booking {
            id: id.to_string(),
            activity,
            date: date(d),
            time: time.to_string(),
            guests: Guests::default(),
            details: BookingDetails::default(),
            email: "guest@example.com".to_string(),
            total_price: 15.0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_slot_list_shape() {
        let slots = generate_time_slots(date("2025-06-16"));
        assert_eq!(slots.len(), 25);
        assert_eq!(slots.first().map(String::as_str), Some("10:00"));
        assert_eq!(slots[1], "10:30");
        assert_eq!(slots.last().map(String::as_str), Some("22:00"));
    }

    #[test]
    fn test_slot_list_ignores_date() {
        // Weekday, weekend and a public holiday all get the same list.
        let monday = generate_time_slots(date("2025-06-16"));
        assert_eq!(monday, generate_time_slots(date("2025-06-21")));
        assert_eq!(monday, generate_time_slots(date("2025-12-25")));
    }

    #[test]
    fn test_slot_full_at_capacity() {
        let mut bookings = vec![];
        for i in 0..SLOT_CAPACITY {
            assert!(is_time_slot_available(
                &bookings,
                date("2025-06-16"),
                "14:00",
                Activity::Bowling
            ));
            bookings.push(booking(&format!("b{i}"), "2025-06-16", "14:00", Activity::Bowling));
        }
        assert!(!is_time_slot_available(
            &bookings,
            date("2025-06-16"),
            "14:00",
            Activity::Bowling
        ));
    }

    #[test]
    fn test_capacity_is_per_activity_date_and_time() {
        let bookings = vec![
            booking("a", "2025-06-16", "14:00", Activity::Bowling),
            booking("b", "2025-06-16", "14:00", Activity::Bowling),
            booking("c", "2025-06-16", "14:00", Activity::Bowling),
        ];
        assert!(is_time_slot_available(&bookings, date("2025-06-16"), "14:00", Activity::ArDarts));
        assert!(is_time_slot_available(&bookings, date("2025-06-16"), "14:30", Activity::Bowling));
        assert!(is_time_slot_available(&bookings, date("2025-06-17"), "14:00", Activity::Bowling));
        assert_eq!(
            count_bookings_in_slot(&bookings, date("2025-06-16"), "14:00", Activity::Bowling),
            3
        );
    }

    #[test]
    fn test_slots_for_activity_filters_hours() {
        let hours = SlotHours {
            first_hour: 10,
            last_hour: 18,
        };
        let bookings = vec![
            booking("a", "2025-06-16", "10:00", Activity::SoftPlay),
            booking("b", "2025-06-16", "10:00", Activity::SoftPlay),
            booking("c", "2025-06-16", "10:00", Activity::SoftPlay),
        ];
        let slots = slots_for_activity(&bookings, date("2025-06-16"), Activity::SoftPlay, hours);
        assert_eq!(slots.len(), 18);
        assert_eq!(slots.last().map(|s| s.time.as_str()), Some("18:30"));
        assert!(!slots[0].available);
        assert!(slots[1].available);
    }

    #[test]
    fn test_booking_window() {
        let today = date("2025-06-16");
        let window = booking_window(today);
        assert_eq!(window.len(), 14);
        assert_eq!(window[0], today);
        assert_eq!(window[13], date("2025-06-29"));

        assert!(in_booking_window(today, date("2025-06-29")));
        assert!(!in_booking_window(today, date("2025-06-30")));
        assert!(!in_booking_window(today, date("2025-06-15")));
    }
}
