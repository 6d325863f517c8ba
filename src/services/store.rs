use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::models::{Activity, Booking, NewBooking};
use crate::services::scheduling;

/// Name of the single storage entry that holds the whole collection.
pub const STORAGE_KEY: &str = "pinopolisBookings";

const ID_PREFIX: &str = "PIN";
const ID_SUFFIX_LEN: usize = 7;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Durable key/value storage the store writes its collection through.
pub trait Storage: Send {
    fn load(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn save(&self, key: &str, value: &str) -> anyhow::Result<()>;
}

/// Process-local storage; clones share the same entries.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn load(&self, key: &str) -> anyhow::Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| anyhow::anyhow!("memory storage lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| anyhow::anyhow!("memory storage lock poisoned"))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub struct BookingStore {
    bookings: Vec<Booking>,
    storage: Box<dyn Storage>,
}

impl BookingStore {
    /// Loads the persisted collection once. Missing or unreadable data starts an empty store.
    pub fn open(storage: Box<dyn Storage>) -> Self {
        let bookings = match storage.load(STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Booking>>(&raw) {
                Ok(bookings) => bookings,
                Err(e) => {
                    tracing::warn!(error = %e, "stored bookings are unreadable, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::error!(error = %e, "failed to load stored bookings, starting empty");
                Vec::new()
            }
        };

        tracing::info!(count = bookings.len(), "booking store opened");
        Self { bookings, storage }
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    /// Stores a booking the caller has already validated and returns its new id.
    pub fn add_booking(&mut self, data: NewBooking) -> String {
        let now = Utc::now();
        let id = generate_booking_id(now);
        let booking = Booking::from_new(data, id.clone(), now);

        tracing::info!(
            booking_id = %id,
            activity = %booking.activity,
            date = %booking.date,
            time = %booking.time,
            "booking added"
        );

        self.bookings.push(booking);
        self.persist();
        id
    }

    /// Removes the booking if present. Returns whether anything was removed.
    pub fn cancel_booking(&mut self, id: &str) -> bool {
        let before = self.bookings.len();
        self.bookings.retain(|b| b.id != id);
        let removed = self.bookings.len() != before;

        if removed {
            tracing::info!(booking_id = id, "booking cancelled");
        } else {
            tracing::debug!(booking_id = id, "cancel for unknown booking ignored");
        }

        self.persist();
        removed
    }

    pub fn get_bookings_by_email(&self, email: &str) -> Vec<Booking> {
        self.bookings
            .iter()
            .filter(|b| b.matches_email(email))
            .cloned()
            .collect()
    }

    pub fn generate_time_slots(&self, date: NaiveDate) -> Vec<String> {
        scheduling::generate_time_slots(date)
    }

    pub fn is_time_slot_available(&self, date: NaiveDate, time: &str, activity: Activity) -> bool {
        scheduling::is_time_slot_available(&self.bookings, date, time, activity)
    }

    fn persist(&self) {
        let serialized = match serde_json::to_string(&self.bookings) {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize bookings");
                return;
            }
        };
        if let Err(e) = self.storage.save(STORAGE_KEY, &serialized) {
            tracing::error!(error = %e, "failed to persist bookings");
        }
    }
}

/// `PIN-<epoch millis>-<7 random base36 chars>`, uppercased.
pub fn generate_booking_id(now: DateTime<Utc>) -> String {
    let mut random = Uuid::new_v4().as_u128();
    let mut suffix = String::with_capacity(ID_SUFFIX_LEN);
    for _ in 0..ID_SUFFIX_LEN {
        suffix.push(BASE36[(random % 36) as usize] as char);
        random /= 36;
    }
    format!("{ID_PREFIX}-{}-{suffix}", now.timestamp_millis()).to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BookingDetails, Guests};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn new_booking(email: &str, d: &str, time: &str, activity: Activity) -> NewBooking {
        NewBooking {
            activity,
            date: date(d),
            time: time.to_string(),
            guests: Guests {
                adults: Some(2),
                children: Some(0),
            },
            details: BookingDetails {
                games: Some(1),
                lanes: Some(1),
                ..Default::default()
            },
            email: email.to_string(),
            total_price: 30.0,
        }
    }

    fn empty_store() -> BookingStore {
        BookingStore::open(Box::new(MemoryStorage::new()))
    }

    struct FailingStorage;

    impl Storage for FailingStorage {
        fn load(&self, _key: &str) -> anyhow::Result<Option<String>> {
            Err(anyhow::anyhow!("disk on fire"))
        }

        fn save(&self, _key: &str, _value: &str) -> anyhow::Result<()> {
            Err(anyhow::anyhow!("disk on fire"))
        }
    }

    #[test]
    fn test_id_shape() {
        let now = DateTime::parse_from_rfc3339("2025-06-10T09:15:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let id = generate_booking_id(now);
        let parts: Vec<&str> = id.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "PIN");
        assert_eq!(parts[1], now.timestamp_millis().to_string());
        assert_eq!(parts[2].len(), 7);
        assert!(parts[2]
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn test_ids_differ() {
        let now = Utc::now();
        assert_ne!(generate_booking_id(now), generate_booking_id(now));
    }

    #[test]
    fn test_add_then_lookup_case_insensitive() {
        let mut store = empty_store();
        let id = store.add_booking(new_booking(
            "Jamie@Example.com",
            "2025-06-16",
            "14:00",
            Activity::Bowling,
        ));
        store.add_booking(new_booking("other@example.com", "2025-06-16", "14:00", Activity::Bowling));

        let found = store.get_bookings_by_email("jamie@EXAMPLE.com");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, id);
        assert_eq!(found[0].total_price, 30.0);
    }

    #[test]
    fn test_lookup_unknown_email_is_empty() {
        let mut store = empty_store();
        store.add_booking(new_booking("a@example.com", "2025-06-16", "14:00", Activity::Bowling));
        assert!(store.get_bookings_by_email("nobody@example.com").is_empty());
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut store = empty_store();
        let keep = store.add_booking(new_booking("a@example.com", "2025-06-16", "14:00", Activity::Bowling));
        let gone = store.add_booking(new_booking("a@example.com", "2025-06-16", "15:00", Activity::Bowling));

        assert!(store.cancel_booking(&gone));
        assert_eq!(store.bookings().len(), 1);
        assert_eq!(store.bookings()[0].id, keep);

        assert!(!store.cancel_booking(&gone));
        assert_eq!(store.bookings().len(), 1);
    }

    #[test]
    fn test_availability_through_store() {
        let mut store = empty_store();
        for _ in 0..3 {
            assert!(store.is_time_slot_available(date("2025-06-16"), "19:00", Activity::ArDarts));
            store.add_booking(new_booking("a@example.com", "2025-06-16", "19:00", Activity::ArDarts));
        }
        assert!(!store.is_time_slot_available(date("2025-06-16"), "19:00", Activity::ArDarts));
        assert!(store.is_time_slot_available(date("2025-06-16"), "19:00", Activity::SoftPlay));
    }

    #[test]
    fn test_slots_from_store() {
        let store = empty_store();
        assert_eq!(store.generate_time_slots(date("2025-06-16")).len(), 25);
    }

    #[test]
    fn test_reopen_sees_persisted_collection() {
        let storage = MemoryStorage::new();
        let mut store = BookingStore::open(Box::new(storage.clone()));
        let first = store.add_booking(new_booking("a@example.com", "2025-06-16", "14:00", Activity::Bowling));
        let second = store.add_booking(new_booking("b@example.com", "2025-06-17", "10:30", Activity::SoftPlay));
        store.cancel_booking(&first);

        let reopened = BookingStore::open(Box::new(storage.clone()));
        assert_eq!(reopened.bookings().len(), 1);
        assert_eq!(reopened.bookings()[0].id, second);
        assert_eq!(reopened.bookings(), store.bookings());
    }

    #[test]
    fn test_unreadable_storage_starts_empty() {
        let storage = MemoryStorage::new();
        storage.save(STORAGE_KEY, "{not json").unwrap();
        let store = BookingStore::open(Box::new(storage));
        assert!(store.bookings().is_empty());
    }

    #[test]
    fn test_loads_collection_written_by_browser() {
        let storage = MemoryStorage::new();
        storage
            .save(
                STORAGE_KEY,
                r#"[{"id":"PIN-1718000000000-K3J9QZ1","activity":"soft-play","date":"2025-06-16","time":"11:00","guests":{"children":4},"details":{"duration":120},"email":"kid@example.com","totalPrice":48,"createdAt":"2025-06-10T09:15:00.000Z"}]"#,
            )
            .unwrap();
        let store = BookingStore::open(Box::new(storage));
        assert_eq!(store.bookings().len(), 1);
        assert_eq!(store.get_bookings_by_email("KID@example.com").len(), 1);
    }

    #[test]
    fn test_storage_failures_are_not_surfaced() {
        let mut store = BookingStore::open(Box::new(FailingStorage));
        let id = store.add_booking(new_booking("a@example.com", "2025-06-16", "14:00", Activity::Bowling));
        assert_eq!(store.get_bookings_by_email("a@example.com")[0].id, id);
        assert!(store.cancel_booking(&id));
    }
}
