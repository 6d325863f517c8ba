use std::sync::{Mutex, MutexGuard};

use crate::services::store::BookingStore;

pub struct AppState {
    pub store: Mutex<BookingStore>,
}

impl AppState {
    pub fn new(store: BookingStore) -> Self {
        Self {
            store: Mutex::new(store),
        }
    }

    /// The collection is never left half-updated, so a poisoned lock is still usable.
    pub fn store(&self) -> MutexGuard<'_, BookingStore> {
        self.store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
