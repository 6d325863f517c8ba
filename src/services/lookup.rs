use crate::models::validation::{is_valid_email, INVALID_EMAIL};
use crate::models::{Booking, FieldErrors};
use crate::services::store::BookingStore;

/// "My bookings": find reservations by email and cancel them one at a time
/// behind an explicit confirmation.
#[derive(Debug, Default)]
pub struct Lookup {
    email: String,
    results: Vec<Booking>,
    searched: bool,
    pending_cancel: Option<String>,
}

impl Lookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs a search. An invalid email is rejected without touching the store
    /// and leaves any previous results in place.
    pub fn search(&mut self, store: &BookingStore, email: &str) -> Result<usize, FieldErrors> {
        let email = email.trim();
        if !is_valid_email(email) {
            let mut errors = FieldErrors::new();
            errors.insert("email", INVALID_EMAIL.to_string());
            return Err(errors);
        }

        self.email = email.to_string();
        self.results = store.get_bookings_by_email(email);
        self.searched = true;
        self.pending_cancel = None;

        tracing::debug!(count = self.results.len(), "bookings looked up by email");
        Ok(self.results.len())
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn results(&self) -> &[Booking] {
        &self.results
    }

    pub fn searched(&self) -> bool {
        self.searched
    }

    pub fn summary(&self) -> String {
        summarize_count(self.results.len())
    }

    pub fn pending_cancel(&self) -> Option<&str> {
        self.pending_cancel.as_deref()
    }

    /// Asks for confirmation before cancelling. Only bookings in the current
    /// results can be selected.
    pub fn request_cancel(&mut self, id: &str) -> bool {
        if self.results.iter().any(|b| b.id == id) {
            self.pending_cancel = Some(id.to_string());
            true
        } else {
            false
        }
    }

    pub fn keep_booking(&mut self) {
        self.pending_cancel = None;
    }

    /// Cancels the booking awaiting confirmation and drops it from the results.
    pub fn confirm_cancel(&mut self, store: &mut BookingStore) -> Option<String> {
        let id = self.pending_cancel.take()?;
        store.cancel_booking(&id);
        self.results.retain(|b| b.id != id);
        Some(id)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

pub fn summarize_count(count: usize) -> String {
    if count == 1 {
        "1 booking found".to_string()
    } else {
        format!("{count} bookings found")
    }
}
