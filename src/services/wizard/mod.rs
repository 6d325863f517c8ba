//! Three-step booking wizard shared by every activity.
//!
//! Step 1 collects the activity's own quantities ([`ActivityForm`]), step 2 the
//! date and time, step 3 the contact email. Moving forward validates the current
//! step; confirming rechecks the slot, prices the form and hands the booking to
//! the store.

pub mod ar_darts;
pub mod bowling;
pub mod soft_play;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::validation::{is_valid_email, INVALID_EMAIL};
use crate::models::{Activity, BookingDetails, FieldErrors, Guests, NewBooking, SlotAvailability, SlotHours};
use crate::services::scheduling;
use crate::services::store::BookingStore;

pub use ar_darts::ArDartsForm;
pub use bowling::BowlingForm;
pub use soft_play::SoftPlayForm;

/// Activity-specific part of a booking: step 1 inputs and what they imply.
pub trait ActivityForm {
    const ACTIVITY: Activity;

    fn validate(&self) -> FieldErrors;
    fn total_price(&self) -> f64;
    fn guests(&self) -> Guests;
    fn details(&self) -> BookingDetails;

    fn slot_hours(&self) -> SlotHours {
        SlotHours::ALL_DAY
    }
}

/// Start hours offered for an activity, as its wizard would list them.
pub fn slot_hours(activity: Activity) -> SlotHours {
    match activity {
        Activity::Bowling => BowlingForm::default().slot_hours(),
        Activity::ArDarts => ArDartsForm::default().slot_hours(),
        Activity::SoftPlay => SoftPlayForm::default().slot_hours(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Configuration,
    DateTime,
    Contact,
}

impl Step {
    pub fn number(&self) -> u8 {
        match self {
            Step::Configuration => 1,
            Step::DateTime => 2,
            Step::Contact => 3,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("step {} has invalid fields", .step.number())]
    Validation { step: Step, errors: FieldErrors },

    #[error("booking can only be confirmed from the contact step")]
    NotOnContactStep,

    #[error("booking already confirmed as {0}")]
    AlreadyConfirmed(String),
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Confirmation {
    pub id: String,
    #[serde(flatten)]
    pub booking: NewBooking,
}

pub struct Wizard<F: ActivityForm> {
    form: F,
    step: Step,
    today: NaiveDate,
    date: Option<NaiveDate>,
    time: Option<String>,
    email: String,
    errors: FieldErrors,
    confirmation: Option<Confirmation>,
}

impl<F: ActivityForm> Wizard<F> {
    pub fn new(form: F, today: NaiveDate) -> Self {
        Self {
            form,
            step: Step::Configuration,
            today,
            date: Some(today),
            time: None,
            email: String::new(),
            errors: FieldErrors::new(),
            confirmation: None,
        }
    }

    pub fn activity(&self) -> Activity {
        F::ACTIVITY
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn time(&self) -> Option<&str> {
        self.time.as_deref()
    }

    pub fn confirmation(&self) -> Option<&Confirmation> {
        self.confirmation.as_ref()
    }

    /// Picking another date drops the previously chosen time.
    pub fn select_date(&mut self, date: Option<NaiveDate>) {
        if self.date != date {
            self.time = None;
        }
        self.date = date;
    }

    pub fn select_time(&mut self, time: Option<String>) {
        self.time = time.filter(|t| !t.is_empty());
    }

    pub fn set_email(&mut self, email: &str) {
        self.email = email.trim().to_string();
    }

    pub fn price(&self) -> f64 {
        self.form.total_price()
    }

    pub fn available_dates(&self) -> Vec<NaiveDate> {
        scheduling::booking_window(self.today)
    }

    /// Slots offered on the selected date, or none before a date is chosen.
    pub fn time_slots(&self, store: &BookingStore) -> Vec<SlotAvailability> {
        match self.date {
            Some(date) => scheduling::slots_for_activity(
                store.bookings(),
                date,
                F::ACTIVITY,
                self.form.slot_hours(),
            ),
            None => Vec::new(),
        }
    }

    pub fn validate_step(&self, step: Step, store: &BookingStore) -> FieldErrors {
        match step {
            Step::Configuration => self.form.validate(),
            Step::DateTime => self.validate_schedule(store),
            Step::Contact => {
                let mut errors = FieldErrors::new();
                if !is_valid_email(&self.email) {
                    errors.insert("email", INVALID_EMAIL.to_string());
                }
                errors
            }
        }
    }

    fn validate_schedule(&self, store: &BookingStore) -> FieldErrors {
        let mut errors = FieldErrors::new();

        let date = match self.date {
            Some(date) if scheduling::in_booking_window(self.today, date) => Some(date),
            Some(_) => {
                errors.insert(
                    "date",
                    format!(
                        "Please select a date within the next {} days",
                        scheduling::BOOKING_WINDOW_DAYS
                    ),
                );
                None
            }
            None => {
                errors.insert("date", "Please select a date".to_string());
                None
            }
        };

        match (&self.time, date) {
            (None, _) => {
                errors.insert("time", "Please select a time slot".to_string());
            }
            (Some(time), Some(date)) => {
                let offered = store
                    .generate_time_slots(date)
                    .iter()
                    .any(|slot| slot == time && self.form.slot_hours().contains(slot));
                if !offered {
                    errors.insert("time", "Please select a time slot".to_string());
                } else if !store.is_time_slot_available(date, time, F::ACTIVITY) {
                    errors.insert("time", "That time slot is fully booked".to_string());
                }
            }
            (Some(_), None) => {}
        }

        errors
    }

    /// Validates the current step and moves forward when it is clean.
    pub fn next(&mut self, store: &BookingStore) -> Result<Step, WizardError> {
        if let Some(confirmation) = &self.confirmation {
            return Err(WizardError::AlreadyConfirmed(confirmation.id.clone()));
        }

        let errors = self.validate_step(self.step, store);
        if !errors.is_empty() {
            tracing::debug!(
                activity = %F::ACTIVITY,
                step = self.step.number(),
                fields = ?errors.keys().collect::<Vec<_>>(),
                "wizard step rejected"
            );
            self.errors = errors.clone();
            return Err(WizardError::Validation {
                step: self.step,
                errors,
            });
        }

        self.errors.clear();
        self.step = match self.step {
            Step::Configuration => Step::DateTime,
            Step::DateTime | Step::Contact => Step::Contact,
        };
        Ok(self.step)
    }

    pub fn back(&mut self) -> Step {
        self.errors.clear();
        self.step = match self.step {
            Step::Configuration | Step::DateTime => Step::Configuration,
            Step::Contact => Step::DateTime,
        };
        self.step
    }

    /// Books the wizard's selection. A slot filled since step 2 sends the
    /// wizard back to the date and time step.
    pub fn confirm(&mut self, store: &mut BookingStore) -> Result<&Confirmation, WizardError> {
        if let Some(confirmation) = &self.confirmation {
            return Err(WizardError::AlreadyConfirmed(confirmation.id.clone()));
        }
        if self.step != Step::Contact {
            return Err(WizardError::NotOnContactStep);
        }

        let errors = self.validate_step(Step::Contact, store);
        if !errors.is_empty() {
            self.errors = errors.clone();
            return Err(WizardError::Validation {
                step: Step::Contact,
                errors,
            });
        }

        let schedule_errors = self.validate_schedule(store);
        let (date, time) = match (self.date, self.time.clone()) {
            (Some(date), Some(time)) if schedule_errors.is_empty() => (date, time),
            _ => {
                self.step = Step::DateTime;
                self.errors = schedule_errors.clone();
                return Err(WizardError::Validation {
                    step: Step::DateTime,
                    errors: schedule_errors,
                });
            }
        };

        let booking = NewBooking {
            activity: F::ACTIVITY,
            date,
            time,
            guests: self.form.guests(),
            details: self.form.details(),
            email: self.email.clone(),
            total_price: self.form.total_price(),
        };
        let id = store.add_booking(booking.clone());
        self.errors.clear();

        Ok(&*self.confirmation.insert(Confirmation { id, booking }))
    }

    /// Walks all three steps with the given selections and confirms.
    pub fn complete(
        mut self,
        store: &mut BookingStore,
        date: Option<NaiveDate>,
        time: Option<String>,
        email: &str,
    ) -> Result<Confirmation, WizardError> {
        self.next(store)?;
        self.select_date(date);
        self.select_time(time);
        self.next(store)?;
        self.set_email(email);
        self.confirm(store).cloned()
    }
}
