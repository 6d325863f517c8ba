pub mod availability;
pub mod booking;
pub mod validation;

pub use availability::{SlotAvailability, SlotHours};
pub use booking::{Activity, Booking, BookingDetails, Guests, NewBooking};
pub use validation::FieldErrors;
