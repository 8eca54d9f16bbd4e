pub mod account;
pub mod booking;
pub mod money;

pub use account::{Account, Role};
pub use booking::{Booking, BookingStatus, SLOTS_PER_DAY, SLOT_MINUTES};
