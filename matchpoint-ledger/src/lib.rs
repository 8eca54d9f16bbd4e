pub mod id;
pub mod ledger;

pub use id::BookingIdGenerator;
pub use ledger::{BalanceSource, BookingLedger, LedgerError, SlotStatus};
