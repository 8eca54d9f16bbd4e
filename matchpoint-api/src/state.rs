use std::sync::Arc;

use tokio::sync::Mutex;

use matchpoint_catalog::Catalog;
use matchpoint_ledger::BookingLedger;
use matchpoint_store::app_config::VenueConfig;
use matchpoint_store::AccountRegistry;

/// Everything behind the single global critical section. The ledger and the
/// balances it debits sit under one lock so recheck-then-commit and
/// debit-plus-flip are atomic with respect to every other operation.
pub struct VenueState {
    pub ledger: BookingLedger,
    pub accounts: AccountRegistry,
}

#[derive(Clone)]
pub struct AuthSettings {
    pub secret: String,
    pub expiration_seconds: u64,
}

#[derive(Clone)]
pub struct AppState {
    pub venue: Arc<Mutex<VenueState>>,
    /// Read-only after load; safe to read without the venue lock.
    pub catalog: Arc<Catalog>,
    pub auth: AuthSettings,
    pub venue_info: Arc<VenueConfig>,
}
