use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use matchpoint_catalog::{pricing, Catalog};
use matchpoint_domain::{Account, Booking, BookingStatus, SLOTS_PER_DAY, SLOT_MINUTES};

use crate::id::BookingIdGenerator;

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("date outside booking window (0-{window_days} days ahead)")]
    WindowViolation { window_days: u32 },

    #[error("court {court_id} is not available for the requested time")]
    SlotUnavailable { court_id: String },

    #[error("invalid booking request: {0}")]
    InvalidRequest(String),

    #[error("unknown sport: {0}")]
    UnknownSport(String),

    #[error("court {court_id} is not registered for {sport}")]
    UnknownCourt { sport: String, court_id: String },

    #[error("booking not found: {0}")]
    NotFound(String),

    #[error("hold expired for booking {0}")]
    HoldExpired(String),

    #[error("insufficient balance for booking {0}")]
    InsufficientFunds(String),

    #[error("payment failed for booking {0}")]
    PaymentFailed(String),
}

/// Caller-owned balance hooks for payment confirmation. The ledger never
/// stores money; it asks these two questions and applies the outcome to the
/// booking in the same step.
pub trait BalanceSource {
    fn can_afford(&self, amount_cents: i64) -> bool;
    fn debit(&mut self, amount_cents: i64) -> bool;
}

impl BalanceSource for Account {
    fn can_afford(&self, amount_cents: i64) -> bool {
        Account::can_afford(self, amount_cents)
    }

    fn debit(&mut self, amount_cents: i64) -> bool {
        self.deduct(amount_cents)
    }
}

/// One half-hour cell of the availability grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotStatus {
    pub start: DateTime<Utc>,
    pub available: bool,
}

/// Owns every booking and enforces the temporal invariants: per-court
/// non-overlap of live bookings, hold deadlines, and the PENDING -> PAID
/// transition. Bookings live in a single arena keyed by id; the court and
/// user indices hold ids only.
///
/// All operations take `&mut self`; callers that need concurrent access wrap
/// the ledger in one mutex, which makes the recheck-then-commit in
/// `create_hold` indivisible.
pub struct BookingLedger {
    catalog: Arc<Catalog>,
    ids: BookingIdGenerator,
    window_days: u32,
    hold_timeout: Duration,
    bookings: HashMap<String, Booking>,
    by_court: HashMap<String, Vec<String>>,
    by_user: HashMap<String, Vec<String>>,
}

impl BookingLedger {
    pub fn new(catalog: Arc<Catalog>, window_days: u32, hold_timeout: Duration) -> Self {
        Self {
            catalog,
            ids: BookingIdGenerator::new(),
            window_days,
            hold_timeout,
            bookings: HashMap::new(),
            by_court: HashMap::new(),
            by_user: HashMap::new(),
        }
    }

    /// Availability of all 48 half-hour slots of `date` for every court of
    /// `sport`. Empty map when the sport has no courts.
    pub fn availability(
        &mut self,
        sport: &str,
        date: NaiveDate,
    ) -> BTreeMap<String, Vec<SlotStatus>> {
        self.sweep_expired_at(Utc::now());

        let day_start = date.and_time(NaiveTime::MIN).and_utc();
        let mut grid = BTreeMap::new();

        for court_id in self.catalog.court_ids(sport) {
            let mut slots = Vec::with_capacity(SLOTS_PER_DAY);
            for i in 0..SLOTS_PER_DAY {
                let start = day_start + Duration::minutes(SLOT_MINUTES * i as i64);
                let end = start + Duration::minutes(SLOT_MINUTES);
                slots.push(SlotStatus {
                    start,
                    available: self.court_is_free(court_id, start, end),
                });
            }
            grid.insert(court_id.to_string(), slots);
        }

        grid
    }

    /// Courts of `sport`, in catalog order, free for the whole span
    /// `[start, start + 30m * duration_slots)`.
    pub fn available_courts(
        &mut self,
        sport: &str,
        start: DateTime<Utc>,
        duration_slots: u32,
    ) -> Vec<String> {
        self.sweep_expired_at(Utc::now());

        let end = start + Duration::minutes(SLOT_MINUTES * duration_slots as i64);
        self.catalog
            .court_ids(sport)
            .into_iter()
            .filter(|court_id| self.court_is_free(court_id, start, end))
            .map(str::to_string)
            .collect()
    }

    /// Place a PENDING hold. Availability is re-checked here, never trusted
    /// from an earlier query; under the caller's mutex this check-and-insert
    /// is one indivisible step.
    pub fn create_hold(
        &mut self,
        user_id: &str,
        sport: &str,
        court_id: &str,
        start: DateTime<Utc>,
        duration_slots: u32,
    ) -> Result<Booking, LedgerError> {
        let now = Utc::now();
        self.sweep_expired_at(now);

        if duration_slots == 0 {
            return Err(LedgerError::InvalidRequest(
                "duration must be at least one slot".to_string(),
            ));
        }
        if start.timestamp() % (SLOT_MINUTES * 60) != 0 {
            return Err(LedgerError::InvalidRequest(
                "start must align to a 30-minute boundary".to_string(),
            ));
        }
        if self.catalog.sport(sport).is_none() {
            return Err(LedgerError::UnknownSport(sport.to_string()));
        }
        if !self.catalog.has_court(sport, court_id) {
            return Err(LedgerError::UnknownCourt {
                sport: sport.to_string(),
                court_id: court_id.to_string(),
            });
        }

        let today = now.date_naive();
        let target = start.date_naive();
        if target < today || target > today + chrono::Days::new(u64::from(self.window_days)) {
            return Err(LedgerError::WindowViolation {
                window_days: self.window_days,
            });
        }

        let end = start + Duration::minutes(SLOT_MINUTES * duration_slots as i64);
        if !self.court_is_free(court_id, start, end) {
            return Err(LedgerError::SlotUnavailable {
                court_id: court_id.to_string(),
            });
        }

        let id = self.ids.next_id(target);
        let price_cents =
            pricing::slot_price_cents(self.catalog.hourly_rate_cents(sport), duration_slots);
        let booking = Booking {
            id: id.clone(),
            user_id: user_id.to_string(),
            sport: sport.to_string(),
            court_id: court_id.to_string(),
            start,
            duration_slots,
            price_cents,
            status: BookingStatus::Pending,
            created_at: now,
            hold_expires_at: Some(now + self.hold_timeout),
        };

        self.insert(booking.clone());
        info!(booking_id = %id, user = user_id, court = court_id, "hold created");
        Ok(booking)
    }

    /// Confirm payment for a PENDING hold owned by `user_id`. The debit and
    /// the status flip are one step: any callback refusal leaves the booking
    /// exactly as it was.
    pub fn confirm_payment(
        &mut self,
        user_id: &str,
        booking_id: &str,
        wallet: &mut impl BalanceSource,
    ) -> Result<Booking, LedgerError> {
        let now = Utc::now();

        // Checked against this operation's `now` before the sweep runs, so a
        // lapsed hold reports HoldExpired rather than NotFound.
        let target_expired = self
            .bookings
            .get(booking_id)
            .map(|b| b.user_id == user_id && b.status == BookingStatus::Pending && b.is_expired(now))
            .unwrap_or(false);

        self.sweep_expired_at(now);

        if target_expired {
            return Err(LedgerError::HoldExpired(booking_id.to_string()));
        }

        let price_cents = match self.bookings.get(booking_id) {
            Some(b) if b.user_id == user_id && b.status == BookingStatus::Pending => b.price_cents,
            _ => return Err(LedgerError::NotFound(booking_id.to_string())),
        };

        if !wallet.can_afford(price_cents) {
            return Err(LedgerError::InsufficientFunds(booking_id.to_string()));
        }
        if !wallet.debit(price_cents) {
            return Err(LedgerError::PaymentFailed(booking_id.to_string()));
        }

        let booking = self
            .bookings
            .get_mut(booking_id)
            .ok_or_else(|| LedgerError::NotFound(booking_id.to_string()))?;
        booking.mark_paid();
        info!(booking_id, user = user_id, amount_cents = price_cents, "payment confirmed");
        Ok(booking.clone())
    }

    /// Remove a PENDING booking owned by `user_id`. No-op (`false`) when the
    /// id is missing, foreign, or already paid; safe to call twice.
    pub fn cancel_pending(&mut self, user_id: &str, booking_id: &str) -> bool {
        self.sweep_expired_at(Utc::now());

        let cancellable = self
            .bookings
            .get(booking_id)
            .map(|b| b.user_id == user_id && b.status == BookingStatus::Pending)
            .unwrap_or(false);
        if !cancellable {
            return false;
        }

        self.remove_booking(booking_id);
        info!(booking_id, user = user_id, "pending booking cancelled");
        true
    }

    /// Remove any booking regardless of owner or status. Balance effects are
    /// the caller's responsibility.
    pub fn admin_remove(&mut self, booking_id: &str) -> bool {
        self.sweep_expired_at(Utc::now());

        match self.remove_booking(booking_id) {
            Some(removed) => {
                info!(booking_id, user = %removed.user_id, "booking removed by admin");
                true
            }
            None => false,
        }
    }

    /// Live bookings of one user, sorted by `(start, id)`.
    pub fn user_bookings(&mut self, user_id: &str) -> Vec<Booking> {
        self.sweep_expired_at(Utc::now());

        let ids = self.by_user.get(user_id).cloned().unwrap_or_default();
        let mut bookings: Vec<Booking> = ids
            .iter()
            .filter_map(|id| self.bookings.get(id))
            .cloned()
            .collect();
        sort_for_listing(&mut bookings);
        bookings
    }

    /// Every live booking in the system, sorted by `(start, id)`.
    pub fn all_bookings(&mut self) -> Vec<Booking> {
        self.sweep_expired_at(Utc::now());

        let mut bookings: Vec<Booking> = self.bookings.values().cloned().collect();
        sort_for_listing(&mut bookings);
        bookings
    }

    /// Reclaim expired holds now. Runs implicitly at the top of every
    /// operation; exposed for callers that sweep on a timer as well.
    pub fn sweep_expired(&mut self) -> usize {
        self.sweep_expired_at(Utc::now())
    }

    fn sweep_expired_at(&mut self, now: DateTime<Utc>) -> usize {
        let expired: Vec<String> = self
            .bookings
            .values()
            .filter(|b| b.is_expired(now))
            .map(|b| b.id.clone())
            .collect();

        for id in &expired {
            self.remove_booking(id);
        }
        if !expired.is_empty() {
            debug!(count = expired.len(), "expired holds reclaimed");
        }
        expired.len()
    }

    fn court_is_free(&self, court_id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.by_court
            .get(court_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| self.bookings.get(id))
                    .all(|b| !b.overlaps(start, end))
            })
            .unwrap_or(true)
    }

    fn insert(&mut self, booking: Booking) {
        self.by_court
            .entry(booking.court_id.clone())
            .or_default()
            .push(booking.id.clone());
        self.by_user
            .entry(booking.user_id.clone())
            .or_default()
            .push(booking.id.clone());
        self.bookings.insert(booking.id.clone(), booking);
    }

    fn remove_booking(&mut self, booking_id: &str) -> Option<Booking> {
        let booking = self.bookings.remove(booking_id)?;

        if let Some(ids) = self.by_court.get_mut(&booking.court_id) {
            ids.retain(|id| id != booking_id);
            if ids.is_empty() {
                self.by_court.remove(&booking.court_id);
            }
        }
        if let Some(ids) = self.by_user.get_mut(&booking.user_id) {
            ids.retain(|id| id != booking_id);
            if ids.is_empty() {
                self.by_user.remove(&booking.user_id);
            }
        }

        Some(booking)
    }
}

fn sort_for_listing(bookings: &mut [Booking]) {
    bookings.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));
}
