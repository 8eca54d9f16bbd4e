use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Booking granularity in minutes.
pub const SLOT_MINUTES: i64 = 30;
/// Half-hour slots in one calendar day.
pub const SLOTS_PER_DAY: usize = 48;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Paid,
}

/// A court reservation. Exclusively owned by the ledger; everything except
/// `status` and `hold_expires_at` is fixed at creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub user_id: String,
    pub sport: String,
    pub court_id: String,
    pub start: DateTime<Utc>,
    pub duration_slots: u32,
    pub price_cents: i64,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub hold_expires_at: Option<DateTime<Utc>>,
}

impl Booking {
    pub fn end_time(&self) -> DateTime<Utc> {
        self.start + Duration::minutes(SLOT_MINUTES * self.duration_slots as i64)
    }

    /// Half-open interval test against `[start, end)`.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        !(end <= self.start || start >= self.end_time())
    }

    /// A pending booking whose hold deadline has passed.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.status == BookingStatus::Pending
            && self.hold_expires_at.map_or(false, |deadline| now >= deadline)
    }

    /// Live bookings block their slot range: pending-and-unexpired, or paid.
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        !self.is_expired(now)
    }

    /// Flip to PAID and drop the hold deadline in one step.
    pub fn mark_paid(&mut self) {
        self.status = BookingStatus::Paid;
        self.hold_expires_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn booking_at(start: DateTime<Utc>, duration_slots: u32) -> Booking {
        Booking {
            id: "BK-20250601-0001".to_string(),
            user_id: "user1".to_string(),
            sport: "badminton".to_string(),
            court_id: "B01".to_string(),
            start,
            duration_slots,
            price_cents: 1000,
            status: BookingStatus::Pending,
            created_at: start - Duration::hours(1),
            hold_expires_at: Some(start - Duration::minutes(55)),
        }
    }

    #[test]
    fn end_time_spans_half_hour_slots() {
        let start = Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap();
        let booking = booking_at(start, 3);
        assert_eq!(
            booking.end_time(),
            Utc.with_ymd_and_hms(2025, 6, 1, 11, 30, 0).unwrap()
        );
    }

    #[test]
    fn adjacent_intervals_do_not_overlap() {
        let start = Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap();
        let booking = booking_at(start, 2);

        // Exactly adjacent on both sides.
        assert!(!booking.overlaps(start - Duration::minutes(60), start));
        assert!(!booking.overlaps(booking.end_time(), booking.end_time() + Duration::minutes(30)));

        // Any shared half-hour collides.
        assert!(booking.overlaps(start + Duration::minutes(30), start + Duration::minutes(90)));
        assert!(booking.overlaps(start - Duration::minutes(30), start + Duration::minutes(30)));
    }

    #[test]
    fn expiry_applies_only_to_pending() {
        let start = Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap();
        let mut booking = booking_at(start, 2);
        let deadline = booking.hold_expires_at.unwrap();

        assert!(!booking.is_expired(deadline - Duration::seconds(1)));
        assert!(booking.is_expired(deadline));

        booking.mark_paid();
        assert_eq!(booking.status, BookingStatus::Paid);
        assert!(booking.hold_expires_at.is_none());
        assert!(!booking.is_expired(deadline + Duration::days(365)));
    }
}
