use std::collections::HashMap;

use chrono::NaiveDate;

/// Issues booking identifiers of the form `BK-YYYYMMDD-NNNN`, one monotonic
/// counter per calendar date. Counters never reset or reuse within a process
/// lifetime.
#[derive(Debug, Default)]
pub struct BookingIdGenerator {
    counters: HashMap<String, u32>,
}

impl BookingIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self, date: NaiveDate) -> String {
        let key = date.format("%Y%m%d").to_string();
        let counter = self.counters.entry(key.clone()).or_insert(0);
        *counter += 1;
        format!("BK-{}-{:04}", key, counter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn ids_are_sequential_per_date() {
        let mut ids = BookingIdGenerator::new();
        assert_eq!(ids.next_id(date(2025, 6, 1)), "BK-20250601-0001");
        assert_eq!(ids.next_id(date(2025, 6, 1)), "BK-20250601-0002");
        assert_eq!(ids.next_id(date(2025, 6, 2)), "BK-20250602-0001");
    }

    #[test]
    fn counters_are_independent_and_never_reset() {
        let mut ids = BookingIdGenerator::new();
        for _ in 0..12 {
            ids.next_id(date(2025, 6, 1));
        }
        ids.next_id(date(2025, 6, 2));
        // Going back to an earlier date continues where it left off.
        assert_eq!(ids.next_id(date(2025, 6, 1)), "BK-20250601-0013");
    }

    #[test]
    fn uniqueness_within_a_date() {
        let mut ids = BookingIdGenerator::new();
        let generated: Vec<String> = (0..50).map(|_| ids.next_id(date(2025, 6, 1))).collect();
        let mut deduped = generated.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), generated.len());
    }
}
