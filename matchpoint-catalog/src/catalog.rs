use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Court {
    pub id: String,
    pub sport: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sport {
    pub name: String,
    pub hourly_rate_cents: i64,
    pub courts: Vec<Court>,
}

/// Static sport/court/rate mapping. Read-only after construction; lookups
/// for an unknown sport return empty or zero rather than failing.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    sports: BTreeMap<String, Sport>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sport with its courts. Court order is preserved; sports
    /// themselves list in name order, the stable catalog order used by every
    /// query downstream.
    pub fn add_sport(&mut self, name: &str, hourly_rate_cents: i64, court_ids: &[String]) {
        let courts = court_ids
            .iter()
            .map(|id| Court {
                id: id.clone(),
                sport: name.to_string(),
            })
            .collect();
        self.sports.insert(
            name.to_string(),
            Sport {
                name: name.to_string(),
                hourly_rate_cents,
                courts,
            },
        );
    }

    pub fn sports(&self) -> Vec<&str> {
        self.sports.keys().map(String::as_str).collect()
    }

    pub fn sport(&self, name: &str) -> Option<&Sport> {
        self.sports.get(name)
    }

    pub fn courts(&self, sport: &str) -> &[Court] {
        self.sports
            .get(sport)
            .map(|s| s.courts.as_slice())
            .unwrap_or(&[])
    }

    pub fn court_ids(&self, sport: &str) -> Vec<&str> {
        self.courts(sport).iter().map(|c| c.id.as_str()).collect()
    }

    pub fn has_court(&self, sport: &str, court_id: &str) -> bool {
        self.courts(sport).iter().any(|c| c.id == court_id)
    }

    pub fn hourly_rate_cents(&self, sport: &str) -> i64 {
        self.sports.get(sport).map(|s| s.hourly_rate_cents).unwrap_or(0)
    }
}
