use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use matchpoint_catalog::Catalog;
use matchpoint_domain::money::dollars_to_cents;

/// Full application configuration. Every section carries built-in defaults
/// (the demo venue), so a missing or partial config file still yields a
/// runnable system.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub venue: VenueConfig,
    pub accounts: AccountsConfig,
    pub rates_usd_per_hour: HashMap<String, f64>,
    pub courts: HashMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 8080 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_expiration_seconds: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "matchpoint-dev-secret".to_string(),
            jwt_expiration_seconds: 3600,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VenueConfig {
    pub name: String,
    pub timezone: String,
    pub booking_window_days: u32,
    pub hold_timeout_minutes: u32,
    pub time_format_24h: bool,
}

impl Default for VenueConfig {
    fn default() -> Self {
        Self {
            name: "Cobra's ZooKeeping Sport Center".to_string(),
            timezone: "system".to_string(),
            booking_window_days: 30,
            hold_timeout_minutes: 5,
            time_format_24h: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountsConfig {
    pub users: Vec<AccountSeed>,
    pub admins: Vec<AccountSeed>,
}

impl Default for AccountsConfig {
    fn default() -> Self {
        Self {
            users: vec![
                AccountSeed::new("user1", "pass1", 100.0),
                AccountSeed::new("user2", "pass2", 100.0),
            ],
            admins: vec![AccountSeed::new("admin", "adminpass", 0.0)],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountSeed {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub balance_usd: f64,
}

impl AccountSeed {
    fn new(username: &str, password: &str, balance_usd: f64) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            balance_usd,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            auth: AuthConfig::default(),
            venue: VenueConfig::default(),
            accounts: AccountsConfig::default(),
            rates_usd_per_hour: HashMap::from([
                ("badminton".to_string(), 10.0),
                ("pickleball".to_string(), 40.0),
                ("handball".to_string(), 20.0),
                ("skating".to_string(), 60.0),
            ]),
            courts: HashMap::from([
                (
                    "badminton".to_string(),
                    vec!["B01", "B02", "B03", "B04"]
                        .into_iter()
                        .map(String::from)
                        .collect(),
                ),
                (
                    "pickleball".to_string(),
                    vec!["PB01", "PB02", "PB03", "PB04"]
                        .into_iter()
                        .map(String::from)
                        .collect(),
                ),
                (
                    "handball".to_string(),
                    vec!["H01", "H02", "H03", "H04"]
                        .into_iter()
                        .map(String::from)
                        .collect(),
                ),
                (
                    "skating".to_string(),
                    vec!["SK01", "SK02", "SK03", "SK04"]
                        .into_iter()
                        .map(String::from)
                        .collect(),
                ),
            ]),
        }
    }
}

impl AppConfig {
    /// Merge optional config files and `MATCHPOINT_`-prefixed environment
    /// variables over the built-in defaults. A malformed source logs a
    /// warning and falls back to the defaults, mirroring the permissive
    /// loader this venue always shipped with.
    pub fn load() -> Self {
        let built = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("MATCHPOINT").separator("__"))
            .build()
            .and_then(|s| s.try_deserialize::<AppConfig>());

        match built {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(%err, "failed to load configuration, using built-in defaults");
                Self::default()
            }
        }
    }

    /// Build the read-only sport/court/rate catalog from this config. A
    /// sport with courts but no configured rate prices at zero.
    pub fn catalog(&self) -> Catalog {
        let mut catalog = Catalog::new();
        for (sport, court_ids) in &self.courts {
            let rate = self.rates_usd_per_hour.get(sport).copied().unwrap_or(0.0);
            catalog.add_sport(sport, dollars_to_cents(rate), court_ids);
        }
        catalog
    }
}
