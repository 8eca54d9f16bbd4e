pub mod accounts;
pub mod app_config;

pub use accounts::AccountRegistry;
pub use app_config::AppConfig;
