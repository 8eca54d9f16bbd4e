use std::net::SocketAddr;
use std::sync::Arc;

use chrono::Duration;
use tokio::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use matchpoint_api::{
    app,
    state::{AppState, AuthSettings, VenueState},
};
use matchpoint_ledger::BookingLedger;
use matchpoint_store::{AccountRegistry, AppConfig};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "matchpoint_api=debug,matchpoint_ledger=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load();
    tracing::info!(venue = %config.venue.name, port = config.server.port, "starting matchpoint API");

    let catalog = Arc::new(config.catalog());
    let ledger = BookingLedger::new(
        catalog.clone(),
        config.venue.booking_window_days,
        Duration::minutes(config.venue.hold_timeout_minutes as i64),
    );
    let accounts = AccountRegistry::from_config(&config.accounts);

    let state = AppState {
        venue: Arc::new(Mutex::new(VenueState { ledger, accounts })),
        catalog,
        auth: AuthSettings {
            secret: config.auth.jwt_secret.clone(),
            expiration_seconds: config.auth.jwt_expiration_seconds,
        },
        venue_info: Arc::new(config.venue.clone()),
    };

    // The lazy sweep keeps every response correct on its own; this timer just
    // bounds how long an idle ledger sits on expired holds.
    let reaper = state.venue.clone();
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(std::time::Duration::from_secs(60));
        loop {
            tick.tick().await;
            reaper.lock().await.ledger.sweep_expired();
        }
    });

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind API port");
    axum::serve(listener, app(state))
        .await
        .expect("API server error");
}
