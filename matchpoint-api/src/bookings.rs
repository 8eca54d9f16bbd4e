use axum::{
    extract::{Path, State},
    routing::{delete, get, post},
    Json, Router,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use matchpoint_domain::money::cents_to_dollars;
use matchpoint_domain::{Booking, BookingStatus};
use matchpoint_ledger::BalanceSource;
use matchpoint_store::AccountRegistry;

use crate::{
    auth,
    error::AppError,
    state::{AppState, VenueState},
};

/// Wire shape of one booking.
#[derive(Debug, Serialize)]
pub struct BookingView {
    pub booking_id: String,
    pub user: String,
    pub sport: String,
    pub court_id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_hours: f64,
    pub price_usd: f64,
    pub status: BookingStatus,
    pub hold_expires_at: Option<DateTime<Utc>>,
}

impl From<&Booking> for BookingView {
    fn from(booking: &Booking) -> Self {
        Self {
            booking_id: booking.id.clone(),
            user: booking.user_id.clone(),
            sport: booking.sport.clone(),
            court_id: booking.court_id.clone(),
            start: booking.start,
            end: booking.end_time(),
            duration_hours: 0.5 * booking.duration_slots as f64,
            price_usd: cents_to_dollars(booking.price_cents),
            status: booking.status,
            hold_expires_at: booking.hold_expires_at,
        }
    }
}

/// One user's balance, viewed through the ledger's payment callbacks. The
/// registry keeps ownership of the money; the ledger only asks.
struct UserWallet<'a> {
    accounts: &'a mut AccountRegistry,
    username: &'a str,
}

impl BalanceSource for UserWallet<'_> {
    fn can_afford(&self, amount_cents: i64) -> bool {
        self.accounts.can_afford(self.username, amount_cents)
    }

    fn debit(&mut self, amount_cents: i64) -> bool {
        self.accounts.deduct(self.username, amount_cents)
    }
}

#[derive(Debug, Serialize)]
struct BookingListResponse {
    bookings: Vec<BookingView>,
}

#[derive(Debug, Serialize)]
struct CancelResponse {
    cancelled: bool,
}

#[derive(Debug, Serialize)]
struct MeResponse {
    username: String,
    role: String,
    balance_usd: f64,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/me", get(me))
        .route("/v1/bookings", get(list_own))
        .route("/v1/bookings/{id}/confirm", post(confirm))
        .route("/v1/bookings/{id}", delete(cancel))
}

async fn me(
    State(state): State<AppState>,
    TypedHeader(Authorization(bearer)): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<MeResponse>, AppError> {
    let claims = auth::decode_claims(bearer.token(), &state.auth.secret)?;

    let venue = state.venue.lock().await;
    let account = venue
        .accounts
        .get(&claims.sub)
        .ok_or_else(|| AppError::NotFound(format!("unknown account: {}", claims.sub)))?;

    Ok(Json(MeResponse {
        username: account.username.clone(),
        role: account.role.as_str().to_string(),
        balance_usd: cents_to_dollars(account.balance_cents),
    }))
}

async fn list_own(
    State(state): State<AppState>,
    TypedHeader(Authorization(bearer)): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<BookingListResponse>, AppError> {
    let claims = auth::decode_claims(bearer.token(), &state.auth.secret)?;

    let mut venue = state.venue.lock().await;
    let bookings = venue
        .ledger
        .user_bookings(&claims.sub)
        .iter()
        .map(BookingView::from)
        .collect();

    Ok(Json(BookingListResponse { bookings }))
}

async fn confirm(
    State(state): State<AppState>,
    Path(id): Path<String>,
    TypedHeader(Authorization(bearer)): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<BookingView>, AppError> {
    let claims = auth::decode_claims(bearer.token(), &state.auth.secret)?;

    let mut venue = state.venue.lock().await;
    let VenueState { ledger, accounts } = &mut *venue;
    let mut wallet = UserWallet {
        accounts,
        username: &claims.sub,
    };
    let booking = ledger.confirm_payment(&claims.sub, &id, &mut wallet)?;

    Ok(Json(BookingView::from(&booking)))
}

async fn cancel(
    State(state): State<AppState>,
    Path(id): Path<String>,
    TypedHeader(Authorization(bearer)): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<CancelResponse>, AppError> {
    let claims = auth::decode_claims(bearer.token(), &state.auth.secret)?;

    let mut venue = state.venue.lock().await;
    let cancelled = venue.ledger.cancel_pending(&claims.sub, &id);

    Ok(Json(CancelResponse { cancelled }))
}
