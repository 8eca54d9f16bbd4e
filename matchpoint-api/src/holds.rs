use axum::{extract::State, routing::post, Json, Router};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::{auth, bookings::BookingView, error::AppError, state::AppState};

#[derive(Debug, Deserialize)]
struct CreateHoldRequest {
    sport: String,
    court_id: String,
    start: DateTime<Utc>,
    duration_slots: u32,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/holds", post(create_hold))
}

async fn create_hold(
    State(state): State<AppState>,
    TypedHeader(Authorization(bearer)): TypedHeader<Authorization<Bearer>>,
    Json(req): Json<CreateHoldRequest>,
) -> Result<Json<BookingView>, AppError> {
    let claims = auth::decode_claims(bearer.token(), &state.auth.secret)?;

    let mut venue = state.venue.lock().await;
    let booking = venue.ledger.create_hold(
        &claims.sub,
        &req.sport,
        &req.court_id,
        req.start,
        req.duration_slots,
    )?;

    Ok(Json(BookingView::from(&booking)))
}
