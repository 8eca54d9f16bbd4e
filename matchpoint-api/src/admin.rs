use axum::{
    extract::{Path, State},
    routing::{delete, get},
    Json, Router,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use serde::Serialize;

use crate::{auth, bookings::BookingView, error::AppError, state::AppState};

#[derive(Debug, Serialize)]
struct AllBookingsResponse {
    bookings: Vec<BookingView>,
}

#[derive(Debug, Serialize)]
struct RemoveResponse {
    removed: bool,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/admin/bookings", get(list_all))
        .route("/v1/admin/bookings/{id}", delete(remove))
}

async fn list_all(
    State(state): State<AppState>,
    TypedHeader(Authorization(bearer)): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<AllBookingsResponse>, AppError> {
    let claims = auth::decode_claims(bearer.token(), &state.auth.secret)?;
    auth::require_admin(&claims)?;

    let mut venue = state.venue.lock().await;
    let bookings = venue
        .ledger
        .all_bookings()
        .iter()
        .map(BookingView::from)
        .collect();

    Ok(Json(AllBookingsResponse { bookings }))
}

async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
    TypedHeader(Authorization(bearer)): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<RemoveResponse>, AppError> {
    let claims = auth::decode_claims(bearer.token(), &state.auth.secret)?;
    auth::require_admin(&claims)?;

    let mut venue = state.venue.lock().await;
    let removed = venue.ledger.admin_remove(&id);

    Ok(Json(RemoveResponse { removed }))
}
