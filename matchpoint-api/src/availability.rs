use std::collections::BTreeMap;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use matchpoint_ledger::SlotStatus;

use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct AvailabilityQuery {
    sport: String,
    date: NaiveDate,
}

#[derive(Debug, Serialize)]
struct AvailabilityResponse {
    sport: String,
    date: NaiveDate,
    courts: BTreeMap<String, Vec<SlotStatus>>,
}

#[derive(Debug, Deserialize)]
struct SpanQuery {
    sport: String,
    start: DateTime<Utc>,
    duration_slots: u32,
}

#[derive(Debug, Serialize)]
struct AvailableCourtsResponse {
    courts: Vec<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/availability", get(availability_grid))
        .route("/v1/courts/available", get(available_courts))
}

async fn availability_grid(
    State(state): State<AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> Json<AvailabilityResponse> {
    let mut venue = state.venue.lock().await;
    let courts = venue.ledger.availability(&query.sport, query.date);
    Json(AvailabilityResponse {
        sport: query.sport,
        date: query.date,
        courts,
    })
}

async fn available_courts(
    State(state): State<AppState>,
    Query(query): Query<SpanQuery>,
) -> Json<AvailableCourtsResponse> {
    let mut venue = state.venue.lock().await;
    let courts = venue
        .ledger
        .available_courts(&query.sport, query.start, query.duration_slots);
    Json(AvailableCourtsResponse { courts })
}
