use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use matchpoint_domain::money::cents_to_dollars;
use matchpoint_store::app_config::VenueConfig;

use crate::{error::AppError, state::AppState};

#[derive(Debug, Serialize)]
struct SportsResponse {
    sports: Vec<String>,
}

#[derive(Debug, Serialize)]
struct CourtsResponse {
    sport: String,
    hourly_rate_usd: f64,
    courts: Vec<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/venue", get(venue_info))
        .route("/v1/sports", get(list_sports))
        .route("/v1/sports/{sport}/courts", get(list_courts))
}

async fn venue_info(State(state): State<AppState>) -> Json<VenueConfig> {
    Json((*state.venue_info).clone())
}

async fn list_sports(State(state): State<AppState>) -> Json<SportsResponse> {
    let sports = state.catalog.sports().into_iter().map(String::from).collect();
    Json(SportsResponse { sports })
}

async fn list_courts(
    State(state): State<AppState>,
    Path(sport): Path<String>,
) -> Result<Json<CourtsResponse>, AppError> {
    let entry = state
        .catalog
        .sport(&sport)
        .ok_or_else(|| AppError::NotFound(format!("unknown sport: {}", sport)))?;

    Ok(Json(CourtsResponse {
        sport: entry.name.clone(),
        hourly_rate_usd: cents_to_dollars(entry.hourly_rate_cents),
        courts: entry.courts.iter().map(|c| c.id.clone()).collect(),
    }))
}
