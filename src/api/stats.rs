//! Statistics endpoints

use axum::{extract::State, Json};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppResult;

/// Labelled count
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatEntry {
    pub label: String,
    pub count: i64,
}

/// Room statistics
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RoomStats {
    pub total: i64,
    pub occupied: i64,
    /// Fraction of rooms currently occupied
    pub occupancy_rate: f64,
    pub by_status: Vec<StatEntry>,
}

/// Reservation statistics
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReservationStats {
    pub total: i64,
    pub checked_in: i64,
    /// Sum of total amounts over non-cancelled reservations
    pub total_revenue: Decimal,
    pub by_status: Vec<StatEntry>,
}

/// User statistics
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserStats {
    pub total: i64,
    pub by_role: Vec<StatEntry>,
    pub by_status: Vec<StatEntry>,
}

/// Hotel statistics response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatsResponse {
    pub rooms: RoomStats,
    pub reservations: ReservationStats,
    pub users: UserStats,
}

/// Get hotel statistics
#[utoipa::path(
    get,
    path = "/stats",
    tag = "stats",
    responses(
        (status = 200, description = "Hotel statistics", body = StatsResponse)
    )
)]
pub async fn get_stats(State(state): State<crate::AppState>) -> AppResult<Json<StatsResponse>> {
    let stats = state.services.stats.get_stats().await?;
    Ok(Json(stats))
}
