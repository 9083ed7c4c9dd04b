//! Reservation management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::reservation::{
        CancelReservation, CreateReservation, Reservation, ReservationDetails, ReservationQuery,
    },
};

use super::rooms::PaginatedResponse;

/// Creation response with the issued confirmation code
#[derive(Serialize, ToSchema)]
pub struct CreateReservationResponse {
    /// Reservation ID
    pub id: i64,
    /// Confirmation code issued to the guest
    pub confirmation_code: String,
    /// Computed or supplied total amount
    pub total_amount: Decimal,
    /// Status message
    pub message: String,
}

/// Transition response with the updated reservation
#[derive(Serialize, ToSchema)]
pub struct ReservationActionResponse {
    /// Action outcome
    pub status: String,
    /// Updated reservation
    pub reservation: Reservation,
}

/// List reservations with filters and pagination
#[utoipa::path(
    get,
    path = "/reservations",
    tag = "reservations",
    params(
        ("status" = Option<String>, Query, description = "Filter by reservation status"),
        ("user_id" = Option<i64>, Query, description = "Filter by guest"),
        ("room_id" = Option<i64>, Query, description = "Filter by room"),
        ("page" = Option<i64>, Query, description = "Page number"),
        ("per_page" = Option<i64>, Query, description = "Items per page")
    ),
    responses(
        (status = 200, description = "List of reservations", body = PaginatedResponse<ReservationDetails>)
    )
)]
pub async fn list_reservations(
    State(state): State<crate::AppState>,
    Query(query): Query<ReservationQuery>,
) -> AppResult<Json<PaginatedResponse<ReservationDetails>>> {
    let (reservations, total) = state.services.reservations.search_reservations(&query).await?;

    Ok(Json(PaginatedResponse {
        items: reservations,
        total,
        page: query.page.unwrap_or(1),
        per_page: query.per_page.unwrap_or(20),
    }))
}

/// Get reservation by ID
#[utoipa::path(
    get,
    path = "/reservations/{id}",
    tag = "reservations",
    params(
        ("id" = i64, Path, description = "Reservation ID")
    ),
    responses(
        (status = 200, description = "Reservation details", body = Reservation),
        (status = 404, description = "Reservation not found")
    )
)]
pub async fn get_reservation(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Reservation>> {
    let reservation = state.services.reservations.get_reservation(id).await?;
    Ok(Json(reservation))
}

/// Get reservation by confirmation code
#[utoipa::path(
    get,
    path = "/reservations/code/{code}",
    tag = "reservations",
    params(
        ("code" = String, Path, description = "Confirmation code")
    ),
    responses(
        (status = 200, description = "Reservation details", body = Reservation),
        (status = 404, description = "Reservation not found")
    )
)]
pub async fn get_reservation_by_code(
    State(state): State<crate::AppState>,
    Path(code): Path<String>,
) -> AppResult<Json<Reservation>> {
    let reservation = state
        .services
        .reservations
        .get_by_confirmation_code(&code)
        .await?;
    Ok(Json(reservation))
}

/// Get reservations for a specific user
#[utoipa::path(
    get,
    path = "/users/{id}/reservations",
    tag = "reservations",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User's reservations", body = Vec<ReservationDetails>),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user_reservations(
    State(state): State<crate::AppState>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<Vec<ReservationDetails>>> {
    let reservations = state
        .services
        .reservations
        .get_user_reservations(user_id)
        .await?;
    Ok(Json(reservations))
}

/// Create a new reservation
#[utoipa::path(
    post,
    path = "/reservations",
    tag = "reservations",
    request_body = CreateReservation,
    responses(
        (status = 201, description = "Reservation created", body = CreateReservationResponse),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "User or room not found")
    )
)]
pub async fn create_reservation(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateReservation>,
) -> AppResult<(StatusCode, Json<CreateReservationResponse>)> {
    let reservation = state.services.reservations.create_reservation(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateReservationResponse {
            id: reservation.id,
            confirmation_code: reservation.confirmation_code,
            total_amount: reservation.total_amount,
            message: "Reservation created successfully".to_string(),
        }),
    ))
}

/// Confirm a pending reservation
#[utoipa::path(
    post,
    path = "/reservations/{id}/confirm",
    tag = "reservations",
    params(
        ("id" = i64, Path, description = "Reservation ID")
    ),
    responses(
        (status = 200, description = "Reservation confirmed", body = ReservationActionResponse),
        (status = 404, description = "Reservation not found"),
        (status = 409, description = "Reservation is not pending")
    )
)]
pub async fn confirm_reservation(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ReservationActionResponse>> {
    let reservation = state.services.reservations.confirm(id).await?;

    Ok(Json(ReservationActionResponse {
        status: "confirmed".to_string(),
        reservation,
    }))
}

/// Check a guest in
#[utoipa::path(
    post,
    path = "/reservations/{id}/check-in",
    tag = "reservations",
    params(
        ("id" = i64, Path, description = "Reservation ID")
    ),
    responses(
        (status = 200, description = "Guest checked in", body = ReservationActionResponse),
        (status = 404, description = "Reservation not found"),
        (status = 409, description = "Reservation cannot be checked in")
    )
)]
pub async fn check_in_reservation(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ReservationActionResponse>> {
    let reservation = state.services.reservations.check_in(id).await?;

    Ok(Json(ReservationActionResponse {
        status: "checked_in".to_string(),
        reservation,
    }))
}

/// Check a guest out
#[utoipa::path(
    post,
    path = "/reservations/{id}/check-out",
    tag = "reservations",
    params(
        ("id" = i64, Path, description = "Reservation ID")
    ),
    responses(
        (status = 200, description = "Guest checked out", body = ReservationActionResponse),
        (status = 404, description = "Reservation not found"),
        (status = 409, description = "Reservation cannot be checked out")
    )
)]
pub async fn check_out_reservation(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ReservationActionResponse>> {
    let reservation = state.services.reservations.check_out(id).await?;

    Ok(Json(ReservationActionResponse {
        status: "checked_out".to_string(),
        reservation,
    }))
}

/// Cancel a pending or confirmed reservation
#[utoipa::path(
    post,
    path = "/reservations/{id}/cancel",
    tag = "reservations",
    params(
        ("id" = i64, Path, description = "Reservation ID")
    ),
    request_body = CancelReservation,
    responses(
        (status = 200, description = "Reservation cancelled", body = ReservationActionResponse),
        (status = 404, description = "Reservation not found"),
        (status = 409, description = "Reservation cannot be cancelled")
    )
)]
pub async fn cancel_reservation(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
    Json(request): Json<CancelReservation>,
) -> AppResult<Json<ReservationActionResponse>> {
    let reservation = state.services.reservations.cancel(id, &request.reason).await?;

    Ok(Json(ReservationActionResponse {
        status: "cancelled".to_string(),
        reservation,
    }))
}
