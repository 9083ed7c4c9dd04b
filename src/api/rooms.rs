//! Room management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::room::{CreateRoom, Room, RoomQuery, UpdateRoom, UpdateRoomStatus},
};

/// Paginated response wrapper
#[derive(Serialize, ToSchema)]
pub struct PaginatedResponse<T>
where
    T: for<'a> ToSchema<'a>,
{
    /// List of items
    pub items: Vec<T>,
    /// Total number of items
    pub total: i64,
    /// Current page number
    pub page: i64,
    /// Items per page
    pub per_page: i64,
}

/// Room with display helpers for API consumers
#[derive(Serialize, ToSchema)]
pub struct RoomResponse {
    #[serde(flatten)]
    pub room: Room,
    /// Display name such as "Deluxe Room 201"
    pub display_name: String,
    /// Enabled amenities as display strings
    pub features: Vec<String>,
}

impl From<Room> for RoomResponse {
    fn from(room: Room) -> Self {
        let display_name = room.display_name();
        let features = room.features();
        Self {
            room,
            display_name,
            features,
        }
    }
}

/// List rooms with filters and pagination
#[utoipa::path(
    get,
    path = "/rooms",
    tag = "rooms",
    params(
        ("status" = Option<String>, Query, description = "Filter by room status"),
        ("room_type" = Option<String>, Query, description = "Filter by room type"),
        ("page" = Option<i64>, Query, description = "Page number"),
        ("per_page" = Option<i64>, Query, description = "Items per page")
    ),
    responses(
        (status = 200, description = "List of rooms", body = PaginatedResponse<RoomResponse>)
    )
)]
pub async fn list_rooms(
    State(state): State<crate::AppState>,
    Query(query): Query<RoomQuery>,
) -> AppResult<Json<PaginatedResponse<RoomResponse>>> {
    let (rooms, total) = state.services.rooms.search_rooms(&query).await?;

    Ok(Json(PaginatedResponse {
        items: rooms.into_iter().map(RoomResponse::from).collect(),
        total,
        page: query.page.unwrap_or(1),
        per_page: query.per_page.unwrap_or(20),
    }))
}

/// Get room details by ID
#[utoipa::path(
    get,
    path = "/rooms/{id}",
    tag = "rooms",
    params(
        ("id" = i64, Path, description = "Room ID")
    ),
    responses(
        (status = 200, description = "Room details", body = RoomResponse),
        (status = 404, description = "Room not found")
    )
)]
pub async fn get_room(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<RoomResponse>> {
    let room = state.services.rooms.get_room(id).await?;
    Ok(Json(room.into()))
}

/// Create a new room
#[utoipa::path(
    post,
    path = "/rooms",
    tag = "rooms",
    request_body = CreateRoom,
    responses(
        (status = 201, description = "Room created", body = RoomResponse),
        (status = 400, description = "Invalid input or room number already in use")
    )
)]
pub async fn create_room(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateRoom>,
) -> AppResult<(StatusCode, Json<RoomResponse>)> {
    let created = state.services.rooms.create_room(request).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Update an existing room
#[utoipa::path(
    put,
    path = "/rooms/{id}",
    tag = "rooms",
    params(
        ("id" = i64, Path, description = "Room ID")
    ),
    request_body = UpdateRoom,
    responses(
        (status = 200, description = "Room updated", body = RoomResponse),
        (status = 404, description = "Room not found")
    )
)]
pub async fn update_room(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateRoom>,
) -> AppResult<Json<RoomResponse>> {
    let updated = state.services.rooms.update_room(id, request).await?;
    Ok(Json(updated.into()))
}

/// Overwrite a room's status directly
#[utoipa::path(
    put,
    path = "/rooms/{id}/status",
    tag = "rooms",
    params(
        ("id" = i64, Path, description = "Room ID")
    ),
    request_body = UpdateRoomStatus,
    responses(
        (status = 200, description = "Status updated", body = RoomResponse),
        (status = 404, description = "Room not found")
    )
)]
pub async fn update_room_status(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateRoomStatus>,
) -> AppResult<Json<RoomResponse>> {
    let room = state.services.rooms.set_room_status(id, request.status).await?;
    Ok(Json(room.into()))
}
