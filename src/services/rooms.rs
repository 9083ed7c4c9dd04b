//! Room management service

use chrono::Utc;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::room::{CreateRoom, Room, RoomQuery, RoomStatus, UpdateRoom},
    repository::Repository,
};

#[derive(Clone)]
pub struct RoomsService {
    repository: Repository,
}

impl RoomsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Get room by ID
    pub async fn get_room(&self, id: i64) -> AppResult<Room> {
        self.repository.rooms.get_by_id(id).await
    }

    /// List rooms with filters and pagination
    pub async fn search_rooms(&self, query: &RoomQuery) -> AppResult<(Vec<Room>, i64)> {
        self.repository.rooms.search(query).await
    }

    /// Create a new room
    pub async fn create_room(&self, request: CreateRoom) -> AppResult<Room> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if self.repository.rooms.number_exists(&request.number).await? {
            return Err(AppError::Validation(format!(
                "Room number {} is already in use",
                request.number
            )));
        }

        let now = Utc::now();
        let mut room = Room::new(&request.number, request.room_type, request.price, now)?;

        room.description = request.description;
        if let Some(max_occupancy) = request.max_occupancy {
            room.max_occupancy = max_occupancy;
        }
        if let Some(bed_count) = request.bed_count {
            room.bed_count = bed_count;
        }
        if let Some(bed_type) = request.bed_type {
            room.bed_type = bed_type;
        }
        if let Some(has_balcony) = request.has_balcony {
            room.has_balcony = has_balcony;
        }
        if let Some(has_sea_view) = request.has_sea_view {
            room.has_sea_view = has_sea_view;
        }
        if let Some(has_wifi) = request.has_wifi {
            room.has_wifi = has_wifi;
        }
        if let Some(has_air_conditioning) = request.has_air_conditioning {
            room.has_air_conditioning = has_air_conditioning;
        }
        if let Some(has_minibar) = request.has_minibar {
            room.has_minibar = has_minibar;
        }
        if let Some(has_safe) = request.has_safe {
            room.has_safe = has_safe;
        }
        room.floor_number = request.floor_number;
        if let Some(amenities) = request.amenities {
            room.amenities = amenities;
        }

        self.repository.rooms.create(&room).await
    }

    /// Update an existing room
    pub async fn update_room(&self, id: i64, request: UpdateRoom) -> AppResult<Room> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if let Some(price) = request.price {
            if price <= rust_decimal::Decimal::ZERO {
                return Err(AppError::Validation(
                    "Price must be greater than 0".to_string(),
                ));
            }
        }

        // Ensure the room exists before building the update
        self.repository.rooms.get_by_id(id).await?;
        self.repository.rooms.update(id, &request).await
    }

    /// Overwrite a room's status directly, without lifecycle guards
    pub async fn set_room_status(&self, id: i64, status: RoomStatus) -> AppResult<Room> {
        let mut room = self.repository.rooms.get_by_id(id).await?;
        let now = Utc::now();

        match status {
            RoomStatus::Occupied => room.mark_occupied(now),
            RoomStatus::Available => room.mark_available(now),
            RoomStatus::Maintenance => room.mark_under_maintenance(now),
            other => room.set_status(other, now),
        }

        self.repository.rooms.save_status(&room).await?;
        Ok(room)
    }
}
