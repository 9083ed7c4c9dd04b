//! Room model and related types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Room category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomType {
    Standard,
    Deluxe,
    Suite,
    Penthouse,
}

impl RoomType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::Standard => "STANDARD",
            RoomType::Deluxe => "DELUXE",
            RoomType::Suite => "SUITE",
            RoomType::Penthouse => "PENTHOUSE",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            RoomType::Standard => "Standard",
            RoomType::Deluxe => "Deluxe",
            RoomType::Suite => "Suite",
            RoomType::Penthouse => "Penthouse",
        }
    }

    pub fn default_max_occupancy(&self) -> i32 {
        match self {
            RoomType::Standard => 2,
            RoomType::Deluxe => 3,
            RoomType::Suite => 4,
            RoomType::Penthouse => 6,
        }
    }

    pub fn default_bed_count(&self) -> i32 {
        match self {
            RoomType::Standard | RoomType::Deluxe => 1,
            RoomType::Suite => 2,
            RoomType::Penthouse => 3,
        }
    }

    pub fn default_bed_type(&self) -> &'static str {
        match self {
            RoomType::Standard => "Queen",
            RoomType::Deluxe | RoomType::Suite | RoomType::Penthouse => "King",
        }
    }
}

impl std::fmt::Display for RoomType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RoomType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "STANDARD" => Ok(RoomType::Standard),
            "DELUXE" => Ok(RoomType::Deluxe),
            "SUITE" => Ok(RoomType::Suite),
            "PENTHOUSE" => Ok(RoomType::Penthouse),
            _ => Err(format!("Invalid room type: {}", s)),
        }
    }
}

// SQLx conversion for RoomType (stored as VARCHAR)
impl sqlx::Type<Postgres> for RoomType {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for RoomType {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for RoomType {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_str().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

/// Room occupancy status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomStatus {
    Available,
    Occupied,
    Maintenance,
    Cleaning,
    OutOfOrder,
}

impl RoomStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomStatus::Available => "AVAILABLE",
            RoomStatus::Occupied => "OCCUPIED",
            RoomStatus::Maintenance => "MAINTENANCE",
            RoomStatus::Cleaning => "CLEANING",
            RoomStatus::OutOfOrder => "OUT_OF_ORDER",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            RoomStatus::Available => "Available",
            RoomStatus::Occupied => "Occupied",
            RoomStatus::Maintenance => "Under Maintenance",
            RoomStatus::Cleaning => "Being Cleaned",
            RoomStatus::OutOfOrder => "Out of Order",
        }
    }
}

impl std::fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RoomStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "AVAILABLE" => Ok(RoomStatus::Available),
            "OCCUPIED" => Ok(RoomStatus::Occupied),
            "MAINTENANCE" => Ok(RoomStatus::Maintenance),
            "CLEANING" => Ok(RoomStatus::Cleaning),
            "OUT_OF_ORDER" => Ok(RoomStatus::OutOfOrder),
            _ => Err(format!("Invalid room status: {}", s)),
        }
    }
}

// SQLx conversion for RoomStatus (stored as VARCHAR)
impl sqlx::Type<Postgres> for RoomStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for RoomStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for RoomStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_str().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

/// Maximum length of a room number
const ROOM_NUMBER_MAX_LEN: usize = 10;

/// Room model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Room {
    pub id: i64,
    #[sqlx(rename = "room_number")]
    pub number: String,
    pub room_type: RoomType,
    pub price: Decimal,
    pub status: RoomStatus,
    pub description: Option<String>,
    pub max_occupancy: i32,
    pub bed_count: i32,
    pub bed_type: String,
    pub has_balcony: bool,
    pub has_sea_view: bool,
    pub has_wifi: bool,
    pub has_air_conditioning: bool,
    pub has_minibar: bool,
    pub has_safe: bool,
    pub floor_number: Option<i32>,
    pub amenities: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Room {
    /// Build a new room in AVAILABLE status. Occupancy and bed metadata
    /// default from the room type. The id is assigned at persistence.
    pub fn new(
        number: &str,
        room_type: RoomType,
        price: Decimal,
        now: DateTime<Utc>,
    ) -> AppResult<Self> {
        if number.trim().is_empty() {
            return Err(AppError::Validation("Room number is required".to_string()));
        }
        if number.len() > ROOM_NUMBER_MAX_LEN {
            return Err(AppError::Validation(
                "Room number must not exceed 10 characters".to_string(),
            ));
        }
        if price <= Decimal::ZERO {
            return Err(AppError::Validation(
                "Price must be greater than 0".to_string(),
            ));
        }

        Ok(Room {
            id: 0,
            number: number.to_string(),
            room_type,
            price,
            status: RoomStatus::Available,
            description: None,
            max_occupancy: room_type.default_max_occupancy(),
            bed_count: room_type.default_bed_count(),
            bed_type: room_type.default_bed_type().to_string(),
            has_balcony: false,
            has_sea_view: false,
            has_wifi: true,
            has_air_conditioning: true,
            has_minibar: false,
            has_safe: false,
            floor_number: None,
            amenities: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn is_available(&self) -> bool {
        self.status == RoomStatus::Available
    }

    pub fn is_occupied(&self) -> bool {
        self.status == RoomStatus::Occupied
    }

    pub fn is_under_maintenance(&self) -> bool {
        self.status == RoomStatus::Maintenance
    }

    /// Overwrite the status unconditionally, whatever the current one is.
    pub fn mark_occupied(&mut self, now: DateTime<Utc>) {
        self.status = RoomStatus::Occupied;
        self.updated_at = now;
    }

    pub fn mark_available(&mut self, now: DateTime<Utc>) {
        self.status = RoomStatus::Available;
        self.updated_at = now;
    }

    pub fn mark_under_maintenance(&mut self, now: DateTime<Utc>) {
        self.status = RoomStatus::Maintenance;
        self.updated_at = now;
    }

    pub fn set_status(&mut self, status: RoomStatus, now: DateTime<Utc>) {
        self.status = status;
        self.updated_at = now;
    }

    /// Display name such as "Deluxe Room 201"
    pub fn display_name(&self) -> String {
        format!("{} Room {}", self.room_type.display_name(), self.number)
    }

    /// Enabled amenities as display strings, in fixed order, followed by
    /// the free-text amenity list.
    pub fn features(&self) -> Vec<String> {
        let mut features = Vec::new();
        if self.has_wifi {
            features.push("Free WiFi".to_string());
        }
        if self.has_air_conditioning {
            features.push("Air Conditioning".to_string());
        }
        if self.has_balcony {
            features.push("Balcony".to_string());
        }
        if self.has_sea_view {
            features.push("Sea View".to_string());
        }
        if self.has_minibar {
            features.push("Minibar".to_string());
        }
        if self.has_safe {
            features.push("Safe".to_string());
        }
        features.extend(self.amenities.iter().cloned());
        features
    }
}

/// Create room request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRoom {
    /// Room number, unique across all rooms
    #[validate(length(min = 1, max = 10, message = "Room number must be 1-10 characters"))]
    pub number: String,
    pub room_type: RoomType,
    pub price: Decimal,
    #[validate(length(max = 1000, message = "Description must not exceed 1000 characters"))]
    pub description: Option<String>,
    pub max_occupancy: Option<i32>,
    pub bed_count: Option<i32>,
    #[validate(length(max = 50, message = "Bed type must not exceed 50 characters"))]
    pub bed_type: Option<String>,
    pub has_balcony: Option<bool>,
    pub has_sea_view: Option<bool>,
    pub has_wifi: Option<bool>,
    pub has_air_conditioning: Option<bool>,
    pub has_minibar: Option<bool>,
    pub has_safe: Option<bool>,
    pub floor_number: Option<i32>,
    pub amenities: Option<Vec<String>>,
}

/// Update room request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateRoom {
    pub price: Option<Decimal>,
    #[validate(length(max = 1000, message = "Description must not exceed 1000 characters"))]
    pub description: Option<String>,
    pub max_occupancy: Option<i32>,
    pub bed_count: Option<i32>,
    #[validate(length(max = 50, message = "Bed type must not exceed 50 characters"))]
    pub bed_type: Option<String>,
    pub has_balcony: Option<bool>,
    pub has_sea_view: Option<bool>,
    pub has_wifi: Option<bool>,
    pub has_air_conditioning: Option<bool>,
    pub has_minibar: Option<bool>,
    pub has_safe: Option<bool>,
    pub floor_number: Option<i32>,
    pub amenities: Option<Vec<String>>,
}

/// Room query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct RoomQuery {
    pub status: Option<RoomStatus>,
    pub room_type: Option<RoomType>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Room status change request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateRoomStatus {
    pub status: RoomStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at_noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn new_room_derives_defaults_from_type() {
        let room = Room::new("101", RoomType::Standard, Decimal::new(10000, 2), at_noon()).unwrap();
        assert_eq!(room.max_occupancy, 2);
        assert_eq!(room.bed_count, 1);
        assert_eq!(room.bed_type, "Queen");
        assert_eq!(room.status, RoomStatus::Available);

        let penthouse =
            Room::new("401", RoomType::Penthouse, Decimal::new(65000, 2), at_noon()).unwrap();
        assert_eq!(penthouse.max_occupancy, 6);
        assert_eq!(penthouse.bed_count, 3);
        assert_eq!(penthouse.bed_type, "King");
    }

    #[test]
    fn new_room_rejects_blank_number() {
        let err = Room::new("   ", RoomType::Standard, Decimal::ONE, at_noon()).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn new_room_rejects_oversized_number() {
        let err = Room::new("12345678901", RoomType::Standard, Decimal::ONE, at_noon()).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn new_room_rejects_non_positive_price() {
        let err = Room::new("101", RoomType::Standard, Decimal::ZERO, at_noon()).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err =
            Room::new("101", RoomType::Standard, Decimal::new(-100, 0), at_noon()).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn display_name_includes_type_and_number() {
        let room = Room::new("201", RoomType::Deluxe, Decimal::new(18000, 2), at_noon()).unwrap();
        assert_eq!(room.display_name(), "Deluxe Room 201");
    }

    #[test]
    fn features_keep_fixed_order() {
        let mut room = Room::new("301", RoomType::Suite, Decimal::new(32000, 2), at_noon()).unwrap();
        room.has_balcony = true;
        room.has_sea_view = true;
        room.has_minibar = true;
        room.has_safe = true;
        room.amenities = vec!["Coffee Machine".to_string()];

        assert_eq!(
            room.features(),
            vec![
                "Free WiFi",
                "Air Conditioning",
                "Balcony",
                "Sea View",
                "Minibar",
                "Safe",
                "Coffee Machine",
            ]
        );
    }

    #[test]
    fn status_marks_overwrite_unconditionally() {
        let mut room = Room::new("101", RoomType::Standard, Decimal::ONE, at_noon()).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 6, 2, 9, 0, 0).unwrap();

        room.mark_occupied(later);
        assert!(room.is_occupied());
        assert_eq!(room.updated_at, later);

        // Maintenance can be entered from any state
        room.mark_under_maintenance(later);
        assert!(room.is_under_maintenance());

        room.mark_available(later);
        assert!(room.is_available());

        room.set_status(RoomStatus::Cleaning, later);
        assert_eq!(room.status, RoomStatus::Cleaning);
    }

    #[test]
    fn room_type_round_trips_through_strings() {
        for t in [
            RoomType::Standard,
            RoomType::Deluxe,
            RoomType::Suite,
            RoomType::Penthouse,
        ] {
            assert_eq!(t.as_str().parse::<RoomType>().unwrap(), t);
        }
        assert!("CABIN".parse::<RoomType>().is_err());
    }
}
