//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, health, reservations, rooms, stats, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Harborview API",
        version = "1.0.0",
        description = "Hotel Management System REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html"),
        contact(name = "Harborview Team", email = "contact@harborview.example")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        auth::register,
        auth::logout,
        auth::refresh,
        // Rooms
        rooms::list_rooms,
        rooms::get_room,
        rooms::create_room,
        rooms::update_room,
        rooms::update_room_status,
        // Reservations
        reservations::list_reservations,
        reservations::get_reservation,
        reservations::get_reservation_by_code,
        reservations::get_user_reservations,
        reservations::create_reservation,
        reservations::confirm_reservation,
        reservations::check_in_reservation,
        reservations::check_out_reservation,
        reservations::cancel_reservation,
        // Users
        users::list_users,
        users::list_inactive_users,
        users::get_user,
        // Stats
        stats::get_stats,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            auth::MessageResponse,
            crate::models::user::RegisterRequest,
            // Rooms
            crate::models::room::Room,
            crate::models::room::RoomType,
            crate::models::room::RoomStatus,
            crate::models::room::CreateRoom,
            crate::models::room::UpdateRoom,
            crate::models::room::UpdateRoomStatus,
            rooms::RoomResponse,
            // Reservations
            crate::models::reservation::Reservation,
            crate::models::reservation::ReservationStatus,
            crate::models::reservation::ReservationDetails,
            crate::models::reservation::CreateReservation,
            crate::models::reservation::CancelReservation,
            reservations::CreateReservationResponse,
            reservations::ReservationActionResponse,
            // Users
            crate::models::user::User,
            crate::models::user::Role,
            crate::models::user::UserStatus,
            // Stats
            stats::StatsResponse,
            stats::RoomStats,
            stats::ReservationStats,
            stats::UserStats,
            stats::StatEntry,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "rooms", description = "Room management"),
        (name = "reservations", description = "Reservation management"),
        (name = "users", description = "User lookups"),
        (name = "stats", description = "Statistics")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
