//! Data models for Harborview

pub mod reservation;
pub mod room;
pub mod user;

// Re-export commonly used types
pub use reservation::{Reservation, ReservationDetails, ReservationStatus};
pub use room::{Room, RoomStatus, RoomType};
pub use user::{Role, User, UserStatus};
