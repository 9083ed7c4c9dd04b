//! API handlers for Harborview REST endpoints

pub mod auth;
pub mod health;
pub mod openapi;
pub mod reservations;
pub mod rooms;
pub mod stats;
pub mod users;
