//! Business logic services

pub mod auth;
pub mod reservations;
pub mod rooms;
pub mod stats;
pub mod users;

use std::sync::Arc;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub rooms: rooms::RoomsService,
    pub reservations: reservations::ReservationsService,
    pub users: users::UsersService,
    pub stats: stats::StatsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        let verifier = Arc::new(auth::DemoCredentials);
        Self {
            auth: auth::AuthService::new(repository.clone(), verifier),
            rooms: rooms::RoomsService::new(repository.clone()),
            reservations: reservations::ReservationsService::new(repository.clone()),
            users: users::UsersService::new(repository.clone()),
            stats: stats::StatsService::new(repository),
        }
    }
}
