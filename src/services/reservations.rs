//! Reservation management service
//!
//! Status transitions write the reservation and the linked room as two
//! plain sequential updates with no transaction around them. Concurrent
//! transitions on the same room are last-writer-wins; this is a known
//! limitation, not a guarantee the service tries to provide.

use chrono::Utc;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::reservation::{
        generate_confirmation_code, CreateReservation, Reservation, ReservationDetails,
        ReservationQuery,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct ReservationsService {
    repository: Repository,
}

impl ReservationsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Get reservation by ID
    pub async fn get_reservation(&self, id: i64) -> AppResult<Reservation> {
        self.repository.reservations.get_by_id(id).await
    }

    /// Get reservation by confirmation code
    pub async fn get_by_confirmation_code(&self, code: &str) -> AppResult<Reservation> {
        self.repository.reservations.get_by_confirmation_code(code).await
    }

    /// List reservations with filters and pagination
    pub async fn search_reservations(
        &self,
        query: &ReservationQuery,
    ) -> AppResult<(Vec<ReservationDetails>, i64)> {
        self.repository.reservations.search(query).await
    }

    /// Get reservations for a user
    pub async fn get_user_reservations(&self, user_id: i64) -> AppResult<Vec<ReservationDetails>> {
        // Verify user exists
        self.repository.users.get_by_id(user_id).await?;
        self.repository.reservations.get_user_reservations(user_id).await
    }

    /// Create a new reservation in PENDING status
    pub async fn create_reservation(&self, request: CreateReservation) -> AppResult<Reservation> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        // Verify guest and room exist
        self.repository.users.get_by_id(request.user_id).await?;
        let room = self.repository.rooms.get_by_id(request.room_id).await?;

        let now = Utc::now();
        let mut reservation = Reservation::new(
            request.user_id,
            &room,
            request.check_in_date,
            request.check_out_date,
            request.guest_count,
            request.total_amount,
            request.special_requests,
            now.date_naive(),
            now,
        )?;

        if reservation.confirmation_code.is_empty() {
            reservation.confirmation_code =
                generate_confirmation_code(now, &mut rand::thread_rng());
        }

        self.repository.reservations.create(&reservation).await
    }

    /// Confirm a pending reservation
    pub async fn confirm(&self, id: i64) -> AppResult<Reservation> {
        let mut reservation = self.repository.reservations.get_by_id(id).await?;
        reservation.confirm(Utc::now())?;
        self.repository.reservations.save_transition(&reservation).await?;
        Ok(reservation)
    }

    /// Check a guest in, marking the linked room occupied
    pub async fn check_in(&self, id: i64) -> AppResult<Reservation> {
        let mut reservation = self.repository.reservations.get_by_id(id).await?;
        let mut room = self.repository.rooms.get_by_id(reservation.room_id).await?;

        let now = Utc::now();
        reservation.check_in(&mut room, now.date_naive(), now)?;

        self.repository.reservations.save_transition(&reservation).await?;
        self.repository.rooms.save_status(&room).await?;
        Ok(reservation)
    }

    /// Check a guest out, completing the stay and freeing the room
    pub async fn check_out(&self, id: i64) -> AppResult<Reservation> {
        let mut reservation = self.repository.reservations.get_by_id(id).await?;
        let mut room = self.repository.rooms.get_by_id(reservation.room_id).await?;

        let now = Utc::now();
        reservation.check_out(&mut room, now)?;

        self.repository.reservations.save_transition(&reservation).await?;
        self.repository.rooms.save_status(&room).await?;
        Ok(reservation)
    }

    /// Cancel a pending or confirmed reservation
    pub async fn cancel(&self, id: i64, reason: &str) -> AppResult<Reservation> {
        let mut reservation = self.repository.reservations.get_by_id(id).await?;
        reservation.cancel(reason, Utc::now())?;
        self.repository.reservations.save_transition(&reservation).await?;
        Ok(reservation)
    }
}
