//! Reservation model and lifecycle state machine

use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::room::Room;
use crate::error::{AppError, AppResult};

/// Reservation lifecycle status.
///
/// PENDING -> CONFIRMED -> CHECKED_IN -> COMPLETED, with CANCELLED reachable
/// from PENDING or CONFIRMED. COMPLETED, CANCELLED and NO_SHOW are terminal.
/// NO_SHOW is never entered by any operation here; it only exists as a
/// stored status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    CheckedIn,
    Completed,
    Cancelled,
    NoShow,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "PENDING",
            ReservationStatus::Confirmed => "CONFIRMED",
            ReservationStatus::CheckedIn => "CHECKED_IN",
            ReservationStatus::Completed => "COMPLETED",
            ReservationStatus::Cancelled => "CANCELLED",
            ReservationStatus::NoShow => "NO_SHOW",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "Pending Confirmation",
            ReservationStatus::Confirmed => "Confirmed",
            ReservationStatus::CheckedIn => "Checked In",
            ReservationStatus::Completed => "Completed",
            ReservationStatus::Cancelled => "Cancelled",
            ReservationStatus::NoShow => "No Show",
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ReservationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PENDING" => Ok(ReservationStatus::Pending),
            "CONFIRMED" => Ok(ReservationStatus::Confirmed),
            "CHECKED_IN" => Ok(ReservationStatus::CheckedIn),
            "COMPLETED" => Ok(ReservationStatus::Completed),
            "CANCELLED" => Ok(ReservationStatus::Cancelled),
            "NO_SHOW" => Ok(ReservationStatus::NoShow),
            _ => Err(format!("Invalid reservation status: {}", s)),
        }
    }
}

// SQLx conversion for ReservationStatus (stored as VARCHAR)
impl sqlx::Type<Postgres> for ReservationStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for ReservationStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for ReservationStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_str().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

/// Generate a confirmation code from a wall-clock timestamp and a random
/// three-digit suffix. Uniqueness is enforced by the database constraint,
/// not here; a collision surfaces as a Conflict at insert time.
pub fn generate_confirmation_code<R: Rng>(now: DateTime<Utc>, rng: &mut R) -> String {
    format!("HV{}{:03}", now.timestamp_millis(), rng.gen_range(0..1000))
}

/// Reservation model from database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Reservation {
    pub id: i64,
    pub user_id: i64,
    pub room_id: i64,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub guest_count: i32,
    pub total_amount: Decimal,
    pub status: ReservationStatus,
    pub special_requests: Option<String>,
    pub confirmation_code: String,
    pub checked_in_at: Option<DateTime<Utc>>,
    pub checked_out_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub cancellation_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    /// Build a new reservation in PENDING status against the given room.
    ///
    /// The check-in date must be today or later, and the total amount is
    /// computed from the room's nightly price unless explicitly supplied.
    /// The confirmation code is left empty here and generated at first
    /// persistence.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_id: i64,
        room: &Room,
        check_in_date: NaiveDate,
        check_out_date: NaiveDate,
        guest_count: Option<i32>,
        total_amount: Option<Decimal>,
        special_requests: Option<String>,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> AppResult<Self> {
        if check_in_date < today {
            return Err(AppError::Validation(
                "Check-in date must be today or in the future".to_string(),
            ));
        }

        let total_amount = match total_amount {
            Some(amount) => amount,
            None => Self::compute_total_amount(
                Some(room),
                Some(check_in_date),
                Some(check_out_date),
            )?,
        };
        if total_amount <= Decimal::ZERO {
            return Err(AppError::Validation(
                "Total amount must be greater than 0".to_string(),
            ));
        }

        Ok(Reservation {
            id: 0,
            user_id,
            room_id: room.id,
            check_in_date,
            check_out_date,
            guest_count: guest_count.unwrap_or(1),
            total_amount,
            status: ReservationStatus::Pending,
            special_requests,
            confirmation_code: String::new(),
            checked_in_at: None,
            checked_out_at: None,
            cancelled_at: None,
            cancellation_reason: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Price for a stay: nightly price times whole nights.
    ///
    /// A partially specified quote (room or either date missing) resolves to
    /// zero rather than an error; only a fully specified range with
    /// check-out not after check-in is rejected.
    pub fn compute_total_amount(
        room: Option<&Room>,
        check_in_date: Option<NaiveDate>,
        check_out_date: Option<NaiveDate>,
    ) -> AppResult<Decimal> {
        let (room, check_in, check_out) = match (room, check_in_date, check_out_date) {
            (Some(r), Some(ci), Some(co)) => (r, ci, co),
            _ => return Ok(Decimal::ZERO),
        };

        let nights = (check_out - check_in).num_days();
        if nights <= 0 {
            return Err(AppError::Validation(
                "Check-out date must be after check-in date".to_string(),
            ));
        }

        Ok(room.price * Decimal::from(nights))
    }

    /// Whole-day difference between check-out and check-in
    pub fn nights(&self) -> i64 {
        (self.check_out_date - self.check_in_date).num_days()
    }

    pub fn is_active(&self) -> bool {
        self.status == ReservationStatus::Confirmed || self.status == ReservationStatus::CheckedIn
    }

    pub fn can_check_in(&self, today: NaiveDate) -> bool {
        self.status == ReservationStatus::Confirmed
            && today == self.check_in_date
            && self.checked_in_at.is_none()
    }

    pub fn can_check_out(&self) -> bool {
        self.status == ReservationStatus::CheckedIn && self.checked_out_at.is_none()
    }

    pub fn can_cancel(&self) -> bool {
        self.status == ReservationStatus::Pending || self.status == ReservationStatus::Confirmed
    }

    pub fn confirm(&mut self, now: DateTime<Utc>) -> AppResult<()> {
        if self.status != ReservationStatus::Pending {
            return Err(AppError::InvalidState(
                "Only pending reservations can be confirmed".to_string(),
            ));
        }
        self.status = ReservationStatus::Confirmed;
        self.updated_at = now;
        Ok(())
    }

    /// Check the guest in on the check-in date, marking the room occupied.
    pub fn check_in(
        &mut self,
        room: &mut Room,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> AppResult<()> {
        if !self.can_check_in(today) {
            return Err(AppError::InvalidState(
                "Reservation cannot be checked in".to_string(),
            ));
        }
        self.status = ReservationStatus::CheckedIn;
        self.checked_in_at = Some(now);
        self.updated_at = now;
        room.mark_occupied(now);
        Ok(())
    }

    /// Check the guest out, completing the stay and freeing the room.
    pub fn check_out(&mut self, room: &mut Room, now: DateTime<Utc>) -> AppResult<()> {
        if !self.can_check_out() {
            return Err(AppError::InvalidState(
                "Reservation cannot be checked out".to_string(),
            ));
        }
        self.status = ReservationStatus::Completed;
        self.checked_out_at = Some(now);
        self.updated_at = now;
        room.mark_available(now);
        Ok(())
    }

    pub fn cancel(&mut self, reason: &str, now: DateTime<Utc>) -> AppResult<()> {
        if !self.can_cancel() {
            return Err(AppError::InvalidState(
                "Reservation cannot be cancelled".to_string(),
            ));
        }
        self.status = ReservationStatus::Cancelled;
        self.cancelled_at = Some(now);
        self.cancellation_reason = Some(reason.to_string());
        self.updated_at = now;
        Ok(())
    }
}

/// Reservation with guest and room context for display
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReservationDetails {
    pub id: i64,
    pub confirmation_code: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub guest_count: i32,
    pub total_amount: Decimal,
    pub status: ReservationStatus,
    pub guest_name: String,
    pub room_number: String,
    pub special_requests: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Create reservation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReservation {
    pub user_id: i64,
    pub room_id: i64,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    #[validate(range(min = 1, message = "Guest count must be at least 1"))]
    pub guest_count: Option<i32>,
    /// Overrides the computed nightly-price total when supplied
    pub total_amount: Option<Decimal>,
    pub special_requests: Option<String>,
}

/// Cancel reservation request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CancelReservation {
    pub reason: String,
}

/// Reservation query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ReservationQuery {
    pub status: Option<ReservationStatus>,
    pub user_id: Option<i64>,
    pub room_id: Option<i64>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::room::{RoomStatus, RoomType};
    use chrono::TimeZone;
    use rand::{rngs::StdRng, SeedableRng};

    fn at_noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn standard_room() -> Room {
        let mut room = Room::new("101", RoomType::Standard, Decimal::new(10000, 2), at_noon())
            .unwrap();
        room.id = 1;
        room
    }

    fn pending_reservation(room: &Room) -> Reservation {
        Reservation::new(
            2,
            room,
            date(2024, 6, 1),
            date(2024, 6, 4),
            None,
            None,
            None,
            date(2024, 6, 1),
            at_noon(),
        )
        .unwrap()
    }

    fn in_status(room: &Room, status: ReservationStatus) -> Reservation {
        let mut r = pending_reservation(room);
        r.status = status;
        if status == ReservationStatus::CheckedIn {
            r.checked_in_at = Some(at_noon());
        }
        r
    }

    #[test]
    fn total_amount_is_price_times_nights() {
        let room = standard_room();
        let reservation = pending_reservation(&room);
        assert_eq!(reservation.nights(), 3);
        assert_eq!(reservation.total_amount, Decimal::new(30000, 2));
        assert_eq!(reservation.status, ReservationStatus::Pending);
        assert_eq!(reservation.guest_count, 1);
    }

    #[test]
    fn incomplete_quote_resolves_to_zero() {
        let room = standard_room();
        let amount =
            Reservation::compute_total_amount(None, Some(date(2024, 6, 1)), Some(date(2024, 6, 4)))
                .unwrap();
        assert_eq!(amount, Decimal::ZERO);

        let amount =
            Reservation::compute_total_amount(Some(&room), None, Some(date(2024, 6, 4))).unwrap();
        assert_eq!(amount, Decimal::ZERO);
    }

    #[test]
    fn non_positive_night_count_is_rejected() {
        let room = standard_room();

        let err = Reservation::compute_total_amount(
            Some(&room),
            Some(date(2024, 6, 4)),
            Some(date(2024, 6, 4)),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = Reservation::new(
            2,
            &room,
            date(2024, 6, 4),
            date(2024, 6, 2),
            None,
            None,
            None,
            date(2024, 6, 1),
            at_noon(),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn past_check_in_date_is_rejected() {
        let room = standard_room();
        let err = Reservation::new(
            2,
            &room,
            date(2024, 5, 30),
            date(2024, 6, 2),
            None,
            None,
            None,
            date(2024, 6, 1),
            at_noon(),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn explicit_total_amount_must_be_positive() {
        let room = standard_room();
        let err = Reservation::new(
            2,
            &room,
            date(2024, 6, 1),
            date(2024, 6, 4),
            None,
            Some(Decimal::ZERO),
            None,
            date(2024, 6, 1),
            at_noon(),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn confirm_requires_pending() {
        let room = standard_room();
        for status in [
            ReservationStatus::Confirmed,
            ReservationStatus::CheckedIn,
            ReservationStatus::Completed,
            ReservationStatus::Cancelled,
            ReservationStatus::NoShow,
        ] {
            let mut r = in_status(&room, status);
            let before = r.clone();
            let err = r.confirm(at_noon()).unwrap_err();
            assert!(matches!(err, AppError::InvalidState(_)));
            assert_eq!(r, before, "failed confirm must leave fields unchanged");
        }

        let mut r = pending_reservation(&room);
        r.confirm(at_noon()).unwrap();
        assert_eq!(r.status, ReservationStatus::Confirmed);
    }

    #[test]
    fn check_in_requires_confirmed_on_the_right_day() {
        let room = standard_room();
        for status in [
            ReservationStatus::Pending,
            ReservationStatus::CheckedIn,
            ReservationStatus::Completed,
            ReservationStatus::Cancelled,
            ReservationStatus::NoShow,
        ] {
            let mut r = in_status(&room, status);
            let mut room_copy = standard_room();
            let before = r.clone();
            let err = r
                .check_in(&mut room_copy, date(2024, 6, 1), at_noon())
                .unwrap_err();
            assert!(matches!(err, AppError::InvalidState(_)));
            assert_eq!(r, before);
            assert_eq!(room_copy.status, RoomStatus::Available, "room untouched");
        }

        // Right status, wrong day
        let mut r = in_status(&room, ReservationStatus::Confirmed);
        let mut room_copy = standard_room();
        let err = r
            .check_in(&mut room_copy, date(2024, 6, 2), at_noon())
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidState(_)));
        assert_eq!(room_copy.status, RoomStatus::Available);
    }

    #[test]
    fn check_in_then_check_out_completes_and_frees_the_room() {
        let mut room = standard_room();
        let mut r = in_status(&room, ReservationStatus::Confirmed);
        assert!(r.is_active());

        let check_in_time = Utc.with_ymd_and_hms(2024, 6, 1, 15, 0, 0).unwrap();
        r.check_in(&mut room, date(2024, 6, 1), check_in_time).unwrap();
        assert_eq!(r.status, ReservationStatus::CheckedIn);
        assert_eq!(room.status, RoomStatus::Occupied);
        assert!(r.is_active());

        let check_out_time = Utc.with_ymd_and_hms(2024, 6, 4, 11, 0, 0).unwrap();
        r.check_out(&mut room, check_out_time).unwrap();
        assert_eq!(r.status, ReservationStatus::Completed);
        assert_eq!(room.status, RoomStatus::Available);
        assert!(!r.is_active());
        assert!(r.checked_in_at.unwrap() < r.checked_out_at.unwrap());
    }

    #[test]
    fn check_out_requires_checked_in() {
        let room = standard_room();
        for status in [
            ReservationStatus::Pending,
            ReservationStatus::Confirmed,
            ReservationStatus::Completed,
            ReservationStatus::Cancelled,
            ReservationStatus::NoShow,
        ] {
            let mut r = in_status(&room, status);
            let mut room_copy = standard_room();
            let before = r.clone();
            let err = r.check_out(&mut room_copy, at_noon()).unwrap_err();
            assert!(matches!(err, AppError::InvalidState(_)));
            assert_eq!(r, before);
            assert_eq!(room_copy.status, RoomStatus::Available);
        }
    }

    #[test]
    fn cancel_only_from_pending_or_confirmed() {
        let room = standard_room();

        let mut r = in_status(&room, ReservationStatus::Confirmed);
        r.cancel("guest request", at_noon()).unwrap();
        assert_eq!(r.status, ReservationStatus::Cancelled);
        assert_eq!(r.cancellation_reason.as_deref(), Some("guest request"));
        assert!(r.cancelled_at.is_some());

        // Terminal: a cancelled reservation cannot be confirmed again
        let err = r.confirm(at_noon()).unwrap_err();
        assert!(matches!(err, AppError::InvalidState(_)));

        for status in [
            ReservationStatus::CheckedIn,
            ReservationStatus::Completed,
            ReservationStatus::Cancelled,
            ReservationStatus::NoShow,
        ] {
            let mut r = in_status(&room, status);
            let before = r.clone();
            let err = r.cancel("too late", at_noon()).unwrap_err();
            assert!(matches!(err, AppError::InvalidState(_)));
            assert_eq!(r, before);
        }
    }

    #[test]
    fn confirmation_code_is_deterministic_under_injected_clock_and_rng() {
        let now = at_noon();
        let a = generate_confirmation_code(now, &mut StdRng::seed_from_u64(7));
        let b = generate_confirmation_code(now, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);

        assert!(a.starts_with("HV"));
        let digits = &a[2..];
        assert!(digits.chars().all(|c| c.is_ascii_digit()));
        // millis timestamp (13 digits for 2024) plus the 3-digit suffix
        assert_eq!(digits.len(), 16);
    }
}
