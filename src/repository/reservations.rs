//! Reservations repository for database operations

use sqlx::{Pool, Postgres, Row};

use crate::{
    error::{AppError, AppResult},
    models::reservation::{Reservation, ReservationDetails, ReservationQuery},
};

#[derive(Clone)]
pub struct ReservationsRepository {
    pool: Pool<Postgres>,
}

impl ReservationsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get reservation by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Reservation> {
        sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Reservation with id {} not found", id)))
    }

    /// Get reservation by confirmation code
    pub async fn get_by_confirmation_code(&self, code: &str) -> AppResult<Reservation> {
        sqlx::query_as::<_, Reservation>(
            "SELECT * FROM reservations WHERE confirmation_code = $1",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Reservation with code {} not found", code))
        })
    }

    /// List reservations with optional filters and pagination
    pub async fn search(
        &self,
        query: &ReservationQuery,
    ) -> AppResult<(Vec<ReservationDetails>, i64)> {
        let page = query.page.unwrap_or(1);
        let per_page = query.per_page.unwrap_or(20);
        let offset = (page - 1) * per_page;

        let mut conditions = Vec::new();
        let mut params: Vec<String> = Vec::new();

        if let Some(status) = query.status {
            params.push(status.as_str().to_string());
            conditions.push(format!("r.status = ${}", params.len()));
        }

        if let Some(user_id) = query.user_id {
            params.push(user_id.to_string());
            conditions.push(format!("r.user_id = ${}::bigint", params.len()));
        }

        if let Some(room_id) = query.room_id {
            params.push(room_id.to_string());
            conditions.push(format!("r.room_id = ${}::bigint", params.len()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let count_query = format!("SELECT COUNT(*) FROM reservations r {}", where_clause);
        let mut count_builder = sqlx::query_scalar::<_, i64>(&count_query);
        for param in &params {
            count_builder = count_builder.bind(param);
        }
        let total = count_builder.fetch_one(&self.pool).await?;

        let select_query = format!(
            r#"
            SELECT r.id, r.confirmation_code, r.check_in_date, r.check_out_date,
                   r.guest_count, r.total_amount, r.status, r.special_requests, r.created_at,
                   u.first_name, u.last_name, rm.room_number
            FROM reservations r
            JOIN users u ON r.user_id = u.id
            JOIN rooms rm ON r.room_id = rm.id
            {}
            ORDER BY r.created_at DESC
            LIMIT {} OFFSET {}
            "#,
            where_clause, per_page, offset
        );
        let mut select_builder = sqlx::query(&select_query);
        for param in &params {
            select_builder = select_builder.bind(param);
        }
        let rows = select_builder.fetch_all(&self.pool).await?;

        let reservations = rows.into_iter().map(Self::details_from_row).collect();

        Ok((reservations, total))
    }

    /// Get reservations for a user
    pub async fn get_user_reservations(&self, user_id: i64) -> AppResult<Vec<ReservationDetails>> {
        let rows = sqlx::query(
            r#"
            SELECT r.id, r.confirmation_code, r.check_in_date, r.check_out_date,
                   r.guest_count, r.total_amount, r.status, r.special_requests, r.created_at,
                   u.first_name, u.last_name, rm.room_number
            FROM reservations r
            JOIN users u ON r.user_id = u.id
            JOIN rooms rm ON r.room_id = rm.id
            WHERE r.user_id = $1
            ORDER BY r.check_in_date
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Self::details_from_row).collect())
    }

    fn details_from_row(row: sqlx::postgres::PgRow) -> ReservationDetails {
        let first_name: String = row.get("first_name");
        let last_name: String = row.get("last_name");

        ReservationDetails {
            id: row.get("id"),
            confirmation_code: row.get("confirmation_code"),
            check_in_date: row.get("check_in_date"),
            check_out_date: row.get("check_out_date"),
            guest_count: row.get("guest_count"),
            total_amount: row.get("total_amount"),
            status: row.get("status"),
            guest_name: format!("{} {}", first_name, last_name),
            room_number: row.get("room_number"),
            special_requests: row.get("special_requests"),
            created_at: row.get("created_at"),
        }
    }

    /// Create a new reservation. The confirmation code must already be set;
    /// a duplicate surfaces as a Conflict through the uniqueness constraint.
    pub async fn create(&self, reservation: &Reservation) -> AppResult<Reservation> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO reservations (
                user_id, room_id, check_in_date, check_out_date, guest_count,
                total_amount, status, special_requests, confirmation_code,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id
            "#,
        )
        .bind(reservation.user_id)
        .bind(reservation.room_id)
        .bind(reservation.check_in_date)
        .bind(reservation.check_out_date)
        .bind(reservation.guest_count)
        .bind(reservation.total_amount)
        .bind(reservation.status)
        .bind(&reservation.special_requests)
        .bind(&reservation.confirmation_code)
        .bind(reservation.created_at)
        .bind(reservation.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict("Confirmation code already in use".to_string())
            }
            _ => AppError::from(e),
        })?;

        self.get_by_id(id).await
    }

    /// Persist the mutable lifecycle fields after a status transition
    pub async fn save_transition(&self, reservation: &Reservation) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE reservations
            SET status = $1, checked_in_at = $2, checked_out_at = $3,
                cancelled_at = $4, cancellation_reason = $5, updated_at = $6
            WHERE id = $7
            "#,
        )
        .bind(reservation.status)
        .bind(reservation.checked_in_at)
        .bind(reservation.checked_out_at)
        .bind(reservation.cancelled_at)
        .bind(&reservation.cancellation_reason)
        .bind(reservation.updated_at)
        .bind(reservation.id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Count reservations currently in CHECKED_IN status
    pub async fn count_checked_in(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM reservations WHERE status = 'CHECKED_IN'",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
