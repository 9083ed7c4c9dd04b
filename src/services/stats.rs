//! Statistics service

use rust_decimal::Decimal;
use sqlx::Row;

use crate::{
    api::stats::{ReservationStats, RoomStats, StatEntry, StatsResponse, UserStats},
    error::AppResult,
    models::user::{Role, UserStatus},
    repository::Repository,
};

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Get hotel statistics: room/reservation/user counts, occupancy rate
    /// and revenue over non-cancelled reservations.
    pub async fn get_stats(&self) -> AppResult<StatsResponse> {
        let pool = &self.repository.pool;

        let total_rooms: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM rooms")
            .fetch_one(pool)
            .await?;

        let rooms_by_status = {
            let rows = sqlx::query("SELECT status, COUNT(*) as count FROM rooms GROUP BY status ORDER BY status")
                .fetch_all(pool)
                .await?;
            rows.into_iter()
                .map(|row| StatEntry {
                    label: row.get("status"),
                    count: row.get("count"),
                })
                .collect()
        };

        let occupied_rooms: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM rooms WHERE status = 'OCCUPIED'")
                .fetch_one(pool)
                .await?;

        let occupancy_rate = if total_rooms > 0 {
            occupied_rooms as f64 / total_rooms as f64
        } else {
            0.0
        };

        let total_reservations: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reservations")
            .fetch_one(pool)
            .await?;

        let reservations_by_status = {
            let rows = sqlx::query(
                "SELECT status, COUNT(*) as count FROM reservations GROUP BY status ORDER BY status",
            )
            .fetch_all(pool)
            .await?;
            rows.into_iter()
                .map(|row| StatEntry {
                    label: row.get("status"),
                    count: row.get("count"),
                })
                .collect()
        };

        let total_revenue: Decimal = sqlx::query_scalar(
            "SELECT COALESCE(SUM(total_amount), 0) FROM reservations WHERE status != 'CANCELLED'",
        )
        .fetch_one(pool)
        .await?;

        let total_users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await?;

        let mut users_by_role = Vec::new();
        for role in [Role::Admin, Role::Staff, Role::Client] {
            users_by_role.push(StatEntry {
                label: role.as_str().to_string(),
                count: self.repository.users.count_by_role(role).await?,
            });
        }

        let mut users_by_status = Vec::new();
        for status in [UserStatus::Active, UserStatus::Inactive, UserStatus::Suspended] {
            users_by_status.push(StatEntry {
                label: status.as_str().to_string(),
                count: self.repository.users.count_by_status(status).await?,
            });
        }

        Ok(StatsResponse {
            rooms: RoomStats {
                total: total_rooms,
                occupied: occupied_rooms,
                occupancy_rate,
                by_status: rooms_by_status,
            },
            reservations: ReservationStats {
                total: total_reservations,
                checked_in: self.repository.reservations.count_checked_in().await?,
                total_revenue,
                by_status: reservations_by_status,
            },
            users: UserStats {
                total: total_users,
                by_role: users_by_role,
                by_status: users_by_status,
            },
        })
    }
}
