//! Rooms repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::room::{Room, RoomQuery, UpdateRoom},
};

#[derive(Clone)]
pub struct RoomsRepository {
    pool: Pool<Postgres>,
}

impl RoomsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get room by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Room> {
        sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Room with id {} not found", id)))
    }

    /// Get room by its unique number
    pub async fn get_by_number(&self, number: &str) -> AppResult<Option<Room>> {
        let room = sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE room_number = $1")
            .bind(number)
            .fetch_optional(&self.pool)
            .await?;

        Ok(room)
    }

    /// Check if a room number is already in use
    pub async fn number_exists(&self, number: &str) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM rooms WHERE room_number = $1)")
                .bind(number)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    /// List rooms with optional status/type filters and pagination
    pub async fn search(&self, query: &RoomQuery) -> AppResult<(Vec<Room>, i64)> {
        let page = query.page.unwrap_or(1);
        let per_page = query.per_page.unwrap_or(20);
        let offset = (page - 1) * per_page;

        let mut conditions = Vec::new();
        let mut params: Vec<String> = Vec::new();

        if let Some(status) = query.status {
            params.push(status.as_str().to_string());
            conditions.push(format!("status = ${}", params.len()));
        }

        if let Some(room_type) = query.room_type {
            params.push(room_type.as_str().to_string());
            conditions.push(format!("room_type = ${}", params.len()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let count_query = format!("SELECT COUNT(*) FROM rooms {}", where_clause);
        let mut count_builder = sqlx::query_scalar::<_, i64>(&count_query);
        for param in &params {
            count_builder = count_builder.bind(param);
        }
        let total = count_builder.fetch_one(&self.pool).await?;

        let select_query = format!(
            "SELECT * FROM rooms {} ORDER BY room_number LIMIT {} OFFSET {}",
            where_clause, per_page, offset
        );
        let mut select_builder = sqlx::query_as::<_, Room>(&select_query);
        for param in &params {
            select_builder = select_builder.bind(param);
        }
        let rooms = select_builder.fetch_all(&self.pool).await?;

        Ok((rooms, total))
    }

    /// Create a new room
    pub async fn create(&self, room: &Room) -> AppResult<Room> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO rooms (
                room_number, room_type, price, status, description,
                max_occupancy, bed_count, bed_type,
                has_balcony, has_sea_view, has_wifi, has_air_conditioning,
                has_minibar, has_safe, floor_number, amenities,
                created_at, updated_at
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12,
                $13, $14, $15, $16, $17, $18
            ) RETURNING id
            "#,
        )
        .bind(&room.number)
        .bind(room.room_type)
        .bind(room.price)
        .bind(room.status)
        .bind(&room.description)
        .bind(room.max_occupancy)
        .bind(room.bed_count)
        .bind(&room.bed_type)
        .bind(room.has_balcony)
        .bind(room.has_sea_view)
        .bind(room.has_wifi)
        .bind(room.has_air_conditioning)
        .bind(room.has_minibar)
        .bind(room.has_safe)
        .bind(room.floor_number)
        .bind(&room.amenities)
        .bind(room.created_at)
        .bind(room.updated_at)
        .fetch_one(&self.pool)
        .await?;

        self.get_by_id(id).await
    }

    /// Update an existing room
    pub async fn update(&self, id: i64, room: &UpdateRoom) -> AppResult<Room> {
        let now = chrono::Utc::now();

        // Build dynamic update query
        let mut sets = vec!["updated_at = $1".to_string()];
        let mut param_idx = 2;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, param_idx));
                    param_idx += 1;
                }
            };
        }

        add_field!(room.price, "price");
        add_field!(room.description, "description");
        add_field!(room.max_occupancy, "max_occupancy");
        add_field!(room.bed_count, "bed_count");
        add_field!(room.bed_type, "bed_type");
        add_field!(room.has_balcony, "has_balcony");
        add_field!(room.has_sea_view, "has_sea_view");
        add_field!(room.has_wifi, "has_wifi");
        add_field!(room.has_air_conditioning, "has_air_conditioning");
        add_field!(room.has_minibar, "has_minibar");
        add_field!(room.has_safe, "has_safe");
        add_field!(room.floor_number, "floor_number");
        add_field!(room.amenities, "amenities");

        let query = format!("UPDATE rooms SET {} WHERE id = {}", sets.join(", "), id);

        let mut builder = sqlx::query(&query).bind(now);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(room.price);
        bind_field!(room.description);
        bind_field!(room.max_occupancy);
        bind_field!(room.bed_count);
        bind_field!(room.bed_type);
        bind_field!(room.has_balcony);
        bind_field!(room.has_sea_view);
        bind_field!(room.has_wifi);
        bind_field!(room.has_air_conditioning);
        bind_field!(room.has_minibar);
        bind_field!(room.has_safe);
        bind_field!(room.floor_number);
        bind_field!(room.amenities);

        builder.execute(&self.pool).await?;

        self.get_by_id(id).await
    }

    /// Persist a room's status after a lifecycle transition
    pub async fn save_status(&self, room: &Room) -> AppResult<()> {
        sqlx::query("UPDATE rooms SET status = $1, updated_at = $2 WHERE id = $3")
            .bind(room.status)
            .bind(room.updated_at)
            .bind(room.id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
