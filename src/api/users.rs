//! User lookup endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::AppResult,
    models::user::{User, UserQuery},
};

use super::rooms::PaginatedResponse;

/// Inactivity cutoff query
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct InactiveQuery {
    /// Cutoff instant (RFC 3339)
    pub since: DateTime<Utc>,
}

/// List users with search filters and pagination
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    params(
        ("name" = Option<String>, Query, description = "Substring match over first/last name"),
        ("role" = Option<String>, Query, description = "Filter by role"),
        ("status" = Option<String>, Query, description = "Filter by status"),
        ("created_from" = Option<String>, Query, description = "Creation-date range start (RFC 3339)"),
        ("created_to" = Option<String>, Query, description = "Creation-date range end (RFC 3339)"),
        ("inactive_since" = Option<String>, Query, description = "Only users without a login since this cutoff (RFC 3339)"),
        ("page" = Option<i64>, Query, description = "Page number"),
        ("per_page" = Option<i64>, Query, description = "Items per page")
    ),
    responses(
        (status = 200, description = "List of users", body = PaginatedResponse<User>)
    )
)]
pub async fn list_users(
    State(state): State<crate::AppState>,
    Query(query): Query<UserQuery>,
) -> AppResult<Json<PaginatedResponse<User>>> {
    let (users, total) = state.services.users.search_users(&query).await?;

    Ok(Json(PaginatedResponse {
        items: users,
        total,
        page: query.page.unwrap_or(1),
        per_page: query.per_page.unwrap_or(20),
    }))
}

/// List users who never logged in, or not since a cutoff
#[utoipa::path(
    get,
    path = "/users/inactive",
    tag = "users",
    params(
        ("since" = String, Query, description = "Cutoff instant (RFC 3339)")
    ),
    responses(
        (status = 200, description = "Inactive users", body = Vec<User>)
    )
)]
pub async fn list_inactive_users(
    State(state): State<crate::AppState>,
    Query(query): Query<InactiveQuery>,
) -> AppResult<Json<Vec<User>>> {
    let users = state.services.users.find_inactive_since(query.since).await?;
    Ok(Json(users))
}

/// Get user details by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User details", body = User),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<User>> {
    let user = state.services.users.get_by_id(id).await?;
    Ok(Json(user))
}
