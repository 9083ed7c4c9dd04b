//! User lookup service

use crate::{
    error::AppResult,
    models::user::{User, UserQuery},
    repository::Repository,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
}

impl UsersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<User> {
        self.repository.users.get_by_id(id).await
    }

    /// Search users with filters and pagination.
    ///
    /// Plain role/status filters take the dedicated lookup paths; anything
    /// involving names, date ranges, inactivity or pagination goes through
    /// the dynamic search query.
    pub async fn search_users(&self, query: &UserQuery) -> AppResult<(Vec<User>, i64)> {
        if Self::is_plain_role_status_filter(query) {
            let users = match (query.role, query.status) {
                (Some(role), Some(status)) => {
                    self.repository.users.find_by_role_and_status(role, status).await?
                }
                (Some(role), None) => self.repository.users.find_by_role(role).await?,
                (None, Some(status)) => self.repository.users.find_by_status(status).await?,
                (None, None) => unreachable!(),
            };
            let total = users.len() as i64;
            return Ok((users, total));
        }

        self.repository.users.search(query).await
    }

    /// Users who never logged in, or last logged in before the cutoff
    pub async fn find_inactive_since(&self, since: chrono::DateTime<chrono::Utc>) -> AppResult<Vec<User>> {
        self.repository.users.find_inactive_since(since).await
    }

    fn is_plain_role_status_filter(query: &UserQuery) -> bool {
        (query.role.is_some() || query.status.is_some())
            && query.name.is_none()
            && query.created_from.is_none()
            && query.created_to.is_none()
            && query.inactive_since.is_none()
            && query.page.is_none()
            && query.per_page.is_none()
    }
}
