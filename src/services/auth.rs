//! Authentication service (demo-grade)
//!
//! Credential checking is plaintext equality behind the
//! [`CredentialVerifier`] trait; swapping in a hashing implementation does
//! not touch the reservation/room logic. Tokens are opaque strings with no
//! signature and nothing ever validates them.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::user::{RegisterRequest, Role},
    repository::Repository,
};

/// Checks a submitted password against a stored credential
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, submitted: &str, stored: &str) -> bool;
}

/// Demo verifier: plaintext equality against the stored column
pub struct DemoCredentials;

impl CredentialVerifier for DemoCredentials {
    fn verify(&self, submitted: &str, stored: &str) -> bool {
        submitted == stored
    }
}

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub user_id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

/// Fixed demo credential pairs accepted when no persisted user matches
fn demo_session(identifier: &str, password: &str, now: DateTime<Utc>) -> Option<AuthSession> {
    if identifier == "admin" && password == "admin123" {
        return Some(AuthSession {
            token: format!("mock-admin-token-{}", now.timestamp_millis()),
            user_id: 1,
            username: "admin".to_string(),
            first_name: "Admin".to_string(),
            last_name: "User".to_string(),
            role: Role::Admin,
        });
    }
    if identifier == "client" && password == "client123" {
        return Some(AuthSession {
            token: format!("mock-client-token-{}", now.timestamp_millis()),
            user_id: 2,
            username: "client".to_string(),
            first_name: "Client".to_string(),
            last_name: "User".to_string(),
            role: Role::Client,
        });
    }
    None
}

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    verifier: Arc<dyn CredentialVerifier>,
}

impl AuthService {
    pub fn new(repository: Repository, verifier: Arc<dyn CredentialVerifier>) -> Self {
        Self {
            repository,
            verifier,
        }
    }

    /// Authenticate by username or email.
    ///
    /// Persisted users are checked first; the fixed demo pairs act as a
    /// fallback. Successful database logins stamp `last_login`.
    pub async fn authenticate(
        &self,
        identifier: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> AppResult<AuthSession> {
        let user = match self.repository.users.get_by_username(identifier).await? {
            Some(user) => Some(user),
            None => self.repository.users.get_by_email(identifier).await?,
        };

        if let Some(user) = user {
            if self.verifier.verify(password, &user.password) {
                self.repository.users.record_login(user.id, now).await?;
                return Ok(AuthSession {
                    token: format!("db-token-{}", now.timestamp_millis()),
                    user_id: user.id,
                    username: user.username,
                    first_name: user.first_name,
                    last_name: user.last_name,
                    role: user.role,
                });
            }
        }

        demo_session(identifier, password, now)
            .ok_or_else(|| AppError::Authentication("Invalid credentials".to_string()))
    }

    /// Demo registration: uniqueness is checked, nothing is persisted
    pub async fn register(&self, request: &RegisterRequest) -> AppResult<()> {
        if self.repository.users.username_exists(&request.username).await? {
            return Err(AppError::Validation("Username already exists".to_string()));
        }
        if self.repository.users.email_exists(&request.email).await? {
            return Err(AppError::Validation("Email already exists".to_string()));
        }

        tracing::info!("Demo registration for: {}", request.email);
        Ok(())
    }

    /// Demo logout: nothing is invalidated
    pub fn logout(&self, token: &str) {
        tracing::info!("Demo logout for token: {}", token);
    }

    /// Demo token refresh
    pub fn refresh(&self, now: DateTime<Utc>) -> AuthSession {
        AuthSession {
            token: format!("mock-refreshed-token-{}", now.timestamp_millis()),
            user_id: 1,
            username: "user".to_string(),
            first_name: "User".to_string(),
            last_name: "Name".to_string(),
            role: Role::Client,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at_noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn plaintext_verifier_compares_equality() {
        let verifier = DemoCredentials;
        assert!(verifier.verify("admin123", "admin123"));
        assert!(!verifier.verify("admin123", "hunter2"));
    }

    #[test]
    fn hardcoded_pairs_are_accepted() {
        let admin = demo_session("admin", "admin123", at_noon()).unwrap();
        assert_eq!(admin.role, Role::Admin);
        assert!(admin.token.starts_with("mock-admin-token-"));

        let client = demo_session("client", "client123", at_noon()).unwrap();
        assert_eq!(client.role, Role::Client);

        assert!(demo_session("admin", "wrong", at_noon()).is_none());
        assert!(demo_session("stranger", "admin123", at_noon()).is_none());
    }
}
