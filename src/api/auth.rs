//! Authentication endpoints (demo-grade)
//!
//! Login always answers 200: failures are reported through the `success`
//! flag rather than an error status, and internal failures collapse into a
//! generic message.

use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::user::{RegisterRequest, Role},
    services::auth::AuthSession,
};

/// Login request
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Username or email address
    pub email: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl LoginResponse {
    fn from_session(session: AuthSession) -> Self {
        Self {
            success: true,
            token: Some(session.token),
            user_id: Some(session.user_id),
            username: Some(session.username),
            first_name: Some(session.first_name),
            last_name: Some(session.last_name),
            role: Some(session.role),
            message: None,
        }
    }

    fn failure(message: &str) -> Self {
        Self {
            success: false,
            token: None,
            user_id: None,
            username: None,
            first_name: None,
            last_name: None,
            role: None,
            message: Some(message.to_string()),
        }
    }
}

/// Simple message response
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Authenticate and return a demo token
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login outcome, success flag included", body = LoginResponse)
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    Json(request): Json<LoginRequest>,
) -> Json<LoginResponse> {
    let result = state
        .services
        .auth
        .authenticate(&request.email, &request.password, Utc::now())
        .await;

    let response = match result {
        Ok(session) => LoginResponse::from_session(session),
        Err(AppError::Authentication(message)) => LoginResponse::failure(&message),
        Err(e) => {
            tracing::error!("Login failed: {}", e);
            LoginResponse::failure("Authentication failed")
        }
    };

    Json(response)
}

/// Register a new user account (demo: acknowledged, not persisted)
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Registration acknowledged", body = MessageResponse),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn register(
    State(state): State<crate::AppState>,
    Json(request): Json<RegisterRequest>,
) -> AppResult<Json<MessageResponse>> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    state.services.auth.register(&request).await?;

    Ok(Json(MessageResponse {
        message: "User registered successfully".to_string(),
    }))
}

/// Logout (demo: nothing is invalidated)
#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Logged out", body = MessageResponse),
        (status = 400, description = "Missing authorization header")
    )
)]
pub async fn logout(
    State(state): State<crate::AppState>,
    headers: HeaderMap,
) -> AppResult<Json<MessageResponse>> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::BadRequest("Missing authorization header".to_string()))?;

    state.services.auth.logout(token);

    Ok(Json(MessageResponse {
        message: "Logged out successfully".to_string(),
    }))
}

/// Refresh a token (demo: returns a fresh mock token)
#[utoipa::path(
    post,
    path = "/auth/refresh",
    tag = "auth",
    responses(
        (status = 200, description = "Refreshed token", body = LoginResponse)
    )
)]
pub async fn refresh(State(state): State<crate::AppState>) -> Json<LoginResponse> {
    let session = state.services.auth.refresh(Utc::now());
    Json(LoginResponse::from_session(session))
}
