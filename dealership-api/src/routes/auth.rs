/// Authentication endpoints
///
/// - `POST /djangoapp/login`
/// - `GET|POST /djangoapp/logout`
/// - `POST /djangoapp/register`
///
/// A successful login or registration opens a session and returns its token
/// in a `sessionid` cookie. Response bodies never contain the token.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult, ValidationErrorDetail},
    extract::JsonBody,
    session::{clear_session_cookie, session_cookie, SessionToken},
};
use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use dealership_shared::{
    auth::password,
    models::{
        session::Session,
        user::{CreateUser, User},
    },
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;
use validator::Validate;

/// Status value for an authenticated response
pub const AUTHENTICATED: &str = "Authenticated";

/// Error value for a taken username
pub const USER_EXISTS: &str = "User already exists.";

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(rename = "userName")]
    pub username: String,

    pub password: String,
}

/// Registration request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(rename = "userName")]
    #[validate(length(min = 1, max = 150, message = "Username must be 1-150 characters"))]
    pub username: String,

    #[serde(rename = "firstName")]
    #[validate(length(max = 150, message = "First name must be at most 150 characters"))]
    pub first_name: String,

    #[serde(rename = "lastName")]
    #[validate(length(max = 150, message = "Last name must be at most 150 characters"))]
    pub last_name: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    #[validate(length(max = 254, message = "Email must be at most 254 characters"))]
    pub email: String,
}

/// Body shared by login, logout and registration
///
/// A failed login carries only `userName`; callers detect failure by the
/// absence of `status`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthResponse {
    #[serde(rename = "userName")]
    pub username: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AuthResponse {
    fn authenticated(username: String) -> Self {
        Self {
            username,
            status: Some(AUTHENTICATED.to_string()),
            error: None,
        }
    }

    fn anonymous(username: String) -> Self {
        Self {
            username,
            status: None,
            error: None,
        }
    }

    fn already_exists(username: String) -> Self {
        Self {
            username,
            status: None,
            error: Some(USER_EXISTS.to_string()),
        }
    }
}

/// Login endpoint
///
/// ```text
/// POST /djangoapp/login
/// { "userName": "jdoe", "password": "..." }
/// ```
///
/// Success: `{"userName": "jdoe", "status": "Authenticated"}` plus a session
/// cookie. Bad credentials: `{"userName": "jdoe"}`.
pub async fn login(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> ApiResult<Response> {
    let Some(user) = User::find_by_username(&state.db, &req.username).await? else {
        let password = req.password;
        tokio::task::spawn_blocking(move || password::verify_unknown_account(&password)).await?;

        info!(username = %req.username, "Login failed: unknown user");
        return Ok(Json(AuthResponse::anonymous(req.username)).into_response());
    };

    let hash = user.password_hash.clone();
    let password = req.password;
    let valid =
        tokio::task::spawn_blocking(move || password::verify_password(&password, &hash)).await??;

    if !valid {
        info!(username = %req.username, "Login failed: wrong password");
        return Ok(Json(AuthResponse::anonymous(req.username)).into_response());
    }

    start_session(&state, user.id, req.username).await
}

/// Logout endpoint
///
/// Always answers `{"userName": ""}` and clears the cookie, whether or not a
/// session was open.
pub async fn logout(State(state): State<AppState>, SessionToken(token): SessionToken) -> Response {
    if let Some(token) = token {
        match Session::delete_by_token(&state.db, &token).await {
            Ok(true) => debug!("Session closed"),
            Ok(false) => debug!("Logout with unknown or expired session"),
            Err(e) => warn!(error = %e, "Failed to delete session on logout"),
        }
    }

    (
        [(header::SET_COOKIE, clear_session_cookie())],
        Json(AuthResponse::anonymous(String::new())),
    )
        .into_response()
}

/// Registration endpoint
///
/// ```text
/// POST /djangoapp/register
/// { "userName": "jdoe", "firstName": "Jane", "lastName": "Doe",
///   "password": "...", "email": "jdoe@example.com" }
/// ```
///
/// A taken username answers `{"userName": "jdoe", "error": "User already exists."}`.
/// Two concurrent registrations of the same name are settled by the unique
/// constraint, and the loser gets the same answer.
pub async fn register(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> ApiResult<Response> {
    req.validate().map_err(|e| {
        let errors: Vec<ValidationErrorDetail> = e
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| ValidationErrorDetail {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "Validation failed".to_string()),
                })
            })
            .collect();
        ApiError::ValidationError(errors)
    })?;

    if User::username_exists(&state.db, &req.username).await? {
        debug!(username = %req.username, "Registration for existing username");
        return Ok(Json(AuthResponse::already_exists(req.username)).into_response());
    }
    debug!(username = %req.username, "Registering new user");

    let password = req.password;
    let password_hash =
        tokio::task::spawn_blocking(move || password::hash_password(&password)).await??;

    let created = User::create(
        &state.db,
        CreateUser {
            username: req.username.clone(),
            password_hash,
            email: req.email,
            first_name: req.first_name,
            last_name: req.last_name,
        },
    )
    .await;

    let user = match created {
        Ok(user) => user,
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            debug!(username = %req.username, "Lost registration race for username");
            return Ok(Json(AuthResponse::already_exists(req.username)).into_response());
        }
        Err(e) => return Err(e.into()),
    };

    info!(user_id = %user.id, username = %user.username, "User registered");
    start_session(&state, user.id, user.username).await
}

async fn start_session(state: &AppState, user_id: Uuid, username: String) -> ApiResult<Response> {
    let ttl = state.config.session_ttl();
    let (session, token) = Session::create(&state.db, user_id, ttl).await?;
    User::update_last_login(&state.db, user_id).await?;

    info!(user_id = %user_id, session_id = %session.id, "Session started");

    let cookie = session_cookie(&token, ttl, state.config.api.production)?;

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(AuthResponse::authenticated(username)),
    )
        .into_response())
}
