use axum::{
    Json,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tower_sessions::Session;

use super::{ApiError, AppState};
use crate::services::{AuthenticatedUser, RegisterInput, Role};

const SESSION_USER_KEY: &str = "user";

// ============================================================================
// Request Types
// ============================================================================

/// Registration body. Every field is required on the wire; presence is
/// checked here so the service only ever sees complete input.
#[derive(Deserialize)]
pub struct RegisterPayload {
    pub username: Option<String>,
    pub password: Option<String>,
    pub fname: Option<String>,
    pub lname: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zipcode: Option<String>,
    pub cid: Option<i32>,
}

impl RegisterPayload {
    fn into_input(self) -> Option<RegisterInput> {
        let non_empty = |value: Option<String>| value.filter(|v| !v.is_empty());

        Some(RegisterInput {
            username: non_empty(self.username)?,
            password: non_empty(self.password)?,
            fname: non_empty(self.fname)?,
            lname: non_empty(self.lname)?,
            street: non_empty(self.street)?,
            city: non_empty(self.city)?,
            state: non_empty(self.state)?,
            zipcode: non_empty(self.zipcode)?,
            cid: self.cid.filter(|&cid| cid != 0)?,
        })
    }
}

#[derive(Deserialize)]
pub struct LoginPayload {
    pub username: Option<String>,
    pub password: Option<String>,
}

// ============================================================================
// Middleware
// ============================================================================

/// The authenticated identity for the current request, inserted as a
/// request extension by the role-guard middleware.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: i32,
    pub role: Role,
    pub username: String,
    pub display_name: String,
}

impl From<AuthenticatedUser> for CurrentUser {
    fn from(user: AuthenticatedUser) -> Self {
        Self {
            user_id: user.user_id,
            role: user.role,
            username: user.username,
            display_name: user.display_name,
        }
    }
}

/// Guards the admin subtree. A missing session and a viewer session are
/// rejected identically.
pub async fn require_admin(
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    match session_user(&session).await {
        Some(user) if user.role == Role::Admin => {
            tracing::Span::current().record("user_id", user.user_id);
            request.extensions_mut().insert(CurrentUser::from(user));
            Ok(next.run(request).await)
        }
        _ => Err(ApiError::forbidden("Access denied. Admin role required.")),
    }
}

/// Guards the viewer subtree.
pub async fn require_viewer(
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    match session_user(&session).await {
        Some(user) if user.role == Role::Viewer => {
            tracing::Span::current().record("user_id", user.user_id);
            request.extensions_mut().insert(CurrentUser::from(user));
            Ok(next.run(request).await)
        }
        _ => Err(ApiError::forbidden("Access denied. Viewer role required.")),
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /register
/// Create a viewer account and log it in immediately.
pub async fn register(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<RegisterPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let input = payload
        .into_input()
        .ok_or_else(|| ApiError::bad_request("Missing required fields"))?;

    let user = state.auth_service().register(input).await?;

    tracing::info!("New viewer registered: {}", user.username);

    establish_session(&session, &user).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Registration successful", "user": user })),
    ))
}

/// POST /login
/// Authenticate an admin or viewer and establish a session.
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let non_empty = |value: Option<String>| value.filter(|v| !v.is_empty());
    let (Some(username), Some(password)) =
        (non_empty(payload.username), non_empty(payload.password))
    else {
        return Err(ApiError::bad_request("Username and password are required"));
    };

    let user = state.auth_service().login(&username, &password).await?;

    establish_session(&session, &user).await?;

    Ok(Json(json!({ "message": "Login successful", "user": user })))
}

/// GET /me
/// Report the session identity without touching the database.
pub async fn me(session: Session) -> Response {
    match session_user(&session).await {
        Some(user) => Json(json!({ "logged_in": true, "user": user })).into_response(),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "logged_in": false })),
        )
            .into_response(),
    }
}

/// POST /logout
/// Invalidate the current session.
pub async fn logout(session: Session) -> Json<serde_json::Value> {
    let _ = session.flush().await;
    Json(json!({ "message": "Logout successful" }))
}

// ============================================================================
// Helpers
// ============================================================================

async fn establish_session(session: &Session, user: &AuthenticatedUser) -> Result<(), ApiError> {
    session
        .insert(SESSION_USER_KEY, user)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create session: {e}")))
}

async fn session_user(session: &Session) -> Option<AuthenticatedUser> {
    session
        .get::<AuthenticatedUser>(SESSION_USER_KEY)
        .await
        .ok()
        .flatten()
}
