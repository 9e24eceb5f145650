//! Authentication handlers
//!
//! Login and registration are public; `/auth/me` needs a bearer token.

use axum::{extract::State, Extension};

use crate::dto::auth::{AuthResponse, LoginRequest, ProfileResponse, RegisterRequest};
use crate::error::AppResult;
use crate::extract::Json;
use crate::middleware::{CurrentUser, DbConn};
use crate::service::auth as auth_service;
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Extension(db): Extension<DbConn>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let response = auth_service::login(&db, req, &state.config.auth).await?;
    Ok(Json(response))
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Extension(db): Extension<DbConn>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<Json<AuthResponse>> {
    let response = auth_service::register(&db, req, &state.config.auth).await?;
    Ok(Json(response))
}

/// GET /api/auth/me
pub async fn me(
    Extension(db): Extension<DbConn>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<ProfileResponse>> {
    Ok(Json(auth_service::me(&db, &user).await?))
}
