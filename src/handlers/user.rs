//! User handlers

use axum::{extract::State, Extension};

use crate::auth::roles;
use crate::dto::user::{CodeNameQuery, UserCreateRequest, UserResponse, UserUpdateRequest};
use crate::dto::{ActionResponse, Page};
use crate::entity::Role;
use crate::error::{AppError, AppResult};
use crate::extract::{Json, Path, Query};
use crate::middleware::{CurrentUser, DbConn};
use crate::repository::PageParams;
use crate::service::user as user_service;
use crate::state::AppState;

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    Extension(db): Extension<DbConn>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<UserCreateRequest>,
) -> AppResult<Json<UserResponse>> {
    user.require_any(roles::COMMAND)?;
    let created = user_service::create(&db, req, state.config.auth.bcrypt_cost).await?;
    Ok(Json(created))
}

/// GET /api/users
pub async fn list_users(
    Extension(db): Extension<DbConn>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<Page<UserResponse>>> {
    user.require_any(roles::COMMAND)?;
    Ok(Json(user_service::list_active(&db, &params).await?))
}

/// GET /api/users/:id
pub async fn get_user(
    Extension(db): Extension<DbConn>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> AppResult<Json<UserResponse>> {
    user.require_any(roles::COMMAND)?;
    Ok(Json(user_service::get(&db, id).await?))
}

/// GET /api/users/role/:role
pub async fn users_by_role(
    Extension(db): Extension<DbConn>,
    Extension(user): Extension<CurrentUser>,
    Path(role): Path<String>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<Page<UserResponse>>> {
    user.require_any(roles::COMMAND)?;
    let role: Role = role.parse().map_err(AppError::BadRequest)?;
    Ok(Json(user_service::list_by_role(&db, role, &params).await?))
}

/// GET /api/users/territory/:territory
pub async fn users_by_territory(
    Extension(db): Extension<DbConn>,
    Extension(user): Extension<CurrentUser>,
    Path(territory): Path<String>,
) -> AppResult<Json<Vec<UserResponse>>> {
    user.require_any(roles::TERRITORY)?;
    Ok(Json(user_service::list_by_territory(&db, &territory).await?))
}

/// GET /api/users/search?codeName=
pub async fn search_users(
    Extension(db): Extension<DbConn>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<CodeNameQuery>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<Page<UserResponse>>> {
    user.require_any(roles::COMMAND)?;
    let page = user_service::search_by_code_name(&db, &query.code_name, &params).await?;
    Ok(Json(page))
}

/// PUT /api/users/:id
pub async fn update_user(
    Extension(db): Extension<DbConn>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
    Json(req): Json<UserUpdateRequest>,
) -> AppResult<Json<UserResponse>> {
    user.require_any(roles::COMMAND)?;
    Ok(Json(user_service::update(&db, id, req).await?))
}

/// DELETE /api/users/:id
pub async fn delete_user(
    Extension(db): Extension<DbConn>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> AppResult<Json<ActionResponse>> {
    user.require_any(roles::ADMIN_ONLY)?;
    user_service::deactivate(&db, id).await?;
    Ok(Json(ActionResponse::new("User deactivated successfully")))
}
