//! Operation handlers

use axum::Extension;

use crate::auth::roles;
use crate::dto::operation::{
    DateRangeQuery, OperationCreateRequest, OperationResponse, OperationUpdateRequest, SearchQuery,
};
use crate::dto::{ActionResponse, Page};
use crate::entity::OperationStatus;
use crate::error::AppResult;
use crate::extract::{Json, Path, Query};
use crate::middleware::{CurrentUser, DbConn};
use crate::repository::PageParams;
use crate::service::operation as operation_service;

/// POST /api/operations
pub async fn create_operation(
    Extension(db): Extension<DbConn>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<OperationCreateRequest>,
) -> AppResult<Json<OperationResponse>> {
    user.require_any(roles::FIELD)?;
    Ok(Json(operation_service::create(&db, req).await?))
}

/// GET /api/operations
pub async fn list_operations(
    Extension(db): Extension<DbConn>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<Page<OperationResponse>>> {
    Ok(Json(operation_service::list(&db, &params).await?))
}

/// GET /api/operations/:id
pub async fn get_operation(
    Extension(db): Extension<DbConn>,
    Path(id): Path<i32>,
) -> AppResult<Json<OperationResponse>> {
    Ok(Json(operation_service::get(&db, id).await?))
}

/// GET /api/operations/leader/:leaderId
pub async fn operations_by_leader(
    Extension(db): Extension<DbConn>,
    Path(leader_id): Path<i32>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<Page<OperationResponse>>> {
    Ok(Json(operation_service::list_by_leader(&db, leader_id, &params).await?))
}

/// GET /api/operations/status/:status
pub async fn operations_by_status(
    Extension(db): Extension<DbConn>,
    Path(status): Path<OperationStatus>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<Page<OperationResponse>>> {
    Ok(Json(operation_service::list_by_status(&db, status, &params).await?))
}

/// GET /api/operations/participant/:userId
pub async fn operations_by_participant(
    Extension(db): Extension<DbConn>,
    Path(user_id): Path<i32>,
) -> AppResult<Json<Vec<OperationResponse>>> {
    Ok(Json(operation_service::list_by_participant(&db, user_id).await?))
}

/// GET /api/operations/date-range?startDate=&endDate=
pub async fn operations_by_date_range(
    Extension(db): Extension<DbConn>,
    Query(range): Query<DateRangeQuery>,
) -> AppResult<Json<Vec<OperationResponse>>> {
    let found = operation_service::list_by_date_range(&db, range.start_date, range.end_date).await?;
    Ok(Json(found))
}

/// GET /api/operations/location/:location
pub async fn operations_by_location(
    Extension(db): Extension<DbConn>,
    Path(location): Path<String>,
) -> AppResult<Json<Vec<OperationResponse>>> {
    Ok(Json(operation_service::list_active_by_location(&db, &location).await?))
}

/// GET /api/operations/high-risk/:minRisk
pub async fn high_risk_operations(
    Extension(db): Extension<DbConn>,
    Extension(user): Extension<CurrentUser>,
    Path(min_risk): Path<i32>,
) -> AppResult<Json<Vec<OperationResponse>>> {
    user.require_any(roles::COMMAND)?;
    Ok(Json(operation_service::list_high_risk(&db, min_risk).await?))
}

/// GET /api/operations/search?searchTerm=
pub async fn search_operations(
    Extension(db): Extension<DbConn>,
    Query(query): Query<SearchQuery>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<Page<OperationResponse>>> {
    Ok(Json(operation_service::search(&db, &query.search_term, &params).await?))
}

/// PUT /api/operations/:id
pub async fn update_operation(
    Extension(db): Extension<DbConn>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
    Json(req): Json<OperationUpdateRequest>,
) -> AppResult<Json<OperationResponse>> {
    user.require_any(roles::FIELD)?;
    Ok(Json(operation_service::update(&db, id, req, &user).await?))
}

/// DELETE /api/operations/:id
pub async fn delete_operation(
    Extension(db): Extension<DbConn>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> AppResult<Json<ActionResponse>> {
    user.require_any(roles::COMMAND)?;
    operation_service::cancel(&db, id).await?;
    Ok(Json(ActionResponse::new("Operation cancelled successfully")))
}
