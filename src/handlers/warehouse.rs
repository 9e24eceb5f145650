//! Warehouse handlers

use axum::Extension;

use crate::auth::roles;
use crate::dto::warehouse::{WarehouseCreateRequest, WarehouseResponse, WarehouseUpdateRequest};
use crate::dto::{ActionResponse, Page};
use crate::error::AppResult;
use crate::extract::{Json, Path, Query};
use crate::middleware::{CurrentUser, DbConn};
use crate::repository::PageParams;
use crate::service::warehouse as warehouse_service;

/// POST /api/warehouses
pub async fn create_warehouse(
    Extension(db): Extension<DbConn>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<WarehouseCreateRequest>,
) -> AppResult<Json<WarehouseResponse>> {
    user.require_any(roles::COMMAND)?;
    Ok(Json(warehouse_service::create(&db, req).await?))
}

/// GET /api/warehouses
pub async fn list_warehouses(
    Extension(db): Extension<DbConn>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<Page<WarehouseResponse>>> {
    Ok(Json(warehouse_service::list_active(&db, &params).await?))
}

/// GET /api/warehouses/:id
pub async fn get_warehouse(
    Extension(db): Extension<DbConn>,
    Path(id): Path<i32>,
) -> AppResult<Json<WarehouseResponse>> {
    Ok(Json(warehouse_service::get(&db, id).await?))
}

/// GET /api/warehouses/city/:city
pub async fn warehouses_by_city(
    Extension(db): Extension<DbConn>,
    Path(city): Path<String>,
) -> AppResult<Json<Vec<WarehouseResponse>>> {
    Ok(Json(warehouse_service::list_by_city(&db, &city).await?))
}

/// PUT /api/warehouses/:id
pub async fn update_warehouse(
    Extension(db): Extension<DbConn>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
    Json(req): Json<WarehouseUpdateRequest>,
) -> AppResult<Json<WarehouseResponse>> {
    user.require_any(roles::COMMAND)?;
    Ok(Json(warehouse_service::update(&db, id, req).await?))
}

/// DELETE /api/warehouses/:id
pub async fn delete_warehouse(
    Extension(db): Extension<DbConn>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> AppResult<Json<ActionResponse>> {
    user.require_any(roles::COMMAND)?;
    warehouse_service::deactivate(&db, id).await?;
    Ok(Json(ActionResponse::new("Warehouse deactivated successfully")))
}
