//! Inventory handlers

use axum::Extension;

use crate::auth::roles;
use crate::dto::inventory::{InventoryCreateRequest, InventoryResponse, InventoryUpdateRequest};
use crate::dto::Page;
use crate::error::AppResult;
use crate::extract::{Json, Path, Query};
use crate::middleware::{CurrentUser, DbConn};
use crate::repository::PageParams;
use crate::service::inventory as inventory_service;

/// POST /api/inventory
pub async fn create_inventory(
    Extension(db): Extension<DbConn>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<InventoryCreateRequest>,
) -> AppResult<Json<InventoryResponse>> {
    user.require_any(roles::FIELD)?;
    Ok(Json(inventory_service::create(&db, req).await?))
}

/// GET /api/inventory
pub async fn list_inventory(
    Extension(db): Extension<DbConn>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<Page<InventoryResponse>>> {
    Ok(Json(inventory_service::list(&db, &params).await?))
}

/// GET /api/inventory/:id
pub async fn get_inventory(
    Extension(db): Extension<DbConn>,
    Path(id): Path<i32>,
) -> AppResult<Json<InventoryResponse>> {
    Ok(Json(inventory_service::get(&db, id).await?))
}

/// GET /api/inventory/available
pub async fn available_inventory(
    Extension(db): Extension<DbConn>,
) -> AppResult<Json<Vec<InventoryResponse>>> {
    Ok(Json(inventory_service::list_available(&db).await?))
}

/// GET /api/inventory/low-stock
pub async fn low_stock(
    Extension(db): Extension<DbConn>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<InventoryResponse>>> {
    user.require_any(roles::FIELD)?;
    Ok(Json(inventory_service::list_low_stock(&db).await?))
}

/// PUT /api/inventory/:id
pub async fn update_inventory(
    Extension(db): Extension<DbConn>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
    Json(req): Json<InventoryUpdateRequest>,
) -> AppResult<Json<InventoryResponse>> {
    user.require_any(roles::FIELD)?;
    Ok(Json(inventory_service::update(&db, id, req).await?))
}
