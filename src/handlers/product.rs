//! Product handlers
//!
//! Anyone signed in may browse the catalogue; changes need command rank.

use axum::Extension;

use crate::auth::roles;
use crate::dto::product::{
    NameQuery, PriceRangeQuery, ProductCreateRequest, ProductResponse, ProductUpdateRequest,
};
use crate::dto::{ActionResponse, Page};
use crate::entity::ProductType;
use crate::error::AppResult;
use crate::extract::{Json, Path, Query};
use crate::middleware::{CurrentUser, DbConn};
use crate::repository::PageParams;
use crate::service::product as product_service;

/// POST /api/products
pub async fn create_product(
    Extension(db): Extension<DbConn>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<ProductCreateRequest>,
) -> AppResult<Json<ProductResponse>> {
    user.require_any(roles::COMMAND)?;
    Ok(Json(product_service::create(&db, req).await?))
}

/// GET /api/products
pub async fn list_products(
    Extension(db): Extension<DbConn>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<Page<ProductResponse>>> {
    Ok(Json(product_service::list_available(&db, &params).await?))
}

/// GET /api/products/:id
pub async fn get_product(
    Extension(db): Extension<DbConn>,
    Path(id): Path<i32>,
) -> AppResult<Json<ProductResponse>> {
    Ok(Json(product_service::get(&db, id).await?))
}

/// GET /api/products/code/:codeName
pub async fn get_product_by_code(
    Extension(db): Extension<DbConn>,
    Path(code_name): Path<String>,
) -> AppResult<Json<ProductResponse>> {
    Ok(Json(product_service::get_by_code_name(&db, &code_name).await?))
}

/// GET /api/products/type/:type
pub async fn products_by_type(
    Extension(db): Extension<DbConn>,
    Path(product_type): Path<ProductType>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<Page<ProductResponse>>> {
    Ok(Json(product_service::list_by_type(&db, product_type, &params).await?))
}

/// GET /api/products/search?name=
pub async fn search_products(
    Extension(db): Extension<DbConn>,
    Query(query): Query<NameQuery>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<Page<ProductResponse>>> {
    Ok(Json(product_service::search_by_name(&db, &query.name, &params).await?))
}

/// GET /api/products/price-range?minPrice=&maxPrice=
pub async fn products_by_price_range(
    Extension(db): Extension<DbConn>,
    Query(range): Query<PriceRangeQuery>,
) -> AppResult<Json<Vec<ProductResponse>>> {
    let found = product_service::list_by_price_range(&db, range.min_price, range.max_price).await?;
    Ok(Json(found))
}

/// GET /api/products/origin/:country
pub async fn products_by_origin(
    Extension(db): Extension<DbConn>,
    Path(country): Path<String>,
) -> AppResult<Json<Vec<ProductResponse>>> {
    Ok(Json(product_service::list_by_origin_country(&db, &country).await?))
}

/// GET /api/products/purity/:minPurity
pub async fn products_by_purity(
    Extension(db): Extension<DbConn>,
    Path(min_purity): Path<i32>,
) -> AppResult<Json<Vec<ProductResponse>>> {
    Ok(Json(product_service::list_by_minimum_purity(&db, min_purity).await?))
}

/// PUT /api/products/:id
pub async fn update_product(
    Extension(db): Extension<DbConn>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
    Json(req): Json<ProductUpdateRequest>,
) -> AppResult<Json<ProductResponse>> {
    user.require_any(roles::COMMAND)?;
    Ok(Json(product_service::update(&db, id, req).await?))
}

/// DELETE /api/products/:id
pub async fn delete_product(
    Extension(db): Extension<DbConn>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> AppResult<Json<ActionResponse>> {
    user.require_any(roles::COMMAND)?;
    product_service::discontinue(&db, id).await?;
    Ok(Json(ActionResponse::new("Product discontinued successfully")))
}
