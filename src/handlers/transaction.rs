//! Transaction handlers

use axum::Extension;

use crate::auth::roles;
use crate::dto::operation::DateRangeQuery;
use crate::dto::transaction::{SalesReport, TransactionCreateRequest, TransactionResponse};
use crate::dto::Page;
use crate::error::AppResult;
use crate::extract::{Json, Path, Query};
use crate::middleware::{CurrentUser, DbConn};
use crate::repository::PageParams;
use crate::service::transaction as transaction_service;

/// POST /api/transactions
pub async fn create_transaction(
    Extension(db): Extension<DbConn>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<TransactionCreateRequest>,
) -> AppResult<Json<TransactionResponse>> {
    user.require_any(roles::FIELD)?;
    Ok(Json(transaction_service::create(&db, req, &user).await?))
}

/// GET /api/transactions
pub async fn list_transactions(
    Extension(db): Extension<DbConn>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<Page<TransactionResponse>>> {
    user.require_any(roles::COMMAND)?;
    Ok(Json(transaction_service::list(&db, &params).await?))
}

/// GET /api/transactions/:id
pub async fn get_transaction(
    Extension(db): Extension<DbConn>,
    Path(id): Path<i32>,
) -> AppResult<Json<TransactionResponse>> {
    Ok(Json(transaction_service::get(&db, id).await?))
}

/// GET /api/transactions/user/:userId
pub async fn transactions_by_user(
    Extension(db): Extension<DbConn>,
    Extension(user): Extension<CurrentUser>,
    Path(user_id): Path<i32>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<Page<TransactionResponse>>> {
    user.require_any(roles::FIELD)?;
    Ok(Json(transaction_service::list_by_user(&db, user_id, &params).await?))
}

/// GET /api/transactions/date-range?startDate=&endDate=
pub async fn transactions_by_date_range(
    Extension(db): Extension<DbConn>,
    Extension(user): Extension<CurrentUser>,
    Query(range): Query<DateRangeQuery>,
) -> AppResult<Json<Vec<TransactionResponse>>> {
    user.require_any(roles::COMMAND)?;
    let found =
        transaction_service::list_by_date_range(&db, range.start_date, range.end_date).await?;
    Ok(Json(found))
}

/// GET /api/transactions/sales-report/:sellerId?startDate=&endDate=
pub async fn sales_report(
    Extension(db): Extension<DbConn>,
    Extension(user): Extension<CurrentUser>,
    Path(seller_id): Path<i32>,
    Query(range): Query<DateRangeQuery>,
) -> AppResult<Json<SalesReport>> {
    user.require_any(roles::COMMAND)?;
    let report =
        transaction_service::sales_report(&db, seller_id, range.start_date, range.end_date).await?;
    Ok(Json(report))
}
