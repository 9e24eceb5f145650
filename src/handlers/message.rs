//! Message handlers
//!
//! Inbox, outbox and unread listings are always scoped to the caller.

use axum::Extension;

use crate::dto::message::{MessageCreateRequest, MessageResponse};
use crate::dto::Page;
use crate::error::AppResult;
use crate::extract::{Json, Path, Query};
use crate::middleware::{CurrentUser, DbConn};
use crate::repository::PageParams;
use crate::service::message as message_service;

/// POST /api/messages
pub async fn send_message(
    Extension(db): Extension<DbConn>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<MessageCreateRequest>,
) -> AppResult<Json<MessageResponse>> {
    Ok(Json(message_service::send(&db, req, &user).await?))
}

/// GET /api/messages/:id
pub async fn get_message(
    Extension(db): Extension<DbConn>,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    Ok(Json(message_service::get(&db, id).await?))
}

/// GET /api/messages/inbox
pub async fn inbox(
    Extension(db): Extension<DbConn>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<Page<MessageResponse>>> {
    Ok(Json(message_service::inbox(&db, &user, &params).await?))
}

/// GET /api/messages/sent
pub async fn sent(
    Extension(db): Extension<DbConn>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<Page<MessageResponse>>> {
    Ok(Json(message_service::sent(&db, &user, &params).await?))
}

/// GET /api/messages/unread
pub async fn unread(
    Extension(db): Extension<DbConn>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<MessageResponse>>> {
    Ok(Json(message_service::unread(&db, &user).await?))
}

/// PUT /api/messages/:id/read
pub async fn mark_as_read(
    Extension(db): Extension<DbConn>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    Ok(Json(message_service::mark_as_read(&db, id, &user).await?))
}
