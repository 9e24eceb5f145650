//! Internal messaging between members

use sea_orm::{ActiveModelTrait, DatabaseConnection, Order, Set};
use tracing::info;
use validator::Validate;

use crate::auth::CurrentUser;
use crate::dto::message::{MessageCreateRequest, MessageResponse};
use crate::dto::user::UserResponse;
use crate::dto::{required, Page};
use crate::entity::{message, now};
use crate::error::{AppError, AppResult, OptionExt};
use crate::repository::{self, message as messages, user as users, PageParams};

pub async fn project_many(
    db: &DatabaseConnection,
    models: Vec<message::Model>,
) -> AppResult<Vec<MessageResponse>> {
    let user_ids: Vec<i32> = models
        .iter()
        .flat_map(|m| [m.sender_id, m.receiver_id])
        .collect();
    let people = users::find_by_ids(db, &user_ids).await?;

    models
        .into_iter()
        .map(|row| {
            let sender = people
                .get(&row.sender_id)
                .cloned()
                .map(UserResponse::from)
                .ok_or_not_found("Sender not found")?;
            let receiver = people
                .get(&row.receiver_id)
                .cloned()
                .map(UserResponse::from)
                .ok_or_not_found("Receiver not found")?;
            Ok(MessageResponse::new(row, sender, receiver))
        })
        .collect()
}

pub async fn project(db: &DatabaseConnection, model: message::Model) -> AppResult<MessageResponse> {
    let mut projected = project_many(db, vec![model]).await?;
    projected
        .pop()
        .ok_or_else(|| AppError::Internal("message projection came back empty".into()))
}

/// The acting user is always the sender
pub async fn send(
    db: &DatabaseConnection,
    req: MessageCreateRequest,
    sender: &CurrentUser,
) -> AppResult<MessageResponse> {
    req.validate()?;
    let receiver_id = required(req.receiver_id, "Receiver ID is required")?;
    users::find_by_id(db, receiver_id)
        .await?
        .ok_or_not_found("Receiver not found")?;

    let model = message::ActiveModel {
        sender_id: Set(sender.id),
        receiver_id: Set(receiver_id),
        subject: Set(req.subject),
        content: Set(req.content),
        is_encrypted: Set(req.is_encrypted),
        is_read: Set(false),
        priority_level: Set(req.priority_level),
        message_type: Set(Some(req.message_type)),
        sent_at: Set(now()),
        read_at: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!("{} sent message {} to {}", sender.username, model.id, receiver_id);
    project(db, model).await
}

pub async fn find_model(db: &DatabaseConnection, id: i32) -> AppResult<message::Model> {
    messages::find_by_id(db, id)
        .await?
        .ok_or_not_found("Message not found")
}

pub async fn get(db: &DatabaseConnection, id: i32) -> AppResult<MessageResponse> {
    let model = find_model(db, id).await?;
    project(db, model).await
}

pub async fn inbox(
    db: &DatabaseConnection,
    user: &CurrentUser,
    params: &PageParams,
) -> AppResult<Page<MessageResponse>> {
    let page = repository::paginate(
        db,
        messages::received_by(user.id),
        params,
        message::Column::SentAt,
        Order::Desc,
    )
    .await?;
    let (page, rows) = page.take_content();
    Ok(page.with_content(project_many(db, rows).await?))
}

pub async fn sent(
    db: &DatabaseConnection,
    user: &CurrentUser,
    params: &PageParams,
) -> AppResult<Page<MessageResponse>> {
    let page = repository::paginate(
        db,
        messages::sent_by(user.id),
        params,
        message::Column::SentAt,
        Order::Desc,
    )
    .await?;
    let (page, rows) = page.take_content();
    Ok(page.with_content(project_many(db, rows).await?))
}

pub async fn unread(db: &DatabaseConnection, user: &CurrentUser) -> AppResult<Vec<MessageResponse>> {
    let found = messages::find_unread_for(db, user.id).await?;
    project_many(db, found).await
}

/// Only the receiver may mark a message read. `read_at` is set once.
pub async fn mark_as_read(
    db: &DatabaseConnection,
    id: i32,
    user: &CurrentUser,
) -> AppResult<MessageResponse> {
    let existing = find_model(db, id).await?;
    if existing.receiver_id != user.id {
        return Err(AppError::Forbidden(
            "Not authorized to mark this message as read".into(),
        ));
    }
    if existing.is_read {
        return project(db, existing).await;
    }

    let mut active: message::ActiveModel = existing.into();
    active.is_read = Set(true);
    active.read_at = Set(Some(now()));
    let model = active.update(db).await?;
    project(db, model).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_db;
    use crate::entity::Role;
    use crate::service::testutil::seed_user;

    fn request(receiver_id: i32, subject: &str) -> MessageCreateRequest {
        MessageCreateRequest {
            receiver_id: Some(receiver_id),
            subject: subject.into(),
            content: "Pier 9 at midnight".into(),
            is_encrypted: false,
            priority_level: 3,
            message_type: "NORMAL".into(),
        }
    }

    #[tokio::test]
    async fn test_send_uses_acting_user() {
        let db = test_db().await;
        let rico = CurrentUser::from(&seed_user(&db, "rico", Role::Lieutenant).await);
        let vera = seed_user(&db, "vera", Role::User).await;

        let sent_msg = send(&db, request(vera.id, "Drop"), &rico).await.unwrap();
        assert_eq!(sent_msg.sender.id, rico.id);
        assert_eq!(sent_msg.receiver.id, vera.id);
        assert!(!sent_msg.is_read);
        assert!(sent_msg.read_at.is_none());

        let err = send(&db, request(404, "Drop"), &rico).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m == "Receiver not found"));
    }

    #[tokio::test]
    async fn test_inbox_sent_and_unread() {
        let db = test_db().await;
        let rico = CurrentUser::from(&seed_user(&db, "rico", Role::Lieutenant).await);
        let vera = CurrentUser::from(&seed_user(&db, "vera", Role::User).await);

        send(&db, request(vera.id, "First"), &rico).await.unwrap();
        send(&db, request(vera.id, "Second"), &rico).await.unwrap();
        send(&db, request(rico.id, "Reply"), &vera).await.unwrap();

        let inbox_page = inbox(&db, &vera, &PageParams::default()).await.unwrap();
        assert_eq!(inbox_page.total_elements, 2);
        let outbox = sent(&db, &rico, &PageParams::default()).await.unwrap();
        assert_eq!(outbox.total_elements, 2);

        let pending = unread(&db, &vera).await.unwrap();
        let subjects: Vec<_> = pending.iter().map(|m| m.subject.as_str()).collect();
        assert_eq!(subjects, vec!["Second", "First"]);
    }

    #[tokio::test]
    async fn test_only_receiver_marks_read_once() {
        let db = test_db().await;
        let rico = CurrentUser::from(&seed_user(&db, "rico", Role::Boss).await);
        let vera = CurrentUser::from(&seed_user(&db, "vera", Role::User).await);
        let msg = send(&db, request(vera.id, "Drop"), &rico).await.unwrap();

        let err = mark_as_read(&db, msg.id, &rico).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Forbidden(ref m) if m == "Not authorized to mark this message as read"
        ));
        let untouched = get(&db, msg.id).await.unwrap();
        assert!(!untouched.is_read);
        assert!(untouched.read_at.is_none());

        let first = mark_as_read(&db, msg.id, &vera).await.unwrap();
        assert!(first.is_read);
        assert!(first.read_at.is_some());

        let again = mark_as_read(&db, msg.id, &vera).await.unwrap();
        assert_eq!(again.read_at, first.read_at);
        assert!(unread(&db, &vera).await.unwrap().is_empty());

        let err = get(&db, 404).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m == "Message not found"));
    }
}
