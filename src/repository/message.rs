use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, Select};

use crate::entity::message;

pub async fn find_by_id(db: &DatabaseConnection, id: i32) -> Result<Option<message::Model>, DbErr> {
    message::Entity::find_by_id(id).one(db).await
}

pub fn received_by(user_id: i32) -> Select<message::Entity> {
    message::Entity::find().filter(message::Column::ReceiverId.eq(user_id))
}

pub fn sent_by(user_id: i32) -> Select<message::Entity> {
    message::Entity::find().filter(message::Column::SenderId.eq(user_id))
}

/// Unread messages for `user_id`, newest first
pub async fn find_unread_for(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<Vec<message::Model>, DbErr> {
    received_by(user_id)
        .filter(message::Column::IsRead.eq(false))
        .order_by_desc(message::Column::SentAt)
        .order_by_desc(message::Column::Id)
        .all(db)
        .await
}
