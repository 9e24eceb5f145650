use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Select,
};
use std::collections::HashMap;

use crate::entity::user::{self, Role};

pub async fn find_by_id(db: &DatabaseConnection, id: i32) -> Result<Option<user::Model>, DbErr> {
    user::Entity::find_by_id(id).one(db).await
}

pub async fn find_by_username(
    db: &DatabaseConnection,
    username: &str,
) -> Result<Option<user::Model>, DbErr> {
    user::Entity::find()
        .filter(user::Column::Username.eq(username))
        .one(db)
        .await
}

pub async fn exists_by_username(db: &DatabaseConnection, username: &str) -> Result<bool, DbErr> {
    let count = user::Entity::find()
        .filter(user::Column::Username.eq(username))
        .count(db)
        .await?;
    Ok(count > 0)
}

pub async fn exists_by_email(db: &DatabaseConnection, email: &str) -> Result<bool, DbErr> {
    let count = user::Entity::find()
        .filter(user::Column::Email.eq(email))
        .count(db)
        .await?;
    Ok(count > 0)
}

/// Load several users at once, keyed by id. Unknown ids are absent.
pub async fn find_by_ids(
    db: &DatabaseConnection,
    ids: &[i32],
) -> Result<HashMap<i32, user::Model>, DbErr> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let users = user::Entity::find()
        .filter(user::Column::Id.is_in(ids.iter().copied()))
        .all(db)
        .await?;
    Ok(users.into_iter().map(|u| (u.id, u)).collect())
}

pub async fn find_active_by_territory(
    db: &DatabaseConnection,
    territory: &str,
) -> Result<Vec<user::Model>, DbErr> {
    user::Entity::find()
        .filter(user::Column::Territory.eq(territory))
        .filter(user::Column::IsActive.eq(true))
        .order_by_asc(user::Column::Id)
        .all(db)
        .await
}

pub fn active() -> Select<user::Entity> {
    user::Entity::find().filter(user::Column::IsActive.eq(true))
}

pub fn active_with_role(role: Role) -> Select<user::Entity> {
    active().filter(user::Column::Role.eq(role))
}

pub fn active_code_name_containing(fragment: &str) -> Select<user::Entity> {
    active().filter(user::Column::CodeName.contains(fragment))
}
