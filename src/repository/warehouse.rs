use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Select,
};
use std::collections::HashMap;

use crate::entity::warehouse;

pub async fn find_by_id(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<warehouse::Model>, DbErr> {
    warehouse::Entity::find_by_id(id).one(db).await
}

pub async fn find_by_ids(
    db: &DatabaseConnection,
    ids: &[i32],
) -> Result<HashMap<i32, warehouse::Model>, DbErr> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let warehouses = warehouse::Entity::find()
        .filter(warehouse::Column::Id.is_in(ids.iter().copied()))
        .all(db)
        .await?;
    Ok(warehouses.into_iter().map(|w| (w.id, w)).collect())
}

pub async fn exists_by_code_name(db: &DatabaseConnection, code_name: &str) -> Result<bool, DbErr> {
    let count = warehouse::Entity::find()
        .filter(warehouse::Column::CodeName.eq(code_name))
        .count(db)
        .await?;
    Ok(count > 0)
}

pub fn active() -> Select<warehouse::Entity> {
    warehouse::Entity::find().filter(warehouse::Column::IsActive.eq(true))
}

pub async fn find_active_by_city(
    db: &DatabaseConnection,
    city: &str,
) -> Result<Vec<warehouse::Model>, DbErr> {
    active()
        .filter(warehouse::Column::City.eq(city))
        .order_by_asc(warehouse::Column::Id)
        .all(db)
        .await
}
