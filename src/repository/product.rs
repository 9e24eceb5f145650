use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Select,
};
use std::collections::HashMap;

use crate::entity::product::{self, ProductType};

pub async fn find_by_id(db: &DatabaseConnection, id: i32) -> Result<Option<product::Model>, DbErr> {
    product::Entity::find_by_id(id).one(db).await
}

pub async fn find_by_ids(
    db: &DatabaseConnection,
    ids: &[i32],
) -> Result<HashMap<i32, product::Model>, DbErr> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let products = product::Entity::find()
        .filter(product::Column::Id.is_in(ids.iter().copied()))
        .all(db)
        .await?;
    Ok(products.into_iter().map(|p| (p.id, p)).collect())
}

pub async fn find_by_code_name(
    db: &DatabaseConnection,
    code_name: &str,
) -> Result<Option<product::Model>, DbErr> {
    product::Entity::find()
        .filter(product::Column::CodeName.eq(code_name))
        .one(db)
        .await
}

pub async fn exists_by_code_name(db: &DatabaseConnection, code_name: &str) -> Result<bool, DbErr> {
    let count = product::Entity::find()
        .filter(product::Column::CodeName.eq(code_name))
        .count(db)
        .await?;
    Ok(count > 0)
}

pub fn available() -> Select<product::Entity> {
    product::Entity::find().filter(product::Column::IsAvailable.eq(true))
}

pub fn available_of_type(product_type: ProductType) -> Select<product::Entity> {
    available().filter(product::Column::ProductType.eq(product_type))
}

pub fn available_name_containing(fragment: &str) -> Select<product::Entity> {
    available().filter(product::Column::Name.contains(fragment))
}

/// Inclusive on both ends
pub async fn find_by_price_range(
    db: &DatabaseConnection,
    min: f64,
    max: f64,
) -> Result<Vec<product::Model>, DbErr> {
    available()
        .filter(product::Column::PricePerUnit.between(min, max))
        .order_by_asc(product::Column::Id)
        .all(db)
        .await
}

pub async fn find_by_origin_country(
    db: &DatabaseConnection,
    country: &str,
) -> Result<Vec<product::Model>, DbErr> {
    available()
        .filter(product::Column::OriginCountry.eq(country))
        .order_by_asc(product::Column::Id)
        .all(db)
        .await
}

pub async fn find_by_minimum_purity(
    db: &DatabaseConnection,
    min_purity: i32,
) -> Result<Vec<product::Model>, DbErr> {
    available()
        .filter(product::Column::PurityLevel.gte(min_purity))
        .order_by_asc(product::Column::Id)
        .all(db)
        .await
}
