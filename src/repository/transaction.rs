use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select,
};

use crate::entity::transaction;

pub async fn find_by_id(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<transaction::Model>, DbErr> {
    transaction::Entity::find_by_id(id).one(db).await
}

/// Transactions where the user bought or sold
pub fn involving(user_id: i32) -> Select<transaction::Entity> {
    transaction::Entity::find().filter(
        Condition::any()
            .add(transaction::Column::BuyerId.eq(user_id))
            .add(transaction::Column::SellerId.eq(user_id)),
    )
}

pub async fn find_by_date_range(
    db: &DatabaseConnection,
    start: chrono::NaiveDateTime,
    end: chrono::NaiveDateTime,
) -> Result<Vec<transaction::Model>, DbErr> {
    transaction::Entity::find()
        .filter(transaction::Column::TransactionDate.between(start, end))
        .order_by_desc(transaction::Column::TransactionDate)
        .all(db)
        .await
}

pub async fn count_between(
    db: &DatabaseConnection,
    since: chrono::NaiveDateTime,
    until: chrono::NaiveDateTime,
) -> Result<u64, DbErr> {
    transaction::Entity::find()
        .filter(transaction::Column::TransactionDate.between(since, until))
        .count(db)
        .await
}

/// Sum of `total_amount` for one seller within `[start, end]`, zero when empty
pub async fn total_sales_by_seller(
    db: &DatabaseConnection,
    seller_id: i32,
    start: chrono::NaiveDateTime,
    end: chrono::NaiveDateTime,
) -> Result<f64, DbErr> {
    let total: Option<Option<f64>> = transaction::Entity::find()
        .select_only()
        .column_as(transaction::Column::TotalAmount.sum(), "total")
        .filter(transaction::Column::SellerId.eq(seller_id))
        .filter(transaction::Column::TransactionDate.between(start, end))
        .into_tuple()
        .one(db)
        .await?;
    Ok(total.flatten().unwrap_or(0.0))
}
