use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};

use crate::entity::inventory;

pub async fn find_by_id(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<inventory::Model>, DbErr> {
    inventory::Entity::find_by_id(id).one(db).await
}

pub async fn find_by_product_and_warehouse(
    db: &DatabaseConnection,
    product_id: i32,
    warehouse_id: i32,
) -> Result<Option<inventory::Model>, DbErr> {
    inventory::Entity::find()
        .filter(inventory::Column::ProductId.eq(product_id))
        .filter(inventory::Column::WarehouseId.eq(warehouse_id))
        .one(db)
        .await
}

/// Rows with `quantity > 0`
pub async fn find_available(db: &DatabaseConnection) -> Result<Vec<inventory::Model>, DbErr> {
    inventory::Entity::find()
        .filter(inventory::Column::Quantity.gt(0))
        .order_by_asc(inventory::Column::Id)
        .all(db)
        .await
}

/// Rows with `quantity <= minimum_stock_level`
pub async fn find_low_stock(db: &DatabaseConnection) -> Result<Vec<inventory::Model>, DbErr> {
    inventory::Entity::find()
        .filter(
            Expr::col(inventory::Column::Quantity)
                .lte(Expr::col(inventory::Column::MinimumStockLevel)),
        )
        .order_by_asc(inventory::Column::Id)
        .all(db)
        .await
}
