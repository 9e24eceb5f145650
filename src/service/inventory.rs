//! Stock levels per product and warehouse

use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Order, Set, SqlErr};
use std::collections::HashMap;
use tracing::info;
use validator::Validate;

use super::{product as product_service, warehouse as warehouse_service};
use crate::dto::inventory::{InventoryCreateRequest, InventoryResponse, InventoryUpdateRequest};
use crate::dto::product::ProductResponse;
use crate::dto::{required, Page};
use crate::entity::{inventory, now};
use crate::error::{AppError, AppResult, OptionExt};
use crate::repository::{
    self, inventory as stock, product as products, warehouse as warehouses, PageParams,
};

const DUPLICATE_STOCK: &str = "Inventory already exists for this product in this warehouse";

/// Attach product and warehouse projections to a batch of rows
pub async fn project_many(
    db: &DatabaseConnection,
    models: Vec<inventory::Model>,
) -> AppResult<Vec<InventoryResponse>> {
    let product_ids: Vec<i32> = models.iter().map(|i| i.product_id).collect();
    let warehouse_ids: Vec<i32> = models.iter().map(|i| i.warehouse_id).collect();

    let product_map = products::find_by_ids(db, &product_ids).await?;
    let warehouse_rows: Vec<_> = warehouses::find_by_ids(db, &warehouse_ids)
        .await?
        .into_values()
        .collect();
    let warehouse_map: HashMap<_, _> = warehouse_service::project_many(db, warehouse_rows)
        .await?
        .into_iter()
        .map(|w| (w.id, w))
        .collect();

    models
        .into_iter()
        .map(|row| {
            let product = product_map
                .get(&row.product_id)
                .cloned()
                .map(ProductResponse::from)
                .ok_or_not_found(format!("Product not found with id: {}", row.product_id))?;
            let warehouse = warehouse_map
                .get(&row.warehouse_id)
                .cloned()
                .ok_or_not_found(format!("Warehouse not found with id: {}", row.warehouse_id))?;
            Ok(InventoryResponse::new(row, product, warehouse))
        })
        .collect()
}

pub async fn project(db: &DatabaseConnection, model: inventory::Model) -> AppResult<InventoryResponse> {
    let product = product_service::get(db, model.product_id).await?;
    let warehouse = warehouse_service::get(db, model.warehouse_id).await?;
    Ok(InventoryResponse::new(model, product, warehouse))
}

pub async fn create(
    db: &DatabaseConnection,
    req: InventoryCreateRequest,
) -> AppResult<InventoryResponse> {
    req.validate()?;
    let product_id = required(req.product_id, "Product ID is required")?;
    let warehouse_id = required(req.warehouse_id, "Warehouse ID is required")?;
    let quantity = required(req.quantity, "Quantity is required")?;

    products::find_by_id(db, product_id)
        .await?
        .ok_or_not_found("Product not found")?;
    warehouses::find_by_id(db, warehouse_id)
        .await?
        .ok_or_not_found("Warehouse not found")?;

    if stock::find_by_product_and_warehouse(db, product_id, warehouse_id)
        .await?
        .is_some()
    {
        return Err(AppError::BadRequest(DUPLICATE_STOCK.into()));
    }

    let ts = now();
    let model = inventory::ActiveModel {
        product_id: Set(product_id),
        warehouse_id: Set(warehouse_id),
        quantity: Set(quantity),
        reserved_quantity: Set(req.reserved_quantity),
        minimum_stock_level: Set(req.minimum_stock_level),
        last_restocked: Set(Some(ts)),
        created_at: Set(ts),
        updated_at: Set(ts),
        ..Default::default()
    };
    let model = insert_row(db, model).await?;

    info!(
        "Stocked product {} in warehouse {} (qty {})",
        product_id, warehouse_id, quantity
    );
    project(db, model).await
}

/// A concurrent create for the same pair trips the unique index
async fn insert_row(
    db: &DatabaseConnection,
    row: inventory::ActiveModel,
) -> AppResult<inventory::Model> {
    row.insert(db).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::BadRequest(DUPLICATE_STOCK.into()),
        _ => AppError::Database(e),
    })
}

pub async fn find_model(db: &DatabaseConnection, id: i32) -> AppResult<inventory::Model> {
    stock::find_by_id(db, id)
        .await?
        .ok_or_not_found("Inventory not found")
}

pub async fn get(db: &DatabaseConnection, id: i32) -> AppResult<InventoryResponse> {
    let model = find_model(db, id).await?;
    project(db, model).await
}

pub async fn list(db: &DatabaseConnection, params: &PageParams) -> AppResult<Page<InventoryResponse>> {
    let page = repository::paginate(
        db,
        inventory::Entity::find(),
        params,
        inventory::Column::Id,
        Order::Asc,
    )
    .await?;
    let (page, rows) = page.take_content();
    Ok(page.with_content(project_many(db, rows).await?))
}

pub async fn list_available(db: &DatabaseConnection) -> AppResult<Vec<InventoryResponse>> {
    let rows = stock::find_available(db).await?;
    project_many(db, rows).await
}

pub async fn list_low_stock(db: &DatabaseConnection) -> AppResult<Vec<InventoryResponse>> {
    let rows = stock::find_low_stock(db).await?;
    project_many(db, rows).await
}

/// Setting `quantity` counts as a restock
pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    req: InventoryUpdateRequest,
) -> AppResult<InventoryResponse> {
    req.validate()?;
    let mut active: inventory::ActiveModel = find_model(db, id).await?.into();
    let ts = now();

    if let Some(quantity) = req.quantity {
        active.quantity = Set(quantity);
        active.last_restocked = Set(Some(ts));
    }
    if let Some(reserved) = req.reserved_quantity {
        active.reserved_quantity = Set(reserved);
    }
    if let Some(minimum) = req.minimum_stock_level {
        active.minimum_stock_level = Set(minimum);
    }
    active.updated_at = Set(ts);

    let model = active.update(db).await?;
    info!("Updated inventory {}", model.id);
    project(db, model).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_db;
    use crate::service::testutil::{seed_product, seed_warehouse};

    fn request(product_id: i32, warehouse_id: i32, quantity: i32) -> InventoryCreateRequest {
        InventoryCreateRequest {
            product_id: Some(product_id),
            warehouse_id: Some(warehouse_id),
            quantity: Some(quantity),
            reserved_quantity: 0,
            minimum_stock_level: 10,
        }
    }

    #[tokio::test]
    async fn test_one_row_per_pair() {
        let db = test_db().await;
        let product = seed_product(&db, "BLUE", 100.0).await;
        let site = seed_warehouse(&db, "NORTH").await;

        let created = create(&db, request(product.id, site.id, 50)).await.unwrap();
        assert_eq!(created.product.id, product.id);
        assert_eq!(created.warehouse.id, site.id);
        assert!(created.last_restocked.is_some());

        let err = create(&db, request(product.id, site.id, 5)).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::BadRequest(ref m) if m == "Inventory already exists for this product in this warehouse"
        ));
        assert_eq!(list(&db, &PageParams::default()).await.unwrap().total_elements, 1);
    }

    #[tokio::test]
    async fn test_unique_index_maps_to_duplicate() {
        let db = test_db().await;
        let product = seed_product(&db, "BLUE", 100.0).await;
        let site = seed_warehouse(&db, "NORTH").await;
        let row = || inventory::ActiveModel {
            product_id: Set(product.id),
            warehouse_id: Set(site.id),
            quantity: Set(5),
            reserved_quantity: Set(0),
            minimum_stock_level: Set(1),
            last_restocked: Set(None),
            created_at: Set(now()),
            updated_at: Set(now()),
            ..Default::default()
        };

        insert_row(&db, row()).await.unwrap();
        let err = insert_row(&db, row()).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m == DUPLICATE_STOCK));
    }

    #[tokio::test]
    async fn test_missing_references() {
        let db = test_db().await;
        let site = seed_warehouse(&db, "NORTH").await;
        let err = create(&db, request(77, site.id, 5)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m == "Product not found"));
    }

    #[tokio::test]
    async fn test_available_and_low_stock() {
        let db = test_db().await;
        let blue = seed_product(&db, "BLUE", 100.0).await;
        let red = seed_product(&db, "RED", 50.0).await;
        let site = seed_warehouse(&db, "NORTH").await;

        create(&db, request(blue.id, site.id, 50)).await.unwrap();
        create(&db, request(red.id, site.id, 0)).await.unwrap();

        let available = list_available(&db).await.unwrap();
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].product.code_name, "BLUE");

        let low = list_low_stock(&db).await.unwrap();
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].product.code_name, "RED");
    }

    #[tokio::test]
    async fn test_update_quantity_restocks() {
        let db = test_db().await;
        let product = seed_product(&db, "BLUE", 100.0).await;
        let site = seed_warehouse(&db, "NORTH").await;
        let created = create(&db, request(product.id, site.id, 50)).await.unwrap();

        let updated = update(
            &db,
            created.id,
            InventoryUpdateRequest {
                reserved_quantity: Some(5),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.quantity, 50);
        assert_eq!(updated.reserved_quantity, 5);
        assert_eq!(updated.last_restocked, created.last_restocked);

        let restocked = update(
            &db,
            created.id,
            InventoryUpdateRequest {
                quantity: Some(80),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(restocked.quantity, 80);
        assert!(restocked.last_restocked >= created.last_restocked);
        assert_eq!(restocked.minimum_stock_level, 10);
    }
}
