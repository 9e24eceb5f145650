use serde::{Deserialize, Serialize};
use validator::Validate;

use super::product::ProductResponse;
use super::warehouse::WarehouseResponse;
use crate::entity::inventory;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InventoryCreateRequest {
    #[validate(required(message = "Product ID is required"))]
    pub product_id: Option<i32>,

    #[validate(required(message = "Warehouse ID is required"))]
    pub warehouse_id: Option<i32>,

    #[validate(
        required(message = "Quantity is required"),
        range(min = 0, message = "Quantity cannot be negative")
    )]
    pub quantity: Option<i32>,

    #[serde(default)]
    #[validate(range(min = 0, message = "Reserved quantity cannot be negative"))]
    pub reserved_quantity: i32,

    #[serde(default)]
    pub minimum_stock_level: i32,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InventoryUpdateRequest {
    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    pub quantity: Option<i32>,

    #[validate(range(min = 0, message = "Reserved quantity cannot be negative"))]
    pub reserved_quantity: Option<i32>,

    pub minimum_stock_level: Option<i32>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InventoryResponse {
    pub id: i32,
    pub product: ProductResponse,
    pub warehouse: WarehouseResponse,
    pub quantity: i32,
    pub reserved_quantity: i32,
    pub minimum_stock_level: i32,
    pub last_restocked: Option<chrono::NaiveDateTime>,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

impl InventoryResponse {
    pub fn new(
        model: inventory::Model,
        product: ProductResponse,
        warehouse: WarehouseResponse,
    ) -> Self {
        Self {
            id: model.id,
            product,
            warehouse,
            quantity: model.quantity,
            reserved_quantity: model.reserved_quantity,
            minimum_stock_level: model.minimum_stock_level,
            last_restocked: model.last_restocked,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_quantity() {
        let req: InventoryCreateRequest =
            serde_json::from_str(r#"{"productId":1,"warehouseId":2,"quantity":-5}"#).unwrap();
        let err: crate::error::AppError = req.validate().unwrap_err().into();
        assert_eq!(err.to_string(), "Quantity cannot be negative");
    }

    #[test]
    fn test_defaults() {
        let req: InventoryCreateRequest =
            serde_json::from_str(r#"{"productId":1,"warehouseId":2,"quantity":5}"#).unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.reserved_quantity, 0);
        assert_eq!(req.minimum_stock_level, 0);
    }
}
