use serde::{Deserialize, Serialize};
use validator::Validate;

use super::operation::OperationResponse;
use super::product::ProductResponse;
use super::user::UserResponse;
use crate::entity::transaction;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TransactionCreateRequest {
    #[validate(required(message = "Operation ID is required"))]
    pub operation_id: Option<i32>,

    #[validate(required(message = "Product ID is required"))]
    pub product_id: Option<i32>,

    #[validate(required(message = "Buyer ID is required"))]
    pub buyer_id: Option<i32>,

    #[validate(required(message = "Seller ID is required"))]
    pub seller_id: Option<i32>,

    #[validate(
        required(message = "Quantity is required"),
        range(min = 1, message = "Quantity must be at least 1")
    )]
    pub quantity: Option<i32>,

    #[validate(
        required(message = "Unit price is required"),
        range(exclusive_min = 0.0, message = "Unit price must be greater than 0")
    )]
    pub unit_price: Option<f64>,

    pub transaction_location: Option<String>,

    #[validate(length(max = 500, message = "Notes cannot exceed 500 characters"))]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub id: i32,
    pub operation: OperationResponse,
    pub product: ProductResponse,
    pub buyer: UserResponse,
    pub seller: UserResponse,
    pub quantity: i32,
    pub unit_price: f64,
    pub total_amount: f64,
    pub transaction_location: Option<String>,
    pub notes: Option<String>,
    pub transaction_date: chrono::NaiveDateTime,
}

impl TransactionResponse {
    pub fn new(
        model: transaction::Model,
        operation: OperationResponse,
        product: ProductResponse,
        buyer: UserResponse,
        seller: UserResponse,
    ) -> Self {
        Self {
            id: model.id,
            operation,
            product,
            buyer,
            seller,
            quantity: model.quantity,
            unit_price: model.unit_price,
            total_amount: model.total_amount,
            transaction_location: model.transaction_location,
            notes: model.notes,
            transaction_date: model.transaction_date,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SalesReport {
    pub seller_id: i32,
    pub start_date: chrono::NaiveDateTime,
    pub end_date: chrono::NaiveDateTime,
    pub total_sales: f64,
    pub currency: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_at_least_one() {
        let req: TransactionCreateRequest = serde_json::from_str(
            r#"{"operationId":1,"productId":1,"buyerId":2,"sellerId":3,"quantity":0,"unitPrice":10.0}"#,
        )
        .unwrap();
        let err: crate::error::AppError = req.validate().unwrap_err().into();
        assert_eq!(err.to_string(), "Quantity must be at least 1");
    }
}
