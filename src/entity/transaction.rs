//! Transaction entity - a sale recorded against an operation
//!
//! Table: transactions. `total_amount` is computed once, at insert time.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub operation_id: i32,

    pub product_id: i32,

    pub buyer_id: i32,

    pub seller_id: i32,

    /// >= 1
    pub quantity: i32,

    /// > 0
    #[sea_orm(column_type = "Double")]
    pub unit_price: f64,

    /// unit_price * quantity
    #[sea_orm(column_type = "Double")]
    pub total_amount: f64,

    #[sea_orm(column_type = "String(Some(255))", nullable)]
    pub transaction_location: Option<String>,

    #[sea_orm(column_type = "String(Some(500))", nullable)]
    pub notes: Option<String>,

    pub transaction_date: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
