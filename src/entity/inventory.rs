//! Inventory entity - stock of one product in one warehouse
//!
//! Table: inventory. A unique index over (product_id, warehouse_id) is
//! created by `db::auto_migrate`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inventory")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub product_id: i32,

    pub warehouse_id: i32,

    /// >= 0
    pub quantity: i32,

    /// >= 0
    pub reserved_quantity: i32,

    pub minimum_stock_level: i32,

    pub last_restocked: Option<DateTime>,

    pub created_at: DateTime,

    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
