//! Warehouse entity - storage sites
//!
//! Table: warehouses

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "warehouses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(column_type = "String(Some(100))")]
    pub name: String,

    #[sea_orm(column_type = "String(Some(50))", unique)]
    pub code_name: String,

    #[sea_orm(column_type = "String(Some(500))", nullable)]
    pub address: Option<String>,

    #[sea_orm(column_type = "String(Some(100))", nullable)]
    pub city: Option<String>,

    #[sea_orm(column_type = "String(Some(100))", nullable)]
    pub country: Option<String>,

    /// GPS coordinates
    #[sea_orm(column_type = "String(Some(64))", nullable)]
    pub coordinates: Option<String>,

    /// Maximum storage capacity
    pub capacity: Option<i32>,

    /// 1-10
    pub security_level: Option<i32>,

    pub is_active: bool,

    /// Managing user (users.id)
    pub manager_id: Option<i32>,

    pub created_at: DateTime,

    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
