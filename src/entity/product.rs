//! Product entity - catalogue of tradeable goods
//!
//! Table: products. Discontinued products keep their row with
//! `is_available = false`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductType {
    #[sea_orm(string_value = "POWDER")]
    Powder,
    #[sea_orm(string_value = "PILLS")]
    Pills,
    #[sea_orm(string_value = "HERBAL")]
    Herbal,
    #[sea_orm(string_value = "LIQUID")]
    Liquid,
    #[sea_orm(string_value = "CRYSTAL")]
    Crystal,
    #[sea_orm(string_value = "SYNTHETIC")]
    Synthetic,
    #[sea_orm(string_value = "OTHER")]
    Other,
}

impl ProductType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Powder => "POWDER",
            ProductType::Pills => "PILLS",
            ProductType::Herbal => "HERBAL",
            ProductType::Liquid => "LIQUID",
            ProductType::Crystal => "CRYSTAL",
            ProductType::Synthetic => "SYNTHETIC",
            ProductType::Other => "OTHER",
        }
    }
}

impl std::fmt::Display for ProductType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(column_type = "String(Some(100))")]
    pub name: String,

    #[sea_orm(column_type = "String(Some(50))", unique)]
    pub code_name: String,

    pub product_type: ProductType,

    #[sea_orm(column_type = "String(Some(500))", nullable)]
    pub description: Option<String>,

    /// Always > 0 when set
    #[sea_orm(column_type = "Double", nullable)]
    pub price_per_unit: Option<f64>,

    /// kg, g, pills, liters...
    #[sea_orm(column_type = "String(Some(32))", nullable)]
    pub unit_measure: Option<String>,

    #[sea_orm(column_type = "String(Some(64))", nullable)]
    pub origin_country: Option<String>,

    /// 0-100
    pub purity_level: Option<i32>,

    pub is_available: bool,

    pub created_at: DateTime,

    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
