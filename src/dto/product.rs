use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entity::product::{self, ProductType};

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreateRequest {
    #[serde(default)]
    #[validate(
        custom(function = "super::not_blank", message = "Product name is required"),
        length(min = 2, max = 100, message = "Product name must be between 2 and 100 characters")
    )]
    pub name: String,

    #[serde(default)]
    #[validate(
        custom(function = "super::not_blank", message = "Code name is required"),
        length(min = 2, max = 50, message = "Code name must be between 2 and 50 characters")
    )]
    pub code_name: String,

    #[validate(required(message = "Product type is required"))]
    pub product_type: Option<ProductType>,

    #[validate(length(max = 500, message = "Description cannot exceed 500 characters"))]
    pub description: Option<String>,

    #[validate(range(exclusive_min = 0.0, message = "Price per unit must be greater than 0"))]
    pub price_per_unit: Option<f64>,

    pub unit_measure: Option<String>,
    pub origin_country: Option<String>,

    #[validate(range(min = 0, max = 100, message = "Purity level must be between 0 and 100"))]
    pub purity_level: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdateRequest {
    #[validate(length(min = 2, max = 100, message = "Product name must be between 2 and 100 characters"))]
    pub name: Option<String>,

    pub product_type: Option<ProductType>,

    #[validate(length(max = 500, message = "Description cannot exceed 500 characters"))]
    pub description: Option<String>,

    #[validate(range(exclusive_min = 0.0, message = "Price per unit must be greater than 0"))]
    pub price_per_unit: Option<f64>,

    pub unit_measure: Option<String>,
    pub origin_country: Option<String>,

    #[validate(range(min = 0, max = 100, message = "Purity level must be between 0 and 100"))]
    pub purity_level: Option<i32>,

    pub is_available: Option<bool>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: i32,
    pub name: String,
    pub code_name: String,
    pub product_type: ProductType,
    pub description: Option<String>,
    pub price_per_unit: Option<f64>,
    pub unit_measure: Option<String>,
    pub origin_country: Option<String>,
    pub purity_level: Option<i32>,
    pub is_available: bool,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

impl From<product::Model> for ProductResponse {
    fn from(model: product::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            code_name: model.code_name,
            product_type: model.product_type,
            description: model.description,
            price_per_unit: model.price_per_unit,
            unit_measure: model.unit_measure,
            origin_country: model.origin_country,
            purity_level: model.purity_level,
            is_available: model.is_available,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct NameQuery {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRangeQuery {
    pub min_price: f64,
    pub max_price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_must_be_positive() {
        let req: ProductCreateRequest = serde_json::from_str(
            r#"{"name":"Blue Sky","codeName":"BLUE","productType":"CRYSTAL","pricePerUnit":0}"#,
        )
        .unwrap();
        let err: crate::error::AppError = req.validate().unwrap_err().into();
        assert_eq!(err.to_string(), "Price per unit must be greater than 0");
    }

    #[test]
    fn test_missing_type() {
        let req: ProductCreateRequest =
            serde_json::from_str(r#"{"name":"Blue Sky","codeName":"BLUE"}"#).unwrap();
        let err: crate::error::AppError = req.validate().unwrap_err().into();
        assert_eq!(err.to_string(), "Product type is required");
    }

    #[test]
    fn test_purity_out_of_range() {
        let req = ProductUpdateRequest {
            purity_level: Some(101),
            ..Default::default()
        };
        assert!(req.validate().is_err());
    }
}
