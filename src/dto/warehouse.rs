use serde::{Deserialize, Serialize};
use validator::Validate;

use super::user::UserResponse;
use crate::entity::warehouse;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseCreateRequest {
    #[serde(default)]
    #[validate(
        custom(function = "super::not_blank", message = "Warehouse name is required"),
        length(min = 3, max = 100, message = "Warehouse name must be between 3 and 100 characters")
    )]
    pub name: String,

    #[serde(default)]
    #[validate(
        custom(function = "super::not_blank", message = "Code name is required"),
        length(min = 3, max = 50, message = "Code name must be between 3 and 50 characters")
    )]
    pub code_name: String,

    #[validate(length(max = 500, message = "Address cannot exceed 500 characters"))]
    pub address: Option<String>,

    pub city: Option<String>,
    pub country: Option<String>,
    pub coordinates: Option<String>,

    #[validate(range(min = 0, message = "Capacity cannot be negative"))]
    pub capacity: Option<i32>,

    #[validate(range(min = 1, max = 10, message = "Security level must be between 1 and 10"))]
    pub security_level: Option<i32>,

    pub manager_id: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseUpdateRequest {
    #[validate(length(min = 3, max = 100, message = "Warehouse name must be between 3 and 100 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 500, message = "Address cannot exceed 500 characters"))]
    pub address: Option<String>,

    pub city: Option<String>,
    pub country: Option<String>,
    pub coordinates: Option<String>,

    #[validate(range(min = 0, message = "Capacity cannot be negative"))]
    pub capacity: Option<i32>,

    #[validate(range(min = 1, max = 10, message = "Security level must be between 1 and 10"))]
    pub security_level: Option<i32>,

    pub manager_id: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseResponse {
    pub id: i32,
    pub name: String,
    pub code_name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub coordinates: Option<String>,
    pub capacity: Option<i32>,
    pub security_level: Option<i32>,
    pub is_active: bool,
    pub manager: Option<UserResponse>,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

impl WarehouseResponse {
    pub fn new(model: warehouse::Model, manager: Option<UserResponse>) -> Self {
        Self {
            id: model.id,
            name: model.name,
            code_name: model.code_name,
            address: model.address,
            city: model.city,
            country: model.country,
            coordinates: model.coordinates,
            capacity: model.capacity,
            security_level: model.security_level,
            is_active: model.is_active,
            manager,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
