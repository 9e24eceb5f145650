use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entity::user::{self, Role};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(custom(function = "super::not_blank", message = "Username is required"))]
    pub username: String,

    #[serde(default)]
    #[validate(custom(function = "super::not_blank", message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(
        custom(function = "super::not_blank", message = "Username is required"),
        length(min = 3, max = 50, message = "Username must be between 3 and 50 characters")
    )]
    pub username: String,

    #[serde(default)]
    #[validate(
        custom(function = "super::not_blank", message = "Password is required"),
        length(min = 6, message = "Password must be at least 6 characters")
    )]
    pub password: String,

    #[serde(default)]
    #[validate(
        custom(function = "super::not_blank", message = "Email is required"),
        email(message = "Email should be valid")
    )]
    pub email: String,

    #[serde(default)]
    #[validate(
        custom(function = "super::not_blank", message = "Code name is required"),
        length(min = 2, max = 50, message = "Code name must be between 2 and 50 characters")
    )]
    pub code_name: String,

    pub phone_number: Option<String>,
    pub territory: Option<String>,
}

/// Token plus public profile, returned by login and register
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    #[serde(rename = "type")]
    pub token_type: &'static str,
    pub id: i32,
    pub username: String,
    pub email: String,
    pub code_name: String,
    pub role: Role,
}

impl AuthResponse {
    pub fn new(token: String, user: &user::Model) -> Self {
        Self {
            token,
            token_type: "Bearer",
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            code_name: user.code_name.clone(),
            role: user.role,
        }
    }
}

/// `GET /auth/me`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub code_name: String,
    pub role: Role,
    pub territory: Option<String>,
}

impl From<user::Model> for ProfileResponse {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
            code_name: model.code_name,
            role: model.role,
            territory: model.territory,
        }
    }
}
