use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entity::user::{self, Role};

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserCreateRequest {
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

    /// Defaults to USER
    pub role: Option<Role>,
    pub phone_number: Option<String>,
    pub territory: Option<String>,
}

/// Absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdateRequest {
    #[validate(email(message = "Email should be valid"))]
    pub email: Option<String>,

    #[validate(length(min = 2, max = 50, message = "Code name must be between 2 and 50 characters"))]
    pub code_name: Option<String>,

    pub role: Option<Role>,
    pub phone_number: Option<String>,
    pub territory: Option<String>,
    pub is_active: Option<bool>,
}

/// Public projection of a member; never carries the password hash
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub code_name: String,
    pub role: Role,
    pub phone_number: Option<String>,
    pub territory: Option<String>,
    pub is_active: bool,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

impl From<user::Model> for UserResponse {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
            code_name: model.code_name,
            role: model.role,
            phone_number: model.phone_number,
            territory: model.territory,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeNameQuery {
    #[serde(default)]
    pub code_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> UserCreateRequest {
        UserCreateRequest {
            username: "ghost".into(),
            password: "secret1".into(),
            email: "ghost@x.com".into(),
            code_name: "Shadow".into(),
            role: None,
            phone_number: None,
            territory: None,
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn test_blank_username_reports_required() {
        let mut req = request();
        req.username = "  ".into();
        let err: crate::error::AppError = req.validate().unwrap_err().into();
        assert_eq!(err.to_string(), "Username is required");
    }

    #[test]
    fn test_bad_email() {
        let mut req = request();
        req.email = "not-an-email".into();
        let err: crate::error::AppError = req.validate().unwrap_err().into();
        assert_eq!(err.to_string(), "Email should be valid");
    }

    #[test]
    fn test_camel_case_payload() {
        let req: UserCreateRequest = serde_json::from_str(
            r#"{"username":"rico","password":"secret1","email":"r@x.io","codeName":"Rico","role":"LIEUTENANT"}"#,
        )
        .unwrap();
        assert_eq!(req.code_name, "Rico");
        assert_eq!(req.role, Some(Role::Lieutenant));
    }
}
