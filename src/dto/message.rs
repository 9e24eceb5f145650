use serde::{Deserialize, Serialize};
use validator::Validate;

use super::user::UserResponse;
use crate::entity::message;

fn default_priority() -> i32 {
    1
}

fn default_message_type() -> String {
    "NORMAL".to_string()
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MessageCreateRequest {
    #[validate(required(message = "Receiver ID is required"))]
    pub receiver_id: Option<i32>,

    #[serde(default)]
    #[validate(
        custom(function = "super::not_blank", message = "Subject is required"),
        length(min = 1, max = 200, message = "Subject must be between 1 and 200 characters")
    )]
    pub subject: String,

    #[serde(default)]
    #[validate(
        custom(function = "super::not_blank", message = "Content is required"),
        length(min = 1, max = 2000, message = "Content must be between 1 and 2000 characters")
    )]
    pub content: String,

    #[serde(default)]
    pub is_encrypted: bool,

    #[serde(default = "default_priority")]
    #[validate(range(min = 1, max = 5, message = "Priority level must be between 1 and 5"))]
    pub priority_level: i32,

    #[serde(default = "default_message_type")]
    pub message_type: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub id: i32,
    pub sender: UserResponse,
    pub receiver: UserResponse,
    pub subject: String,
    pub content: String,
    pub is_encrypted: bool,
    pub is_read: bool,
    pub priority_level: i32,
    pub message_type: Option<String>,
    pub sent_at: chrono::NaiveDateTime,
    pub read_at: Option<chrono::NaiveDateTime>,
}

impl MessageResponse {
    pub fn new(model: message::Model, sender: UserResponse, receiver: UserResponse) -> Self {
        Self {
            id: model.id,
            sender,
            receiver,
            subject: model.subject,
            content: model.content,
            is_encrypted: model.is_encrypted,
            is_read: model.is_read,
            priority_level: model.priority_level,
            message_type: model.message_type,
            sent_at: model.sent_at,
            read_at: model.read_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let req: MessageCreateRequest =
            serde_json::from_str(r#"{"receiverId":2,"subject":"Drop","content":"Pier 9"}"#).unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.priority_level, 1);
        assert_eq!(req.message_type, "NORMAL");
        assert!(!req.is_encrypted);
    }

    #[test]
    fn test_blank_subject() {
        let req: MessageCreateRequest =
            serde_json::from_str(r#"{"receiverId":2,"subject":"","content":"Pier 9"}"#).unwrap();
        let err: crate::error::AppError = req.validate().unwrap_err().into();
        assert_eq!(err.to_string(), "Subject is required");
    }
}
