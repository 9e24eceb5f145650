use serde::{Deserialize, Serialize};
use validator::Validate;

use super::user::UserResponse;
use crate::entity::operation::{self, OperationStatus};

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OperationCreateRequest {
    #[serde(default)]
    #[validate(
        custom(function = "super::not_blank", message = "Operation name is required"),
        length(min = 3, max = 100, message = "Operation name must be between 3 and 100 characters")
    )]
    pub name: String,

    #[serde(default)]
    #[validate(
        custom(function = "super::not_blank", message = "Code name is required"),
        length(min = 3, max = 50, message = "Code name must be between 3 and 50 characters")
    )]
    pub code_name: String,

    #[validate(length(max = 1000, message = "Description cannot exceed 1000 characters"))]
    pub description: Option<String>,

    #[validate(required(message = "Leader ID is required"))]
    pub leader_id: Option<i32>,

    pub start_date: Option<chrono::NaiveDateTime>,
    pub end_date: Option<chrono::NaiveDateTime>,
    pub location: Option<String>,

    #[validate(range(min = 1, max = 10, message = "Risk level must be between 1 and 10"))]
    pub risk_level: Option<i32>,

    pub estimated_profit: Option<f64>,

    /// Unknown ids are ignored
    pub participant_ids: Option<Vec<i32>>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OperationUpdateRequest {
    #[validate(length(min = 3, max = 100, message = "Operation name must be between 3 and 100 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 1000, message = "Description cannot exceed 1000 characters"))]
    pub description: Option<String>,

    pub status: Option<OperationStatus>,
    pub start_date: Option<chrono::NaiveDateTime>,
    pub end_date: Option<chrono::NaiveDateTime>,
    pub location: Option<String>,

    #[validate(range(min = 1, max = 10, message = "Risk level must be between 1 and 10"))]
    pub risk_level: Option<i32>,

    pub estimated_profit: Option<f64>,
    pub actual_profit: Option<f64>,

    /// When present, replaces the whole participant set
    pub participant_ids: Option<Vec<i32>>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OperationResponse {
    pub id: i32,
    pub name: String,
    pub code_name: String,
    pub description: Option<String>,
    pub leader: UserResponse,
    pub status: OperationStatus,
    pub start_date: Option<chrono::NaiveDateTime>,
    pub end_date: Option<chrono::NaiveDateTime>,
    pub location: Option<String>,
    pub risk_level: Option<i32>,
    pub estimated_profit: Option<f64>,
    pub actual_profit: Option<f64>,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
    pub participants: Vec<UserResponse>,
}

impl OperationResponse {
    pub fn new(
        model: operation::Model,
        leader: UserResponse,
        participants: Vec<UserResponse>,
    ) -> Self {
        Self {
            id: model.id,
            name: model.name,
            code_name: model.code_name,
            description: model.description,
            leader,
            status: model.status,
            start_date: model.start_date,
            end_date: model.end_date,
            location: model.location,
            risk_level: model.risk_level,
            estimated_profit: model.estimated_profit,
            actual_profit: model.actual_profit,
            created_at: model.created_at,
            updated_at: model.updated_at,
            participants,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeQuery {
    pub start_date: chrono::NaiveDateTime,
    pub end_date: chrono::NaiveDateTime,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    #[serde(default)]
    pub search_term: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dates_and_status() {
        let req: OperationUpdateRequest = serde_json::from_str(
            r#"{"status":"IN_PROGRESS","startDate":"2025-01-31T12:00:00","participantIds":[2,3]}"#,
        )
        .unwrap();
        assert_eq!(req.status, Some(OperationStatus::InProgress));
        assert_eq!(req.participant_ids, Some(vec![2, 3]));
        assert!(req.start_date.is_some());
    }

    #[test]
    fn test_missing_leader() {
        let req: OperationCreateRequest =
            serde_json::from_str(r#"{"name":"Night Run","codeName":"NR-1"}"#).unwrap();
        let err: crate::error::AppError = req.validate().unwrap_err().into();
        assert_eq!(err.to_string(), "Leader ID is required");
    }
}
