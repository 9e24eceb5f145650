//! Operation entity - planned or running ventures
//!
//! Table: operations. Cancelling an operation flips `status` to CANCELLED;
//! the row stays. Participants live in `operation_participants`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle status. Any value may be set at any time.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationStatus {
    #[sea_orm(string_value = "PLANNED")]
    Planned,
    #[sea_orm(string_value = "IN_PROGRESS")]
    InProgress,
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
    #[sea_orm(string_value = "FAILED")]
    Failed,
    #[sea_orm(string_value = "CANCELLED")]
    Cancelled,
}

impl OperationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationStatus::Planned => "PLANNED",
            OperationStatus::InProgress => "IN_PROGRESS",
            OperationStatus::Completed => "COMPLETED",
            OperationStatus::Failed => "FAILED",
            OperationStatus::Cancelled => "CANCELLED",
        }
    }
}

impl std::fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "operations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(column_type = "String(Some(100))")]
    pub name: String,

    #[sea_orm(column_type = "String(Some(50))")]
    pub code_name: String,

    #[sea_orm(column_type = "String(Some(1000))", nullable)]
    pub description: Option<String>,

    /// Leading user (users.id)
    pub leader_id: i32,

    pub status: OperationStatus,

    pub start_date: Option<DateTime>,

    pub end_date: Option<DateTime>,

    #[sea_orm(column_type = "String(Some(255))", nullable)]
    pub location: Option<String>,

    /// 1-10
    pub risk_level: Option<i32>,

    #[sea_orm(column_type = "Double", nullable)]
    pub estimated_profit: Option<f64>,

    #[sea_orm(column_type = "Double", nullable)]
    pub actual_profit: Option<f64>,

    pub created_at: DateTime,

    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
