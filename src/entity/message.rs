//! Message entity - internal mail between members
//!
//! Table: messages. `is_encrypted` is a flag only; content is stored as sent.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "messages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub sender_id: i32,

    pub receiver_id: i32,

    #[sea_orm(column_type = "String(Some(200))")]
    pub subject: String,

    #[sea_orm(column_type = "String(Some(2000))")]
    pub content: String,

    pub is_encrypted: bool,

    pub is_read: bool,

    /// 1-5, 5 highest
    pub priority_level: i32,

    /// URGENT, NORMAL, CONFIDENTIAL...
    #[sea_orm(column_type = "String(Some(32))", nullable)]
    pub message_type: Option<String>,

    pub sent_at: DateTime,

    pub read_at: Option<DateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
