//! User entity - cartel members
//!
//! Table: users. Rows are never removed; `is_active = false` marks a
//! deactivated member.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Rank inside the organisation
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Regular member
    #[sea_orm(string_value = "USER")]
    User,
    /// Middle management
    #[sea_orm(string_value = "LIEUTENANT")]
    Lieutenant,
    /// High-ranking member
    #[sea_orm(string_value = "BOSS")]
    Boss,
    /// System administrator
    #[sea_orm(string_value = "ADMIN")]
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Lieutenant => "LIEUTENANT",
            Role::Boss => "BOSS",
            Role::Admin => "ADMIN",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "USER" => Ok(Role::User),
            "LIEUTENANT" => Ok(Role::Lieutenant),
            "BOSS" => Ok(Role::Boss),
            "ADMIN" => Ok(Role::Admin),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(column_type = "String(Some(50))", unique)]
    pub username: String,

    #[sea_orm(column_type = "String(Some(100))", unique)]
    pub email: String,

    /// bcrypt hash
    #[sea_orm(column_type = "String(Some(128))")]
    #[serde(skip_serializing)]
    pub password: String,

    #[sea_orm(column_type = "String(Some(50))")]
    pub code_name: String,

    pub role: Role,

    #[sea_orm(column_type = "String(Some(32))", nullable)]
    pub phone_number: Option<String>,

    #[sea_orm(column_type = "String(Some(100))", nullable)]
    pub territory: Option<String>,

    pub is_active: bool,

    pub created_at: DateTime,

    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

// Relations to operations, warehouses, messages and transactions are resolved
// with explicit queries in the repository layer.

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        assert_eq!("boss".parse::<Role>().unwrap(), Role::Boss);
        assert_eq!(Role::Lieutenant.to_string(), "LIEUTENANT");
        assert!("capo".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_json() {
        let json = serde_json::to_string(&Role::Admin).unwrap();
        assert_eq!(json, "\"ADMIN\"");
        let role: Role = serde_json::from_str("\"LIEUTENANT\"").unwrap();
        assert_eq!(role, Role::Lieutenant);
    }
}
