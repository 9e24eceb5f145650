//! Entity module - SeaORM entity definitions
//!
//! One module per table. Cross-table links are plain id columns; they are
//! joined by hand in `repository`.

pub mod inventory;
pub mod message;
pub mod operation;
pub mod operation_participant;
pub mod product;
pub mod transaction;
pub mod user;
pub mod warehouse;

pub use operation::OperationStatus;
pub use product::ProductType;
pub use user::Role;

/// Current UTC wall-clock time as stored in timestamp columns
pub fn now() -> sea_orm::prelude::DateTime {
    chrono::Utc::now().naive_utc()
}
