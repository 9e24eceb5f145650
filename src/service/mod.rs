//! Domain services
//!
//! One module per resource. Every operation takes the connection explicitly;
//! the few that depend on who is calling also take a `&CurrentUser`.

pub mod ai;
pub mod auth;
pub mod bootstrap;
pub mod inventory;
pub mod message;
pub mod operation;
pub mod product;
pub mod transaction;
pub mod user;
pub mod warehouse;
