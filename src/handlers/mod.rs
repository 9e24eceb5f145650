//! Request handlers module
//!
//! Thin adapters: pull the acting user and connection out of request
//! extensions, check the route's role set, then call into `service`.

pub mod ai;
pub mod auth;
pub mod inventory;
pub mod message;
pub mod operation;
pub mod product;
pub mod transaction;
pub mod user;
pub mod warehouse;
