//! Cartel Command - role-gated REST backend for a business simulation
//!
//! This crate provides the persistence layer, domain services and HTTP surface
//! for members, products, warehouses, inventory, operations, transactions,
//! internal messages and the chat-model advisor.

pub mod ai;
pub mod auth;
pub mod config;
pub mod db;
pub mod dto;
pub mod entity;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod permission;
pub mod repository;
pub mod routes;
pub mod service;
pub mod state;

// Re-export commonly used types
pub use config::Config;
pub use state::AppState;
