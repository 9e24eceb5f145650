//! Authentication primitives: bearer tokens, password hashes and role gates

pub mod jwt;
pub mod password;

pub use crate::middleware::auth::CurrentUser;
pub use crate::permission::roles;
