//! Authentication and authorization middleware

pub mod token;

pub use token::{auth_middleware, require_admin};
