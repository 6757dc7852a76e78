//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! The in-memory repositories keep the same ordering guarantees as the
//! PostgreSQL adapters (insertion order for areas and users, ID order for
//! monitoring records), so service tests exercise the real lookup rules.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
