//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

pub mod account_repo;
pub mod area_repo;
pub mod monitoring_repo;
pub mod schema;


pub use account_repo::PostgresAccountRepository;
pub use area_repo::PostgresAreaRepository;
pub use monitoring_repo::PostgresMonitoringRepository;
pub use schema::ensure_schema;
