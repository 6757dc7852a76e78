//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities, ports, and external systems.

pub mod account_service;
pub mod area_service;
pub mod monitoring_service;

pub use account_service::AccountService;
pub use area_service::AreaService;
pub use monitoring_service::MonitoringService;
