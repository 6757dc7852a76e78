//! Domain layer
//!
//! Contains pure business logic with no external dependencies.
//! - `entities`: Domain models representing core business concepts
//! - `ports`: Trait definitions for external dependencies
//! - `resolver`: Name-or-ID lookup shared by the area registry

pub mod entities;
pub mod ports;
pub mod resolver;
