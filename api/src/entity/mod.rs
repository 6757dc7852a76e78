//! SeaORM entity definitions
//!
//! Table mappings used by the PostgreSQL adapters. Domain code never sees
//! these types; adapters convert to and from `domain::entities`.

pub mod access_tokens;
pub mod areas;
pub mod mon_data;
pub mod mon_groups;
pub mod mon_points;
pub mod mon_projects;
pub mod users;
