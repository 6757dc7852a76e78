//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod account;
pub mod area;
pub mod monitoring;

pub use account::{AccessToken, AccountRequest, NewUser, Role, User, UserId, UserInfo};
pub use area::{AreaDesc, AreaId, AreaKind, AreaRequest, NewArea, TerritoryDesc, SIMPLE_TERRITORY};
pub use monitoring::{
    parse_id_list, MonData, MonGroup, MonGroupTree, MonPoint, MonProject, MonProjectTree,
    MonitoringRecord,
};
