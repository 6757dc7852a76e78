//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture function creates a valid entity that can be customized.

use chrono::Utc;

use crate::app::account_service::hash_password;
use crate::domain::entities::{
    AccountRequest, AreaDesc, AreaId, AreaKind, AreaRequest, MonGroup, MonPoint, MonProject, Role,
    User, UserId, SIMPLE_TERRITORY,
};

/// Create a stored territory
pub fn test_territory(name: &str, is_default: bool) -> AreaDesc {
    AreaDesc {
        id: AreaId::new(),
        name: name.to_string(),
        kind: AreaKind::Territory,
        area_type: Some(SIMPLE_TERRITORY.to_string()),
        is_default,
        parent_id: None,
        db_name: "iS3Db".to_string(),
    }
}

/// Create a stored domain under `territory`
pub fn test_domain(name: &str, territory: &AreaDesc) -> AreaDesc {
    AreaDesc {
        id: AreaId::new(),
        name: name.to_string(),
        kind: AreaKind::Domain,
        area_type: Some(name.to_string()),
        is_default: false,
        parent_id: Some(territory.id.clone()),
        db_name: territory.db_name.clone(),
    }
}

/// A request carrying only a name
pub fn area_request(name: &str) -> AreaRequest {
    AreaRequest {
        name: Some(name.to_string()),
        ..Default::default()
    }
}

pub fn mon_project(name: &str) -> MonProject {
    MonProject {
        name: Some(name.to_string()),
        ..Default::default()
    }
}

pub fn mon_group(name: &str, project_id: Option<i32>) -> MonGroup {
    MonGroup {
        name: Some(name.to_string()),
        mon_project_id: project_id,
        ..Default::default()
    }
}

pub fn mon_point(name: &str, group_id: Option<i32>) -> MonPoint {
    MonPoint {
        name: Some(name.to_string()),
        mon_group_id: group_id,
        ..Default::default()
    }
}

/// Create a stored user with a hashed password
pub fn test_user(user_name: &str, password: &str, role: Role) -> User {
    let salt = format!("salt-{}", user_name);
    User {
        id: UserId::new(),
        user_name: user_name.to_string(),
        password_hash: hash_password(password, &salt).unwrap(),
        password_salt: salt,
        role,
        authorized_projects: None,
        created_at: Utc::now(),
    }
}

/// An account request with name and both password fields
pub fn account_request(user_name: &str, password: &str, confirm_password: &str) -> AccountRequest {
    AccountRequest {
        user_name: Some(user_name.to_string()),
        password: Some(password.to_string()),
        confirm_password: Some(confirm_password.to_string()),
        ..Default::default()
    }
}
