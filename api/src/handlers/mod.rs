//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod accounts;
pub mod extract;
pub mod monitoring;
pub mod territories;
pub mod token;

pub use accounts::{add_user, change_password, get_users, get_users_full_info, remove_user};
pub use territories::{
    add_domain, add_project, add_territory, get_all_territory_descs, get_domain_desc,
    get_domain_descs, get_project_desc, get_project_descs, get_territory_desc,
    supported_domains, supported_projects, supported_territories,
};
pub use token::issue_token;
