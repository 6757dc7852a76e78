//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::{
    AccessToken, AreaDesc, AreaId, AreaKind, MonData, MonGroup, MonPoint, MonProject,
    MonitoringRecord, NewArea, NewUser, User, UserId,
};
use crate::error::DomainError;

/// Repository for territory, domain and project descriptors
#[async_trait]
pub trait AreaRepository: Send + Sync {
    /// List areas of one kind under a parent, in insertion order
    ///
    /// Territories are listed with `parent_id = None`.
    async fn list(
        &self,
        kind: AreaKind,
        parent_id: Option<&AreaId>,
    ) -> Result<Vec<AreaDesc>, DomainError>;

    /// Store a new area
    ///
    /// A sibling with the same name, or a second default among siblings,
    /// is rejected with `AlreadyExists`.
    async fn create(&self, area: &NewArea) -> Result<AreaDesc, DomainError>;
}

/// Repository for one kind of monitoring record
///
/// IDs are assigned by the store on insert.
#[async_trait]
pub trait MonitoringRepository<T: MonitoringRecord>: Send + Sync {
    /// All records, ordered by ID
    async fn find_all(&self) -> Result<Vec<T>, DomainError>;

    /// Find a record by ID
    async fn find_by_id(&self, id: i32) -> Result<Option<T>, DomainError>;

    /// Insert a record, ignoring its ID, and return it with the assigned one
    async fn create(&self, record: &T) -> Result<T, DomainError>;

    /// Replace the stored record with the same ID
    async fn update(&self, record: &T) -> Result<T, DomainError>;

    /// Delete a record, returning false if it did not exist
    async fn delete(&self, id: i32) -> Result<bool, DomainError>;
}

/// Repository for user accounts and their bearer tokens
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find a user by ID
    async fn find_user_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Find a user by exact user name
    async fn find_user_by_name(&self, user_name: &str) -> Result<Option<User>, DomainError>;

    /// All users in creation order
    async fn list_users(&self) -> Result<Vec<User>, DomainError>;

    /// Create a new user
    async fn create_user(&self, user: &NewUser) -> Result<User, DomainError>;

    /// Replace a user's password hash and salt
    async fn update_password(
        &self,
        id: &UserId,
        password_hash: &str,
        password_salt: &str,
    ) -> Result<(), DomainError>;

    /// Delete a user together with every token issued to them
    async fn delete_user(&self, id: &UserId) -> Result<(), DomainError>;

    /// Store an issued token
    async fn create_token(&self, token: &AccessToken) -> Result<(), DomainError>;

    /// Find a token by its hash
    async fn find_token(&self, token_hash: &str) -> Result<Option<AccessToken>, DomainError>;

    /// Delete every token that expired at or before `now`, returning the count
    async fn delete_expired_tokens(&self, now: DateTime<Utc>) -> Result<u64, DomainError>;
}

/// Storage for every kind of monitoring record
///
/// Lets one shared repository stand behind `dyn` in application state.
pub trait MonitoringStore:
    MonitoringRepository<MonProject>
    + MonitoringRepository<MonGroup>
    + MonitoringRepository<MonPoint>
    + MonitoringRepository<MonData>
{
}

impl<R> MonitoringStore for R where
    R: MonitoringRepository<MonProject>
        + MonitoringRepository<MonGroup>
        + MonitoringRepository<MonPoint>
        + MonitoringRepository<MonData>
{
}
