//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and allow tests to verify behavior.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use crate::domain::entities::{
    AccessToken, AreaDesc, AreaId, AreaKind, MonData, MonGroup, MonPoint, MonProject,
    MonitoringRecord, NewArea, NewUser, User, UserId,
};
use crate::domain::ports::{AccountRepository, AreaRepository, MonitoringRepository};
use crate::error::DomainError;

// ============================================================================
// In-Memory Area Repository
// ============================================================================

/// Areas kept in insertion order
#[derive(Default)]
pub struct InMemoryAreaRepository {
    areas: Arc<RwLock<Vec<AreaDesc>>>,
}

impl InMemoryAreaRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with an area for testing
    pub fn with_area(self, area: AreaDesc) -> Self {
        self.areas.write().unwrap().push(area);
        self
    }
}

#[async_trait]
impl AreaRepository for InMemoryAreaRepository {
    async fn list(
        &self,
        kind: AreaKind,
        parent_id: Option<&AreaId>,
    ) -> Result<Vec<AreaDesc>, DomainError> {
        let areas = self.areas.read().unwrap();
        Ok(areas
            .iter()
            .filter(|a| a.kind == kind && a.parent_id.as_ref() == parent_id)
            .cloned()
            .collect())
    }

    async fn create(&self, area: &NewArea) -> Result<AreaDesc, DomainError> {
        let mut areas = self.areas.write().unwrap();
        if areas.iter().any(|a| a.id == area.id) {
            return Err(DomainError::Database(format!(
                "duplicate key value violates unique constraint: {}",
                area.id
            )));
        }

        // Mirrors the sibling unique indexes on the areas table
        let clash = areas.iter().any(|a| {
            a.kind == area.kind
                && a.parent_id == area.parent_id
                && (a.name == area.name || (a.is_default && area.is_default))
        });
        if clash {
            return Err(DomainError::AlreadyExists(format!(
                "{} '{}' already exists",
                area.kind.label(),
                area.name
            )));
        }

        let desc = AreaDesc {
            id: area.id.clone(),
            name: area.name.clone(),
            kind: area.kind,
            area_type: area.area_type.clone(),
            is_default: area.is_default,
            parent_id: area.parent_id.clone(),
            db_name: area.db_name.clone(),
        };
        areas.push(desc.clone());
        Ok(desc)
    }
}

// ============================================================================
// In-Memory Monitoring Repository
// ============================================================================

/// One table of monitoring records with its own ID sequence
pub struct InMemoryTable<T> {
    rows: RwLock<BTreeMap<i32, T>>,
    next_id: RwLock<i32>,
}

impl<T> Default for InMemoryTable<T> {
    fn default() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            next_id: RwLock::new(1),
        }
    }
}

impl<T: MonitoringRecord> InMemoryTable<T> {
    fn all(&self) -> Vec<T> {
        self.rows.read().unwrap().values().cloned().collect()
    }

    fn get(&self, id: i32) -> Option<T> {
        self.rows.read().unwrap().get(&id).cloned()
    }

    fn insert(&self, record: &T) -> T {
        let mut next_id = self.next_id.write().unwrap();
        let mut stored = record.clone();
        stored.set_id(*next_id);
        *next_id += 1;
        self.rows.write().unwrap().insert(stored.id(), stored.clone());
        stored
    }

    fn replace(&self, record: &T) -> Result<T, DomainError> {
        let mut rows = self.rows.write().unwrap();
        match rows.get_mut(&record.id()) {
            Some(row) => {
                *row = record.clone();
                Ok(record.clone())
            }
            None => Err(DomainError::NotFound(format!(
                "{} {} not found",
                T::LABEL,
                record.id()
            ))),
        }
    }

    fn remove(&self, id: i32) -> bool {
        self.rows.write().unwrap().remove(&id).is_some()
    }
}

#[derive(Default)]
pub struct InMemoryMonitoringRepository {
    projects: InMemoryTable<MonProject>,
    groups: InMemoryTable<MonGroup>,
    points: InMemoryTable<MonPoint>,
    data: InMemoryTable<MonData>,
}

impl InMemoryMonitoringRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

macro_rules! in_memory_monitoring_table {
    ($record:ty, $field:ident) => {
        #[async_trait]
        impl MonitoringRepository<$record> for InMemoryMonitoringRepository {
            async fn find_all(&self) -> Result<Vec<$record>, DomainError> {
                Ok(self.$field.all())
            }

            async fn find_by_id(&self, id: i32) -> Result<Option<$record>, DomainError> {
                Ok(self.$field.get(id))
            }

            async fn create(&self, record: &$record) -> Result<$record, DomainError> {
                Ok(self.$field.insert(record))
            }

            async fn update(&self, record: &$record) -> Result<$record, DomainError> {
                self.$field.replace(record)
            }

            async fn delete(&self, id: i32) -> Result<bool, DomainError> {
                Ok(self.$field.remove(id))
            }
        }
    };
}

in_memory_monitoring_table!(MonProject, projects);
in_memory_monitoring_table!(MonGroup, groups);
in_memory_monitoring_table!(MonPoint, points);
in_memory_monitoring_table!(MonData, data);

// ============================================================================
// In-Memory Account Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryAccountRepository {
    users: Arc<RwLock<Vec<User>>>,
    tokens: Arc<RwLock<HashMap<String, AccessToken>>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a user for testing
    pub fn with_user(self, user: User) -> Self {
        self.users.write().unwrap().push(user);
        self
    }

    /// Pre-populate with a token for testing
    pub fn with_token(self, token: AccessToken) -> Self {
        self.tokens
            .write()
            .unwrap()
            .insert(token.token_hash.clone(), token);
        self
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_user_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let users = self.users.read().unwrap();
        Ok(users.iter().find(|u| &u.id == id).cloned())
    }

    async fn find_user_by_name(&self, user_name: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().unwrap();
        Ok(users.iter().find(|u| u.user_name == user_name).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        Ok(self.users.read().unwrap().clone())
    }

    async fn create_user(&self, new_user: &NewUser) -> Result<User, DomainError> {
        let mut users = self.users.write().unwrap();
        if users.iter().any(|u| u.user_name == new_user.user_name) {
            return Err(DomainError::AlreadyExists(format!(
                "User {} already exists",
                new_user.user_name
            )));
        }

        let user = User {
            id: UserId::new(),
            user_name: new_user.user_name.clone(),
            password_hash: new_user.password_hash.clone(),
            password_salt: new_user.password_salt.clone(),
            role: new_user.role,
            authorized_projects: new_user.authorized_projects.clone(),
            created_at: Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn update_password(
        &self,
        id: &UserId,
        password_hash: &str,
        password_salt: &str,
    ) -> Result<(), DomainError> {
        let mut users = self.users.write().unwrap();
        let user = users
            .iter_mut()
            .find(|u| &u.id == id)
            .ok_or_else(|| DomainError::NotFound(format!("User {} not found", id)))?;
        user.password_hash = password_hash.to_string();
        user.password_salt = password_salt.to_string();
        Ok(())
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), DomainError> {
        let mut users = self.users.write().unwrap();
        let mut tokens = self.tokens.write().unwrap();

        let before = users.len();
        users.retain(|u| &u.id != id);
        if users.len() == before {
            return Err(DomainError::NotFound(format!("User {} not found", id)));
        }
        tokens.retain(|_, t| &t.user_id != id);
        Ok(())
    }

    async fn create_token(&self, token: &AccessToken) -> Result<(), DomainError> {
        self.tokens
            .write()
            .unwrap()
            .insert(token.token_hash.clone(), token.clone());
        Ok(())
    }

    async fn find_token(&self, token_hash: &str) -> Result<Option<AccessToken>, DomainError> {
        Ok(self.tokens.read().unwrap().get(token_hash).cloned())
    }

    async fn delete_expired_tokens(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        let mut tokens = self.tokens.write().unwrap();
        let before = tokens.len();
        tokens.retain(|_, t| !t.is_expired(now));
        Ok((before - tokens.len()) as u64)
    }
}
