//! PostgreSQL adapter for AccountRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};

use crate::domain::entities::{AccessToken, NewUser, Role, User, UserId};
use crate::domain::ports::AccountRepository;
use crate::entity::{access_tokens, users};
use crate::error::DomainError;

/// PostgreSQL implementation of AccountRepository
pub struct PostgresAccountRepository {
    db: DatabaseConnection,
}

impl PostgresAccountRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn find_user_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let result = users::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        result.map(User::try_from).transpose()
    }

    async fn find_user_by_name(&self, user_name: &str) -> Result<Option<User>, DomainError> {
        let result = users::Entity::find()
            .filter(users::Column::UserName.eq(user_name))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        result.map(User::try_from).transpose()
    }

    async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        let results = users::Entity::find()
            .order_by_asc(users::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        results.into_iter().map(User::try_from).collect()
    }

    async fn create_user(&self, user: &NewUser) -> Result<User, DomainError> {
        let model = users::ActiveModel {
            id: Set(UserId::new().0),
            user_name: Set(user.user_name.clone()),
            password_hash: Set(user.password_hash.clone()),
            password_salt: Set(user.password_salt.clone()),
            role: Set(user.role.to_string()),
            authorized_projects: Set(user.authorized_projects.clone()),
            created_at: Set(Utc::now().fixed_offset()),
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            if e.to_string().contains("duplicate key") {
                DomainError::AlreadyExists(format!("User {} already exists", user.user_name))
            } else {
                DomainError::Database(e.to_string())
            }
        })?;

        User::try_from(result)
    }

    async fn update_password(
        &self,
        id: &UserId,
        password_hash: &str,
        password_salt: &str,
    ) -> Result<(), DomainError> {
        users::ActiveModel {
            id: Set(id.0),
            password_hash: Set(password_hash.to_string()),
            password_salt: Set(password_salt.to_string()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| match e {
            DbErr::RecordNotUpdated => DomainError::NotFound(format!("User {} not found", id)),
            e => DomainError::Database(e.to_string()),
        })?;

        Ok(())
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), DomainError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        access_tokens::Entity::delete_many()
            .filter(access_tokens::Column::UserId.eq(id.0))
            .exec(&txn)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let result = users::Entity::delete_by_id(id.0)
            .exec(&txn)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound(format!("User {} not found", id)));
        }

        txn.commit()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(())
    }

    async fn create_token(&self, token: &AccessToken) -> Result<(), DomainError> {
        let model = access_tokens::ActiveModel {
            token_hash: Set(token.token_hash.clone()),
            user_id: Set(token.user_id.0),
            expires_at: Set(token.expires_at.fixed_offset()),
        };

        model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(())
    }

    async fn find_token(&self, token_hash: &str) -> Result<Option<AccessToken>, DomainError> {
        let result = access_tokens::Entity::find_by_id(token_hash.to_string())
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| AccessToken {
            token_hash: m.token_hash,
            user_id: UserId(m.user_id),
            expires_at: m.expires_at.with_timezone(&Utc),
        }))
    }

    async fn delete_expired_tokens(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        let result = access_tokens::Entity::delete_many()
            .filter(access_tokens::Column::ExpiresAt.lte(now.fixed_offset()))
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.rows_affected)
    }
}

impl TryFrom<users::Model> for User {
    type Error = DomainError;

    fn try_from(m: users::Model) -> Result<Self, Self::Error> {
        let role = m.role.parse::<Role>().map_err(|_| {
            DomainError::Internal(format!("unknown role '{}' for user {}", m.role, m.user_name))
        })?;

        Ok(User {
            id: UserId(m.id),
            user_name: m.user_name,
            password_hash: m.password_hash,
            password_salt: m.password_salt,
            role,
            authorized_projects: m.authorized_projects,
            created_at: m.created_at.with_timezone(&Utc),
        })
    }
}
