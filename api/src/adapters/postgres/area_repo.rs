//! PostgreSQL adapter for AreaRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::entities::{AreaDesc, AreaId, AreaKind, NewArea};
use crate::domain::ports::AreaRepository;
use crate::entity::areas;
use crate::error::DomainError;

/// PostgreSQL implementation of AreaRepository
pub struct PostgresAreaRepository {
    db: DatabaseConnection,
}

impl PostgresAreaRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AreaRepository for PostgresAreaRepository {
    async fn list(
        &self,
        kind: AreaKind,
        parent_id: Option<&AreaId>,
    ) -> Result<Vec<AreaDesc>, DomainError> {
        let query = areas::Entity::find().filter(areas::Column::Kind.eq(kind.to_string()));
        let query = match parent_id {
            Some(parent) => query.filter(areas::Column::ParentId.eq(parent.as_str())),
            None => query.filter(areas::Column::ParentId.is_null()),
        };

        let results = query
            .order_by_asc(areas::Column::Seq)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        results.into_iter().map(AreaDesc::try_from).collect()
    }

    async fn create(&self, area: &NewArea) -> Result<AreaDesc, DomainError> {
        let model = areas::ActiveModel {
            id: Set(area.id.as_str().to_string()),
            name: Set(area.name.clone()),
            kind: Set(area.kind.to_string()),
            area_type: Set(area.area_type.clone()),
            is_default: Set(area.is_default),
            parent_id: Set(area.parent_id.as_ref().map(|p| p.as_str().to_string())),
            db_name: Set(area.db_name.clone()),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            if e.to_string().contains("duplicate key") {
                DomainError::AlreadyExists(format!(
                    "{} '{}' already exists",
                    area.kind.label(),
                    area.name
                ))
            } else {
                DomainError::Database(e.to_string())
            }
        })?;

        AreaDesc::try_from(result)
    }
}

impl TryFrom<areas::Model> for AreaDesc {
    type Error = DomainError;

    fn try_from(m: areas::Model) -> Result<Self, Self::Error> {
        let kind: AreaKind = m
            .kind
            .parse()
            .map_err(|_| DomainError::Internal(format!("unknown area kind '{}'", m.kind)))?;

        Ok(AreaDesc {
            id: AreaId(m.id),
            name: m.name,
            kind,
            area_type: m.area_type,
            is_default: m.is_default,
            parent_id: m.parent_id.map(AreaId),
            db_name: m.db_name,
        })
    }
}
