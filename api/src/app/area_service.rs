//! Area registry service
//!
//! Maintains the territory → domain/project hierarchy. Lookups take a single
//! name-or-ID string; at the root an unmatched lookup falls back to the
//! default territory.

use std::sync::Arc;

use crate::domain::entities::{
    AreaDesc, AreaId, AreaKind, AreaRequest, NewArea, TerritoryDesc, SIMPLE_TERRITORY,
};
use crate::domain::ports::AreaRepository;
use crate::domain::resolver::{resolve, Fallback};
use crate::error::{AppError, DomainError};

/// Message reported when a child's parent cannot be resolved
pub const NO_TERRITORY: &str = "Territory null and no default";

/// Service for the area hierarchy
pub struct AreaService<AR>
where
    AR: AreaRepository + ?Sized,
{
    areas: Arc<AR>,
    default_database: String,
}

impl<AR> AreaService<AR>
where
    AR: AreaRepository + ?Sized,
{
    pub fn new(areas: Arc<AR>, default_database: String) -> Self {
        Self {
            areas,
            default_database,
        }
    }

    /// Subtype tags that may be used for the given kind
    pub fn supported_types(&self, kind: AreaKind) -> Vec<String> {
        kind.supported_types()
            .iter()
            .map(|t| t.to_string())
            .collect()
    }

    /// All territories in insertion order, each with its domains and projects
    pub async fn list_territories(&self) -> Result<Vec<TerritoryDesc>, AppError> {
        let territories = self.areas.list(AreaKind::Territory, None).await?;

        let mut result = Vec::with_capacity(territories.len());
        for territory in territories {
            result.push(self.with_children(territory).await?);
        }
        Ok(result)
    }

    /// Resolve a territory by ID, then name, then the default flag
    pub async fn resolve_territory(
        &self,
        name_or_id: Option<&str>,
    ) -> Result<Option<AreaDesc>, AppError> {
        let territories = self.areas.list(AreaKind::Territory, None).await?;
        Ok(resolve(&territories, name_or_id, Fallback::Default).cloned())
    }

    /// Resolve a territory and load its children
    pub async fn get_territory(&self, name_or_id: &str) -> Result<TerritoryDesc, AppError> {
        let territory = self
            .resolve_territory(Some(name_or_id))
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Territory {} not found", name_or_id)))?;

        self.with_children(territory).await
    }

    /// Add a territory
    ///
    /// The type defaults to `SimpleTerritory` and the database name to the
    /// server default.
    pub async fn add_territory(&self, request: &AreaRequest) -> Result<AreaDesc, AppError> {
        let name = required_name(request)?;
        let siblings = self.areas.list(AreaKind::Territory, None).await?;
        check_siblings(AreaKind::Territory, &siblings, name, request.is_default)?;

        let new_area = NewArea {
            id: AreaId::new(),
            name: name.to_string(),
            kind: AreaKind::Territory,
            area_type: Some(
                request
                    .area_type
                    .clone()
                    .unwrap_or_else(|| SIMPLE_TERRITORY.to_string()),
            ),
            is_default: request.is_default,
            parent_id: None,
            db_name: request
                .db_name
                .clone()
                .unwrap_or_else(|| self.default_database.clone()),
        };

        let territory = self.areas.create(&new_area).await?;
        tracing::info!(territory = %territory.id, name = %territory.name, "Territory added");
        Ok(territory)
    }

    /// Add a domain under the territory named by `ParentID`
    pub async fn add_domain(&self, request: &AreaRequest) -> Result<AreaDesc, AppError> {
        self.add_child(AreaKind::Domain, request).await
    }

    /// Add a project under the territory named by `ParentID`
    pub async fn add_project(&self, request: &AreaRequest) -> Result<AreaDesc, AppError> {
        self.add_child(AreaKind::Project, request).await
    }

    /// Find a domain by ID or name within a territory
    pub async fn get_domain(
        &self,
        name_or_id: &str,
        parent_name_or_id: Option<&str>,
    ) -> Result<AreaDesc, AppError> {
        self.get_child(AreaKind::Domain, name_or_id, parent_name_or_id)
            .await
    }

    /// Find a project by ID or name within a territory
    pub async fn get_project(
        &self,
        name_or_id: &str,
        parent_name_or_id: Option<&str>,
    ) -> Result<AreaDesc, AppError> {
        self.get_child(AreaKind::Project, name_or_id, parent_name_or_id)
            .await
    }

    /// Children of one kind under a resolved territory
    pub async fn list_children(
        &self,
        kind: AreaKind,
        parent_name_or_id: Option<&str>,
    ) -> Result<Vec<AreaDesc>, AppError> {
        let territory = self.require_territory(parent_name_or_id).await?;
        Ok(self.areas.list(kind, Some(&territory.id)).await?)
    }

    async fn add_child(&self, kind: AreaKind, request: &AreaRequest) -> Result<AreaDesc, AppError> {
        let name = required_name(request)?;
        let territory = self
            .require_territory(request.parent_id.as_deref())
            .await?;

        let siblings = self.areas.list(kind, Some(&territory.id)).await?;
        check_siblings(kind, &siblings, name, request.is_default)?;

        let new_area = NewArea {
            id: AreaId::new(),
            name: name.to_string(),
            kind,
            area_type: request.area_type.clone(),
            is_default: request.is_default,
            parent_id: Some(territory.id.clone()),
            db_name: request
                .db_name
                .clone()
                .unwrap_or_else(|| territory.db_name.clone()),
        };

        let area = self.areas.create(&new_area).await?;
        tracing::info!(
            kind = %kind,
            id = %area.id,
            name = %area.name,
            territory = %territory.id,
            "Area added"
        );
        Ok(area)
    }

    async fn get_child(
        &self,
        kind: AreaKind,
        name_or_id: &str,
        parent_name_or_id: Option<&str>,
    ) -> Result<AreaDesc, AppError> {
        let children = self.list_children(kind, parent_name_or_id).await?;

        resolve(&children, Some(name_or_id), Fallback::None)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("{} {} not found", kind.label(), name_or_id)))
    }

    async fn require_territory(&self, name_or_id: Option<&str>) -> Result<AreaDesc, AppError> {
        self.resolve_territory(name_or_id)
            .await?
            .ok_or_else(|| AppError::Domain(DomainError::NotFound(NO_TERRITORY.to_string())))
    }

    async fn with_children(&self, territory: AreaDesc) -> Result<TerritoryDesc, AppError> {
        let domains = self
            .areas
            .list(AreaKind::Domain, Some(&territory.id))
            .await?;
        let projects = self
            .areas
            .list(AreaKind::Project, Some(&territory.id))
            .await?;

        Ok(TerritoryDesc {
            area: territory,
            domains,
            projects,
        })
    }
}

fn required_name(request: &AreaRequest) -> Result<&str, AppError> {
    request
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::BadRequest("Argument Null".to_string()))
}

/// Reject a duplicate name or a second default among siblings
fn check_siblings(
    kind: AreaKind,
    siblings: &[AreaDesc],
    name: &str,
    is_default: bool,
) -> Result<(), AppError> {
    if siblings.iter().any(|s| s.name == name) {
        return Err(AppError::Domain(DomainError::AlreadyExists(format!(
            "{} '{}' already exists",
            kind.label(),
            name
        ))));
    }

    if is_default {
        if let Some(existing) = siblings.iter().find(|s| s.is_default) {
            return Err(AppError::Domain(DomainError::AlreadyExists(format!(
                "Default {} '{}' already exists",
                kind,
                existing.name
            ))));
        }
    }

    Ok(())
}
