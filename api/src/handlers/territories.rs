//! Territory handlers
//!
//! Endpoints under `api/Territories` for the territory/domain/project
//! hierarchy.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::domain::entities::{AreaDesc, AreaKind, AreaRequest, TerritoryDesc};
use crate::error::AppError;
use crate::AppState;

/// Query parameters naming an area and, optionally, its territory
#[derive(Debug, Default, Deserialize)]
pub struct NameOrIdQuery {
    #[serde(rename = "NameOrID")]
    pub name_or_id: Option<String>,
    #[serde(rename = "ParentNameOrID")]
    pub parent_name_or_id: Option<String>,
}

impl NameOrIdQuery {
    /// The required `NameOrID` parameter
    fn name_or_id(&self) -> Result<&str, AppError> {
        self.name_or_id
            .as_deref()
            .ok_or_else(|| AppError::BadRequest("Argument Null".to_string()))
    }
}

/// GET api/Territories/SupportedTerritories
pub async fn supported_territories(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.area_service.supported_types(AreaKind::Territory))
}

/// GET api/Territories/SupportedDomains
pub async fn supported_domains(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.area_service.supported_types(AreaKind::Domain))
}

/// GET api/Territories/SupportedProjects
pub async fn supported_projects(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.area_service.supported_types(AreaKind::Project))
}

/// GET api/Territories/GetAllTerritoryDescs
pub async fn get_all_territory_descs(
    State(state): State<AppState>,
) -> Result<Json<Vec<TerritoryDesc>>, AppError> {
    Ok(Json(state.area_service.list_territories().await?))
}

/// GET api/Territories/GetTerritoryDesc?NameOrID=
///
/// Falls back to the default territory when nothing matches. The parameter
/// itself is required.
pub async fn get_territory_desc(
    State(state): State<AppState>,
    Query(query): Query<NameOrIdQuery>,
) -> Result<Json<TerritoryDesc>, AppError> {
    Ok(Json(
        state.area_service.get_territory(query.name_or_id()?).await?,
    ))
}

/// POST api/Territories/AddTerritory
pub async fn add_territory(
    State(state): State<AppState>,
    Json(request): Json<AreaRequest>,
) -> Result<Json<AreaDesc>, AppError> {
    Ok(Json(state.area_service.add_territory(&request).await?))
}

/// POST api/Territories/AddDomain
pub async fn add_domain(
    State(state): State<AppState>,
    Json(request): Json<AreaRequest>,
) -> Result<Json<AreaDesc>, AppError> {
    Ok(Json(state.area_service.add_domain(&request).await?))
}

/// POST api/Territories/AddProject
pub async fn add_project(
    State(state): State<AppState>,
    Json(request): Json<AreaRequest>,
) -> Result<Json<AreaDesc>, AppError> {
    Ok(Json(state.area_service.add_project(&request).await?))
}

/// GET api/Territories/GetDomainDesc?NameOrID=&ParentNameOrID=
pub async fn get_domain_desc(
    State(state): State<AppState>,
    Query(query): Query<NameOrIdQuery>,
) -> Result<Json<AreaDesc>, AppError> {
    let domain = state
        .area_service
        .get_domain(query.name_or_id()?, query.parent_name_or_id.as_deref())
        .await?;
    Ok(Json(domain))
}

/// GET api/Territories/GetProjectDesc?NameOrID=&ParentNameOrID=
pub async fn get_project_desc(
    State(state): State<AppState>,
    Query(query): Query<NameOrIdQuery>,
) -> Result<Json<AreaDesc>, AppError> {
    let project = state
        .area_service
        .get_project(query.name_or_id()?, query.parent_name_or_id.as_deref())
        .await?;
    Ok(Json(project))
}

/// GET api/Territories/GetDomainDescs?ParentNameOrID=
pub async fn get_domain_descs(
    State(state): State<AppState>,
    Query(query): Query<NameOrIdQuery>,
) -> Result<Json<Vec<AreaDesc>>, AppError> {
    let domains = state
        .area_service
        .list_children(AreaKind::Domain, query.parent_name_or_id.as_deref())
        .await?;
    Ok(Json(domains))
}

/// GET api/Territories/GetProjectDescs?ParentNameOrID=
pub async fn get_project_descs(
    State(state): State<AppState>,
    Query(query): Query<NameOrIdQuery>,
) -> Result<Json<Vec<AreaDesc>>, AppError> {
    let projects = state
        .area_service
        .list_children(AreaKind::Project, query.parent_name_or_id.as_deref())
        .await?;
    Ok(Json(projects))
}
