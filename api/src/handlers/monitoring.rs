//! Monitoring handlers
//!
//! The same five operations exist for every record type; routes bind the
//! generic handlers to a concrete record, e.g. `get_all::<MonGroup>`.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{de::DeserializeOwned, Deserialize};

use crate::domain::entities::{MonProjectTree, MonitoringRecord};
use crate::domain::ports::{MonitoringRepository, MonitoringStore};
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct IdQuery {
    #[serde(alias = "ID")]
    pub id: i32,
}

/// GET api/Monitoring/GetAllMon{X}s
pub async fn get_all<T>(State(state): State<AppState>) -> Result<Json<Vec<T::View>>, AppError>
where
    T: MonitoringRecord,
    dyn MonitoringStore: MonitoringRepository<T>,
{
    let records = state.monitoring_service.list::<T>().await?;
    Ok(Json(records.into_iter().map(T::into_view).collect()))
}

/// GET api/Monitoring/GetMon{X}ByID?id=
pub async fn get_by_id<T>(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Json<T::View>, AppError>
where
    T: MonitoringRecord,
    dyn MonitoringStore: MonitoringRepository<T>,
{
    Ok(Json(state.monitoring_service.get::<T>(query.id).await?.into_view()))
}

/// POST api/Monitoring/AddMon{X}
pub async fn add<T>(
    State(state): State<AppState>,
    Json(record): Json<T>,
) -> Result<Json<T::View>, AppError>
where
    T: MonitoringRecord + DeserializeOwned,
    dyn MonitoringStore: MonitoringRepository<T>,
{
    Ok(Json(state.monitoring_service.add(record).await?.into_view()))
}

/// PUT api/Monitoring/ModifyMon{X}
pub async fn modify<T>(
    State(state): State<AppState>,
    Json(patch): Json<T>,
) -> Result<Json<T::View>, AppError>
where
    T: MonitoringRecord + DeserializeOwned,
    dyn MonitoringStore: MonitoringRepository<T>,
{
    Ok(Json(state.monitoring_service.modify(patch).await?.into_view()))
}

/// DELETE api/Monitoring/RemoveMon{X}?id=
pub async fn remove<T>(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Json<T::View>, AppError>
where
    T: MonitoringRecord,
    dyn MonitoringStore: MonitoringRepository<T>,
{
    Ok(Json(state.monitoring_service.remove::<T>(query.id).await?.into_view()))
}

/// GET api/Monitoring/GetMonProjectTree?id=
pub async fn get_project_tree(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Json<MonProjectTree>, AppError> {
    Ok(Json(state.monitoring_service.project_tree(query.id).await?))
}
