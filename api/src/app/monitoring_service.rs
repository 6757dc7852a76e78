//! Monitoring service
//!
//! CRUD over monitoring projects, groups, points and readings, plus
//! assembly of a project's group/point tree.

use std::sync::Arc;

use crate::domain::entities::{
    parse_id_list, MonGroup, MonGroupTree, MonPoint, MonProject, MonProjectTree,
    MonitoringRecord,
};
use crate::domain::ports::MonitoringRepository;
use crate::error::AppError;

/// Service for monitoring records
pub struct MonitoringService<MR: ?Sized> {
    records: Arc<MR>,
}

impl<MR: ?Sized> MonitoringService<MR> {
    pub fn new(records: Arc<MR>) -> Self {
        Self { records }
    }

    /// All records of one kind
    pub async fn list<T>(&self) -> Result<Vec<T>, AppError>
    where
        T: MonitoringRecord,
        MR: MonitoringRepository<T>,
    {
        Ok(<MR as MonitoringRepository<T>>::find_all(self.records.as_ref()).await?)
    }

    /// One record by ID
    pub async fn get<T>(&self, id: i32) -> Result<T, AppError>
    where
        T: MonitoringRecord,
        MR: MonitoringRepository<T>,
    {
        <MR as MonitoringRepository<T>>::find_by_id(self.records.as_ref(), id)
            .await?
            .ok_or_else(|| not_found::<T>(id))
    }

    /// Store a new record; any client-supplied ID is replaced
    pub async fn add<T>(&self, mut record: T) -> Result<T, AppError>
    where
        T: MonitoringRecord,
        MR: MonitoringRepository<T>,
    {
        record.set_id(0);
        let created = <MR as MonitoringRepository<T>>::create(self.records.as_ref(), &record).await?;
        tracing::debug!(kind = T::LABEL, id = created.id(), "Monitoring record added");
        Ok(created)
    }

    /// Apply the fields present in `patch` to the stored record with its ID
    pub async fn modify<T>(&self, patch: T) -> Result<T, AppError>
    where
        T: MonitoringRecord,
        MR: MonitoringRepository<T>,
    {
        let id = patch.id();
        let mut stored = <MR as MonitoringRepository<T>>::find_by_id(self.records.as_ref(), id)
            .await?
            .ok_or_else(|| not_found::<T>(id))?;

        stored.merge(patch);
        let updated = <MR as MonitoringRepository<T>>::update(self.records.as_ref(), &stored).await?;
        tracing::debug!(kind = T::LABEL, id, "Monitoring record modified");
        Ok(updated)
    }

    /// Delete a record, returning what was removed
    pub async fn remove<T>(&self, id: i32) -> Result<T, AppError>
    where
        T: MonitoringRecord,
        MR: MonitoringRepository<T>,
    {
        let stored = self.get::<T>(id).await?;
        if !<MR as MonitoringRepository<T>>::delete(self.records.as_ref(), id).await? {
            return Err(not_found::<T>(id));
        }
        tracing::debug!(kind = T::LABEL, id, "Monitoring record removed");
        Ok(stored)
    }

    /// A project with its groups and each group's points
    ///
    /// A child belongs to its parent when it references the parent's ID or
    /// when the parent lists it in `MonGroupIDs` / `MonPointIDs`.
    pub async fn project_tree(&self, id: i32) -> Result<MonProjectTree, AppError>
    where
        MR: MonitoringRepository<MonProject>
            + MonitoringRepository<MonGroup>
            + MonitoringRepository<MonPoint>,
    {
        let project = self.get::<MonProject>(id).await?;
        let groups = self.list::<MonGroup>().await?;
        let points = self.list::<MonPoint>().await?;

        let listed_groups = parse_id_list(project.mon_group_ids.as_deref())?;
        let mut tree = Vec::new();
        for group in groups
            .into_iter()
            .filter(|g| g.mon_project_id == Some(project.id) || listed_groups.contains(&g.id))
        {
            let listed_points = parse_id_list(group.mon_point_ids.as_deref())?;
            let points = points
                .iter()
                .filter(|p| p.mon_group_id == Some(group.id) || listed_points.contains(&p.id))
                .cloned()
                .collect();
            tree.push(MonGroupTree { group, points });
        }

        Ok(MonProjectTree {
            project,
            groups: tree,
        })
    }
}

fn not_found<T: MonitoringRecord>(id: i32) -> AppError {
    AppError::NotFound(format!("{} {} not found", T::LABEL, id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::MonData;
    use crate::error::DomainError;
    use crate::test_utils::{mon_group, mon_point, mon_project, InMemoryMonitoringRepository};

    fn create_service() -> MonitoringService<InMemoryMonitoringRepository> {
        MonitoringService::new(Arc::new(InMemoryMonitoringRepository::new()))
    }

    #[tokio::test]
    async fn add_assigns_fresh_ids() {
        let service = create_service();

        let mut request = mon_project("Line 2");
        request.id = 99;
        let first = service.add(request).await.unwrap();
        let second = service.add(mon_project("Line 3")).await.unwrap();

        assert_ne!(first.id, 99);
        assert_ne!(first.id, second.id);
        assert_eq!(service.list::<MonProject>().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn get_unknown_record_is_not_found() {
        let service = create_service();
        let result = service.get::<MonGroup>(42).await;
        assert!(matches!(result, Err(AppError::NotFound(msg)) if msg.contains("MonGroup")));
    }

    #[tokio::test]
    async fn modify_merges_present_fields() {
        let service = create_service();
        let mut point = mon_point("P1", None);
        point.unit = Some("mm".to_string());
        let stored = service.add(point).await.unwrap();

        let patch = MonPoint {
            id: stored.id,
            remark: Some("recalibrated".to_string()),
            ..Default::default()
        };
        let updated = service.modify(patch).await.unwrap();

        assert_eq!(updated.name.as_deref(), Some("P1"));
        assert_eq!(updated.unit.as_deref(), Some("mm"));
        assert_eq!(updated.remark.as_deref(), Some("recalibrated"));
        assert_eq!(service.get::<MonPoint>(stored.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn modify_unknown_record_is_not_found() {
        let service = create_service();
        let patch = MonData {
            id: 5,
            ..Default::default()
        };
        assert!(matches!(
            service.modify(patch).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn remove_returns_removed_record() {
        let service = create_service();
        let group = service.add(mon_group("G1", None)).await.unwrap();

        let removed = service.remove::<MonGroup>(group.id).await.unwrap();
        assert_eq!(removed, group);
        assert!(service.list::<MonGroup>().await.unwrap().is_empty());

        assert!(matches!(
            service.remove::<MonGroup>(group.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn record_kinds_are_independent() {
        let service = create_service();
        service.add(mon_project("Line 2")).await.unwrap();
        service.add(MonData::default()).await.unwrap();

        assert_eq!(service.list::<MonProject>().await.unwrap().len(), 1);
        assert_eq!(service.list::<MonData>().await.unwrap().len(), 1);
        assert!(service.list::<MonPoint>().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn project_tree_follows_foreign_keys() {
        let service = create_service();
        let project = service.add(mon_project("Line 2")).await.unwrap();
        let other = service.add(mon_project("Line 3")).await.unwrap();

        let g1 = service
            .add(mon_group("Settlement", Some(project.id)))
            .await
            .unwrap();
        let g2 = service
            .add(mon_group("Convergence", Some(project.id)))
            .await
            .unwrap();
        service
            .add(mon_group("Elsewhere", Some(other.id)))
            .await
            .unwrap();

        service.add(mon_point("S1", Some(g1.id))).await.unwrap();
        service.add(mon_point("S2", Some(g1.id))).await.unwrap();
        service.add(mon_point("C1", Some(g2.id))).await.unwrap();
        service.add(mon_point("Loose", None)).await.unwrap();

        let tree = service.project_tree(project.id).await.unwrap();

        assert_eq!(tree.project.id, project.id);
        assert_eq!(tree.groups.len(), 2);
        assert_eq!(tree.groups[0].group.id, g1.id);
        assert_eq!(tree.groups[0].points.len(), 2);
        assert_eq!(tree.groups[1].points.len(), 1);
        assert_eq!(tree.groups[1].points[0].name.as_deref(), Some("C1"));
    }

    #[tokio::test]
    async fn project_tree_includes_listed_children() {
        let service = create_service();
        let group = service.add(mon_group("Listed", None)).await.unwrap();
        let point = service.add(mon_point("P", None)).await.unwrap();

        let mut listed = group.clone();
        listed.mon_point_ids = Some(point.id.to_string());
        service.modify(listed).await.unwrap();

        let mut project = mon_project("Line 4");
        project.mon_group_ids = Some(format!("{},", group.id));
        let project = service.add(project).await.unwrap();

        let tree = service.project_tree(project.id).await.unwrap();

        assert_eq!(tree.groups.len(), 1);
        assert_eq!(tree.groups[0].points[0].id, point.id);
    }

    #[tokio::test]
    async fn project_tree_rejects_malformed_id_list() {
        let service = create_service();
        let mut project = mon_project("Broken");
        project.mon_group_ids = Some("1,x".to_string());
        let project = service.add(project).await.unwrap();

        let result = service.project_tree(project.id).await;

        assert!(matches!(result, Err(AppError::Domain(DomainError::Validation(_)))));
    }
}
