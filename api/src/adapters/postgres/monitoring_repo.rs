//! PostgreSQL adapter for the monitoring tables

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, QueryOrder, Set,
};

use crate::domain::entities::{MonData, MonGroup, MonPoint, MonProject, MonitoringRecord};
use crate::domain::ports::MonitoringRepository;
use crate::entity::{mon_data, mon_groups, mon_points, mon_projects};
use crate::error::DomainError;

/// PostgreSQL implementation of MonitoringRepository for every record type
pub struct PostgresMonitoringRepository {
    db: DatabaseConnection,
}

impl PostgresMonitoringRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn update_error<T: MonitoringRecord>(id: i32, e: DbErr) -> DomainError {
    match e {
        DbErr::RecordNotUpdated => DomainError::NotFound(format!("{} {} not found", T::LABEL, id)),
        e => DomainError::Database(e.to_string()),
    }
}

macro_rules! postgres_monitoring_table {
    ($record:ty, $table:ident) => {
        #[async_trait]
        impl MonitoringRepository<$record> for PostgresMonitoringRepository {
            async fn find_all(&self) -> Result<Vec<$record>, DomainError> {
                let results = $table::Entity::find()
                    .order_by_asc($table::Column::Id)
                    .all(&self.db)
                    .await
                    .map_err(|e| DomainError::Database(e.to_string()))?;

                Ok(results.into_iter().map(|m| m.into()).collect())
            }

            async fn find_by_id(&self, id: i32) -> Result<Option<$record>, DomainError> {
                let result = $table::Entity::find_by_id(id)
                    .one(&self.db)
                    .await
                    .map_err(|e| DomainError::Database(e.to_string()))?;

                Ok(result.map(|m| m.into()))
            }

            async fn create(&self, record: &$record) -> Result<$record, DomainError> {
                let mut model: $table::ActiveModel = record.into();
                model.id = NotSet;

                let result = model
                    .insert(&self.db)
                    .await
                    .map_err(|e| DomainError::Database(e.to_string()))?;

                Ok(result.into())
            }

            async fn update(&self, record: &$record) -> Result<$record, DomainError> {
                let model: $table::ActiveModel = record.into();

                let result = model
                    .update(&self.db)
                    .await
                    .map_err(|e| update_error::<$record>(record.id, e))?;

                Ok(result.into())
            }

            async fn delete(&self, id: i32) -> Result<bool, DomainError> {
                let result = $table::Entity::delete_by_id(id)
                    .exec(&self.db)
                    .await
                    .map_err(|e| DomainError::Database(e.to_string()))?;

                Ok(result.rows_affected > 0)
            }
        }
    };
}

postgres_monitoring_table!(MonProject, mon_projects);
postgres_monitoring_table!(MonGroup, mon_groups);
postgres_monitoring_table!(MonPoint, mon_points);
postgres_monitoring_table!(MonData, mon_data);

// ============================================================================
// Model conversions
// ============================================================================

impl From<mon_projects::Model> for MonProject {
    fn from(m: mon_projects::Model) -> Self {
        MonProject {
            id: m.id,
            name: m.name,
            description: m.description,
            mon_project_type: m.mon_project_type,
            ref_obj_id: m.ref_obj_id,
            mon_group_ids: m.mon_group_ids,
            company_info_id: m.company_info_id,
            per_info_id: m.per_info_id,
            mon_inst_info_ids: m.mon_inst_info_ids,
            file_ids: m.file_ids,
            remark: m.remark,
        }
    }
}

impl From<&MonProject> for mon_projects::ActiveModel {
    fn from(r: &MonProject) -> Self {
        mon_projects::ActiveModel {
            id: Set(r.id),
            name: Set(r.name.clone()),
            description: Set(r.description.clone()),
            mon_project_type: Set(r.mon_project_type),
            ref_obj_id: Set(r.ref_obj_id),
            mon_group_ids: Set(r.mon_group_ids.clone()),
            company_info_id: Set(r.company_info_id),
            per_info_id: Set(r.per_info_id),
            mon_inst_info_ids: Set(r.mon_inst_info_ids.clone()),
            file_ids: Set(r.file_ids.clone()),
            remark: Set(r.remark.clone()),
        }
    }
}

impl From<mon_groups::Model> for MonGroup {
    fn from(m: mon_groups::Model) -> Self {
        MonGroup {
            id: m.id,
            name: m.name,
            description: m.description,
            mon_group_type: m.mon_group_type,
            mon_project_id: m.mon_project_id,
            ref_obj_id: m.ref_obj_id,
            mon_point_ids: m.mon_point_ids,
            ref_specifications: m.ref_specifications,
            per_info_id: m.per_info_id,
            file_ids: m.file_ids,
            remark: m.remark,
        }
    }
}

impl From<&MonGroup> for mon_groups::ActiveModel {
    fn from(r: &MonGroup) -> Self {
        mon_groups::ActiveModel {
            id: Set(r.id),
            name: Set(r.name.clone()),
            description: Set(r.description.clone()),
            mon_group_type: Set(r.mon_group_type),
            mon_project_id: Set(r.mon_project_id),
            ref_obj_id: Set(r.ref_obj_id),
            mon_point_ids: Set(r.mon_point_ids.clone()),
            ref_specifications: Set(r.ref_specifications.clone()),
            per_info_id: Set(r.per_info_id),
            file_ids: Set(r.file_ids.clone()),
            remark: Set(r.remark.clone()),
        }
    }
}

impl From<mon_points::Model> for MonPoint {
    fn from(m: mon_points::Model) -> Self {
        MonPoint {
            id: m.id,
            name: m.name,
            description: m.description,
            mon_point_type: m.mon_point_type,
            mon_group_id: m.mon_group_id,
            dac_id: m.dac_id,
            sensor_name: m.sensor_name,
            component: m.component,
            unit: m.unit,
            x_coordinate: m.x_coordinate,
            y_coordinate: m.y_coordinate,
            z_coordinate: m.z_coordinate,
            ini_value: m.ini_value,
            s_time: m.s_time,
            per_info_id: m.per_info_id,
            file_ids: m.file_ids,
            remark: m.remark,
        }
    }
}

impl From<&MonPoint> for mon_points::ActiveModel {
    fn from(r: &MonPoint) -> Self {
        mon_points::ActiveModel {
            id: Set(r.id),
            name: Set(r.name.clone()),
            description: Set(r.description.clone()),
            mon_point_type: Set(r.mon_point_type),
            mon_group_id: Set(r.mon_group_id),
            dac_id: Set(r.dac_id),
            sensor_name: Set(r.sensor_name.clone()),
            component: Set(r.component.clone()),
            unit: Set(r.unit.clone()),
            x_coordinate: Set(r.x_coordinate),
            y_coordinate: Set(r.y_coordinate),
            z_coordinate: Set(r.z_coordinate),
            ini_value: Set(r.ini_value),
            s_time: Set(r.s_time),
            per_info_id: Set(r.per_info_id),
            file_ids: Set(r.file_ids.clone()),
            remark: Set(r.remark.clone()),
        }
    }
}

impl From<mon_data::Model> for MonData {
    fn from(m: mon_data::Model) -> Self {
        MonData {
            id: m.id,
            sensor_name: m.sensor_name,
            part: m.part,
            acq_time: m.acq_time,
            rec_time: m.rec_time,
            value: m.value,
            data: m.data,
            curr_variation: m.curr_variation,
            accu_variation: m.accu_variation,
            variation_rate: m.variation_rate,
            value_per_design: m.value_per_design,
            remark: m.remark,
        }
    }
}

impl From<&MonData> for mon_data::ActiveModel {
    fn from(r: &MonData) -> Self {
        mon_data::ActiveModel {
            id: Set(r.id),
            sensor_name: Set(r.sensor_name.clone()),
            part: Set(r.part.clone()),
            acq_time: Set(r.acq_time),
            rec_time: Set(r.rec_time),
            value: Set(r.value),
            data: Set(r.data),
            curr_variation: Set(r.curr_variation),
            accu_variation: Set(r.accu_variation),
            variation_rate: Set(r.variation_rate),
            value_per_design: Set(r.value_per_design),
            remark: Set(r.remark.clone()),
        }
    }
}
