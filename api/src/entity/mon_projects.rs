use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "mon_projects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub mon_project_type: Option<i32>,
    pub ref_obj_id: Option<i32>,
    #[sea_orm(column_type = "Text", nullable)]
    pub mon_group_ids: Option<String>,
    pub company_info_id: Option<i32>,
    pub per_info_id: Option<i32>,
    #[sea_orm(column_type = "Text", nullable)]
    pub mon_inst_info_ids: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub file_ids: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub remark: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
