use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "mon_groups")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub mon_group_type: Option<i32>,
    #[sea_orm(indexed)]
    pub mon_project_id: Option<i32>,
    pub ref_obj_id: Option<i32>,
    #[sea_orm(column_type = "Text", nullable)]
    pub mon_point_ids: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub ref_specifications: Option<String>,
    pub per_info_id: Option<i32>,
    #[sea_orm(column_type = "Text", nullable)]
    pub file_ids: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub remark: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
