use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "mon_points")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub mon_point_type: Option<i32>,
    #[sea_orm(indexed)]
    pub mon_group_id: Option<i32>,
    pub dac_id: Option<i32>,
    pub sensor_name: Option<String>,
    pub component: Option<String>,
    pub unit: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((18, 6)))", nullable)]
    pub x_coordinate: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((18, 6)))", nullable)]
    pub y_coordinate: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((18, 6)))", nullable)]
    pub z_coordinate: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((18, 6)))", nullable)]
    pub ini_value: Option<Decimal>,
    pub s_time: Option<DateTime>,
    pub per_info_id: Option<i32>,
    #[sea_orm(column_type = "Text", nullable)]
    pub file_ids: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub remark: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
