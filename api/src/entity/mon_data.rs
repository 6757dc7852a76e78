use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "mon_data")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub sensor_name: Option<String>,
    pub part: Option<String>,
    pub acq_time: Option<DateTime>,
    pub rec_time: Option<DateTime>,
    #[sea_orm(column_type = "Decimal(Some((18, 6)))", nullable)]
    pub value: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((18, 6)))", nullable)]
    pub data: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((18, 6)))", nullable)]
    pub curr_variation: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((18, 6)))", nullable)]
    pub accu_variation: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((18, 6)))", nullable)]
    pub variation_rate: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((18, 6)))", nullable)]
    pub value_per_design: Option<Decimal>,
    #[sea_orm(column_type = "Text", nullable)]
    pub remark: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
