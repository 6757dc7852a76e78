//! Territory, domain and project descriptors in one table

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "areas")]
pub struct Model {
    /// Insertion sequence; defines lookup order
    #[sea_orm(primary_key)]
    pub seq: i64,
    #[sea_orm(unique)]
    pub id: String,
    pub name: String,
    /// "territory", "domain" or "project"
    pub kind: String,
    pub area_type: Option<String>,
    pub is_default: bool,
    pub parent_id: Option<String>,
    pub db_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
