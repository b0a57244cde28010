use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One unit-area record of a complex. Several records usually share a band.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "apt_area_types")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub apt_id: i32,
    pub exclu_area: f64,
    pub supply_area: f64,
    pub exclu_ratio: Option<f64>,
    pub unit_count: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::apartment::Entity",
        from = "Column::AptId",
        to = "super::apartment::Column::AptId"
    )]
    Apartment,
}

impl Related<super::apartment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Apartment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
