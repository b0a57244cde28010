use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "apt_nearest_station")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub apt_id: i32,
    pub station_name: Option<String>,
    pub line_name: Option<String>,
    pub distance_m: Option<f64>,
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
