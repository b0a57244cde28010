use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// K-apt facility details (parking, staff, transit, amenities)
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "raw_kapt_detail")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub apt_id: i32,
    pub parking_total: Option<i32>,
    pub parking_ground: Option<i32>,
    pub parking_underground: Option<i32>,
    pub elevator_count: Option<i32>,
    pub cctv_count: Option<i32>,
    pub ev_charger_ground: Option<i32>,
    pub ev_charger_underground: Option<i32>,
    pub management_company: Option<String>,
    pub management_count: Option<i32>,
    pub security_count: Option<i32>,
    pub cleaning_count: Option<i32>,
    pub subway_line: Option<String>,
    pub subway_station: Option<String>,
    pub subway_walk_time: Option<String>,
    pub bus_walk_time: Option<String>,
    pub welfare_facility: Option<String>,
    pub convenient_facility: Option<String>,
    pub education_facility: Option<String>,
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
