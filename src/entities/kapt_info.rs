use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// K-apt basic building information (one row per complex)
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "raw_kapt_info")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub apt_id: i32,
    pub total_unit_cnt: Option<i32>,
    pub total_ho_cnt: Option<i32>,
    pub total_dong_cnt: Option<i32>,
    pub hallway_type: Option<String>,
    pub heat_type: Option<String>,
    pub manage_type: Option<String>,
    pub build_company: Option<String>,
    pub top_floor: Option<i32>,
    pub base_floor: Option<i32>,
    pub total_area: Option<f64>,
    pub building_area: Option<f64>,
    pub use_date: Option<String>,
    pub units_under_60: Option<i32>,
    pub units_under_85: Option<i32>,
    pub units_under_135: Option<i32>,
    pub units_over_135: Option<i32>,
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
