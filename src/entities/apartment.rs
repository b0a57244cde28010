use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Apartment complex master record, keyed by `apt_id`.
///
/// `sigungu_cd` and `apt_nm` are the join keys into the raw transaction tables.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "apt_master")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub apt_id: i32,
    pub apt_nm: String,
    pub kapt_code: Option<String>,
    pub sigungu_cd: String,
    pub sido: Option<String>,
    pub sigungu: Option<String>,
    pub umd_nm: String,
    pub jibun: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub build_year: Option<i32>,
    pub trade_count: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::kapt_info::Entity")]
    KaptInfo,
    #[sea_orm(has_one = "super::kapt_detail::Entity")]
    KaptDetail,
    #[sea_orm(has_one = "super::nearest_station::Entity")]
    NearestStation,
    #[sea_orm(has_one = "super::assigned_school::Entity")]
    AssignedSchool,
    #[sea_orm(has_many = "super::area_type::Entity")]
    AreaTypes,
}

impl Related<super::kapt_info::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::KaptInfo.def()
    }
}

impl Related<super::kapt_detail::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::KaptDetail.def()
    }
}

impl Related<super::nearest_station::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::NearestStation.def()
    }
}

impl Related<super::assigned_school::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AssignedSchool.def()
    }
}

impl Related<super::area_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AreaTypes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
