use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "raw_schools")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub school_name: String,
    /// 초등학교, 중학교 or 고등학교
    pub school_type: String,
    pub school_kind: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub student_count: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
