use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// School district assignment of a complex
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "apt_assigned_school")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub apt_id: i32,
    /// May carry a shared-district suffix such as "공동학구"
    pub elementary_school_name: Option<String>,
    pub middle_zone_name: Option<String>,
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
