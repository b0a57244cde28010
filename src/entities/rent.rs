use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Raw rent transaction. `monthly_rent = 0` marks a jeonse contract.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "raw_rents")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub sigungu_cd: String,
    pub apt_nm: String,
    pub deal_year: i32,
    pub deal_month: i32,
    pub deal_day: Option<i32>,
    pub exclu_use_ar: f64,
    pub floor: Option<i32>,
    pub deposit: i64,
    pub monthly_rent: i64,
    /// "신규" or "갱신"
    pub contract_type: Option<String>,
    pub contract_term: Option<String>,
    /// "사용" when the tenant exercised the renewal right
    pub use_rr_right: Option<String>,
    pub pre_deposit: Option<i64>,
    pub pre_monthly_rent: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
