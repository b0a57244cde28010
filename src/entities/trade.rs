use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Raw sale transaction as published by the land ministry feed.
///
/// Amounts are in 만원. There is no foreign key to `apt_master`; rows are
/// matched on (`sigungu_cd`, `apt_nm`).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "raw_trades")]
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
    pub deal_amount: i64,
    /// "해제" once the deal was cancelled
    pub cdeal_type: Option<String>,
    pub cdeal_day: Option<String>,
    /// "직거래" or "중개거래"
    pub dealing_gbn: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
