use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DealingType {
    /// 직거래
    Direct,
    /// 중개거래
    Agent,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, EnumString, Display, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RentType {
    /// Lump-sum deposit, no monthly rent
    Jeonse,
    Monthly,
}

impl RentType {
    pub fn of(monthly_rent: i64) -> Self {
        if monthly_rent > 0 {
            RentType::Monthly
        } else {
            RentType::Jeonse
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ContractType {
    /// 신규
    New,
    /// 갱신
    Renewal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: i64,
    pub apt_id: i32,
    /// YYYY-MM-DD, day defaults to 1 when unknown
    pub deal_date: String,
    pub deal_year: i32,
    pub deal_month: i32,
    pub deal_day: i32,
    pub exclusive_area: f64,
    pub floor: i32,
    /// 만원
    pub deal_amount: i64,
    pub is_canceled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dealing_type: Option<DealingType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Rent {
    pub id: i64,
    pub apt_id: i32,
    pub deal_date: String,
    pub deal_year: i32,
    pub deal_month: i32,
    pub deal_day: i32,
    pub exclusive_area: f64,
    pub floor: i32,
    pub rent_type: RentType,
    /// 만원
    pub deposit: i64,
    /// 만원, 0 for jeonse
    pub monthly_rent: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_type: Option<ContractType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_period: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_renewal_right: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_deposit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_monthly_rent: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deposit_change: Option<i64>,
    /// Percent with one decimal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deposit_change_rate: Option<f64>,
}
