//! Query fragments shared by every lookup over the raw deal tables.
//!
//! All values go through the query builder as bound parameters.

use super::area_grouping::AreaWindow;
use super::transformers::CANCELLED_DEAL_MARKER;
use crate::entities::{rent, trade};
use crate::models::{ApartmentKeys, RentType};
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryOrder, Select};

/// Sale rows of one complex
pub fn sales_of(keys: &ApartmentKeys) -> Condition {
    Condition::all()
        .add(trade::Column::SigunguCd.eq(keys.sigungu_code.as_str()))
        .add(trade::Column::AptNm.eq(keys.name.as_str()))
}

/// Rent rows of one complex
pub fn rents_of(keys: &ApartmentKeys) -> Condition {
    Condition::all()
        .add(rent::Column::SigunguCd.eq(keys.sigungu_code.as_str()))
        .add(rent::Column::AptNm.eq(keys.name.as_str()))
}

/// Sales that were neither flagged "해제" nor given a cancellation day
pub fn sale_not_cancelled() -> Condition {
    Condition::all()
        .add(
            Condition::any()
                .add(trade::Column::CdealType.is_null())
                .add(trade::Column::CdealType.ne(CANCELLED_DEAL_MARKER)),
        )
        .add(
            Condition::any()
                .add(trade::Column::CdealDay.is_null())
                .add(trade::Column::CdealDay.eq("")),
        )
}

pub fn sale_area_within(window: AreaWindow) -> Condition {
    Condition::all().add(trade::Column::ExcluUseAr.between(window.min, window.max))
}

pub fn rent_area_within(window: AreaWindow) -> Condition {
    Condition::all().add(rent::Column::ExcluUseAr.between(window.min, window.max))
}

pub fn rent_kind(rent_type: RentType) -> Condition {
    match rent_type {
        RentType::Jeonse => Condition::all().add(rent::Column::MonthlyRent.eq(0)),
        RentType::Monthly => Condition::all().add(rent::Column::MonthlyRent.gt(0)),
    }
}

/// Orders by deal date descending, unknown days counting as the 1st, then
/// by id descending so ties resolve deterministically.
pub fn newest_first<E: EntityTrait>(
    query: Select<E>,
    year: E::Column,
    month: E::Column,
    day: E::Column,
    id: E::Column,
) -> Select<E> {
    query
        .order_by_desc(year)
        .order_by_desc(month)
        .order_by_desc(Expr::col(day).if_null(1))
        .order_by_desc(id)
}

pub fn sales_newest_first(query: Select<trade::Entity>) -> Select<trade::Entity> {
    newest_first(
        query,
        trade::Column::DealYear,
        trade::Column::DealMonth,
        trade::Column::DealDay,
        trade::Column::Id,
    )
}

pub fn rents_newest_first(query: Select<rent::Entity>) -> Select<rent::Entity> {
    newest_first(
        query,
        rent::Column::DealYear,
        rent::Column::DealMonth,
        rent::Column::DealDay,
        rent::Column::Id,
    )
}
