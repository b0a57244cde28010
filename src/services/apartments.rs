use std::sync::Arc;

use sea_orm::sea_query::{Expr, IntoColumnRef, SimpleExpr};
use sea_orm::{
    ColumnTrait, Condition, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, SelectTwo,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use utoipa::ToSchema;

use super::transformers::{to_apartment, to_apartment_detail, to_autocomplete_item, to_station};
use super::{find_apartment, QuerySettings};
use crate::db::{DatabaseAccess, DbPool, PageRequest, SearchBuilder};
use crate::entities::{apartment, kapt_detail, kapt_info, nearest_station};
use crate::errors::ServiceError;
use crate::models::{Apartment, ApartmentDetail, AutocompleteItem, SearchFilters, Station};

/// Minimum number of characters in a search term
pub const MIN_SEARCH_CHARS: usize = 2;

/// Map viewport, south-west and north-east corners in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MapBounds {
    pub sw_lat: f64,
    pub sw_lng: f64,
    pub ne_lat: f64,
    pub ne_lng: f64,
}

type ApartmentWithInfo = SelectTwo<apartment::Entity, kapt_info::Entity>;

fn busiest_first(query: ApartmentWithInfo) -> ApartmentWithInfo {
    query
        .order_by_desc(Expr::col((apartment::Entity, apartment::Column::TradeCount)).if_null(0))
        .order_by_asc(apartment::Column::AptNm)
}

/// Household count as shown to clients: a positive K-apt total, else a
/// positive ho count. NULL when neither is known, so unit filters skip it.
fn total_units_expr() -> SimpleExpr {
    let units = || Expr::col((kapt_info::Entity, kapt_info::Column::TotalUnitCnt));
    let hos = || Expr::col((kapt_info::Entity, kapt_info::Column::TotalHoCnt));
    Expr::case(Condition::all().add(units().gt(0)), units())
        .case(Condition::all().add(hos().gt(0)), hos())
        .into()
}

fn within(expr: SimpleExpr, (lower, upper): (Option<i32>, Option<i32>)) -> Condition {
    let mut cond = Condition::all();
    if let Some(lower) = lower {
        cond = cond.add(Expr::expr(expr.clone()).gte(lower));
    }
    if let Some(upper) = upper {
        cond = cond.add(Expr::expr(expr).lt(upper));
    }
    cond
}

fn apply_filters(mut query: ApartmentWithInfo, filters: &SearchFilters) -> ApartmentWithInfo {
    if let Some(range) = filters.year_built {
        let build_year = SimpleExpr::Column(
            (apartment::Entity, apartment::Column::BuildYear).into_column_ref(),
        );
        query = query.filter(within(build_year, range.bounds()));
    }
    if let Some(range) = filters.units {
        query = query.filter(within(total_units_expr(), range.bounds()));
    }
    if let Some(hallway) = filters.hallway_type {
        query = query.filter(kapt_info::Column::HallwayType.eq(hallway.as_ref()));
    }
    query
}

fn with_info(rows: Vec<(apartment::Model, Option<kapt_info::Model>)>) -> Vec<Apartment> {
    rows.iter()
        .map(|(apt, info)| to_apartment(apt, info.as_ref()))
        .collect()
}

/// Lookups over the apartment master table
#[derive(Clone)]
pub struct ApartmentService {
    db: DatabaseAccess,
    settings: QuerySettings,
}

impl ApartmentService {
    pub fn new(db_pool: Arc<DbPool>, settings: QuerySettings) -> Self {
        Self {
            db: DatabaseAccess::new(db_pool),
            settings,
        }
    }

    #[instrument(skip(self))]
    pub async fn get_apartment(&self, apt_id: i32) -> Result<Apartment, ServiceError> {
        Ok(self.get_detail(apt_id).await?.apartment)
    }

    /// Master row plus the optional K-apt basic info and facility rows
    #[instrument(skip(self))]
    pub async fn get_detail(&self, apt_id: i32) -> Result<ApartmentDetail, ServiceError> {
        let apt = find_apartment(&self.db, apt_id).await?;

        let (info, detail) = futures::try_join!(
            self.db.execute("find_kapt_info", |pool| {
                kapt_info::Entity::find_by_id(apt_id).one(pool)
            }),
            self.db.execute("find_kapt_detail", |pool| {
                kapt_detail::Entity::find_by_id(apt_id).one(pool)
            }),
        )?;

        Ok(to_apartment_detail(&apt, info.as_ref(), detail.as_ref()))
    }

    /// Text search over name and address parts, busiest complexes first
    #[instrument(skip(self))]
    pub async fn search(
        &self,
        term: &str,
        filters: SearchFilters,
        page: PageRequest,
    ) -> Result<(Vec<Apartment>, u64), ServiceError> {
        let term = term.trim();
        if term.chars().count() < MIN_SEARCH_CHARS {
            return Err(ServiceError::InvalidInput(format!(
                "search term must be at least {} characters",
                MIN_SEARCH_CHARS
            )));
        }

        let mut query = apartment::Entity::find().find_also_related(kapt_info::Entity);
        if let Some(text) = SearchBuilder::new()
            .add_like(apartment::Column::AptNm, term)
            .add_like(apartment::Column::Sigungu, term)
            .add_like(apartment::Column::UmdNm, term)
            .add_like(apartment::Column::Sido, term)
            .build()
        {
            query = query.filter(text);
        }
        let query = busiest_first(apply_filters(query, &filters));

        let (rows, total) = self
            .db
            .execute("search_apartments", move |pool| async move {
                let paginator = query.paginate(pool, page.limit);
                let total = paginator.num_items().await?;
                let rows = paginator.fetch_page(page.page - 1).await?;
                Ok::<_, DbErr>((rows, total))
            })
            .await?;

        debug!(term, total, "Apartment search completed");
        Ok((with_info(rows), total))
    }

    /// Name or dong prefix suggestions; a blank term yields nothing
    #[instrument(skip(self))]
    pub async fn autocomplete(&self, term: &str) -> Result<Vec<AutocompleteItem>, ServiceError> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(Vec::new());
        }

        let limit = self.settings.autocomplete_limit;
        let mut query = apartment::Entity::find();
        if let Some(text) = SearchBuilder::new()
            .add_like(apartment::Column::AptNm, term)
            .add_like(apartment::Column::UmdNm, term)
            .build()
        {
            query = query.filter(text);
        }
        let query = query
            .order_by_desc(Expr::col((apartment::Entity, apartment::Column::TradeCount)).if_null(0))
            .order_by_asc(apartment::Column::AptNm)
            .limit(limit);

        let rows = self
            .db
            .execute("autocomplete_apartments", move |pool| query.all(pool))
            .await?;

        Ok(rows.iter().map(to_autocomplete_item).collect())
    }

    /// Complexes with coordinates inside `bounds`, capped at `map_result_limit`
    #[instrument(skip(self))]
    pub async fn by_bounds(&self, bounds: MapBounds) -> Result<Vec<Apartment>, ServiceError> {
        let query = busiest_first(
            apartment::Entity::find()
                .find_also_related(kapt_info::Entity)
                .filter(apartment::Column::Lat.is_not_null())
                .filter(apartment::Column::Lng.is_not_null())
                .filter(apartment::Column::Lat.between(bounds.sw_lat, bounds.ne_lat))
                .filter(apartment::Column::Lng.between(bounds.sw_lng, bounds.ne_lng)),
        )
        .limit(self.settings.map_result_limit);

        let rows = self
            .db
            .execute("apartments_by_bounds", move |pool| query.all(pool))
            .await?;

        Ok(with_info(rows))
    }

    /// Nearest subway station, `None` when the complex has no station row
    #[instrument(skip(self))]
    pub async fn nearest_station(&self, apt_id: i32) -> Result<Option<Station>, ServiceError> {
        find_apartment(&self.db, apt_id).await?;

        let row = self
            .db
            .execute("nearest_station", |pool| {
                nearest_station::Entity::find_by_id(apt_id).one(pool)
            })
            .await?;

        Ok(row.as_ref().map(to_station))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HallwayType, UnitsRange, YearBuiltRange};
    use sea_orm::{DbBackend, QueryTrait};

    #[test]
    fn filters_become_half_open_ranges() {
        let filters = SearchFilters {
            year_built: Some(YearBuiltRange::TwentyTens),
            units: Some(UnitsRange::Over2000),
            hallway_type: Some(HallwayType::Staircase),
        };
        let sql = apply_filters(
            apartment::Entity::find().find_also_related(kapt_info::Entity),
            &filters,
        )
        .build(DbBackend::Postgres)
        .to_string();

        assert!(sql.contains("\"apt_master\".\"build_year\" >= 2010"));
        assert!(sql.contains("\"apt_master\".\"build_year\" < 2020"));
        assert!(sql.contains("CASE WHEN"));
        assert!(sql.contains("\"raw_kapt_info\".\"total_unit_cnt\" > 0"));
        assert!(sql.contains("\"raw_kapt_info\".\"total_ho_cnt\" > 0"));
        assert!(sql.contains("END) >= 2000") || sql.contains("END >= 2000"));
        assert!(sql.contains("LEFT JOIN \"raw_kapt_info\""));
    }

    #[test]
    fn empty_filters_leave_query_untouched() {
        let base = apartment::Entity::find()
            .find_also_related(kapt_info::Entity)
            .build(DbBackend::Postgres)
            .to_string();
        let filtered = apply_filters(
            apartment::Entity::find().find_also_related(kapt_info::Entity),
            &SearchFilters::default(),
        )
        .build(DbBackend::Postgres)
        .to_string();
        assert_eq!(base, filtered);
    }
}
