use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use sea_orm::sea_query::{Expr, SimpleExpr};
use sea_orm::{ColumnTrait, EntityTrait, Order, QueryFilter, QueryOrder, QuerySelect, Select};
use tracing::{debug, instrument};

use super::find_apartment;
use crate::db::{DatabaseAccess, DbPool};
use crate::entities::{assigned_school, school};
use crate::errors::ServiceError;
use crate::models::nearby::walking_minutes;
use crate::models::{SchoolInfo, SchoolItem, SchoolLevel};

/// Mean earth radius in meters
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Half-size of the search box around a complex, in degrees
const LAT_DELTA: f64 = 0.02;
const LNG_DELTA: f64 = 0.025;

/// Upper bound on schools read from the search box
const BOX_ROW_LIMIT: u64 = 200;
const NEARBY_TOTAL: usize = 10;
const NEARBY_PER_LEVEL: usize = 3;

/// Squared planar distance in degrees, longitude scaled to the latitude.
/// Orders like the true distance inside a small box.
fn planar_distance_sq(lat: f64, lng: f64) -> SimpleExpr {
    let lng_scale = lat.to_radians().cos();
    let dlat = Expr::col((school::Entity, school::Column::Lat)).sub(lat);
    let dlng = Expr::col((school::Entity, school::Column::Lng))
        .sub(lng)
        .mul(lng_scale);
    dlat.clone().mul(dlat).add(dlng.clone().mul(dlng))
}

/// Middle and high schools in the box around a point, nearest first
fn secondary_schools_near(lat: f64, lng: f64) -> Select<school::Entity> {
    school::Entity::find()
        .filter(school::Column::SchoolType.is_in([
            SchoolLevel::Middle.registry_label(),
            SchoolLevel::High.registry_label(),
        ]))
        .filter(school::Column::Lat.between(lat - LAT_DELTA, lat + LAT_DELTA))
        .filter(school::Column::Lng.between(lng - LNG_DELTA, lng + LNG_DELTA))
        .order_by(planar_distance_sq(lat, lng), Order::Asc)
        .order_by_asc(school::Column::Id)
        .limit(BOX_ROW_LIMIT)
}

/// Shared-district suffixes that are not part of the school name
static DISTRICT_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(제한적공동\(일방\)|제한적공동|공동학구)$").unwrap());

/// Assignment row name without its district suffix
pub fn clean_assigned_name(raw: &str) -> String {
    DISTRICT_SUFFIX.replace(raw.trim(), "").trim().to_string()
}

/// Great-circle distance in whole meters
pub fn haversine_m(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> i64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    (EARTH_RADIUS_M * c).round() as i64
}

fn to_item(row: &school::Model, level: SchoolLevel, distance: i64, is_assigned: bool) -> SchoolItem {
    SchoolItem {
        school_name: row.school_name.clone(),
        school_type: level,
        school_kind: row.school_kind.clone(),
        distance,
        walking_minutes: walking_minutes(distance as f64),
        student_count: row.student_count,
        is_assigned,
    }
}

/// Nearest schools overall, then at most [`NEARBY_PER_LEVEL`] per level
pub fn pick_nearby(
    origin: (f64, f64),
    rows: &[school::Model],
) -> (Vec<SchoolItem>, Vec<SchoolItem>) {
    let mut ranked: Vec<SchoolItem> = rows
        .iter()
        .filter_map(|row| {
            let level = SchoolLevel::from_registry_label(&row.school_type)?;
            let (lat, lng) = (row.lat?, row.lng?);
            let distance = haversine_m(origin.0, origin.1, lat, lng);
            Some(to_item(row, level, distance, false))
        })
        .collect();
    ranked.sort_by_key(|item| item.distance);
    ranked.truncate(NEARBY_TOTAL);

    let (middle, high): (Vec<_>, Vec<_>) = ranked
        .into_iter()
        .filter(|item| item.school_type != SchoolLevel::Elementary)
        .partition(|item| item.school_type == SchoolLevel::Middle);

    (
        middle.into_iter().take(NEARBY_PER_LEVEL).collect(),
        high.into_iter().take(NEARBY_PER_LEVEL).collect(),
    )
}

/// Assigned elementary school and nearby middle and high schools
#[derive(Clone)]
pub struct SchoolService {
    db: DatabaseAccess,
}

impl SchoolService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self {
            db: DatabaseAccess::new(db_pool),
        }
    }

    #[instrument(skip(self))]
    pub async fn school_info(&self, apt_id: i32) -> Result<SchoolInfo, ServiceError> {
        let apt = find_apartment(&self.db, apt_id).await?;
        let (Some(lat), Some(lng)) = (apt.lat, apt.lng) else {
            debug!(apt_id, "Apartment has no coordinates");
            return Ok(SchoolInfo::default());
        };

        let (assignment, nearby_rows) = futures::try_join!(
            self.db.execute("assigned_school", |pool| {
                assigned_school::Entity::find_by_id(apt_id).one(pool)
            }),
            self.db.execute("schools_in_box", |pool| {
                secondary_schools_near(lat, lng).all(pool)
            }),
        )?;

        let middle_zone_name = assignment
            .as_ref()
            .and_then(|a| a.middle_zone_name.clone())
            .filter(|name| !name.trim().is_empty());
        let assigned_elementary = match assignment
            .as_ref()
            .and_then(|a| a.elementary_school_name.as_deref())
        {
            Some(raw) => self.assigned_elementary(raw, (lat, lng)).await?,
            None => None,
        };

        let (nearby_middle, nearby_high) = pick_nearby((lat, lng), &nearby_rows);

        Ok(SchoolInfo {
            assigned_elementary,
            middle_zone_name,
            nearby_middle,
            nearby_high,
        })
    }

    async fn assigned_elementary(
        &self,
        raw_name: &str,
        origin: (f64, f64),
    ) -> Result<Option<SchoolItem>, ServiceError> {
        let clean = clean_assigned_name(raw_name);
        if clean.is_empty() {
            return Ok(None);
        }
        let full_name = format!("{}등학교", clean);

        let row = self
            .db
            .execute("find_elementary_school", |pool| {
                school::Entity::find()
                    .filter(school::Column::SchoolName.eq(full_name.as_str()))
                    .filter(school::Column::SchoolType.eq(SchoolLevel::Elementary.registry_label()))
                    .one(pool)
            })
            .await?;

        Ok(row.map(|row| {
            let distance = match (row.lat, row.lng) {
                (Some(lat), Some(lng)) => haversine_m(origin.0, origin.1, lat, lng),
                _ => 0,
            };
            to_item(&row, SchoolLevel::Elementary, distance, true)
        }))
    }
}
