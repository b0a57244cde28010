use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{ColumnTrait, Condition};
use serde::Serialize;

/// Highest page a listing will serve; larger requests land here
pub const MAX_PAGE: u64 = 1_000_000;

/// Normalized page request shared by every paginated listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
}

impl PageRequest {
    /// Clamp raw query values: 1 ≤ page ≤ `MAX_PAGE`, 1 ≤ limit ≤ `max_limit`,
    /// missing or zero values fall back to page 1 and `default_limit`.
    pub fn normalize(
        page: Option<u64>,
        limit: Option<u64>,
        default_limit: u64,
        max_limit: u64,
    ) -> Self {
        let page = page.filter(|p| *p > 0).unwrap_or(1).min(MAX_PAGE);
        let limit = limit
            .filter(|l| *l > 0)
            .unwrap_or(default_limit)
            .clamp(1, max_limit.max(1));
        Self { page, limit }
    }

    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: 1, limit: 20 }
    }
}

/// Helper for building text-search conditions where any column may match
#[derive(Debug, Default)]
pub struct SearchBuilder {
    conditions: Vec<Condition>,
}

impl SearchBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a case-insensitive substring match on `column`
    pub fn add_like<C: ColumnTrait>(mut self, column: C, pattern: &str) -> Self {
        if !pattern.is_empty() {
            let needle = LikeExpr::new(format!("%{}%", escape_like(&pattern.to_lowercase())))
                .escape('\\');
            self.conditions.push(
                Condition::all()
                    .add(Expr::expr(Func::lower(Expr::col(column.as_column_ref()))).like(needle)),
            );
        }
        self
    }

    /// Build the final condition
    pub fn build(self) -> Option<Condition> {
        if self.conditions.is_empty() {
            None
        } else {
            Some(
                self.conditions
                    .into_iter()
                    .fold(Condition::any(), |acc, cond| acc.add(cond)),
            )
        }
    }
}

fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, None, 1, 20)]
    #[case(Some(0), Some(0), 1, 20)]
    #[case(Some(3), Some(500), 3, 100)]
    #[case(Some(2), Some(5), 2, 5)]
    #[case(Some(u64::MAX), Some(100), MAX_PAGE, 100)]
    fn normalize_clamps(
        #[case] page: Option<u64>,
        #[case] limit: Option<u64>,
        #[case] expected_page: u64,
        #[case] expected_limit: u64,
    ) {
        let req = PageRequest::normalize(page, limit, 20, 100);
        assert_eq!(req.page, expected_page);
        assert_eq!(req.limit, expected_limit);
    }

    #[test]
    fn total_pages_round_up() {
        let req = PageRequest { page: 3, limit: 20 };
        assert_eq!(req.total_pages(41), 3);
        assert_eq!(req.total_pages(0), 0);
    }

    #[test]
    fn empty_search_builds_nothing() {
        assert!(SearchBuilder::new().build().is_none());
    }

    #[test]
    fn like_matches_lowercased_column() {
        use crate::entities::apartment;
        use sea_orm::{DbBackend, EntityTrait, QueryFilter, QueryTrait};

        let cond = SearchBuilder::new()
            .add_like(apartment::Column::AptNm, "SK뷰")
            .add_like(apartment::Column::UmdNm, "")
            .build()
            .expect("one condition");
        let sql = apartment::Entity::find()
            .filter(cond)
            .build(DbBackend::Postgres)
            .to_string();

        assert!(sql.contains("LOWER(\"apt_master\".\"apt_nm\") LIKE '%sk뷰%'"));
        assert!(!sql.contains("umd_nm\") LIKE"));
    }

    #[rstest]
    #[case("래미안", "래미안")]
    #[case("100%", "100\\%")]
    #[case("a_b", "a\\_b")]
    fn like_wildcards_are_escaped(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(escape_like(raw), expected);
    }
}
