use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::context::AppContext;
use crate::filter::Filter;
use crate::middleware::{ApiResponse, ApiResult};

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// Raw `?page=&limit=`; unparseable values fall back to the defaults
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: u64,
    pub pages: u64,
}

impl PageQuery {
    fn parse(value: &Option<String>) -> Option<i64> {
        value.as_deref().and_then(|v| v.trim().parse::<i64>().ok())
    }

    pub fn page(&self) -> i64 {
        Self::parse(&self.page).unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> i64 {
        match Self::parse(&self.limit) {
            Some(limit) if limit > 0 => limit.min(MAX_LIMIT),
            _ => DEFAULT_LIMIT,
        }
    }

    /// Rows to skip; saturates so a far-out page is simply empty
    pub fn offset(&self) -> i64 {
        (self.page() - 1).saturating_mul(self.limit())
    }
}

impl Pagination {
    pub fn new(page: i64, limit: i64, total: u64) -> Self {
        Self {
            page,
            limit,
            total,
            pages: total.div_ceil(limit as u64),
        }
    }
}

async fn paginated(ctx: &AppContext, collection: &str, query: &PageQuery) -> ApiResult<Vec<Value>> {
    let (page, limit) = (query.page(), query.limit());
    let filter = Filter::new().newest_first().limit(limit, Some(query.offset()))?;
    let everything = Filter::new();
    let (data, total) = futures::try_join!(
        ctx.store.find(collection, &filter),
        ctx.store.count(collection, &everything),
    )?;
    tracing::debug!("Listing {} page {} ({} total)", collection, page, total);
    Ok(ApiResponse::success(data).field("pagination", Pagination::new(page, limit, total)))
}

/// GET /api/admin/signups
pub async fn signups(State(ctx): State<AppContext>, Query(query): Query<PageQuery>) -> ApiResult<Vec<Value>> {
    paginated(&ctx, "signupdatas", &query).await
}

/// GET /api/admin/signins
pub async fn signins(State(ctx): State<AppContext>, Query(query): Query<PageQuery>) -> ApiResult<Vec<Value>> {
    paginated(&ctx, "signindatas", &query).await
}

/// GET /api/admin/contacts
pub async fn contacts(State(ctx): State<AppContext>, Query(query): Query<PageQuery>) -> ApiResult<Vec<Value>> {
    paginated(&ctx, "contacts", &query).await
}

/// GET /api/admin/users
pub async fn users(State(ctx): State<AppContext>, Query(query): Query<PageQuery>) -> ApiResult<Vec<Value>> {
    paginated(&ctx, "users", &query).await
}
