use axum::extract::State;

use crate::context::AppContext;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{dashboard_stats, DashboardStats};

/// GET /api/admin/dashboard-stats - counts, recent signups/contacts, money totals
pub async fn get(State(ctx): State<AppContext>) -> ApiResult<DashboardStats> {
    let stats = dashboard_stats(ctx.store.as_ref()).await?;
    Ok(ApiResponse::success(stats))
}
