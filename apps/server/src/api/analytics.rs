use std::sync::Arc;

use axum::{extract::State, http::HeaderMap, routing::get, Json, Router};
use papertrade_core::allocation::PortfolioAnalytics;

use crate::{api::user_id_from, error::ApiResult, main_lib::AppState};

/// Allocation weights and best/worst performers for the caller.
async fn analytics(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<PortfolioAnalytics>> {
    let user_id = user_id_from(&headers);
    let analytics = state.allocation_service.portfolio_analytics(&user_id).await?;
    Ok(Json(analytics.rounded()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/analytics", get(analytics))
}
