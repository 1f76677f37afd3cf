use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use papertrade_core::leaderboard::LeaderboardEntry;

use crate::{error::ApiResult, main_lib::AppState};

async fn leaderboard(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<LeaderboardEntry>>> {
    let entries = state.leaderboard_service.top().await?;
    Ok(Json(entries.iter().map(LeaderboardEntry::rounded).collect()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/leaderboard", get(leaderboard))
}
