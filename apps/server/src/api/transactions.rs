use std::sync::Arc;

use axum::{extract::State, http::HeaderMap, routing::get, Json, Router};
use papertrade_core::transactions::Transaction;

use crate::{api::user_id_from, error::ApiResult, main_lib::AppState};

/// Full trade history for the caller, newest first.
async fn list_transactions(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<Transaction>>> {
    let user_id = user_id_from(&headers);
    let transactions = state.ledger_service.get_transactions(&user_id).await?;
    Ok(Json(transactions.iter().map(Transaction::rounded).collect()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/transactions", get(list_transactions))
}
