use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use papertrade_core::ledger::Portfolio;
use papertrade_core::transactions::Transaction;
use serde::Deserialize;

use crate::{
    api::user_id_from,
    error::{ApiError, ApiResult},
    main_lib::{refresh_quotes, AppState},
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TradeRequest {
    symbol: String,
    quantity: i64,
}

impl TradeRequest {
    fn symbol(&self) -> Result<String, ApiError> {
        let symbol = self.symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(ApiError::BadRequest("Symbol must not be empty".into()));
        }
        Ok(symbol)
    }
}

async fn get_portfolio(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<Portfolio>> {
    let user_id = user_id_from(&headers);
    let portfolio = state.ledger_service.get_portfolio(&user_id).await?;
    Ok(Json(portfolio.rounded()))
}

async fn buy(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<TradeRequest>,
) -> ApiResult<Json<Transaction>> {
    let user_id = user_id_from(&headers);
    let symbol = payload.symbol()?;
    let transaction = state
        .ledger_service
        .buy(&user_id, &symbol, payload.quantity)
        .await?;
    Ok(Json(transaction.rounded()))
}

async fn sell(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<TradeRequest>,
) -> ApiResult<Json<Transaction>> {
    let user_id = user_id_from(&headers);
    let symbol = payload.symbol()?;
    let transaction = state
        .ledger_service
        .sell(&user_id, &symbol, payload.quantity)
        .await?;
    Ok(Json(transaction.rounded()))
}

async fn reset(State(state): State<Arc<AppState>>, headers: HeaderMap) -> ApiResult<StatusCode> {
    let user_id = user_id_from(&headers);
    state.ledger_service.reset(&user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Forces a quote refresh and returns the caller's repriced portfolio.
async fn refresh(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<Portfolio>> {
    let user_id = user_id_from(&headers);
    refresh_quotes(&state).await?;
    let portfolio = state.ledger_service.get_portfolio(&user_id).await?;
    Ok(Json(portfolio.rounded()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/portfolio", get(get_portfolio))
        .route("/portfolio/buy", post(buy))
        .route("/portfolio/sell", post(sell))
        .route("/portfolio/reset", post(reset))
        .route("/portfolio/refresh", post(refresh))
}
