use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use papertrade_market_data::{stock_universe, Stock};

use crate::{error::ApiResult, main_lib::AppState};

/// Market list: every listing in the universe, priced from the cache.
/// Listings without a cached quote come back with a zero price and are
/// not tradable until the next refresh.
async fn list_stocks(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Stock>>> {
    let stocks = stock_universe()
        .iter()
        .map(|listing| match state.quotes.get(listing.symbol) {
            Some(quote) => Stock::from_quote(&quote),
            None => Stock::unpriced(listing),
        })
        .collect();
    Ok(Json(stocks))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/stocks", get(list_stocks))
}
