use std::sync::Arc;

use crate::config::Config;
use papertrade_core::allocation::{AllocationService, AllocationServiceTrait};
use papertrade_core::leaderboard::{LeaderboardService, LeaderboardServiceTrait};
use papertrade_core::ledger::{LedgerRepositoryTrait, LedgerService, LedgerServiceTrait};
use papertrade_market_data::{
    stock_universe, PriceProviderTrait, QuoteCache, SimulatedPriceProvider,
};
use papertrade_storage_sqlite::{db, SqliteLedgerRepository};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub ledger_service: Arc<dyn LedgerServiceTrait>,
    pub allocation_service: Arc<dyn AllocationServiceTrait>,
    pub leaderboard_service: Arc<dyn LeaderboardServiceTrait>,
    pub quotes: Arc<QuoteCache>,
    pub provider: Arc<dyn PriceProviderTrait>,
}

pub fn init_tracing() {
    let fmt_layer = fmt::layer().json().with_current_span(false);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

/// Fetches a fresh quote batch, swaps it into the cache, and reprices
/// every portfolio against it.
pub async fn refresh_quotes(state: &AppState) -> papertrade_core::Result<()> {
    let symbols: Vec<String> = stock_universe()
        .iter()
        .map(|listing| listing.symbol.to_string())
        .collect();
    let batch = state.provider.fetch_quotes(&symbols).await?;
    state.quotes.replace_all(batch);
    state.ledger_service.reprice_all().await
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let conn = db::init(&config.db_path)?;
    let repository: Arc<dyn LedgerRepositoryTrait> = Arc::new(SqliteLedgerRepository::new(conn));

    let quotes = Arc::new(QuoteCache::new());
    let provider: Arc<dyn PriceProviderTrait> = Arc::new(SimulatedPriceProvider::new());
    let ledger_service: Arc<dyn LedgerServiceTrait> =
        Arc::new(LedgerService::new(repository.clone(), quotes.clone()));
    let allocation_service: Arc<dyn AllocationServiceTrait> =
        Arc::new(AllocationService::new(repository.clone()));
    let leaderboard_service: Arc<dyn LeaderboardServiceTrait> =
        Arc::new(LeaderboardService::new(repository));

    let state = Arc::new(AppState {
        ledger_service,
        allocation_service,
        leaderboard_service,
        quotes,
        provider,
    });

    // Warm the cache so symbols are tradable from the first request.
    refresh_quotes(&state).await?;
    Ok(state)
}
