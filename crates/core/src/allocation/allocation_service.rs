//! Service computing allocation weights and performance extremes.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::allocation::{HoldingAllocation, PortfolioAnalytics};
use crate::ledger::{portfolio_aggregates, LedgerRepositoryTrait};
use crate::Result;

/// Trait for the analytics service.
#[async_trait]
pub trait AllocationServiceTrait: Send + Sync {
    async fn portfolio_analytics(&self, user_id: &str) -> Result<PortfolioAnalytics>;
}

pub struct AllocationService {
    repository: Arc<dyn LedgerRepositoryTrait>,
}

impl AllocationService {
    pub fn new(repository: Arc<dyn LedgerRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl AllocationServiceTrait for AllocationService {
    async fn portfolio_analytics(&self, user_id: &str) -> Result<PortfolioAnalytics> {
        let holdings = self.repository.list_holdings(user_id)?;
        let aggregates = portfolio_aggregates(&holdings);

        let mut allocations: Vec<HoldingAllocation> = holdings
            .iter()
            .map(|holding| {
                let weight = if aggregates.total_invested > Decimal::ZERO {
                    holding.invested / aggregates.total_invested * Decimal::ONE_HUNDRED
                } else {
                    Decimal::ZERO
                };
                HoldingAllocation {
                    symbol: holding.symbol.clone(),
                    name: holding.name.clone(),
                    invested: holding.invested,
                    current_value: holding.current_value,
                    weight,
                    profit_loss: holding.profit_loss,
                    profit_loss_percent: holding.profit_loss_percent,
                }
            })
            .collect();
        allocations.sort_by(|a, b| b.weight.cmp(&a.weight));

        let best_performer = allocations
            .iter()
            .max_by(|a, b| a.profit_loss_percent.cmp(&b.profit_loss_percent))
            .cloned();
        let worst_performer = allocations
            .iter()
            .min_by(|a, b| a.profit_loss_percent.cmp(&b.profit_loss_percent))
            .cloned();

        Ok(PortfolioAnalytics {
            total_invested: aggregates.total_invested,
            current_value: aggregates.current_value,
            profit_loss: aggregates.profit_loss,
            profit_loss_percent: aggregates.profit_loss_percent,
            allocations,
            best_performer,
            worst_performer,
        })
    }
}
