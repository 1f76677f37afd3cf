//! Service ranking portfolios by realized-plus-unrealized profit.

use std::sync::Arc;

use async_trait::async_trait;

use crate::constants::LEADERBOARD_LIMIT;
use crate::leaderboard::LeaderboardEntry;
use crate::ledger::LedgerRepositoryTrait;
use crate::Result;

#[async_trait]
pub trait LeaderboardServiceTrait: Send + Sync {
    /// Top portfolios by profit/loss descending, capped at the
    /// leaderboard limit.
    async fn top(&self) -> Result<Vec<LeaderboardEntry>>;
}

pub struct LeaderboardService {
    repository: Arc<dyn LedgerRepositoryTrait>,
}

impl LeaderboardService {
    pub fn new(repository: Arc<dyn LedgerRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl LeaderboardServiceTrait for LeaderboardService {
    async fn top(&self) -> Result<Vec<LeaderboardEntry>> {
        let mut summaries = self.repository.list_portfolio_summaries()?;
        summaries.sort_by(|a, b| b.profit_loss.cmp(&a.profit_loss));

        Ok(summaries
            .into_iter()
            .take(LEADERBOARD_LIMIT)
            .enumerate()
            .map(|(index, summary)| LeaderboardEntry {
                rank: index as u32 + 1,
                user_id: summary.user_id,
                current_value: summary.current_value,
                profit_loss: summary.profit_loss,
                profit_loss_percent: summary.profit_loss_percent,
            })
            .collect())
    }
}
