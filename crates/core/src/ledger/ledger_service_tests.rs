#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use chrono::Utc;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::constants::INITIAL_BALANCE;
    use crate::errors::Error;
    use crate::ledger::{
        portfolio_aggregates, Holding, HoldingChange, LedgerError, LedgerRepositoryTrait,
        LedgerService, LedgerServiceTrait, PortfolioSummary, TradeCommit,
    };
    use crate::transactions::{Transaction, TransactionType};
    use crate::Result;
    use papertrade_market_data::{QuoteCache, SymbolQuote};

    // --- Mock repository ---

    #[derive(Default, Clone)]
    struct MockState {
        portfolios: HashMap<String, PortfolioSummary>,
        holdings: HashMap<String, Vec<Holding>>,
        transactions: HashMap<String, Vec<Transaction>>,
    }

    #[derive(Default)]
    struct MockLedgerRepository {
        state: Mutex<MockState>,
    }

    impl MockLedgerRepository {
        fn snapshot(&self) -> MockState {
            self.state.lock().unwrap().clone()
        }
    }

    impl LedgerRepositoryTrait for MockLedgerRepository {
        fn get_or_create_portfolio(&self, user_id: &str) -> Result<PortfolioSummary> {
            let mut state = self.state.lock().unwrap();
            Ok(state
                .portfolios
                .entry(user_id.to_string())
                .or_insert_with(|| PortfolioSummary::initial(user_id))
                .clone())
        }

        fn get_holding(&self, user_id: &str, symbol: &str) -> Result<Option<Holding>> {
            let state = self.state.lock().unwrap();
            Ok(state
                .holdings
                .get(user_id)
                .and_then(|list| list.iter().find(|h| h.symbol == symbol).cloned()))
        }

        fn list_holdings(&self, user_id: &str) -> Result<Vec<Holding>> {
            let state = self.state.lock().unwrap();
            Ok(state.holdings.get(user_id).cloned().unwrap_or_default())
        }

        fn list_transactions(&self, user_id: &str) -> Result<Vec<Transaction>> {
            let state = self.state.lock().unwrap();
            Ok(state.transactions.get(user_id).cloned().unwrap_or_default())
        }

        fn apply_trade(&self, user_id: &str, commit: &TradeCommit) -> Result<()> {
            let mut state = self.state.lock().unwrap();
            state
                .portfolios
                .insert(user_id.to_string(), commit.summary.clone());
            let holdings = state.holdings.entry(user_id.to_string()).or_default();
            match &commit.holding {
                HoldingChange::Upsert(holding) => {
                    match holdings.iter_mut().find(|h| h.symbol == holding.symbol) {
                        Some(slot) => *slot = holding.clone(),
                        None => holdings.push(holding.clone()),
                    }
                }
                HoldingChange::Remove(symbol) => holdings.retain(|h| &h.symbol != symbol),
            }
            state
                .transactions
                .entry(user_id.to_string())
                .or_default()
                .insert(0, commit.transaction.clone());
            Ok(())
        }

        fn apply_reprice(
            &self,
            user_id: &str,
            holdings: &[Holding],
            summary: &PortfolioSummary,
        ) -> Result<()> {
            let mut state = self.state.lock().unwrap();
            state.portfolios.insert(user_id.to_string(), summary.clone());
            state
                .holdings
                .insert(user_id.to_string(), holdings.to_vec());
            Ok(())
        }

        fn reset(&self, user_id: &str, _initial_balance: Decimal) -> Result<()> {
            let mut state = self.state.lock().unwrap();
            state
                .portfolios
                .insert(user_id.to_string(), PortfolioSummary::initial(user_id));
            state.holdings.remove(user_id);
            state.transactions.remove(user_id);
            Ok(())
        }

        fn list_user_ids(&self) -> Result<Vec<String>> {
            let state = self.state.lock().unwrap();
            Ok(state.portfolios.keys().cloned().collect())
        }

        fn list_portfolio_summaries(&self) -> Result<Vec<PortfolioSummary>> {
            let state = self.state.lock().unwrap();
            Ok(state.portfolios.values().cloned().collect())
        }
    }

    // --- Fixtures ---

    fn quote(symbol: &str, price: Decimal) -> SymbolQuote {
        SymbolQuote {
            symbol: symbol.to_string(),
            name: format!("{symbol} Ltd."),
            current_price: price,
            previous_close: price,
            change: Decimal::ZERO,
            change_percent: Decimal::ZERO,
            open: price,
            high: price,
            low: price,
            volume: 1_000_000,
            yesterday_price: price,
            tomorrow_predicted: price,
            timestamp: Utc::now(),
        }
    }

    fn setup(prices: &[(&str, Decimal)]) -> (Arc<MockLedgerRepository>, Arc<QuoteCache>, LedgerService) {
        let repository = Arc::new(MockLedgerRepository::default());
        let quotes = Arc::new(QuoteCache::new());
        quotes.replace_all(prices.iter().map(|(s, p)| quote(s, *p)).collect());
        let service = LedgerService::new(repository.clone(), quotes.clone());
        (repository, quotes, service)
    }

    fn assert_ledger_error(result: Result<Transaction>, expected: LedgerError) {
        match result {
            Err(Error::Ledger(actual)) => assert_eq!(actual, expected),
            other => panic!("expected ledger error {expected:?}, got {other:?}"),
        }
    }

    // --- Buy ---

    #[tokio::test]
    async fn buy_creates_holding_and_debits_balance() {
        let (_, _, service) = setup(&[("RELIANCE", dec!(150))]);

        let transaction = service.buy("u1", "RELIANCE", 10).await.unwrap();
        assert_eq!(transaction.transaction_type, TransactionType::Buy);
        assert_eq!(transaction.total, dec!(1500));

        let portfolio = service.get_portfolio("u1").await.unwrap();
        assert_eq!(portfolio.balance, Decimal::from(INITIAL_BALANCE) - dec!(1500));
        assert_eq!(portfolio.total_invested, dec!(1500));
        assert_eq!(portfolio.holdings.len(), 1);
        assert_eq!(portfolio.holdings[0].quantity, 10);
        assert_eq!(portfolio.holdings[0].avg_price, dec!(150));
        assert_eq!(portfolio.transactions.len(), 1);
    }

    #[tokio::test]
    async fn buy_rejects_insufficient_balance_without_mutation() {
        let (repository, _, service) = setup(&[("MARUTI", dec!(9876.50))]);
        service.get_portfolio("u1").await.unwrap();
        let before = repository.snapshot();

        let result = service.buy("u1", "MARUTI", 11).await;
        assert_ledger_error(
            result,
            LedgerError::InsufficientBalance {
                required: dec!(9876.50) * dec!(11),
                available: Decimal::from(INITIAL_BALANCE),
            },
        );

        let after = repository.snapshot();
        assert_eq!(before.portfolios, after.portfolios);
        assert_eq!(before.holdings, after.holdings);
        assert_eq!(before.transactions, after.transactions);
    }

    #[tokio::test]
    async fn buy_rejects_non_positive_quantity() {
        let (repository, _, service) = setup(&[("ITC", dec!(456.90))]);

        assert_ledger_error(
            service.buy("u1", "ITC", 0).await,
            LedgerError::InvalidQuantity(0),
        );
        assert_ledger_error(
            service.buy("u1", "ITC", -4).await,
            LedgerError::InvalidQuantity(-4),
        );
        assert!(repository.snapshot().transactions.is_empty());
    }

    #[tokio::test]
    async fn buy_rejects_unknown_or_zero_price() {
        let (_, quotes, service) = setup(&[]);
        assert_ledger_error(
            service.buy("u1", "GHOST", 1).await,
            LedgerError::PriceUnavailable("GHOST".to_string()),
        );

        quotes.replace_all(vec![quote("ITC", Decimal::ZERO)]);
        assert_ledger_error(
            service.buy("u1", "ITC", 1).await,
            LedgerError::PriceUnavailable("ITC".to_string()),
        );
    }

    // --- Sell ---

    #[tokio::test]
    async fn sell_rejects_symbol_not_owned() {
        let (_, _, service) = setup(&[("TCS", dec!(3678.50))]);
        assert_ledger_error(
            service.sell("u1", "TCS", 1).await,
            LedgerError::NoSuchHolding("TCS".to_string()),
        );
    }

    #[tokio::test]
    async fn sell_rejects_oversized_quantity_without_mutation() {
        let (repository, _, service) = setup(&[("TCS", dec!(3678.50))]);
        service.buy("u1", "TCS", 5).await.unwrap();
        let before = repository.snapshot();

        assert_ledger_error(
            service.sell("u1", "TCS", 6).await,
            LedgerError::InsufficientShares {
                symbol: "TCS".to_string(),
                requested: 6,
                held: 5,
            },
        );

        let after = repository.snapshot();
        assert_eq!(before.portfolios, after.portfolios);
        assert_eq!(before.holdings, after.holdings);
        assert_eq!(before.transactions, after.transactions);
    }

    #[tokio::test]
    async fn buy_then_full_sell_at_same_price_restores_balance() {
        let (_, _, service) = setup(&[("INFY", dec!(1534.80))]);

        service.buy("u1", "INFY", 12).await.unwrap();
        service.sell("u1", "INFY", 12).await.unwrap();

        let portfolio = service.get_portfolio("u1").await.unwrap();
        assert_eq!(portfolio.balance, Decimal::from(INITIAL_BALANCE));
        assert!(portfolio.holdings.is_empty());
        assert_eq!(portfolio.total_invested, Decimal::ZERO);
        assert_eq!(portfolio.transactions.len(), 2);
        // Newest first.
        assert_eq!(
            portfolio.transactions[0].transaction_type,
            TransactionType::Sell
        );
    }

    #[tokio::test]
    async fn worked_example_buy_buy_sell() {
        let (_, quotes, service) = setup(&[("RELIANCE", dec!(150))]);

        service.buy("u1", "RELIANCE", 10).await.unwrap();
        quotes.replace_all(vec![quote("RELIANCE", dec!(160))]);
        service.buy("u1", "RELIANCE", 5).await.unwrap();
        quotes.replace_all(vec![quote("RELIANCE", dec!(170))]);
        let sale = service.sell("u1", "RELIANCE", 6).await.unwrap();
        assert_eq!(sale.total, dec!(1020));

        let portfolio = service.get_portfolio("u1").await.unwrap();
        let holding = &portfolio.holdings[0];
        assert_eq!(holding.quantity, 9);
        assert!((holding.invested - dec!(1380)).abs() < dec!(0.000001));
        assert!((holding.avg_price - dec!(2300) / dec!(15)).abs() < dec!(0.000001));
        assert_eq!(
            portfolio.balance,
            Decimal::from(INITIAL_BALANCE) - dec!(1500) - dec!(800) + dec!(1020)
        );
    }

    // --- Reprice ---

    #[tokio::test]
    async fn reprice_updates_matching_holdings_only() {
        let (_, _, service) = setup(&[("ITC", dec!(450)), ("WIPRO", dec!(440))]);
        service.buy("u1", "ITC", 10).await.unwrap();
        service.buy("u1", "WIPRO", 10).await.unwrap();

        let prices = HashMap::from([("ITC".to_string(), dec!(500))]);
        service.reprice("u1", &prices).await.unwrap();

        let portfolio = service.get_portfolio("u1").await.unwrap();
        let itc = portfolio.holdings.iter().find(|h| h.symbol == "ITC").unwrap();
        let wipro = portfolio
            .holdings
            .iter()
            .find(|h| h.symbol == "WIPRO")
            .unwrap();
        assert_eq!(itc.current_price, dec!(500));
        assert_eq!(itc.profit_loss, dec!(500));
        assert_eq!(wipro.current_price, dec!(440));
        assert_eq!(
            portfolio.current_value,
            itc.current_value + wipro.current_value
        );
        // No balance or transaction effects.
        assert_eq!(portfolio.transactions.len(), 2);
    }

    // --- Reset ---

    #[tokio::test]
    async fn reset_restores_initial_state() {
        let (_, _, service) = setup(&[("HDFC", dec!(1689.25))]);
        service.buy("u1", "HDFC", 20).await.unwrap();
        service.sell("u1", "HDFC", 3).await.unwrap();

        service.reset("u1").await.unwrap();

        let portfolio = service.get_portfolio("u1").await.unwrap();
        assert_eq!(portfolio.balance, Decimal::from(INITIAL_BALANCE));
        assert!(portfolio.holdings.is_empty());
        assert!(portfolio.transactions.is_empty());
        assert_eq!(portfolio.total_invested, Decimal::ZERO);
        assert_eq!(portfolio.profit_loss_percent, Decimal::ZERO);
    }

    // --- Aggregate consistency ---

    #[tokio::test]
    async fn aggregates_never_drift_over_random_sequences() {
        let symbols = ["RELIANCE", "TCS", "INFY", "ITC", "WIPRO"];
        let (repository, quotes, service) = setup(&[]);
        let mut rng = StdRng::seed_from_u64(20_240_817);

        for _ in 0..1_000 {
            let symbol = symbols[rng.gen_range(0..symbols.len())];
            let price = Decimal::new(rng.gen_range(100_00..5_000_00), 2);
            quotes.replace_all(vec![quote(symbol, price)]);

            let quantity = rng.gen_range(1..20);
            let result = if rng.gen_bool(0.5) {
                service.buy("u1", symbol, quantity).await
            } else {
                service.sell("u1", symbol, quantity).await
            };
            match result {
                Ok(_) => {}
                Err(Error::Ledger(_)) => {} // rejected commands are fine
                Err(other) => panic!("unexpected failure: {other}"),
            }

            let summary = repository.get_or_create_portfolio("u1").unwrap();
            let holdings = repository.list_holdings("u1").unwrap();
            let aggregates = portfolio_aggregates(&holdings);
            assert!(
                (summary.total_invested - aggregates.total_invested).abs() < dec!(0.000001),
                "totalInvested drifted from holdings sum"
            );
            assert!(
                (summary.current_value - aggregates.current_value).abs() < dec!(0.000001),
                "currentValue drifted from holdings sum"
            );
            assert!(summary.balance >= Decimal::ZERO);
            assert!(holdings.iter().all(|h| h.quantity > 0));
        }
    }
}
