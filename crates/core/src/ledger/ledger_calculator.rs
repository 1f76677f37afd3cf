//! Pure ledger arithmetic.
//!
//! These functions compute the next holding state for a validated
//! command. They never touch storage and never fail; all validation
//! (positive quantity, known price, sufficient balance/shares) happens
//! in the service before they are called.

use rust_decimal::Decimal;

use crate::ledger::ledger_model::{Holding, PortfolioAggregates};

/// Derived fields for a holding given its cost basis and a price.
fn derive(quantity: i64, invested: Decimal, price: Decimal) -> (Decimal, Decimal, Decimal) {
    let current_value = Decimal::from(quantity) * price;
    let profit_loss = current_value - invested;
    let profit_loss_percent = if invested > Decimal::ZERO {
        profit_loss / invested * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };
    (current_value, profit_loss, profit_loss_percent)
}

/// Applies a buy of `quantity` shares at `price` to an optional
/// existing holding.
///
/// The average cost basis is recomputed from cumulative invested
/// capital, `new_invested / new_quantity`, so repeated partial buys
/// weight by size rather than averaging raw prices.
pub fn buy_holding(
    existing: Option<&Holding>,
    symbol: &str,
    name: &str,
    quantity: i64,
    price: Decimal,
) -> Holding {
    let total = price * Decimal::from(quantity);

    let (new_quantity, new_invested) = match existing {
        Some(holding) => (holding.quantity + quantity, holding.invested + total),
        None => (quantity, total),
    };
    let avg_price = new_invested / Decimal::from(new_quantity);
    let (current_value, profit_loss, profit_loss_percent) = derive(new_quantity, new_invested, price);

    Holding {
        symbol: symbol.to_string(),
        name: name.to_string(),
        quantity: new_quantity,
        avg_price,
        current_price: price,
        invested: new_invested,
        current_value,
        profit_loss,
        profit_loss_percent,
    }
}

/// Result of applying a sell to a holding.
#[derive(Debug, Clone, PartialEq)]
pub struct SellOutcome {
    /// The holding after the sale; `None` when fully liquidated.
    pub remaining: Option<Holding>,
    /// Invested capital attributed to the sold shares.
    pub invested_sold: Decimal,
    /// Cash received: quantity x price.
    pub proceeds: Decimal,
}

/// Applies a sell of `quantity` shares at `price`.
///
/// The invested capital released is apportioned proportionally:
/// `invested_sold = invested * quantity / old_quantity`. The remaining
/// invested is the running value minus that share, not recomputed from
/// `avg_price * remaining_quantity`; `avg_price` itself is invariant
/// across sells. The remaining invested is clamped at zero to guard
/// against rounding underflow.
pub fn sell_holding(holding: &Holding, quantity: i64, price: Decimal) -> SellOutcome {
    let proceeds = price * Decimal::from(quantity);

    if quantity == holding.quantity {
        return SellOutcome {
            remaining: None,
            invested_sold: holding.invested,
            proceeds,
        };
    }

    let proportion_sold = Decimal::from(quantity) / Decimal::from(holding.quantity);
    let invested_sold = holding.invested * proportion_sold;
    let new_quantity = holding.quantity - quantity;
    let new_invested = (holding.invested - invested_sold).max(Decimal::ZERO);
    let (current_value, profit_loss, profit_loss_percent) = derive(new_quantity, new_invested, price);

    SellOutcome {
        remaining: Some(Holding {
            symbol: holding.symbol.clone(),
            name: holding.name.clone(),
            quantity: new_quantity,
            avg_price: holding.avg_price,
            current_price: price,
            invested: new_invested,
            current_value,
            profit_loss,
            profit_loss_percent,
        }),
        invested_sold,
        proceeds,
    }
}

/// Recomputes the derived fields of a holding for a new market price.
/// Idempotent: repricing at the same price is a no-op.
pub fn reprice_holding(holding: &Holding, price: Decimal) -> Holding {
    let (current_value, profit_loss, profit_loss_percent) =
        derive(holding.quantity, holding.invested, price);
    Holding {
        current_price: price,
        current_value,
        profit_loss,
        profit_loss_percent,
        ..holding.clone()
    }
}

/// Portfolio totals summed from the full holding set.
pub fn portfolio_aggregates(holdings: &[Holding]) -> PortfolioAggregates {
    let total_invested: Decimal = holdings.iter().map(|h| h.invested).sum();
    let current_value: Decimal = holdings.iter().map(|h| h.current_value).sum();
    let profit_loss = current_value - total_invested;
    let profit_loss_percent = if total_invested > Decimal::ZERO {
        profit_loss / total_invested * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };
    PortfolioAggregates {
        total_invested,
        current_value,
        profit_loss,
        profit_loss_percent,
    }
}
