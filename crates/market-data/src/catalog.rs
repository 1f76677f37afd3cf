//! The fixed stock universe available to traders.

use rust_decimal::Decimal;

/// One listing in the tradable universe. Base prices are stored in
/// paise (hundredths) so they can live in a const table.
#[derive(Debug, Clone, Copy)]
pub struct StockListing {
    pub symbol: &'static str,
    pub name: &'static str,
    base_price_cents: i64,
    pub volume: u64,
}

impl StockListing {
    /// Reference price the simulation anchors to.
    pub fn base_price(&self) -> Decimal {
        Decimal::new(self.base_price_cents, 2)
    }
}

const UNIVERSE: &[StockListing] = &[
    StockListing { symbol: "RELIANCE", name: "Reliance Industries Ltd.", base_price_cents: 245_675, volume: 1_245_000 },
    StockListing { symbol: "TCS", name: "Tata Consultancy Services", base_price_cents: 367_850, volume: 892_000 },
    StockListing { symbol: "HDFC", name: "HDFC Bank Ltd.", base_price_cents: 168_925, volume: 2_340_000 },
    StockListing { symbol: "INFY", name: "Infosys Ltd.", base_price_cents: 153_480, volume: 1_567_000 },
    StockListing { symbol: "ICICI", name: "ICICI Bank Ltd.", base_price_cents: 96_745, volume: 1_890_000 },
    StockListing { symbol: "BHARTI", name: "Bharti Airtel Ltd.", base_price_cents: 89_230, volume: 945_000 },
    StockListing { symbol: "ITC", name: "ITC Ltd.", base_price_cents: 45_690, volume: 3_120_000 },
    StockListing { symbol: "WIPRO", name: "Wipro Ltd.", base_price_cents: 44_560, volume: 1_234_000 },
    StockListing { symbol: "AXISBANK", name: "Axis Bank Ltd.", base_price_cents: 108_975, volume: 1_456_000 },
    StockListing { symbol: "MARUTI", name: "Maruti Suzuki India Ltd.", base_price_cents: 987_650, volume: 234_000 },
];

/// All listings, in display order.
pub fn stock_universe() -> &'static [StockListing] {
    UNIVERSE
}

/// Looks up a listing by symbol.
pub fn stock_listing(symbol: &str) -> Option<&'static StockListing> {
    UNIVERSE.iter().find(|l| l.symbol == symbol)
}
