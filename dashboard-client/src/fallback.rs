//! Fallback data used when a live fetch fails or comes back empty

use crate::types::{Allocation, MarketQuote, PortfolioSnapshot};

/// Sample portfolio shown when `/api/portfolio` is unavailable
pub fn portfolio() -> PortfolioSnapshot {
    PortfolioSnapshot {
        total_value: 125_420.50,
        daily_change: 2_840.25,
        daily_change_percent: 2.32,
        total_return: 25_420.50,
        total_return_percent: 25.42,
        allocation: Allocation {
            stocks: 65.2,
            bonds: 15.8,
            crypto: 12.5,
            cash: 6.5,
        },
    }
}

/// Sample quotes shown when `/api/market-data` fails or returns nothing
pub fn market_quotes() -> Vec<MarketQuote> {
    vec![
        MarketQuote::new("AAPL", 195.84, 2.34, 1.21),
        MarketQuote::new("GOOGL", 142.56, -1.23, -0.85),
        MarketQuote::new("MSFT", 378.91, 4.67, 1.25),
        MarketQuote::new("TSLA", 248.73, -3.21, -1.27),
        MarketQuote::new("NVDA", 567.12, 12.45, 2.24),
        MarketQuote::new("BTC-USD", 67_234.56, 1_823.45, 2.78),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_quotes_order() {
        let symbols: Vec<_> = market_quotes().into_iter().map(|q| q.symbol).collect();
        assert_eq!(symbols, ["AAPL", "GOOGL", "MSFT", "TSLA", "NVDA", "BTC-USD"]);
    }

    #[test]
    fn test_fallback_allocation_sums_to_100() {
        let a = portfolio().allocation;
        assert!((a.stocks + a.bonds + a.crypto + a.cash - 100.0).abs() < 1e-9);
    }
}
