//! Mock trading against the local portfolio
//!
//! Trades never leave the client: a buy adds the trade value to the portfolio
//! total, a sell subtracts it. Every call ends in exactly one of
//! {receipt + mutation, error + no mutation}.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{DashboardError, Result};
use crate::render::format::usd;
use crate::state::{AppState, Store};
use crate::types::{Collection, TradeAction};

pub const SELECT_STOCK: &str = "Please select a valid stock.";
pub const INVALID_QUANTITY: &str = "Please enter a valid quantity.";
pub const STOCK_NOT_FOUND: &str = "Stock data not found.";

/// Record of one executed mock trade
#[derive(Debug, Clone, PartialEq)]
pub struct TradeReceipt {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub action: TradeAction,
    pub symbol: String,
    pub quantity: u32,
    pub price: f64,
    pub value: f64,
    pub total_after: f64,
}

impl TradeReceipt {
    /// e.g. `Successfully bought 10 of AAPL for $1,000.00`
    pub fn message(&self) -> String {
        let verb = match self.action {
            TradeAction::Buy => "bought",
            TradeAction::Sell => "sold",
        };
        format!(
            "Successfully {verb} {} of {} for {}",
            self.quantity,
            self.symbol,
            usd(self.value)
        )
    }
}

/// Parse the quantity field; only positive whole numbers are accepted
pub fn parse_quantity(text: &str) -> Result<u32> {
    match text.trim().parse::<u32>() {
        Ok(q) if q > 0 => Ok(q),
        _ => Err(DashboardError::Validation(INVALID_QUANTITY.into())),
    }
}

/// Validate and apply a trade to `state`
pub fn execute(
    state: &mut AppState,
    action: TradeAction,
    symbol: &str,
    quantity: u32,
) -> Result<TradeReceipt> {
    if symbol.trim().is_empty() || state.market.is_empty() {
        return Err(DashboardError::Validation(SELECT_STOCK.into()));
    }
    if quantity == 0 {
        return Err(DashboardError::Validation(INVALID_QUANTITY.into()));
    }
    let price = state
        .quote(symbol)
        .map(|q| q.price)
        .ok_or_else(|| DashboardError::Validation(STOCK_NOT_FOUND.into()))?;

    let value = f64::from(quantity) * price;
    let portfolio = &mut state.portfolio;
    match action {
        TradeAction::Buy => portfolio.total_value += value,
        TradeAction::Sell => {
            if value > portfolio.total_value {
                return Err(DashboardError::InsufficientFunds {
                    required: value,
                    available: portfolio.total_value,
                });
            }
            portfolio.total_value -= value;
        }
    }

    Ok(TradeReceipt {
        id: Uuid::new_v4(),
        timestamp: Utc::now(),
        action,
        symbol: symbol.to_string(),
        quantity,
        price,
        value,
        total_after: portfolio.total_value,
    })
}

/// Execute a trade against the store; the portfolio is notified only on success
pub async fn trade(
    store: &Store,
    action: TradeAction,
    symbol: &str,
    quantity: u32,
) -> Result<TradeReceipt> {
    let result = store
        .update(Collection::Portfolio, |state| {
            execute(state, action, symbol, quantity)
        })
        .await;

    match &result {
        Ok(receipt) => info!(
            "Mock {} {} {} @ {:.2} = {:.2} (total {:.2})",
            receipt.action,
            receipt.quantity,
            receipt.symbol,
            receipt.price,
            receipt.value,
            receipt.total_after
        ),
        Err(e) => warn!("Mock {action} {quantity} {symbol} rejected: {e}"),
    }
    result
}

/// Transient message shown under the trade form
#[derive(Debug, Clone, PartialEq)]
pub struct TradeMessage {
    pub text: String,
    pub is_error: bool,
    shown_at: Instant,
}

impl TradeMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
            shown_at: Instant::now(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
            shown_at: Instant::now(),
        }
    }

    pub fn from_result(result: &Result<TradeReceipt>) -> Self {
        match result {
            Ok(receipt) => Self::success(receipt.message()),
            Err(e) => Self::error(e.to_string()),
        }
    }

    pub fn is_visible(&self, ttl: Duration) -> bool {
        self.shown_at.elapsed() < ttl
    }

    pub fn expires_at(&self, ttl: Duration) -> Instant {
        self.shown_at + ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MarketQuote, PortfolioSnapshot};

    fn state(total: f64) -> AppState {
        AppState {
            portfolio: PortfolioSnapshot {
                total_value: total,
                ..PortfolioSnapshot::default()
            },
            market: vec![
                MarketQuote::new("AAPL", 100.0, 1.0, 1.0),
                MarketQuote::new("MSFT", 500.0, -2.0, -0.4),
            ],
            ..AppState::default()
        }
    }

    #[tokio::test]
    async fn test_buy_adds_trade_value() {
        let store = Store::new(state(1000.0));
        let mut rx = store.subscribe();

        let receipt = trade(&store, TradeAction::Buy, "AAPL", 10)
            .await
            .expect("buy accepted");

        assert!((store.read().await.portfolio.total_value - 2000.0).abs() < 1e-9);
        assert_eq!(receipt.message(), "Successfully bought 10 of AAPL for $1,000.00");
        assert_eq!(rx.try_recv().ok(), Some(Collection::Portfolio));
    }

    #[tokio::test]
    async fn test_oversized_sell_is_rejected() {
        let store = Store::new(state(1000.0));
        let mut rx = store.subscribe();

        let err = trade(&store, TradeAction::Sell, "MSFT", 10)
            .await
            .expect_err("sell exceeds portfolio");

        assert_eq!(
            err.to_string(),
            "Cannot sell. Trade value ($5,000.00) exceeds portfolio value ($1,000.00)."
        );
        assert!(err.is_validation());
        assert!((store.read().await.portfolio.total_value - 1000.0).abs() < 1e-9);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_sell_within_value() {
        let mut state = state(1000.0);
        let receipt = execute(&mut state, TradeAction::Sell, "AAPL", 10).expect("sell accepted");
        assert!(state.portfolio.total_value.abs() < 1e-9);
        assert_eq!(receipt.message(), "Successfully sold 10 of AAPL for $1,000.00");
    }

    #[test]
    fn test_validation_messages() {
        let mut empty = AppState::default();
        let err = execute(&mut empty, TradeAction::Buy, "AAPL", 1).expect_err("no market");
        assert_eq!(err.to_string(), SELECT_STOCK);

        let mut state = state(1000.0);
        let err = execute(&mut state, TradeAction::Buy, "", 1).expect_err("no symbol");
        assert_eq!(err.to_string(), SELECT_STOCK);

        let err = execute(&mut state, TradeAction::Buy, "AMZN", 1).expect_err("unknown symbol");
        assert_eq!(err.to_string(), STOCK_NOT_FOUND);

        let err = execute(&mut state, TradeAction::Buy, "AAPL", 0).expect_err("zero quantity");
        assert_eq!(err.to_string(), INVALID_QUANTITY);
        assert!((state.portfolio.total_value - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity(" 10 ").ok(), Some(10));
        for bad in ["", "0", "-3", "2.5", "ten"] {
            let err = parse_quantity(bad).expect_err("rejected");
            assert_eq!(err.to_string(), INVALID_QUANTITY);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_message_expires_after_ttl() {
        let ttl = Duration::from_millis(4000);
        let message = TradeMessage::error(STOCK_NOT_FOUND);
        assert!(message.is_visible(ttl));

        tokio::time::advance(Duration::from_millis(4001)).await;
        assert!(!message.is_visible(ttl));
    }
}
