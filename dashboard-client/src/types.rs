//! Common types for the dashboard client
//!
//! Wire shapes of the dashboard API plus the shared enums used across modules.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Portfolio allocation percentages
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    #[serde(default)]
    pub stocks: f64,
    #[serde(default)]
    pub bonds: f64,
    #[serde(default)]
    pub crypto: f64,
    #[serde(default)]
    pub cash: f64,
}

impl Allocation {
    /// Labelled slices in display order
    pub fn slices(&self) -> [(&'static str, f64); 4] {
        [
            ("Stocks", self.stocks),
            ("Bonds", self.bonds),
            ("Crypto", self.crypto),
            ("Cash", self.cash),
        ]
    }
}

/// Portfolio snapshot, replaced wholesale on each fetch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSnapshot {
    pub total_value: f64,
    pub daily_change: f64,
    pub daily_change_percent: f64,
    pub total_return: f64,
    pub total_return_percent: f64,
    #[serde(default)]
    pub allocation: Allocation,
}

/// Latest price and change figures for one instrument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketQuote {
    pub symbol: String,
    pub price: f64,
    /// Missing change figures read as zero
    #[serde(default, deserialize_with = "null_as_zero")]
    pub change: f64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub change_percent: f64,
}

impl MarketQuote {
    pub fn new(symbol: &str, price: f64, change: f64, change_percent: f64) -> Self {
        Self {
            symbol: symbol.to_string(),
            price,
            change,
            change_percent,
        }
    }

    pub fn is_up(&self) -> bool {
        self.change >= 0.0
    }
}

fn null_as_zero<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

/// Team roster entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub name: String,
    pub role: String,
    pub description: String,
    pub image: String,
    pub linkedin: String,
    #[serde(default)]
    pub expertise: Vec<String>,
}

/// News headline; sentiment is a label supplied by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub sentiment: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// Data collections held in application state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Portfolio,
    Market,
    Team,
    News,
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Collection::Portfolio => write!(f, "portfolio"),
            Collection::Market => write!(f, "market-data"),
            Collection::Team => write!(f, "team"),
            Collection::News => write!(f, "news"),
        }
    }
}

/// Mock trade side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeAction {
    Buy,
    Sell,
}

impl std::fmt::Display for TradeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeAction::Buy => write!(f, "buy"),
            TradeAction::Sell => write!(f, "sell"),
        }
    }
}

impl std::str::FromStr for TradeAction {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buy" => Ok(TradeAction::Buy),
            "sell" => Ok(TradeAction::Sell),
            other => Err(format!("unknown trade action: {other}")),
        }
    }
}

/// Forecast request body
#[derive(Debug, Clone, Serialize)]
pub struct ForecastRequest {
    pub ticker: String,
    pub days: u32,
    pub currency: String,
}

/// OHLC series keyed by date; `BTreeMap` keeps ISO dates ascending
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OhlcSeries {
    #[serde(default)]
    pub open: BTreeMap<String, f64>,
    #[serde(default)]
    pub high: BTreeMap<String, f64>,
    #[serde(default)]
    pub low: BTreeMap<String, f64>,
    #[serde(default)]
    pub close: BTreeMap<String, f64>,
}

/// One forecast candle
#[derive(Debug, Clone, PartialEq)]
pub struct Candle {
    pub date: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl OhlcSeries {
    /// Candles in ascending date order; dates are taken from the close series
    pub fn candles(&self) -> Vec<Candle> {
        self.close
            .iter()
            .map(|(date, close)| Candle {
                date: date.clone(),
                open: self.open.get(date).copied().unwrap_or(*close),
                high: self.high.get(date).copied().unwrap_or(*close),
                low: self.low.get(date).copied().unwrap_or(*close),
                close: *close,
            })
            .collect()
    }

    /// The last `n` candles, still ascending
    pub fn tail(&self, n: usize) -> Vec<Candle> {
        let candles = self.candles();
        let skip = candles.len().saturating_sub(n);
        candles.into_iter().skip(skip).collect()
    }
}

/// Per-ticker forecast result
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForecastResult {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub forecast: Option<OhlcSeries>,
}

/// `POST /api/forecast` response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub results: BTreeMap<String, ForecastResult>,
}

/// Headline sentiment label counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct SentimentCounts {
    #[serde(default)]
    pub positive: u32,
    #[serde(default)]
    pub neutral: u32,
    #[serde(default)]
    pub negative: u32,
}

/// Suggested allocation percentages from the sentiment service
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SuggestedAllocation {
    #[serde(default)]
    pub stocks: f64,
    #[serde(default)]
    pub bonds: f64,
    #[serde(default)]
    pub cash: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AllocationSuggestion {
    #[serde(default)]
    pub strategy: String,
    #[serde(default)]
    pub allocation: SuggestedAllocation,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScoredHeadline {
    pub text: String,
    pub label: String,
    pub score: f64,
}

/// `GET /api/sentiment-analysis` response
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SentimentReport {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub ticker: String,
    #[serde(default)]
    pub sentiment_counts: SentimentCounts,
    #[serde(default)]
    pub average_score: f64,
    #[serde(default)]
    pub allocation_suggestion: AllocationSuggestion,
    #[serde(default)]
    pub headlines: Vec<ScoredHeadline>,
}

/// `POST /api/chat` request body
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub message: String,
}

/// `POST /api/chat` response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatReply {
    pub response: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portfolio_wire_names() {
        let json = r#"{
            "totalValue": 1000.0, "dailyChange": 10.0, "dailyChangePercent": 1.0,
            "totalReturn": 100.0, "totalReturnPercent": 10.0,
            "allocation": {"stocks": 60, "bonds": 20, "crypto": 10, "cash": 10}
        }"#;
        let portfolio: PortfolioSnapshot = serde_json::from_str(json).expect("valid portfolio");
        assert!((portfolio.total_value - 1000.0).abs() < f64::EPSILON);
        assert!((portfolio.allocation.stocks - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_quote_null_change_reads_zero() {
        let json = r#"{"symbol": "AAPL", "price": 195.5, "change": null}"#;
        let quote: MarketQuote = serde_json::from_str(json).expect("valid quote");
        assert_eq!(quote.symbol, "AAPL");
        assert!(quote.change.abs() < f64::EPSILON);
        assert!(quote.change_percent.abs() < f64::EPSILON);
        assert!(quote.is_up());
    }

    #[test]
    fn test_ohlc_tail_is_ascending() {
        let json = r#"{
            "open":  {"2025-01-03": 3.0, "2025-01-01": 1.0, "2025-01-02": 2.0},
            "high":  {"2025-01-03": 3.5, "2025-01-01": 1.5, "2025-01-02": 2.5},
            "low":   {"2025-01-03": 2.5, "2025-01-01": 0.5, "2025-01-02": 1.5},
            "close": {"2025-01-03": 3.2, "2025-01-01": 1.2, "2025-01-02": 2.2}
        }"#;
        let series: OhlcSeries = serde_json::from_str(json).expect("valid series");
        let tail = series.tail(2);
        let dates: Vec<_> = tail.iter().map(|c| c.date.as_str()).collect();
        assert_eq!(dates, ["2025-01-02", "2025-01-03"]);
        assert_eq!(series.tail(10).len(), 3);
    }

    #[test]
    fn test_trade_action_parse() {
        assert_eq!("BUY".parse::<TradeAction>(), Ok(TradeAction::Buy));
        assert_eq!(" sell ".parse::<TradeAction>(), Ok(TradeAction::Sell));
        assert!("hold".parse::<TradeAction>().is_err());
    }
}
