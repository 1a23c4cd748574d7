//! Forecast and sentiment panels
//!
//! Both are request/response forms with no state kept between invocations.
//! Every outcome, including transport failures, becomes a view the panel can
//! show next to its form.

use tracing::{error, info, warn};

use crate::client::DashboardApi;
use crate::types::{Candle, ForecastRequest, SentimentReport};

pub const FORECAST_INVALID: &str = "Please fill all required fields correctly.";

/// Rows in the forecast table
pub const FORECAST_TABLE_ROWS: usize = 5;

/// Headlines listed under a sentiment report
pub const SENTIMENT_HEADLINES: usize = 5;

/// Outcome of one forecast submission
#[derive(Debug, Clone, PartialEq)]
pub enum ForecastView {
    Invalid,
    Chart {
        ticker: String,
        /// Whole series, ascending by date
        candles: Vec<Candle>,
        /// Last rows, ascending by date
        table: Vec<Candle>,
    },
    Failed(String),
    Error(String),
}

impl ForecastView {
    /// Status line for non-chart outcomes
    pub fn message(&self) -> Option<String> {
        match self {
            ForecastView::Invalid => Some(FORECAST_INVALID.to_string()),
            ForecastView::Chart { .. } => None,
            ForecastView::Failed(msg) => Some(format!("Failed: {msg}")),
            ForecastView::Error(msg) => Some(format!("Error: {msg}")),
        }
    }
}

/// Validate the raw form fields
pub fn forecast_request(ticker: &str, days: &str, currency: &str) -> Option<ForecastRequest> {
    let ticker = ticker.trim();
    let days = days.trim().parse::<u32>().ok().filter(|d| *d >= 1)?;
    if ticker.is_empty() {
        return None;
    }
    Some(ForecastRequest {
        ticker: ticker.to_string(),
        days,
        currency: currency.trim().to_string(),
    })
}

pub async fn run_forecast(
    api: &dyn DashboardApi,
    ticker: &str,
    days: &str,
    currency: &str,
) -> ForecastView {
    let Some(request) = forecast_request(ticker, days, currency) else {
        return ForecastView::Invalid;
    };
    info!("Requesting {}-day forecast for {}", request.days, request.ticker);

    let mut response = match api.forecast(&request).await {
        Ok(r) => r,
        Err(e) => {
            error!("Forecast request failed: {e}");
            return ForecastView::Error(e.to_string());
        }
    };

    let result = response.results.remove(&request.ticker).unwrap_or_default();
    match result.forecast {
        Some(series) if response.status == "success" => ForecastView::Chart {
            ticker: request.ticker,
            candles: series.candles(),
            table: series.tail(FORECAST_TABLE_ROWS),
        },
        _ => {
            let message = result
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| "Unknown error".to_string());
            warn!("Forecast for {} failed: {message}", request.ticker);
            ForecastView::Failed(message)
        }
    }
}

/// Outcome of one sentiment submission
#[derive(Debug, Clone, PartialEq)]
pub enum SentimentView {
    NoData { ticker: String, message: String },
    Report(Box<SentimentReport>),
    Error(String),
}

/// Trim and upper-case the ticker field; blank input yields `None`
pub fn sentiment_ticker(input: &str) -> Option<String> {
    let ticker = input.trim().to_uppercase();
    (!ticker.is_empty()).then_some(ticker)
}

/// Run an analysis; blank input does nothing and returns `None`
pub async fn run_sentiment(api: &dyn DashboardApi, input: &str) -> Option<SentimentView> {
    let ticker = sentiment_ticker(input)?;
    info!("Analyzing sentiment for {ticker}");

    let view = match api.sentiment(&ticker).await {
        Ok(report) if !report.success => SentimentView::NoData {
            ticker,
            message: report.message.unwrap_or_default(),
        },
        Ok(mut report) => {
            if report.ticker.is_empty() {
                report.ticker = ticker;
            }
            report.headlines.truncate(SENTIMENT_HEADLINES);
            SentimentView::Report(Box::new(report))
        }
        Err(e) => {
            error!("Sentiment request failed: {e}");
            SentimentView::Error(e.to_string())
        }
    };
    Some(view)
}
