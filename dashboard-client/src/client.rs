//! Dashboard API client
//!
//! Thin JSON-over-HTTP client for the dashboard backend:
//! - Portfolio, market data, team and news collections
//! - Forecast, sentiment and chat actions
//!
//! One attempt per call: no retry, no timeout, no backoff.

use async_trait::async_trait;
use reqwest::{Method, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::error::{DashboardError, Result};
use crate::types::{
    ChatReply, ChatRequest, ForecastRequest, ForecastResponse, MarketQuote, NewsArticle,
    PortfolioSnapshot, SentimentReport, TeamMember,
};

/// Per-request options (method, JSON body, extra headers)
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<serde_json::Value>,
    pub headers: Vec<(String, String)>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            body: None,
            headers: Vec::new(),
        }
    }
}

impl RequestOptions {
    /// POST with a JSON body
    pub fn post<B: Serialize>(body: &B) -> Result<Self> {
        Ok(Self {
            method: Method::POST,
            body: Some(serde_json::to_value(body)?),
            headers: Vec::new(),
        })
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

/// Operations the dashboard needs from its backend
#[async_trait]
pub trait DashboardApi: Send + Sync {
    async fn portfolio(&self) -> Result<PortfolioSnapshot>;
    async fn market_data(&self) -> Result<Vec<MarketQuote>>;
    async fn team(&self) -> Result<Vec<TeamMember>>;
    async fn news(&self) -> Result<Vec<NewsArticle>>;
    async fn forecast(&self, request: &ForecastRequest) -> Result<ForecastResponse>;
    async fn sentiment(&self, ticker: &str) -> Result<SentimentReport>;
    async fn chat(&self, message: &str) -> Result<ChatReply>;
}

/// Dashboard API client
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Create new client for a base URL such as `http://localhost:8000`
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Perform a request and parse the JSON body
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<T> {
        let url = format!("{}{endpoint}", self.base_url);
        debug!("Making API request to: {url}");

        let mut builder = self
            .http
            .request(options.method.clone(), &url)
            .header("Content-Type", "application/json");
        for (name, value) in &options.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &options.body {
            builder = builder.body(serde_json::to_vec(body)?);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                error!("API Request failed for {endpoint}: {e}");
                return Err(e.into());
            }
        };
        debug!("API response status: {} for {endpoint}", response.status());

        Self::handle_response(endpoint, response).await
    }

    /// Handle API response, checking for errors
    async fn handle_response<T: DeserializeOwned>(
        endpoint: &str,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".into());
            let status_text = status.canonical_reason().unwrap_or_default().to_string();
            error!("API Error for {endpoint}: {status} {body}");
            return Err(DashboardError::Api {
                status: status.as_u16(),
                status_text,
                body,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(DashboardError::from)
    }

    fn sentiment_endpoint(&self, ticker: &str) -> Result<String> {
        let mut url = Url::parse(&format!("{}/api/sentiment-analysis", self.base_url))
            .map_err(|e| DashboardError::Config(format!("Invalid API base URL: {e}")))?;
        url.query_pairs_mut().append_pair("ticker", ticker);
        let query = url.query().unwrap_or_default();
        Ok(format!("/api/sentiment-analysis?{query}"))
    }
}

#[async_trait]
impl DashboardApi for ApiClient {
    async fn portfolio(&self) -> Result<PortfolioSnapshot> {
        self.request("/api/portfolio", RequestOptions::default()).await
    }

    async fn market_data(&self) -> Result<Vec<MarketQuote>> {
        self.request("/api/market-data", RequestOptions::default()).await
    }

    async fn team(&self) -> Result<Vec<TeamMember>> {
        self.request("/api/team", RequestOptions::default()).await
    }

    async fn news(&self) -> Result<Vec<NewsArticle>> {
        self.request("/api/news", RequestOptions::default()).await
    }

    async fn forecast(&self, request: &ForecastRequest) -> Result<ForecastResponse> {
        self.request("/api/forecast", RequestOptions::post(request)?)
            .await
    }

    async fn sentiment(&self, ticker: &str) -> Result<SentimentReport> {
        let endpoint = self.sentiment_endpoint(ticker)?;
        self.request(&endpoint, RequestOptions::default()).await
    }

    async fn chat(&self, message: &str) -> Result<ChatReply> {
        let body = ChatRequest {
            message: message.to_string(),
        };
        self.request("/api/chat", RequestOptions::post(&body)?).await
    }
}
