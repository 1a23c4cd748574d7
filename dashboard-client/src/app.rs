//! Dashboard session
//!
//! Owns the API client, the state store and the pollers for one signed-in
//! session. Interactive operations return their errors to the caller; the
//! background pollers only log.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{error, info};

use crate::client::{ApiClient, DashboardApi};
use crate::config::Config;
use crate::error::Result;
use crate::loader::{LoadReport, load_all};
use crate::panels::{self, ForecastView, SentimentView};
use crate::refresh::{RefreshLoop, refresh_market};
use crate::state::Store;
use crate::trading::{self, TradeReceipt, parse_quantity};
use crate::types::{ChatReply, Collection, TradeAction};

pub struct Dashboard {
    config: Config,
    api: Arc<dyn DashboardApi>,
    store: Arc<Store>,
    refresh: Option<RefreshLoop>,
}

impl Dashboard {
    /// Dashboard talking to the configured API
    pub fn new(config: Config) -> Self {
        let api = Arc::new(ApiClient::new(&config.api_base_url));
        Self::with_api(config, api)
    }

    pub fn with_api(config: Config, api: Arc<dyn DashboardApi>) -> Self {
        Self {
            config,
            api,
            store: Arc::new(Store::default()),
            refresh: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    /// Collection change events
    pub fn subscribe(&self) -> broadcast::Receiver<Collection> {
        self.store.subscribe()
    }

    pub fn is_running(&self) -> bool {
        self.refresh.as_ref().is_some_and(RefreshLoop::is_running)
    }

    /// Initial load, then start the pollers
    pub async fn start(&mut self) -> LoadReport {
        if let Some(previous) = self.refresh.take() {
            previous.stop().await;
        }
        let report = load_all(self.api.as_ref(), &self.store).await;
        self.refresh = Some(RefreshLoop::start(
            self.api.clone(),
            self.store.clone(),
            self.config.market_refresh(),
            self.config.portfolio_refresh(),
        ));
        info!("Dashboard started");
        report
    }

    /// Stop the pollers and any in-flight background fetch
    pub async fn shutdown(&mut self) {
        if let Some(refresh) = self.refresh.take() {
            refresh.stop().await;
            info!("Dashboard stopped");
        }
    }

    /// User-triggered market refresh; errors go back to the caller
    pub async fn refresh_market_now(&self) -> Result<usize> {
        info!("Manually refreshing market data...");
        refresh_market(self.api.as_ref(), &self.store)
            .await
            .inspect_err(|e| error!("Manual refresh failed: {e}"))
    }

    /// Mock trade from raw form input
    pub async fn trade(
        &self,
        action: TradeAction,
        symbol: &str,
        quantity: &str,
    ) -> Result<TradeReceipt> {
        // Symbol problems are reported before quantity problems
        let quantity = parse_quantity(quantity).unwrap_or(0);
        trading::trade(&self.store, action, symbol, quantity).await
    }

    /// One chat round trip; pair with `ChatSession::begin`/`finish` so the
    /// thinking indicator can be rendered in between
    pub async fn ask(&self, message: &str) -> Result<ChatReply> {
        self.api.chat(message).await
    }

    pub async fn forecast(&self, ticker: &str, days: &str, currency: &str) -> ForecastView {
        panels::run_forecast(self.api.as_ref(), ticker, days, currency).await
    }

    pub async fn sentiment(&self, ticker: &str) -> Option<SentimentView> {
        panels::run_sentiment(self.api.as_ref(), ticker).await
    }
}
