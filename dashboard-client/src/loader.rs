//! Startup data load
//!
//! Issues the four collection requests concurrently. Each one is fallible on
//! its own: a failure substitutes that collection's fallback instead of
//! aborting the others.

use tracing::{error, info, warn};

use crate::client::DashboardApi;
use crate::fallback;
use crate::state::Store;
use crate::types::Collection;

/// Which collections were served from fallback data
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub fallbacks: Vec<Collection>,
}

impl LoadReport {
    pub fn used_fallback(&self, collection: Collection) -> bool {
        self.fallbacks.contains(&collection)
    }

    pub fn is_complete(&self) -> bool {
        self.fallbacks.is_empty()
    }
}

/// Load every collection into the store
pub async fn load_all(api: &dyn DashboardApi, store: &Store) -> LoadReport {
    info!("Loading all data from API...");
    let mut report = LoadReport::default();

    let (portfolio, market, team, news) =
        tokio::join!(api.portfolio(), api.market_data(), api.team(), api.news());

    let portfolio = portfolio.unwrap_or_else(|e| {
        error!("Portfolio API failed: {e}");
        info!("Using fallback portfolio data");
        report.fallbacks.push(Collection::Portfolio);
        fallback::portfolio()
    });

    // An empty list counts as a failed load
    let market = match market {
        Ok(quotes) if !quotes.is_empty() => {
            info!("Live market data loaded: {} items", quotes.len());
            quotes
        }
        Ok(_) => {
            warn!("Market data API returned no quotes, using fallback quotes");
            report.fallbacks.push(Collection::Market);
            fallback::market_quotes()
        }
        Err(e) => {
            error!("Market data API failed: {e}");
            report.fallbacks.push(Collection::Market);
            fallback::market_quotes()
        }
    };

    let team = team.unwrap_or_else(|e| {
        error!("Team API failed: {e}");
        report.fallbacks.push(Collection::Team);
        Vec::new()
    });

    let news = news.unwrap_or_else(|e| {
        error!("News API failed: {e}");
        report.fallbacks.push(Collection::News);
        Vec::new()
    });

    store.replace_portfolio(portfolio).await;
    store.replace_market(market).await;
    store.replace_team(team).await;
    store.replace_news(news).await;

    if report.is_complete() {
        info!("All collections loaded");
    } else {
        warn!("Loaded with fallbacks for: {:?}", report.fallbacks);
    }
    report
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::{DashboardError, Result};
    use crate::types::{
        ChatReply, ForecastRequest, ForecastResponse, MarketQuote, NewsArticle,
        PortfolioSnapshot, SentimentReport, TeamMember,
    };
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn unavailable() -> DashboardError {
        DashboardError::Api {
            status: 503,
            status_text: "Service Unavailable".into(),
            body: String::new(),
        }
    }

    /// In-memory backend; a `None` collection fails with 503
    #[derive(Default)]
    pub(crate) struct FakeApi {
        pub portfolio: Mutex<Option<PortfolioSnapshot>>,
        pub market: Mutex<Option<Vec<MarketQuote>>>,
        pub team: Mutex<Option<Vec<TeamMember>>>,
        pub news: Mutex<Option<Vec<NewsArticle>>>,
        pub forecast: Mutex<Option<ForecastResponse>>,
        pub sentiment: Mutex<Option<SentimentReport>>,
        pub chat: Mutex<Option<ChatReply>>,
        pub market_calls: AtomicUsize,
        pub portfolio_calls: AtomicUsize,
    }

    impl FakeApi {
        pub(crate) fn healthy() -> Self {
            let api = Self::default();
            *api.portfolio.lock().unwrap() = Some(PortfolioSnapshot {
                total_value: 1000.0,
                ..PortfolioSnapshot::default()
            });
            *api.market.lock().unwrap() = Some(vec![
                MarketQuote::new("AAPL", 100.0, 1.0, 1.0),
                MarketQuote::new("MSFT", 500.0, -2.0, -0.4),
            ]);
            *api.team.lock().unwrap() = Some(vec![TeamMember {
                name: "Ada".into(),
                role: "Quant".into(),
                description: "Models".into(),
                image: "ada.png".into(),
                linkedin: "https://linkedin.com/in/ada".into(),
                expertise: vec!["Risk".into()],
            }]);
            *api.news.lock().unwrap() = Some(vec![NewsArticle {
                title: "Markets rally".into(),
                summary: "Stocks up".into(),
                time: "2025-01-02T10:00:00Z".into(),
                sentiment: "positive".into(),
                url: None,
            }]);
            api
        }
    }

    fn answer<T: Clone>(slot: &Mutex<Option<T>>) -> Result<T> {
        slot.lock().unwrap().clone().ok_or_else(unavailable)
    }

    #[async_trait]
    impl DashboardApi for FakeApi {
        async fn portfolio(&self) -> Result<PortfolioSnapshot> {
            self.portfolio_calls.fetch_add(1, Ordering::SeqCst);
            answer(&self.portfolio)
        }
        async fn market_data(&self) -> Result<Vec<MarketQuote>> {
            self.market_calls.fetch_add(1, Ordering::SeqCst);
            answer(&self.market)
        }
        async fn team(&self) -> Result<Vec<TeamMember>> {
            answer(&self.team)
        }
        async fn news(&self) -> Result<Vec<NewsArticle>> {
            answer(&self.news)
        }
        async fn forecast(&self, _request: &ForecastRequest) -> Result<ForecastResponse> {
            answer(&self.forecast)
        }
        async fn sentiment(&self, _ticker: &str) -> Result<SentimentReport> {
            answer(&self.sentiment)
        }
        async fn chat(&self, _message: &str) -> Result<ChatReply> {
            answer(&self.chat)
        }
    }

    #[tokio::test]
    async fn test_load_all_live() {
        let api = FakeApi::healthy();
        let store = Store::default();

        let report = load_all(&api, &store).await;

        assert!(report.is_complete());
        let state = store.snapshot().await;
        assert!((state.portfolio.total_value - 1000.0).abs() < f64::EPSILON);
        assert_eq!(state.market.len(), 2);
        assert_eq!(state.team.len(), 1);
        assert_eq!(state.news.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_market_uses_fallback_quotes() {
        let api = FakeApi::healthy();
        *api.market.lock().unwrap() = Some(Vec::new());
        let store = Store::default();

        let report = load_all(&api, &store).await;

        assert!(report.used_fallback(Collection::Market));
        assert_eq!(store.read().await.market, fallback::market_quotes());
    }

    #[tokio::test]
    async fn test_single_failure_does_not_block_others() {
        for failing in [Collection::Portfolio, Collection::Team, Collection::News] {
            let api = FakeApi::healthy();
            match failing {
                Collection::Portfolio => *api.portfolio.lock().unwrap() = None,
                Collection::Team => *api.team.lock().unwrap() = None,
                Collection::News => *api.news.lock().unwrap() = None,
                Collection::Market => unreachable!(),
            }
            let store = Store::default();

            let report = load_all(&api, &store).await;

            assert_eq!(report.fallbacks, vec![failing]);
            let state = store.snapshot().await;
            assert_eq!(state.market.len(), 2);
            if failing == Collection::Portfolio {
                assert_eq!(state.portfolio, fallback::portfolio());
            } else {
                assert!((state.portfolio.total_value - 1000.0).abs() < f64::EPSILON);
            }
            assert_eq!(state.team.is_empty(), failing == Collection::Team);
            assert_eq!(state.news.is_empty(), failing == Collection::News);
        }
    }

    #[tokio::test]
    async fn test_load_notifies_each_collection_once() {
        let api = FakeApi::healthy();
        let store = Store::default();
        let mut rx = store.subscribe();

        load_all(&api, &store).await;

        let mut seen = Vec::new();
        while let Ok(c) = rx.try_recv() {
            seen.push(c);
        }
        assert_eq!(
            seen,
            [Collection::Portfolio, Collection::Market, Collection::Team, Collection::News]
        );
    }
}
