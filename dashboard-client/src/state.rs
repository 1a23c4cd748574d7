//! Shared application state for the dashboard.
//!
//! `AppState` owns the four data collections. Writers replace a whole
//! collection under the write lock, so readers always see either the old or
//! the new snapshot. Every write broadcasts the changed `Collection` so views
//! re-render only the widgets that depend on it.

use tokio::sync::{RwLock, RwLockReadGuard, broadcast};

use crate::types::{Collection, MarketQuote, NewsArticle, PortfolioSnapshot, TeamMember};

const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// Owned snapshot of every collection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub portfolio: PortfolioSnapshot,
    pub market: Vec<MarketQuote>,
    pub team: Vec<TeamMember>,
    pub news: Vec<NewsArticle>,
}

impl AppState {
    /// Quote for a symbol, if present in the current market snapshot
    pub fn quote(&self, symbol: &str) -> Option<&MarketQuote> {
        self.market.iter().find(|q| q.symbol == symbol)
    }
}

/// Lock-protected state plus a change notifier
pub struct Store {
    state: RwLock<AppState>,
    changes: broadcast::Sender<Collection>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new(AppState::default())
    }
}

impl Store {
    pub fn new(initial: AppState) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            state: RwLock::new(initial),
            changes,
        }
    }

    /// Subscribe to collection change events
    pub fn subscribe(&self) -> broadcast::Receiver<Collection> {
        self.changes.subscribe()
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, AppState> {
        self.state.read().await
    }

    /// Clone of the whole state
    pub async fn snapshot(&self) -> AppState {
        self.state.read().await.clone()
    }

    pub async fn replace_portfolio(&self, portfolio: PortfolioSnapshot) {
        self.state.write().await.portfolio = portfolio;
        self.notify(Collection::Portfolio);
    }

    pub async fn replace_market(&self, market: Vec<MarketQuote>) {
        self.state.write().await.market = market;
        self.notify(Collection::Market);
    }

    pub async fn replace_team(&self, team: Vec<TeamMember>) {
        self.state.write().await.team = team;
        self.notify(Collection::Team);
    }

    pub async fn replace_news(&self, news: Vec<NewsArticle>) {
        self.state.write().await.news = news;
        self.notify(Collection::News);
    }

    /// Run `f` with exclusive access; `changed` is broadcast only on `Ok`
    pub async fn update<T, E, F>(&self, changed: Collection, f: F) -> std::result::Result<T, E>
    where
        F: FnOnce(&mut AppState) -> std::result::Result<T, E>,
    {
        let result = {
            let mut guard = self.state.write().await;
            f(&mut guard)
        };
        if result.is_ok() {
            self.notify(changed);
        }
        result
    }

    fn notify(&self, collection: Collection) {
        // No subscribers is fine; nothing is rendering yet
        let _ = self.changes.send(collection);
    }
}
