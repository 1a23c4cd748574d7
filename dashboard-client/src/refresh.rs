//! Background refresh loop
//!
//! Two independent pollers: market quotes and the portfolio snapshot. Each
//! tick runs its fetch in its own task, so a hung request never delays the
//! next tick. Failed ticks are logged and skipped; the user is not told.
//! Pollers are cancellable and stop when their handle is stopped or dropped.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::client::DashboardApi;
use crate::error::Result;
use crate::state::Store;

/// Runs of one task allowed in flight at once; ticks beyond this are skipped
pub const MAX_INFLIGHT: usize = 4;

/// A cancellable fixed-period task
///
/// The first run happens one full period after spawning.
pub struct PeriodicTask {
    name: &'static str,
    shutdown: watch::Sender<bool>,
    handle: Option<JoinHandle<()>>,
}

impl PeriodicTask {
    pub fn spawn<F, Fut>(name: &'static str, period: Duration, job: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (shutdown, mut stop_rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut inflight = JoinSet::new();

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        while inflight.try_join_next().is_some() {}
                        if inflight.len() >= MAX_INFLIGHT {
                            warn!(
                                "{name} poller skipped a tick: {} runs still in flight",
                                inflight.len()
                            );
                            continue;
                        }
                        inflight.spawn(job());
                    }
                    _ = stop_rx.changed() => break,
                }
            }

            inflight.abort_all();
            debug!("{name} poller stopped");
        });

        info!("{name} poller started (every {}ms)", period.as_millis());
        Self {
            name,
            shutdown,
            handle: Some(handle),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stop ticking and cancel any in-flight run
    pub async fn stop(mut self) {
        let _ = self.shutdown.send(true);
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for PeriodicTask {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

/// Fetch market quotes once and replace the snapshot
///
/// Returns the number of quotes stored; an empty response keeps the current
/// quotes and returns 0.
pub async fn refresh_market(api: &dyn DashboardApi, store: &Store) -> Result<usize> {
    let quotes = api.market_data().await?;
    if quotes.is_empty() {
        warn!("No valid market data received in update");
        return Ok(0);
    }
    let count = quotes.len();
    store.replace_market(quotes).await;
    debug!("Market data updated: {count} items");
    Ok(count)
}

/// Fetch the portfolio once and replace the snapshot
pub async fn refresh_portfolio(api: &dyn DashboardApi, store: &Store) -> Result<()> {
    let portfolio = api.portfolio().await?;
    store.replace_portfolio(portfolio).await;
    debug!("Portfolio data updated");
    Ok(())
}

/// The market and portfolio pollers for one dashboard session
pub struct RefreshLoop {
    market: PeriodicTask,
    portfolio: PeriodicTask,
}

impl RefreshLoop {
    pub fn start(
        api: Arc<dyn DashboardApi>,
        store: Arc<Store>,
        market_period: Duration,
        portfolio_period: Duration,
    ) -> Self {
        let market = {
            let api = api.clone();
            let store = store.clone();
            let failures = Arc::new(AtomicU32::new(0));
            PeriodicTask::spawn("market", market_period, move || {
                let api = api.clone();
                let store = store.clone();
                let failures = failures.clone();
                async move {
                    match refresh_market(api.as_ref(), &store).await {
                        Ok(_) => failures.store(0, Ordering::Relaxed),
                        Err(e) => {
                            let n = failures.fetch_add(1, Ordering::Relaxed) + 1;
                            warn!("Failed to update market data ({n} consecutive): {e}");
                        }
                    }
                }
            })
        };

        let portfolio = {
            let failures = Arc::new(AtomicU32::new(0));
            PeriodicTask::spawn("portfolio", portfolio_period, move || {
                let api = api.clone();
                let store = store.clone();
                let failures = failures.clone();
                async move {
                    match refresh_portfolio(api.as_ref(), &store).await {
                        Ok(()) => failures.store(0, Ordering::Relaxed),
                        Err(e) => {
                            let n = failures.fetch_add(1, Ordering::Relaxed) + 1;
                            warn!("Failed to update portfolio data ({n} consecutive): {e}");
                        }
                    }
                }
            })
        };

        Self { market, portfolio }
    }

    pub fn is_running(&self) -> bool {
        self.market.is_running() && self.portfolio.is_running()
    }

    pub async fn stop(self) {
        let Self { market, portfolio } = self;
        tokio::join!(market.stop(), portfolio.stop());
        info!("Refresh loop stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::tests::FakeApi;
    use crate::types::MarketQuote;
    use std::sync::atomic::AtomicUsize;

    const MARKET: Duration = Duration::from_secs(30);
    const PORTFOLIO: Duration = Duration::from_secs(60);

    #[tokio::test(start_paused = true)]
    async fn test_pollers_tick_on_their_own_periods() {
        let api = Arc::new(FakeApi::healthy());
        let store = Arc::new(Store::default());
        let refresh = RefreshLoop::start(api.clone(), store.clone(), MARKET, PORTFOLIO);

        tokio::time::sleep(Duration::from_secs(125)).await;

        assert_eq!(api.market_calls.load(Ordering::SeqCst), 4);
        assert_eq!(api.portfolio_calls.load(Ordering::SeqCst), 2);
        assert_eq!(store.read().await.market.len(), 2);
        refresh.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_stopped_poller_does_no_more_fetches() {
        let api = Arc::new(FakeApi::healthy());
        let store = Arc::new(Store::default());
        let refresh = RefreshLoop::start(api.clone(), store, MARKET, PORTFOLIO);

        tokio::time::sleep(Duration::from_secs(35)).await;
        refresh.stop().await;
        tokio::time::sleep(Duration::from_secs(300)).await;

        assert_eq!(api.market_calls.load(Ordering::SeqCst), 1);
        assert_eq!(api.portfolio_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_ticks_keep_polling_and_keep_state() {
        let api = Arc::new(FakeApi::healthy());
        *api.market.lock().unwrap() = None;
        let initial = vec![MarketQuote::new("AAPL", 1.0, 0.0, 0.0)];
        let store = Arc::new(Store::default());
        store.replace_market(initial.clone()).await;
        let refresh = RefreshLoop::start(api.clone(), store.clone(), MARKET, PORTFOLIO);

        tokio::time::sleep(Duration::from_secs(95)).await;

        assert_eq!(api.market_calls.load(Ordering::SeqCst), 3);
        assert_eq!(store.read().await.market, initial);
        assert!(refresh.is_running());
        refresh.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_market_tick_keeps_quotes() {
        let api = FakeApi::healthy();
        *api.market.lock().unwrap() = Some(Vec::new());
        let store = Store::default();
        store
            .replace_market(vec![MarketQuote::new("MSFT", 2.0, 0.0, 0.0)])
            .await;

        let stored = refresh_market(&api, &store).await.expect("request succeeded");

        assert_eq!(stored, 0);
        assert_eq!(store.read().await.market[0].symbol, "MSFT");
    }

    #[tokio::test(start_paused = true)]
    async fn test_hung_run_does_not_delay_next_tick() {
        let started = Arc::new(AtomicUsize::new(0));
        let counter = started.clone();
        let task = PeriodicTask::spawn("hung", MARKET, move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                std::future::pending::<()>().await;
            }
        });

        tokio::time::sleep(Duration::from_secs(95)).await;

        assert_eq!(started.load(Ordering::SeqCst), 3);
        assert_eq!(task.name(), "hung");
        task.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_hung_runs_are_capped() {
        let started = Arc::new(AtomicUsize::new(0));
        let counter = started.clone();
        let task = PeriodicTask::spawn("stuck", MARKET, move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                std::future::pending::<()>().await;
            }
        });

        // Ten ticks, all hanging
        tokio::time::sleep(Duration::from_secs(305)).await;

        assert_eq!(started.load(Ordering::SeqCst), MAX_INFLIGHT);
        assert!(task.is_running());
        task.stop().await;
    }
}
