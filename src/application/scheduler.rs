// Refresh scheduler - One cancellable periodic task per data feed
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

#[async_trait]
pub trait Feed: Send + Sync + 'static {
    fn name(&self) -> &str;

    /// Fetch once and publish the result
    async fn refresh(&self) -> anyhow::Result<()>;
}

/// Stops a single feed without touching the others.
#[derive(Debug, Clone)]
pub struct FeedHandle {
    name: String,
    token: CancellationToken,
}

impl FeedHandle {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

pub struct RefreshScheduler {
    root: CancellationToken,
    tasks: Vec<JoinHandle<()>>,
}

impl RefreshScheduler {
    pub fn new() -> Self {
        Self {
            root: CancellationToken::new(),
            tasks: Vec::new(),
        }
    }

    /// Refreshes `feed` immediately and then every `period`.
    ///
    /// Each tick spawns its own refresh, so a slow fetch never delays the next
    /// one; feeds order their results with a generation counter.
    pub fn spawn_feed(&mut self, feed: Arc<dyn Feed>, period: Duration) -> FeedHandle {
        let token = self.root.child_token();
        let handle = FeedHandle {
            name: feed.name().to_string(),
            token: token.clone(),
        };

        tracing::info!("Scheduling feed {} every {:?}", feed.name(), period);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = token.cancelled() => {
                        tracing::info!("Feed {} cancelled", feed.name());
                        break;
                    }
                    _ = ticker.tick() => {
                        let feed = feed.clone();
                        let token = token.clone();
                        tokio::spawn(async move {
                            tokio::select! {
                                _ = token.cancelled() => {}
                                result = feed.refresh() => {
                                    if let Err(e) = result {
                                        let name = feed.name();
                                        tracing::warn!("Refresh of {} failed: {:#}", name, e);
                                    }
                                }
                            }
                        });
                    }
                }
            }
        });

        self.tasks.push(task);
        handle
    }

    /// Cancels every feed and waits for their loops to exit.
    pub async fn shutdown(self) {
        self.root.cancel();
        for result in futures::future::join_all(self.tasks).await {
            if let Err(e) = result {
                tracing::error!("Feed task ended abnormally: {}", e);
            }
        }
    }
}

impl Default for RefreshScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingFeed {
        name: String,
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingFeed {
        fn new(name: &str, fail: bool) -> Arc<Self> {
            Arc::new(Self {
                name: name.to_string(),
                calls: AtomicUsize::new(0),
                fail,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Feed for CountingFeed {
        fn name(&self) -> &str {
            &self.name
        }

        async fn refresh(&self) -> anyhow::Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                anyhow::bail!("upstream unavailable");
            }
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_feed_ticks_on_period() {
        let mut scheduler = RefreshScheduler::new();
        let feed = CountingFeed::new("history", false);
        scheduler.spawn_feed(feed.clone(), Duration::from_secs(1));

        tokio::time::sleep(Duration::from_millis(3500)).await;
        assert_eq!(feed.calls(), 4);

        scheduler.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_independent_cadences_and_cancel() {
        let mut scheduler = RefreshScheduler::new();
        let fast = CountingFeed::new("history", false);
        let slow = CountingFeed::new("headline", false);
        let fast_handle = scheduler.spawn_feed(fast.clone(), Duration::from_secs(1));
        scheduler.spawn_feed(slow.clone(), Duration::from_secs(5));

        tokio::time::sleep(Duration::from_millis(5500)).await;
        assert_eq!(fast.calls(), 6);
        assert_eq!(slow.calls(), 2);

        fast_handle.cancel();
        assert!(fast_handle.is_cancelled());
        assert_eq!(fast_handle.name(), "history");

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(fast.calls(), 6);
        assert_eq!(slow.calls(), 3);

        scheduler.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_failing_feed_keeps_polling() {
        let mut scheduler = RefreshScheduler::new();
        let feed = CountingFeed::new("history", true);
        scheduler.spawn_feed(feed.clone(), Duration::from_secs(2));

        tokio::time::sleep(Duration::from_millis(4500)).await;
        assert_eq!(feed.calls(), 3);

        scheduler.shutdown().await;
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(feed.calls(), 3);
    }
}
