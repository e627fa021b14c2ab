//! Periodic status polling.
//!
//! Each poll attempt takes a fresh generation from [`ClientState`], so when a
//! slow response overlaps a newer one only the newest result is shown.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use xbot_common::models::{LogQuery, StatusSnapshot};
use xbot_common::traits::DashboardApi;
use xbot_common::Error;

use crate::events::{
    DashboardEvent, EventSender, Notification, Severity, TRANSITION_NOTIFICATION_DURATION,
};
use crate::http_client::STATUS_TIMEOUT;
use crate::retry::RetryPolicy;
use crate::state::{Applied, SharedState};
use crate::view::DashboardView;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);
pub const DEFAULT_FEED_LIMIT: u32 = 5;

#[derive(Debug, Clone)]
pub struct PollerSettings {
    pub interval: Duration,
    /// Upper bound on one status request, on top of whatever the API does.
    pub request_timeout: Duration,
    /// Applied to timeouts only.
    pub retry: RetryPolicy,
    /// Also pull recent messages and logs after each successful snapshot.
    pub fetch_feeds: bool,
    pub feed_limit: u32,
    /// Regenerate the chart series after each successful snapshot.
    pub refresh_chart: bool,
}

impl Default for PollerSettings {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            request_timeout: STATUS_TIMEOUT,
            retry: RetryPolicy::status_timeout(),
            fetch_feeds: true,
            feed_limit: DEFAULT_FEED_LIMIT,
            refresh_chart: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    Updated,
    /// A newer poll had already landed.
    Stale,
}

#[derive(Clone)]
pub struct StatusPoller {
    api: Arc<dyn DashboardApi>,
    state: SharedState,
    events: EventSender,
    settings: Arc<PollerSettings>,
}

impl StatusPoller {
    pub fn new(
        api: Arc<dyn DashboardApi>,
        state: SharedState,
        events: EventSender,
        settings: PollerSettings,
    ) -> Self {
        Self { api, state, events, settings: Arc::new(settings) }
    }

    pub fn settings(&self) -> &PollerSettings {
        &self.settings
    }

    fn emit(&self, event: DashboardEvent) {
        // receiver gone means the UI is shutting down
        let _ = self.events.send(event);
    }

    /// One full poll cycle, including the single retry after a timeout.
    pub async fn refresh(&self) -> Result<PollOutcome, Error> {
        let (generation, snapshot) = self
            .settings
            .retry
            .run(
                move |attempt| self.poll_once(attempt),
                Error::is_timeout,
                |attempt, err| {
                    if err.is_timeout() && attempt < self.settings.retry.max_attempts {
                        info!(
                            "status request timed out, retrying in {:?}",
                            self.settings.retry.backoff.delay(attempt)
                        );
                    }
                },
            )
            .await?;

        Ok(self.apply(generation, &snapshot).await)
    }

    /// A single status request. Failures are applied to the view here so the
    /// error state shows while a retry is pending.
    async fn poll_once(&self, attempt: u32) -> Result<(u64, StatusSnapshot), Error> {
        let generation = self.state.with(|s| s.begin_poll());
        debug!("status poll attempt {} (generation {})", attempt, generation);

        let result = match tokio::time::timeout(self.settings.request_timeout, self.api.fetch_status()).await {
            Ok(inner) => inner,
            Err(elapsed) => Err(Error::from(elapsed)),
        };

        match result {
            Ok(snapshot) => Ok((generation, snapshot)),
            Err(err) => {
                warn!("status request failed: {}", err);
                if self.state.with(|s| s.apply_failure(generation)) {
                    self.emit(DashboardEvent::ViewUpdated);
                } else {
                    debug!("dropping failure of stale generation {}", generation);
                }
                Err(err)
            }
        }
    }

    async fn apply(&self, generation: u64, snapshot: &StatusSnapshot) -> PollOutcome {
        let applied = self.state.with(|s| s.apply_snapshot(generation, snapshot));
        let transition = match applied {
            Applied::Stale => {
                debug!("dropping stale status of generation {}", generation);
                return PollOutcome::Stale;
            }
            Applied::Fresh { transition } => transition,
        };

        if let Some(online) = transition {
            let note = if online {
                info!("robot came online");
                Notification::new("机器人已上线", Severity::Success)
            } else {
                warn!("robot went offline");
                Notification::new("机器人已掉线", Severity::Danger)
            };
            self.emit(DashboardEvent::RobotTransition { online });
            self.emit(DashboardEvent::Notify(note.with_duration(TRANSITION_NOTIFICATION_DURATION)));
        }

        if self.settings.fetch_feeds {
            self.refresh_feeds(generation).await;
        }
        if self.settings.refresh_chart {
            self.state.with(|s| s.regenerate_chart());
        }
        self.emit(DashboardEvent::ViewUpdated);
        PollOutcome::Updated
    }

    /// Recent messages and logs. Best effort: errors are only logged. A feed
    /// that lands after a newer snapshot was applied is dropped.
    async fn refresh_feeds(&self, generation: u64) {
        let limit = self.settings.feed_limit;
        match self.api.fetch_messages(limit).await {
            Ok(messages) => self.apply_feed(generation, "messages", |view| {
                crate::view::update_recent_messages(view, &messages)
            }),
            Err(e) => debug!("recent messages unavailable: {}", e),
        }
        match self.api.fetch_logs(LogQuery::latest(limit)).await {
            Ok(logs) => self.apply_feed(generation, "logs", |view| {
                crate::view::update_recent_logs(view, &logs)
            }),
            Err(e) => debug!("recent logs unavailable: {}", e),
        }
    }

    fn apply_feed(&self, generation: u64, feed: &str, update: impl FnOnce(&mut DashboardView)) {
        let applied = self.state.with(|s| {
            if s.applied_generation() != generation {
                return false;
            }
            update(&mut s.view);
            true
        });
        if !applied {
            debug!("dropping recent {} of stale generation {}", feed, generation);
        }
    }

    /// Fire-and-forget [`refresh`](Self::refresh).
    pub fn spawn_refresh(&self) -> JoinHandle<()> {
        let poller = self.clone();
        tokio::spawn(async move {
            if let Err(e) = poller.refresh().await {
                debug!("poll cycle ended with error: {}", e);
            }
        })
    }

    /// Poll once now and then every `interval` until `cancel` fires. Cycles
    /// may overlap; in-flight polls are left to finish.
    pub async fn run(&self, cancel: CancellationToken) {
        info!("status poller started (every {:?})", self.settings.interval);
        let mut ticker = tokio::time::interval(self.settings.interval);
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("status poller stopped");
                    break;
                }
                _ = ticker.tick() => {
                    self.spawn_refresh();
                }
            }
        }
    }
}
