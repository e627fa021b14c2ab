//! Start/stop/restart commands with confirmation, retries and follow-up
//! polling.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{error, info, warn};
use xbot_common::models::{ControlAction, ControlResult};
use xbot_common::traits::DashboardApi;
use xbot_common::Error;

use crate::events::{DashboardEvent, EventSender, Notification, Severity};
use crate::poller::StatusPoller;
use crate::retry::RetryPolicy;
use crate::state::SharedState;

#[derive(Debug, Clone)]
pub struct DispatchSettings {
    /// Any failure is retried.
    pub retry: RetryPolicy,
    /// Delay before the pending label goes back to the idle one.
    pub label_restore: Duration,
    /// Gap between the second and third follow-up poll.
    pub extra_refresh: Duration,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::control(),
            label_restore: Duration::from_millis(500),
            extra_refresh: Duration::from_millis(1000),
        }
    }
}

/// Asks the user before a control command goes out.
#[async_trait]
pub trait Confirm: Send + Sync {
    async fn confirm(&self, prompt: &str) -> bool;
}

/// Answers every prompt the same way (`--yes`, scripted use).
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub bool);

#[async_trait]
impl Confirm for FixedAnswer {
    async fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Declined at the prompt; nothing was sent.
    Cancelled,
    Succeeded,
    /// All attempts failed. Holds the message shown to the user.
    Failed(String),
}

#[derive(Clone)]
pub struct ControlDispatcher {
    api: Arc<dyn DashboardApi>,
    poller: StatusPoller,
    state: SharedState,
    events: EventSender,
    settings: DispatchSettings,
}

impl ControlDispatcher {
    pub fn new(
        api: Arc<dyn DashboardApi>,
        poller: StatusPoller,
        state: SharedState,
        events: EventSender,
        settings: DispatchSettings,
    ) -> Self {
        Self { api, poller, state, events, settings }
    }

    /// Offsets from success at which follow-up polls run.
    pub fn refresh_schedule(&self, action: ControlAction) -> [Duration; 3] {
        let settle = action.settle_delay();
        [Duration::ZERO, settle, settle + self.settings.extra_refresh]
    }

    fn emit(&self, event: DashboardEvent) {
        let _ = self.events.send(event);
    }

    fn notify(&self, message: impl Into<String>, severity: Severity) {
        self.emit(DashboardEvent::Notify(Notification::new(message, severity)));
    }

    pub async fn dispatch(&self, action: ControlAction, confirm: &dyn Confirm) -> DispatchOutcome {
        if !confirm.confirm(action.confirm_prompt()).await {
            info!("{} cancelled at confirmation", action);
            return DispatchOutcome::Cancelled;
        }

        self.state.with(|s| {
            let control = s.view.controls.get_mut(action);
            control.enabled = false;
            control.pending = true;
        });
        self.emit(DashboardEvent::ControlPending(action));
        self.emit(DashboardEvent::ViewUpdated);

        let max = self.settings.retry.max_attempts;
        let result = self
            .settings
            .retry
            .run(
                move |attempt| self.attempt(action, attempt),
                |_| true,
                |attempt, err| {
                    if attempt < max {
                        warn!("{} attempt {} failed: {}, retrying", action, attempt, err);
                    }
                },
            )
            .await;

        self.schedule_label_restore(action);

        match result {
            Ok(_) => {
                info!("{} succeeded", action);
                self.notify(action.success_text(), Severity::Success);
                self.schedule_refresh(action);
                DispatchOutcome::Succeeded
            }
            Err(err) => {
                error!("{} failed after {} attempts: {}", action, max, err);
                let message = format!("{}: {}", action.failure_text(), err);
                self.notify(message.clone(), Severity::Danger);
                DispatchOutcome::Failed(message)
            }
        }
    }

    async fn attempt(&self, action: ControlAction, attempt: u32) -> Result<ControlResult, Error> {
        info!("sending {} (attempt {})", action, attempt);
        let result = self.api.control(action).await?;
        if result.success {
            Ok(result)
        } else {
            Err(Error::Rejected(
                result.message.unwrap_or_else(|| format!("{}失败", action.as_str())),
            ))
        }
    }

    /// Puts the idle label back. Enablement is left to the next poll.
    fn schedule_label_restore(&self, action: ControlAction) {
        let state = self.state.clone();
        let events = self.events.clone();
        let delay = self.settings.label_restore;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            state.with(|s| s.view.controls.get_mut(action).pending = false);
            let _ = events.send(DashboardEvent::ControlSettled(action));
            let _ = events.send(DashboardEvent::ViewUpdated);
        });
    }

    fn schedule_refresh(&self, action: ControlAction) {
        let [now, settle, last] = self.refresh_schedule(action);
        let poller = self.poller.clone();
        tokio::spawn(async move {
            tokio::time::sleep(now).await;
            poller.spawn_refresh();
            tokio::time::sleep(settle - now).await;
            poller.spawn_refresh();
            tokio::time::sleep(last - settle).await;
            poller.spawn_refresh();
        });
    }
}
