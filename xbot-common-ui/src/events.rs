use std::time::Duration;

use tokio::sync::mpsc;
use xbot_common::models::ControlAction;

/// Display duration of an ordinary toast.
pub const DEFAULT_NOTIFICATION_DURATION: Duration = Duration::from_millis(3000);
/// Online/offline transitions stay up longer.
pub const TRANSITION_NOTIFICATION_DURATION: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Danger,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    pub duration: Duration,
}

impl Notification {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
            duration: DEFAULT_NOTIFICATION_DURATION,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

/// Events flowing from the poller and dispatcher to whatever renders the
/// dashboard.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    /// The view model changed; re-render.
    ViewUpdated,
    /// A toast for the user.
    Notify(Notification),
    /// `robot.online` flipped. `online` is the new value.
    RobotTransition { online: bool },
    /// A control request went out; its label is now pending.
    ControlPending(ControlAction),
    /// The pending label of a control was restored.
    ControlSettled(ControlAction),
}

pub type EventSender = mpsc::UnboundedSender<DashboardEvent>;
pub type EventReceiver = mpsc::UnboundedReceiver<DashboardEvent>;

pub fn event_channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}
