use std::sync::Arc;

use xbot_common::traits::{DashboardApi, PushGateway};
use xbot_common_ui::debounce::Throttler;
use xbot_common_ui::{
    Confirm, ControlDispatcher, DispatchSettings, EventSender, PollerSettings, SharedState,
    StatusPoller,
};

/// Everything a command handler needs.
pub struct App {
    pub api: Arc<dyn DashboardApi>,
    pub push: Arc<dyn PushGateway>,
    pub state: SharedState,
    pub poller: StatusPoller,
    pub dispatcher: ControlDispatcher,
    pub confirm: Arc<dyn Confirm>,
    /// Guards the manual `refresh` command.
    pub refresh_throttle: Throttler,
    /// Forward online/offline transitions to PushPlus.
    pub push_transitions: bool,
}

impl App {
    pub fn new(
        api: Arc<dyn DashboardApi>,
        push: Arc<dyn PushGateway>,
        events: EventSender,
        poller_settings: PollerSettings,
        confirm: Arc<dyn Confirm>,
    ) -> Self {
        let state = SharedState::new();
        let poller = StatusPoller::new(api.clone(), state.clone(), events.clone(), poller_settings);
        let dispatcher = ControlDispatcher::new(
            api.clone(),
            poller.clone(),
            state.clone(),
            events,
            DispatchSettings::default(),
        );
        Self {
            api,
            push,
            state,
            poller,
            dispatcher,
            confirm,
            refresh_throttle: Throttler::default(),
            push_transitions: false,
        }
    }

    pub fn with_push_transitions(mut self, enabled: bool) -> Self {
        self.push_transitions = enabled;
        self
    }
}
