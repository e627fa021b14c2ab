#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use xbot_common::models::{
    ControlAction, ControlResult, LogEntry, LogQuery, RecentMessage, RobotStatus,
    SettingsResponse, StatusSnapshot, WechatStatus,
};
use xbot_common::traits::DashboardApi;
use xbot_common::Error;
use xbot_common_ui::{
    event_channel, ControlDispatcher, DashboardEvent, DispatchSettings, EventReceiver,
    PollerSettings, SharedState, StatusPoller,
};

/// What the fake answers to the next status request.
pub enum StatusStep {
    Reply(Result<StatusSnapshot, Error>),
    /// Answer after the given delay.
    Delayed(Duration, Result<StatusSnapshot, Error>),
    /// Never answer.
    Hang,
}

/// Scripted [`DashboardApi`] recording when each call arrived.
pub struct FakeApi {
    start: Instant,
    status_script: Mutex<VecDeque<StatusStep>>,
    control_script: Mutex<VecDeque<Result<ControlResult, Error>>>,
    /// Recent-message replies, each answered after its delay.
    message_script: Mutex<VecDeque<(Duration, Vec<RecentMessage>)>>,
    status_calls: Mutex<Vec<Duration>>,
    control_calls: Mutex<Vec<(ControlAction, Duration)>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            status_script: Mutex::new(VecDeque::new()),
            control_script: Mutex::new(VecDeque::new()),
            message_script: Mutex::new(VecDeque::new()),
            status_calls: Mutex::new(Vec::new()),
            control_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn push_status(&self, step: StatusStep) -> &Self {
        self.status_script.lock().unwrap().push_back(step);
        self
    }

    pub fn push_control(&self, reply: Result<ControlResult, Error>) -> &Self {
        self.control_script.lock().unwrap().push_back(reply);
        self
    }

    pub fn push_messages(&self, delay: Duration, messages: Vec<RecentMessage>) -> &Self {
        self.message_script.lock().unwrap().push_back((delay, messages));
        self
    }

    /// Offsets from construction at which status requests arrived.
    pub fn status_calls(&self) -> Vec<Duration> {
        self.status_calls.lock().unwrap().clone()
    }

    pub fn control_calls(&self) -> Vec<Duration> {
        self.control_calls.lock().unwrap().iter().map(|(_, t)| *t).collect()
    }
}

#[async_trait]
impl DashboardApi for FakeApi {
    async fn fetch_status(&self) -> Result<StatusSnapshot, Error> {
        self.status_calls.lock().unwrap().push(self.start.elapsed());
        let step = self.status_script.lock().unwrap().pop_front();
        match step {
            None => Ok(online_snapshot()),
            Some(StatusStep::Reply(reply)) => reply,
            Some(StatusStep::Delayed(delay, reply)) => {
                tokio::time::sleep(delay).await;
                reply
            }
            Some(StatusStep::Hang) => std::future::pending().await,
        }
    }

    async fn fetch_messages(&self, _limit: u32) -> Result<Vec<RecentMessage>, Error> {
        let step = self.message_script.lock().unwrap().pop_front();
        match step {
            None => Ok(Vec::new()),
            Some((delay, messages)) => {
                tokio::time::sleep(delay).await;
                Ok(messages)
            }
        }
    }

    async fn fetch_logs(&self, _query: LogQuery) -> Result<Vec<LogEntry>, Error> {
        Ok(Vec::new())
    }

    async fn control(&self, action: ControlAction) -> Result<ControlResult, Error> {
        self.control_calls.lock().unwrap().push((action, self.start.elapsed()));
        self.control_script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(ControlResult::ok("ok")))
    }

    async fn fetch_settings(&self) -> Result<SettingsResponse, Error> {
        Ok(SettingsResponse::default())
    }

    async fn fetch_wechat_status(&self) -> Result<WechatStatus, Error> {
        Ok(WechatStatus::default())
    }
}

pub fn snapshot(online: bool) -> StatusSnapshot {
    StatusSnapshot {
        robot: Some(RobotStatus { online, ..Default::default() }),
        ..Default::default()
    }
}

pub fn online_snapshot() -> StatusSnapshot {
    snapshot(true)
}

pub struct Harness {
    pub api: Arc<FakeApi>,
    pub state: SharedState,
    pub poller: StatusPoller,
    pub dispatcher: ControlDispatcher,
    pub events: EventReceiver,
}

impl Harness {
    pub fn new(api: FakeApi) -> Self {
        Self::with_settings(api, PollerSettings::default())
    }

    pub fn with_settings(api: FakeApi, settings: PollerSettings) -> Self {
        let api = Arc::new(api);
        let dyn_api: Arc<dyn DashboardApi> = api.clone();
        let state = SharedState::new();
        let (tx, events) = event_channel();
        let poller = StatusPoller::new(dyn_api.clone(), state.clone(), tx.clone(), settings);
        let dispatcher = ControlDispatcher::new(
            dyn_api,
            poller.clone(),
            state.clone(),
            tx,
            DispatchSettings::default(),
        );
        Self { api, state, poller, dispatcher, events }
    }

    pub fn drain_events(&mut self) -> Vec<DashboardEvent> {
        let mut out = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            out.push(event);
        }
        out
    }
}
