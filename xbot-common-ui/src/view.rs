//! View model of the dashboard and the updaters projecting status data onto
//! it. Renderers (terminal, GUI) only ever read a [`DashboardView`].

use xbot_common::models::{
    ControlAction, LogEntry, MessageStats, PluginStats, RecentMessage, RobotState, RobotStatus,
    SystemStatus,
};

use crate::chart::ChartSeries;
use crate::format::{format_time, format_uptime_opt, message_type_name, truncate_chars};

pub const PLACEHOLDER: &str = "--";
pub const EMPTY_MESSAGES_TEXT: &str = "暂无消息记录";
pub const EMPTY_LOGS_TEXT: &str = "暂无日志记录";
pub const STATUS_ERROR_TEXT: &str = "获取状态失败";

const MESSAGE_PREVIEW_CHARS: usize = 30;
const LOG_PREVIEW_CHARS: usize = 50;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardView {
    pub robot: RobotView,
    pub system: SystemView,
    pub plugins: PluginView,
    pub messages: MessageStatsView,
    /// `None` until the first successful fetch.
    pub recent_messages: Option<Vec<MessageRow>>,
    pub recent_logs: Option<Vec<LogRow>>,
    pub chart: Option<ChartSeries>,
    pub controls: ControlStates,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RobotIndicator {
    /// Nothing received yet.
    #[default]
    Unknown,
    Online,
    Loading,
    Offline,
    /// The last status request failed.
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RobotView {
    pub indicator: RobotIndicator,
    pub status_text: String,
    /// Only populated while online.
    pub details: Option<RobotDetails>,
    /// Only populated while online and logged in to WeChat.
    pub profile: Option<RobotProfile>,
}

impl Default for RobotView {
    fn default() -> Self {
        Self {
            indicator: RobotIndicator::Unknown,
            status_text: PLACEHOLDER.to_string(),
            details: None,
            profile: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RobotDetails {
    pub pid: String,
    pub uptime: String,
    pub plugin_count: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RobotProfile {
    pub nickname: String,
    pub wxid: String,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GaugeLevel {
    #[default]
    Normal,
    Elevated,
    Critical,
}

impl GaugeLevel {
    pub fn for_percent(percent: f64) -> Self {
        if percent > 80.0 {
            GaugeLevel::Critical
        } else if percent > 60.0 {
            GaugeLevel::Elevated
        } else {
            GaugeLevel::Normal
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SystemView {
    pub cpu_percent: f64,
    pub cpu_text: String,
    pub cpu_level: GaugeLevel,
    pub memory_percent: f64,
    pub memory_text: String,
    pub memory_level: GaugeLevel,
    pub uptime_text: String,
}

impl Default for SystemView {
    fn default() -> Self {
        Self {
            cpu_percent: 0.0,
            cpu_text: PLACEHOLDER.to_string(),
            cpu_level: GaugeLevel::Normal,
            memory_percent: 0.0,
            memory_text: PLACEHOLDER.to_string(),
            memory_level: GaugeLevel::Normal,
            uptime_text: PLACEHOLDER.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PluginView {
    pub total: String,
    pub enabled: String,
    pub disabled: String,
}

impl Default for PluginView {
    fn default() -> Self {
        Self {
            total: "0".to_string(),
            enabled: "0".to_string(),
            disabled: "0".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MessageStatsView {
    pub total: String,
    pub today: String,
    pub group: String,
    pub private: String,
}

impl Default for MessageStatsView {
    fn default() -> Self {
        Self {
            total: "0".to_string(),
            today: "0".to_string(),
            group: "0".to_string(),
            private: "0".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MessageRow {
    pub sender: String,
    pub preview: String,
    pub content: String,
    pub kind: String,
    pub time: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogBadge {
    Error,
    Warning,
    Debug,
    Info,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogRow {
    pub level: String,
    pub badge: LogBadge,
    pub preview: String,
    pub content: String,
    pub time: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlState {
    pub enabled: bool,
    /// Replaces the idle label while a request is in flight.
    pub pending: bool,
}

/// Enablement and labels of the start/stop/restart controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlStates {
    pub start: ControlState,
    pub stop: ControlState,
    pub restart: ControlState,
}

impl ControlStates {
    pub fn get(&self, action: ControlAction) -> &ControlState {
        match action {
            ControlAction::Start => &self.start,
            ControlAction::Stop => &self.stop,
            ControlAction::Restart => &self.restart,
        }
    }

    pub fn get_mut(&mut self, action: ControlAction) -> &mut ControlState {
        match action {
            ControlAction::Start => &mut self.start,
            ControlAction::Stop => &mut self.stop,
            ControlAction::Restart => &mut self.restart,
        }
    }

    pub fn is_enabled(&self, action: ControlAction) -> bool {
        self.get(action).enabled
    }

    pub fn label(&self, action: ControlAction) -> &'static str {
        if self.get(action).pending {
            action.pending_label()
        } else {
            action.idle_label()
        }
    }

    pub fn disable_all(&mut self) {
        self.start.enabled = false;
        self.stop.enabled = false;
        self.restart.enabled = false;
    }

    /// Online: stop and restart. Offline: start. Loading: nothing.
    pub fn apply_robot_state(&mut self, state: RobotState) {
        let (start, stop, restart) = match state {
            RobotState::Online => (false, true, true),
            RobotState::Loading => (false, false, false),
            RobotState::Offline => (true, false, false),
        };
        self.start.enabled = start;
        self.stop.enabled = stop;
        self.restart.enabled = restart;
    }
}

fn count_text(value: Option<u64>) -> String {
    value.unwrap_or(0).to_string()
}

fn percent_text(value: f64) -> String {
    let fixed = format!("{:.1}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("{}%", trimmed)
}

pub fn update_robot_status(view: &mut DashboardView, robot: &RobotStatus) {
    let state = robot.state();
    view.controls.apply_robot_state(state);

    match state {
        RobotState::Online => {
            view.robot.indicator = RobotIndicator::Online;
            view.robot.status_text = "在线".to_string();
            view.robot.details = Some(RobotDetails {
                pid: robot
                    .pid
                    .filter(|pid| *pid != 0)
                    .map(|pid| pid.to_string())
                    .unwrap_or_else(|| PLACEHOLDER.to_string()),
                uptime: format_uptime_opt(robot.uptime),
                plugin_count: count_text(robot.plugin_count),
            });
            view.robot.profile = robot
                .wxid
                .as_ref()
                .filter(|wxid| !wxid.is_empty())
                .map(|wxid| RobotProfile {
                    nickname: robot
                        .nickname
                        .clone()
                        .filter(|n| !n.is_empty())
                        .unwrap_or_else(|| wxid.clone()),
                    wxid: wxid.clone(),
                    avatar_url: robot.avatar_url.clone().filter(|u| !u.is_empty()),
                });
        }
        RobotState::Loading => {
            view.robot.indicator = RobotIndicator::Loading;
            view.robot.status_text = "加载中...".to_string();
            view.robot.details = None;
            view.robot.profile = None;
        }
        RobotState::Offline => {
            view.robot.indicator = RobotIndicator::Offline;
            view.robot.status_text = "离线".to_string();
            view.robot.details = None;
            view.robot.profile = None;
        }
    }
}

pub fn update_system_status(view: &mut SystemView, system: &SystemStatus) {
    let cpu = system.cpu.unwrap_or(0.0);
    view.cpu_percent = cpu;
    view.cpu_text = percent_text(cpu);
    view.cpu_level = GaugeLevel::for_percent(cpu);

    let memory_percent = system.memory_percent.unwrap_or(0.0);
    view.memory_percent = memory_percent;
    view.memory_level = GaugeLevel::for_percent(memory_percent);
    view.memory_text = match system.memory {
        Some(bytes) => format!("{:.2} MB", bytes / (1024.0 * 1024.0)),
        None => PLACEHOLDER.to_string(),
    };

    view.uptime_text = format_uptime_opt(system.uptime);
}

pub fn update_plugin_status(view: &mut PluginView, plugins: &PluginStats) {
    view.total = count_text(plugins.total);
    view.enabled = count_text(plugins.enabled);
    view.disabled = count_text(plugins.disabled);
}

pub fn update_message_stats(view: &mut MessageStatsView, stats: &MessageStats) {
    view.total = count_text(stats.total);
    view.today = count_text(stats.today);
    view.group = count_text(stats.group);
    view.private = count_text(stats.private);
}

pub fn message_rows(messages: &[RecentMessage]) -> Vec<MessageRow> {
    messages
        .iter()
        .map(|msg| {
            let content = msg.content.clone().unwrap_or_default();
            MessageRow {
                sender: msg.display_sender().to_string(),
                preview: truncate_chars(&content, MESSAGE_PREVIEW_CHARS),
                content,
                kind: message_type_name(msg.kind.as_deref()),
                time: format_time(msg.time.as_ref()),
            }
        })
        .collect()
}

pub fn log_rows(logs: &[LogEntry]) -> Vec<LogRow> {
    logs.iter()
        .map(|log| {
            let level = log
                .level
                .as_deref()
                .filter(|l| !l.trim().is_empty())
                .unwrap_or("INFO")
                .trim()
                .to_uppercase();
            let badge = match level.as_str() {
                "ERROR" => LogBadge::Error,
                "WARNING" => LogBadge::Warning,
                "DEBUG" => LogBadge::Debug,
                _ => LogBadge::Info,
            };
            let content = log.text().to_string();
            LogRow {
                level,
                badge,
                preview: truncate_chars(&content, LOG_PREVIEW_CHARS),
                content,
                time: format_time(log.time.as_ref()),
            }
        })
        .collect()
}

pub fn update_recent_messages(view: &mut DashboardView, messages: &[RecentMessage]) {
    view.recent_messages = Some(message_rows(messages));
}

pub fn update_recent_logs(view: &mut DashboardView, logs: &[LogEntry]) {
    view.recent_logs = Some(log_rows(logs));
}

/// Error state after a failed status request: all controls off.
pub fn show_status_error(view: &mut DashboardView) {
    view.robot.indicator = RobotIndicator::Error;
    view.robot.status_text = STATUS_ERROR_TEXT.to_string();
    view.controls.disable_all();
}
