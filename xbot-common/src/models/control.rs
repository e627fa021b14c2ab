use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// A command issued against the robot process through
/// `POST /api/robot/control/{action}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlAction {
    Start,
    Stop,
    Restart,
}

impl ControlAction {
    pub const ALL: [ControlAction; 3] = [ControlAction::Start, ControlAction::Stop, ControlAction::Restart];

    /// Path segment of the control endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlAction::Start => "start",
            ControlAction::Stop => "stop",
            ControlAction::Restart => "restart",
        }
    }

    /// Question asked before anything is sent.
    pub fn confirm_prompt(&self) -> &'static str {
        match self {
            ControlAction::Start => "确定要启动机器人吗？",
            ControlAction::Stop => "确定要停止机器人吗？这将断开所有当前连接。",
            ControlAction::Restart => "确定要重启机器人吗？重启过程中机器人将暂时不可用。",
        }
    }

    /// Label shown on the control while the request is in flight.
    pub fn pending_label(&self) -> &'static str {
        match self {
            ControlAction::Start => "启动中...",
            ControlAction::Stop => "停止中...",
            ControlAction::Restart => "重启中...",
        }
    }

    /// Resting label of the control.
    pub fn idle_label(&self) -> &'static str {
        match self {
            ControlAction::Start => "启动",
            ControlAction::Stop => "停止",
            ControlAction::Restart => "重启",
        }
    }

    pub fn success_text(&self) -> &'static str {
        match self {
            ControlAction::Start => "机器人已成功启动",
            ControlAction::Stop => "机器人已成功停止",
            ControlAction::Restart => "机器人已成功重启",
        }
    }

    pub fn failure_text(&self) -> &'static str {
        match self {
            ControlAction::Start => "启动机器人失败",
            ControlAction::Stop => "停止机器人失败",
            ControlAction::Restart => "重启机器人失败",
        }
    }

    /// How long the backend needs before the second refresh wave can observe
    /// the new state. Restarts take a full stop + start.
    pub fn settle_delay(&self) -> Duration {
        match self {
            ControlAction::Restart => Duration::from_millis(5000),
            ControlAction::Start | ControlAction::Stop => Duration::from_millis(2000),
        }
    }
}

impl fmt::Display for ControlAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ControlAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "start" => Ok(ControlAction::Start),
            "stop" => Ok(ControlAction::Stop),
            "restart" => Ok(ControlAction::Restart),
            other => Err(format!("unknown control action '{}'", other)),
        }
    }
}

/// Body of a control endpoint response. One per attempt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl ControlResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self { success: true, message: Some(message.into()) }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self { success: false, message: Some(message.into()) }
    }
}
