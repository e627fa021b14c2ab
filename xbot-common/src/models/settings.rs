use serde::{Deserialize, Serialize};

/// `GET /api/settings`. Only the notification section matters to the
/// dashboard; the rest of the TOML-backed config is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsResponse {
    pub success: bool,
    pub data: Option<SettingsData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsData {
    #[serde(rename = "Notification")]
    pub notification: Option<NotificationSettings>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    pub enable: bool,
    pub pushplus_token: Option<String>,
}

impl SettingsResponse {
    /// Notification settings, but only when the response itself succeeded.
    pub fn notification(&self) -> Option<&NotificationSettings> {
        if !self.success {
            return None;
        }
        self.data.as_ref().and_then(|d| d.notification.as_ref())
    }
}

/// Body posted to PushPlus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushPlusRequest {
    pub token: String,
    pub title: String,
    pub content: String,
    pub template: String,
}

/// PushPlus answers `code == 200` when the message was accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PushPlusResponse {
    pub code: i64,
    pub msg: Option<String>,
    pub data: Option<serde_json::Value>,
}

/// `GET /api/wechat/status`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WechatStatus {
    pub success: bool,
    pub is_logged_in: bool,
    pub nickname: Option<String>,
    pub wxid: Option<String>,
    /// Epoch seconds of the last login, 0 when unknown.
    pub login_time: Option<f64>,
    pub device_type: Option<String>,
    pub message: Option<String>,
}
