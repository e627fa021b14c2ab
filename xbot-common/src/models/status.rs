use serde::{Deserialize, Deserializer, Serialize};

/// One complete payload of `GET /api/status`.
///
/// Every section may be missing on the wire; the web backend drops sections it
/// could not compute instead of failing the whole request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusSnapshot {
    pub robot: Option<RobotStatus>,
    pub system: Option<SystemStatus>,
    pub plugins: Option<PluginStats>,
    pub messages: Option<MessageStats>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotStatus {
    #[serde(deserialize_with = "null_as_false")]
    pub online: bool,
    #[serde(deserialize_with = "null_as_false")]
    pub loading: bool,
    pub pid: Option<u32>,
    /// Seconds since the bot process started.
    pub uptime: Option<f64>,
    pub plugin_count: Option<u64>,
    pub wxid: Option<String>,
    pub nickname: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemStatus {
    /// CPU usage in percent.
    pub cpu: Option<f64>,
    /// Resident memory of the bot process in bytes.
    pub memory: Option<f64>,
    pub memory_percent: Option<f64>,
    /// Host uptime in seconds.
    pub uptime: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginStats {
    pub total: Option<u64>,
    pub enabled: Option<u64>,
    pub disabled: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageStats {
    pub total: Option<u64>,
    pub today: Option<u64>,
    pub group: Option<u64>,
    pub private: Option<u64>,
}

/// Coarse lifecycle state the dashboard derives from a [`RobotStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RobotState {
    Online,
    Loading,
    Offline,
}

/// The backend serializes an unknown flag as `null`; treat it as unset.
fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

impl RobotStatus {
    pub fn state(&self) -> RobotState {
        if self.online {
            RobotState::Online
        } else if self.loading {
            RobotState::Loading
        } else {
            RobotState::Offline
        }
    }
}
