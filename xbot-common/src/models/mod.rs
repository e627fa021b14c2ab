// File: xbot-common/src/models/mod.rs
pub mod control;
pub mod feed;
pub mod settings;
pub mod status;

pub use control::{ControlAction, ControlResult};
pub use feed::{LogEntry, LogQuery, LogsResponse, MessagesResponse, RecentMessage, Timestamp};
pub use settings::{
    NotificationSettings, PushPlusRequest, PushPlusResponse, SettingsData, SettingsResponse,
    WechatStatus,
};
pub use status::{MessageStats, PluginStats, RobotState, RobotStatus, StatusSnapshot, SystemStatus};
