use async_trait::async_trait;

use crate::error::Error;
use crate::models::{
    ControlAction, ControlResult, LogEntry, LogQuery, PushPlusRequest, PushPlusResponse,
    RecentMessage, SettingsResponse, StatusSnapshot, WechatStatus,
};

/// Everything the dashboard asks of the bot's web backend.
///
/// Implementations own transport concerns (base URL, timeouts, headers). A
/// non-2xx answer must surface as [`Error::Status`] and an exceeded time bound
/// as [`Error::Timeout`]; the poller and dispatcher make retry decisions on
/// those kinds.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait DashboardApi: Send + Sync {
    /// `GET /api/status`, bounded by the status timeout.
    async fn fetch_status(&self) -> Result<StatusSnapshot, Error>;

    /// `GET /api/messages?limit=N`.
    async fn fetch_messages(&self, limit: u32) -> Result<Vec<RecentMessage>, Error>;

    /// `GET /api/logs` with the given filters.
    async fn fetch_logs(&self, query: LogQuery) -> Result<Vec<LogEntry>, Error>;

    /// `POST /api/robot/control/{action}`. A `{success:false}` body is returned
    /// as `Ok`; judging it is the caller's business.
    async fn control(&self, action: ControlAction) -> Result<ControlResult, Error>;

    /// `GET /api/settings`.
    async fn fetch_settings(&self) -> Result<SettingsResponse, Error>;

    /// `GET /api/wechat/status`.
    async fn fetch_wechat_status(&self) -> Result<WechatStatus, Error>;
}

/// The third-party push channel (PushPlus).
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait PushGateway: Send + Sync {
    async fn send(&self, request: PushPlusRequest) -> Result<PushPlusResponse, Error>;
}
