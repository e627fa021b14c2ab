use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use xbot_common::models::{
    ControlAction, ControlResult, LogEntry, LogQuery, LogsResponse, MessagesResponse,
    PushPlusRequest, PushPlusResponse, RecentMessage, SettingsResponse, StatusSnapshot,
    WechatStatus,
};
use xbot_common::traits::{DashboardApi, PushGateway};
use xbot_common::Error;

/// Bound on `GET /api/status`.
pub const STATUS_TIMEOUT: Duration = Duration::from_secs(10);
/// Bound on every other request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const PUSHPLUS_URL: &str = "https://www.pushplus.plus/send";

/// [`DashboardApi`] over the bot's web backend.
#[derive(Clone)]
pub struct HttpClient {
    base_url: Url,
    http: Client,
    status_timeout: Duration,
}

impl HttpClient {
    /// `base_url` is the web UI root, e.g. `http://127.0.0.1:8080`.
    pub fn new(base_url: &str) -> Result<Self, Error> {
        Self::with_timeouts(base_url, STATUS_TIMEOUT, DEFAULT_TIMEOUT)
    }

    pub fn with_timeouts(
        base_url: &str,
        status_timeout: Duration,
        request_timeout: Duration,
    ) -> Result<Self, Error> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = reqwest::ClientBuilder::new()
            .user_agent(concat!("xbot-dashboard/", env!("CARGO_PKG_VERSION")))
            .timeout(request_timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build reqwest client: {e}")))?;

        Ok(Self { base_url, http, status_timeout })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        timeout: Option<Duration>,
    ) -> Result<T, Error> {
        let url = self.endpoint(path)?;
        debug!("GET {}", url);
        let mut req = self.http.get(url).query(query);
        if let Some(t) = timeout {
            req = req.timeout(t);
        }
        let resp = req.send().await?;
        decode(check_status(resp)?).await
    }
}

fn check_status(resp: Response) -> Result<Response, Error> {
    let status = resp.status();
    if status.is_success() {
        Ok(resp)
    } else {
        warn!("{} answered HTTP {}", resp.url(), status);
        Err(Error::Status(status.as_u16()))
    }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, Error> {
    // Read as bytes first so a malformed body reports as a JSON error rather
    // than a transport one.
    let bytes = resp.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[async_trait]
impl DashboardApi for HttpClient {
    async fn fetch_status(&self) -> Result<StatusSnapshot, Error> {
        self.get_json("api/status", &[], Some(self.status_timeout)).await
    }

    async fn fetch_messages(&self, limit: u32) -> Result<Vec<RecentMessage>, Error> {
        let resp: MessagesResponse = self
            .get_json("api/messages", &[("limit", limit.to_string())], None)
            .await?;
        Ok(resp.messages.unwrap_or_default())
    }

    async fn fetch_logs(&self, query: LogQuery) -> Result<Vec<LogEntry>, Error> {
        let resp: LogsResponse = self.get_json("api/logs", &query.to_pairs(), None).await?;
        if resp.success == Some(false) {
            return Err(Error::Rejected(
                resp.message.unwrap_or_else(|| "获取日志失败".to_string()),
            ));
        }
        Ok(resp.logs.unwrap_or_default())
    }

    async fn control(&self, action: ControlAction) -> Result<ControlResult, Error> {
        let url = self.endpoint(&format!("api/robot/control/{}", action.as_str()))?;
        debug!("POST {}", url);
        let resp = self
            .http
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await?;
        decode(check_status(resp)?).await
    }

    async fn fetch_settings(&self) -> Result<SettingsResponse, Error> {
        self.get_json("api/settings", &[], None).await
    }

    async fn fetch_wechat_status(&self) -> Result<WechatStatus, Error> {
        self.get_json("api/wechat/status", &[], None).await
    }
}

/// [`PushGateway`] that posts to PushPlus.
#[derive(Clone)]
pub struct PushPlusClient {
    url: Url,
    http: Client,
}

impl PushPlusClient {
    pub fn new() -> Result<Self, Error> {
        Self::with_url(PUSHPLUS_URL)
    }

    pub fn with_url(url: &str) -> Result<Self, Error> {
        let http = reqwest::ClientBuilder::new()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build reqwest client: {e}")))?;
        Ok(Self { url: Url::parse(url)?, http })
    }
}

#[async_trait]
impl PushGateway for PushPlusClient {
    async fn send(&self, request: PushPlusRequest) -> Result<PushPlusResponse, Error> {
        let resp = self.http.post(self.url.clone()).json(&request).send().await?;
        decode(check_status(resp)?).await
    }
}
