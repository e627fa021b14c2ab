use serde_json::Value;
use tracing::{info, warn};
use xbot_common::models::PushPlusRequest;
use xbot_common::traits::{DashboardApi, PushGateway};

pub const DEFAULT_TEMPLATE: &str = "html";

#[derive(Debug, Clone, PartialEq)]
pub struct PushOutcome {
    pub success: bool,
    pub message: String,
    pub data: Option<Value>,
}

impl PushOutcome {
    fn failed(message: impl Into<String>) -> Self {
        Self { success: false, message: message.into(), data: None }
    }
}

/// Send a notification through PushPlus using the token configured in the
/// bot's settings. Never fails; problems come back as `success: false`.
pub async fn send_push_notification(
    api: &dyn DashboardApi,
    gateway: &dyn PushGateway,
    title: &str,
    content: &str,
    template: &str,
) -> PushOutcome {
    let settings = match api.fetch_settings().await {
        Ok(s) => s,
        Err(e) => {
            warn!("failed to load notification settings: {}", e);
            return PushOutcome::failed(format!("发送通知时出错: {}", e));
        }
    };

    let Some(notification) = settings.notification().filter(|n| n.enable) else {
        return PushOutcome::failed("通知功能未启用");
    };
    let Some(token) = notification.pushplus_token.as_ref().filter(|t| !t.trim().is_empty()) else {
        return PushOutcome::failed("未配置PushPlus token");
    };

    let request = PushPlusRequest {
        token: token.clone(),
        title: title.to_string(),
        content: content.to_string(),
        template: template.to_string(),
    };

    match gateway.send(request).await {
        Ok(resp) if resp.code == 200 => {
            info!("push notification '{}' delivered", title);
            PushOutcome { success: true, message: "通知发送成功".to_string(), data: resp.data }
        }
        Ok(resp) => {
            let msg = resp.msg.unwrap_or_default();
            warn!("pushplus rejected notification: code={} msg={}", resp.code, msg);
            PushOutcome::failed(format!("通知发送失败: {}", msg))
        }
        Err(e) => {
            warn!("pushplus request failed: {}", e);
            PushOutcome::failed(format!("发送通知时出错: {}", e))
        }
    }
}
